pub mod consts;
pub mod error;

pub mod tuple;
pub mod matrix;
pub mod transform;
pub mod ray;
pub mod light;

pub mod sphere;
pub mod intersect;
pub mod world;
pub mod camera;
pub mod parallel;
pub mod scene;

pub mod color;
pub mod canvas;

pub use error::{ Result, TraceError };

use crate::consts::EPSILON;

/// Approximate floating point equality, shared by every value type.
pub fn feq(left: f64, right: f64) -> bool {
    (left - right).abs() < EPSILON
}
