use std::fmt;
use std::ops::{ Add, Sub, Neg, Mul, Div };

use crate::feq;

/// A homogeneous 4D coordinate.
///
/// Points carry `w == 1.0` and vectors carry `w == 0.0`. Arithmetic is not
/// restricted to those two shapes; adding two points yields `w == 2.0`, which
/// is a perfectly good intermediate value.
///
/// Equality is approximate, see `crate::feq`.
#[derive(Debug, Default, Copy, Clone, PartialOrd)]
pub struct Tuple {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub w: f64
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Tuple) -> bool {
        feq(self.x, other.x) &&
            feq(self.y, other.y) &&
            feq(self.z, other.z) &&
            feq(self.w, other.w)
    }
}

impl Tuple {
    pub fn new(x: f64, y: f64, z: f64, w: f64) -> Tuple {
        Tuple { x, y, z, w }
    }

    pub fn point(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 1.0 }
    }

    pub fn vector(x: f64, y: f64, z: f64) -> Tuple {
        Tuple { x, y, z, w: 0.0 }
    }

    /// Exact check, no tolerance; only constructor-made points qualify.
    pub fn is_point(&self) -> bool {
        self.w == 1.0
    }

    /// Exact check, no tolerance; only constructor-made vectors qualify.
    pub fn is_vector(&self) -> bool {
        self.w == 0.0
    }

    /// Length of the tuple, `w` included.
    pub fn magnitude(&self) -> f64 {
        f64::sqrt(
            self.x.powi(2)
            + self.y.powi(2)
            + self.z.powi(2)
            + self.w.powi(2)
        )
    }

    /// Scales the tuple to unit length.
    ///
    /// The zero vector has no direction; normalizing it yields NaN
    /// components rather than an error.
    pub fn normalize(&self) -> Tuple {
        *self / self.magnitude()
    }

    /// Four component dot product.
    pub fn dot(&self, other: &Tuple) -> f64 {
        self.x * other.x
            + self.y * other.y
            + self.z * other.z
            + self.w * other.w
    }

    /// Three component cross product. Ignores `w` and always yields a vector.
    pub fn cross(&self, other: &Tuple) -> Tuple {
        Tuple {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
            w: 0.0
        }
    }

    /// Reflects this (incident) vector across a normal.
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple;
    /// let v = Tuple::vector(0.0, -1.0, 0.0);
    /// let n = Tuple::vector(2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0);
    /// assert_eq!(v.reflect(&n), Tuple::vector(1.0, 0.0, 0.0));
    /// ```
    pub fn reflect(&self, normal: &Tuple) -> Tuple {
        *self - (*normal * (2.0 * self.dot(normal)))
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_point() {
            write!(f, "Point( {:9.5}, {:9.5}, {:9.5} )", self.x, self.y, self.z)
        } else if self.is_vector() {
            write!(f, "Vector( {:9.5}, {:9.5}, {:9.5} )", self.x, self.y, self.z)
        } else {
            write!(f, "{{ {:9.5}, {:9.5}, {:9.5}, {:9.5} }}",
                self.x, self.y, self.z, self.w)
        }
    }
}

impl Add for Tuple {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
            w: self.w + other.w
        }
    }
}

impl Sub for Tuple {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
            w: self.w - other.w
        }
    }
}

impl Neg for Tuple {
    type Output = Self;

    fn neg(self) -> Self {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
            w: -self.w
        }
    }
}

/// Implements scalar right-multiplication for a tuple.
///
/// ```
/// use sphere_tracer::tuple::Tuple;
///
/// let t = Tuple::new(1.0, 2.0, 3.0, 4.0);
///
/// // (notice how the scalar is on the right)
/// assert_eq!(t * 5.0, Tuple::new(5.0, 10.0, 15.0, 20.0));
/// ```
impl Mul<f64> for Tuple {
    type Output = Self;

    fn mul(self, other: f64) -> Self {
        Self {
            x: self.x * other,
            y: self.y * other,
            z: self.z * other,
            w: self.w * other
        }
    }
}

/// Implements scalar left-multiplication for a tuple.
///
/// ```rust
/// use sphere_tracer::tuple::Tuple;
///
/// let t = Tuple::new(1.0, 2.0, 3.0, 4.0);
///
/// // (notice how the scalar is on the left)
/// assert_eq!(5.0 * t, Tuple::new(5.0, 10.0, 15.0, 20.0));
/// ```
impl Mul<Tuple> for f64 {
    type Output = Tuple;

    fn mul(self, other: Tuple) -> Tuple {
        other * self
    }
}

/// Divides every component by a scalar.
///
/// There is no guard against a zero divisor; the result holds infinities or
/// NaN in that case.
impl Div<f64> for Tuple {
    type Output = Self;

    fn div(self, other: f64) -> Self {
        Self {
            x: self.x / other,
            y: self.y / other,
            z: self.z / other,
            w: self.w / other
        }
    }
}

/* Tests */

#[test]
fn point_and_vector_constructors() {
    let p = Tuple::point(4.3, -4.2, 3.1);
    let v = Tuple::vector(4.3, -4.2, 3.1);

    assert_eq!(p, Tuple::new(4.3, -4.2, 3.1, 1.0));
    assert!(p.is_point() && !p.is_vector());
    assert_eq!(v, Tuple::new(4.3, -4.2, 3.1, 0.0));
    assert!(v.is_vector() && !v.is_point());
}

#[test]
fn point_check_has_no_tolerance() {
    let almost = Tuple::new(1.0, 2.0, 3.0, 1.0 + 1e-9);

    assert!(!almost.is_point());
    assert!(!almost.is_vector());
}

#[test]
fn add_tuples() {
    let a1 = Tuple::new(3.0, -2.0, 5.0, 1.0);
    let a2 = Tuple::new(-2.0, 3.0, 1.0, 0.0);

    assert_eq!(a1 + a2, Tuple::new(1.0, 1.0, 6.0, 1.0));
}

#[test]
fn add_points_is_neither() {
    let sum = Tuple::point(1.0, 1.0, 1.0) + Tuple::point(1.0, 1.0, 1.0);

    assert_eq!(sum.w, 2.0);
    assert!(!sum.is_point() && !sum.is_vector());
}

#[test]
fn sub_points() {
    let p1 = Tuple::point(3.0, 2.0, 1.0);
    let p2 = Tuple::point(5.0, 6.0, 7.0);

    assert_eq!(p1 - p2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vector_from_point() {
    let p = Tuple::point(3.0, 2.0, 1.0);
    let v = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(p - v, Tuple::point(-2.0, -4.0, -6.0));
}

#[test]
fn sub_vectors() {
    let v1 = Tuple::vector(3.0, 2.0, 1.0);
    let v2 = Tuple::vector(5.0, 6.0, 7.0);

    assert_eq!(v1 - v2, Tuple::vector(-2.0, -4.0, -6.0));
}

#[test]
fn neg_tuple() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(-a, Tuple::new(-1.0, 2.0, -3.0, 4.0));
}

#[test]
fn mul_scalar() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a * 3.5, Tuple::new(3.5, -7.0, 10.5, -14.0));
    assert_eq!(a * 0.5, Tuple::new(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn div_scalar() {
    let a = Tuple::new(1.0, -2.0, 3.0, -4.0);

    assert_eq!(a / 2.0, Tuple::new(0.5, -1.0, 1.5, -2.0));
}

#[test]
fn div_by_zero_is_not_finite() {
    let a = Tuple::vector(1.0, 0.0, 0.0) / 0.0;

    assert!(a.x.is_infinite());
    assert!(a.y.is_nan());
}

#[test]
fn magnitude() {
    assert_eq!(Tuple::vector(1.0, 0.0, 0.0).magnitude(), 1.0);
    assert_eq!(Tuple::vector(0.0, 0.0, 1.0).magnitude(), 1.0);
    assert_eq!(Tuple::vector(1.0, 2.0, 3.0).magnitude(), f64::sqrt(14.0));
    assert_eq!(Tuple::vector(-1.0, -2.0, -3.0).magnitude(), f64::sqrt(14.0));
}

#[test]
fn normalize_clean() {
    let v = Tuple::vector(4.0, 0.0, 0.0);

    assert_eq!(v.normalize(), Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn normalize_dirty() {
    let v = Tuple::vector(1.0, 2.0, 3.0);
    let e = Tuple::vector(
        1.0 / f64::sqrt(14.0),
        2.0 / f64::sqrt(14.0),
        3.0 / f64::sqrt(14.0)
    );

    assert_eq!(v.normalize(), e);
}

#[test]
fn normalized_vectors_have_unit_length() {
    let samples = [
        Tuple::vector(1.0, 2.0, 3.0),
        Tuple::vector(-0.001, 0.0, 0.002),
        Tuple::vector(1e6, -3e5, 42.0),
        Tuple::vector(0.0, -7.0, 0.0),
    ];

    for v in samples.iter() {
        assert!(crate::feq(v.normalize().magnitude(), 1.0));
    }
}

#[test]
fn normalize_zero_vector_is_nan() {
    let n = Tuple::vector(0.0, 0.0, 0.0).normalize();

    assert!(n.x.is_nan() && n.y.is_nan() && n.z.is_nan());
}

#[test]
fn dot_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.dot(&b), 20.0);
}

#[test]
fn dot_includes_w() {
    let a = Tuple::new(1.0, 1.0, 1.0, 2.0);
    let b = Tuple::new(1.0, 1.0, 1.0, 3.0);

    assert_eq!(a.dot(&b), 9.0);
}

#[test]
fn cross_vectors() {
    let a = Tuple::vector(1.0, 2.0, 3.0);
    let b = Tuple::vector(2.0, 3.0, 4.0);

    assert_eq!(a.cross(&b), Tuple::vector(-1.0, 2.0, -1.0));
    assert_eq!(b.cross(&a), Tuple::vector(1.0, -2.0, 1.0));
}

#[test]
fn cross_ignores_w() {
    let a = Tuple::point(1.0, 0.0, 0.0);
    let b = Tuple::point(0.0, 1.0, 0.0);

    let c = a.cross(&b);
    assert!(c.is_vector());
    assert_eq!(c, Tuple::vector(0.0, 0.0, 1.0));
}

#[test]
fn reflect_45() {
    let v = Tuple::vector(1.0, -1.0, 0.0);
    let n = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(v.reflect(&n), Tuple::vector(1.0, 1.0, 0.0));
}

#[test]
fn display_point_and_vector() {
    assert_eq!(format!("{}", Tuple::point(1.0, 2.0, 3.0)),
        "Point(   1.00000,   2.00000,   3.00000 )");
    assert_eq!(format!("{}", Tuple::vector(0.5, 0.0, -1.0)),
        "Vector(   0.50000,   0.00000,  -1.00000 )");
}
