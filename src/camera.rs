use log::{ debug, trace, warn };

use crate::ray::Ray;
use crate::tuple::Tuple;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::world::World;
use crate::canvas::Canvas;
use crate::error::Result;

/// A camera record for generating a canvas.
///
/// This record gives a "frame" of the world. The canvas sits one unit in
/// front of the eye; based on camera parameters, different perspectives can
/// be produced.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// The horizontal size of the resultant canvas.
    pub hsize: usize,

    /// The vertical size of the resultant canvas.
    pub vsize: usize,

    pub half_width: f64,
    pub half_height: f64,
    pub pixel_size: f64,

    /// The angle describing "how much" the camera can see.
    pub field_of_view: f64,

    /// How the world is oriented relative to the camera (typically a view
    /// transformation), with its inverse cached.
    transform: Matrix,
    inverse_transform: Matrix,
}

impl Camera {
    /// Creates a camera with the identity transform.
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Camera {
        let half_view = (field_of_view / 2.0).tan();
        let aspect = (hsize as f64) / (vsize as f64);

        let (half_width, half_height) = if aspect >= 1.0 {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = half_width * 2.0 / (hsize as f64);
        Camera {
            hsize,
            vsize,
            half_width,
            half_height,
            pixel_size,
            field_of_view,
            transform: Matrix::identity(4),
            inverse_transform: Matrix::identity(4),
        }
    }

    /// Consumes the camera, returning it with a new transform.
    pub fn with_transform(mut self, transform: Matrix) -> Result<Camera> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Replaces the camera transform. Fails, leaving the camera untouched,
    /// if the transform cannot be inverted.
    pub fn set_transform(&mut self, transform: Matrix) -> Result<()> {
        let inverse_transform = transform.inverse()?;
        self.transform = transform;
        self.inverse_transform = inverse_transform;

        Ok(())
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// The same view at a different canvas size.
    pub fn resized(&self, hsize: usize, vsize: usize) -> Camera {
        Camera {
            transform: self.transform.clone(),
            inverse_transform: self.inverse_transform.clone(),
            ..Camera::new(hsize, vsize, self.field_of_view)
        }
    }

    /// Builds the ray from the eye through the center of pixel `(px, py)`.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        // Offsets from the edge of the canvas to the pixel's center
        let xoffset = (px as f64 + 0.5) * self.pixel_size;
        let yoffset = (py as f64 + 0.5) * self.pixel_size;

        // The untransformed coordinates of the pixel in world space
        let world_x = self.half_width - xoffset;
        let world_y = self.half_height - yoffset;

        // Using the camera matrix, transform the canvas point and origin,
        // computing the ray's direction vector
        let pixel = &self.inverse_transform * Tuple::point(world_x, world_y, -1.0);
        let origin = &self.inverse_transform * Tuple::point(0.0, 0.0, 0.0);
        let direction = (pixel - origin).normalize();

        Ray::new(origin, direction)
    }

    /// Colors one row of pixels.
    pub fn render_row(&self, w: &World, y: usize) -> Vec<Color> {
        (0..self.hsize)
            .map(|x| w.color_at(self.ray_for_pixel(x, y)))
            .collect()
    }

    /// Renders a world on the calling thread, one `color_at` per pixel.
    pub fn render(&self, w: &World) -> Canvas {
        if w.light_sources.is_empty() {
            warn!("world has no light sources; every hit will be black");
        }
        debug!("rendering {}x{} pixels, {} objects", self.hsize, self.vsize,
            w.objects.len());

        let mut image = Canvas::new(self.hsize, self.vsize);

        for y in 0..self.vsize {
            trace!("row {} of {}", y + 1, self.vsize);
            image.write_row(y, &self.render_row(w, y));
        }

        image
    }
}

#[test]
fn construct_camera() {
    let c = Camera::new(160, 120, std::f64::consts::PI / 2.0);

    assert_eq!(c.hsize, 160);
    assert_eq!(c.vsize, 120);
    assert_eq!(c.field_of_view, std::f64::consts::PI / 2.0);
    assert_eq!(c.transform(), &Matrix::identity(4));
}

#[test]
fn pixel_size_horizontal_canvas() {
    let c = Camera::new(200, 125, std::f64::consts::PI / 2.0);

    assert!(crate::feq(c.pixel_size, 0.01));
}

#[test]
fn pixel_size_vertical_canvas() {
    let c = Camera::new(125, 200, std::f64::consts::PI / 2.0);

    assert!(crate::feq(c.pixel_size, 0.01));
}

#[test]
fn ray_through_center() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple::vector(0.0, 0.0, -1.0));
}

#[test]
fn ray_through_corner() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0);
    let r = c.ray_for_pixel(0, 0);

    assert_eq!(r.origin, Tuple::point(0.0, 0.0, 0.0));
    assert_eq!(r.direction, Tuple::vector(0.66519, 0.33259, -0.66851));
}

#[test]
fn ray_when_camera_transformed() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0)
        .with_transform(Matrix::rotation_y(std::f64::consts::PI / 4.0)
            * Matrix::translation(0.0, -2.0, 5.0))
        .unwrap();
    let r = c.ray_for_pixel(100, 50);

    assert_eq!(r.origin, Tuple::point(0.0, 2.0, -5.0));
    assert_eq!(r.direction,
        Tuple::vector(2.0f64.sqrt() / 2.0, 0.0, -(2.0f64.sqrt() / 2.0)));
}

#[test]
fn resized_camera_keeps_view() {
    let c = Camera::new(201, 101, std::f64::consts::PI / 2.0)
        .with_transform(Matrix::translation(0.0, -2.0, 5.0))
        .unwrap();
    let r = c.resized(21, 11);

    assert_eq!(r.hsize, 21);
    assert_eq!(r.vsize, 11);
    assert_eq!(r.transform(), c.transform());
    assert_eq!(r.ray_for_pixel(10, 5).origin, c.ray_for_pixel(100, 50).origin);
    assert_eq!(r.ray_for_pixel(10, 5).direction,
        c.ray_for_pixel(100, 50).direction);
}

#[test]
fn degenerate_camera_transform_is_rejected() {
    let mut c = Camera::new(10, 10, std::f64::consts::PI / 2.0);

    assert!(c.set_transform(Matrix::new(4)).is_err());
    assert_eq!(c.transform(), &Matrix::identity(4));
}

#[test]
fn render_world_with_camera() {
    let w: World = Default::default();

    let from = Tuple::point(0.0, 0.0, -5.0);
    let to = Tuple::point(0.0, 0.0, 0.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    let c = Camera::new(11, 11, std::f64::consts::PI / 2.0)
        .with_transform(Matrix::view_transform(from, to, up))
        .unwrap();

    let image = c.render(&w);
    assert_eq!(image.read_pixel(5, 5).unwrap(),
        Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn render_empty_world_is_black() {
    let w = World::empty();
    let c = Camera::new(4, 3, std::f64::consts::PI / 2.0);

    assert_eq!(c.render(&w), Canvas::new(4, 3));
}
