//! Factories for the affine transformations used to place spheres and
//! cameras.
//!
//! Transformations compose by matrix multiplication and apply right to left:
//! `&(&translate * &scale) * &rotate` rotates first, then scales, then
//! translates.

use crate::tuple::Tuple;
use crate::matrix::Matrix;

impl Matrix {
    /// Instantiates a 4x4 translation matrix.
    ///
    /// This matrix offsets a point by `x`, `y` and `z`. Vectors are left
    /// untouched, since their `w` is zero.
    pub fn translation(x: f64, y: f64, z: f64) -> Matrix {
        let mut trans = Matrix::identity(4);
        trans[(0, 3)] = x;
        trans[(1, 3)] = y;
        trans[(2, 3)] = z;

        trans
    }

    /// Instantiates a 4x4 scaling matrix.
    ///
    /// This matrix scales vectors or points by `x`, `y` and `z` along the X, Y
    /// and Z axes, respectively. A negative factor reflects across that axis.
    pub fn scaling(x: f64, y: f64, z: f64) -> Matrix {
        let mut scale = Matrix::identity(4);
        scale[(0, 0)] = x;
        scale[(1, 1)] = y;
        scale[(2, 2)] = z;

        scale
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the X axis.
    ///
    /// Assumes that parameter `r` is in radians.
    ///
    /// # Examples
    ///
    /// Create a matrix to rotate a point 90 degrees about the X axis:
    ///
    /// ```
    /// # #![allow(unused)]
    /// # use sphere_tracer::tuple::Tuple;
    /// # use sphere_tracer::matrix::Matrix;
    /// let point = Tuple::point(0.0, 1.0, 0.0);
    /// let m = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple::point(0.0, 0.0, 1.0));
    /// ```
    pub fn rotation_x(r: f64) -> Matrix {
        let mut rotate = Matrix::identity(4);
        rotate[(1, 1)] =  r.cos();
        rotate[(1, 2)] = -r.sin();
        rotate[(2, 1)] =  r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Y axis.
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple;
    /// # use sphere_tracer::matrix::Matrix;
    /// let point = Tuple::point(1.0, 0.0, 0.0);
    /// let m = Matrix::rotation_y(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple::point(0.0, 0.0, -1.0));
    /// ```
    pub fn rotation_y(r: f64) -> Matrix {
        let mut rotate = Matrix::identity(4);
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 2)] =  r.sin();
        rotate[(2, 0)] = -r.sin();
        rotate[(2, 2)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 rotation matrix, rotating about the Z axis.
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple;
    /// # use sphere_tracer::matrix::Matrix;
    /// let point = Tuple::point(0.0, 1.0, 0.0);
    /// let m = Matrix::rotation_z(std::f64::consts::PI / 2.0);
    /// assert_eq!(m * point, Tuple::point(-1.0, 0.0, 0.0));
    /// ```
    pub fn rotation_z(r: f64) -> Matrix {
        let mut rotate = Matrix::identity(4);
        rotate[(0, 0)] =  r.cos();
        rotate[(0, 1)] = -r.sin();
        rotate[(1, 0)] =  r.sin();
        rotate[(1, 1)] =  r.cos();

        rotate
    }

    /// Instantiates a 4x4 shearing matrix.
    ///
    /// Each parameter moves one coordinate in proportion to another; `xy`
    /// moves `x` in proportion to `y`, `zx` moves `z` in proportion to `x`,
    /// and so on.
    ///
    /// ```
    /// # use sphere_tracer::tuple::Tuple;
    /// # use sphere_tracer::matrix::Matrix;
    /// let point = Tuple::point(2.0, 3.0, 4.0);
    /// let m = Matrix::shearing(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
    /// assert_eq!(m * point, Tuple::point(5.0, 3.0, 4.0));
    /// ```
    pub fn shearing(xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64)
        -> Matrix {
        let mut shear = Matrix::identity(4);
        shear[(0, 1)] = xy;
        shear[(0, 2)] = xz;
        shear[(1, 0)] = yx;
        shear[(1, 2)] = yz;
        shear[(2, 0)] = zx;
        shear[(2, 1)] = zy;

        shear
    }

    /// Generates a view transformation.
    ///
    /// The `from` parameter is where the eye is, the `to` parameter is where
    /// the eye is looking, and the `up` parameter indicates roughly where "up"
    /// is in the world.
    ///
    /// Note that the view transformation moves the *world* with respect to the
    /// eye, not the other way around.
    pub fn view_transform(from: Tuple, to: Tuple, up: Tuple) -> Matrix {
        let forward = (to - from).normalize();
        let left = forward.cross(&up.normalize());
        let true_up = left.cross(&forward);

        let mut orientation = Matrix::identity(4);
        orientation[(0, 0)] = left.x;
        orientation[(0, 1)] = left.y;
        orientation[(0, 2)] = left.z;

        orientation[(1, 0)] = true_up.x;
        orientation[(1, 1)] = true_up.y;
        orientation[(1, 2)] = true_up.z;

        orientation[(2, 0)] = -forward.x;
        orientation[(2, 1)] = -forward.y;
        orientation[(2, 2)] = -forward.z;

        orientation * Matrix::translation(-from.x, -from.y, -from.z)
    }
}

#[test]
fn translation() {
    let transform = Matrix::translation(5.0, -3.0, 2.0);
    let point = Tuple::point(-3.0, 4.0, 5.0);

    assert_eq!(&transform * point, Tuple::point(2.0, 1.0, 7.0));
}

#[test]
fn translation_inverse() {
    let transform = Matrix::translation(5.0, -3.0, 2.0).inverse().unwrap();
    let point = Tuple::point(-3.0, 4.0, 5.0);

    assert_eq!(&transform * point, Tuple::point(-8.0, 7.0, 3.0));
}

#[test]
fn translation_inverse_is_negated_translation() {
    let offsets = [(5.0, -3.0, 2.0), (0.0, 0.0, 0.0), (-1.5, 100.0, 0.25)];

    for &(x, y, z) in offsets.iter() {
        assert_eq!(Matrix::translation(x, y, z).inverse().unwrap(),
            Matrix::translation(-x, -y, -z));
    }
}

#[test]
fn translation_ignores_vectors() {
    let transform = Matrix::translation(5.0, -3.0, 2.0);
    let vector = Tuple::vector(-3.0, 4.0, 5.0);

    assert_eq!(&transform * vector, vector);
}

#[test]
fn scaling() {
    let transform = Matrix::scaling(2.0, 3.0, 4.0);

    assert_eq!(&transform * Tuple::point(-4.0, 6.0, 8.0),
        Tuple::point(-8.0, 18.0, 32.0));
    assert_eq!(&transform * Tuple::vector(-4.0, 6.0, 8.0),
        Tuple::vector(-8.0, 18.0, 32.0));
}

#[test]
fn scaling_inverse() {
    let transform = Matrix::scaling(2.0, 3.0, 4.0).inverse().unwrap();
    let vector = Tuple::vector(-4.0, 6.0, 8.0);

    assert_eq!(&transform * vector, Tuple::vector(-2.0, 2.0, 2.0));
}

#[test]
fn scaling_reflection() {
    let transform = Matrix::scaling(-1.0, 1.0, 1.0);
    let point = Tuple::point(2.0, 3.0, 4.0);

    assert_eq!(&transform * point, Tuple::point(-2.0, 3.0, 4.0));
}

#[test]
fn rotate_x() {
    let half_quarter = Matrix::rotation_x(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    let point = Tuple::point(0.0, 1.0, 0.0);

    assert_eq!(&full_quarter * point,
        Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(&half_quarter * point,
        Tuple::point(0.0, 2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn rotate_x_inverse_goes_backwards() {
    let half_quarter = Matrix::rotation_x(std::f64::consts::PI / 4.0);
    let inv = half_quarter.inverse().unwrap();
    let point = Tuple::point(0.0, 1.0, 0.0);

    assert_eq!(&inv * point,
        Tuple::point(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt()) / 2.0));
}

#[test]
fn rotate_y() {
    let half_quarter = Matrix::rotation_y(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix::rotation_y(std::f64::consts::PI / 2.0);
    let point = Tuple::point(0.0, 0.0, 1.0);

    assert_eq!(&full_quarter * point,
        Tuple::point(1.0, 0.0, 0.0));
    assert_eq!(&half_quarter * point,
        Tuple::point(2.0f64.sqrt() / 2.0, 0.0, 2.0f64.sqrt() / 2.0));
}

#[test]
fn rotate_z() {
    let half_quarter = Matrix::rotation_z(std::f64::consts::PI / 4.0);
    let full_quarter = Matrix::rotation_z(std::f64::consts::PI / 2.0);
    let point = Tuple::point(0.0, 1.0, 0.0);

    assert_eq!(&full_quarter * point,
        Tuple::point(-1.0, 0.0, 0.0));
    assert_eq!(&half_quarter * point,
        Tuple::point(-2.0f64.sqrt() / 2.0, 2.0f64.sqrt() / 2.0, 0.0));
}

#[test]
fn shear_each_axis() {
    let point = Tuple::point(2.0, 3.0, 4.0);
    let cases = [
        ([1.0, 0.0, 0.0, 0.0, 0.0, 0.0], Tuple::point(5.0, 3.0, 4.0)),
        ([0.0, 1.0, 0.0, 0.0, 0.0, 0.0], Tuple::point(6.0, 3.0, 4.0)),
        ([0.0, 0.0, 1.0, 0.0, 0.0, 0.0], Tuple::point(2.0, 5.0, 4.0)),
        ([0.0, 0.0, 0.0, 1.0, 0.0, 0.0], Tuple::point(2.0, 7.0, 4.0)),
        ([0.0, 0.0, 0.0, 0.0, 1.0, 0.0], Tuple::point(2.0, 3.0, 6.0)),
        ([0.0, 0.0, 0.0, 0.0, 0.0, 1.0], Tuple::point(2.0, 3.0, 7.0)),
    ];

    for (s, expected) in cases.iter() {
        let transform = Matrix::shearing(s[0], s[1], s[2], s[3], s[4], s[5]);
        assert_eq!(&transform * point, *expected);
    }
}

#[test]
fn sequential_transforms() {
    let a = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix::scaling(5.0, 5.0, 5.0);
    let c = Matrix::translation(10.0, 5.0, 7.0);
    let p = Tuple::point(1.0, 0.0, 1.0);

    let p2 = &a * p;
    assert_eq!(p2, Tuple::point(1.0, -1.0, 0.0));
    let p3 = &b * p2;
    assert_eq!(p3, Tuple::point(5.0, -5.0, 0.0));
    let p4 = &c * p3;
    assert_eq!(p4, Tuple::point(15.0, 0.0, 7.0));
}

#[test]
fn chained_transforms() {
    let a = Matrix::rotation_x(std::f64::consts::PI / 2.0);
    let b = Matrix::scaling(5.0, 5.0, 5.0);
    let c = Matrix::translation(10.0, 5.0, 7.0);

    let t = c * b * a;
    let p = Tuple::point(1.0, 0.0, 1.0);

    assert_eq!(t * p, Tuple::point(15.0, 0.0, 7.0));
}

#[test]
fn default_view() {
    let from = Tuple::point(0.0, 0.0, 0.0);
    let to = Tuple::point(0.0, 0.0, -1.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::identity(4), Matrix::view_transform(from, to, up));
}

#[test]
fn positive_z_view() {
    let from = Tuple::point(0.0, 0.0, 0.0);
    let to = Tuple::point(0.0, 0.0, 1.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up),
        Matrix::scaling(-1.0, 1.0, -1.0));
}

#[test]
fn view_moves_world() {
    let from = Tuple::point(0.0, 0.0, 8.0);
    let to = Tuple::point(0.0, 0.0, 0.0);
    let up = Tuple::vector(0.0, 1.0, 0.0);

    assert_eq!(Matrix::view_transform(from, to, up),
        Matrix::translation(0.0, 0.0, -8.0));
}

#[test]
fn arbitrary_view() {
    let from = Tuple::point(1.0, 3.0, 2.0);
    let to = Tuple::point(4.0, -2.0, 8.0);
    let up = Tuple::vector(1.0, 1.0, 0.0);

    let a: Matrix = [ -0.50709, 0.50709,  0.67612, -2.36643,
                       0.76772, 0.60609,  0.12122, -2.82843,
                      -0.35857, 0.59761, -0.71714,  0.00000,
                       0.00000, 0.00000,  0.00000,  1.00000, ].into();

    assert_eq!(Matrix::view_transform(from, to, up), a);
}
