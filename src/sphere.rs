use std::fmt;

use crate::feq;
use crate::tuple::Tuple;
use crate::matrix::Matrix;
use crate::light::Material;
use crate::error::Result;

#[cfg(test)]
use crate::color::Color;

/// A sphere.
///
/// Geometrically every sphere is the unit sphere at the object-space origin;
/// `transform` places it in the world (object space to world space). The
/// inverse of `transform` is computed once, whenever the transform changes,
/// so a sphere can never hold a transform that cannot be inverted.
///
/// `center` and `radius` are kept as given. Intersection ignores both, and
/// `normal_at` measures the object-space normal from `center`.
#[derive(Clone, Debug)]
pub struct Sphere {
    pub center: Tuple,
    pub radius: f64,
    pub material: Material,

    transform: Matrix,
    inverse_transform: Matrix,
}

impl Default for Sphere {
    fn default() -> Sphere {
        Sphere::unit()
    }
}

/// Checks that two spheres are equal, by value.
///
/// This is not identity; two distinct spheres with the same placement and
/// material compare equal.
impl PartialEq for Sphere {
    fn eq(&self, other: &Self) -> bool {
        self.center == other.center
            && feq(self.radius, other.radius)
            && self.transform == other.transform
            && self.material == other.material
    }
}

impl Sphere {
    /// Creates a sphere with identity transform and default material.
    pub fn new(center: Tuple, radius: f64) -> Sphere {
        Sphere {
            center,
            radius,
            material: Default::default(),
            transform: Matrix::identity(4),
            inverse_transform: Matrix::identity(4),
        }
    }

    /// Creates a unit sphere with identity transform and default material.
    pub fn unit() -> Sphere {
        Sphere::new(Tuple::point(0.0, 0.0, 0.0), 1.0)
    }

    /// Consumes the sphere, returning it with a new transform.
    ///
    /// ```
    /// # use sphere_tracer::sphere::Sphere;
    /// # use sphere_tracer::matrix::Matrix;
    /// let s = Sphere::unit().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap();
    /// assert_eq!(s.transform(), &Matrix::scaling(2.0, 2.0, 2.0));
    ///
    /// let flat = Sphere::unit().with_transform(Matrix::scaling(1.0, 0.0, 1.0));
    /// assert!(flat.is_err());
    /// ```
    pub fn with_transform(mut self, transform: Matrix) -> Result<Sphere> {
        self.set_transform(transform)?;
        Ok(self)
    }

    /// Consumes the sphere, returning it with a new material.
    pub fn with_material(mut self, material: Material) -> Sphere {
        self.material = material;
        self
    }

    /// Replaces the transform.
    ///
    /// Fails with `DegenerateMatrix` (leaving the sphere untouched) if the
    /// transform cannot be inverted.
    pub fn set_transform(&mut self, transform: Matrix) -> Result<()> {
        let inverse_transform = transform.inverse()?;
        self.transform = transform;
        self.inverse_transform = inverse_transform;

        Ok(())
    }

    pub fn transform(&self) -> &Matrix {
        &self.transform
    }

    /// World space to object space.
    pub fn inverse_transform(&self) -> &Matrix {
        &self.inverse_transform
    }

    /// Computes the unit surface normal at a point given in world space.
    ///
    /// The point is moved into object space, where the normal runs from the
    /// center to the point. It is carried back to world space with the
    /// transposed inverse transform, which keeps it perpendicular to the
    /// surface under scaling and shearing.
    pub fn normal_at(&self, world_point: Tuple) -> Tuple {
        let object_point = &self.inverse_transform * world_point;
        let object_normal = object_point - self.center;
        let mut world_normal = self.inverse_transform.transpose() * object_normal;

        // Translation leaks into w through the transposed inverse.
        world_normal.w = 0.0;

        world_normal.normalize()
    }
}

impl fmt::Display for Sphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sphere( {}, {} )", self.center, self.radius)
    }
}

#[test]
fn default_transformation() {
    let s = Sphere::unit();

    assert_eq!(s.transform(), &Matrix::identity(4));
    assert_eq!(s.inverse_transform(), &Matrix::identity(4));
    assert_eq!(s.material, Material::default());
}

#[test]
fn change_transformation() {
    let mut s = Sphere::unit();
    let t = Matrix::translation(2.0, 3.0, 4.0);
    s.set_transform(t.clone()).unwrap();

    assert_eq!(s.transform(), &t);
    assert_eq!(s.inverse_transform(), &Matrix::translation(-2.0, -3.0, -4.0));
}

#[test]
fn degenerate_transformation_is_rejected() {
    let mut s = Sphere::unit();
    let t = Matrix::translation(2.0, 3.0, 4.0);
    s.set_transform(t.clone()).unwrap();

    assert!(s.set_transform(Matrix::scaling(0.0, 1.0, 1.0)).is_err());
    assert_eq!(s.transform(), &t);
}

#[test]
fn assign_material() {
    let mut s = Sphere::unit();
    let mut m = Material::default();
    m.ambient = 1.0;
    s.material = m;

    assert_eq!(s.material, m);
}

#[test]
fn material_is_not_shared() {
    let mut s1 = Sphere::unit();
    let s2 = s1.clone();
    s1.material.color = Color::red();

    assert_eq!(s2.material.color, Color::white());
}

#[test]
fn normal_on_sphere_x() {
    let s = Sphere::unit();
    let n = s.normal_at(Tuple::point(1.0, 0.0, 0.0));

    assert_eq!(n, Tuple::vector(1.0, 0.0, 0.0));
}

#[test]
fn normal_on_sphere_y() {
    let s = Sphere::unit();
    let n = s.normal_at(Tuple::point(0.0, 1.0, 0.0));

    assert_eq!(n, Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn normal_on_sphere_z() {
    let s = Sphere::unit();
    let n = s.normal_at(Tuple::point(0.0, 0.0, 1.0));

    assert_eq!(n, Tuple::vector(0.0, 0.0, 1.0));
}

#[test]
fn normal_on_sphere_nonaxial() {
    let s = Sphere::unit();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Tuple::point(k, k, k));

    assert_eq!(n, Tuple::vector(k, k, k));
}

#[test]
fn normal_is_normalized() {
    let s = Sphere::unit();
    let k = 3.0f64.sqrt() / 3.0;
    let n = s.normal_at(Tuple::point(k, k, k));

    assert_eq!(n, n.normalize());
    assert!(n.is_vector());
}

#[test]
fn normal_on_sphere_translated() {
    let s = Sphere::unit()
        .with_transform(Matrix::translation(0.0, 1.0, 0.0))
        .unwrap();
    let n = s.normal_at(Tuple::point(0.0, 1.70711, -0.70711));

    assert_eq!(n, Tuple::vector(0.0, 0.70711, -0.70711));
}

#[test]
fn normal_on_sphere_transformed() {
    let s = Sphere::unit()
        .with_transform(Matrix::scaling(1.0, 0.5, 1.0)
            * Matrix::rotation_z(std::f64::consts::PI / 5.0))
        .unwrap();
    let n = s.normal_at(
        Tuple::point(0.0, 2.0f64.sqrt() / 2.0, -(2.0f64.sqrt() / 2.0))
    );

    assert_eq!(n, Tuple::vector(0.0, 0.97014, -0.24254));
}

#[test]
fn spheres_compare_by_value() {
    let a = Sphere::unit().with_transform(Matrix::scaling(0.5, 0.5, 0.5)).unwrap();
    let b = Sphere::unit().with_transform(Matrix::scaling(0.5, 0.5, 0.5)).unwrap();

    assert_eq!(a, b);
    assert_ne!(a, Sphere::unit());
    assert_ne!(Sphere::unit(), Sphere::new(Tuple::point(0.0, 0.0, 0.0), 2.0));
}
