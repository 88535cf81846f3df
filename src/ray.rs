use crate::tuple::Tuple;
use crate::matrix::Matrix;
use crate::sphere::Sphere;
use crate::intersect::{ Intersection, Intersections };

/// A ray, cast from `origin` along `direction`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Ray {
    pub origin: Tuple,
    pub direction: Tuple,
}

impl Ray {
    pub fn new(origin: Tuple, direction: Tuple) -> Ray {
        Ray { origin, direction }
    }

    /// The point at distance `t` along the ray.
    pub fn position(&self, t: f64) -> Tuple {
        self.origin + (t * self.direction)
    }

    /// Applies a transformation matrix to both the origin and direction.
    pub fn transform(&self, m: &Matrix) -> Ray {
        Ray {
            origin: m * self.origin,
            direction: m * self.direction,
        }
    }

    /// Intersects this ray with a sphere.
    ///
    /// The ray is moved into object space with the sphere's inverse
    /// transform, where the sphere is the unit sphere at the origin. Returns
    /// either nothing (a miss) or exactly two intersections ordered by `t`.
    /// Both are kept when they coincide (a tangent ray), when they lie
    /// behind the origin, or when they straddle it (the origin is inside the
    /// sphere).
    pub fn intersect<'a>(&self, sphere: &'a Sphere) -> Intersections<'a> {
        let transformed_ray = self.transform(sphere.inverse_transform());
        let sphere_to_ray = transformed_ray.origin - Tuple::point(0.0, 0.0, 0.0);

        let a = transformed_ray.direction.dot(&transformed_ray.direction);
        let b = 2.0 * transformed_ray.direction.dot(&sphere_to_ray);
        let c = sphere_to_ray.dot(&sphere_to_ray) - 1.0;

        let discriminant = b.powi(2) - (4.0 * a * c);
        if discriminant < 0.0 {
            return Intersections::new();
        }

        let mut t1 = (-b - discriminant.sqrt()) / (2.0 * a);
        let mut t2 = (-b + discriminant.sqrt()) / (2.0 * a);
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        Intersections::from(vec![
            Intersection::new(t1, sphere),
            Intersection::new(t2, sphere),
        ])
    }
}

#[test]
fn create_and_query() {
    let origin = Tuple::point(1.0, 2.0, 3.0);
    let direction = Tuple::vector(4.0, 5.0, 6.0);
    let r = Ray::new(origin, direction);

    assert_eq!(r.origin, origin);
    assert_eq!(r.direction, direction);
}

#[test]
fn ray_position() {
    let r = Ray::new(
                Tuple::point(2.0, 3.0, 4.0),
                Tuple::vector(1.0, 0.0, 0.0)
            );

    assert_eq!(r.position(0.0), Tuple::point(2.0, 3.0, 4.0));
    assert_eq!(r.position(1.0), Tuple::point(3.0, 3.0, 4.0));
    assert_eq!(r.position(-1.0), Tuple::point(1.0, 3.0, 4.0));
    assert_eq!(r.position(2.5), Tuple::point(4.5, 3.0, 4.0));
}

#[test]
fn ray_translation() {
    let r = Ray::new(
                Tuple::point(1.0, 2.0, 3.0),
                Tuple::vector(0.0, 1.0, 0.0)
            );
    let m = Matrix::translation(3.0, 4.0, 5.0);
    let t = r.transform(&m);

    assert_eq!(t.origin, Tuple::point(4.0, 6.0, 8.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 1.0, 0.0));
}

#[test]
fn ray_scaling() {
    let r = Ray::new(
                Tuple::point(1.0, 2.0, 3.0),
                Tuple::vector(0.0, 1.0, 0.0)
            );
    let m = Matrix::scaling(2.0, 3.0, 4.0);
    let t = r.transform(&m);

    assert_eq!(t.origin, Tuple::point(2.0, 6.0, 12.0));
    assert_eq!(t.direction, Tuple::vector(0.0, 3.0, 0.0));
}

#[test]
fn transform_maps_origin_and_direction() {
    let rays = [
        Ray::new(Tuple::point(0.0, 0.0, -5.0), Tuple::vector(0.0, 0.0, 1.0)),
        Ray::new(Tuple::point(1.0, -2.0, 3.0), Tuple::vector(0.3, 0.4, -0.5)),
    ];
    let matrices = [
        Matrix::translation(1.0, 2.0, 3.0),
        Matrix::rotation_z(1.2),
        &Matrix::scaling(2.0, 0.5, 1.0) * &Matrix::shearing(0.0, 1.0, 0.0, 0.0, 2.0, 0.0),
    ];

    for r in rays.iter() {
        for m in matrices.iter() {
            let t = r.transform(m);
            assert_eq!(t.origin, m * r.origin);
            assert_eq!(t.direction, m * r.direction);
        }
    }
}

#[test]
fn transform_leaves_original_untouched() {
    let r = Ray::new(Tuple::point(1.0, 2.0, 3.0), Tuple::vector(0.0, 1.0, 0.0));
    let _ = r.transform(&Matrix::translation(3.0, 4.0, 5.0));

    assert_eq!(r.origin, Tuple::point(1.0, 2.0, 3.0));
}

#[test]
fn ray_pierces_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit();
    let xs = r.intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 4.0);
    assert_eq!(xs[1].t, 6.0);
}

#[test]
fn ray_is_tangent_to_sphere() {
    let r = Ray::new(Tuple::point(0.0, 1.0, -5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit();
    let xs = r.intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 5.0);
    assert_eq!(xs[1].t, 5.0);
}

#[test]
fn ray_misses_sphere() {
    let r = Ray::new(Tuple::point(0.0, 2.0, -5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit();

    assert!(r.intersect(&s).is_empty());
}

#[test]
fn ray_is_inside_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, 0.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit();
    let xs = r.intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, -1.0);
    assert_eq!(xs[1].t, 1.0);
}

#[test]
fn sphere_is_behind_ray() {
    let r = Ray::new(Tuple::point(0.0, 0.0, 5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit();
    let xs = r.intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, -6.0);
    assert_eq!(xs[1].t, -4.0);
}

#[test]
fn intersections_point_back_at_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit();
    let xs = r.intersect(&s);

    assert!(std::ptr::eq(xs[0].object, &s));
    assert!(std::ptr::eq(xs[1].object, &s));
}

#[test]
fn ray_hits_scaled_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit().with_transform(Matrix::scaling(2.0, 2.0, 2.0)).unwrap();
    let xs = r.intersect(&s);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 3.0);
    assert_eq!(xs[1].t, 7.0);
}

#[test]
fn ray_misses_translated_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::unit().with_transform(Matrix::translation(5.0, 0.0, 0.0)).unwrap();

    assert_eq!(r.intersect(&s).len(), 0);
}

#[test]
fn stored_center_does_not_move_sphere() {
    let r = Ray::new(Tuple::point(0.0, 0.0, -5.0),
                     Tuple::vector(0.0, 0.0, 1.0));
    let s = Sphere::new(Tuple::point(10.0, 0.0, 0.0), 3.0);
    let xs = r.intersect(&s);

    assert_eq!(xs[0].t, 4.0);
    assert_eq!(xs[1].t, 6.0);
}
