use crate::ray::Ray;
use crate::tuple::Tuple;
use crate::color::Color;
use crate::matrix::Matrix;
use crate::light::{ PointLight, Material };
use crate::sphere::Sphere;
use crate::intersect::{ Intersections, IntersectionComputation };

/// A world with objects and lights.
///
/// Worlds collect all spheres as well as the light sources for rendering.
/// Most of the tracing logic is driven from here: a ray is intersected with
/// every object, the hit is prepared, then shaded under every light.
#[derive(Clone, Debug)]
pub struct World {
    pub objects: Vec<Sphere>,
    pub light_sources: Vec<PointLight>,
}

/// The default world.
///
/// A white light at (-10, 10, -10) and two concentric spheres: a unit sphere
/// with a greenish material, and a half-size sphere with the default
/// material inside it.
impl Default for World {
    fn default() -> World {
        let light_source = PointLight::new(
            Color::rgb(1.0, 1.0, 1.0),
            Tuple::point(-10.0, 10.0, -10.0)
        );

        let mut s1 = Sphere::unit();
        let mut m1: Material = Default::default();
        m1.color = Color::rgb(0.8, 1.0, 0.6);
        m1.diffuse = 0.7;
        m1.specular = 0.2;
        s1.material = m1;

        let mut s2 = Sphere::unit();
        let half = Matrix::scaling(0.5, 0.5, 0.5);
        if s2.set_transform(half).is_err() {
            unreachable!("uniform scaling by 0.5 is invertible");
        }

        World {
            objects: vec![s1, s2],
            light_sources: vec![light_source],
        }
    }
}

impl World {
    /// Creates a world from spheres and light sources.
    pub fn new(objects: Vec<Sphere>, light_sources: Vec<PointLight>) -> World {
        World { objects, light_sources }
    }

    /// Creates an empty world with no objects and no light sources.
    pub fn empty() -> World {
        World { objects: Vec::new(), light_sources: Vec::new() }
    }

    /// Checks whether an equal sphere is part of this world.
    pub fn contains(&self, sphere: &Sphere) -> bool {
        self.objects.iter().any(|o| o == sphere)
    }

    pub fn add_object(&mut self, sphere: Sphere) {
        self.objects.push(sphere);
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.light_sources.push(light);
    }

    /// Intersects a ray against all objects in a world.
    ///
    /// The returned intersections are sorted by ascending `t` and borrow the
    /// spheres stored in `objects`.
    pub fn intersect(&self, r: Ray) -> Intersections<'_> {
        let mut intersections = Intersections::new();
        for obj in self.objects.iter() {
            intersections.extend(r.intersect(obj));
        }

        intersections.sort();
        intersections
    }

    /// Calculates the color for a prepared hit.
    ///
    /// Every light source contributes its Phong lighting; the contributions
    /// are summed. A world without lights shades everything black.
    pub fn shade_hit(&self, comps: &IntersectionComputation) -> Color {
        let material = &comps.object.material;

        self.light_sources.iter().fold(Color::black(), |color, light| {
            color + material.lighting(light, comps.point, comps.eyev,
                comps.normalv)
        })
    }

    /// Determines a color based on the intersection of a ray and the objects.
    pub fn color_at(&self, r: Ray) -> Color {
        let hit = self.intersect(r).hit();

        // If at least one object is hit, return the color, else return black
        match hit {
            None => Color::black(),
            Some(i) => self.shade_hit(&i.prepare(&r)),
        }
    }
}

#[cfg(test)]
fn ray_down_z() -> Ray {
    Ray::new(
        Tuple::point(0.0, 0.0, -5.0),
        Tuple::vector(0.0, 0.0, 1.0),
    )
}

#[test]
fn create_empty_world() {
    let w = World::empty();

    assert!(w.objects.is_empty());
    assert!(w.light_sources.is_empty());
}

#[test]
fn default_world_contents() {
    let w: World = Default::default();

    let light = PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple::point(-10.0, 10.0, -10.0),
    );

    let mut s1 = Sphere::unit();
    s1.material.color = Color::rgb(0.8, 1.0, 0.6);
    s1.material.diffuse = 0.7;
    s1.material.specular = 0.2;

    let s2 = Sphere::unit()
        .with_transform(Matrix::scaling(0.5, 0.5, 0.5))
        .unwrap();

    assert_eq!(w.light_sources, vec![light]);
    assert!(w.contains(&s1));
    assert!(w.contains(&s2));
    assert!(!w.contains(&Sphere::unit()));
}

#[test]
fn build_world_piecewise() {
    let mut w = World::empty();
    w.add_object(Sphere::unit());
    w.add_light(PointLight::new(Color::white(), Tuple::point(0.0, 0.0, -10.0)));

    assert_eq!(w.objects.len(), 1);
    assert_eq!(w.light_sources.len(), 1);
    assert!(w.contains(&Sphere::unit()));
}

#[test]
fn intersect_default_world_with_ray() {
    let w: World = Default::default();
    let xs = w.intersect(ray_down_z());

    assert_eq!(xs.len(), 4);
    assert_eq!(xs[0].t, 4.0);
    assert_eq!(xs[1].t, 4.5);
    assert_eq!(xs[2].t, 5.5);
    assert_eq!(xs[3].t, 6.0);
}

#[test]
fn intersections_borrow_world_objects() {
    let w: World = Default::default();
    let xs = w.intersect(ray_down_z());

    assert!(std::ptr::eq(xs[0].object, &w.objects[0]));
    assert!(std::ptr::eq(xs[1].object, &w.objects[1]));
    assert!(std::ptr::eq(xs[2].object, &w.objects[1]));
    assert!(std::ptr::eq(xs[3].object, &w.objects[0]));
}

#[test]
fn intersect_empty_world() {
    let w = World::empty();

    assert!(w.intersect(ray_down_z()).is_empty());
}

#[test]
fn shade_intersection_from_outside() {
    use crate::intersect::Intersection;

    let w: World = Default::default();
    let r = ray_down_z();

    let i = Intersection::new(4.0, &w.objects[0]);
    let comps = i.prepare(&r);
    let c = w.shade_hit(&comps);

    assert_eq!(c, Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn shade_intersection_from_inside() {
    use crate::intersect::Intersection;

    let mut w: World = Default::default();
    w.light_sources = vec![PointLight::new(
        Color::rgb(1.0, 1.0, 1.0),
        Tuple::point(0.0, 0.25, 0.0),
    )];

    let r = Ray::new(
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::vector(0.0, 0.0, 1.0),
    );

    let i = Intersection::new(0.5, &w.objects[1]);
    let comps = i.prepare(&r);
    let c = w.shade_hit(&comps);

    assert!(comps.inside);
    assert_eq!(c, Color::rgb(0.90498, 0.90498, 0.90498));
}

#[test]
fn shade_sums_light_sources() {
    use crate::intersect::Intersection;

    let mut w: World = Default::default();
    let r = ray_down_z();

    let single = {
        let i = Intersection::new(4.0, &w.objects[0]);
        w.shade_hit(&i.prepare(&r))
    };

    let light = w.light_sources[0];
    w.add_light(light);

    let i = Intersection::new(4.0, &w.objects[0]);
    assert_eq!(w.shade_hit(&i.prepare(&r)), single * 2.0);
}

#[test]
fn shade_without_lights_is_black() {
    use crate::intersect::Intersection;

    let mut w: World = Default::default();
    w.light_sources.clear();

    let r = ray_down_z();
    let i = Intersection::new(4.0, &w.objects[0]);

    assert_eq!(w.shade_hit(&i.prepare(&r)), Color::black());
}

#[test]
fn color_ray_miss() {
    let w: World = Default::default();
    let r = Ray::new(
        Tuple::point(0.0, 0.0, -5.0),
        Tuple::vector(0.0, 1.0, 0.0),
    );

    assert_eq!(w.color_at(r), Color::black());
}

#[test]
fn color_ray_hit() {
    let w: World = Default::default();

    assert_eq!(w.color_at(ray_down_z()), Color::rgb(0.38066, 0.47583, 0.2855));
}

#[test]
fn color_behind_ray() {
    let mut w: World = Default::default();
    w.objects[0].material.ambient = 1.0;
    w.objects[1].material.ambient = 1.0;

    let r = Ray::new(
        Tuple::point(0.0, 0.0, 0.75),
        Tuple::vector(0.0, 0.0, -1.0)
    );

    let inner_color = w.objects[1].material.color;
    assert_eq!(w.color_at(r), inner_color);
}

#[test]
fn color_of_sphere_behind_origin_is_black() {
    let w: World = Default::default();
    let r = Ray::new(
        Tuple::point(0.0, 0.0, 5.0),
        Tuple::vector(0.0, 0.0, 1.0),
    );

    assert_eq!(w.color_at(r), Color::black());
}
