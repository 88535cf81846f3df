use std::ops::Deref;

use crate::tuple::Tuple;
use crate::ray::Ray;
use crate::sphere::Sphere;

/// An intersection.
///
/// This structure assumes that some ray produced an intersection. Parameter `t`
/// is analogous to `t` for a ray (the offset from the ray origin).
///
/// The `object` parameter borrows the sphere that was struck, so shading can
/// reach that sphere's own material and transform. When intersecting a
/// `World`, the borrow points into `World::objects`.
#[derive(Copy, Clone, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Sphere,
}

/// Implements partial equality on an Intersection.
///
/// Two Intersection structures are equal if the offsets `t` of the
/// intersections are equivalent, and if they refer to the *same* sphere
/// (pointer identity, not value equality).
impl<'a> PartialEq for Intersection<'a> {
    fn eq(&self, other: &Intersection<'a>) -> bool {
        self.t == other.t && std::ptr::eq(self.object, other.object)
    }
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Sphere) -> Intersection<'a> {
        Intersection { t, object }
    }

    /// Precomputes the values needed to shade this intersection.
    pub fn prepare(&self, r: &Ray) -> IntersectionComputation<'a> {
        IntersectionComputation::new(r, self)
    }
}

/// A collection of intersections.
///
/// Mostly a wrapper for a vector of `Intersection` objects. Construction does
/// not sort; `World::intersect` sorts before handing the collection back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Intersections<'a> {
    intersections: Vec<Intersection<'a>>,
}

impl<'a> From<Vec<Intersection<'a>>> for Intersections<'a> {
    fn from(intersections: Vec<Intersection<'a>>) -> Intersections<'a> {
        Intersections { intersections }
    }
}

impl<'a> Deref for Intersections<'a> {
    type Target = [Intersection<'a>];

    fn deref(&self) -> &[Intersection<'a>] {
        &self.intersections
    }
}

impl<'a> IntoIterator for Intersections<'a> {
    type Item = Intersection<'a>;
    type IntoIter = std::vec::IntoIter<Intersection<'a>>;

    fn into_iter(self) -> Self::IntoIter {
        self.intersections.into_iter()
    }
}

impl<'a> Extend<Intersection<'a>> for Intersections<'a> {
    fn extend<I: IntoIterator<Item = Intersection<'a>>>(&mut self, iter: I) {
        self.intersections.extend(iter);
    }
}

impl<'a> Intersections<'a> {
    /// Creates a new list of intersections.
    pub fn new() -> Intersections<'a> {
        Intersections { intersections: Vec::new() }
    }

    pub fn push(&mut self, i: Intersection<'a>) {
        self.intersections.push(i);
    }

    /// Finds the hit: the intersection with the smallest strictly positive
    /// `t`.
    ///
    /// Intersections at or behind the ray origin never count. Returns `None`
    /// if nothing qualifies. The collection does not need to be sorted.
    pub fn hit(&self) -> Option<Intersection<'a>> {
        self.intersections.iter()
            .filter(|i| i.t > 0.0)
            .fold(None, |best: Option<Intersection<'a>>, i| match best {
                Some(b) if b.t <= i.t => Some(b),
                _ => Some(*i),
            })
    }

    /// Sorts the intersections by ascending `t`, ignoring `f64` semantics.
    pub fn sort(&mut self) {
        self.intersections.sort_by(|a, b|
            a.t.partial_cmp(&b.t).unwrap_or(std::cmp::Ordering::Equal)
        );
    }
}

/// A record for computations associated with an `Intersection`.
///
/// Mostly a superset of an `Intersection`; everything shading needs about
/// the point that was struck.
#[derive(Clone, Debug)]
pub struct IntersectionComputation<'a> {
    /// The "time" of the ray intersection.
    pub t: f64,

    /// The object being intersected.
    pub object: &'a Sphere,

    /// The point where the intersection occurs.
    pub point: Tuple,

    /// The eye vector for the intersection.
    pub eyev: Tuple,

    /// The normal vector of the object being intersected. Always faces the
    /// eye.
    pub normalv: Tuple,

    /// Whether the intersection occurs within the object or not.
    pub inside: bool,
}

impl<'a> IntersectionComputation<'a> {
    /// Creates a new intersection computation, given a ray and intersection.
    pub fn new(r: &Ray, hit: &Intersection<'a>) -> IntersectionComputation<'a> {
        let t = hit.t;
        let object = hit.object;
        let point = r.position(t);
        let eyev = -r.direction;
        let mut normalv = object.normal_at(point);

        // A normal pointing away from the eye means the ray started inside.
        let inside = if normalv.dot(&eyev) < 0.0 {
            normalv = -normalv;
            true
        } else {
            false
        };

        IntersectionComputation { t, object, point, eyev, normalv, inside }
    }
}

#[test]
fn intersection_encapsulates_t_and_object() {
    let s = Sphere::unit();
    let i = Intersection::new(3.5, &s);

    assert_eq!(i.t, 3.5);
    assert!(std::ptr::eq(i.object, &s));
}

#[test]
fn intersection_equality_is_identity() {
    let s1 = Sphere::unit();
    let s2 = Sphere::unit();

    assert_eq!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s1));
    assert_ne!(Intersection::new(1.0, &s1), Intersection::new(1.0, &s2));
}

#[test]
fn aggregating_intersections() {
    let s = Sphere::unit();
    let xs = Intersections::from(vec![
        Intersection::new(1.0, &s),
        Intersection::new(2.0, &s),
    ]);

    assert_eq!(xs.len(), 2);
    assert_eq!(xs[0].t, 1.0);
    assert_eq!(xs[1].t, 2.0);
}

#[test]
fn hit_with_all_positive() {
    let s = Sphere::unit();
    let i1 = Intersection::new(1.0, &s);
    let i2 = Intersection::new(2.0, &s);
    let xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i1));
}

#[test]
fn hit_with_some_negative() {
    let s = Sphere::unit();
    let i1 = Intersection::new(-1.0, &s);
    let i2 = Intersection::new(1.0, &s);
    let xs = Intersections::from(vec![i2, i1]);

    assert_eq!(xs.hit(), Some(i2));
}

#[test]
fn hit_with_all_negative() {
    let s = Sphere::unit();
    let xs = Intersections::from(vec![
        Intersection::new(-2.0, &s),
        Intersection::new(-1.0, &s),
    ]);

    assert_eq!(xs.hit(), None);
}

#[test]
fn hit_excludes_zero() {
    let s = Sphere::unit();
    let i1 = Intersection::new(0.0, &s);
    let i2 = Intersection::new(0.5, &s);
    let xs = Intersections::from(vec![i1, i2]);

    assert_eq!(xs.hit(), Some(i2));
    assert_eq!(Intersections::from(vec![i1]).hit(), None);
}

#[test]
fn hit_is_lowest_positive() {
    let s = Sphere::unit();
    let i1 = Intersection::new(5.0, &s);
    let i2 = Intersection::new(7.0, &s);
    let i3 = Intersection::new(-3.0, &s);
    let i4 = Intersection::new(2.0, &s);
    let xs = Intersections::from(vec![i1, i2, i3, i4]);

    assert_eq!(xs.hit(), Some(i4));
}

#[test]
fn hit_of_nothing() {
    assert_eq!(Intersections::new().hit(), None);
}

#[test]
fn sort_orders_by_t() {
    let s = Sphere::unit();
    let mut xs = Intersections::from(vec![
        Intersection::new(6.0, &s),
        Intersection::new(-1.0, &s),
        Intersection::new(4.5, &s),
    ]);
    xs.sort();

    let ts: Vec<f64> = xs.iter().map(|i| i.t).collect();
    assert_eq!(ts, vec![-1.0, 4.5, 6.0]);
}

#[test]
fn precompute_intersection_state() {
    let r = Ray::new(
        Tuple::point(0.0, 0.0, -5.0),
        Tuple::vector(0.0, 0.0, 1.0),
    );

    let shape = Sphere::unit();
    let i = Intersection::new(4.0, &shape);

    let comps = i.prepare(&r);

    assert!(std::ptr::eq(comps.object, i.object));
    assert_eq!(comps.t, i.t);
    assert_eq!(comps.point, Tuple::point(0.0, 0.0, -1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
}

#[test]
fn precompute_outside_intersection() {
    let r = Ray::new(
        Tuple::point(0.0, 0.0, -5.0),
        Tuple::vector(0.0, 0.0, 1.0),
    );

    let shape = Sphere::unit();
    let i = Intersection::new(4.0, &shape);

    let comps = IntersectionComputation::new(&r, &i);
    assert!(!comps.inside);
}

#[test]
fn precompute_inside_intersection() {
    let r = Ray::new(
        Tuple::point(0.0, 0.0, 0.0),
        Tuple::vector(0.0, 0.0, 1.0),
    );

    let shape = Sphere::unit();
    let i = Intersection::new(1.0, &shape);

    let comps = IntersectionComputation::new(&r, &i);

    assert!(comps.inside);
    assert!(std::ptr::eq(comps.object, i.object));
    assert_eq!(comps.t, i.t);
    assert_eq!(comps.point, Tuple::point(0.0, 0.0, 1.0));
    assert_eq!(comps.eyev, Tuple::vector(0.0, 0.0, -1.0));

    // The normal would have been (0, 0, 1), but is inverted.
    assert_eq!(comps.normalv, Tuple::vector(0.0, 0.0, -1.0));
}
