use std::fmt;
use std::ops::{ Add, Sub, Mul };

use crate::feq;
use crate::consts::PPM_MAX_COLOR;

/// A color.
///
/// Represented conventionally with linear red-green-blue (RGB) values.
/// Channels are unbounded; values above `1.0` or below `0.0` are kept as-is
/// and only clamped when written out (see `to_ppm_component`).
///
/// # Examples
///
/// Construct the color red:
///
/// ```
/// # #![allow(unused)]
/// # use sphere_tracer::color::Color;
/// let red = Color::red();
/// assert_eq!(red, Color::rgb(1.0, 0.0, 0.0));
/// ```
///
/// Blend two colors:
///
/// ```
/// # #![allow(unused)]
/// # use sphere_tracer::color::Color;
/// let yellow = Color::rgb(1.0, 1.0, 0.0);
/// let purple = Color::rgb(1.0, 0.0, 1.0);
/// assert_eq!(yellow.blend(&purple), Color::red());
/// ```
#[derive(Copy, Clone, Debug, Default, PartialOrd)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// Partial equality on two colors.
///
/// Similar to the `PartialEq` implementation on `Tuple`, `Color`s are
/// compared component-wise, accounting for possible floating point error in
/// comparisons.
impl PartialEq for Color {
    fn eq(&self, other: &Color) -> bool {
        feq(self.r, other.r) &&
            feq(self.g, other.g) &&
            feq(self.b, other.b)
    }
}

impl Color {
    /// Creates a color with red, green and blue values.
    pub fn rgb(r: f64, g: f64, b: f64) -> Color {
        Color { r, g, b }
    }

    /// The color black.
    pub fn black() -> Color {
        Color::rgb(0.0, 0.0, 0.0)
    }

    /// The color white.
    pub fn white() -> Color {
        Color::rgb(1.0, 1.0, 1.0)
    }

    /// The color red.
    pub fn red() -> Color {
        Color::rgb(1.0, 0.0, 0.0)
    }

    /// The color green.
    pub fn green() -> Color {
        Color::rgb(0.0, 1.0, 0.0)
    }

    /// The color blue.
    pub fn blue() -> Color {
        Color::rgb(0.0, 0.0, 1.0)
    }

    /// Blends two colors by multiplying them channel by channel.
    ///
    /// This is the Hadamard product of the two colors. It models how a
    /// surface color filters the light falling on it.
    pub fn blend(&self, other: &Color) -> Color {
        Color {
            r: self.r * other.r,
            g: self.g * other.g,
            b: self.b * other.b,
        }
    }

    /// The three channels quantized for an 8-bit PPM image.
    pub fn to_ppm(&self) -> [usize; 3] {
        [
            to_ppm_component(self.r),
            to_ppm_component(self.g),
            to_ppm_component(self.b),
        ]
    }
}

/// Quantizes one color channel to `0..=255`.
///
/// The channel is scaled by 255, rounded half away from zero and clamped.
///
/// ```
/// # use sphere_tracer::color::to_ppm_component;
/// assert_eq!(to_ppm_component(0.5), 128);
/// assert_eq!(to_ppm_component(1.5), 255);
/// assert_eq!(to_ppm_component(-0.5), 0);
/// ```
pub fn to_ppm_component(channel: f64) -> usize {
    let max = PPM_MAX_COLOR as f64;
    (channel * max).round().clamp(0.0, max) as usize
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Color( {:9.5}, {:9.5}, {:9.5} )", self.r, self.g, self.b)
    }
}

/// Adds two colors together.
///
/// Components are added together individually.
impl Add<Color> for Color {
    type Output = Color;

    fn add(self, other: Color) -> Self::Output {
        Color {
            r: self.r + other.r,
            g: self.g + other.g,
            b: self.b + other.b,
        }
    }
}

/// Subtracts one color from another.
///
/// Components are subtracted from one another individually.
impl Sub<Color> for Color {
    type Output = Color;

    fn sub(self, other: Color) -> Self::Output {
        Color {
            r: self.r - other.r,
            g: self.g - other.g,
            b: self.b - other.b,
        }
    }
}

/// Multiplies a color by a scalar.
impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, other: f64) -> Self::Output {
        Color {
            r: self.r * other,
            g: self.g * other,
            b: self.b * other,
        }
    }
}

/// Multiplies a scalar by a color.
impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        other * self
    }
}

/// Multiplies a color by a color.
///
/// For colors `c1` and `c2`, `c1 * c2` is shorthand for `c1.blend(&c2)`.
///
/// # Examples
///
/// ```
/// # use sphere_tracer::color::Color;
/// let c1 = Color::red();
/// let c2 = Color::blue();
/// assert_eq!(c1 * c2, c1.blend(&c2));
/// ```
impl Mul<Color> for Color {
    type Output = Color;

    fn mul(self, other: Color) -> Self::Output {
        self.blend(&other)
    }
}

#[test]
fn add_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 1.6, g: 0.7, b: 1.0 };

    assert_eq!(c1 + c2, c3);
}

#[test]
fn subtract_colors() {
    let c1 = Color::rgb(0.9, 0.6, 0.75);
    let c2 = Color::rgb(0.7, 0.1, 0.25);
    let c3 = Color { r: 0.2, g: 0.5, b: 0.5 };

    assert_eq!(c1 - c2, c3);
}

#[test]
fn multiply_color_by_scalar() {
    let c1 = Color::rgb(0.2, 0.3, 0.4);
    let c2 = Color { r: 0.4, g: 0.6, b: 0.8 };

    assert_eq!(c1 * 2.0, c2);
    assert_eq!(2.0 * c1, c2);
}

#[test]
fn blend_colors() {
    let c1 = Color::rgb(1.0, 0.2, 0.4);
    let c2 = Color::rgb(0.9, 1.0, 0.1);

    assert_eq!(c1.blend(&c2), Color::rgb(0.9, 0.2, 0.04));
}

#[test]
fn channels_are_not_clamped() {
    let c = Color::rgb(1.5, 0.0, -0.5) * 2.0;

    assert_eq!(c, Color::rgb(3.0, 0.0, -1.0));
}

#[test]
fn ppm_components() {
    assert_eq!(Color::rgb(1.5, 0.0, 0.0).to_ppm(), [255, 0, 0]);
    assert_eq!(Color::rgb(0.0, 0.5, 0.0).to_ppm(), [0, 128, 0]);
    assert_eq!(Color::rgb(-0.5, 0.0, 1.0).to_ppm(), [0, 0, 255]);
}
