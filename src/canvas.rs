use std::fs::File;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::color::Color;
use crate::consts::{ PPM_MAX_COLOR, PPM_LINE_WIDTH };
use crate::error::Result;

/// A canvas for drawing pixels.
///
/// This structure mostly stores the results of the ray tracer. Once the user
/// specifies the desired image width and height, the `Camera` generates rays
/// which are cast onto a `World`'s spheres.
///
/// The canvas stores the resultant colors for each pixel ray. Once execution
/// finishes, the `Canvas` can be used to save the pixels to an image file.
///
/// For now, only plain (`P3`) PPM images are supported.
#[derive(Clone, Default, Debug, PartialEq)]
pub struct Canvas {
    /// The width of the canvas, in pixels.
    pub width: usize,

    /// The height of the canvas, in pixels.
    pub height: usize,

    /// The pixels of the canvas, stored as a flattened vector.
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a new black canvas with specified width and height.
    pub fn new(width: usize, height: usize) -> Canvas {
        Canvas {
            width,
            height,
            pixels: vec![Color::black(); width * height]
        }
    }

    /// Writes a color to a location on the `Canvas`.
    ///
    /// Out-of-bounds pixels are ignored. `x` is the column of the pixel and
    /// `y` is the row, both zero-indexed.
    ///
    /// # Examples
    ///
    /// Writing a pixel to the fourth column, second row on an 8-by-8 canvas:
    ///
    /// ```
    /// # use sphere_tracer::color::Color;
    /// # use sphere_tracer::canvas::Canvas;
    /// let purple = Color::rgb(1.0, 0.0, 1.0);
    /// let mut canvas = Canvas::new(8, 8);
    /// canvas.write_pixel(4, 2, &purple);
    /// assert_eq!(canvas.read_pixel(4, 2).unwrap(), purple);
    /// ```
    pub fn write_pixel(&mut self, x: usize, y: usize, pixel: &Color) {
        // Silently ignore out-of-bounds pixels
        if x >= self.width || y >= self.height {
            return;
        }

        self.pixels[(y * self.width) + x] = *pixel;
    }

    /// Reads a color from a location on the `Canvas`.
    ///
    /// Returns `None` if the location is out-of-bounds.
    pub fn read_pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None
        }

        Some(self.pixels[(y * self.width) + x])
    }

    /// Writes a whole row of colors, starting at column zero.
    ///
    /// Colors beyond the canvas width, and rows beyond its height, are
    /// ignored.
    pub fn write_row(&mut self, y: usize, row: &[Color]) {
        if y >= self.height {
            return;
        }

        let start = y * self.width;
        let len = row.len().min(self.width);
        self.pixels[start..start + len].copy_from_slice(&row[..len]);
    }

    /// Renders the canvas as a plain PPM image.
    ///
    /// The header is `P3`, then `width height`, then the maximum color value.
    /// Each canvas row starts a new line of channel values; a line is broken
    /// before any value that would push it past 70 characters. Every line,
    /// including the last, ends with a newline.
    ///
    /// ```
    /// # use sphere_tracer::canvas::Canvas;
    /// let ppm = Canvas::new(5, 3).to_ppm();
    /// assert!(ppm.starts_with("P3\n5 3\n255\n"));
    /// assert!(ppm.ends_with('\n'));
    /// ```
    pub fn to_ppm(&self) -> String {
        let mut out = format!("P3\n{} {}\n{}\n", self.width, self.height,
            PPM_MAX_COLOR);

        for row in self.pixels.chunks(self.width.max(1)) {
            let mut line = String::new();

            for channel in row.iter().flat_map(|pixel| pixel.to_ppm()) {
                let value = channel.to_string();

                if !line.is_empty() {
                    if line.len() + 1 + value.len() > PPM_LINE_WIDTH {
                        out.push_str(&line);
                        out.push('\n');
                        line.clear();
                    } else {
                        line.push(' ');
                    }
                }

                line.push_str(&value);
            }

            out.push_str(&line);
            out.push('\n');
        }

        out
    }

    /// Saves a canvas to a PPM file.
    ///
    /// Any I/O failure is returned; a partially written file is never
    /// reported as success.
    pub fn save(&self, path: &Path) -> Result<()> {
        debug!("writing {}x{} PPM to {}", self.width, self.height,
            path.display());

        let mut out = File::create(path)?;
        out.write_all(self.to_ppm().as_bytes())?;
        out.flush()?;

        Ok(())
    }
}

#[test]
fn create_canvas() {
    let c = Canvas::new(10, 20);

    assert_eq!(c.width, 10);
    assert_eq!(c.height, 20);
    for y in 0..20 {
        for x in 0..10 {
            assert_eq!(c.read_pixel(x, y), Some(Color::black()));
        }
    }
}

#[test]
fn write_and_read_pixel() {
    let mut c = Canvas::new(10, 20);
    c.write_pixel(2, 3, &Color::red());

    assert_eq!(c.read_pixel(2, 3), Some(Color::red()));
    assert_eq!(c.read_pixel(3, 2), Some(Color::black()));
}

#[test]
fn out_of_bounds_pixels() {
    let mut c = Canvas::new(4, 4);
    c.write_pixel(4, 0, &Color::red());
    c.write_pixel(0, 4, &Color::red());

    assert_eq!(c, Canvas::new(4, 4));
    assert_eq!(c.read_pixel(4, 0), None);
    assert_eq!(c.read_pixel(0, 4), None);
}

#[test]
fn write_whole_row() {
    let mut c = Canvas::new(3, 2);
    c.write_row(1, &[Color::red(), Color::green(), Color::blue(), Color::white()]);
    c.write_row(2, &[Color::white()]);

    assert_eq!(c.read_pixel(0, 0), Some(Color::black()));
    assert_eq!(c.read_pixel(0, 1), Some(Color::red()));
    assert_eq!(c.read_pixel(1, 1), Some(Color::green()));
    assert_eq!(c.read_pixel(2, 1), Some(Color::blue()));
}

#[test]
fn ppm_header() {
    let c = Canvas::new(5, 3);
    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().take(3).collect();

    assert_eq!(lines, vec!["P3", "5 3", "255"]);
}

#[test]
fn ppm_pixel_data() {
    let mut c = Canvas::new(5, 3);
    c.write_pixel(0, 0, &Color::rgb(1.5, 0.0, 0.0));
    c.write_pixel(2, 1, &Color::rgb(0.0, 0.5, 0.0));
    c.write_pixel(4, 2, &Color::rgb(-0.5, 0.0, 1.0));

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 0 0 0 0 0 0 0 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 128 0 0 0 0 0 0 0",
        "0 0 0 0 0 0 0 0 0 0 0 0 0 0 255",
    ]);
}

#[test]
fn ppm_splits_long_lines() {
    let mut c = Canvas::new(10, 2);
    for y in 0..2 {
        for x in 0..10 {
            c.write_pixel(x, y, &Color::rgb(1.0, 0.8, 0.6));
        }
    }

    let ppm = c.to_ppm();
    let lines: Vec<&str> = ppm.lines().skip(3).collect();

    assert_eq!(lines, vec![
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
        "255 204 153 255 204 153 255 204 153 255 204 153 255 204 153 255 204",
        "153 255 204 153 255 204 153 255 204 153 255 204 153",
    ]);
    assert!(ppm.lines().all(|l| l.len() <= PPM_LINE_WIDTH));
}

#[test]
fn ppm_ends_with_newline() {
    let c = Canvas::new(5, 3);

    assert!(c.to_ppm().ends_with('\n'));
}

#[test]
fn save_reports_io_errors() {
    let c = Canvas::new(1, 1);
    let path = Path::new("/nonexistent-directory/out.ppm");

    assert!(c.save(path).is_err());
}

#[test]
fn save_writes_ppm() {
    let c = Canvas::new(2, 2);
    let path = std::env::temp_dir().join("sphere_tracer_canvas_save.ppm");

    c.save(&path).unwrap();
    let written = std::fs::read_to_string(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(written, c.to_ppm());
}
