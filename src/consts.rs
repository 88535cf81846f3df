// Runtime parameters
pub const NUM_THREADS: usize = 4;
pub const CANVAS_WIDTH: usize = 320;
pub const CANVAS_HEIGHT: usize = 240;
pub const FIELD_OF_VIEW: f64 = std::f64::consts::PI / 3.0;
pub const OUT_FILE: &'static str = "./out.ppm";

// Floating point comparisons (tuples, colors, matrices, materials)
pub const EPSILON: f64 = 1e-5;

// PPM output
pub const PPM_MAX_COLOR: usize = 255;
pub const PPM_LINE_WIDTH: usize = 70;
