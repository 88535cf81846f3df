use thiserror::Error;

/// Crate-wide result type.
pub type Result<T> = std::result::Result<T, TraceError>;

/// Failures surfaced by the tracer.
///
/// Missing intersections and missing hits are not errors; they show up as an
/// empty `Intersections` and a `None` hit. Normalizing a zero vector is not
/// an error either, it silently yields NaN components.
#[derive(Debug, Error)]
pub enum TraceError {
    /// A matrix with a zero determinant was inverted.
    #[error("matrix is not invertible (determinant {determinant})")]
    DegenerateMatrix { determinant: f64 },

    /// Two matrices of different sizes were multiplied.
    #[error("cannot multiply a {left}x{left} matrix by a {right}x{right} matrix")]
    SizeMismatch { left: usize, right: usize },

    /// Writing an image failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// A scene description was not valid JSON for the scene schema.
    #[error("could not parse scene: {0}")]
    SceneParse(#[from] serde_json::Error),

    /// A scene description parsed, but describes something unusable.
    #[error("invalid scene: {0}")]
    InvalidScene(String),
}
