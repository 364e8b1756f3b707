//! Crate-wide error kinds.
//!
//! Inner render loops never produce these — geometry-degenerate and numeric
//! conditions there are reported through sentinels (a `None` hit, a null
//! vector, NaN roots) so the hot path stays allocation-free. `Error` covers
//! the loud failures: construction with out-of-domain parameters, singular
//! matrix inversion, and I/O at the entry points.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A matrix whose determinant is numerically zero was asked for its inverse.
    #[error("matrix is singular (|det| = {determinant:e}), cannot invert")]
    SingularMatrix { determinant: f64 },

    /// Matrix operands whose shapes do not agree.
    #[error("matrix shape mismatch: {left_rows}x{left_cols} vs {right_rows}x{right_cols}")]
    ShapeMismatch {
        left_rows: usize,
        left_cols: usize,
        right_rows: usize,
        right_cols: usize,
    },

    /// Degenerate geometry at construction: zero-length direction, coincident
    /// points, a self-intersecting torus, and the like.
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// A constructor parameter outside its physical domain (fov ≥ 180°,
    /// refractive index < 1, ...).
    #[error("parameter out of domain: {0}")]
    OutOfDomain(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
