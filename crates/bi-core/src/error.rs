use thiserror::Error;

/// Errors originating from the core module.
///
/// Every variant is a precondition violation detected at construction time;
/// once a buffer exists, conversion itself cannot fail.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Configuration invalide : {0}")]
    Config(String),

    /// Invalid width/height dimensions.
    #[error("Dimensions invalides : {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Buffer length disagrees with the declared dimensions.
    #[error("Taille de buffer invalide : attendu {expected}, reçu {actual}")]
    BufferSize {
        /// Length implied by width × height × channels.
        expected: usize,
        /// Length actually supplied.
        actual: usize,
    },

    /// Luminance sample is NaN or infinite.
    #[error("Luminance non finie à l'index {index}")]
    InvalidLuminance {
        /// Row-major index of the offending sample.
        index: usize,
    },
}
