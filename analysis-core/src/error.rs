//! Error types shared across the analysis core

use crate::window::WindowKind;
use thiserror::Error;

/// Errors raised by transforms and peak extraction
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Engine handed time-domain data longer than its transform size,
    /// or paired with a config of a different total size
    #[error("transform expects at most {expected} samples, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Inverse handed a spectrum whose dimension or total size does not
    /// match the configuration
    #[error("spectrum size {actual} does not match configured size {expected}")]
    SpectrumSizeMismatch { expected: usize, actual: usize },

    /// Inverse requested under a window with zero-valued weights
    #[error("window {0:?} is not invertible")]
    NonInvertibleWindow(WindowKind),

    /// Layered transform geometry cannot produce integer hops
    #[error(
        "base window {base_window} with {layer_count} layers does not divide evenly by hop rate {hop_rate}"
    )]
    LayerGeometry {
        base_window: usize,
        layer_count: usize,
        hop_rate: usize,
    },

    /// Peak extraction needs a minimum number of samples
    #[error("peak extraction needs at least {needed} samples, got {actual}")]
    SignalTooShort { needed: usize, actual: usize },
}

impl AnalysisError {
    /// Whether this error is a caller-side configuration mistake, as opposed
    /// to a property of the data being analyzed.
    pub fn is_configuration(&self) -> bool {
        !matches!(self, AnalysisError::SignalTooShort { .. })
    }
}
