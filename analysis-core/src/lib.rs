//! Tonescope - Windowed Spectral Analysis Core
//!
//! Fourier, short-time, reassigned and layered transforms over sampled
//! signals, with prominence- and baseline-driven peak extraction.

pub mod error;
pub mod peaks;
pub mod signal;
pub mod spectrum;
pub mod stft;
pub mod window;

pub use error::AnalysisError;
pub use peaks::{BaselinePeakFinder, Peak, PeakMode, ProminencePeakFinder};
pub use signal::SamplingInfo;
pub use spectrum::{FourierConfig, FourierEngine, FourierSpectrum};
pub use stft::{ReassignmentTransform, ShortTimeTransform, WaveletTransform};
pub use window::{WindowFunction, WindowKind};
