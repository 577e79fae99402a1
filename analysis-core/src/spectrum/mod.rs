//! Windowed Fourier analysis: engine, configuration, and spectra

pub mod config;
pub mod engine;
pub mod spectrum;

pub use config::FourierConfig;
pub use engine::FourierEngine;
pub use spectrum::FourierSpectrum;
