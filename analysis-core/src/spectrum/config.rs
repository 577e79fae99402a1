//! Fourier configuration: window, zero padding, and frequency geometry
//!
//! A configuration is immutable once built and freely shareable; transform
//! state lives in the engine, which callers create per worker and pass in.

use super::engine::FourierEngine;
use super::spectrum::FourierSpectrum;
use crate::error::AnalysisError;
use crate::signal::SamplingInfo;
use crate::window::{WindowFunction, WindowKind};
use num_complex::Complex;
use std::cell::OnceCell;

/// Binding of sampling info, analysis window, and zero-pad count
#[derive(Debug, Clone)]
pub struct FourierConfig {
    sampling: SamplingInfo,
    window: WindowFunction,
    zero_pad: usize,
    total_size: usize,
    frequencies: OnceCell<Vec<f64>>,
}

impl FourierConfig {
    /// Create a configuration
    ///
    /// # Arguments
    /// * `sampling` - Sampling metadata of the signals to analyze
    /// * `window` - Analysis window; its size is the frame length
    /// * `zero_pad` - Zero samples appended after the windowed frame
    pub fn new(sampling: SamplingInfo, window: WindowFunction, zero_pad: usize) -> Self {
        let total_size = window.size() + zero_pad;
        Self {
            sampling,
            window,
            zero_pad,
            total_size,
            frequencies: OnceCell::new(),
        }
    }

    /// Create an engine sized for this configuration
    pub fn make_engine(&self) -> FourierEngine {
        FourierEngine::new(self.total_size)
    }

    /// Window a frame of the signal and transform it
    ///
    /// # Arguments
    /// * `engine` - Engine created for this configuration's total size
    /// * `data` - Source signal
    /// * `offset` - First sample of the frame; samples past the end of
    ///   `data` are treated as zero
    ///
    /// # Returns
    /// Owned spectrum of `total_size/2 + 1` bins, scaled by
    /// `1/sqrt(total_size)`
    pub fn forward(
        &self,
        engine: &mut FourierEngine,
        data: &[f64],
        offset: usize,
    ) -> Result<FourierSpectrum, AnalysisError> {
        self.check_engine(engine)?;

        let win = self.window.size();
        let mut frame = vec![0.0; win];
        if offset < data.len() {
            let available = (data.len() - offset).min(win);
            frame[..available].copy_from_slice(&data[offset..offset + available]);
        }
        self.window.apply(&mut frame);

        let scale = 1.0 / (self.total_size as f64).sqrt();
        let view = engine.forward(&frame)?;
        let bins = view.iter().map(|&c| c * scale).collect();

        Ok(FourierSpectrum::new(
            bins,
            self.total_size,
            self.lowest_frequency(),
        ))
    }

    /// Reconstruct the windowed frame a spectrum was produced from
    ///
    /// Divides the reconstruction by `window.weight(i) * total_size`, so the
    /// result is the original unwindowed frame of `window.size()` samples.
    /// Requires an invertible window and a spectrum produced under this
    /// configuration's total size.
    pub fn inverse(
        &self,
        engine: &mut FourierEngine,
        spectrum: &FourierSpectrum,
    ) -> Result<Vec<f64>, AnalysisError> {
        if !self.window.is_invertible() {
            return Err(AnalysisError::NonInvertibleWindow(self.window.kind()));
        }
        if spectrum.total_size() != self.total_size {
            return Err(AnalysisError::SpectrumSizeMismatch {
                expected: self.total_size,
                actual: spectrum.total_size(),
            });
        }
        if spectrum.len() != self.spectrum_len() {
            return Err(AnalysisError::SpectrumSizeMismatch {
                expected: self.spectrum_len(),
                actual: spectrum.len(),
            });
        }
        self.check_engine(engine)?;

        // Undo the forward scaling while staging
        let scale = (self.total_size as f64).sqrt();
        let staged: Vec<Complex<f64>> = spectrum.bins().iter().map(|&c| c * scale).collect();

        let view = engine.inverse(&staged)?;

        let denom = self.total_size as f64;
        let samples = (0..self.window.size())
            .map(|i| view[i] / (self.window.weight(i) * denom))
            .collect();

        Ok(samples)
    }

    /// Sampling metadata
    pub fn sampling(&self) -> SamplingInfo {
        self.sampling
    }

    /// Analysis window
    pub fn window(&self) -> &WindowFunction {
        &self.window
    }

    /// Window kind shortcut
    pub fn window_kind(&self) -> WindowKind {
        self.window.kind()
    }

    /// Zero samples appended after the windowed frame
    pub fn zero_pad(&self) -> usize {
        self.zero_pad
    }

    /// Window size plus zero padding
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Number of bins a forward transform produces
    pub fn spectrum_len(&self) -> usize {
        self.total_size / 2 + 1
    }

    /// Bin spacing in Hz, also the lowest nonzero probed frequency
    pub fn lowest_frequency(&self) -> f64 {
        self.sampling.rate() / self.total_size as f64
    }

    /// Center frequency of bin `k` in Hz
    pub fn frequency(&self, k: usize) -> f64 {
        k as f64 * self.lowest_frequency()
    }

    /// Full frequency axis, computed once on first use
    pub fn frequencies(&self) -> &[f64] {
        self.frequencies
            .get_or_init(|| (0..self.spectrum_len()).map(|k| self.frequency(k)).collect())
    }

    /// Whether `inverse` is available under this window
    pub fn is_invertible(&self) -> bool {
        self.window.is_invertible()
    }

    fn check_engine(&self, engine: &FourierEngine) -> Result<(), AnalysisError> {
        if engine.size() != self.total_size {
            return Err(AnalysisError::LengthMismatch {
                expected: self.total_size,
                actual: engine.size(),
            });
        }
        Ok(())
    }
}
