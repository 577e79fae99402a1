//! Fixed-size Fourier engine over realfft
//!
//! Plans one forward and one inverse real transform at construction and
//! reuses the same working buffers for every call.

use crate::error::AnalysisError;
use num_complex::Complex;
use realfft::{ComplexToReal, RealFftPlanner, RealToComplex};
use std::sync::Arc;

/// Forward/inverse transform pair for real-valued frames of a fixed size
///
/// Both directions are unnormalized: `inverse(forward(x))` reproduces
/// `size * x`. Scaling conventions live in the configuration layer.
///
/// One engine serves one caller at a time; results returned by `forward`
/// and `inverse` are borrowed views into the engine's working buffers and
/// stay valid only until the next call on the same instance.
pub struct FourierEngine {
    /// Transform size (number of time-domain samples)
    size: usize,

    /// Real-to-complex plan
    r2c: Arc<dyn RealToComplex<f64>>,

    /// Complex-to-real plan
    c2r: Arc<dyn ComplexToReal<f64>>,

    /// Time-domain working buffer: staged by `forward`, written by `inverse`
    time_data: Vec<f64>,

    /// Frequency-domain working buffer: written by `forward`
    freq_data: Vec<Complex<f64>>,

    /// Clobber copy handed to the r2c plan (realfft destroys its input)
    real_scratch: Vec<f64>,

    /// Clobber copy handed to the c2r plan
    complex_scratch: Vec<Complex<f64>>,

    /// Plan scratch, sized for the larger of the two plans
    fft_scratch: Vec<Complex<f64>>,

    /// How much of `time_data` the last call staged
    staged_len: usize,

    /// Set when `inverse` has written reconstruction residue past the
    /// region the next `forward` will overwrite
    tail_dirty: bool,
}

impl FourierEngine {
    /// Create an engine for frames of `size` samples
    ///
    /// Planning and allocation happen once here; the per-call transforms
    /// run in O(size log size) without allocating.
    pub fn new(size: usize) -> Self {
        let mut planner = RealFftPlanner::<f64>::new();
        let r2c = planner.plan_fft_forward(size);
        let c2r = planner.plan_fft_inverse(size);

        let bins = size / 2 + 1;
        let scratch_len = r2c.get_scratch_len().max(c2r.get_scratch_len());

        Self {
            size,
            r2c,
            c2r,
            time_data: vec![0.0; size],
            freq_data: vec![Complex::new(0.0, 0.0); bins],
            real_scratch: vec![0.0; size],
            complex_scratch: vec![Complex::new(0.0, 0.0); bins],
            fft_scratch: vec![Complex::new(0.0, 0.0); scratch_len],
            staged_len: 0,
            tail_dirty: false,
        }
    }

    /// Forward transform of a real frame
    ///
    /// # Arguments
    /// * `input` - Up to `size` samples; shorter input is zero-extended
    ///
    /// # Returns
    /// Borrowed view of the `size/2 + 1` complex bins, valid until the next
    /// `forward` or `inverse` call on this engine
    pub fn forward(&mut self, input: &[f64]) -> Result<&[Complex<f64>], AnalysisError> {
        if input.len() > self.size {
            return Err(AnalysisError::LengthMismatch {
                expected: self.size,
                actual: input.len(),
            });
        }

        let staged = input.len();

        // The zero-extension trusts the tail from earlier calls; re-zero
        // whatever region may hold stale values.
        if self.tail_dirty {
            self.time_data[staged..].fill(0.0);
            self.tail_dirty = false;
        } else if staged < self.staged_len {
            self.time_data[staged..self.staged_len].fill(0.0);
        }

        self.time_data[..staged].copy_from_slice(input);
        self.staged_len = staged;

        self.real_scratch.copy_from_slice(&self.time_data);
        self.r2c
            .process_with_scratch(
                &mut self.real_scratch,
                &mut self.freq_data,
                &mut self.fft_scratch,
            )
            .expect("FFT processing failed");

        Ok(&self.freq_data)
    }

    /// Forward transform returning an owned copy of the bins
    pub fn forward_owned(&mut self, input: &[f64]) -> Result<Vec<Complex<f64>>, AnalysisError> {
        self.forward(input).map(|bins| bins.to_vec())
    }

    /// Inverse transform of a complex spectrum
    ///
    /// # Arguments
    /// * `spectrum` - Exactly `size/2 + 1` bins
    ///
    /// # Returns
    /// Borrowed view of the `size` reconstructed samples (unnormalized:
    /// scaled by `size` relative to the forward input), valid until the
    /// next `forward` or `inverse` call on this engine
    pub fn inverse(&mut self, spectrum: &[Complex<f64>]) -> Result<&[f64], AnalysisError> {
        let bins = self.spectrum_len();
        if spectrum.len() != bins {
            return Err(AnalysisError::SpectrumSizeMismatch {
                expected: bins,
                actual: spectrum.len(),
            });
        }

        self.complex_scratch.copy_from_slice(spectrum);

        // The c2r plan requires purely real DC and Nyquist bins
        self.complex_scratch[0].im = 0.0;
        if self.size % 2 == 0 {
            self.complex_scratch[bins - 1].im = 0.0;
        }

        self.c2r
            .process_with_scratch(
                &mut self.complex_scratch,
                &mut self.time_data,
                &mut self.fft_scratch,
            )
            .expect("inverse FFT processing failed");

        // The whole time buffer now holds reconstruction output, including
        // rounding residue where the next caller expects zero padding.
        self.staged_len = self.size;
        self.tail_dirty = true;

        Ok(&self.time_data)
    }

    /// Inverse transform returning an owned copy of the samples
    pub fn inverse_owned(&mut self, spectrum: &[Complex<f64>]) -> Result<Vec<f64>, AnalysisError> {
        self.inverse(spectrum).map(|samples| samples.to_vec())
    }

    /// Transform size in samples
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of frequency bins (`size/2 + 1`)
    pub fn spectrum_len(&self) -> usize {
        self.size / 2 + 1
    }
}
