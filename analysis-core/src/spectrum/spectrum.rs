//! Owned spectrum produced by a Fourier configuration

use num_complex::Complex;

/// Complex spectrum of one analyzed frame
///
/// Bins are scaled by `1/sqrt(total_size)` so magnitudes are comparable
/// across transform sizes. The spectrum records the total transform size
/// and bin spacing of the configuration that produced it; a configuration
/// asked to invert a spectrum checks the recorded size against its own.
#[derive(Debug, Clone, PartialEq)]
pub struct FourierSpectrum {
    bins: Vec<Complex<f64>>,
    total_size: usize,
    lowest_frequency: f64,
}

impl FourierSpectrum {
    pub(crate) fn new(bins: Vec<Complex<f64>>, total_size: usize, lowest_frequency: f64) -> Self {
        Self {
            bins,
            total_size,
            lowest_frequency,
        }
    }

    /// All complex bins
    pub fn bins(&self) -> &[Complex<f64>] {
        &self.bins
    }

    /// One complex bin
    pub fn bin(&self, k: usize) -> Complex<f64> {
        self.bins[k]
    }

    /// Number of bins (`total_size/2 + 1`)
    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    /// Magnitude of one bin
    pub fn magnitude(&self, k: usize) -> f64 {
        self.bins[k].norm()
    }

    /// Magnitudes of all bins
    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Power (squared magnitude) of one bin
    pub fn power(&self, k: usize) -> f64 {
        self.bins[k].norm_sqr()
    }

    /// Magnitude of one bin in dB relative to `reference`
    pub fn magnitude_db(&self, k: usize, reference: f64) -> f64 {
        let clamped = self.magnitude(k).max(1e-10); // Avoid log(0)
        20.0 * (clamped / reference).log10()
    }

    /// Center frequency of bin `k` in Hz
    pub fn frequency(&self, k: usize) -> f64 {
        k as f64 * self.lowest_frequency
    }

    /// Bin with the largest magnitude, when the spectrum is non-empty
    pub fn peak_bin(&self) -> Option<usize> {
        (0..self.bins.len()).max_by(|&a, &b| self.power(a).total_cmp(&self.power(b)))
    }

    /// Total transform size (window + zero padding) that produced this
    pub fn total_size(&self) -> usize {
        self.total_size
    }

    /// Bin spacing in Hz
    pub fn lowest_frequency(&self) -> f64 {
        self.lowest_frequency
    }
}
