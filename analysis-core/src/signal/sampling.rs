//! Sampling metadata carried alongside analyzed signals

/// Sampling rate and amplitude range of a signal
///
/// Two instances compare equal when their sampling rates match; the peak
/// magnitude is display metadata and does not affect analysis identity.
#[derive(Debug, Clone, Copy)]
pub struct SamplingInfo {
    /// Sampling rate in Hz
    rate: f64,

    /// Largest absolute sample value seen in the source material
    peak_magnitude: f64,

    /// Factor that maps samples into [-1, 1]
    normalization: f64,
}

impl SamplingInfo {
    /// Create sampling info from a known rate and peak magnitude
    ///
    /// # Arguments
    /// * `rate` - Sampling rate in Hz
    /// * `peak_magnitude` - Largest absolute sample value (0 for silence)
    pub fn new(rate: f64, peak_magnitude: f64) -> Self {
        let normalization = if peak_magnitude > 0.0 {
            1.0 / peak_magnitude
        } else {
            1.0
        };

        Self {
            rate,
            peak_magnitude,
            normalization,
        }
    }

    /// Create sampling info by scanning a signal for its peak magnitude
    pub fn from_samples(rate: f64, samples: &[f64]) -> Self {
        let peak = samples.iter().fold(0.0_f64, |acc, &s| acc.max(s.abs()));
        Self::new(rate, peak)
    }

    /// Sampling rate in Hz
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Largest absolute sample value
    pub fn peak_magnitude(&self) -> f64 {
        self.peak_magnitude
    }

    /// Factor that maps samples into [-1, 1]
    pub fn normalization(&self) -> f64 {
        self.normalization
    }

    /// Scale one sample into the normalized range
    pub fn normalize(&self, sample: f64) -> f64 {
        sample * self.normalization
    }
}

impl PartialEq for SamplingInfo {
    // Identity of an analysis is determined by the rate alone
    fn eq(&self, other: &Self) -> bool {
        self.rate == other.rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalization_factor() {
        let info = SamplingInfo::new(44100.0, 4.0);
        assert!((info.normalization() - 0.25).abs() < 1e-12);
        assert!((info.normalize(2.0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_silence_normalizes_to_unity() {
        let info = SamplingInfo::new(44100.0, 0.0);
        assert_eq!(info.normalization(), 1.0);
    }

    #[test]
    fn test_from_samples_scans_peak() {
        let samples = [0.1, -0.8, 0.3, 0.5];
        let info = SamplingInfo::from_samples(8000.0, &samples);
        assert!((info.peak_magnitude() - 0.8).abs() < 1e-12);
    }

    #[test]
    fn test_equality_ignores_magnitude() {
        let a = SamplingInfo::new(48000.0, 1.0);
        let b = SamplingInfo::new(48000.0, 7.5);
        let c = SamplingInfo::new(44100.0, 1.0);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
