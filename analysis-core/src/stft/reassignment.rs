//! Spectral reassignment: sharpen the time-frequency grid into points
//!
//! Runs three short-time transforms with identical frame geometry under the
//! plain, derivative, and time-ramped Hanning windows. Cross-spectra against
//! the plain transform give each bin a frequency and time correction, moving
//! its energy off the grid to where the signal actually concentrates.

use super::short_time::ShortTimeTransform;
use crate::error::AnalysisError;
use crate::signal::SamplingInfo;
use crate::spectrum::{FourierConfig, FourierSpectrum};
use crate::window::{WindowFunction, WindowKind};

/// Bins with a plain magnitude below this contribute no reliable phase
/// information and are skipped
const MAGNITUDE_EPSILON: f64 = 1e-12;

/// One reassigned energy point
///
/// Times are in samples from the start of the signal, frequencies in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReassignedPoint {
    pub time: f64,
    pub frequency: f64,
    pub magnitude: f64,
}

/// The three aligned spectra of one frame, bin-for-bin
#[derive(Debug, Clone)]
pub struct SrSpectrum {
    offset: usize,
    center: f64,
    plain: FourierSpectrum,
    derivative: FourierSpectrum,
    time_ramped: FourierSpectrum,
}

impl SrSpectrum {
    /// First sample of the frame in the source signal
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Frame center in samples
    pub fn center(&self) -> f64 {
        self.center
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.plain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plain.is_empty()
    }

    /// Spectrum under the plain window
    pub fn plain(&self) -> &FourierSpectrum {
        &self.plain
    }

    /// Spectrum under the derivative window
    pub fn derivative(&self) -> &FourierSpectrum {
        &self.derivative
    }

    /// Spectrum under the time-ramped window
    pub fn time_ramped(&self) -> &FourierSpectrum {
        &self.time_ramped
    }

    /// Reassigned magnitude of bin `k`: the plain magnitude
    pub fn magnitude(&self, k: usize) -> f64 {
        self.plain.magnitude(k)
    }

    /// Frequency correction of bin `k` in Hz
    ///
    /// `Im(D * conj(P)) / |P|`; `None` when the plain magnitude is too
    /// small to divide by or the ratio is not finite.
    pub fn frequency_correction(&self, k: usize) -> Option<f64> {
        let p = self.plain.bin(k);
        let mag = p.norm();
        if mag < MAGNITUDE_EPSILON {
            return None;
        }

        let cross = self.derivative.bin(k) * p.conj();
        let correction = cross.im / mag;
        correction.is_finite().then_some(correction)
    }

    /// Time correction of bin `k` in samples
    ///
    /// `Re(T * conj(P)) / |P|`; `None` under the same guards as the
    /// frequency correction.
    pub fn time_correction(&self, k: usize) -> Option<f64> {
        let p = self.plain.bin(k);
        let mag = p.norm();
        if mag < MAGNITUDE_EPSILON {
            return None;
        }

        let cross = self.time_ramped.bin(k) * p.conj();
        let correction = cross.re / mag;
        correction.is_finite().then_some(correction)
    }

    /// Reassigned point of bin `k`, unless the bin is guarded out
    pub fn point(&self, k: usize) -> Option<ReassignedPoint> {
        let frequency_correction = self.frequency_correction(k)?;
        let time_correction = self.time_correction(k)?;

        let point = ReassignedPoint {
            time: self.center + time_correction,
            frequency: self.plain.frequency(k) + frequency_correction,
            magnitude: self.magnitude(k),
        };

        (point.time.is_finite() && point.frequency.is_finite()).then_some(point)
    }

    /// All surviving reassigned points of this frame
    pub fn points(&self) -> Vec<ReassignedPoint> {
        (0..self.len()).filter_map(|k| self.point(k)).collect()
    }
}

/// Three-window short-time analysis producing reassigned point clouds
pub struct ReassignmentTransform {
    plain: ShortTimeTransform,
    derivative: ShortTimeTransform,
    time_ramped: ShortTimeTransform,
    window_size: usize,
}

impl ReassignmentTransform {
    /// Create a transform hopping by one full window per frame
    pub fn new(sampling: SamplingInfo, window_size: usize, zero_pad: usize) -> Self {
        let make = |kind| {
            ShortTimeTransform::new(FourierConfig::new(
                sampling,
                WindowFunction::new(kind, window_size),
                zero_pad,
            ))
        };

        Self {
            plain: make(WindowKind::Hanning),
            derivative: make(WindowKind::HanningDerivative),
            time_ramped: make(WindowKind::HanningTimeRamped),
            window_size,
        }
    }

    /// Create a transform with an explicit hop shared by all three windows
    pub fn with_hop(
        sampling: SamplingInfo,
        window_size: usize,
        zero_pad: usize,
        hop: usize,
    ) -> Result<Self, AnalysisError> {
        let make = |kind| {
            ShortTimeTransform::with_hop(
                FourierConfig::new(
                    sampling,
                    WindowFunction::new(kind, window_size),
                    zero_pad,
                ),
                hop,
            )
        };

        Ok(Self {
            plain: make(WindowKind::Hanning)?,
            derivative: make(WindowKind::HanningDerivative)?,
            time_ramped: make(WindowKind::HanningTimeRamped)?,
            window_size,
        })
    }

    /// Analyze a whole signal into per-frame reassignment spectra
    pub fn transform(&mut self, signal: &[f64]) -> Result<Vec<SrSpectrum>, AnalysisError> {
        let plain = self.plain.transform(signal)?;
        let derivative = self.derivative.transform(signal)?;
        let time_ramped = self.time_ramped.transform(signal)?;

        debug_assert_eq!(plain.len(), derivative.len());
        debug_assert_eq!(plain.len(), time_ramped.len());

        let half_window = self.window_size as f64 / 2.0;
        let spectra = plain
            .into_iter()
            .zip(derivative)
            .zip(time_ramped)
            .map(|((p, d), t)| SrSpectrum {
                offset: p.offset,
                center: p.offset as f64 + half_window,
                plain: p.spectrum,
                derivative: d.spectrum,
                time_ramped: t.spectrum,
            })
            .collect();

        Ok(spectra)
    }

    /// Configuration of the plain-window transform
    pub fn config(&self) -> &FourierConfig {
        self.plain.config()
    }

    /// Window size shared by the three transforms
    pub fn window_size(&self) -> usize {
        self.window_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sampling() -> SamplingInfo {
        SamplingInfo::new(8000.0, 1.0)
    }

    #[test]
    fn test_on_bin_sinusoid_needs_no_correction() {
        // 1 kHz at 8 kHz with a 64-sample window sits exactly on bin 8
        let mut transform = ReassignmentTransform::new(sampling(), 64, 0);

        let signal: Vec<f64> = (0..64)
            .map(|n| (2.0 * PI * 1000.0 * n as f64 / 8000.0).sin())
            .collect();

        let spectra = transform.transform(&signal).unwrap();
        assert_eq!(spectra.len(), 1);

        let frame = &spectra[0];
        let correction = frame.frequency_correction(8).unwrap();
        assert!(correction.abs() < 1e-8);

        let point = frame.point(8).unwrap();
        assert!((point.frequency - 1000.0).abs() < 1e-6);
    }

    #[test]
    fn test_reassigned_magnitude_matches_plain_transform() {
        let mut transform = ReassignmentTransform::new(sampling(), 64, 0);
        let mut plain = ShortTimeTransform::new(FourierConfig::new(
            sampling(),
            WindowFunction::new(WindowKind::Hanning, 64),
            0,
        ));

        let signal: Vec<f64> = (0..64)
            .map(|n| (2.0 * PI * 1000.0 * n as f64 / 8000.0).sin())
            .collect();

        let spectra = transform.transform(&signal).unwrap();
        let frames = plain.transform(&signal).unwrap();

        for k in 0..spectra[0].len() {
            let reassigned = spectra[0].magnitude(k);
            let direct = frames[0].spectrum.magnitude(k);
            assert!((reassigned - direct).abs() < 1e-12);
        }
    }

    #[test]
    fn test_silence_emits_no_points() {
        let mut transform = ReassignmentTransform::new(sampling(), 32, 0);

        let spectra = transform.transform(&vec![0.0; 64]).unwrap();
        assert_eq!(spectra.len(), 2);

        for frame in &spectra {
            assert!(frame.points().is_empty());
            assert_eq!(frame.frequency_correction(3), None);
            assert_eq!(frame.time_correction(3), None);
        }
    }

    #[test]
    fn test_points_are_always_finite() {
        let mut transform = ReassignmentTransform::new(sampling(), 32, 0);

        // Deterministic broadband-ish signal
        let signal: Vec<f64> = (0..96)
            .map(|n| {
                let n = n as f64;
                (0.37 * n).sin() + 0.5 * (1.91 * n).sin() + 0.25 * (0.05 * n).cos()
            })
            .collect();

        let spectra = transform.transform(&signal).unwrap();
        for frame in &spectra {
            for point in frame.points() {
                assert!(point.time.is_finite());
                assert!(point.frequency.is_finite());
                assert!(point.magnitude.is_finite());
                assert!(point.magnitude >= 0.0);
            }
        }
    }

    #[test]
    fn test_frame_centers_follow_offsets() {
        let mut transform = ReassignmentTransform::new(sampling(), 32, 0);

        let signal = vec![0.1; 96];
        let spectra = transform.transform(&signal).unwrap();

        assert_eq!(spectra.len(), 3);
        for (i, frame) in spectra.iter().enumerate() {
            assert_eq!(frame.offset(), i * 32);
            assert!((frame.center() - (i as f64 * 32.0 + 16.0)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_shared_hop_keeps_geometry_aligned() {
        let mut transform = ReassignmentTransform::with_hop(sampling(), 32, 32, 8).unwrap();

        let signal: Vec<f64> = (0..64).map(|n| (0.2 * n as f64).sin()).collect();
        let spectra = transform.transform(&signal).unwrap();

        assert_eq!(spectra.len(), 8);
        for frame in &spectra {
            assert_eq!(frame.plain().len(), frame.derivative().len());
            assert_eq!(frame.plain().len(), frame.time_ramped().len());
        }
    }
}
