//! Short-time transform: one configuration applied along a signal

use crate::error::AnalysisError;
use crate::spectrum::{FourierConfig, FourierEngine, FourierSpectrum};

/// One analyzed frame and the sample offset it was taken from
#[derive(Debug, Clone)]
pub struct StftFrame {
    /// First sample of the frame in the source signal
    pub offset: usize,

    /// Spectrum of the windowed frame
    pub spectrum: FourierSpectrum,
}

/// Applies one Fourier configuration at a fixed hop along a signal
pub struct ShortTimeTransform {
    config: FourierConfig,
    engine: FourierEngine,
    hop: usize,
}

impl ShortTimeTransform {
    /// Create a transform hopping by one full window per frame
    pub fn new(config: FourierConfig) -> Self {
        let engine = config.make_engine();
        let hop = config.window().size();
        Self {
            config,
            engine,
            hop,
        }
    }

    /// Create a transform with an explicit hop
    ///
    /// # Arguments
    /// * `config` - Analysis configuration shared by every frame
    /// * `hop` - Samples between frame starts; must be nonzero
    pub fn with_hop(config: FourierConfig, hop: usize) -> Result<Self, AnalysisError> {
        if hop == 0 {
            return Err(AnalysisError::LayerGeometry {
                base_window: config.window().size(),
                layer_count: 1,
                hop_rate: 0,
            });
        }

        let engine = config.make_engine();
        Ok(Self {
            config,
            engine,
            hop,
        })
    }

    /// Analyze a whole signal
    ///
    /// Frames start at every multiple of the hop below the signal length;
    /// the final frame is zero-padded past the end of the signal, so a
    /// signal that is an exact multiple of the window (at the default hop)
    /// ends with a full frame and no padded trailer.
    ///
    /// # Returns
    /// One `StftFrame` per frame, in signal order
    pub fn transform(&mut self, signal: &[f64]) -> Result<Vec<StftFrame>, AnalysisError> {
        let mut frames = Vec::with_capacity(self.frame_count(signal.len()));

        let mut offset = 0;
        while offset < signal.len() {
            let spectrum = self.config.forward(&mut self.engine, signal, offset)?;
            frames.push(StftFrame { offset, spectrum });
            offset += self.hop;
        }

        Ok(frames)
    }

    /// Number of frames `transform` produces for a signal length
    pub fn frame_count(&self, signal_len: usize) -> usize {
        if signal_len == 0 {
            0
        } else {
            (signal_len + self.hop - 1) / self.hop
        }
    }

    /// Analysis configuration
    pub fn config(&self) -> &FourierConfig {
        &self.config
    }

    /// Samples between frame starts
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Window size of the configuration
    pub fn window_size(&self) -> usize {
        self.config.window().size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::SamplingInfo;
    use crate::window::{WindowFunction, WindowKind};
    use std::f64::consts::PI;

    fn hanning_config(size: usize, pad: usize, rate: f64) -> FourierConfig {
        FourierConfig::new(
            SamplingInfo::new(rate, 1.0),
            WindowFunction::new(WindowKind::Hanning, size),
            pad,
        )
    }

    #[test]
    fn test_exact_multiple_emits_no_padded_trailer() {
        let mut stft = ShortTimeTransform::new(hanning_config(16, 0, 8000.0));

        let signal: Vec<f64> = (0..48).map(|n| (0.4 * n as f64).sin()).collect();
        let frames = stft.transform(&signal).unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[0].offset, 0);
        assert_eq!(frames[1].offset, 16);
        assert_eq!(frames[2].offset, 32);

        // The last frame is a full one, identical to transforming the
        // final window directly
        let mut engine = stft.config().make_engine();
        let full = stft.config().forward(&mut engine, &signal[32..], 0).unwrap();
        for (a, b) in frames[2].spectrum.bins().iter().zip(full.bins().iter()) {
            assert!((*a - *b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_partial_final_frame_is_zero_padded() {
        let mut stft = ShortTimeTransform::new(hanning_config(16, 0, 8000.0));

        let signal: Vec<f64> = (0..40).map(|n| (0.4 * n as f64).sin()).collect();
        let frames = stft.transform(&signal).unwrap();

        assert_eq!(frames.len(), 3);
        assert_eq!(frames[2].offset, 32);

        let mut padded = vec![0.0; 16];
        padded[..8].copy_from_slice(&signal[32..]);

        let mut engine = stft.config().make_engine();
        let explicit = stft.config().forward(&mut engine, &padded, 0).unwrap();
        for (a, b) in frames[2].spectrum.bins().iter().zip(explicit.bins().iter()) {
            assert!((*a - *b).norm() < 1e-12);
        }
    }

    #[test]
    fn test_layered_hop_frame_positions() {
        let mut stft = ShortTimeTransform::with_hop(hanning_config(16, 0, 8000.0), 4).unwrap();

        let signal = vec![0.5; 32];
        let frames = stft.transform(&signal).unwrap();

        assert_eq!(frames.len(), 8);
        assert_eq!(stft.frame_count(32), 8);
        for (i, frame) in frames.iter().enumerate() {
            assert_eq!(frame.offset, i * 4);
        }
    }

    #[test]
    fn test_empty_signal_has_no_frames() {
        let mut stft = ShortTimeTransform::new(hanning_config(16, 0, 8000.0));
        let frames = stft.transform(&[]).unwrap();
        assert!(frames.is_empty());
        assert_eq!(stft.frame_count(0), 0);
    }

    #[test]
    fn test_zero_hop_is_rejected() {
        let result = ShortTimeTransform::with_hop(hanning_config(16, 0, 8000.0), 0);
        assert!(result.is_err());
    }

    #[test]
    fn test_sine_lands_on_expected_bin() {
        // 500 Hz at 8 kHz with a 32-sample window: bin spacing 250 Hz
        let mut stft = ShortTimeTransform::new(hanning_config(32, 0, 8000.0));

        let signal: Vec<f64> = (0..64)
            .map(|n| (2.0 * PI * 500.0 * n as f64 / 8000.0).sin())
            .collect();

        let frames = stft.transform(&signal).unwrap();
        assert_eq!(frames.len(), 2);

        for frame in &frames {
            assert_eq!(frame.spectrum.peak_bin(), Some(2));
            assert!((frame.spectrum.frequency(2) - 500.0).abs() < 1e-9);
        }
    }
}
