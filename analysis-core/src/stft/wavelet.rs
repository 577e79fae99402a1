//! Multi-resolution analysis: octave-halved windows over one signal
//!
//! Each layer halves the window of the one above it, keeping the zero-pad
//! factor constant, so deeper layers trade frequency resolution for time
//! resolution. Hops scale with the windows, so every layer advances by the
//! same fraction of its own window.

use super::short_time::{ShortTimeTransform, StftFrame};
use crate::error::AnalysisError;
use crate::signal::SamplingInfo;
use crate::spectrum::FourierConfig;
use crate::window::{WindowFunction, WindowKind};

/// One resolution layer of a wavelet analysis
#[derive(Debug, Clone)]
pub struct WaveletLayer {
    window: WindowFunction,
    hop: usize,
    lowest_frequency: f64,
    frames: Vec<StftFrame>,
}

impl WaveletLayer {
    /// Window used for this layer
    pub fn window(&self) -> &WindowFunction {
        &self.window
    }

    /// Window size of this layer in samples
    pub fn window_size(&self) -> usize {
        self.window.size()
    }

    /// Samples between frame starts
    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Lowest probed frequency of this layer in Hz
    pub fn lowest_frequency(&self) -> f64 {
        self.lowest_frequency
    }

    /// Frames of this layer, in signal order
    pub fn frames(&self) -> &[StftFrame] {
        &self.frames
    }
}

/// Result of a layered analysis
#[derive(Debug, Clone)]
pub struct WaveletContainer {
    layers: Vec<WaveletLayer>,
}

impl WaveletContainer {
    /// Layers from the widest window (layer 0) down
    pub fn layers(&self) -> &[WaveletLayer] {
        &self.layers
    }

    /// One layer by index
    pub fn layer(&self, index: usize) -> &WaveletLayer {
        &self.layers[index]
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }
}

/// Layered short-time analysis with halving windows
pub struct WaveletTransform {
    transforms: Vec<ShortTimeTransform>,
}

impl WaveletTransform {
    /// Create a layered transform
    ///
    /// # Arguments
    /// * `sampling` - Sampling metadata of the signals to analyze
    /// * `kind` - Window shape used by every layer
    /// * `base_window_size` - Window of layer 0; layer L uses `base / 2^L`
    /// * `layer_count` - Number of layers
    /// * `hop_rate` - Frames per window: each layer hops by `window / hop_rate`
    /// * `zero_pad_factor` - Total transform size per layer is
    ///   `window * zero_pad_factor`
    ///
    /// # Returns
    /// The transform, or `LayerGeometry` when the parameters cannot produce
    /// whole positive hops for every layer
    pub fn new(
        sampling: SamplingInfo,
        kind: WindowKind,
        base_window_size: usize,
        layer_count: usize,
        hop_rate: usize,
        zero_pad_factor: usize,
    ) -> Result<Self, AnalysisError> {
        let geometry_error = || AnalysisError::LayerGeometry {
            base_window: base_window_size,
            layer_count,
            hop_rate,
        };

        if base_window_size == 0 || layer_count == 0 || hop_rate == 0 || zero_pad_factor == 0 {
            return Err(geometry_error());
        }
        if (base_window_size / layer_count) % hop_rate != 0 {
            return Err(geometry_error());
        }

        let mut transforms = Vec::with_capacity(layer_count);
        for layer in 0..layer_count {
            let window_size = base_window_size >> layer;
            if window_size == 0 || window_size % hop_rate != 0 {
                return Err(geometry_error());
            }

            let window = WindowFunction::new(kind, window_size);
            let zero_pad = window_size * (zero_pad_factor - 1);
            let config = FourierConfig::new(sampling, window, zero_pad);
            transforms.push(ShortTimeTransform::with_hop(config, window_size / hop_rate)?);
        }

        Ok(Self { transforms })
    }

    /// Analyze a whole signal across every layer
    pub fn transform(&mut self, signal: &[f64]) -> Result<WaveletContainer, AnalysisError> {
        let mut layers = Vec::with_capacity(self.transforms.len());

        for transform in self.transforms.iter_mut() {
            let frames = transform.transform(signal)?;
            layers.push(WaveletLayer {
                window: transform.config().window().clone(),
                hop: transform.hop(),
                lowest_frequency: transform.config().lowest_frequency(),
                frames,
            });
        }

        Ok(WaveletContainer { layers })
    }

    /// Number of layers
    pub fn layer_count(&self) -> usize {
        self.transforms.len()
    }
}
