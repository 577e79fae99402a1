//! Observer hook for peak extraction internals

use super::peak::Peak;

/// Receives intermediate curves and peak markers during extraction
///
/// Implementations get copies of internal state for plotting or inspection;
/// nothing they do can influence the extraction result.
pub trait PeakMonitor {
    /// An intermediate curve, labeled by its role (for example "smoothed"
    /// or "baseline")
    fn curve(&mut self, label: &str, values: &[f64]);

    /// Detected peaks, labeled by the stage that produced them
    fn peaks(&mut self, label: &str, peaks: &[Peak]);
}

/// Monitor that stores everything it receives, in call order
#[derive(Debug, Default)]
pub struct RecordingMonitor {
    pub curves: Vec<(String, Vec<f64>)>,
    pub peak_sets: Vec<(String, Vec<Peak>)>,
}

impl RecordingMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// First recorded curve with the given label
    pub fn curve_named(&self, label: &str) -> Option<&[f64]> {
        self.curves
            .iter()
            .find(|(recorded, _)| recorded == label)
            .map(|(_, values)| values.as_slice())
    }
}

impl PeakMonitor for RecordingMonitor {
    fn curve(&mut self, label: &str, values: &[f64]) {
        self.curves.push((label.to_string(), values.to_vec()));
    }

    fn peaks(&mut self, label: &str, peaks: &[Peak]) {
        self.peak_sets.push((label.to_string(), peaks.to_vec()));
    }
}
