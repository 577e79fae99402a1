//! Peak extraction by derivative sign change and prominence ranking

use super::monitor::PeakMonitor;
use super::peak::{Peak, PeakMode};
use crate::error::AnalysisError;

/// Finds candidate extrema by strict slope sign changes, ranks them by
/// prominence over a neighbor-to-neighbor pedestal line, and keeps the
/// strongest
#[derive(Debug, Clone)]
pub struct ProminencePeakFinder {
    mode: PeakMode,
    max_count: usize,
}

impl ProminencePeakFinder {
    /// Create a finder
    ///
    /// # Arguments
    /// * `mode` - Polarity filter applied to the alternation-assigned polarity
    /// * `max_count` - Upper bound on returned peaks; 0 keeps them all
    pub fn new(mode: PeakMode, max_count: usize) -> Self {
        Self { mode, max_count }
    }

    /// Extract peaks from a sample sequence
    ///
    /// # Returns
    /// Peaks ordered by descending prominence; widths are left at 0 for a
    /// later `compute_widths` pass
    pub fn find(&self, samples: &[f64]) -> Result<Vec<Peak>, AnalysisError> {
        self.find_impl(samples, None)
    }

    /// Extract peaks while feeding the monitor the final markers
    pub fn find_monitored(
        &self,
        samples: &[f64],
        monitor: &mut dyn PeakMonitor,
    ) -> Result<Vec<Peak>, AnalysisError> {
        self.find_impl(samples, Some(monitor))
    }

    fn find_impl(
        &self,
        samples: &[f64],
        monitor: Option<&mut dyn PeakMonitor>,
    ) -> Result<Vec<Peak>, AnalysisError> {
        if samples.len() < 3 {
            return Err(AnalysisError::SignalTooShort {
                needed: 3,
                actual: samples.len(),
            });
        }

        let candidates = find_candidates(samples);

        // Polarity comes from the first candidate's left slope and then
        // alternates strictly, whatever the local shape of later candidates
        let first_is_maximum = candidates
            .first()
            .map(|&i| samples[i] - samples[i - 1] > 0.0)
            .unwrap_or(false);

        let mut peaks = Vec::new();
        for (ordinal, &index) in candidates.iter().enumerate() {
            let is_maximum = first_is_maximum == (ordinal % 2 == 0);
            let keep = match self.mode {
                PeakMode::MaximaOnly => is_maximum,
                PeakMode::MinimaOnly => !is_maximum,
                PeakMode::Both => true,
            };
            if !keep {
                continue;
            }

            let left_base = if ordinal > 0 { candidates[ordinal - 1] } else { 0 };
            let right_base = if ordinal + 1 < candidates.len() {
                candidates[ordinal + 1]
            } else {
                samples.len() - 1
            };

            let pedestal = line_at(
                left_base,
                samples[left_base],
                right_base,
                samples[right_base],
                index,
            );

            peaks.push(Peak {
                position: index as f64,
                prominence: (samples[index] - pedestal).abs(),
                width: 0.0,
                pedestal,
                left_base,
                right_base,
            });
        }

        peaks.sort_by(|a, b| b.prominence.total_cmp(&a.prominence));
        if self.max_count > 0 && peaks.len() > self.max_count {
            peaks.truncate(self.max_count);
        }

        if let Some(monitor) = monitor {
            monitor.peaks("peaks", &peaks);
        }

        Ok(peaks)
    }
}

/// Fill in peak widths over the curve the peaks were found in
///
/// Each half-width runs from the peak toward one of its bases, up to the
/// point where the curve crosses the 50%-of-prominence level above (for
/// maxima) or below (for minima) that side's base value. Crossings are
/// linearly interpolated; a side that never crosses is clamped at its base.
pub fn compute_widths(samples: &[f64], peaks: &mut [Peak]) {
    for peak in peaks.iter_mut() {
        let index = peak.position as usize;
        if index >= samples.len() {
            continue;
        }

        let is_maximum = samples[index] >= peak.pedestal;
        let toward = if is_maximum { 0.5 } else { -0.5 };

        let left_level = samples[peak.left_base] + toward * peak.prominence;
        let right_level = samples[peak.right_base] + toward * peak.prominence;

        let left = crossing_distance(samples, index, peak.left_base, left_level, is_maximum);
        let right = crossing_distance(samples, index, peak.right_base, right_level, is_maximum);

        peak.width = left + right;
    }
}

/// Interior indices whose neighboring slopes are both nonzero and of
/// opposite sign
fn find_candidates(samples: &[f64]) -> Vec<usize> {
    let mut candidates = Vec::new();
    for i in 1..samples.len() - 1 {
        let left = samples[i] - samples[i - 1];
        let right = samples[i + 1] - samples[i];
        if (left > 0.0 && right < 0.0) || (left < 0.0 && right > 0.0) {
            candidates.push(i);
        }
    }
    candidates
}

/// Straight line through (x0, y0) and (x1, y1), evaluated at x
fn line_at(x0: usize, y0: f64, x1: usize, y1: f64, x: usize) -> f64 {
    let t = (x - x0) as f64 / (x1 - x0) as f64;
    y0 + (y1 - y0) * t
}

/// Distance in samples from the peak to the level crossing on one side
fn crossing_distance(
    samples: &[f64],
    peak_index: usize,
    base: usize,
    level: f64,
    is_maximum: bool,
) -> f64 {
    let step: isize = if base < peak_index { -1 } else { 1 };
    let limit = base as isize;

    let mut prev = peak_index as isize;
    let mut current = prev + step;
    while (step < 0 && current >= limit) || (step > 0 && current <= limit) {
        let sample = samples[current as usize];
        let crossed = if is_maximum {
            sample < level
        } else {
            sample > level
        };
        if crossed {
            let a = samples[prev as usize];
            let span = a - sample;
            let t = if span.abs() > 0.0 {
                ((a - level) / span).clamp(0.0, 1.0)
            } else {
                1.0
            };
            return (prev - peak_index as isize).abs() as f64 + t;
        }
        prev = current;
        current += step;
    }

    (peak_index as isize - limit).abs() as f64
}
