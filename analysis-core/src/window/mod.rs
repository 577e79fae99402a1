//! Analysis window family
//!
//! Windows are defined around the frame center `x = i - size/2` and
//! precomputed into weight tables at construction, except the rectangular
//! window whose constant weight is produced on the fly.

use std::f64::consts::PI;

/// Exponential decay constant of the Hann-Poisson window
const HANN_POISSON_ALPHA: f64 = 2.0;

/// Window shapes supported by the analysis transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowKind {
    /// Constant 1 (no shaping)
    Rectangular,

    /// w(x) = 0.54 + 0.46*cos(2πx/N)
    /// Endpoints stay at 0.08, so the window divides out cleanly
    Hanning,

    /// w(x) = 0.46*sin(2πx/N)*(2π/N), the per-sample slope of Hanning
    /// Used for frequency reassignment; crosses zero, not invertible
    HanningDerivative,

    /// w(x) = hanning(x)*x, Hanning ramped by the centered sample index
    /// Used for time reassignment; zero at the center, not invertible
    HanningTimeRamped,

    /// w(i) = 0.5*(1 - cos(2πi/(N-1))) * exp(-α*|N-1-2i|/(N-1)), α = 2
    /// Endpoint weights are exactly zero, not invertible
    HannPoisson,
}

impl WindowKind {
    /// Whether every weight of this kind is nonzero, allowing the inverse
    /// transform to divide the window back out
    pub fn is_invertible(&self) -> bool {
        matches!(self, WindowKind::Rectangular | WindowKind::Hanning)
    }
}

/// A window kind bound to a concrete size, with its weight table
#[derive(Debug, Clone)]
pub struct WindowFunction {
    kind: WindowKind,
    size: usize,
    weights: Vec<f64>,
}

impl WindowFunction {
    /// Build a window of the given kind and size
    ///
    /// # Arguments
    /// * `kind` - Window shape
    /// * `size` - Number of samples the window spans
    pub fn new(kind: WindowKind, size: usize) -> Self {
        let weights = match kind {
            WindowKind::Rectangular => Vec::new(),
            _ => generate_weights(kind, size),
        };

        Self {
            kind,
            size,
            weights,
        }
    }

    /// Weight applied to sample `index` of a frame
    pub fn weight(&self, index: usize) -> f64 {
        debug_assert!(index < self.size);
        match self.kind {
            WindowKind::Rectangular => 1.0,
            _ => self.weights[index],
        }
    }

    /// Number of samples the window spans
    pub fn size(&self) -> usize {
        self.size
    }

    /// Window shape
    pub fn kind(&self) -> WindowKind {
        self.kind
    }

    /// Whether the inverse transform may divide this window back out
    pub fn is_invertible(&self) -> bool {
        self.kind.is_invertible()
    }

    /// Multiply a staged frame by the window in place
    ///
    /// Frames shorter than the window are scaled over their own length.
    pub fn apply(&self, frame: &mut [f64]) {
        match self.kind {
            WindowKind::Rectangular => {}
            _ => {
                for (s, w) in frame.iter_mut().zip(self.weights.iter()) {
                    *s *= w;
                }
            }
        }
    }
}

/// Evaluate the closed form of a tabled window kind
fn generate_weights(kind: WindowKind, size: usize) -> Vec<f64> {
    let n = size as f64;
    let half = n / 2.0;
    let m = size.saturating_sub(1).max(1) as f64;
    let mut weights = Vec::with_capacity(size);

    for i in 0..size {
        let x = i as f64 - half;
        let w = match kind {
            WindowKind::Rectangular => 1.0,
            WindowKind::Hanning => hanning(x, n),
            WindowKind::HanningDerivative => 0.46 * (2.0 * PI * x / n).sin() * (2.0 * PI / n),
            WindowKind::HanningTimeRamped => hanning(x, n) * x,
            WindowKind::HannPoisson => {
                let rise = 0.5 * (1.0 - (2.0 * PI * i as f64 / m).cos());
                let decay = (-HANN_POISSON_ALPHA * (m - 2.0 * i as f64).abs() / m).exp();
                rise * decay
            }
        };
        weights.push(w);
    }

    weights
}

fn hanning(x: f64, n: f64) -> f64 {
    0.54 + 0.46 * (2.0 * PI * x / n).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hanning_shape() {
        let window = WindowFunction::new(WindowKind::Hanning, 64);

        // Center weight is 0.54 + 0.46 = 1.0
        assert!((window.weight(32) - 1.0).abs() < 1e-12);

        // Endpoint weight is 0.54 - 0.46 = 0.08
        assert!((window.weight(0) - 0.08).abs() < 1e-12);

        // Symmetric about the center
        for i in 1..64 {
            assert!((window.weight(i) - window.weight(64 - i)).abs() < 1e-12);
        }
    }

    #[test]
    fn test_derivative_is_antisymmetric() {
        let window = WindowFunction::new(WindowKind::HanningDerivative, 64);

        for i in 1..64 {
            assert!((window.weight(i) + window.weight(64 - i)).abs() < 1e-12);
        }

        let sum: f64 = (0..64).map(|i| window.weight(i)).sum();
        assert!(sum.abs() < 1e-10);
    }

    #[test]
    fn test_time_ramp_changes_sign_at_center() {
        let window = WindowFunction::new(WindowKind::HanningTimeRamped, 64);

        assert_eq!(window.weight(32), 0.0);
        assert!(window.weight(31) < 0.0);
        assert!(window.weight(33) > 0.0);

        // Ramp scales the plain window by the centered index
        let plain = WindowFunction::new(WindowKind::Hanning, 64);
        for i in 0..64 {
            let x = i as f64 - 32.0;
            assert!((window.weight(i) - plain.weight(i) * x).abs() < 1e-12);
        }
    }

    #[test]
    fn test_hann_poisson_endpoints_are_zero() {
        let window = WindowFunction::new(WindowKind::HannPoisson, 128);

        assert!(window.weight(0).abs() < 1e-15);
        assert!(window.weight(127).abs() < 1e-15);
        assert!((0..128).all(|i| window.weight(i) >= 0.0));

        // Decay keeps the window inside the plain Hann envelope
        for i in 1..127 {
            let rise = 0.5 * (1.0 - (2.0 * PI * i as f64 / 127.0).cos());
            assert!(window.weight(i) <= rise + 1e-15);
        }
    }

    #[test]
    fn test_rectangular_has_no_table() {
        let window = WindowFunction::new(WindowKind::Rectangular, 100);

        assert!((0..100).all(|i| window.weight(i) == 1.0));

        let mut frame = vec![0.25; 100];
        window.apply(&mut frame);
        assert!(frame.iter().all(|&s| s == 0.25));
    }

    #[test]
    fn test_invertibility_flags() {
        assert!(WindowKind::Rectangular.is_invertible());
        assert!(WindowKind::Hanning.is_invertible());
        assert!(!WindowKind::HanningDerivative.is_invertible());
        assert!(!WindowKind::HanningTimeRamped.is_invertible());
        assert!(!WindowKind::HannPoisson.is_invertible());
    }

    #[test]
    fn test_apply_matches_weight_table() {
        let window = WindowFunction::new(WindowKind::Hanning, 32);

        let mut frame = vec![1.0; 32];
        window.apply(&mut frame);

        for (i, &s) in frame.iter().enumerate() {
            assert!((s - window.weight(i)).abs() < 1e-15);
        }
    }
}
