//! Short-time, reassigned, and layered transforms

pub mod reassignment;
pub mod short_time;
pub mod wavelet;

pub use reassignment::{ReassignedPoint, ReassignmentTransform, SrSpectrum};
pub use short_time::{ShortTimeTransform, StftFrame};
pub use wavelet::{WaveletContainer, WaveletLayer, WaveletTransform};
