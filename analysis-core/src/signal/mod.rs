//! Signal-level metadata

pub mod sampling;

pub use sampling::SamplingInfo;
