//! Peak extraction
//!
//! Two extraction strategies share the [`Peak`] description: a
//! slope-sign-change finder ranking peaks by prominence over a local
//! pedestal, and a baseline-subtracting finder for accumulated histograms.
//! Both can report their intermediate curves through a [`PeakMonitor`].

pub mod baseline;
pub mod monitor;
pub mod peak;
pub mod slope;

pub use baseline::{BaselinePeakFinder, BinnedAccumulator};
pub use monitor::{PeakMonitor, RecordingMonitor};
pub use peak::{Peak, PeakMode};
pub use slope::{compute_widths, ProminencePeakFinder};
