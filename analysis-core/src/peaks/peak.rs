//! Extracted peak data

/// Polarity filter for peak extraction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeakMode {
    /// Keep only candidates assigned maximum polarity
    MaximaOnly,

    /// Keep only candidates assigned minimum polarity
    MinimaOnly,

    /// Keep every candidate
    Both,
}

/// One extracted peak
///
/// `left_base` and `right_base` index the pedestal endpoints in the source
/// sequence; they are plain indices rather than references, so a peak never
/// owns or pins the curve it was found in.
#[derive(Debug, Clone, PartialEq)]
pub struct Peak {
    /// Sample index of the peak in its source sequence
    pub position: f64,

    /// Distance between the sample value and the pedestal
    pub prominence: f64,

    /// Width in samples; stays 0 until a width pass fills it in
    pub width: f64,

    /// Reference level the prominence is measured from
    pub pedestal: f64,

    /// Index of the left pedestal endpoint
    pub left_base: usize,

    /// Index of the right pedestal endpoint
    pub right_base: usize,
}
