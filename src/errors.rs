//! Driver errors

/// Driver error
#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A digital output pin write was rejected by the HAL
    Pin,
    /// Reference clock frequency outside the supported range
    InvalidReferenceFrequency,
    /// Sweep bounds are inverted, or the step is not positive
    InvalidSweepRange,
}
