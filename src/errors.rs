//! Driver errors

/// Driver error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input reference frequency outside 10 MHz .. 800 MHz
    InvalidInputFrequency,
    /// Output frequency outside 4.69 MHz .. 800 MHz
    InvalidOutputFrequency,
    /// Feedback multiplier outside 2 .. 64
    InvalidMultiplier,
    /// Divider outside its allowed range
    InvalidDivide,
    /// Duty cycle outside 0.1% .. 99.9%
    InvalidDuty,
    /// Phase outside -360000 .. 360000 millidegrees
    InvalidPhase,
    /// Not exactly one output channel flagged precise
    InvalidPreciseOutput,
    /// No multiplier/pre-divider pair keeps the VCO inside its
    /// frequency window for the requested rate
    NoFeasibleConfiguration,
    /// Characterization table indexed with a multiplier outside 2 .. 64.
    /// Indicates a broken invariant upstream, never a runtime condition.
    TableIndex,
    /// PLL failed to lock within the poll budget; the device was left
    /// on its previous configuration
    LockTimeout,
    /// Register bus access failed
    Bus,
}
