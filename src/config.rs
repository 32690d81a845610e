//! Input stage and output channel configuration.
//!
//! Constructors validate every device limit eagerly; the rest of the crate
//! operates on values that are already in range.

use crate::constants::*;
use crate::errors::Error;

/// PLL bandwidth setting, selects the loop filter characterization variant
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Bandwidth {
    Low,
    High,
}

/// Shared input stage: one reference clock domain per device.
///
/// `mult` and `divide` set the VCO frequency
/// `frequency * mult / divide`; the frequency search rewrites them when the
/// precise output's target changes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InputStage {
    /// Input clock frequency, Hz
    pub frequency: u32,
    /// Feedback multiplier (CLKFBOUT), 2..=64
    pub mult: u32,
    /// Feedback phase, millidegrees
    pub phase: i32,
    /// Input pre-divider (DIVCLK), 1..=56
    pub divide: u32,
    /// Bandwidth setting
    pub bandwidth: Bandwidth,
}

impl InputStage {
    /// Validated input stage configuration
    pub fn new(
        frequency: u32,
        mult: u32,
        divide: u32,
        phase: i32,
        bandwidth: Bandwidth,
    ) -> Result<Self, Error> {
        if !(INPUT_FREQ_MIN..=INPUT_FREQ_MAX).contains(&frequency) {
            return Err(Error::InvalidInputFrequency);
        }
        if !(FBOUT_MULT_MIN..=FBOUT_MULT_MAX).contains(&mult) {
            return Err(Error::InvalidMultiplier);
        }
        if !(DIVCLK_DIVIDE_MIN..=DIVCLK_DIVIDE_MAX).contains(&divide) {
            return Err(Error::InvalidDivide);
        }
        if !(PHASE_MIN..=PHASE_MAX).contains(&phase) {
            return Err(Error::InvalidPhase);
        }

        Ok(InputStage {
            frequency,
            mult,
            phase,
            divide,
            bandwidth,
        })
    }

    /// VCO frequency for the current multiplier and pre-divider, Hz
    #[inline]
    pub fn vco_frequency(&self) -> u64 {
        u64::from(self.frequency) * u64::from(self.mult) / u64::from(self.divide)
    }
}

/// One output channel.
///
/// A target frequency of 0 means "unset": the channel runs off its
/// configured divider and its rate is derived on demand. Exactly one channel
/// per device is flagged precise; only that channel's rate changes may
/// rewrite the shared input stage.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OutputChannel {
    /// Target output frequency, Hz; 0 = derive from divider
    pub frequency: u32,
    /// Output divider (CLKOUT), 1..=128
    pub divide: u32,
    /// Duty cycle, parts per 100000
    pub duty: u32,
    /// Output phase, millidegrees
    pub phase: i32,
    /// Precision clock flag
    pub precise: bool,
}

impl OutputChannel {
    /// Validated output channel configuration
    pub fn new(
        frequency: u32,
        divide: u32,
        duty: u32,
        phase: i32,
        precise: bool,
    ) -> Result<Self, Error> {
        if frequency != 0 && !(OUTPUT_FREQ_MIN..=OUTPUT_FREQ_MAX).contains(&frequency) {
            return Err(Error::InvalidOutputFrequency);
        }
        if !(CLKOUT_DIVIDE_MIN..=CLKOUT_DIVIDE_MAX).contains(&divide) {
            return Err(Error::InvalidDivide);
        }
        if !(CLKOUT_DUTY_MIN..=CLKOUT_DUTY_MAX).contains(&duty) {
            return Err(Error::InvalidDuty);
        }
        if !(PHASE_MIN..=PHASE_MAX).contains(&phase) {
            return Err(Error::InvalidPhase);
        }

        Ok(OutputChannel {
            frequency,
            divide,
            duty,
            phase,
            precise,
        })
    }
}
