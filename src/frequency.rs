//! Frequency search.
//!
//! Exhaustive minimum-error searches over the MMCM divider space, in exact
//! integer arithmetic so results are identical across platforms. Ties keep
//! the first combination found in enumeration order (pre-divider outer,
//! multiplier middle, output divider inner) and an exact hit returns
//! immediately.

use crate::constants::*;
use crate::errors::Error;

/// Feedback multiplier / input pre-divider pair produced by the full search
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Feedback {
    pub mult: u32,
    pub divide: u32,
}

/// Full search for the precise output: enumerate every
/// `(pre_divider, multiplier, output_divider)` triple, skip VCO frequencies
/// outside the device window and keep the pair with minimal output error.
///
/// Fails with [Error::NoFeasibleConfiguration] when no multiplier and
/// pre-divider put the VCO inside its window; the caller's input stage is
/// not touched either way.
pub fn input_mult_divide(reference: u32, target: u32) -> Result<Feedback, Error> {
    let reference = u64::from(reference);
    let target = u64::from(target);

    let mut best: Option<Feedback> = None;
    let mut best_err = u64::MAX;

    for divclk_divide in DIVCLK_DIVIDE_MIN..=DIVCLK_DIVIDE_MAX {
        for clkfbout_mult in FBOUT_MULT_MIN..=FBOUT_MULT_MAX {
            let vco = reference * u64::from(clkfbout_mult) / u64::from(divclk_divide);

            if vco < VCO_FREQ_MIN || vco > VCO_FREQ_MAX {
                continue;
            }

            for clkout_divide in CLKOUT_DIVIDE_MIN..=CLKOUT_DIVIDE_MAX {
                let err = (vco / u64::from(clkout_divide)).abs_diff(target);

                if err < best_err {
                    let found = Feedback {
                        mult: clkfbout_mult,
                        divide: divclk_divide,
                    };

                    if err == 0 {
                        return Ok(found);
                    }
                    best = Some(found);
                    best_err = err;
                }
            }
        }
    }

    best.ok_or(Error::NoFeasibleConfiguration)
}

/// Restricted search: pick the output divider minimizing the error against
/// `target` for a fixed VCO frequency. Always yields a divider in range;
/// ties keep the smallest divider and an exact hit returns immediately.
pub fn output_divide(vco: u64, target: u32) -> u32 {
    let target = u64::from(target);

    let mut best = CLKOUT_DIVIDE_MIN;
    let mut best_err = u64::MAX;

    for clkout_divide in CLKOUT_DIVIDE_MIN..=CLKOUT_DIVIDE_MAX {
        let err = (vco / u64::from(clkout_divide)).abs_diff(target);

        if err < best_err {
            if err == 0 {
                return clkout_divide;
            }
            best = clkout_divide;
            best_err = err;
        }
    }

    best
}
