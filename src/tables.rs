//! MMCM characterization tables.
//!
//! Fixed device-characterization constants for the 7 series MMCM, identical
//! across all instances of this PLL family: loop filter selection (two
//! variants, picked by the bandwidth setting) and the 40-bit lock window
//! word. Both are indexed by `feedback multiplier - 1`; a multiplier outside
//! 2..=64 can only reach here through a broken invariant upstream and is
//! reported as [Error::TableIndex].

use crate::config::Bandwidth;
use crate::constants::*;
use crate::errors::Error;

#[rustfmt::skip]
const FILTER_HIGH: [u32; 64] = [
    0x17C, 0x3FC, 0x3F4, 0x3E4, 0x3F8, 0x3C4, 0x3C4, 0x3D8,
    0x3E8, 0x3E8, 0x3E8, 0x3B0, 0x3F0, 0x3F0, 0x3F0, 0x3F0,
    0x3F0, 0x3F0, 0x3F0, 0x3F0, 0x3B0, 0x3B0, 0x3B0, 0x3E8,
    0x370, 0x308, 0x370, 0x370, 0x3E8, 0x3E8, 0x3E8, 0x1C8,
    0x330, 0x330, 0x3A8, 0x188, 0x188, 0x188, 0x1F0, 0x188,
    0x110, 0x110, 0x110, 0x110, 0x110, 0x110, 0x0E0, 0x0E0,
    0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0,
    0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0, 0x0E0,
];

#[rustfmt::skip]
const FILTER_LOW: [u32; 64] = [
    0x05F, 0x057, 0x07B, 0x05B, 0x06B, 0x073, 0x073, 0x073,
    0x073, 0x04B, 0x04B, 0x04B, 0x0B3, 0x053, 0x053, 0x053,
    0x053, 0x053, 0x053, 0x053, 0x053, 0x053, 0x053, 0x063,
    0x063, 0x063, 0x063, 0x063, 0x063, 0x063, 0x063, 0x063,
    0x063, 0x063, 0x063, 0x063, 0x063, 0x093, 0x093, 0x093,
    0x093, 0x093, 0x093, 0x093, 0x093, 0x093, 0x093, 0x0A3,
    0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3,
    0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3, 0x0A3,
];

#[rustfmt::skip]
const LOCK: [u64; 64] = [
    0x31BE8FA401, 0x31BE8FA401, 0x423E8FA401, 0x5AFE8FA401,
    0x73BE8FA401, 0x8C7E8FA401, 0x9CFE8FA401, 0xB5BE8FA401,
    0xCE7E8FA401, 0xE73E8FA401, 0xFFF84FA401, 0xFFF39FA401,
    0xFFEEEFA401, 0xFFEBCFA401, 0xFFE8AFA401, 0xFFE71FA401,
    0xFFE3FFA401, 0xFFE26FA401, 0xFFE0DFA401, 0xFFDF4FA401,
    0xFFDDBFA401, 0xFFDC2FA401, 0xFFDA9FA401, 0xFFD90FA401,
    0xFFD90FA401, 0xFFD77FA401, 0xFFD5EFA401, 0xFFD5EFA401,
    0xFFD45FA401, 0xFFD45FA401, 0xFFD2CFA401, 0xFFD2CFA401,
    0xFFD2CFA401, 0xFFD13FA401, 0xFFD13FA401, 0xFFD13FA401,
    0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401,
    0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401,
    0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401,
    0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401,
    0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401,
    0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401,
    0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401, 0xFFCFAFA401,
];

#[inline]
fn table_index(mult: u32) -> Result<usize, Error> {
    if (FBOUT_MULT_MIN..=FBOUT_MULT_MAX).contains(&mult) {
        Ok((mult - 1) as usize)
    } else {
        Err(Error::TableIndex)
    }
}

/// 10-bit loop filter word for a feedback multiplier
pub fn filter_word(mult: u32, bandwidth: Bandwidth) -> Result<u32, Error> {
    let idx = table_index(mult)?;

    Ok(match bandwidth {
        Bandwidth::High => FILTER_HIGH[idx],
        Bandwidth::Low => FILTER_LOW[idx],
    })
}

/// 40-bit lock window word for a feedback multiplier
pub fn lock_word(mult: u32) -> Result<u64, Error> {
    Ok(LOCK[table_index(mult)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_entries() {
        assert_eq!(filter_word(2, Bandwidth::Low), Ok(0x057));
        assert_eq!(filter_word(2, Bandwidth::High), Ok(0x3FC));
        assert_eq!(filter_word(64, Bandwidth::Low), Ok(0x0A3));
        assert_eq!(filter_word(64, Bandwidth::High), Ok(0x0E0));
        assert_eq!(lock_word(2), Ok(0x31BE8FA401));
        assert_eq!(lock_word(64), Ok(0xFFCFAFA401));
    }

    #[test]
    fn multiplier_outside_range_faults() {
        assert_eq!(filter_word(0, Bandwidth::Low), Err(Error::TableIndex));
        assert_eq!(filter_word(1, Bandwidth::High), Err(Error::TableIndex));
        assert_eq!(filter_word(65, Bandwidth::Low), Err(Error::TableIndex));
        assert_eq!(lock_word(1), Err(Error::TableIndex));
        assert_eq!(lock_word(65), Err(Error::TableIndex));
    }

    #[test]
    fn filter_words_fit_ten_bits() {
        for mult in FBOUT_MULT_MIN..=FBOUT_MULT_MAX {
            assert!(filter_word(mult, Bandwidth::Low).unwrap() <= 0x3FF);
            assert!(filter_word(mult, Bandwidth::High).unwrap() <= 0x3FF);
            assert!(lock_word(mult).unwrap() <= 0xFF_FFFF_FFFF);
        }
    }
}
