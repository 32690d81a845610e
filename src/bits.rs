//! Bit slices and fixed-point rounding shared by the duty/phase encoders

use crate::constants::*;

/// Unsigned bit slice `[lsb, msb]` of `input`.
/// `msb < lsb` is a caller error.
#[inline]
pub fn get_bits(input: u64, msb: u32, lsb: u32) -> u32 {
    ((input >> lsb) & ((1u64 << (msb - lsb + 1)) - 1)) as u32
}

/// Round half up a value carrying [FRACTION_PRECISION] fractional bits,
/// keeping `precision` of them: when the bit below the kept precision is
/// set the value is bumped by that bit's weight, otherwise it is returned
/// unchanged.
#[inline]
pub fn round_fraction(decimal: u32, precision: u32) -> u32 {
    let prec = 1 << (FRACTION_PRECISION - precision - 1);

    if decimal & prec != 0 {
        decimal + prec
    } else {
        decimal
    }
}
