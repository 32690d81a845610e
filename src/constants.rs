//! Constants

/// Minimum allowed input reference frequency, Hz
pub const INPUT_FREQ_MIN: u32 = 10_000_000;

/// Maximum allowed input reference frequency, Hz
pub const INPUT_FREQ_MAX: u32 = 800_000_000;

/// Minimum allowed output frequency, Hz
pub const OUTPUT_FREQ_MIN: u32 = 4_690_000;

/// Maximum allowed output frequency, Hz
pub const OUTPUT_FREQ_MAX: u32 = 800_000_000;

/// MMCM VCO frequency window, Hz.
/// `reference * clkfbout_mult / divclk_divide` must stay inside it.
pub const VCO_FREQ_MIN: u64 = 600_000_000;

/// See [VCO_FREQ_MIN]
pub const VCO_FREQ_MAX: u64 = 1_600_000_000;

/// Minimum phase, millidegrees
pub const PHASE_MIN: i32 = -360_000;

/// Maximum phase, millidegrees
pub const PHASE_MAX: i32 = 360_000;

/// Output divider range
pub const CLKOUT_DIVIDE_MIN: u32 = 1;

/// See [CLKOUT_DIVIDE_MIN]
pub const CLKOUT_DIVIDE_MAX: u32 = 128;

/// Duty cycle range, parts per 100000 (0.1% .. 99.9%)
pub const CLKOUT_DUTY_MIN: u32 = 100;

/// See [CLKOUT_DUTY_MIN]
pub const CLKOUT_DUTY_MAX: u32 = 99_900;

/// Input pre-divider range
pub const DIVCLK_DIVIDE_MIN: u32 = 1;

/// See [DIVCLK_DIVIDE_MIN]
pub const DIVCLK_DIVIDE_MAX: u32 = 56;

/// Feedback multiplier range
pub const FBOUT_MULT_MIN: u32 = 2;

/// See [FBOUT_MULT_MIN]
pub const FBOUT_MULT_MAX: u32 = 64;

/// Fractional bits used by the duty/phase fixed-point encoders
pub const FRACTION_PRECISION: u32 = 10;

/// Number of output channels per device
pub const OUTPUTS: usize = 6;

/// Number of manual configuration registers
pub const MANUAL_REGS: usize = 21;

/// Register stride, bytes
pub const REG_STRIDE: usize = 4;

/// Register index of the PLL status/configuration register
pub const PLL_REG_OFF: usize = 0;

/// The manual configuration bank starts one register past the
/// status/configuration register.
pub const MANUAL_REG_OFF: usize = 1;

/// Lock indicator bit in the status register
pub const PLL_LOCK: u32 = 1 << 0;

/// Configuration enable bit
pub const PLL_CONFIG: u32 = 1 << 0;

/// "Use software parameters" bit; without it the PLL re-arms its
/// hardware power-on defaults.
pub const PLL_CONFIG_SW: u32 = 1 << 1;

/// Output enable mask written to manual register 0
pub const OUTPUT_ENABLE_MASK: u32 = 0xFFFF;

/// Lock poll interval, ms
pub const LOCK_TIME_MS: u16 = 1;

/// Number of lock poll attempts before giving up
pub const LOCK_TIME_INTERVALS: u32 = 50;
