//! logiCLK manual configuration registers.
//!
//! The MMCM takes each clock counter as a packed word of low/high time,
//! no-count and edge-select fields plus a phase delay/mux pair. Two 16-bit
//! halves of the combined word land in the manual register bank, 21 registers
//! total: an output enable mask, one register pair per output counter, the
//! shared input-stage counters and the loop filter / lock window bits.

use crate::bits::*;
use crate::constants::*;

/// Divide counter fields.
///
/// `low_time`/`high_time` are the counter's low and high cycle counts.
/// `no_count` bypasses the counter entirely (divide-by-one). `edge` stretches
/// the high time by half a cycle for odd or rounded-up duty settings.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DivideCount {
    pub low_time: u32,
    pub high_time: u32,
    pub no_count: bool,
    pub edge: bool,
}

impl DivideCount {
    /// Encode a divider and duty cycle (parts per 100000).
    ///
    /// The duty is converted to 10-bit fixed point, scaled by the divider
    /// and rounded at one fractional bit; bit 9 of the result becomes the
    /// edge select and bits 16..10 the high time. A zero high time is
    /// clamped to 1 and a high time equal to the divider to `divide - 1`,
    /// flipping the edge bit accordingly.
    pub fn encode(divide: u32, duty: u32) -> Self {
        let duty_fix = (duty << FRACTION_PRECISION) / 100_000;

        if divide == 1 {
            return DivideCount {
                low_time: 1,
                high_time: 1,
                no_count: true,
                edge: false,
            };
        }

        let temp = round_fraction(duty_fix * divide, 1);

        let mut edge = get_bits(
            temp.into(),
            FRACTION_PRECISION - 1,
            FRACTION_PRECISION - 1,
        ) != 0;
        let mut high_time = get_bits(temp.into(), FRACTION_PRECISION + 6, FRACTION_PRECISION);

        if high_time == 0 {
            edge = false;
            high_time = 1;
        }
        if high_time == divide {
            edge = true;
            high_time = divide - 1;
        }

        DivideCount {
            low_time: divide - high_time,
            high_time,
            no_count: false,
            edge,
        }
    }

    /// Pack into the 14-bit divide-count field:
    /// bits 5:0 low time, 11:6 high time, 12 no-count, 13 edge.
    pub fn pack(&self) -> u32 {
        (self.low_time & 0x3F)
            | ((self.high_time & 0x3F) << 6)
            | ((self.no_count as u32) << 12)
            | ((self.edge as u32) << 13)
    }

    /// Inverse of [DivideCount::pack]
    pub fn unpack(word: u32) -> Self {
        DivideCount {
            low_time: get_bits(word.into(), 5, 0),
            high_time: get_bits(word.into(), 11, 6),
            no_count: get_bits(word.into(), 12, 12) != 0,
            edge: get_bits(word.into(), 13, 13) != 0,
        }
    }
}

/// Phase counter fields: whole-cycle delay and 1/8-cycle phase mux select.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PhaseCount {
    pub delay_time: u32,
    pub phase_mux: u32,
}

impl PhaseCount {
    /// Encode a signed phase in millidegrees for the given divider.
    ///
    /// Negative phases wrap by a full turn first. The phase is scaled to
    /// 10-bit fixed point per degree, multiplied by the divider, divided by
    /// 360 and rounded at three fractional bits; the integer part is the
    /// cycle delay, the top three fractional bits select the phase mux tap.
    pub fn encode(divide: u32, phase: i32) -> Self {
        let phase_fixed = if phase < 0 {
            (((phase + PHASE_MAX) as u32) << FRACTION_PRECISION) / 1000
        } else {
            ((phase as u32) << FRACTION_PRECISION) / 1000
        };

        let phase_cycles = (phase_fixed * divide) / (PHASE_MAX as u32 / 1000);

        let temp = round_fraction(phase_cycles, 3);

        PhaseCount {
            delay_time: get_bits(temp.into(), FRACTION_PRECISION + 5, FRACTION_PRECISION),
            phase_mux: get_bits(temp.into(), FRACTION_PRECISION - 1, FRACTION_PRECISION - 3),
        }
    }

    /// Pack into the 9-bit phase-count field:
    /// bits 5:0 delay time, 8:6 phase mux.
    pub fn pack(&self) -> u32 {
        (self.delay_time & 0x3F) | ((self.phase_mux & 0x7) << 6)
    }

    /// Inverse of [PhaseCount::pack]
    pub fn unpack(word: u32) -> Self {
        PhaseCount {
            delay_time: get_bits(word.into(), 5, 0),
            phase_mux: get_bits(word.into(), 8, 6),
        }
    }
}

/// Combined PLL counter word in hardware order:
///
/// | word bits | source                 |
/// |-----------|------------------------|
/// | 11:0      | divide count bits 11:0 |
/// | 15:13     | phase count bits 8:6   |
/// | 21:16     | phase count bits 5:0   |
/// | 23:22     | divide count bits 13:12|
/// | 25:24     | phase count bits 10:9  |
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CountWord(pub u32);

impl CountWord {
    /// Encode divider, duty and phase and interleave both packed fields.
    pub fn assemble(divide: u32, duty: u32, phase: i32) -> Self {
        let div = DivideCount::encode(divide, duty).pack();
        let phase = PhaseCount::encode(divide, phase).pack();

        CountWord(
            get_bits(div.into(), 11, 0)
                | (get_bits(phase.into(), 8, 6) << 13)
                | (get_bits(phase.into(), 5, 0) << 16)
                | (get_bits(div.into(), 13, 12) << 22)
                | (get_bits(phase.into(), 10, 9) << 24),
        )
    }

    /// Reassembled 14-bit divide-count field
    pub fn divide_field(&self) -> u32 {
        get_bits(self.0.into(), 11, 0) | (get_bits(self.0.into(), 23, 22) << 12)
    }

    /// Reassembled phase-count field
    pub fn phase_field(&self) -> u32 {
        get_bits(self.0.into(), 21, 16)
            | (get_bits(self.0.into(), 15, 13) << 6)
            | (get_bits(self.0.into(), 25, 24) << 9)
    }

    /// Low 16-bit register half
    pub fn low_half(&self) -> u32 {
        get_bits(self.0.into(), 15, 0)
    }

    /// High 16-bit register half
    pub fn high_half(&self) -> u32 {
        get_bits(self.0.into(), 31, 16)
    }
}

/// The 21-register manual configuration image.
///
/// Register 0 carries the output enable mask, registers `1 + 2 * id` and
/// `2 + 2 * id` the per-output counter halves, registers 13..=20 the shared
/// input-stage counters, lock window and loop filter bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RegisterImage {
    words: [u32; MANUAL_REGS],
}

impl Default for RegisterImage {
    fn default() -> Self {
        RegisterImage {
            words: [0; MANUAL_REGS],
        }
    }
}

impl RegisterImage {
    /// Register values in device order
    #[inline]
    pub fn words(&self) -> &[u32; MANUAL_REGS] {
        &self.words
    }

    /// Overwrite one output channel's register pair
    pub(crate) fn set_output(&mut self, id: usize, count: CountWord) {
        let reg = MANUAL_REG_OFF + id * 2;

        self.words[reg] = count.low_half();
        self.words[reg + 1] = count.high_half();
    }

    /// Overwrite the shared registers: enable mask, input pre-divider and
    /// feedback counter words, lock window and loop filter bits.
    pub(crate) fn set_shared(&mut self, clkfbout: CountWord, divclk: CountWord, filter: u32, lock: u64) {
        let divclk = u64::from(divclk.0);
        let filter = u64::from(filter);

        self.words[0] = OUTPUT_ENABLE_MASK;

        self.words[13] = (get_bits(divclk, 23, 22) << 12) | get_bits(divclk, 11, 0);
        self.words[14] = clkfbout.low_half();
        self.words[15] = clkfbout.high_half();
        self.words[16] = get_bits(lock, 29, 20);
        self.words[17] = (get_bits(lock, 34, 30) << 10) | get_bits(lock, 9, 0);
        self.words[18] = (get_bits(lock, 39, 35) << 10) | get_bits(lock, 19, 10);
        self.words[19] = (get_bits(filter, 6, 6) << 8)
            | (get_bits(filter, 8, 7) << 11)
            | (get_bits(filter, 9, 9) << 15);
        self.words[20] = (get_bits(filter, 0, 0) << 4)
            | (get_bits(filter, 2, 1) << 7)
            | (get_bits(filter, 4, 3) << 11)
            | (get_bits(filter, 5, 5) << 15);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divide_by_one_is_no_count() {
        for &duty in &[100, 25_000, 50_000, 99_900] {
            let dc = DivideCount::encode(1, duty);
            assert_eq!(
                dc,
                DivideCount {
                    low_time: 1,
                    high_time: 1,
                    no_count: true,
                    edge: false,
                }
            );
        }
    }

    #[test]
    fn low_plus_high_equals_divide() {
        for &divide in &[2, 3, 5, 13, 64, 128] {
            for &duty in &[100, 10_000, 25_000, 50_000, 75_000, 99_900] {
                let dc = DivideCount::encode(divide, duty);
                assert!(!dc.no_count);
                assert_eq!(dc.low_time + dc.high_time, divide, "divide={} duty={}", divide, duty);
                assert!(dc.high_time >= 1);
                assert!(dc.high_time <= divide - 1);
            }
        }
    }

    #[test]
    fn even_fifty_percent_duty() {
        let dc = DivideCount::encode(8, 50_000);
        assert_eq!(dc.high_time, 4);
        assert_eq!(dc.low_time, 4);
        assert!(!dc.edge);
    }

    #[test]
    fn high_time_clamped_at_divide() {
        // 99.9% of 2 cycles rounds up to 2, clamped to 1 with edge set
        let dc = DivideCount::encode(2, 99_900);
        assert_eq!(dc.high_time, 1);
        assert_eq!(dc.low_time, 1);
        assert!(dc.edge);
    }

    #[test]
    fn high_time_clamped_at_zero() {
        // 0.1% of 2 cycles truncates to 0, clamped to 1 with edge clear
        let dc = DivideCount::encode(2, 100);
        assert_eq!(dc.high_time, 1);
        assert_eq!(dc.low_time, 1);
        assert!(!dc.edge);
    }

    #[test]
    fn divide_count_pack_round_trip() {
        for &divide in &[1, 2, 7, 128] {
            for &duty in &[100, 50_000, 99_900] {
                let dc = DivideCount::encode(divide, duty);
                assert_eq!(DivideCount::unpack(dc.pack()), dc);
            }
        }
    }

    #[test]
    fn phase_count_pack_round_trip() {
        for &divide in &[1, 8, 128] {
            for &phase in &[-360_000, -90_000, 0, 45_000, 360_000] {
                let pc = PhaseCount::encode(divide, phase);
                assert_eq!(PhaseCount::unpack(pc.pack()), pc);
            }
        }
    }

    #[test]
    fn negative_phase_wraps_by_a_full_turn() {
        for &divide in &[1, 4, 13] {
            assert_eq!(
                PhaseCount::encode(divide, -90_000),
                PhaseCount::encode(divide, 270_000)
            );
        }
    }

    #[test]
    fn phase_zero_is_zero() {
        let pc = PhaseCount::encode(8, 0);
        assert_eq!(pc.delay_time, 0);
        assert_eq!(pc.phase_mux, 0);
    }

    #[test]
    fn phase_mux_selects_eighths() {
        // 270 degrees on a divide-by-one counter: 3/4 cycle, mux tap 6
        let pc = PhaseCount::encode(1, 270_000);
        assert_eq!(pc.delay_time, 0);
        assert_eq!(pc.phase_mux, 6);
    }

    #[test]
    fn count_word_interleave() {
        let div = DivideCount::encode(13, 30_000).pack();
        let phase = PhaseCount::encode(13, 123_000).pack();
        let w = CountWord::assemble(13, 30_000, 123_000).0;

        assert_eq!(get_bits(w.into(), 11, 0), get_bits(div.into(), 11, 0));
        assert_eq!(get_bits(w.into(), 15, 13), get_bits(phase.into(), 8, 6));
        assert_eq!(get_bits(w.into(), 21, 16), get_bits(phase.into(), 5, 0));
        assert_eq!(get_bits(w.into(), 23, 22), get_bits(div.into(), 13, 12));
        assert_eq!(get_bits(w.into(), 25, 24), get_bits(phase.into(), 10, 9));
        // bits 12 and 26..31 are never driven
        assert_eq!(get_bits(w.into(), 12, 12), 0);
        assert_eq!(get_bits(w.into(), 31, 26), 0);
    }

    #[test]
    fn count_word_field_round_trip() {
        let cw = CountWord::assemble(1, 50_000, 0);
        let div = DivideCount::encode(1, 50_000).pack();
        let phase = PhaseCount::encode(1, 0).pack();

        assert_eq!(cw.divide_field(), div);
        assert_eq!(cw.phase_field(), phase);
        assert_eq!((cw.high_half() << 16) | cw.low_half(), cw.0);
    }

    #[test]
    fn output_register_pair_placement() {
        let mut image = RegisterImage::default();
        let cw = CountWord::assemble(4, 50_000, 0);

        image.set_output(3, cw);

        assert_eq!(image.words()[7], cw.low_half());
        assert_eq!(image.words()[8], cw.high_half());
        for (i, w) in image.words().iter().enumerate() {
            if i != 7 && i != 8 {
                assert_eq!(*w, 0);
            }
        }
    }

    #[test]
    fn shared_register_packing() {
        let mut image = RegisterImage::default();
        let clkfbout = CountWord::assemble(8, 50_000, 0);
        let divclk = CountWord::assemble(1, 50_000, 0);

        image.set_shared(clkfbout, divclk, 0x3FF, 0xFF_FFFF_FFFF);

        assert_eq!(image.words()[0], OUTPUT_ENABLE_MASK);
        assert_eq!(
            image.words()[13],
            (get_bits(divclk.0.into(), 23, 22) << 12) | get_bits(divclk.0.into(), 11, 0)
        );
        assert_eq!(image.words()[14], clkfbout.low_half());
        assert_eq!(image.words()[15], clkfbout.high_half());
        // all-ones lock word fills every destination field
        assert_eq!(image.words()[16], 0x3FF);
        assert_eq!(image.words()[17], (0x1F << 10) | 0x3FF);
        assert_eq!(image.words()[18], (0x1F << 10) | 0x3FF);
        // all-ones filter word: bit placements per the register map
        assert_eq!(image.words()[19], (1 << 8) | (0b11 << 11) | (1 << 15));
        assert_eq!(
            image.words()[20],
            (1 << 4) | (0b11 << 7) | (0b11 << 11) | (1 << 15)
        );
    }
}
