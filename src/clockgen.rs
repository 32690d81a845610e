//! Channel state and rate operations.
//!
//! [ClockGen] is the pure parameter-synthesis engine: it owns the shared
//! input stage, the six output channels and the manual register image, and
//! performs no I/O. Rate changes are speculative: a snapshot taken at the
//! start of the operation is restored if no feasible configuration exists,
//! so a failed call leaves every observable field untouched.

use crate::config::{InputStage, OutputChannel};
use crate::constants::*;
use crate::errors::Error;
use crate::frequency;
use crate::register::{CountWord, RegisterImage};
use crate::tables;

/// Parameter-synthesis engine for one logiCLK instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockGen {
    input: InputStage,
    outputs: [OutputChannel; OUTPUTS],
    regs: RegisterImage,
}

/// Saved state consumed by exactly one rate operation: restored on failure,
/// dropped on success. Created and consumed inside a single call, so nested
/// speculative updates cannot exist.
struct Snapshot {
    id: usize,
    input: InputStage,
    output: OutputChannel,
    regs: RegisterImage,
}

impl Snapshot {
    fn take(gen: &ClockGen, id: usize) -> Self {
        Snapshot {
            id,
            input: gen.input,
            output: gen.outputs[id],
            regs: gen.regs,
        }
    }

    fn restore(self, gen: &mut ClockGen) {
        gen.input = self.input;
        gen.outputs[self.id] = self.output;
        gen.regs = self.regs;
    }
}

impl ClockGen {
    /// New engine over a validated input stage and six validated output
    /// channels, exactly one of them precise.
    pub fn new(input: InputStage, outputs: [OutputChannel; OUTPUTS]) -> Result<Self, Error> {
        if outputs.iter().filter(|o| o.precise).count() != 1 {
            return Err(Error::InvalidPreciseOutput);
        }

        Ok(ClockGen {
            input,
            outputs,
            regs: RegisterImage::default(),
        })
    }

    /// Shared input stage
    pub fn input(&self) -> &InputStage {
        &self.input
    }

    /// Output channel state
    pub fn output(&self, id: usize) -> &OutputChannel {
        &self.outputs[id]
    }

    /// Current manual register image
    pub fn registers(&self) -> &RegisterImage {
        &self.regs
    }

    /// Index of the precise output channel
    pub fn precise_id(&self) -> usize {
        // new() guarantees exactly one
        self.outputs
            .iter()
            .position(|o| o.precise)
            .unwrap_or(0)
    }

    /// Output frequency derived from the current dividers, Hz
    fn derived_frequency(&self, id: usize) -> u32 {
        (self.input.vco_frequency() / u64::from(self.outputs[id].divide)) as u32
    }

    /// Regenerate one channel's register pair. Channels with a target
    /// frequency re-derive their output divider against the current VCO
    /// frequency and record the rate actually achieved; unset channels keep
    /// their configured divider and are only re-encoded.
    fn update_output(&mut self, id: usize) {
        let vco = self.input.vco_frequency();
        let mut out = self.outputs[id];

        if out.frequency != 0 {
            out.divide = frequency::output_divide(vco, out.frequency);
            out.frequency = (vco / u64::from(out.divide)) as u32;
        }

        self.regs
            .set_output(id, CountWord::assemble(out.divide, out.duty, out.phase));
        self.outputs[id] = out;
    }

    /// Regenerate the shared register block (enable mask, feedback and
    /// pre-divider counters, lock window, loop filter). The duty and phase
    /// of the channel driving the update feed the counter encoders.
    fn update_shared(&mut self, duty: u32, phase: i32) -> Result<(), Error> {
        let clkfbout = CountWord::assemble(self.input.mult, duty, self.input.phase);
        let divclk = CountWord::assemble(self.input.divide, duty, phase);
        let filter = tables::filter_word(self.input.mult, self.input.bandwidth)?;
        let lock = tables::lock_word(self.input.mult)?;

        self.regs.set_shared(clkfbout, divclk, filter, lock);
        Ok(())
    }

    /// Recompute parameters after a target frequency change on channel `id`.
    ///
    /// For the precise channel this reruns the full input search and
    /// regenerates the shared block plus every channel's register pair; for
    /// any other channel only its own pair is regenerated.
    fn calc_params(&mut self, id: usize) -> Result<(), Error> {
        let out = self.outputs[id];

        if !(OUTPUT_FREQ_MIN..=OUTPUT_FREQ_MAX).contains(&out.frequency) {
            return Err(Error::InvalidOutputFrequency);
        }

        if out.precise {
            let fb = frequency::input_mult_divide(self.input.frequency, out.frequency)?;
            self.input.mult = fb.mult;
            self.input.divide = fb.divide;

            self.update_shared(out.duty, out.phase)?;
            for i in 0..OUTPUTS {
                self.update_output(i);
            }
        } else {
            self.update_output(id);
        }

        Ok(())
    }

    /// Initial parameter computation at configuration load.
    ///
    /// When no channel carries a target frequency the device is left on its
    /// hardware power-on defaults and `None` is returned: no register image
    /// should be written. Otherwise parameters are computed for the precise
    /// channel and the finalized image is returned.
    pub fn initialize(&mut self) -> Result<Option<&RegisterImage>, Error> {
        if self.outputs.iter().all(|o| o.frequency == 0) {
            return Ok(None);
        }

        self.calc_params(self.precise_id())?;
        Ok(Some(&self.regs))
    }

    /// Current rate of channel `id`, Hz.
    ///
    /// A channel without a committed frequency derives it from the current
    /// dividers. The channel's registers (and the shared block) are
    /// regenerated as a side effect; no hardware I/O happens here.
    pub fn recalc_rate(&mut self, id: usize) -> Result<u32, Error> {
        if self.outputs[id].frequency == 0 {
            self.outputs[id].frequency = self.derived_frequency(id);
        }

        let out = self.outputs[id];
        self.update_shared(out.duty, out.phase)?;
        self.update_output(id);

        Ok(self.outputs[id].frequency)
    }

    /// Dry-run rate change: compute the rate actually achievable for
    /// `frequency` on channel `id` without handing anything to hardware.
    /// On failure the engine state is rolled back and the error returned.
    pub fn round_rate(&mut self, id: usize, frequency: u32) -> Result<u32, Error> {
        let saved = Snapshot::take(self, id);

        self.outputs[id].frequency = frequency;

        match self.calc_params(id) {
            Ok(()) => Ok(self.outputs[id].frequency),
            Err(e) => {
                saved.restore(self);
                Err(e)
            }
        }
    }

    /// Commit a rate change: recompute parameters (unless `frequency` is
    /// already the committed rate) and return the finalized register image
    /// for the host to write out. On failure the engine state is rolled
    /// back and the device keeps operating at its previous rate.
    pub fn set_rate(&mut self, id: usize, frequency: u32) -> Result<&RegisterImage, Error> {
        if frequency != self.outputs[id].frequency {
            let saved = Snapshot::take(self, id);

            self.outputs[id].frequency = frequency;

            if let Err(e) = self.calc_params(id) {
                saved.restore(self);
                return Err(e);
            }
        }

        Ok(&self.regs)
    }
}
