//! Device register access and configuration switch-over.
//!
//! The logiCLK core sits in a memory-mapped register block: one
//! status/configuration register followed by the 21-register manual
//! configuration bank, 32-bit words at a 4-byte stride. The actual access
//! is left to a [RegisterIo] implementation supplied by the platform;
//! the lock wait uses an `embedded_hal` delay collaborator.

use embedded_hal::blocking::delay::DelayMs;

use crate::clockgen::ClockGen;
use crate::constants::*;
use crate::errors::Error;

/// 32-bit register block access.
///
/// `offset` is a byte offset from the device base address.
pub trait RegisterIo {
    type Error;

    fn read(&mut self, offset: usize) -> Result<u32, Self::Error>;
    fn write(&mut self, offset: usize, word: u32) -> Result<(), Self::Error>;
}

/// Parameter source selected at switch-over
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ParamSource {
    /// Re-arm the hardware power-on defaults; the manual bank is not written
    Hardware,
    /// Use the software-written manual configuration registers
    Software,
}

/// logiCLK device: the parameter-synthesis engine plus its register block
pub struct Logiclk<IO> {
    io: IO,
    state: ClockGen,
}

impl<IO> Logiclk<IO>
where
    IO: RegisterIo,
{
    pub fn new(io: IO, state: ClockGen) -> Self {
        Logiclk { io, state }
    }

    /// Engine state (input stage, output channels, register image)
    pub fn state(&self) -> &ClockGen {
        &self.state
    }

    /// Release the register block access
    pub fn release(self) -> IO {
        self.io
    }

    /// Current rate of channel `id`, Hz; see [ClockGen::recalc_rate]
    pub fn recalc_rate(&mut self, id: usize) -> Result<u32, Error> {
        self.state.recalc_rate(id)
    }

    /// Dry-run rate change; see [ClockGen::round_rate]
    pub fn round_rate(&mut self, id: usize, frequency: u32) -> Result<u32, Error> {
        self.state.round_rate(id, frequency)
    }

    /// Commit a rate change on channel `id` and reconfigure the hardware.
    /// Returns the rate actually achieved, Hz.
    pub fn set_rate<D>(&mut self, id: usize, frequency: u32, delay: &mut D) -> Result<u32, Error>
    where
        D: DelayMs<u16>,
    {
        self.state.set_rate(id, frequency)?;
        self.apply(ParamSource::Software, delay)?;

        Ok(self.state.output(id).frequency)
    }

    /// Initial configuration at load: a no-op when no channel carries a
    /// target frequency (the device stays on hardware defaults), otherwise
    /// computes parameters for the precise channel and configures the core.
    pub fn initialize<D>(&mut self, delay: &mut D) -> Result<(), Error>
    where
        D: DelayMs<u16>,
    {
        if self.state.initialize()?.is_some() {
            self.apply(ParamSource::Software, delay)?;
        }

        Ok(())
    }

    /// Single lock indicator poll
    pub fn poll_lock(&mut self) -> nb::Result<(), Error> {
        let status = self
            .io
            .read(PLL_REG_OFF * REG_STRIDE)
            .map_err(|_| Error::Bus)?;

        if status & PLL_LOCK != 0 {
            Ok(())
        } else {
            Err(nb::Error::WouldBlock)
        }
    }

    /// Write the manual configuration bank (software source only), wait for
    /// the PLL to lock and switch the core over to the selected parameter
    /// source.
    ///
    /// When the lock poll budget runs out the switch-over word is never
    /// written: the device keeps running on its previous configuration and
    /// [Error::LockTimeout] is returned.
    pub fn apply<D>(&mut self, source: ParamSource, delay: &mut D) -> Result<(), Error>
    where
        D: DelayMs<u16>,
    {
        let mut cfg = PLL_CONFIG;

        if source == ParamSource::Software {
            let words = *self.state.registers().words();

            for (i, w) in words.iter().enumerate() {
                self.io
                    .write((i + MANUAL_REG_OFF) * REG_STRIDE, *w)
                    .map_err(|_| Error::Bus)?;
            }

            cfg |= PLL_CONFIG_SW;
        }

        for _ in 0..LOCK_TIME_INTERVALS {
            match self.poll_lock() {
                Ok(()) => {
                    return self
                        .io
                        .write(PLL_REG_OFF * REG_STRIDE, cfg)
                        .map_err(|_| Error::Bus);
                }
                Err(nb::Error::WouldBlock) => delay.delay_ms(LOCK_TIME_MS),
                Err(nb::Error::Other(e)) => return Err(e),
            }
        }

        Err(Error::LockTimeout)
    }
}
