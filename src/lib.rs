//! Xylon logiCLK programmable clock generator driver.
//!
//! The logiCLK IP core wraps a Xilinx 7 series MMCM: one reference input,
//! six independently divided/phased outputs. This crate computes the
//! multiplier/divider parameters for requested output rates, encodes them
//! into the core's 21-register manual configuration bank and drives the
//! lock/switch-over sequence through a platform-supplied register bus.

#![cfg_attr(not(test), no_std)]

pub mod bits;
pub mod clockgen;
pub mod config;
pub mod constants;
pub mod device;
pub mod errors;
pub mod frequency;
pub mod register;
pub mod tables;

pub use crate::clockgen::ClockGen;
pub use crate::config::{Bandwidth, InputStage, OutputChannel};
pub use crate::device::{Logiclk, ParamSource, RegisterIo};
pub use crate::errors::Error;
pub use crate::register::RegisterImage;
