#![cfg_attr(not(test), no_std)]

//! [AD9850](https://www.analog.com/en/products/ad9850.html) DDS synthesizer driver.
//!
//! Programs the chip's serial load mode over four digital output lines
//! through [`embedded_hal::digital::v2::OutputPin`], and runs
//! continuous frequency sweeps paced by a blocking delay. Serial mode
//! needs the parallel bus strapped per the datasheet: D0 and D1 tied
//! to VCC, D2 to GND.
//!
//! | Signal | AD9850 pin | Purpose                 |
//! |--------|------------|-------------------------|
//! | W_CLK  |      7     | word load clock         |
//! | FQ_UD  |      8     | frequency update strobe |
//! | DATA   |     25     | serial data (D7)        |
//! | RESET  |     22     | master reset            |
//!
//! ```ignore
//! use ad9850_dds::{device::*, frequency::*, sweep::*};
//!
//! let clk = RefClock::new(125_000_000)?;
//! let mut dds = Ad9850::new(clk, pin_w_clk, pin_fq_ud, pin_data, pin_reset);
//!
//! dds.init()?;
//! dds.reset()?;
//!
//! // 1234 Hz on the sine and square outputs, zero phase offset
//! dds.program(1234.0, 0.0)?;
//!
//! // or ramp 1 kHz..=2 kHz in 500 Hz steps, 50 ms per step
//! let mut sweep = Sweep::up(1000.0, 2000.0, 500.0)?;
//! dds.run_sweep(&mut delay, &mut sweep, 50_000)?;
//! ```
//!
//! Line pulses are back-to-back pin writes with no inserted delay. The
//! shortest pulse the datasheet allows is 7 ns (FQ_UD high time), so
//! hosts clocked up to roughly 100 MHz need no extra pacing; faster
//! ones must stretch the pin writes themselves.

pub mod constants;
pub mod word;
pub mod errors;
pub mod frequency;
pub mod device;
pub mod sweep;
