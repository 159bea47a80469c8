//! Frequency sweeps
//!
//! A [`Sweep`] walks a frequency band in fixed steps under one of
//! three traversal policies; the device reprograms the oscillator once
//! per position and paces itself with a caller supplied delay.

use embedded_hal::blocking::delay::DelayUs;
use embedded_hal::digital::v2::OutputPin;

use crate::device::*;
use crate::errors::*;

#[derive(Debug,Copy,Clone,PartialEq,Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
enum Traversal {
    WrapUp,
    WrapDown,
    Bounce,
}

/// Sweep position state.
///
/// Built with [`up`](Sweep::up), [`down`](Sweep::down) or
/// [`bounce`](Sweep::bounce); each [`step`](Sweep::step) yields the
/// current frequency and advances one increment under the chosen
/// policy. Sweeps have no final position; drive one from a loop with
/// whatever stop condition the application needs.
#[derive(Debug,Copy,Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sweep {
    min_hz: f64,
    max_hz: f64,
    f: f64,
    inc: f64,
    traversal: Traversal,
}

impl Sweep {

    /// Ascending sweep: starts at `min_hz` and steps up, wrapping back
    /// to `min_hz` once a step passes `max_hz`.
    pub fn up(min_hz: f64, max_hz: f64, step_hz: f64) -> Result<Self, Error> {
        Self::new(min_hz, max_hz, step_hz, Traversal::WrapUp)
    }

    /// Descending sweep: starts at `max_hz` and steps down, wrapping
    /// back to `max_hz` once a step passes `min_hz`.
    pub fn down(min_hz: f64, max_hz: f64, step_hz: f64) -> Result<Self, Error> {
        Self::new(min_hz, max_hz, step_hz, Traversal::WrapDown)
    }

    /// Ping-pong sweep: starts at `min_hz`; the step direction inverts
    /// at the band edges.
    ///
    /// The edge check runs after the add, so the position overshoots
    /// the band by up to one step before turning. Callers that need
    /// strict bounds should size the step to divide the band.
    pub fn bounce(min_hz: f64, max_hz: f64, step_hz: f64) -> Result<Self, Error> {
        Self::new(min_hz, max_hz, step_hz, Traversal::Bounce)
    }

    fn new(min_hz: f64, max_hz: f64, step_hz: f64, traversal: Traversal) -> Result<Self, Error> {
        (if !(step_hz > 0.0) || min_hz > max_hz { Err(Error::InvalidSweepRange) } else { Ok(())} )?;

        let (f, inc) = match traversal {
            Traversal::WrapDown => (max_hz, -step_hz),
            _ => (min_hz, step_hz),
        };
        Ok(Sweep { min_hz, max_hz, f, inc, traversal })
    }

    /// Frequency at the current sweep position, Hz.
    pub fn current(self: &Self) -> f64 {
        self.f
    }

    /// Returns the current frequency and advances one position.
    pub fn step(self: &mut Self) -> f64 {
        let f = self.f;
        self.advance();
        f
    }

    fn advance(self: &mut Self) {
        self.f += self.inc;
        match self.traversal {
            Traversal::WrapUp => {
                if self.f > self.max_hz {
                    self.f = self.min_hz;
                }
            }
            Traversal::WrapDown => {
                if self.f < self.min_hz {
                    self.f = self.max_hz;
                }
            }
            Traversal::Bounce => {
                if self.f > self.max_hz || self.f < self.min_hz {
                    self.inc = -self.inc;
                }
            }
        }
    }
}

impl Iterator for Sweep {
    type Item = f64;

    /// Never returns `None`; sweeps have no final position.
    fn next(&mut self) -> Option<f64> {
        Some(self.step())
    }
}


impl<WClk, FqUd, Data, Rst> Ad9850<WClk, FqUd, Data, Rst>
where WClk: OutputPin,
      FqUd: OutputPin,
      Data: OutputPin,
      Rst: OutputPin,
{
    /// Programs the sweep's current frequency (phase 0), advances the
    /// sweep, then waits `dwell_us`.
    ///
    /// One bounded sweep unit, for driver loops that check their own
    /// stop condition between steps.
    pub fn sweep_step<Delay>(
        self: &mut Self,
        delay: &mut Delay,
        sweep: &mut Sweep,
        dwell_us: u32,
    ) -> Result<(), Error>
    where Delay: DelayUs<u32>,
    {
        let f = sweep.step();
        self.program(f, 0.0)?;
        delay.delay_us(dwell_us);
        Ok(())
    }

    /// Runs `sweep` without end, reprogramming the oscillator once per
    /// `dwell_us` period.
    ///
    /// Continuous generation: returns only if a pin write fails. Use
    /// [`sweep_step`](Ad9850::sweep_step) directly when the sweep must
    /// be cancellable.
    pub fn run_sweep<Delay>(
        self: &mut Self,
        delay: &mut Delay,
        sweep: &mut Sweep,
        dwell_us: u32,
    ) -> Result<(), Error>
    where Delay: DelayUs<u32>,
    {
        loop {
            self.sweep_step(delay, sweep, dwell_us)?;
        }
    }
}
