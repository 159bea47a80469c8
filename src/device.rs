//! Device pins and the serial load protocol

use embedded_hal::digital::v2::OutputPin;

use crate::constants::*;
use crate::errors::*;
use crate::frequency::*;
use crate::word::*;

/// AD9850 device, serial load mode.
///
/// Owns the four control lines; exactly one instance should drive a
/// given chip. Call [`init`](Ad9850::init) and then
/// [`reset`](Ad9850::reset) once before the first programming
/// operation (the datasheet requires a RESET pulse after power-up
/// before the device accepts updates).
pub struct Ad9850<WClk, FqUd, Data, Rst> {
    clk: RefClock,
    pin_w_clk: WClk,
    pin_fq_ud: FqUd,
    pin_data: Data,
    pin_reset: Rst,
}


impl<WClk, FqUd, Data, Rst> Ad9850<WClk, FqUd, Data, Rst>
where WClk: OutputPin,
      FqUd: OutputPin,
      Data: OutputPin,
      Rst: OutputPin,
{
    /// Creates the device (no communication happens yet).
    ///
    /// `clk` - reference clock configuration
    /// `pin_w_clk` - word load clock (W_CLK)
    /// `pin_fq_ud` - frequency update strobe (FQ_UD)
    /// `pin_data` - serial data (D7, labeled DATA on breakout boards)
    /// `pin_reset` - reset (RESET)
    ///
    pub fn new(
        clk: RefClock,
        pin_w_clk: WClk,
        pin_fq_ud: FqUd,
        pin_data: Data,
        pin_reset: Rst,
    ) -> Self {
        Ad9850 { clk, pin_w_clk, pin_fq_ud, pin_data, pin_reset, }
    }

    /// Reference clock this device was configured with.
    pub fn ref_clock(self: &Self) -> &RefClock {
        &self.clk
    }

    /// Drives all four control lines low, without pulsing anything.
    ///
    /// Establishes a known line state; run once before
    /// [`reset`](Ad9850::reset).
    pub fn init(self: &mut Self) -> Result<(), Error> {
        self.pin_w_clk.set_low().map_err(|_| Error::Pin)?;
        self.pin_fq_ud.set_low().map_err(|_| Error::Pin)?;
        self.pin_data.set_low().map_err(|_| Error::Pin)?;
        self.pin_reset.set_low().map_err(|_| Error::Pin)
    }

    /// Power-up initialization sequence.
    ///
    /// One pulse cycle each on W_CLK, RESET and FQ_UD, in that order,
    /// then programs zero frequency and phase so the device sits at a
    /// defined all-zero output. Required once after power-up; calling
    /// it again re-zeros the oscillator.
    pub fn reset(self: &mut Self) -> Result<(), Error> {
        self.pulse_w_clk()?;
        self.pulse_reset()?;
        self.pulse_fq_ud()?;

        self.program(0.0, 0.0)
    }

    /// Sets the oscillator to `frequency_hz` and `phase_deg`.
    ///
    /// The frequency resolves to a 32-bit tuning word and the phase to
    /// a 5-bit word in 11.25 degree steps; see
    /// [`RefClock::tuning_word`] and [`phase_word`] for how
    /// out-of-range inputs alias. Every call shifts a complete 40-bit
    /// word and commits it with a single FQ_UD pulse.
    pub fn program(self: &mut Self, frequency_hz: f64, phase_deg: f64) -> Result<(), Error> {
        let w = ProgramWord::new(
            self.clk.tuning_word(frequency_hz),
            phase_word(phase_deg),
        );
        self.write_word(w)
    }

    /// Shifts a raw programming word out and commits it.
    ///
    /// Data is clocked into the chip's 40-bit shift register one bit
    /// per W_CLK pulse, tuning word first, most significant bit first.
    /// The trailing FQ_UD pulse transfers the shift register to the
    /// active output register.
    pub fn write_word(self: &mut Self, w: ProgramWord) -> Result<(), Error> {
        let bits = w.to_word();
        for n in (0..PROGRAM_WORD_BITS).rev() {
            self.transmit_bit((bits >> n) & 1 == 1)?;
        }
        self.pulse_fq_ud()
    }

    /// Disables the output stages via the short power-down command.
    ///
    /// Same effect as programming a zero frequency, in a fifth of the
    /// clock cycles. The leading FQ_UD pulse flushes any partially
    /// shifted word, the trailing one commits the command. The command
    /// byte is shifted out least significant bit first and never uses
    /// the 40-bit framing.
    pub fn power_down(self: &mut Self) -> Result<(), Error> {
        self.pulse_fq_ud()?;

        for n in 0..POWER_DOWN_WORD_BITS {
            self.transmit_bit((POWER_DOWN_WORD >> n) & 1 == 1)?;
        }

        self.pulse_fq_ud()
    }

    /// Sets DATA, then clocks it in with one W_CLK pulse.
    #[inline(always)]
    fn transmit_bit(self: &mut Self, bit: bool) -> Result<(), Error> {
        self.pin_data.set_state(bit.into()).map_err(|_| Error::Pin)?;
        self.pulse_w_clk()
    }

    #[inline(always)]
    fn pulse_w_clk(self: &mut Self) -> Result<(), Error> {
        self.pin_w_clk.set_high().map_err(|_| Error::Pin)?;
        self.pin_w_clk.set_low().map_err(|_| Error::Pin)
    }

    #[inline(always)]
    fn pulse_fq_ud(self: &mut Self) -> Result<(), Error> {
        self.pin_fq_ud.set_high().map_err(|_| Error::Pin)?;
        self.pin_fq_ud.set_low().map_err(|_| Error::Pin)
    }

    #[inline(always)]
    fn pulse_reset(self: &mut Self) -> Result<(), Error> {
        self.pin_reset.set_high().map_err(|_| Error::Pin)?;
        self.pin_reset.set_low().map_err(|_| Error::Pin)
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::vec::Vec;

    #[derive(Debug,Copy,Clone,PartialEq,Eq)]
    enum Line {
        WClk,
        FqUd,
        Data,
        Rst,
    }

    type Trace = Rc<RefCell<Vec<(Line, bool)>>>;

    struct FakePin {
        line: Line,
        trace: Trace,
    }

    impl OutputPin for FakePin {
        type Error = Infallible;

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.trace.borrow_mut().push((self.line, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.trace.borrow_mut().push((self.line, true));
            Ok(())
        }
    }

    fn device() -> (Ad9850<FakePin, FakePin, FakePin, FakePin>, Trace) {
        let trace: Trace = Rc::new(RefCell::new(Vec::new()));
        let pin = |line| FakePin { line, trace: Rc::clone(&trace) };
        let clk = RefClock::new(REF_CLK_FREQ_DEFAULT).unwrap();
        let dev = Ad9850::new(clk, pin(Line::WClk), pin(Line::FqUd), pin(Line::Data), pin(Line::Rst));
        (dev, trace)
    }

    // DATA level sampled at each W_CLK rising edge
    fn clocked_bits(trace: &[(Line, bool)]) -> Vec<bool> {
        let mut data = false;
        let mut bits = Vec::new();
        for &(line, level) in trace {
            match line {
                Line::Data => data = level,
                Line::WClk if level => bits.push(data),
                _ => {}
            }
        }
        bits
    }

    fn strobe_pulses(trace: &[(Line, bool)]) -> usize {
        trace.iter().filter(|&&(line, level)| line == Line::FqUd && level).count()
    }

    #[test]
    fn init_only_drives_lines_low() {
        let (mut dev, trace) = device();
        dev.init().unwrap();
        let trace = trace.borrow();
        assert_eq!(trace.len(), 4);
        assert!(trace.iter().all(|&(_, level)| !level));
    }

    #[test]
    fn program_emits_40_bits_then_one_strobe() {
        let (mut dev, trace) = device();
        dev.program(1234.0, 0.0).unwrap();
        let trace = trace.borrow();

        let bits = clocked_bits(&trace);
        assert_eq!(bits.len(), 40);
        assert_eq!(strobe_pulses(&trace), 1);
        // the commit strobe comes last
        assert_eq!(&trace[trace.len() - 2..], &[(Line::FqUd, true), (Line::FqUd, false)]);

        // tuning word = round(1234 * 2^32 / 125 MHz) = 42400, MSB first
        let tuning: u32 = 42400;
        for n in 0..32 {
            assert_eq!(bits[n], (tuning >> (31 - n)) & 1 == 1, "tuning bit {}", n);
        }
        // control, power-down and phase bits all zero
        assert!(bits[32..].iter().all(|&b| !b));
    }

    #[test]
    fn program_framing_is_fixed_for_any_input() {
        for &(f, p) in &[(0.0, 0.0), (-1.0, -45.0), (125e6, 360.0), (4e9, 1e4)] {
            let (mut dev, trace) = device();
            dev.program(f, p).unwrap();
            let trace = trace.borrow();
            assert_eq!(clocked_bits(&trace).len(), 40, "f = {}, p = {}", f, p);
            assert_eq!(strobe_pulses(&trace), 1, "f = {}, p = {}", f, p);
        }
    }

    #[test]
    fn phase_lands_in_the_low_five_bits() {
        let (mut dev, trace) = device();
        // 90 degrees = 8 steps = 0b01000
        dev.program(0.0, 90.0).unwrap();
        let bits = clocked_bits(&trace.borrow());
        assert!(bits[..35].iter().all(|&b| !b));
        assert_eq!(&bits[35..], [false, true, false, false, false]);
    }

    #[test]
    fn write_word_shifts_msb_first() {
        let (mut dev, trace) = device();
        dev.write_word(ProgramWord::new(0x8000_0001, 0b10101)).unwrap();
        let bits = clocked_bits(&trace.borrow());
        assert_eq!(bits.len(), 40);
        assert!(bits[0]); // tuning MSB leads
        assert!(bits[1..31].iter().all(|&b| !b));
        assert!(bits[31]); // tuning LSB
        assert!(!bits[32] && !bits[33] && !bits[34]); // control + power-down low
        assert_eq!(&bits[35..], [true, false, true, false, true]);
    }

    #[test]
    fn power_down_is_the_short_framing() {
        let (mut dev, trace) = device();
        dev.power_down().unwrap();
        let trace = trace.borrow();

        // 0b0000_0100 shifted out LSB first
        let bits = clocked_bits(&trace);
        assert_eq!(bits, [false, false, true, false, false, false, false, false]);

        assert_eq!(strobe_pulses(&trace), 2);
        // leading strobe flushes before the first data bit
        assert_eq!(&trace[..2], &[(Line::FqUd, true), (Line::FqUd, false)]);
        assert_eq!(&trace[trace.len() - 2..], &[(Line::FqUd, true), (Line::FqUd, false)]);
    }

    #[test]
    fn reset_pulses_three_lines_then_programs_zero() {
        let (mut dev, trace) = device();
        dev.reset().unwrap();
        let trace = trace.borrow();

        assert_eq!(&trace[..6], &[
            (Line::WClk, true), (Line::WClk, false),
            (Line::Rst, true), (Line::Rst, false),
            (Line::FqUd, true), (Line::FqUd, false),
        ]);

        let programmed = &trace[6..];
        let bits = clocked_bits(programmed);
        assert_eq!(bits.len(), 40);
        assert!(bits.iter().all(|&b| !b));
        assert_eq!(strobe_pulses(programmed), 1);
    }
}
