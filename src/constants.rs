//! Constants

/// Minimum allowed reference clock frequency.
/// The DDS core needs a CLKIN above 1 MHz for the output
/// stages to meet the datasheet specs.
pub const REF_CLK_FREQ_MIN: u32 = 1_000_000;

/// Maximum allowed reference clock frequency (CLKIN, pin 9).
pub const REF_CLK_FREQ_MAX: u32 = 125_000_000;

/// Reference crystal found on most AD9850 breakout boards.
pub const REF_CLK_FREQ_DEFAULT: u32 = 125_000_000;

/// Number of phase accumulator states, 2^32.
/// Output frequency is `tuning_word * CLKIN / 2^32`.
pub const TUNING_WORD_SCALE: f64 = 4_294_967_296.0;

/// Width of a serial programming word:
/// 32 tuning bits, 2 control bits, 1 power-down bit, 5 phase bits.
pub const PROGRAM_WORD_BITS: u32 = 40;

/// Phase quantization step, 360 degrees over 32 phase states.
pub const PHASE_STEP_DEG: f64 = 11.25;

/// Serial power-down command, shifted out least significant bit first.
pub const POWER_DOWN_WORD: u8 = 0b0000_0100;

/// Width of the power-down command.
pub const POWER_DOWN_WORD_BITS: u32 = 8;
