//! Bus Bit Helpers.
//!
//! Every bus in the design is 8 bits wide and uses LSB-0 numbering. This module
//! is the only place that computes bit positions; the core and the driver go
//! through these helpers so the numbering cannot drift between them.

/// Width of every bus in bits.
pub const BUS_WIDTH: u8 = 8;

/// Bit of `ui_in` that selects the operating mode.
pub const MODE_SELECT_BIT: u8 = 0;

/// Bit of `uo_out` that carries the loopback toggle (the LSB).
pub const TOGGLE_BIT: u8 = 0;

/// Bit of `uo_out` whose inverse becomes the next toggle (the MSB).
pub const FEEDBACK_BIT: u8 = 7;

/// Bit of `uio_in` the driver uses as a control flag. It is never relayed.
pub const CONTROL_BIT: u8 = 7;

/// Mask of the seven payload bits `uio_in[6:0]` relayed in loopback mode.
pub const PAYLOAD_MASK: u8 = 0x7F;

/// Position of the relayed payload on `uo_out`, which occupies `uo_out[7:1]`.
pub const OUT_PAYLOAD_SHIFT: u8 = 1;

/// Direction mask for a bus driven entirely by the core.
pub const ALL_OUTPUT: u8 = 0xFF;

/// Direction mask for a bus driven entirely by the external driver.
pub const ALL_INPUT: u8 = 0x00;

/// Returns bit `index` of `value`.
///
/// # Panics
///
/// Debug builds panic if `index` is outside the bus width.
#[inline]
pub const fn bit(value: u8, index: u8) -> bool {
    debug_assert!(index < BUS_WIDTH);
    (value >> index) & 1 == 1
}

/// Returns `value` with bit `index` forced to `set`.
#[inline]
pub const fn with_bit(value: u8, index: u8, set: bool) -> u8 {
    debug_assert!(index < BUS_WIDTH);
    let mask = 1 << index;
    if set { value | mask } else { value & !mask }
}

/// Returns the seven payload bits `uio_in[6:0]` of `value`.
#[inline]
pub const fn payload(value: u8) -> u8 {
    value & PAYLOAD_MASK
}

/// Returns `value` with its payload bits `[6:0]` replaced by the low bits of `payload`.
#[inline]
pub const fn with_payload(value: u8, payload: u8) -> u8 {
    (value & !PAYLOAD_MASK) | (payload & PAYLOAD_MASK)
}

/// Returns the relayed payload held in `uo_out[7:1]`.
#[inline]
pub const fn out_payload(uo_out: u8) -> u8 {
    (uo_out >> OUT_PAYLOAD_SHIFT) & PAYLOAD_MASK
}

/// Places a 7-bit payload into `uo_out[7:1]`, leaving the toggle bit clear.
#[inline]
pub const fn to_out_payload(payload: u8) -> u8 {
    (payload & PAYLOAD_MASK) << OUT_PAYLOAD_SHIFT
}
