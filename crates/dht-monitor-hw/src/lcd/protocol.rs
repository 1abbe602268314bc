//! HD44780 protocol encoding for the PCF8574 I2C backpack.
//!
//! Wire format, per expander byte:
//! - bit 0: register select (0 = command, 1 = data)
//! - bit 1: read/write (always 0, write)
//! - bit 2: enable strobe
//! - bit 3: backlight
//! - bits 4-7: the high nibble of the value being transferred
//!
//! The controller runs in 4-bit mode, so every byte crosses the bus as two
//! nibbles, each clocked in by a falling edge on the enable bit.

/// Register select bit (data register).
pub const RS: u8 = 0x01;

/// Enable strobe bit.
pub const ENABLE: u8 = 0x04;

/// Backlight bit, kept on for every transfer.
pub const BACKLIGHT: u8 = 0x08;

/// Clear display command.
pub const CMD_CLEAR: u8 = 0x01;

/// Entry mode: cursor moves right, no display shift.
pub const CMD_ENTRY_MODE: u8 = 0x06;

/// Display on, cursor off, blink off.
pub const CMD_DISPLAY_ON: u8 = 0x0C;

/// Function set: 4-bit bus, two lines, 5x8 font.
pub const CMD_FUNCTION_SET: u8 = 0x28;

/// Set DDRAM address command (or'd with the cell address).
pub const CMD_SET_DDRAM: u8 = 0x80;

/// Magic reset bytes that force the controller into 4-bit mode from any
/// state. Sent as plain commands, their nibble halves reproduce the
/// datasheet's 8-bit/4-bit switch sequence.
pub const INIT_SEQUENCE: [u8; 5] = [
    0x33,
    0x32,
    CMD_FUNCTION_SET,
    CMD_DISPLAY_ON,
    CMD_ENTRY_MODE,
];

/// DDRAM address of the first cell of each row.
pub const ROW_OFFSETS: [u8; 2] = [0x00, 0x40];

/// Expands one byte into the four expander frames that clock it into the
/// controller as two enable-pulsed nibbles.
pub fn byte_frames(value: u8, data: bool) -> [u8; 4] {
    let ctrl = BACKLIGHT | if data { RS } else { 0 };
    let hi = (value & 0xF0) | ctrl;
    let lo = ((value << 4) & 0xF0) | ctrl;
    [hi | ENABLE, hi, lo | ENABLE, lo]
}

/// Builds the command that moves the cursor to `(row, col)`.
pub fn set_cursor_command(row: u8, col: u8) -> u8 {
    CMD_SET_DDRAM | (ROW_OFFSETS[(row & 1) as usize] + col)
}

/// Encodes a text payload as a single bus write, one cell per byte.
/// Characters outside the controller's ASCII subset render as '?'.
pub fn text_frames(text: &str, max_cells: usize) -> Vec<u8> {
    let mut frames = Vec::with_capacity(max_cells * 4);
    for c in text.chars().take(max_cells) {
        let cell = if c.is_ascii() && !c.is_ascii_control() {
            c as u8
        } else {
            b'?'
        };
        frames.extend_from_slice(&byte_frames(cell, true));
    }
    frames
}
