//! Native key records, as delivered by console input layers that report
//! discrete key-down events instead of a byte stream.

use super::keys::*;

/// One key event from a platform console.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeKeyRecord {
    /// Key went down (true) or up (false)
    pub key_down: bool,
    /// Platform virtual-key identifier
    pub virtual_key: u16,
    /// ASCII translation of the key, 0 when there is none
    pub ascii: u8,
}

impl NativeKeyRecord {
    pub fn down(virtual_key: u16, ascii: u8) -> Self {
        Self {
            key_down: true,
            virtual_key,
            ascii,
        }
    }

    pub fn up(virtual_key: u16, ascii: u8) -> Self {
        Self {
            key_down: false,
            virtual_key,
            ascii,
        }
    }
}

/// Virtual-key identifiers understood by [`native_to_key`].
pub mod vk {
    pub const BACK: u16 = 0x08;
    pub const TAB: u16 = 0x09;
    pub const RETURN: u16 = 0x0D;
    pub const SHIFT: u16 = 0x10;
    pub const CONTROL: u16 = 0x11;
    pub const MENU: u16 = 0x12;
    pub const PAUSE: u16 = 0x13;
    pub const CAPITAL: u16 = 0x14;
    pub const ESCAPE: u16 = 0x1B;
    pub const SPACE: u16 = 0x20;
    pub const PRIOR: u16 = 0x21;
    pub const NEXT: u16 = 0x22;
    pub const END: u16 = 0x23;
    pub const HOME: u16 = 0x24;
    pub const LEFT: u16 = 0x25;
    pub const UP: u16 = 0x26;
    pub const RIGHT: u16 = 0x27;
    pub const DOWN: u16 = 0x28;
    pub const SNAPSHOT: u16 = 0x2C;
    pub const INSERT: u16 = 0x2D;
    pub const DELETE: u16 = 0x2E;
    pub const NUMPAD0: u16 = 0x60;
    pub const NUMPAD9: u16 = 0x69;
    pub const MULTIPLY: u16 = 0x6A;
    pub const ADD: u16 = 0x6B;
    pub const SUBTRACT: u16 = 0x6D;
    pub const DECIMAL: u16 = 0x6E;
    pub const DIVIDE: u16 = 0x6F;
    pub const F1: u16 = 0x70;
    pub const F12: u16 = 0x7B;
    pub const NUMLOCK: u16 = 0x90;
    pub const SCROLL: u16 = 0x91;
    pub const LSHIFT: u16 = 0xA0;
    pub const RSHIFT: u16 = 0xA1;
    pub const LCONTROL: u16 = 0xA2;
    pub const RCONTROL: u16 = 0xA3;
    pub const LMENU: u16 = 0xA4;
    pub const RMENU: u16 = 0xA5;
}

const KEYPAD_DIGITS: [KeyCode; 10] = [
    KEYP_0, KEYP_1, KEYP_2, KEYP_3, KEYP_4, KEYP_5, KEYP_6, KEYP_7, KEYP_8, KEYP_9,
];

/// Map a native record to an abstract key code.
///
/// Keys without a table entry fall back to their lowercased ASCII
/// translation. Returns [`KEY_NONE`] for key-up records and for keys with
/// neither a mapping nor an ASCII value.
pub fn native_to_key(record: &NativeKeyRecord) -> KeyCode {
    if !record.key_down {
        return KEY_NONE;
    }

    match record.virtual_key {
        vk::LEFT => KEY_LEFTARROW,
        vk::UP => KEY_UPARROW,
        vk::RIGHT => KEY_RIGHTARROW,
        vk::DOWN => KEY_DOWNARROW,
        vk::F1..=vk::F12 => FUNCTION_KEYS[(record.virtual_key - vk::F1) as usize],
        vk::HOME => KEY_HOME,
        vk::END => KEY_END,
        vk::PRIOR => KEY_PGUP,
        vk::NEXT => KEY_PGDN,
        vk::INSERT => KEY_INS,
        vk::DELETE => KEY_DEL,
        vk::NUMPAD0..=vk::NUMPAD9 => KEYPAD_DIGITS[(record.virtual_key - vk::NUMPAD0) as usize],
        vk::MULTIPLY => KEYP_MULTIPLY,
        vk::ADD => KEYP_PLUS,
        vk::SUBTRACT => KEYP_MINUS,
        vk::DECIMAL => KEYP_PERIOD,
        vk::DIVIDE => KEYP_DIVIDE,
        vk::SHIFT | vk::LSHIFT | vk::RSHIFT => KEY_RSHIFT,
        vk::CONTROL | vk::LCONTROL | vk::RCONTROL => KEY_RCTRL,
        vk::MENU | vk::LMENU | vk::RMENU => KEY_RALT,
        vk::BACK => KEY_BACKSPACE,
        vk::TAB => KEY_TAB,
        vk::RETURN => KEY_ENTER,
        vk::ESCAPE => KEY_ESCAPE,
        vk::SPACE => KEY_USE,
        vk::PAUSE => KEY_PAUSE,
        vk::CAPITAL => KEY_CAPSLOCK,
        vk::NUMLOCK => KEY_NUMLOCK,
        vk::SCROLL => KEY_SCRLCK,
        vk::SNAPSHOT => KEY_PRTSCR,
        _ => record.ascii.to_ascii_lowercase(),
    }
}
