//! Abstract key codes delivered to the host.
//!
//! Printable keys use their lowercase ASCII value. Special keys live in the
//! 0x80..=0xFF range, following the host engine's key numbering.
//! Code 0 means "no key" and is never reported.

/// Key code type. Zero is reserved.
pub type KeyCode = u8;

pub const KEY_NONE: KeyCode = 0;

pub const KEY_TAB: KeyCode = 9;
pub const KEY_ENTER: KeyCode = 13;
pub const KEY_ESCAPE: KeyCode = 27;
pub const KEY_MINUS: KeyCode = 0x2d;
pub const KEY_EQUALS: KeyCode = 0x3d;
pub const KEY_BACKSPACE: KeyCode = 0x7f;

pub const KEY_RCTRL: KeyCode = 0x80 + 0x1d;

pub const KEY_STRAFE_L: KeyCode = 0xa0;
pub const KEY_STRAFE_R: KeyCode = 0xa1;
pub const KEY_USE: KeyCode = 0xa2;
pub const KEY_FIRE: KeyCode = 0xa3;

pub const KEY_LEFTARROW: KeyCode = 0xac;
pub const KEY_UPARROW: KeyCode = 0xad;
pub const KEY_RIGHTARROW: KeyCode = 0xae;
pub const KEY_DOWNARROW: KeyCode = 0xaf;

pub const KEY_RSHIFT: KeyCode = 0x80 + 0x36;
pub const KEY_RALT: KeyCode = 0x80 + 0x38;
pub const KEY_LALT: KeyCode = KEY_RALT;

pub const KEY_CAPSLOCK: KeyCode = 0x80 + 0x3a;
pub const KEY_F1: KeyCode = 0x80 + 0x3b;
pub const KEY_F2: KeyCode = 0x80 + 0x3c;
pub const KEY_F3: KeyCode = 0x80 + 0x3d;
pub const KEY_F4: KeyCode = 0x80 + 0x3e;
pub const KEY_F5: KeyCode = 0x80 + 0x3f;
pub const KEY_F6: KeyCode = 0x80 + 0x40;
pub const KEY_F7: KeyCode = 0x80 + 0x41;
pub const KEY_F8: KeyCode = 0x80 + 0x42;
pub const KEY_F9: KeyCode = 0x80 + 0x43;
pub const KEY_F10: KeyCode = 0x80 + 0x44;
pub const KEY_NUMLOCK: KeyCode = 0x80 + 0x45;
pub const KEY_SCRLCK: KeyCode = 0x80 + 0x46;
pub const KEY_HOME: KeyCode = 0x80 + 0x47;
pub const KEY_PGUP: KeyCode = 0x80 + 0x49;
pub const KEY_END: KeyCode = 0x80 + 0x4f;
pub const KEY_PGDN: KeyCode = 0x80 + 0x51;
pub const KEY_INS: KeyCode = 0x80 + 0x52;
pub const KEY_DEL: KeyCode = 0x80 + 0x53;
pub const KEY_F11: KeyCode = 0x80 + 0x57;
pub const KEY_F12: KeyCode = 0x80 + 0x58;
pub const KEY_PRTSCR: KeyCode = 0x80 + 0x59;
pub const KEY_PAUSE: KeyCode = 0xff;

// Numeric keypad. Digits double as the navigation cluster.
pub const KEYP_0: KeyCode = KEY_INS;
pub const KEYP_1: KeyCode = KEY_END;
pub const KEYP_2: KeyCode = KEY_DOWNARROW;
pub const KEYP_3: KeyCode = KEY_PGDN;
pub const KEYP_4: KeyCode = KEY_LEFTARROW;
pub const KEYP_5: KeyCode = b'5';
pub const KEYP_6: KeyCode = KEY_RIGHTARROW;
pub const KEYP_7: KeyCode = KEY_HOME;
pub const KEYP_8: KeyCode = KEY_UPARROW;
pub const KEYP_9: KeyCode = KEY_PGUP;
pub const KEYP_DIVIDE: KeyCode = b'/';
pub const KEYP_PLUS: KeyCode = b'+';
pub const KEYP_MINUS: KeyCode = b'-';
pub const KEYP_MULTIPLY: KeyCode = b'*';
pub const KEYP_PERIOD: KeyCode = 0;
pub const KEYP_ENTER: KeyCode = KEY_ENTER;

/// Function key codes in order, F1 first.
pub const FUNCTION_KEYS: [KeyCode; 12] = [
    KEY_F1, KEY_F2, KEY_F3, KEY_F4, KEY_F5, KEY_F6, KEY_F7, KEY_F8, KEY_F9, KEY_F10, KEY_F11,
    KEY_F12,
];

/// Short human-readable name for logging.
pub fn key_name(key: KeyCode) -> String {
    let named = match key {
        KEY_NONE => "none",
        KEY_TAB => "tab",
        KEY_ENTER => "enter",
        KEY_ESCAPE => "escape",
        KEY_BACKSPACE => "backspace",
        KEY_USE => "use",
        KEY_FIRE => "fire",
        KEY_LEFTARROW => "left",
        KEY_UPARROW => "up",
        KEY_RIGHTARROW => "right",
        KEY_DOWNARROW => "down",
        KEY_RSHIFT => "shift",
        KEY_RCTRL => "ctrl",
        KEY_RALT => "alt",
        KEY_HOME => "home",
        KEY_END => "end",
        KEY_PGUP => "pageup",
        KEY_PGDN => "pagedown",
        KEY_INS => "insert",
        KEY_DEL => "delete",
        KEY_PAUSE => "pause",
        _ => {
            if let Some(i) = FUNCTION_KEYS.iter().position(|&k| k == key) {
                return format!("f{}", i + 1);
            }
            if key.is_ascii_graphic() || key == b' ' {
                return format!("'{}'", key as char);
            }
            return format!("0x{:02x}", key);
        }
    };
    named.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_keys_distinct() {
        for (i, a) in FUNCTION_KEYS.iter().enumerate() {
            for b in &FUNCTION_KEYS[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_special_keys_outside_lowercase_ascii() {
        for key in [KEY_UPARROW, KEY_DOWNARROW, KEY_USE, KEY_F1, KEY_F12, KEY_DEL] {
            assert!(key >= 0x80, "0x{:02x}", key);
        }
    }

    #[test]
    fn test_key_name() {
        assert_eq!(key_name(KEY_F7), "f7");
        assert_eq!(key_name(KEY_UPARROW), "up");
        assert_eq!(key_name(b'w'), "'w'");
        assert_eq!(key_name(0x01), "0x01");
    }
}
