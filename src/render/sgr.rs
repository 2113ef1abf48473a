//! ANSI/VT100 control sequences emitted by the encoder.

/// Home cursor then erase display; written once before the first frame.
pub const CLEAR_SCREEN: &[u8] = b"\x1b[1;1H\x1b[2J";

/// Move cursor to the top-left corner.
pub const CURSOR_HOME: &[u8] = b"\x1b[;H";

/// Erase display.
pub const ERASE_DISPLAY: &[u8] = b"\x1b[2J";

/// Bold text.
pub const BOLD: &[u8] = b"\x1b[1m";

/// Reset all attributes.
pub const RESET: &[u8] = b"\x1b[0m";

/// Length of the longest true-color foreground escape, `ESC[38;2;RRR;GGG;BBBm`.
pub const TRUE_COLOR_LEN: usize = 19;

/// Append a byte as three decimal digits, keeping leading zeros.
#[inline]
pub fn push_byte_text(buf: &mut Vec<u8>, byte: u8) {
    buf.push(b'0' + byte / 100);
    buf.push(b'0' + byte / 10 % 10);
    buf.push(b'0' + byte % 10);
}

/// Append a true-color foreground escape. Always exactly 19 bytes.
#[inline]
pub fn push_true_color(buf: &mut Vec<u8>, r: u8, g: u8, b: u8) {
    buf.extend_from_slice(b"\x1b[38;2;");
    push_byte_text(buf, r);
    buf.push(b';');
    push_byte_text(buf, g);
    buf.push(b';');
    push_byte_text(buf, b);
    buf.push(b'm');
}

/// Build an OSC 2 window-title sequence, `ESC]2;<title>ESC\`.
///
/// Control characters are dropped from the title so it cannot terminate
/// the sequence early or inject other escapes.
pub fn window_title(title: &str) -> Vec<u8> {
    let mut seq = Vec::with_capacity(title.len() + 6);
    seq.extend_from_slice(b"\x1b]2;");
    for ch in title.chars().filter(|c| !c.is_control()) {
        let mut utf8 = [0u8; 4];
        seq.extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes());
    }
    seq.extend_from_slice(b"\x1b\\");
    seq
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_text_pads_with_zeros() {
        let mut buf = Vec::new();
        push_byte_text(&mut buf, 7);
        push_byte_text(&mut buf, 42);
        push_byte_text(&mut buf, 255);
        assert_eq!(buf, b"007042255");
    }

    #[test]
    fn test_true_color_is_fixed_width() {
        let mut buf = Vec::new();
        push_true_color(&mut buf, 0, 0, 0);
        assert_eq!(buf, b"\x1b[38;2;000;000;000m");
        assert_eq!(buf.len(), TRUE_COLOR_LEN);

        buf.clear();
        push_true_color(&mut buf, 255, 128, 9);
        assert_eq!(buf, b"\x1b[38;2;255;128;009m");
        assert_eq!(buf.len(), TRUE_COLOR_LEN);
    }

    #[test]
    fn test_fixed_sequence_lengths() {
        assert_eq!(CURSOR_HOME.len(), 4);
        assert_eq!(ERASE_DISPLAY.len(), 4);
        assert_eq!(BOLD.len(), 4);
        assert_eq!(RESET.len(), 4);
    }

    #[test]
    fn test_window_title() {
        assert_eq!(window_title("DOOM"), b"\x1b]2;DOOM\x1b\\");
    }

    #[test]
    fn test_window_title_strips_control_chars() {
        assert_eq!(window_title("a\x1b]b\x07c\n"), b"\x1b]2;a]bc\x1b\\");
    }
}
