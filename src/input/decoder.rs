//! Escape-sequence automaton: raw terminal bytes to abstract key codes.
//!
//! Recognized input:
//!
//! ```text
//! \n              ENTER
//! ' '             USE
//! ESC [ A|B|C|D   UP / DOWN / RIGHT / LEFT
//! ESC [ H|F       HOME / END
//! ESC [ 1 5|7|8|9 ~   F5..F8
//! ESC [ 2 0|1|3|4 ~   F9..F12
//! ESC [ 2 ~       INSERT
//! ESC [ 3 ~       DELETE
//! ESC [ 5|6 ~     PAGE UP / PAGE DOWN
//! ESC O P|Q|R|S   F1..F4
//! ESC <other>     ESCAPE, then <other> decoded on its own
//! anything else   lowercased byte value
//! ```
//!
//! A CSI or SS3 sequence that does not match never produces a key. If the
//! byte that broke it is a parameter or intermediate byte (0x20..=0x3F, as
//! in the modifier forms `ESC [ 1 ; 2 A` or `ESC [ 15 ; 2 ~`), the rest of
//! the sequence is swallowed up to and including its final byte
//! (0x40..=0x7E). An ESC mid-sequence abandons it and starts a new one.

use super::keys::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Ground,
    /// Saw ESC
    Escape,
    /// Saw ESC [
    Csi,
    /// Saw ESC [ 1
    CsiOne,
    /// Saw ESC [ 2
    CsiTwo,
    /// Sequence complete except for the final `~`
    Tilde(KeyCode),
    /// Saw ESC O
    Ss3,
    /// Inside an unrecognized sequence, waiting for its final byte
    Discard,
}

/// Incremental decoder for one poll cycle's worth of terminal bytes.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    state: State,
}

impl KeyDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when no partial sequence is pending.
    pub fn is_idle(&self) -> bool {
        self.state == State::Ground
    }

    /// Decode a complete burst of bytes, appending keys to `out`.
    ///
    /// Input that ends mid-sequence is resolved with [`finish`](Self::finish).
    pub fn decode(bytes: &[u8], out: &mut Vec<KeyCode>) {
        let mut decoder = KeyDecoder::new();
        for &byte in bytes {
            decoder.feed(byte, out);
        }
        decoder.finish(out);
    }

    /// Feed one byte, appending any completed keys to `out`.
    pub fn feed(&mut self, byte: u8, out: &mut Vec<KeyCode>) {
        let state = self.state;
        self.state = match state {
            State::Ground => match byte {
                0x1b => State::Escape,
                b'\n' => emit(out, KEY_ENTER),
                b' ' => emit(out, KEY_USE),
                0 => State::Ground,
                other => emit(out, other.to_ascii_lowercase()),
            },
            State::Escape => match byte {
                b'[' => State::Csi,
                b'O' => State::Ss3,
                _ => {
                    // Lone ESC: report it, then decode this byte from scratch.
                    out.push(KEY_ESCAPE);
                    self.state = State::Ground;
                    self.feed(byte, out);
                    return;
                }
            },
            State::Csi => match byte {
                b'A' => emit(out, KEY_UPARROW),
                b'B' => emit(out, KEY_DOWNARROW),
                b'C' => emit(out, KEY_RIGHTARROW),
                b'D' => emit(out, KEY_LEFTARROW),
                b'H' => emit(out, KEY_HOME),
                b'F' => emit(out, KEY_END),
                b'1' => State::CsiOne,
                b'2' => State::CsiTwo,
                b'3' => State::Tilde(KEY_DEL),
                b'5' => State::Tilde(KEY_PGUP),
                b'6' => State::Tilde(KEY_PGDN),
                _ => drop_sequence("CSI", byte),
            },
            State::CsiOne => match byte {
                b'5' => State::Tilde(KEY_F5),
                b'7' => State::Tilde(KEY_F6),
                b'8' => State::Tilde(KEY_F7),
                b'9' => State::Tilde(KEY_F8),
                _ => drop_sequence("CSI 1", byte),
            },
            State::CsiTwo => match byte {
                b'0' => State::Tilde(KEY_F9),
                b'1' => State::Tilde(KEY_F10),
                b'3' => State::Tilde(KEY_F11),
                b'4' => State::Tilde(KEY_F12),
                b'~' => emit(out, KEY_INS),
                _ => drop_sequence("CSI 2", byte),
            },
            State::Tilde(key) => match byte {
                b'~' => emit(out, key),
                _ => drop_sequence("CSI ~", byte),
            },
            State::Ss3 => match byte {
                b'P' => emit(out, KEY_F1),
                b'Q' => emit(out, KEY_F2),
                b'R' => emit(out, KEY_F3),
                b'S' => emit(out, KEY_F4),
                _ => drop_sequence("SS3", byte),
            },
            State::Discard => match byte {
                0x20..=0x3f => State::Discard,
                0x1b => State::Escape,
                _ => State::Ground,
            },
        };
    }

    /// End of input: a lone trailing ESC is the escape key, any other
    /// partial sequence is dropped.
    pub fn finish(&mut self, out: &mut Vec<KeyCode>) {
        match self.state {
            State::Ground => {}
            State::Escape => out.push(KEY_ESCAPE),
            partial => log::trace!("dropping truncated escape sequence in state {:?}", partial),
        }
        self.state = State::Ground;
    }
}

#[inline]
fn emit(out: &mut Vec<KeyCode>, key: KeyCode) -> State {
    out.push(key);
    State::Ground
}

/// Abandon the current sequence at `byte`. Parameter and intermediate
/// bytes mean the sequence is still running, so its tail is discarded.
fn drop_sequence(prefix: &str, byte: u8) -> State {
    log::trace!("dropping malformed {} sequence at byte 0x{:02x}", prefix, byte);
    match byte {
        0x20..=0x3f => State::Discard,
        0x1b => State::Escape,
        _ => State::Ground,
    }
}
