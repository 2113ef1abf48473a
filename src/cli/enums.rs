//! CLI enum types for the character set option.

use clap::ValueEnum;

use crate::config;

/// Glyph family for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum CharacterSet {
    #[default]
    Ascii,
    Block,
    Braille,
}

impl From<CharacterSet> for config::CharacterSet {
    fn from(c: CharacterSet) -> Self {
        match c {
            CharacterSet::Ascii => config::CharacterSet::Ascii,
            CharacterSet::Block => config::CharacterSet::Block,
            CharacterSet::Braille => config::CharacterSet::Braille,
        }
    }
}
