//! Table des motifs Braille (U+2800..=U+28FF).
//!
//! Le bloc Unicode Braille est mappé bit à bit sur l'offset 0x2800 :
//! ```text
//! +---+---+
//! | 1 | 4 |     dot 1 → bit 0   dot 4 → bit 3
//! +---+---+     dot 2 → bit 1   dot 5 → bit 4
//! | 2 | 5 |     dot 3 → bit 2   dot 6 → bit 5
//! +---+---+     dot 7 → bit 6   dot 8 → bit 7
//! | 3 | 6 |
//! +---+---+
//! | 7 | 8 |
//! +---+---+
//! ```

use crate::config::BlankGlyph;

/// Braille base codepoint (U+2800).
pub const BRAILLE_BASE: u32 = 0x2800;

/// Glyph for each packed byte value: `BRAILLE[v] == U+2800 + v`.
pub const BRAILLE: [char; 256] = build_table();

/// Motif vide (U+2800).
pub const BLANK: char = BRAILLE[0];

/// Motif à un seul point (U+2801), substitut du motif vide.
pub const SINGLE_DOT: char = BRAILLE[1];

const fn build_table() -> [char; 256] {
    let mut table = ['\u{2800}'; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = match char::from_u32(BRAILLE_BASE + i as u32) {
            Some(c) => c,
            None => ' ',
        };
        i += 1;
    }
    table
}

/// Map an 8-bit dot mask to its Braille character.
///
/// # Example
/// ```
/// use bi_core::glyph::braille_char;
/// assert_eq!(braille_char(0x00), '\u{2800}');
/// assert_eq!(braille_char(0xFF), '⣿');
/// ```
#[must_use]
#[inline(always)]
pub const fn braille_char(mask: u8) -> char {
    BRAILLE[mask as usize]
}

/// Map a dot mask to a character, applying the blank-glyph policy.
///
/// Only the emitted character changes; callers keep the original mask.
///
/// # Example
/// ```
/// use bi_core::glyph::glyph_for;
/// use bi_core::config::BlankGlyph;
/// assert_eq!(glyph_for(0, BlankGlyph::Keep), '\u{2800}');
/// assert_eq!(glyph_for(0, BlankGlyph::SingleDot), '⠁');
/// assert_eq!(glyph_for(0x41, BlankGlyph::SingleDot), '⡁');
/// ```
#[must_use]
#[inline(always)]
pub fn glyph_for(mask: u8, blank: BlankGlyph) -> char {
    match (mask, blank) {
        (0, BlankGlyph::SingleDot) => SINGLE_DOT,
        _ => braille_char(mask),
    }
}
