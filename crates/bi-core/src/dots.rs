use std::fmt;

use crate::config::BlankGlyph;
use crate::error::CoreError;
use crate::frame::GrayField;
use crate::glyph;

/// Largeur d'une cellule Braille, en points.
pub const CELL_WIDTH: u32 = 2;
/// Hauteur d'une cellule Braille, en points.
pub const CELL_HEIGHT: u32 = 4;

/// Bit masks indexed by `[x % 2][y % 4]`.
///
/// Left column carries dots 1, 2, 3, 7; right column dots 4, 5, 6, 8.
const DOT_BITS: [[u8; 4]; 2] = [
    [0b0000_0001, 0b0000_0010, 0b0000_0100, 0b0100_0000],
    [0b0000_1000, 0b0001_0000, 0b0010_0000, 0b1000_0000],
];

/// Masque du point (x, y) dans sa cellule.
///
/// # Example
/// ```
/// use bi_core::dots::bit_mask;
/// assert_eq!(bit_mask(0, 3), 0b0100_0000);
/// assert_eq!(bit_mask(3, 5), 0b0001_0000);
/// ```
#[must_use]
#[inline(always)]
pub const fn bit_mask(x: u32, y: u32) -> u8 {
    DOT_BITS[(x % CELL_WIDTH) as usize][(y % CELL_HEIGHT) as usize]
}

/// Matrice de points Braille, 8 points par byte.
///
/// Logical size is in dots; storage is `ceil(width / 2) × ceil(height / 4)`
/// bytes, row-major. The byte at `(bx, by)` holds the dots for
/// `x ∈ [2bx, 2bx + 1]`, `y ∈ [4by, 4by + 3]`. Dots beyond the logical
/// size are never set.
///
/// # Example
/// ```
/// use bi_core::DotMatrix;
/// let mut dots = DotMatrix::new(3, 5).unwrap();
/// assert_eq!((dots.byte_width(), dots.byte_height()), (2, 2));
/// dots.set_dot(0, 0, true);
/// assert_eq!(dots.render(), "⠁⠀\n⠀⠀");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DotMatrix {
    cells: Vec<u8>,
    width: u32,
    height: u32,
    byte_width: u32,
    byte_height: u32,
}

impl DotMatrix {
    /// Crée une matrice vide de `width × height` points.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        Ok(Self::sized(width, height))
    }

    /// Empty matrix matching a luminance field.
    #[must_use]
    pub fn for_field(field: &GrayField) -> Self {
        Self::sized(field.width(), field.height())
    }

    // Dimensions already validated by the caller.
    fn sized(width: u32, height: u32) -> Self {
        let byte_width = width.div_ceil(CELL_WIDTH);
        let byte_height = height.div_ceil(CELL_HEIGHT);
        Self {
            cells: vec![0u8; byte_width as usize * byte_height as usize],
            width,
            height,
            byte_width,
            byte_height,
        }
    }

    /// Width in dots.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in dots.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width in cells (characters per line).
    #[inline]
    #[must_use]
    pub fn byte_width(&self) -> u32 {
        self.byte_width
    }

    /// Height in cells (lines).
    #[inline]
    #[must_use]
    pub fn byte_height(&self) -> u32 {
        self.byte_height
    }

    #[inline(always)]
    fn cell_index(&self, x: u32, y: u32) -> usize {
        (y / CELL_HEIGHT) as usize * self.byte_width as usize + (x / CELL_WIDTH) as usize
    }

    /// Allume ou éteint le point (x, y).
    ///
    /// Setting ORs the mask into the cell, clearing ANDs its complement.
    /// Out-of-bounds coordinates are ignored.
    #[inline(always)]
    pub fn set_dot(&mut self, x: u32, y: u32, on: bool) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = self.cell_index(x, y);
        let mask = bit_mask(x, y);
        if on {
            self.cells[idx] |= mask;
        } else {
            self.cells[idx] &= !mask;
        }
    }

    /// État du point (x, y). Out-of-bounds dots read as unset.
    #[inline]
    #[must_use]
    pub fn dot(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[self.cell_index(x, y)] & bit_mask(x, y) != 0
    }

    /// Packed byte of cell (bx, by).
    #[inline]
    #[must_use]
    pub fn cell(&self, bx: u32, by: u32) -> u8 {
        debug_assert!(bx < self.byte_width && by < self.byte_height);
        self.cells[by as usize * self.byte_width as usize + bx as usize]
    }

    /// All packed bytes, row-major.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Packed bytes, one slice per text line.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> + '_ {
        self.cells.chunks_exact(self.byte_width as usize)
    }

    /// Nombre de points allumés.
    #[must_use]
    pub fn count_dots(&self) -> usize {
        self.cells.iter().map(|c| c.count_ones() as usize).sum()
    }

    /// Render with blank cells kept as U+2800.
    ///
    /// # Example
    /// ```
    /// use bi_core::DotMatrix;
    /// let dots = DotMatrix::new(2, 8).unwrap();
    /// assert_eq!(dots.render(), "\u{2800}\n\u{2800}");
    /// ```
    #[must_use]
    pub fn render(&self) -> String {
        self.render_with(BlankGlyph::Keep)
    }

    /// Render lines joined by `\n`, no trailing separator.
    ///
    /// `blank` only affects emitted characters, never the stored bytes.
    ///
    /// # Example
    /// ```
    /// use bi_core::{BlankGlyph, DotMatrix};
    /// let dots = DotMatrix::new(4, 4).unwrap();
    /// assert_eq!(dots.render_with(BlankGlyph::SingleDot), "⠁⠁");
    /// assert_eq!(dots.cells(), &[0, 0]);
    /// ```
    #[must_use]
    pub fn render_with(&self, blank: BlankGlyph) -> String {
        // 3 bytes UTF-8 par glyphe + séparateur
        let mut out =
            String::with_capacity(self.cells.len() * 3 + self.byte_height as usize);
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|&mask| glyph::glyph_for(mask, blank)));
        }
        out
    }
}

impl fmt::Display for DotMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
