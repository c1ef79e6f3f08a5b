//! Moteur de conversion pixels → points Braille pour braillify.
//!
//! Samples luminance, decides dots by threshold or Sierra error diffusion,
//! and packs them into a [`DotMatrix`].

pub mod dither;
pub mod luminance;
pub mod threshold;

use bi_core::config::EncodeMode;
use bi_core::dots::DotMatrix;
use bi_core::frame::PixelGrid;
use bi_core::traits::Encoder;
use rayon::prelude::*;

pub use dither::{Sierra, dither_field};
pub use luminance::{grayscale, luminance};
pub use threshold::{Threshold, binarize_field};

/// Encodeur associé à un mode.
#[must_use]
pub fn encoder_for(mode: EncodeMode) -> &'static dyn Encoder {
    match mode {
        EncodeMode::Threshold => &Threshold,
        EncodeMode::Dither => &Sierra,
    }
}

/// Binarisation directe (seuil 0.5).
///
/// # Example
/// ```
/// use bi_core::frame::PixelGrid;
/// use bi_braille::binarize;
///
/// let white = PixelGrid::filled(2, 4, (255, 255, 255, 255)).unwrap();
/// assert_eq!(binarize(&white).render(), "⣿");
/// ```
#[must_use]
pub fn binarize(pixels: &PixelGrid) -> DotMatrix {
    binarize_field(&grayscale(pixels))
}

/// Tramage Sierra puis encodage Braille.
///
/// # Example
/// ```
/// use bi_core::frame::PixelGrid;
/// use bi_braille::dither_and_encode;
///
/// let black = PixelGrid::filled(2, 4, (0, 0, 0, 255)).unwrap();
/// assert_eq!(dither_and_encode(&black).cells(), &[0]);
/// ```
#[must_use]
pub fn dither_and_encode(pixels: &PixelGrid) -> DotMatrix {
    dither_field(grayscale(pixels))
}

/// Encode une grille selon le mode demandé.
#[must_use]
pub fn encode(pixels: &PixelGrid, mode: EncodeMode) -> DotMatrix {
    let encoder = encoder_for(mode);
    log::debug!(
        "Encodage {}×{} via {}",
        pixels.width(),
        pixels.height(),
        encoder.name()
    );
    encoder.encode(grayscale(pixels))
}

/// Encode plusieurs images en parallèle, une tâche par image.
///
/// Each image owns its own field and matrix; the per-image pass stays
/// sequential. Output order matches input order.
///
/// # Example
/// ```
/// use bi_core::config::EncodeMode;
/// use bi_core::frame::PixelGrid;
/// use bi_braille::encode_batch;
///
/// let grids = vec![
///     PixelGrid::filled(2, 4, (255, 255, 255, 255)).unwrap(),
///     PixelGrid::filled(4, 4, (0, 0, 0, 255)).unwrap(),
/// ];
/// let out = encode_batch(&grids, EncodeMode::Threshold);
/// assert_eq!(out[0].cells(), &[0xFF]);
/// assert_eq!(out[1].cells(), &[0, 0]);
/// ```
#[must_use]
pub fn encode_batch(grids: &[PixelGrid], mode: EncodeMode) -> Vec<DotMatrix> {
    grids.par_iter().map(|g| encode(g, mode)).collect()
}

#[cfg(test)]
mod tests {
    use bi_core::config::BlankGlyph;

    use super::*;

    #[test]
    fn white_block_renders_full_cell() {
        let white = PixelGrid::filled(2, 4, (255, 255, 255, 255)).unwrap();
        let dots = binarize(&white);
        assert_eq!(dots.cells(), &[0b1111_1111]);
        assert_eq!(dots.render(), "\u{28FF}");
        assert_eq!(dither_and_encode(&white), dots);
    }

    #[test]
    fn black_block_renders_blank_or_single_dot() {
        let black = PixelGrid::filled(2, 4, (0, 0, 0, 255)).unwrap();
        let dots = binarize(&black);
        assert_eq!(dots.cells(), &[0]);
        assert_eq!(dots.render(), "\u{2800}");
        assert_eq!(dots.render_with(BlankGlyph::SingleDot), "\u{2801}");
        assert_eq!(dots.cells(), &[0]);
    }

    #[test]
    fn transparent_white_is_dark() {
        let clear = PixelGrid::filled(2, 4, (255, 255, 255, 0)).unwrap();
        assert_eq!(binarize(&clear).count_dots(), 0);
    }

    #[test]
    fn output_shape_for_odd_sizes() {
        let grid = PixelGrid::filled(5, 9, (200, 200, 200, 255)).unwrap();
        for mode in [EncodeMode::Threshold, EncodeMode::Dither] {
            let text = encode(&grid, mode).render();
            let lines: Vec<&str> = text.lines().collect();
            assert_eq!(lines.len(), 3);
            assert!(lines.iter().all(|l| l.chars().count() == 3));
        }
    }

    #[test]
    fn encode_dispatches_on_mode() {
        let gray = PixelGrid::filled(16, 16, (100, 100, 100, 255)).unwrap();
        assert_eq!(encode(&gray, EncodeMode::Threshold), binarize(&gray));
        assert_eq!(encode(&gray, EncodeMode::Dither), dither_and_encode(&gray));
        assert_eq!(encoder_for(EncodeMode::Dither).name(), "sierra");
    }

    #[test]
    fn batch_matches_sequential() {
        let grids: Vec<PixelGrid> = (0..8u8)
            .map(|i| PixelGrid::filled(10 + u32::from(i), 7, (i * 30, i * 20, i * 10, 255)).unwrap())
            .collect();
        let batch = encode_batch(&grids, EncodeMode::Dither);
        let seq: Vec<DotMatrix> = grids.iter().map(dither_and_encode).collect();
        assert_eq!(batch, seq);
    }
}
