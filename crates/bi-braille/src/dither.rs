//! Diffusion d'erreur Sierra (Sierra-3) sur la luminance normalisée.
//!
//! Strictly sequential: each sample reads error pushed by samples visited
//! before it, so the raster order below is part of the result.

use bi_core::dots::DotMatrix;
use bi_core::frame::GrayField;
use bi_core::traits::Encoder;

use crate::threshold::THRESHOLD;

/// An error diffusion kernel.
///
/// Each entry `(dx, dy, weight)` sends `error × weight / divisor` to a
/// neighbor that has not been visited yet.
#[derive(Debug, Clone, Copy)]
pub struct Kernel {
    /// (dx, dy, weight) entries.
    pub entries: &'static [(i32, i32, u8)],
    /// Total divisor for normalizing weights.
    pub divisor: u8,
}

/// Sierra (full/Sierra-3) dithering kernel.
///
/// Distributes error to 10 neighbors over 3 rows with 100% propagation (32/32).
///
/// ```text
///            X   5   3
///    2   4   5   4   2
///        2   3   2
/// ```
pub const SIERRA: Kernel = Kernel {
    entries: &[
        (1, 0, 5),
        (2, 0, 3),
        (-2, 1, 2),
        (-1, 1, 4),
        (0, 1, 5),
        (1, 1, 4),
        (2, 1, 2),
        (-1, 2, 2),
        (0, 2, 3),
        (1, 2, 2),
    ],
    divisor: 32,
};

/// Tramage Sierra vers une matrice Braille.
///
/// # Example
/// ```
/// use bi_core::frame::GrayField;
/// use bi_core::traits::Encoder;
/// use bi_braille::dither::Sierra;
///
/// // 0.45 seul reste éteint, mais l'erreur reportée allume le voisin.
/// let field = GrayField::from_values(2, 1, vec![0.45, 0.45]).unwrap();
/// let dots = Sierra.encode(field);
/// assert!(!dots.dot(0, 0));
/// assert!(dots.dot(1, 0));
/// ```
pub struct Sierra;

impl Encoder for Sierra {
    fn encode(&self, field: GrayField) -> DotMatrix {
        dither_field(field)
    }

    fn name(&self) -> &'static str {
        "sierra"
    }
}

/// Consomme le champ, diffuse l'erreur et retourne les points.
#[must_use]
pub fn dither_field(mut field: GrayField) -> DotMatrix {
    let mut dots = DotMatrix::for_field(&field);
    diffuse(&mut field, &mut dots, &SIERRA);
    dots
}

/// Scanline pass: y outer, x inner.
fn diffuse(field: &mut GrayField, dots: &mut DotMatrix, kernel: &Kernel) {
    let width = i64::from(field.width());
    let height = i64::from(field.height());
    let values = field.values_mut();

    for y in 0..height {
        for x in 0..width {
            let lum = values[(y * width + x) as usize];
            let error = if lum > THRESHOLD {
                dots.set_dot(x as u32, y as u32, true);
                lum - 1.0
            } else {
                lum
            };
            if error != 0.0 {
                spread(values, (width, height), (x, y), error, kernel);
            }
        }
    }
}

/// Pousse `error` de `(x, y)` vers les voisins du noyau.
///
/// Targets outside the field are dropped. Each target is clamped to
/// [0, 1] right after its update.
fn spread(
    values: &mut [f32],
    (width, height): (i64, i64),
    (x, y): (i64, i64),
    error: f32,
    kernel: &Kernel,
) {
    let unit = error / f32::from(kernel.divisor);
    for &(dx, dy, weight) in kernel.entries {
        let nx = x + i64::from(dx);
        let ny = y + i64::from(dy);
        if nx < 0 || nx >= width || ny >= height {
            continue;
        }
        let slot = &mut values[(ny * width + nx) as usize];
        *slot = (*slot + unit * f32::from(weight)).clamp(0.0, 1.0);
    }
}
