use bi_core::frame::{GrayField, PixelGrid};

/// Coefficients de luminance BT.709.
const LUMA_R: f64 = 0.2126;
const LUMA_G: f64 = 0.7152;
const LUMA_B: f64 = 0.0722;

/// Luminance perceptuelle BT.709 pondérée par l'alpha, dans [0.0, 1.0].
///
/// Transparency counts as darkness: a fully transparent pixel has
/// luminance 0 whatever its color.
///
/// # Example
/// ```
/// use bi_braille::luminance::luminance;
/// assert_eq!(luminance(255, 255, 255, 255), 1.0);
/// assert_eq!(luminance(255, 255, 255, 0), 0.0);
/// assert!((luminance(0, 255, 0, 255) - 0.7152).abs() < 1e-6);
/// ```
#[must_use]
#[inline(always)]
pub fn luminance(r: u8, g: u8, b: u8, a: u8) -> f32 {
    // Calcul en f64 : le blanc opaque retombe exactement sur 1.0 après conversion.
    let luma = (LUMA_R * f64::from(r) + LUMA_G * f64::from(g) + LUMA_B * f64::from(b)) / 255.0;
    ((luma * (f64::from(a) / 255.0)) as f32).clamp(0.0, 1.0)
}

/// Échantillonne chaque pixel de la grille en luminance normalisée.
///
/// # Example
/// ```
/// use bi_core::frame::PixelGrid;
/// use bi_braille::luminance::grayscale;
///
/// let grid = PixelGrid::filled(4, 2, (255, 255, 255, 255)).unwrap();
/// let field = grayscale(&grid);
/// assert_eq!((field.width(), field.height()), (4, 2));
/// assert!(field.values().iter().all(|&v| v == 1.0));
/// ```
#[must_use]
pub fn grayscale(grid: &PixelGrid) -> GrayField {
    GrayField::sample(grid, luminance)
}
