use std::path::Path;

use anyhow::{Context, Result};
use bi_core::frame::PixelGrid;

use crate::resize::Resizer;

/// Décode une image (PNG, JPEG, BMP, GIF) en grille RGBA8.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
///
/// # Example
/// ```no_run
/// use bi_source::image::load_image;
/// use std::path::Path;
/// let grid = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<PixelGrid> {
    let img = ::image::open(path)
        .with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::debug!("{} décodée : {width}×{height}", path.display());
    let grid = PixelGrid::from_raw(width, height, rgba.into_raw())
        .with_context(|| format!("Image vide : {}", path.display()))?;
    Ok(grid)
}

/// Charge une image et la redimensionne à `width` points de large,
/// en conservant le ratio.
///
/// # Errors
/// Returns an error if decoding fails or the target size is degenerate.
pub fn load_scaled(path: &Path, width: u32) -> Result<PixelGrid> {
    load_scaled_with(&mut Resizer::new(), path, width)
}

/// Comme [`load_scaled`], avec un `Resizer` fourni par l'appelant.
///
/// # Errors
/// Returns an error if decoding fails or the target size is degenerate.
pub fn load_scaled_with(resizer: &mut Resizer, path: &Path, width: u32) -> Result<PixelGrid> {
    let grid = load_image(path)?;
    resizer
        .fit_width(&grid, width)
        .with_context(|| format!("Redimensionnement impossible pour {}", path.display()))
}
