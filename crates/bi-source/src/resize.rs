use anyhow::{Context, Result};
use bi_core::error::CoreError;
use bi_core::frame::PixelGrid;
use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{PixelType, ResizeOptions, Resizer as FirResizer};

/// Dimensions cibles pour une largeur donnée, ratio conservé.
///
/// Height is `round(src_height / src_width × width)`.
///
/// # Errors
/// Returns `CoreError::InvalidDimensions` when `width` or a source dimension
/// is zero, or when the height rounds to zero.
///
/// # Example
/// ```
/// use bi_source::resize::target_size;
/// assert_eq!(target_size(200, 100, 50).unwrap(), (50, 25));
/// assert!(target_size(200, 100, 0).is_err());
/// ```
pub fn target_size(src_width: u32, src_height: u32, width: u32) -> Result<(u32, u32), CoreError> {
    if width == 0 || src_width == 0 || src_height == 0 {
        return Err(CoreError::InvalidDimensions {
            width,
            height: src_height,
        });
    }
    let height = (f64::from(src_height) / f64::from(src_width) * f64::from(width)).round();
    if height < 1.0 || height > f64::from(u32::MAX) {
        return Err(CoreError::InvalidDimensions {
            width,
            height: height.min(f64::from(u32::MAX)) as u32,
        });
    }
    Ok((width, height as u32))
}

/// Redimensionneur réutilisable.
///
/// `fast_image_resize` keeps its convolution buffers inside the resizer, so
/// one instance per thread serves a whole batch without reallocating.
///
/// # Example
/// ```
/// use bi_source::resize::Resizer;
/// use bi_core::frame::PixelGrid;
/// let mut r = Resizer::new();
/// let a = r.fit_width(&PixelGrid::new(100, 60).unwrap(), 50).unwrap();
/// let b = r.fit_width(&PixelGrid::new(30, 90).unwrap(), 10).unwrap();
/// assert_eq!((a.height(), b.height()), (30, 30));
/// ```
pub struct Resizer {
    inner: FirResizer,
    options: ResizeOptions,
}

impl Resizer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: FirResizer::new(),
            options: ResizeOptions::new(),
        }
    }

    /// Remplit `dst` à partir de `src` ; la taille de `dst` fixe la sortie.
    ///
    /// # Errors
    /// Returns an error if `fast_image_resize` rejects a buffer.
    pub fn resize_into(&mut self, src: &PixelGrid, dst: &mut PixelGrid) -> Result<()> {
        if src.width() == dst.width() && src.height() == dst.height() {
            dst.data_mut().copy_from_slice(src.data());
            return Ok(());
        }

        let view = ImageRef::new(src.width(), src.height(), src.data(), PixelType::U8x4)
            .context("Grille source invalide")?;
        let (dst_w, dst_h) = (dst.width(), dst.height());
        let mut out = Image::from_slice_u8(dst_w, dst_h, dst.data_mut(), PixelType::U8x4)
            .context("Grille cible invalide")?;

        self.inner
            .resize(&view, &mut out, Some(&self.options))
            .context("Échec du redimensionnement")?;

        log::trace!("Resize {}×{} → {dst_w}×{dst_h}", src.width(), src.height());
        Ok(())
    }

    /// Nouvelle grille de `width` de large, ratio conservé.
    ///
    /// # Errors
    /// Returns an error if the target size is degenerate or the resize fails.
    pub fn fit_width(&mut self, src: &PixelGrid, width: u32) -> Result<PixelGrid> {
        let (w, h) = target_size(src.width(), src.height(), width)?;
        let mut dst = PixelGrid::new(w, h)?;
        self.resize_into(src, &mut dst)?;
        Ok(dst)
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Redimensionne à `width` de large en conservant le ratio.
///
/// One-shot form of [`Resizer::fit_width`].
///
/// # Errors
/// Returns an error if the target size is degenerate or the resize fails.
///
/// # Example
/// ```
/// use bi_source::resize::resize_to_width;
/// use bi_core::frame::PixelGrid;
/// let src = PixelGrid::new(100, 60).unwrap();
/// let dst = resize_to_width(&src, 50).unwrap();
/// assert_eq!((dst.width(), dst.height()), (50, 30));
/// ```
pub fn resize_to_width(src: &PixelGrid, width: u32) -> Result<PixelGrid> {
    Resizer::new().fit_width(src, width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn height_rounds_like_source_ratio() {
        assert_eq!(target_size(3, 2, 2).unwrap(), (2, 1));
        assert_eq!(target_size(4, 3, 2).unwrap(), (2, 2));
        assert_eq!(target_size(100, 100, 7).unwrap(), (7, 7));
        assert_eq!(target_size(10, 35, 4).unwrap(), (4, 14));
    }

    #[test]
    fn degenerate_sizes_are_rejected() {
        assert!(target_size(0, 10, 5).is_err());
        assert!(target_size(1000, 1, 10).is_err());
        assert!(target_size(10, 10, 0).is_err());
    }

    #[test]
    fn same_size_is_a_copy() {
        let mut src = PixelGrid::new(4, 4).unwrap();
        src.set_pixel(1, 2, (9, 8, 7, 6));
        let dst = resize_to_width(&src, 4).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn solid_color_survives_downscale() {
        let src = PixelGrid::filled(64, 32, (255, 255, 255, 255)).unwrap();
        let dst = resize_to_width(&src, 16).unwrap();
        assert_eq!((dst.width(), dst.height()), (16, 8));
        assert!(dst.pixels().all(|(r, g, b, a)| r >= 250 && g >= 250 && b >= 250 && a >= 250));
    }

    #[test]
    fn one_resizer_serves_mixed_sizes() {
        let mut resizer = Resizer::new();
        let white = PixelGrid::filled(64, 32, (255, 255, 255, 255)).unwrap();
        let black = PixelGrid::filled(10, 40, (0, 0, 0, 255)).unwrap();

        let first = resizer.fit_width(&white, 16).unwrap();
        let dark = resizer.fit_width(&black, 5).unwrap();
        let again = resizer.fit_width(&white, 16).unwrap();

        assert_eq!((dark.width(), dark.height()), (5, 20));
        assert!(dark.pixels().all(|(r, g, b, a)| r <= 5 && g <= 5 && b <= 5 && a >= 250));
        assert_eq!(first, again);
    }
}
