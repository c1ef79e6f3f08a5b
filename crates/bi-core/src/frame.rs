use crate::error::CoreError;

/// Nombre de canaux par pixel (RGBA).
const CHANNELS: usize = 4;

/// Vérifie des dimensions non nulles et retourne le nombre de pixels.
fn pixel_count(width: u32, height: u32) -> Result<usize, CoreError> {
    if width == 0 || height == 0 {
        return Err(CoreError::InvalidDimensions { width, height });
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(CoreError::InvalidDimensions { width, height })
}

/// Grille de pixels source, RGBA row-major, 4 bytes par pixel.
///
/// Dimensions are validated once at construction: width and height are
/// non-zero and the buffer holds exactly `width × height × 4` bytes.
///
/// # Example
/// ```
/// use bi_core::frame::PixelGrid;
/// let grid = PixelGrid::new(10, 10).unwrap();
/// assert_eq!(grid.data().len(), 400);
/// assert!(PixelGrid::new(0, 10).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    data: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelGrid {
    /// Crée une grille transparente (tous les canaux à 0).
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Result<Self, CoreError> {
        let count = pixel_count(width, height)?;
        Ok(Self {
            data: vec![0u8; count * CHANNELS],
            width,
            height,
        })
    }

    /// Crée une grille remplie d'une seule couleur.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if either dimension is zero.
    ///
    /// # Example
    /// ```
    /// use bi_core::frame::PixelGrid;
    /// let grid = PixelGrid::filled(2, 4, (255, 255, 255, 255)).unwrap();
    /// assert_eq!(grid.pixel(1, 3), (255, 255, 255, 255));
    /// ```
    pub fn filled(width: u32, height: u32, rgba: (u8, u8, u8, u8)) -> Result<Self, CoreError> {
        let count = pixel_count(width, height)?;
        let (r, g, b, a) = rgba;
        Ok(Self {
            data: [r, g, b, a].repeat(count),
            width,
            height,
        })
    }

    /// Wrap an existing RGBA8 buffer.
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` for a zero dimension and
    /// `CoreError::BufferSize` if `data.len() != width × height × 4`.
    ///
    /// # Example
    /// ```
    /// use bi_core::frame::PixelGrid;
    /// assert!(PixelGrid::from_raw(1, 1, vec![0, 0, 0, 255]).is_ok());
    /// assert!(PixelGrid::from_raw(2, 1, vec![0, 0, 0, 255]).is_err());
    /// ```
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let expected = pixel_count(width, height)? * CHANNELS;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA bytes.
    #[inline]
    #[must_use]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable RGBA bytes. Length is fixed by the dimensions.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Accès au pixel (x, y) → (r, g, b, a).
    ///
    /// # Example
    /// ```
    /// use bi_core::frame::PixelGrid;
    /// let grid = PixelGrid::new(10, 10).unwrap();
    /// assert_eq!(grid.pixel(0, 0), (0, 0, 0, 0));
    /// ```
    #[inline(always)]
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> (u8, u8, u8, u8) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        match self.data.get(idx..idx + CHANNELS) {
            Some(&[r, g, b, a]) => (r, g, b, a),
            _ => (0, 0, 0, 0),
        }
    }

    /// Écrit le pixel (x, y). Out-of-bounds writes are ignored.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: (u8, u8, u8, u8)) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        let (r, g, b, a) = rgba;
        self.data[idx..idx + CHANNELS].copy_from_slice(&[r, g, b, a]);
    }

    /// Iterate pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u8, u8, u8, u8)> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .map(|p| (p[0], p[1], p[2], p[3]))
    }
}

/// Champ de luminance normalisée [0.0, 1.0], row-major.
///
/// Working buffer for one conversion. The Sierra encoder consumes it by
/// value and mutates it in place.
///
/// # Example
/// ```
/// use bi_core::frame::GrayField;
/// let field = GrayField::filled(3, 2, 0.25).unwrap();
/// assert_eq!(field.values().len(), 6);
/// assert_eq!(field.get(2, 1), 0.25);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct GrayField {
    values: Vec<f32>,
    width: u32,
    height: u32,
}

impl GrayField {
    /// Crée un champ uniforme. `value` est ramené dans [0.0, 1.0].
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` if either dimension is zero,
    /// `CoreError::InvalidLuminance` if `value` is not finite.
    pub fn filled(width: u32, height: u32, value: f32) -> Result<Self, CoreError> {
        let count = pixel_count(width, height)?;
        if !value.is_finite() {
            return Err(CoreError::InvalidLuminance { index: 0 });
        }
        Ok(Self {
            values: vec![value.clamp(0.0, 1.0); count],
            width,
            height,
        })
    }

    /// Wrap precomputed luminance values, clamped into [0.0, 1.0].
    ///
    /// # Errors
    /// Returns `CoreError::InvalidDimensions` for a zero dimension,
    /// `CoreError::BufferSize` on a length mismatch and
    /// `CoreError::InvalidLuminance` for a NaN or infinite value.
    ///
    /// # Example
    /// ```
    /// use bi_core::frame::GrayField;
    /// let field = GrayField::from_values(2, 1, vec![-0.5, 2.0]).unwrap();
    /// assert_eq!(field.values(), &[0.0, 1.0]);
    /// assert!(GrayField::from_values(1, 1, vec![f32::NAN]).is_err());
    /// ```
    pub fn from_values(width: u32, height: u32, mut values: Vec<f32>) -> Result<Self, CoreError> {
        let expected = pixel_count(width, height)?;
        if values.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite()) {
            return Err(CoreError::InvalidLuminance { index });
        }
        for v in &mut values {
            *v = v.clamp(0.0, 1.0);
        }
        Ok(Self {
            values,
            width,
            height,
        })
    }

    /// Échantillonne une grille validée pixel par pixel.
    ///
    /// Results are clamped into [0.0, 1.0]; a non-finite result reads as 0.
    ///
    /// # Example
    /// ```
    /// use bi_core::frame::{GrayField, PixelGrid};
    /// let grid = PixelGrid::filled(2, 2, (255, 0, 0, 255)).unwrap();
    /// let field = GrayField::sample(&grid, |r, _, _, _| f32::from(r) / 255.0);
    /// assert_eq!(field.values(), &[1.0; 4]);
    /// ```
    pub fn sample(grid: &PixelGrid, f: impl Fn(u8, u8, u8, u8) -> f32) -> Self {
        let values = grid
            .pixels()
            .map(|(r, g, b, a)| {
                let v = f(r, g, b, a);
                if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 }
            })
            .collect();
        Self {
            values,
            width: grid.width(),
            height: grid.height(),
        }
    }

    /// Width in samples.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in samples.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luminance at (x, y).
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> f32 {
        debug_assert!(x < self.width && y < self.height, "sample out of bounds");
        self.values[y as usize * self.width as usize + x as usize]
    }

    /// All samples, row-major.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Mutable samples, row-major. Callers keep values in [0.0, 1.0].
    #[inline]
    pub fn values_mut(&mut self) -> &mut [f32] {
        &mut self.values
    }
}
