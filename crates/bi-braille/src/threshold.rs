use bi_core::dots::DotMatrix;
use bi_core::frame::GrayField;
use bi_core::traits::Encoder;

/// Seuil de luminance : un point est allumé si `L > THRESHOLD` (strict).
pub const THRESHOLD: f32 = 0.5;

/// Binarisation directe, sans diffusion d'erreur.
///
/// Each sample is decided on its own, so the result does not depend on
/// visiting order.
///
/// # Example
/// ```
/// use bi_core::frame::GrayField;
/// use bi_core::traits::Encoder;
/// use bi_braille::threshold::Threshold;
///
/// let dots = Threshold.encode(GrayField::filled(2, 4, 1.0).unwrap());
/// assert_eq!(dots.cells(), &[0xFF]);
/// ```
pub struct Threshold;

impl Encoder for Threshold {
    fn encode(&self, field: GrayField) -> DotMatrix {
        binarize_field(&field)
    }

    fn name(&self) -> &'static str {
        "threshold"
    }
}

/// Allume chaque point dont la luminance dépasse strictement 0.5.
#[must_use]
pub fn binarize_field(field: &GrayField) -> DotMatrix {
    let mut dots = DotMatrix::for_field(field);
    let width = field.width() as usize;
    for (i, &lum) in field.values().iter().enumerate() {
        if lum > THRESHOLD {
            dots.set_dot((i % width) as u32, (i / width) as u32, true);
        }
    }
    dots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exactly_half_stays_unset() {
        let dots = binarize_field(&GrayField::filled(8, 8, 0.5).unwrap());
        assert_eq!(dots.count_dots(), 0);
    }

    #[test]
    fn just_above_half_is_set() {
        let dots = binarize_field(&GrayField::filled(8, 8, 0.50001).unwrap());
        assert_eq!(dots.count_dots(), 64);
        assert!(dots.cells().iter().all(|&c| c == 0xFF));
    }

    #[test]
    fn each_sample_decided_independently() {
        let values = vec![0.9, 0.1, 0.51, 0.49, 0.0, 1.0];
        let dots = binarize_field(&GrayField::from_values(3, 2, values).unwrap());
        let set: Vec<bool> = (0..2)
            .flat_map(|y| (0..3).map(move |x| (x, y)))
            .map(|(x, y)| dots.dot(x, y))
            .collect();
        assert_eq!(set, vec![true, false, true, false, false, true]);
    }
}
