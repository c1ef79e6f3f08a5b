use crate::dots::DotMatrix;
use crate::frame::GrayField;

/// Transforme un champ de luminance en points Braille.
///
/// Implémenté par : `Threshold`, `Sierra`.
///
/// The field is taken by value: encoders that diffuse error mutate it in
/// place and drop it when done.
///
/// # Example
/// ```
/// use bi_core::traits::Encoder;
/// use bi_core::{DotMatrix, GrayField};
///
/// struct Blank;
/// impl Encoder for Blank {
///     fn encode(&self, field: GrayField) -> DotMatrix {
///         DotMatrix::for_field(&field)
///     }
///     fn name(&self) -> &'static str { "blank" }
/// }
///
/// let field = GrayField::filled(2, 4, 1.0).unwrap();
/// assert_eq!(Blank.encode(field).cells(), &[0]);
/// ```
pub trait Encoder: Send + Sync {
    /// Décide chaque point du champ et retourne la matrice remplie.
    fn encode(&self, field: GrayField) -> DotMatrix;

    /// Nom lisible pour le debug/les logs.
    fn name(&self) -> &'static str;
}
