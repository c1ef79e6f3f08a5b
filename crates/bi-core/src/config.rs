use std::fmt;
use std::path::Path;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Largeur maximale acceptée, en points.
pub const MAX_WIDTH: u32 = 4096;

/// Configuration de conversion.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use bi_core::config::{BlankGlyph, ConvertConfig, EncodeMode};
/// let config = ConvertConfig::default();
/// assert_eq!(config.width, 100);
/// assert_eq!(config.mode, EncodeMode::Dither);
/// assert_eq!(config.blank_glyph, BlankGlyph::Keep);
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Largeur cible en points (pixels source après redimensionnement).
    pub width: u32,
    /// Binarisation directe ou diffusion d'erreur.
    pub mode: EncodeMode,
    /// Politique d'affichage des cellules vides.
    pub blank_glyph: BlankGlyph,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            width: 100,
            mode: EncodeMode::Dither,
            blank_glyph: BlankGlyph::Keep,
        }
    }
}

impl ConvertConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization and after CLI overrides.
    ///
    /// Each adjusted field is logged at warn level. Returns `true` if
    /// anything changed.
    ///
    /// # Example
    /// ```
    /// use bi_core::config::{ConvertConfig, MAX_WIDTH};
    /// let mut config = ConvertConfig { width: 100_000, ..ConvertConfig::default() };
    /// assert!(config.clamp_all());
    /// assert_eq!(config.width, MAX_WIDTH);
    /// assert!(!config.clamp_all());
    /// ```
    pub fn clamp_all(&mut self) -> bool {
        let width = self.width.clamp(1, MAX_WIDTH);
        if width == self.width {
            return false;
        }
        log::warn!(
            "Largeur {} hors limites, ramenée à {width} (1..={MAX_WIDTH})",
            self.width
        );
        self.width = width;
        true
    }
}

/// How luminance is turned into dots.
///
/// # Example
/// ```
/// use bi_core::config::EncodeMode;
/// let mode: EncodeMode = "threshold".parse().unwrap();
/// assert_eq!(mode, EncodeMode::Threshold);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum EncodeMode {
    /// Seuil fixe à 0.5, chaque pixel décidé indépendamment.
    #[serde(alias = "threshold")]
    Threshold,
    /// Diffusion d'erreur Sierra (défaut).
    #[default]
    #[serde(alias = "dither")]
    Dither,
}

impl FromStr for EncodeMode {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "threshold" => Ok(Self::Threshold),
            "dither" | "sierra" => Ok(Self::Dither),
            other => Err(CoreError::Config(format!(
                "mode inconnu '{other}' (attendu : dither, threshold)"
            ))),
        }
    }
}

impl fmt::Display for EncodeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Threshold => "threshold",
            Self::Dither => "dither",
        })
    }
}

/// Politique pour le motif vide U+2800.
///
/// Many monospace fonts draw the blank Braille glyph with a different
/// advance width, which breaks column alignment. `SingleDot` swaps it for
/// U+2801 at render time; the dot matrix keeps its zero bytes.
///
/// # Example
/// ```
/// use bi_core::config::BlankGlyph;
/// assert_eq!(BlankGlyph::default(), BlankGlyph::Keep);
/// let b: BlankGlyph = "single-dot".parse().unwrap();
/// assert_eq!(b, BlankGlyph::SingleDot);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
pub enum BlankGlyph {
    /// Émettre U+2800 tel quel.
    #[default]
    #[serde(alias = "keep")]
    Keep,
    /// Remplacer U+2800 par U+2801.
    #[serde(alias = "single-dot", alias = "single_dot")]
    SingleDot,
}

impl FromStr for BlankGlyph {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "keep" => Ok(Self::Keep),
            "single-dot" | "single_dot" | "singledot" => Ok(Self::SingleDot),
            other => Err(CoreError::Config(format!(
                "politique de blanc inconnue '{other}' (attendu : keep, single-dot)"
            ))),
        }
    }
}

impl fmt::Display for BlankGlyph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keep => "keep",
            Self::SingleDot => "single-dot",
        })
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    convert: Option<ConvertSection>,
}

/// Convert section of the TOML config, all fields optional for partial override.
#[derive(Deserialize)]
struct ConvertSection {
    width: Option<u32>,
    mode: Option<EncodeMode>,
    blank_glyph: Option<BlankGlyph>,
}

/// Parse un document TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the document is not valid TOML for this schema.
///
/// # Example
/// ```
/// use bi_core::config::{parse_config, EncodeMode};
/// let config = parse_config("[convert]\nwidth = 60\nmode = \"threshold\"\n").unwrap();
/// assert_eq!(config.width, 60);
/// assert_eq!(config.mode, EncodeMode::Threshold);
/// ```
pub fn parse_config(content: &str) -> Result<ConvertConfig> {
    let file: ConfigFile = toml::from_str(content).context("Erreur de parsing TOML")?;

    let mut config = ConvertConfig::default();
    if let Some(c) = file.convert {
        if let Some(v) = c.width {
            config.width = v;
        }
        if let Some(v) = c.mode {
            config.mode = v;
        }
        if let Some(v) = c.blank_glyph {
            config.blank_glyph = v;
        }
    }

    config.clamp_all();
    Ok(config)
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
/// ```no_run
/// use bi_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ConvertConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Impossible de lire {}", path.display()))?;
    let config = parse_config(&content)
        .with_context(|| format!("Configuration invalide dans {}", path.display()))?;
    log::debug!("Config chargée depuis {} : {config:?}", path.display());
    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(parse_config("").unwrap(), ConvertConfig::default());
    }

    #[test]
    fn partial_section_overrides_only_given_fields() {
        let config = parse_config("[convert]\nblank_glyph = \"SingleDot\"\n").unwrap();
        assert_eq!(config.blank_glyph, BlankGlyph::SingleDot);
        assert_eq!(config.width, 100);
        assert_eq!(config.mode, EncodeMode::Dither);
    }

    #[test]
    fn clamp_reports_only_real_changes() {
        let mut config = ConvertConfig::default();
        assert!(!config.clamp_all());
        config.width = 0;
        assert!(config.clamp_all());
        assert_eq!(config.width, 1);
        config.width = MAX_WIDTH;
        assert!(!config.clamp_all());
        config.width = MAX_WIDTH + 1;
        assert!(config.clamp_all());
        assert_eq!(config.width, MAX_WIDTH);
    }

    #[test]
    fn width_is_clamped() {
        assert_eq!(parse_config("[convert]\nwidth = 0\n").unwrap().width, 1);
        assert_eq!(
            parse_config("[convert]\nwidth = 100000\n").unwrap().width,
            MAX_WIDTH
        );
    }

    #[test]
    fn unknown_mode_is_an_error() {
        assert!(parse_config("[convert]\nmode = \"atkinson\"\n").is_err());
        assert!("atkinson".parse::<EncodeMode>().is_err());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[convert]\nwidth = 42\nmode = \"Threshold\"").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.width, 42);
        assert_eq!(config.mode, EncodeMode::Threshold);
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(&dir.path().join("absent.toml")).is_err());
    }

    #[test]
    fn display_roundtrips_through_from_str() {
        for mode in [EncodeMode::Threshold, EncodeMode::Dither] {
            assert_eq!(mode.to_string().parse::<EncodeMode>().unwrap(), mode);
        }
        for blank in [BlankGlyph::Keep, BlankGlyph::SingleDot] {
            assert_eq!(blank.to_string().parse::<BlankGlyph>().unwrap(), blank);
        }
    }
}
