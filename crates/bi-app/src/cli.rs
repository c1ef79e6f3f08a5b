use std::path::PathBuf;

use anyhow::Result;
use bi_core::config::{BlankGlyph, ConvertConfig, EncodeMode, load_config};
use clap::Parser;

/// braillify — convertit une image en texte Braille Unicode.
#[derive(Parser, Debug)]
#[command(name = "braillify", version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    pub image: Option<PathBuf>,

    /// Largeur cible en points (2 points par caractère).
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub width: Option<u32>,

    /// Mode d'encodage : dither, threshold.
    #[arg(long)]
    pub mode: Option<EncodeMode>,

    /// Politique pour les cellules vides : keep, single-dot.
    #[arg(long)]
    pub blank: Option<BlankGlyph>,

    /// Fichier texte de sortie. Défaut : sortie standard.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Fichier de configuration TOML.
    #[arg(short, long, default_value = "config/braillify.toml")]
    pub config: PathBuf,

    /// Convertir toutes les images d'un dossier (récursif).
    #[arg(long)]
    pub batch_folder: Option<PathBuf>,

    /// Dossier de sortie du mode lot. Défaut : à côté de chaque image.
    #[arg(long)]
    pub batch_out: Option<PathBuf>,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Validate that exactly one source is provided.
    ///
    /// # Errors
    /// Returns an error if zero or both sources are specified, or if
    /// batch-only and single-only options are mixed.
    pub fn validate_source(&self) -> Result<()> {
        match (&self.image, &self.batch_folder) {
            (None, None) => {
                anyhow::bail!("Aucune source spécifiée. Donnez une IMAGE ou --batch-folder.")
            }
            (Some(_), Some(_)) => {
                anyhow::bail!("Une seule source à la fois : IMAGE OU --batch-folder.")
            }
            (Some(_), None) if self.batch_out.is_some() => {
                anyhow::bail!("--batch-out requiert --batch-folder.")
            }
            (None, Some(_)) if self.output.is_some() => {
                anyhow::bail!("--output ne s'applique pas au mode lot, utilisez --batch-out.")
            }
            _ => Ok(()),
        }
    }

    /// Charge la config (fichier ou défauts) puis applique les overrides CLI.
    ///
    /// # Errors
    /// Returns an error if the config file exists but cannot be read or parsed.
    pub fn resolve_config(&self) -> Result<ConvertConfig> {
        let mut config = if self.config.exists() {
            load_config(&self.config)?
        } else {
            log::info!(
                "Config introuvable : {}. Utilisation des défauts.",
                self.config.display()
            );
            ConvertConfig::default()
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    /// Les options CLI priment sur le fichier de config.
    ///
    /// The merged result is clamped again; an out-of-range `--width` is
    /// logged at warn level, not rejected.
    pub fn apply_overrides(&self, config: &mut ConvertConfig) {
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(blank) = self.blank {
            config.blank_glyph = blank;
        }
        config.clamp_all();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use bi_core::config::MAX_WIDTH;
    use clap::CommandFactory;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("braillify").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn exactly_one_source() {
        assert!(parse(&[]).validate_source().is_err());
        assert!(parse(&["a.png"]).validate_source().is_ok());
        assert!(parse(&["--batch-folder", "dir"]).validate_source().is_ok());
        assert!(
            parse(&["a.png", "--batch-folder", "dir"])
                .validate_source()
                .is_err()
        );
        assert!(
            parse(&["a.png", "--batch-out", "out"])
                .validate_source()
                .is_err()
        );
        assert!(
            parse(&["--batch-folder", "dir", "-o", "x.txt"])
                .validate_source()
                .is_err()
        );
    }

    #[test]
    fn typed_options_parse() {
        let cli = parse(&["a.png", "-w", "64", "--mode", "threshold", "--blank", "single-dot"]);
        assert_eq!(cli.width, Some(64));
        assert_eq!(cli.mode, Some(EncodeMode::Threshold));
        assert_eq!(cli.blank, Some(BlankGlyph::SingleDot));
    }

    #[test]
    fn zero_width_and_unknown_mode_are_rejected() {
        let args = ["braillify", "a.png", "--width", "0"];
        assert!(Cli::try_parse_from(args).is_err());
        let args = ["braillify", "a.png", "--mode", "floyd"];
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn flags_override_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[convert]\nwidth = 30\nmode = \"Threshold\"").unwrap();
        let path = file.path().to_str().unwrap();

        let config = parse(&["a.png", "-c", path]).resolve_config().unwrap();
        assert_eq!(config.width, 30);
        assert_eq!(config.mode, EncodeMode::Threshold);

        let config = parse(&["a.png", "-c", path, "-w", "80", "--mode", "dither"])
            .resolve_config()
            .unwrap();
        assert_eq!(config.width, 80);
        assert_eq!(config.mode, EncodeMode::Dither);
    }

    #[test]
    fn oversized_width_flag_is_clamped() {
        let mut config = ConvertConfig::default();
        parse(&["a.png", "-w", "100000"]).apply_overrides(&mut config);
        assert_eq!(config.width, MAX_WIDTH);
        // déjà ramenée : un second passage ne change plus rien
        assert!(!config.clamp_all());
    }

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("none.toml");
        let config = parse(&["a.png", "-c", missing.to_str().unwrap()])
            .resolve_config()
            .unwrap();
        assert_eq!(config, ConvertConfig::default());
    }
}
