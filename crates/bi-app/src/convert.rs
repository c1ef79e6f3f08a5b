use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use bi_braille::encode;
use bi_core::config::ConvertConfig;
use bi_core::dots::DotMatrix;
use bi_core::frame::PixelGrid;
use bi_source::load_scaled;

/// Grille déjà dimensionnée → matrice de points, selon le mode configuré.
#[must_use]
pub fn encode_grid(grid: &PixelGrid, config: &ConvertConfig) -> DotMatrix {
    let dots = encode(grid, config.mode);
    log::info!(
        "{}×{} px → {}×{} caractères ({} points allumés)",
        grid.width(),
        grid.height(),
        dots.byte_width(),
        dots.byte_height(),
        dots.count_dots()
    );
    dots
}

/// Charge, redimensionne, encode et rend une image en texte Braille.
///
/// # Errors
/// Returns an error if the image cannot be loaded or scaled.
pub fn convert_file(path: &Path, config: &ConvertConfig) -> Result<String> {
    let grid = load_scaled(path, config.width)?;
    Ok(encode_grid(&grid, config).render_with(config.blank_glyph))
}

/// Écrit le texte dans `output`, ou sur la sortie standard.
///
/// A single trailing newline is added here; rendered text carries none.
///
/// # Errors
/// Returns an error if the destination cannot be written.
pub fn write_text(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, format!("{text}\n"))
                .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
            log::info!("Texte écrit dans {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            writeln!(stdout, "{text}").context("Écriture sur stdout impossible")?;
            stdout.flush().context("Écriture sur stdout impossible")?;
        }
    }
    Ok(())
}
