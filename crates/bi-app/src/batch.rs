use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bi_braille::encode_batch;
use bi_core::config::ConvertConfig;
use bi_source::{Resizer, load_scaled_with, scan_images};
use rayon::prelude::*;

use crate::convert::write_text;

/// Bilan d'un traitement par lots.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Images converties et écrites.
    pub converted: usize,
    /// Images en échec (décodage, taille, écriture).
    pub failed: usize,
}

/// Chemin du fichier texte pour `image`.
///
/// With `out_dir`, the path relative to `folder` is mirrored under it;
/// otherwise the text lands next to the image.
#[must_use]
pub fn output_path(folder: &Path, image: &Path, out_dir: Option<&Path>) -> PathBuf {
    let txt = image.with_extension("txt");
    match out_dir {
        Some(out) => match txt.strip_prefix(folder) {
            Ok(rel) => out.join(rel),
            Err(_) => out.join(txt.file_name().unwrap_or_default()),
        },
        None => txt,
    }
}

/// Convertit toutes les images de `folder`.
///
/// Decoding and encoding run in parallel across images; each image is
/// still encoded sequentially. Per-image failures are logged and counted.
///
/// # Errors
/// Returns an error if the folder cannot be scanned, holds no image, or if
/// every image failed.
pub fn run_batch(folder: &Path, out_dir: Option<&Path>, config: &ConvertConfig) -> Result<BatchReport> {
    let files = scan_images(folder)?;
    if files.is_empty() {
        anyhow::bail!("Aucune image trouvée dans {}", folder.display());
    }
    log::info!("Lot : {} image(s), mode {}", files.len(), config.mode);

    let mut report = BatchReport::default();

    // 1. Décodage + redimensionnement en parallèle, un Resizer par worker
    let loaded: Vec<_> = files
        .into_par_iter()
        .map_init(Resizer::new, |resizer, path| {
            let grid = load_scaled_with(resizer, &path, config.width);
            (path, grid)
        })
        .collect();

    let mut paths = Vec::with_capacity(loaded.len());
    let mut grids = Vec::with_capacity(loaded.len());
    for (path, grid) in loaded {
        match grid {
            Ok(g) => {
                paths.push(path);
                grids.push(g);
            }
            Err(e) => {
                log::warn!("{} ignorée : {e:#}", path.display());
                report.failed += 1;
            }
        }
    }

    // 2. Encodage, une tâche par image
    let matrices = encode_batch(&grids, config.mode);

    // 3. Écriture
    for (path, dots) in paths.iter().zip(&matrices) {
        let dest = output_path(folder, path, out_dir);
        let written = dest
            .parent()
            .map_or(Ok(()), fs::create_dir_all)
            .with_context(|| format!("Impossible de créer le dossier de {}", dest.display()))
            .and_then(|()| write_text(&dots.render_with(config.blank_glyph), Some(&dest)));
        match written {
            Ok(()) => report.converted += 1,
            Err(e) => {
                log::warn!("{} : {e:#}", path.display());
                report.failed += 1;
            }
        }
    }

    if report.converted == 0 {
        anyhow::bail!("Aucune image convertie ({} échec(s))", report.failed);
    }
    log::info!(
        "Lot terminé : {} convertie(s), {} échec(s)",
        report.converted,
        report.failed
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use bi_core::config::EncodeMode;
    use image::{Rgba, RgbaImage};

    use super::*;

    #[test]
    fn output_path_mirrors_tree() {
        let folder = Path::new("/in");
        let img = Path::new("/in/sub/cat.png");
        assert_eq!(output_path(folder, img, None), PathBuf::from("/in/sub/cat.txt"));
        assert_eq!(
            output_path(folder, img, Some(Path::new("/out"))),
            PathBuf::from("/out/sub/cat.txt")
        );
    }

    #[test]
    fn converts_every_image_and_counts_failures() {
        let input = tempfile::tempdir().unwrap();
        let output = tempfile::tempdir().unwrap();
        fs::create_dir(input.path().join("nested")).unwrap();
        RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]))
            .save(input.path().join("white.png"))
            .unwrap();
        RgbaImage::from_pixel(4, 8, Rgba([0, 0, 0, 255]))
            .save(input.path().join("nested/black.png"))
            .unwrap();
        fs::write(input.path().join("broken.png"), b"garbage").unwrap();

        let config = ConvertConfig {
            width: 4,
            mode: EncodeMode::Threshold,
            ..ConvertConfig::default()
        };
        let report = run_batch(input.path(), Some(output.path()), &config).unwrap();
        assert_eq!(
            report,
            BatchReport {
                converted: 2,
                failed: 1
            }
        );

        let white = fs::read_to_string(output.path().join("white.txt")).unwrap();
        assert_eq!(white, "⣿⣿\n");
        let black = fs::read_to_string(output.path().join("nested/black.txt")).unwrap();
        assert_eq!(black, "⠀⠀\n⠀⠀\n");
    }

    #[test]
    fn empty_folder_is_an_error() {
        let input = tempfile::tempdir().unwrap();
        assert!(run_batch(input.path(), None, &ConvertConfig::default()).is_err());
    }
}
