use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Extensions image reconnues.
const IMAGE_EXTS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif"];

/// Liste récursivement les images d'un dossier, triées par chemin.
///
/// # Errors
/// Returns an error if `dir` is not a readable directory.
///
/// # Example
/// ```no_run
/// use bi_source::folder::scan_images;
/// use std::path::Path;
/// let files = scan_images(Path::new("photos")).unwrap();
/// ```
pub fn scan_images(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        anyhow::bail!("{} n'est pas un dossier", dir.display());
    }
    let mut files = Vec::new();
    scan_dir(dir, &mut files)?;
    files.sort();
    log::debug!("{} image(s) trouvée(s) dans {}", files.len(), dir.display());
    Ok(files)
}

/// Extrait récursivement les images reconnues.
fn scan_dir(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Impossible de lire {}", dir.display()))?;
    for entry in entries {
        let path = entry?.path();
        if path.is_dir() {
            scan_dir(&path, files)?;
        } else if is_image(&path) {
            files.push(path);
        }
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTS.contains(&ext.to_lowercase().as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_images_recursively_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("sub");
        fs::create_dir(&nested).unwrap();
        for name in ["b.PNG", "a.jpg", "notes.txt", "sub/c.gif"] {
            fs::write(dir.path().join(name), b"").unwrap();
        }

        let files = scan_images(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            names,
            vec![
                PathBuf::from("a.jpg"),
                PathBuf::from("b.PNG"),
                PathBuf::from("sub/c.gif")
            ]
        );
    }

    #[test]
    fn plain_file_is_not_a_folder() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(scan_images(file.path()).is_err());
    }
}
