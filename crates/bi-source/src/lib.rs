//! Sources d'images pour braillify : décodage, redimensionnement, dossiers.

pub mod folder;
pub mod image;
pub mod resize;

pub use folder::scan_images;
pub use self::image::{load_image, load_scaled, load_scaled_with};
pub use resize::{Resizer, resize_to_width, target_size};
