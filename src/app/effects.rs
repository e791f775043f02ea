//! Side effects: file loading, image decoding, protocol creation.
//!
//! The update function stays pure; everything touching the filesystem or
//! the terminal's image capabilities runs here, after each message.

use std::path::Path;

use anyhow::{Context, Result};
use image::DynamicImage;
use ratatui_image::picker::Picker;

use crate::app::{App, Message, Model};

impl App {
    /// Apply the side effects a message asks for.
    pub(super) fn handle_message_side_effects(model: &mut Model, msg: &Message) {
        if matches!(msg, Message::Reload) {
            if let Err(err) = Self::load_document(model) {
                tracing::warn!(error = %err, "reload failed");
            }
            model.loading = false;
        }
    }

    /// Read the file, rebuild the section model, and decode any images.
    pub(super) fn load_document(model: &mut Model) -> Result<()> {
        let source = std::fs::read_to_string(&model.file_path)
            .with_context(|| format!("Failed to read {}", model.file_path.display()))?;
        model.modified = std::fs::metadata(&model.file_path)
            .and_then(|m| m.modified())
            .ok();
        model.set_source(&source);
        Self::load_images(model);
        Ok(())
    }

    /// Decode document images into terminal protocols. Failures degrade to
    /// the alt-text placeholder.
    pub(super) fn load_images(model: &mut Model) {
        if !model.images_enabled {
            return;
        }
        let Some(picker) = model.picker.as_ref() else {
            return;
        };
        for section in &model.sections {
            for (image, _) in &section.images {
                let src = image.src();
                if model.image_protocols.contains_key(src) {
                    continue;
                }
                match load_image(&model.base_dir, src) {
                    Some(decoded) => {
                        let protocol = picker.new_resize_protocol(decoded);
                        model.image_protocols.insert(src.to_string(), protocol);
                    }
                    None => {
                        tracing::debug!(src, "image not decodable, using placeholder");
                    }
                }
            }
        }
    }
}

/// Detect the terminal's image protocol. Remote-incapable terminals fall
/// back to half-block rendering.
pub(super) fn create_picker() -> Option<Picker> {
    #[cfg(unix)]
    {
        if let Ok(picker) = Picker::from_query_stdio() {
            return Some(picker);
        }
    }
    Some(Picker::halfblocks())
}

/// Load an image from a path relative to the document. Remote URLs are not
/// fetched.
fn load_image(base_dir: &Path, src: &str) -> Option<DynamicImage> {
    if src.starts_with("http://") || src.starts_with("https://") {
        return None;
    }
    let path = if Path::new(src).is_absolute() {
        Path::new(src).to_path_buf()
    } else {
        base_dir.join(src)
    };
    image::open(&path).ok()
}
