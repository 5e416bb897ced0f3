//! Writes a rendered round to a directory: `img_00.png` .. `img_15.png` plus
//! `meta.json` holding the parameters and the answer pair.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use super::png::save_png;
use crate::error::Result;
use crate::round::Round;

pub const META_FILE: &str = "meta.json";

/// Paths written by [`write_round_bundle`].
#[derive(Debug, Clone)]
pub struct BundleSummary {
    pub images: Vec<PathBuf>,
    pub meta: PathBuf,
}

pub fn image_file_name(index: usize) -> String {
    format!("img_{index:02}.png")
}

/// Render every item of `round` into `out_dir`, creating it if needed.
pub fn write_round_bundle(round: &Round, out_dir: impl AsRef<Path>) -> Result<BundleSummary> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir)?;

    let mut images = Vec::with_capacity(round.items.len());
    for (i, img) in round.render().iter().enumerate() {
        let path = out_dir.join(image_file_name(i));
        save_png(img, &path)?;
        images.push(path);
    }

    let meta = out_dir.join(META_FILE);
    fs::write(&meta, serde_json::to_string_pretty(round)?)?;

    info!(
        dir = %out_dir.display(),
        answer = ?round.answer,
        "saved {} images and {META_FILE}",
        images.len()
    );
    Ok(BundleSummary { images, meta })
}
