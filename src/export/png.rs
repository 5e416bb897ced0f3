//! 8-bit grayscale PNG encoding for rendered patches.

use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::core::gabor::LumaImage;
use crate::error::Result;

/// Encode `img` as PNG bytes.
pub fn encode_png(img: &LumaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new(&mut buf).write_image(
        img.as_raw(),
        img.size,
        img.size,
        ExtendedColorType::L8,
    )?;
    Ok(buf)
}

/// Encode `img` and write it to `path`.
pub fn save_png(img: &LumaImage, path: impl AsRef<Path>) -> Result<()> {
    let bytes = encode_png(img)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::gabor::render;
    use crate::core::stimulus::StimulusParams;

    #[test]
    fn png_decodes_back_to_same_pixels() {
        let img = render(&StimulusParams::new(64));
        let bytes = encode_png(&img).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&bytes).unwrap().into_luma8();
        assert_eq!(decoded.width(), 64);
        assert_eq!(decoded.height(), 64);
        assert_eq!(decoded.into_raw(), img.pixels);
    }
}
