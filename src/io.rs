//! Reading the input image and writing the heightmap.

use crate::error::{HeightmapError, HeightmapResult};
use crate::heightmap::Heightmap;
use image::{GrayImage, ImageFormat};
use std::path::Path;


/// Load any image `image` can decode and convert it to 8-bit gray.
pub fn load_gray_image(path: impl AsRef<Path>) -> HeightmapResult<GrayImage> {
    let path = path.as_ref();

    let image = image::open(path)
        .map_err(|source| HeightmapError::ImageLoad { path: path.to_path_buf(), source })?
        .into_luma8();

    log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image)
}

/// Write the heightmap as a single channel 8-bit PNG, whatever the file extension.
pub fn save_heightmap(heightmap: &Heightmap, path: impl AsRef<Path>) -> HeightmapResult<()> {
    let path = path.as_ref();

    heightmap.to_gray_image()
        .save_with_format(path, ImageFormat::Png)
        .map_err(|source| HeightmapError::ImageSave { path: path.to_path_buf(), source })?;

    log::debug!("saved {} ({}x{})", path.display(), heightmap.width, heightmap.height);
    Ok(())
}
