use std::path::{Path, PathBuf};

use crate::data_structures::texture;

/// Resolve an asset name. Absolute paths are used as is, anything else is looked up in
/// `./assets`.
pub fn asset_path(file_name: &str) -> PathBuf {
    // Path::join replaces the base when the argument is absolute.
    Path::new("./").join("assets").join(file_name)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(file_name);
    let data = tokio::fs::read(&path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e))?;
    Ok(data)
}

/// Read and decode an image file into a sprite texture. The format is detected from content.
pub async fn load_texture(
    file_name: &str,
    device: &wgpu::Device,
    queue: &wgpu::Queue,
) -> anyhow::Result<texture::Texture> {
    let data = load_binary(file_name).await?;
    texture::Texture::from_bytes(device, queue, &data, file_name)
}
