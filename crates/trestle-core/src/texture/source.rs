// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the abstraction for loading the pixels behind a texture map path.

use std::error::Error;
use std::path::Path;

/// Decoded image pixels: tightly packed row-major RGB byte triples.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbPixels {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// `3 * width * height` bytes, one `[r, g, b]` triple per pixel.
    pub data: Vec<u8>,
}

/// A trait for turning a texture map path into decoded RGB pixels.
///
/// The encoder only ever sees this trait, so tests can feed it synthetic
/// images without touching the filesystem.
pub trait PixelSource {
    /// Loads and decodes the image at `path`.
    fn load(&self, path: &Path) -> Result<RgbPixels, Box<dyn Error + Send + Sync>>;
}

/// The default [`PixelSource`], decoding image files from the local
/// filesystem. Any format the decoder recognizes is accepted, and an alpha
/// channel, if present, is discarded.
pub struct FilePixelSource;

impl PixelSource for FilePixelSource {
    fn load(&self, path: &Path) -> Result<RgbPixels, Box<dyn Error + Send + Sync>> {
        let decoded = image::open(path)
            .map_err(|e| format!("failed to decode image '{}': {}", path.display(), e))?;
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        Ok(RgbPixels {
            width,
            height,
            data: rgb.into_raw(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reports_its_path() {
        let err = FilePixelSource
            .load(Path::new("definitely/not/here.png"))
            .unwrap_err();
        assert!(format!("{err}").contains("definitely/not/here.png"));
    }
}
