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

//! Texture encoding: decoded images become packed RGB565 color tables plus
//! a descriptor the renderer can sample from directly.

mod source;

pub use source::{FilePixelSource, PixelSource, RgbPixels};

use std::path::{Path, PathBuf};

use crate::color;
use crate::error::ConvertError;
use crate::ident;

/// Handle to an already-encoded texture: the descriptor symbol to reference
/// and the pixel dimensions needed for texel-space mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureRef {
    /// Name of the emitted descriptor constant (`tex_<stem>`, numbered when
    /// a later file reuses a stem).
    pub symbol: String,
    /// Width of the encoded image in pixels.
    pub width: u32,
    /// Height of the encoded image in pixels.
    pub height: u32,
}

/// Encodes texture maps on demand, remembering every path it has already
/// encoded so a map shared between materials is emitted exactly once.
pub struct TextureEncoder<S> {
    source: S,
    seen: Vec<(PathBuf, TextureRef)>,
    fragments: Vec<String>,
}

impl<S: PixelSource> TextureEncoder<S> {
    /// Creates an encoder that pulls pixels from `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            seen: Vec::new(),
            fragments: Vec::new(),
        }
    }

    /// Returns the handle for `path`, encoding the image on first sight and
    /// answering from the cache afterwards. Distinct paths sharing a file
    /// stem get numbered symbols.
    pub fn encode(&mut self, path: &Path) -> Result<TextureRef, ConvertError> {
        if let Some((_, cached)) = self.seen.iter().find(|(seen, _)| seen.as_path() == path) {
            log::debug!("texture '{}' already encoded", path.display());
            return Ok(cached.clone());
        }
        let pixels = self
            .source
            .load(path)
            .map_err(|source| ConvertError::Texture {
                path: path.display().to_string(),
                source,
            })?;
        let stem = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default();
        let base = ident::sanitize(&stem);
        // A second file with an already-used stem gets a numbered symbol.
        let mut name = base.clone();
        let mut n = 2;
        while self
            .seen
            .iter()
            .any(|(_, cached)| cached.symbol.strip_prefix("tex_") == Some(name.as_str()))
        {
            name = format!("{base}_{n}");
            n += 1;
        }
        log::info!(
            "encoded texture '{}' as tex_{} ({}x{})",
            path.display(),
            name,
            pixels.width,
            pixels.height
        );
        let entry = TextureRef {
            symbol: format!("tex_{name}"),
            width: pixels.width,
            height: pixels.height,
        };
        self.fragments.push(render_fragment(&name, &pixels));
        self.seen.push((path.to_path_buf(), entry.clone()));
        Ok(entry)
    }

    /// Emitted table/descriptor fragments, in first-reference order.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }
}

/// Renders the color table plus descriptor for one decoded image.
fn render_fragment(name: &str, pixels: &RgbPixels) -> String {
    let width = pixels.width as usize;
    let mut rows = String::new();
    for row in pixels.data.chunks(3 * width.max(1)) {
        let entries: Vec<String> = row
            .chunks_exact(3)
            .map(|px| format!("0x{:04x}", color::quantize(px[0], px[1], px[2])))
            .collect();
        rows.push_str("    ");
        rows.push_str(&entries.join(", "));
        rows.push_str(",\n");
    }
    format!(
        "COLOR texdata_{name}[] = {{\n{rows}}};\n\n\
         constexpr const TEXTURE tex_{name} = {{\n    \
         .width = {width},\n    \
         .height = {height},\n    \
         .has_transparency = false,\n    \
         .transparent_color = 0x0000,\n    \
         .bitmap = texdata_{name}\n}};\n\n",
        width = pixels.width,
        height = pixels.height,
    )
}

/// Encodes a single image file into its color table and descriptor text.
///
/// This is the whole conversion behind the standalone texture tool; the
/// scene pipeline goes through [`TextureEncoder`] instead so maps shared
/// between materials are emitted once.
pub fn encode_image_file(path: &Path) -> Result<String, ConvertError> {
    let mut encoder = TextureEncoder::new(FilePixelSource);
    encoder.encode(path)?;
    Ok(encoder.fragments.concat())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::error::Error;

    struct FakeSource {
        pixels: RgbPixels,
        loads: Cell<usize>,
    }

    impl FakeSource {
        fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
            Self {
                pixels: RgbPixels {
                    width,
                    height,
                    data,
                },
                loads: Cell::new(0),
            }
        }
    }

    impl PixelSource for &FakeSource {
        fn load(&self, _path: &Path) -> Result<RgbPixels, Box<dyn Error + Send + Sync>> {
            self.loads.set(self.loads.get() + 1);
            Ok(self.pixels.clone())
        }
    }

    struct FailingSource;

    impl PixelSource for FailingSource {
        fn load(&self, _path: &Path) -> Result<RgbPixels, Box<dyn Error + Send + Sync>> {
            Err("decoder exploded".into())
        }
    }

    #[test]
    fn fragment_wraps_rows_at_image_width() {
        let source = FakeSource::new(
            2,
            2,
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255],
        );
        let mut encoder = TextureEncoder::new(&source);
        encoder.encode(Path::new("swatch.png")).unwrap();
        let expected = "COLOR texdata_swatch[] = {\n    \
                        0xf800, 0x07e0,\n    \
                        0x001f, 0xffff,\n\
                        };\n\n\
                        constexpr const TEXTURE tex_swatch = {\n    \
                        .width = 2,\n    \
                        .height = 2,\n    \
                        .has_transparency = false,\n    \
                        .transparent_color = 0x0000,\n    \
                        .bitmap = texdata_swatch\n\
                        };\n\n";
        assert_eq!(encoder.fragments(), &[expected.to_string()]);
    }

    #[test]
    fn repeated_paths_are_encoded_once() {
        let source = FakeSource::new(1, 1, vec![0, 0, 0]);
        let mut encoder = TextureEncoder::new(&source);
        let first = encoder.encode(Path::new("a/skin.png")).unwrap();
        let again = encoder.encode(Path::new("a/skin.png")).unwrap();
        assert_eq!(first, again);
        assert_eq!(source.loads.get(), 1);
        assert_eq!(encoder.fragments().len(), 1);

        encoder.encode(Path::new("b/skin.png")).unwrap();
        assert_eq!(source.loads.get(), 2);
        assert_eq!(encoder.fragments().len(), 2);
    }

    #[test]
    fn colliding_stems_get_numbered_symbols() {
        let source = FakeSource::new(1, 1, vec![0, 0, 0]);
        let mut encoder = TextureEncoder::new(&source);
        let first = encoder.encode(Path::new("a/brick.png")).unwrap();
        let second = encoder.encode(Path::new("b/brick.png")).unwrap();
        assert_eq!(first.symbol, "tex_brick");
        assert_eq!(second.symbol, "tex_brick_2");

        // Both tables land in the unit under their own names.
        let unit = encoder.fragments().concat();
        assert_eq!(unit.matches("COLOR texdata_brick[]").count(), 1);
        assert_eq!(unit.matches("COLOR texdata_brick_2[]").count(), 1);
    }

    #[test]
    fn symbol_comes_from_the_sanitized_file_stem() {
        let source = FakeSource::new(1, 1, vec![0, 0, 0]);
        let mut encoder = TextureEncoder::new(&source);
        let entry = encoder.encode(Path::new("textures/brick-red.png")).unwrap();
        assert_eq!(entry.symbol, "tex_brick_red");
        assert_eq!((entry.width, entry.height), (1, 1));
    }

    #[test]
    fn load_failures_carry_the_texture_path() {
        let mut encoder = TextureEncoder::new(FailingSource);
        let err = encoder.encode(Path::new("gone.png")).unwrap_err();
        assert!(matches!(err, ConvertError::Texture { .. }));
        let message = format!("{err}");
        assert!(message.contains("gone.png"));
        assert!(message.contains("decoder exploded"));
    }
}
