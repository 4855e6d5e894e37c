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

//! RGB565 color packing.
//!
//! The target renderer stores every color as a packed 16-bit value with
//! 5 bits of red, 6 bits of green and 5 bits of blue. Quantization keeps
//! the high bits of each channel and shifts them into place.

/// Packs an 8-bit RGB triple into a 16-bit RGB565 value.
pub const fn quantize(r: u8, g: u8, b: u8) -> u16 {
    ((r as u16 & 0xF8) << 8) | ((g as u16 & 0xFC) << 3) | ((b as u16 & 0xF8) >> 3)
}

/// Packs a unit-range float triple (material color channels) into RGB565.
///
/// Channels are scaled by 255 and truncated before packing; values outside
/// `[0.0, 1.0]` saturate at the channel bounds.
pub fn quantize_unit(rgb: [f32; 3]) -> u16 {
    quantize(
        (rgb[0] * 255.0) as u8,
        (rgb[1] * 255.0) as u8,
        (rgb[2] * 255.0) as u8,
    )
}
