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

//! # Trestle Core
//!
//! Converts artist-authored scene descriptions and texture images into C++
//! headers of compile-time constant tables for a fixed-point software
//! renderer. Everything the renderer draws at runtime is baked here: shared
//! position pools, per-object indexed vertex tables, packed RGB565 texture
//! bitmaps and the object descriptors tying them together.

#![warn(missing_docs)]

pub mod color;
pub mod emit;
pub mod error;
pub mod ident;
pub mod scene;
pub mod texture;

pub use error::{ConvertError, ModelError, ParseError};
pub use scene::SceneModel;
