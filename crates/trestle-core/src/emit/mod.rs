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

//! Output assembly: renders a parsed scene into one C++ translation unit of
//! texture, position, vertex and object tables.
//!
//! The whole unit is built in memory and only handed back on success, so a
//! conversion that fails halfway never leaves a partial header behind.

use std::path::Path;

use crate::color;
use crate::error::{ConvertError, ModelError};
use crate::ident;
use crate::scene::{parse_scene, MeshObject, SceneModel, VertexRef};
use crate::texture::{FilePixelSource, PixelSource, TextureEncoder, TextureRef};

/// Draw mode attached to each emitted object descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawMode {
    /// Every face has three corners.
    Triangles,
    /// Every face has four corners.
    Quads,
    /// Every record has two corners.
    Lines,
}

impl DrawMode {
    /// The enumerator name understood by the consuming renderer.
    pub fn tag(self) -> &'static str {
        match self {
            DrawMode::Triangles => "GL_TRIANGLES",
            DrawMode::Quads => "GL_QUADS",
            DrawMode::Lines => "GL_LINES",
        }
    }
}

/// Classifies an object's faces into a single draw mode.
fn classify(object: &MeshObject) -> Result<DrawMode, ModelError> {
    let uniform = |arity: usize| object.faces.iter().all(|face| face.arity() == arity);
    if uniform(3) {
        Ok(DrawMode::Triangles)
    } else if uniform(4) {
        Ok(DrawMode::Quads)
    } else if uniform(2) {
        Ok(DrawMode::Lines)
    } else {
        Err(ModelError::MixedTopology {
            object: object.name.clone(),
        })
    }
}

fn render_vertex(
    model: &SceneModel,
    object: &MeshObject,
    vertex: &VertexRef,
    texture: Option<&TextureRef>,
    color: u16,
) -> Result<String, ConvertError> {
    let pool = model.positions.len();
    if vertex.position == 0 || vertex.position as usize > pool {
        return Err(ModelError::PositionOutOfRange {
            object: object.name.clone(),
            index: vertex.position,
            count: pool,
        }
        .into());
    }
    let index = vertex.position - 1;

    let (u, v) = match (texture, vertex.texcoord) {
        (Some(entry), Some(texcoord)) => {
            let tex_pool = model.texcoords.len();
            if texcoord == 0 || texcoord as usize > tex_pool {
                return Err(ModelError::TexcoordOutOfRange {
                    object: object.name.clone(),
                    index: texcoord,
                    count: tex_pool,
                }
                .into());
            }
            let [mut u, mut v] = model.texcoords[texcoord as usize - 1];
            if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
                log::warn!(
                    "texture coordinate ({u}, {v}) out of range in object '{}', clamping",
                    object.name
                );
                u = u.clamp(0.0, 1.0);
                v = v.clamp(0.0, 1.0);
            }
            // Texel space, with the v axis flipped to match the renderer's
            // top-left origin.
            (
                u * entry.width as f32,
                entry.height as f32 - v * entry.height as f32,
            )
        }
        _ => (0.0, 0.0),
    };

    Ok(format!(
        "    {{{index}, {u:.3}f, {v:.3}f, 0x{color:04x}}},\n"
    ))
}

/// Renders one drawable object: its vertex table plus its descriptor.
fn render_object<S: PixelSource>(
    model: &SceneModel,
    object: &MeshObject,
    unit: &str,
    encoder: &mut TextureEncoder<S>,
) -> Result<String, ConvertError> {
    let mode = classify(object)?;
    let name = ident::sanitize(&object.name);

    let material = match &object.material {
        Some(selected) => Some(model.materials.get(selected).ok_or_else(|| {
            ModelError::MissingMaterial {
                object: object.name.clone(),
                material: selected.clone(),
            }
        })?),
        None => None,
    };

    let texture = match material.and_then(|m| m.maps.diffuse.as_deref()) {
        Some(map_path) => Some(encoder.encode(map_path)?),
        None => None,
    };

    // With a texture bound, the color slot carries renderer flags and stays
    // zero; otherwise it holds the material's quantized diffuse color.
    let color = match (&texture, &object.material) {
        (Some(_), _) => 0,
        (None, Some(selected)) => {
            let diffuse = material.and_then(|m| m.colors.diffuse).ok_or_else(|| {
                ModelError::MissingDiffuseColor {
                    object: object.name.clone(),
                    material: selected.clone(),
                }
            })?;
            color::quantize_unit(diffuse)
        }
        (None, None) => 0,
    };

    let count: usize = object.faces.iter().map(|face| face.arity()).sum();

    let mut out = String::new();
    out.push_str(&format!(
        "const IndexedVertex vertices_{name}[{count}] = {{\n"
    ));
    for face in &object.faces {
        for vertex in &face.vertices {
            out.push_str(&render_vertex(model, object, vertex, texture.as_ref(), color)?);
        }
    }
    out.push_str("};\n\n");

    let texture_field = match &texture {
        Some(entry) => format!("&{}", entry.symbol),
        None => "nullptr".to_string(),
    };
    out.push_str(&format!(
        "const ngl_object obj_{name} = {{\n    \
         {pool},\n    \
         positions_{unit} + 0,\n    \
         {tag},\n    \
         {count},\n    \
         vertices_{name},\n    \
         {texture_field}\n}};\n\n",
        pool = model.positions.len(),
        tag = mode.tag(),
    ));
    log::debug!(
        "object '{}' emitted as obj_{} ({} vertices, {})",
        object.name,
        name,
        count,
        mode.tag()
    );
    Ok(out)
}

/// Renders `model` into the final translation unit text.
///
/// Texture tables come first in first-reference order, then the shared
/// position pool, then each drawable object's vertex table and descriptor,
/// and finally a pointer table indexing every emitted object.
pub fn assemble<S: PixelSource>(
    model: &SceneModel,
    source_name: &str,
    encoder: &mut TextureEncoder<S>,
) -> Result<String, ConvertError> {
    let unit = ident::sanitize(source_name);

    let mut sections = Vec::new();
    let mut index = Vec::new();
    for object in &model.objects {
        if object.is_empty() {
            log::debug!("skipping empty object '{}'", object.name);
            continue;
        }
        sections.push(render_object(model, object, &unit, encoder)?);
        index.push(format!("    &obj_{},\n", ident::sanitize(&object.name)));
    }

    let mut out = String::new();
    out.push_str(&format!("// Generated from {source_name} by trestle-mesh\n"));
    out.push_str("#include \"gldrawarray.h\"\n\n");
    out.push_str(
        "struct ngl_object {
    unsigned int count_positions;
    const VECTOR3 *positions;
    GLDrawMode draw_mode;
    unsigned int count_vertices;
    const IndexedVertex *vertices;
    const TEXTURE *texture;
};

",
    );
    for fragment in encoder.fragments() {
        out.push_str(fragment);
    }
    out.push_str(&format!("static const VECTOR3 positions_{unit}[] = {{\n"));
    for position in &model.positions {
        out.push_str(&format!(
            "    {{{:?}f, {:?}f, {:?}f}},\n",
            position[0], position[1], position[2]
        ));
    }
    out.push_str("};\n\n");
    for section in &sections {
        out.push_str(section);
    }
    out.push_str(&format!("const ngl_object *objs_{unit}[] = {{\n"));
    for entry in &index {
        out.push_str(entry);
    }
    out.push_str("};\n");

    log::info!(
        "assembled {} drawable objects and {} textures for '{}'",
        sections.len(),
        encoder.fragments().len(),
        source_name
    );
    Ok(out)
}

/// Converts one scene source file into the complete header text.
///
/// Reads `input` and its material libraries, encodes every referenced
/// diffuse texture map, and assembles the output in memory.
pub fn generate_mesh_header(input: &Path) -> Result<String, ConvertError> {
    let model = parse_scene(input)?;
    let source_name = input
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| input.display().to_string());
    let mut encoder = TextureEncoder::new(FilePixelSource);
    assemble(&model, &source_name, &mut encoder)
}
