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

//! In-memory scene representation produced by the parser.
//!
//! The model mirrors the shape of the emitted tables: two global attribute
//! pools shared by every object, a material dictionary, and an ordered list
//! of objects whose faces index into the pools.

use std::collections::HashMap;
use std::path::PathBuf;

/// The four color/map slots a material can populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialSlot {
    /// The `Ka` / `map_Ka` slot.
    Ambient,
    /// The `Kd` / `map_Kd` slot.
    Diffuse,
    /// The `Ks` slot.
    Specular,
    /// The `Ke` slot.
    Emissive,
}

/// One optional value per material slot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SlotTable<T> {
    /// Value of the ambient slot, if declared.
    pub ambient: Option<T>,
    /// Value of the diffuse slot, if declared.
    pub diffuse: Option<T>,
    /// Value of the specular slot, if declared.
    pub specular: Option<T>,
    /// Value of the emissive slot, if declared.
    pub emissive: Option<T>,
}

impl<T> SlotTable<T> {
    /// Stores `value` in the given slot, replacing any previous value.
    pub fn set(&mut self, slot: MaterialSlot, value: T) {
        match slot {
            MaterialSlot::Ambient => self.ambient = Some(value),
            MaterialSlot::Diffuse => self.diffuse = Some(value),
            MaterialSlot::Specular => self.specular = Some(value),
            MaterialSlot::Emissive => self.emissive = Some(value),
        }
    }

    /// Returns the value stored in the given slot, if any.
    pub fn get(&self, slot: MaterialSlot) -> Option<&T> {
        match slot {
            MaterialSlot::Ambient => self.ambient.as_ref(),
            MaterialSlot::Diffuse => self.diffuse.as_ref(),
            MaterialSlot::Specular => self.specular.as_ref(),
            MaterialSlot::Emissive => self.emissive.as_ref(),
        }
    }
}

/// A named material: per-slot colors in unit-range RGB, and per-slot texture
/// map paths already resolved against the declaring file's directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// Declared color channels, one per slot.
    pub colors: SlotTable<[f32; 3]>,
    /// Declared texture map paths, one per slot.
    pub maps: SlotTable<PathBuf>,
}

/// One corner of a face: a 1-based position index plus an optional 1-based
/// texture coordinate index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexRef {
    /// Index into [`SceneModel::positions`], starting at 1.
    pub position: u32,
    /// Index into [`SceneModel::texcoords`], starting at 1.
    pub texcoord: Option<u32>,
}

/// A face or polyline segment, listed corner by corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    /// The corners in declaration order.
    pub vertices: Vec<VertexRef>,
}

impl Face {
    /// Number of corners; 2 for line segments, 3 or 4 for drawable faces.
    pub fn arity(&self) -> usize {
        self.vertices.len()
    }
}

/// A named group of faces that is homogeneous in material and face arity.
///
/// The parser enforces the homogeneity by splitting off a fresh object
/// whenever an incoming face disagrees with the faces collected so far.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshObject {
    /// The declared (or synthesized) object name.
    pub name: String,
    /// Faces collected for this object, in file order.
    pub faces: Vec<Face>,
    /// The material selected when the first face arrived, if any.
    pub material: Option<String>,
    /// The corner count shared by every face, fixed by the first face.
    pub arity: Option<usize>,
}

impl MeshObject {
    /// Creates an empty object with the given name.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            faces: Vec::new(),
            material: None,
            arity: None,
        }
    }

    /// Whether the object collected no faces and should be skipped on output.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }
}

/// Everything parsed from a scene source and its material libraries.
#[derive(Debug, Default, PartialEq)]
pub struct SceneModel {
    /// Global position pool, in declaration order across all objects.
    pub positions: Vec<[f32; 3]>,
    /// Global texture coordinate pool, in declaration order.
    pub texcoords: Vec<[f32; 2]>,
    /// Materials by name, merged across every material library read.
    pub materials: HashMap<String, Material>,
    /// Objects in first-declaration order.
    pub objects: Vec<MeshObject>,
}

impl SceneModel {
    /// Looks up the position of an already-declared object by name.
    pub fn object_index(&self, name: &str) -> Option<usize> {
        self.objects.iter().position(|o| o.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_table_set_and_get() {
        let mut table = SlotTable::default();
        assert_eq!(table.get(MaterialSlot::Diffuse), None);
        table.set(MaterialSlot::Diffuse, [1.0, 0.5, 0.0]);
        table.set(MaterialSlot::Emissive, [0.0, 0.0, 0.0]);
        assert_eq!(table.get(MaterialSlot::Diffuse), Some(&[1.0, 0.5, 0.0]));
        assert_eq!(table.get(MaterialSlot::Emissive), Some(&[0.0, 0.0, 0.0]));
        assert_eq!(table.get(MaterialSlot::Specular), None);
    }

    #[test]
    fn slot_table_set_replaces() {
        let mut table = SlotTable::default();
        table.set(MaterialSlot::Ambient, [0.1, 0.1, 0.1]);
        table.set(MaterialSlot::Ambient, [0.9, 0.9, 0.9]);
        assert_eq!(table.ambient, Some([0.9, 0.9, 0.9]));
    }

    #[test]
    fn fresh_object_is_empty() {
        let object = MeshObject::new("hull");
        assert!(object.is_empty());
        assert_eq!(object.material, None);
        assert_eq!(object.arity, None);
    }
}
