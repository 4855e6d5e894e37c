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

//! Line-oriented directive parser for scene sources and material libraries.
//!
//! Scene files and the material libraries they pull in share one directive
//! table, so both go through the same [`Parser::parse_file`] path. Every
//! line is split on whitespace; the first token selects a [`Directive`] and
//! the rest become its arguments. Unknown directives abort the run rather
//! than being skipped, so a typo cannot silently drop geometry.

use std::fs;
use std::path::Path;

use crate::error::ParseError;
use crate::scene::model::{Face, Material, MaterialSlot, MeshObject, SceneModel, VertexRef};

/// Everything a handler needs to report a precise error or resolve a path.
struct LineContext<'a> {
    file: &'a str,
    line: u32,
    base_dir: &'a Path,
}

/// The parsed meaning of a leading keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    MaterialLibrary,
    BeginObject,
    BeginMaterial,
    SelectMaterial,
    Position,
    Texcoord,
    Color(MaterialSlot),
    ColorMap(MaterialSlot),
    Face,
    Ignored,
}

fn lookup(keyword: &str) -> Option<Directive> {
    use MaterialSlot::{Ambient, Diffuse, Emissive, Specular};
    match keyword {
        "mtllib" => Some(Directive::MaterialLibrary),
        "o" | "g" => Some(Directive::BeginObject),
        "newmtl" => Some(Directive::BeginMaterial),
        "usemtl" => Some(Directive::SelectMaterial),
        "v" => Some(Directive::Position),
        "vt" => Some(Directive::Texcoord),
        "Ka" => Some(Directive::Color(Ambient)),
        "Kd" => Some(Directive::Color(Diffuse)),
        "Ks" => Some(Directive::Color(Specular)),
        "Ke" => Some(Directive::Color(Emissive)),
        "map_Ka" => Some(Directive::ColorMap(Ambient)),
        "map_Kd" => Some(Directive::ColorMap(Diffuse)),
        "f" | "l" => Some(Directive::Face),
        // Recognized but irrelevant to the fixed-function output.
        "vn" | "Ns" | "Ni" | "illum" | "d" | "map_d" | "Tr" | "Tf" | "s" => {
            Some(Directive::Ignored)
        }
        _ => None,
    }
}

fn bad_arity(at: &LineContext, directive: &str, expected: &'static str) -> ParseError {
    ParseError::BadArity {
        file: at.file.to_string(),
        line: at.line,
        directive: directive.to_string(),
        expected,
    }
}

fn parse_float(token: &str, at: &LineContext) -> Result<f32, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        file: at.file.to_string(),
        line: at.line,
        token: token.to_string(),
    })
}

fn parse_index(token: &str, at: &LineContext) -> Result<u32, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        file: at.file.to_string(),
        line: at.line,
        token: token.to_string(),
    })
}

/// Parses one `position[/texcoord[/normal]]` face corner. The normal index
/// is tolerated but dropped, as the output format has no use for it.
fn parse_vertex_ref(token: &str, at: &LineContext) -> Result<VertexRef, ParseError> {
    let mut parts = token.splitn(3, '/');
    let position = parse_index(parts.next().unwrap_or(""), at)?;
    let texcoord = match parts.next() {
        None | Some("") => None,
        Some(index) => Some(parse_index(index, at)?),
    };
    Ok(VertexRef { position, texcoord })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Mutable parse state threaded through every directive handler.
struct Parser {
    model: SceneModel,
    /// Index of the object collecting faces; always valid thanks to the stub.
    current_object: usize,
    /// Material being defined by the last `newmtl`, if any.
    current_material: Option<String>,
    /// Material picked by the last `usemtl`, applied to incoming faces.
    selected_material: Option<String>,
}

impl Parser {
    fn new(stub_name: &str) -> Self {
        let model = SceneModel {
            objects: vec![MeshObject::new(stub_name)],
            ..Default::default()
        };
        Self {
            model,
            current_object: 0,
            current_material: None,
            selected_material: None,
        }
    }

    fn parse_file(&mut self, path: &Path) -> Result<(), ParseError> {
        log::debug!("reading '{}'", path.display());
        let text = fs::read_to_string(path).map_err(|source| ParseError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let file = file_label(path);
        let base_dir = path.parent().unwrap_or(Path::new(""));
        self.parse_text(&text, &file, base_dir)
    }

    fn parse_text(&mut self, text: &str, file: &str, base_dir: &Path) -> Result<(), ParseError> {
        for (index, raw_line) in text.lines().enumerate() {
            let at = LineContext {
                file,
                line: index as u32 + 1,
                base_dir,
            };
            let mut tokens = raw_line.split_whitespace();
            let keyword = match tokens.next() {
                Some(keyword) => keyword,
                None => continue,
            };
            if keyword.starts_with('#') {
                continue;
            }
            let args: Vec<&str> = tokens.collect();
            match lookup(keyword) {
                Some(directive) => self.apply(directive, keyword, &args, &at)?,
                None => {
                    return Err(ParseError::UnknownDirective {
                        file: file.to_string(),
                        line: at.line,
                        directive: keyword.to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    fn apply(
        &mut self,
        directive: Directive,
        keyword: &str,
        args: &[&str],
        at: &LineContext,
    ) -> Result<(), ParseError> {
        match directive {
            Directive::MaterialLibrary => {
                if args.is_empty() {
                    return Err(bad_arity(at, keyword, "at least one argument"));
                }
                // Library names may contain spaces, so the whole argument
                // list is one file name, resolved next to the referencing
                // file rather than the process working directory.
                let library = at.base_dir.join(args.join(" "));
                self.parse_file(&library)
            }
            Directive::BeginObject => {
                if args.len() != 1 {
                    return Err(bad_arity(at, keyword, "one argument"));
                }
                self.begin_object(args[0]);
                Ok(())
            }
            Directive::BeginMaterial => {
                if args.len() != 1 {
                    return Err(bad_arity(at, keyword, "one argument"));
                }
                self.model
                    .materials
                    .insert(args[0].to_string(), Material::default());
                self.current_material = Some(args[0].to_string());
                Ok(())
            }
            Directive::SelectMaterial => {
                if args.len() != 1 {
                    return Err(bad_arity(at, keyword, "one argument"));
                }
                if !self.model.materials.contains_key(args[0]) {
                    return Err(ParseError::UndefinedMaterial {
                        file: at.file.to_string(),
                        line: at.line,
                        name: args[0].to_string(),
                    });
                }
                self.selected_material = Some(args[0].to_string());
                Ok(())
            }
            Directive::Position => {
                if args.len() != 3 {
                    return Err(bad_arity(at, keyword, "three arguments"));
                }
                let x = parse_float(args[0], at)?;
                let y = parse_float(args[1], at)?;
                let z = parse_float(args[2], at)?;
                self.model.positions.push([x, y, z]);
                Ok(())
            }
            Directive::Texcoord => {
                if args.len() != 2 && args.len() != 3 {
                    return Err(bad_arity(at, keyword, "two or three arguments"));
                }
                let u = parse_float(args[0], at)?;
                let v = parse_float(args[1], at)?;
                self.model.texcoords.push([u, v]);
                Ok(())
            }
            Directive::Color(slot) => {
                if args.len() != 3 {
                    return Err(bad_arity(at, keyword, "three arguments"));
                }
                let r = parse_float(args[0], at)?;
                let g = parse_float(args[1], at)?;
                let b = parse_float(args[2], at)?;
                let material = self.current_material_mut(at, keyword)?;
                material.colors.set(slot, [r, g, b]);
                Ok(())
            }
            Directive::ColorMap(slot) => {
                if args.len() != 1 {
                    return Err(bad_arity(at, keyword, "one argument"));
                }
                let map_path = at.base_dir.join(args[0]);
                let material = self.current_material_mut(at, keyword)?;
                material.maps.set(slot, map_path);
                Ok(())
            }
            Directive::Face => self.append_face(keyword, args, at),
            Directive::Ignored => Ok(()),
        }
    }

    /// Switches to `name`, creating it or resetting an existing object of
    /// the same name in place so it keeps its first-declaration position.
    fn begin_object(&mut self, name: &str) {
        if let Some(index) = self.model.object_index(name) {
            self.model.objects[index] = MeshObject::new(name);
            self.current_object = index;
        } else {
            self.model.objects.push(MeshObject::new(name));
            self.current_object = self.model.objects.len() - 1;
        }
    }

    fn current_material_mut(
        &mut self,
        at: &LineContext,
        directive: &str,
    ) -> Result<&mut Material, ParseError> {
        let missing = || ParseError::NoCurrentMaterial {
            file: at.file.to_string(),
            line: at.line,
            directive: directive.to_string(),
        };
        let name = self.current_material.as_ref().ok_or_else(missing)?;
        // `newmtl` inserts the entry when it sets `current_material`.
        self.model.materials.get_mut(name).ok_or_else(missing)
    }

    /// Appends a face, first splitting off a fresh object if the face does
    /// not match the collecting object's material or arity.
    fn append_face(
        &mut self,
        keyword: &str,
        args: &[&str],
        at: &LineContext,
    ) -> Result<(), ParseError> {
        if args.len() < 2 {
            return Err(bad_arity(at, keyword, "at least two vertex references"));
        }
        let mut vertices = Vec::with_capacity(args.len());
        for token in args {
            vertices.push(parse_vertex_ref(token, at)?);
        }
        let arity = vertices.len();

        let current = &self.model.objects[self.current_object];
        let material_differs =
            current.material.is_some() && current.material != self.selected_material;
        let arity_differs = current.arity.is_some() && current.arity != Some(arity);
        if material_differs || arity_differs {
            let split_name = format!("{}_{}", current.name, at.line);
            log::debug!(
                "object '{}' is not homogeneous at {}:{}, continuing as '{}'",
                current.name,
                at.file,
                at.line,
                split_name
            );
            self.begin_object(&split_name);
        }

        let object = &mut self.model.objects[self.current_object];
        object.arity = Some(arity);
        if object.material.is_none() {
            object.material = self.selected_material.clone();
        }
        object.faces.push(Face { vertices });
        Ok(())
    }
}

/// Parses `path` and every material library it references into a
/// [`SceneModel`].
///
/// The model starts with a stub object named after the file itself, which
/// collects any faces declared before the first `o`/`g` directive.
pub fn parse_scene(path: &Path) -> Result<SceneModel, ParseError> {
    let mut parser = Parser::new(&file_label(path));
    parser.parse_file(path)?;
    log::info!(
        "parsed '{}': {} positions, {} texture coordinates, {} materials, {} objects",
        path.display(),
        parser.model.positions.len(),
        parser.model.texcoords.len(),
        parser.model.materials.len(),
        parser.model.objects.len()
    );
    Ok(parser.model)
}
