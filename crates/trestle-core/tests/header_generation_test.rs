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

use anyhow::Result;
use std::fs;
use tempfile::tempdir;
use trestle_core::emit::generate_mesh_header;

#[test]
fn test_generate_header_from_scene_with_materials_and_texture() -> Result<()> {
    // --- 1. Setup: Create a REAL scene on disk ---
    let dir = tempdir()?;

    let mut img = image::RgbImage::new(2, 2);
    img.put_pixel(0, 0, image::Rgb([255, 0, 0]));
    img.put_pixel(1, 0, image::Rgb([0, 255, 0]));
    img.put_pixel(0, 1, image::Rgb([0, 0, 255]));
    img.put_pixel(1, 1, image::Rgb([255, 255, 255]));
    img.save(dir.path().join("crate.png"))?;

    fs::write(
        dir.path().join("cube.mtl"),
        "newmtl boxside\n\
         Kd 0.8 0.2 0.2\n\
         map_Kd crate.png\n\
         \n\
         newmtl flat\n\
         Kd 0.0 1.0 0.0\n",
    )?;

    let obj_path = dir.path().join("cube.obj");
    fs::write(
        &obj_path,
        "mtllib cube.mtl\n\
         o lid\n\
         v 0 0 0\n\
         v 1 0 0\n\
         v 1 1 0\n\
         v 0 1 0\n\
         vt 0 0\n\
         vt 1 0\n\
         vt 1 1\n\
         vt 0 1\n\
         usemtl boxside\n\
         f 1/1 2/2 3/3 4/4\n\
         o rim\n\
         usemtl flat\n\
         l 1 2\n",
    )?;

    // --- 2. Convert ---
    let header = generate_mesh_header(&obj_path)?;

    // --- 3. Assert: Every table made it out, in order ---
    assert!(header.starts_with("// Generated from cube.obj by trestle-mesh\n"));
    assert!(header.contains("#include \"gldrawarray.h\""));
    assert!(header.contains("struct ngl_object {"));

    assert_eq!(header.matches("COLOR texdata_crate[]").count(), 1);
    assert!(header.contains("constexpr const TEXTURE tex_crate"));
    assert!(
        header.find("COLOR texdata_crate[]").unwrap()
            < header.find("static const VECTOR3 positions_cube_obj[]").unwrap()
    );

    // The textured quad: texel-space coordinates, color slot zeroed.
    assert!(header.contains("const IndexedVertex vertices_lid[4]"));
    assert!(header.contains("{0, 0.000f, 2.000f, 0x0000}"));
    assert!(header.contains("{2, 2.000f, 0.000f, 0x0000}"));
    assert!(header.contains("GL_QUADS"));
    assert!(header.contains("&tex_crate"));

    // The untextured line pair carries its quantized diffuse color.
    assert!(header.contains("const IndexedVertex vertices_rim[2]"));
    assert!(header.contains("{0, 0.000f, 0.000f, 0x07e0}"));
    assert!(header.contains("GL_LINES"));

    // The stub object collected no faces, so only the two real objects
    // appear in the trailing index.
    assert!(header.ends_with(
        "const ngl_object *objs_cube_obj[] = {\n    &obj_lid,\n    &obj_rim,\n};\n"
    ));

    println!("Integration test passed: full scene converted into one header.");
    Ok(())
}

#[test]
fn test_texture_maps_resolve_relative_to_their_material_library() -> Result<()> {
    // --- 1. Setup: library and texture live in a subdirectory ---
    let dir = tempdir()?;
    fs::create_dir_all(dir.path().join("lib/tex"))?;

    let mut img = image::RgbImage::new(1, 1);
    img.put_pixel(0, 0, image::Rgb([255, 255, 255]));
    img.save(dir.path().join("lib/tex/brick.png"))?;

    fs::write(
        dir.path().join("lib/mats.mtl"),
        "newmtl wall\nmap_Kd tex/brick.png\n",
    )?;

    let obj_path = dir.path().join("scene.obj");
    fs::write(
        &obj_path,
        "mtllib lib/mats.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl wall\nf 1 2 3\n",
    )?;

    // --- 2. Convert: the map path must be joined to the library's own
    // directory, not the process working directory ---
    let header = generate_mesh_header(&obj_path)?;

    assert!(header.contains("COLOR texdata_brick[]"));
    assert!(header.contains("&tex_brick"));
    Ok(())
}

#[test]
fn test_parse_failures_carry_file_and_line() -> Result<()> {
    let dir = tempdir()?;
    let obj_path = dir.path().join("scene.obj");
    fs::write(&obj_path, "v 0 0 0\nfx 1 2\n")?;

    let err = generate_mesh_header(&obj_path).unwrap_err();
    assert!(format!("{err}").contains("scene.obj:2: unknown directive 'fx'"));
    Ok(())
}

#[test]
fn test_missing_material_library_is_an_error() -> Result<()> {
    let dir = tempdir()?;
    let obj_path = dir.path().join("scene.obj");
    fs::write(&obj_path, "mtllib nothere.mtl\n")?;

    let err = generate_mesh_header(&obj_path).unwrap_err();
    assert!(format!("{err}").contains("nothere.mtl"));
    Ok(())
}

#[test]
fn test_missing_texture_image_is_an_error() -> Result<()> {
    let dir = tempdir()?;
    fs::write(
        dir.path().join("m.mtl"),
        "newmtl wall\nmap_Kd gone.png\n",
    )?;
    let obj_path = dir.path().join("scene.obj");
    fs::write(
        &obj_path,
        "mtllib m.mtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nusemtl wall\nf 1 2 3\n",
    )?;

    let err = generate_mesh_header(&obj_path).unwrap_err();
    assert!(format!("{err}").contains("gone.png"));
    Ok(())
}
