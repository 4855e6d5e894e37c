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

//! Scene converter: one scene source in, one header of draw tables out.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Converts a scene description and its material libraries into a C++
/// header of compile-time constant draw tables.
#[derive(Parser)]
#[command(name = "trestle-mesh", version)]
struct Args {
    /// Scene source file to convert.
    input: PathBuf,

    /// Output header; defaults to the input with its extension swapped to `.h`.
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let output = args
        .output
        .unwrap_or_else(|| args.input.with_extension("h"));

    let header = trestle_core::emit::generate_mesh_header(&args.input)?;
    fs::write(&output, header)
        .with_context(|| format!("Failed to write output header to '{}'", output.display()))?;
    log::info!("wrote '{}'", output.display());
    Ok(())
}
