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

//! Symbol-name sanitation for emitted declarations.

/// Rewrites `name` so it can be spliced into a C declaration, replacing
/// every character outside `[A-Za-z0-9]` with an underscore.
///
/// The result may still start with a digit, so callers must only use it
/// as a suffix behind a fixed prefix (`tex_`, `obj_`, ...).
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_separators_and_punctuation() {
        assert_eq!(sanitize("My Object.001"), "My_Object_001");
        assert_eq!(sanitize("crate-16.png"), "crate_16_png");
    }

    #[test]
    fn keeps_plain_identifiers_untouched() {
        assert_eq!(sanitize("cube"), "cube");
        assert_eq!(sanitize("Wall_2"), "Wall_2");
    }

    #[test]
    fn maps_non_ascii_to_underscores() {
        assert_eq!(sanitize("décor"), "d_cor");
        assert_eq!(sanitize(""), "");
    }
}
