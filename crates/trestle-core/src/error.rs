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

//! Defines the hierarchy of error types for the conversion pipeline.

use std::fmt;

/// An error raised while interpreting a scene or material source file.
///
/// Parsing is fail-fast: the first malformed line aborts the run, and the
/// message carries the offending file and 1-based line number.
#[derive(Debug)]
pub enum ParseError {
    /// The first token of a line is not a recognized directive.
    UnknownDirective {
        /// The file being parsed when the error occurred.
        file: String,
        /// The 1-based line number of the offending line.
        line: u32,
        /// The unrecognized leading token.
        directive: String,
    },
    /// A directive received the wrong number of arguments.
    BadArity {
        /// The file being parsed when the error occurred.
        file: String,
        /// The 1-based line number of the offending line.
        line: u32,
        /// The directive keyword.
        directive: String,
        /// A short phrase describing the accepted argument count.
        expected: &'static str,
    },
    /// A token that should be numeric failed to parse.
    InvalidNumber {
        /// The file being parsed when the error occurred.
        file: String,
        /// The 1-based line number of the offending line.
        line: u32,
        /// The token that could not be parsed.
        token: String,
    },
    /// A color or map directive arrived before any material was declared.
    NoCurrentMaterial {
        /// The file being parsed when the error occurred.
        file: String,
        /// The 1-based line number of the offending line.
        line: u32,
        /// The directive keyword.
        directive: String,
    },
    /// A material selection named a material that was never declared.
    UndefinedMaterial {
        /// The file being parsed when the error occurred.
        file: String,
        /// The 1-based line number of the offending line.
        line: u32,
        /// The selected material name.
        name: String,
    },
    /// A scene source or material library file could not be read.
    Io {
        /// The path that failed to open or read.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnknownDirective {
                file,
                line,
                directive,
            } => {
                write!(f, "{file}:{line}: unknown directive '{directive}'")
            }
            ParseError::BadArity {
                file,
                line,
                directive,
                expected,
            } => {
                write!(f, "{file}:{line}: '{directive}' expects {expected}")
            }
            ParseError::InvalidNumber { file, line, token } => {
                write!(f, "{file}:{line}: invalid numeric token '{token}'")
            }
            ParseError::NoCurrentMaterial {
                file,
                line,
                directive,
            } => {
                write!(f, "{file}:{line}: '{directive}' before any 'newmtl'")
            }
            ParseError::UndefinedMaterial { file, line, name } => {
                write!(f, "{file}:{line}: material '{name}' is not defined")
            }
            ParseError::Io { path, source } => {
                write!(f, "failed to read '{path}': {source}")
            }
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// A constraint violation found while mapping a parsed scene onto the
/// fixed-function output format.
#[derive(Debug)]
pub enum ModelError {
    /// An object's faces do not share one of the drawable arities.
    MixedTopology {
        /// The name of the offending object.
        object: String,
    },
    /// An object selects a material that the parsed scene does not contain.
    MissingMaterial {
        /// The name of the offending object.
        object: String,
        /// The selected material name.
        material: String,
    },
    /// An untextured object's material never declared a diffuse color.
    MissingDiffuseColor {
        /// The name of the offending object.
        object: String,
        /// The material missing its diffuse color.
        material: String,
    },
    /// A face references a position outside the parsed pool.
    PositionOutOfRange {
        /// The name of the offending object.
        object: String,
        /// The 1-based index the face asked for.
        index: u32,
        /// The number of positions actually parsed.
        count: usize,
    },
    /// A face references a texture coordinate outside the parsed pool.
    TexcoordOutOfRange {
        /// The name of the offending object.
        object: String,
        /// The 1-based index the face asked for.
        index: u32,
        /// The number of texture coordinates actually parsed.
        count: usize,
    },
}

impl fmt::Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::MixedTopology { object } => {
                write!(
                    f,
                    "object '{object}' mixes face sizes; only all-triangle, all-quad or all-line objects are drawable"
                )
            }
            ModelError::MissingMaterial { object, material } => {
                write!(
                    f,
                    "object '{object}' uses material '{material}' which is not in the scene"
                )
            }
            ModelError::MissingDiffuseColor { object, material } => {
                write!(
                    f,
                    "object '{object}' is untextured but material '{material}' declares no diffuse color"
                )
            }
            ModelError::PositionOutOfRange {
                object,
                index,
                count,
            } => {
                write!(
                    f,
                    "object '{object}' references position {index} but only {count} were parsed"
                )
            }
            ModelError::TexcoordOutOfRange {
                object,
                index,
                count,
            } => {
                write!(
                    f,
                    "object '{object}' references texture coordinate {index} but only {count} were parsed"
                )
            }
        }
    }
}

impl std::error::Error for ModelError {}

/// A top-level error covering every way a conversion can fail.
#[derive(Debug)]
pub enum ConvertError {
    /// A source file failed to parse.
    Parse(ParseError),
    /// The parsed scene violates a constraint of the output format.
    Model(ModelError),
    /// A referenced texture image could not be loaded or decoded.
    Texture {
        /// The path of the image that failed.
        path: String,
        /// The underlying decoder or I/O error.
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ConvertError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConvertError::Parse(err) => {
                write!(f, "scene parsing failed: {err}")
            }
            ConvertError::Model(err) => {
                write!(f, "scene validation failed: {err}")
            }
            ConvertError::Texture { path, source } => {
                write!(f, "failed to load texture '{path}': {source}")
            }
        }
    }
}

impl std::error::Error for ConvertError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConvertError::Parse(err) => Some(err),
            ConvertError::Model(err) => Some(err),
            ConvertError::Texture { source, .. } => Some(source.as_ref()),
        }
    }
}

impl From<ParseError> for ConvertError {
    fn from(err: ParseError) -> Self {
        ConvertError::Parse(err)
    }
}

impl From<ModelError> for ConvertError {
    fn from(err: ModelError) -> Self {
        ConvertError::Model(err)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn parse_error_display() {
        let err = ParseError::UnknownDirective {
            file: "cube.obj".to_string(),
            line: 12,
            directive: "fx".to_string(),
        };
        assert_eq!(format!("{err}"), "cube.obj:12: unknown directive 'fx'");

        let err_arity = ParseError::BadArity {
            file: "cube.obj".to_string(),
            line: 3,
            directive: "v".to_string(),
            expected: "three arguments",
        };
        assert_eq!(format!("{err_arity}"), "cube.obj:3: 'v' expects three arguments");
    }

    #[test]
    fn parse_error_io_carries_source() {
        let err = ParseError::Io {
            path: "missing.mtl".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(format!("{err}"), "failed to read 'missing.mtl': no such file");
        assert!(err.source().is_some());
    }

    #[test]
    fn model_error_display() {
        let err = ModelError::MissingDiffuseColor {
            object: "hull".to_string(),
            material: "steel".to_string(),
        };
        assert_eq!(
            format!("{err}"),
            "object 'hull' is untextured but material 'steel' declares no diffuse color"
        );
    }

    #[test]
    fn convert_error_display_wrapping_parse_error() {
        let parse_err = ParseError::InvalidNumber {
            file: "cube.obj".to_string(),
            line: 4,
            token: "1.x".to_string(),
        };
        let err: ConvertError = parse_err.into();
        assert_eq!(
            format!("{err}"),
            "scene parsing failed: cube.obj:4: invalid numeric token '1.x'"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn convert_error_display_wrapping_model_error() {
        let model_err = ModelError::MixedTopology {
            object: "hull_7".to_string(),
        };
        let err: ConvertError = model_err.into();
        assert_eq!(
            format!("{err}"),
            "scene validation failed: object 'hull_7' mixes face sizes; only all-triangle, all-quad or all-line objects are drawable"
        );
        assert!(err.source().is_some());
    }
}
