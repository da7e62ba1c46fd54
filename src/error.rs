//! Error types for archviz

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Edge {index} ({from} -> {to}) references unknown node '{missing}'")]
    UnknownNode {
        index: usize,
        from: String,
        to: String,
        missing: String,
    },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Duplicate node identifier: {0}")]
    DuplicateNode(String),

    #[error("Node '{id}' has a non-finite position ({x}, {y})")]
    InvalidPosition { id: String, x: f64, y: f64 },

    #[error("Node '{id}' has marker size {size}: must be a positive number")]
    InvalidSize { id: String, size: f64 },

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Unknown marker symbol: {0}")]
    UnknownSymbol(String),

    #[error("Invalid {axis} axis range [{min}, {max}]: min must be below max")]
    InvalidRange { axis: char, min: f64, max: f64 },

    #[error("Unsupported output format '{0}' (expected .png or .svg)")]
    UnsupportedFormat(String),

    #[error("Render error: {0}")]
    Render(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Template error: {0}")]
    Template(#[from] tera::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
