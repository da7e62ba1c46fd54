//! Diagram Files
//!
//! Loads a diagram from TOML:
//!
//! ```toml
//! title = "My Stack"
//!
//! [axes]
//! x = [-0.5, 5.5]
//! y = [1.0, 10.0]
//!
//! [[nodes]]
//! id = "web"
//! position = [2.0, 7.0]
//! color = "#FFC185"
//! size = 30
//! symbol = "square"
//! category = "Web Service"
//!
//! [[edges]]
//! from = "web"
//! to = "db"
//! ```
//!
//! Files go through the same validation as diagrams built in code.

use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use super::geometry::AxisRange;
use super::graph::{Diagram, Edge, Node};
use crate::error::Result;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DiagramFile {
    title: Option<String>,
    #[serde(default)]
    axes: Axes,
    #[serde(default)]
    nodes: Vec<Node>,
    #[serde(default)]
    edges: Vec<Edge>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct Axes {
    x: Option<AxisRange>,
    y: Option<AxisRange>,
}

/// Parse a diagram file
pub fn parse_file(path: &Path) -> Result<Diagram> {
    let content = std::fs::read_to_string(path)?;
    debug!("Parsing diagram file {}", path.display());
    parse_string(&content)
}

/// Parse diagram TOML source
pub fn parse_string(source: &str) -> Result<Diagram> {
    let file: DiagramFile = toml::from_str(source)?;

    let mut builder = Diagram::builder();
    if let Some(title) = file.title {
        builder.title(title);
    }
    if let Some(x) = file.axes.x {
        builder.x_range(x);
    }
    if let Some(y) = file.axes.y {
        builder.y_range(y);
    }
    for node in file.nodes {
        builder.add_node(node);
    }
    for edge in file.edges {
        builder.add_edge(edge);
    }

    builder.build()
}
