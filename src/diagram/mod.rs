//! Architecture Diagram Rendering
//!
//! Static directed-graph diagrams rendered to SVG or PNG:
//! - Nodes as colored, outlined markers with centered labels
//! - Edges as lines with arrowheads backed off from the destination
//! - A legend with one entry per node category
//! - Built-in presets and TOML diagram files

pub mod export;
pub mod geometry;
pub mod graph;
pub mod legend;
pub mod preset;
pub mod source;
pub mod svg;
pub mod theme;

pub use export::{rasterize, write_image, ImageFormat};
pub use geometry::{arrow_placement, ArrowPlacement, AxisRange, Point, Viewport, ARROW_OFFSET};
pub use graph::{Diagram, DiagramBuilder, Edge, MarkerSymbol, Node};
pub use legend::{legend_entries, legend_flags, LegendEntry};
pub use source::{parse_file, parse_string};
pub use svg::{Canvas, SvgRenderer};
pub use theme::{Color, DiagramTheme};
