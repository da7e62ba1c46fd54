//! archviz - Architecture diagrams and deployment kits
//!
//! Renders static architecture diagrams to PNG/SVG and generates the
//! deployment files for a multi-service web application.

pub mod config;
pub mod diagram;
pub mod error;
pub mod scaffold;

// Re-export commonly used types
pub use config::{Config, DiagramConfig, ScaffoldConfig};
pub use diagram::{
    arrow_placement, legend_entries, write_image, ArrowPlacement, Canvas, Diagram, DiagramTheme,
    Edge, MarkerSymbol, Node, Point, SvgRenderer,
};
pub use error::{Error, Result};
