//! Diagram Data Structures
//!
//! Nodes, edges and the validated, immutable [`Diagram`] they form.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use tracing::debug;

use super::geometry::{AxisRange, Point};
use super::theme::Color;
use crate::error::{Error, Result};

/// Marker shapes a node can be drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MarkerSymbol {
    #[default]
    Circle,
    Square,
    Diamond,
    Hexagon,
    TriangleUp,
    Star,
}

impl MarkerSymbol {
    pub fn name(&self) -> &'static str {
        match self {
            MarkerSymbol::Circle => "circle",
            MarkerSymbol::Square => "square",
            MarkerSymbol::Diamond => "diamond",
            MarkerSymbol::Hexagon => "hexagon",
            MarkerSymbol::TriangleUp => "triangle-up",
            MarkerSymbol::Star => "star",
        }
    }

    pub fn all() -> &'static [MarkerSymbol] {
        &[
            MarkerSymbol::Circle,
            MarkerSymbol::Square,
            MarkerSymbol::Diamond,
            MarkerSymbol::Hexagon,
            MarkerSymbol::TriangleUp,
            MarkerSymbol::Star,
        ]
    }
}

impl FromStr for MarkerSymbol {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        MarkerSymbol::all()
            .iter()
            .copied()
            .find(|m| m.name() == wanted)
            .ok_or_else(|| Error::UnknownSymbol(s.to_string()))
    }
}

/// A labeled point representing one architectural element
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier, also drawn as the node label
    pub id: String,

    pub position: Point,

    pub color: Color,

    /// Marker diameter in pixels
    #[serde(default = "default_marker_size")]
    pub size: f64,

    #[serde(default)]
    pub symbol: MarkerSymbol,

    /// Legend group
    pub category: String,
}

fn default_marker_size() -> f64 {
    20.0
}

impl Node {
    /// Create a node with default display attributes
    pub fn new(id: impl Into<String>, position: Point) -> Self {
        Self {
            id: id.into(),
            position,
            color: Color::rgb(0x1f, 0xb8, 0xcd),
            size: default_marker_size(),
            symbol: MarkerSymbol::Circle,
            category: String::new(),
        }
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn with_symbol(mut self, symbol: MarkerSymbol) -> Self {
        self.symbol = symbol;
        self
    }

    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Reject positions and sizes that cannot be drawn
    pub fn validate(&self) -> Result<()> {
        let Point { x, y } = self.position;
        if !(x.is_finite() && y.is_finite()) {
            return Err(Error::InvalidPosition {
                id: self.id.clone(),
                x,
                y,
            });
        }
        if !(self.size.is_finite() && self.size > 0.0) {
            return Err(Error::InvalidSize {
                id: self.id.clone(),
                size: self.size,
            });
        }
        Ok(())
    }
}

/// A directed relationship between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from: String,
    pub to: String,
}

impl Edge {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A validated diagram.
///
/// Every edge endpoint is guaranteed to name a declared node, and node
/// order is declaration order.
#[derive(Debug, Clone)]
pub struct Diagram {
    title: Option<String>,
    nodes: Vec<Node>,
    index: HashMap<String, usize>,
    edges: Vec<Edge>,
    x_range: AxisRange,
    y_range: AxisRange,
}

impl Diagram {
    pub fn builder() -> DiagramBuilder {
        DiagramBuilder::default()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Nodes in declaration order
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn x_range(&self) -> AxisRange {
        self.x_range
    }

    pub fn y_range(&self) -> AxisRange {
        self.y_range
    }

    /// Look up a node by identifier
    pub fn node(&self, id: &str) -> Result<&Node> {
        self.index
            .get(id)
            .map(|&i| &self.nodes[i])
            .ok_or_else(|| Error::NodeNotFound(id.to_string()))
    }

    /// Source and destination nodes of an edge
    pub fn endpoints(&self, edge: &Edge) -> Result<(&Node, &Node)> {
        Ok((self.node(&edge.from)?, self.node(&edge.to)?))
    }
}

/// Collects nodes and edges, then validates them into a [`Diagram`]
#[derive(Debug, Clone, Default)]
pub struct DiagramBuilder {
    title: Option<String>,
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    x_range: Option<AxisRange>,
    y_range: Option<AxisRange>,
}

impl DiagramBuilder {
    pub fn title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = Some(title.into());
        self
    }

    pub fn x_range(&mut self, range: AxisRange) -> &mut Self {
        self.x_range = Some(range);
        self
    }

    pub fn y_range(&mut self, range: AxisRange) -> &mut Self {
        self.y_range = Some(range);
        self
    }

    pub fn add_node(&mut self, node: Node) -> &mut Self {
        self.nodes.push(node);
        self
    }

    pub fn add_edge(&mut self, edge: Edge) -> &mut Self {
        self.edges.push(edge);
        self
    }

    /// Validate and freeze.
    ///
    /// Fails on duplicate node identifiers, non-finite positions,
    /// non-positive marker sizes, edges naming undeclared nodes and empty
    /// or inverted axis ranges. Missing ranges are derived from
    /// the node extents with half a unit of padding.
    pub fn build(&self) -> Result<Diagram> {
        let mut index = HashMap::with_capacity(self.nodes.len());
        for (i, node) in self.nodes.iter().enumerate() {
            if index.insert(node.id.clone(), i).is_some() {
                return Err(Error::DuplicateNode(node.id.clone()));
            }
            node.validate()?;
        }

        for (i, edge) in self.edges.iter().enumerate() {
            for endpoint in [&edge.from, &edge.to] {
                if !index.contains_key(endpoint.as_str()) {
                    return Err(Error::UnknownNode {
                        index: i,
                        from: edge.from.clone(),
                        to: edge.to.clone(),
                        missing: endpoint.clone(),
                    });
                }
            }
        }

        let x_range = self
            .x_range
            .unwrap_or_else(|| padded_extent(self.nodes.iter().map(|n| n.position.x)));
        let y_range = self
            .y_range
            .unwrap_or_else(|| padded_extent(self.nodes.iter().map(|n| n.position.y)));
        x_range.validate('x')?;
        y_range.validate('y')?;

        debug!(
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "diagram validated"
        );

        Ok(Diagram {
            title: self.title.clone(),
            nodes: self.nodes.clone(),
            index,
            edges: self.edges.clone(),
            x_range,
            y_range,
        })
    }
}

fn padded_extent(values: impl Iterator<Item = f64>) -> AxisRange {
    let (min, max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if min <= max {
        AxisRange::new(min - 0.5, max + 0.5)
    } else {
        AxisRange::new(0.0, 1.0)
    }
}
