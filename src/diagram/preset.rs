//! Built-in diagrams

use super::geometry::{AxisRange, Point};
use super::graph::{Diagram, Edge, MarkerSymbol, Node};
use super::theme::Color;
use crate::error::Result;

pub const SIM_STUDIO_TITLE: &str = "Sim Studio Architecture";

/// Default output path for the built-in diagram
pub const SIM_STUDIO_OUTPUT: &str = "sim_studio_architecture.png";

/// Sim Studio deployment: web app, realtime server, database, disk,
/// four model providers, plus the config and health-check sidecars.
pub fn sim_studio() -> Result<Diagram> {
    let nodes = [
        ("Users", 2.0, 9.0, "#1FB8CD", 25.0, MarkerSymbol::Circle, "External"),
        ("simstudio", 2.0, 7.0, "#FFC185", 30.0, MarkerSymbol::Square, "Web Service"),
        ("realtime-server", 0.5, 5.0, "#ECEBD5", 25.0, MarkerSymbol::Square, "Private Svc"),
        ("simstudio-db", 3.5, 5.0, "#5D878F", 25.0, MarkerSymbol::Diamond, "Database"),
        ("simstudio-disk", 2.0, 5.0, "#D2BA4C", 20.0, MarkerSymbol::Hexagon, "Storage"),
        ("OpenAI", 0.5, 2.0, "#B4413C", 15.0, MarkerSymbol::Circle, "AI API"),
        ("Anthropic", 1.5, 2.0, "#964325", 15.0, MarkerSymbol::Circle, "AI API"),
        ("Google AI", 2.5, 2.0, "#944454", 15.0, MarkerSymbol::Circle, "AI API"),
        ("DeepSeek", 3.5, 2.0, "#13343B", 15.0, MarkerSymbol::Circle, "AI API"),
        ("Env Vars", 4.5, 7.0, "#DB4545", 20.0, MarkerSymbol::TriangleUp, "Config"),
        ("Health Check", 4.5, 5.0, "#1FB8CD", 20.0, MarkerSymbol::Star, "Monitor"),
    ];

    let edges = [
        ("Users", "simstudio"),
        ("simstudio", "realtime-server"),
        ("simstudio", "simstudio-db"),
        ("realtime-server", "simstudio-db"),
        ("simstudio", "simstudio-disk"),
        ("simstudio", "OpenAI"),
        ("simstudio", "Anthropic"),
        ("simstudio", "Google AI"),
        ("simstudio", "DeepSeek"),
        ("Env Vars", "simstudio"),
        ("Env Vars", "realtime-server"),
        ("Health Check", "simstudio"),
        ("Health Check", "realtime-server"),
    ];

    let mut builder = Diagram::builder();
    builder
        .title(SIM_STUDIO_TITLE)
        .x_range(AxisRange::new(-0.5, 5.5))
        .y_range(AxisRange::new(1.0, 10.0));

    for (id, x, y, color, size, symbol, category) in nodes {
        builder.add_node(
            Node::new(id, Point::new(x, y))
                .with_color(color.parse::<Color>()?)
                .with_size(size)
                .with_symbol(symbol)
                .in_category(category),
        );
    }
    for (from, to) in edges {
        builder.add_edge(Edge::new(from, to));
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::legend::legend_entries;

    #[test]
    fn test_sim_studio_shape() {
        let diagram = sim_studio().unwrap();
        assert_eq!(diagram.nodes().len(), 11);
        assert_eq!(diagram.edges().len(), 13);
        assert_eq!(diagram.title(), Some(SIM_STUDIO_TITLE));
    }

    #[test]
    fn test_sim_studio_legend() {
        let diagram = sim_studio().unwrap();
        let categories: Vec<_> = legend_entries(diagram.nodes())
            .iter()
            .map(|e| e.category)
            .collect();
        assert_eq!(
            categories,
            [
                "External",
                "Web Service",
                "Private Svc",
                "Database",
                "Storage",
                "AI API",
                "Config",
                "Monitor"
            ]
        );
    }
}
