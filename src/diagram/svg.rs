//! SVG Diagram Renderer
//!
//! Paints a validated [`Diagram`] onto a fixed-size canvas:
//! - edges first, as a line plus a rotated triangular arrowhead
//! - nodes on top, as outlined markers with their identifier centered
//! - a horizontal legend above the plot area, one entry per category
//! - the title in the top margin
//!
//! The top margin grows when the legend wraps, pushing the plot area down
//! so every legend row stays between the title and the plot.
//!
//! There are no gridlines, tick labels or zero lines.

use tracing::debug;

use super::geometry::{arrow_placement, PixelRect, Point, Viewport};
use super::graph::{Diagram, MarkerSymbol, Node};
use super::legend::{layout_rows, legend_entries, LegendEntry, LegendSlot};
use super::theme::{Color, DiagramTheme};
use crate::error::Result;

/// Blank space between the canvas edge and the plot area
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Margin {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Output canvas dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(700.0, 500.0)
    }
}

impl Canvas {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: Margin {
                left: 80.0,
                right: 80.0,
                top: 100.0,
                bottom: 80.0,
            },
        }
    }

    pub fn plot_area(&self) -> PixelRect {
        PixelRect {
            left: self.margin.left,
            top: self.margin.top,
            width: (self.width - self.margin.left - self.margin.right).max(1.0),
            height: (self.height - self.margin.top - self.margin.bottom).max(1.0),
        }
    }
}

/// Wrapped legend rows for one render
struct LegendLayout {
    slots: Vec<LegendSlot>,
    row_widths: Vec<f64>,
    row_height: f64,
}

impl LegendLayout {
    fn height(&self) -> f64 {
        self.row_widths.len() as f64 * self.row_height
    }
}

/// Renders diagrams to SVG markup
#[derive(Debug, Clone, Default)]
pub struct SvgRenderer {
    pub theme: DiagramTheme,
    pub canvas: Canvas,
}

impl SvgRenderer {
    pub fn new(theme: DiagramTheme, canvas: Canvas) -> Self {
        Self { theme, canvas }
    }

    /// Data-to-pixel mapping for a diagram on this canvas
    pub fn viewport(&self, diagram: &Diagram) -> Viewport {
        let entries = legend_entries(diagram.nodes());
        let legend = self.legend_layout(&entries);
        self.viewport_with(diagram, &legend)
    }

    fn viewport_with(&self, diagram: &Diagram, legend: &LegendLayout) -> Viewport {
        Viewport {
            x_range: diagram.x_range(),
            y_range: diagram.y_range(),
            plot: self.plot_area(legend),
        }
    }

    /// Vertical space reserved for the title, above the legend
    pub fn title_band(&self) -> f64 {
        self.theme.title_font_size * 2.5
    }

    fn legend_gap(&self) -> f64 {
        self.canvas.plot_area().height * 0.05
    }

    /// Canvas plot area with the top margin grown to fit the title band,
    /// the legend rows and the gap below them
    fn plot_area(&self, legend: &LegendLayout) -> PixelRect {
        let base = self.canvas.plot_area();
        let needed = self.title_band() + legend.height() + self.legend_gap();
        let top = base.top.max(needed);
        PixelRect {
            top,
            height: (base.bottom() - top).max(1.0),
            ..base
        }
    }

    fn legend_layout(&self, entries: &[LegendEntry<'_>]) -> LegendLayout {
        let font = self.theme.legend_font_size;
        let marker = self.theme.legend_marker_size;

        let widths: Vec<f64> = entries
            .iter()
            .map(|e| marker + 12.0 + estimate_text_width(e.category, font) + 16.0)
            .collect();
        let (slots, row_widths) = layout_rows(&widths, self.canvas.width - 20.0);

        LegendLayout {
            slots,
            row_widths,
            row_height: font.max(marker) * 1.6,
        }
    }

    /// Render the whole diagram to an SVG document
    pub fn render(&self, diagram: &Diagram) -> Result<String> {
        let entries = legend_entries(diagram.nodes());
        let legend = self.legend_layout(&entries);
        let viewport = self.viewport_with(diagram, &legend);
        let mut svg = String::new();

        svg.push_str(&format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = fmt_num(self.canvas.width),
            h = fmt_num(self.canvas.height),
        ));
        svg.push_str(&format!(
            "  <rect x=\"0\" y=\"0\" width=\"100%\" height=\"100%\" fill=\"{}\"/>\n",
            self.theme.background
        ));

        svg.push_str("  <g class=\"edges\">\n");
        for edge in diagram.edges() {
            let (from, to) = diagram.endpoints(edge)?;
            self.draw_edge(&mut svg, &viewport, from.position, to.position);
        }
        svg.push_str("  </g>\n");

        svg.push_str("  <g class=\"nodes\">\n");
        for node in diagram.nodes() {
            self.draw_node(&mut svg, &viewport, node);
        }
        svg.push_str("  </g>\n");

        self.draw_legend(&mut svg, &entries, &legend, &viewport.plot);

        if let Some(title) = diagram.title() {
            self.draw_title(&mut svg, title);
        }

        svg.push_str("</svg>\n");

        debug!(
            edges = diagram.edges().len(),
            nodes = diagram.nodes().len(),
            legend = entries.len(),
            bytes = svg.len(),
            "rendered svg"
        );
        Ok(svg)
    }

    /// Draw an edge line and its arrowhead
    fn draw_edge(&self, svg: &mut String, viewport: &Viewport, from: Point, to: Point) {
        let color = self.theme.edge_color;
        let (x1, y1) = viewport.to_pixel(from);
        let (x2, y2) = viewport.to_pixel(to);

        svg.push_str(&format!(
            "    <line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            fmt_num(x1),
            fmt_num(y1),
            fmt_num(x2),
            fmt_num(y2),
            color,
            fmt_num(self.theme.edge_width),
        ));

        let arrow = arrow_placement(from, to);
        let (ax, ay) = viewport.to_pixel(arrow.position);

        // Axes are scaled independently, so orient by the on-screen
        // direction of the segment. Degenerate edges keep the placement's
        // zero rotation.
        let screen_angle = if (x2 - x1).abs() > f64::EPSILON || (y2 - y1).abs() > f64::EPSILON {
            (y1 - y2).atan2(x2 - x1).to_degrees()
        } else {
            arrow.angle_deg
        };

        // triangle-up points at +90 degrees; SVG rotates clockwise
        let rotation = 90.0 - screen_angle;
        svg.push_str(&format!(
            "    <path d=\"{}\" transform=\"translate({} {}) rotate({})\" fill=\"{}\"/>\n",
            marker_path(MarkerSymbol::TriangleUp, 0.0, 0.0, self.theme.arrow_size),
            fmt_num(ax),
            fmt_num(ay),
            fmt_num(rotation),
            color,
        ));
    }

    /// Draw a node marker and its centered label
    fn draw_node(&self, svg: &mut String, viewport: &Viewport, node: &Node) {
        let (cx, cy) = viewport.to_pixel(node.position);

        svg.push_str(&format!(
            "    <path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>\n",
            marker_path(node.symbol, cx, cy, node.size),
            node.color,
            self.theme.node_outline,
            fmt_num(self.theme.node_outline_width),
        ));
        self.push_text(
            svg,
            cx,
            cy,
            &node.id,
            self.theme.label_size,
            self.theme.label_color,
            "middle",
        );
    }

    /// Draw the horizontal legend above the plot area
    fn draw_legend(
        &self,
        svg: &mut String,
        entries: &[LegendEntry<'_>],
        layout: &LegendLayout,
        plot: &PixelRect,
    ) {
        if entries.is_empty() {
            return;
        }

        let font = self.theme.legend_font_size;
        let marker = self.theme.legend_marker_size;

        // Bottom row sits just above the plot area
        let top = plot.top - self.legend_gap() - layout.height();

        svg.push_str("  <g class=\"legend\">\n");
        for (entry, slot) in entries.iter().zip(&layout.slots) {
            let row_left = (plot.center_x() - layout.row_widths[slot.row] / 2.0).max(0.0);
            let cy = top + (slot.row as f64 + 0.5) * layout.row_height;
            let mx = row_left + slot.x + marker / 2.0 + 4.0;

            svg.push_str(&format!(
                "    <path d=\"{}\" fill=\"{}\" stroke=\"{}\" stroke-width=\"1\"/>\n",
                marker_path(entry.node.symbol, mx, cy, marker),
                entry.node.color,
                self.theme.node_outline,
            ));
            self.push_text(
                svg,
                mx + marker / 2.0 + 6.0,
                cy,
                entry.category,
                font,
                self.theme.text,
                "start",
            );
        }
        svg.push_str("  </g>\n");
    }

    fn draw_title(&self, svg: &mut String, title: &str) {
        let size = self.theme.title_font_size;
        self.push_text(
            svg,
            self.canvas.width * 0.05,
            size * 1.5,
            title,
            size,
            self.theme.text,
            "start",
        );
    }

    #[allow(clippy::too_many_arguments)]
    fn push_text(
        &self,
        svg: &mut String,
        x: f64,
        y: f64,
        text: &str,
        size: f64,
        color: Color,
        anchor: &str,
    ) {
        svg.push_str(&format!(
            "    <text x=\"{}\" y=\"{}\" text-anchor=\"{}\" dominant-baseline=\"central\" font-family=\"{}\" font-size=\"{}\" fill=\"{}\">{}</text>\n",
            fmt_num(x),
            fmt_num(y),
            anchor,
            escape_xml(&self.theme.font_family),
            fmt_num(size),
            color,
            escape_xml(text),
        ));
    }
}

/// SVG path for a marker of diameter `size` centered on (cx, cy)
pub fn marker_path(symbol: MarkerSymbol, cx: f64, cy: f64, size: f64) -> String {
    let r = size / 2.0;
    match symbol {
        MarkerSymbol::Circle => format!(
            "M{},{} A{r},{r} 0 1,1 {},{} A{r},{r} 0 0,1 {},{} Z",
            fmt_num(cx + r),
            fmt_num(cy),
            fmt_num(cx),
            fmt_num(cy - r),
            fmt_num(cx + r),
            fmt_num(cy),
            r = fmt_num(r),
        ),
        MarkerSymbol::Square => polygon_path(&[
            (cx + r, cy + r),
            (cx - r, cy + r),
            (cx - r, cy - r),
            (cx + r, cy - r),
        ]),
        MarkerSymbol::Diamond => {
            let rd = r * 1.3;
            polygon_path(&[(cx + rd, cy), (cx, cy + rd), (cx - rd, cy), (cx, cy - rd)])
        }
        MarkerSymbol::Hexagon => {
            let points: Vec<(f64, f64)> = (0..6)
                .map(|i| {
                    let a = (90.0 + 60.0 * i as f64).to_radians();
                    (cx + r * 1.05 * a.cos(), cy - r * 1.05 * a.sin())
                })
                .collect();
            polygon_path(&points)
        }
        MarkerSymbol::TriangleUp => {
            let rt = r * 2.0 / 3f64.sqrt();
            polygon_path(&[(cx - rt, cy + r / 2.0), (cx + rt, cy + r / 2.0), (cx, cy - r)])
        }
        MarkerSymbol::Star => {
            let outer = r * 1.3;
            let inner = outer * 0.382;
            let points: Vec<(f64, f64)> = (0..10)
                .map(|i| {
                    let radius = if i % 2 == 0 { outer } else { inner };
                    let a = (90.0 + 36.0 * i as f64).to_radians();
                    (cx + radius * a.cos(), cy - radius * a.sin())
                })
                .collect();
            polygon_path(&points)
        }
    }
}

fn polygon_path(points: &[(f64, f64)]) -> String {
    let mut d = String::new();
    for (i, (x, y)) in points.iter().enumerate() {
        d.push_str(if i == 0 { "M" } else { " L" });
        d.push_str(&format!("{},{}", fmt_num(*x), fmt_num(*y)));
    }
    d.push_str(" Z");
    d
}

/// Rough advance width of a string in a proportional sans font
fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * 0.6
}

/// Two decimals, trailing zeros dropped
fn fmt_num(v: f64) -> String {
    let s = format!("{:.2}", v);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::geometry::AxisRange;
    use crate::diagram::graph::Edge;

    fn sample() -> Diagram {
        let mut builder = Diagram::builder();
        builder
            .title("Tiny <Stack>")
            .x_range(AxisRange::new(0.0, 4.0))
            .y_range(AxisRange::new(0.0, 4.0))
            .add_node(
                Node::new("web", Point::new(1.0, 3.0))
                    .with_symbol(MarkerSymbol::Square)
                    .in_category("Service"),
            )
            .add_node(
                Node::new("db", Point::new(3.0, 1.0))
                    .with_symbol(MarkerSymbol::Diamond)
                    .in_category("Database"),
            )
            .add_node(Node::new("cache", Point::new(3.0, 3.0)).in_category("Database"))
            .add_edge(Edge::new("web", "db"))
            .add_edge(Edge::new("web", "cache"));
        builder.build().unwrap()
    }

    #[test]
    fn test_render_structure() {
        let svg = SvgRenderer::default().render(&sample()).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<line ").count(), 2);
        assert_eq!(svg.matches("rotate(").count(), 2);
        // Two legend entries for three nodes
        assert_eq!(svg.matches(">Service</text>").count(), 1);
        assert_eq!(svg.matches(">Database</text>").count(), 1);
        assert!(svg.contains("Tiny &lt;Stack&gt;"));
        assert!(!svg.contains("grid"));
    }

    #[test]
    fn test_edges_drawn_before_nodes() {
        let svg = SvgRenderer::default().render(&sample()).unwrap();
        let edges = svg.find("class=\"edges\"").unwrap();
        let nodes = svg.find("class=\"nodes\"").unwrap();
        let legend = svg.find("class=\"legend\"").unwrap();
        assert!(edges < nodes && nodes < legend);
    }

    #[test]
    fn test_horizontal_arrow_rotation() {
        let mut builder = Diagram::builder();
        builder
            .x_range(AxisRange::new(0.0, 2.0))
            .y_range(AxisRange::new(0.0, 2.0))
            .add_node(Node::new("a", Point::new(0.5, 1.0)))
            .add_node(Node::new("b", Point::new(1.5, 1.0)))
            .add_edge(Edge::new("a", "b"));
        let svg = SvgRenderer::default().render(&builder.build().unwrap()).unwrap();
        assert!(svg.contains("rotate(90)"));
    }

    #[test]
    fn test_self_loop_arrow() {
        let mut builder = Diagram::builder();
        builder
            .x_range(AxisRange::new(0.0, 2.0))
            .y_range(AxisRange::new(0.0, 2.0))
            .add_node(Node::new("a", Point::new(1.0, 1.0)))
            .add_edge(Edge::new("a", "a"));
        let diagram = builder.build().unwrap();

        let renderer = SvgRenderer::default();
        let svg = renderer.render(&diagram).unwrap();
        let (x, y) = renderer.viewport(&diagram).to_pixel(Point::new(1.0, 1.0));

        let expected = format!("translate({} {}) rotate(90)", fmt_num(x), fmt_num(y));
        assert!(svg.contains(&expected), "missing {expected} in\n{svg}");
        assert!(!svg.contains("NaN"));
    }

    fn attr(line: &str, name: &str) -> f64 {
        let key = format!(" {name}=\"");
        let start = line.find(&key).unwrap() + key.len();
        let end = start + line[start..].find('"').unwrap();
        line[start..end].parse().unwrap()
    }

    #[test]
    fn test_wrapped_legend_stays_below_title() {
        let mut builder = Diagram::builder();
        builder.title("Many Categories");
        for i in 0..30 {
            builder.add_node(
                Node::new(format!("n{i}"), Point::new(i as f64, (i % 5) as f64))
                    .in_category(format!("Category number {i}")),
            );
        }
        let diagram = builder.build().unwrap();

        let renderer = SvgRenderer::default();
        let svg = renderer.render(&diagram).unwrap();
        let plot = renderer.viewport(&diagram).plot;
        assert!(plot.top > renderer.canvas.margin.top, "top margin should grow");
        assert!(plot.bottom() <= renderer.canvas.height);

        let title_bottom = renderer.theme.title_font_size * 2.0;
        let legend_start = svg.find("class=\"legend\"").unwrap();
        let legend_end = legend_start + svg[legend_start..].find("</g>").unwrap();
        let ys: Vec<f64> = svg[legend_start..legend_end]
            .lines()
            .filter(|l| l.contains("<text"))
            .map(|l| attr(l, "y"))
            .collect();

        assert_eq!(ys.len(), 30);
        for y in ys {
            assert!(y >= title_bottom && y < plot.top, "legend text at y={y}");
        }
    }

    #[test]
    fn test_short_legend_keeps_default_margin() {
        let renderer = SvgRenderer::default();
        let plot = renderer.viewport(&sample()).plot;
        assert_eq!(plot, renderer.canvas.plot_area());
    }

    #[test]
    fn test_fmt_num() {
        assert_eq!(fmt_num(2.0), "2");
        assert_eq!(fmt_num(2.5), "2.5");
        assert_eq!(fmt_num(1.23456), "1.23");
        assert_eq!(fmt_num(-0.001), "0");
    }

    #[test]
    fn test_marker_paths_are_closed() {
        for symbol in MarkerSymbol::all() {
            let d = marker_path(*symbol, 10.0, 10.0, 20.0);
            assert!(d.starts_with('M'), "{:?}: {}", symbol, d);
            assert!(d.ends_with('Z'), "{:?}: {}", symbol, d);
        }
    }
}
