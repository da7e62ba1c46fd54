//! Rendering tests: built-in diagram to disk, format selection, failures

use archviz::diagram::{parse_string, preset, write_image, Canvas, DiagramTheme, SvgRenderer};
use archviz::{Diagram, Edge, Error, Node, Point};

fn renderer() -> SvgRenderer {
    SvgRenderer::new(DiagramTheme::light(), Canvas::default())
}

/// The built-in diagram renders to exactly one PNG of the canvas size
#[test]
fn test_preset_png() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join(preset::SIM_STUDIO_OUTPUT);

    let diagram = preset::sim_studio().expect("Built-in diagram should build");
    write_image(&diagram, &renderer(), &path, 1.0).expect("Failed to write PNG");

    let entries: Vec<_> = std::fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 1, "Only the image should be written");

    let image = image::open(&path).expect("Output should decode as PNG").to_rgba8();
    assert_eq!(image.dimensions(), (700, 500));
    assert_eq!(image.get_pixel(0, 0).0, [255, 255, 255, 255], "Corner should be background");
}

#[test]
fn test_scale_multiplies_pixels() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arch.png");

    let diagram = preset::sim_studio().unwrap();
    write_image(&diagram, &renderer(), &path, 2.0).unwrap();

    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (1400, 1000));
}

#[test]
fn test_svg_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arch.svg");

    let diagram = preset::sim_studio().unwrap();
    write_image(&diagram, &renderer(), &path, 1.0).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("Sim Studio Architecture"));
    assert!(svg.contains(">realtime-server</text>"));
    assert_eq!(svg.matches("<line").count(), 13, "One line per edge");
}

/// A diagram with a dangling edge never reaches the filesystem
#[test]
fn test_unknown_endpoint_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.png");

    let result = Diagram::builder()
        .add_node(Node::new("a", Point::new(0.0, 0.0)))
        .add_edge(Edge::new("a", "ghost"))
        .build()
        .and_then(|diagram| write_image(&diagram, &renderer(), &path, 1.0));

    match result {
        Err(Error::UnknownNode { missing, .. }) => assert_eq!(missing, "ghost"),
        other => panic!("Expected UnknownNode, got {:?}", other.map(|_| ())),
    }
    assert!(!path.exists());
}

#[test]
fn test_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("arch.gif");

    let diagram = preset::sim_studio().unwrap();
    let result = write_image(&diagram, &renderer(), &path, 1.0);

    assert!(matches!(result, Err(Error::UnsupportedFormat(_))));
    assert!(!path.exists());
}

/// Diagram files go through the same path as the built-in diagram
#[test]
fn test_diagram_file_renders() {
    let diagram = parse_string(
        r##"
        title = "Two Tier"

        [[nodes]]
        id = "web"
        position = [0.0, 1.0]
        color = "#FFC185"
        symbol = "square"
        category = "Web Service"

        [[nodes]]
        id = "db"
        position = [0.0, 0.0]
        color = "#5D878F"
        symbol = "diamond"
        category = "Database"

        [[edges]]
        from = "web"
        to = "db"
        "##,
    )
    .expect("Diagram file should parse");

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two_tier.svg");
    write_image(&diagram, &renderer(), &path, 1.0).unwrap();

    let svg = std::fs::read_to_string(&path).unwrap();
    assert!(svg.contains("Two Tier"));
    assert!(svg.contains(">Web Service</text>"));
    assert!(svg.contains(">Database</text>"));
}
