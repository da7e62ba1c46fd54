//! CLI command definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use console::{style, Emoji};
use std::path::PathBuf;

use archviz::config::Config;
use archviz::diagram::{
    arrow_placement, legend_entries, legend_flags, parse_file, preset, write_image, Canvas,
    Diagram, DiagramTheme, SvgRenderer,
};
use archviz::scaffold;

static CHECK: Emoji<'_, '_> = Emoji("✓ ", "+ ");
static ARROW: Emoji<'_, '_> = Emoji("→ ", "-> ");
static INFO: Emoji<'_, '_> = Emoji("ℹ ", "i ");
static PACKAGE: Emoji<'_, '_> = Emoji("📦 ", "[] ");

#[derive(Parser)]
#[command(name = "archviz")]
#[command(author, version)]
#[command(about = "Render architecture diagrams and generate deployment kits")]
#[command(long_about = r#"
archviz renders a static architecture diagram to an image and writes the
deployment files for a multi-service web application.

Examples:
  archviz                              # Render the built-in diagram
  archviz render -o arch.svg           # Render as SVG
  archviz render -i stack.toml         # Render a diagram file
  archviz inspect                      # Show nodes, edges and arrow geometry
  archviz scaffold -o deploy --domain studio.example.com
  archviz config scaffold.region frankfurt
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: ./archviz.toml, then ~/.config/archviz/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render a diagram to an image (.png or .svg)
    Render {
        /// Diagram file (default: built-in architecture)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output image path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pixel density multiplier for PNG output
        #[arg(short, long)]
        scale: Option<f32>,
    },

    /// Print nodes, edges, arrow placements and legend entries
    Inspect {
        /// Diagram file (default: built-in architecture)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Write the deployment kit
    Scaffold {
        /// Output directory
        #[arg(short, long)]
        out_dir: Option<PathBuf>,

        /// Service name used across the blueprint
        #[arg(long)]
        app_name: Option<String>,

        /// Public domain of the web service
        #[arg(long)]
        domain: Option<String>,
    },

    /// Show or change configuration
    Config {
        /// Key to get or set (e.g. scaffold.domain)
        key: Option<String>,

        /// New value
        value: Option<String>,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Render {
            input: None,
            output: None,
            scale: None,
        }
    }
}

fn load_diagram(config: &Config, input: Option<PathBuf>) -> Result<Diagram> {
    match input.or_else(|| config.diagram.input.clone()) {
        Some(path) => parse_file(&path)
            .with_context(|| format!("Failed to load diagram from {}", path.display())),
        None => preset::sim_studio().context("Failed to build built-in diagram"),
    }
}

/// Render a diagram to an image file
pub fn cmd_render(
    config: &Config,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
    scale: Option<f32>,
) -> Result<()> {
    let diagram = load_diagram(config, input)?;
    let output = output.unwrap_or_else(|| config.diagram.output.clone());
    let scale = scale.unwrap_or(config.diagram.scale);

    let renderer = SvgRenderer::new(
        DiagramTheme::light().with_font_family(config.diagram.font_family.clone()),
        Canvas::new(config.diagram.width, config.diagram.height),
    );

    write_image(&diagram, &renderer, &output, scale)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "{}Rendered {} ({} nodes, {} edges) {}{}",
        CHECK,
        style(diagram.title().unwrap_or("diagram")).bold(),
        diagram.nodes().len(),
        diagram.edges().len(),
        ARROW,
        style(output.display()).cyan()
    );
    Ok(())
}

/// Print the diagram tables and computed geometry
pub fn cmd_inspect(config: &Config, input: Option<PathBuf>) -> Result<()> {
    let diagram = load_diagram(config, input)?;

    println!(
        "\n{}",
        style(diagram.title().unwrap_or("Untitled diagram")).bold().underlined()
    );
    let (x, y) = (diagram.x_range(), diagram.y_range());
    println!(
        "  {}",
        style(format!("x [{}, {}]  y [{}, {}]", x.min, x.max, y.min, y.max)).dim()
    );

    println!("\n{}", style("Nodes").bold());
    for (node, listed) in diagram.nodes().iter().zip(legend_flags(diagram.nodes())) {
        println!(
            "  {} {:<16} ({:>5.2}, {:>5.2})  {:<11} {} {}{}",
            if listed { style("●").green() } else { style("○").dim() },
            style(&node.id).white().bold(),
            node.position.x,
            node.position.y,
            node.symbol.name(),
            node.color,
            style(&node.category).cyan(),
            if listed { "" } else { " (legend shown earlier)" },
        );
    }

    println!("\n{}", style("Edges").bold());
    for edge in diagram.edges() {
        let (from, to) = diagram.endpoints(edge)?;
        let arrow = arrow_placement(from.position, to.position);
        println!(
            "  {} {}{}  arrow at ({:.3}, {:.3}) {:>7.2}°",
            from.id,
            ARROW,
            to.id,
            arrow.position.x,
            arrow.position.y,
            arrow.angle_deg
        );
    }

    let entries = legend_entries(diagram.nodes());
    println!("\n{} ({} entries)", style("Legend").bold(), entries.len());
    for entry in &entries {
        println!("  {} {} {}", INFO, entry.category, style(&entry.node.id).dim());
    }
    println!();
    Ok(())
}

/// Write the deployment kit
pub fn cmd_scaffold(
    config: &Config,
    out_dir: Option<PathBuf>,
    app_name: Option<String>,
    domain: Option<String>,
) -> Result<()> {
    let mut settings = config.scaffold.clone();
    if let Some(dir) = out_dir {
        settings.out_dir = dir;
    }
    if let Some(name) = app_name {
        settings.app_name = name;
    }
    if let Some(domain) = domain {
        settings.domain = domain;
    }

    let written = scaffold::generate(&settings).with_context(|| {
        format!("Failed to write deployment kit to {}", settings.out_dir.display())
    })?;

    for path in &written {
        println!("  {}Created {}", CHECK, path.display());
    }
    println!(
        "\n{}Created {} files for {} in {}",
        PACKAGE,
        style(written.len()).bold(),
        style(&settings.app_name).cyan(),
        style(settings.out_dir.display()).cyan()
    );
    println!(
        "  {} Next: edit {} or run {}",
        INFO,
        style("render.yaml").bold(),
        style("./deploy.sh").bold()
    );
    Ok(())
}

/// Show, get or set configuration values
pub fn cmd_config(
    mut config: Config,
    explicit: Option<PathBuf>,
    key: Option<String>,
    value: Option<String>,
) -> Result<()> {
    match (key, value) {
        (None, _) => {
            let content = toml::to_string_pretty(&config).context("Failed to serialize config")?;
            print!("{}", content);
        }
        (Some(key), None) => {
            println!("{}", config.get(&key)?);
        }
        (Some(key), Some(value)) => {
            config.set(&key, &value)?;
            let path = Config::write_target(explicit.as_deref());
            config
                .save(&path)
                .with_context(|| format!("Failed to save config to {}", path.display()))?;
            println!("{}{} = {} ({})", CHECK, key, value, style(path.display()).dim());
        }
    }
    Ok(())
}
