//! Deployment Kit Generator
//!
//! Renders the deployment files for the web app, realtime server and
//! database (blueprint, container builds, manifests, docs and helper
//! scripts) from tera templates and writes them to an output directory.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tera::{Context, Tera};
use tracing::{debug, info};

use crate::config::ScaffoldConfig;
use crate::error::Result;

/// One template and where its output lands, relative to the kit root
struct KitTemplate {
    path: &'static str,
    source: &'static str,
    executable: bool,
}

const fn template(path: &'static str, source: &'static str) -> KitTemplate {
    KitTemplate {
        path,
        source,
        executable: false,
    }
}

const fn script(path: &'static str, source: &'static str) -> KitTemplate {
    KitTemplate {
        path,
        source,
        executable: true,
    }
}

const TEMPLATES: &[KitTemplate] = &[
    template("render.yaml", include_str!("../../templates/render.yaml.tera")),
    template("Dockerfile", include_str!("../../templates/Dockerfile.tera")),
    template(
        "Dockerfile.realtime",
        include_str!("../../templates/Dockerfile.realtime.tera"),
    ),
    template("package.json", include_str!("../../templates/package.json.tera")),
    template(".env.example", include_str!("../../templates/env.example.tera")),
    template(
        "docker-compose.yml",
        include_str!("../../templates/docker-compose.yml.tera"),
    ),
    template("README.md", include_str!("../../templates/README.md.tera")),
    script("deploy.sh", include_str!("../../templates/deploy.sh.tera")),
    script("health-check.sh", include_str!("../../templates/health-check.sh.tera")),
    template("next.config.js", include_str!("../../templates/next.config.js.tera")),
    template("lib/logger.js", include_str!("../../templates/lib/logger.js.tera")),
    template(
        "app/health/route.js",
        include_str!("../../templates/app/health/route.js.tera"),
    ),
];

/// A rendered file, ready to write
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Artifact {
    /// Path relative to the kit root
    pub path: PathBuf,
    pub contents: String,
    /// Written with mode 0755 on Unix
    pub executable: bool,
}

/// Relative paths of every file the kit produces, in write order
pub fn kit_paths() -> impl Iterator<Item = &'static str> {
    TEMPLATES.iter().map(|t| t.path)
}

/// Render every template with `settings` as context
pub fn render_kit(settings: &ScaffoldConfig) -> Result<Vec<Artifact>> {
    let mut tera = Tera::default();
    tera.add_raw_templates(TEMPLATES.iter().map(|t| (t.path, t.source)))?;
    let context = Context::from_serialize(settings)?;

    TEMPLATES
        .iter()
        .map(|t| -> Result<Artifact> {
            let mut contents = tera.render(t.path, &context)?;
            if !contents.ends_with('\n') {
                contents.push('\n');
            }
            debug!(path = t.path, bytes = contents.len(), "rendered template");
            Ok(Artifact {
                path: PathBuf::from(t.path),
                contents,
                executable: t.executable,
            })
        })
        .collect()
}

/// Write artifacts under `out_dir`, creating directories as needed.
///
/// Existing files are overwritten. Returns the written paths.
pub fn write_kit(out_dir: &Path, artifacts: &[Artifact]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::with_capacity(artifacts.len());
    for artifact in artifacts {
        let target = out_dir.join(&artifact.path);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&target, &artifact.contents)?;
        if artifact.executable {
            mark_executable(&target)?;
        }

        info!("Created {}", target.display());
        written.push(target);
    }

    Ok(written)
}

/// Render and write the kit in one go
pub fn generate(settings: &ScaffoldConfig) -> Result<Vec<PathBuf>> {
    let artifacts = render_kit(settings)?;
    write_kit(&settings.out_dir, &artifacts)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}
