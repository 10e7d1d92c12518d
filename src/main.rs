//! Inspector - offline replay of AR inspection scans
//!
//! Loads a scene snapshot (mesh anchors plus the camera position captured
//! when scanning stopped), reconstructs the overlay hull, and prints it as
//! JSON on stdout.
//!
//! Usage: `inspector <snapshot.json>`, or `inspector --init-settings` to
//! write the default settings file.

mod settings;
mod snapshot;

use std::path::PathBuf;

use anyhow::{Context, Result};
use inspector_mesh::Reconstructor;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::settings::InspectorSettings;
use crate::snapshot::{OverlayReport, SceneSnapshot};

fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to set subscriber")?;

    let path: PathBuf = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .context("Usage: inspector <snapshot.json> | --init-settings")?;

    if path.as_os_str() == "--init-settings" {
        return InspectorSettings::default().save();
    }

    let settings = InspectorSettings::load();
    let reconstructor = Reconstructor::new(settings.reconstruction);
    info!("Capture radius: {}m", reconstructor.radius());

    let snapshot = SceneSnapshot::load(&path)?;
    let anchors = snapshot.anchors();
    let camera = snapshot.camera_position();
    info!(
        "Loaded {} anchors ({} vertices) from {:?}",
        anchors.len(),
        anchors.iter().map(|a| a.vertices.count()).sum::<usize>(),
        path
    );

    let Some(hull) = reconstructor.reconstruct_hull(&anchors, camera) else {
        warn!("No points within {}m of the camera, nothing to render", reconstructor.radius());
        return Ok(());
    };
    hull.validate().context("Reconstruction produced an invalid hull")?;

    let overlay = reconstructor.overlay(&hull);
    info!(
        "Overlay: {} vertices, {} triangles",
        overlay.vertex_count(),
        overlay.primitive_count()
    );

    let report = OverlayReport::new(&hull, &overlay);
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
