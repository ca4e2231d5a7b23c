//! Export de la vue rendue en GeoJSON stylé

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use carto::RenderedView;

/// Écrit une collection GeoJSON sur disque (buffered)
pub fn write_collection(path: &Path, collection: geojson::FeatureCollection) -> Result<()> {
    let file = File::create(path)
        .context(format!("Failed to create file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, &collection)
        .context("Failed to serialize FeatureCollection")?;
    writer.flush()?;

    Ok(())
}

/// Écrit la carte colorée et ses ancres de labels dans `output`.
///
/// Retourne les chemins écrits (carte.geojson, labels.geojson).
pub fn export_view(output: &Path, view: RenderedView) -> Result<(PathBuf, PathBuf)> {
    std::fs::create_dir_all(output)
        .context(format!("Failed to create output dir: {}", output.display()))?;

    let carte_path = output.join("carte.geojson");
    let labels_path = output.join("labels.geojson");

    write_collection(&carte_path, view.collection.into_geojson())?;
    write_collection(&labels_path, view.labels.into_geojson())?;

    Ok((carte_path, labels_path))
}
