//! Collaborateur de contours sur fichiers locaux
//!
//! Les contours open data (regions.geojson, departements.geojson,
//! communes.geojson, france.geojson) sont lus depuis un répertoire de
//! données. Tout échec de lecture ou de parsing devient `DataUnavailable` ;
//! le fournisseur ne retourne jamais de collection partielle.

use std::path::{Path, PathBuf};

use tracing::debug;

use carto::provider::GeoSource;
use carto::CartoError;

/// Source de contours adossée à un répertoire local
#[derive(Debug, Clone)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl GeoSource for FileSource {
    async fn fetch(&self, resource: &str) -> Result<geojson::FeatureCollection, CartoError> {
        let path = self.root.join(resource);
        debug!(path = %path.display(), "Reading boundary file");

        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CartoError::data_unavailable(resource, e.to_string()))?;

        serde_json::from_str(&content)
            .map_err(|e| CartoError::data_unavailable(resource, format!("invalid GeoJSON: {}", e)))
    }
}
