//! Types d'erreurs pour le crate carto

use thiserror::Error;

/// Erreurs pouvant survenir lors du chargement ou du rendu de la carte
#[derive(Debug, Error)]
pub enum CartoError {
    /// Erreur d'I/O lors de la lecture d'une ressource
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Données de contours indisponibles (fetch échoué ou réponse invalide)
    #[error("Data unavailable for {resource}: {reason}")]
    DataUnavailable { resource: String, reason: String },

    /// Géométrie invalide (ni Polygon ni MultiPolygon)
    #[error("Invalid geometry for {code}: {reason}")]
    InvalidGeometry { code: String, reason: String },

    /// Configuration de seuils incohérente
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Erreur de (dé)sérialisation JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CartoError {
    /// Crée une erreur de données indisponibles avec contexte
    pub fn data_unavailable(resource: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            resource: resource.into(),
            reason: reason.into(),
        }
    }

    /// Crée une erreur de géométrie invalide
    pub fn invalid_geometry(code: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            code: code.into(),
            reason: reason.into(),
        }
    }
}
