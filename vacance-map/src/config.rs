//! Configuration du rendu
//!
//! Deux presets embarqués reprennent les deux schémas de seuils observés
//! dans l'historique du projet ; un chemin JSON arbitraire reste accepté.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use carto::zoom::ZoomThresholds;

/// Configuration principale
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MapConfig {
    /// Seuils de zoom des niveaux de granularité
    pub thresholds: ZoomThresholds,

    /// Opacité de la couche de remplissage
    #[serde(default = "default_opacity")]
    pub opacity: f64,

    /// Toggle utilisateur d'affichage des labels
    #[serde(default = "default_show_labels")]
    pub show_labels: bool,
}

fn default_opacity() -> f64 {
    0.7
}

fn default_show_labels() -> bool {
    true
}

impl Default for MapConfig {
    fn default() -> Self {
        Self::from_preset("quatre-niveaux").expect("embedded preset must parse")
    }
}

impl MapConfig {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse config JSON")?;
        config.validate()?;
        Ok(config)
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "quatre-niveaux" => Self::load_embedded(include_str!("presets/quatre_niveaux.json")),
            "trois-niveaux" => Self::load_embedded(include_str!("presets/trois_niveaux.json")),
            _ => anyhow::bail!(
                "Unknown preset: {}. Use: quatre-niveaux, trois-niveaux",
                preset
            ),
        }
    }

    /// Résout un spec CLI : nom de preset ou chemin de fichier
    pub fn resolve(spec: &str) -> Result<Self> {
        match spec {
            "quatre-niveaux" | "trois-niveaux" => Self::from_preset(spec),
            _ => Self::load(Path::new(spec)),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse embedded config")?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.thresholds
            .validate()
            .context("Invalid zoom thresholds")?;
        if !(0.0..=1.0).contains(&self.opacity) {
            anyhow::bail!("Opacity must be in [0, 1], got {}", self.opacity);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carto::Granularity;

    #[test]
    fn test_preset_quatre_niveaux() {
        let config = MapConfig::from_preset("quatre-niveaux").unwrap();
        assert_eq!(config.thresholds.root(), Granularity::Nation);
        assert_eq!(config.thresholds.nation_max, Some(5.5));
        assert_eq!(config.opacity, 0.7);
    }

    #[test]
    fn test_preset_trois_niveaux() {
        let config = MapConfig::from_preset("trois-niveaux").unwrap();
        assert_eq!(config.thresholds.root(), Granularity::Region);
        assert_eq!(config.thresholds.nation_max, None);
        assert_eq!(config.thresholds.labels_min, 6.0);
    }

    #[test]
    fn test_unknown_preset() {
        assert!(MapConfig::from_preset("cinq-niveaux").is_err());
    }

    #[test]
    fn test_default_is_quatre_niveaux() {
        assert_eq!(MapConfig::default().thresholds.nation_max, Some(5.5));
    }
}
