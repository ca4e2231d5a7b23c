//! Résolution du niveau de granularité selon le zoom
//!
//! Fonction pure des seuils configurés : pas d'état caché, pas
//! d'hystérésis. Deux schémas existent dans les données historiques du
//! projet, à trois niveaux (région/département/commune) et à quatre
//! (avec la vue France entière) ; les deux sont portés par la même
//! structure de seuils, `nation_max` absent signifiant trois niveaux.

use serde::{Deserialize, Serialize};

use crate::error::CartoError;
use crate::types::Granularity;

/// Seuils de zoom délimitant les niveaux de granularité
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoomThresholds {
    /// Fin de la vue France entière (schéma quatre niveaux) ;
    /// None = schéma trois niveaux, la région est la racine
    #[serde(default)]
    pub nation_max: Option<f64>,

    /// Fin de la vue régions (T1)
    pub region_max: f64,

    /// Fin de la vue départements (T2) ; au-delà, communes
    pub departement_max: f64,

    /// Zoom minimal d'affichage des labels
    pub labels_min: f64,

    /// Zoom maximal global (borne du recentrage)
    pub max_zoom: f64,

    /// Incrément de zoom lors d'un drill-down
    pub drill_increment: f64,

    /// Marge ajoutée au seuil du niveau cible lors d'un drill-down
    pub drill_margin: f64,
}

impl Default for ZoomThresholds {
    fn default() -> Self {
        Self::quatre_niveaux()
    }
}

impl ZoomThresholds {
    /// Schéma à quatre niveaux : France < 5.5 ≤ régions < 6.5 ≤
    /// départements < 8.5 ≤ communes
    pub fn quatre_niveaux() -> Self {
        Self {
            nation_max: Some(5.5),
            region_max: 6.5,
            departement_max: 8.5,
            // Aligné sur nation_max : les labels ne peuvent pas apparaître
            // après le premier changement de niveau
            labels_min: 5.5,
            max_zoom: 12.0,
            drill_increment: 1.5,
            drill_margin: 0.5,
        }
    }

    /// Schéma à trois niveaux : régions < 6.5 ≤ départements < 8.5 ≤ communes
    pub fn trois_niveaux() -> Self {
        Self {
            nation_max: None,
            region_max: 6.5,
            departement_max: 8.5,
            labels_min: 6.0,
            max_zoom: 12.0,
            drill_increment: 1.5,
            drill_margin: 0.5,
        }
    }

    /// Granularité racine du schéma
    pub fn root(&self) -> Granularity {
        if self.nation_max.is_some() {
            Granularity::Nation
        } else {
            Granularity::Region
        }
    }

    /// Seuil de zoom à partir duquel `granularity` devient active.
    ///
    /// None pour la racine du schéma (active dès le zoom minimal).
    pub fn entering(&self, granularity: Granularity) -> Option<f64> {
        match granularity {
            Granularity::Nation => None,
            Granularity::Region => self.nation_max,
            Granularity::Departement => Some(self.region_max),
            Granularity::Commune => Some(self.departement_max),
        }
    }

    /// Vérifie l'ordre des seuils et la contrainte sur les labels
    pub fn validate(&self) -> Result<(), CartoError> {
        if let Some(nation_max) = self.nation_max {
            if nation_max >= self.region_max {
                return Err(CartoError::InvalidConfig(format!(
                    "nation_max ({}) must be below region_max ({})",
                    nation_max, self.region_max
                )));
            }
        }
        if self.region_max >= self.departement_max {
            return Err(CartoError::InvalidConfig(format!(
                "region_max ({}) must be below departement_max ({})",
                self.region_max, self.departement_max
            )));
        }
        if self.departement_max > self.max_zoom {
            return Err(CartoError::InvalidConfig(format!(
                "departement_max ({}) must not exceed max_zoom ({})",
                self.departement_max, self.max_zoom
            )));
        }

        // Les labels doivent apparaître avant le premier changement de
        // niveau, jamais après
        let lowest = self.nation_max.unwrap_or(self.region_max);
        if self.labels_min > lowest {
            return Err(CartoError::InvalidConfig(format!(
                "labels_min ({}) must not exceed the lowest granularity threshold ({})",
                self.labels_min, lowest
            )));
        }
        Ok(())
    }
}

/// Niveau résolu pour une valeur de zoom
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelView {
    pub granularity: Granularity,
    /// Labels affichables (toggle utilisateur ET seuil de zoom atteint)
    pub labels_visible: bool,
}

/// Résout le niveau de granularité pour un zoom donné.
///
/// Aux seuils exacts, le niveau le plus détaillé l'emporte
/// (borne inclusive côté détail).
pub fn resolve(thresholds: &ZoomThresholds, zoom: f64, labels_enabled: bool) -> LevelView {
    let granularity = if zoom >= thresholds.departement_max {
        Granularity::Commune
    } else if zoom >= thresholds.region_max {
        Granularity::Departement
    } else {
        match thresholds.nation_max {
            Some(nation_max) if zoom < nation_max => Granularity::Nation,
            _ => Granularity::Region,
        }
    };

    LevelView {
        granularity,
        labels_visible: labels_enabled && zoom >= thresholds.labels_min,
    }
}
