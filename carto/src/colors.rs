//! Échelle de couleurs de la choroplèthe
//!
//! Gradient perceptuel « faible = vert, sévère = rouge » en quatre bandes
//! linéaires de largeur égale, entre cinq points d'arrêt fixes. L'échelle
//! est dérivée de la collection affichée et recalculée à chaque changement
//! de métrique ou de jeu de features.

use std::fmt;

use serde_json::json;

use crate::types::{FeatureCollection, MetricKey};

/// Couleur RGB 8 bits, formatée CSS `rgb(r, g, b)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Points d'arrêt du gradient : vert → olive → jaune → orange → rouge
pub const GRADIENT_STOPS: [Rgb; 5] = [
    Rgb { r: 34, g: 197, b: 94 },
    Rgb { r: 134, g: 134, b: 69 },
    Rgb { r: 255, g: 255, b: 100 },
    Rgb { r: 255, g: 165, b: 0 },
    Rgb { r: 220, g: 69, b: 69 },
];

/// Couleur neutre quand l'étendue est dégénérée (min == max)
pub const NEUTRAL: Rgb = Rgb { r: 34, g: 197, b: 94 };

/// Couleur fixe de la vue France entière (un seul point de donnée,
/// le gradient n'a pas de sens)
pub const FRANCE_BLUE: Rgb = Rgb { r: 59, g: 130, b: 246 };

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScaleKind {
    /// Gradient quatre bandes sur [min, max]
    Gradient,
    /// Couleur unique (étendue dégénérée ou vue nationale)
    Uniform(Rgb),
}

/// Échelle valeur → couleur pour une collection et une métrique données
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorScale {
    pub min: f64,
    pub max: f64,
    kind: ScaleKind,
}

impl ColorScale {
    /// Calcule l'échelle sur les valeurs strictement positives de la
    /// métrique. Les zéros et absences sont exclus de l'étendue mais
    /// restent colorables.
    pub fn compute(collection: &FeatureCollection, key: MetricKey) -> Self {
        let values: Vec<f64> = collection
            .features
            .iter()
            .filter_map(|f| f.metric(key))
            .filter(|v| *v > 0.0)
            .collect();

        if values.is_empty() {
            // Étendue par défaut, sans danger pour les consommateurs
            return Self {
                min: 0.0,
                max: 100.0,
                kind: ScaleKind::Gradient,
            };
        }

        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let kind = if max == min {
            ScaleKind::Uniform(NEUTRAL)
        } else {
            ScaleKind::Gradient
        };

        Self { min, max, kind }
    }

    /// Échelle de la vue France entière : couleur fixe
    pub fn nation(value: f64) -> Self {
        Self {
            min: value,
            max: value,
            kind: ScaleKind::Uniform(FRANCE_BLUE),
        }
    }

    /// Couleur d'une valeur. Idempotente ; le ratio est borné à [0, 1].
    pub fn color_of(&self, value: f64) -> Rgb {
        match self.kind {
            ScaleKind::Uniform(color) => color,
            ScaleKind::Gradient => {
                let ratio = ((value - self.min) / (self.max - self.min)).clamp(0.0, 1.0);

                // Quatre bandes de largeur 0.25 entre les cinq points d'arrêt
                let band = ((ratio * 4.0) as usize).min(3);
                let t = ratio * 4.0 - band as f64;
                lerp(GRADIENT_STOPS[band], GRADIENT_STOPS[band + 1], t)
            }
        }
    }

    /// Injecte la propriété `color` dans chaque feature de la collection
    pub fn apply(&self, collection: &mut FeatureCollection, key: MetricKey) {
        for feature in &mut collection.features {
            let value = feature.metric(key).unwrap_or(0.0);
            let color = self.color_of(value);
            feature.set_property("color", json!(color.to_string()));
        }
    }
}

/// Interpolation linéaire entre deux couleurs, arrondie par canal
fn lerp(from: Rgb, to: Rgb, t: f64) -> Rgb {
    let channel = |a: u8, b: u8| -> u8 {
        (a as f64 + (b as f64 - a as f64) * t).round() as u8
    };
    Rgb {
        r: channel(from.r, to.r),
        g: channel(from.g, to.g),
        b: channel(from.b, to.b),
    }
}
