//! Statistiques d'ensemble sur la collection affichée

use crate::types::{FeatureCollection, MetricKey};

/// Agrégats du niveau affiché, pour les panneaux de statistiques
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectionStats {
    /// Nombre de territoires
    pub count: usize,
    /// Somme des logements vacants +2 ans
    pub total_vacants: f64,
    /// Taux de vacance moyen (pour 1000 habitants)
    pub taux_moyen: f64,
    /// Extrema de la métrique active (valeurs strictement positives)
    pub min: f64,
    pub max: f64,
}

/// Calcule les agrégats d'une collection pour la métrique active.
///
/// Les extrema suivent la même règle que l'échelle de couleurs : seules
/// les valeurs strictement positives comptent ; collection sans valeur
/// positive → étendue par défaut [0, 100].
pub fn collection_stats(collection: &FeatureCollection, key: MetricKey) -> CollectionStats {
    let count = collection.len();

    let total_vacants: f64 = collection
        .features
        .iter()
        .filter_map(|f| f.metric(MetricKey::VacantPlus2Ans))
        .sum();

    let taux_moyen = if count == 0 {
        0.0
    } else {
        collection
            .features
            .iter()
            .map(|f| f.metric(MetricKey::TauxVacancePour1000).unwrap_or(0.0))
            .sum::<f64>()
            / count as f64
    };

    let positives: Vec<f64> = collection
        .features
        .iter()
        .filter_map(|f| f.metric(key))
        .filter(|v| *v > 0.0)
        .collect();

    let (min, max) = if positives.is_empty() {
        (0.0, 100.0)
    } else {
        (
            positives.iter().copied().fold(f64::INFINITY, f64::min),
            positives.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        )
    };

    CollectionStats {
        count,
        total_vacants,
        taux_moyen,
        min,
        max,
    }
}

/// Formate un nombre à la française : milliers séparés par une espace
pub fn format_fr(value: f64) -> String {
    let rounded = value.round() as i64;
    let negative = rounded < 0;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i != 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }

    if negative {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Feature;
    use serde_json::{json, Map};

    fn feature(code: &str, vacants: f64, taux: f64) -> Feature {
        let mut properties = Map::new();
        properties.insert("pp_vacant_plus_2ans_25".to_string(), json!(vacants));
        properties.insert("tauxVacancePour1000".to_string(), json!(taux));
        Feature {
            code: code.to_string(),
            nom: code.to_string(),
            geometry: None,
            properties,
        }
    }

    #[test]
    fn test_collection_stats() {
        let collection = FeatureCollection::new(vec![
            feature("22", 14888.0, 25.0),
            feature("29", 19885.0, 22.0),
            feature("35", 14472.0, 13.0),
            feature("56", 15489.0, 21.0),
        ]);

        let stats = collection_stats(&collection, MetricKey::VacantPlus2Ans);
        assert_eq!(stats.count, 4);
        assert_eq!(stats.total_vacants, 64_734.0);
        assert_eq!(stats.taux_moyen, 20.25);
        assert_eq!(stats.min, 14_472.0);
        assert_eq!(stats.max, 19_885.0);
    }

    #[test]
    fn test_collection_stats_empty() {
        let stats = collection_stats(&FeatureCollection::default(), MetricKey::VacantPlus2Ans);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.taux_moyen, 0.0);
        assert_eq!((stats.min, stats.max), (0.0, 100.0));
    }

    #[test]
    fn test_format_fr() {
        assert_eq!(format_fr(0.0), "0");
        assert_eq!(format_fr(999.0), "999");
        assert_eq!(format_fr(1_000.0), "1 000");
        assert_eq!(format_fr(1_308_071.0), "1 308 071");
        assert_eq!(format_fr(-36_205.0), "-36 205");
    }
}
