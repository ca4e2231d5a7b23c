//! Enrichissement des features avec les métriques de vacance
//!
//! Deux chemins, tous deux valides : les données réelles du référentiel
//! quand l'identifiant y figure, des métriques synthétisées sinon. La
//! propriété `donnees_reelles` trace le chemin emprunté.

use rand::Rng;
use rayon::prelude::*;
use serde_json::json;

use crate::referentiel::{MetricSource, TerritoryRepository, TerritorySource};
use crate::types::{Feature, FeatureCollection, Granularity};

/// Population de base pour la synthèse, selon la granularité
const BASE_POPULATION_COMMUNE: f64 = 5_000.0;
const BASE_POPULATION_DEFAULT: f64 = 100_000.0;

/// Attache les métriques calculées aux features
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricEnricher {
    repo: TerritoryRepository,
}

impl MetricEnricher {
    pub fn new(repo: TerritoryRepository) -> Self {
        Self { repo }
    }

    /// Enrichit une feature (non destructif : les propriétés existantes
    /// sont conservées, les métriques fusionnées par-dessus).
    ///
    /// Au niveau nation les métriques sont pré-attachées à la création de
    /// la feature : l'enrichissement est l'identité.
    pub fn enrich(&self, feature: &Feature, granularity: Granularity) -> Feature {
        if granularity == Granularity::Nation {
            return feature.clone();
        }

        // Les régions sont clées par nom dans le référentiel,
        // les départements et communes par code.
        let identifier = match granularity {
            Granularity::Region => feature.nom.as_str(),
            _ => feature.code.as_str(),
        };

        let mut enriched = feature.clone();
        match self.repo.lookup(identifier, granularity) {
            MetricSource::Real(source) => attach_real(&mut enriched, source),
            MetricSource::Synthesized => attach_synthesized(&mut enriched, granularity),
        }
        enriched
    }

    /// Enrichit une collection entière (parallélisé : la couche commune
    /// approche les 35 000 features).
    pub fn enrich_collection(
        &self,
        collection: FeatureCollection,
        granularity: Granularity,
    ) -> FeatureCollection {
        let features = collection
            .features
            .into_par_iter()
            .map(|feature| self.enrich(&feature, granularity))
            .collect();
        FeatureCollection::new(features)
    }
}

/// Métriques dérivées depuis une entrée réelle du référentiel
fn attach_real(feature: &mut Feature, source: TerritorySource) {
    let vacants = source.vacants as f64;
    let population = source.population as f64;
    let superficie = source.superficie as f64;

    feature.set_property("pp_vacant_plus_2ans_25", json!(source.vacants));
    feature.set_property("population", json!(source.population));
    feature.set_property("superficie", json!(source.superficie));
    feature.set_property(
        "tauxVacancePour1000",
        json!((vacants / population * 1000.0).round()),
    );
    feature.set_property("densite", json!((population / superficie).round()));
    feature.set_property(
        "vacanceParKm2",
        json!((vacants / superficie * 100.0).round() / 100.0),
    );
    feature.set_property("donnees_reelles", json!(true));
}

/// Métriques synthétisées pour les territoires hors référentiel.
///
/// Les valeurs varient d'un chargement à l'autre : la synthèse n'est pas
/// mise en cache. Le taux et la vacance/km² sont tirés indépendamment du
/// comptage synthétisé, comportement hérité des données de démonstration.
fn attach_synthesized(feature: &mut Feature, granularity: Granularity) {
    let mut rng = rand::thread_rng();

    let base = match granularity {
        Granularity::Commune => BASE_POPULATION_COMMUNE,
        _ => BASE_POPULATION_DEFAULT,
    };
    let variation: f64 = rng.gen_range(0.2..1.0);
    let population = base * variation;

    let superficie: f64 = rng.gen_range(500.0..5500.0);
    let densite: f64 = rng.gen_range(50.0..250.0);
    let vacants = population * rng.gen_range(0.01..0.06);
    let taux: f64 = rng.gen_range(10.0..60.0);
    let vacance_km2: f64 = rng.gen_range(1.0..11.0);

    feature.set_property("pp_vacant_plus_2ans_25", json!(vacants.round()));
    feature.set_property("population", json!(population.round()));
    feature.set_property("superficie", json!(superficie.round()));
    feature.set_property("densite", json!(densite.round()));
    feature.set_property("tauxVacancePour1000", json!(taux.round()));
    feature.set_property("vacanceParKm2", json!(vacance_km2.round()));
    feature.set_property("donnees_reelles", json!(false));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::MetricKey;
    use serde_json::{Map, Value};

    fn feature(code: &str, nom: &str) -> Feature {
        let mut properties = Map::new();
        properties.insert("code".to_string(), Value::String(code.to_string()));
        properties.insert("nom".to_string(), Value::String(nom.to_string()));
        Feature {
            code: code.to_string(),
            nom: nom.to_string(),
            geometry: None,
            properties,
        }
    }

    #[test]
    fn test_enrich_departement_real() {
        let enricher = MetricEnricher::default();
        let enriched = enricher.enrich(&feature("29", "Finistère"), Granularity::Departement);

        assert_eq!(enriched.metric(MetricKey::VacantPlus2Ans), Some(19885.0));
        // round(19885 / 915090 * 1000) = 22
        assert_eq!(enriched.metric(MetricKey::TauxVacancePour1000), Some(22.0));
        // round(915090 / 6733) = 136
        assert_eq!(enriched.metric(MetricKey::Densite), Some(136.0));
        // round(19885 / 6733 * 100) / 100 = 2.95
        assert_eq!(enriched.metric(MetricKey::VacanceParKm2), Some(2.95));
        assert_eq!(enriched.properties.get("donnees_reelles"), Some(&json!(true)));
    }

    #[test]
    fn test_enrich_region_keyed_by_name() {
        let enricher = MetricEnricher::default();
        // Le code région (53) n'est pas la clé de la table régionale,
        // c'est le nom qui résout.
        let enriched = enricher.enrich(&feature("53", "Bretagne"), Granularity::Region);
        assert_eq!(enriched.metric(MetricKey::VacantPlus2Ans), Some(64_734.0));
    }

    #[test]
    fn test_taux_is_integer_rounding_not_truncation() {
        let enricher = MetricEnricher::default();
        // Allier : 16808 / 337988 * 1000 = 49.73 → round = 50 (trunc = 49)
        let enriched = enricher.enrich(&feature("03", "Allier"), Granularity::Departement);
        assert_eq!(enriched.metric(MetricKey::TauxVacancePour1000), Some(50.0));
    }

    #[test]
    fn test_enrich_unknown_synthesizes() {
        let enricher = MetricEnricher::default();
        let enriched = enricher.enrich(&feature("00", "Territoire fictif"), Granularity::Departement);

        assert_eq!(enriched.properties.get("donnees_reelles"), Some(&json!(false)));

        let population = enriched.metric(MetricKey::Population).unwrap();
        assert!((20_000.0..=100_000.0).contains(&population));

        let taux = enriched.metric(MetricKey::TauxVacancePour1000).unwrap();
        assert!((10.0..=60.0).contains(&taux));
    }

    #[test]
    fn test_enrich_commune_uses_smaller_baseline() {
        let enricher = MetricEnricher::default();
        let enriched = enricher.enrich(&feature("75056", "Paris"), Granularity::Commune);

        let population = enriched.metric(MetricKey::Population).unwrap();
        assert!((1_000.0..=5_000.0).contains(&population));
    }

    #[test]
    fn test_enrich_is_non_destructive() {
        let enricher = MetricEnricher::default();
        let mut input = feature("29", "Finistère");
        input.set_property("couleur_prefere", json!("glaz"));

        let enriched = enricher.enrich(&input, Granularity::Departement);
        assert_eq!(enriched.properties.get("couleur_prefere"), Some(&json!("glaz")));
        // L'entrée n'est pas mutée
        assert_eq!(input.metric(MetricKey::VacantPlus2Ans), None);
    }

    #[test]
    fn test_enrich_nation_is_identity() {
        let enricher = MetricEnricher::default();
        let national = crate::referentiel::france::national_feature(None);
        let enriched = enricher.enrich(&national, Granularity::Nation);
        assert_eq!(enriched.properties, national.properties);
    }

    #[test]
    fn test_enrich_collection() {
        let enricher = MetricEnricher::default();
        let collection = FeatureCollection::new(vec![
            feature("22", "Côtes-d'Armor"),
            feature("00", "Fictif"),
        ]);

        let enriched = enricher.enrich_collection(collection, Granularity::Departement);
        assert_eq!(enriched.len(), 2);
        assert_eq!(
            enriched.by_code("22").unwrap().properties.get("donnees_reelles"),
            Some(&json!(true))
        );
        assert_eq!(
            enriched.by_code("00").unwrap().properties.get("donnees_reelles"),
            Some(&json!(false))
        );
    }
}
