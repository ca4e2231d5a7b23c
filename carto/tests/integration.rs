//! Tests d'intégration du pipeline complet sur un collaborateur en mémoire

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use carto::provider::{BoundaryCache, FeatureSetProvider, GeoSource};
use carto::session::{MapSession, RefreshOutcome};
use carto::types::{Granularity, MetricKey, Scope};
use carto::zoom::ZoomThresholds;
use carto::CartoError;

/// Collaborateur de test : collections en mémoire, panne commutable,
/// compteur de fetchs
#[derive(Clone)]
struct MemorySource {
    collections: Arc<HashMap<String, geojson::FeatureCollection>>,
    failing: Arc<AtomicBool>,
    fetches: Arc<AtomicUsize>,
}

impl MemorySource {
    fn new(collections: HashMap<String, geojson::FeatureCollection>) -> Self {
        Self {
            collections: Arc::new(collections),
            failing: Arc::new(AtomicBool::new(false)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl GeoSource for MemorySource {
    async fn fetch(&self, resource: &str) -> Result<geojson::FeatureCollection, CartoError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CartoError::data_unavailable(resource, "simulated outage"));
        }
        self.collections
            .get(resource)
            .cloned()
            .ok_or_else(|| CartoError::data_unavailable(resource, "unknown resource"))
    }
}

fn square(x: f64, y: f64) -> geojson::Geometry {
    geojson::Geometry::new(geojson::Value::Polygon(vec![vec![
        vec![x, y],
        vec![x + 1.0, y],
        vec![x + 1.0, y + 1.0],
        vec![x, y + 1.0],
        vec![x, y],
    ]]))
}

fn feature(code: &str, nom: &str, x: f64, y: f64) -> geojson::Feature {
    let mut properties = serde_json::Map::new();
    properties.insert("code".to_string(), json!(code));
    properties.insert("nom".to_string(), json!(nom));
    geojson::Feature {
        bbox: None,
        geometry: Some(square(x, y)),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}

fn collection(features: Vec<geojson::Feature>) -> geojson::FeatureCollection {
    geojson::FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn fixtures() -> MemorySource {
    let mut collections = HashMap::new();
    collections.insert(
        "france.geojson".to_string(),
        collection(vec![feature("FR", "France", 0.0, 40.0)]),
    );
    collections.insert(
        "regions.geojson".to_string(),
        collection(vec![
            feature("53", "Bretagne", -3.0, 48.0),
            feature("11", "Île-de-France", 2.0, 48.0),
            feature("01", "Guadeloupe", -61.0, 16.0),
        ]),
    );
    collections.insert(
        "departements.geojson".to_string(),
        collection(vec![
            feature("22", "Côtes-d'Armor", -3.0, 48.0),
            feature("29", "Finistère", -4.0, 48.0),
            feature("35", "Ille-et-Vilaine", -2.0, 48.0),
            feature("56", "Morbihan", -3.0, 47.5),
            feature("75", "Paris", 2.3, 48.8),
            feature("77", "Seine-et-Marne", 2.9, 48.6),
            feature("971", "Guadeloupe", -61.0, 16.0),
        ]),
    );
    collections.insert(
        "communes.geojson".to_string(),
        collection(vec![
            feature("75056", "Paris", 2.3, 48.8),
            feature("75116", "Paris 16e Arrondissement", 2.27, 48.86),
            feature("77001", "Achères-la-Forêt", 2.6, 48.35),
            feature("22070", "Guingamp", -3.15, 48.56),
            feature("29019", "Brest", -4.49, 48.39),
        ]),
    );
    MemorySource::new(collections)
}

fn provider(source: MemorySource) -> FeatureSetProvider<MemorySource> {
    FeatureSetProvider::new(source, BoundaryCache::new())
}

#[tokio::test]
async fn test_departements_filtered_by_region_name() {
    let provider = provider(fixtures());
    let scope = Scope {
        region: Some("Bretagne".to_string()),
        departement: None,
    };

    let loaded = provider.load(Granularity::Departement, &scope).await.unwrap();

    let mut codes: Vec<&str> = loaded.features.iter().map(|f| f.code.as_str()).collect();
    codes.sort_unstable();
    assert_eq!(codes, vec!["22", "29", "35", "56"]);
}

#[tokio::test]
async fn test_departements_filtered_by_region_code() {
    let provider = provider(fixtures());
    let scope = Scope {
        region: Some("53".to_string()),
        departement: None,
    };

    let loaded = provider.load(Granularity::Departement, &scope).await.unwrap();
    assert_eq!(loaded.len(), 4);
}

#[tokio::test]
async fn test_unknown_region_scope_yields_empty_collection() {
    let provider = provider(fixtures());
    let scope = Scope {
        region: Some("Atlantide".to_string()),
        departement: None,
    };

    let loaded = provider.load(Granularity::Departement, &scope).await.unwrap();
    assert!(loaded.is_empty());
}

#[tokio::test]
async fn test_communes_filtered_by_departement_prefix() {
    let provider = provider(fixtures());
    let scope = Scope {
        region: None,
        departement: Some("75".to_string()),
    };

    let loaded = provider.load(Granularity::Commune, &scope).await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert!(loaded.features.iter().all(|f| f.code.starts_with("75")));
}

#[tokio::test]
async fn test_loaded_features_are_enriched_with_provenance() {
    let provider = provider(fixtures());
    let loaded = provider
        .load(Granularity::Departement, &Scope::default())
        .await
        .unwrap();

    // Département du référentiel : données réelles
    let finistere = loaded.by_code("29").unwrap();
    assert_eq!(finistere.properties.get("donnees_reelles"), Some(&json!(true)));
    assert_eq!(
        finistere.metric(MetricKey::VacantPlus2Ans),
        Some(19885.0)
    );

    // Commune : toujours synthétisé
    let communes = provider
        .load(Granularity::Commune, &Scope::default())
        .await
        .unwrap();
    let brest = communes.by_code("29019").unwrap();
    assert_eq!(brest.properties.get("donnees_reelles"), Some(&json!(false)));
}

#[tokio::test]
async fn test_boundary_fetch_is_cached_enrichment_is_not() {
    let source = fixtures();
    let provider = provider(source.clone());

    let first = provider
        .load(Granularity::Commune, &Scope::default())
        .await
        .unwrap();
    let second = provider
        .load(Granularity::Commune, &Scope::default())
        .await
        .unwrap();

    // Un seul fetch pour deux chargements
    assert_eq!(source.fetch_count(), 1);

    // Les métriques synthétisées varient d'un chargement à l'autre
    // (cinq tirages indépendants : une collision totale est invraisemblable)
    let populations = |c: &carto::FeatureCollection| -> Vec<f64> {
        c.features
            .iter()
            .map(|f| f.metric(MetricKey::Population).unwrap())
            .collect()
    };
    assert_ne!(populations(&first), populations(&second));
}

#[tokio::test]
async fn test_render_view_colors_and_labels() {
    let provider = provider(fixtures());
    let thresholds = ZoomThresholds::quatre_niveaux();
    let scope = Scope {
        region: Some("Bretagne".to_string()),
        departement: None,
    };

    let view = carto::render_view(
        &provider,
        &thresholds,
        7.2,
        &scope,
        MetricKey::VacantPlus2Ans,
        true,
    )
    .await
    .unwrap();

    assert_eq!(view.granularity, Granularity::Departement);
    assert_eq!(view.collection.len(), 4);
    assert_eq!(view.labels.len(), 4);
    assert!(view.labels_visible);
    assert!(view.scale.min <= view.scale.max);

    for feature in &view.collection.features {
        let color = feature.properties.get("color").unwrap().as_str().unwrap();
        assert!(color.starts_with("rgb("), "couleur manquante: {}", color);
    }
}

#[tokio::test]
async fn test_render_view_nation_is_single_blue_feature() {
    let provider = provider(fixtures());
    let thresholds = ZoomThresholds::quatre_niveaux();

    let view = carto::render_view(
        &provider,
        &thresholds,
        4.5,
        &Scope::default(),
        MetricKey::VacantPlus2Ans,
        false,
    )
    .await
    .unwrap();

    assert_eq!(view.granularity, Granularity::Nation);
    assert_eq!(view.collection.len(), 1);
    assert_eq!(view.scale.min, view.scale.max);

    let france = &view.collection.features[0];
    assert_eq!(france.code, "FR");
    assert_eq!(
        france.properties.get("color"),
        Some(&json!("rgb(59, 130, 246)"))
    );
}

#[tokio::test]
async fn test_fetch_failure_keeps_previous_view() {
    let source = fixtures();
    let provider = FeatureSetProvider::new(source.clone(), BoundaryCache::new());
    let mut session = MapSession::new(
        provider,
        ZoomThresholds::quatre_niveaux(),
        MetricKey::VacantPlus2Ans,
    );

    session.set_zoom(6.0);
    assert_eq!(session.refresh().await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(
        session.displayed().unwrap().granularity,
        Granularity::Region
    );
    let state_before = session.state().clone();

    // Panne du collaborateur, puis transition vers les communes
    source.set_failing(true);
    session.set_zoom(9.0);
    let err = session.refresh().await.unwrap_err();
    assert!(matches!(err, CartoError::DataUnavailable { .. }));

    // La vue précédente reste affichée, la navigation est inchangée
    assert_eq!(
        session.displayed().unwrap().granularity,
        Granularity::Region
    );
    assert_eq!(session.state(), &state_before);

    // Rétablissement : le rechargement complet réussit (l'échec n'a pas
    // été mis en cache)
    source.set_failing(false);
    assert_eq!(session.refresh().await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(
        session.displayed().unwrap().granularity,
        Granularity::Commune
    );
}

#[tokio::test]
async fn test_stale_load_is_discarded() {
    let source = fixtures();
    let provider = FeatureSetProvider::new(source, BoundaryCache::new());
    let mut session = MapSession::new(
        provider,
        ZoomThresholds::quatre_niveaux(),
        MetricKey::VacantPlus2Ans,
    );

    // Premier chargement (régions), aussitôt supplanté par un second
    // (communes) avant application
    session.set_zoom(6.0);
    let first_ticket = session.begin_load();
    let first_result = session.load_current().await;

    session.set_zoom(9.0);
    let second_ticket = session.begin_load();
    let second_result = session.load_current().await;

    assert_eq!(
        session.apply(first_ticket, first_result).unwrap(),
        RefreshOutcome::Superseded
    );
    assert!(session.displayed().is_none());

    assert_eq!(
        session.apply(second_ticket, second_result).unwrap(),
        RefreshOutcome::Applied
    );
    assert_eq!(
        session.displayed().unwrap().granularity,
        Granularity::Commune
    );
}

#[tokio::test]
async fn test_drill_up_after_click_restores_parent_level() {
    let source = fixtures();
    let provider = FeatureSetProvider::new(source, BoundaryCache::new());
    let mut session = MapSession::new(
        provider,
        ZoomThresholds::quatre_niveaux(),
        MetricKey::VacantPlus2Ans,
    );

    session.set_zoom(6.0);
    session.refresh().await.unwrap();
    let bretagne = session
        .displayed()
        .unwrap()
        .collection
        .by_code("53")
        .unwrap()
        .clone();
    session.click(&bretagne);
    session.refresh().await.unwrap();
    assert_eq!(session.state().granularity, Granularity::Departement);

    session.drill_up();
    // Le viewport redescend dans la plage régions
    assert_eq!(session.view().zoom, 6.0);
    assert_eq!(session.state().granularity, Granularity::Region);
    assert_eq!(session.state().scope.region, None);

    session.refresh().await.unwrap();
    assert_eq!(
        session.displayed().unwrap().granularity,
        Granularity::Region
    );
    assert_eq!(session.displayed().unwrap().collection.len(), 3);
}

#[tokio::test]
async fn test_click_region_then_refresh_shows_member_departements() {
    let source = fixtures();
    let provider = FeatureSetProvider::new(source, BoundaryCache::new());
    let mut session = MapSession::new(
        provider,
        ZoomThresholds::quatre_niveaux(),
        MetricKey::VacantPlus2Ans,
    );

    session.set_zoom(6.0);
    session.refresh().await.unwrap();

    let bretagne = session
        .displayed()
        .unwrap()
        .collection
        .by_code("53")
        .unwrap()
        .clone();
    session.click(&bretagne);

    // Le recentrage a poussé le zoom dans la plage départements
    assert_eq!(session.state().granularity, Granularity::Departement);
    assert_eq!(session.view().zoom, 7.5);

    session.refresh().await.unwrap();
    let displayed = session.displayed().unwrap();
    assert_eq!(displayed.granularity, Granularity::Departement);
    assert_eq!(displayed.collection.len(), 4);
}
