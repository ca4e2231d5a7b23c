//! Chargement des collections de features par granularité
//!
//! Le fournisseur compose : fetch des contours (délégué au collaborateur
//! externe via `GeoSource`), cache append-only des contours bruts,
//! filtrage par périmètre parent, puis enrichissement. L'enrichissement
//! n'est jamais mis en cache : les métriques synthétisées varient d'un
//! chargement à l'autre, c'est voulu.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use crate::error::CartoError;
use crate::metrics::MetricEnricher;
use crate::referentiel::{france, TerritoryRepository};
use crate::types::{FeatureCollection, Granularity, Scope};

/// Collaborateur externe fournissant les contours géographiques.
///
/// Contrat : pour un chemin de ressource, retourner une collection GeoJSON
/// ou échouer avec `DataUnavailable`. Aucune collection partielle.
pub trait GeoSource {
    fn fetch(
        &self,
        resource: &str,
    ) -> impl Future<Output = Result<geojson::FeatureCollection, CartoError>> + Send;
}

/// Cache append-only des contours bruts, clé = chemin de ressource.
///
/// Injecté à la construction du fournisseur pour garder les tests
/// déterministes. Les fetchs échoués ne sont jamais mis en cache.
#[derive(Debug, Default)]
pub struct BoundaryCache {
    entries: Mutex<HashMap<String, Arc<FeatureCollection>>>,
}

impl BoundaryCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, resource: &str) -> Option<Arc<FeatureCollection>> {
        self.entries.lock().unwrap().get(resource).cloned()
    }

    fn insert(&self, resource: &str, collection: FeatureCollection) -> Arc<FeatureCollection> {
        let arc = Arc::new(collection);
        self.entries
            .lock()
            .unwrap()
            .insert(resource.to_string(), Arc::clone(&arc));
        arc
    }

    /// Nombre de ressources en cache
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Fournit la collection de features applicable à un niveau et un périmètre
pub struct FeatureSetProvider<S: GeoSource> {
    source: S,
    cache: BoundaryCache,
    repo: TerritoryRepository,
    enricher: MetricEnricher,
}

impl<S: GeoSource> FeatureSetProvider<S> {
    pub fn new(source: S, cache: BoundaryCache) -> Self {
        let repo = TerritoryRepository::new();
        Self {
            source,
            cache,
            repo,
            enricher: MetricEnricher::new(repo),
        }
    }

    /// Charge la collection pour un niveau, filtrée par le périmètre parent.
    ///
    /// Chaque feature retournée est passée par l'enrichisseur. Un échec du
    /// fetch laisse le cache intact et remonte `DataUnavailable` ; aucune
    /// collection partielle n'est jamais retournée.
    pub async fn load(
        &self,
        granularity: Granularity,
        scope: &Scope,
    ) -> Result<FeatureCollection, CartoError> {
        let collection = match granularity {
            Granularity::Nation => self.load_nation().await?,
            Granularity::Region => (*self.fetch_cached(Granularity::Region.resource()).await?)
                .clone(),
            Granularity::Departement => {
                let all = self.fetch_cached(Granularity::Departement.resource()).await?;
                match &scope.region {
                    Some(region) => filter_by_membership(&all, self.repo.members_of(region)),
                    None => (*all).clone(),
                }
            }
            Granularity::Commune => {
                let all = self.fetch_cached(Granularity::Commune.resource()).await?;
                match &scope.departement {
                    Some(dep) => filter_by_prefix(&all, dep),
                    None => (*all).clone(),
                }
            }
        };

        debug!(
            granularity = %granularity,
            features = collection.len(),
            "Feature set loaded"
        );
        Ok(self.enricher.enrich_collection(collection, granularity))
    }

    /// Vue France entière : une feature synthétique unique, contours du
    /// collaborateur, métriques nationales pré-attachées
    async fn load_nation(&self) -> Result<FeatureCollection, CartoError> {
        let resource = Granularity::Nation.resource();
        let contours = self.fetch_cached(resource).await?;
        let geometry = contours
            .features
            .first()
            .and_then(|f| f.geometry.clone())
            .ok_or_else(|| {
                CartoError::data_unavailable(resource, "no national contour in collection")
            })?;

        Ok(FeatureCollection::new(vec![france::national_feature(Some(
            geometry,
        ))]))
    }

    /// Fetch avec cache ; seuls les fetchs réussis sont mémorisés
    async fn fetch_cached(&self, resource: &str) -> Result<Arc<FeatureCollection>, CartoError> {
        if let Some(cached) = self.cache.get(resource) {
            debug!(resource, "Boundary cache hit");
            return Ok(cached);
        }

        let raw = self.source.fetch(resource).await?;
        let collection = FeatureCollection::from_geojson(raw);
        info!(resource, features = collection.len(), "Boundaries fetched");
        Ok(self.cache.insert(resource, collection))
    }
}

/// Sous-ensemble des départements appartenant à la région sélectionnée
fn filter_by_membership(all: &FeatureCollection, members: &[&str]) -> FeatureCollection {
    FeatureCollection::new(
        all.features
            .iter()
            .filter(|f| members.contains(&f.code.as_str()))
            .cloned()
            .collect(),
    )
}

/// Sous-ensemble des communes dont le code est préfixé par le département
fn filter_by_prefix(all: &FeatureCollection, departement: &str) -> FeatureCollection {
    FeatureCollection::new(
        all.features
            .iter()
            .filter(|f| f.code.starts_with(departement))
            .cloned()
            .collect(),
    )
}

/// Jeton de supersession des chargements : le dernier demandé gagne.
///
/// Pas de primitive d'annulation ; un résultat périmé est simplement
/// écarté par l'appelant via `is_current`.
#[derive(Debug, Default)]
pub struct LoadSequencer {
    current: AtomicU64,
}

/// Ticket identifiant une génération de chargement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl LoadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Démarre une nouvelle génération ; les tickets antérieurs deviennent
    /// périmés
    pub fn begin(&self) -> LoadTicket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { generation }
    }

    /// Le ticket correspond-il toujours au dernier chargement demandé ?
    pub fn is_current(&self, ticket: &LoadTicket) -> bool {
        self.current.load(Ordering::SeqCst) == ticket.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Feature;

    #[test]
    fn test_sequencer_last_request_wins() {
        let sequencer = LoadSequencer::new();
        let first = sequencer.begin();
        let second = sequencer.begin();

        assert!(!sequencer.is_current(&first));
        assert!(sequencer.is_current(&second));
    }

    #[test]
    fn test_filter_by_prefix() {
        let features = vec![
            Feature {
                code: "75056".to_string(),
                nom: "Paris".to_string(),
                geometry: None,
                properties: Default::default(),
            },
            Feature {
                code: "22070".to_string(),
                nom: "Guingamp".to_string(),
                geometry: None,
                properties: Default::default(),
            },
        ];
        let filtered = filter_by_prefix(&FeatureCollection::new(features), "75");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.features[0].code, "75056");
    }

    #[test]
    fn test_filter_by_membership_empty_members() {
        let features = vec![Feature {
            code: "22".to_string(),
            nom: "Côtes-d'Armor".to_string(),
            geometry: None,
            properties: Default::default(),
        }];
        let filtered = filter_by_membership(&FeatureCollection::new(features), &[]);
        assert!(filtered.is_empty());
    }
}
