//! # carto
//!
//! Moteur de carte choroplèthe des logements vacants en France :
//! résolution du niveau de granularité selon le zoom, chargement des
//! features par périmètre parent, enrichissement des métriques et échelle
//! de couleurs.
//!
//! ## Features
//!
//! - Quatre niveaux emboîtés : France entière → régions → départements → communes
//! - Seuils de zoom configurables (schémas à trois ou quatre niveaux)
//! - Gradient quatre bandes vert → rouge, normalisé sur la collection affichée
//! - Machine à états de navigation (drill-down, drill-up, recentrage)
//! - Chargements asynchrones avec supersession (le dernier demandé gagne)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use carto::provider::{BoundaryCache, FeatureSetProvider};
//! use carto::types::{MetricKey, Scope};
//! use carto::zoom::ZoomThresholds;
//!
//! let provider = FeatureSetProvider::new(source, BoundaryCache::new());
//! let thresholds = ZoomThresholds::quatre_niveaux();
//!
//! let view = carto::render_view(
//!     &provider,
//!     &thresholds,
//!     7.2,
//!     &Scope { region: Some("53".into()), departement: None },
//!     MetricKey::VacantPlus2Ans,
//!     true,
//! )
//! .await?;
//! println!("{} : {} features", view.granularity, view.collection.len());
//! ```

pub mod centroid;
pub mod colors;
pub mod error;
pub mod metrics;
pub mod navigation;
pub mod provider;
pub mod referentiel;
pub mod search;
pub mod session;
pub mod stats;
pub mod types;
pub mod zoom;

pub use error::CartoError;
pub use types::{Feature, FeatureCollection, Granularity, MetricKey, Scope, ViewState};

use colors::ColorScale;
use provider::{FeatureSetProvider, GeoSource};
use zoom::ZoomThresholds;

/// Vue rendue : la collection colorée et ses annexes pour la couche de rendu
#[derive(Debug, Clone)]
pub struct RenderedView {
    /// Niveau résolu depuis le zoom
    pub granularity: Granularity,
    /// Collection enrichie, propriété `color` injectée
    pub collection: FeatureCollection,
    /// Points d'ancrage des labels (un par feature valide)
    pub labels: FeatureCollection,
    /// Échelle active (min/max pour la légende)
    pub scale: ColorScale,
    /// Labels affichables à ce zoom
    pub labels_visible: bool,
}

/// Pipeline complet : résolution du niveau, chargement, enrichissement,
/// coloration, ancres de labels.
///
/// # Errors
///
/// Propage `DataUnavailable` si le fetch des contours échoue ; aucune vue
/// partielle n'est produite.
pub async fn render_view<S: GeoSource>(
    provider: &FeatureSetProvider<S>,
    thresholds: &ZoomThresholds,
    zoom: f64,
    scope: &Scope,
    metric: MetricKey,
    labels_enabled: bool,
) -> Result<RenderedView, CartoError> {
    let level = zoom::resolve(thresholds, zoom, labels_enabled);
    let mut collection = provider.load(level.granularity, scope).await?;

    let scale = if level.granularity == Granularity::Nation {
        // Un seul point de donnée : le gradient n'a pas de sens
        let value = collection
            .features
            .first()
            .and_then(|f| f.metric(metric))
            .unwrap_or(0.0);
        ColorScale::nation(value)
    } else {
        ColorScale::compute(&collection, metric)
    };
    scale.apply(&mut collection, metric);

    let labels = centroid::label_anchors(&collection);

    Ok(RenderedView {
        granularity: level.granularity,
        collection,
        labels,
        scale,
        labels_visible: level.labels_visible,
    })
}
