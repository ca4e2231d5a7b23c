//! Session de carte : état affiché et supersession des chargements
//!
//! Modèle mono-thread piloté par événements. Les chargements sont
//! asynchrones et exclusifs par transition : une nouvelle demande rend la
//! précédente caduque, son résultat (succès ou échec) est écarté au moment
//! de l'application. Un échec n'altère ni la vue affichée ni l'état de
//! navigation : la dernière vue chargée reste en place, l'erreur est
//! remontée à l'appelant.

use tracing::{debug, info};

use crate::error::CartoError;
use crate::navigation::{ClickOutcome, NavigationState, Navigator};
use crate::provider::{FeatureSetProvider, GeoSource, LoadSequencer, LoadTicket};
use crate::types::{Feature, MetricKey, ViewState};
use crate::zoom::ZoomThresholds;
use crate::{render_view, RenderedView};

/// Issue de l'application d'un résultat de chargement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Le résultat est devenu la vue affichée
    Applied,
    /// Un chargement plus récent a été demandé entre-temps : résultat écarté
    Superseded,
}

/// Session interactive : navigation, viewport et vue affichée
pub struct MapSession<S: GeoSource> {
    provider: FeatureSetProvider<S>,
    sequencer: LoadSequencer,
    navigator: Navigator,
    thresholds: ZoomThresholds,
    state: NavigationState,
    view: ViewState,
    metric: MetricKey,
    labels_enabled: bool,
    displayed: Option<RenderedView>,
}

impl<S: GeoSource> MapSession<S> {
    pub fn new(provider: FeatureSetProvider<S>, thresholds: ZoomThresholds, metric: MetricKey) -> Self {
        let navigator = Navigator::new(thresholds.clone());
        let state = navigator.initial_state();
        Self {
            provider,
            sequencer: LoadSequencer::new(),
            navigator,
            thresholds,
            state,
            view: ViewState::initial(),
            metric,
            labels_enabled: true,
            displayed: None,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    /// Dernière vue appliquée avec succès
    pub fn displayed(&self) -> Option<&RenderedView> {
        self.displayed.as_ref()
    }

    pub fn set_metric(&mut self, metric: MetricKey) {
        self.metric = metric;
    }

    pub fn set_labels_enabled(&mut self, enabled: bool) {
        self.labels_enabled = enabled;
    }

    /// Met à jour le zoom du viewport (recalcul de niveau au prochain
    /// chargement ; la résolution elle-même est pure et immédiate)
    pub fn set_zoom(&mut self, zoom: f64) {
        self.view.zoom = zoom;
    }

    /// Démarre une génération de chargement ; les tickets antérieurs
    /// deviennent caducs
    pub fn begin_load(&self) -> LoadTicket {
        self.sequencer.begin()
    }

    /// Exécute le pipeline de rendu pour le viewport et le périmètre courants
    pub async fn load_current(&self) -> Result<RenderedView, CartoError> {
        render_view(
            &self.provider,
            &self.thresholds,
            self.view.zoom,
            &self.state.scope,
            self.metric,
            self.labels_enabled,
        )
        .await
    }

    /// Applique un résultat de chargement si son ticket est toujours le
    /// plus récent.
    ///
    /// Un résultat périmé est écarté sans examiner son contenu (succès ou
    /// échec). Un échec courant laisse la vue affichée intacte et remonte
    /// l'erreur, une seule fois.
    pub fn apply(
        &mut self,
        ticket: LoadTicket,
        result: Result<RenderedView, CartoError>,
    ) -> Result<RefreshOutcome, CartoError> {
        if !self.sequencer.is_current(&ticket) {
            debug!("Stale load discarded");
            return Ok(RefreshOutcome::Superseded);
        }

        let rendered = result?;
        info!(
            granularity = %rendered.granularity,
            features = rendered.collection.len(),
            "View applied"
        );
        // Les clics s'appliquent à la vue affichée : l'état de navigation
        // suit le niveau effectivement rendu
        self.state.granularity = rendered.granularity;
        self.displayed = Some(rendered);
        Ok(RefreshOutcome::Applied)
    }

    /// Chargement complet : begin + load + apply
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, CartoError> {
        let ticket = self.begin_load();
        let result = self.load_current().await;
        self.apply(ticket, result)
    }

    /// Clic sur une feature de la vue affichée ; le recentrage éventuel est
    /// appliqué au viewport
    pub fn click(&mut self, feature: &Feature) -> ClickOutcome {
        let outcome = self.navigator.click(&mut self.state, feature, self.view.zoom);
        if let ClickOutcome::Drilled {
            recenter: Some(recenter),
            ..
        } = &outcome
        {
            self.view = ViewState {
                center: geo::Coord {
                    x: recenter.center.x(),
                    y: recenter.center.y(),
                },
                zoom: recenter.zoom,
            };
        }
        outcome
    }

    /// Remonte d'un niveau.
    ///
    /// Le viewport redescend dans la plage de zoom du niveau cible ; au
    /// retour à la racine il reprend la vue initiale.
    pub fn drill_up(&mut self) {
        let left = self.state.granularity;
        if let Some(view) = self.navigator.drill_up(&mut self.state) {
            self.view = view;
        } else if self.state.granularity != left {
            if let Some(threshold) = self.thresholds.entering(left) {
                self.view.zoom = threshold - self.thresholds.drill_margin;
            }
        }
    }

    /// Retour inconditionnel à l'état initial.
    ///
    /// La vue affichée reste en place jusqu'au prochain chargement réussi.
    pub fn reset(&mut self) {
        self.view = self.navigator.reset(&mut self.state);
    }
}
