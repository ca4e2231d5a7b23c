//! Machine à états de navigation entre niveaux
//!
//! Aucun état terminal : la machine circule librement entre les niveaux
//! pendant toute la session. Les transitions descendantes (clic) calculent
//! une cible de recentrage ; les remontées nettoient les périmètres du
//! niveau quitté et de tous les niveaux plus fins.

use geo::Point;
use tracing::warn;

use crate::centroid::approximate_centroid;
use crate::types::{Feature, Granularity, Scope, ViewState};
use crate::zoom::ZoomThresholds;

/// État de navigation courant
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub granularity: Granularity,
    pub scope: Scope,
    /// Code de la feature sélectionnée, le cas échéant
    pub selected: Option<String>,
}

impl NavigationState {
    /// État initial : racine du schéma, aucun périmètre, aucune sélection
    pub fn initial(thresholds: &ZoomThresholds) -> Self {
        Self {
            granularity: thresholds.root(),
            scope: Scope::default(),
            selected: None,
        }
    }
}

/// Cible de recentrage après un drill-down
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Recenter {
    /// Centroïde approximatif de la feature cliquée
    pub center: Point<f64>,
    /// Zoom cible, borné par le zoom maximal global
    pub zoom: f64,
}

/// Résultat d'un clic sur une feature
#[derive(Debug, Clone, PartialEq)]
pub enum ClickOutcome {
    /// Clic sur la feature déjà sélectionnée : désélection, niveau inchangé
    Deselected,
    /// Sélection au niveau le plus fin : pas de transition
    Selected,
    /// Descente d'un niveau ; recentrage absent si le centroïde n'est pas
    /// calculable (géométrie invalide)
    Drilled {
        to: Granularity,
        recenter: Option<Recenter>,
    },
}

/// Pilote les transitions de l'état de navigation
#[derive(Debug, Clone)]
pub struct Navigator {
    thresholds: ZoomThresholds,
    initial_view: ViewState,
}

impl Navigator {
    pub fn new(thresholds: ZoomThresholds) -> Self {
        Self {
            thresholds,
            initial_view: ViewState::initial(),
        }
    }

    pub fn initial_state(&self) -> NavigationState {
        NavigationState::initial(&self.thresholds)
    }

    /// Traite un clic sur une feature au niveau courant.
    ///
    /// Un clic sur la feature déjà sélectionnée la désélectionne sans
    /// changer de niveau. Sinon la feature devient le périmètre du niveau
    /// enfant et l'état descend d'un niveau, avec recentrage sur le
    /// centroïde approximatif.
    pub fn click(
        &self,
        state: &mut NavigationState,
        feature: &Feature,
        current_zoom: f64,
    ) -> ClickOutcome {
        if state.selected.as_deref() == Some(feature.code.as_str()) {
            state.selected = None;
            return ClickOutcome::Deselected;
        }
        state.selected = Some(feature.code.clone());

        let target = match state.granularity {
            Granularity::Nation => Granularity::Region,
            Granularity::Region => {
                state.scope.region = Some(feature.code.clone());
                // Un nouveau périmètre région invalide tout périmètre plus fin
                state.scope.departement = None;
                Granularity::Departement
            }
            Granularity::Departement => {
                state.scope.departement = Some(feature.code.clone());
                Granularity::Commune
            }
            // Niveau le plus fin : sélection seule
            Granularity::Commune => return ClickOutcome::Selected,
        };

        state.granularity = target;
        ClickOutcome::Drilled {
            to: target,
            recenter: self.recenter_for(feature, target, current_zoom),
        }
    }

    /// Zoom cible : au moins le seuil d'entrée du niveau visé plus la
    /// marge, sinon le zoom courant incrémenté ; borné au zoom maximal
    fn recenter_for(
        &self,
        feature: &Feature,
        target: Granularity,
        current_zoom: f64,
    ) -> Option<Recenter> {
        let center = match approximate_centroid(feature) {
            Ok(point) => point,
            Err(e) => {
                warn!(code = feature.code.as_str(), error = %e, "Recenter skipped");
                return None;
            }
        };

        let mut zoom = current_zoom + self.thresholds.drill_increment;
        if let Some(threshold) = self.thresholds.entering(target) {
            zoom = zoom.max(threshold + self.thresholds.drill_margin);
        }

        Some(Recenter {
            center,
            zoom: zoom.min(self.thresholds.max_zoom),
        })
    }

    /// Remonte d'un niveau : nettoie le périmètre du niveau quitté et tous
    /// les périmètres plus fins, efface la sélection.
    ///
    /// Retourne la vue initiale quand on revient à la racine du schéma ;
    /// sans effet si on y est déjà.
    pub fn drill_up(&self, state: &mut NavigationState) -> Option<ViewState> {
        if state.granularity == self.thresholds.root() {
            return None;
        }

        state.selected = None;
        state.granularity = match state.granularity {
            Granularity::Commune => {
                state.scope.departement = None;
                Granularity::Departement
            }
            Granularity::Departement => {
                state.scope.region = None;
                state.scope.departement = None;
                Granularity::Region
            }
            Granularity::Region | Granularity::Nation => {
                state.scope = Scope::default();
                Granularity::Nation
            }
        };

        if state.granularity == self.thresholds.root() {
            Some(self.initial_view)
        } else {
            None
        }
    }

    /// Retour inconditionnel à l'état et à la vue initiaux
    pub fn reset(&self, state: &mut NavigationState) -> ViewState {
        *state = self.initial_state();
        self.initial_view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geojson::Value as GeoValue;
    use serde_json::Map;

    fn feature(code: &str) -> Feature {
        Feature {
            code: code.to_string(),
            nom: format!("Territoire {}", code),
            geometry: Some(geojson::Geometry::new(GeoValue::Polygon(vec![vec![
                vec![0.0, 0.0],
                vec![2.0, 0.0],
                vec![1.0, 3.0],
            ]]))),
            properties: Map::new(),
        }
    }

    fn navigator() -> Navigator {
        Navigator::new(ZoomThresholds::quatre_niveaux())
    }

    #[test]
    fn test_click_drills_down_and_sets_scope() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Region;

        let outcome = nav.click(&mut state, &feature("53"), 6.0);

        assert_eq!(state.granularity, Granularity::Departement);
        assert_eq!(state.scope.region.as_deref(), Some("53"));
        assert_eq!(state.selected.as_deref(), Some("53"));
        match outcome {
            ClickOutcome::Drilled { to, recenter } => {
                assert_eq!(to, Granularity::Departement);
                let recenter = recenter.unwrap();
                // max(6.0 + 1.5, 6.5 + 0.5) = 7.5
                assert_eq!(recenter.zoom, 7.5);
                assert!((recenter.center.x() - 1.0).abs() < 1e-9);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_recenter_zoom_capped_at_max() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Departement;

        match nav.click(&mut state, &feature("29"), 11.5) {
            ClickOutcome::Drilled { recenter, .. } => {
                // max(11.5 + 1.5, 8.5 + 0.5) = 13, borné à 12
                assert_eq!(recenter.unwrap().zoom, 12.0);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_click_selected_feature_toggles_off() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Commune;
        state.selected = Some("75056".to_string());

        let outcome = nav.click(&mut state, &feature("75056"), 9.0);

        assert_eq!(outcome, ClickOutcome::Deselected);
        assert_eq!(state.selected, None);
        // Le niveau ne change pas
        assert_eq!(state.granularity, Granularity::Commune);
    }

    #[test]
    fn test_click_at_commune_level_selects_only() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Commune;

        assert_eq!(nav.click(&mut state, &feature("75056"), 9.0), ClickOutcome::Selected);
        assert_eq!(state.granularity, Granularity::Commune);
        assert_eq!(state.selected.as_deref(), Some("75056"));
    }

    #[test]
    fn test_click_without_geometry_still_drills() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Region;

        let mut sans_contour = feature("53");
        sans_contour.geometry = None;

        match nav.click(&mut state, &sans_contour, 6.0) {
            ClickOutcome::Drilled { to, recenter } => {
                assert_eq!(to, Granularity::Departement);
                assert!(recenter.is_none());
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_drill_down_then_up_round_trip() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Departement;
        state.scope.region = Some("53".to_string());
        let before = state.clone();

        nav.click(&mut state, &feature("29"), 7.0);
        assert_eq!(state.granularity, Granularity::Commune);

        nav.drill_up(&mut state);
        assert_eq!(state.granularity, before.granularity);
        assert_eq!(state.scope, before.scope);
        // La sélection ne survit pas à l'aller-retour
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_drill_up_clears_scopes_below() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Commune;
        state.scope.region = Some("53".to_string());
        state.scope.departement = Some("29".to_string());

        nav.drill_up(&mut state);
        assert_eq!(state.granularity, Granularity::Departement);
        assert_eq!(state.scope.departement, None);
        assert_eq!(state.scope.region.as_deref(), Some("53"));

        nav.drill_up(&mut state);
        assert_eq!(state.granularity, Granularity::Region);
        assert!(state.scope.is_empty());
    }

    #[test]
    fn test_drill_up_to_root_resets_viewport() {
        let nav = navigator();
        let mut state = nav.initial_state();
        state.granularity = Granularity::Region;

        let view = nav.drill_up(&mut state);
        assert_eq!(state.granularity, Granularity::Nation);
        assert_eq!(view, Some(ViewState::initial()));

        // Déjà à la racine : sans effet
        assert_eq!(nav.drill_up(&mut state), None);
        assert_eq!(state.granularity, Granularity::Nation);
    }

    #[test]
    fn test_three_level_scheme_root_is_region() {
        let nav = Navigator::new(ZoomThresholds::trois_niveaux());
        let mut state = nav.initial_state();
        assert_eq!(state.granularity, Granularity::Region);

        nav.click(&mut state, &feature("53"), 6.0);
        nav.drill_up(&mut state);
        assert_eq!(state.granularity, Granularity::Region);
        assert_eq!(nav.drill_up(&mut state), None);
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let nav = navigator();
        let mut state = nav.initial_state();
        nav.click(&mut state, &feature("53"), 6.0);
        nav.click(&mut state, &feature("29"), 7.5);

        let view = nav.reset(&mut state);
        assert_eq!(state, nav.initial_state());
        assert_eq!(view, ViewState::initial());
    }
}
