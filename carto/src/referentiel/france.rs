//! Agrégats nationaux, calculés à partir des données régionales réelles

use serde_json::{json, Map, Value};

use super::{regions, TerritorySource};
use crate::types::Feature;

/// Totaux France entière (métropole + outre-mer)
pub const FRANCE: TerritorySource = TerritorySource {
    vacants: 1_308_071,
    population: 67_842_582,
    superficie: 643_801,
};

/// Nombre de régions (13 métropolitaines + 5 outre-mer)
pub const NB_REGIONS: u32 = 18;
/// Nombre de départements
pub const NB_DEPARTEMENTS: u32 = 101;
/// Nombre approximatif de communes
pub const NB_COMMUNES: u32 = 34_945;

/// Estimation du parc : ~0.45 logement par habitant
const LOGEMENTS_PAR_HABITANT: f64 = 0.45;

/// Totaux outre-mer seuls, agrégés depuis les cinq entrées DOM-TOM
pub fn outre_mer_rollup() -> TerritorySource {
    let mut rollup = TerritorySource {
        vacants: 0,
        population: 0,
        superficie: 0,
    };
    for (nom, source) in regions::REGIONS {
        if regions::is_domtom(nom) {
            rollup.vacants += source.vacants;
            rollup.population += source.population;
            rollup.superficie += source.superficie;
        }
    }
    rollup
}

/// Propriétés pré-attachées de la feature nationale.
///
/// Contrairement aux autres niveaux, les métriques nationales sont calculées
/// à la création de la feature ; l'enrichisseur ne les touche pas.
pub fn national_properties() -> Map<String, Value> {
    let mut properties = Map::new();
    let vacants = FRANCE.vacants as f64;
    let population = FRANCE.population as f64;
    let superficie = FRANCE.superficie as f64;

    properties.insert("pp_vacant_plus_2ans_25".into(), json!(FRANCE.vacants));
    properties.insert("population".into(), json!(FRANCE.population));
    properties.insert("superficie".into(), json!(FRANCE.superficie));
    properties.insert(
        "tauxVacancePour1000".into(),
        json!((vacants / population * 1000.0).round()),
    );
    properties.insert("densite".into(), json!((population / superficie).round()));
    properties.insert(
        "vacanceParKm2".into(),
        json!((vacants / superficie * 100.0).round() / 100.0),
    );
    properties.insert(
        "pourcentageVacance".into(),
        json!((vacants / (population * LOGEMENTS_PAR_HABITANT) * 100.0 * 100.0).round() / 100.0),
    );
    properties.insert("nbRegions".into(), json!(NB_REGIONS));
    properties.insert("nbDepartements".into(), json!(NB_DEPARTEMENTS));
    properties.insert("nbCommunes".into(), json!(NB_COMMUNES));

    let outre_mer = outre_mer_rollup();
    properties.insert("vacantsOutreMer".into(), json!(outre_mer.vacants));
    properties.insert("populationOutreMer".into(), json!(outre_mer.population));

    properties.insert("donnees_reelles".into(), json!(true));
    properties
}

/// Construit la feature nationale synthétique autour du contour fourni
pub fn national_feature(geometry: Option<geojson::Geometry>) -> Feature {
    Feature {
        code: "FR".to_string(),
        nom: "France".to_string(),
        geometry,
        properties: national_properties(),
    }
}
