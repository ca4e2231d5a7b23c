//! Types de données pour le crate carto

use geo::Coord;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Niveau de granularité géographique, du plus grossier au plus fin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Granularity {
    /// France entière (une seule feature synthétique)
    Nation,
    /// 18 régions (13 métropolitaines + 5 outre-mer)
    Region,
    /// 101 départements
    Departement,
    /// ~35 000 communes
    Commune,
}

impl Granularity {
    /// Niveau immédiatement plus fin, None au niveau commune
    pub fn finer(self) -> Option<Granularity> {
        match self {
            Granularity::Nation => Some(Granularity::Region),
            Granularity::Region => Some(Granularity::Departement),
            Granularity::Departement => Some(Granularity::Commune),
            Granularity::Commune => None,
        }
    }

    /// Niveau immédiatement plus grossier, None au niveau nation
    pub fn coarser(self) -> Option<Granularity> {
        match self {
            Granularity::Nation => None,
            Granularity::Region => Some(Granularity::Nation),
            Granularity::Departement => Some(Granularity::Region),
            Granularity::Commune => Some(Granularity::Departement),
        }
    }

    /// Libellé d'affichage
    pub fn label(self) -> &'static str {
        match self {
            Granularity::Nation => "France entière",
            Granularity::Region => "Régions",
            Granularity::Departement => "Départements",
            Granularity::Commune => "Communes",
        }
    }

    /// Ressource GeoJSON correspondante chez le fournisseur de contours
    pub fn resource(self) -> &'static str {
        match self {
            Granularity::Nation => "france.geojson",
            Granularity::Region => "regions.geojson",
            Granularity::Departement => "departements.geojson",
            Granularity::Commune => "communes.geojson",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Granularity::Nation => "nation",
            Granularity::Region => "region",
            Granularity::Departement => "departement",
            Granularity::Commune => "commune",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nation" | "france" => Ok(Granularity::Nation),
            "region" | "regions" => Ok(Granularity::Region),
            "departement" | "departements" => Ok(Granularity::Departement),
            "commune" | "communes" => Ok(Granularity::Commune),
            _ => Err(format!(
                "Unknown granularity: '{}'. Use: nation, region, departement, commune",
                s
            )),
        }
    }
}

/// Métrique affichable, identifiée par son nom de propriété GeoJSON
///
/// Les noms de propriétés sont le contrat avec la couche de rendu : ils
/// reprennent tels quels ceux des jeux de données sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricKey {
    /// Logements vacants depuis plus de 2 ans (millésime 2025)
    VacantPlus2Ans,
    /// Logements vacants pour 1000 habitants
    TauxVacancePour1000,
    /// Logements vacants par km²
    VacanceParKm2,
    /// Densité de population (hab/km²)
    Densite,
    /// Population
    Population,
    /// Superficie en km²
    Superficie,
}

impl MetricKey {
    /// Nom de la propriété GeoJSON portant la valeur
    pub fn property(self) -> &'static str {
        match self {
            MetricKey::VacantPlus2Ans => "pp_vacant_plus_2ans_25",
            MetricKey::TauxVacancePour1000 => "tauxVacancePour1000",
            MetricKey::VacanceParKm2 => "vacanceParKm2",
            MetricKey::Densite => "densite",
            MetricKey::Population => "population",
            MetricKey::Superficie => "superficie",
        }
    }

    /// Libellé d'affichage
    pub fn label(self) -> &'static str {
        match self {
            MetricKey::VacantPlus2Ans => "Logements vacants +2 ans",
            MetricKey::TauxVacancePour1000 => "Vacance pour 1000 habitants",
            MetricKey::VacanceParKm2 => "Vacance par km²",
            MetricKey::Densite => "Densité de population",
            MetricKey::Population => "Population",
            MetricKey::Superficie => "Superficie",
        }
    }
}

impl FromStr for MetricKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pp_vacant_plus_2ans_25" | "vacants" => Ok(MetricKey::VacantPlus2Ans),
            "tauxVacancePour1000" | "taux" => Ok(MetricKey::TauxVacancePour1000),
            "vacanceParKm2" | "vacance-km2" => Ok(MetricKey::VacanceParKm2),
            "densite" => Ok(MetricKey::Densite),
            "population" => Ok(MetricKey::Population),
            "superficie" => Ok(MetricKey::Superficie),
            _ => Err(format!(
                "Unknown metric: '{}'. Use: vacants, taux, vacance-km2, densite, population, superficie",
                s
            )),
        }
    }
}

/// Une feature géographique (territoire) à un niveau de granularité donné
///
/// Les propriétés inconnues de la source sont conservées telles quelles ;
/// l'enrichissement fusionne de nouvelles propriétés sans en retirer.
#[derive(Debug, Clone)]
pub struct Feature {
    /// Code du territoire (code INSEE région/département/commune)
    pub code: String,

    /// Nom d'affichage
    pub nom: String,

    /// Contour (Polygon ou MultiPolygon), opaque au-delà du centroïde
    pub geometry: Option<geojson::Geometry>,

    /// Propriétés GeoJSON, enrichies en place
    pub properties: Map<String, Value>,
}

impl Feature {
    /// Construit une feature depuis une feature GeoJSON source.
    ///
    /// Retourne None si `code` ou `nom` manque dans les propriétés.
    pub fn from_geojson(feature: geojson::Feature) -> Option<Self> {
        let properties = feature.properties.unwrap_or_default();
        let code = string_property(&properties, "code")?;
        let nom = string_property(&properties, "nom")?;

        Some(Self {
            code,
            nom,
            geometry: feature.geometry,
            properties,
        })
    }

    /// Convertit vers une feature GeoJSON, code et nom garantis présents
    pub fn into_geojson(self) -> geojson::Feature {
        let mut properties = self.properties;
        properties.insert("code".to_string(), Value::String(self.code));
        properties.insert("nom".to_string(), Value::String(self.nom));

        geojson::Feature {
            bbox: None,
            geometry: self.geometry,
            id: None,
            properties: Some(properties),
            foreign_members: None,
        }
    }

    /// Valeur numérique d'une métrique, None si absente ou non numérique
    pub fn metric(&self, key: MetricKey) -> Option<f64> {
        self.properties.get(key.property()).and_then(Value::as_f64)
    }

    /// Insère ou remplace une propriété
    pub fn set_property(&mut self, key: &str, value: Value) {
        self.properties.insert(key.to_string(), value);
    }
}

/// Lit une propriété texte, en tolérant les codes numériques des sources
fn string_property(properties: &Map<String, Value>, key: &str) -> Option<String> {
    match properties.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Collection de features d'un même niveau de granularité
#[derive(Debug, Clone, Default)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    pub fn new(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Construit depuis une FeatureCollection GeoJSON.
    ///
    /// Les features sans code ou sans nom sont ignorées avec un warning.
    pub fn from_geojson(collection: geojson::FeatureCollection) -> Self {
        let total = collection.features.len();
        let features: Vec<Feature> = collection
            .features
            .into_iter()
            .filter_map(Feature::from_geojson)
            .collect();

        let skipped = total - features.len();
        if skipped > 0 {
            tracing::warn!(skipped, total, "Features without code/nom skipped");
        }

        Self { features }
    }

    /// Convertit vers une FeatureCollection GeoJSON
    pub fn into_geojson(self) -> geojson::FeatureCollection {
        geojson::FeatureCollection {
            bbox: None,
            features: self
                .features
                .into_iter()
                .map(Feature::into_geojson)
                .collect(),
            foreign_members: None,
        }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Recherche une feature par code
    pub fn by_code(&self, code: &str) -> Option<&Feature> {
        self.features.iter().find(|f| f.code == code)
    }
}

/// Périmètre parent restreignant le chargement des features enfants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Scope {
    /// Région sélectionnée (code ou nom), filtre les départements
    pub region: Option<String>,

    /// Département sélectionné (code), filtre les communes
    pub departement: Option<String>,
}

impl Scope {
    pub fn is_empty(&self) -> bool {
        self.region.is_none() && self.departement.is_none()
    }
}

/// Position de la caméra : centre et zoom continus
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
    pub center: Coord<f64>,
    pub zoom: f64,
}

/// Centre géographique approximatif de la France métropolitaine
pub const FRANCE_CENTER: Coord<f64> = Coord {
    x: 2.2137,
    y: 46.6034,
};

impl ViewState {
    /// Vue initiale : France entière
    pub fn initial() -> Self {
        Self {
            center: FRANCE_CENTER,
            zoom: 4.5,
        }
    }
}
