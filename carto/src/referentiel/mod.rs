//! Référentiel territorial en lecture seule
//!
//! Tables statiques (vacance, population, superficie) et appartenance
//! région ↔ départements. Deux tables de lookup indépendantes, clées
//! différemment dans les données sources : les régions par NOM, les
//! départements par code INSEE. La résolution nom ↔ code se fait une seule
//! fois ici, à la frontière du référentiel.

pub mod departements;
pub mod france;
pub mod regions;

use crate::types::Granularity;

/// Métriques sources d'un territoire (comptages bruts)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerritorySource {
    /// Logements vacants depuis plus de 2 ans
    pub vacants: u32,
    /// Population
    pub population: u32,
    /// Superficie en km²
    pub superficie: u32,
}

/// Provenance des métriques d'une feature.
///
/// L'absence d'entrée dans le référentiel n'est pas une erreur : l'appelant
/// bascule sur des métriques synthétisées. La variante rend le chemin
/// emprunté vérifiable dans les tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetricSource {
    /// Données réelles du référentiel
    Real(TerritorySource),
    /// Aucune entrée : métriques à synthétiser
    Synthesized,
}

impl MetricSource {
    pub fn is_real(&self) -> bool {
        matches!(self, MetricSource::Real(_))
    }
}

/// Accès en lecture seule au référentiel territorial
#[derive(Debug, Clone, Copy, Default)]
pub struct TerritoryRepository;

impl TerritoryRepository {
    pub fn new() -> Self {
        Self
    }

    /// Recherche les métriques d'un territoire.
    ///
    /// `identifier` est un nom de région, un code région, ou un code
    /// département selon la granularité. Les communes n'ont pas de table
    /// source : toujours `Synthesized`.
    pub fn lookup(&self, identifier: &str, granularity: Granularity) -> MetricSource {
        match granularity {
            Granularity::Nation => MetricSource::Real(france::FRANCE),
            Granularity::Region => {
                // Table clée par nom ; un code région (ou un code
                // département DOM-TOM) est résolu en nom d'abord.
                let by_name = regions::lookup(identifier);
                let source = by_name.or_else(|| {
                    regions::name_for_code(identifier).and_then(regions::lookup)
                });
                match source {
                    Some(s) => MetricSource::Real(*s),
                    None => MetricSource::Synthesized,
                }
            }
            Granularity::Departement => match departements::lookup(identifier) {
                Some(s) => MetricSource::Real(*s),
                None => MetricSource::Synthesized,
            },
            Granularity::Commune => MetricSource::Synthesized,
        }
    }

    /// Départements d'une région. `identifier` : nom ou code ; inconnue → vide
    pub fn members_of(&self, identifier: &str) -> &'static [&'static str] {
        let direct = regions::departements_of(identifier);
        if !direct.is_empty() {
            return direct;
        }
        match regions::name_for_code(identifier) {
            Some(nom) => regions::departements_of(nom),
            None => &[],
        }
    }

    /// Nom d'affichage d'une région à partir de son code
    pub fn region_name_for_code(&self, code: &str) -> Option<&'static str> {
        regions::name_for_code(code)
    }

    /// Région d'appartenance d'un département
    pub fn region_for_departement(&self, code: &str) -> Option<&'static str> {
        regions::region_of_departement(code)
    }

    /// Le territoire est-il un DOM-TOM (région = département) ?
    pub fn is_domtom(&self, nom: &str) -> bool {
        regions::is_domtom(nom)
    }
}
