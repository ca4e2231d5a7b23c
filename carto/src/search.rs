//! Recherche approximative de territoires
//!
//! Utilitaire autonome : score de similarité à paliers (exact, préfixe,
//! inclusion) puis distance de Levenshtein, sur les trois niveaux
//! région/département/commune. Ne produit qu'un identifiant et un
//! centroïde : la navigation fait le reste.

use geo::Point;

use crate::centroid::approximate_centroid;
use crate::types::{FeatureCollection, Granularity, FRANCE_CENTER};

/// Longueur minimale de requête
const MIN_QUERY_LEN: usize = 2;
/// Score minimal régions/départements
const SCORE_MIN: f64 = 30.0;
/// Score minimal communes (seuil plus élevé : ~35 000 candidates)
const COMMUNE_SCORE_MIN: f64 = 40.0;
/// Nombre maximal de communes retenues
const COMMUNE_CAP: usize = 20;
/// Nombre maximal de résultats retournés
const RESULT_CAP: usize = 50;

/// Résultat de recherche : territoire et point de recentrage
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub kind: Granularity,
    pub code: String,
    pub nom: String,
    /// Score de pertinence dans [0, 100]
    pub score: f64,
    pub centroid: Point<f64>,
}

/// Distance de Levenshtein entre deux chaînes (sur les chars)
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut previous: Vec<usize> = (0..=a.len()).collect();
    let mut current = vec![0; a.len() + 1];

    for (j, bc) in b.iter().enumerate() {
        current[0] = j + 1;
        for (i, ac) in a.iter().enumerate() {
            let substitution = previous[i] + usize::from(ac != bc);
            current[i + 1] = substitution
                .min(previous[i + 1] + 1)
                .min(current[i] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[a.len()]
}

/// Score de similarité requête/cible dans [0, 100].
///
/// Paliers : égalité 100, préfixe 90, inclusion 80 ; sinon un score
/// dérivé de la distance de Levenshtein, plafonné à 70.
pub fn similarity(query: &str, target: &str) -> f64 {
    let query = query.to_lowercase();
    let query = query.trim();
    let target = target.to_lowercase();
    let target = target.trim();

    if target == query {
        return 100.0;
    }
    if target.starts_with(query) {
        return 90.0;
    }
    if target.contains(query) {
        return 80.0;
    }

    let distance = levenshtein(query, target);
    let max_len = query.chars().count().max(target.chars().count());
    if max_len == 0 {
        return 0.0;
    }

    (((max_len - distance.min(max_len)) as f64) / max_len as f64 * 70.0).max(0.0)
}

/// Recherche dans les trois collections.
///
/// Les communes sont filtrées plus sévèrement et plafonnées aux
/// `COMMUNE_CAP` meilleures ; l'ensemble est trié par score décroissant et
/// plafonné à `RESULT_CAP`.
pub fn search_territories(
    query: &str,
    regions: &FeatureCollection,
    departements: &FeatureCollection,
    communes: &FeatureCollection,
) -> Vec<SearchResult> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        return Vec::new();
    }

    let mut results = Vec::new();
    results.extend(collect_matches(query, regions, Granularity::Region, SCORE_MIN));
    results.extend(collect_matches(
        query,
        departements,
        Granularity::Departement,
        SCORE_MIN,
    ));

    let mut commune_results = collect_matches(query, communes, Granularity::Commune, COMMUNE_SCORE_MIN);
    sort_by_score(&mut commune_results);
    commune_results.truncate(COMMUNE_CAP);
    results.extend(commune_results);

    sort_by_score(&mut results);
    results.truncate(RESULT_CAP);
    results
}

fn collect_matches(
    query: &str,
    collection: &FeatureCollection,
    kind: Granularity,
    score_min: f64,
) -> Vec<SearchResult> {
    collection
        .features
        .iter()
        .filter_map(|feature| {
            // Le nom prime ; le code est aussi comparé pour les niveaux
            // où l'on tape volontiers « 29 » ou « 2A »
            let mut score = similarity(query, &feature.nom);
            if kind != Granularity::Region {
                score = score.max(similarity(query, &feature.code));
            }
            if score <= score_min {
                return None;
            }

            // Géométrie invalide : recentrage par défaut sur la France
            let centroid = approximate_centroid(feature)
                .unwrap_or_else(|_| Point::new(FRANCE_CENTER.x, FRANCE_CENTER.y));

            Some(SearchResult {
                kind,
                code: feature.code.clone(),
                nom: feature.nom.clone(),
                score,
                centroid,
            })
        })
        .collect()
}

fn sort_by_score(results: &mut [SearchResult]) {
    results.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
}
