//! Définition et implémentation des commandes CLI
//!
//! - `render`: carte choroplèthe stylée → GeoJSON (carte + ancres de labels)
//! - `stats`: statistiques territoriales d'un niveau
//! - `search`: recherche approximative d'un territoire

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Subcommand;
use tracing::info;

use carto::colors::ColorScale;
use carto::provider::{BoundaryCache, FeatureSetProvider};
use carto::search::search_territories;
use carto::stats::{collection_stats, format_fr};
use carto::types::{FeatureCollection, Granularity, MetricKey, Scope};

use crate::config::MapConfig;
use crate::export;
use crate::source::FileSource;

#[derive(Subcommand)]
pub enum Commands {
    /// Render the choropleth for a zoom value to styled GeoJSON
    Render {
        /// Directory holding the boundary files (regions.geojson, ...)
        /// Défaut : env VACANCE_DATA_DIR
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Continuous zoom value; decides the displayed granularity
        #[arg(short, long)]
        zoom: f64,

        /// Region scope (code or name), filters the departement level
        #[arg(long)]
        region: Option<String>,

        /// Departement scope (code), filters the commune level
        #[arg(long)]
        departement: Option<String>,

        /// Metric to color by (vacants, taux, vacance-km2, densite, ...)
        #[arg(short, long, default_value = "vacants")]
        metric: String,

        /// Config preset name (quatre-niveaux/trois-niveaux) or path to a JSON config
        #[arg(long, default_value = "quatre-niveaux")]
        config: String,

        /// Skip label anchors (labels.geojson vide)
        #[arg(long)]
        no_labels: bool,

        /// Output directory for the styled GeoJSON files
        #[arg(short, long, default_value = "./out")]
        output: PathBuf,
    },

    /// Print territory statistics for a granularity level
    Stats {
        /// Directory holding the boundary files. Défaut : env VACANCE_DATA_DIR
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Granularity level (nation, region, departement, commune)
        #[arg(short, long, default_value = "region")]
        level: String,

        /// Region scope (code or name)
        #[arg(long)]
        region: Option<String>,

        /// Departement scope (code)
        #[arg(long)]
        departement: Option<String>,

        /// Active metric for the extrema
        #[arg(short, long, default_value = "vacants")]
        metric: String,

        /// Print the full property set of one territory (by code)
        #[arg(long)]
        territory: Option<String>,
    },

    /// Fuzzy-search territories by name or code
    Search {
        /// Directory holding the boundary files. Défaut : env VACANCE_DATA_DIR
        #[arg(short, long)]
        data: Option<PathBuf>,

        /// Query, at least 2 characters
        query: String,
    },
}

/// Répertoire de données : argument CLI, sinon env VACANCE_DATA_DIR
fn resolve_data_dir(data: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = data {
        return Ok(dir);
    }
    std::env::var_os("VACANCE_DATA_DIR")
        .map(PathBuf::from)
        .context("No data directory: pass --data or set VACANCE_DATA_DIR")
}

fn parse_metric(metric: &str) -> Result<MetricKey> {
    metric.parse().map_err(|e: String| anyhow::anyhow!(e))
}

fn build_provider(data_dir: &Path) -> FeatureSetProvider<FileSource> {
    FeatureSetProvider::new(FileSource::new(data_dir), BoundaryCache::new())
}

/// Exécute la commande render
#[allow(clippy::too_many_arguments)]
pub async fn cmd_render(
    data: Option<PathBuf>,
    zoom_value: f64,
    region: Option<String>,
    departement: Option<String>,
    metric: &str,
    config_spec: &str,
    no_labels: bool,
    output: &Path,
) -> Result<()> {
    let data_dir = resolve_data_dir(data)?;
    let metric = parse_metric(metric)?;
    let config = MapConfig::resolve(config_spec)?;

    let scope = Scope {
        region,
        departement,
    };

    info!(
        data = %data_dir.display(),
        zoom = zoom_value,
        config = config_spec,
        "Starting render"
    );

    let provider = build_provider(&data_dir);
    let labels_enabled = !no_labels && config.show_labels;
    let view = carto::render_view(
        &provider,
        &config.thresholds,
        zoom_value,
        &scope,
        metric,
        labels_enabled,
    )
    .await
    .context("Render failed; the previous output files are left untouched")?;

    let stats = collection_stats(&view.collection, metric);
    let (carte_path, labels_path) = export::export_view(output, view.clone())?;

    println!("=== Rendu {} ===", view.granularity.label());
    println!("Données: {}", data_dir.display());
    println!("Zoom: {} → {}", zoom_value, view.granularity.label());
    match (&scope.region, &scope.departement) {
        (Some(r), _) => println!("Périmètre: région {}", r),
        (None, Some(d)) => println!("Périmètre: département {}", d),
        (None, None) => println!("Périmètre: aucun"),
    }
    println!("Métrique: {} ({})", metric.label(), metric.property());
    println!("Features: {}", view.collection.len());
    println!(
        "Étendue: {} – {}",
        format_fr(view.scale.min),
        format_fr(view.scale.max)
    );
    println!("Total vacants: {}", format_fr(stats.total_vacants));
    println!("Taux moyen: {} ‰", format_fr(stats.taux_moyen));
    println!(
        "Labels: {} ({})",
        if view.labels_visible { "visibles" } else { "masqués" },
        view.labels.len()
    );
    println!("Carte: {}", carte_path.display());
    println!("Ancres: {}", labels_path.display());

    info!(
        features = view.collection.len(),
        granularity = %view.granularity,
        "Render complete"
    );

    Ok(())
}

/// Exécute la commande stats
pub async fn cmd_stats(
    data: Option<PathBuf>,
    level: &str,
    region: Option<String>,
    departement: Option<String>,
    metric: &str,
    territory: Option<String>,
) -> Result<()> {
    let data_dir = resolve_data_dir(data)?;
    let metric = parse_metric(metric)?;
    let granularity: Granularity = level.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let scope = Scope {
        region,
        departement,
    };

    let provider = build_provider(&data_dir);
    let collection = provider
        .load(granularity, &scope)
        .await
        .context("Failed to load feature set")?;

    if let Some(code) = territory {
        return print_territory(&collection, &code);
    }

    let stats = collection_stats(&collection, metric);
    let scale = ColorScale::compute(&collection, metric);

    println!("=== Statistiques {} ===", granularity.label());
    println!("Territoires: {}", stats.count);
    println!("Total logements vacants +2 ans: {}", format_fr(stats.total_vacants));
    println!("Taux de vacance moyen: {} ‰", format_fr(stats.taux_moyen));
    println!(
        "{}: {} – {}",
        metric.label(),
        format_fr(scale.min),
        format_fr(scale.max)
    );

    // Les territoires les plus touchés pour la métrique active
    let mut ranked: Vec<_> = collection
        .features
        .iter()
        .filter_map(|f| f.metric(metric).map(|v| (f, v)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    println!("\nTop 5:");
    for (feature, value) in ranked.iter().take(5) {
        println!("  {} {} : {}", feature.code, feature.nom, format_fr(*value));
    }

    Ok(())
}

/// Affiche le jeu complet de propriétés d'un territoire
fn print_territory(collection: &FeatureCollection, code: &str) -> Result<()> {
    let feature = collection
        .by_code(code)
        .with_context(|| format!("No territory with code {} at this level", code))?;

    println!("=== {} ({}) ===", feature.nom, feature.code);
    let pretty = serde_json::to_string_pretty(&serde_json::Value::Object(
        feature.properties.clone(),
    ))?;
    println!("{}", pretty);
    Ok(())
}

/// Exécute la commande search
pub async fn cmd_search(data: Option<PathBuf>, query: &str) -> Result<()> {
    let data_dir = resolve_data_dir(data)?;
    let provider = build_provider(&data_dir);

    // Recherche sur les trois niveaux, chargés en parallèle, sans périmètre
    let scope = Scope::default();
    let (regions, departements, communes) = futures::try_join!(
        provider.load(Granularity::Region, &scope),
        provider.load(Granularity::Departement, &scope),
        provider.load(Granularity::Commune, &scope),
    )?;

    let results = search_territories(query, &regions, &departements, &communes);

    if results.is_empty() {
        println!("Aucun territoire trouvé pour « {} »", query);
        return Ok(());
    }

    println!("=== {} résultat(s) pour « {} » ===", results.len(), query);
    for result in &results {
        let kind = match result.kind {
            Granularity::Region => "Région",
            Granularity::Departement => "Département",
            Granularity::Commune => "Commune",
            Granularity::Nation => "France",
        };
        println!(
            "  {:3.0}%  {:<12} {:<6} {}  ({:.4}, {:.4})",
            result.score,
            kind,
            result.code,
            result.nom,
            result.centroid.x(),
            result.centroid.y()
        );
    }

    Ok(())
}
