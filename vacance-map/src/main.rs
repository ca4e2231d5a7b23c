//! Point d'entrée CLI pour vacance-map

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;
mod config;
mod export;
mod source;

use cli::Commands;

/// Carte des logements vacants de plus de 2 ans en France
#[derive(Parser)]
#[command(name = "vacance-map")]
#[command(author, version)]
#[command(about = "Rendre la carte choroplèthe des logements vacants en GeoJSON stylé")]
#[command(
    long_about = "Carte des logements vacants de plus de 2 ans en France.\n\nQuatre niveaux emboîtés (France, régions, départements, communes), pilotés par la valeur de zoom. Les contours open data sont lus depuis un répertoire local."
)]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Render {
            data,
            zoom,
            region,
            departement,
            metric,
            config,
            no_labels,
            output,
        } => {
            info!(zoom, "Commande render");
            cli::cmd_render(
                data,
                zoom,
                region,
                departement,
                &metric,
                &config,
                no_labels,
                &output,
            )
            .await?;
        }
        Commands::Stats {
            data,
            level,
            region,
            departement,
            metric,
            territory,
        } => {
            info!(level = level.as_str(), "Commande stats");
            cli::cmd_stats(data, &level, region, departement, &metric, territory).await?;
        }
        Commands::Search { data, query } => {
            info!(query = query.as_str(), "Commande search");
            cli::cmd_search(data, &query).await?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
