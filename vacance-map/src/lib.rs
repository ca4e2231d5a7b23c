//! # vacance-map
//!
//! Rendu de la carte choroplèthe des logements vacants de plus de 2 ans
//! en France, vers du GeoJSON stylé prêt pour une couche de remplissage.
//!
//! ## Features
//!
//! - Contours open data lus depuis un répertoire local
//! - Presets de seuils de zoom (schémas trois/quatre niveaux)
//! - Export carte colorée + ancres de labels
//! - CLI simple
//!
//! ## Usage CLI
//!
//! ```bash
//! # Carte des départements bretons, colorée par vacance
//! vacance-map render --data ./data --zoom 7.2 --region 53 --output ./out
//!
//! # Statistiques régionales
//! vacance-map stats --data ./data --level region
//!
//! # Recherche d'un territoire
//! vacance-map search --data ./data "Finistère"
//! ```

pub mod config;
pub mod export;
pub mod source;

pub use config::MapConfig;
pub use source::FileSource;
