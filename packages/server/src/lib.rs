#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the street LVI map.
//!
//! Loads the street segment and municipal boundary files once at startup,
//! narrows the streets to the profile's street names, normalizes both into
//! `GeoJSON` `FeatureCollection`s, and serializes them. Requests to
//! `/api/streets` and `/api/boundaries` return those precomputed bodies
//! without touching the data again.

mod handlers;

use std::path::Path;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use geojson::FeatureCollection;
use street_lvi_dataset::filter::StreetFilter;
use street_lvi_dataset::load::load_collection;
use street_lvi_dataset::normalize::normalize;
use street_lvi_dataset::{DatasetError, profile};
use street_lvi_dataset_models::{DatasetProfile, VectorRecordCollection};
use street_lvi_server_models::ApiDatasetSummary;
use thiserror::Error;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 5000;

/// Errors that stop the server from starting or running.
#[derive(Debug, Error)]
pub enum ServerError {
    /// The datasets could not be prepared.
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    /// Binding or running the HTTP server failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A `FeatureCollection` ready to be served.
pub struct PreparedCollection {
    /// The normalized collection.
    pub collection: FeatureCollection,
    /// Its JSON serialization, shared by every response.
    pub body: web::Bytes,
    /// Feature count and extent for the health endpoint.
    pub summary: ApiDatasetSummary,
}

impl PreparedCollection {
    fn new(
        records: &VectorRecordCollection,
        profile: &DatasetProfile,
    ) -> Result<Self, DatasetError> {
        let collection = normalize(records, profile);
        let body = web::Bytes::from(serde_json::to_vec(&collection)?);
        let summary = ApiDatasetSummary::new(collection.features.len(), records.extent());

        Ok(Self {
            collection,
            body,
            summary,
        })
    }
}

/// Shared application state, built once before the server binds.
pub struct AppState {
    /// Filtered street segments.
    pub streets: PreparedCollection,
    /// All municipal boundaries.
    pub boundaries: PreparedCollection,
}

impl AppState {
    /// Loads both files named by `profile` and prepares them.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if either file fails to load, the street
    /// filter is invalid, or serialization fails.
    pub fn load(profile: &DatasetProfile) -> Result<Self, DatasetError> {
        log::info!("Preparing datasets for profile '{}'...", profile.id);

        let streets = load_collection(&profile.streets.path)?;
        let boundaries = load_collection(&profile.boundaries.path)?;

        Self::prepare(&streets, &boundaries, profile)
    }

    /// Filters the streets and normalizes both collections.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if the street filter is invalid or
    /// serialization fails.
    pub fn prepare(
        streets: &VectorRecordCollection,
        boundaries: &VectorRecordCollection,
        profile: &DatasetProfile,
    ) -> Result<Self, DatasetError> {
        let filter = StreetFilter::from_config(&profile.street_filter)?;
        let streets = PreparedCollection::new(&filter.apply(streets), profile)?;
        let boundaries = PreparedCollection::new(boundaries, profile)?;

        log::info!(
            "Prepared {} street features and {} boundary features",
            streets.summary.feature_count,
            boundaries.summary.feature_count
        );

        Ok(Self {
            streets,
            boundaries,
        })
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to listen on.
    pub bind_addr: String,
    /// Port to listen on.
    pub port: u16,
    /// Which datasets to serve.
    pub profile: DatasetProfile,
}

impl ServerConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if `STREET_LVI_PROFILE` names a profile
    /// file that cannot be read or parsed.
    pub fn from_env() -> Result<Self, DatasetError> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Reads configuration through `var`, which looks up a variable by
    /// name.
    ///
    /// Recognized variables: `BIND_ADDR`, `PORT`, `STREET_LVI_PROFILE`,
    /// `STREETS_PATH`, `BOUNDARIES_PATH`. An unparseable `PORT` falls back
    /// to [`DEFAULT_PORT`].
    ///
    /// # Errors
    ///
    /// Returns [`DatasetError`] if `STREET_LVI_PROFILE` names a profile
    /// file that cannot be read or parsed.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, DatasetError> {
        let mut profile = match var("STREET_LVI_PROFILE") {
            Some(path) => profile::load_from_file(Path::new(&path))?,
            None => profile::builtin(),
        };

        if let Some(path) = var("STREETS_PATH") {
            profile.streets.path = path.into();
        }
        if let Some(path) = var("BOUNDARIES_PATH") {
            profile.boundaries.path = path.into();
        }

        let bind_addr = var("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let port = var("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Ok(Self {
            bind_addr,
            port,
            profile,
        })
    }
}

/// Cross-origin policy: any origin may read, no credentials.
#[must_use]
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods(vec!["GET"])
        .allow_any_header()
        .max_age(3600)
}

/// Registers the API routes.
///
/// Each path is a resource of its own so other methods get a 405.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(web::resource("/health").route(web::get().to(handlers::health)))
            .service(web::resource("/streets").route(web::get().to(handlers::streets)))
            .service(web::resource("/boundaries").route(web::get().to(handlers::boundaries))),
    );
}

/// Prepares the datasets and runs the HTTP server until shutdown.
///
/// The listener is only bound after both collections are ready. This is
/// a regular async function; the caller provides the runtime (e.g. via
/// `#[actix_web::main]`).
///
/// # Errors
///
/// Returns [`ServerError`] if the datasets cannot be prepared or the
/// server fails to bind or run.
#[allow(clippy::future_not_send)]
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let state = web::Data::new(AppState::load(&config.profile)?);

    log::info!("Starting server on {}:{}", config.bind_addr, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .configure(configure)
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await?;

    Ok(())
}
