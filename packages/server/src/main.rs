#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Street LVI API server binary.
//!
//! Configuration comes from the environment (`BIND_ADDR`, `PORT`,
//! `STREET_LVI_PROFILE`, `STREETS_PATH`, `BOUNDARIES_PATH`); logging is
//! controlled by `RUST_LOG`.

use street_lvi_server::{ServerConfig, run_server};

#[actix_web::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    let config = ServerConfig::from_env()?;
    run_server(config).await?;

    Ok(())
}
