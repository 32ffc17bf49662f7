use log::{error, info};

use udeastay_backend::{Backend, BackendConfig};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(path) => BackendConfig::with_data_directory(path),
        None => BackendConfig::from_env()?,
    };

    let backend = match Backend::new(config) {
        Ok(backend) => backend,
        Err(e) => {
            error!("Failed to load data directory: {:#}", e);
            return Err(e);
        }
    };

    let status = backend.status()?;
    info!(
        "🚀 UdeAStay backend ready: {} accommodations, {} active reservations",
        status.accommodations, status.active_reservations
    );
    println!("{}", serde_json::to_string_pretty(&status)?);
    Ok(())
}
