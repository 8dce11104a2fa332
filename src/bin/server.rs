use anyhow::{Context, Result};
use dotenvy::dotenv;
use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

use symposium::core::config::StoreBackend;
use symposium::core::Config;
use symposium::database::{Database, MemoryStore, RegistrationStore};
use symposium::features::mailer::{Mailer, ResendMailer};
use symposium::features::{get_features, get_service_version};
use symposium::http::{run_server, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Symposium Registration Server v{}...", get_service_version());
    for feature in get_features() {
        info!("feature: {} v{}", feature.name, feature.version);
    }

    let store: Arc<dyn RegistrationStore> = match config.store_backend {
        StoreBackend::Memory => {
            warn!("using the in-memory registration store, rows are lost on restart");
            Arc::new(MemoryStore::new())
        }
        StoreBackend::Supabase => {
            let url = config
                .supabase_url
                .clone()
                .context("SUPABASE_URL is not configured")?;
            let key = config
                .supabase_service_key
                .clone()
                .context("SUPABASE_SERVICE_ROLE_KEY is not configured")?;
            Arc::new(Database::new(url, key))
        }
    };

    let mailer: Option<Arc<dyn Mailer>> = match config.resend_api_key.clone() {
        Some(api_key) => Some(Arc::new(ResendMailer::new(api_key)?)),
        None => {
            warn!("RESEND_API_KEY is not set, notifications and reminders are disabled");
            None
        }
    };

    let http_addr = config.http_addr.clone();
    let state = AppState::new(config, store, mailer)?;

    let listener = TcpListener::bind(&http_addr)
        .await
        .with_context(|| format!("failed to bind HTTP listener on {http_addr}"))?;
    info!("listening on {}", listener.local_addr()?);

    run_server(listener, state).await
}
