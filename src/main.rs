use std::sync::Arc;

use alumnus_api::auth::{Authorizer, FileSecretStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SECRET_ARN, SECRETS_FILE, etc.
    let _ = dotenvy::dotenv();

    // Initialize configuration (this loads the config singleton)
    let config = alumnus_api::config::config();
    alumnus_api::logging::init(&config.logging.level);
    tracing::info!("Starting Alumnus API gateway in {:?} mode", config.environment);

    let store = FileSecretStore::new(config.secrets.secrets_file.clone());
    let authorizer = Arc::new(Authorizer::new(Arc::new(store), config.secrets.secret_id.clone()));

    alumnus_api::gateway::serve(&config.gateway, authorizer).await
}
