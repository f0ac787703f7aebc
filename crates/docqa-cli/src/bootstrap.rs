use std::time::Duration;

use anyhow::Context;
use docqa_config::{DocqaConfig, StorageBackend, StorageConfig};
use docqa_store::{FilePort, KeyringPort, MemoryPort, PersistencePort, Store};
use docqa_transport::HttpTransport;

pub type CliStore = Store<HttpTransport, Box<dyn PersistencePort>>;

pub fn load_config() -> anyhow::Result<DocqaConfig> {
    DocqaConfig::load_with_dotenv().context("failed to load docqa configuration")
}

/// Build the container from configuration, restoring any stored session.
pub fn build_store(config: &DocqaConfig) -> anyhow::Result<CliStore> {
    let transport = HttpTransport::new(
        config.api.normalized_base_url(),
        Duration::from_secs(config.api.timeout_secs),
        &config.api.user_agent,
    )
    .context("failed to build HTTP client")?;
    tracing::debug!(base_url = transport.base_url(), backend = %config.storage.backend, "store configured");
    Ok(Store::new(transport, token_port(&config.storage)?))
}

fn token_port(storage: &StorageConfig) -> anyhow::Result<Box<dyn PersistencePort>> {
    let file = || {
        storage
            .resolved_credentials_path()
            .map(FilePort::new)
            .context("cannot determine credentials path; set DOCQA_STORAGE__CREDENTIALS_PATH")
    };
    let port: Box<dyn PersistencePort> = match storage.backend {
        StorageBackend::Keyring => Box::new(KeyringPort::new(
            storage.keyring_service.clone(),
            file().ok(),
        )),
        StorageBackend::File => Box::new(file()?),
        StorageBackend::Memory => Box::new(MemoryPort::new()),
    };
    Ok(port)
}
