use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod data_source;
mod model;
mod provider;
mod resource;
#[cfg(test)]
mod test_support;

use provider::CiliumProvider;

/// Prefix of every data source and resource type name
const PROVIDER_NAME: &str = "cilium";

const LOG_ENV: &str = "CILIUM_PROVIDER_LOG";
const LOG_FORMAT_ENV: &str = "CILIUM_PROVIDER_LOG_FORMAT";

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting terraform-provider-cilium...");

    tf_provider::serve(PROVIDER_NAME, CiliumProvider::default())
        .await
        .map_err(|e| anyhow::anyhow!("provider server failed: {}", e))?;

    info!("Provider server stopped, exiting...");
    Ok(())
}

/// Log to stderr: Terraform reads the plugin handshake from stdout.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false);

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
