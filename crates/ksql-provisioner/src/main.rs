//! KSQL provisioner binary.
//!
//! Declares the turnstile tables on ksqlDB unless they already exist.

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ksql_provisioner::{KsqlClient, Provisioner, ProvisionerConfig, ProvisioningRequest};

#[derive(Parser)]
#[command(name = "ksql-provisioner")]
#[command(version, about = "Declare the turnstile KSQL tables if they do not exist yet", long_about = None)]
struct Cli {
    /// ksqlDB server URL (overrides KSQL_URL)
    #[arg(long)]
    ksql_url: Option<String>,

    /// Table whose presence skips provisioning (overrides KSQL_ARTIFACT)
    #[arg(long)]
    artifact: Option<String>,

    /// Request timeout in seconds, 0 disables it (overrides KSQL_TIMEOUT_SECONDS)
    #[arg(long)]
    timeout_seconds: Option<u64>,

    /// Print the statement request body and exit without contacting ksqlDB
    #[arg(long)]
    print_statement: bool,
}

impl Cli {
    fn apply(&self, config: &mut ProvisionerConfig) {
        if let Some(url) = &self.ksql_url {
            config.url = url.clone();
        }
        if let Some(artifact) = &self.artifact {
            config.artifact = artifact.clone();
        }
        if let Some(timeout) = self.timeout_seconds {
            config.timeout_seconds = timeout;
        }
    }
}

/// Initialize tracing/logging. `LOG_FORMAT=json` selects JSON lines.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,ksql_provisioner=debug".into());
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let mut config = ProvisionerConfig::from_env().context("Failed to load KSQL configuration")?;
    cli.apply(&mut config);
    config.validate()?;

    let request = ProvisioningRequest::turnstile(&config.offset_reset);

    if cli.print_statement {
        println!("{}", request.to_json_pretty()?);
        return Ok(());
    }

    tracing::info!(
        ksql_url = %config.url,
        artifact = %config.artifact,
        timeout_seconds = config.timeout_seconds,
        "Provisioner configuration loaded"
    );

    let client = KsqlClient::new(&config.url, config.timeout())?;
    let provisioner = Provisioner::new(client.clone(), client, config.artifact.clone(), request);

    let result = provisioner.run().await?;
    tracing::info!(result = ?result, "Provisioning finished");

    Ok(())
}
