use std::{env, fs, io::Write};

use anyhow::Context;
use linkflow::RuntimeConfig;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Only validated here; descriptors do not depend on it.
    let config = RuntimeConfig::from_env()?;
    tracing::debug!(?config, "runtime configuration");

    let catalog = linkflow_catalog::catalog()?;
    let descriptors = catalog.descriptors();
    let rendered = serde_json::to_string_pretty(&descriptors)?;

    match env::args().nth(1) {
        Some(path) => {
            fs::write(&path, rendered).with_context(|| format!("failed to write {}", path))?;
            tracing::info!(nodes = descriptors.len(), path = %path, "catalog written");
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.write_all(b"\n")?;
            tracing::info!(nodes = descriptors.len(), "catalog printed");
        }
    }

    Ok(())
}
