//! `yrl` - renders one JSON listing as a YRL `<offer>` fragment.
//!
//! ```text
//! $ echo '{"internal-id": 42, "price": 150000.5, "images": ["a.jpg"]}' | yrl
//! <offer internal-id="42"><internal-id>42</internal-id><price>150000.50</price><image>a.jpg</image></offer>
//! ```

mod config;

use std::io::Read;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use yrl_offer::{GenericListing, OfferBuilder, property_map_from_json};

use crate::config::CliConfig;

/// Installs the stderr log subscriber; `RUST_LOG` overrides `level`.
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("yrl={},yrl_offer={}", level, level)));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Reads the listing JSON from the input file or stdin.
fn read_input(config: &CliConfig) -> anyhow::Result<String> {
    match &config.input {
        Some(path) => {
            debug!(path = %path.display(), "Reading listing file");
            std::fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))
        }
        None => {
            debug!("Reading listing from stdin");
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn run(config: &CliConfig) -> anyhow::Result<String> {
    let input = read_input(config)?;
    let json: serde_json::Value =
        serde_json::from_str(&input).context("listing is not valid JSON")?;
    let properties = property_map_from_json(json)
        .ok_or_else(|| anyhow::anyhow!("listing must be a JSON object"))?;

    let builder = OfferBuilder::new(config.encoder_config())?;
    let groups = Arc::new(config.repeated_groups());
    let mut listing = match &config.id {
        Some(id) => GenericListing::new(id.clone(), properties),
        None => GenericListing::without_id(properties),
    }
    .with_repeated_groups(groups);

    info!(
        id = ?config.id,
        id_source = ?builder.config().id_source,
        "Rendering offer"
    );

    builder.render(&mut listing).context("failed to render offer")
}

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_logging(&config.log_level);

    if let Err(errors) = config.validate() {
        for error in &errors {
            eprintln!("Configuration error: {}", error);
        }
        std::process::exit(1);
    }

    let xml = run(&config)?;
    println!("{}", xml);
    Ok(())
}
