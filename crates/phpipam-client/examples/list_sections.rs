//! List phpIPAM sections and their subnets
//!
//! Configuration comes from the `PHPIPAM_*` environment variables, e.g.
//!
//! ```text
//! PHPIPAM_ENDPOINT_ADDR=https://ipam.example.com/api \
//! PHPIPAM_APP_ID=automation PHPIPAM_USER_NAME=svc PHPIPAM_PASSWORD=... \
//! RUST_LOG=phpipam_client=debug cargo run --example list_sections
//! ```

use anyhow::{Context, Result};
use phpipam_client::controllers::SectionsController;
use phpipam_client::{Config, PhpIpamClient};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Failed to load phpIPAM configuration")?;
    info!("Connecting to phpIPAM at {}", config.base_url());

    let client = PhpIpamClient::connect(config)
        .await
        .context("Failed to log in to phpIPAM")?;
    let sections = SectionsController::new(client.into_transport());

    for section in sections.list_sections().await? {
        let subnets = sections.get_subnets_in_section(section.id).await?;
        println!("{:>4}  {:<24} {} subnets", section.id, section.name, subnets.len());
        for subnet in subnets {
            println!("      {}/{}  {}", subnet.subnet_address, subnet.mask, subnet.description);
        }
    }

    Ok(())
}
