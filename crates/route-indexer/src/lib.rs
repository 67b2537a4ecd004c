//! Indexes the hub pool of a cross-chain bridge and the spoke pools it points
//! to and derives the deposit routes that are currently enabled.

pub mod arguments;
pub mod boundary;
pub mod chains;
pub mod config;
pub mod deployments;
mod error;
pub mod event_fetching;
pub mod events;
pub mod hub_pool;
pub mod routes;
pub mod spoke_pool;
#[cfg(test)]
mod testing;
pub mod token_info;

pub use error::Error;
use {
    crate::{
        arguments::Arguments,
        boundary::NodeNetwork,
        chains::Chains,
        config::Configuration,
        deployments::Registry,
        routes::RouteFetcher,
    },
    anyhow::{Context, Result},
    std::sync::Arc,
    tokio::io::AsyncWriteExt,
};

pub async fn run(args: Arguments) -> Result<()> {
    let config = match &args.config {
        Some(path) => Configuration::from_path(path).await?,
        None => Configuration::default(),
    };
    let fetcher = RouteFetcher::new(
        Arc::new(NodeNetwork::new(
            args.node_url.iter().map(|node| (node.chain_id, node.url.clone())),
        )),
        Arc::new(Registry::default().with_overrides(config.deployments)),
        Chains::default().with_overrides(config.chains),
        args.missing_l1_token,
    );

    let route_config = fetcher
        .fetch_routes(args.hub_chain_id, args.hub_pool_address)
        .await?;
    let json = serde_json::to_string_pretty(&route_config)?;
    match &args.output {
        Some(path) => {
            tokio::fs::write(path, json)
                .await
                .with_context(|| format!("failed to write routes to {path:?}"))?;
            tracing::info!(?path, "wrote route config");
        }
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(json.as_bytes()).await?;
            stdout.write_all(b"\n").await?;
            stdout.flush().await?;
        }
    }
    Ok(())
}
