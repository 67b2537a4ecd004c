//! Everything that talks to an actual node.

mod contracts;

use {
    crate::{
        Error,
        hub_pool::HubPoolContract,
        routes::Network,
        spoke_pool::SpokePoolContract,
        token_info::{TokenInfoFetcher, TokenInfoFetching},
    },
    alloy::{
        primitives::Address,
        providers::{DynProvider, Provider, ProviderBuilder},
    },
    anyhow::{Context, Result},
    std::{collections::HashMap, sync::Arc},
    url::Url,
};

pub use self::contracts::{HubPoolInstance, SpokePoolInstance};

pub fn provider(url: Url) -> DynProvider {
    ProviderBuilder::new().connect_http(url).erased()
}

/// One JSON RPC provider per chain.
pub struct NodeNetwork {
    providers: HashMap<u64, DynProvider>,
}

impl NodeNetwork {
    pub fn new(nodes: impl IntoIterator<Item = (u64, Url)>) -> Self {
        Self {
            providers: nodes
                .into_iter()
                .map(|(chain_id, url)| {
                    tracing::debug!(chain_id, %url, "connecting to node");
                    (chain_id, provider(url))
                })
                .collect(),
        }
    }

    fn provider(&self, chain_id: u64) -> Result<DynProvider> {
        self.providers
            .get(&chain_id)
            .cloned()
            .ok_or(Error::UnsupportedChain(chain_id))
            .with_context(|| format!("no node url configured for chain {chain_id}"))
    }
}

impl Network for NodeNetwork {
    fn hub_pool(&self, chain_id: u64, address: Address) -> Result<Arc<dyn HubPoolContract>> {
        Ok(Arc::new(HubPoolInstance::new(
            address,
            self.provider(chain_id)?,
        )))
    }

    fn spoke_pool(&self, chain_id: u64, address: Address) -> Result<Arc<dyn SpokePoolContract>> {
        Ok(Arc::new(SpokePoolInstance::new(
            address,
            self.provider(chain_id)?,
        )))
    }

    fn token_info(&self, chain_id: u64) -> Result<Arc<dyn TokenInfoFetching>> {
        Ok(Arc::new(TokenInfoFetcher::new(self.provider(chain_id)?)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_without_node_are_unsupported() {
        let network = NodeNetwork::new([(1, "http://localhost:8545".parse().unwrap())]);
        assert!(network.token_info(1).is_ok());
        let err = network
            .spoke_pool(10, Address::ZERO)
            .err()
            .unwrap();
        assert_eq!(err.downcast_ref::<Error>(), Some(&Error::UnsupportedChain(10)));
    }
}
