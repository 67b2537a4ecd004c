//! Joins the hub pool with every spoke pool it knows about into the list of
//! currently enabled deposit routes.

use {
    crate::{
        Error,
        chains::{ChainInfo, Chains},
        deployments::{ContractRole, Deployments},
        hub_pool::{HubPoolContract, HubPoolIndexer},
        spoke_pool::{SpokePoolContract, SpokePoolIndexer},
        token_info::TokenInfoFetching,
    },
    alloy::primitives::Address,
    anyhow::{Context, Result},
    futures::future,
    serde::{Deserialize, Serialize},
    std::{
        collections::{BTreeMap, HashMap},
        sync::Arc,
    },
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    pub from_chain: u64,
    pub to_chain: u64,
    pub from_token_address: Address,
    pub from_spoke_address: Address,
    pub from_token_symbol: String,
    pub is_native: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub l1_token_address: Option<Address>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    pub hub_pool_chain: u64,
    pub hub_pool_address: Address,
    pub hub_pool_weth_address: Address,
    pub routes: Vec<Route>,
}

/// What to do with a spoke token the hub pool has no l1 token for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum MissingL1Token {
    /// Emit the route without an l1 token.
    #[default]
    PassThrough,
    /// Skip the route.
    Drop,
    /// Fail the whole fetch.
    Error,
}

/// Hands out contract handles connected to the right chain.
pub trait Network: Send + Sync {
    fn hub_pool(&self, chain_id: u64, address: Address) -> Result<Arc<dyn HubPoolContract>>;

    fn spoke_pool(&self, chain_id: u64, address: Address) -> Result<Arc<dyn SpokePoolContract>>;

    fn token_info(&self, chain_id: u64) -> Result<Arc<dyn TokenInfoFetching>>;
}

pub struct RouteFetcher {
    network: Arc<dyn Network>,
    deployments: Arc<dyn Deployments>,
    chains: Chains,
    missing_l1_token: MissingL1Token,
}

impl RouteFetcher {
    pub fn new(
        network: Arc<dyn Network>,
        deployments: Arc<dyn Deployments>,
        chains: Chains,
        missing_l1_token: MissingL1Token,
    ) -> Self {
        Self {
            network,
            deployments,
            chains,
            missing_l1_token,
        }
    }

    /// Indexes the hub pool on `hub_chain_id` (at `hub_pool_address` or its
    /// known deployment) and every spoke pool it points to. Fails as a whole
    /// if any chain fails.
    pub async fn fetch_routes(
        &self,
        hub_chain_id: u64,
        hub_pool_address: Option<Address>,
    ) -> Result<RouteConfig> {
        let hub_pool_address = match hub_pool_address {
            Some(address) => address,
            None => self.deployments.address(ContractRole::HubPool, hub_chain_id)?,
        };
        let start_block = self
            .deployments
            .start_block(ContractRole::HubPool, hub_chain_id)?;
        let max_range_width = self
            .chains
            .get(hub_chain_id)
            .and_then(|chain| chain.max_range_width);

        let mut hub_pool = HubPoolIndexer::new(
            self.network.hub_pool(hub_chain_id, hub_pool_address)?,
            start_block,
            max_range_width,
        );
        hub_pool
            .update()
            .await
            .with_context(|| format!("failed to index hub pool on chain {hub_chain_id}"))?;
        let hub_state = hub_pool.state();
        let weth = hub_pool.weth()?;

        // An unsupported chain fails the call before any spoke gets queried.
        if let Some(&chain_id) = hub_state
            .spoke_pools
            .keys()
            .find(|&&chain_id| !self.chains.is_supported(chain_id))
        {
            return Err(Error::UnsupportedChain(chain_id).into());
        }
        let spoke_pools = hub_state
            .spoke_pools
            .iter()
            .map(|(&chain_id, &address)| self.spoke_pool(chain_id, address))
            .collect::<Result<Vec<_>>>()?;

        let routes = future::try_join_all(
            spoke_pools
                .into_iter()
                .map(|spoke_pool| self.spoke_routes(spoke_pool, &hub_state.spoke_tokens)),
        )
        .await?
        .into_iter()
        .flatten()
        .collect::<Vec<_>>();

        tracing::info!(
            hub_chain_id,
            hub_pool = ?hub_pool_address,
            routes = routes.len(),
            "fetched routes"
        );
        Ok(RouteConfig {
            hub_pool_chain: hub_chain_id,
            hub_pool_address,
            hub_pool_weth_address: weth,
            routes,
        })
    }

    fn spoke_pool(&self, chain_id: u64, address: Address) -> Result<SpokePool<'_>> {
        let chain = self
            .chains
            .get(chain_id)
            .ok_or(Error::UnsupportedChain(chain_id))?;
        let start_block = self
            .deployments
            .start_block(ContractRole::SpokePool, chain_id)?;
        Ok(SpokePool {
            chain,
            indexer: SpokePoolIndexer::new(
                chain_id,
                self.network.spoke_pool(chain_id, address)?,
                start_block,
                chain.max_range_width,
            ),
            tokens: self.network.token_info(chain_id)?,
        })
    }

    async fn spoke_routes(
        &self,
        spoke_pool: SpokePool<'_>,
        spoke_tokens: &BTreeMap<Address, Address>,
    ) -> Result<Vec<Route>> {
        let SpokePool {
            chain,
            mut indexer,
            tokens,
        } = spoke_pool;
        let chain_id = chain.chain_id;
        indexer.update().await?;

        let enabled_routes = indexer.routes_enabled();
        let symbols = future::try_join_all(indexer.supported_tokens().into_iter().map(|token| {
            let tokens = &tokens;
            async move {
                let symbol = tokens.symbol(token).await?;
                Ok::<_, anyhow::Error>((token, symbol))
            }
        }))
        .await
        .with_context(|| format!("failed to fetch token symbols on chain {chain_id}"))?
        .into_iter()
        .collect::<HashMap<_, _>>();
        let wrapped_native_token = indexer
            .wrapped_native_token()
            .ok_or(Error::WrappedNativeTokenNotSet(chain_id))?
            .address();

        let mut routes = Vec::new();
        for (to_chain, origin_tokens) in enabled_routes {
            for token in origin_tokens {
                let l1_token_address = match (spoke_tokens.get(&token), self.missing_l1_token) {
                    (Some(l1_token), _) => Some(*l1_token),
                    (None, MissingL1Token::PassThrough) => None,
                    (None, MissingL1Token::Drop) => {
                        tracing::debug!(chain_id, ?token, "dropping route without l1 token");
                        continue;
                    }
                    (None, MissingL1Token::Error) => {
                        return Err(Error::MissingL1Token { chain_id, token }.into());
                    }
                };
                let route = Route {
                    from_chain: chain_id,
                    to_chain,
                    from_token_address: token,
                    from_spoke_address: indexer.address(),
                    from_token_symbol: symbols
                        .get(&token)
                        .cloned()
                        .with_context(|| format!("no symbol fetched for token {token}"))?,
                    is_native: false,
                    l1_token_address,
                };
                let native = (token == wrapped_native_token).then(|| native_route(&route, chain));
                routes.push(route);
                routes.extend(native);
            }
        }

        tracing::debug!(
            chain_id,
            spoke_pool = ?indexer.address(),
            routes = routes.len(),
            destinations = ?indexer.supported_chains(),
            "joined spoke pool routes"
        );
        Ok(routes)
    }
}

/// A spoke pool ready to be indexed.
struct SpokePool<'a> {
    chain: &'a ChainInfo,
    indexer: SpokePoolIndexer,
    tokens: Arc<dyn TokenInfoFetching>,
}

/// Depositing the wrapped native token can also be done with the native
/// currency itself.
fn native_route(route: &Route, chain: &ChainInfo) -> Route {
    Route {
        is_native: true,
        from_token_symbol: chain.native_currency_symbol.clone(),
        ..route.clone()
    }
}
