use {
    alloy::{primitives::Address, providers::DynProvider},
    anyhow::{Context, Result},
    async_trait::async_trait,
    contracts::alloy::ERC20,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenInfoFetching: Send + Sync {
    /// Retrieves the display symbol of an ERC20 token.
    async fn symbol(&self, token: Address) -> Result<String>;
}

pub struct TokenInfoFetcher {
    provider: DynProvider,
}

impl TokenInfoFetcher {
    pub fn new(provider: DynProvider) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl TokenInfoFetching for TokenInfoFetcher {
    async fn symbol(&self, token: Address) -> Result<String> {
        let erc20 = ERC20::Instance::new(token, self.provider.clone());
        let symbol = erc20.symbol().call().await;
        if let Err(err) = &symbol {
            tracing::debug!(?err, ?token, "failed to fetch token symbol");
        }
        symbol.with_context(|| format!("failed to fetch symbol of token {token}"))
    }
}
