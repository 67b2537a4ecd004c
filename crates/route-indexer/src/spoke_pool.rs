//! Event store of a spoke pool, the per-chain contract users deposit into.

use {
    crate::{
        event_fetching::{EventRetrieving, fetch_events},
        events::{Event, SpokePoolEvent, SpokePoolEventKind},
    },
    alloy::primitives::{Address, address},
    anyhow::{Context, Result},
    indexmap::IndexSet,
    std::{collections::BTreeMap, sync::Arc},
};

/// Mainnet WETH. Spoke pools deployed before `wrappedNativeToken()` existed
/// all used it.
pub const FALLBACK_WRAPPED_NATIVE_TOKEN: Address =
    address!("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2");

#[async_trait::async_trait]
pub trait SpokePoolContract:
    EventRetrieving<Kind = SpokePoolEventKind, Event = SpokePoolEvent>
{
    fn address(&self) -> Address;

    async fn wrapped_native_token(&self) -> Result<Address>;
}

/// Outcome of reading a spoke pool's wrapped native token.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrappedNativeToken {
    /// Read from the contract.
    Configured(Address),
    /// The contract could not tell, [`FALLBACK_WRAPPED_NATIVE_TOKEN`] is
    /// assumed.
    Fallback(Address),
}

impl WrappedNativeToken {
    pub fn address(&self) -> Address {
        match *self {
            Self::Configured(address) | Self::Fallback(address) => address,
        }
    }
}

/// `destination chain -> origin tokens` in the order they were enabled.
pub type EnabledRoutes = BTreeMap<u64, IndexSet<Address>>;

/// Replays `EnabledDepositRoute` events. Disabling a route that is not
/// enabled does nothing and destinations without any enabled token are
/// dropped.
pub fn enabled_routes(events: &[Event<SpokePoolEvent>]) -> EnabledRoutes {
    let mut routes = EnabledRoutes::new();
    for event in events {
        match event.data {
            SpokePoolEvent::EnabledDepositRoute {
                origin_token,
                destination_chain_id,
                enabled: true,
            } => {
                routes
                    .entry(destination_chain_id)
                    .or_default()
                    .insert(origin_token);
            }
            SpokePoolEvent::EnabledDepositRoute {
                origin_token,
                destination_chain_id,
                enabled: false,
            } => {
                if let Some(tokens) = routes.get_mut(&destination_chain_id) {
                    tokens.shift_remove(&origin_token);
                    if tokens.is_empty() {
                        routes.remove(&destination_chain_id);
                    }
                }
            }
        }
    }
    routes
}

pub struct SpokePoolIndexer {
    chain_id: u64,
    contract: Arc<dyn SpokePoolContract>,
    start_block: u64,
    max_range_width: Option<u64>,
    events: Vec<Event<SpokePoolEvent>>,
    wrapped_native_token: Option<WrappedNativeToken>,
    generation: u64,
}

impl SpokePoolIndexer {
    pub fn new(
        chain_id: u64,
        contract: Arc<dyn SpokePoolContract>,
        start_block: u64,
        max_range_width: Option<u64>,
    ) -> Self {
        Self {
            chain_id,
            contract,
            start_block,
            max_range_width,
            events: Vec::new(),
            wrapped_native_token: None,
            generation: 0,
        }
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    pub async fn update(&mut self) -> Result<()> {
        self.fetch_events().await?;
        let wrapped_native_token = match self.contract.wrapped_native_token().await {
            Ok(token) => WrappedNativeToken::Configured(token),
            Err(err) => {
                tracing::warn!(
                    ?err,
                    chain_id = self.chain_id,
                    spoke_pool = ?self.address(),
                    fallback = ?FALLBACK_WRAPPED_NATIVE_TOKEN,
                    "spoke pool did not return its wrapped native token"
                );
                WrappedNativeToken::Fallback(FALLBACK_WRAPPED_NATIVE_TOKEN)
            }
        };
        self.wrapped_native_token = Some(wrapped_native_token);
        self.generation += 1;
        tracing::info!(
            chain_id = self.chain_id,
            spoke_pool = ?self.address(),
            events = self.events.len(),
            ?wrapped_native_token,
            "updated spoke pool"
        );
        Ok(())
    }

    /// Replaces the stored log with all `EnabledDepositRoute` events up to
    /// the current head.
    pub async fn fetch_events(&mut self) -> Result<&[Event<SpokePoolEvent>]> {
        let latest_block = self
            .contract
            .current_block()
            .await
            .with_context(|| format!("failed to fetch head of chain {}", self.chain_id))?;
        self.events = fetch_events(
            self.contract.as_ref(),
            SpokePoolEventKind::EnabledDepositRoute,
            self.start_block..=latest_block,
            self.max_range_width,
        )
        .await
        .with_context(|| format!("failed to fetch spoke pool events on chain {}", self.chain_id))?;
        Ok(&self.events)
    }

    pub fn events(&self) -> &[Event<SpokePoolEvent>] {
        &self.events
    }

    /// Number of completed updates.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// `None` until the first successful update.
    pub fn wrapped_native_token(&self) -> Option<WrappedNativeToken> {
        self.wrapped_native_token
    }

    pub fn routes_enabled(&self) -> EnabledRoutes {
        enabled_routes(&self.events)
    }

    /// Every token that can be deposited towards at least one chain.
    pub fn supported_tokens(&self) -> IndexSet<Address> {
        self.routes_enabled().into_values().flatten().collect()
    }

    /// Every chain at least one token can be deposited towards.
    pub fn supported_chains(&self) -> Vec<u64> {
        self.routes_enabled().into_keys().collect()
    }
}
