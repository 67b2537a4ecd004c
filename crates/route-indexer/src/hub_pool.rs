//! Event store of the hub pool: the contract on the hub chain which knows
//! every spoke pool and how spoke tokens map to l1 tokens.

use {
    crate::{
        Error,
        event_fetching::{EventRetrieving, fetch_events},
        events::{Event, HubPoolEvent, HubPoolEventKind, into_ordered_log},
    },
    alloy::primitives::Address,
    anyhow::{Context, Result},
    std::{collections::BTreeMap, sync::Arc},
    strum::IntoEnumIterator,
};

#[async_trait::async_trait]
pub trait HubPoolContract:
    EventRetrieving<Kind = HubPoolEventKind, Event = HubPoolEvent>
{
    fn address(&self) -> Address;

    /// The wrapped native token the hub pool uses on the hub chain.
    async fn weth(&self) -> Result<Address>;
}

/// `origin chain -> destination chain -> origin token -> deposits enabled`
pub type DepositRoutes = BTreeMap<u64, BTreeMap<u64, BTreeMap<Address, bool>>>;

/// Tables derived from replaying the hub pool log in order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HubPoolState {
    /// `l2 chain id -> spoke pool`
    pub spoke_pools: BTreeMap<u64, Address>,
    /// `l1 token -> lp token` of every pool currently enabled.
    pub l1_lp_tokens: BTreeMap<Address, Address>,
    /// `destination token -> l1 token`
    pub spoke_tokens: BTreeMap<Address, Address>,
    pub deposit_routes: DepositRoutes,
}

impl HubPoolState {
    pub fn from_events(events: &[Event<HubPoolEvent>]) -> Self {
        let mut state = Self::default();
        for event in events {
            state.apply(&event.data);
        }
        state
    }

    fn apply(&mut self, event: &HubPoolEvent) {
        match *event {
            HubPoolEvent::L1TokenEnabledForLiquidityProvision { l1_token, lp_token } => {
                self.l1_lp_tokens.insert(l1_token, lp_token);
            }
            HubPoolEvent::L2TokenDisabledForLiquidityProvision { l1_token, .. } => {
                self.l1_lp_tokens.remove(&l1_token);
            }
            HubPoolEvent::SetEnableDepositRoute {
                origin_chain_id,
                destination_chain_id,
                origin_token,
                deposits_enabled,
            } => {
                self.deposit_routes
                    .entry(origin_chain_id)
                    .or_default()
                    .entry(destination_chain_id)
                    .or_default()
                    .insert(origin_token, deposits_enabled);
            }
            HubPoolEvent::CrossChainContractsSet {
                l2_chain_id,
                spoke_pool,
                ..
            } => {
                self.spoke_pools.insert(l2_chain_id, spoke_pool);
            }
            HubPoolEvent::SetPoolRebalanceRoute {
                l1_token,
                destination_token,
                ..
            } => {
                self.spoke_tokens.insert(destination_token, l1_token);
            }
        }
    }
}

/// Holds the complete hub pool log from `start_block` up to the block before
/// the head as of the last update. Every view replays that log from scratch.
pub struct HubPoolIndexer {
    contract: Arc<dyn HubPoolContract>,
    start_block: u64,
    max_range_width: Option<u64>,
    events: Vec<Event<HubPoolEvent>>,
    weth: Option<Address>,
    generation: u64,
}

impl HubPoolIndexer {
    pub fn new(
        contract: Arc<dyn HubPoolContract>,
        start_block: u64,
        max_range_width: Option<u64>,
    ) -> Self {
        Self {
            contract,
            start_block,
            max_range_width,
            events: Vec::new(),
            weth: None,
            generation: 0,
        }
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }

    /// Refetches the whole log and the hub pool's weth address.
    pub async fn update(&mut self) -> Result<()> {
        self.fetch_events().await?;
        let weth = self
            .contract
            .weth()
            .await
            .context("failed to read hub pool weth")?;
        self.weth = Some(weth);
        self.generation += 1;
        tracing::info!(
            hub_pool = ?self.address(),
            events = self.events.len(),
            generation = self.generation,
            "updated hub pool"
        );
        Ok(())
    }

    /// Fetches every event kind the hub pool emits and replaces the stored
    /// log with their union in on-chain order. The stored log is left
    /// untouched if anything fails.
    pub async fn fetch_events(&mut self) -> Result<&[Event<HubPoolEvent>]> {
        let head = self
            .contract
            .current_block()
            .await
            .context("failed to fetch hub chain head")?;

        let mut events = Vec::new();
        // Stay one block behind the head to not index a block that may still
        // get reorged. Nothing is final while the chain only has its genesis.
        if let Some(latest_block) = head.checked_sub(1) {
            for kind in HubPoolEventKind::iter() {
                let batch = fetch_events(
                    self.contract.as_ref(),
                    kind,
                    self.start_block..=latest_block,
                    self.max_range_width,
                )
                .await
                .with_context(|| format!("failed to fetch {kind} events"))?;
                events.extend(batch);
            }
        }

        self.events = into_ordered_log(events)?;
        Ok(&self.events)
    }

    pub fn events(&self) -> &[Event<HubPoolEvent>] {
        &self.events
    }

    /// Number of completed updates.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn weth(&self) -> Result<Address, Error> {
        self.weth.ok_or(Error::NotUpdated("hub pool weth"))
    }

    pub fn state(&self) -> HubPoolState {
        HubPoolState::from_events(&self.events)
    }

    pub fn spoke_pool_addresses(&self) -> BTreeMap<u64, Address> {
        self.state().spoke_pools
    }

    pub fn l1_lp_token_table(&self) -> BTreeMap<Address, Address> {
        self.state().l1_lp_tokens
    }

    pub fn l1_tokens(&self) -> Vec<Address> {
        self.l1_lp_token_table().into_keys().collect()
    }

    pub fn lp_tokens(&self) -> Vec<Address> {
        self.l1_lp_token_table().into_values().collect()
    }

    pub fn spoke_token_table(&self) -> BTreeMap<Address, Address> {
        self.state().spoke_tokens
    }

    pub fn deposit_routes(&self) -> DepositRoutes {
        self.state().deposit_routes
    }
}
