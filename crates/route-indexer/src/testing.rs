//! In-memory contracts serving canned events.

use {
    crate::{
        event_fetching::EventRetrieving,
        events::{
            Event,
            EventIndex,
            HubPoolEvent,
            HubPoolEventKind,
            SpokePoolEvent,
            SpokePoolEventKind,
        },
        hub_pool::HubPoolContract,
        spoke_pool::SpokePoolContract,
    },
    alloy::primitives::{Address, B256},
    anyhow::{Context, Result, anyhow},
    std::{
        fmt::{Debug, Display},
        ops::RangeInclusive,
        sync::{Arc, Mutex},
    },
    tokio::sync::Barrier,
};

pub trait Kinded {
    type Kind: Copy + Debug + Display + PartialEq + Send + Sync;

    fn kind(&self) -> Self::Kind;
}

impl Kinded for HubPoolEvent {
    type Kind = HubPoolEventKind;

    fn kind(&self) -> Self::Kind {
        HubPoolEvent::kind(self)
    }
}

impl Kinded for SpokePoolEvent {
    type Kind = SpokePoolEventKind;

    fn kind(&self) -> Self::Kind {
        SpokePoolEvent::kind(self)
    }
}

pub fn event<T>(block_number: u64, transaction_index: u64, log_index: u64, data: T) -> Event<T> {
    Event {
        data,
        index: EventIndex::new(block_number, transaction_index, log_index),
        transaction_hash: B256::left_padding_from(&block_number.to_be_bytes()),
    }
}

/// A contract whose log is a fixed list of events. Every query is recorded.
pub struct FakeContract<E: Kinded> {
    address: Address,
    head: u64,
    events: Vec<Event<E>>,
    /// Result of `weth()` or `wrappedNativeToken()`, `None` makes the call
    /// fail.
    accessor: Option<Address>,
    fail_after: Option<usize>,
    /// Awaited before reporting the head.
    barrier: Option<Arc<Barrier>>,
    queries: Mutex<Vec<(E::Kind, RangeInclusive<u64>)>>,
}

impl<E: Kinded> FakeContract<E> {
    pub fn new(address: Address, head: u64, events: Vec<Event<E>>) -> Self {
        Self {
            address,
            head,
            events,
            accessor: None,
            fail_after: None,
            barrier: None,
            queries: Default::default(),
        }
    }

    pub fn with_accessor(mut self, address: Address) -> Self {
        self.accessor = Some(address);
        self
    }

    /// Makes every query after the first `queries` ones fail.
    pub fn failing_after(mut self, queries: usize) -> Self {
        self.fail_after = Some(queries);
        self
    }

    /// Makes `current_block` wait until every party of `barrier` arrived.
    pub fn with_barrier(mut self, barrier: Arc<Barrier>) -> Self {
        self.barrier = Some(barrier);
        self
    }

    pub fn queries(&self) -> Vec<(E::Kind, RangeInclusive<u64>)> {
        self.queries.lock().unwrap().clone()
    }

    fn accessor(&self) -> Result<Address> {
        self.accessor.context("execution reverted")
    }
}

#[async_trait::async_trait]
impl<E> EventRetrieving for FakeContract<E>
where
    E: Kinded + Clone + Send + Sync,
{
    type Event = E;
    type Kind = E::Kind;

    async fn current_block(&self) -> Result<u64> {
        if let Some(barrier) = &self.barrier {
            barrier.wait().await;
        }
        Ok(self.head)
    }

    async fn past_events(
        &self,
        kind: Self::Kind,
        blocks: RangeInclusive<u64>,
    ) -> Result<Vec<Event<E>>> {
        let issued = {
            let mut queries = self.queries.lock().unwrap();
            queries.push((kind, blocks.clone()));
            queries.len()
        };
        if self.fail_after.is_some_and(|limit| issued > limit) {
            return Err(anyhow!("connection reset"));
        }
        Ok(self
            .events
            .iter()
            .filter(|event| event.data.kind() == kind && blocks.contains(&event.index.block_number))
            .cloned()
            .collect())
    }
}

#[async_trait::async_trait]
impl HubPoolContract for FakeContract<HubPoolEvent> {
    fn address(&self) -> Address {
        self.address
    }

    async fn weth(&self) -> Result<Address> {
        self.accessor()
    }
}

#[async_trait::async_trait]
impl SpokePoolContract for FakeContract<SpokePoolEvent> {
    fn address(&self) -> Address {
        self.address
    }

    async fn wrapped_native_token(&self) -> Result<Address> {
        self.accessor()
    }
}
