//! Node backed implementations of the hub and spoke pool contracts.

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
    alloy::{
        primitives::{Address, U256},
        providers::{DynProvider, Provider},
        rpc::types::{Filter, Log},
        sol_types::SolEvent,
    },
    anyhow::{Context, Result},
    contracts::alloy::{HubPool, SpokePool},
    std::ops::RangeInclusive,
};

/// Queries all logs of event `E` emitted by `address` within `blocks`.
async fn past_logs<E: SolEvent>(
    provider: &DynProvider,
    address: Address,
    blocks: RangeInclusive<u64>,
) -> Result<Vec<Event<E>>> {
    let filter = Filter::new()
        .address(address)
        .event_signature(E::SIGNATURE_HASH)
        .from_block(*blocks.start())
        .to_block(*blocks.end());
    provider
        .get_logs(&filter)
        .await
        .with_context(|| format!("eth_getLogs for {} failed", E::SIGNATURE))?
        .iter()
        .map(decode)
        .collect()
}

fn decode<E: SolEvent>(log: &Log) -> Result<Event<E>> {
    let index = EventIndex::new(
        log.block_number.context("log block number is empty")?,
        log.transaction_index.context("log transaction index is empty")?,
        log.log_index.context("log index is empty")?,
    );
    let transaction_hash = log.transaction_hash.context("log transaction hash is empty")?;
    let data = log
        .log_decode::<E>()
        .with_context(|| format!("failed to decode {} at {index}", E::SIGNATURE))?
        .inner
        .data;
    Ok(Event {
        data,
        index,
        transaction_hash,
    })
}

fn map<E, T>(events: Vec<Event<E>>, f: impl Fn(E) -> Result<T>) -> Result<Vec<Event<T>>> {
    events
        .into_iter()
        .map(|event| {
            Ok(Event {
                data: f(event.data)?,
                index: event.index,
                transaction_hash: event.transaction_hash,
            })
        })
        .collect()
}

fn chain_id(value: U256) -> Result<u64> {
    u64::try_from(value).with_context(|| format!("chain id {value} does not fit into u64"))
}

pub struct HubPoolInstance {
    instance: HubPool::Instance,
}

impl HubPoolInstance {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            instance: HubPool::Instance::new(address, provider),
        }
    }
}

#[async_trait::async_trait]
impl EventRetrieving for HubPoolInstance {
    type Event = HubPoolEvent;
    type Kind = HubPoolEventKind;

    async fn current_block(&self) -> Result<u64> {
        Ok(self.instance.provider().get_block_number().await?)
    }

    async fn past_events(
        &self,
        kind: HubPoolEventKind,
        blocks: RangeInclusive<u64>,
    ) -> Result<Vec<Event<HubPoolEvent>>> {
        use HubPool::HubPool as abi;

        let provider = self.instance.provider();
        let address = *self.instance.address();
        match kind {
            HubPoolEventKind::L1TokenEnabledForLiquidityProvision => map(
                past_logs::<abi::L1TokenEnabledForLiquidityProvision>(provider, address, blocks)
                    .await?,
                |event| {
                    Ok(HubPoolEvent::L1TokenEnabledForLiquidityProvision {
                        l1_token: event.l1Token,
                        lp_token: event.lpToken,
                    })
                },
            ),
            HubPoolEventKind::L2TokenDisabledForLiquidityProvision => map(
                past_logs::<abi::L2TokenDisabledForLiquidityProvision>(provider, address, blocks)
                    .await?,
                |event| {
                    Ok(HubPoolEvent::L2TokenDisabledForLiquidityProvision {
                        l1_token: event.l1Token,
                        lp_token: event.lpToken,
                    })
                },
            ),
            HubPoolEventKind::SetEnableDepositRoute => map(
                past_logs::<abi::SetEnableDepositRoute>(provider, address, blocks).await?,
                |event| {
                    Ok(HubPoolEvent::SetEnableDepositRoute {
                        origin_chain_id: chain_id(event.originChainId)?,
                        destination_chain_id: chain_id(event.destinationChainId)?,
                        origin_token: event.originToken,
                        deposits_enabled: event.depositsEnabled,
                    })
                },
            ),
            HubPoolEventKind::CrossChainContractsSet => map(
                past_logs::<abi::CrossChainContractsSet>(provider, address, blocks).await?,
                |event| {
                    Ok(HubPoolEvent::CrossChainContractsSet {
                        l2_chain_id: chain_id(event.l2ChainId)?,
                        adapter: event.adapter,
                        spoke_pool: event.spokePool,
                    })
                },
            ),
            HubPoolEventKind::SetPoolRebalanceRoute => map(
                past_logs::<abi::SetPoolRebalanceRoute>(provider, address, blocks).await?,
                |event| {
                    Ok(HubPoolEvent::SetPoolRebalanceRoute {
                        destination_chain_id: chain_id(event.destinationChainId)?,
                        l1_token: event.l1Token,
                        destination_token: event.destinationToken,
                    })
                },
            ),
        }
    }
}

#[async_trait::async_trait]
impl HubPoolContract for HubPoolInstance {
    fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn weth(&self) -> Result<Address> {
        Ok(self.instance.weth().call().await?)
    }
}

pub struct SpokePoolInstance {
    instance: SpokePool::Instance,
}

impl SpokePoolInstance {
    pub fn new(address: Address, provider: DynProvider) -> Self {
        Self {
            instance: SpokePool::Instance::new(address, provider),
        }
    }
}

#[async_trait::async_trait]
impl EventRetrieving for SpokePoolInstance {
    type Event = SpokePoolEvent;
    type Kind = SpokePoolEventKind;

    async fn current_block(&self) -> Result<u64> {
        Ok(self.instance.provider().get_block_number().await?)
    }

    async fn past_events(
        &self,
        kind: SpokePoolEventKind,
        blocks: RangeInclusive<u64>,
    ) -> Result<Vec<Event<SpokePoolEvent>>> {
        match kind {
            SpokePoolEventKind::EnabledDepositRoute => map(
                past_logs::<SpokePool::SpokePool::EnabledDepositRoute>(
                    self.instance.provider(),
                    *self.instance.address(),
                    blocks,
                )
                .await?,
                |event| {
                    Ok(SpokePoolEvent::EnabledDepositRoute {
                        origin_token: event.originToken,
                        destination_chain_id: chain_id(event.destinationChainId)?,
                        enabled: event.enabled,
                    })
                },
            ),
        }
    }
}

#[async_trait::async_trait]
impl SpokePoolContract for SpokePoolInstance {
    fn address(&self) -> Address {
        *self.instance.address()
    }

    async fn wrapped_native_token(&self) -> Result<Address> {
        Ok(self.instance.wrappedNativeToken().call().await?)
    }
}
