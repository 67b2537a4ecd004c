//! Decoded contract events and the total order they are replayed in.

use {
    crate::Error,
    alloy::primitives::{Address, B256},
    std::fmt,
    strum::{Display, EnumIter},
};

/// Position of a log on chain. Logs of one contract are totally ordered by
/// it and no two logs may share one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EventIndex {
    pub block_number: u64,
    pub transaction_index: u64,
    pub log_index: u64,
}

impl EventIndex {
    pub fn new(block_number: u64, transaction_index: u64, log_index: u64) -> Self {
        Self {
            block_number,
            transaction_index,
            log_index,
        }
    }
}

impl fmt::Display for EventIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "block {} tx {} log {}",
            self.block_number, self.transaction_index, self.log_index
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event<T> {
    pub data: T,
    pub index: EventIndex,
    pub transaction_hash: B256,
}

/// Event kinds emitted by the hub pool. Iteration order is the order in
/// which they get fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum HubPoolEventKind {
    L1TokenEnabledForLiquidityProvision,
    L2TokenDisabledForLiquidityProvision,
    SetEnableDepositRoute,
    CrossChainContractsSet,
    SetPoolRebalanceRoute,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HubPoolEvent {
    L1TokenEnabledForLiquidityProvision {
        l1_token: Address,
        lp_token: Address,
    },
    /// Despite the name this disables the pool of an l1 token.
    L2TokenDisabledForLiquidityProvision {
        l1_token: Address,
        lp_token: Address,
    },
    SetEnableDepositRoute {
        origin_chain_id: u64,
        destination_chain_id: u64,
        origin_token: Address,
        deposits_enabled: bool,
    },
    CrossChainContractsSet {
        l2_chain_id: u64,
        adapter: Address,
        spoke_pool: Address,
    },
    SetPoolRebalanceRoute {
        destination_chain_id: u64,
        l1_token: Address,
        destination_token: Address,
    },
}

impl HubPoolEvent {
    pub fn kind(&self) -> HubPoolEventKind {
        match self {
            Self::L1TokenEnabledForLiquidityProvision { .. } => {
                HubPoolEventKind::L1TokenEnabledForLiquidityProvision
            }
            Self::L2TokenDisabledForLiquidityProvision { .. } => {
                HubPoolEventKind::L2TokenDisabledForLiquidityProvision
            }
            Self::SetEnableDepositRoute { .. } => HubPoolEventKind::SetEnableDepositRoute,
            Self::CrossChainContractsSet { .. } => HubPoolEventKind::CrossChainContractsSet,
            Self::SetPoolRebalanceRoute { .. } => HubPoolEventKind::SetPoolRebalanceRoute,
        }
    }
}

/// Event kinds emitted by a spoke pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum SpokePoolEventKind {
    EnabledDepositRoute,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SpokePoolEvent {
    EnabledDepositRoute {
        origin_token: Address,
        destination_chain_id: u64,
        enabled: bool,
    },
}

impl SpokePoolEvent {
    pub fn kind(&self) -> SpokePoolEventKind {
        match self {
            Self::EnabledDepositRoute { .. } => SpokePoolEventKind::EnabledDepositRoute,
        }
    }
}

/// Sorts events fetched kind by kind into a single log ordered by
/// [`EventIndex`]. Two events with the same index mean the input is corrupt.
pub fn into_ordered_log<T>(mut events: Vec<Event<T>>) -> Result<Vec<Event<T>>, Error> {
    events.sort_by_key(|event| event.index);
    if let Some(pair) = events
        .windows(2)
        .find(|pair| pair[0].index == pair[1].index)
    {
        return Err(Error::DuplicateEvent {
            index: pair[1].index,
            transaction_hash: pair[1].transaction_hash,
        });
    }
    Ok(events)
}

#[cfg(test)]
mod tests {
    use {super::*, strum::IntoEnumIterator};

    fn event(block_number: u64, transaction_index: u64, log_index: u64) -> Event<u64> {
        Event {
            data: block_number * 100 + transaction_index * 10 + log_index,
            index: EventIndex::new(block_number, transaction_index, log_index),
            transaction_hash: B256::with_last_byte(block_number as u8),
        }
    }

    #[test]
    fn orders_by_block_then_transaction_then_log() {
        let log = into_ordered_log(vec![
            event(2, 0, 0),
            event(1, 1, 0),
            event(1, 0, 5),
            event(1, 0, 1),
            event(0, 9, 9),
        ])
        .unwrap();
        let data = log.iter().map(|event| event.data).collect::<Vec<_>>();
        assert_eq!(data, vec![99, 101, 105, 110, 200]);
    }

    #[test]
    fn duplicate_index_is_fatal() {
        let mut duplicate = event(1, 0, 1);
        duplicate.transaction_hash = B256::repeat_byte(0xab);
        let err = into_ordered_log(vec![event(1, 0, 1), event(3, 0, 0), duplicate]).unwrap_err();
        assert!(matches!(
            err,
            Error::DuplicateEvent { index, .. } if index == EventIndex::new(1, 0, 1)
        ));
        assert!(err.to_string().contains("block 1 tx 0 log 1"));
    }

    #[test]
    fn empty_log_is_ordered() {
        assert!(into_ordered_log::<u64>(vec![]).unwrap().is_empty());
    }

    #[test]
    fn kinds_match_variants() {
        let hub_kinds = HubPoolEventKind::iter().collect::<Vec<_>>();
        assert_eq!(hub_kinds.len(), 5);
        assert_eq!(hub_kinds[0], HubPoolEventKind::L1TokenEnabledForLiquidityProvision);
        assert_eq!(
            HubPoolEvent::SetPoolRebalanceRoute {
                destination_chain_id: 10,
                l1_token: Address::ZERO,
                destination_token: Address::ZERO,
            }
            .kind(),
            HubPoolEventKind::SetPoolRebalanceRoute
        );
        assert_eq!(
            SpokePoolEventKind::EnabledDepositRoute.to_string(),
            "EnabledDepositRoute"
        );
    }
}
