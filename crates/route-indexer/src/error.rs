use {
    crate::events::EventIndex,
    alloy::primitives::{Address, B256},
    thiserror::Error,
};

/// Failures that are not caused by the upstream node but by violated
/// preconditions or corrupted input. None of them are worth retrying.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("duplicate event at {index} in transaction {transaction_hash}")]
    DuplicateEvent {
        index: EventIndex,
        transaction_hash: B256,
    },
    #[error("{0} read before the first successful update")]
    NotUpdated(&'static str),
    #[error("chain {0} is not supported")]
    UnsupportedChain(u64),
    #[error("wrapped native token of the spoke pool on chain {0} is not set")]
    WrappedNativeTokenNotSet(u64),
    #[error("token {token} on chain {chain_id} has no l1 token mapping")]
    MissingL1Token { chain_id: u64, token: Address },
    #[error("max range width must be greater than zero")]
    InvalidRangeWidth,
}
