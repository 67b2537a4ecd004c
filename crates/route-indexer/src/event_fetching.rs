use {
    crate::{Error, events::Event},
    anyhow::Result,
    std::{
        fmt::{Debug, Display},
        ops::RangeInclusive,
    },
};

/// Source of the decoded logs of a single contract.
#[async_trait::async_trait]
pub trait EventRetrieving: Send + Sync {
    type Kind: Copy + Debug + Display + Send + Sync;
    type Event: Send;

    /// Number of the current head of the chain the contract lives on.
    async fn current_block(&self) -> Result<u64>;

    /// All events of `kind` emitted within `blocks` in on-chain order.
    async fn past_events(
        &self,
        kind: Self::Kind,
        blocks: RangeInclusive<u64>,
    ) -> Result<Vec<Event<Self::Event>>>;
}

/// Splits `blocks` into consecutive, gapless and non-overlapping sub-ranges
/// whose end is at most `max_range_width` blocks past their start. The last
/// sub-range is clipped to the end of `blocks`.
pub fn block_ranges(
    blocks: RangeInclusive<u64>,
    max_range_width: Option<u64>,
) -> Result<Vec<RangeInclusive<u64>>, Error> {
    let (start, end) = blocks.into_inner();
    if start > end {
        return Ok(Vec::new());
    }
    let width = match max_range_width {
        None => return Ok(vec![start..=end]),
        Some(0) => return Err(Error::InvalidRangeWidth),
        Some(width) => width,
    };

    let mut ranges = Vec::new();
    let mut from = start;
    loop {
        let to = from.saturating_add(width).min(end);
        ranges.push(from..=to);
        if to == end {
            return Ok(ranges);
        }
        from = to + 1;
    }
}

/// Fetches all events of one kind within `blocks`, issuing one query per
/// sub-range of at most `max_range_width` blocks. Queries run one after the
/// other to keep the load on the node bounded.
pub async fn fetch_events<R>(
    retriever: &R,
    kind: R::Kind,
    blocks: RangeInclusive<u64>,
    max_range_width: Option<u64>,
) -> Result<Vec<Event<R::Event>>>
where
    R: EventRetrieving + ?Sized,
{
    let mut events = Vec::new();
    for range in block_ranges(blocks, max_range_width)? {
        tracing::trace!(%kind, from = range.start(), to = range.end(), "querying events");
        let batch = retriever.past_events(kind, range).await?;
        events.extend(batch);
    }
    tracing::debug!(%kind, events = events.len(), "fetched events");
    Ok(events)
}
