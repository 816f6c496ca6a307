#[cfg(feature = "tracing_debug")]
use tracing::debug;

use crate::matcher::model::*;
use crate::model::Cardinality;

/// Distribute a run of `total` positional tokens across the `cardinalities`, in declaration order.
///
/// Each positional greedily takes up to its own maximum, while leaving enough tokens for every later positional to reach its minimum.
/// When the later minimums already exceed what remains, the positional takes everything; the starved positionals are then marked deficient.
/// There is no backtracking.
pub(crate) fn allocate(cardinalities: &[Cardinality], total: usize) -> Allocation {
    // reserved[i] = sum of the minimums of every positional after i.
    let mut reserved = vec![0; cardinalities.len()];
    let mut tail: usize = 0;

    for (i, cardinality) in cardinalities.iter().enumerate().rev() {
        reserved[i] = tail;
        tail = tail.saturating_add(cardinality.min());
    }

    let mut cursor = 0;
    let mut assignments = Vec::with_capacity(cardinalities.len());

    for (i, cardinality) in cardinalities.iter().enumerate() {
        let remaining = total - cursor;
        let available = if reserved[i] <= remaining {
            remaining - reserved[i]
        } else {
            remaining
        };
        let count = std::cmp::min(cardinality.max(), available);

        #[cfg(feature = "tracing_debug")]
        {
            debug!(
                "Positional {i} ({cardinality}): remaining={remaining}, reserved={}, available={available}, count={count}.",
                reserved[i]
            );
        }

        assignments.push(Assignment {
            range: cursor..cursor + count,
            deficient: count < cardinality.min(),
        });
        cursor += count;
    }

    Allocation {
        assignments,
        unconsumed: cursor..total,
    }
}

/// The number of values an optional takes when `available` value tokens follow its identifier.
pub(crate) fn count_values(cardinality: &Cardinality, available: usize) -> usize {
    std::cmp::min(cardinality.max(), available)
}
