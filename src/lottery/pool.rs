use super::config::LotteryConfig;
use super::error::LotteryError;
use super::table::{Participant, WeightTable};
use log::debug;

/// Allowed drift between the weight sum and the configured expected total.
const WEIGHT_TOTAL_TOLERANCE: f64 = 1e-6;

///
/// The tickets of a single draw.
///
/// Each slot holds the table index of the participant owning that ticket. Participant 0's
/// tickets come first, then participant 1's, and so on, so the same table always builds the
/// same pool. The pool remembers the participants it was built for so it cannot be drawn
/// against another table.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    participants: Vec<Participant>,
    slots: Vec<usize>,
    slot_counts: Vec<usize>,
    scale: f64,
}

impl Pool {
    pub fn build(table: &WeightTable, config: &LotteryConfig) -> Result<Pool, LotteryError> {
        if config.pool_size == 0 {
            return Err(LotteryError::ZeroPoolSize);
        }

        let total = table.weight_total();
        if let Some(expected) = config.expected_total {
            if (total - expected).abs() > WEIGHT_TOTAL_TOLERANCE {
                return Err(LotteryError::WeightTotalMismatch {
                    expected,
                    actual: total,
                });
            }
        }
        if total <= 0.0 {
            return Err(LotteryError::ZeroWeightTotal);
        }

        let scale = config.pool_size as f64 / total;
        let slot_counts: Vec<usize> = table
            .weights()
            .iter()
            .map(|weight| (weight * scale).round() as usize)
            .collect();

        let filled: usize = slot_counts.iter().sum();
        if filled != config.pool_size {
            return Err(LotteryError::PoolSizeMismatch {
                expected: config.pool_size,
                actual: filled,
            });
        }

        let slots = slot_counts
            .iter()
            .enumerate()
            .flat_map(|(index, &count)| std::iter::repeat(index).take(count))
            .collect();

        debug!(
            "Built pool of {} slots at scale {} for {} participants",
            config.pool_size,
            scale,
            table.len()
        );
        Ok(Pool {
            participants: table.participants().to_vec(),
            slots,
            slot_counts,
            scale,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Table index of the participant holding ticket `index`.
    pub fn slot(&self, index: usize) -> Option<usize> {
        self.slots.get(index).copied()
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn slot_count(&self, participant_index: usize) -> usize {
        self.slot_counts.get(participant_index).copied().unwrap_or(0)
    }

    pub fn slot_counts(&self) -> &[usize] {
        &self.slot_counts
    }

    /// Participants of the table this pool was built from, in table order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Participants holding at least one ticket, i.e. the ones that can win a draw.
    pub fn eligible_count(&self) -> usize {
        self.slot_counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}
