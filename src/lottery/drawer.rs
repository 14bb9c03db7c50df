use super::config::{DrawStrategy, LotteryConfig};
use super::error::LotteryError;
use super::pool::Pool;
use super::table::{Participant, WeightTable};
use super::weighted_random::weighted_random;
use linked_hash_set::LinkedHashSet;
use log::trace;
use rand::Rng;
use std::fmt;

/// A full draft order: the drawn winners first, then everyone else in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawResult {
    order: Vec<Participant>,
    top_picks: usize,
}

impl DrawResult {
    pub fn order(&self) -> &[Participant] {
        &self.order
    }

    /// The positions decided by the draw, in the order they were drawn.
    pub fn winners(&self) -> &[Participant] {
        &self.order[..self.top_picks]
    }

    pub fn remainder(&self) -> &[Participant] {
        &self.order[self.top_picks..]
    }

    pub fn first(&self) -> Option<&Participant> {
        self.order.first()
    }

    /// Zero-based position of the named participant.
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|p| p.name() == name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl fmt::Display for DrawResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, participant) in self.order.iter().enumerate() {
            writeln!(f, "Pick {}: {}", i + 1, participant)?;
        }
        Ok(())
    }
}

pub struct OrderDrawer<'a> {
    table: &'a WeightTable,
    top_picks: usize,
    strategy: DrawStrategy,
}

impl<'a> OrderDrawer<'a> {
    pub fn new(table: &'a WeightTable, config: &LotteryConfig) -> OrderDrawer<'a> {
        OrderDrawer {
            table,
            top_picks: config.top_picks,
            strategy: config.strategy,
        }
    }

    /// Checks that `pool` belongs to this table and can yield enough distinct winners.
    pub fn check(&self, pool: &Pool) -> Result<(), LotteryError> {
        if pool.participants() != self.table.participants() {
            return Err(LotteryError::PoolTableMismatch);
        }
        if pool.is_empty() {
            return Err(LotteryError::EmptyPool);
        }
        let eligible = pool.eligible_count();
        if self.top_picks > eligible {
            return Err(LotteryError::TooManyWinners {
                top_picks: self.top_picks,
                eligible,
            });
        }
        Ok(())
    }

    ///
    /// Draws the top picks from `pool` and appends the rest of the table behind them.
    ///
    /// Runs [`OrderDrawer::check`] before sampling, so the draw always terminates.
    ///
    pub fn draw<R: Rng + ?Sized>(
        &self,
        pool: &Pool,
        rng: &mut R,
    ) -> Result<DrawResult, LotteryError> {
        self.check(pool)?;

        let winners = match self.strategy {
            DrawStrategy::Rejection => self.draw_by_rejection(pool, rng),
            DrawStrategy::WeightRemoval => self.draw_by_removal(pool, rng)?,
        };

        let order = winners
            .iter()
            .copied()
            .chain((0..self.table.len()).filter(|index| !winners.contains(index)))
            .map(|index| self.table.participants()[index].clone())
            .collect();

        Ok(DrawResult {
            order,
            top_picks: self.top_picks,
        })
    }

    fn draw_by_rejection<R: Rng + ?Sized>(
        &self,
        pool: &Pool,
        rng: &mut R,
    ) -> LinkedHashSet<usize> {
        let slots = pool.slots();
        let mut winners = LinkedHashSet::new();
        while winners.len() < self.top_picks {
            let ticket = rng.gen_range(0..slots.len());
            let index = slots[ticket];
            let participant = &self.table.participants()[index];
            // Re-inserting would move an earlier winner to the back.
            if winners.contains(&index) {
                trace!("Ticket {} repeats {}, redrawing", ticket, participant);
            } else {
                trace!("Ticket {} drawn for {}", ticket, participant);
                winners.insert(index);
            }
        }
        winners
    }

    fn draw_by_removal<R: Rng + ?Sized>(
        &self,
        pool: &Pool,
        rng: &mut R,
    ) -> Result<LinkedHashSet<usize>, LotteryError> {
        let mut remaining: Vec<(usize, usize)> = pool
            .slot_counts()
            .iter()
            .copied()
            .enumerate()
            .filter(|&(_, count)| count > 0)
            .collect();
        let mut winners = LinkedHashSet::new();
        while winners.len() < self.top_picks {
            let index = weighted_random(&remaining, rng).ok_or(LotteryError::EmptyPool)?;
            trace!(
                "Drew {} from {} remaining",
                self.table.participants()[index],
                remaining.len()
            );
            remaining.retain(|&(candidate, _)| candidate != index);
            winners.insert(index);
        }
        Ok(winners)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn config(top_picks: usize, strategy: DrawStrategy) -> LotteryConfig {
        LotteryConfig {
            top_picks,
            strategy,
            ..LotteryConfig::default()
        }
    }

    const STRATEGIES: [DrawStrategy; 2] =
        [DrawStrategy::Rejection, DrawStrategy::WeightRemoval];

    #[test]
    fn test_draw_is_permutation_with_ordered_remainder() {
        let table = WeightTable::nba_default();
        for strategy in STRATEGIES {
            let config = config(4, strategy);
            let pool = Pool::build(&table, &config).unwrap();
            let drawer = OrderDrawer::new(&table, &config);
            let mut rng = StdRng::seed_from_u64(2024);
            for _ in 0..200 {
                let result = drawer.draw(&pool, &mut rng).unwrap();
                assert_eq!(result.len(), 14);
                let mut sorted = result.order().to_vec();
                sorted.sort_by(|a, b| a.name().cmp(b.name()));
                let mut expected = table.participants().to_vec();
                expected.sort_by(|a, b| a.name().cmp(b.name()));
                assert_eq!(sorted, expected);

                let remainder: Vec<Participant> = table
                    .participants()
                    .iter()
                    .filter(|p| !result.winners().contains(*p))
                    .cloned()
                    .collect();
                assert_eq!(result.remainder(), remainder.as_slice());
            }
        }
    }

    #[test]
    fn test_zero_weight_never_wins() {
        let table = WeightTable::new(vec!["A", "B"], vec![100.0, 0.0]).unwrap();
        for strategy in STRATEGIES {
            let config = config(1, strategy);
            let pool = Pool::build(&table, &config).unwrap();
            let drawer = OrderDrawer::new(&table, &config);
            let mut rng = StdRng::seed_from_u64(1);
            for _ in 0..500 {
                let result = drawer.draw(&pool, &mut rng).unwrap();
                assert_eq!(result.first().unwrap().name(), "A");
                assert_eq!(result.order()[1].name(), "B");
            }
        }
    }

    #[test]
    fn test_too_many_winners() {
        let table = WeightTable::new(vec!["A", "B", "C"], vec![60.0, 40.0, 0.0]).unwrap();
        let config = config(3, DrawStrategy::Rejection);
        let pool = Pool::build(&table, &config).unwrap();
        let err = OrderDrawer::new(&table, &config)
            .draw(&pool, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(
            err,
            LotteryError::TooManyWinners {
                top_picks: 3,
                eligible: 2
            }
        ));
    }

    #[test]
    fn test_pool_from_other_table() {
        let table = WeightTable::new(vec!["A", "B"], vec![60.0, 40.0]).unwrap();
        let config = config(1, DrawStrategy::Rejection);
        let pool = Pool::build(&WeightTable::nba_default(), &config).unwrap();
        let err = OrderDrawer::new(&table, &config)
            .draw(&pool, &mut StdRng::seed_from_u64(0))
            .unwrap_err();
        assert!(matches!(err, LotteryError::PoolTableMismatch));
    }

    #[test]
    fn test_pool_from_same_sized_table_rejected() {
        let table = WeightTable::new(vec!["A", "B"], vec![100.0, 0.0]).unwrap();
        let other = WeightTable::new(vec!["X", "Y"], vec![0.0, 100.0]).unwrap();
        for strategy in STRATEGIES {
            let config = config(1, strategy);
            let pool = Pool::build(&other, &config).unwrap();
            let err = OrderDrawer::new(&table, &config)
                .draw(&pool, &mut StdRng::seed_from_u64(0))
                .unwrap_err();
            assert!(matches!(err, LotteryError::PoolTableMismatch));
        }
    }

    ///
    /// Replays the ticket draws with an identically seeded rng: winners must come out in the
    /// order their first ticket was drawn, however many repeats fall in between.
    ///
    #[test]
    fn test_rejection_keeps_acceptance_order() {
        let table = WeightTable::nba_default();
        let config = config(4, DrawStrategy::Rejection);
        let pool = Pool::build(&table, &config).unwrap();
        let drawer = OrderDrawer::new(&table, &config);

        for seed in 0..1000 {
            let result = drawer
                .draw(&pool, &mut StdRng::seed_from_u64(seed))
                .unwrap();

            let mut replay = StdRng::seed_from_u64(seed);
            let mut accepted: Vec<usize> = vec![];
            while accepted.len() < 4 {
                let index = pool.slot(replay.gen_range(0..pool.len())).unwrap();
                if !accepted.contains(&index) {
                    accepted.push(index);
                }
            }
            let expected: Vec<Participant> = accepted
                .iter()
                .map(|&index| table.participants()[index].clone())
                .collect();
            assert_eq!(result.winners(), expected.as_slice(), "seed {}", seed);
        }
    }

    #[test]
    fn test_no_top_picks_keeps_table_order() {
        let table = WeightTable::nba_default();
        let config = config(0, DrawStrategy::Rejection);
        let pool = Pool::build(&table, &config).unwrap();
        let result = OrderDrawer::new(&table, &config)
            .draw(&pool, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert!(result.winners().is_empty());
        assert_eq!(result.order(), table.participants());
    }

    #[test]
    fn test_display_lines() {
        let table = WeightTable::new(vec!["A", "B"], vec![100.0, 0.0]).unwrap();
        let config = config(1, DrawStrategy::Rejection);
        let pool = Pool::build(&table, &config).unwrap();
        let result = OrderDrawer::new(&table, &config)
            .draw(&pool, &mut StdRng::seed_from_u64(0))
            .unwrap();
        assert_eq!(result.to_string(), "Pick 1: A\nPick 2: B\n");
        assert_eq!(result.position_of("B"), Some(1));
    }
}
