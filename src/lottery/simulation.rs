use super::config::LotteryConfig;
use super::drawer::OrderDrawer;
use super::error::LotteryError;
use super::pool::Pool;
use super::table::{Participant, WeightTable};
use log::debug;
use rand::Rng;
use std::fmt;

/// How often one participant landed the first pick over a run of simulations.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationTally {
    target: Participant,
    simulations: usize,
    first_picks: usize,
}

impl SimulationTally {
    pub fn target(&self) -> &Participant {
        &self.target
    }

    pub fn simulations(&self) -> usize {
        self.simulations
    }

    pub fn first_picks(&self) -> usize {
        self.first_picks
    }

    /// Fraction of simulations won, 0.0 when nothing was simulated.
    pub fn rate(&self) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            self.first_picks as f64 / self.simulations as f64
        }
    }
}

impl fmt::Display for SimulationTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} won the first pick {} times out of {} simulations.",
            self.target, self.first_picks, self.simulations
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FirstPickCount {
    pub participant: Participant,
    pub first_picks: usize,
    /// Weight as a fraction of the table's total weight.
    pub expected_share: f64,
}

/// First-pick counts for every participant, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct FirstPickFrequencies {
    simulations: usize,
    counts: Vec<FirstPickCount>,
}

impl FirstPickFrequencies {
    pub fn simulations(&self) -> usize {
        self.simulations
    }

    pub fn counts(&self) -> &[FirstPickCount] {
        &self.counts
    }

    pub fn get(&self, name: &str) -> Option<&FirstPickCount> {
        self.counts.iter().find(|count| count.participant.name() == name)
    }

    pub fn observed_share(&self, count: &FirstPickCount) -> f64 {
        if self.simulations == 0 {
            0.0
        } else {
            count.first_picks as f64 / self.simulations as f64
        }
    }
}

pub struct SimulationRunner<'a> {
    table: &'a WeightTable,
    config: &'a LotteryConfig,
}

impl<'a> SimulationRunner<'a> {
    pub fn new(table: &'a WeightTable, config: &'a LotteryConfig) -> SimulationRunner<'a> {
        SimulationRunner { table, config }
    }

    /// Validates the configuration once up front, so bad settings fail even with no simulations.
    fn drawer(&self) -> Result<OrderDrawer<'a>, LotteryError> {
        let drawer = OrderDrawer::new(self.table, self.config);
        drawer.check(&Pool::build(self.table, self.config)?)?;
        Ok(drawer)
    }

    ///
    /// Runs `simulations` independent draws and counts the ones where `target` picks first.
    ///
    /// Each simulation builds a fresh pool and draws a full order from it.
    ///
    pub fn run<R: Rng + ?Sized>(
        &self,
        target: &str,
        simulations: usize,
        rng: &mut R,
    ) -> Result<SimulationTally, LotteryError> {
        let target_index = self
            .table
            .position(target)
            .ok_or_else(|| LotteryError::UnknownParticipant(target.to_string()))?;
        let target = self.table.participants()[target_index].clone();
        let drawer = self.drawer()?;

        let mut first_picks = 0;
        for _ in 0..simulations {
            let pool = Pool::build(self.table, self.config)?;
            let result = drawer.draw(&pool, rng)?;
            if result.first() == Some(&target) {
                first_picks += 1;
            }
        }

        debug!("{} took {} of {} first picks", target, first_picks, simulations);
        Ok(SimulationTally {
            target,
            simulations,
            first_picks,
        })
    }

    /// Runs `simulations` draws and counts first picks for every participant at once.
    pub fn first_pick_frequencies<R: Rng + ?Sized>(
        &self,
        simulations: usize,
        rng: &mut R,
    ) -> Result<FirstPickFrequencies, LotteryError> {
        let drawer = self.drawer()?;
        let mut first_picks = vec![0usize; self.table.len()];

        for _ in 0..simulations {
            let pool = Pool::build(self.table, self.config)?;
            let result = drawer.draw(&pool, rng)?;
            if let Some(index) = result
                .first()
                .and_then(|first| self.table.position(first.name()))
            {
                first_picks[index] += 1;
            }
        }

        let total = self.table.weight_total();
        let counts = self
            .table
            .entries()
            .zip(first_picks)
            .map(|((participant, weight), first_picks)| FirstPickCount {
                participant: participant.clone(),
                first_picks,
                expected_share: weight / total,
            })
            .collect();

        debug!("Tallied first picks over {} simulations", simulations);
        Ok(FirstPickFrequencies {
            simulations,
            counts,
        })
    }
}
