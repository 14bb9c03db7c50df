//! Weighted draft lottery: ticket pool, draw order, and repeated simulation.
pub mod config;
pub mod drawer;
pub mod error;
pub mod pool;
pub mod simulation;
pub mod table;
pub mod weighted_random;

pub use config::{load_or_default, DrawStrategy, LotteryConfig, LotterySettings};
pub use drawer::{DrawResult, OrderDrawer};
pub use error::LotteryError;
pub use pool::Pool;
pub use simulation::{FirstPickCount, FirstPickFrequencies, SimulationRunner, SimulationTally};
pub use table::{Participant, TableEntry, WeightTable};
