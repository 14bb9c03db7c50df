//! Runs one example draft lottery draw, then simulates the lottery for one team
use clap::Parser;
use draft_lottery::logging;
use draft_lottery::lottery::{
    load_or_default, DrawStrategy, LotteryError, OrderDrawer, Pool, SimulationRunner,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of lotteries to simulate
    #[arg(short, long, default_value_t = 1000)]
    simulations: usize,
    /// Participant whose first picks are counted
    #[arg(short, long, default_value = "UTAH")]
    target: String,
    /// JSON settings file with the participants and weights; the NBA table is used if omitted
    #[arg(short, long)]
    config_file: Option<PathBuf>,
    #[arg(long)]
    seed: Option<u64>,
    #[arg(long, value_enum)]
    strategy: Option<DrawStrategy>,
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,
}

fn run(args: &Args) -> Result<(), LotteryError> {
    let (table, mut config) = load_or_default(args.config_file.as_deref())?;
    if let Some(strategy) = args.strategy {
        config.strategy = strategy;
    }
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let pool = Pool::build(&table, &config)?;
    let result = OrderDrawer::new(&table, &config).draw(&pool, &mut rng)?;
    print!("{}", result);

    let tally =
        SimulationRunner::new(&table, &config).run(&args.target, args.simulations, &mut rng)?;
    println!("{}", tally);
    Ok(())
}

fn main() {
    let args = Args::parse();
    logging::init(args.verbose.log_level_filter());

    if let Err(err) = run(&args) {
        log::error!("{}", err);
        eprintln!("{}", err);
        std::process::exit(1);
    }
}
