//! Simulates the lottery many times and compares each participant's first picks to its odds
use clap::Parser;
use draft_lottery::logging;
use draft_lottery::lottery::{load_or_default, DrawStrategy, LotteryError, SimulationRunner};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 10000)]
    simulations: usize,
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

    println!(
        "===\nSimulations: {}, Pool: {}, Top picks: {}, Strategy: {:?}",
        args.simulations, config.pool_size, config.top_picks, config.strategy
    );
    println!("---");
    let frequencies =
        SimulationRunner::new(&table, &config).first_pick_frequencies(args.simulations, &mut rng)?;

    println!("Participant\tFirst picks\tPercentage\tExpected");
    for count in frequencies.counts() {
        println!(
            "{}\t{}\t{:>5.2}%\t{:>5.2}%",
            count.participant,
            count.first_picks,
            100.0 * frequencies.observed_share(count),
            100.0 * count.expected_share
        );
    }
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
