//! Console report comparing quickselect variants.
//!
//! `--runs`, `--calls-runs` and `--quiz-runs` scale the three reports,
//! `--seed` makes a run reproducible and `--parallel` averages call counts on
//! the rayon pool. Set `QSELECT_LOG=debug` to see per-report progress.

use clap::{value_parser, Arg, ArgAction, Command};
use log::info;
use quickselect::select::harness::{average_calls, compare_implementations, quiz};
use quickselect::select::HarnessConfig;

fn make_options_parser() -> Command {
    Command::new("compare")
        .about("Compares 1-pivot and 2-pivot quickselect")
        .arg(
            Arg::new("runs")
                .long("runs")
                .help("Timed runs per implementation")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("calls-runs")
                .long("calls-runs")
                .help("Runs averaged for the average-call report")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("quiz-runs")
                .long("quiz-runs")
                .help("Runs averaged per quiz entry")
                .value_parser(value_parser!(usize)),
        )
        .arg(
            Arg::new("seed")
                .short('s')
                .long("seed")
                .help("Seed for reproducible runs")
                .value_parser(value_parser!(u64)),
        )
        .arg(
            Arg::new("parallel")
                .short('p')
                .long("parallel")
                .help("Average call counts in parallel")
                .action(ArgAction::SetTrue),
        )
}

fn parse_config() -> HarnessConfig {
    let matches = make_options_parser().get_matches();
    let mut config = HarnessConfig::default();
    if let Some(&runs) = matches.get_one::<usize>("runs") {
        config.compare_runs = runs;
    }
    if let Some(&runs) = matches.get_one::<usize>("calls-runs") {
        config.calls_runs = runs;
    }
    if let Some(&runs) = matches.get_one::<usize>("quiz-runs") {
        config.quiz_runs = runs;
    }
    config.seed = matches.get_one::<u64>("seed").copied();
    config.parallel = matches.get_flag("parallel");
    config
}

fn main() -> quickselect::Result<()> {
    let env = env_logger::Env::new()
        .filter("QSELECT_LOG")
        .write_style("QSELECT_LOG_STYLE");
    env_logger::init_from_env(env);

    let config = parse_config();
    info!("harness config: {:?}", config);
    let mut rng = config.rng();

    println!(
        "Testing 1-pivot quickselects with {} runs on an array of {} elements finding a random largest element",
        config.compare_runs, config.compare_len
    );
    let cmp = compare_implementations(&config, &mut rng)?;
    println!("Avg. explicit quickselect time: {:?}", cmp.explicit);
    println!("Avg. general quickselect time: {:?}", cmp.general);
    println!("\n");

    let avgs = average_calls(&config, &mut rng)?;
    println!("Average calls per algorithm for n={}, k={}:", avgs.n, avgs.k);
    println!("Average calls for 1-pivot: {}", avgs.one_pivot);
    println!("Average calls for 2-pivot: {}", avgs.two_pivot);

    println!("\nQuiz");
    for row in quiz(&config, &mut rng)? {
        println!(
            "{}, n={}, k={}: {}",
            row.algorithm.name(),
            row.n,
            row.k,
            row.average
        );
    }

    Ok(())
}
