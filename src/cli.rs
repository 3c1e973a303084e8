//! # CLI Execution Functions
//!
//! Extracted from `main.rs` to keep the entry point slim. Contains the
//! execution logic for each subcommand: a single-value check against one or
//! all engines, and the fixed cross-validation battery plus large-input
//! timing run.

use anyhow::{Context, Result};
use collatz_engine::{amount, bignum, duration, CollatzEngine, FastEngine, NaiveEngine, SlowEngine};
use rug::Integer;
use tracing::info;

use super::{Commands, Engine};

pub fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Check { n, engine } => run_check(n, *engine),
        Commands::Battery => run_battery(),
    }
}

/// Runs one starting value through the selected engine(s), printing
/// `(even, odd, iterations, elapsed)` for each.
fn run_check(n_str: &str, engine: Engine) -> Result<()> {
    let n: Integer = n_str
        .parse()
        .with_context(|| format!("{n_str:?} is not a valid integer"))?;

    for choice in engine.resolve() {
        let start = std::time::Instant::now();
        let (evn, odd, iterations, type_abbrev) = run_one(choice, n.clone())?;
        let elapsed = duration::format_duration(start.elapsed().as_nanos() as i64);

        println!(
            "{type_abbrev}\teven={evn}\todd={odd}\titerations={iterations}\telapsed={elapsed}"
        );
    }

    Ok(())
}

fn run_one(choice: EngineChoice, n: Integer) -> Result<(u64, u64, u64, &'static str)> {
    match choice {
        EngineChoice::Naive => {
            let mut e = NaiveEngine::new();
            *e.start_value_ref() = n;
            e.start_value_modified();
            e.complete_check()?;
            Ok((e.step_count_evn(), e.step_count_odd(), e.iter_count(), e.type_abbrev()))
        }
        EngineChoice::Slow => {
            let mut e = SlowEngine::new();
            *e.start_value_ref() = n;
            e.start_value_modified();
            e.complete_check()?;
            Ok((e.step_count_evn(), e.step_count_odd(), e.iter_count(), e.type_abbrev()))
        }
        EngineChoice::Fast => {
            let mut e = FastEngine::new();
            *e.start_value_ref() = n;
            e.start_value_modified();
            e.complete_check()?;
            Ok((e.step_count_evn(), e.step_count_odd(), e.iter_count(), e.type_abbrev()))
        }
    }
}

#[derive(Clone, Copy)]
enum EngineChoice {
    Naive,
    Slow,
    Fast,
}

impl Engine {
    fn resolve(self) -> Vec<EngineChoice> {
        match self {
            Engine::Naive => vec![EngineChoice::Naive],
            Engine::Slow => vec![EngineChoice::Slow],
            Engine::Fast => vec![EngineChoice::Fast],
            Engine::All => vec![EngineChoice::Naive, EngineChoice::Slow, EngineChoice::Fast],
        }
    }
}

/// A single cross-validation case: decimal starting value and its expected
/// even/odd step counts, reproduced exactly from the original implementation's
/// consistency test.
struct BatteryCase {
    n: &'static str,
    evn: u64,
    odd: u64,
}

const BATTERY: &[BatteryCase] = &[
    BatteryCase { n: "3", evn: 5, odd: 2 },
    BatteryCase { n: "765432", evn: 107, odd: 55 },
    BatteryCase { n: "32860794781696", evn: 61, odd: 10 },
    BatteryCase { n: "3287505407311872", evn: 139, odd: 55 },
    BatteryCase { n: "420800692135919616", evn: 146, odd: 55 },
    BatteryCase {
        n: "970300334233894087246424527897362432",
        evn: 207,
        odd: 55,
    },
    BatteryCase {
        n: "645643565437415345345235535462318313342346",
        evn: 605,
        odd: 294,
    },
    BatteryCase {
        n: "156243863292978154974121315437405326167310717681664",
        evn: 438,
        odd: 171,
    },
    BatteryCase {
        n: "156243863292978154974121315437405326167310717681665",
        evn: 1034,
        odd: 547,
    },
    BatteryCase {
        n: "7457634543564564356543765868989546221123415345345235",
        evn: 732,
        odd: 353,
    },
    BatteryCase {
        n: "7457634543564564356543765868989546221123264476548153453452351432452366890718900767686634213422312124468578453411236799872211651",
        evn: 2013,
        odd: 1004,
    },
];

/// Runs the fixed cross-validation battery across all three engines, then a
/// large-input timing run on the slow engine with n = 2^1,000,000 + 1.
fn run_battery() -> Result<()> {
    for case in BATTERY {
        let n: Integer = case.n.parse().context("battery case is not a valid integer")?;

        for choice in [EngineChoice::Naive, EngineChoice::Slow, EngineChoice::Fast] {
            let (evn, odd, _, type_abbrev) = run_one(choice, n.clone())?;
            info!(n = case.n, type_abbrev, evn, odd, "battery case checked");

            if evn != case.evn || odd != case.odd {
                anyhow::bail!(
                    "{type_abbrev} engine mismatch for n={}: got (even={evn}, odd={odd}), expected (even={}, odd={})",
                    case.n,
                    case.evn,
                    case.odd,
                );
            }
        }
    }

    println!("battery: all {} cases agree across naive/slow/fast", BATTERY.len());

    run_large_number_benchmark()
}

/// n = 2^1,000,000 + 1, run through the slow engine only — the engine whose
/// one-multiply-per-iteration design the original benchmarked at this scale.
fn run_large_number_benchmark() -> Result<()> {
    let mut start_value = Integer::from(1) << 1_000_000u32;
    start_value += 1;

    println!("start value bitlen: {}\n", bignum::bit_length(&start_value));

    let mut checker = SlowEngine::new();
    *checker.start_value_ref() = start_value;
    checker.start_value_modified();

    println!("type\tstep_count_evn\tstep_count_odd\tstep_count_all\titrtons\truntime\truntime_in_s");
    print!("{}\t", checker.type_abbrev());

    let start = std::time::Instant::now();
    checker.complete_check()?;
    let elapsed_ns = start.elapsed().as_nanos() as i64;

    println!(
        "{}\t{}\t{}\t{}\t{}\t{}",
        checker.step_count_evn(),
        checker.step_count_odd(),
        checker.step_count(),
        checker.iter_count(),
        duration::format_duration(elapsed_ns),
        duration::format_duration_seconds(elapsed_ns),
    );

    info!(
        steps = %amount::format_metric(checker.step_count() as f64),
        "large-input benchmark complete"
    );

    Ok(())
}
