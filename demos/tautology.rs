use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use tautology_rs::{simplify, Oracle, OracleConfig, Statement, Verdict};

#[derive(Parser)]
#[command(author, version, about = "Check whether propositional formulas are tautologies")]
struct Cli {
    /// Formulas to check, e.g. "(!a | (a & a))"
    #[arg(required = true, value_name = "FORMULA")]
    formulas: Vec<String>,

    /// Always enumerate, even for read-once formulas
    #[arg(long)]
    no_fast_reject: bool,

    /// Stop after this many assignments
    #[arg(long, value_name = "INT")]
    max_assignments: Option<u64>,

    /// Stop after this many milliseconds
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,

    /// Also print the postfix form, the symbolic simplification and the model count.
    /// The model count enumerates every assignment, so it is skipped when a limit is set
    #[arg(short, long)]
    details: bool,

    /// Increase logging verbosity (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => simplelog::LevelFilter::Info,
        1 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let oracle = Oracle::with_config(OracleConfig {
        fast_reject: !cli.no_fast_reject,
        max_assignments: cli.max_assignments,
        timeout: cli.timeout_ms.map(Duration::from_millis),
    });

    for formula in &cli.formulas {
        let statement = Statement::new(formula.as_str())?;
        log::info!(
            "Checking {:?} over {} variables",
            statement.text(),
            statement.num_variables()
        );

        if cli.details {
            println!("postfix  = {}", statement.postfix());
            println!("tree     = {}", statement.tree());
            println!("simplify = {}", simplify(statement.tree()));
            if oracle.config().is_bounded() {
                log::info!("Skipping the model count: it cannot honour --max-assignments/--timeout-ms");
            } else {
                println!("models   = {}", oracle.count_models(&statement)?);
            }
        }

        match oracle.check(&statement)? {
            Verdict::Tautology { checked } => {
                println!("{}: tautology ({} assignments)", formula, checked);
            }
            Verdict::NotTautology { counterexample, checked } => {
                println!(
                    "{}: not a tautology, counterexample {} ({} assignments)",
                    formula, counterexample, checked
                );
            }
            Verdict::Unknown { checked } => {
                println!("{}: undecided after {} assignments", formula, checked);
            }
        }
    }

    Ok(())
}
