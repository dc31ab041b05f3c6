//! Trotterised time-evolution demo.
//!
//! Evolves `|00⟩` under `X₀ ⊗ A₁ + X₀`, where `A` is a real Hermitian
//! matrix, after decomposing the Hamiltonian into Pauli words.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;

use qvar_demos::config::DemoConfig;
use qvar_demos::runners::TimeEvolutionRunner;
use qvar_demos::{init_logging, print_header, print_result, print_section, print_success};

#[derive(Parser, Debug)]
#[command(name = "demo-time-evolution")]
#[command(about = "Trotterised evolution of a decomposed Hamiltonian")]
struct Args {
    /// YAML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = DemoConfig::load(args.config.as_deref()).context("failed to load config")?;

    print_header("Approximate Time Evolution");

    let runner = TimeEvolutionRunner::hermitian_example()?;
    let result = runner.run(&config)?;

    print_section("Decomposed Hamiltonian");
    println!("{}", result.decomposed);

    print_section("Circuit");
    println!("{}", result.drawing);

    print_section("Expectation values");
    for (i, value) in result.expvals.iter().enumerate() {
        print_result(&format!("⟨Z{i}⟩"), format!("{value:.10}"));
    }
    println!();
    print_success("Evolution complete");
    Ok(())
}
