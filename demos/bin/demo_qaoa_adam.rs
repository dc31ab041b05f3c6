//! QAOA with Adam on a four-node path graph.
//!
//! Optimises a depth-one MaxCut ansatz and draws the output distribution.

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;

use qvar_demos::config::{DemoConfig, OptimizerKind};
use qvar_demos::runners::QaoaRunner;
use qvar_demos::{
    bar_chart, create_progress_bar, init_logging, print_header, print_result, print_section,
    print_success,
};
use qvar_qaoa::Graph;

#[derive(Parser, Debug)]
#[command(name = "demo-qaoa-adam")]
#[command(about = "Optimise a MaxCut QAOA circuit on a path graph")]
struct Args {
    /// Number of nodes in the path graph
    #[arg(short, long, default_value = "4")]
    nodes: u32,

    /// Number of optimizer steps (overrides the config file)
    #[arg(short, long)]
    steps: Option<usize>,

    /// Start from fixed parameters instead of random ones
    #[arg(long, value_delimiter = ',')]
    init: Option<Vec<f64>>,

    /// Print the run result as JSON instead of the report
    #[arg(long)]
    json: bool,

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

    let mut config = match args.config.as_deref() {
        Some(path) => DemoConfig::load(Some(path)).context("failed to load config")?,
        None => {
            let mut config = DemoConfig::default();
            config.optimizer.kind = OptimizerKind::Adam;
            config.optimizer.stepsize = 0.05;
            config.optimizer.steps = 40;
            config.merge_env()?
        }
    };
    if args.nodes < 2 {
        anyhow::bail!("path graph needs at least two nodes, got {}", args.nodes);
    }
    if let Some(steps) = args.steps {
        config.optimizer.steps = steps;
    }
    config.validate()?;

    let graph = Graph::from_edges((0..args.nodes - 1).map(|i| (i, i + 1)))?;
    let steps = config.optimizer.steps;
    let mut runner = QaoaRunner::new(graph.clone(), config)?;
    if let Some(init) = args.init {
        runner = runner.with_initial_params(init);
    }

    if !args.json {
        print_header("QAOA MaxCut with Adam");
        print_section("Problem");
        print_result("Nodes", graph.num_nodes());
        print_result("Edges", graph.num_edges());
        print_section("Optimisation");
    }

    let pb = create_progress_bar(steps as u64, "optimising");
    let result = runner.run(|_, cost| {
        pb.set_message(format!("cost {cost:.6}"));
        pb.inc(1);
    })?;
    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    print_section("Results");
    print_result("Final cost", format!("{:.6}", result.cost));
    print_result("Parameters", format!("{:?}", result.params));
    print_result("Circuit evaluations", result.circuit_evaluations);
    print_result(
        "Most likely cut",
        format!(
            "{:0width$b} ({} edges)",
            result.best_bitstring,
            result.best_cut,
            width = graph.num_nodes()
        ),
    );

    print_section("Output distribution");
    println!("{}", bar_chart(&result.probs, graph.num_nodes(), 40));
    println!();
    print_success("Optimisation complete");
    Ok(())
}
