//! Command-line entry point: run one model instance and report the
//! trailing-window summary. Policy sweeps and plotting live outside this
//! binary; they consume the exported metrics JSON.

use lexopt::prelude::*;
use macro_model::model::EconomicModel;
use macro_model::scenario::{Scenario, create_standard_scenarios};

#[derive(Debug, Clone)]
struct CliArgs {
    command: Command,
    scenario_name: String,
    scenario_file: Option<String>,
    steps: Option<usize>,
    citizens: Option<usize>,
    businesses: Option<usize>,
    random_seed: Option<u64>,
    output_file: Option<String>,
    summary_window: usize,
    quiet: bool,
}

#[derive(Debug, Clone)]
enum Command {
    Run,
    Template { file: String },
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            command: Command::Run,
            scenario_name: "default".to_string(),
            scenario_file: None,
            steps: None,
            citizens: None,
            businesses: None,
            random_seed: None,
            output_file: None,
            summary_window: 5,
            quiet: false,
        }
    }
}

fn parse_args() -> Result<CliArgs, lexopt::Error> {
    let mut parser = lexopt::Parser::from_env();
    let mut cli_args = CliArgs::default();
    let mut subcommand: Option<String> = None;
    let mut template_file: Option<String> = None;

    while let Some(arg) = parser.next()? {
        match arg {
            Value(val) => {
                let val_str = val.string()?;
                if subcommand.is_none() {
                    subcommand = Some(val_str);
                } else if subcommand.as_deref() == Some("template") {
                    template_file = Some(val_str);
                }
            }
            Long("scenario") => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.scenario_name = val.string()?;
                }
            }
            Long("scenario-file") => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.scenario_file = Some(val.string()?);
                }
            }
            Long("steps") | Short('n') => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.steps = Some(val.parse()?);
                }
            }
            Long("citizens") => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.citizens = Some(val.parse()?);
                }
            }
            Long("businesses") => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.businesses = Some(val.parse()?);
                }
            }
            Long("seed") => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.random_seed = Some(val.parse()?);
                }
            }
            Long("window") => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.summary_window = val.parse()?;
                }
            }
            Long("output") | Short('o') => {
                if let Some(Value(val)) = parser.next()? {
                    cli_args.output_file = Some(val.string()?);
                }
            }
            Long("quiet") | Short('q') => cli_args.quiet = true,
            Long("help") | Short('h') => {
                print_help();
                std::process::exit(0);
            }
            _ => return Err(arg.unexpected()),
        }
    }

    cli_args.command = match subcommand.as_deref() {
        Some("run") | None => Command::Run,
        Some("template") => Command::Template {
            file: template_file.unwrap_or_else(|| "scenario.json".to_string()),
        },
        Some(cmd) => {
            eprintln!("Unknown command: {}", cmd);
            print_help();
            std::process::exit(1);
        }
    };

    Ok(cli_args)
}

fn apply_overrides(scenario: &mut Scenario, args: &CliArgs) {
    if let Some(steps) = args.steps {
        scenario.steps = steps;
    }
    if let Some(citizens) = args.citizens {
        scenario.citizens_per_country = citizens;
    }
    if let Some(businesses) = args.businesses {
        scenario.businesses_per_country = businesses;
    }
    if let Some(seed) = args.random_seed {
        scenario.random_seed = Some(seed);
    }
}

fn main() {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error parsing arguments: {}", e);
            std::process::exit(1);
        }
    };

    match &args.command {
        Command::Template { file } => {
            let scenario = Scenario::default();
            if let Err(e) = scenario.save_to_file(file) {
                eprintln!("Failed to write scenario template: {}", e);
                std::process::exit(1);
            }
            println!("Wrote scenario template to {}", file);
        }
        Command::Run => run(&args),
    }
}

fn run(args: &CliArgs) {
    let mut scenario = if let Some(ref file) = args.scenario_file {
        match Scenario::load_from_file(file) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("Failed to load scenario from {}: {}", file, e);
                std::process::exit(1);
            }
        }
    } else {
        let scenarios = create_standard_scenarios();
        match scenarios.get(&args.scenario_name) {
            Some(s) => s.clone(),
            None => {
                eprintln!("Unknown scenario: {}", args.scenario_name);
                let mut names: Vec<_> = scenarios.keys().cloned().collect();
                names.sort();
                eprintln!("Available: {}", names.join(", "));
                std::process::exit(1);
            }
        }
    };

    apply_overrides(&mut scenario, args);

    if let Err(e) = scenario.validate() {
        eprintln!("Invalid scenario: {}", e);
        std::process::exit(1);
    }

    if !args.quiet {
        println!("{}", scenario);
    }

    let mut model = EconomicModel::new(&scenario);
    model.run(scenario.steps);

    if !args.quiet {
        println!("{}", model.summary(args.summary_window));
        for country in &model.countries {
            println!("{}", country);
        }
    }

    if let Some(ref output) = args.output_file {
        if let Err(e) = model.metrics.save_to_file(output) {
            eprintln!("Failed to write metrics to {}: {}", output, e);
            std::process::exit(1);
        }
        if !args.quiet {
            println!("Wrote metrics to {}", output);
        }
    }
}

fn print_help() {
    println!("\nMacro Model Simulation\n");
    println!("USAGE:");
    println!("    macro-model-sim [COMMAND] [OPTIONS]\n");

    println!("COMMANDS:");
    println!("    run              Run the simulation (default)");
    println!("    template [FILE]  Write a scenario template JSON file\n");

    println!("OPTIONS:");
    println!("    --scenario <NAME>       Use a built-in scenario (default: default)");
    println!("                            Available: default, two_economies, protectionist");
    println!("    --scenario-file <FILE>  Load scenario from JSON file");
    println!("    -n, --steps <N>         Number of steps to simulate");
    println!("    --citizens <N>          Citizens per country");
    println!("    --businesses <N>        Businesses per country");
    println!("    --seed <N>              Random seed for reproducible runs");
    println!("    --window <N>            Summary window, mean of last N steps (default: 5)");
    println!("    -o, --output <FILE>     Write the full metrics store as JSON");
    println!("    -q, --quiet             Suppress non-essential output");
    println!("    -h, --help              Print help information\n");

    println!("EXAMPLES:");
    println!("    # Reproducible 50-step run of the two-economy scenario");
    println!("    macro-model-sim run --scenario two_economies --steps 50 --seed 12345\n");

    println!("    # Export metrics for external analysis");
    println!("    macro-model-sim run -o metrics.json -q");
}
