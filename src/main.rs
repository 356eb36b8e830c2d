use std::{fs, path::PathBuf};

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, WrapErr};
use tracecalc::{
    Bindings, EngineConfig, compile_with,
    config::DEFAULT_MAX_DEPTH,
    template::{
        plan::{Step, SweepPlan},
        sweep::{Sweep, Traversal, parse_series},
    },
};

/// tracecalc evaluates expressions over measured series and expands
/// instrument command sweeps.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Evaluates an expression.
    Eval {
        /// Binds a variable, e.g. `x=1,2,3`. One value binds a scalar.
        #[arg(long = "var", value_name = "NAME=VALUES", value_parser = parse_variable)]
        vars: Vec<(String, Vec<f64>)>,

        /// Prints the compiled postfix program instead of evaluating it.
        #[arg(long)]
        rpn: bool,

        /// Maximum nesting depth.
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,

        /// Tells tracecalc to read the expression from a file.
        #[arg(short, long)]
        file: bool,

        /// The expression, or a path with `--file`.
        contents: String,
    },
    /// Prints the commands of every sweep iteration.
    Sweep {
        /// Declares a sweep variable, e.g. `v=0,0.5,1`.
        #[arg(long = "var", value_name = "NAME=VALUES", value_parser = parse_variable)]
        vars: Vec<(String, Vec<f64>)>,

        /// Visits every combination instead of zipping the series. Optionally
        /// names the loop order, outermost first.
        #[arg(long, value_name = "NAMES", num_args = 0..=1, default_missing_value = "")]
        permute: Option<String>,

        /// Steps as `text`, `instrument|command` or `instrument|command|output`.
        #[arg(required = true)]
        steps: Vec<String>,
    },
}

fn parse_variable(arg: &str) -> Result<(String, Vec<f64>), String> {
    let (name, values) = arg.split_once('=')
                            .ok_or_else(|| format!("expected NAME=VALUES, found '{arg}'"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{arg}'"));
    }
    let values = parse_series(values).map_err(|e| e.to_string())?;
    Ok((name.to_string(), values))
}

fn main() -> miette::Result<()> {
    let args = Args::parse();

    match args.command {
        Commands::Eval { vars,
                         rpn,
                         max_depth,
                         file,
                         contents, } => {
            let source = if file {
                let path = PathBuf::from(&contents);
                fs::read_to_string(&path).into_diagnostic()
                                         .wrap_err_with(|| {
                                             format!("Failed to read the input file '{}'",
                                                     path.display())
                                         })?
            } else {
                contents
            };

            let config = EngineConfig { max_depth };
            let program = compile_with(source.trim(), &config)?;
            if rpn {
                println!("{program}");
                return Ok(());
            }

            let mut bindings = Bindings::new();
            for (name, values) in vars {
                if let [single] = values[..] {
                    bindings.insert_scalar(name, single);
                } else {
                    bindings.insert_vector(name, values);
                }
            }
            println!("{}", program.evaluate_with(&bindings, &config)?);
        },
        Commands::Sweep { vars, permute, steps } => {
            let traversal = match permute {
                None => Traversal::Sequential,
                Some(order) => Traversal::Permutation { priority: order.split(',')
                                                                       .map(str::trim)
                                                                       .filter(|n| !n.is_empty())
                                                                       .map(str::to_string)
                                                                       .collect(), },
            };
            let steps = steps.iter()
                             .map(|s| s.parse::<Step>())
                             .collect::<Result<Vec<_>, _>>()?;

            let plan = SweepPlan::new(steps, Sweep::new(vars), traversal)?;
            for (i, actions) in plan.iterations()?.iter().enumerate() {
                println!("[{i}]");
                for action in actions {
                    println!("    {action}");
                }
            }
        },
    }

    Ok(())
}
