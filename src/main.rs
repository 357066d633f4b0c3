use std::fs;

use clap::Parser;
use kinexpr::{Options, get_result};
use tracing::Level;

/// kinexpr parses, simplifies and evaluates the math expressions found in
/// kinematics tables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells kinexpr to read the expressions from a file instead.
    #[arg(short, long)]
    file: bool,

    /// Reads the input as a matrix: rows separated by ';', cells by ','.
    #[arg(short, long)]
    matrix: bool,

    /// Substitutes bound variables and simplifies before printing.
    #[arg(short, long)]
    simplify: bool,

    /// Prints numeric values instead of expressions.
    #[arg(short, long)]
    eval: bool,

    /// Binds a value to a variable, as `name=value`. Repeatable.
    #[arg(short, long = "bind", value_name = "NAME=VALUE", value_parser = parse_binding)]
    bindings: Vec<(String, f64)>,

    /// Logs parsing and simplification steps to stderr.
    #[arg(short, long)]
    verbose: bool,

    contents: String,
}

fn parse_binding(text: &str) -> Result<(String, f64), String> {
    let (name, value) = text.split_once('=')
                            .ok_or_else(|| format!("expected NAME=VALUE but found '{text}'"))?;
    let value = value.trim()
                     .parse()
                     .map_err(|e| format!("invalid value for '{}': {e}", name.trim()))?;
    Ok((name.trim().to_string(), value))
}

fn main() {
    let args = Args::parse();

    if args.verbose {
        tracing_subscriber::fmt().with_max_level(Level::TRACE)
                                 .with_writer(std::io::stderr)
                                 .init();
    }

    let source = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let options = Options { matrix:   args.matrix,
                            simplify: args.simplify,
                            evaluate: args.eval,
                            bindings: args.bindings, };

    match get_result(&source, &options) {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        },
    }
}
