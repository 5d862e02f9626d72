use clap::{Arg, ArgAction, Command};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use docket::parsing;

mod output;
mod problem;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("docket")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Inspect Dockerfile build recipes.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit debugging output from the parser to standard error."),
        )
        .subcommand(
            Command::new("check")
                .about("Report variable references that nothing declares")
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Dockerfile you want to check."),
                ),
        )
        .subcommand(
            Command::new("outline")
                .about("Show the stages and instructions of the given recipe")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit the outline as JSON rather than text."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The Dockerfile you want to outline."),
                ),
        )
        .get_matches();

    let filter = if matches.get_flag("verbose") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("check", submatches)) => {
            let Some(filename) = submatches.get_one::<String>("filename") else {
                std::process::exit(2);
            };
            let filename = Path::new(filename);
            let content = read(filename);
            let document = parsing::parse(&content);

            let problems = problem::undeclared_variables(&document);
            debug!(count = problems.len(), "undeclared references");

            for variable in &problems {
                eprintln!("{}", problem::concise_undeclared_variable(filename, variable));
            }
        }
        Some(("outline", submatches)) => {
            let Some(filename) = submatches.get_one::<String>("filename") else {
                std::process::exit(2);
            };
            let filename = Path::new(filename);
            let content = read(filename);
            let document = parsing::parse(&content);

            if submatches.get_flag("json") {
                match output::via_json(&document) {
                    Ok(json) => println!("{}", json),
                    Err(error) => {
                        eprintln!("error: {}", error);
                        std::process::exit(1);
                    }
                }
            } else {
                print!("{}", output::via_text(&document));
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: docket [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

fn read(filename: &Path) -> String {
    match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", problem::concise_loading_error(&error));
            std::process::exit(1);
        }
    }
}
