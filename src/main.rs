use clap::{Arg, ArgAction, Command};
use furryscript::{logger, repl, runner};
use std::fs;
use std::path::Path;
use std::process::ExitCode;

const SCRIPT_EXTENSION: &str = "fur";

fn main() -> ExitCode {
    let matches = Command::new("furry")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Interpreter for FurryScript, a tiny cat-themed scripting language")
        .arg(
            Arg::new("file")
                .help("The .fur script to execute")
                .value_name("FILE")
                .index(1),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("demo")
                .long("demo")
                .help("Run the built-in greeting sample")
                .action(ArgAction::SetTrue)
                .conflicts_with("file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log output (-v info, -vv debug, -vvv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    let level = logger::level_from_verbosity(matches.get_count("verbose"));
    if let Err(e) = logger::init(level) {
        eprintln!("Warning: could not initialise logging: {}", e);
    }

    if matches.get_flag("demo") {
        return exit_code(runner::run(runner::SAMPLE_PROGRAM, Some("<demo>")).is_ok());
    }

    if let Some(file_path) = matches.get_one::<String>("file") {
        return run_file(file_path);
    }

    repl::start();
    ExitCode::SUCCESS
}

fn run_file(path: &str) -> ExitCode {
    let path = Path::new(path);

    if path.extension().and_then(|ext| ext.to_str()) != Some(SCRIPT_EXTENSION) {
        eprintln!(
            "Error: FurryScript files must have a .{} extension",
            SCRIPT_EXTENSION
        );
        return ExitCode::FAILURE;
    }

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return ExitCode::FAILURE;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let filename = path.display().to_string();
            exit_code(runner::run(&source, Some(&filename)).is_ok())
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            ExitCode::FAILURE
        }
    }
}

fn exit_code(success: bool) -> ExitCode {
    if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
