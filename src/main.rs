use stackprobe::cli::commands::{ClassifyArgs, CliArgs, Commands, DiscoverArgs};
use stackprobe::cli::output::OutputFormatter;
use stackprobe::discovery::discover_projects;
use stackprobe::engine::{ClassifyError, ClassifyOptions, Engine};
use stackprobe::util::logging::{self, parse_level, LoggingConfig};
use stackprobe::VERSION;

use clap::Parser;
use std::env;
use std::fs;
use std::path::PathBuf;
use tracing::{debug, Level};

fn main() {
    let args = CliArgs::parse();
    init_logging_from_args(&args);

    debug!("stackprobe v{} starting", VERSION);

    let exit_code = match &args.command {
        Commands::Classify(classify_args) => handle_classify(classify_args),
        Commands::Discover(discover_args) => handle_discover(discover_args),
    };

    std::process::exit(exit_code);
}

fn init_logging_from_args(args: &CliArgs) {
    let level = if let Some(level_str) = &args.log_level {
        parse_level(level_str).unwrap_or_else(|| {
            eprintln!(
                "Invalid log level '{}', defaulting to INFO. Valid levels: trace, debug, info, warn, error",
                level_str
            );
            Level::INFO
        })
    } else if args.verbose {
        Level::DEBUG
    } else if args.quiet {
        Level::ERROR
    } else {
        env::var("STACKPROBE_LOG_LEVEL")
            .ok()
            .and_then(|s| parse_level(&s))
            .unwrap_or(Level::INFO)
    };

    logging::init_logging(LoggingConfig::with_level(level));
}

fn handle_classify(args: &ClassifyArgs) -> i32 {
    let path = resolve_path(args.path.clone());
    let formatter = OutputFormatter::new(args.format.into());
    let engine = Engine::new();
    let options = ClassifyOptions {
        generate_dockerfile: args.docker_gen,
        classify_tests: !args.no_tests,
    };

    let rendered = if args.multi {
        let results = engine.classify_all(&path, &options);
        formatter.format_multi(&results)
    } else {
        match engine.classify(&path, &options) {
            Ok(result) => formatter.format_classification(&result),
            Err(err) => {
                eprintln!("Error: {err}");
                if matches!(err, ClassifyError::NoLanguageDetected(_)) {
                    eprintln!(
                        "Help: no recognized project markers (manifest files or sources) \
                         were found. Is this the repository root?"
                    );
                }
                return 1;
            }
        }
    };

    emit(rendered, args.output.as_deref())
}

fn handle_discover(args: &DiscoverArgs) -> i32 {
    let path = resolve_path(args.path.clone());
    let formatter = OutputFormatter::new(args.format.into());
    let candidates = discover_projects(&path);
    emit(formatter.format_candidates(&candidates), None)
}

fn resolve_path(path: Option<PathBuf>) -> PathBuf {
    path.unwrap_or_else(|| env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn emit(rendered: anyhow::Result<String>, output: Option<&std::path::Path>) -> i32 {
    match rendered {
        Ok(text) => match output {
            Some(file) => {
                if let Err(err) = fs::write(file, &text) {
                    eprintln!("Error: failed to write {}: {err}", file.display());
                    return 1;
                }
                0
            }
            None => {
                print!("{text}");
                0
            }
        },
        Err(err) => {
            eprintln!("Error: {err}");
            1
        }
    }
}
