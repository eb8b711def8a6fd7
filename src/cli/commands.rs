use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Heuristic project classification for CI/CD pipeline generation
#[derive(Parser, Debug)]
#[command(
    name = "stackprobe",
    about = "Heuristic project classification for CI/CD pipeline generation",
    version,
    long_about = "stackprobe inspects a source repository and classifies it: language, \
                  language version, web framework, test framework, and artifact strategy. \
                  The classification drives generation of CI/CD pipeline stages and \
                  Dockerfiles downstream."
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(long, global = true, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(short = 'v', long, global = true, help = "Verbose logging")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Quiet mode - suppress non-error output"
    )]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(
        about = "Classify a project (or every project under a root)",
        long_about = "Classifies a project's language, version, framework, artifact \
                      strategy, and test setup.\n\n\
                      Examples:\n  \
                      stackprobe classify\n  \
                      stackprobe classify /path/to/repo --format json\n  \
                      stackprobe classify /path/to/repos --multi\n  \
                      stackprobe classify --docker-gen"
    )]
    Classify(ClassifyArgs),

    #[command(
        about = "Discover project candidates under a root directory",
        long_about = "Scores each immediate child directory as a project candidate and \
                      prints the accepted candidates ranked by confidence.\n\n\
                      Examples:\n  \
                      stackprobe discover /path/to/repos\n  \
                      stackprobe discover --format json"
    )]
    Discover(DiscoverArgs),
}

#[derive(Parser, Debug, Clone)]
pub struct ClassifyArgs {
    #[arg(
        value_name = "PATH",
        help = "Path to the project (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,

    #[arg(
        long,
        help = "Treat PATH as a root containing multiple projects and classify each"
    )]
    pub multi: bool,

    #[arg(long, help = "Generate a Dockerfile when the project has none")]
    pub docker_gen: bool,

    #[arg(long, help = "Skip test framework classification")]
    pub no_tests: bool,

    #[arg(
        short = 'o',
        long,
        value_name = "FILE",
        help = "Write output to file instead of stdout"
    )]
    pub output: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct DiscoverArgs {
    #[arg(
        value_name = "PATH",
        help = "Root directory to scan (defaults to current directory)"
    )]
    pub path: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        value_enum,
        default_value = "human",
        help = "Output format"
    )]
    pub format: OutputFormatArg,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormatArg {
    Human,
    Json,
    Yaml,
}

impl From<OutputFormatArg> for super::output::OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Human => super::output::OutputFormat::Human,
            OutputFormatArg::Json => super::output::OutputFormat::Json,
            OutputFormatArg::Yaml => super::output::OutputFormat::Yaml,
        }
    }
}
