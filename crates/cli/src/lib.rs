mod check;
mod explain;
mod fix;
mod view;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use varscope_api::models::{JavaVersion, RefactorOptions};
use varscope_core::{LoadedConfig, load_options_file};

#[derive(Parser)]
#[command(
    name = "varscope",
    version,
    about = "Find Java local variables that can be declared with `var`",
    long_about = "Varscope analyzes Java sources and reports, for every local variable \
                  declaration, whether replacing its explicit type with `var` keeps the \
                  program's meaning. It can also apply the rewrite in place."
)]
pub struct Cli {
    /// Also print log output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Report eligible and ineligible declarations
    Check {
        /// Java files or directories to analyze
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Rewrite eligible declarations in place
    Fix {
        /// Java files or directories to rewrite
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        #[command(flatten)]
        config: ConfigArgs,

        /// Report what would change without writing files
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the effective configuration
    ExplainConfig {
        #[command(flatten)]
        config: ConfigArgs,

        /// Print the JSON schema of the configuration instead
        #[arg(long)]
        schema: bool,
    },
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// JSON configuration file
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Source level, e.g. `17` or `1.8`; overrides the configuration file
    #[arg(long, value_name = "VERSION")]
    pub java_version: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl ConfigArgs {
    pub fn load(&self) -> anyhow::Result<LoadedConfig> {
        let mut loaded = match &self.config {
            Some(path) => load_from(path)?,
            None => LoadedConfig {
                options: RefactorOptions::default(),
                issues: Vec::new(),
            },
        };
        if let Some(version) = &self.java_version {
            let parsed = JavaVersion::parse(version)
                .with_context(|| format!("invalid --java-version `{version}`"))?;
            loaded.options.java_version = parsed;
        }
        Ok(loaded)
    }
}

fn load_from(path: &Path) -> anyhow::Result<LoadedConfig> {
    let loaded = load_options_file(path)
        .with_context(|| format!("failed to load configuration {}", path.display()))?;
    for issue in &loaded.issues {
        eprintln!("warning: {}: {}", path.display(), issue);
    }
    Ok(loaded)
}

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _guard = varscope_core::logging::init_logging("cli", cli.verbose);

    match cli.command {
        Commands::Check {
            paths,
            config,
            format,
        } => check::run(&paths, &config.load()?, format),
        Commands::Fix {
            paths,
            config,
            dry_run,
        } => fix::run(&paths, &config.load()?, dry_run),
        Commands::ExplainConfig { config, schema } => explain::run(&config.load()?, schema),
    }
}
