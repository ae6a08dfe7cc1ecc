use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use colored::*;
use std::io::{self, Write};
use std::path::PathBuf;

use nfogen_cli::config::{CliOverrides, ConfigManager};
use nfogen_cli::error::{CliError, CliResult, ExitCode};
use nfogen_cli::file_discovery::DiscoveryError;
use nfogen_cli::orchestrators::GenerateOrchestrator;
use nfogen_cli::output::{self, OutputFormat};
use nfogen_core::{FileSink, HashAlgorithm, IdSource};

#[derive(Parser)]
#[command(name = "nfogen")]
#[command(author, version, about = "NFO Generator - Episode descriptors from media file names", long_about = None)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate descriptors for every video file under a directory
    Generate {
        /// Directory to scan (defaults to scan.root, normally the current directory)
        root: Option<PathBuf>,

        /// Replace existing descriptors
        #[arg(short, long)]
        overwrite: bool,

        /// Emit unknown fields and extra elements as empty elements
        #[arg(long, overrides_with = "no_empty_elements")]
        empty_elements: bool,

        /// Omit unknown fields and extra elements
        #[arg(long)]
        no_empty_elements: bool,

        /// Extra placeholder element (can be specified multiple times, replaces the configured list)
        #[arg(long = "extra-element", value_name = "NAME")]
        extra_elements: Vec<String>,

        /// Which string is hashed into the unique identifier
        #[arg(long, value_enum)]
        id_source: Option<IdSourceArg>,

        /// Label written to the uniqueid type attribute
        #[arg(long, value_name = "LABEL")]
        id_type: Option<String>,

        /// Hash algorithm for the unique identifier
        #[arg(short, long, value_enum)]
        algorithm: Option<HashAlgorithmArg>,

        /// Container extension to process (can be specified multiple times, replaces the default list)
        #[arg(long = "container", value_name = "EXT")]
        containers: Vec<String>,

        /// Extension of the generated descriptor files
        #[arg(long, value_name = "EXT")]
        descriptor_extension: Option<String>,

        /// Exclude patterns (glob patterns relative to the root, can be specified multiple times)
        #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
        exclude_patterns: Vec<String>,

        /// Maximum directory depth below the root (0 = root only)
        #[arg(long)]
        max_depth: Option<usize>,

        /// Follow symbolic links
        #[arg(short = 'L', long)]
        follow_links: bool,

        /// Build descriptors without writing them
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Print every descriptor to stdout
        #[arg(short, long)]
        print: bool,

        /// Summary format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormatArg,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., scan.overwrite)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., descriptor.extra_elements)
        key: String,

        /// Value to set (comma-separated for lists)
        value: String,
    },

    /// List all configuration values
    List,

    /// Print the configuration file path
    Path,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum IdSourceArg {
    Path,
    Filename,
    Absolute,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum HashAlgorithmArg {
    Md5,
    Sha1,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum OutputFormatArg {
    Text,
    Json,
}

impl From<IdSourceArg> for IdSource {
    fn from(arg: IdSourceArg) -> Self {
        match arg {
            IdSourceArg::Path => IdSource::Path,
            IdSourceArg::Filename => IdSource::Filename,
            IdSourceArg::Absolute => IdSource::Absolute,
        }
    }
}

impl From<HashAlgorithmArg> for HashAlgorithm {
    fn from(arg: HashAlgorithmArg) -> Self {
        match arg {
            HashAlgorithmArg::Md5 => HashAlgorithm::MD5,
            HashAlgorithmArg::Sha1 => HashAlgorithm::SHA1,
        }
    }
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

/// Options of a generate invocation that do not live in the configuration
struct RunOptions {
    dry_run: bool,
    print: bool,
    format: OutputFormat,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging based on debug flag
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("nfogen_core", log::LevelFilter::Debug)
            .filter_module("nfogen_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    let exit_code = match run(cli.command) {
        Ok(code) => code,
        Err(error) => {
            eprint!("{}", error.format_for_user(cli.debug));
            error.exit_code()
        }
    };

    std::process::exit(exit_code as i32);
}

fn run(command: Commands) -> CliResult<ExitCode> {
    match command {
        Commands::Generate {
            root,
            overwrite,
            empty_elements,
            no_empty_elements,
            extra_elements,
            id_source,
            id_type,
            algorithm,
            containers,
            descriptor_extension,
            exclude_patterns,
            max_depth,
            follow_links,
            dry_run,
            print,
            format,
        } => {
            let emit_empty_elements = if empty_elements {
                Some(true)
            } else if no_empty_elements {
                Some(false)
            } else {
                None
            };

            let overrides = CliOverrides {
                root,
                overwrite,
                emit_empty_elements,
                extra_elements,
                source: id_source.map(Into::into),
                algorithm: algorithm.map(Into::into),
                unique_id_type: id_type,
                containers,
                descriptor_extension,
                exclude: exclude_patterns,
                follow_links,
                max_depth,
            };
            let options = RunOptions {
                dry_run,
                print,
                format: format.into(),
            };

            generate_command(overrides, options)
        }
        Commands::Config { command } => {
            config_command(command)?;
            Ok(ExitCode::Success)
        }
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(ExitCode::Success)
        }
    }
}

fn generate_command(overrides: CliOverrides, options: RunOptions) -> CliResult<ExitCode> {
    if options.print && options.format == OutputFormat::Json {
        return Err(CliError::misuse(
            "--print cannot be combined with --format json (both write to stdout)",
        ));
    }

    let manager = ConfigManager::new();
    let mut config = manager.load().map_err(|e| {
        CliError::from(e).with_context("config", &manager.get_config_path().display().to_string())
    })?;
    config.apply_cli_overrides(overrides);
    log::debug!("Resolved configuration: {config:?}");

    config.validate().map_err(|e| {
        CliError::misuse(&format!("Invalid configuration: {e}"))
            .with_suggestion("Inspect the resolved values with 'nfogen config list'")
    })?;

    let orchestrator = GenerateOrchestrator::from_config(&config, options.dry_run, options.print)
        .map_err(into_cli_error)?;

    let stdout = io::stdout();
    let mut echo = stdout.lock();
    let summary = orchestrator
        .run(&mut FileSink, &mut echo)
        .map_err(into_cli_error)?;

    let rendered = output::format_summary(&summary, options.format)?;
    match options.format {
        OutputFormat::Json => {
            writeln!(echo, "{rendered}").map_err(|e| {
                CliError::general("Failed to write summary").with_source(Box::new(e))
            })?;
        }
        OutputFormat::Text => eprint!("{rendered}"),
    }

    if summary.has_failures() {
        Ok(ExitCode::GeneralError)
    } else {
        Ok(ExitCode::Success)
    }
}

/// Keep discovery errors categorised when they travel through anyhow
fn into_cli_error(error: anyhow::Error) -> CliError {
    match error.downcast::<DiscoveryError>() {
        Ok(discovery) => discovery.into(),
        Err(other) => other.into(),
    }
}

fn config_command(command: ConfigCommand) -> CliResult<()> {
    let mut manager = ConfigManager::new();

    match command {
        ConfigCommand::Get { key } => {
            let value = manager
                .get(&key)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            println!("{value}");
        }
        ConfigCommand::Set { key, value } => {
            manager
                .set(&key, &value)
                .map_err(|e| CliError::misuse(&format!("{e:#}")))?;
            eprintln!("{}", format!("Set {key} = {value}").green());
            eprintln!(
                "Configuration saved to: {}",
                manager.get_config_path().display()
            );
        }
        ConfigCommand::List => {
            let items = manager.list()?;

            eprintln!("{}", "Configuration:".bold().blue());
            eprintln!("Config file: {}", manager.get_config_path().display());

            let mut current_section = "";
            for (key, value) in &items {
                let (section, field) = key.split_once('.').unwrap_or(("general", key.as_str()));
                if section != current_section {
                    println!();
                    println!("[{}]", section.yellow());
                    current_section = section;
                }
                println!("  {} = {}", field.cyan(), value);
            }
        }
        ConfigCommand::Path => {
            println!("{}", manager.get_config_path().display());
        }
    }

    Ok(())
}

fn generate_completions(shell: Shell) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();

    generate(shell, &mut cmd, name, &mut io::stdout());
}
