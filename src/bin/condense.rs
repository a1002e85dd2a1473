//! Schema Condense CLI
//!
//! Condenses a single schema document or a whole directory of them.

use std::path::{Path, PathBuf};
use clap::{Parser, Subcommand};
use schema_condense::batch::condense_directory;
use schema_condense::loader::{load_document, load_reader};
use schema_condense::{Checksum, CondenseConfig, Condenser, CyclePolicy, OutputFormat};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "schema-condense")]
#[command(about = "Condense JSON Schema documents into property/description maps")]
struct Cli {
    /// Path to a config file (defaults to condense.toml lookup)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Treat revisited $ref cycles as unresolved instead of failing
    #[arg(long, global = true)]
    truncate_cycles: bool,

    /// Maximum nesting depth below the root
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Write compact JSON regardless of config
    #[arg(long, global = true)]
    compact: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Condense one schema document ("-" reads stdin)
    File {
        path: PathBuf,
        /// Print the SHA256 of the condensed output to stderr
        #[arg(long)]
        checksum: bool,
    },

    /// Condense every *.json document under a directory
    Dir {
        input: PathBuf,
        /// Output directory (mirrors input layout)
        #[arg(short, long)]
        out: PathBuf,
    },

    /// Inspect or create configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Write the default configuration as TOML
    Init {
        #[arg(default_value = "condense.toml")]
        path: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = CondenseConfig::load_from(cli.config.as_deref())?;
    if cli.truncate_cycles {
        config.condense.on_cycle = CyclePolicy::Truncate;
    }
    if let Some(depth) = cli.max_depth {
        config.condense.max_depth = Some(depth);
    }
    if cli.compact {
        config.output.format = OutputFormat::Compact;
    }

    match cli.command {
        Commands::File { path, checksum } => {
            let document = if path == Path::new("-") {
                load_reader(std::io::stdin().lock(), &path)?
            } else {
                load_document(&path)?
            };

            let condensed = Condenser::new(config.condense).condense(&document.content)?;
            println!("{}", config.output.format.render(&condensed)?);

            if checksum {
                eprintln!("{}", Checksum::from_condensed(&condensed));
            }
            Ok(())
        }

        Commands::Dir { input, out } => {
            let manifest = condense_directory(&input, &out, &config)?;
            eprintln!("✅ Condensed {} schema(s) into {}", manifest.total, out.display());
            Ok(())
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
            ConfigAction::Init { path } => {
                if Path::new(&path).exists() {
                    anyhow::bail!("{} already exists", path);
                }
                CondenseConfig::default().save(&path)?;
                eprintln!("✅ Wrote default configuration to {}", path);
                Ok(())
            }
        },
    }
}
