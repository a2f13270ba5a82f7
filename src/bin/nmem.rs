//! CLI entry point for the `nmem` command-line tool.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use neuron_memory::cli::{commands, CliContext};
use neuron_memory::config::NeuronConfig;
use neuron_memory::types::{MemoryTag, NeuronError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(
    name = "nmem",
    about = "nmem — hierarchical, tag-addressable memory for AI assistants"
)]
struct Cli {
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(long)]
    verbose: bool,

    /// Path to a TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Brain file to use instead of the configured one
    #[arg(long, short = 'f')]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new brain file with the default layout
    Init {
        /// Write the payload uncompressed
        #[arg(long)]
        no_compress: bool,
    },
    /// Display information about a brain file
    Info,
    /// Print the whole tree
    Tree,
    /// List every node id with its position
    Ids,
    /// Get a specific node by id
    Get {
        /// Node id
        id: String,
    },
    /// Create the memory node for a tag
    Remember {
        /// Tag: family, friends, work, health, education, entertainment, other
        tag: String,
        /// JSON content
        data: String,
    },
    /// Replace the content of an existing tag memory
    Update {
        /// Tag name
        tag: String,
        /// JSON content
        data: String,
    },
    /// Print the decoded content of a tag memory
    Recall {
        /// Tag name
        tag: String,
    },
    /// Append a chat entry
    Chat {
        /// JSON content
        data: String,
    },
    /// Remove a node and its whole subtree
    Remove {
        /// Node id
        id: String,
    },
    /// Add any nodes the current layout requires
    Migrate,
    /// Export the tree as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
    /// Replace the brain with a tree read from JSON
    Import {
        /// Path to the JSON file
        json_file: PathBuf,
    },
}

fn parse_tag(name: &str) -> MemoryTag {
    match MemoryTag::from_name(name) {
        Some(tag) => tag,
        None => {
            eprintln!("Invalid memory tag: {}", name);
            process::exit(3);
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Debug)
            .init();
    } else {
        env_logger::init();
    }

    let config = match &cli.config {
        Some(path) => match NeuronConfig::load(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        },
        None => NeuronConfig::load_or_default(),
    };

    let mut ctx = CliContext {
        path: cli.file.unwrap_or(config.brain_path),
        compress: config.compress,
        migrate_on_load: config.migrate_on_load,
        pretty: config.pretty_export,
        json: cli.format == OutputFormat::Json,
    };

    let result = match cli.command {
        Commands::Init { no_compress } => {
            ctx.compress = ctx.compress && !no_compress;
            commands::cmd_init(&ctx)
        }
        Commands::Info => commands::cmd_info(&ctx),
        Commands::Tree => commands::cmd_tree(&ctx),
        Commands::Ids => commands::cmd_ids(&ctx),
        Commands::Get { id } => commands::cmd_get(&ctx, &id),
        Commands::Remember { tag, data } => commands::cmd_remember(&ctx, parse_tag(&tag), &data),
        Commands::Update { tag, data } => commands::cmd_update(&ctx, parse_tag(&tag), &data),
        Commands::Recall { tag } => commands::cmd_recall(&ctx, parse_tag(&tag)),
        Commands::Chat { data } => commands::cmd_chat(&ctx, &data),
        Commands::Remove { id } => commands::cmd_remove(&ctx, &id),
        Commands::Migrate => commands::cmd_migrate(&ctx),
        Commands::Export { output } => commands::cmd_export(&ctx, output.as_deref()),
        Commands::Import { json_file } => commands::cmd_import(&ctx, &json_file),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        let code = match &e {
            NeuronError::Io(_) | NeuronError::Config(_) => 1,
            NeuronError::InvalidMagic
            | NeuronError::UnsupportedVersion(_)
            | NeuronError::Truncated
            | NeuronError::Compression(_)
            | NeuronError::CorruptData(_) => 2,
            NeuronError::UnknownTag(_) => 3,
            NeuronError::NodeNotFound(_) | NeuronError::ParentNotFound(_) => 4,
            _ => 5,
        };
        process::exit(code);
    }
}
