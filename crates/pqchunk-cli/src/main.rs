//! pqchunk CLI: read, rewrite and size chunked Parquet datasets.

use clap::{Parser, Subcommand};
use pqchunk_core::{ChunkConfig, FileOrder};
use pqchunk_io::{file_size, read_parquets, write_parquets, StdoutProgress};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "pqchunk")]
#[command(about = "Read and write Parquet datasets split across numbered chunk files", long_about = None)]
struct Cli {
    /// YAML config file (overridden by PQCHUNK_* variables and flags)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read every file matching PATH* and print the combined shape
    Read {
        /// Path prefix of the dataset (e.g. `out/` or `out/data_`)
        path: String,

        /// Read at most this many files
        #[arg(long)]
        limit: Option<usize>,

        /// Keep each file's own row labels instead of renumbering
        #[arg(long)]
        keep_index: bool,

        /// File order: natural, lexical or unsorted
        #[arg(long)]
        order: Option<FileOrder>,
    },

    /// Read the dataset at INPUT and rewrite it as chunks under OUTPUT
    Write {
        /// Path prefix of the source dataset
        input: String,

        /// Output path prefix; chunks are named `{OUTPUT}{prefix}_{n}.parquet`
        output: String,

        /// Number of chunk files to write
        #[arg(long)]
        chunks: Option<usize>,

        /// File name stem for chunk files
        #[arg(long)]
        prefix: Option<String>,

        /// Print the write report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the human-readable size of a file
    Size {
        file: PathBuf,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Commands::Read {
            path,
            limit,
            keep_index,
            order,
        } => {
            let mut config = config;
            if limit.is_some() {
                config.limit = limit;
            }
            if keep_index {
                config.reset_index = false;
            }
            if let Some(order) = order {
                config.order = order;
            }
            read_dataset(&path, &config)
        }
        Commands::Write {
            input,
            output,
            chunks,
            prefix,
            json,
        } => {
            let mut config = config;
            if let Some(chunks) = chunks {
                config.chunks = chunks;
            }
            if let Some(prefix) = prefix {
                config.prefix = prefix;
            }
            rewrite_dataset(&input, &output, &config, json)
        }
        Commands::Size { file } => file_size(&file)
            .map(|size| println!("{}", size))
            .map_err(Into::into),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pqchunk=info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<ChunkConfig, Box<dyn std::error::Error>> {
    let base = match path {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .map_err(|e| format!("cannot read config {}: {}", path.display(), e))?;
            ChunkConfig::from_yaml_str(&yaml)?
        }
        None => ChunkConfig::default(),
    };
    let config = base.apply_vars(std::env::vars())?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn read_dataset(path: &str, config: &ChunkConfig) -> Result<(), Box<dyn std::error::Error>> {
    let data = read_parquets(path, &config.read_options(), &mut StdoutProgress)?;

    println!();
    println!("Columns:");
    for field in data.schema().fields() {
        println!(
            "  {} {}{}",
            field.name(),
            field.data_type(),
            if field.is_nullable() { "" } else { " NOT NULL" }
        );
    }
    Ok(())
}

fn rewrite_dataset(
    input: &str,
    output: &str,
    config: &ChunkConfig,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    config.validate()?;
    let data = read_parquets(input, &config.read_options(), &mut StdoutProgress)?;
    println!();
    let report = write_parquets(&data, output, &config.write_options(), &mut StdoutProgress)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!();
        println!(
            "✓ Wrote {} rows to {} files",
            report.total_rows(),
            report.chunks.len()
        );
    }
    Ok(())
}
