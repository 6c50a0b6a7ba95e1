//! SeedSleuth CLI
//!
//! Recover BIP39 mnemonics with missing words from a known address.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use seedsleuth_core::{
    all_networks, format_duration, format_space, get_network, AddressPipeline, AddressScheme, Bip32Deriver,
    DerivationPath, RecoverySearch, SearchConfig, SearchResult, Wallet, WordPattern, Wordlist,
};

#[derive(Parser)]
#[command(name = "seedsleuth")]
#[command(author = "SeedSleuth Team")]
#[command(version = "0.1.0")]
#[command(about = "Recover BIP39 mnemonics with missing words", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Network, scheme override and derivation options shared by commands
#[derive(clap::Args)]
struct PipelineArgs {
    /// Network preset (BTC, BTC-SEGWIT, LTC, DOGE, ETH, ATOM)
    #[arg(short, long, default_value = "BTC")]
    network: String,

    /// Address scheme override
    #[arg(short, long)]
    scheme: Option<SchemeArg>,

    /// Bech32 human-readable part (p2wpkh/bech32 schemes only)
    #[arg(long)]
    hrp: Option<String>,

    /// Base58Check version byte, decimal or 0x-hex (p2pkh scheme only)
    #[arg(long, value_parser = parse_version_byte)]
    address_version: Option<u8>,

    /// Derivation path (defaults to the network's)
    #[arg(long)]
    path: Option<String>,

    /// BIP39 passphrase
    #[arg(long, default_value = "")]
    passphrase: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Brute-force the missing words of a mnemonic
    Recover {
        /// Mnemonic with placeholders, e.g. "word1 _ word3 ..."
        #[arg(short = 'P', long)]
        pattern: String,

        /// Address the recovered mnemonic must derive
        #[arg(short, long)]
        target: String,

        /// Candidate words, one per line (defaults to the English BIP39 list)
        #[arg(short, long)]
        wordlist: Option<PathBuf>,

        /// Placeholder token
        #[arg(long, default_value = "_")]
        marker: String,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Number of threads (0 = auto)
        #[arg(long, default_value = "0")]
        threads: usize,

        /// Maximum candidates (0 = unlimited)
        #[arg(long, default_value = "0")]
        max_candidates: u64,

        /// Skip candidates with an invalid BIP39 checksum
        #[arg(long)]
        checksum: bool,

        /// Show a progress line
        #[arg(long)]
        progress: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Derive the address of a complete mnemonic
    Derive {
        /// Full mnemonic
        #[arg(short, long)]
        mnemonic: String,

        #[command(flatten)]
        pipeline: PipelineArgs,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List network presets
    Networks,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    P2pkh,
    P2wpkh,
    Bech32,
    Evm,
}

impl SchemeArg {
    fn name(self) -> &'static str {
        match self {
            SchemeArg::P2pkh => "p2pkh",
            SchemeArg::P2wpkh => "p2wpkh",
            SchemeArg::Bech32 => "bech32",
            SchemeArg::Evm => "evm",
        }
    }
}

#[derive(Serialize)]
struct DeriveOutput<'a> {
    network: &'a str,
    scheme: String,
    path: String,
    address: String,
}

#[derive(Serialize)]
struct RecoverOutput<'a> {
    network: &'a str,
    path: String,
    search_space: String,
    #[serde(flatten)]
    result: &'a SearchResult,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Recover {
            pattern,
            target,
            wordlist,
            marker,
            pipeline,
            threads,
            max_candidates,
            checksum,
            progress,
            json,
        } => {
            let config = SearchConfig {
                threads,
                max_candidates,
                require_valid_checksum: checksum,
                progress,
            };
            cmd_recover(&pattern, &target, wordlist.as_deref(), &marker, &pipeline, config, json)?;
        }
        Commands::Derive {
            mnemonic,
            pipeline,
            json,
        } => {
            cmd_derive(&mnemonic, &pipeline, json)?;
        }
        Commands::Networks => {
            cmd_networks();
        }
    }

    Ok(())
}

fn build_pipeline(args: &PipelineArgs) -> Result<(AddressPipeline, DerivationPath)> {
    let network = get_network(&args.network)
        .ok_or_else(|| anyhow::anyhow!("Unknown network: {}", args.network))?;

    // --hrp / --address-version apply to the chosen scheme or the network's own
    let scheme = match args.scheme {
        Some(s) => AddressScheme::from_name(s.name(), None, None)?,
        None => network.scheme().clone(),
    };
    let scheme = scheme.with_overrides(args.hrp.as_deref(), args.address_version)?;

    let path: DerivationPath = args.path.as_deref().unwrap_or(network.default_path()).parse()?;
    let pipeline = AddressPipeline::new(scheme, Bip32Deriver::new(path.clone()), args.passphrase.as_str());
    Ok((pipeline, path))
}

fn cmd_recover(
    pattern: &str,
    target: &str,
    wordlist_path: Option<&Path>,
    marker: &str,
    args: &PipelineArgs,
    config: SearchConfig,
    json_output: bool,
) -> Result<()> {
    let (pipeline, path) = build_pipeline(args)?;
    let wordlist = match wordlist_path {
        Some(path) => Wordlist::from_file(path)?,
        None => Wordlist::english(),
    };
    let pattern = WordPattern::parse(pattern, marker)?;

    let threads = if config.threads == 0 { num_cpus::get() } else { config.threads };
    let network = args.network.to_uppercase();

    if !json_output {
        eprintln!("SeedSleuth v0.1.0");
        eprintln!("Network: {}", network);
        eprintln!("Scheme:  {}", pipeline.scheme());
        eprintln!("Deriver: {}", pipeline.deriver().describe());
        eprintln!("Pattern: {} ({} unknown)", pattern, pattern.placeholder_count());
        eprintln!("Words:   {} candidates per position", wordlist.len());
        eprintln!("Threads: {}", threads);
    }

    let search = RecoverySearch::new(pipeline, pattern, wordlist, target, config)?;
    let space = search.search_space();

    if !json_output {
        eprintln!("Search space: {}", format_space(space));
        eprintln!();
    }

    let result = search.run()?;

    if json_output {
        let output = RecoverOutput {
            network: &network,
            path: path.to_string(),
            search_space: space.to_string(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_result(&result, search.pipeline().scheme());
    }

    Ok(())
}

fn cmd_derive(mnemonic: &str, args: &PipelineArgs, json_output: bool) -> Result<()> {
    let (pipeline, path) = build_pipeline(args)?;
    let mnemonic = mnemonic.split_whitespace().collect::<Vec<_>>().join(" ");

    let address = pipeline
        .derive_address(&mnemonic)
        .ok_or_else(|| anyhow::anyhow!("No valid key at {} for this mnemonic", path))?;
    let address = pipeline.scheme().display_address(&address);

    if json_output {
        let output = DeriveOutput {
            network: &args.network,
            scheme: pipeline.scheme().to_string(),
            path: path.to_string(),
            address,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("Scheme:  {}", pipeline.scheme());
        println!("Path:    {}", path);
        println!("Address: {}", address);
    }

    Ok(())
}

fn cmd_networks() {
    println!("Supported Networks:");
    println!("{:-<80}", "");
    println!("{:<12} {:<16} {:<20} {}", "Ticker", "Name", "Default Path", "Scheme");
    println!("{:-<80}", "");

    for network in all_networks() {
        println!(
            "{:<12} {:<16} {:<20} {}",
            network.ticker(),
            network.name(),
            network.default_path(),
            network.scheme()
        );
    }
}

fn print_result(result: &SearchResult, scheme: &AddressScheme) {
    println!();
    match &result.wallet {
        Wallet::Found { mnemonic, address } => {
            println!("MNEMONIC RECOVERED");
            println!("{:-<60}", "");
            println!("Mnemonic: {}", mnemonic);
            println!("Address:  {}", scheme.display_address(address));
        }
        Wallet::NotFound if result.cancelled => {
            println!("Stopped before the search space was exhausted; no match so far.");
        }
        Wallet::NotFound => {
            println!("No completion of the pattern derives the target address.");
        }
    }
    println!("{:-<60}", "");
    println!("Tested:   {}", result.candidates_tested);
    println!("Time:     {}", format_duration(result.time_secs));
    println!("Speed:    {:.1} cand/s", result.candidates_per_second);
}

fn parse_version_byte(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    parsed.map_err(|e| format!("invalid version byte {s:?}: {e}"))
}
