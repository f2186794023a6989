use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use hotelchain_tools::config::{parse_flag, Config};
use hotelchain_tools::deploy::{self, build_invocation, default_wasm_path, init_invocation};
use hotelchain_tools::{quote_commission, ContractKind};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "hotelchain")]
#[command(about = "Build, deploy and operate the hotel booking contracts")]
struct Cli {
    /// Network to target (testnet/mainnet/sandbox), overrides SOROBAN_NETWORK
    #[arg(short, long, global = true)]
    network: Option<String>,

    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved configuration
    Config {
        /// Only check that the configuration is valid
        #[arg(long)]
        validate: bool,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Build contracts to WASM
    Build {
        /// Cargo profile (release/release-with-logs)
        #[arg(short, long, default_value = "release")]
        profile: String,
        /// Only build this contract
        #[arg(short, long, value_enum)]
        contract: Option<ContractKind>,
        #[arg(long)]
        dry_run: bool,
    },
    /// Deploy a contract
    Deploy {
        #[arg(short, long, value_enum)]
        contract: ContractKind,
        /// WASM file; defaults to the build output for --profile
        #[arg(short, long)]
        wasm: Option<PathBuf>,
        #[arg(short, long, default_value = "release")]
        profile: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Set the admin of a deployed contract
    Init {
        #[arg(short, long, value_enum)]
        contract: ContractKind,
        /// Admin address (G...)
        #[arg(short, long)]
        admin: String,
        #[arg(long)]
        dry_run: bool,
    },
    /// Preview the commission owed on a booking
    Commission {
        /// Booking value
        #[arg(long)]
        value: i128,
        /// Commission rate in percent
        #[arg(long)]
        rate: u32,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _ = dotenvy::dotenv();

    let debug_env = std::env::var("SOROBAN_DEBUG").map(|v| parse_flag(&v)).unwrap_or(false);
    init_tracing(cli.verbose || debug_env);

    let network = cli.network.as_deref();

    match cli.command {
        Commands::Config { validate, json } => {
            let config = Config::load(network).context("invalid configuration")?;
            if validate {
                println!("Configuration for {} is valid", config.network);
            } else if json {
                println!("{}", config.to_json()?);
            } else {
                config.print_summary();
            }
        }
        Commands::Build {
            profile,
            contract,
            dry_run,
        } => {
            let invocation = build_invocation(contract, &profile);
            if dry_run {
                println!("{}", invocation);
            } else {
                tracing::info!(%profile, "building contracts");
                invocation.run(Duration::from_secs(600)).await?;
                tracing::info!("build finished");
            }
        }
        Commands::Deploy {
            contract,
            wasm,
            profile,
            dry_run,
        } => {
            let config = Config::load(network)?;
            let wasm = wasm.unwrap_or_else(|| default_wasm_path(contract, &profile));
            if let Some(contract_id) = deploy::deploy(&config, contract, &wasm, dry_run).await? {
                println!("{}", contract_id);
            }
        }
        Commands::Init {
            contract,
            admin,
            dry_run,
        } => {
            let config = Config::load(network)?;
            let invocation = init_invocation(&config, contract, &admin)?;
            if dry_run {
                println!("{}", invocation);
            } else {
                tracing::info!(%contract, %admin, "initializing");
                invocation
                    .run(Duration::from_millis(config.rpc_timeout_ms))
                    .await
                    .with_context(|| format!("init failed for {}", contract))?;
                tracing::info!(%contract, "initialized");
            }
        }
        Commands::Commission { value, rate } => {
            let amount = quote_commission(value, rate)?;
            println!("{}% of {} = {}", rate, value, amount);
        }
    }

    Ok(())
}
