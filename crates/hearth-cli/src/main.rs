//! # hearth CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use std::path::PathBuf;

use clap::Parser;

use hearth_cli::{actions, admin, query, sandbox};

/// Hearth sandbox — escrowed rentals on a simulated settlement chain.
///
/// Opens, releases, disputes, and arbitrates escrows against a local
/// chain-and-mirror state file.
#[derive(Parser, Debug)]
#[command(name = "hearth", version, about)]
struct Cli {
    /// Sandbox state file.
    #[arg(long, global = true, default_value = sandbox::DEFAULT_STATE_FILE)]
    state: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Create a fresh sandbox state file.
    Init(admin::InitArgs),
    /// Mint settlement tokens to an account.
    Faucet(admin::FaucetArgs),
    /// Move the simulated chain clock forward.
    Advance(admin::AdvanceArgs),
    /// Open an escrow against a listing.
    Open(actions::OpenArgs),
    /// Release escrowed funds to the seller (buyer only).
    Release(actions::ReleaseArgs),
    /// Raise a dispute (buyer only).
    Dispute(actions::DisputeArgs),
    /// Claim funds after the timeout (seller only).
    AutoRelease(actions::AutoReleaseArgs),
    /// Resolve a dispute fully to one side (arbiter only).
    Arbitrate(actions::ArbitrateArgs),
    /// List an account's escrows with the actions offered to it.
    List(query::ListArgs),
    /// Show one mirrored escrow as JSON.
    Show(query::ShowArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init(args) => admin::init(&cli.state, args),
        Commands::Faucet(args) => admin::faucet(&cli.state, args),
        Commands::Advance(args) => admin::advance(&cli.state, args),
        Commands::Open(args) => actions::open(&cli.state, args).await,
        Commands::Release(args) => actions::release(&cli.state, args).await,
        Commands::Dispute(args) => actions::dispute(&cli.state, args).await,
        Commands::AutoRelease(args) => actions::auto_release(&cli.state, args).await,
        Commands::Arbitrate(args) => actions::arbitrate(&cli.state, args).await,
        Commands::List(args) => query::list(&cli.state, args).await,
        Commands::Show(args) => query::show(&cli.state, args).await,
    }
}
