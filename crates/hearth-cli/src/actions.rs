//! # Escrow Action Subcommands
//!
//! One subcommand per lifecycle action, each acting as a given account.
//! Handlers load the sandbox, run the coordinator, and save only on
//! success, so a rejected action leaves the state file untouched.

use std::path::Path;

use clap::Args;

use hearth_core::{Address, EscrowId, ListingId, TokenAmount};
use hearth_escrow::OpenEscrowRequest;

use crate::sandbox::Sandbox;

/// Arguments for the open subcommand.
#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Acting account (becomes the buyer).
    #[arg(long = "as", value_name = "ADDRESS")]
    pub account: Address,
    /// The landlord receiving funds on release.
    #[arg(long)]
    pub seller: Address,
    /// The adjudicating arbiter.
    #[arg(long)]
    pub arbiter: Address,
    /// Display label for the arbiter.
    #[arg(long, default_value = "Arbiter")]
    pub arbiter_name: String,
    /// Token amount to escrow, e.g. "500".
    #[arg(long)]
    pub amount: TokenAmount,
    /// Seconds until the seller may auto-release (default 30 days).
    #[arg(long, default_value_t = 2_592_000)]
    pub timeout_secs: u64,
    /// The listing being rented.
    #[arg(long)]
    pub listing: u64,
    /// Listing title mirrored for display.
    #[arg(long, default_value = "")]
    pub listing_title: String,
    /// Rental terms the arbiter adjudicates against.
    #[arg(long, default_value = "")]
    pub terms: String,
}

pub async fn open(state: &Path, args: OpenArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    let mut coordinator = sandbox.coordinator(args.account)?;
    let id = coordinator
        .open(OpenEscrowRequest {
            seller: args.seller,
            arbiter: args.arbiter,
            arbiter_name: args.arbiter_name,
            amount: args.amount,
            timeout_secs: args.timeout_secs,
            terms: args.terms,
            listing_id: ListingId(args.listing),
            listing_title: args.listing_title,
        })
        .await?;
    sandbox.save()?;
    println!("opened {id} ({} escrowed)", args.amount);
    Ok(())
}

/// Arguments for the release subcommand.
#[derive(Args, Debug)]
pub struct ReleaseArgs {
    /// Acting account (must be the buyer).
    #[arg(long = "as", value_name = "ADDRESS")]
    pub account: Address,
    /// Escrow to release.
    #[arg(long)]
    pub id: u64,
    /// Listing the escrow rents.
    #[arg(long)]
    pub listing: u64,
}

pub async fn release(state: &Path, args: ReleaseArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    let mut coordinator = sandbox.coordinator(args.account)?;
    coordinator
        .release(EscrowId(args.id), ListingId(args.listing))
        .await?;
    sandbox.save()?;
    println!("escrow:{} released to the seller", args.id);
    Ok(())
}

/// Arguments for the dispute subcommand.
#[derive(Args, Debug)]
pub struct DisputeArgs {
    /// Acting account (must be the buyer).
    #[arg(long = "as", value_name = "ADDRESS")]
    pub account: Address,
    /// Escrow to dispute.
    #[arg(long)]
    pub id: u64,
    /// Why the buyer is disputing.
    #[arg(long)]
    pub reason: String,
    /// Listing the escrow rents.
    #[arg(long)]
    pub listing: u64,
}

pub async fn dispute(state: &Path, args: DisputeArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    let mut coordinator = sandbox.coordinator(args.account)?;
    coordinator
        .dispute(EscrowId(args.id), args.reason, ListingId(args.listing))
        .await?;
    sandbox.save()?;
    println!("escrow:{} disputed; awaiting arbitration", args.id);
    Ok(())
}

/// Arguments for the auto-release subcommand.
#[derive(Args, Debug)]
pub struct AutoReleaseArgs {
    /// Acting account (must be the seller).
    #[arg(long = "as", value_name = "ADDRESS")]
    pub account: Address,
    /// Escrow to claim.
    #[arg(long)]
    pub id: u64,
    /// Listing the escrow rents.
    #[arg(long)]
    pub listing: u64,
}

pub async fn auto_release(state: &Path, args: AutoReleaseArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    let mut coordinator = sandbox.coordinator(args.account)?;
    coordinator
        .auto_release(EscrowId(args.id), ListingId(args.listing))
        .await?;
    sandbox.save()?;
    println!("escrow:{} auto-released to the seller", args.id);
    Ok(())
}

/// Arguments for the arbitrate subcommand.
#[derive(Args, Debug)]
pub struct ArbitrateArgs {
    /// Acting account (must be the arbiter).
    #[arg(long = "as", value_name = "ADDRESS")]
    pub account: Address,
    /// Escrow to resolve.
    #[arg(long)]
    pub id: u64,
    /// Release the full amount to the seller.
    #[arg(long, conflicts_with = "to_buyer")]
    pub to_seller: bool,
    /// Refund the full amount to the buyer.
    #[arg(long)]
    pub to_buyer: bool,
    /// Listing the escrow rents.
    #[arg(long)]
    pub listing: u64,
}

pub async fn arbitrate(state: &Path, args: ArbitrateArgs) -> anyhow::Result<()> {
    if args.to_seller == args.to_buyer {
        anyhow::bail!("pass exactly one of --to-seller or --to-buyer");
    }
    let sandbox = Sandbox::open(state)?;
    let mut coordinator = sandbox.coordinator(args.account)?;
    coordinator
        .arbitrate(EscrowId(args.id), args.to_seller, ListingId(args.listing))
        .await?;
    sandbox.save()?;
    let outcome = if args.to_seller {
        "released to the seller"
    } else {
        "refunded to the buyer"
    };
    println!("escrow:{} {outcome}", args.id);
    Ok(())
}
