//! # Sandbox Administration Subcommands
//!
//! `init`, `faucet`, and `advance`: set up a sandbox, fund accounts, and
//! move the simulated clock for deadline scenarios.

use std::path::Path;

use clap::Args;

use hearth_core::{Address, TokenAmount};

use crate::sandbox::Sandbox;

/// Arguments for the init subcommand.
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Escrow manager address to deploy on the simulated chain.
    #[arg(long)]
    pub manager: Option<Address>,
}

pub fn init(state: &Path, args: InitArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::create(state, args.manager)?;
    println!(
        "sandbox created at {} (manager {})",
        state.display(),
        sandbox.ledger.manager()?
    );
    Ok(())
}

/// Arguments for the faucet subcommand.
#[derive(Args, Debug)]
pub struct FaucetArgs {
    /// Account to mint settlement tokens to.
    #[arg(long)]
    pub account: Address,
    /// Token amount, e.g. "500" or "0.25".
    #[arg(long)]
    pub amount: TokenAmount,
}

pub fn faucet(state: &Path, args: FaucetArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    sandbox.ledger.faucet(&args.account, args.amount)?;
    sandbox.save()?;
    println!("minted {} to {}", args.amount, args.account.truncated());
    Ok(())
}

/// Arguments for the advance subcommand.
#[derive(Args, Debug)]
pub struct AdvanceArgs {
    /// Seconds to move the chain clock forward.
    #[arg(long)]
    pub secs: u64,
}

pub fn advance(state: &Path, args: AdvanceArgs) -> anyhow::Result<()> {
    let sandbox = Sandbox::open(state)?;
    sandbox.ledger.advance_clock(args.secs)?;
    sandbox.save()?;
    println!("chain clock advanced by {}s", args.secs);
    Ok(())
}
