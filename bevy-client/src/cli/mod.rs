use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use serde::Serialize;

use crate::App;
use crate::config::{ACTIVE_CHAIN, MANAGER_CONTRACT, USER_ADDRESS};
use crate::domain::{Address, Proof, U256};
use crate::error::Result;

mod init;
mod proposals;
mod shares;
mod version;

#[derive(Parser, Debug)]
#[command(name = "bevy")]
#[command(about = "Manage and contribute to bevy product manager contracts")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[arg(long, global = true, help = "Active chain (overrides active_chain)")]
    pub chain: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Manager contract name (overrides manager_contract)"
    )]
    pub manager: Option<String>,

    #[arg(long, global = true, help = "User address (overrides user_address)")]
    pub user: Option<String>,

    #[arg(long, global = true, help = "Config file to use instead of .bevy/bevy.toml")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Initialize this repo as a bevy managed project")]
    Init {
        #[arg(long, help = "Overwrite existing configuration")]
        force: bool,
    },

    #[command(about = "Fetch or deploy a manager contract on the active chain")]
    Deploy {
        #[arg(help = "Contract name (defaults to the configured manager contract)")]
        name: Option<String>,
    },

    #[command(about = "List iteration proposals")]
    Proposals,

    #[command(about = "Accept a proposal, paying its author shares")]
    Accept {
        #[arg(help = "Author address")]
        author: Address,

        #[arg(help = "Proof of the iteration (32-byte hex)")]
        proof: Proof,

        #[arg(help = "Shares to pay")]
        amount: U256,
    },

    #[command(about = "Claim authorship of an iteration and propose it")]
    Propose {
        #[arg(help = "Iteration content the proof is taken over")]
        iteration: String,

        #[arg(help = "Where the iteration can be fetched")]
        location: String,
    },

    #[command(name = "total-supply", about = "Show the total number of shares")]
    TotalSupply,

    #[command(name = "share-value", about = "Show the value of one share in wei")]
    ShareValue,

    #[command(about = "Show a share balance")]
    Balance {
        #[arg(help = "Address to check (defaults to the configured user)")]
        address: Option<Address>,
    },

    #[command(name = "total-value", about = "Show the ether held by the manager contract")]
    TotalValue,

    #[command(about = "Redeem shares for ether")]
    Redeem {
        #[arg(help = "Shares to redeem")]
        amount: U256,
    },

    #[command(about = "Print the client and contract version")]
    Version,
}

impl Cli {
    fn overrides(&self) -> Vec<(&'static str, String)> {
        [
            (ACTIVE_CHAIN, &self.chain),
            (MANAGER_CONTRACT, &self.manager),
            (USER_ADDRESS, &self.user),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.clone().map(|v| (key, v)))
        .collect()
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let root = std::env::current_dir()?;
    let app = App::bootstrap(&root, cli.config.as_deref(), cli.overrides())?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(dispatch(&app, cli.command, cli.json))
}

async fn dispatch(app: &App, command: Commands, json: bool) -> Result<()> {
    match command {
        Commands::Init { force } => init::run(app, force, json).await,
        Commands::Deploy { name } => init::deploy(app, name, json).await,
        Commands::Proposals => proposals::list(app, json).await,
        Commands::Accept {
            author,
            proof,
            amount,
        } => proposals::accept(app, author, proof, amount, json).await,
        Commands::Propose {
            iteration,
            location,
        } => proposals::propose(app, &iteration, &location, json).await,
        Commands::TotalSupply => shares::total_supply(app, json).await,
        Commands::ShareValue => shares::share_value(app, json).await,
        Commands::Balance { address } => shares::balance(app, address, json).await,
        Commands::TotalValue => shares::total_value(app, json).await,
        Commands::Redeem { amount } => shares::redeem(app, amount, json).await,
        Commands::Version => version::run(app, json),
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
