use clap::{ArgAction, Parser, Subcommand};

use crate::domain::APM_TLD;
use crate::error::Result;

mod hash;
mod networks;
mod new_apm;

#[derive(Parser, Debug)]
#[command(name = "apm-deploy")]
#[command(about = "Deploy Aragon Package Manager registries under an ENS subdomain")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Network from config (default: localhost)")]
    pub network: Option<String>,

    #[arg(long, global = true, help = "JSON-RPC endpoint, overrides the network's")]
    pub rpc_url: Option<String>,

    #[arg(long, global = true, help = "Output as JSON")]
    pub json: bool,

    #[arg(short, long, global = true, action = ArgAction::Count, help = "More logging (-v, -vv)")]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Create a new APM registry, e.g. 1hive.aragonpm.eth")]
    NewApm {
        #[arg(long, help = "Label of the new APM (e.g., '1hive')")]
        name: String,

        #[arg(long, help = "Address of the existing APM registry")]
        apm: String,

        #[arg(long, help = "Address of the APMRegistryFactory")]
        factory: String,

        #[arg(long, default_value = APM_TLD, help = "Parent domain of the new APM")]
        tld: String,

        #[arg(long, help = "Resolve contracts and hashes without sending transactions")]
        dry_run: bool,
    },

    #[command(about = "Print the ENS namehash and label hash of a name")]
    Hash {
        #[arg(help = "ENS name (e.g., 'aragonpm.eth')")]
        name: String,
    },

    #[command(about = "List configured networks")]
    Networks,
}

/// Runs a command and returns the process exit code.
pub async fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::NewApm {
            name,
            apm,
            factory,
            tld,
            dry_run,
        } => {
            let args = new_apm::Args {
                name,
                apm,
                factory,
                tld,
                dry_run,
            };
            new_apm::run(
                args,
                cli.network.as_deref(),
                cli.rpc_url.as_deref(),
                cli.json,
            )
            .await
        }
        Commands::Hash { name } => hash::run(&name, cli.json),
        Commands::Networks => networks::run(cli.json),
    }
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
