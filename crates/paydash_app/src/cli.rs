use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::platform::config::DEFAULT_CONFIG_FILE;

#[derive(Parser, Debug)]
#[command(name = "paydash", version, about = "Payment dashboard client")]
pub struct Cli {
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE, help = "Path to the ron config file")]
    pub config: PathBuf,
    #[arg(long, global = true, help = "Override the backend base url")]
    pub base_url: Option<String>,
    #[arg(long, global = true, help = "Override the poll interval in milliseconds")]
    pub interval_ms: Option<u64>,
    #[arg(short, long, global = true, action = clap::ArgAction::Count, help = "Raise log verbosity")]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    Logout,
    Whoami,
    Dashboard {
        #[arg(long, default_value_t = false, help = "Print the first complete view and exit")]
        once: bool,
    },
    Transactions {
        #[arg(long, default_value_t = false)]
        once: bool,
    },
    Wallet {
        #[arg(long, default_value_t = false)]
        once: bool,
    },
}
