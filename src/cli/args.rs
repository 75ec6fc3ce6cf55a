use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "legacy-vault")]
#[command(about = "Register digital legacies and move them through inheritance")]
pub struct Cli {
    /// Address acting in this invocation
    #[arg(long, env = "LEGACY_VAULT_CALLER")]
    pub caller: Option<String>,

    /// Store snapshot file (overrides LEGACY_VAULT_DATA)
    #[arg(long)]
    pub data: Option<PathBuf>,

    /// Simulated condition-verification time in milliseconds
    #[arg(long)]
    pub verify_delay_ms: Option<u64>,

    /// Only accept the built-in asset categories
    #[arg(long)]
    pub strict_categories: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Register a new legacy owned by the caller
    Create {
        #[arg(long)]
        category: String,
        #[arg(long)]
        beneficiary: String,
        /// Sensitive information to protect
        #[arg(long)]
        secret: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        conditions: String,
    },
    /// List legacies, newest first
    List {
        /// Only legacies owned by the caller
        #[arg(long)]
        mine: bool,
    },
    Show {
        id: String,
    },
    /// Mark an active legacy as inherited
    Inherit {
        id: String,
    },
    /// Mark an active legacy as expired
    Expire {
        id: String,
    },
    Stats,
    /// Report index entries that cannot be listed
    Audit,
    Categories,
}
