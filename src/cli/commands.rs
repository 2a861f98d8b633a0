use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "addrnotes")]
#[command(version, about = "Address-keyed notes over HTTP")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Log filter, e.g. "info" or "addrnotes=debug" (RUST_LOG overrides)
    #[arg(long, global = true, env = "ADDRNOTES_LOG")]
    pub log_level: Option<String>,

    /// SQLite database file (default: .addrnotes/notes.db in the project root)
    #[arg(long, global = true, env = "ADDRNOTES_DB")]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new addrnotes project in the current directory
    Init,

    /// Run the HTTP server
    Serve(ServeArgs),

    /// Create a note, or merge fields into an existing one
    Set(SetArgs),

    /// Show a single note
    Get {
        /// Note address
        addr: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Delete a note (succeeds even if it does not exist)
    Delete {
        /// Note address
        addr: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all notes, ascending by value
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "ADDRNOTES_BIND", default_value = crate::config::DEFAULT_BIND)]
    pub bind: SocketAddr,

    /// Keep notes in memory instead of SQLite
    #[arg(long, env = "ADDRNOTES_MEMORY")]
    pub memory: bool,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    /// Note address
    pub addr: String,

    /// Cost, a non-negative integer (requires --cost-unit)
    #[arg(long, allow_hyphen_values = true)]
    pub cost: Option<String>,

    /// Unit of the cost
    #[arg(long)]
    pub cost_unit: Option<String>,

    /// Value, a non-negative integer (requires --value-unit)
    #[arg(long, allow_hyphen_values = true)]
    pub value: Option<String>,

    /// Unit of the value
    #[arg(long)]
    pub value_unit: Option<String>,

    /// Free-form status
    #[arg(long)]
    pub status: Option<String>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}
