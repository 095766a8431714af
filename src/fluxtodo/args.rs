use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fluxtodo")]
#[command(about = "A todo list driven by a single action dispatcher", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the todo store and config
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add a todo
    #[command(alias = "a")]
    Add {
        /// Text of the todo (words are joined with spaces)
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
    },

    /// Toggle one or more todos between done and pending
    #[command(alias = "t")]
    Toggle {
        /// Indexes of the todos (e.g. 1 3 5)
        #[arg(required = true, num_args = 1..)]
        indexes: Vec<String>,
    },

    /// Remove all completed todos
    Clear,

    /// List todos
    #[command(alias = "ls")]
    List {
        /// Only show pending todos
        #[arg(long, conflicts_with = "done")]
        pending: bool,

        /// Only show completed todos
        #[arg(long)]
        done: bool,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., slot-name)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },

    /// Initialize the data directory
    Init,
}
