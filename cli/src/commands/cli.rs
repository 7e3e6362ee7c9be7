use clap::{Parser, Subcommand};
use uuid::Uuid;

use taskchain_core::task::TaskStatus;

#[derive(Parser, Debug)]
#[command(name = "taskchain", about = "Linked task list over a remote relational backend")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Owner identity (UUID). Overrides config and TASKCHAIN_OWNER.
    #[arg(long, global = true)]
    pub owner: Option<Uuid>,

    /// Run against an ephemeral in-memory store instead of the remote
    /// backend. Useful for smoke-testing; nothing survives the process.
    #[arg(long, global = true)]
    pub local: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch the owner's tasks and print them in chain order.
    List,

    /// Add a task at the tail (default) or the head of the list.
    Add {
        title: String,

        /// Insert at the head instead of the tail.
        #[arg(long)]
        front: bool,
    },

    /// Remove a task by id, relinking its neighbors.
    Rm { id: i64 },

    /// Set a task's status: pending, in-progress, or done.
    Status {
        id: i64,
        #[arg(value_parser = clap::value_parser!(TaskStatus))]
        status: TaskStatus,
    },

    /// Write a configuration template to ~/.taskchain/config.toml.
    Init,
}
