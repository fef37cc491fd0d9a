//! Command line definition

use std::path::PathBuf;

use booking_client::ClientConfig;
use booking_client::config::{DEFAULT_BASE_URL, DEFAULT_SESSION_FILE};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "booking", version, about = "Restaurant reservation client")]
pub struct Cli {
    /// API root, e.g. http://localhost:8080/api/v1
    #[arg(long, global = true, env = "BOOKING_API_BASE", default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// File holding the logged-in session between runs
    #[arg(long, global = true, env = "BOOKING_SESSION_FILE", default_value = DEFAULT_SESSION_FILE)]
    pub session_file: PathBuf,

    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, global = true, env = "BOOKING_TIMEOUT_SECS")]
    pub timeout: Option<u64>,

    /// Log filter when RUST_LOG is not set (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Write logs to a daily rolling file in this directory
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(&self.api_base).with_session_file(&self.session_file);
        match self.timeout {
            Some(secs) => config.with_timeout(secs),
            None => config,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create an account (does not log in)
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and remember the session
    Login {
        #[arg(long)]
        email: String,
        /// Read from stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Restaurants
    #[command(subcommand)]
    Restaurants(RestaurantCommand),
    /// Tables of a restaurant
    #[command(subcommand)]
    Tables(TableCommand),
    /// Free tables for a time slot
    Availability {
        restaurant_id: String,
        #[command(flatten)]
        slot: SlotArgs,
    },
    /// Reservations
    #[command(subcommand)]
    Reservations(ReservationCommand),
    /// Check that the server is up
    Health,
}

#[derive(Debug, Subcommand)]
pub enum RestaurantCommand {
    List,
    Show {
        id: String,
    },
    /// Admin only
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        address: String,
        /// Opening time, e.g. 08:00
        #[arg(long)]
        open: String,
        /// Closing time, e.g. 22:00
        #[arg(long)]
        close: String,
    },
    /// Admin only
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum TableCommand {
    List {
        restaurant_id: String,
    },
    /// Admin only
    Create {
        restaurant_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        capacity: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReservationCommand {
    /// Book a table
    Create {
        restaurant_id: String,
        /// Let the server pick a table when omitted
        #[arg(long)]
        table: Option<String>,
        #[command(flatten)]
        slot: SlotArgs,
    },
    /// List my reservations
    Mine,
    Cancel {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Local date-times such as 2024-05-01T19:30
#[derive(Debug, Args)]
pub struct SlotArgs {
    #[arg(long)]
    pub start: String,
    #[arg(long)]
    pub end: String,
    #[arg(long)]
    pub guests: String,
}
