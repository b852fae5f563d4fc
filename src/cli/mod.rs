//! CLI argument definitions for presswork.

use chrono::{DateTime, NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::models::{BidStatus, ProjectStatus, TaskPriority, TaskStatus};

/// Presswork - a local-first CRM for print shops.
///
/// Start with `pw system init`, then add clients, orders, tasks, bids,
/// and events. Status, date, and tag edits fan out to related entities.
#[derive(Parser, Debug)]
#[command(name = "pw")]
#[command(author, version, about = "A local-first CRM for print shops", long_about = None)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Data directory holding the collection records.
    /// Can also be set via PW_DATA_DIR; defaults to the platform data dir.
    #[arg(long = "data-dir", global = true, env = "PW_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Data directory management and reference data
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },

    /// Client management commands
    Client {
        #[command(subcommand)]
        command: ClientCommands,
    },

    /// Order management commands
    Order {
        #[command(subcommand)]
        command: OrderCommands,
    },

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Bid management commands
    Bid {
        #[command(subcommand)]
        command: BidCommands,
    },

    /// Calendar event commands
    Event {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Note commands (notes are edited directly, outside the sync rules)
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },

    /// Unified calendar feed: orders and tasks with due dates, plus events
    Calendar {
        /// Only events starting on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Aggregate view of one client
    Summary {
        /// Client id (e.g., pwc-a1b2)
        client_id: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum SystemCommands {
    /// Create the data directory and empty collection records
    Init,

    /// Show storage location, collection sizes, and build info
    Status,

    /// Print the configured business status catalog
    Statuses,
}

#[derive(Subcommand, Debug)]
pub enum ClientCommands {
    /// Add a client
    Add {
        /// Display name
        name: String,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        company: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        /// Generate a portal access code for this client
        #[arg(long)]
        portal: bool,
    },

    /// List all clients
    List,

    /// Show one client
    Show { id: String },

    /// Patch a client with a JSON object (e.g., '{"phone":"555-0100"}')
    Update {
        id: String,

        /// JSON patch; present fields replace, absent fields stay
        #[arg(long)]
        patch: String,
    },

    /// Delete a client (references from orders/tasks/bids are kept)
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum OrderCommands {
    /// Add an order for a client
    Add {
        /// Human-facing order number (e.g., ORD-0042)
        order_number: String,

        /// Owning client id
        client_id: String,

        /// Workflow status (pending, designing, production, ...)
        #[arg(long)]
        status: Option<ProjectStatus>,

        /// Due date (RFC 3339)
        #[arg(long)]
        due: Option<DateTime<Utc>>,

        /// Start date (RFC 3339)
        #[arg(long)]
        start: Option<DateTime<Utc>>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long, default_value_t = 0.0)]
        subtotal: f64,

        #[arg(long, default_value_t = 0.0)]
        tax: f64,

        #[arg(long, default_value_t = 0.0)]
        total: f64,
    },

    /// List orders, optionally filtered
    List {
        /// Only orders for this client
        #[arg(long)]
        client: Option<String>,

        /// Only orders with this status id
        #[arg(long)]
        status: Option<String>,
    },

    /// Show one order
    Show { id: String },

    /// Patch an order with a JSON object. Status, date, and tag changes
    /// cascade to linked tasks and events.
    Update {
        id: String,

        /// JSON patch; nested objects like pricing replace wholesale
        #[arg(long)]
        patch: String,
    },

    /// Delete an order. Its tasks survive with an archived marker.
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task
    Add {
        title: String,

        #[arg(long)]
        description: Option<String>,

        /// Parent order id
        #[arg(long)]
        order: Option<String>,

        /// Related client id
        #[arg(long)]
        client: Option<String>,

        /// Priority (low, medium, high)
        #[arg(long)]
        priority: Option<TaskPriority>,

        /// Due date (RFC 3339)
        #[arg(long)]
        due: Option<DateTime<Utc>>,

        /// Detach this task from its order's status/date/tag cascades
        #[arg(long = "no-sync")]
        no_sync: bool,
    },

    /// List tasks, optionally filtered
    List {
        #[arg(long)]
        order: Option<String>,

        #[arg(long)]
        client: Option<String>,

        /// Only tasks with this status
        #[arg(long)]
        status: Option<TaskStatus>,
    },

    /// Show one task
    Show { id: String },

    /// Patch a task with a JSON object; re-runs the order rollup
    Update {
        id: String,

        #[arg(long)]
        patch: String,
    },

    /// Delete a task
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum BidCommands {
    /// Add a bid for a client
    Add {
        /// Human-facing bid number (e.g., BID-0007)
        bid_number: String,

        /// Prospective client id
        client_id: String,

        #[arg(long, default_value_t = 0.0)]
        subtotal: f64,

        #[arg(long, default_value_t = 0.0)]
        tax: f64,

        #[arg(long, default_value_t = 0.0)]
        total: f64,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List bids, optionally filtered
    List {
        #[arg(long)]
        client: Option<String>,

        /// Only bids with this status
        #[arg(long)]
        status: Option<BidStatus>,
    },

    /// Show one bid
    Show { id: String },

    /// Patch a bid with a JSON object
    Update {
        id: String,

        #[arg(long)]
        patch: String,
    },

    /// Accept a bid: creates one order and one kickoff task
    Accept { id: String },

    /// Delete a bid
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum EventCommands {
    /// Add a calendar event
    Add {
        title: String,

        /// Start (RFC 3339)
        start: DateTime<Utc>,

        /// End (RFC 3339)
        #[arg(long)]
        end: Option<DateTime<Utc>>,

        #[arg(long = "all-day")]
        all_day: bool,

        /// Link to an order; start-date edits cascade into it
        #[arg(long = "link-order", conflicts_with = "link_task")]
        link_order: Option<String>,

        /// Link to a task; start-date edits cascade into it
        #[arg(long = "link-task")]
        link_task: Option<String>,
    },

    /// List events, optionally filtered
    List {
        /// Only events linked to this order
        #[arg(long)]
        order: Option<String>,

        /// Only events starting on this day (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Show one event
    Show { id: String },

    /// Patch an event with a JSON object; a new start date cascades into
    /// the linked order or task
    Update {
        id: String,

        #[arg(long)]
        patch: String,
    },

    /// Delete an event
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note
    Add {
        title: String,

        /// Markdown body
        content: String,

        #[arg(long)]
        category: Option<String>,

        /// Tag (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,

        #[arg(long)]
        pin: bool,

        /// Linked order id (weak reference)
        #[arg(long)]
        order: Option<String>,

        /// Linked client id (weak reference)
        #[arg(long)]
        client: Option<String>,
    },

    /// List all notes
    List,

    /// Delete a note
    Delete { id: String },
}
