//! Presswork CLI - a local-first CRM for print shops.

use clap::Parser;
use presswork::cli::{
    BidCommands, Cli, ClientCommands, Commands, EventCommands, NoteCommands, OrderCommands,
    SystemCommands, TaskCommands,
};
use presswork::commands::{self, Report};
use presswork::store::backend::FileBackend;
use presswork::store::Store;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let human = cli.human_readable;
    let data_dir = resolve_data_dir(cli.data_dir);

    match run_command(cli.command, &data_dir) {
        Ok(report) => {
            if human {
                println!("{}", report.human);
            } else {
                println!("{}", report.value);
            }
        }
        Err(e) => {
            if human {
                eprintln!("Error: {}", e);
            } else {
                eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
            }
            process::exit(1);
        }
    }
}

/// Resolve the data directory: --data-dir flag (or PW_DATA_DIR env via
/// clap) first, then the platform data dir.
fn resolve_data_dir(explicit: Option<PathBuf>) -> PathBuf {
    match explicit {
        Some(path) => path,
        None => dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("presswork"),
    }
}

fn run_command(command: Commands, data_dir: &Path) -> Result<Report, presswork::Error> {
    // `system init` is the only command that runs before the data
    // directory exists.
    if let Commands::System {
        command: SystemCommands::Init,
    } = command
    {
        return commands::system_init(data_dir);
    }

    let backend = FileBackend::new(data_dir);
    if !backend.exists() {
        return Err(presswork::Error::NotInitialized);
    }
    let mut store = Store::open(Box::new(backend));

    match command {
        Commands::System { command } => match command {
            SystemCommands::Init => unreachable!("handled above"),
            SystemCommands::Status => commands::system_status(&store),
            SystemCommands::Statuses => commands::system_statuses(data_dir),
        },

        Commands::Client { command } => match command {
            ClientCommands::Add {
                name,
                email,
                phone,
                company,
                tags,
                portal,
            } => commands::client_add(&mut store, name, email, phone, company, tags, portal),
            ClientCommands::List => commands::client_list(&store),
            ClientCommands::Show { id } => commands::client_show(&store, &id),
            ClientCommands::Update { id, patch } => {
                commands::client_update(&mut store, &id, &patch)
            }
            ClientCommands::Delete { id } => commands::client_delete(&mut store, &id),
        },

        Commands::Order { command } => match command {
            OrderCommands::Add {
                order_number,
                client_id,
                status,
                due,
                start,
                tags,
                subtotal,
                tax,
                total,
            } => commands::order_add(
                &mut store,
                order_number,
                client_id,
                status,
                due,
                start,
                tags,
                subtotal,
                tax,
                total,
            ),
            OrderCommands::List { client, status } => {
                commands::order_list(&store, client.as_deref(), status.as_deref())
            }
            OrderCommands::Show { id } => commands::order_show(&store, &id),
            OrderCommands::Update { id, patch } => commands::order_update(&mut store, &id, &patch),
            OrderCommands::Delete { id } => commands::order_delete(&mut store, &id),
        },

        Commands::Task { command } => match command {
            TaskCommands::Add {
                title,
                description,
                order,
                client,
                priority,
                due,
                no_sync,
            } => commands::task_add(
                &mut store,
                title,
                description,
                order,
                client,
                priority,
                due,
                no_sync,
            ),
            TaskCommands::List {
                order,
                client,
                status,
            } => commands::task_list(&store, order.as_deref(), client.as_deref(), status),
            TaskCommands::Show { id } => commands::task_show(&store, &id),
            TaskCommands::Update { id, patch } => commands::task_update(&mut store, &id, &patch),
            TaskCommands::Delete { id } => commands::task_delete(&mut store, &id),
        },

        Commands::Bid { command } => match command {
            BidCommands::Add {
                bid_number,
                client_id,
                subtotal,
                tax,
                total,
                tags,
            } => commands::bid_add(&mut store, bid_number, client_id, subtotal, tax, total, tags),
            BidCommands::List { client, status } => {
                commands::bid_list(&store, client.as_deref(), status)
            }
            BidCommands::Show { id } => commands::bid_show(&store, &id),
            BidCommands::Update { id, patch } => commands::bid_update(&mut store, &id, &patch),
            BidCommands::Accept { id } => commands::bid_accept(&mut store, &id),
            BidCommands::Delete { id } => commands::bid_delete(&mut store, &id),
        },

        Commands::Event { command } => match command {
            EventCommands::Add {
                title,
                start,
                end,
                all_day,
                link_order,
                link_task,
            } => commands::event_add(&mut store, title, start, end, all_day, link_order, link_task),
            EventCommands::List { order, date } => {
                commands::event_list(&store, order.as_deref(), date)
            }
            EventCommands::Show { id } => commands::event_show(&store, &id),
            EventCommands::Update { id, patch } => commands::event_update(&mut store, &id, &patch),
            EventCommands::Delete { id } => commands::event_delete(&mut store, &id),
        },

        Commands::Note { command } => match command {
            NoteCommands::Add {
                title,
                content,
                category,
                tags,
                pin,
                order,
                client,
            } => commands::note_add(
                &mut store, title, content, category, tags, pin, order, client,
            ),
            NoteCommands::List => commands::note_list(&store),
            NoteCommands::Delete { id } => commands::note_delete(&mut store, &id),
        },

        Commands::Calendar { date } => commands::calendar(&store, date),

        Commands::Summary { client_id } => commands::summary(&store, &client_id),
    }
}
