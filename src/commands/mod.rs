//! Command implementations for the pw CLI.
//!
//! Each function performs one command against the store and returns a
//! `Report`: a JSON value (the default output) plus a human-readable
//! rendering selected with `-H`. The business rules all live in the
//! store; this layer only shapes input and output.

use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use std::path::Path;

use crate::config::{BusinessConfig, CATALOG_FILE};
use crate::models::patch::{BidPatch, ClientPatch, EventPatch, ProjectPatch, TaskPatch};
use crate::models::{
    Bid, BidStatus, Client, Event, EventLink, LinkKind, Note, Pricing, Project, ProjectStatus,
    Task, TaskPriority, TaskStatus,
};
use crate::store::backend::FileBackend;
use crate::store::{generate_id, Store, ID_PREFIX_NOTE};
use crate::{Error, Result};

/// Output of one command: JSON by default, human text with `-H`.
pub struct Report {
    pub value: serde_json::Value,
    pub human: String,
}

impl Report {
    fn new<T: Serialize>(value: &T, human: String) -> Result<Self> {
        Ok(Self {
            value: serde_json::to_value(value)?,
            human,
        })
    }
}

fn parse_patch<T: DeserializeOwned>(raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| Error::InvalidInput(format!("invalid patch: {}", e)))
}

fn not_found(kind: &str, id: &str) -> Result<Report> {
    Report::new(
        &json!({ "found": false, "id": id }),
        format!("No {} with id {}", kind, id),
    )
}

// === System ===

pub fn system_init(data_dir: &Path) -> Result<Report> {
    let backend = FileBackend::new(data_dir);
    let already = backend.exists();
    let mut store = Store::open(Box::new(backend));
    store.persist_all()?;
    Report::new(
        &json!({ "initialized": !already, "location": store.location() }),
        if already {
            format!("Already initialized at {}", store.location())
        } else {
            format!("Initialized presswork at {}", store.location())
        },
    )
}

pub fn system_status(store: &Store) -> Result<Report> {
    let value = json!({
        "location": store.location(),
        "version": env!("CARGO_PKG_VERSION"),
        "commit": env!("PW_GIT_COMMIT"),
        "built_at": env!("PW_BUILD_TIMESTAMP"),
        "collections": {
            "clients": store.clients().len(),
            "orders": store.projects().len(),
            "tasks": store.tasks().len(),
            "bids": store.bids().len(),
            "events": store.events().len(),
            "notes": store.notes().len(),
        },
    });
    let human = format!(
        "presswork {} ({}) at {}\n{} clients, {} orders, {} tasks, {} bids, {} events, {} notes",
        env!("CARGO_PKG_VERSION"),
        env!("PW_GIT_COMMIT"),
        store.location(),
        store.clients().len(),
        store.projects().len(),
        store.tasks().len(),
        store.bids().len(),
        store.events().len(),
        store.notes().len(),
    );
    Report::new(&value, human)
}

pub fn system_statuses(data_dir: &Path) -> Result<Report> {
    let config = BusinessConfig::load(&data_dir.join(CATALOG_FILE));
    let human = config
        .statuses
        .iter()
        .map(|s| format!("{}  {}", s.id, s.label))
        .collect::<Vec<_>>()
        .join("\n");
    Report::new(&config, human)
}

// === Clients ===

#[allow(clippy::too_many_arguments)]
pub fn client_add(
    store: &mut Store,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    company: Option<String>,
    tags: Vec<String>,
    portal: bool,
) -> Result<Report> {
    let mut client = Client::new(name);
    client.email = email;
    client.phone = phone;
    client.company = company;
    client.tags = tags;
    if portal {
        client.portal_access_code = Some(uuid::Uuid::new_v4().to_string());
    }
    let client = store.add_client(client)?;
    let human = format!("Added client {} ({})", client.name, client.id);
    Report::new(&client, human)
}

pub fn client_list(store: &Store) -> Result<Report> {
    let human = render_lines(store.clients().iter().map(|c| {
        format!(
            "{}  {}{}",
            c.id,
            c.name,
            c.company.as_deref().map(|co| format!(" ({})", co)).unwrap_or_default()
        )
    }));
    Report::new(&store.clients(), human)
}

pub fn client_show(store: &Store, id: &str) -> Result<Report> {
    match store.clients().iter().find(|c| c.id == id) {
        Some(client) => Report::new(client, format!("{}  {}", client.id, client.name)),
        None => Err(Error::NotFound(format!("Client not found: {}", id))),
    }
}

pub fn client_update(store: &mut Store, id: &str, patch: &str) -> Result<Report> {
    let patch: ClientPatch = parse_patch(patch)?;
    store.update_client(id, patch)?;
    match store.clients().iter().find(|c| c.id == id) {
        Some(client) => {
            let human = format!("Updated client {}", client.id);
            Report::new(&client.clone(), human)
        }
        None => not_found("client", id),
    }
}

pub fn client_delete(store: &mut Store, id: &str) -> Result<Report> {
    store.delete_client(id)?;
    Report::new(&json!({ "deleted": id }), format!("Deleted client {}", id))
}

// === Orders ===

#[allow(clippy::too_many_arguments)]
pub fn order_add(
    store: &mut Store,
    order_number: String,
    client_id: String,
    status: Option<ProjectStatus>,
    due: Option<DateTime<Utc>>,
    start: Option<DateTime<Utc>>,
    tags: Vec<String>,
    subtotal: f64,
    tax: f64,
    total: f64,
) -> Result<Report> {
    let mut project = Project::new(order_number, client_id);
    if let Some(status) = status {
        project.status = status;
    }
    project.due_date = due;
    project.start_date = start;
    project.tags = tags;
    project.pricing = Pricing {
        subtotal,
        tax,
        total,
        paid: 0.0,
        balance: total,
    };
    let project = store.add_project(project)?;
    let human = format!("Added order {} ({})", project.order_number, project.id);
    Report::new(&project, human)
}

pub fn order_list(
    store: &Store,
    client: Option<&str>,
    status: Option<&str>,
) -> Result<Report> {
    let orders: Vec<&Project> = store
        .projects()
        .iter()
        .filter(|p| client.is_none_or(|c| p.client_id == c))
        .filter(|p| status.is_none_or(|s| p.status.as_str() == s))
        .collect();
    let human = render_lines(orders.iter().map(|p| {
        format!("{}  {}  {}  {}", p.id, p.order_number, p.status, p.client_id)
    }));
    Report::new(&orders, human)
}

pub fn order_show(store: &Store, id: &str) -> Result<Report> {
    match store.projects().iter().find(|p| p.id == id) {
        Some(project) => Report::new(
            project,
            format!("{}  {}  {}", project.id, project.order_number, project.status),
        ),
        None => Err(Error::NotFound(format!("Order not found: {}", id))),
    }
}

pub fn order_update(store: &mut Store, id: &str, patch: &str) -> Result<Report> {
    let patch: ProjectPatch = parse_patch(patch)?;
    store.update_project(id, patch)?;
    match store.projects().iter().find(|p| p.id == id) {
        Some(project) => {
            let human = format!("Updated order {} ({})", project.id, project.status);
            Report::new(&project.clone(), human)
        }
        None => not_found("order", id),
    }
}

pub fn order_delete(store: &mut Store, id: &str) -> Result<Report> {
    store.delete_project(id)?;
    Report::new(&json!({ "deleted": id }), format!("Deleted order {}", id))
}

// === Tasks ===

#[allow(clippy::too_many_arguments)]
pub fn task_add(
    store: &mut Store,
    title: String,
    description: Option<String>,
    order: Option<String>,
    client: Option<String>,
    priority: Option<TaskPriority>,
    due: Option<DateTime<Utc>>,
    no_sync: bool,
) -> Result<Report> {
    let mut task = Task::new(title);
    task.description = description;
    task.project_id = order;
    task.client_id = client;
    if let Some(priority) = priority {
        task.priority = priority;
    }
    task.due_date = due;
    task.sync_with_project = !no_sync;
    let task = store.add_task(task)?;
    let human = format!("Added task {} ({})", task.title, task.id);
    Report::new(&task, human)
}

pub fn task_list(
    store: &Store,
    order: Option<&str>,
    client: Option<&str>,
    status: Option<TaskStatus>,
) -> Result<Report> {
    let tasks: Vec<&Task> = store
        .tasks()
        .iter()
        .filter(|t| order.is_none_or(|o| t.project_id.as_deref() == Some(o)))
        .filter(|t| client.is_none_or(|c| t.client_id.as_deref() == Some(c)))
        .filter(|t| status.is_none_or(|s| t.status == s))
        .collect();
    let human = render_lines(
        tasks
            .iter()
            .map(|t| format!("{}  [{}] {} ({})", t.id, t.status, t.title, t.priority)),
    );
    Report::new(&tasks, human)
}

pub fn task_show(store: &Store, id: &str) -> Result<Report> {
    match store.tasks().iter().find(|t| t.id == id) {
        Some(task) => Report::new(task, format!("{}  [{}] {}", task.id, task.status, task.title)),
        None => Err(Error::NotFound(format!("Task not found: {}", id))),
    }
}

pub fn task_update(store: &mut Store, id: &str, patch: &str) -> Result<Report> {
    let patch: TaskPatch = parse_patch(patch)?;
    store.update_task(id, patch)?;
    match store.tasks().iter().find(|t| t.id == id) {
        Some(task) => {
            let human = format!("Updated task {} ({})", task.id, task.status);
            Report::new(&task.clone(), human)
        }
        None => not_found("task", id),
    }
}

pub fn task_delete(store: &mut Store, id: &str) -> Result<Report> {
    store.delete_task(id)?;
    Report::new(&json!({ "deleted": id }), format!("Deleted task {}", id))
}

// === Bids ===

pub fn bid_add(
    store: &mut Store,
    bid_number: String,
    client_id: String,
    subtotal: f64,
    tax: f64,
    total: f64,
    tags: Vec<String>,
) -> Result<Report> {
    let mut bid = Bid::new(bid_number, client_id);
    bid.subtotal = subtotal;
    bid.tax = tax;
    bid.total = total;
    bid.tags = tags;
    let bid = store.add_bid(bid)?;
    let human = format!("Added bid {} ({})", bid.bid_number, bid.id);
    Report::new(&bid, human)
}

pub fn bid_list(
    store: &Store,
    client: Option<&str>,
    status: Option<BidStatus>,
) -> Result<Report> {
    let bids: Vec<&Bid> = store
        .bids()
        .iter()
        .filter(|b| client.is_none_or(|c| b.client_id == c))
        .filter(|b| status.is_none_or(|s| b.status == s))
        .collect();
    let human = render_lines(
        bids.iter()
            .map(|b| format!("{}  {}  {}  {:.2}", b.id, b.bid_number, b.status, b.total)),
    );
    Report::new(&bids, human)
}

pub fn bid_show(store: &Store, id: &str) -> Result<Report> {
    match store.bids().iter().find(|b| b.id == id) {
        Some(bid) => Report::new(bid, format!("{}  {}  {}", bid.id, bid.bid_number, bid.status)),
        None => Err(Error::NotFound(format!("Bid not found: {}", id))),
    }
}

pub fn bid_update(store: &mut Store, id: &str, patch: &str) -> Result<Report> {
    let patch: BidPatch = parse_patch(patch)?;
    store.update_bid(id, patch)?;
    match store.bids().iter().find(|b| b.id == id) {
        Some(bid) => {
            let human = format!("Updated bid {} ({})", bid.id, bid.status);
            Report::new(&bid.clone(), human)
        }
        None => not_found("bid", id),
    }
}

/// Accept a bid. Sugar for a `{"status":"accepted"}` patch; the report
/// includes the order the conversion created.
pub fn bid_accept(store: &mut Store, id: &str) -> Result<Report> {
    if !store.bids().iter().any(|b| b.id == id) {
        return Err(Error::NotFound(format!("Bid not found: {}", id)));
    }
    let patch: BidPatch = parse_patch(r#"{"status":"accepted"}"#)?;
    store.update_bid(id, patch)?;

    let order = store.projects().iter().find(|p| p.bid_id.as_deref() == Some(id)).cloned();
    let human = match &order {
        Some(order) => format!("Accepted bid {}; created order {}", id, order.id),
        None => format!("Accepted bid {}", id),
    };
    Report::new(&json!({ "accepted": id, "order": order }), human)
}

pub fn bid_delete(store: &mut Store, id: &str) -> Result<Report> {
    store.delete_bid(id)?;
    Report::new(&json!({ "deleted": id }), format!("Deleted bid {}", id))
}

// === Events ===

#[allow(clippy::too_many_arguments)]
pub fn event_add(
    store: &mut Store,
    title: String,
    start: DateTime<Utc>,
    end: Option<DateTime<Utc>>,
    all_day: bool,
    link_order: Option<String>,
    link_task: Option<String>,
) -> Result<Report> {
    let mut event = Event::new(title, start);
    event.end_date = end;
    event.all_day = all_day;
    event.linked_to = match (link_order, link_task) {
        (Some(id), _) => Some(EventLink {
            kind: LinkKind::Project,
            id,
        }),
        (None, Some(id)) => Some(EventLink {
            kind: LinkKind::Task,
            id,
        }),
        (None, None) => None,
    };
    let event = store.add_event(event)?;
    let human = format!("Added event {} ({})", event.title, event.id);
    Report::new(&event, human)
}

pub fn event_list(
    store: &Store,
    order: Option<&str>,
    date: Option<NaiveDate>,
) -> Result<Report> {
    let events: Vec<&Event> = match (order, date) {
        (Some(order), _) => store.events_by_project(order),
        (None, Some(date)) => store.events_by_date(date),
        (None, None) => store.events().iter().collect(),
    };
    let human = render_lines(
        events
            .iter()
            .map(|e| format!("{}  {}  {}", e.id, e.start_date.to_rfc3339(), e.title)),
    );
    Report::new(&events, human)
}

pub fn event_show(store: &Store, id: &str) -> Result<Report> {
    match store.events().iter().find(|e| e.id == id) {
        Some(event) => Report::new(event, format!("{}  {}", event.id, event.title)),
        None => Err(Error::NotFound(format!("Event not found: {}", id))),
    }
}

pub fn event_update(store: &mut Store, id: &str, patch: &str) -> Result<Report> {
    let patch: EventPatch = parse_patch(patch)?;
    store.update_event(id, patch)?;
    match store.events().iter().find(|e| e.id == id) {
        Some(event) => {
            let human = format!("Updated event {}", event.id);
            Report::new(&event.clone(), human)
        }
        None => not_found("event", id),
    }
}

pub fn event_delete(store: &mut Store, id: &str) -> Result<Report> {
    store.delete_event(id)?;
    Report::new(&json!({ "deleted": id }), format!("Deleted event {}", id))
}

// === Notes ===

// Notes bypass the mutation API: the CLI edits the list and hands it back,
// the same way the original views do.

#[allow(clippy::too_many_arguments)]
pub fn note_add(
    store: &mut Store,
    title: String,
    content: String,
    category: Option<String>,
    tags: Vec<String>,
    pin: bool,
    order: Option<String>,
    client: Option<String>,
) -> Result<Report> {
    let mut note = Note::new(generate_id(ID_PREFIX_NOTE, &title), title, content);
    note.category = category;
    note.tags = tags;
    note.is_pinned = pin;
    note.linked_order_id = order;
    note.linked_client_id = client;

    let mut notes = store.notes().to_vec();
    notes.push(note.clone());
    store.set_notes(notes)?;

    let human = format!("Added note {} ({})", note.title, note.id);
    Report::new(&note, human)
}

pub fn note_list(store: &Store) -> Result<Report> {
    let human = render_lines(store.notes().iter().map(|n| {
        format!("{}  {}{}", n.id, if n.is_pinned { "* " } else { "" }, n.title)
    }));
    Report::new(&store.notes(), human)
}

pub fn note_delete(store: &mut Store, id: &str) -> Result<Report> {
    let notes: Vec<Note> = store.notes().iter().filter(|n| n.id != id).cloned().collect();
    store.set_notes(notes)?;
    Report::new(&json!({ "deleted": id }), format!("Deleted note {}", id))
}

// === Derivations ===

pub fn calendar(store: &Store, date: Option<NaiveDate>) -> Result<Report> {
    if let Some(date) = date {
        let events = store.events_by_date(date);
        let human = render_lines(
            events
                .iter()
                .map(|e| format!("{}  {}  {}", e.id, e.start_date.to_rfc3339(), e.title)),
        );
        return Report::new(&events, human);
    }
    let items = store.calendar_items();
    let human = render_lines(items.iter().map(|i| {
        format!("{}  {:?}  {}", i.date.format("%Y-%m-%d"), i.kind, i.title)
    }));
    Report::new(&items, human)
}

pub fn summary(store: &Store, client_id: &str) -> Result<Report> {
    let Some(client) = store.clients().iter().find(|c| c.id == client_id) else {
        return Err(Error::NotFound(format!("Client not found: {}", client_id)));
    };
    let summary = store.client_summary(client_id);
    let human = format!(
        "{}: {} orders ({:.2} revenue, {:.2} paid), {} tasks ({} pending), {} bids ({} active)",
        client.name,
        summary.project_count,
        summary.total_revenue,
        summary.total_paid,
        summary.task_count,
        summary.pending_tasks,
        summary.bid_count,
        summary.active_bids,
    );
    Report::new(&summary, human)
}

fn render_lines<I: Iterator<Item = String>>(lines: I) -> String {
    let joined = lines.collect::<Vec<_>>().join("\n");
    if joined.is_empty() {
        "(none)".to_string()
    } else {
        joined
    }
}
