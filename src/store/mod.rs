//! Entity store for presswork data.
//!
//! The store holds six collections (clients, orders, tasks, bids, events,
//! notes) in memory as the single source of truth for the running session.
//! Every mutation re-serializes the touched collection to its fixed key on
//! the durable backend; collections persist independently, so a cascade
//! that touches two collections performs two writes.
//!
//! Mutations on an id that does not exist are silent no-ops: callers fire
//! and forget, and the store never raises for a missing record. Loading is
//! equally permissive - a missing or corrupt record yields an empty
//! collection rather than an error.
//!
//! The store is an explicit context object, never a process global;
//! tests instantiate isolated stores over an in-memory backend.

pub mod backend;
pub mod queries;
mod sync;

use chrono::Utc;
use serde::de::DeserializeOwned;
use sha2::{Digest, Sha256};

use crate::models::patch::{BidPatch, ClientPatch, EventPatch, ProjectPatch, TaskPatch};
use crate::models::{Bid, BidStatus, Client, Event, Note, Project, Task};
use crate::Result;
use backend::StorageBackend;

/// Fixed keys of the durable records, one per collection.
pub mod keys {
    pub const CLIENTS: &str = "clients";
    pub const ORDERS: &str = "orders";
    pub const TASKS: &str = "tasks";
    pub const BIDS: &str = "bids";
    pub const EVENTS: &str = "events";
    pub const NOTES: &str = "notes";

    pub const ALL: [&str; 6] = [CLIENTS, ORDERS, TASKS, BIDS, EVENTS, NOTES];
}

/// Id prefixes, one per entity type.
pub const ID_PREFIX_CLIENT: &str = "pwc";
pub const ID_PREFIX_PROJECT: &str = "pwo";
pub const ID_PREFIX_TASK: &str = "pwt";
pub const ID_PREFIX_BID: &str = "pwb";
pub const ID_PREFIX_EVENT: &str = "pwe";
pub const ID_PREFIX_NOTE: &str = "pwn";

/// Generate an id for an entity.
///
/// Format: `<prefix>-<4 hex chars>`. Opaque and unique (the store re-rolls
/// on collision), not ordered.
pub fn generate_id(prefix: &str, seed: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seed.as_bytes());
    hasher.update(
        Utc::now()
            .timestamp_nanos_opt()
            .unwrap_or(0)
            .to_le_bytes(),
    );
    let hash = hasher.finalize();
    let hash_hex = format!("{:x}", hash);
    format!("{}-{}", prefix, &hash_hex[..4])
}

/// The entity store.
pub struct Store {
    backend: Box<dyn StorageBackend>,
    clients: Vec<Client>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    bids: Vec<Bid>,
    events: Vec<Event>,
    notes: Vec<Note>,
}

impl Store {
    /// Open a store over the given backend, loading every collection.
    ///
    /// Loading fails open: a collection whose record is missing or corrupt
    /// starts empty. Corrupt records are logged, never surfaced.
    pub fn open(backend: Box<dyn StorageBackend>) -> Self {
        let clients = load_collection(backend.as_ref(), keys::CLIENTS);
        let projects = load_collection(backend.as_ref(), keys::ORDERS);
        let tasks = load_collection(backend.as_ref(), keys::TASKS);
        let bids = load_collection(backend.as_ref(), keys::BIDS);
        let events = load_collection(backend.as_ref(), keys::EVENTS);
        let notes = load_collection(backend.as_ref(), keys::NOTES);
        Self {
            backend,
            clients,
            projects,
            tasks,
            bids,
            events,
            notes,
        }
    }

    /// Storage location description, for display.
    pub fn location(&self) -> String {
        self.backend.location()
    }

    // === Snapshot accessors ===

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn bids(&self) -> &[Bid] {
        &self.bids
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    // === Client operations ===

    /// Add a client. The store assigns the id and both timestamps.
    pub fn add_client(&mut self, mut client: Client) -> Result<Client> {
        client.id = self.assign_id(ID_PREFIX_CLIENT, &client.name);
        let now = Utc::now();
        client.created_at = now;
        client.updated_at = now;
        self.clients.push(client.clone());
        self.persist_clients()?;
        Ok(client)
    }

    /// Patch a client. Unknown id is a silent no-op.
    pub fn update_client(&mut self, id: &str, patch: ClientPatch) -> Result<()> {
        let Some(client) = self.clients.iter_mut().find(|c| c.id == id) else {
            return Ok(());
        };
        patch.apply(client);
        client.updated_at = Utc::now();
        self.persist_clients()
    }

    /// Delete a client. Tasks, orders, and bids that reference it keep
    /// their dangling ids; references are lookups, not ownership.
    pub fn delete_client(&mut self, id: &str) -> Result<()> {
        let before = self.clients.len();
        self.clients.retain(|c| c.id != id);
        if self.clients.len() == before {
            return Ok(());
        }
        self.persist_clients()
    }

    // === Order operations ===

    /// Add an order. The store assigns the id and both timestamps.
    pub fn add_project(&mut self, mut project: Project) -> Result<Project> {
        project.id = self.assign_id(ID_PREFIX_PROJECT, &project.order_number);
        let now = Utc::now();
        project.created_at = now;
        project.updated_at = now;
        self.projects.push(project.clone());
        self.persist_projects()?;
        Ok(project)
    }

    /// Patch an order. Unknown id is a silent no-op.
    ///
    /// A patch that touches `status`, `due_date`/`start_date`, or `tags`
    /// fans out to the linked tasks and events after the order persists.
    pub fn update_project(&mut self, id: &str, patch: ProjectPatch) -> Result<()> {
        let Some(idx) = self.projects.iter().position(|p| p.id == id) else {
            return Ok(());
        };
        let touched_status = patch.status.is_some();
        let touched_dates = patch.due_date.is_some() || patch.start_date.is_some();
        let touched_tags = patch.tags.is_some();

        let project = &mut self.projects[idx];
        patch.apply(project);
        project.updated_at = Utc::now();
        self.persist_projects()?;

        let project = self.projects[idx].clone();
        if touched_status {
            self.sync_project_status_to_tasks(&project)?;
        }
        if touched_dates {
            self.sync_project_dates_to_related(&project)?;
        }
        if touched_tags {
            self.sync_project_tags_to_tasks(&project)?;
        }
        Ok(())
    }

    /// Delete an order. Its tasks are kept: their `project_id` is cleared
    /// and `archived_project` records where they came from.
    pub fn delete_project(&mut self, id: &str) -> Result<()> {
        let before = self.projects.len();
        self.projects.retain(|p| p.id != id);
        if self.projects.len() == before {
            return Ok(());
        }
        self.persist_projects()?;

        let mut archived = false;
        for task in self.tasks.iter_mut() {
            if task.project_id.as_deref() == Some(id) {
                task.project_id = None;
                task.archived_project = Some(id.to_string());
                task.updated_at = Utc::now();
                archived = true;
            }
        }
        if archived {
            self.persist_tasks()?;
        }
        Ok(())
    }

    // === Task operations ===

    /// Add a task. The store assigns the id and both timestamps.
    pub fn add_task(&mut self, mut task: Task) -> Result<Task> {
        task.id = self.assign_id(ID_PREFIX_TASK, &task.title);
        let now = Utc::now();
        task.created_at = now;
        task.updated_at = now;
        self.tasks.push(task.clone());
        self.persist_tasks()?;
        Ok(task)
    }

    /// Patch a task. Unknown id is a silent no-op.
    ///
    /// Every applied patch re-runs the completion rollup for the task's
    /// parent order, whatever fields changed.
    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<()> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return Ok(());
        };
        patch.apply(task);
        task.updated_at = Utc::now();
        let project_id = task.project_id.clone();
        self.persist_tasks()?;

        if let Some(project_id) = project_id {
            self.sync_task_rollup(&project_id)?;
        }
        Ok(())
    }

    /// Delete a task. Unknown id is a silent no-op.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.persist_tasks()
    }

    // === Bid operations ===

    /// Add a bid. The store assigns the id and both timestamps.
    pub fn add_bid(&mut self, mut bid: Bid) -> Result<Bid> {
        bid.id = self.assign_id(ID_PREFIX_BID, &bid.bid_number);
        let now = Utc::now();
        bid.created_at = now;
        bid.updated_at = now;
        self.bids.push(bid.clone());
        self.persist_bids()?;
        Ok(bid)
    }

    /// Patch a bid. Unknown id is a silent no-op.
    ///
    /// A patch that moves the bid into `accepted` from any other status
    /// converts it: one new order and one kickoff task, exactly once.
    pub fn update_bid(&mut self, id: &str, patch: BidPatch) -> Result<()> {
        let Some(bid) = self.bids.iter_mut().find(|b| b.id == id) else {
            return Ok(());
        };
        let prev_status = bid.status;
        patch.apply(bid);
        bid.updated_at = Utc::now();
        let accepted = bid.status == BidStatus::Accepted && prev_status != BidStatus::Accepted;
        let bid = bid.clone();
        self.persist_bids()?;

        if accepted {
            self.convert_bid_to_project(&bid)?;
        }
        Ok(())
    }

    /// Delete a bid. Unknown id is a silent no-op.
    pub fn delete_bid(&mut self, id: &str) -> Result<()> {
        let before = self.bids.len();
        self.bids.retain(|b| b.id != id);
        if self.bids.len() == before {
            return Ok(());
        }
        self.persist_bids()
    }

    // === Event operations ===

    /// Add an event. The store assigns the id and both timestamps.
    pub fn add_event(&mut self, mut event: Event) -> Result<Event> {
        event.id = self.assign_id(ID_PREFIX_EVENT, &event.title);
        let now = Utc::now();
        event.created_at = now;
        event.updated_at = now;
        self.events.push(event.clone());
        self.persist_events()?;
        Ok(event)
    }

    /// Patch an event. Unknown id is a silent no-op.
    ///
    /// A patch that moves `start_date` pushes the new date into the linked
    /// order's start date or the linked task's due date.
    pub fn update_event(&mut self, id: &str, patch: EventPatch) -> Result<()> {
        let Some(event) = self.events.iter_mut().find(|e| e.id == id) else {
            return Ok(());
        };
        let touched_start = patch.start_date.is_some();
        patch.apply(event);
        event.updated_at = Utc::now();
        let start = event.start_date;
        let link = event.linked_to.clone();
        self.persist_events()?;

        if touched_start {
            if let Some(link) = link {
                self.sync_event_to_linked(&link, start)?;
            }
        }
        Ok(())
    }

    /// Delete an event. Unknown id is a silent no-op.
    pub fn delete_event(&mut self, id: &str) -> Result<()> {
        let before = self.events.len();
        self.events.retain(|e| e.id != id);
        if self.events.len() == before {
            return Ok(());
        }
        self.persist_events()
    }

    // === Notes ===

    /// Replace the notes collection and persist it.
    ///
    /// Notes are deliberately outside the add/update/delete API: consumers
    /// edit the list directly and hand the result back.
    pub fn set_notes(&mut self, notes: Vec<Note>) -> Result<()> {
        self.notes = notes;
        self.persist_notes()
    }

    // === Persistence ===

    /// Persist every collection. Used by `system init` to materialize the
    /// durable records.
    pub fn persist_all(&mut self) -> Result<()> {
        self.persist_clients()?;
        self.persist_projects()?;
        self.persist_tasks()?;
        self.persist_bids()?;
        self.persist_events()?;
        self.persist_notes()
    }

    fn persist_clients(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.clients)?;
        self.backend.write_record(keys::CLIENTS, &json)
    }

    pub(crate) fn persist_projects(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.projects)?;
        self.backend.write_record(keys::ORDERS, &json)
    }

    pub(crate) fn persist_tasks(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.tasks)?;
        self.backend.write_record(keys::TASKS, &json)
    }

    fn persist_bids(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.bids)?;
        self.backend.write_record(keys::BIDS, &json)
    }

    pub(crate) fn persist_events(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.events)?;
        self.backend.write_record(keys::EVENTS, &json)
    }

    fn persist_notes(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.notes)?;
        self.backend.write_record(keys::NOTES, &json)
    }

    // === Internals ===

    /// Pick an id that no live entity carries.
    fn assign_id(&self, prefix: &str, seed: &str) -> String {
        let mut salt = 0u32;
        loop {
            let id = generate_id(prefix, &format!("{}:{}", seed, salt));
            if !self.id_exists(&id) {
                return id;
            }
            salt += 1;
        }
    }

    fn id_exists(&self, id: &str) -> bool {
        self.clients.iter().any(|c| c.id == id)
            || self.projects.iter().any(|p| p.id == id)
            || self.tasks.iter().any(|t| t.id == id)
            || self.bids.iter().any(|b| b.id == id)
            || self.events.iter().any(|e| e.id == id)
            || self.notes.iter().any(|n| n.id == id)
    }
}

fn load_collection<T: DeserializeOwned>(backend: &dyn StorageBackend, key: &str) -> Vec<T> {
    match backend.read_record(key) {
        Ok(None) => Vec::new(),
        Ok(Some(json)) => match serde_json::from_str(&json) {
            Ok(collection) => collection,
            Err(err) => {
                tracing::warn!(key, %err, "corrupt collection record, starting empty");
                Vec::new()
            }
        },
        Err(err) => {
            tracing::warn!(key, %err, "unreadable collection record, starting empty");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::backend::{FileBackend, MemoryBackend};
    use super::*;
    use tempfile::TempDir;

    fn memory_store() -> Store {
        Store::open(Box::new(MemoryBackend::new()))
    }

    #[test]
    fn test_add_assigns_id_and_timestamps() {
        let mut store = memory_store();
        let client = store.add_client(Client::new("Acme Print Co".to_string())).unwrap();

        assert!(client.id.starts_with("pwc-"));
        assert_eq!(client.id.len(), 8);
        assert_eq!(store.clients().len(), 1);
        assert_eq!(store.clients()[0].id, client.id);
    }

    #[test]
    fn test_assigned_ids_are_unique() {
        let mut store = memory_store();
        let a = store.add_task(Task::new("same title".to_string())).unwrap();
        let b = store.add_task(Task::new("same title".to_string())).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_nonexistent_id_is_noop() {
        let mut store = memory_store();
        store.add_project(Project::new("ORD-1".to_string(), "pwc-1".to_string())).unwrap();
        store.add_task(Task::new("Cut vinyl".to_string())).unwrap();

        let projects_before = store.projects().to_vec();
        let tasks_before = store.tasks().to_vec();
        let events_before = store.events().to_vec();

        let patch: ProjectPatch = serde_json::from_str(r#"{"status":"production"}"#).unwrap();
        store.update_project("pwo-zzzz", patch).unwrap();

        assert_eq!(store.projects(), projects_before.as_slice());
        assert_eq!(store.tasks(), tasks_before.as_slice());
        assert_eq!(store.events(), events_before.as_slice());
    }

    #[test]
    fn test_delete_nonexistent_id_is_noop() {
        let mut store = memory_store();
        store.add_bid(Bid::new("BID-1".to_string(), "pwc-1".to_string())).unwrap();

        store.delete_bid("pwb-zzzz").unwrap();
        store.delete_client("pwc-zzzz").unwrap();

        assert_eq!(store.bids().len(), 1);
    }

    #[test]
    fn test_update_rewrites_updated_at() {
        let mut store = memory_store();
        let client = store.add_client(Client::new("Acme".to_string())).unwrap();
        let before = store.clients()[0].updated_at;

        let patch: ClientPatch = serde_json::from_str(r#"{"phone":"555-0100"}"#).unwrap();
        store.update_client(&client.id, patch).unwrap();

        assert!(store.clients()[0].updated_at >= before);
        assert_eq!(store.clients()[0].phone.as_deref(), Some("555-0100"));
    }

    #[test]
    fn test_delete_project_archives_tasks() {
        let mut store = memory_store();
        let project = store
            .add_project(Project::new("ORD-1".to_string(), "pwc-1".to_string()))
            .unwrap();

        let mut task = Task::new("Print run".to_string());
        task.project_id = Some(project.id.clone());
        let task = store.add_task(task).unwrap();

        let mut unrelated = Task::new("Restock toner".to_string());
        unrelated.project_id = Some("pwo-other".to_string());
        let unrelated = store.add_task(unrelated).unwrap();

        store.delete_project(&project.id).unwrap();

        assert!(store.projects().is_empty());
        let archived = store.tasks().iter().find(|t| t.id == task.id).unwrap();
        assert_eq!(archived.project_id, None);
        assert_eq!(archived.archived_project.as_deref(), Some(project.id.as_str()));

        let untouched = store.tasks().iter().find(|t| t.id == unrelated.id).unwrap();
        assert_eq!(untouched.project_id.as_deref(), Some("pwo-other"));
        assert_eq!(untouched.archived_project, None);
    }

    #[test]
    fn test_persistence_roundtrip_all_collections() {
        let dir = TempDir::new().unwrap();

        let (clients, projects, tasks, bids, events, notes) = {
            let mut store = Store::open(Box::new(FileBackend::new(dir.path())));
            store.add_client(Client::new("Acme".to_string())).unwrap();
            store
                .add_project(Project::new("ORD-1".to_string(), "pwc-1".to_string()))
                .unwrap();
            store.add_task(Task::new("Trim".to_string())).unwrap();
            store.add_bid(Bid::new("BID-1".to_string(), "pwc-1".to_string())).unwrap();
            store
                .add_event(Event::new("Press check".to_string(), Utc::now()))
                .unwrap();
            store
                .set_notes(vec![Note::new(
                    "pwn-0001".to_string(),
                    "Reminder".to_string(),
                    "Order more 350gsm stock".to_string(),
                )])
                .unwrap();
            (
                store.clients().to_vec(),
                store.projects().to_vec(),
                store.tasks().to_vec(),
                store.bids().to_vec(),
                store.events().to_vec(),
                store.notes().to_vec(),
            )
        };

        let reopened = Store::open(Box::new(FileBackend::new(dir.path())));
        assert_eq!(reopened.clients(), clients.as_slice());
        assert_eq!(reopened.projects(), projects.as_slice());
        assert_eq!(reopened.tasks(), tasks.as_slice());
        assert_eq!(reopened.bids(), bids.as_slice());
        assert_eq!(reopened.events(), events.as_slice());
        assert_eq!(reopened.notes(), notes.as_slice());
    }

    #[test]
    fn test_corrupt_record_fails_open() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("tasks.json"), "not json at all").unwrap();
        std::fs::write(dir.path().join("clients.json"), r#"[]"#).unwrap();

        let store = Store::open(Box::new(FileBackend::new(dir.path())));
        assert!(store.tasks().is_empty());
        assert!(store.clients().is_empty());
    }

    #[test]
    fn test_set_notes_replaces_collection() {
        let mut store = memory_store();
        let note = Note::new("pwn-0001".to_string(), "A".to_string(), "a".to_string());
        store.set_notes(vec![note.clone()]).unwrap();
        assert_eq!(store.notes().len(), 1);

        store.set_notes(Vec::new()).unwrap();
        assert!(store.notes().is_empty());
    }
}
