//! Data models for presswork entities.
//!
//! This module defines the core data structures:
//! - `Client` - Customers with contact details and portal access
//! - `Project` - Client orders with pricing and a workflow status
//! - `Task` - Work items that can follow their parent order's status
//! - `Bid` - Pre-sale proposals that convert into orders on acceptance
//! - `Event` - Calendar entries, optionally linked to an order or task
//! - `Note` - Free-form notes with weak links only, never synchronized

pub mod patch;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Workflow status of an order.
///
/// The nine named variants are the ids the task-sync mapping understands.
/// Anything else (for example an id from the user-configurable business
/// catalog) is carried through as `Custom` and treated as unmapped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ProjectStatus {
    #[default]
    Pending,
    Designing,
    Production,
    Printing,
    Finishing,
    Ready,
    Delivered,
    Completed,
    Cancelled,
    /// A status id outside the workflow vocabulary.
    Custom(String),
}

impl ProjectStatus {
    /// The wire form of this status.
    pub fn as_str(&self) -> &str {
        match self {
            ProjectStatus::Pending => "pending",
            ProjectStatus::Designing => "designing",
            ProjectStatus::Production => "production",
            ProjectStatus::Printing => "printing",
            ProjectStatus::Finishing => "finishing",
            ProjectStatus::Ready => "ready",
            ProjectStatus::Delivered => "delivered",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::Custom(s) => s,
        }
    }
}

impl From<String> for ProjectStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "pending" => ProjectStatus::Pending,
            "designing" => ProjectStatus::Designing,
            "production" => ProjectStatus::Production,
            "printing" => ProjectStatus::Printing,
            "finishing" => ProjectStatus::Finishing,
            "ready" => ProjectStatus::Ready,
            "delivered" => ProjectStatus::Delivered,
            "completed" => ProjectStatus::Completed,
            "cancelled" => ProjectStatus::Cancelled,
            _ => ProjectStatus::Custom(s),
        }
    }
}

impl From<ProjectStatus> for String {
    fn from(status: ProjectStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProjectStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(ProjectStatus::from(s.to_string()))
    }
}

/// Task status in the workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in-progress",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(TaskStatus::Pending),
            "in-progress" | "in_progress" | "inprogress" => Ok(TaskStatus::InProgress),
            "completed" => Ok(TaskStatus::Completed),
            "cancelled" => Ok(TaskStatus::Cancelled),
            _ => Err(format!("Unknown task status: {}", s)),
        }
    }
}

/// Task priority level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

/// Bid status in the pre-sale workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BidStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

impl fmt::Display for BidStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BidStatus::Draft => "draft",
            BidStatus::Sent => "sent",
            BidStatus::Accepted => "accepted",
            BidStatus::Rejected => "rejected",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for BidStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(BidStatus::Draft),
            "sent" => Ok(BidStatus::Sent),
            "accepted" => Ok(BidStatus::Accepted),
            "rejected" => Ok(BidStatus::Rejected),
            _ => Err(format!("Unknown bid status: {}", s)),
        }
    }
}

/// One priced line on an order or bid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,

    #[serde(default)]
    pub quantity: f64,

    #[serde(default)]
    pub unit_price: f64,
}

/// Pricing block of an order.
///
/// `balance` is conceptually `total - paid` but is owned by the caller:
/// the store never recomputes it after a patch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pricing {
    #[serde(default)]
    pub subtotal: f64,

    #[serde(default)]
    pub tax: f64,

    #[serde(default)]
    pub total: f64,

    #[serde(default)]
    pub paid: f64,

    #[serde(default)]
    pub balance: f64,
}

/// A customer tracked by presswork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Unique identifier (e.g., "pwc-a1b2"), assigned by the store
    pub id: String,

    /// Display name
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Access code for the client portal. A plain string match, not a
    /// security mechanism.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_access_code: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Client {
    /// Create a new client draft. The store assigns the id and timestamps
    /// when the draft is added.
    pub fn new(name: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            name,
            email: None,
            phone: None,
            company: None,
            tags: Vec::new(),
            portal_access_code: None,
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_channel() -> String {
    "direct".to_string()
}

/// A client order tracked by presswork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Unique identifier (e.g., "pwo-a1b2"), assigned by the store
    pub id: String,

    /// Human-facing order number (e.g., "ORD-0042")
    pub order_number: String,

    /// Owning client. A lookup reference, not an owning pointer.
    pub client_id: String,

    /// Workflow status
    #[serde(default)]
    pub status: ProjectStatus,

    /// Priced lines on the order
    #[serde(default)]
    pub items: Vec<LineItem>,

    /// Pricing block. Replaced wholesale by patches, never deep-merged.
    #[serde(default)]
    pub pricing: Pricing,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Target delivery date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Production start date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// Source bid, when this order was created by accepting one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bid_id: Option<String>,

    /// Sales channel (e.g., "direct")
    #[serde(default = "default_channel")]
    pub store: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Create a new order draft for a client. The store assigns the id and
    /// timestamps when the draft is added.
    pub fn new(order_number: String, client_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            order_number,
            client_id,
            status: ProjectStatus::default(),
            items: Vec::new(),
            pricing: Pricing::default(),
            tags: Vec::new(),
            due_date: None,
            start_date: None,
            bid_id: None,
            store: default_channel(),
            created_at: now,
            updated_at: now,
        }
    }
}

fn default_true() -> bool {
    true
}

/// A work item tracked by presswork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier (e.g., "pwt-a1b2"), assigned by the store
    pub id: String,

    /// Task title
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parent order. A lookup reference; the task survives the order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Related client. A lookup reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,

    /// Current status
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority level
    #[serde(default)]
    pub priority: TaskPriority,

    /// Target date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether this task follows its parent order's status, dates, and
    /// tags. Opting out detaches the task from every cascade.
    #[serde(default = "default_true")]
    pub sync_with_project: bool,

    /// Set to the old order id when the parent order is deleted,
    /// preserving task history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub archived_project: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Create a new task draft. The store assigns the id and timestamps
    /// when the draft is added.
    pub fn new(title: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title,
            description: None,
            project_id: None,
            client_id: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            tags: Vec::new(),
            sync_with_project: true,
            archived_project: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A pre-sale proposal tracked by presswork.
///
/// Accepting a bid creates exactly one order and one kickoff task. The bid
/// itself is never deleted by the conversion; the order's `bid_id` keeps
/// the audit trail.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    /// Unique identifier (e.g., "pwb-a1b2"), assigned by the store
    pub id: String,

    /// Human-facing bid number (e.g., "BID-0007")
    pub bid_number: String,

    /// Prospective client. A lookup reference.
    pub client_id: String,

    /// Priced lines on the bid
    #[serde(default)]
    pub items: Vec<LineItem>,

    #[serde(default)]
    pub subtotal: f64,

    #[serde(default)]
    pub tax: f64,

    #[serde(default)]
    pub total: f64,

    /// Tags for categorization
    #[serde(default)]
    pub tags: Vec<String>,

    /// Current status
    #[serde(default)]
    pub status: BidStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl Bid {
    /// Create a new bid draft for a client. The store assigns the id and
    /// timestamps when the draft is added.
    pub fn new(bid_number: String, client_id: String) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            bid_number,
            client_id,
            items: Vec::new(),
            subtotal: 0.0,
            tax: 0.0,
            total: 0.0,
            tags: Vec::new(),
            status: BidStatus::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Kind of entity a calendar event is linked to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Project,
    Task,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LinkKind::Project => "project",
            LinkKind::Task => "task",
        };
        write!(f, "{}", s)
    }
}

/// Weak link from a calendar event to an order or task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventLink {
    /// Kind of the linked entity
    #[serde(rename = "type")]
    pub kind: LinkKind,

    /// Id of the linked entity
    pub id: String,
}

/// A calendar entry tracked by presswork.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Unique identifier (e.g., "pwe-a1b2"), assigned by the store
    pub id: String,

    pub title: String,

    pub start_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    #[serde(default)]
    pub all_day: bool,

    /// Linked order or task. Date edits cascade into the linked entity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_to: Option<EventLink>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Create a new event draft. The store assigns the id and timestamps
    /// when the draft is added.
    pub fn new(title: String, start_date: DateTime<Utc>) -> Self {
        let now = Utc::now();
        Self {
            id: String::new(),
            title,
            start_date,
            end_date: None,
            all_day: false,
            linked_to: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// A free-form note. Notes carry weak links only and no synchronization
/// rule ever touches them; consumers edit the notes list directly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    /// Unique identifier (e.g., "pwn-a1b2")
    pub id: String,

    pub title: String,

    /// Markdown body
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub is_pinned: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_order_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub linked_client_id: Option<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// Create a new note. Notes bypass the store's mutation API, so the
    /// caller supplies the id (see `store::generate_id`).
    pub fn new(id: String, title: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            content,
            category: None,
            tags: Vec::new(),
            is_pinned: false,
            linked_order_id: None,
            linked_client_id: None,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_status_serialization() {
        let status = ProjectStatus::Production;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#""production""#);

        let deserialized: ProjectStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, ProjectStatus::Production);
    }

    #[test]
    fn test_project_status_custom_roundtrip() {
        // Business-catalog ids pass through as Custom, byte-for-byte.
        let status: ProjectStatus = serde_json::from_str(r#""confirmed""#).unwrap();
        assert_eq!(status, ProjectStatus::Custom("confirmed".to_string()));
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""confirmed""#);
    }

    #[test]
    fn test_task_status_serialization() {
        let status = TaskStatus::InProgress;
        let json = serde_json::to_string(&status).unwrap();
        assert_eq!(json, r#""in-progress""#);
    }

    #[test]
    fn test_task_status_from_str() {
        assert_eq!("in-progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("in_progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("completed".parse::<TaskStatus>().unwrap(), TaskStatus::Completed);
        assert!("done".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_serialization_roundtrip() {
        let task = Task::new("Trim banner".to_string());
        let json = serde_json::to_string(&task).unwrap();
        let deserialized: Task = serde_json::from_str(&json).unwrap();
        assert_eq!(task.title, deserialized.title);
        assert!(deserialized.sync_with_project);
    }

    #[test]
    fn test_task_sync_with_project_defaults_true() {
        let json = r#"{"id":"pwt-0001","title":"T","status":"pending","priority":"medium","created_at":"2026-01-01T00:00:00Z","updated_at":"2026-01-01T00:00:00Z"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(task.sync_with_project);
    }

    #[test]
    fn test_project_serialization_roundtrip() {
        let mut project = Project::new("ORD-0001".to_string(), "pwc-aaaa".to_string());
        project.pricing = Pricing {
            subtotal: 100.0,
            tax: 10.0,
            total: 110.0,
            paid: 50.0,
            balance: 60.0,
        };
        let json = serde_json::to_string(&project).unwrap();
        let deserialized: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(project.order_number, deserialized.order_number);
        assert_eq!(deserialized.pricing.balance, 60.0);
        assert_eq!(deserialized.store, "direct");
    }

    #[test]
    fn test_project_channel_defaults_direct() {
        let json = r#"{"id":"pwo-0001","order_number":"ORD-1","client_id":"pwc-1","created_at":"2026-01-01T00:00:00Z","updated_at":"2026-01-01T00:00:00Z"}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.store, "direct");
        assert_eq!(project.status, ProjectStatus::Pending);
    }

    #[test]
    fn test_bid_serialization_roundtrip() {
        let bid = Bid::new("BID-0001".to_string(), "pwc-aaaa".to_string());
        let json = serde_json::to_string(&bid).unwrap();
        let deserialized: Bid = serde_json::from_str(&json).unwrap();
        assert_eq!(bid.bid_number, deserialized.bid_number);
        assert_eq!(deserialized.status, BidStatus::Draft);
    }

    #[test]
    fn test_event_link_serialization() {
        let link = EventLink {
            kind: LinkKind::Project,
            id: "pwo-1234".to_string(),
        };
        let json = serde_json::to_string(&link).unwrap();
        assert_eq!(json, r#"{"type":"project","id":"pwo-1234"}"#);
    }

    #[test]
    fn test_note_serialization_roundtrip() {
        let note = Note::new(
            "pwn-0001".to_string(),
            "Supplier call".to_string(),
            "Paper stock arrives **Thursday**".to_string(),
        );
        let json = serde_json::to_string(&note).unwrap();
        let deserialized: Note = serde_json::from_str(&json).unwrap();
        assert_eq!(note.id, deserialized.id);
        assert_eq!(note.content, deserialized.content);
        assert!(!deserialized.is_pinned);
    }
}
