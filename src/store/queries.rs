//! Query and derivation helpers.
//!
//! Pure, read-only projections over current state, recomputed on every
//! call. Nothing here caches, and nothing mutates: at local-storage scale
//! the per-call recomputation is the design, not an oversight.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::Store;
use crate::models::{Bid, BidStatus, Event, LinkKind, Project, Task, TaskStatus};

/// Kind tag of a unified calendar item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CalendarItemKind {
    Project,
    Task,
    Event,
}

/// One entry of the unified calendar feed.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarItem {
    #[serde(rename = "type")]
    pub kind: CalendarItemKind,
    pub id: String,
    pub title: String,
    pub date: DateTime<Utc>,
    pub all_day: bool,
}

/// Per-client aggregate, the most expensive derivation.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSummary {
    pub client_id: String,
    pub project_count: usize,
    pub task_count: usize,
    pub bid_count: usize,
    /// Sum of `pricing.total` across the client's orders
    pub total_revenue: f64,
    /// Sum of `pricing.paid` across the client's orders
    pub total_paid: f64,
    pub pending_tasks: usize,
    /// Bids still in play (draft or sent)
    pub active_bids: usize,
    pub projects: Vec<Project>,
    pub tasks: Vec<Task>,
    pub bids: Vec<Bid>,
}

impl Store {
    /// Orders belonging to a client.
    pub fn projects_by_client(&self, client_id: &str) -> Vec<&Project> {
        self.projects().iter().filter(|p| p.client_id == client_id).collect()
    }

    /// Tasks linked to an order.
    pub fn tasks_by_project(&self, project_id: &str) -> Vec<&Task> {
        self.tasks()
            .iter()
            .filter(|t| t.project_id.as_deref() == Some(project_id))
            .collect()
    }

    /// Tasks linked to a client.
    pub fn tasks_by_client(&self, client_id: &str) -> Vec<&Task> {
        self.tasks()
            .iter()
            .filter(|t| t.client_id.as_deref() == Some(client_id))
            .collect()
    }

    /// Bids belonging to a client.
    pub fn bids_by_client(&self, client_id: &str) -> Vec<&Bid> {
        self.bids().iter().filter(|b| b.client_id == client_id).collect()
    }

    /// Events linked to an order.
    pub fn events_by_project(&self, project_id: &str) -> Vec<&Event> {
        self.events()
            .iter()
            .filter(|e| {
                matches!(
                    &e.linked_to,
                    Some(link) if link.kind == LinkKind::Project && link.id == project_id
                )
            })
            .collect()
    }

    /// Events starting on a calendar day.
    pub fn events_by_date(&self, date: NaiveDate) -> Vec<&Event> {
        self.events()
            .iter()
            .filter(|e| e.start_date.date_naive() == date)
            .collect()
    }

    /// The unified calendar feed: orders with a due date, tasks with a due
    /// date, and every event, sorted ascending by date.
    pub fn calendar_items(&self) -> Vec<CalendarItem> {
        let mut items = Vec::new();
        for project in self.projects() {
            if let Some(due) = project.due_date {
                items.push(CalendarItem {
                    kind: CalendarItemKind::Project,
                    id: project.id.clone(),
                    title: project.order_number.clone(),
                    date: due,
                    all_day: true,
                });
            }
        }
        for task in self.tasks() {
            if let Some(due) = task.due_date {
                items.push(CalendarItem {
                    kind: CalendarItemKind::Task,
                    id: task.id.clone(),
                    title: task.title.clone(),
                    date: due,
                    all_day: true,
                });
            }
        }
        for event in self.events() {
            items.push(CalendarItem {
                kind: CalendarItemKind::Event,
                id: event.id.clone(),
                title: event.title.clone(),
                date: event.start_date,
                all_day: event.all_day,
            });
        }
        items.sort_by_key(|item| item.date);
        items
    }

    /// Aggregate everything known about one client.
    pub fn client_summary(&self, client_id: &str) -> ClientSummary {
        let projects: Vec<Project> =
            self.projects_by_client(client_id).into_iter().cloned().collect();
        let tasks: Vec<Task> = self.tasks_by_client(client_id).into_iter().cloned().collect();
        let bids: Vec<Bid> = self.bids_by_client(client_id).into_iter().cloned().collect();

        ClientSummary {
            client_id: client_id.to_string(),
            project_count: projects.len(),
            task_count: tasks.len(),
            bid_count: bids.len(),
            total_revenue: projects.iter().map(|p| p.pricing.total).sum(),
            total_paid: projects.iter().map(|p| p.pricing.paid).sum(),
            pending_tasks: tasks.iter().filter(|t| t.status == TaskStatus::Pending).count(),
            active_bids: bids
                .iter()
                .filter(|b| matches!(b.status, BidStatus::Draft | BidStatus::Sent))
                .count(),
            projects,
            tasks,
            bids,
        }
    }
}
