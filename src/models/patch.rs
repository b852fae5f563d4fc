//! Shallow-merge patches for the mutation API.
//!
//! A field that is present in a patch replaces the stored field wholesale;
//! an absent field leaves the stored value untouched. Nested objects
//! (pricing, line items, event links) are replaced as a unit, never
//! deep-merged. Patches deserialize from JSON, so a CLI or UI collaborator
//! can forward user edits without knowing which fields changed.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::{
    Bid, BidStatus, Client, Event, EventLink, LineItem, Pricing, Project, ProjectStatus, Task,
    TaskPriority, TaskStatus,
};

/// Partial update for a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub tags: Option<Vec<String>>,
    pub portal_access_code: Option<String>,
}

impl ClientPatch {
    pub fn apply(self, client: &mut Client) {
        if let Some(name) = self.name {
            client.name = name;
        }
        if let Some(email) = self.email {
            client.email = Some(email);
        }
        if let Some(phone) = self.phone {
            client.phone = Some(phone);
        }
        if let Some(company) = self.company {
            client.company = Some(company);
        }
        if let Some(tags) = self.tags {
            client.tags = tags;
        }
        if let Some(code) = self.portal_access_code {
            client.portal_access_code = Some(code);
        }
    }
}

/// Partial update for an order.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProjectPatch {
    pub order_number: Option<String>,
    pub client_id: Option<String>,
    pub status: Option<ProjectStatus>,
    pub items: Option<Vec<LineItem>>,
    pub pricing: Option<Pricing>,
    pub tags: Option<Vec<String>>,
    pub due_date: Option<DateTime<Utc>>,
    pub start_date: Option<DateTime<Utc>>,
    pub store: Option<String>,
}

impl ProjectPatch {
    pub fn apply(self, project: &mut Project) {
        if let Some(order_number) = self.order_number {
            project.order_number = order_number;
        }
        if let Some(client_id) = self.client_id {
            project.client_id = client_id;
        }
        if let Some(status) = self.status {
            project.status = status;
        }
        if let Some(items) = self.items {
            project.items = items;
        }
        if let Some(pricing) = self.pricing {
            project.pricing = pricing;
        }
        if let Some(tags) = self.tags {
            project.tags = tags;
        }
        if let Some(due_date) = self.due_date {
            project.due_date = Some(due_date);
        }
        if let Some(start_date) = self.start_date {
            project.start_date = Some(start_date);
        }
        if let Some(store) = self.store {
            project.store = store;
        }
    }
}

/// Partial update for a task.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<String>,
    pub client_id: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
    pub sync_with_project: Option<bool>,
}

impl TaskPatch {
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(project_id) = self.project_id {
            task.project_id = Some(project_id);
        }
        if let Some(client_id) = self.client_id {
            task.client_id = Some(client_id);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = Some(due_date);
        }
        if let Some(tags) = self.tags {
            task.tags = tags;
        }
        if let Some(sync) = self.sync_with_project {
            task.sync_with_project = sync;
        }
    }
}

/// Partial update for a bid.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BidPatch {
    pub bid_number: Option<String>,
    pub client_id: Option<String>,
    pub items: Option<Vec<LineItem>>,
    pub subtotal: Option<f64>,
    pub tax: Option<f64>,
    pub total: Option<f64>,
    pub tags: Option<Vec<String>>,
    pub status: Option<BidStatus>,
}

impl BidPatch {
    pub fn apply(self, bid: &mut Bid) {
        if let Some(bid_number) = self.bid_number {
            bid.bid_number = bid_number;
        }
        if let Some(client_id) = self.client_id {
            bid.client_id = client_id;
        }
        if let Some(items) = self.items {
            bid.items = items;
        }
        if let Some(subtotal) = self.subtotal {
            bid.subtotal = subtotal;
        }
        if let Some(tax) = self.tax {
            bid.tax = tax;
        }
        if let Some(total) = self.total {
            bid.total = total;
        }
        if let Some(tags) = self.tags {
            bid.tags = tags;
        }
        if let Some(status) = self.status {
            bid.status = status;
        }
    }
}

/// Partial update for a calendar event.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EventPatch {
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub all_day: Option<bool>,
    pub linked_to: Option<EventLink>,
}

impl EventPatch {
    pub fn apply(self, event: &mut Event) {
        if let Some(title) = self.title {
            event.title = title;
        }
        if let Some(start_date) = self.start_date {
            event.start_date = start_date;
        }
        if let Some(end_date) = self.end_date {
            event.end_date = Some(end_date);
        }
        if let Some(all_day) = self.all_day {
            event.all_day = all_day;
        }
        if let Some(linked_to) = self.linked_to {
            event.linked_to = Some(linked_to);
        }
    }
}
