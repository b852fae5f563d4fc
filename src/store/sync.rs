//! Cross-entity synchronization rules.
//!
//! Each rule is a one-directional cascade, fired as a side effect of one
//! specific mutation. There is no dependency graph or scheduler: every
//! rule is hand-written, scoped to a single relationship, and runs
//! synchronously before the mutation returns. Rules write their target
//! collections directly and never re-enter the public mutation API, so a
//! cascade cannot trigger another cascade; the date rules additionally
//! skip values that are already current.
//!
//! The cascades:
//! 1. order status -> linked task statuses (fixed mapping table)
//! 2. order dates -> linked task due dates (fill-if-empty) and linked
//!    event dates (overwrite)
//! 3. order tags -> linked task tags (wholesale replace)
//! 4. task update -> order completion rollup
//! 5. bid acceptance -> one new order plus one kickoff task
//! 6. event start date -> linked order start date or task due date

use chrono::{DateTime, Utc};

use super::{generate_id, Store};
use crate::models::{
    Bid, EventLink, LinkKind, Pricing, Project, ProjectStatus, Task, TaskPriority, TaskStatus,
};
use crate::Result;

/// Map an order's workflow status onto the task vocabulary.
///
/// This table is fixed. It is independent of the user-configurable status
/// catalog in the business config: a catalog id the table does not know
/// (carried as `Custom`) falls through to `pending`.
pub(crate) fn map_project_status(status: &ProjectStatus) -> TaskStatus {
    match status {
        ProjectStatus::Pending => TaskStatus::Pending,
        ProjectStatus::Designing
        | ProjectStatus::Production
        | ProjectStatus::Printing
        | ProjectStatus::Finishing => TaskStatus::InProgress,
        ProjectStatus::Ready | ProjectStatus::Delivered | ProjectStatus::Completed => {
            TaskStatus::Completed
        }
        ProjectStatus::Cancelled => TaskStatus::Cancelled,
        ProjectStatus::Custom(_) => TaskStatus::Pending,
    }
}

impl Store {
    /// Rule 1: overwrite the status of every task that follows this order.
    pub(crate) fn sync_project_status_to_tasks(&mut self, project: &Project) -> Result<()> {
        let mapped = map_project_status(&project.status);
        let mut changed = false;
        for task in self.tasks.iter_mut() {
            if task.project_id.as_deref() == Some(project.id.as_str()) && task.sync_with_project {
                task.status = mapped;
                task.updated_at = Utc::now();
                changed = true;
            }
        }
        if changed {
            self.persist_tasks()?;
        }
        Ok(())
    }

    /// Rule 2: fan the order's dates out to its tasks and events.
    ///
    /// Task due dates only fill an empty slot; a task's own due date is
    /// never overwritten. Linked event dates are overwritten, with equal
    /// dates skipped.
    pub(crate) fn sync_project_dates_to_related(&mut self, project: &Project) -> Result<()> {
        let mut tasks_changed = false;
        if let Some(due) = project.due_date {
            for task in self.tasks.iter_mut() {
                if task.project_id.as_deref() == Some(project.id.as_str())
                    && task.sync_with_project
                    && task.due_date.is_none()
                {
                    task.due_date = Some(due);
                    task.updated_at = Utc::now();
                    tasks_changed = true;
                }
            }
        }
        if tasks_changed {
            self.persist_tasks()?;
        }

        let mut events_changed = false;
        for event in self.events.iter_mut() {
            let linked = matches!(
                &event.linked_to,
                Some(link) if link.kind == LinkKind::Project && link.id == project.id
            );
            if !linked {
                continue;
            }
            if event.end_date != project.due_date {
                event.end_date = project.due_date;
                event.updated_at = Utc::now();
                events_changed = true;
            }
            if let Some(start) = project.start_date {
                if event.start_date != start {
                    event.start_date = start;
                    event.updated_at = Utc::now();
                    events_changed = true;
                }
            }
        }
        if events_changed {
            self.persist_events()?;
        }
        Ok(())
    }

    /// Rule 3: replace the tags of every task that follows this order.
    pub(crate) fn sync_project_tags_to_tasks(&mut self, project: &Project) -> Result<()> {
        let mut changed = false;
        for task in self.tasks.iter_mut() {
            if task.project_id.as_deref() == Some(project.id.as_str()) && task.sync_with_project {
                task.tags = project.tags.clone();
                task.updated_at = Utc::now();
                changed = true;
            }
        }
        if changed {
            self.persist_tasks()?;
        }
        Ok(())
    }

    /// Rule 4: mark the order completed once every one of its tasks is.
    ///
    /// Re-evaluates the full task list on every task update; no partial
    /// completion counts are tracked.
    pub(crate) fn sync_task_rollup(&mut self, project_id: &str) -> Result<()> {
        let mut seen_any = false;
        let mut all_completed = true;
        for task in &self.tasks {
            if task.project_id.as_deref() == Some(project_id) {
                seen_any = true;
                if task.status != TaskStatus::Completed {
                    all_completed = false;
                    break;
                }
            }
        }
        if !seen_any || !all_completed {
            return Ok(());
        }

        let Some(project) = self.projects.iter_mut().find(|p| p.id == project_id) else {
            return Ok(());
        };
        if project.status == ProjectStatus::Completed {
            return Ok(());
        }
        tracing::debug!(order = %project.id, "all tasks completed, rolling up order status");
        project.status = ProjectStatus::Completed;
        project.updated_at = Utc::now();
        self.persist_projects()
    }

    /// Rule 5: convert an accepted bid into one order and one kickoff task.
    ///
    /// Fire-and-forget: the two creations persist independently and are
    /// not rolled back if the second one fails.
    pub(crate) fn convert_bid_to_project(&mut self, bid: &Bid) -> Result<()> {
        let mut project = Project::new(
            generate_id("ORD", &bid.bid_number),
            bid.client_id.clone(),
        );
        project.items = bid.items.clone();
        project.pricing = Pricing {
            subtotal: bid.subtotal,
            tax: bid.tax,
            total: bid.total,
            paid: 0.0,
            balance: bid.total,
        };
        project.bid_id = Some(bid.id.clone());
        let project = self.add_project(project)?;
        tracing::debug!(bid = %bid.id, order = %project.id, "bid accepted, order created");

        let mut task = Task::new(format!("Start project for {}", bid.client_id));
        task.project_id = Some(project.id.clone());
        task.client_id = Some(bid.client_id.clone());
        task.priority = TaskPriority::High;
        task.due_date = Some(Utc::now() + chrono::Duration::days(7));
        self.add_task(task)?;
        Ok(())
    }

    /// Rule 6: push an event's start date into its linked entity.
    ///
    /// An order link feeds the start date; a task link feeds the due date.
    /// Equal dates are skipped, so this and rule 2 cannot re-fire each
    /// other.
    pub(crate) fn sync_event_to_linked(
        &mut self,
        link: &EventLink,
        start: DateTime<Utc>,
    ) -> Result<()> {
        match link.kind {
            LinkKind::Project => {
                let Some(project) = self.projects.iter_mut().find(|p| p.id == link.id) else {
                    return Ok(());
                };
                if project.start_date == Some(start) {
                    return Ok(());
                }
                project.start_date = Some(start);
                project.updated_at = Utc::now();
                self.persist_projects()
            }
            LinkKind::Task => {
                let Some(task) = self.tasks.iter_mut().find(|t| t.id == link.id) else {
                    return Ok(());
                };
                if task.due_date == Some(start) {
                    return Ok(());
                }
                task.due_date = Some(start);
                task.updated_at = Utc::now();
                self.persist_tasks()
            }
        }
    }
}
