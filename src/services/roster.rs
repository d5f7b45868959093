use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error, info};

use crate::db::StudentStore;
use crate::error::AppError;
use crate::models::{Student, StudentFields};
use crate::notify::{Notifier, Severity};

struct Messages {
    applied: &'static str,
    no_rows: &'static str,
    fault: &'static str,
}

const INSERT_MESSAGES: Messages = Messages {
    applied: "Student inserted correctly",
    no_rows: "No student was inserted",
    fault: "Error inserting student",
};

const UPDATE_MESSAGES: Messages = Messages {
    applied: "Student was successfully updated",
    no_rows: "Student was not updated correctly",
    fault: "Error updating student",
};

const DELETE_MESSAGES: Messages = Messages {
    applied: "Student successfully removed",
    no_rows: "Student was not eliminated",
    fault: "Error removing student",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DraftMode {
    Creating,
    Editing { id: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    LastName,
    Address,
    Telephone,
}

/// Form state: the fields being typed and the student they belong to, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Draft {
    pub fields: StudentFields,
    pub selected: Option<Student>,
}

impl Draft {
    pub fn mode(&self) -> DraftMode {
        match &self.selected {
            Some(student) => DraftMode::Editing { id: student.id },
            None => DraftMode::Creating,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_none() && self.fields == StudentFields::default()
    }
}

/// How a mutation was classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationOutcome {
    Applied,
    NoRowsAffected,
    Faulted,
}

/// Holds the roster snapshot and the draft, and drives the store.
///
/// The roster is only ever replaced wholesale by [`RosterViewModel::load_roster`].
/// After any applied mutation the roster is reloaded and the draft reset; on
/// failure both are left as they were so the user can retry.
pub struct RosterViewModel {
    store: Arc<dyn StudentStore>,
    notifier: Arc<dyn Notifier>,
    roster: Vec<Student>,
    draft: Draft,
}

impl RosterViewModel {
    pub fn new(store: Arc<dyn StudentStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            store,
            notifier,
            roster: Vec::new(),
            draft: Draft::default(),
        }
    }

    pub fn roster(&self) -> &[Student] {
        &self.roster
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn store(&self) -> &Arc<dyn StudentStore> {
        &self.store
    }

    pub async fn load_roster(&mut self) -> Result<(), AppError> {
        self.roster = self.store.select_all().await?;
        debug!("roster reloaded: {} students", self.roster.len());
        Ok(())
    }

    pub fn begin_edit(&mut self, student: &Student) {
        self.draft = Draft {
            fields: student.fields(),
            selected: Some(student.clone()),
        };
    }

    pub fn begin_edit_by_id(&mut self, id: i64) -> Result<(), AppError> {
        let student = self
            .roster
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or(AppError::NotFound)?;
        self.begin_edit(&student);
        Ok(())
    }

    pub fn reset_draft(&mut self) {
        self.draft = Draft::default();
    }

    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        let fields = &mut self.draft.fields;
        match field {
            DraftField::Name => fields.name = value,
            DraftField::LastName => fields.last_name = value,
            DraftField::Address => fields.address = value,
            DraftField::Telephone => fields.telephone = value,
        }
    }

    /// Replaces all four draft fields, keeping create/edit mode.
    pub fn fill_draft(&mut self, fields: StudentFields) {
        self.draft.fields = fields;
    }

    /// Inserts a new student or updates the selected one, depending on the draft mode.
    pub async fn submit(&mut self) -> MutationOutcome {
        let fields = self.draft.fields.clone();

        match self.draft.mode() {
            DraftMode::Creating => {
                let result = self.store.insert(&fields).await;
                self.settle(result, &INSERT_MESSAGES).await
            }
            DraftMode::Editing { id } => {
                let result = self.store.update(id, &fields).await;
                self.settle(result, &UPDATE_MESSAGES).await
            }
        }
    }

    pub async fn remove_student(&mut self, id: i64) -> MutationOutcome {
        let result = self.store.delete(id).await;
        self.settle(result, &DELETE_MESSAGES).await
    }

    async fn settle(&mut self, result: Result<u64, AppError>, messages: &Messages) -> MutationOutcome {
        match result {
            Ok(affected) if affected > 0 => {
                info!("{} ({} row(s))", messages.applied, affected);
                self.notifier.notify(messages.applied, Severity::Brief);
                if let Err(e) = self.load_roster().await {
                    error!("failed to reload roster: {}", e);
                }
                self.reset_draft();
                MutationOutcome::Applied
            }
            Ok(_) => {
                self.notifier.notify(messages.no_rows, Severity::Persistent);
                MutationOutcome::NoRowsAffected
            }
            Err(e) => {
                error!("{}: {}", messages.fault, e);
                self.notifier.notify(messages.fault, Severity::Persistent);
                MutationOutcome::Faulted
            }
        }
    }
}
