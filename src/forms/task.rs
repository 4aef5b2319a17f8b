use super::{parse_date, require, FieldSpec, FormDraft};
use crate::error::ValidationError;
use crate::models::{TaskSeed, TaskStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub description: String,
    pub assigned_to: String,
    pub due_date: String,
    /// Blank means Pending.
    pub status: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("name", "Task Name"),
    FieldSpec::optional("description", "Description"),
    FieldSpec::required("assigned_to", "Assigned To"),
    FieldSpec::required("due_date", "Due Date (YYYY-MM-DD)"),
    FieldSpec::optional("status", "Status"),
];

impl TaskDraft {
    pub fn validate(&self) -> Result<TaskSeed, ValidationError> {
        let mut errors = ValidationError::new();
        require(&mut errors, "name", &self.name, "Task name is required");
        require(&mut errors, "assigned_to", &self.assigned_to, "Assignee is required");

        let due_date = if self.due_date.trim().is_empty() {
            errors.push("due_date", "Due date is required");
            None
        } else {
            let parsed = parse_date(&self.due_date);
            if parsed.is_none() {
                errors.push("due_date", "Use the YYYY-MM-DD format");
            }
            parsed
        };

        let status = match self.status.trim() {
            "" => Some(TaskStatus::Pending),
            value => {
                let parsed = value.parse::<TaskStatus>().ok();
                if parsed.is_none() {
                    errors.push("status", format!("Unknown status `{}`", value));
                }
                parsed
            }
        };

        errors.finish()?;
        Ok(TaskSeed {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            assigned_to: self.assigned_to.trim().to_string(),
            due_date: due_date.unwrap_or_default(),
            status: status.unwrap_or(TaskStatus::Pending),
        })
    }
}

impl FormDraft for TaskDraft {
    const TITLE: &'static str = "Add New Task";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.name,
            1 => &self.description,
            2 => &self.assigned_to,
            3 => &self.due_date,
            4 => &self.status,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.name),
            1 => Some(&mut self.description),
            2 => Some(&mut self.assigned_to),
            3 => Some(&mut self.due_date),
            4 => Some(&mut self.status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_assignee_and_due_date_are_required() {
        let error = TaskDraft::default().validate().unwrap_err();
        let fields: Vec<&str> = error.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "assigned_to", "due_date"]);
    }

    #[test]
    fn new_tasks_start_pending() {
        let draft = TaskDraft {
            name: "Plastering".into(),
            assigned_to: "Ali Hassan".into(),
            due_date: "2025-06-01".into(),
            ..Default::default()
        };
        assert_eq!(draft.validate().unwrap().status, TaskStatus::Pending);
    }
}
