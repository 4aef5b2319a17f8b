use std::path::Path;

use chrono::NaiveDate;

use super::{require, split_list, FieldSpec, FormDraft};
use crate::error::ValidationError;
use crate::models::DirectoryFileSeed;

/// A file picked for upload: only its name and size are kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub size_bytes: u64,
}

/// Files already picked, plus where they are filed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadDraft {
    pub files: Vec<FileUpload>,
    pub project: String,
    pub category: String,
}

impl UploadDraft {
    /// One seed per picked file, all filed under the same project and category.
    pub fn validate(
        &self,
        uploaded_by: &str,
        today: NaiveDate,
    ) -> Result<Vec<DirectoryFileSeed>, ValidationError> {
        let mut errors = ValidationError::new();
        if self.files.is_empty() {
            errors.push("files", "Select at least one file");
        }
        require(&mut errors, "project", &self.project, "Project is required");
        require(&mut errors, "category", &self.category, "Category is required");
        errors.finish()?;

        Ok(self
            .files
            .iter()
            .map(|file| DirectoryFileSeed {
                name: file.name.clone(),
                size_bytes: file.size_bytes,
                project: self.project.trim().to_string(),
                category: self.category.trim().to_string(),
                uploaded_by: uploaded_by.to_string(),
                upload_date: today,
            })
            .collect())
    }
}

/// Text form for picking files by path on the terminal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryDraft {
    /// Comma separated paths.
    pub paths: String,
    pub project: String,
    pub category: String,
}

const FIELDS: &[FieldSpec] = &[
    FieldSpec::required("files", "Files (comma separated paths)"),
    FieldSpec::required("project", "Project"),
    FieldSpec::required("category", "Category"),
];

impl DirectoryDraft {
    /// Resolves every path through `probe`, which returns the file's size when it exists.
    /// Unreadable paths are reported together with any other blank field.
    pub fn to_upload(&self, probe: impl Fn(&str) -> Option<u64>) -> Result<UploadDraft, ValidationError> {
        let mut files = Vec::new();
        let mut missing = Vec::new();
        for path in split_list(&self.paths) {
            match probe(&path) {
                Some(size_bytes) => {
                    let name = Path::new(&path)
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_else(|| path.clone());
                    files.push(FileUpload { name, size_bytes });
                }
                None => missing.push(path),
            }
        }
        let mut errors = ValidationError::new();
        if !missing.is_empty() {
            errors.push("files", format!("Cannot read {}", missing.join(", ")));
        } else if files.is_empty() {
            errors.push("files", "Select at least one file");
        }
        require(&mut errors, "project", &self.project, "Project is required");
        require(&mut errors, "category", &self.category, "Category is required");
        errors.finish()?;

        Ok(UploadDraft {
            files,
            project: self.project.clone(),
            category: self.category.clone(),
        })
    }
}

impl FormDraft for DirectoryDraft {
    const TITLE: &'static str = "Add to Directory";

    fn fields() -> &'static [FieldSpec] {
        FIELDS
    }

    fn field(&self, index: usize) -> &str {
        match index {
            0 => &self.paths,
            1 => &self.project,
            2 => &self.category,
            _ => "",
        }
    }

    fn field_mut(&mut self, index: usize) -> Option<&mut String> {
        match index {
            0 => Some(&mut self.paths),
            1 => Some(&mut self.project),
            2 => Some(&mut self.category),
            _ => None,
        }
    }
}
