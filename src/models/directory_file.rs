use chrono::NaiveDate;
use serde::Serialize;

use crate::engine::{Entity, Id};

labelled_enum! {
    FileType {
        Pdf => "PDF",
        Excel => "Excel",
        Archive => "Archive",
        Image => "Image",
        Document => "Document",
    }
}

impl FileType {
    /// Classifies a file by its extension; anything unrecognised is a Document.
    pub fn from_file_name(name: &str) -> Self {
        let extension = match name.rsplit_once('.') {
            Some((_, ext)) => ext.to_ascii_lowercase(),
            None => return FileType::Document,
        };
        match extension.as_str() {
            "pdf" => FileType::Pdf,
            "xlsx" | "xls" => FileType::Excel,
            "zip" | "rar" => FileType::Archive,
            "jpg" | "jpeg" | "png" => FileType::Image,
            _ => FileType::Document,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DirectoryFile {
    pub id: Id,
    pub name: String,
    pub file_type: FileType,
    pub size: String,
    pub project: String,
    pub category: String,
    pub uploaded_by: String,
    pub upload_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryFileSeed {
    pub name: String,
    pub size_bytes: u64,
    pub project: String,
    pub category: String,
    pub uploaded_by: String,
    pub upload_date: NaiveDate,
}

/// Human-readable size in powers of 1024 with at most two decimals ("2.5 MB", "892 KB").
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    let rounded = format!("{:.2}", value);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[unit])
}

impl Entity for DirectoryFile {
    type Seed = DirectoryFileSeed;

    fn id(&self) -> Id {
        self.id
    }

    fn from_seed(id: Id, seed: DirectoryFileSeed) -> Self {
        Self {
            id,
            file_type: FileType::from_file_name(&seed.name),
            size: format_file_size(seed.size_bytes),
            name: seed.name,
            project: seed.project,
            category: seed.category,
            uploaded_by: seed.uploaded_by,
            upload_date: seed.upload_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_type_follows_extension() {
        assert_eq!(FileType::from_file_name("Project Blueprint.pdf"), FileType::Pdf);
        assert_eq!(FileType::from_file_name("costs.XLS"), FileType::Excel);
        assert_eq!(FileType::from_file_name("Site Photos.zip"), FileType::Archive);
        assert_eq!(FileType::from_file_name("front.jpeg"), FileType::Image);
        assert_eq!(FileType::from_file_name("notes.txt"), FileType::Document);
        assert_eq!(FileType::from_file_name("README"), FileType::Document);
    }

    #[test]
    fn sizes_scale_by_1024() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(913_408), "892 KB");
        assert_eq!(format_file_size(2_621_440), "2.5 MB");
        assert_eq!(format_file_size(1_288_490), "1.23 MB");
    }
}
