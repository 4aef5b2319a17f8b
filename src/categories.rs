use log::warn;

use crate::error::{CategoryError, DuplicateError, ValidationError};

/// Material categories. Names are unique and kept in the order they were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRegistry {
    names: Vec<String>,
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new(["Civil", "Electrical", "Finishing"])
    }
}

impl CategoryRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut registry = Self { names: Vec::new() };
        for name in names {
            let name = name.into();
            if !registry.contains(&name) {
                registry.names.push(name);
            }
        }
        registry
    }

    /// Adds a trimmed category name. Blank names and exact duplicates are rejected and
    /// leave the registry unchanged.
    pub fn add(&mut self, name: &str) -> Result<String, CategoryError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::single("name", "Category name is required").into());
        }
        if self.contains(name) {
            warn!("rejected duplicate category {:?}", name);
            return Err(DuplicateError(name.to_string()).into());
        }
        self.names.push(name.to_string());
        Ok(name.to_string())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|existing| existing == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_add_is_rejected() {
        let mut registry = CategoryRegistry::new(["Civil", "Electrical"]);
        let before = registry.clone();

        let err = registry.add("Civil").unwrap_err();
        assert_eq!(err, CategoryError::Duplicate(DuplicateError("Civil".into())));
        assert_eq!(registry, before);
    }

    #[test]
    fn names_are_trimmed_before_comparison() {
        let mut registry = CategoryRegistry::new(["Civil"]);
        assert!(matches!(registry.add("  Civil "), Err(CategoryError::Duplicate(_))));
        assert_eq!(registry.add(" Plumbing ").unwrap(), "Plumbing");
        assert_eq!(registry.names(), &["Civil".to_string(), "Plumbing".to_string()]);
    }

    #[test]
    fn blank_names_are_invalid() {
        let mut registry = CategoryRegistry::default();
        assert!(matches!(registry.add("   "), Err(CategoryError::Invalid(_))));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let mut registry = CategoryRegistry::new(["Civil"]);
        assert!(registry.add("civil").is_ok());
    }
}
