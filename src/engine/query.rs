use std::fmt;

/// Capability set an entity kind exposes to the predicate composer: the fields that can be
/// filtered by exact value and the fields free-text search looks at.
pub trait Filterable {
    type Dimension: Copy + Eq + fmt::Debug + 'static;

    fn dimension_value(&self, dimension: Self::Dimension) -> &str;
    fn search_fields(&self) -> Vec<&str>;
}

/// One filter dimension's setting: pass everything through, or keep exact matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    All,
    Exact(String),
}

impl Selection {
    /// `"all"` (any case) and the empty string mean no filtering.
    pub fn parse(value: &str) -> Self {
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            Selection::All
        } else {
            Selection::Exact(value.to_string())
        }
    }

    pub fn accepts(&self, value: &str) -> bool {
        match self {
            Selection::All => true,
            Selection::Exact(expected) => expected == value,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, Selection::All)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::parse(value)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => f.write_str("all"),
            Selection::Exact(value) => f.write_str(value),
        }
    }
}

/// A conjunction of dimension filters plus a case-insensitive text search.
#[derive(Debug, Clone)]
pub struct Query<D> {
    filters: Vec<(D, Selection)>,
    search: String,
}

impl<D: Copy + Eq + fmt::Debug> Query<D> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            search: String::new(),
        }
    }

    pub fn filter(mut self, dimension: D, selection: impl Into<Selection>) -> Self {
        self.set_filter(dimension, selection);
        self
    }

    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = text.into();
        self
    }

    /// Replaces whatever was selected for `dimension` before.
    pub fn set_filter(&mut self, dimension: D, selection: impl Into<Selection>) {
        let selection = selection.into();
        match self.filters.iter_mut().find(|(d, _)| *d == dimension) {
            Some(entry) => entry.1 = selection,
            None => self.filters.push((dimension, selection)),
        }
    }

    pub fn set_search(&mut self, text: impl Into<String>) {
        self.search = text.into();
    }

    pub fn search_text(&self) -> &str {
        &self.search
    }

    pub fn search_text_mut(&mut self) -> &mut String {
        &mut self.search
    }

    pub fn selection(&self, dimension: D) -> &Selection {
        static ALL: Selection = Selection::All;
        self.filters
            .iter()
            .find(|(d, _)| *d == dimension)
            .map_or(&ALL, |(_, s)| s)
    }

    pub fn matches<T>(&self, record: &T) -> bool
    where
        T: Filterable<Dimension = D>,
    {
        let dimensions_pass = self
            .filters
            .iter()
            .all(|(dimension, selection)| selection.accepts(record.dimension_value(*dimension)));
        dimensions_pass && self.text_matches(record)
    }

    pub fn apply<'a, T>(&self, records: &'a [T]) -> Vec<&'a T>
    where
        T: Filterable<Dimension = D>,
    {
        records.iter().filter(|record| self.matches(*record)).collect()
    }

    fn text_matches<T>(&self, record: &T) -> bool
    where
        T: Filterable<Dimension = D>,
    {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        record
            .search_fields()
            .iter()
            .any(|field| field.to_lowercase().contains(&needle))
    }
}

impl<D: Copy + Eq + fmt::Debug> Default for Query<D> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Dim {
        Colour,
        Size,
    }

    struct Item {
        name: &'static str,
        colour: &'static str,
        size: &'static str,
    }

    impl Filterable for Item {
        type Dimension = Dim;

        fn dimension_value(&self, dimension: Dim) -> &str {
            match dimension {
                Dim::Colour => self.colour,
                Dim::Size => self.size,
            }
        }

        fn search_fields(&self) -> Vec<&str> {
            vec![self.name, self.colour]
        }
    }

    fn items() -> Vec<Item> {
        vec![
            Item { name: "Red Bucket", colour: "red", size: "small" },
            Item { name: "Blue Barrel", colour: "blue", size: "large" },
            Item { name: "Red Barrel", colour: "red", size: "large" },
        ]
    }

    #[test]
    fn empty_query_matches_everything() {
        let items = items();
        assert_eq!(Query::<Dim>::new().apply(&items).len(), 3);
    }

    #[test]
    fn dimensions_combine_with_and() {
        let items = items();
        let colour_sizes = [("red", "large"), ("red", "small"), ("blue", "large"), ("blue", "small")];
        for (colour, size) in colour_sizes {
            let query = Query::new().filter(Dim::Colour, colour).filter(Dim::Size, size);
            for item in &items {
                let expected = Query::new().filter(Dim::Colour, colour).matches(item)
                    && Query::new().filter(Dim::Size, size).matches(item);
                assert_eq!(query.matches(item), expected, "{} / {}", colour, size);
            }
        }
    }

    #[test]
    fn all_selection_passes_through() {
        let items = items();
        let query = Query::new().filter(Dim::Colour, "all").filter(Dim::Size, "large");
        let names: Vec<&str> = query.apply(&items).iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["Blue Barrel", "Red Barrel"]);
    }

    #[test]
    fn search_ignores_case() {
        let items = items();
        for needle in ["barrel", "BARREL", "BaRrEl"] {
            assert_eq!(Query::<Dim>::new().search(needle).apply(&items).len(), 2);
        }
    }

    #[test]
    fn blank_search_matches_everything() {
        let items = items();
        assert_eq!(Query::<Dim>::new().search("   ").apply(&items).len(), 3);
    }

    #[test]
    fn set_filter_replaces_previous_selection() {
        let mut query = Query::new().filter(Dim::Colour, "red");
        query.set_filter(Dim::Colour, "blue");
        assert_eq!(query.selection(Dim::Colour), &Selection::Exact("blue".into()));
        assert!(query.selection(Dim::Size).is_all());
    }
}
