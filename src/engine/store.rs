use log::debug;

pub type Id = u64;

/// A record kind an [`EntityStore`] can hold. The store hands out ids, so a record is
/// built from its validated seed only once the id is known.
pub trait Entity {
    type Seed;

    fn id(&self) -> Id;
    fn from_seed(id: Id, seed: Self::Seed) -> Self;
}

/// Canonical in-memory collection for one entity kind, kept in insertion order.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    records: Vec<T>,
    next_id: Id,
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }

    /// Preloads records; ids handed out afterwards continue past the largest one.
    pub fn from_records(records: Vec<T>) -> Self {
        let next_id = records.iter().map(Entity::id).max().map_or(1, |max| max + 1);
        Self { records, next_id }
    }

    pub fn create(&mut self, seed: T::Seed) -> Id {
        let id = self.next_id;
        self.next_id += 1;
        self.records.push(T::from_seed(id, seed));
        debug!("created record {} ({} total)", id, self.records.len());
        id
    }

    /// Removes the record with `id`. Unknown ids are ignored; returns whether anything
    /// was removed.
    pub fn delete(&mut self, id: Id) -> bool {
        let before = self.records.len();
        self.records.retain(|record| record.id() != id);
        let removed = self.records.len() != before;
        if removed {
            debug!("deleted record {}", id);
        }
        removed
    }

    pub fn list(&self) -> &[T] {
        &self.records
    }

    pub fn get(&self, id: Id) -> Option<&T> {
        self.records.iter().find(|record| record.id() == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Entity> Default for EntityStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: Id,
        text: String,
    }

    impl Entity for Note {
        type Seed = String;

        fn id(&self) -> Id {
            self.id
        }

        fn from_seed(id: Id, text: String) -> Self {
            Self { id, text }
        }
    }

    #[test]
    fn create_appends_in_insertion_order() {
        let mut store = EntityStore::<Note>::new();
        let first = store.create("first".into());
        let second = store.create("second".into());

        assert_ne!(first, second);
        let texts: Vec<&str> = store.list().iter().map(|n| n.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn ids_continue_past_preloaded_records() {
        let mut store = EntityStore::from_records(vec![
            Note { id: 7, text: "a".into() },
            Note { id: 3, text: "b".into() },
        ]);
        assert_eq!(store.create("c".into()), 8);
        assert_eq!(store.create("d".into()), 9);
    }

    #[test]
    fn rapid_creates_never_collide() {
        let mut store = EntityStore::<Note>::new();
        let ids: Vec<Id> = (0..1000).map(|i| store.create(i.to_string())).collect();
        let mut unique = ids.clone();
        unique.sort_unstable();
        unique.dedup();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn deleting_unknown_id_is_a_no_op() {
        let mut store = EntityStore::<Note>::new();
        let id = store.create("keep".into());

        assert!(!store.delete(id + 100));
        assert_eq!(store.len(), 1);
        assert!(store.delete(id));
        assert!(!store.delete(id));
        assert!(store.is_empty());
    }

    #[test]
    fn deleted_ids_are_not_reused() {
        let mut store = EntityStore::<Note>::new();
        let first = store.create("a".into());
        store.delete(first);
        assert_ne!(store.create("b".into()), first);
    }
}
