use std::collections::BTreeMap;

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::LayoutError;

labelled_enum! {
    /// The summary cards the dashboard can show.
    WidgetKey {
        ProjectInfo => "Project Information Card",
        MaterialStatus => "Material Status Card",
        AuditLogs => "Audit Logs Card",
        QuickOverview => "Quick Overview Card",
        QuickActions => "Quick Actions Card",
        Invoices => "Invoices Card",
    }
}

impl WidgetKey {
    /// Stable key used in serialized layouts.
    pub fn key(&self) -> &'static str {
        match self {
            WidgetKey::ProjectInfo => "projectInfo",
            WidgetKey::MaterialStatus => "materialStatus",
            WidgetKey::AuditLogs => "auditLogs",
            WidgetKey::QuickOverview => "quickOverview",
            WidgetKey::QuickActions => "quickActions",
            WidgetKey::Invoices => "invoices",
        }
    }
}

/// Serializes as `{ "projectInfo": true, ... }`, keyed by [`WidgetKey::key`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    visible: BTreeMap<WidgetKey, bool>,
}

impl Default for DashboardLayout {
    fn default() -> Self {
        Self {
            visible: WidgetKey::ALL.iter().map(|key| (*key, true)).collect(),
        }
    }
}

impl Serialize for DashboardLayout {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.visible.len()))?;
        for (key, visible) in &self.visible {
            map.serialize_entry(key.key(), visible)?;
        }
        map.end()
    }
}

impl DashboardLayout {
    pub fn is_visible(&self, key: WidgetKey) -> bool {
        self.visible.get(&key).copied().unwrap_or(false)
    }

    /// Visible widgets in display order.
    pub fn visible_widgets(&self) -> Vec<WidgetKey> {
        WidgetKey::ALL
            .iter()
            .copied()
            .filter(|key| self.is_visible(*key))
            .collect()
    }

    fn toggle(&mut self, key: WidgetKey) -> bool {
        let value = !self.is_visible(key);
        self.visible.insert(key, value);
        value
    }
}

/// Live widget visibility plus the draft of the one editor session that may be open.
/// The live layout only changes on `commit`.
#[derive(Debug, Clone, Default)]
pub struct LayoutStore {
    live: DashboardLayout,
    draft: Option<DashboardLayout>,
}

impl LayoutStore {
    pub fn new(live: DashboardLayout) -> Self {
        Self { live, draft: None }
    }

    pub fn live(&self) -> &DashboardLayout {
        &self.live
    }

    pub fn draft(&self) -> Option<&DashboardLayout> {
        self.draft.as_ref()
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn open_editor(&mut self) -> Result<&DashboardLayout, LayoutError> {
        if self.draft.is_some() {
            return Err(LayoutError::AlreadyEditing);
        }
        Ok(self.draft.insert(self.live.clone()))
    }

    /// Flips `key` in the draft and returns its new visibility.
    pub fn toggle(&mut self, key: WidgetKey) -> Result<bool, LayoutError> {
        let draft = self.draft.as_mut().ok_or(LayoutError::NotEditing)?;
        Ok(draft.toggle(key))
    }

    pub fn commit(&mut self) -> Result<&DashboardLayout, LayoutError> {
        let draft = self.draft.take().ok_or(LayoutError::NotEditing)?;
        self.live = draft;
        Ok(&self.live)
    }

    /// Drops the draft. Cancelling with no editor open does nothing.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_widget_starts_visible() {
        let layout = DashboardLayout::default();
        assert_eq!(layout.visible_widgets(), WidgetKey::ALL.to_vec());
    }

    #[test]
    fn cancel_keeps_the_live_layout() {
        let mut store = LayoutStore::default();
        store.open_editor().unwrap();
        assert_eq!(store.toggle(WidgetKey::Invoices), Ok(false));
        assert!(store.live().is_visible(WidgetKey::Invoices));

        store.cancel();
        assert!(!store.is_editing());
        assert!(store.live().is_visible(WidgetKey::Invoices));
    }

    #[test]
    fn commit_replaces_the_live_layout() {
        let mut store = LayoutStore::default();
        store.open_editor().unwrap();
        store.toggle(WidgetKey::Invoices).unwrap();
        store.toggle(WidgetKey::AuditLogs).unwrap();
        store.toggle(WidgetKey::AuditLogs).unwrap();

        let live = store.commit().unwrap();
        assert!(!live.is_visible(WidgetKey::Invoices));
        assert!(live.is_visible(WidgetKey::AuditLogs));
        assert!(!store.is_editing());
    }

    #[test]
    fn only_one_editor_at_a_time() {
        let mut store = LayoutStore::default();
        store.open_editor().unwrap();
        assert_eq!(store.open_editor().unwrap_err(), LayoutError::AlreadyEditing);
    }

    #[test]
    fn toggling_without_an_editor_is_rejected() {
        let mut store = LayoutStore::default();
        assert_eq!(store.toggle(WidgetKey::QuickActions), Err(LayoutError::NotEditing));
        assert_eq!(store.commit().unwrap_err(), LayoutError::NotEditing);
        assert!(store.live().is_visible(WidgetKey::QuickActions));
    }

    #[test]
    fn reopening_starts_from_the_committed_layout() {
        let mut store = LayoutStore::default();
        store.open_editor().unwrap();
        store.toggle(WidgetKey::ProjectInfo).unwrap();
        store.commit().unwrap();

        let draft = store.open_editor().unwrap();
        assert!(!draft.is_visible(WidgetKey::ProjectInfo));
    }

    #[test]
    fn layout_serializes_under_stable_keys() {
        let mut store = LayoutStore::default();
        store.open_editor().unwrap();
        store.toggle(WidgetKey::Invoices).unwrap();
        let live = store.commit().unwrap();

        let json = serde_json::to_value(live).unwrap();
        assert_eq!(json["projectInfo"], serde_json::json!(true));
        assert_eq!(json["invoices"], serde_json::json!(false));
        assert_eq!(json.as_object().map(|o| o.len()), Some(6));
    }
}
