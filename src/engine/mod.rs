//! Collection view-model engine shared by every list page: stores, filtering,
//! aggregation, status tagging and the dashboard layout transaction.

mod store;
mod query;
mod aggregate;
mod status;
mod layout;

pub use store::{Entity, EntityStore, Id};
pub use query::{Filterable, Query, Selection};
pub use aggregate::{round_one_decimal, Aggregator, GroupShare};
pub use status::{resolve, DisplayTag, StatusKind, Tagged};
pub use layout::{DashboardLayout, LayoutStore, WidgetKey};
