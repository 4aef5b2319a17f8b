//! Site administration dashboard: in-memory records for projects, materials, invoices,
//! the team and the file directory, with the filtering, totals and status colouring
//! every list page is built from.

pub mod error;
#[macro_use]
pub mod models;
pub mod engine;
pub mod forms;
pub mod categories;
pub mod auth;
pub mod config;
pub mod seed;
pub mod listing;
pub mod summary;
pub mod dashboard;

pub use auth::{Authenticator, Session};
pub use dashboard::Dashboard;
