//! Sprachreise engine library.
//!
//! Runs the story mode for one player session on top of `sprachreise-domain`.
//!
//! ## Structure
//!
//! - `stores/` - Session state shared by the use cases
//! - `use_cases/` - Catalog loading, session start, scenario launch, completion
//! - `infrastructure/` - Ports and their adapters (catalog, persistence, clock, settings)
//! - `app` - Application composition

pub mod app;
pub mod infrastructure;
pub mod stores;
pub mod use_cases;

pub use app::App;
