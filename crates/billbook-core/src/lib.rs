//! billbook-core - Core library for billbook
//!
//! Records and resources for the two supported REST collections, the
//! create/edit form controller, the HTTP client that talks to the backend,
//! and the rendering helpers shared by every surface (CLI, interactive shell).

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod models;
pub mod render;
pub mod resource;
pub mod time;
pub mod util;
pub mod view;

pub use controller::{DeleteOutcome, FormController, SearchOutcome, SubmitOutcome};
pub use error::{Error, Result};
pub use form::{FormFields, FormMode, FormPresentation};
pub use models::{Bill, Item, RecordId};
pub use resource::{Bills, Items, Resource, ResourceKind};
pub use time::Clock;
pub use view::View;
