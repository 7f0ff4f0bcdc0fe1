//! doc-link-guardian: checks the links of a markdown documentation tree.
//!
//! Local references must point at existing files inside the source root;
//! external URLs must answer with a status in `[200, 400)`. External checks
//! are spread into domain-distinct waves so no single host sees a burst.

pub mod checker;
pub mod config;
pub mod error;
pub mod logger;
pub mod pipeline;
pub mod render;
pub mod report;

pub use config::Config;
pub use error::{CheckError, Result};
pub use pipeline::{collect_links, run, Scope};
pub use report::{CheckKind, FailureReason, Outcome, Report, ValidationResult};
