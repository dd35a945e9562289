pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod reference;
pub mod session;

pub use engine::evaluate_menu;
pub use error::{MbgError, Result, Warning};
pub use models::{EvaluationResult, MenuSelection, RecipientProfile};
pub use reference::ReferenceData;
