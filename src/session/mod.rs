mod logbook;
mod manager;

pub use logbook::{LogEntry, Logbook, COMPLIANT_STATUS};
pub use manager::Session;
