mod builtin;
mod loader;
mod tables;

pub use builtin::{load_builtin, BUILTIN_SOURCES};
pub use loader::{coerce_flag, coerce_number, load_from_dir, parse_tables, TableSources};
pub use tables::{AgeBand, EducationGroup, ReferenceData};
