mod args;
mod executor;
mod output;

pub use args::{AutoNumberArgs, Command, Targets, parse_field, parse_service_enum, parse_value};
pub use executor::execute;
pub use output::serialize_to_json;
