pub mod client;
pub mod commands;
pub mod error;
pub mod logging;
pub mod model;
pub mod service;

pub use client::{RestClient, RestConfig, SheetClient};
pub use error::{BulkEditError, ClientError, ErrorKind};
pub use service::{BatchResult, BulkEditService, SheetFailure};
