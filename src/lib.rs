//! Edge query-string-to-header promoter.
//!
//! A viewer-request hook that moves selected query parameters into request
//! headers and strips them from the query string before the request continues
//! to the origin.

pub mod config;
pub mod event;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod mapping;
pub mod observability;
pub mod transform;

pub use config::schema::HandlerConfig;
pub use event::{CfRequest, ViewerRequestEvent};
pub use handler::{handle_event, handle_json, HandlerError};
pub use http::HttpServer;
pub use lifecycle::shutdown::Shutdown;
pub use mapping::MappingTable;
pub use transform::promote_query_params;
