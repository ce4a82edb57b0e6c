//! Local runtime harness.
//!
//! # Data Flow
//! ```text
//! POST /2015-03-31/functions/function/invocations (edge event JSON)
//!     → request.rs (assign / propagate x-request-id)
//!     → server.rs (size limit, timeout, trace)
//!     → handler::handle_json (promote query parameters)
//!     → mutated request JSON, or the runtime's error envelope
//! ```

pub mod request;
pub mod server;

pub use request::{MakeInvocationId, X_REQUEST_ID};
pub use server::{HttpServer, INVOCATION_PATH};
