//! HTTP server: state, handlers, diagnostics, router and builder

pub mod builder;
pub mod diagnostics;
pub mod handlers;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use diagnostics::DiagnosticReport;
pub use router::build_router;
pub use state::AppState;
