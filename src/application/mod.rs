// Application layer - use cases and presentation state.
// Front ends drive `LedgerService` for I/O and keep their screen state in
// `view_state::DashboardState`.

pub mod error;
pub mod service;
pub mod view_state;

pub use error::*;
pub use service::*;
