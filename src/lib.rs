pub mod api;
pub mod application;
pub mod cli;
pub mod domain;
pub mod io;
pub mod logging;

pub use api::{Client, TransactionApi};
pub use domain::*;
