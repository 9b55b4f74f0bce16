pub mod config;
pub mod core;
pub mod domain;
pub mod storage;
pub mod utils;

pub use config::cli::Cli;
pub use core::{LinkStore, Store};
pub use domain::{Entity, LinkRecord, Offering, Person};
pub use storage::FileGateway;
pub use utils::error::{Result, RosterError};
