pub mod cli;

pub use cli::{Cli, Command, LinkCommand, OfferingCommand, PersonCommand};
