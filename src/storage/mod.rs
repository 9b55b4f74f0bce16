pub mod gateway;

pub use gateway::FileGateway;
