pub mod links;
pub mod store;

pub use links::LinkStore;
pub use store::Store;
