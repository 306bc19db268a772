mod dns;
mod repositories;

pub use dns::build_handler;
pub use repositories::build_store;
