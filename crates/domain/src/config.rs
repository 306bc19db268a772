pub mod blocklist;
pub mod errors;
pub mod logging;
pub mod response;
pub mod root;
pub mod server;

pub use blocklist::{BlocklistBackend, BlocklistConfig};
pub use errors::ConfigError;
pub use logging::{LogFormat, LoggingConfig};
pub use response::{NotListedPolicy, ResponseConfig};
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
