//! Ferrous DNSBL Domain Layer
pub mod config;
pub mod dns_message;
pub mod dns_record;
pub mod dnsbl_zone;
pub mod errors;
pub mod listing;
pub mod normalized_name;

pub use config::{
    BlocklistBackend, BlocklistConfig, CliOverrides, Config, ConfigError, LogFormat,
    LoggingConfig, NotListedPolicy, ResponseConfig, ServerConfig,
};
pub use dns_message::{DnsHeader, Question, ResponseCode};
pub use dns_record::{RData, RecordType, ResourceRecord};
pub use dnsbl_zone::DnsblZone;
pub use errors::DomainError;
pub use listing::ListingDecision;
pub use normalized_name::NormalizedName;
