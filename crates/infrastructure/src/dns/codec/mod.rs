//! Wire codec for the single-question queries this server answers.

mod decode;
mod encode;

pub use decode::{decode_header, decode_query, DecodedQuery, PacketError};
pub use encode::{encode_response, response_len};

/// Classic DNS-over-UDP payload limit (RFC 1035 §4.2.1).
pub const MAX_UDP_RESPONSE: usize = 512;

/// Largest message a 2-byte TCP length prefix can frame.
pub const MAX_TCP_RESPONSE: usize = 65535;
