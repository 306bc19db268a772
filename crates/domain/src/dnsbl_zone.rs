//! DNSBL zone naming
//!
//! A DNSBL publishes an IPv4 address `a.b.c.d` as the name
//! `d.c.b.a.<zone>`: octets reversed, then the zone apex appended.

use crate::errors::DomainError;
use crate::normalized_name::NormalizedName;
use smallvec::SmallVec;
use std::net::Ipv4Addr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsblZone {
    apex: NormalizedName,
}

impl DnsblZone {
    pub fn new(zone: &str) -> Result<Self, DomainError> {
        let apex = NormalizedName::parse(zone)?;
        if apex.is_root() {
            return Err(DomainError::InvalidName(
                "DNSBL zone cannot be the root".to_string(),
            ));
        }
        Ok(Self { apex })
    }

    pub fn apex(&self) -> &NormalizedName {
        &self.apex
    }

    pub fn contains(&self, name: &NormalizedName) -> bool {
        name.is_subdomain_of(&self.apex)
    }

    /// `1.2.3.4` -> `4.3.2.1.<zone>`
    pub fn query_name(&self, ip: Ipv4Addr) -> Result<NormalizedName, DomainError> {
        let [a, b, c, d] = ip.octets();
        NormalizedName::parse(&format!("{}.{}.{}.{}.{}", d, c, b, a, self.apex))
    }

    /// `4.3.2.1.<zone>` -> `1.2.3.4`; `None` for anything that is not
    /// exactly four decimal octets under the apex.
    pub fn address_of(&self, name: &NormalizedName) -> Option<Ipv4Addr> {
        let prefix = name
            .as_str()
            .strip_suffix(self.apex.as_str())?
            .strip_suffix('.')?;

        let octets: SmallVec<[u8; 4]> = prefix
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    None
                } else {
                    part.parse::<u8>().ok()
                }
            })
            .collect::<Option<_>>()?;

        match octets.as_slice() {
            [d, c, b, a] => Some(Ipv4Addr::new(*a, *b, *c, *d)),
            _ => None,
        }
    }
}
