use crate::dns_message::{label_octets, MAX_LABEL_LEN, MAX_NAME_WIRE_LEN};
use crate::errors::DomainError;
use compact_str::CompactString;
use std::fmt;

/// Canonical matching key for a queried name.
///
/// ASCII letters are folded to lowercase, a single trailing root dot is
/// removed and every label is non-empty. Non-ASCII octets pass through
/// unchanged, as do `\DDD` escapes of octets that are not valid UTF-8.
/// Length limits apply to the wire octets, so an escape counts as one
/// octet. The root name is represented by the empty key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedName(CompactString);

impl NormalizedName {
    pub fn parse(name: &str) -> Result<Self, DomainError> {
        let trimmed = name.strip_suffix('.').unwrap_or(name);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }

        let mut key = CompactString::with_capacity(trimmed.len());
        // terminating root label
        let mut wire_len = 1;
        for (i, label) in trimmed.split('.').enumerate() {
            if label.is_empty() {
                return Err(DomainError::InvalidName(format!(
                    "empty label in '{}'",
                    name
                )));
            }
            let octets = label_octets(label)?.len();
            if octets > MAX_LABEL_LEN {
                return Err(DomainError::InvalidName(format!(
                    "label longer than {} octets in '{}'",
                    MAX_LABEL_LEN, name
                )));
            }
            wire_len += octets + 1;
            if i > 0 {
                key.push('.');
            }
            key.extend(label.chars().map(|c| c.to_ascii_lowercase()));
        }

        if wire_len > MAX_NAME_WIRE_LEN {
            return Err(DomainError::InvalidName(format!(
                "name longer than {} octets",
                MAX_NAME_WIRE_LEN
            )));
        }

        Ok(Self(key))
    }

    pub fn root() -> Self {
        Self(CompactString::const_new(""))
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.split('.').filter(|label| !label.is_empty())
    }

    pub fn label_count(&self) -> usize {
        if self.is_root() {
            0
        } else {
            self.0.split('.').count()
        }
    }

    /// The name with its leftmost label removed, `None` for single-label
    /// names and the root.
    pub fn parent(&self) -> Option<NormalizedName> {
        let (_, rest) = self.0.split_once('.')?;
        Some(Self(CompactString::from(rest)))
    }

    /// `true` when `self` equals `ancestor` or lies beneath it.
    pub fn is_subdomain_of(&self, ancestor: &NormalizedName) -> bool {
        if ancestor.is_root() {
            return true;
        }
        match self.0.strip_suffix(ancestor.as_str()) {
            Some("") => true,
            Some(prefix) => prefix.ends_with('.'),
            None => false,
        }
    }
}

impl fmt::Display for NormalizedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_root() {
            f.write_str(".")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl AsRef<str> for NormalizedName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl TryFrom<&str> for NormalizedName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}
