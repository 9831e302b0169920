// ── Core identity type ──
//
// CompanyId wraps the server-assigned identifier string. The client never
// inspects its contents -- uniqueness within a fetched collection is the
// only property it relies on.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque identifier for a company record.
///
/// Assigned by the remote service and treated as a stable, unique,
/// never-mutated string on the client side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CompanyId(String);

impl CompanyId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for CompanyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for CompanyId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

impl From<String> for CompanyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for CompanyId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn id_round_trips_display() {
        let id = CompanyId::from("665f1c2ab7e2d90012aa41c7");
        assert_eq!(id.to_string(), "665f1c2ab7e2d90012aa41c7");
    }

    #[test]
    fn id_from_str() {
        let id: CompanyId = "abc".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
