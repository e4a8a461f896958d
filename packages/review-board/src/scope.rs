//! Status filter scopes.

use curation_client::ProductStatus;

/// Which records a listing should include.
///
/// `Pending` also covers records that arrived from older data with no status
/// at all (the wire default), and `Disapproved` covers the legacy
/// `"rejected"` spelling; both are folded in when records are decoded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StatusScope {
    All,
    #[default]
    Pending,
    Approved,
    Disapproved,
}

impl StatusScope {
    /// Does a record with this status belong to the scope?
    pub fn matches(&self, status: ProductStatus) -> bool {
        match self {
            Self::All => true,
            Self::Pending => status == ProductStatus::Pending,
            Self::Approved => status == ProductStatus::Approved,
            Self::Disapproved => status == ProductStatus::Disapproved,
        }
    }
}

impl std::str::FromStr for StatusScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(Self::All),
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "disapproved" | "rejected" => Ok(Self::Disapproved),
            other => Err(format!("unknown filter scope: {other:?}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scopes_match_their_status() {
        assert!(StatusScope::All.matches(ProductStatus::Disapproved));
        assert!(StatusScope::Pending.matches(ProductStatus::Pending));
        assert!(!StatusScope::Pending.matches(ProductStatus::Approved));
        assert!(StatusScope::Disapproved.matches(ProductStatus::Disapproved));
    }

    #[test]
    fn parses_the_legacy_rejected_spelling() {
        assert_eq!("rejected".parse::<StatusScope>(), Ok(StatusScope::Disapproved));
        assert_eq!("ALL".parse::<StatusScope>(), Ok(StatusScope::All));
        assert!("nope".parse::<StatusScope>().is_err());
    }
}
