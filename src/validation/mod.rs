//! Query validation.
//!
//! A query is accepted when it is empty (the caller's own address) or matches
//! one of the address patterns:
//! - IPv4: four dot-separated groups of 1-3 digits (no range check)
//! - IPv6 (simplified): 2-8 colon-separated groups of 0-4 hex digits
//! - Domain: one label of 1-63 chars not starting or ending with a hyphen,
//!   a dot, and a top-level segment of 2+ letters
//!
//! The patterns are loose: `999.1.1.1` passes and is left for the
//! lookup service to reject.

use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::ValidationError;

static IPV4_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{1,3}\.){3}[0-9]{1,3}$").expect("IPv4 pattern is valid")
});

static IPV6_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9a-fA-F]{0,4}:){1,7}[0-9a-fA-F]{0,4}$").expect("IPv6 pattern is valid")
});

// `regex` has no lookaround, so the hyphen rules for the label live in `is_domain`.
static DOMAIN_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9-]{1,63})\.[A-Za-z]{2,}$").expect("domain pattern is valid")
});

/// What a validated query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Empty query: resolve the caller's own address.
    SelfAddress,
    Ipv4,
    Ipv6,
    Domain,
}

/// Returns true if `query` has the IPv4 shape.
pub fn is_ipv4(query: &str) -> bool {
    IPV4_PATTERN.is_match(query)
}

/// Returns true if `query` has the simplified IPv6 shape.
pub fn is_ipv6(query: &str) -> bool {
    IPV6_PATTERN.is_match(query)
}

/// Returns true if `query` is a single label followed by an alphabetic TLD.
pub fn is_domain(query: &str) -> bool {
    let Some(caps) = DOMAIN_PATTERN.captures(query) else {
        return false;
    };
    let label = &caps[1];
    !label.starts_with('-') && !label.ends_with('-')
}

/// Classifies a query, rejecting anything that matches no accepted pattern.
///
/// # Errors
///
/// Returns `ValidationError::InvalidFormat` when no pattern matches (domains
/// only count when `allow_domains` is set).
pub fn classify_query(query: &str, allow_domains: bool) -> Result<QueryKind, ValidationError> {
    if query.is_empty() {
        return Ok(QueryKind::SelfAddress);
    }

    if is_ipv4(query) {
        Ok(QueryKind::Ipv4)
    } else if is_ipv6(query) {
        Ok(QueryKind::Ipv6)
    } else if allow_domains && is_domain(query) {
        Ok(QueryKind::Domain)
    } else {
        Err(ValidationError::InvalidFormat(query.to_string()))
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
