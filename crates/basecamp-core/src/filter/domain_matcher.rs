use std::net::IpAddr;

/// An allow-listed cookie domain
///
/// Matches the domain itself and any subdomain of it. Registrable names
/// are checked against the Public Suffix List so a bare suffix such as
/// `com` or `co.uk` can never be allow-listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainSuffix {
    /// Domain name, lowercase, no leading dot
    Name(String),
    /// IP literal, matched exactly
    Ip(IpAddr),
}

impl DomainSuffix {
    pub fn parse(domain: &str) -> crate::Result<Self> {
        let normalized = domain.trim().trim_start_matches('.').to_lowercase();

        if normalized.is_empty() {
            return Err(crate::Error::InvalidDomain(format!(
                "Empty domain in allow-list: '{}'",
                domain
            )));
        }

        if let Ok(ip) = normalized.parse::<IpAddr>() {
            return Ok(DomainSuffix::Ip(ip));
        }

        if normalized
            .chars()
            .any(|c| !(c.is_ascii_alphanumeric() || c == '-' || c == '.'))
        {
            return Err(crate::Error::InvalidDomain(format!(
                "Invalid characters in domain '{}'",
                domain
            )));
        }

        if psl::suffix_str(&normalized) == Some(normalized.as_str()) {
            return Err(crate::Error::InvalidDomain(format!(
                "'{}' is a public suffix, not a registrable domain",
                domain
            )));
        }

        Ok(DomainSuffix::Name(normalized))
    }

    /// Check whether a cookie host falls under this domain
    ///
    /// The host may carry the leading dot browsers use for domain cookies.
    /// Matching is case-insensitive and label-aligned: `evilbasecamp.com`
    /// does not match `basecamp.com`.
    pub fn matches(&self, host: &str) -> bool {
        let host = host.trim_start_matches('.').to_lowercase();
        match self {
            DomainSuffix::Ip(ip) => host.parse::<IpAddr>().is_ok_and(|h| h == *ip),
            DomainSuffix::Name(domain) => {
                host == *domain
                    || host
                        .strip_suffix(domain.as_str())
                        .is_some_and(|prefix| prefix.ends_with('.'))
            }
        }
    }

    pub fn as_str(&self) -> String {
        match self {
            DomainSuffix::Name(domain) => domain.clone(),
            DomainSuffix::Ip(ip) => ip.to_string(),
        }
    }
}
