mod domain_matcher;

pub use domain_matcher::DomainSuffix;

/// Domains whose cookies may be attached to service requests
///
/// A cookie passes if ANY entry matches its host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainAllowlist {
    domains: Vec<DomainSuffix>,
}

impl DomainAllowlist {
    /// Parse every entry; one invalid entry rejects the whole list
    pub fn new<I, S>(domains: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let domains = domains
            .into_iter()
            .map(|d| DomainSuffix::parse(d.as_ref()))
            .collect::<crate::Result<Vec<_>>>()?;

        if domains.is_empty() {
            return Err(crate::Error::InvalidDomain(
                "Domain allow-list must not be empty".to_string(),
            ));
        }

        Ok(Self { domains })
    }

    pub fn domains(&self) -> &[DomainSuffix] {
        &self.domains
    }

    pub fn allows(&self, host: &str) -> bool {
        self.domains.iter().any(|d| d.matches(host))
    }
}
