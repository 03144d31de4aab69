/// A browser cookie as read from a cookie store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    /// Host key as stored by the browser; a leading `.` marks a domain cookie
    pub domain: String,
    pub name: String,
    pub value: String,
    pub path: String,
    pub secure: bool,
    pub http_only: bool,
}

impl Cookie {
    /// Domain with the leading dot removed, lowercased
    pub fn host(&self) -> String {
        self.domain.trim_start_matches('.').to_lowercase()
    }

    /// Whether the cookie applies to subdomains as well as the host itself
    pub fn is_domain_cookie(&self) -> bool {
        self.domain.starts_with('.')
    }

    /// Render the cookie in `Set-Cookie` form so HTTP cookie stores can ingest it
    pub fn to_set_cookie(&self) -> String {
        let mut out = format!("{}={}", self.name, self.value);
        if self.is_domain_cookie() {
            out.push_str(&format!("; Domain={}", self.host()));
        }
        let path = if self.path.is_empty() { "/" } else { &self.path };
        out.push_str(&format!("; Path={}", path));
        if self.secure {
            out.push_str("; Secure");
        }
        if self.http_only {
            out.push_str("; HttpOnly");
        }
        out
    }

    /// URL the cookie would have been set from
    pub fn origin_url(&self) -> std::result::Result<url::Url, url::ParseError> {
        let scheme = if self.secure { "https" } else { "http" };
        let path = if self.path.starts_with('/') { &self.path } else { "/" };
        url::Url::parse(&format!("{}://{}{}", scheme, self.host(), path))
    }
}

/// Cookies already scoped to the service's domains
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: Vec<Cookie>,
}

impl CookieJar {
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self { cookies }
    }

    pub fn cookies(&self) -> &[Cookie] {
        &self.cookies
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}
