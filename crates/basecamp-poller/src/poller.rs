//! Fetching the readings endpoint with browser session cookies.
//!
//! The endpoint only answers browser sessions, so the request mimics an
//! in-page XHR: a desktop Chrome user agent, `Accept: application/json` and
//! `X-Requested-With: XMLHttpRequest`. One attempt, bounded by a timeout.

use crate::{Error, Result};
use basecamp_core::{CookieJar, Settings};
use reqwest::header::{ACCEPT, USER_AGENT};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Raw answer from the endpoint; interpretation is left to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

pub struct NotificationPoller {
    base_url: Url,
    timeout: Duration,
    user_agent: String,
}

impl NotificationPoller {
    pub fn new(base_url: &str, timeout: Duration, user_agent: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrl(format!("{} cannot be a base URL", base_url)));
        }

        Ok(Self {
            base_url,
            timeout,
            user_agent: user_agent.to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(&settings.base_url, settings.timeout, &settings.user_agent)
    }

    /// `<base>/<account_id>/my/readings.json`, account ID escaped as one segment
    pub fn endpoint(&self, account_id: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend([account_id, "my", "readings.json"]);
        Ok(url)
    }

    /// Issue a single GET with `jar` as the cookie source
    pub async fn poll(&self, jar: &CookieJar, account_id: &str) -> Result<PollResponse> {
        let url = self.endpoint(account_id)?;
        let client = reqwest::Client::builder()
            .cookie_provider(Arc::new(to_reqwest_jar(jar)))
            .timeout(self.timeout)
            .build()?;

        tracing::debug!("GET {} with {} cookies", url, jar.len());

        let response = client
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json")
            .header("X-Requested-With", "XMLHttpRequest")
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        tracing::debug!("Response status {} with {} bytes", status, body.len());
        Ok(PollResponse { status, body })
    }
}

fn to_reqwest_jar(jar: &CookieJar) -> reqwest::cookie::Jar {
    let store = reqwest::cookie::Jar::default();
    for cookie in jar.cookies() {
        match cookie.origin_url() {
            Ok(url) => store.add_cookie_str(&cookie.to_set_cookie(), &url),
            Err(e) => tracing::debug!("Skipping cookie {} for {}: {}", cookie.name, cookie.domain, e),
        }
    }
    store
}
