use crate::decrypt::CookieDecryptor;
use crate::locator::CookieStoreRef;
use crate::{Error, Result};
use basecamp_core::{Cookie, CookieJar, DomainAllowlist};
use rusqlite::types::{Type, ValueRef};
use rusqlite::{Connection, OpenFlags, Row};
use std::path::Path;

/// Microseconds between 1601-01-01 (Chromium's epoch) and the Unix epoch
const CHROMIUM_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// First cookie database version that prefixes values with a host-key hash
const DOMAIN_HASH_MIN_VERSION: i64 = 24;

const COOKIE_QUERY: &str = "SELECT host_key, name, value, encrypted_value, path, expires_utc, \
                            is_secure, is_httponly FROM cookies";

struct RawCookie {
    host_key: String,
    name: String,
    value: String,
    encrypted_value: Vec<u8>,
    path: String,
    expires_utc: i64,
    is_secure: bool,
    is_httponly: bool,
}

impl RawCookie {
    /// Decode the remaining columns of a row whose host is already known
    ///
    /// Older stores hold TEXT where newer ones hold BLOB (and the reverse),
    /// so byte and text columns accept either storage class.
    fn from_row(host_key: String, row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            host_key,
            name: column_text(row, 1)?,
            value: column_text(row, 2)?,
            encrypted_value: column_bytes(row, 3)?,
            path: column_text(row, 4)?,
            expires_utc: column_int(row, 5)?,
            is_secure: column_int(row, 6)? != 0,
            is_httponly: column_int(row, 7)? != 0,
        })
    }

    fn is_expired(&self, now: i64) -> bool {
        self.expires_utc != 0 && self.expires_utc < now
    }
}

fn column_bytes(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<u8>> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(Vec::new()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => Ok(bytes.to_vec()),
        other => Err(invalid_type(row, idx, other)),
    }
}

fn column_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<String> {
    let bytes = column_bytes(row, idx)?;
    String::from_utf8(bytes).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))
    })
}

fn column_int(row: &Row<'_>, idx: usize) -> rusqlite::Result<i64> {
    match row.get_ref(idx)? {
        ValueRef::Null => Ok(0),
        ValueRef::Integer(v) => Ok(v),
        ValueRef::Text(text) => std::str::from_utf8(text)
            .ok()
            .and_then(|t| t.trim().parse().ok())
            .ok_or_else(|| invalid_type(row, idx, ValueRef::Text(text))),
        other => Err(invalid_type(row, idx, other)),
    }
}

fn invalid_type(row: &Row<'_>, idx: usize, value: ValueRef<'_>) -> rusqlite::Error {
    let name = row
        .as_ref()
        .column_name(idx)
        .map(str::to_string)
        .unwrap_or_default();
    rusqlite::Error::InvalidColumnType(idx, name, value.data_type())
}

/// Builds a cookie jar scoped to the allow-listed domains from a cookie store
pub struct JarBuilder {
    allowlist: DomainAllowlist,
    decryptor: CookieDecryptor,
}

impl JarBuilder {
    pub fn new(allowlist: DomainAllowlist, decryptor: CookieDecryptor) -> Self {
        Self {
            allowlist,
            decryptor,
        }
    }

    /// Read the store and keep live, allow-listed cookies
    ///
    /// Rows that cannot be decoded or decrypted are skipped with a warning;
    /// an unreadable or corrupt database fails the whole build.
    pub fn build(&self, store: &CookieStoreRef) -> Result<CookieJar> {
        tracing::debug!("Reading cookies from: {}", store.path.display());

        let conn = open_read_only(&store.path)?;
        let strip_domain_hash = meta_version(&conn) >= DOMAIN_HASH_MIN_VERSION;
        let now = chrono::Utc::now().timestamp_micros() + CHROMIUM_EPOCH_OFFSET_MICROS;

        let mut stmt = conn.prepare(COOKIE_QUERY)?;
        let mut rows = stmt.query([])?;

        let mut cookies = Vec::new();
        let mut skipped = 0usize;

        while let Some(row) = rows.next()? {
            let host_key = match column_text(row, 0) {
                Ok(host) => host,
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping cookie row without a readable host: {}", e);
                    continue;
                }
            };
            if !self.allowlist.allows(&host_key) {
                continue;
            }

            let raw = match RawCookie::from_row(host_key, row) {
                Ok(raw) => raw,
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping unreadable cookie row: {}", e);
                    continue;
                }
            };
            if raw.is_expired(now) {
                continue;
            }

            match self.cookie_value(&raw, strip_domain_hash) {
                Ok(value) => cookies.push(Cookie {
                    domain: raw.host_key,
                    name: raw.name,
                    value,
                    path: raw.path,
                    secure: raw.is_secure,
                    http_only: raw.is_httponly,
                }),
                Err(e) => {
                    skipped += 1;
                    tracing::warn!("Skipping cookie {} for {}: {}", raw.name, raw.host_key, e);
                }
            }
        }

        tracing::info!(
            "Loaded {} cookies for {} ({} skipped)",
            cookies.len(),
            self.allowlist
                .domains()
                .iter()
                .map(|d| d.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            skipped
        );

        Ok(CookieJar::new(cookies))
    }

    fn cookie_value(&self, raw: &RawCookie, strip_domain_hash: bool) -> Result<String> {
        if !raw.value.is_empty() || raw.encrypted_value.is_empty() {
            return Ok(raw.value.clone());
        }
        self.decryptor.decrypt(&raw.encrypted_value, strip_domain_hash)
    }
}

/// Open the database immutable so a running browser's lock is ignored
fn open_read_only(path: &Path) -> Result<Connection> {
    let absolute = std::fs::canonicalize(path)?;
    let url = url::Url::from_file_path(&absolute).map_err(|_| {
        Error::Store(format!("Cannot build a file URI for {}", absolute.display()))
    })?;
    let uri = format!("{}?immutable=1", url);

    let conn = Connection::open_with_flags(
        uri,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    Ok(conn)
}

/// Schema version from the `meta` table, 0 when absent
fn meta_version(conn: &Connection) -> i64 {
    let value = conn.query_row(
        "SELECT value FROM meta WHERE key = 'version'",
        [],
        |row| row.get::<_, rusqlite::types::Value>(0),
    );

    match value {
        Ok(rusqlite::types::Value::Integer(v)) => v,
        Ok(rusqlite::types::Value::Text(s)) => s.trim().parse().unwrap_or(0),
        Ok(_) => 0,
        Err(e) => {
            tracing::debug!("No cookie database version: {}", e);
            0
        }
    }
}
