#![allow(dead_code)]

use rusqlite::Connection;
use std::path::{Path, PathBuf};

pub const ERROR_RECORD: &str =
    r#"{"text":"err","alt":"error","tooltip":"Check Failed","class":"error"}"#;

/// Create `<root>/<profile>/Cookies` with Chromium's cookie schema
pub fn create_cookie_store(root: &Path, profile: &str) -> PathBuf {
    let path = root.join(profile).join("Cookies");
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE meta(key LONGVARCHAR NOT NULL UNIQUE PRIMARY KEY, value LONGVARCHAR);
         INSERT INTO meta(key, value) VALUES ('version', '21');
         CREATE TABLE cookies(
            creation_utc INTEGER NOT NULL,
            host_key TEXT NOT NULL,
            name TEXT NOT NULL,
            value TEXT NOT NULL,
            path TEXT NOT NULL,
            expires_utc INTEGER NOT NULL,
            is_secure INTEGER NOT NULL,
            is_httponly INTEGER NOT NULL,
            encrypted_value BLOB DEFAULT '');",
    )
    .unwrap();
    path
}

/// Add a plaintext session cookie that never expires
pub fn add_cookie(store: &Path, host: &str, name: &str, value: &str) {
    let conn = Connection::open(store).unwrap();
    conn.execute(
        "INSERT INTO cookies(creation_utc, host_key, name, value, path, expires_utc, is_secure, is_httponly)
         VALUES (0, ?1, ?2, ?3, '/', 0, 0, 1)",
        rusqlite::params![host, name, value],
    )
    .unwrap();
}

pub fn write_config(path: &Path, account_id: &str, profile: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(
        path,
        format!(
            r#"{{"account_id": "{}", "profile_name": "{}"}}"#,
            account_id, profile
        ),
    )
    .unwrap();
}

/// A base URL nothing is listening on
pub fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}
