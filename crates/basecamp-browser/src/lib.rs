//! Reading session cookies out of a local Chromium-family browser.
//!
//! [`StoreLocator`] finds the cookie databases of every installed profile,
//! [`JarBuilder`] turns the selected one into a [`basecamp_core::CookieJar`]
//! holding only allow-listed cookies, decrypted with the browser's "Safe
//! Storage" secret from the platform keyring when one is available.

mod decrypt;
mod error;
mod jar;
mod keychain;
mod locator;

pub use decrypt::{CookieDecryptor, DEFAULT_SAFE_STORAGE_PASSWORD};
pub use error::{Error, Result};
pub use jar::JarBuilder;
pub use keychain::{KeyringSource, PasswordSource, SAFE_STORAGE_ENTRIES, safe_storage_password};
pub use locator::{BrowserRoot, CookieStoreRef, StoreLocator};
