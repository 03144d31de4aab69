pub mod config;
pub mod cookie;
pub mod error;
pub mod filter;
pub mod normalize;
pub mod publish;
pub mod settings;
pub mod status;

pub use config::Config;
pub use cookie::{Cookie, CookieJar};
pub use error::{Error, Result};
pub use filter::{DomainAllowlist, DomainSuffix};
pub use normalize::{NotificationCount, Shape, normalize};
pub use publish::{NoopNotifier, Notifier, Publisher, SignalNotifier};
pub use settings::{Settings, WidgetSignal};
pub use status::{StatusClass, StatusRecord};
