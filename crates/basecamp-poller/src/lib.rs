mod error;
mod poller;

pub use error::{Error, Result};
pub use poller::{NotificationPoller, PollResponse};
