pub mod errors;
pub mod id;
pub mod notifications;

pub use errors::{CantochatError, ConfigError};
pub use id::SessionId;
pub use notifications::{Notification, NotificationLevel, NotificationQueue};
