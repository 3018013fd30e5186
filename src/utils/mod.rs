//! Utility functions

pub mod cookie;
pub mod password;
pub mod slug;
pub mod time;
pub mod validation;

pub use cookie::{SessionCookie, extract_bearer, extract_cookie};
pub use slug::slugify;
pub use time::now_utc;
pub use validation::parse_tags;
