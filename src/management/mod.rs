mod auth;
mod summary;

pub use auth::TokenStore;
pub use auth::{from_refresh_token, is_expired, is_expired_at};
pub use summary::SummaryRecord;
pub use summary::{format_summary, summary_path, write_summary};
