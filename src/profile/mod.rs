//! The single-user profile row.

mod repository;
mod types;

pub use repository::ProfileRepository;
pub use types::{UserData, DEFAULT_USER_NAME, USER_DATA_ID};
