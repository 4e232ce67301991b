pub mod wishes_client;

pub use wishes_client::{ApiError, WishApiClient};
