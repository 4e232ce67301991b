pub mod api;
pub mod error;
pub mod ids;
pub mod refresh;
pub mod render;
pub mod state;
pub mod storage;
pub mod widget;

pub use error::ClientError;
pub use widget::Widget;
