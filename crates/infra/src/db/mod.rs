pub mod comments_repo;
pub mod migrations;
pub mod pool;

pub use comments_repo::{CommentsRepoError, apply_like, insert_comment, list_comments, ping};
pub use migrations::run_migrations;
pub use pool::{DbPool, DbPoolError, connect_in_memory, connect_lazy};
