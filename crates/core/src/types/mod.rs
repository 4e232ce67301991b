pub mod comment_id;
pub mod relative_time;
