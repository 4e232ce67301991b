pub mod comments;
pub mod liked;
pub mod wall;
