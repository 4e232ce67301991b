use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the comment store HTTP API.
    Serve,
    /// Load the wall and paint it to the configured HTML file.
    Wall {
        /// Keep repainting and reloading until interrupted.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    /// Post a new wish.
    Post {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value_t = false)]
        anonymous: bool,
        text: String,
    },
    /// Like a wish, or unlike it if it is already liked locally.
    Like { id: String },
    /// Forget every local like.
    ClearLikes,
}
