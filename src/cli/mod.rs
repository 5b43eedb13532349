pub mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "akshar")]
#[command(about = "A command-line client for the Akshar writing platform", long_about = None)]
pub struct Cli {
    /// Backend base URL, overriding the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List published stories
    Blogs {
        /// Search query
        #[arg(short, long)]
        search: Option<String>,
        /// Only show stories with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },
    /// Show the latest stories
    Landing,
    /// Read a story and its comments
    Read {
        slug: String,
    },
    /// Like a story
    Like {
        slug: String,
    },
    /// Remove your like from a story
    Unlike {
        slug: String,
    },
    /// Comment on a story
    Comment {
        slug: String,
        text: String,
    },
    /// Sign in
    Login {
        email: String,
        #[arg(long, env = "AKSHAR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account
    Register {
        name: String,
        email: String,
        username: String,
        #[arg(long, env = "AKSHAR_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Stories from authors you follow
    Feed,
    /// Show notifications
    Notifications {
        /// Mark one notification as read
        #[arg(long)]
        read: Option<String>,
        /// Mark every notification as read
        #[arg(long)]
        all: bool,
    },
    /// Show an author's profile
    Profile {
        username: String,
    },
    /// Follow an author
    Follow {
        username: String,
    },
    /// Stop following an author
    Unfollow {
        username: String,
    },
    /// Write a new story
    Create {
        title: String,
        /// Story body (HTML)
        #[arg(short, long, default_value = "")]
        content: String,
        /// Tag, may be repeated (at most 5)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Publish immediately instead of saving a draft
        #[arg(long)]
        publish: bool,
    },
    /// Edit one of your stories
    Edit {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(short, long)]
        content: Option<String>,
        /// Replace the tags, may be repeated
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Publish after saving
        #[arg(long)]
        publish: bool,
    },
    /// Publish a draft
    Publish {
        id: String,
    },
    /// Archive a story
    Archive {
        id: String,
    },
    /// Delete a story
    Delete {
        id: String,
    },
    /// Show, set ("light", "dark") or toggle the theme
    Theme {
        value: Option<String>,
    },
}
