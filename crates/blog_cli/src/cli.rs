use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use blog_client::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_RESOURCE};
use blog_store::DEFAULT_PORT;
use clap::{Parser, Subcommand};

/// Duration written as `30s`, `2m`, `1h15m` or a bare number of seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HumanDuration(pub Duration);

impl FromStr for HumanDuration {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut total_millis = 0u64;
        let mut current_number = String::new();
        let mut has_value = false;
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            if c.is_ascii_digit() {
                current_number.push(c);
            } else if let Ok(num) = current_number.parse::<u64>() {
                let unit_millis = match c {
                    'm' if chars.peek() == Some(&'s') => {
                        chars.next();
                        1
                    }
                    's' => 1_000,
                    'm' => 60_000,
                    'h' => 3_600_000,
                    _ => return Err(format!("Invalid duration unit: {}", c)),
                };
                total_millis += num * unit_millis;
                current_number.clear();
                has_value = true;
            } else if !c.is_whitespace() {
                return Err(format!("Invalid character in duration: {}", c));
            }
        }

        // trailing number without a unit counts as seconds
        if !current_number.is_empty() {
            let num = current_number
                .parse::<u64>()
                .map_err(|_| "Invalid number in duration".to_string())?;
            total_millis += num * 1_000;
            has_value = true;
        }

        if !has_value {
            return Err("Duration must include a number".to_string());
        }

        Ok(HumanDuration(Duration::from_millis(total_millis)))
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Browse and write articles on a REST article store", long_about = None)]
pub struct Cli {
    /// Base URL of the article store
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    pub api_url: String,

    /// Name of the REST collection holding the articles
    #[arg(long, global = true, default_value = DEFAULT_RESOURCE)]
    pub resource: String,

    /// Request timeout (e.g. 10s, 500ms)
    #[arg(long, global = true, default_value = "10s")]
    pub timeout: HumanDuration,

    /// Attempts per read before giving up on transient failures
    #[arg(long, global = true, default_value_t = 3)]
    pub retries: u32,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Write logs to this file (the terminal UI discards logs otherwise)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::default()
            .with_url(self.api_url.clone())
            .with_resource(self.resource.clone())
            .with_timeout(self.timeout.0)
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Interactive list, detail pane and creation form (default)
    Tui,
    /// Print every article
    List,
    /// Print one article
    Show {
        id: String,
    },
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Body text; separate paragraphs with a blank line
        #[arg(long)]
        content: String,
        /// Comma separated categories, e.g. "FINANCE, TECH"
        #[arg(long, default_value = "")]
        category: String,
        #[arg(long)]
        cover_image: Option<String>,
    },
    /// Run the in-memory article store
    Serve {
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// JSON seed file: {"<resource>": [...]} or a bare array
        #[arg(long)]
        seed: Option<PathBuf>,
    },
}
