//! Configuration from a TOML file and the command line.

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_CONFIG_FILE: &str = "internmatch.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub form: FormConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub base_url: String,
    /// Fetch sector and location choices from the service at startup.
    pub load_catalog: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            load_catalog: true,
        }
    }
}

/// Choices offered by the three selects and the suggestion chips.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub education_options: Vec<String>,
    pub sector_options: Vec<String>,
    pub location_options: Vec<String>,
    pub skill_suggestions: Vec<String>,
}

impl Default for FormConfig {
    fn default() -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }

        Self {
            education_options: owned(&[
                "BTech", "MTech", "BCA", "MCA", "BSc", "MSc", "BCom", "BBA", "MBA", "BA", "MA",
                "Diploma",
            ]),
            sector_options: owned(&[
                "Information Technology",
                "Marketing",
                "Analytics",
                "Media",
                "Finance",
                "Design",
                "Human Resources",
                "Research",
                "Sales",
                "Education",
            ]),
            location_options: owned(&[
                "Bangalore", "Mumbai", "Delhi", "Hyderabad", "Chennai", "Pune", "Kolkata",
                "Remote",
            ]),
            skill_suggestions: owned(&[
                "Python",
                "JavaScript",
                "React",
                "Machine Learning",
                "Data Analysis",
                "Digital Marketing",
                "UI/UX Design",
                "Java",
                "SQL",
                "Excel",
            ]),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Log file for the terminal front end. Headless runs log to stderr.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: PathBuf::from("internmatch.log"),
        }
    }
}

impl AppConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Loads the file named on the command line, else the default file if it
    /// exists, else built-in defaults. Flags override file values.
    pub fn resolve(cli: &Cli) -> Result<Self, ConfigError> {
        let mut config = match &cli.config {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        if let Some(base_url) = &cli.base_url {
            config.server.base_url = base_url.clone();
        }
        if let Some(log_file) = &cli.log_file {
            config.logging.file = log_file.clone();
        }
        if cli.offline {
            config.server.load_catalog = false;
        }
        Ok(config)
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "internmatch")]
#[command(about = "Find internships that match your education, skills and preferences")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Recommendation service base URL
    #[arg(long)]
    pub base_url: Option<String>,

    /// Where the terminal front end writes its log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Skip loading sector and location choices from the service
    #[arg(long)]
    pub offline: bool,

    #[arg(long, short, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum CliCommand {
    /// Submit one request without the interactive form
    Recommend {
        #[arg(long, default_value = "")]
        education: String,
        #[arg(long, default_value = "")]
        sector: String,
        #[arg(long, default_value = "")]
        location: String,
        /// May be repeated; order is kept
        #[arg(long = "skill")]
        skills: Vec<String>,
        /// Also write the cards to an HTML file
        #[arg(long)]
        html: Option<PathBuf>,
    },
}
