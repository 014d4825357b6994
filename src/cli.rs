use dirs_next as dirs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigFile(Option<PathBuf>);

impl ConfigFile {
    pub fn path(&self) -> eyre::Result<&Path> {
        self.0
            .as_ref()
            .map(|p| p.as_path())
            .ok_or_else(|| eyre::eyre!("failed to get default config file path"))
    }
}

impl Default for ConfigFile {
    fn default() -> Self {
        let default_path = dirs::config_dir().map(|dir| dir.join("stratus").join("backups.toml"));
        ConfigFile(default_path)
    }
}

impl std::str::FromStr for ConfigFile {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ConfigFile(Some(PathBuf::from(s))))
    }
}

impl std::fmt::Display for ConfigFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Some(path) => write!(f, "{}", path.display()),
            None => write!(f, "<none>"),
        }
    }
}

/// A configuration-driven folder backup program based on cp and rsync.
#[derive(clap::Parser)]
pub struct Cli {
    /// Sets a custom configuration file path
    #[arg(short, long, env = "STRATUS_CONFIG_FILE", default_value_t)]
    pub config_file: ConfigFile,

    /// Sets the configuration from a string
    #[arg(long, env = "STRATUS_CONFIG")]
    pub config_string: Option<String>,

    /// Sets the cp binary to use for copy sources
    #[arg(long)]
    pub cp_binary: Option<PathBuf>,

    /// Sets the rsync binary to use for mirror sources
    #[arg(long)]
    pub rsync_binary: Option<PathBuf>,

    #[command(subcommand)]
    pub subcommand: Cmd,
}

#[derive(clap::Subcommand)]
pub enum Cmd {
    /// Runs a configured sync
    Sync(sync::Cli),

    /// Prints the active configuration
    Config,

    /// Prints version information
    Version,
}

pub mod sync {
    #[derive(clap::Args)]
    pub struct Cli {
        /// The sync to run
        #[arg(value_name = "SYNC")]
        pub sync: String,
    }
}
