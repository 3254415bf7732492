use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::{Verbosity, WarnLevel};
use mineclear_core::{GameConfig, WinRule};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(version, about = "Find the mines on a square grid", long_about = None)]
pub struct Args {
    /// What log level to use
    #[command(flatten)]
    pub verbose: Verbosity<WarnLevel>,

    /// Board side length, falls back to 15 when missing or invalid
    #[arg(short, long)]
    pub size: Option<String>,

    /// Number of mines, falls back to 40 when missing or invalid
    #[arg(short, long)]
    pub mines: Option<String>,

    /// Force a seed instead of random
    #[arg(long)]
    pub seed: Option<u64>,

    /// Also win by revealing every safe cell
    #[arg(long)]
    pub win_on_reveal: bool,

    /// TOML file with defaults for the options above
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Settings file, every key optional.
///
/// ```toml
/// size = 20
/// mines = 60
/// win_on_reveal = true
/// seed = 1234
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    size: Option<toml::Value>,
    mines: Option<toml::Value>,
    seed: Option<u64>,
    win_on_reveal: Option<bool>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid config file {}", path.display()))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Size and mine count are kept as text so bad values reach the lenient parser in the core.
fn raw_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Settings {
    pub game: GameConfig,
    pub seed: u64,
}

impl Settings {
    pub fn load(args: &Args) -> anyhow::Result<Self> {
        let file = match &args.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };
        Ok(Self::resolve(args, file))
    }

    /// Command line beats the config file, which beats the built-in defaults.
    pub fn resolve(args: &Args, file: FileConfig) -> Self {
        let size = args.size.clone().or_else(|| file.size.as_ref().map(raw_value));
        let mines = args
            .mines
            .clone()
            .or_else(|| file.mines.as_ref().map(raw_value));

        let win_rule = if args.win_on_reveal || file.win_on_reveal.unwrap_or(false) {
            WinRule::RevealOrFlags
        } else {
            WinRule::Flags
        };
        let game = GameConfig::from_raw(size.as_deref(), mines.as_deref()).with_win_rule(win_rule);

        let seed = args.seed.or(file.seed).unwrap_or_else(rand::random::<u64>);
        log::debug!("seed: {}", seed);

        Self { game, seed }
    }
}
