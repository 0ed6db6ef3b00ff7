use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use serde_yaml;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::keywords::{KeywordSet, Vocabulary};

#[derive(Parser, Debug)]
#[command(name = "mediascan")]
#[command(about = "Flags press documents that mention gender and diversity topics", long_about = None)]
pub struct Cli {
    /// Dataset id: documents are read from `<id>/`, tables written to `<id>_new.csv` and `<id>_tmp.csv`
    pub dataset: String,
    #[arg(short = 'c', long = "config")]
    pub config_path: Option<String>,
}

pub fn default_config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".mediascan")
}

pub fn default_config_path() -> PathBuf {
    default_config_dir().join("config.yaml")
}

fn default_root() -> PathBuf {
    PathBuf::from(".")
}

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_root")]
    pub input_root: PathBuf,
    #[serde(default = "default_root")]
    pub output_dir: PathBuf,
    #[serde(default)]
    pub vocabulary: Vocabulary,
    /// Replaces the compiled-in vocabulary when present.
    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_root: default_root(),
            output_dir: default_root(),
            vocabulary: Vocabulary::default(),
            keywords: None,
        }
    }
}

impl Config {
    pub fn new(path: &Path) -> Result<Self> {
        let cfg = Config::load_config(path).with_context(|| format!("failed to load config {:?}", path))?;
        Ok(cfg)
    }

    /// Loads the explicit config if given, else the default location if it
    /// exists, else built-in defaults.
    pub fn resolve(explicit: Option<&str>) -> Result<Self> {
        match explicit {
            Some(path) => Config::new(Path::new(path)),
            None => {
                let path = default_config_path();
                if path.is_file() {
                    Config::new(&path)
                } else {
                    Ok(Config::default())
                }
            }
        }
    }

    /// Hyphenated variants are always added, whichever list is in effect.
    pub fn keyword_set(&self) -> KeywordSet {
        match &self.keywords {
            Some(keywords) => KeywordSet::new(keywords),
            None => KeywordSet::from_vocabulary(self.vocabulary),
        }
    }

    pub fn input_dir(&self, dataset: &str) -> PathBuf {
        self.input_root.join(dataset)
    }

    pub fn filename_table_path(&self, dataset: &str) -> PathBuf {
        self.output_dir.join(format!("{}_new.csv", dataset))
    }

    pub fn metadata_table_path(&self, dataset: &str) -> PathBuf {
        self.output_dir.join(format!("{}_tmp.csv", dataset))
    }

    fn load_config(path: &Path) -> Result<Config> {
        let yaml_str = fs::read_to_string(path)?;
        Config::from_yaml(&yaml_str)
    }

    pub fn from_yaml(yaml_str: &str) -> Result<Config> {
        let yaml_with_env = Config::substitute_env_vars(yaml_str)?;
        // an empty file means "all defaults"
        if yaml_with_env.trim().is_empty() {
            return Ok(Config::default());
        }
        let config: Config = serde_yaml::from_str(&yaml_with_env)?;
        Ok(config)
    }

    fn substitute_env_vars(yaml_str: &str) -> Result<String> {
        let mut result = yaml_str.to_string();
        let mut offset = 0;

        while let Some(start) = result[offset..].find("${") {
            let actual_start = offset + start;
            if let Some(end) = result[actual_start..].find("}") {
                let var_name = &result[actual_start + 2..actual_start + end];

                // Handle default values like ${VAR:-default}
                let env_value = if let Some(default_start) = var_name.find(":-") {
                    let actual_var = &var_name[..default_start];
                    let default_val = &var_name[default_start + 2..];
                    env::var(actual_var).unwrap_or_else(|_| default_val.to_string())
                } else {
                    env::var(var_name).unwrap_or_else(|_| {
                        tracing::warn!(variable = var_name, "environment variable not found");
                        String::new()
                    })
                };

                result.replace_range(actual_start..actual_start + end + 1, &env_value);
                offset = actual_start + env_value.len();
            } else {
                break;
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let cfg = Config::from_yaml("").unwrap();
        assert_eq!(cfg.input_root, PathBuf::from("."));
        assert_eq!(cfg.keyword_set(), KeywordSet::default());
    }

    #[test]
    fn test_keywords_override_vocabulary() {
        let cfg = Config::from_yaml("keywords:\n  - pay equity\n  - glass ceiling\n").unwrap();
        let set = cfg.keyword_set();
        assert_eq!(
            set.iter().collect::<Vec<_>>(),
            vec!["pay equity", "glass ceiling", "pay-equity", "glass-ceiling"]
        );
        assert!(!set.contains("sexism"));
    }

    #[test]
    fn test_basic_vocabulary() {
        let cfg = Config::from_yaml("vocabulary: basic\n").unwrap();
        assert!(!cfg.keyword_set().contains("sexually abused"));
        assert!(cfg.keyword_set().contains("sexual-abuse"));
    }

    #[test]
    fn test_env_default_substitution() {
        let cfg = Config::from_yaml("output_dir: ${MEDIASCAN_TEST_UNSET_VAR:-/tmp/out}\n").unwrap();
        assert_eq!(cfg.output_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_table_paths() {
        let cfg = Config {
            input_root: PathBuf::from("data"),
            output_dir: PathBuf::from("out"),
            ..Default::default()
        };
        assert_eq!(cfg.input_dir("20"), PathBuf::from("data/20"));
        assert_eq!(cfg.filename_table_path("20"), PathBuf::from("out/20_new.csv"));
        assert_eq!(cfg.metadata_table_path("20"), PathBuf::from("out/20_tmp.csv"));
    }

    #[test]
    fn test_cli_requires_dataset() {
        assert!(Cli::try_parse_from(["mediascan"]).is_err());
        let cli = Cli::try_parse_from(["mediascan", "20", "-c", "cfg.yaml"]).unwrap();
        assert_eq!(cli.dataset, "20");
        assert_eq!(cli.config_path.as_deref(), Some("cfg.yaml"));
    }
}
