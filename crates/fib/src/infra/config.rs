//! Configuration management utilities.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use dirs_next::config_dir;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::domain::model::SortMode;

static DEFAULT_CONFIG: Lazy<&'static str> =
    Lazy::new(|| include_str!("../../assets/default-config.toml"));
static DEFAULT_WORKSPACE_CONFIG_PATH: &str = ".fib/config.toml";

/// Layered configuration loaded from defaults, user, workspace, and env.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub bundle: BundleDefaults,
}

/// Defaults for `bundle` flags that were not given on the command line.
///
/// Every field is optional so that a layer only overrides what it sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct BundleDefaults {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    sort: Option<SortMode>,
    #[serde(default)]
    note: Option<bool>,
    #[serde(default)]
    remove_empty_lines: Option<bool>,
    #[serde(default)]
    author: Option<String>,
}

impl BundleDefaults {
    fn default_output() -> &'static str {
        "bundle.txt"
    }

    pub fn output(&self) -> String {
        self.output
            .clone()
            .unwrap_or_else(|| Self::default_output().to_owned())
    }

    pub fn sort(&self) -> SortMode {
        self.sort.unwrap_or_default()
    }

    pub fn note(&self) -> bool {
        self.note.unwrap_or(false)
    }

    pub fn remove_empty_lines(&self) -> bool {
        self.remove_empty_lines.unwrap_or(false)
    }

    pub fn author(&self) -> Option<String> {
        self.author.clone()
    }
}

/// Environment overrides for critical settings.
#[derive(Debug, Default, Clone)]
pub struct EnvOverrides {
    output: Option<String>,
    sort: Option<String>,
    author: Option<String>,
}

impl EnvOverrides {
    fn from_env() -> Self {
        Self {
            output: env::var("FIB_OUTPUT").ok(),
            sort: env::var("FIB_SORT").ok(),
            author: env::var("FIB_AUTHOR").ok(),
        }
    }

    #[cfg(test)]
    fn for_tests(output: &str, sort: &str, author: &str) -> Self {
        Self {
            output: Some(output.to_owned()),
            sort: Some(sort.to_owned()),
            author: Some(author.to_owned()),
        }
    }
}

impl Config {
    /// Load configuration from defaults, user/global config, workspace config, and env overrides.
    pub fn load() -> Result<Self> {
        let env = EnvOverrides::from_env();
        let global = global_config_path();
        let workspace = workspace_config_path()?;
        Self::load_with_layers(global, workspace, env)
    }

    fn load_with_layers(
        global: Option<PathBuf>,
        workspace: Option<PathBuf>,
        env_overrides: EnvOverrides,
    ) -> Result<Self> {
        let mut layers: Vec<Config> = Vec::new();

        layers.push(Self::from_str(&DEFAULT_CONFIG)?);

        if let Some(global_path) = global.filter(|path| path.exists()) {
            tracing::debug!(path = %global_path.display(), "loading global config");
            layers.push(Self::from_file(&global_path)?);
        }

        if let Some(workspace_path) = workspace.filter(|path| path.exists()) {
            tracing::debug!(path = %workspace_path.display(), "loading workspace config");
            layers.push(Self::from_file(&workspace_path)?);
        }

        let merged = layers.into_iter().reduce(Config::merge).unwrap_or_default();
        apply_env_overrides(merged, env_overrides)
    }

    fn from_file(path: &Path) -> Result<Self> {
        let data = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        Self::from_str(&data)
            .with_context(|| format!("invalid config file: {}", path.display()))
    }

    fn from_str(contents: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(contents).with_context(|| "failed to parse TOML config".to_string())?;
        Ok(config)
    }

    fn merge(self, other: Self) -> Self {
        Self {
            bundle: merge_bundle(self.bundle, other.bundle),
        }
    }
}

fn merge_bundle(base: BundleDefaults, overlay: BundleDefaults) -> BundleDefaults {
    BundleDefaults {
        output: overlay.output.or(base.output),
        sort: overlay.sort.or(base.sort),
        note: overlay.note.or(base.note),
        remove_empty_lines: overlay.remove_empty_lines.or(base.remove_empty_lines),
        author: overlay.author.or(base.author),
    }
}

fn global_config_path() -> Option<PathBuf> {
    config_dir().map(|base| base.join("fib/config.toml"))
}

fn workspace_config_path() -> Result<Option<PathBuf>> {
    let cwd = env::current_dir()?;
    let root = find_repo_root(&cwd).unwrap_or(cwd);
    Ok(Some(root.join(DEFAULT_WORKSPACE_CONFIG_PATH)))
}

fn find_repo_root(start: &Path) -> Option<PathBuf> {
    let mut current = start;
    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

fn apply_env_overrides(mut config: Config, env: EnvOverrides) -> Result<Config> {
    if let Some(output) = env.output {
        config.bundle.output = Some(output);
    }
    if let Some(sort) = env.sort {
        let sort = sort
            .parse::<SortMode>()
            .context("invalid FIB_SORT environment variable")?;
        config.bundle.sort = Some(sort);
    }
    if let Some(author) = env.author {
        config.bundle.author = Some(author);
    }
    Ok(config)
}
