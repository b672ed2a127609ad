//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env
//! vars. `Settings` is the typed view the binaries extract once at startup;
//! every field has a default matching a local Ollama setup.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("config.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("config.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("config.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("config.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("APP_"));

        Ok(Self { figment })
    }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("failed to get '{key}': {e}")))
    }

    /// Extract the full typed settings, falling back to defaults for any key
    /// the merged sources do not provide.
    pub fn settings(&self) -> Result<Settings> {
        self.figment
            .extract()
            .map_err(|e| Error::InvalidConfig(e.to_string()))
    }
}

/// Runtime knobs for the whole pipeline. Chunk geometry is in characters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub corpus_dir: PathBuf,
    pub index_path: PathBuf,
    pub status_path: PathBuf,
    pub ollama_url: String,
    pub embedding_model: String,
    pub completion_model: String,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub retriever_k: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            corpus_dir: PathBuf::from("knowledge"),
            index_path: PathBuf::from("data/index.json"),
            status_path: PathBuf::from("data/index_status.json"),
            ollama_url: "http://localhost:11434".to_string(),
            embedding_model: "llama3.2".to_string(),
            completion_model: "llama3.2".to_string(),
            chunk_size: 800,
            chunk_overlap: 100,
            retriever_k: 6,
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}
