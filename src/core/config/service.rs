use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::{Map, Value};

use super::defaults::RagConfig;
use super::paths::AppPaths;
use super::validation::validate_config;
use crate::core::errors::ConfigError;

const CONFIG_FILE_NAME: &str = "config.yml";

#[derive(Clone)]
pub struct ConfigService {
    paths: Arc<AppPaths>,
}

impl ConfigService {
    pub fn new(paths: Arc<AppPaths>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &AppPaths {
        &self.paths
    }

    /// Config files in merge order; later files override earlier ones.
    pub fn config_paths(&self) -> Vec<PathBuf> {
        if let Ok(path) = env::var("RAG_MEMORY_CONFIG_PATH") {
            return vec![PathBuf::from(path)];
        }

        let project_config = self.paths.project_root.join(CONFIG_FILE_NAME);
        let user_config = self.paths.user_data_dir.join(CONFIG_FILE_NAME);
        if project_config == user_config {
            vec![project_config]
        } else {
            vec![project_config, user_config]
        }
    }

    pub fn load_config(&self) -> Result<Value, ConfigError> {
        let mut merged = Value::Object(Map::new());
        for path in self.config_paths() {
            let layer = load_yaml_file(&path)?;
            merged = deep_merge(&merged, &layer);
        }
        validate_config(&merged)?;
        Ok(merged)
    }

    pub fn load_rag_config(&self) -> Result<RagConfig, ConfigError> {
        let config = self.load_config()?;
        Ok(RagConfig::from_value(&config))
    }
}

fn load_yaml_file(path: &Path) -> Result<Value, ConfigError> {
    if !path.exists() {
        return Ok(Value::Object(Map::new()));
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let value: Value = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })?;

    match value {
        Value::Object(_) => Ok(value),
        // an empty YAML document parses as null
        Value::Null => Ok(Value::Object(Map::new())),
        _ => Err(ConfigError::Invalid(format!(
            "config file {} must contain a mapping",
            path.display()
        ))),
    }
}

fn deep_merge(base: &Value, override_value: &Value) -> Value {
    match (base, override_value) {
        (Value::Object(base_map), Value::Object(override_map)) => {
            let mut merged: Map<String, Value> = base_map.clone();
            for (key, value) in override_map {
                let merged_value = match merged.get(key) {
                    Some(existing) => deep_merge(existing, value),
                    None => value.clone(),
                };
                merged.insert(key.clone(), merged_value);
            }
            Value::Object(merged)
        }
        _ => override_value.clone(),
    }
}
