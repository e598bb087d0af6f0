use std::env;
use std::fs;
use std::path::PathBuf;

const ROOT_ENV: &str = "RAG_MEMORY_ROOT";
const DATA_DIR_ENV: &str = "RAG_MEMORY_DATA_DIR";

/// Where config layers and logs live.
///
/// `project_root` holds the shipped `config.yml`; `user_data_dir` holds the
/// per-user override layer and the `logs/` directory. The two are distinct
/// unless a caller deliberately points them at the same place.
#[derive(Debug, Clone)]
pub struct AppPaths {
    pub project_root: PathBuf,
    pub user_data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl AppPaths {
    pub fn new() -> Self {
        let lookup = |key: &str| env::var(key).ok();
        Self::with_dirs(resolve_project_root(lookup), resolve_user_data_dir(lookup))
    }

    /// Single-directory layout under `root`, ignoring environment overrides.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self::with_dirs(root.clone(), root)
    }

    /// Explicit layout; creates the user data and log directories.
    pub fn with_dirs(project_root: impl Into<PathBuf>, user_data_dir: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let user_data_dir = user_data_dir.into();
        let log_dir = user_data_dir.join("logs");

        if let Err(err) = fs::create_dir_all(&log_dir) {
            tracing::warn!("Could not create log dir {}: {}", log_dir.display(), err);
        }

        Self {
            project_root,
            user_data_dir,
            log_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_project_root(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(root) = lookup(ROOT_ENV) {
        return PathBuf::from(root);
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    if manifest_dir.join("config.yml").exists() {
        return manifest_dir;
    }

    env::current_dir().unwrap_or(manifest_dir)
}

/// Per-user data directory: the env override, else the platform location.
fn resolve_user_data_dir(lookup: impl Fn(&str) -> Option<String>) -> PathBuf {
    if let Some(dir) = lookup(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    let home = lookup("HOME")
        .or_else(|| lookup("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));

    if cfg!(target_os = "windows") {
        let base = lookup("LOCALAPPDATA").map(PathBuf::from).unwrap_or(home);
        return base.join("RagMemory");
    }

    if cfg!(target_os = "macos") {
        return home
            .join("Library")
            .join("Application Support")
            .join("RagMemory");
    }

    lookup("XDG_DATA_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| home.join(".local").join("share"))
        .join("rag-memory")
}
