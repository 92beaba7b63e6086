//! Project configuration loaded from `project.toml`.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Top-level project configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub project: ProjectInfo,
    #[serde(default)]
    pub assets: AssetsConfig,
}

/// General project information.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectInfo {
    pub name: String,
}

/// Where the project's assets live, relative to the project file.
#[derive(Debug, Clone, Deserialize)]
pub struct AssetsConfig {
    #[serde(default = "default_asset_root")]
    pub root: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            root: default_asset_root(),
        }
    }
}

fn default_asset_root() -> String {
    ".".into()
}

#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("could not read project file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse project file: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            project: ProjectInfo {
                name: "Untitled".into(),
            },
            assets: AssetsConfig::default(),
        }
    }
}

impl ProjectConfig {
    /// Loads a project config from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ProjectError> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Loads the project file, falling back to defaults when it does not
    /// exist. A malformed file is an error surfaced to the caller, not
    /// silently defaulted.
    pub fn load_or_default(path: &Path) -> Result<Self, ProjectError> {
        match Self::load(path) {
            Ok(config) => {
                log::info!("loaded project '{}'", config.project.name);
                Ok(config)
            }
            Err(ProjectError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("no project file at '{}', using defaults", path.display());
                Ok(Self::default())
            }
            Err(err) => Err(err),
        }
    }

    /// The workspace root asset paths resolve against: the configured
    /// asset root joined to the project file's directory.
    pub fn asset_root(&self, project_file: &Path) -> PathBuf {
        let base = project_file.parent().unwrap_or(Path::new("."));
        base.join(&self.assets.root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_toml(tag: &str, content: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "calluna-project-{tag}-{}.toml",
            std::process::id()
        ));
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn well_formed_file_parses() {
        let path = temp_toml(
            "ok",
            "[project]\nname = \"Demo\"\n\n[assets]\nroot = \"assets\"\n",
        );
        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.project.name, "Demo");
        assert_eq!(config.assets.root, "assets");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn assets_section_is_optional() {
        let path = temp_toml("noassets", "[project]\nname = \"Bare\"\n");
        let config = ProjectConfig::load(&path).unwrap();
        assert_eq!(config.assets.root, ".");
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let config =
            ProjectConfig::load_or_default(Path::new("/no/such/project.toml")).unwrap();
        assert_eq!(config.project.name, "Untitled");
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = temp_toml("bad", "not [ valid toml");
        assert!(ProjectConfig::load_or_default(&path).is_err());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn asset_root_joins_project_directory() {
        let config = ProjectConfig {
            assets: AssetsConfig {
                root: "assets".into(),
            },
            ..Default::default()
        };
        let root = config.asset_root(Path::new("/projects/demo/project.toml"));
        assert_eq!(root, PathBuf::from("/projects/demo/assets"));
    }
}
