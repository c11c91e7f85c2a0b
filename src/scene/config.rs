//! Scene configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{Result, Rgba};
use crate::grass::GrassLayerConfig;
use crate::layer::{FlickerLight, GroundBar};
use crate::tree::{GrowthParams, TreeLayerConfig, DEFAULT_JITTER_PX};

/// Everything needed to build a scene. Missing fields in a config file fall
/// back to the defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Background fill behind every layer
    pub clear_color: Rgba,
    /// Fixed RNG seed. `None` draws a fresh scene on every start.
    pub seed: Option<u64>,
    /// Tessellate leaf clusters into the tree rows
    pub show_leaves: bool,
    /// Total horizontal jitter of tree seeds in pixels
    pub jitter_px: f32,
    pub growth: GrowthParams,
    /// Tree rows, far to near
    pub trees: [TreeLayerConfig; 3],
    /// Grass rows, far to near
    pub grass: [GrassLayerConfig; 3],
    pub ground: GroundBar,
    /// Corner light, or `None` to disable it
    pub light: Option<FlickerLight>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            clear_color: [0.55, 0.55, 0.6, 1.0],
            seed: None,
            show_leaves: false,
            jitter_px: DEFAULT_JITTER_PX,
            growth: GrowthParams::default(),
            trees: [TreeLayerConfig::far(), TreeLayerConfig::mid(), TreeLayerConfig::near()],
            grass: [GrassLayerConfig::far(), GrassLayerConfig::mid(), GrassLayerConfig::near()],
            ground: GroundBar::default(),
            light: Some(FlickerLight::default()),
        }
    }
}

impl SceneConfig {
    /// Load a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        log::info!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Error;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::default();
        assert_eq!(config.clear_color, [0.55, 0.55, 0.6, 1.0]);
        assert_eq!(config.trees[0].count, 21);
        assert_eq!(config.trees[2].count, 7);
        assert_eq!(config.grass[2].passes, 2);
        assert!(config.light.is_some());
        assert!(!config.show_leaves);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "seed": 9, "show_leaves": true, "light": null }}"#).unwrap();

        let config = SceneConfig::load(file.path()).unwrap();
        assert_eq!(config.seed, Some(9));
        assert!(config.show_leaves);
        assert!(config.light.is_none());
        assert_eq!(config.trees, SceneConfig::default().trees);
    }

    #[test]
    fn test_save_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.json");
        let config = SceneConfig::default().with_seed(1234);
        config.save(&path).unwrap();
        assert_eq!(SceneConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(SceneConfig::load(file.path()), Err(Error::Config(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = SceneConfig::load(Path::new("/nonexistent/limbo/scene.json"));
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
