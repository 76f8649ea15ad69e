//! Project configuration (beadgen.yaml) parsing.
//!
//! The config file holds default grid and output settings so they don't
//! have to be repeated on every invocation. Command-line flags win over
//! anything set here.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{BeadError, Result};
use crate::quantize::{Resample, TargetHeight};
use crate::render::{BeadStyle, DEFAULT_CELL_SIZE};
use crate::types::Palette;

/// Config filename looked up in the working directory.
pub const CONFIG_FILENAME: &str = "beadgen.yaml";

/// Grid width used when nothing else is given.
pub const DEFAULT_WIDTH: u32 = 29;

/// Project configuration loaded from beadgen.yaml.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Grid width in beads.
    pub width: u32,

    /// Grid height in beads, or `auto`.
    pub height: TargetHeight,

    /// Palette file; the builtin palette is used when unset.
    pub palette: Option<PathBuf>,

    /// Output directory for rendered patterns.
    pub output: PathBuf,

    /// Pixels per bead in rendered images.
    pub cell_size: u32,

    /// Bead drawing style.
    pub style: BeadStyle,

    /// Resampling filter.
    pub filter: Resample,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: TargetHeight::Auto,
            palette: None,
            output: PathBuf::from("dist"),
            cell_size: DEFAULT_CELL_SIZE,
            style: BeadStyle::Circle,
            filter: Resample::Triangle,
        }
    }
}

impl Config {
    /// Load config from a beadgen.yaml file.
    ///
    /// Relative `palette` and `output` paths are resolved against the file's
    /// directory.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| BeadError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read config: {}", e),
        })?;

        let mut config = Self::parse(&content)?;
        if let Some(dir) = path.parent() {
            config.palette = config.palette.map(|palette| dir.join(palette));
            config.output = dir.join(&config.output);
        }
        Ok(config)
    }

    /// Parse config from a YAML string.
    pub fn parse(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| BeadError::Parse {
            message: format!("Invalid config: {}", e),
            help: Some(format!("Check {} syntax", CONFIG_FILENAME)),
        })
    }

    /// Load `path` if given, else `beadgen.yaml` in `dir` if present,
    /// else defaults.
    pub fn discover(path: Option<&Path>, dir: &Path) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let candidate = dir.join(CONFIG_FILENAME);
        if candidate.is_file() {
            Self::load(&candidate)
        } else {
            Ok(Self::default())
        }
    }

    /// Load the configured palette, or the builtin one.
    pub fn load_palette(&self) -> Result<Palette> {
        match &self.palette {
            Some(path) => Palette::load(path),
            None => Ok(Palette::perler()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.width, 29);
        assert_eq!(config.height, TargetHeight::Auto);
        assert_eq!(config.output, PathBuf::from("dist"));
        assert_eq!(config.cell_size, 12);
        assert_eq!(config.style, BeadStyle::Circle);
        assert_eq!(config.filter, Resample::Triangle);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_full() {
        let yaml = "\
width: 40
height: 30
palette: palettes/hama.yaml
output: out
cell_size: 20
style: square
filter: lanczos3
";
        let config = Config::parse(yaml).unwrap();
        assert_eq!(
            config,
            Config {
                width: 40,
                height: TargetHeight::Fixed(30),
                palette: Some(PathBuf::from("palettes/hama.yaml")),
                output: PathBuf::from("out"),
                cell_size: 20,
                style: BeadStyle::Square,
                filter: Resample::Lanczos3,
            }
        );
    }

    #[test]
    fn test_parse_partial_keeps_defaults() {
        let config = Config::parse("height: auto\nstyle: circle\n").unwrap();
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.height, TargetHeight::Auto);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Config::parse("colour_count: 12\n").is_err());
        assert!(Config::parse("height: tall\n").is_err());
    }

    #[test]
    fn test_discover_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_discover_resolves_palette_relative_to_config() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "palette: mine.yaml\n").unwrap();

        let config = Config::discover(None, dir.path()).unwrap();
        assert_eq!(config.palette, Some(dir.path().join("mine.yaml")));
    }

    #[test]
    fn test_load_resolves_output_like_palette() {
        let dir = tempdir().unwrap();
        let sub = dir.path().join("sub");
        std::fs::create_dir(&sub).unwrap();
        let path = sub.join(CONFIG_FILENAME);
        std::fs::write(&path, "palette: mine.yaml\noutput: out\n").unwrap();

        let config = Config::discover(Some(&path), dir.path()).unwrap();
        assert_eq!(config.palette, Some(sub.join("mine.yaml")));
        assert_eq!(config.output, sub.join("out"));

        // Defaulted output also lands next to the config file
        std::fs::write(&path, "width: 10\n").unwrap();
        assert_eq!(Config::load(&path).unwrap().output, sub.join("dist"));

        // Absolute paths are kept
        let abs = dir.path().join("elsewhere");
        std::fs::write(&path, format!("output: {}\n", abs.display())).unwrap();
        assert_eq!(Config::load(&path).unwrap().output, abs);
    }

    #[test]
    fn test_load_palette() {
        let dir = tempdir().unwrap();
        let palette_path = dir.path().join("mini.yaml");
        std::fs::write(
            &palette_path,
            "id: mini\nname: Mini\ncolors:\n  - { id: K, name: Black, hex: '#000000' }\n",
        )
        .unwrap();

        let config = Config {
            palette: Some(palette_path),
            ..Config::default()
        };
        assert_eq!(config.load_palette().unwrap().len(), 1);
        assert_eq!(Config::default().load_palette().unwrap().len(), 28);
    }
}
