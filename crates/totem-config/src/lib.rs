use anyhow::Context;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the settings file search when set.
pub const CONFIG_ENV: &str = "TOTEM_CONFIG";

const SEARCH_PATHS: [&str; 2] = ["configs/totem.toml", "../../configs/totem.toml"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotemSettings {
    pub affinity_path: PathBuf,
    pub weights_path: PathBuf,
    pub multipliers_path: Option<PathBuf>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
struct TablesToml {
    affinity: PathBuf,
    weights: PathBuf,
    #[serde(default)]
    multipliers: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
struct OutputToml {
    #[serde(default = "default_output_dir")]
    dir: PathBuf,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("outputs")
}

#[derive(Debug, Clone, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    tables: Option<TablesToml>,
    #[serde(default)]
    output: Option<OutputToml>,
}

/// `$TOTEM_CONFIG` if set, else the first of `configs/totem.toml`,
/// `../../configs/totem.toml` that exists.
pub fn find_settings_file() -> anyhow::Result<PathBuf> {
    if let Ok(path) = env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        if !path.exists() {
            anyhow::bail!("{} points to a missing file: {}", CONFIG_ENV, path.display());
        }
        return Ok(path);
    }
    for p in &SEARCH_PATHS {
        let path = Path::new(p);
        if path.exists() {
            return Ok(path.to_path_buf());
        }
    }
    anyhow::bail!("Could not find totem.toml in {:?} (or set {})", SEARCH_PATHS, CONFIG_ENV);
}

/// Parse settings text. Relative table and output paths resolve against
/// `base_dir`, normally the directory holding the settings file.
pub fn parse_settings(text: &str, base_dir: &Path) -> anyhow::Result<TotemSettings> {
    let root: RootConfigToml =
        toml::from_str(text).map_err(|e| anyhow::anyhow!("Failed to parse totem.toml: {e}"))?;
    let tables = root.tables.ok_or_else(|| {
        anyhow::anyhow!("Missing [tables] section in totem.toml (needs affinity and weights)")
    })?;
    let output_dir = root.output.map(|o| o.dir).unwrap_or_else(default_output_dir);

    let resolve = |p: PathBuf| if p.is_relative() { base_dir.join(p) } else { p };
    Ok(TotemSettings {
        affinity_path: resolve(tables.affinity),
        weights_path: resolve(tables.weights),
        multipliers_path: tables.multipliers.map(resolve),
        output_dir: resolve(output_dir),
    })
}

pub fn load_settings_from(path: &Path) -> anyhow::Result<TotemSettings> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    // settings live in configs/, tables are addressed from the repo root
    let base_dir = if base_dir.file_name().map_or(false, |n| n == "configs") {
        base_dir.parent().unwrap_or(base_dir)
    } else {
        base_dir
    };
    parse_settings(&text, base_dir)
}

pub fn load_settings() -> anyhow::Result<TotemSettings> {
    let path = find_settings_file()?;
    load_settings_from(&path)
}

/// Fail early, naming the path, if a configured table file is absent.
pub fn validate_table_paths(settings: &TotemSettings) -> anyhow::Result<()> {
    let required = [&settings.affinity_path, &settings.weights_path];
    for p in required.into_iter().chain(settings.multipliers_path.as_ref()) {
        if !p.exists() {
            anyhow::bail!("Missing table file: {}", p.display());
        }
    }
    Ok(())
}
