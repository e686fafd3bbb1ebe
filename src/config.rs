/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.

use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Frame pacing for the render loop.
    pub frame_ms: u64,
    /// Beam tip speed, in board cells per second.
    pub beam_cells_per_sec: f32,
    /// Spacing of trail samples along the beam, in cells.
    pub sample_step: f32,
    pub levels_dir: PathBuf,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    beam: TomlBeam,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlBeam {
    #[serde(default = "default_frame_ms")]
    frame_ms: u64,
    #[serde(default = "default_cells_per_sec")]
    cells_per_sec: f32,
    #[serde(default = "default_sample_step")]
    sample_step: f32,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_levels_dir")]
    levels_dir: String,
}

// ── Defaults ──

fn default_frame_ms() -> u64 { 33 }           // ~30 fps
fn default_cells_per_sec() -> f32 { 6.0 }
fn default_sample_step() -> f32 { 0.25 }
fn default_levels_dir() -> String { "levels".into() }

impl Default for TomlBeam {
    fn default() -> Self {
        TomlBeam {
            frame_ms: default_frame_ms(),
            cells_per_sec: default_cells_per_sec(),
            sample_step: default_sample_step(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            levels_dir: default_levels_dir(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            frame_ms: default_frame_ms(),
            beam_cells_per_sec: default_cells_per_sec(),
            sample_step: default_sample_step(),
            levels_dir: PathBuf::from(default_levels_dir()),
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory,
    /// then XDG and system data dirs. Missing file or missing keys
    /// gracefully fall back to defaults.
    pub fn load() -> Self {
        let dirs = candidate_dirs();
        let raw = read_config_toml(&dirs);

        // A relative levels_dir resolves against the first search dir
        // that actually contains it.
        let requested = PathBuf::from(&raw.general.levels_dir);
        let levels_dir = if requested.is_absolute() {
            requested
        } else {
            dirs.iter()
                .map(|d| d.join(&raw.general.levels_dir))
                .find(|p| p.is_dir())
                .unwrap_or(requested)
        };

        GameConfig {
            frame_ms: raw.beam.frame_ms.max(1),
            beam_cells_per_sec: raw.beam.cells_per_sec.max(0.1),
            sample_step: raw.beam.sample_step.clamp(0.05, 1.0),
            levels_dir,
        }
    }
}

/// Directories to search for config and level data, in priority order.
fn candidate_dirs() -> Vec<PathBuf> {
    fn push(dir: PathBuf, dirs: &mut Vec<PathBuf>) {
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }
    let mut dirs: Vec<PathBuf> = vec![];

    // Exe directory first, through symlinks, so a packaged binary finds
    // its data next to the real file.
    if let Ok(exe) = std::env::current_exe() {
        let exe = exe.canonicalize().unwrap_or(exe);
        if let Some(dir) = exe.parent() {
            push(dir.to_path_buf(), &mut dirs);
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        push(cwd, &mut dirs);
    }
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(home).join(".local/share/beambreach");
        if xdg.is_dir() {
            push(xdg, &mut dirs);
        }
    }
    let system = PathBuf::from("/usr/share/beambreach");
    if system.is_dir() {
        push(system, &mut dirs);
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }
    dirs
}

/// First readable `config.toml` among the candidates, or defaults.
/// A file that exists but fails to parse warns and falls back, rather
/// than silently picking up a lower-priority copy.
fn read_config_toml(dirs: &[PathBuf]) -> TomlConfig {
    for path in dirs.iter().map(|d| d.join("config.toml")) {
        let text = match std::fs::read_to_string(&path) {
            Ok(t) => t,
            Err(_) => continue,
        };
        return toml::from_str(&text).unwrap_or_else(|e| {
            eprintln!("Warning: {} is invalid ({e}), using defaults", path.display());
            TomlConfig::default()
        });
    }
    TomlConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: TomlConfig = toml::from_str("[beam]\ncells_per_sec = 2.5\n").unwrap();
        assert_eq!(cfg.beam.cells_per_sec, 2.5);
        assert_eq!(cfg.beam.frame_ms, default_frame_ms());
        assert_eq!(cfg.general.levels_dir, "levels");
    }

    #[test]
    fn empty_toml_is_all_defaults() {
        let cfg: TomlConfig = toml::from_str("").unwrap();
        assert_eq!(cfg.beam.sample_step, default_sample_step());
    }
}
