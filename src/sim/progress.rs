/// Campaign progress persistence.
///
/// One small key-value file:
///   ```
///   unlocked=4
///   near_misses=11
///   ```
///
/// Written after every win, read once at startup. A missing or
/// malformed file just means a fresh campaign.

use std::path::PathBuf;

use crate::sim::world::GameState;

const PROGRESS_FILE: &str = "progress.dat";

fn save_dir() -> PathBuf {
    // 1. Try exe directory (works for local/portable installs)
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            // Check if writable (system installs like /usr/games/ won't be)
            let test_path = parent.join(".write_test_beambreach");
            if std::fs::write(&test_path, "").is_ok() {
                let _ = std::fs::remove_file(&test_path);
                return parent.to_path_buf();
            }
        }
    }

    // 2. XDG data home (~/.local/share/beambreach) for system installs
    if let Ok(home) = std::env::var("HOME") {
        let xdg = PathBuf::from(&home).join(".local/share/beambreach");
        if std::fs::create_dir_all(&xdg).is_ok() {
            return xdg;
        }
    }

    // 3. Fallback to CWD
    std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
}

fn progress_path() -> PathBuf {
    save_dir().join(PROGRESS_FILE)
}

pub fn save_progress(world: &GameState) -> Result<(), String> {
    let content = serialize(world.unlocked_up_to, world.near_miss_total);
    std::fs::write(progress_path(), content).map_err(|e| format!("Save failed: {}", e))
}

/// Apply stored progress to a fresh game state. Absent or bad files
/// leave the defaults alone.
pub fn load_progress(world: &mut GameState) {
    let candidates = [progress_path(), PathBuf::from(PROGRESS_FILE)];
    for path in &candidates {
        if let Ok(content) = std::fs::read_to_string(path) {
            let (unlocked, near_misses) = parse_progress(&content);
            world.unlocked_up_to = unlocked;
            world.near_miss_total = near_misses;
            return;
        }
    }
}

fn serialize(unlocked: usize, near_misses: u32) -> String {
    format!("unlocked={}\nnear_misses={}\n", unlocked, near_misses)
}

fn parse_progress(content: &str) -> (usize, u32) {
    let mut unlocked = 0;
    let mut near_misses = 0;
    for line in content.lines() {
        if let Some(val) = line.strip_prefix("unlocked=") {
            unlocked = val.trim().parse().unwrap_or(0);
        } else if let Some(val) = line.strip_prefix("near_misses=") {
            near_misses = val.trim().parse().unwrap_or(0);
        }
    }
    (unlocked, near_misses)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip() {
        let (u, n) = parse_progress(&serialize(7, 23));
        assert_eq!((u, n), (7, 23));
    }

    #[test]
    fn garbage_reads_as_fresh_campaign() {
        assert_eq!(parse_progress("unlocked=banana\nwhat\n"), (0, 0));
        assert_eq!(parse_progress(""), (0, 0));
    }
}
