/// Level loader.
///
/// ## Sources (priority order):
///   1. `levels/` directory (individual `.txt` files, sorted by name)
///   2. Built-in embedded campaign
///
/// ## Level file format (`.txt`):
///   ```
///   ! Level Name
///   @ mirrors 2
///   > Briefing line (repeatable)
///   <token rows>
///   ```
///
/// Token rows are whitespace-separated cell tokens:
///   `.`          empty            `#`          wall
///   `S-D/U/L/R`  emitter + aim    `B`          bomb
///   `T` `T-R`    target (+color)  `A-8`        alarm (seconds)
///   `M-/` `M-\`  fixed mirror     `P-A`        portal (pair letter)
///   `C-R/G/B`    color converter  `F-R/G/B`    color filter
///
/// Unknown tokens read as empty, a bare `S` aims down, a bare `A`
/// defaults to 10 seconds. Short rows are padded with empty cells.

use std::path::Path;

use crate::config::GameConfig;
use crate::domain::cell::{Cell, ColorKey};
use crate::domain::geom::Dir;
use crate::sim::board::Board;
use crate::sim::world::{GameState, Phase};

/// Runtime level data (owned, loaded from file or embedded).
pub struct LevelDef {
    pub name: String,
    pub briefing: Vec<String>,
    /// Mirror budget; `None` means unlimited.
    pub max_mirrors: Option<u32>,
    pub rows: Vec<Vec<Cell>>,
}

// ══════════════════════════════════════════════════════════════
// Public API
// ══════════════════════════════════════════════════════════════

/// Load a level into the game state. Preserves campaign progress.
pub fn load_level(world: &mut GameState, level_idx: usize, config: &GameConfig) {
    let levels = load_all(config);

    if level_idx >= levels.len() {
        world.phase = Phase::GameComplete;
        return;
    }

    let def = &levels[level_idx];
    world.current_level = level_idx;
    world.total_levels = levels.len();
    world.level_name = def.name.clone();
    world.briefing = def.briefing.clone();

    world.board = Board::new(def.rows.clone());
    world.base_board = world.board.clone();
    world.mirrors_max = def.max_mirrors;
    world.mirrors_used = 0;
    world.placed.clear();
    world.alarm_remaining_ms = None;
    world.session.reset();

    // Park the cursor on the emitter so the first arrow press starts
    // somewhere sensible.
    world.cursor = world
        .board
        .find_start()
        .map(|(r, c, _)| (r, c))
        .unwrap_or((0, 0));

    world.phase = if def.briefing.is_empty() {
        Phase::Playing
    } else {
        Phase::Briefing
    };
    world.set_message(&def.name, 90);
}

/// Level names for the select screen.
pub fn level_names(config: &GameConfig) -> Vec<String> {
    load_all(config).iter().map(|l| l.name.clone()).collect()
}

/// Parse one row of whitespace-separated cell tokens.
pub fn parse_row(line: &str) -> Vec<Cell> {
    line.split_whitespace().map(parse_token).collect()
}

// ══════════════════════════════════════════════════════════════
// Token parsing
// ══════════════════════════════════════════════════════════════

fn color_key(ch: char) -> Option<ColorKey> {
    match ch {
        'R' => Some(ColorKey::Red),
        'G' => Some(ColorKey::Green),
        'B' => Some(ColorKey::Blue),
        _ => None,
    }
}

fn parse_token(tok: &str) -> Cell {
    let (head, arg) = match tok.split_once('-') {
        Some((h, a)) => (h, a),
        None => (tok, ""),
    };
    match head {
        "." => Cell::Empty,
        "#" => Cell::Wall,
        "B" => Cell::Bomb,
        "S" => Cell::Start(match arg {
            "U" => Dir::Up,
            "L" => Dir::Left,
            "R" => Dir::Right,
            _ => Dir::Down,
        }),
        "M" => match arg {
            "/" => Cell::MirrorSlash,
            "\\" => Cell::MirrorBackslash,
            _ => Cell::Empty,
        },
        "T" => Cell::Target(arg.chars().next().and_then(color_key)),
        "P" => match arg.chars().next() {
            Some(group) => Cell::Portal(group),
            None => Cell::Empty,
        },
        "C" => match arg.chars().next().and_then(color_key) {
            Some(key) => Cell::Converter(key),
            None => Cell::Empty,
        },
        "F" => match arg.chars().next().and_then(color_key) {
            Some(key) => Cell::Filter(key),
            None => Cell::Empty,
        },
        "A" => Cell::Alarm(arg.parse().unwrap_or(10)),
        _ => Cell::Empty,
    }
}

// ══════════════════════════════════════════════════════════════
// Level file parsing
// ══════════════════════════════════════════════════════════════

/// Parse a single level from text content. Returns `None` for files
/// with no token rows.
fn parse_level_file(content: &str) -> Option<LevelDef> {
    let mut name = String::new();
    let mut briefing = vec![];
    let mut max_mirrors = None;
    let mut rows: Vec<Vec<Cell>> = vec![];

    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix('!') {
            if name.is_empty() {
                name = rest.trim().to_string();
            }
        } else if let Some(rest) = trimmed.strip_prefix('>') {
            briefing.push(rest.trim().to_string());
        } else if let Some(rest) = trimmed.strip_prefix("@ mirrors") {
            max_mirrors = rest.trim().parse().ok();
        } else {
            rows.push(parse_row(trimmed));
        }
    }

    if rows.is_empty() {
        return None;
    }

    // Pad ragged rows so the board is rectangular.
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, Cell::Empty);
    }

    if name.is_empty() {
        name = "Unnamed Breach".to_string();
    }

    Some(LevelDef { name, briefing, max_mirrors, rows })
}

// ══════════════════════════════════════════════════════════════
// Directory loading (individual .txt files)
// ══════════════════════════════════════════════════════════════

fn load_all(config: &GameConfig) -> Vec<LevelDef> {
    if config.levels_dir.is_dir() {
        let mut found = load_from_directory(&config.levels_dir);
        if !found.is_empty() {
            found.sort_by(|a, b| a.0.cmp(&b.0));
            return found.into_iter().map(|(_, def)| def).collect();
        }
    }
    embedded_levels()
}

fn load_from_directory(dir: &Path) -> Vec<(String, LevelDef)> {
    let mut results = vec![];

    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(_) => return results,
    };

    for entry in entries.flatten() {
        let path = entry.path();
        if path.extension().map_or(false, |e| e == "txt") {
            if let Ok(content) = std::fs::read_to_string(&path) {
                if let Some(def) = parse_level_file(&content) {
                    let filename = path
                        .file_name()
                        .unwrap_or_default()
                        .to_string_lossy()
                        .to_string();
                    results.push((filename, def));
                }
            }
        }
    }

    results
}

// ══════════════════════════════════════════════════════════════
// Embedded campaign
// ══════════════════════════════════════════════════════════════

fn embedded_levels() -> Vec<LevelDef> {
    vec![
        make_embedded("Breach 1 - First Light", 0, &[
            "The emitter fires on its own. Watch the sweep.",
        ], &[
            "# # # # # # #",
            "# S-R . . . T #",
            "# # # # # # #",
        ]),
        make_embedded("Breach 2 - One Bounce", 1, &[
            "Place a \\ mirror in the beam to bend it.",
        ], &[
            "# # # # # # #",
            "# S-R . . . . #",
            "# . . . . . #",
            "# . . . . T #",
            "# # # # # # #",
        ]),
        make_embedded("Breach 3 - The Basement", 3, &[
            "Three bends. Mind the inner walls.",
        ], &[
            "# # # # # # # #",
            "# S-D . . . . . #",
            "# . # # # # . #",
            "# . # T . . . #",
            "# . # # # # . #",
            "# . . . . . . #",
            "# # # # # # # #",
        ]),
        make_embedded("Breach 4 - Yellowcake", 2, &[
            "Bombs end the run on contact.",
            "Grazing past one is noted on your record.",
        ], &[
            "# # # # # # # #",
            "# S-R . B . . . #",
            "# . . . . B . #",
            "# B . . B . . #",
            "# . . . . . T #",
            "# # # # # # # #",
        ]),
        make_embedded("Breach 5 - Portal Primer", 0, &[
            "Paired portals pass the beam through, heading unchanged.",
        ], &[
            "# # # # # # #",
            "# S-R . P-A . . #",
            "# # # # # # #",
            "# . . P-A . T #",
            "# # # # # # #",
        ]),
        make_embedded("Breach 6 - Twin Doors", 1, &[
            "Two pairs. Only one of them helps.",
        ], &[
            "# # # # # # # #",
            "# S-D . . P-B . . #",
            "# . . # # . . #",
            "# P-A . # # . P-A #",
            "# . . # # . . #",
            "# . . P-B . T . #",
            "# # # # # # # #",
        ]),
        make_embedded("Breach 7 - Silent Run", 2, &[
            "Crossing the sensor starts a countdown.",
            "Reach the target before it runs out.",
        ], &[
            "# # # # # # # #",
            "# S-R . A-6 . . . #",
            "# . . . . . . #",
            "# T . . . . . #",
            "# # # # # # # #",
        ]),
        make_embedded("Breach 8 - Alarm Corridor", 2, &[
            "Four seconds from the first sensor. Route fast.",
        ], &[
            "# # # # # # # # #",
            "# S-R A-4 . . A-4 . . #",
            "# # # # . # # # #",
            "# T . . . . . . #",
            "# # # # # # # # #",
        ]),
        make_embedded("Breach 9 - Going Green", 1, &[
            "Tinted targets only accept a matching beam.",
        ], &[
            "# # # # # # # #",
            "# S-R . C-G . . . #",
            "# . . . . . . #",
            "# . . . T-G . . #",
            "# # # # # # # #",
        ]),
        make_embedded("Breach 10 - Primary Relay", 1, &[
            "A converter overwrites the tint. The last one wins.",
        ], &[
            "# # # # # # # #",
            "# S-R C-R . C-B . . #",
            "# . . . . . . #",
            "# . . . . T-B . #",
            "# # # # # # # #",
        ]),
        make_embedded("Breach 11 - Gatekeeper", 0, &[
            "Filters absorb every beam but their own color.",
        ], &[
            "# # # # # # # # #",
            "# S-R . C-R . F-R . T #",
            "# . . . . . . . #",
            "# . . C-G . . . . #",
            "# # # # # # # # #",
        ]),
        make_embedded("Breach 12 - Spectrum Split", 2, &[
            "The straight way is filtered shut.",
            "Find the tint the gate wants.",
        ], &[
            "# # # # # # # # #",
            "# S-R . C-B . . F-G . #",
            "# . . . . . . . #",
            "# . C-G . . . . . #",
            "# . . . . . . . #",
            "# . . . . T-G . . #",
            "# # # # # # # # #",
        ]),
    ]
}

fn make_embedded(name: &str, mirrors: u32, briefing: &[&str], map: &[&str]) -> LevelDef {
    let mut rows: Vec<Vec<Cell>> = map.iter().map(|s| parse_row(s)).collect();
    let width = rows.iter().map(|r| r.len()).max().unwrap_or(0);
    for row in &mut rows {
        row.resize(width, Cell::Empty);
    }
    LevelDef {
        name: name.to_string(),
        briefing: briefing.iter().map(|s| s.to_string()).collect(),
        max_mirrors: Some(mirrors),
        rows,
    }
}
