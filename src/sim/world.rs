/// GameState: the complete snapshot of a running game.
///
/// ## Board layers
///
/// Two board snapshots, same shape:
///   - `base_board` — the level as loaded. **Never mutated** after load.
///   - `board`      — the effective board (base + player-placed mirrors).
///
/// All mirror edits go through `place_mirror()` / `remove_mirror()`,
/// which also hint the beam session that the board moved under it
/// (the session re-traces every tick regardless). `restart_level`
/// resets `board = base_board.clone()`.
///
/// ## Consequences
///
/// The beam session reports reached cells as plain data; this module
/// turns them into outcomes: a bomb loses the level, a matching target
/// wins it, a sensor starts the alarm countdown. `tick_alarm` runs the
/// countdown and loses the level when it expires.

use std::collections::HashSet;

use crate::config::GameConfig;
use crate::domain::cell::Cell;
use crate::sim::beam::BeamSession;
use crate::sim::board::Board;
use crate::sim::event::CellReached;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Title,
    LevelSelect,
    Briefing,
    Playing,
    Won,
    Lost,
    GameComplete,
}

pub struct GameState {
    // ── Board layers ──
    /// Original level data. Never mutated after `load_level`.
    pub base_board: Board,
    /// Effective board = base + player-placed mirrors.
    pub board: Board,

    // ── Beam ──
    pub session: BeamSession,

    // ── Mirror budget ──
    /// `None` means unlimited.
    pub mirrors_max: Option<u32>,
    pub mirrors_used: u32,
    /// Cells holding a player-placed mirror. Only these refund the
    /// budget when removed; mirrors baked into the level do not.
    pub placed: HashSet<(usize, usize)>,

    // ── Alarm ──
    /// Milliseconds left on the countdown, once a sensor is crossed.
    pub alarm_remaining_ms: Option<f32>,

    // ── Meta ──
    pub phase: Phase,
    pub current_level: usize,
    pub total_levels: usize,
    pub level_name: String,
    pub briefing: Vec<String>,
    /// Highest level index the player may enter.
    pub unlocked_up_to: usize,
    pub near_miss_total: u32,

    // ── UI ──
    pub cursor: (usize, usize),
    pub message: String,
    pub message_timer: u32,

    // ── Level select ──
    pub select_cursor: usize,
    pub level_names: Vec<String>,
}

// ── Construction ──

impl GameState {
    pub fn new(config: &GameConfig) -> Self {
        GameState {
            base_board: Board::empty(),
            board: Board::empty(),
            session: BeamSession::new(config.beam_cells_per_sec, config.sample_step),
            mirrors_max: None,
            mirrors_used: 0,
            placed: HashSet::new(),
            alarm_remaining_ms: None,
            phase: Phase::Title,
            current_level: 0,
            total_levels: 0,
            level_name: String::new(),
            briefing: vec![],
            unlocked_up_to: 0,
            near_miss_total: 0,
            cursor: (0, 0),
            message: String::new(),
            message_timer: 0,
            select_cursor: 0,
            level_names: vec![],
        }
    }

    pub fn set_message(&mut self, msg: &str, duration: u32) {
        self.message = msg.to_string();
        self.message_timer = duration;
    }
}

// ── Mirror edits ──

impl GameState {
    pub fn mirrors_left(&self) -> Option<u32> {
        self.mirrors_max.map(|m| m.saturating_sub(self.mirrors_used))
    }

    /// Place (or toggle) a mirror under the cursor cell.
    ///
    /// On empty ground: consumes budget. On a mirror the player placed:
    /// the same kind picks it back up, the other kind swaps it for free.
    /// Every other cell refuses the edit.
    pub fn place_mirror(&mut self, row: usize, col: usize, kind: Cell) {
        debug_assert!(matches!(kind, Cell::MirrorSlash | Cell::MirrorBackslash));
        let here = self.board.cell_at(row, col);

        if self.placed.contains(&(row, col)) {
            if here == kind {
                self.remove_mirror(row, col);
            } else {
                self.board.set_cell(row, col, kind);
                self.session.notify_board_changed();
            }
            return;
        }

        if here != Cell::Empty {
            self.set_message("Can't place there", 40);
            return;
        }
        if let Some(0) = self.mirrors_left() {
            self.set_message("Out of mirrors", 40);
            return;
        }

        self.board.set_cell(row, col, kind);
        self.placed.insert((row, col));
        self.mirrors_used += 1;
        self.session.notify_board_changed();
    }

    /// Remove any mirror at the cell. Budget comes back only for
    /// mirrors the player placed; level mirrors vanish for good.
    pub fn remove_mirror(&mut self, row: usize, col: usize) {
        if !self.board.cell_at(row, col).is_mirror() {
            return;
        }
        self.board.set_cell(row, col, Cell::Empty);
        if self.placed.remove(&(row, col)) {
            self.mirrors_used = self.mirrors_used.saturating_sub(1);
        }
        self.session.notify_board_changed();
    }

    pub fn move_cursor(&mut self, dr: i32, dc: i32) {
        let r = (self.cursor.0 as i32 + dr).clamp(0, self.board.rows.max(1) as i32 - 1);
        let c = (self.cursor.1 as i32 + dc).clamp(0, self.board.cols.max(1) as i32 - 1);
        self.cursor = (r as usize, c as usize);
    }
}

// ── Beam consequences ──

impl GameState {
    /// Turn the cells the beam reached this frame into outcomes.
    pub fn apply_beam_events(&mut self, events: &[CellReached]) {
        for ev in events {
            match ev.cell {
                Cell::Bomb => {
                    self.session.set_animating(false);
                    self.phase = Phase::Lost;
                    self.set_message("The beam found a bomb", 120);
                    return;
                }
                Cell::Target(required) => {
                    if required.is_none() || required == ev.color {
                        self.session.set_animating(false);
                        self.near_miss_total += self.session.near_misses;
                        self.unlocked_up_to =
                            self.unlocked_up_to.max(self.current_level + 1);
                        self.phase = Phase::Won;
                        self.set_message("Target lit", 120);
                        return;
                    }
                    self.set_message("The target rejects this color", 60);
                }
                Cell::Alarm(secs) => {
                    if self.alarm_remaining_ms.is_none() {
                        self.alarm_remaining_ms = Some(secs as f32 * 1000.0);
                        self.set_message("Sensor tripped!", 60);
                    }
                }
                _ => {}
            }
        }
    }

    /// Run the alarm countdown. Expiry loses the level.
    pub fn tick_alarm(&mut self, elapsed_ms: f32) {
        if self.phase != Phase::Playing {
            return;
        }
        if let Some(remaining) = self.alarm_remaining_ms.as_mut() {
            *remaining -= elapsed_ms;
            if *remaining <= 0.0 {
                self.alarm_remaining_ms = Some(0.0);
                self.session.set_animating(false);
                self.phase = Phase::Lost;
                self.set_message("The alarm got you", 120);
            }
        }
    }

    /// Wipe the player's edits and start the level over.
    pub fn restart_level(&mut self) {
        self.board = self.base_board.clone();
        self.session.reset();
        self.mirrors_used = 0;
        self.placed.clear();
        self.alarm_remaining_ms = None;
        self.phase = Phase::Playing;
        self.set_message("Restarted", 40);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::ColorKey;
    use crate::sim::level::parse_row;

    fn state_with(rows: &[&str]) -> GameState {
        let mut w = GameState::new(&GameConfig::default());
        w.board = Board::new(rows.iter().map(|r| parse_row(r)).collect());
        w.base_board = w.board.clone();
        w.phase = Phase::Playing;
        w
    }

    fn reached(cell: Cell, row: usize, col: usize) -> CellReached {
        CellReached { cell, row, col, color: None }
    }

    // ── Mirror budget ──

    #[test]
    fn placement_respects_budget() {
        let mut w = state_with(&["S-R . . ."]);
        w.mirrors_max = Some(1);
        w.place_mirror(0, 1, Cell::MirrorSlash);
        assert_eq!(w.board.cell_at(0, 1), Cell::MirrorSlash);
        assert_eq!(w.mirrors_left(), Some(0));

        w.place_mirror(0, 2, Cell::MirrorSlash);
        assert_eq!(w.board.cell_at(0, 2), Cell::Empty);
    }

    #[test]
    fn same_kind_toggle_picks_mirror_back_up() {
        let mut w = state_with(&["S-R . . ."]);
        w.mirrors_max = Some(1);
        w.place_mirror(0, 1, Cell::MirrorSlash);
        w.place_mirror(0, 1, Cell::MirrorSlash);
        assert_eq!(w.board.cell_at(0, 1), Cell::Empty);
        assert_eq!(w.mirrors_left(), Some(1));
    }

    #[test]
    fn other_kind_swaps_in_place_for_free() {
        let mut w = state_with(&["S-R . . ."]);
        w.mirrors_max = Some(1);
        w.place_mirror(0, 1, Cell::MirrorSlash);
        w.place_mirror(0, 1, Cell::MirrorBackslash);
        assert_eq!(w.board.cell_at(0, 1), Cell::MirrorBackslash);
        assert_eq!(w.mirrors_left(), Some(0));
    }

    #[test]
    fn level_mirror_removal_gives_no_refund() {
        let mut w = state_with(&["S-R M-/ . ."]);
        w.mirrors_max = Some(2);
        w.remove_mirror(0, 1);
        assert_eq!(w.board.cell_at(0, 1), Cell::Empty);
        assert_eq!(w.mirrors_left(), Some(2));
        assert_eq!(w.mirrors_used, 0);
    }

    #[test]
    fn occupied_cells_refuse_placement() {
        let mut w = state_with(&["S-R # B T"]);
        w.place_mirror(0, 1, Cell::MirrorSlash);
        w.place_mirror(0, 2, Cell::MirrorSlash);
        assert_eq!(w.board.cell_at(0, 1), Cell::Wall);
        assert_eq!(w.board.cell_at(0, 2), Cell::Bomb);
        assert_eq!(w.mirrors_used, 0);
    }

    // ── Consequences ──

    #[test]
    fn bomb_loses_and_freezes_the_beam() {
        let mut w = state_with(&["S-R B"]);
        w.apply_beam_events(&[reached(Cell::Bomb, 0, 1)]);
        assert_eq!(w.phase, Phase::Lost);
        assert!(!w.session.is_animating());
    }

    #[test]
    fn plain_target_wins_and_unlocks_next() {
        let mut w = state_with(&["S-R T"]);
        w.current_level = 3;
        w.apply_beam_events(&[reached(Cell::Target(None), 0, 1)]);
        assert_eq!(w.phase, Phase::Won);
        assert_eq!(w.unlocked_up_to, 4);
    }

    #[test]
    fn tinted_target_needs_matching_beam() {
        let mut w = state_with(&["S-R T-G"]);
        w.apply_beam_events(&[reached(Cell::Target(Some(ColorKey::Green)), 0, 1)]);
        assert_eq!(w.phase, Phase::Playing);

        let hit = CellReached {
            cell: Cell::Target(Some(ColorKey::Green)),
            row: 0,
            col: 1,
            color: Some(ColorKey::Green),
        };
        w.apply_beam_events(&[hit]);
        assert_eq!(w.phase, Phase::Won);
    }

    #[test]
    fn alarm_counts_down_to_a_loss() {
        let mut w = state_with(&["S-R A-2 ."]);
        w.apply_beam_events(&[reached(Cell::Alarm(2), 0, 1)]);
        assert_eq!(w.alarm_remaining_ms, Some(2000.0));

        w.tick_alarm(1500.0);
        assert_eq!(w.phase, Phase::Playing);
        w.tick_alarm(600.0);
        assert_eq!(w.phase, Phase::Lost);
    }

    #[test]
    fn second_sensor_does_not_restart_countdown() {
        let mut w = state_with(&["S-R A-9 A-2 ."]);
        w.apply_beam_events(&[reached(Cell::Alarm(9), 0, 1)]);
        w.tick_alarm(5000.0);
        w.apply_beam_events(&[reached(Cell::Alarm(2), 0, 2)]);
        // Still the original countdown, 4 s left, not a fresh 2 s.
        let left = w.alarm_remaining_ms.unwrap();
        assert!((left - 4000.0).abs() < 1.0);
    }

    // ── Restart ──

    #[test]
    fn restart_reverts_edits_and_budget() {
        let mut w = state_with(&["S-R . . T"]);
        w.mirrors_max = Some(2);
        w.place_mirror(0, 1, Cell::MirrorSlash);
        w.alarm_remaining_ms = Some(500.0);
        w.phase = Phase::Lost;

        w.restart_level();
        assert_eq!(w.board.cell_at(0, 1), Cell::Empty);
        assert_eq!(w.mirrors_used, 0);
        assert_eq!(w.alarm_remaining_ms, None);
        assert_eq!(w.phase, Phase::Playing);
        assert!(w.session.is_animating());
    }
}
