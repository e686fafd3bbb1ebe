/// Animation scheduler and continuity differ.
///
/// A `BeamSession` owns the animated sweep of one firing: the composed
/// path, the travel distance of the visible tip, the visited-cell
/// trail, and the once-per-session bookkeeping (alarms fired, bombs
/// already counted as near misses).
///
/// The session is advanced from the frame loop:
///
///   let events = world.session.tick(&world.board, dt_ms);
///
/// Every tick re-traces from the board snapshot and compares the
/// result against the cached path, so board edits are picked up on
/// their own; `notify_board_changed` is an optional hint that skips
/// the comparison. On a change, travel is preserved up to the length
/// the old and new paths share, so the untouched prefix of the beam
/// never flickers or replays.

use std::collections::HashSet;

use crate::domain::cell::Cell;
use crate::sim::board::Board;
use crate::sim::event::CellReached;
use crate::sim::trace::{compose_path, Path, EPS};

/// Sign with a small deadband, so float noise near zero never flips a
/// direction comparison.
fn sign(v: f32) -> i8 {
    if v > EPS {
        1
    } else if v < -EPS {
        -1
    } else {
        0
    }
}

/// Length of the shared prefix of two paths: the sum of per-index
/// minimum lengths, stopping at the first segment whose direction
/// signs disagree. Used to rebase travel after a board edit.
pub fn common_length(old: &Path, new: &Path) -> f32 {
    let mut shared = 0.0;
    for (a, b) in old.segments.iter().zip(new.segments.iter()) {
        if sign(a.dx()) != sign(b.dx()) || sign(a.dy()) != sign(b.dy()) {
            break;
        }
        shared += a.len.min(b.len);
        if (a.len - b.len).abs() > EPS {
            break;
        }
    }
    shared
}

fn path_changed(old: &Path, new: &Path) -> bool {
    if old.segments.len() != new.segments.len() {
        return true;
    }
    old.segments.iter().zip(new.segments.iter()).any(|(a, b)| {
        (a.len - b.len).abs() > EPS
            || sign(a.dx()) != sign(b.dx())
            || sign(a.dy()) != sign(b.dy())
    })
}

pub struct BeamSession {
    pub path: Path,
    travel: f32,
    animating: bool,
    board_dirty: bool,
    /// Alarms fire once per session even if the beam is rerouted over
    /// them again.
    fired_alarms: HashSet<(usize, usize)>,
    /// Bombs already counted as near misses this session.
    flagged_bombs: HashSet<(usize, usize)>,
    pub near_misses: u32,
    visited: HashSet<(usize, usize)>,
    /// Tip speed in cells per millisecond.
    speed: f32,
    /// Spacing of trail samples along each segment, in cells.
    sample_step: f32,
}

impl BeamSession {
    pub fn new(cells_per_sec: f32, sample_step: f32) -> Self {
        BeamSession {
            path: Path::empty(),
            travel: 0.0,
            animating: true,
            board_dirty: true,
            fired_alarms: HashSet::new(),
            flagged_bombs: HashSet::new(),
            near_misses: 0,
            visited: HashSet::new(),
            speed: cells_per_sec / 1000.0,
            sample_step: sample_step.max(0.05),
        }
    }

    /// Start the session over: fresh path, zero travel, all
    /// once-per-session state cleared.
    pub fn reset(&mut self) {
        self.path = Path::empty();
        self.travel = 0.0;
        self.animating = true;
        self.board_dirty = true;
        self.fired_alarms.clear();
        self.flagged_bombs.clear();
        self.near_misses = 0;
        self.visited.clear();
    }

    /// Optional hint that a board edit happened. Purely advisory: the
    /// scheduler re-traces every tick and detects edits on its own.
    pub fn notify_board_changed(&mut self) {
        self.board_dirty = true;
    }

    pub fn set_animating(&mut self, on: bool) {
        self.animating = on;
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn travel(&self) -> f32 {
        self.travel
    }

    pub fn is_visited(&self, row: usize, col: usize) -> bool {
        self.visited.contains(&(row, col))
    }

    /// Advance the sweep by `elapsed_ms` against the current board and
    /// return the cells the tip reached this frame. Does nothing while
    /// paused.
    pub fn tick(&mut self, board: &Board, elapsed_ms: f32) -> Vec<CellReached> {
        if !self.animating {
            return vec![];
        }

        // Re-trace every tick; an unchanged board reduces to the shape
        // comparison below.
        let mut new = compose_path(board);
        if self.board_dirty || path_changed(&self.path, &new) {
            self.board_dirty = false;
            self.travel = self.travel.min(common_length(&self.path, &new));
            // Carry fired state across the matching prefix. Everything
            // from the first divergent segment on is fresh, including a
            // segment whose terminal changed, so its event may emit even
            // when the preserved travel already covers it.
            for (old, seg) in self.path.segments.iter().zip(new.segments.iter_mut()) {
                if (old.len - seg.len).abs() > EPS
                    || sign(old.dx()) != sign(seg.dx())
                    || sign(old.dy()) != sign(seg.dy())
                {
                    break;
                }
                seg.triggered = old.triggered;
            }
            self.path = new;
        }

        self.travel += self.speed * elapsed_ms;
        let total = self.path.total_len();
        if self.travel > total {
            self.travel = total; // tip holds at the final endpoint
        }

        let mut events = vec![];
        let mut offset = 0.0;
        for seg in &mut self.path.segments {
            let reached = self.travel >= offset + seg.len - EPS;
            offset += seg.len;
            if !reached || seg.triggered || seg.len <= EPS {
                continue;
            }
            seg.triggered = true;
            match seg.cell {
                Cell::Bomb | Cell::Target(_) => {
                    events.push(CellReached {
                        cell: seg.cell,
                        row: seg.row,
                        col: seg.col,
                        color: seg.color,
                    });
                }
                Cell::Alarm(_) => {
                    if self.fired_alarms.insert((seg.row, seg.col)) {
                        events.push(CellReached {
                            cell: seg.cell,
                            row: seg.row,
                            col: seg.col,
                            color: seg.color,
                        });
                    }
                }
                _ => {}
            }
        }

        self.resample_trail(board);
        events
    }

    /// Rebuild the visited set from the swept portion of the path and
    /// count fresh bomb near misses. Rebuilding from scratch keeps the
    /// trail consistent after a continuity rebase shortens the sweep.
    fn resample_trail(&mut self, board: &Board) {
        self.visited.clear();
        let mut remaining = self.travel;
        for seg in &self.path.segments {
            if remaining <= 0.0 {
                break;
            }
            let swept = remaining.min(seg.len);
            let mut d = 0.0;
            loop {
                let p = seg.point_at(d);
                let (r, c) = (p.y.floor() as i32, p.x.floor() as i32);
                if board.in_bounds(r, c) {
                    self.visited.insert((r as usize, c as usize));
                }
                if d >= swept {
                    break;
                }
                d = (d + self.sample_step).min(swept);
            }
            remaining -= seg.len;
        }

        // A bomb the beam is headed straight into terminates a segment;
        // skipping those keeps a pending direct hit off the graze count
        // even before the tip arrives.
        let on_path: HashSet<(usize, usize)> =
            self.path.segments.iter().map(|s| (s.row, s.col)).collect();

        let cells: Vec<(usize, usize)> = self.visited.iter().copied().collect();
        for (r, c) in cells {
            for dr in -1i32..=1 {
                for dc in -1i32..=1 {
                    if dr == 0 && dc == 0 {
                        continue;
                    }
                    let (nr, nc) = (r as i32 + dr, c as i32 + dc);
                    if !board.in_bounds(nr, nc) {
                        continue;
                    }
                    let key = (nr as usize, nc as usize);
                    if board.cell_at(key.0, key.1) == Cell::Bomb
                        && !on_path.contains(&key)
                        && self.flagged_bombs.insert(key)
                    {
                        self.near_misses += 1;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::cell::Cell;
    use crate::sim::level::parse_row;

    fn board_from(rows: &[&str]) -> Board {
        Board::new(rows.iter().map(|r| parse_row(r)).collect())
    }

    /// A session fast enough to finish any test board in one tick.
    fn instant_session() -> BeamSession {
        BeamSession::new(1_000_000.0, 0.25)
    }

    // ── Continuity differ ──

    #[test]
    fn identical_paths_share_full_length() {
        let b = board_from(&["S-R . . #"]);
        let p = compose_path(&b);
        let total = p.total_len();
        assert!((common_length(&p, &p) - total).abs() < 1e-4);
    }

    #[test]
    fn divergence_cuts_shared_prefix() {
        let old = compose_path(&board_from(&[
            "S-R . . M-\\",
            ". . . .",
            ". . . T",
        ]));
        // Mirror removed: beam now runs straight off the right edge.
        let new = compose_path(&board_from(&[
            "S-R . . .",
            ". . . .",
            ". . . T",
        ]));
        let shared = common_length(&old, &new);
        // First segments agree in direction; old stops at the mirror
        // center (len 3.0), new at the edge (len 3.5).
        assert!((shared - 3.0).abs() < 1e-4);
    }

    #[test]
    fn opposite_direction_shares_nothing_past_the_bend() {
        let old = compose_path(&board_from(&[
            "S-D . .",
            "M-/ . .",
            ". . .",
        ]));
        let new = compose_path(&board_from(&[
            "S-D . .",
            "M-\\ . .",
            ". . .",
        ]));
        // Segment 0 (downward, len 1.0) agrees; segment 1 heads left in
        // one path and right in the other.
        let shared = common_length(&old, &new);
        assert!((shared - 1.0).abs() < 1e-4);
    }

    // ── Scheduler ──

    #[test]
    fn walled_target_emits_exactly_one_event() {
        let b = board_from(&[
            "# # # # #",
            "# S-R . T #",
            "# # # # #",
        ]);
        let mut s = instant_session();
        let events = s.tick(&b, 1000.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cell, Cell::Target(None));
        assert_eq!((events[0].row, events[0].col), (1, 3));
        // Later ticks stay quiet; the tip holds at the target.
        assert!(s.tick(&b, 1000.0).is_empty());
        assert!((s.travel() - 2.0).abs() < 1e-3);
    }

    #[test]
    fn slow_sweep_emits_nothing_until_arrival() {
        // 1 cell/sec over a 2-cell run.
        let b = board_from(&["S-R . T"]);
        let mut s = BeamSession::new(1.0, 0.25);
        assert!(s.tick(&b, 500.0).is_empty());
        assert!(s.tick(&b, 500.0).is_empty());
        assert!(s.tick(&b, 500.0).is_empty());
        let events = s.tick(&b, 600.0);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn paused_session_does_not_advance() {
        let b = board_from(&["S-R . T"]);
        let mut s = instant_session();
        s.set_animating(false);
        assert!(s.tick(&b, 1000.0).is_empty());
        assert_eq!(s.travel(), 0.0);
    }

    #[test]
    fn alarm_fires_once_per_session() {
        let b = board_from(&["S-R A-5 . #"]);
        let mut s = instant_session();
        let events = s.tick(&b, 100.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cell, Cell::Alarm(5));

        // Reroute away and back: the alarm cell is crossed again by a
        // fresh segment, but stays silent.
        let open = board_from(&["S-R . . ."]);
        s.notify_board_changed();
        s.tick(&open, 100.0);
        s.notify_board_changed();
        let again = s.tick(&b, 100.0);
        assert!(again.is_empty());
    }

    #[test]
    fn reset_rearms_alarms() {
        let b = board_from(&["S-R A-5 . #"]);
        let mut s = instant_session();
        assert_eq!(s.tick(&b, 100.0).len(), 1);
        s.reset();
        assert_eq!(s.tick(&b, 100.0).len(), 1);
    }

    #[test]
    fn board_edit_rebases_travel_to_shared_prefix() {
        let b = board_from(&["S-R . . . . #"]);
        // 1 cell/sec: after 3 s the tip is 3 cells out.
        let mut s = BeamSession::new(1.0, 0.25);
        s.tick(&b, 3000.0);
        assert!((s.travel() - 3.0).abs() < 1e-3);

        // Drop a mirror two cells out; the shared prefix is 2.0, so the
        // sweep rewinds to the bend rather than replaying from zero.
        let edited = board_from(&["S-R . M-\\ . . #", ". . . . . .", ". . T . . ."]);
        s.notify_board_changed();
        s.tick(&edited, 0.0);
        assert!(s.travel() <= 2.0 + 1e-3);
        assert!(s.travel() >= 2.0 - 1e-3);
    }

    #[test]
    fn preserved_segments_do_not_replay() {
        // Alarm one cell out, then a long run to a wall.
        let b = board_from(&["S-R A-5 . . . . . #"]);
        let mut s = BeamSession::new(1.0, 0.25);
        let events = s.tick(&b, 3000.0);
        assert_eq!(events.len(), 1);

        // Edit downstream of the tip: prefix through the alarm is
        // preserved, and the alarm segment must not re-emit.
        let edited = board_from(&["S-R A-5 . . . . M-\\ #", ". . . . . . . .", ". . . . . . T ."]);
        s.notify_board_changed();
        let after = s.tick(&edited, 0.0);
        assert!(after.is_empty());
    }

    #[test]
    fn untracked_board_edit_is_self_detected() {
        // Ticking re-traces from the board snapshot, so an edit with no
        // change notification is still picked up, and the event of the
        // new terminal fires even though travel already reaches it.
        let open = board_from(&["S-R . . ."]);
        let mut s = instant_session();
        assert!(s.tick(&open, 100.0).is_empty());

        let mut edited = open.clone();
        edited.set_cell(0, 3, Cell::Target(None));
        let events = s.tick(&edited, 100.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cell, Cell::Target(None));
    }

    #[test]
    fn unrelated_tile_edit_keeps_travel() {
        let b = board_from(&["S-R . . . . #", ". . . . . ."]);
        let mut s = BeamSession::new(1.0, 0.25);
        s.tick(&b, 3000.0);

        // Edit off the beam line: the path is unchanged, travel holds.
        let edited = board_from(&["S-R . . . . #", ". M-\\ . . . ."]);
        s.notify_board_changed();
        s.tick(&edited, 0.0);
        assert!((s.travel() - 3.0).abs() < 1e-3);
    }

    // ── Trail and near misses ──

    #[test]
    fn trail_covers_swept_cells_only() {
        let b = board_from(&["S-R . . . #"]);
        let mut s = BeamSession::new(1.0, 0.25);
        s.tick(&b, 1600.0); // tip ~1.6 cells out, inside column 2
        assert!(s.is_visited(0, 0));
        assert!(s.is_visited(0, 1));
        assert!(s.is_visited(0, 2));
        assert!(!s.is_visited(0, 3));
    }

    #[test]
    fn near_miss_counted_once_per_bomb() {
        // Beam runs right along row 0; the bomb sits diagonally adjacent
        // below and is never hit.
        let b = board_from(&[
            "S-R . . . #",
            ". . B . .",
        ]);
        let mut s = instant_session();
        let events = s.tick(&b, 1000.0);
        assert!(events.is_empty());
        assert_eq!(s.near_misses, 1);

        // Sweeping past it again (same session) adds nothing.
        s.tick(&b, 1000.0);
        assert_eq!(s.near_misses, 1);
    }

    #[test]
    fn bomb_ahead_on_the_path_is_not_a_graze() {
        // Slow sweep straight at a bomb. While the tip is still a cell
        // short, the bomb borders swept cells, but a pending direct hit
        // never counts as a graze.
        let b = board_from(&["S-R . B"]);
        let mut s = BeamSession::new(1.0, 0.25);
        assert!(s.tick(&b, 1200.0).is_empty());
        assert_eq!(s.near_misses, 0);

        let events = s.tick(&b, 1000.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cell, Cell::Bomb);
        assert_eq!(s.near_misses, 0);
    }

    #[test]
    fn hit_bomb_is_an_event_not_a_near_miss() {
        let b = board_from(&["S-R . B"]);
        let mut s = instant_session();
        let events = s.tick(&b, 1000.0);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].cell, Cell::Bomb);
        assert_eq!(s.near_misses, 0);
    }
}
