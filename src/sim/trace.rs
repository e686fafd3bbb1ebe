/// Segment tracer and path composer: the beam's geometry.
///
/// `trace_segment` marches cell-by-cell from an origin until something
/// non-passable (or the board edge) stops it, and reports one straight
/// segment. `compose_path` chains segments by applying the per-type
/// transition rules:
///
///   mirror `/`      reflect (dr,dc) → (-dc,-dr), continue
///   mirror `\`      reflect (dr,dc) → (dc,dr), continue
///   converter       overwrite the beam color, continue straight
///   filter          continue straight iff color matches, else stop
///   portal          jump to the partner portal, direction unchanged;
///                   stop if the portal has no partner
///   alarm           continue straight (transparent, but still an event)
///   wall/bomb/target/edge   stop
///
/// Both are pure functions of the board snapshot: no side effects, no
/// failure paths. Cyclic mirror/portal layouts are handled by a hard
/// iteration cap of rows × cols; hitting the cap silently truncates
/// the path.

use crate::domain::cell::{Cell, ColorKey};
use crate::domain::geom::{Dir, Point};
use crate::sim::board::Board;

/// Geometric tolerance for length comparisons (rendering precision,
/// not a semantic threshold).
pub const EPS: f32 = 1e-3;

/// One straight piece of the beam between two redirection/termination
/// points. Immutable once composed, except `triggered`, which the
/// scheduler flips as the sweep passes the segment's far end.
#[derive(Clone, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
    pub len: f32,
    /// The cell that terminated this segment (Empty for a board-edge exit).
    pub cell: Cell,
    pub row: usize,
    pub col: usize,
    /// Beam color when the segment was entered.
    pub color: Option<ColorKey>,
    pub triggered: bool,
}

impl Segment {
    fn new(start: Point, end: Point, cell: Cell, row: usize, col: usize) -> Self {
        Segment {
            start,
            end,
            len: start.dist(end),
            cell,
            row,
            col,
            color: None,
            triggered: false,
        }
    }

    /// Replace the start point (bounce/teleport continuity) and
    /// recompute the length so endpoints chain with no gap.
    fn rebase_start(&mut self, p: Point) {
        self.start = p;
        self.len = p.dist(self.end);
    }

    pub fn dx(&self) -> f32 {
        self.end.x - self.start.x
    }

    pub fn dy(&self) -> f32 {
        self.end.y - self.start.y
    }

    /// Point at distance `d` from the start, clamped to the segment.
    pub fn point_at(&self, d: f32) -> Point {
        if self.len <= EPS {
            return self.start;
        }
        let f = (d / self.len).clamp(0.0, 1.0);
        Point::new(self.start.x + self.dx() * f, self.start.y + self.dy() * f)
    }
}

/// The full ordered segment list from the start cell to the final stop,
/// plus the dimensions it was composed against.
#[derive(Clone, Debug, PartialEq)]
pub struct Path {
    pub segments: Vec<Segment>,
    pub rows: usize,
    pub cols: usize,
}

impl Path {
    pub fn empty() -> Self {
        Path { segments: vec![], rows: 0, cols: 0 }
    }

    pub fn total_len(&self) -> f32 {
        self.segments.iter().map(|s| s.len).sum()
    }
}

/// Trace one straight segment from the center of `(row, col)` along `dir`.
///
/// The origin may sit outside the board (it does, briefly, when a mirror
/// on the edge reflects outward); the walk then terminates immediately
/// with an edge segment, and the composer's pending-origin override keeps
/// the geometry anchored.
pub fn trace_segment(board: &Board, row: i32, col: i32, dir: Dir) -> Segment {
    let (dr, dc) = (dir.dr(), dir.dc());
    let start = Point::center(row, col);

    let mut r = row;
    let mut c = col;
    let mut hit = Cell::Empty;
    while board.in_bounds(r, c) {
        let cell = board.cell_at(r as usize, c as usize);
        if !cell.is_passable() {
            hit = cell;
            break;
        }
        r += dr;
        c += dc;
    }

    if !board.in_bounds(r, c) {
        // Ran off-board: back up to the last in-bounds cell and land the
        // endpoint on the board edge in the travel direction.
        let er = (r - dr).clamp(0, board.rows.max(1) as i32 - 1) as usize;
        let ec = (c - dc).clamp(0, board.cols.max(1) as i32 - 1) as usize;
        let end = match dir {
            Dir::Down => Point::new(start.x, board.rows as f32),
            Dir::Up => Point::new(start.x, 0.0),
            Dir::Right => Point::new(board.cols as f32, start.y),
            Dir::Left => Point::new(0.0, start.y),
        };
        return Segment::new(start, end, Cell::Empty, er, ec);
    }

    if hit == Cell::Wall {
        // Stop at the wall's near face, not its center.
        let end = match dir {
            Dir::Down => Point::new(start.x, r as f32),
            Dir::Up => Point::new(start.x, (r + 1) as f32),
            Dir::Right => Point::new(c as f32, start.y),
            Dir::Left => Point::new((c + 1) as f32, start.y),
        };
        return Segment::new(start, end, Cell::Wall, r as usize, c as usize);
    }

    // Every other blocker: endpoint at its center.
    Segment::new(start, Point::center(r, c), hit, r as usize, c as usize)
}

/// Compose the complete beam path from the board's start cell.
/// A board without a start cell yields an empty path (a valid
/// "do nothing" state, not an error).
pub fn compose_path(board: &Board) -> Path {
    let mut path = Path { segments: vec![], rows: board.rows, cols: board.cols };
    let Some((sr, sc, start_dir)) = board.find_start() else {
        return path;
    };

    let mut r = sr as i32;
    let mut c = sc as i32;
    let mut dir = start_dir;
    let mut color: Option<ColorKey> = None;
    let mut pending: Option<Point> = None;

    // Hard cap: no beam visits more cells than the board has.
    let cap = board.rows * board.cols;
    for _ in 0..cap {
        let mut seg = trace_segment(board, r, c, dir);
        if let Some(p) = pending.take() {
            seg.rebase_start(p);
        }
        seg.color = color;

        let terminal = seg.cell;
        let (tr, tc) = (seg.row as i32, seg.col as i32);
        let end = seg.end;
        path.segments.push(seg);

        if terminal.always_stops() {
            break;
        }
        match terminal {
            Cell::MirrorSlash => {
                dir = dir.reflect_slash();
            }
            Cell::MirrorBackslash => {
                dir = dir.reflect_backslash();
            }
            Cell::Converter(key) => {
                color = Some(key);
            }
            Cell::Filter(key) => {
                if color != Some(key) {
                    break; // absorbed
                }
            }
            Cell::Portal(group) => {
                match board.portal_partner(tr as usize, tc as usize, group) {
                    Some((pr, pc)) => {
                        pending = Some(Point::center(pr as i32, pc as i32));
                        r = pr as i32 + dir.dr();
                        c = pc as i32 + dir.dc();
                        continue;
                    }
                    None => break, // orphan portal is a terminal obstacle
                }
            }
            Cell::Alarm(_) => {}
            // Empty terminal: the segment ran off the board edge.
            _ => break,
        }

        // Continue from just past the terminal cell, anchored at its center.
        pending = Some(end);
        r = tr + dir.dr();
        c = tc + dir.dc();
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::level::parse_row;

    fn board_from(rows: &[&str]) -> Board {
        Board::new(rows.iter().map(|r| parse_row(r)).collect())
    }

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    // ── Single-segment tracing ──

    #[test]
    fn trace_stops_at_wall_face() {
        let b = board_from(&[". . . #"]);
        let s = trace_segment(&b, 0, 0, Dir::Right);
        assert_eq!(s.cell, Cell::Wall);
        assert_eq!((s.row, s.col), (0, 3));
        // Endpoint on the wall's near edge: x = 3.0, not 3.5.
        assert!(close(s.end.x, 3.0));
        assert!(close(s.end.y, 0.5));
        assert!(close(s.len, 2.5));
    }

    #[test]
    fn trace_adjacent_wall_is_half_cell() {
        let b = board_from(&[". #"]);
        let s = trace_segment(&b, 0, 0, Dir::Right);
        assert_eq!(s.cell, Cell::Wall);
        assert!(close(s.len, 0.5));
    }

    #[test]
    fn trace_runs_off_board_edge() {
        let b = board_from(&[". . .", ". . ."]);
        let s = trace_segment(&b, 0, 0, Dir::Right);
        assert_eq!(s.cell, Cell::Empty);
        // Terminal cell is the last in-bounds cell.
        assert_eq!((s.row, s.col), (0, 2));
        // Endpoint lands exactly on the board boundary.
        assert!(close(s.end.x, 3.0));
        assert!(close(s.end.y, 0.5));
        assert!(close(s.len, 2.5));
    }

    #[test]
    fn trace_downward_to_edge() {
        let b = board_from(&[".", ".", "."]);
        let s = trace_segment(&b, 0, 0, Dir::Down);
        assert_eq!(s.cell, Cell::Empty);
        assert!(close(s.end.y, 3.0));
        assert!(close(s.end.x, 0.5));
    }

    #[test]
    fn trace_stops_at_blocker_center() {
        let b = board_from(&[". . B ."]);
        let s = trace_segment(&b, 0, 0, Dir::Right);
        assert_eq!(s.cell, Cell::Bomb);
        assert!(close(s.end.x, 2.5));
        assert!(close(s.len, 2.0));
    }

    #[test]
    fn trace_from_off_board_origin() {
        let b = board_from(&[". ."]);
        // Origin one cell left of the board, heading further left.
        let s = trace_segment(&b, 0, -1, Dir::Left);
        assert_eq!(s.cell, Cell::Empty);
        assert!(close(s.end.x, 0.0));
    }

    // ── Path composition ──

    #[test]
    fn walled_scenario_single_segment_to_target() {
        // 5×5, wall border, start at (1,1) facing right, target at (1,3).
        let b = board_from(&[
            "# # # # #",
            "# S-R . T #",
            "# . . . #",
            "# . . . #",
            "# # # # #",
        ]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 1);
        let s = &p.segments[0];
        assert_eq!(s.cell, Cell::Target(None));
        assert_eq!((s.row, s.col), (1, 3));
        assert!(close(s.len, 2.0));
    }

    #[test]
    fn compose_is_deterministic() {
        let b = board_from(&[
            "# # # # #",
            "# S-R . M-\\ #",
            "# . . . #",
            "# . . T #",
            "# # # # #",
        ]);
        assert_eq!(compose_path(&b), compose_path(&b));
    }

    #[test]
    fn no_start_yields_empty_path() {
        let b = board_from(&[". . .", ". T ."]);
        assert!(compose_path(&b).segments.is_empty());
    }

    #[test]
    fn mirror_bounce_chains_without_gap() {
        let b = board_from(&[
            "S-R . M-\\",
            ". . .",
            ". . T",
        ]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 2);
        // Second segment starts exactly at the mirror's center.
        assert!(close(p.segments[1].start.x, 2.5));
        assert!(close(p.segments[1].start.y, 0.5));
        assert_eq!(p.segments[1].cell, Cell::Target(None));
        assert!(close(p.segments[1].len, 2.0));
    }

    #[test]
    fn slash_mirror_turns_beam_up() {
        let b = board_from(&[
            ". . T",
            ". . .",
            "S-R . M-/",
        ]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 2);
        assert_eq!(p.segments[1].cell, Cell::Target(None));
        assert!(p.segments[1].dy() < 0.0);
    }

    #[test]
    fn converter_sets_color_for_downstream_segments() {
        let b = board_from(&["S-R C-G . T-G"]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 2);
        // Entry color of the first segment is unset; after the converter
        // the beam carries green.
        assert_eq!(p.segments[0].color, None);
        assert_eq!(p.segments[1].color, Some(ColorKey::Green));
        assert_eq!(p.segments[1].cell, Cell::Target(Some(ColorKey::Green)));
    }

    #[test]
    fn converter_overwrites_not_mixes() {
        // Two same-color converters then a matching filter behave like one.
        let one = board_from(&["S-R C-B F-B T"]);
        let two = board_from(&["S-R C-B C-B F-B T"]);
        let p1 = compose_path(&one);
        let p2 = compose_path(&two);
        assert_eq!(p1.segments.last().unwrap().cell, Cell::Target(None));
        assert_eq!(p2.segments.last().unwrap().cell, Cell::Target(None));
        assert_eq!(p1.segments.last().unwrap().color, Some(ColorKey::Blue));
        assert_eq!(p2.segments.last().unwrap().color, Some(ColorKey::Blue));
    }

    #[test]
    fn filter_absorbs_mismatched_beam() {
        let b = board_from(&["S-R C-R F-G T"]);
        let p = compose_path(&b);
        // Path ends at the filter; the target is never reached.
        assert_eq!(p.segments.last().unwrap().cell, Cell::Filter(ColorKey::Green));
        assert!(!p.segments.iter().any(|s| matches!(s.cell, Cell::Target(_))));
    }

    #[test]
    fn filter_absorbs_uncolored_beam() {
        let b = board_from(&["S-R F-R T"]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 1);
        assert_eq!(p.segments[0].cell, Cell::Filter(ColorKey::Red));
    }

    #[test]
    fn portal_teleports_preserving_direction() {
        let b = board_from(&[
            "S-R . P-A . .",
            ". . . . .",
            ". P-A . . T",
        ]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 2);
        // Next segment starts at the partner portal's center…
        assert!(close(p.segments[1].start.x, 1.5));
        assert!(close(p.segments[1].start.y, 2.5));
        // …heading the same way.
        assert!(p.segments[1].dx() > 0.0);
        assert!(close(p.segments[1].dy(), 0.0));
        assert_eq!(p.segments[1].cell, Cell::Target(None));
    }

    #[test]
    fn orphan_portal_stops_beam() {
        let b = board_from(&["S-R P-A . T"]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 1);
        assert_eq!(p.segments[0].cell, Cell::Portal('A'));
    }

    #[test]
    fn alarm_is_transparent() {
        let b = board_from(&["S-R A-8 . T"]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 2);
        assert_eq!(p.segments[0].cell, Cell::Alarm(8));
        assert_eq!(p.segments[1].cell, Cell::Target(None));
    }

    #[test]
    fn mirror_cycle_terminates_at_cap() {
        // Four corner mirrors circulate the beam clockwise forever; the
        // start cell sits on the loop and is passable, so nothing ever
        // stops it. Composition must cut off at rows * cols segments.
        let b = board_from(&[
            "M-/ S-R . M-\\",
            ". . . .",
            "M-\\ . . M-/",
        ]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 12); // rows * cols
    }

    #[test]
    fn adjacent_mirrors_produce_unit_segments() {
        let b = board_from(&[
            "S-R M-\\",
            "T M-/",
        ]);
        let p = compose_path(&b);
        assert_eq!(p.segments.len(), 3);
        // Bounce-to-bounce segments span exactly one cell center to center.
        assert!(close(p.segments[1].len, 1.0));
        assert_eq!(p.segments[2].cell, Cell::Target(None));
    }
}
