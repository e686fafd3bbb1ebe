/// Presentation layer: double-buffered, diff-based terminal renderer.
///
/// How it works:
///   1. Build the next frame into `front` buffer (array of Cell)
///   2. Compare each cell with `back` buffer (previous frame)
///   3. Only emit terminal commands for cells that changed
///   4. All commands are batched with `queue!`, flushed once at the end
///   5. Swap front/back
///
/// This eliminates flicker caused by full-screen redraws. Boards are
/// at most a couple dozen cells on a side, so there is no camera; the
/// whole board is drawn at a fixed origin, one board cell per two
/// terminal columns.

use std::collections::HashMap;
use std::io::{self, BufWriter, Write};

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::cell::{Cell as BoardCell, ColorKey};
use crate::domain::geom::Dir;
use crate::sim::trace::EPS;
use crate::sim::world::{GameState, Phase};

// ── Cell: the unit of the back-buffer ──

#[derive(Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

impl Cell {
    /// Explicit dark background for all "empty" terminal cells.
    ///
    /// On VTE-based Linux terminals the inter-row gap pixels use the
    /// background color from the last Clear or the terminal's default.
    /// Using the SAME explicit RGB for `Clear(ClearType::All)` and
    /// every cell's background keeps the gap color identical to the
    /// cell color, eliminating visible horizontal lines.
    const BASE_BG: Color = Color::Rgb { r: 16, g: 18, b: 28 };

    const BLANK: Cell = Cell { ch: ' ', fg: Color::White, bg: Cell::BASE_BG };

    /// Sentinel cell used to invalidate the back buffer.
    /// Different from any real cell, so every position will be diff'd.
    const INVALID: Cell = Cell { ch: '?', fg: Color::Magenta, bg: Color::Magenta };

    /// Normalize bg: Color::Reset → BASE_BG so that every cell gets an
    /// explicit background color (never terminal-default).
    #[inline]
    fn norm_bg(bg: Color) -> Color {
        match bg {
            Color::Reset => Self::BASE_BG,
            other => other,
        }
    }

    fn from_char(ch: char, fg: Color, bg: Color) -> Self {
        Cell { ch, fg, bg: Self::norm_bg(bg) }
    }
}

// ── FrameBuffer: a 2D grid of Cells ──

struct FrameBuffer {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    fn new(w: usize, h: usize) -> Self {
        FrameBuffer { width: w, height: h, cells: vec![Cell::BLANK; w * h] }
    }

    fn resize(&mut self, w: usize, h: usize) {
        if self.width != w || self.height != h {
            self.width = w;
            self.height = h;
            self.cells = vec![Cell::BLANK; w * h];
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = cell;
        }
    }

    fn get(&self, x: usize, y: usize) -> Cell {
        if x < self.width && y < self.height {
            self.cells[y * self.width + x]
        } else {
            Cell::BLANK
        }
    }

    /// Write a string at (x, y) with given colors. Each char occupies 1 column.
    fn put_str(&mut self, x: usize, y: usize, s: &str, fg: Color, bg: Color) {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.set(cx, y, Cell::from_char(ch, fg, bg));
            cx += 1;
        }
    }
}

// ── Beam overlay ──

/// What the beam paints over a board cell this frame.
#[derive(Clone, Copy)]
struct Mark {
    glyph: char,
    color: Option<ColorKey>,
    /// Inside the swept portion (bright) or still ahead of the tip (dim).
    swept: bool,
}

/// Sampling step for the overlay, in cells. Finer than the session's
/// trail sampling so diagonal-free lines have no gaps.
const OVERLAY_STEP: f32 = 0.2;

// ── Renderer ──

/// Each board cell = 2 terminal columns.
const CELL_W: usize = 2;

/// Vertical offsets
const HUD_ROW: usize = 0;
const MAP_ROW: usize = 2;

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    front: FrameBuffer,
    back: FrameBuffer,
    term_w: usize,
    term_h: usize,
    last_phase: Option<Phase>,
    /// Frame counter for blink effects.
    frame: u32,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            front: FrameBuffer::new(0, 0),
            back: FrameBuffer::new(0, 0),
            term_w: 0,
            term_h: 0,
            last_phase: None,
            frame: 0,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            SetBackgroundColor(Cell::BASE_BG),
            Clear(ClearType::All)
        )?;

        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw as usize;
        self.term_h = th as usize;
        self.front.resize(self.term_w, self.term_h);
        self.back.resize(self.term_w, self.term_h);
        // Force full repaint on first frame: back ≠ front for every cell.
        self.back.cells.fill(Cell::INVALID);

        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, world: &GameState) -> io::Result<()> {
        self.frame = self.frame.wrapping_add(1);

        // Detect terminal resize
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw as usize != self.term_w || th as usize != self.term_h {
            self.term_w = tw as usize;
            self.term_h = th as usize;
            self.front.resize(self.term_w, self.term_h);
            self.back.resize(self.term_w, self.term_h);
            // Force full repaint after resize.
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
        }

        // Detect phase change → clear for clean transition
        let phase_changed = self.last_phase != Some(world.phase);
        if phase_changed {
            self.back.cells.fill(Cell::INVALID);
            queue!(self.writer, SetBackgroundColor(Cell::BASE_BG), Clear(ClearType::All))?;
            self.last_phase = Some(world.phase);
        }

        // Build front buffer
        self.front.clear();

        match world.phase {
            Phase::Title => self.compose_title(world),
            Phase::LevelSelect => self.compose_level_select(world),
            Phase::Briefing => self.compose_briefing(world),
            Phase::Playing => self.compose_game(world),
            Phase::Won | Phase::Lost => {
                self.compose_game(world);
                self.compose_outcome_overlay(world);
            }
            Phase::GameComplete => self.compose_game_complete(world),
        }

        // Diff and emit
        self.flush_diff()?;

        // Swap: current front becomes next back
        std::mem::swap(&mut self.front, &mut self.back);

        Ok(())
    }

    // ── Diff flush: only write changed cells ──

    fn flush_diff(&mut self) -> io::Result<()> {
        let mut last_fg = Color::White;
        let mut last_bg = Cell::BASE_BG;
        let mut need_move = true;
        let mut last_x: usize = 0;
        let mut last_y: usize = 0;

        // Set explicit base colors at start of frame.
        // IMPORTANT: Do NOT use ResetColor here — it resets to the terminal's
        // native default, which may differ from BASE_BG and cause line artifacts.
        queue!(
            self.writer,
            SetForegroundColor(Color::White),
            SetBackgroundColor(Cell::BASE_BG),
        )?;

        for y in 0..self.front.height {
            for x in 0..self.front.width {
                let cell = self.front.get(x, y);
                if cell == self.back.get(x, y) {
                    need_move = true;
                    continue;
                }

                // Position cursor if needed
                if need_move || x != last_x + 1 || y != last_y {
                    queue!(self.writer, MoveTo(x as u16, y as u16))?;
                    need_move = false;
                }

                // Set colors only if changed
                if cell.fg != last_fg {
                    queue!(self.writer, SetForegroundColor(cell.fg))?;
                    last_fg = cell.fg;
                }
                if cell.bg != last_bg {
                    queue!(self.writer, SetBackgroundColor(cell.bg))?;
                    last_bg = cell.bg;
                }

                let mut buf = [0u8; 4];
                queue!(self.writer, Print(cell.ch.encode_utf8(&mut buf) as &str))?;
                last_x = x;
                last_y = y;
            }
        }

        self.writer.flush()
    }

    // ── Palette ──

    fn beam_color(color: Option<ColorKey>, swept: bool) -> Color {
        let (r, g, b) = match color {
            None => (255, 228, 120),
            Some(ColorKey::Red) => (255, 90, 90),
            Some(ColorKey::Green) => (90, 255, 130),
            Some(ColorKey::Blue) => (110, 160, 255),
        };
        if swept {
            Color::Rgb { r, g, b }
        } else {
            Color::Rgb { r: r / 4, g: g / 4, b: b / 4 }
        }
    }

    fn key_color(key: ColorKey) -> Color {
        match key {
            ColorKey::Red => Color::Rgb { r: 255, g: 90, b: 90 },
            ColorKey::Green => Color::Rgb { r: 90, g: 255, b: 130 },
            ColorKey::Blue => Color::Rgb { r: 110, g: 160, b: 255 },
        }
    }

    // ── Beam overlay construction ──

    /// Sample the composed path into per-cell marks. Later samples win,
    /// so crossings show the downstream pass.
    fn beam_marks(world: &GameState) -> HashMap<(usize, usize), Mark> {
        let mut marks = HashMap::new();
        let session = &world.session;
        let board = &world.board;

        let mut offset = 0.0;
        for seg in &session.path.segments {
            if seg.len <= EPS {
                offset += seg.len;
                continue;
            }
            let glyph = if seg.dy().abs() > seg.dx().abs() { '│' } else { '─' };
            let mut d = 0.0;
            loop {
                let p = seg.point_at(d);
                let (r, c) = (p.y.floor() as i32, p.x.floor() as i32);
                if board.in_bounds(r, c) {
                    let key = (r as usize, c as usize);
                    // Never paint over the cell the segment terminates on;
                    // the blocker glyph stays visible.
                    if key != (seg.row, seg.col) || seg.cell == BoardCell::Empty {
                        marks.insert(key, Mark {
                            glyph,
                            color: seg.color,
                            swept: offset + d <= session.travel() + EPS,
                        });
                    }
                }
                if d >= seg.len {
                    break;
                }
                d = (d + OVERLAY_STEP).min(seg.len);
            }
            offset += seg.len;
        }

        marks
    }

    // ── Compose: the game view ──

    fn compose_game(&mut self, w: &GameState) {
        let buf_w = self.front.width;

        // ── HUD row ──
        let mirrors = match w.mirrors_left() {
            Some(n) => format!("Mirrors:{}", n),
            None => "Mirrors:∞".to_string(),
        };
        let alarm = match w.alarm_remaining_ms {
            Some(ms) => format!("  ⚠ {:>4.1}s", (ms / 1000.0).max(0.0)),
            None => String::new(),
        };
        let hud = format!(
            " Breach.{:<2}  {}  Grazes:{}{} ",
            w.current_level + 1,
            mirrors,
            w.session.near_misses,
            alarm,
        );
        let hud_bg = Color::Rgb { r: 20, g: 24, b: 58 };
        for x in 0..buf_w {
            self.front.set(x, HUD_ROW, Cell::from_char(' ', Color::White, hud_bg));
        }
        self.front.put_str(0, HUD_ROW, &hud, Color::White, hud_bg);

        // ── Board with beam overlay ──
        let marks = Self::beam_marks(w);

        for r in 0..w.board.rows {
            let row = MAP_ROW + r;
            if row >= self.front.height {
                break;
            }
            for c in 0..w.board.cols {
                let col = c * CELL_W;
                if col + 1 >= buf_w {
                    break;
                }
                self.compose_board_cell(w, &marks, r, c, col, row);
            }
        }

        // ── Beam tip ──
        if let Some(last) = w.session.path.segments.last() {
            let mut remaining = w.session.travel();
            for seg in &w.session.path.segments {
                if remaining <= seg.len + EPS {
                    let p = seg.point_at(remaining);
                    let (tr, tc) = (p.y.floor() as i32, p.x.floor() as i32);
                    if w.board.in_bounds(tr, tc) {
                        let col = tc as usize * CELL_W;
                        let row = MAP_ROW + tr as usize;
                        if row < self.front.height && col < buf_w {
                            let fg = Self::beam_color(last.color, true);
                            let bg = self.front.get(col, row).bg;
                            self.front.set(col, row, Cell::from_char('◆', fg, bg));
                        }
                    }
                    break;
                }
                remaining -= seg.len;
            }
        }

        // ── Cursor ──
        let (cr, cc) = w.cursor;
        let row = MAP_ROW + cr;
        let col = cc * CELL_W;
        if row < self.front.height && col + 1 < buf_w {
            let blink = (self.frame / 8) % 2 == 0;
            let bg = if blink {
                Color::Rgb { r: 70, g: 70, b: 110 }
            } else {
                Color::Rgb { r: 50, g: 50, b: 80 }
            };
            for dx in 0..CELL_W {
                let mut cell = self.front.get(col + dx, row);
                cell.bg = bg;
                self.front.set(col + dx, row, cell);
            }
        }

        // ── Message bar ──
        let msg_row = MAP_ROW + w.board.rows + 1;
        if msg_row < self.front.height && !w.message.is_empty() {
            let msg = format!(" ◈ {} ", w.message);
            let msg_bg = Color::Rgb { r: 200, g: 180, b: 50 };
            for x in 0..buf_w {
                self.front.set(x, msg_row, Cell::from_char(' ', Color::Black, msg_bg));
            }
            self.front.put_str(0, msg_row, &msg, Color::Black, msg_bg);
        }

        // ── Help bar ──
        let help_row = MAP_ROW + w.board.rows + 3;
        if help_row < self.front.height {
            let help = " ←→↑↓:Cursor  Z:╱ mirror  X:╲ mirror  D:Remove  R:Restart  ESC:Menu";
            self.front.put_str(0, help_row, help, Color::DarkGrey, Color::Reset);
        }
    }

    /// Write the visual for board cell (r, c) into the front buffer.
    /// Each board cell = 2 terminal columns.
    fn compose_board_cell(
        &mut self,
        w: &GameState,
        marks: &HashMap<(usize, usize), Mark>,
        r: usize,
        c: usize,
        col: usize,
        row: usize,
    ) {
        // Visited trail tints the cell background.
        let bg = if w.session.is_visited(r, c) {
            Color::Rgb { r: 34, g: 38, b: 30 }
        } else {
            Cell::BASE_BG
        };

        let (c0, c1, fg) = match w.board.cell_at(r, c) {
            BoardCell::Empty => {
                // Beam overlay only shows on empty ground.
                if let Some(mark) = marks.get(&(r, c)) {
                    let fg = Self::beam_color(mark.color, mark.swept);
                    self.front.set(col, row, Cell::from_char(mark.glyph, fg, bg));
                    let c1 = if mark.glyph == '─' { '─' } else { ' ' };
                    self.front.set(col + 1, row, Cell::from_char(c1, fg, bg));
                    return;
                }
                (' ', ' ', Color::Reset)
            }
            BoardCell::Wall => ('█', '█', Color::Rgb { r: 110, g: 110, b: 120 }),
            BoardCell::Start(dir) => {
                let ch = match dir {
                    Dir::Up => '▲',
                    Dir::Down => '▼',
                    Dir::Left => '◀',
                    Dir::Right => '▶',
                };
                (ch, ' ', Color::Rgb { r: 255, g: 228, b: 120 })
            }
            BoardCell::MirrorSlash => ('╱', ' ', Color::Rgb { r: 170, g: 230, b: 255 }),
            BoardCell::MirrorBackslash => ('╲', ' ', Color::Rgb { r: 170, g: 230, b: 255 }),
            BoardCell::Portal(group) => (group, '○', Color::Rgb { r: 210, g: 130, b: 255 }),
            BoardCell::Converter(key) => ('▣', ' ', Self::key_color(key)),
            BoardCell::Filter(key) => ('▤', ' ', Self::key_color(key)),
            BoardCell::Bomb => ('✶', ' ', Color::Rgb { r: 255, g: 80, b: 80 }),
            BoardCell::Target(req) => {
                let fg = match req {
                    Some(key) => Self::key_color(key),
                    None => Color::Rgb { r: 255, g: 255, b: 255 },
                };
                ('◎', ' ', fg)
            }
            BoardCell::Alarm(_) => ('◬', ' ', Color::Rgb { r: 255, g: 160, b: 60 }),
        };

        self.front.set(col, row, Cell::from_char(c0, fg, bg));
        self.front.set(col + 1, row, Cell::from_char(c1, fg, bg));
    }

    // ── Static screens ──

    fn compose_title(&mut self, w: &GameState) {
        let title = [
            r"  ___                     ___                      _    ",
            r" | _ ) ___  __ _  _ __   | _ ) _ _  ___  __ _  __ | |_  ",
            r" | _ \/ -_)/ _` || '  \  | _ \| '_|/ -_)/ _` |/ _|| ' \ ",
            r" |___/\___|\__,_||_|_|_| |___/|_|  \___|\__,_|\__||_||_|",
        ];

        for (i, line) in title.iter().enumerate() {
            self.front.put_str(2, 2 + i, line, Color::Rgb { r: 255, g: 200, b: 50 }, Color::Reset);
        }

        let subtitle = "◈◈  Bend the light. Light the target.  ◈◈";
        let sx = 2 + (title[1].len().saturating_sub(subtitle.chars().count())) / 2;
        self.front.put_str(sx, 7, subtitle, Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);

        // Menu options
        let menu_base = 10;
        let hi = Color::Rgb { r: 80, g: 255, b: 80 };
        let dim = Color::DarkGrey;

        self.front.put_str(8, menu_base, "ENTER   Start", hi, Color::Reset);
        self.front.put_str(8, menu_base + 1, "  L     Level Select", Color::White, Color::Reset);
        self.front.put_str(8, menu_base + 2, "  Q     Quit", Color::White, Color::Reset);

        let progress = format!(
            "      {} of {} breached   grazes on record: {}",
            w.unlocked_up_to.min(w.total_levels),
            w.total_levels,
            w.near_miss_total,
        );
        self.front.put_str(8, menu_base + 4, &progress, dim, Color::Reset);

        // Controls reference
        let help = [
            "Controls",
            "  ←→↑↓          Move cursor",
            "  Z             Place ╱ mirror     X  Place ╲ mirror",
            "  D             Remove mirror      R  Restart level",
            "  ESC           Back",
        ];
        let help_base = menu_base + 6;
        for (i, line) in help.iter().enumerate() {
            let color = if i == 0 { Color::Rgb { r: 255, g: 200, b: 50 } } else { Color::White };
            self.front.put_str(8, help_base + i, line, color, Color::Reset);
        }
    }

    fn compose_level_select(&mut self, w: &GameState) {
        let gold = Color::Rgb { r: 255, g: 200, b: 50 };
        let hi = Color::Rgb { r: 80, g: 255, b: 80 };
        let normal = Color::White;
        let dim = Color::DarkGrey;
        let cursor_bg = Color::Rgb { r: 30, g: 60, b: 30 };

        self.front.put_str(2, 1, "╔═══════════════════════════════════╗", gold, Color::Reset);
        self.front.put_str(2, 2, "║          LEVEL  SELECT            ║", gold, Color::Reset);
        self.front.put_str(2, 3, "╚═══════════════════════════════════╝", gold, Color::Reset);

        let list_top = 5;
        for (idx, name) in w.level_names.iter().enumerate() {
            let row = list_top + idx;
            if row + 3 >= self.front.height {
                break;
            }
            let locked = idx > w.unlocked_up_to;
            let num_str = format!("{:>3}.", idx + 1);

            if idx == w.select_cursor {
                let blink = (self.frame / 8) % 2 == 0;
                let arrow = if blink { "▸" } else { " " };
                for x in 0..44.min(self.front.width) {
                    self.front.set(x, row, Cell::from_char(' ', normal, cursor_bg));
                }
                self.front.put_str(2, row, arrow, hi, cursor_bg);
                self.front.put_str(3, row, &num_str, hi, cursor_bg);
                let fg = if locked { dim } else { hi };
                self.front.put_str(8, row, name, fg, cursor_bg);
                if locked {
                    self.front.put_str(8 + name.chars().count() + 2, row, "(locked)", dim, cursor_bg);
                }
            } else {
                let fg = if locked { dim } else { normal };
                self.front.put_str(3, row, &num_str, dim, Color::Reset);
                self.front.put_str(8, row, name, fg, Color::Reset);
                if locked {
                    self.front.put_str(8 + name.chars().count() + 2, row, "(locked)", dim, Color::Reset);
                }
            }
        }

        let footer_row = list_top + w.level_names.len() + 2;
        if footer_row < self.front.height {
            self.front.put_str(2, footer_row, "  ENTER: Start   ↑↓: Select   ESC: Back", dim, Color::Reset);
        }
    }

    fn compose_briefing(&mut self, w: &GameState) {
        let gold = Color::Rgb { r: 255, g: 200, b: 50 };
        let name = format!("◈ {} ◈", w.level_name);
        self.front.put_str(4, 3, &name, gold, Color::Reset);

        for (i, line) in w.briefing.iter().enumerate() {
            self.front.put_str(6, 6 + i, line, Color::White, Color::Reset);
        }

        let mirrors = match w.mirrors_max {
            Some(n) => format!("Mirror budget: {}", n),
            None => "Mirror budget: unlimited".to_string(),
        };
        self.front.put_str(6, 8 + w.briefing.len(), &mirrors, Color::Rgb { r: 170, g: 230, b: 255 }, Color::Reset);

        let blink = (self.frame / 10) % 2 == 0;
        if blink {
            self.front.put_str(
                6,
                11 + w.briefing.len(),
                "▸▸▸ Press ENTER ◂◂◂",
                Color::Rgb { r: 80, g: 255, b: 80 },
                Color::Reset,
            );
        }
    }

    fn compose_outcome_overlay(&mut self, w: &GameState) {
        let won = w.phase == Phase::Won;
        let (border_fg, bg, middle) = if won {
            (
                Color::Rgb { r: 255, g: 220, b: 50 },
                Color::Rgb { r: 20, g: 60, b: 20 },
                "║      ★ TARGET LIT ★          ║",
            )
        } else {
            (
                Color::Rgb { r: 255, g: 60, b: 60 },
                Color::Rgb { r: 60, g: 20, b: 20 },
                "║      ✕ RUN FAILED ✕          ║",
            )
        };
        let border = "╔══════════════════════════════╗";
        let prompt = if won {
            "║  ENTER: Next   ESC: Menu     ║"
        } else {
            "║  ENTER: Retry  ESC: Menu     ║"
        };
        let bottom = "╚══════════════════════════════╝";

        let cy = (MAP_ROW + w.board.rows / 2).max(2);
        let cx = (w.board.cols * CELL_W).saturating_sub(border.chars().count()) / 2;
        self.front.put_str(cx, cy - 1, border, border_fg, bg);
        self.front.put_str(cx, cy, middle, border_fg, bg);
        self.front.put_str(cx, cy + 1, prompt, Color::Rgb { r: 80, g: 255, b: 80 }, bg);
        self.front.put_str(cx, cy + 2, bottom, border_fg, bg);
    }

    fn compose_game_complete(&mut self, w: &GameState) {
        let box_art = [
            "╔══════════════════════════════════════╗",
            "║   ★ EVERY VAULT BREACHED ★           ║",
            "╚══════════════════════════════════════╝",
        ];
        for (i, l) in box_art.iter().enumerate() {
            self.front.put_str(4, 4 + i, l, Color::Rgb { r: 255, g: 220, b: 50 }, Color::Reset);
        }
        let levels = format!("◈ All {} levels cleared", w.total_levels);
        let grazes = format!("◈ Bomb grazes on record: {}", w.near_miss_total);
        self.front.put_str(6, 9, &levels, Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
        self.front.put_str(6, 10, &grazes, Color::White, Color::Reset);
        self.front.put_str(6, 12, "▸ ENTER / ESC: Back to Title", Color::Rgb { r: 80, g: 255, b: 80 }, Color::Reset);
    }
}
