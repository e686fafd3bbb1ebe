/// Cell types and their properties.
/// Properties are queried via methods, not stored as flags,
/// so cell semantics are centralized here.

use super::geom::Dir;

/// Beam color, set by converters and checked by filters and colored targets.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ColorKey {
    Red,
    Green,
    Blue,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Cell {
    Empty,
    /// Beam source; the attribute is the initial firing direction.
    Start(Dir),
    Wall,
    /// `/` mirror
    MirrorSlash,
    /// `\` mirror
    MirrorBackslash,
    /// Teleporter; cells sharing a group id are linked pairwise.
    Portal(char),
    /// Recolors the beam as it passes through.
    Converter(ColorKey),
    /// Passes the beam only when its color matches; absorbs otherwise.
    Filter(ColorKey),
    Bomb,
    /// End goal; an optional color the beam must carry to count.
    Target(Option<ColorKey>),
    /// Transparent to the beam but starts a countdown, in seconds.
    Alarm(u32),
}

impl Cell {
    /// Does the beam pass straight through without the tracer stopping?
    /// Only truly empty space and the start cell itself are passable;
    /// every other type terminates a traced segment.
    pub fn is_passable(self) -> bool {
        matches!(self, Cell::Empty | Cell::Start(_))
    }

    /// Is this a player-placeable/removable mirror?
    pub fn is_mirror(self) -> bool {
        matches!(self, Cell::MirrorSlash | Cell::MirrorBackslash)
    }

    /// Does hitting this cell end the path outright (before color rules)?
    /// Filters and orphan portals also stop the beam, but conditionally;
    /// those decisions live in the path composer.
    pub fn always_stops(self) -> bool {
        matches!(self, Cell::Wall | Cell::Bomb | Cell::Target(_))
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::Empty
    }
}
