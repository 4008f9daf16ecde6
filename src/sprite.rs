/// Actor base and glyph frames.
///
/// A `Frame` is a grid of cells parsed from ASCII art: `X` marks a filled
/// cell, a space is blank.  Text frames keep their characters so the
/// renderer can print them verbatim.  `Sprite` is the positioned,
/// animated part every actor shares.

// ── Cells & frames ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Blank,
    Fill,
    Char(char),
}

impl Cell {
    pub fn is_filled(self) -> bool {
        !matches!(self, Cell::Blank)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Frame {
    /// Parse glyph rows; rows shorter than the widest one are padded blank.
    pub fn from_rows(rows: &[&str]) -> Self {
        Self::build(rows, |c| if c == 'X' { Cell::Fill } else { Cell::Blank })
    }

    /// A single row of literal characters.
    pub fn text(line: &str) -> Self {
        Self::build(&[line], |c| if c == ' ' { Cell::Blank } else { Cell::Char(c) })
    }

    fn build(rows: &[&str], cell: impl Fn(char) -> Cell) -> Self {
        let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
        let height = rows.len();
        let mut cells = vec![Cell::Blank; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, c) in row.chars().enumerate() {
                cells[y * width + x] = cell(c);
            }
        }
        Frame { width, height, cells }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Cell at a frame-local offset; anything outside the grid is blank.
    pub fn cell(&self, dx: i32, dy: i32) -> Cell {
        if dx < 0 || dy < 0 || dx as usize >= self.width || dy as usize >= self.height {
            return Cell::Blank;
        }
        self.cells[dy as usize * self.width + dx as usize]
    }

    pub fn is_filled(&self, dx: i32, dy: i32) -> bool {
        self.cell(dx, dy).is_filled()
    }

    /// Iterate `(dx, dy, cell)` over the non-blank cells.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i32, i32, Cell)> + '_ {
        self.cells.iter().enumerate().filter_map(move |(i, c)| {
            c.is_filled()
                .then(|| ((i % self.width) as i32, (i / self.width) as i32, *c))
        })
    }
}

// ── Sprite (actor base) ──────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Sprite {
    pub x: i32,
    pub y: i32,
    pub visible: bool,
    frames: Vec<Frame>,
    current: usize,
}

impl Sprite {
    pub fn new(x: i32, y: i32, frames: Vec<Frame>) -> Self {
        Sprite {
            x,
            y,
            visible: true,
            frames,
            current: 0,
        }
    }

    pub fn frame(&self) -> Option<&Frame> {
        self.frames.get(self.current)
    }

    pub fn frame_index(&self) -> usize {
        self.current
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    pub fn width(&self) -> i32 {
        self.frame().map_or(0, |f| f.width() as i32)
    }

    pub fn height(&self) -> i32 {
        self.frame().map_or(0, |f| f.height() as i32)
    }

    /// Swap the frame sequence and restart it from the first frame.
    pub fn set_frames(&mut self, frames: Vec<Frame>) {
        self.frames = frames;
        self.current = 0;
    }

    /// Step to the next frame.  Returns `true` when the index wraps to 0.
    pub fn advance_frame(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.current += 1;
        if self.current >= self.frames.len() {
            self.current = 0;
            return true;
        }
        false
    }

    /// Point hit test against the drawn cells of the current frame.
    pub fn hit_at_point(&self, px: i32, py: i32) -> bool {
        self.frame()
            .is_some_and(|f| f.is_filled(px - self.x, py - self.y))
    }
}

// ── Built-in art ─────────────────────────────────────────────────────────────

const SQUID_A: &[&str] = &[
    "   XX    ",
    "  XXXX   ",
    " XXXXXX  ",
    "XX XX XX ",
    "XXXXXXXX ",
    "  X  X   ",
    " X XX X  ",
    "X X  X X ",
];

const SQUID_B: &[&str] = &[
    "   XX    ",
    "  XXXX   ",
    " XXXXXX  ",
    "XX XX XX ",
    "XXXXXXXX ",
    " X XX X  ",
    "X      X ",
    " X    X  ",
];

const CRAB_A: &[&str] = &[
    "  X     X   ",
    "   X   X    ",
    "  XXXXXXX   ",
    " XX XXX XX  ",
    "XXXXXXXXXXX ",
    "X XXXXXXX X ",
    "X X     X X ",
    "   XX XX    ",
];

const CRAB_B: &[&str] = &[
    "  X     X   ",
    "X  X   X  X ",
    "X XXXXXXX X ",
    "XXX XXX XXX ",
    "XXXXXXXXXXX ",
    " XXXXXXXXX  ",
    "  X     X   ",
    " X       X  ",
];

const OCTOPUS_A: &[&str] = &[
    "    XXXX    ",
    " XXXXXXXXXX ",
    "XXXXXXXXXXXX",
    "XXX  XX  XXX",
    "XXXXXXXXXXXX",
    "   XX  XX   ",
    "  X  XX  X  ",
    "   X    X   ",
];

const OCTOPUS_B: &[&str] = &[
    "    XXXX    ",
    " XXXXXXXXXX ",
    "XXXXXXXXXXXX",
    "XXX  XX  XXX",
    "XXXXXXXXXXXX",
    "  XXX  XXX  ",
    " XX  XX  XX ",
    "  XX    XX  ",
];

const BURST_SMALL: &[&str] = &[
    "         ",
    "         ",
    "    XX   ",
    "  X    X ",
    "  X    X ",
    "    XX   ",
];

const BURST_LARGE: &[&str] = &[
    "X  X   X  X",
    " X  X X  X ",
    "  X     X  ",
    "XX       XX",
    "  X     X  ",
    " X  X X  X ",
    "X  X   X  X",
];

const DEFENDER: &[&str] = &[
    "",
    "      X      ",
    "     XXX     ",
    "     XXX     ",
    " XXXXXXXXXXX ",
    "XXXXXXXXXXXXX",
    "XXXXXXXXXXXXX",
    "XXXXXXXXXXXXX",
];

const DEFENDER_WRECK_A: &[&str] = &[
    "",
    "   X         ",
    "     X X X   ",
    "   X X       ",
    "      XX XX  ",
    "X   X XX X   ",
    "  XXXXXXXX X ",
    " XXXXXXXXXX X",
];

const DEFENDER_WRECK_B: &[&str] = &[
    "",
    "",
    "             ",
    "    X        ",
    "  X    X X X ",
    "X   X XX     ",
    "  X XX X X X ",
    " XX XXX XXX X",
];

const SAUCER_A: &[&str] = &[
    "",
    "     XXXXXXX      ",
    "   XXXXXXXXXXX    ",
    "  XXXXXXXXXXXXX   ",
    " X XXX XXX XXX X  ",
    "XXXXXXXXXXXXXXXXX ",
    "  XXX  XXX  XXX   ",
    "   X         X    ",
];

const SAUCER_B: &[&str] = &[
    "",
    "     XXXXXXX      ",
    "   XXXXXXXXXXX    ",
    "  XXXXXXXXXXXXX   ",
    " XXX XXX XXX XXX  ",
    "XXXXXXXXXXXXXXXXX ",
    "  XXX  XXX  XXX   ",
    "   X         X    ",
];

const ENEMY_SHOT_A: &[&str] = &["X ", " X", "X ", "  "];
const ENEMY_SHOT_B: &[&str] = &[" X", "X ", " X", "  "];
const PLAYER_SHOT: &[&str] = &["X ", "  "];

const LOGO: &[&str] = &[
    "XXX X   X X   X  XXX  XXXX  XXXXX XXXX   XXXX",
    " X  XX  X X   X X   X X   X X     X   X X    ",
    " X  X X X X   X XXXXX X   X XXXX  XXXX   XXX ",
    " X  X  XX  X X  X   X X   X X     X  X      X",
    "XXX X   X   X   X   X XXXX  XXXXX X   X XXXX ",
];

const CORNER_UL: &[&str] = &["XXXXXXXX", "XXXXXXXX", "XX", "XX", "XX", "XX"];
const CORNER_UR: &[&str] = &["XXXXXXXX", "XXXXXXXX", "      XX", "      XX", "      XX", "      XX"];
const CORNER_LL: &[&str] = &["XX", "XX", "XX", "XX", "XXXXXXXX", "XXXXXXXX"];
const CORNER_LR: &[&str] = &["      XX", "      XX", "      XX", "      XX", "XXXXXXXX", "XXXXXXXX"];

const ARROW_UL: &[&str] = &["", "XXXXX ", "XXX   ", "X XX  ", "X  XX ", "    XX"];
const ARROW_UR: &[&str] = &["", " XXXXX", "   XXX", "  XX X", " XX  X", "XX    "];
const ARROW_LL: &[&str] = &["", "    XX", "X  XX ", "X XX  ", "XXX   ", "XXXXX "];
const ARROW_LR: &[&str] = &["", "XX    ", " XX  X", "  XX X", "   XXX", " XXXXX"];

/// One of the four arena corners, used by the title-screen markers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::UpperLeft,
        Corner::UpperRight,
        Corner::LowerLeft,
        Corner::LowerRight,
    ];
}

fn frames(sets: &[&[&str]]) -> Vec<Frame> {
    sets.iter().map(|rows| Frame::from_rows(rows)).collect()
}

pub fn invader_frames(kind: crate::entities::InvaderKind) -> Vec<Frame> {
    use crate::entities::InvaderKind;
    match kind {
        InvaderKind::Squid => frames(&[SQUID_A, SQUID_B]),
        InvaderKind::Crab => frames(&[CRAB_A, CRAB_B]),
        InvaderKind::Octopus => frames(&[OCTOPUS_A, OCTOPUS_B]),
    }
}

pub fn explosion_frames() -> Vec<Frame> {
    frames(&[BURST_SMALL, BURST_LARGE])
}

pub fn defender_frames() -> Vec<Frame> {
    frames(&[DEFENDER])
}

pub fn defender_wreck_frames() -> Vec<Frame> {
    frames(&[DEFENDER_WRECK_A, DEFENDER_WRECK_B])
}

pub fn saucer_frames() -> Vec<Frame> {
    frames(&[SAUCER_A, SAUCER_B])
}

pub fn enemy_shot_frames() -> Vec<Frame> {
    frames(&[ENEMY_SHOT_A, ENEMY_SHOT_B])
}

pub fn player_shot_frames() -> Vec<Frame> {
    frames(&[PLAYER_SHOT])
}

pub fn logo_frames() -> Vec<Frame> {
    frames(&[LOGO])
}

pub fn corner_frames(corner: Corner) -> Vec<Frame> {
    match corner {
        Corner::UpperLeft => frames(&[CORNER_UL]),
        Corner::UpperRight => frames(&[CORNER_UR]),
        Corner::LowerLeft => frames(&[CORNER_LL]),
        Corner::LowerRight => frames(&[CORNER_LR]),
    }
}

pub fn arrow_frames(corner: Corner) -> Vec<Frame> {
    match corner {
        Corner::UpperLeft => frames(&[ARROW_UL]),
        Corner::UpperRight => frames(&[ARROW_UR]),
        Corner::LowerLeft => frames(&[ARROW_LL]),
        Corner::LowerRight => frames(&[ARROW_LR]),
    }
}

pub fn text_frames(line: &str) -> Vec<Frame> {
    vec![Frame::text(line)]
}
