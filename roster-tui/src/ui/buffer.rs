use super::text::char_width;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: bool,
    pub dim: bool,
}

impl TextStyle {
    pub const fn new() -> Self {
        Self {
            bold: false,
            italic: false,
            underline: false,
            dim: false,
        }
    }
}

/// Colors and attributes applied when writing into a [`Buffer`].
///
/// `None` colors keep whatever the cell already has, so text can be drawn
/// over a filled background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Rgb>,
    pub bg: Option<Rgb>,
    pub text: TextStyle,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            text: TextStyle::new(),
        }
    }

    pub const fn fg(mut self, color: Rgb) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Rgb) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.text.bold = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.text.underline = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.text.italic = true;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub char: char,
    pub fg: Rgb,
    pub bg: Rgb,
    pub style: TextStyle,
    pub wide_continuation: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            char: ' ',
            fg: Rgb::new(220, 220, 220),
            bg: Rgb::new(0, 0, 0),
            style: TextStyle::new(),
            wide_continuation: false,
        }
    }
}

impl Cell {
    fn apply(&mut self, style: Style) {
        if let Some(fg) = style.fg {
            self.fg = fg;
        }
        if let Some(bg) = style.bg {
            self.bg = bg;
        }
        self.style = style.text;
    }
}

/// A rectangle in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> u16 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u16 {
        self.y.saturating_add(self.height)
    }

    pub fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// A `width` x `height` rect centered in `self`, shrunk to fit.
    pub fn centered(&self, width: u16, height: u16) -> Rect {
        let width = width.min(self.width);
        let height = height.min(self.height);
        Rect::new(
            self.x + (self.width - width) / 2,
            self.y + (self.height - height) / 2,
            width,
            height,
        )
    }
}

#[derive(Debug, Clone)]
pub struct Buffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl Buffer {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = vec![Cell::default(); (width as usize) * (height as usize)];
        Self {
            width,
            height,
            cells,
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn area(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        if x < self.width && y < self.height {
            Some(&self.cells[self.index(x, y)])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, x: u16, y: u16) -> Option<&mut Cell> {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    fn index(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }

    /// Writes `text` at (`x`, `y`), clipped to `max_width` columns and the
    /// buffer edge. Returns the number of columns written.
    pub fn put_str(&mut self, x: u16, y: u16, text: &str, max_width: u16, style: Style) -> u16 {
        if y >= self.height {
            return 0;
        }
        let limit = x.saturating_add(max_width).min(self.width);
        let mut col = x;

        for ch in text.chars() {
            let w = char_width(ch) as u16;
            if w == 0 {
                continue;
            }
            if col + w > limit {
                break;
            }
            if let Some(cell) = self.get_mut(col, y) {
                cell.char = ch;
                cell.wide_continuation = false;
                cell.apply(style);
            }
            for extra in 1..w {
                if let Some(cell) = self.get_mut(col + extra, y) {
                    cell.char = ' ';
                    cell.wide_continuation = true;
                    cell.apply(style);
                }
            }
            col += w;
        }

        col - x
    }

    /// Applies `style` to every cell in `area`, blanking characters.
    pub fn fill(&mut self, area: Rect, style: Style) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.char = ' ';
                    cell.wide_continuation = false;
                    cell.apply(style);
                }
            }
        }
    }

    /// Dims every cell in `area`, keeping its character.
    pub fn dim(&mut self, area: Rect) {
        for y in area.y..area.bottom().min(self.height) {
            for x in area.x..area.right().min(self.width) {
                if let Some(cell) = self.get_mut(x, y) {
                    cell.style.dim = true;
                }
            }
        }
    }

    /// Draws a single-line border around `area`.
    pub fn draw_border(&mut self, area: Rect, style: Style) {
        if area.width < 2 || area.height < 2 {
            return;
        }
        let right = area.right() - 1;
        let bottom = area.bottom() - 1;

        for x in area.x + 1..right {
            self.put_str(x, area.y, "─", 1, style);
            self.put_str(x, bottom, "─", 1, style);
        }
        for y in area.y + 1..bottom {
            self.put_str(area.x, y, "│", 1, style);
            self.put_str(right, y, "│", 1, style);
        }
        self.put_str(area.x, area.y, "┌", 1, style);
        self.put_str(right, area.y, "┐", 1, style);
        self.put_str(area.x, bottom, "└", 1, style);
        self.put_str(right, bottom, "┘", 1, style);
    }

    /// Text of row `y`, for assertions.
    #[cfg(test)]
    pub fn row_text(&self, y: u16) -> String {
        (0..self.width)
            .filter_map(|x| self.get(x, y))
            .filter(|cell| !cell.wide_continuation)
            .map(|cell| cell.char)
            .collect()
    }

    pub fn diff<'a>(&'a self, other: &'a Buffer) -> impl Iterator<Item = (u16, u16, &'a Cell)> {
        self.cells
            .iter()
            .zip(other.cells.iter())
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(move |(i, (cell, _))| {
                let x = (i % self.width as usize) as u16;
                let y = (i / self.width as usize) as u16;
                (x, y, cell)
            })
    }

    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            *cell = Cell::default();
        }
    }

    /// Marks every cell dirty relative to a fresh buffer.
    pub fn invalidate(&mut self) {
        for cell in &mut self.cells {
            cell.char = '\0';
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_str_clips_to_width() {
        let mut buf = Buffer::new(10, 1);
        let written = buf.put_str(2, 0, "Leanne Graham", 5, Style::new());
        assert_eq!(written, 5);
        assert_eq!(buf.row_text(0), "  Leann   ");
    }

    #[test]
    fn test_put_str_clips_to_buffer_edge() {
        let mut buf = Buffer::new(4, 1);
        assert_eq!(buf.put_str(2, 0, "abcdef", 10, Style::new()), 2);
        assert_eq!(buf.row_text(0), "  ab");
        assert_eq!(buf.put_str(0, 3, "off", 10, Style::new()), 0);
    }

    #[test]
    fn test_wide_chars_mark_continuation() {
        let mut buf = Buffer::new(4, 1);
        buf.put_str(0, 0, "日x", 4, Style::new());
        assert!(buf.get(1, 0).unwrap().wide_continuation);
        assert_eq!(buf.get(2, 0).unwrap().char, 'x');
    }

    #[test]
    fn test_style_keeps_unset_colors() {
        let mut buf = Buffer::new(3, 1);
        let red = Rgb::new(200, 0, 0);
        buf.fill(buf.area(), Style::new().bg(red));
        buf.put_str(0, 0, "a", 1, Style::new().bold());
        let cell = buf.get(0, 0).unwrap();
        assert_eq!(cell.bg, red);
        assert!(cell.style.bold);
    }

    #[test]
    fn test_border() {
        let mut buf = Buffer::new(4, 3);
        buf.draw_border(buf.area(), Style::new());
        assert_eq!(buf.row_text(0), "┌──┐");
        assert_eq!(buf.row_text(1), "│  │");
        assert_eq!(buf.row_text(2), "└──┘");
    }

    #[test]
    fn test_dim_keeps_text() {
        let mut buf = Buffer::new(4, 1);
        buf.put_str(0, 0, "abcd", 4, Style::new());
        buf.dim(Rect::new(1, 0, 2, 1));
        assert_eq!(buf.row_text(0), "abcd");
        assert!(!buf.get(0, 0).unwrap().style.dim);
        assert!(buf.get(1, 0).unwrap().style.dim);
    }

    #[test]
    fn test_diff_reports_changed_cells() {
        let prev = Buffer::new(3, 2);
        let mut next = Buffer::new(3, 2);
        next.put_str(1, 1, "x", 1, Style::new());
        let changed: Vec<(u16, u16)> = next.diff(&prev).map(|(x, y, _)| (x, y)).collect();
        assert_eq!(changed, [(1, 1)]);
    }

    #[test]
    fn test_rect_contains_and_center() {
        let r = Rect::new(2, 2, 4, 3);
        assert!(r.contains(2, 2));
        assert!(r.contains(5, 4));
        assert!(!r.contains(6, 4));
        assert_eq!(Rect::new(0, 0, 20, 10).centered(10, 4), Rect::new(5, 3, 10, 4));
        assert_eq!(Rect::new(0, 0, 6, 2).centered(10, 4), Rect::new(0, 0, 6, 2));
    }
}
