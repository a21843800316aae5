use crate::board::Board;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// A terminal screen the board is rasterized onto.
///
/// Each braille character packs a 2x4 block of pixels, so a `w x h` pixel
/// screen renders as `ceil(w / 2)` characters per line over `ceil(h / 4)`
/// lines.
pub struct Screen {
    /// One on/off flag per screen pixel, row-major.
    px: Vec<bool>,

    /// Braille codepoints, rebuilt from `px` on every render.
    cp: Vec<u32>,

    /// The rendered frame.
    frame: String,

    /// Screen width in pixels.
    w: usize,

    /// Screen height in pixels.
    h: usize,
}

impl Screen {
    pub fn new(w: usize, h: usize) -> Self {
        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        // Each braille character takes 3 bytes in UTF-8, plus one newline
        // byte per line.
        let frame = String::with_capacity(3 * (bw * bh) + bh);

        Self {
            px: vec![false; w * h],
            cp: vec![BRAILLE_EMPTY; bw * bh],
            frame,
            w,
            h,
        }
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.px.fill(false);
    }

    /// Light one pixel for every live cell, mapping cell `(row, col)` to
    /// pixel `(x = col, y = row)`. Cells past the screen edges are clipped.
    pub fn draw_board(&mut self, board: &Board) {
        let cols = board.cols();

        for (i, &cell) in board.cells().iter().enumerate() {
            if cell == 0 {
                continue;
            }

            let (y, x) = (i / cols, i % cols);

            if x < self.w && y < self.h {
                self.px[y * self.w + x] = true;
            }
        }
    }

    /// Fold the pixel buffer into braille characters and return the frame,
    /// one line per 4 pixel rows, each line terminated by a newline.
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.px.iter().enumerate() {
            if px {
                let (x, y) = (n % self.w, n / self.w);

                self.cp[(y / 4) * bw + (x / 2)] += Self::dot_value(x, y);
            }
        }

        self.frame.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.frame.push('\n');
            }

            // BRAILLE_EMPTY plus at most 0xFF is always a valid codepoint
            match char::from_u32(c) {
                Some(c) => self.frame.push(c),
                None => unreachable!("braille codepoints stay within U+28FF"),
            }
        }
        self.frame.push('\n');

        &self.frame
    }

    fn dot_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Screen;
    use crate::board::Board;

    #[test]
    fn empty_screen_renders_blank_braille() {
        let mut screen = Screen::new(4, 4);

        assert_eq!(screen.render(), "\u{2800}\u{2800}\n");
    }

    #[test]
    fn full_block_renders_all_dots() {
        let mut board = Board::blank(4, 2).unwrap();
        for row in 0..4 {
            for col in 0..2 {
                board.set(row, col, true).unwrap();
            }
        }

        let mut screen = Screen::new(2, 4);
        screen.draw_board(&board);

        // all 8 dots on: 0x2800 + 0xFF
        assert_eq!(screen.render(), "\u{28FF}\n");
    }

    #[test]
    fn cells_past_the_screen_are_clipped() {
        let mut board = Board::blank(8, 8).unwrap();
        board.set(7, 7, true).unwrap();

        let mut screen = Screen::new(2, 4);
        screen.draw_board(&board);

        assert_eq!(screen.render(), "\u{2800}\n");
    }

    #[test]
    fn top_left_cell_is_dot_one() {
        let mut board = Board::blank(1, 1).unwrap();
        board.set(0, 0, true).unwrap();

        let mut screen = Screen::new(2, 4);
        screen.draw_board(&board);

        assert_eq!(screen.render(), "\u{2801}\n");
    }
}
