//! Compile-time description of matrix dimensions and wiring.
//!
//! See [`MatrixGeometry`] for the mapping rules and examples.

/// Storage offset returned by [`MatrixGeometry::xy_safe`] for any off-panel coordinate.
///
/// A [`PixelBuffer`](crate::matrix::PixelBuffer) stores its pixels one slot to the right, so
/// this sentinel addresses the buffer's safety slot rather than a visible LED.
pub const SAFETY_INDEX: isize = -1;

/// Compile-time description of a rectangular LED matrix and how its string is wired.
///
/// Coordinates use a screen-style convention: `(0, 0)` is the top-left corner,
/// `x` increases to the right, and `y` increases downward.
///
/// The string runs along rows. With `serpentine` wiring it reverses direction on every odd
/// row; without it, every row runs left to right. Each wired row may end in `filler_per_row`
/// unlit LEDs (wiring slack), which are counted in the [span](Self::span) but never mapped.
///
/// # Example
///
/// A 9×9 serpentine panel with one filler LED per row:
///
/// ```rust
/// use glow_matrix::matrix::MatrixGeometry;
///
/// const GEOMETRY: MatrixGeometry = MatrixGeometry::serpentine(9, 9, 1);
/// const _: () = assert!(GEOMETRY.span() == 90); // Compile-time assert
///
/// assert_eq!(GEOMETRY.xy(0, 0), 0);
/// assert_eq!(GEOMETRY.xy(8, 0), 8);
/// assert_eq!(GEOMETRY.xy(0, 1), 18);
/// assert_eq!(GEOMETRY.xy(8, 1), 10);
/// assert_eq!(GEOMETRY.xy_safe(9, 0), -1);
/// ```
///
/// ```text
/// 3×2 serpentine, one filler LED per row (F marks filler):
///   LED0  LED1  LED2  F3
///   LED6  LED5  LED4  F7
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MatrixGeometry {
    width: u16,
    height: u16,
    filler_per_row: u16,
    serpentine: bool,
}

impl MatrixGeometry {
    /// Constructor: checks the grid is non-empty.
    #[must_use]
    pub const fn new(width: u16, height: u16, filler_per_row: u16, serpentine: bool) -> Self {
        assert!(width > 0 && height > 0, "width and height must be positive");
        Self {
            width,
            height,
            filler_per_row,
            serpentine,
        }
    }

    /// Serpentine row-major wiring (alternating left-to-right and right-to-left across rows).
    ///
    /// ```text
    /// Strip snakes across rows (3×2 example, no filler):
    ///   LED0  LED1  LED2
    ///   LED5  LED4  LED3
    /// ```
    #[must_use]
    pub const fn serpentine(width: u16, height: u16, filler_per_row: u16) -> Self {
        Self::new(width, height, filler_per_row, true)
    }

    /// Progressive row-major wiring (every row left-to-right, no filler LEDs).
    ///
    /// ```text
    /// 3×2 example:
    ///   LED0  LED1  LED2
    ///   LED3  LED4  LED5
    /// ```
    #[must_use]
    pub const fn progressive(width: u16, height: u16) -> Self {
        Self::new(width, height, 0, false)
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u16 {
        self.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Unlit LEDs at the end of each wired row.
    #[must_use]
    pub const fn filler_per_row(&self) -> u16 {
        self.filler_per_row
    }

    /// Whether odd rows run right-to-left.
    #[must_use]
    pub const fn is_serpentine(&self) -> bool {
        self.serpentine
    }

    /// Number of visible grid cells (`W·H`).
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Total LEDs on the string, filler included (`W·H + H·F`).
    #[must_use]
    pub const fn span(&self) -> usize {
        self.cell_count() + self.height as usize * self.filler_per_row as usize
    }

    /// Map an in-range `(x, y)` to its LED index on the string.
    ///
    /// Callers must keep `x < width` and `y < height`; nothing is checked here and an
    /// out-of-range input yields an unspecified index. Use [`xy_safe`](Self::xy_safe) when
    /// the coordinate may fall off the panel.
    ///
    /// Without serpentine wiring the filler term is not applied, matching panels whose rows
    /// are wired back to back.
    #[must_use]
    pub const fn xy(&self, x: u16, y: u16) -> usize {
        let width = self.width as usize;
        let x = x as usize;
        let y = y as usize;
        if !self.serpentine {
            return y * width + x;
        }
        let filler = y * self.filler_per_row as usize;
        if y & 1 == 0 {
            y * width + x + filler
        } else {
            // Odd rows are wired back toward column 0.
            let reverse_x = (width - 1).wrapping_sub(x);
            (y * width).wrapping_add(reverse_x) + filler
        }
    }

    /// Map `(x, y)` to its LED index, or [`SAFETY_INDEX`] when the coordinate is off the panel.
    ///
    /// Every off-panel coordinate maps to the same sentinel: a write through any of them lands
    /// in the buffer's one safety slot, and a read returns whatever was written there last.
    #[must_use]
    pub const fn xy_safe(&self, x: u16, y: u16) -> isize {
        if x >= self.width || y >= self.height {
            return SAFETY_INDEX;
        }
        // In range: the index is below span, which PixelBuffer keeps well under isize::MAX.
        self.xy(x, y) as isize
    }

    /// Iterate every visible `(x, y)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u16, u16)> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y_index| (0..width).map(move |x_index| (x_index, y_index)))
    }
}

#[cfg(test)]
mod tests {
    use super::{MatrixGeometry, SAFETY_INDEX};

    #[test]
    fn progressive_ignores_filler_term() {
        let geometry = MatrixGeometry::new(4, 3, 2, false);
        assert_eq!(geometry.xy(3, 2), 11);
        assert_eq!(geometry.span(), 18);
    }

    #[test]
    fn last_row_has_no_special_case() {
        // 9 rows: the last row (8) is even and runs forward.
        let geometry = MatrixGeometry::serpentine(9, 9, 1);
        assert_eq!(geometry.xy(0, 8), 80);
        assert_eq!(geometry.xy(8, 8), 88);
    }

    #[test]
    fn safe_mapping_rejects_each_axis_independently() {
        let geometry = MatrixGeometry::serpentine(9, 9, 1);
        assert_eq!(geometry.xy_safe(9, 3), SAFETY_INDEX);
        assert_eq!(geometry.xy_safe(3, 9), SAFETY_INDEX);
        assert_eq!(geometry.xy_safe(u16::MAX, u16::MAX), SAFETY_INDEX);
        assert_eq!(geometry.xy_safe(3, 3), 3 * 9 + (8 - 3) + 3);
    }

    #[test]
    fn cells_walk_rows_in_order() {
        let geometry = MatrixGeometry::progressive(2, 2);
        let cells: [(u16, u16); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];
        assert!(geometry.cells().eq(cells));
    }

    #[test]
    #[should_panic(expected = "width and height must be positive")]
    fn new_panics_on_empty_grid() {
        let _ = MatrixGeometry::new(0, 4, 0, true);
    }
}
