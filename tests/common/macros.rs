/// Asserts that the cell at `(x, y)` equals the expected cell exactly.
#[macro_export]
macro_rules! assert_cell {
    ($grid:expr, $x:expr, $y:expr, $expected:expr) => {
        let actual = $grid.get($x, $y).expect("cell out of bounds");
        assert_eq!(
            actual, $expected,
            "Cell ({}, {}) is {:?}, expected {:?}",
            $x, $y, actual, $expected
        );
    };
}

/// Asserts that every cell of the grid is black.
#[macro_export]
macro_rules! assert_all_black {
    ($grid:expr) => {
        let live = $grid.stats().live_cells;
        assert_eq!(live, 0, "Expected an all-black grid, found {} live cells", live);
    };
}
