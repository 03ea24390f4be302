pub mod macros;

use ngol_lib::core::{Cell, Grid, Simulation};

#[allow(dead_code)]
pub struct GridBuilder {
    width: usize,
    height: usize,
    fill: Cell,
    cells: Vec<(usize, usize, Cell)>,
}

#[allow(dead_code)]
impl GridBuilder {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            fill: Cell::BLACK,
            cells: Vec::new(),
        }
    }

    pub fn filled(mut self, cell: Cell) -> Self {
        self.fill = cell;
        self
    }

    pub fn with_cell(mut self, x: usize, y: usize, cell: Cell) -> Self {
        self.cells.push((x, y, cell));
        self
    }

    pub fn build(self) -> Grid {
        let mut grid = Grid::filled(self.width, self.height, self.fill).unwrap();
        for (x, y, cell) in self.cells {
            grid.set(x, y, cell).unwrap();
        }
        grid
    }

    /// Double-buffered simulation whose current generation is this grid.
    pub fn into_simulation(self, under: f32, over: f32) -> Simulation {
        let (w, h) = (self.width, self.height);
        let grid = self.build();
        let mut sim = Simulation::new(w, h, under, over).unwrap().with_seed(0);
        sim.reset_to(&grid).unwrap();
        sim
    }
}

/// Deterministic, non-trivial test pattern.
#[allow(dead_code)]
pub fn striped(width: usize, height: usize) -> Grid {
    let cells = (0..width * height)
        .map(|i| {
            Cell::new(
                (i % 7) as f32 / 6.0,
                (i % 5) as f32 / 4.0,
                ((i / width) % 3) as f32 / 2.0,
            )
        })
        .collect();
    Grid::from_cells(width, height, cells).unwrap()
}
