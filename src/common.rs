/// `(row, col)` position in the grid.
pub type Cell = (usize, usize);

pub type Path = Vec<Cell>;

/// Frontier entry; `f_cost` is always `g_cost + h_cost`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchNode {
    pub cell: Cell,
    pub g_cost: usize,
    pub h_cost: usize,
    pub f_cost: usize,
}

impl SearchNode {
    pub fn new(cell: Cell, g_cost: usize, h_cost: usize) -> Self {
        SearchNode {
            cell,
            g_cost,
            h_cost,
            f_cost: g_cost + h_cost,
        }
    }
}

/// Best known cost from the start for every cell, `None` while unreached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostTable {
    costs: Vec<Vec<Option<usize>>>,
}

impl CostTable {
    pub(crate) fn new(height: usize, width: usize) -> Self {
        CostTable {
            costs: vec![vec![None; width]; height],
        }
    }

    pub fn get(&self, cell: Cell) -> Option<usize> {
        self.costs[cell.0][cell.1]
    }

    pub(crate) fn set(&mut self, cell: Cell, cost: usize) {
        self.costs[cell.0][cell.1] = Some(cost);
    }

    /// True when `cost` beats what is recorded, including unreached cells.
    pub(crate) fn improves(&self, cell: Cell, cost: usize) -> bool {
        self.get(cell).map_or(true, |known| cost < known)
    }
}

/// Predecessor of every reached cell; the start and unreached cells have none.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentTable {
    height: usize,
    width: usize,
    parents: Vec<Vec<Option<Cell>>>,
}

impl ParentTable {
    pub(crate) fn new(height: usize, width: usize) -> Self {
        ParentTable {
            height,
            width,
            parents: vec![vec![None; width]; height],
        }
    }

    pub fn get(&self, cell: Cell) -> Option<Cell> {
        self.parents
            .get(cell.0)
            .and_then(|row| row.get(cell.1))
            .copied()
            .flatten()
    }

    pub(crate) fn set(&mut self, cell: Cell, parent: Cell) {
        self.parents[cell.0][cell.1] = Some(parent);
    }

    pub fn capacity(&self) -> usize {
        self.height * self.width
    }
}

#[derive(Debug, Clone)]
pub struct SearchTables {
    pub costs: CostTable,
    pub parents: ParentTable,
}

#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Found(SearchTables),
    NotFound,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}
