use rand::Rng;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fs;
use std::str::FromStr;
use tracing::debug;

use crate::common::Cell;
use crate::error::{MazeError, Result, MIN_DIMENSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tile {
    Open,
    Blocked,
}

impl Tile {
    pub fn is_passable(&self) -> bool {
        *self == Tile::Open
    }

    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Tile::Open),
            '@' | 'T' | '#' => Some(Tile::Blocked),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Map {
    pub height: usize,
    pub width: usize,
    pub grid: Vec<Vec<Tile>>,
}

impl Map {
    pub fn new(grid: Vec<Vec<Tile>>) -> Result<Self> {
        let height = grid.len();
        let width = grid.first().map_or(0, |row| row.len());
        validate_dimensions(height, width)?;

        if let Some(line) = grid.iter().position(|row| row.len() != width) {
            return Err(MazeError::MapParse {
                line: line + 1,
                reason: format!("row has {} cells, expected {width}", grid[line].len()),
            });
        }

        Ok(Map {
            height,
            width,
            grid,
        })
    }

    /// Fully open grid of the given size.
    pub fn open(height: usize, width: usize) -> Result<Self> {
        Map::new(vec![vec![Tile::Open; width]; height])
    }

    pub fn from_file(path: &str) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        let map = text.parse::<Map>()?;
        debug!("loaded {}x{} map from {path}", map.height, map.width);
        Ok(map)
    }

    /// Random maze with a blocked border; every interior cell is blocked with
    /// probability `wall_ratio`.
    pub fn generate<R: Rng + ?Sized>(
        height: usize,
        width: usize,
        wall_ratio: f64,
        rng: &mut R,
    ) -> Result<Self> {
        validate_dimensions(height, width)?;
        if !(0.0..=1.0).contains(&wall_ratio) {
            return Err(MazeError::InvalidConfig(format!(
                "wall ratio must lie in [0, 1], got {wall_ratio}"
            )));
        }

        let mut grid = Vec::with_capacity(height);
        for row in 0..height {
            let tiles_row: Vec<Tile> = (0..width)
                .map(|col| {
                    let border = row == 0 || row == height - 1 || col == 0 || col == width - 1;
                    if border || rng.gen_bool(wall_ratio) {
                        Tile::Blocked
                    } else {
                        Tile::Open
                    }
                })
                .collect();
            grid.push(tiles_row);
        }

        Ok(Map {
            height,
            width,
            grid,
        })
    }

    /// Uniformly chosen open cell off the border, or `None` if there is none.
    pub fn random_open_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let candidates: Vec<Cell> = (1..self.height.saturating_sub(1))
            .flat_map(|x| (1..self.width.saturating_sub(1)).map(move |y| (x, y)))
            .filter(|&(x, y)| self.is_passable(x, y))
            .collect();

        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.gen_range(0..candidates.len())])
    }

    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.0 < self.height && cell.1 < self.width
    }

    pub fn check_bounds(&self, endpoint: &'static str, cell: Cell) -> Result<()> {
        if self.in_bounds(cell) {
            Ok(())
        } else {
            Err(MazeError::OutOfBounds {
                endpoint,
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn is_passable(&self, x: usize, y: usize) -> bool {
        self.grid[x][y].is_passable()
    }

    /// Open cells reachable in one step: up, down, left, right.
    pub fn get_neighbors(&self, x: usize, y: usize) -> Vec<Cell> {
        let directions = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        let mut neighbors = Vec::with_capacity(4);

        for &(dx, dy) in &directions {
            let new_x = x as isize + dx;
            let new_y = y as isize + dy;
            if new_x >= 0
                && new_y >= 0
                && new_x < self.height as isize
                && new_y < self.width as isize
                && self.grid[new_x as usize][new_y as usize].is_passable()
            {
                neighbors.push((new_x as usize, new_y as usize));
            }
        }

        neighbors
    }

    /// True step distance from `source` to every open cell, `usize::MAX` where
    /// unreachable.
    pub fn distances_from(&self, source: Cell) -> Vec<Vec<usize>> {
        let mut distance = vec![vec![usize::MAX; self.width]; self.height];
        if !self.in_bounds(source) || !self.is_passable(source.0, source.1) {
            return distance;
        }

        let mut heap = BinaryHeap::new();
        distance[source.0][source.1] = 0;
        heap.push((Reverse(0), source));

        while let Some((Reverse(cost), (x, y))) = heap.pop() {
            if cost > distance[x][y] {
                continue;
            }

            for (new_x, new_y) in self.get_neighbors(x, y) {
                let next_cost = cost + 1;
                if next_cost < distance[new_x][new_y] {
                    heap.push((Reverse(next_cost), (new_x, new_y)));
                    distance[new_x][new_y] = next_cost;
                }
            }
        }

        distance
    }
}

impl FromStr for Map {
    type Err = MazeError;

    /// Parses `type`, `height`, `width` and `map` header lines followed by
    /// `height` rows of tiles.
    fn from_str(text: &str) -> Result<Self> {
        let mut lines = text.lines().enumerate();

        let mut header = |key: &str| -> Result<String> {
            let (idx, line) = lines.next().ok_or_else(|| MazeError::MapParse {
                line: 0,
                reason: format!("missing `{key}` header"),
            })?;
            let mut parts = line.split_whitespace();
            if parts.next() != Some(key) {
                return Err(MazeError::MapParse {
                    line: idx + 1,
                    reason: format!("expected `{key}` header, found {line:?}"),
                });
            }
            Ok(parts.last().unwrap_or_default().to_string())
        };

        let _type = header("type")?;
        let height = parse_size(&header("height")?, 2)?;
        let width = parse_size(&header("width")?, 3)?;
        let _map = header("map")?;

        // Header sizes are untrusted; rows are only stored as they are read.
        let mut grid = Vec::new();
        for (idx, line) in lines.take(height) {
            let row = line
                .chars()
                .map(|ch| {
                    Tile::from_char(ch).ok_or_else(|| MazeError::MapParse {
                        line: idx + 1,
                        reason: format!("unknown tile {ch:?}"),
                    })
                })
                .collect::<Result<Vec<Tile>>>()?;
            if row.len() != width {
                return Err(MazeError::MapParse {
                    line: idx + 1,
                    reason: format!("row has {} cells, expected {width}", row.len()),
                });
            }
            grid.push(row);
        }

        if grid.len() != height {
            return Err(MazeError::MapParse {
                line: grid.len() + 5,
                reason: format!("expected {height} rows, found {}", grid.len()),
            });
        }

        Map::new(grid)
    }
}

fn parse_size(value: &str, line: usize) -> Result<usize> {
    value.parse::<usize>().map_err(|err| MazeError::MapParse {
        line,
        reason: format!("invalid size {value:?}: {err}"),
    })
}

pub(crate) fn validate_dimensions(height: usize, width: usize) -> Result<()> {
    if height < MIN_DIMENSION || width < MIN_DIMENSION {
        return Err(MazeError::InvalidDimensions {
            height,
            width,
            min: MIN_DIMENSION,
        });
    }
    Ok(())
}
