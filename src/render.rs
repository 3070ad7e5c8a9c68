use crate::common::Cell;
use crate::map::{Map, Tile};

pub const BLOCKED: char = '@';
pub const OPEN: char = ' ';
pub const PATH: char = '~';
pub const START: char = 'S';
pub const GOAL: char = 'E';

/// Draws the bare maze, one row per line.
pub fn render_maze(map: &Map) -> String {
    draw(tile_canvas(map))
}

/// Draws the maze one row per line, overlaying `path` and the endpoints.
pub fn render_map(map: &Map, start: Cell, goal: Cell, path: Option<&[Cell]>) -> String {
    let mut canvas = tile_canvas(map);

    for &(x, y) in path.unwrap_or_default() {
        canvas[x][y] = PATH;
    }
    if map.in_bounds(start) {
        canvas[start.0][start.1] = START;
    }
    if map.in_bounds(goal) {
        canvas[goal.0][goal.1] = GOAL;
    }

    draw(canvas)
}

fn tile_canvas(map: &Map) -> Vec<Vec<char>> {
    map.grid
        .iter()
        .map(|row| {
            row.iter()
                .map(|tile| match tile {
                    Tile::Open => OPEN,
                    Tile::Blocked => BLOCKED,
                })
                .collect()
        })
        .collect()
}

fn draw(canvas: Vec<Vec<char>>) -> String {
    let mut out = String::new();
    for row in canvas {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_with_path() {
        let map = Map::from_file("map_file/test/gap.map").unwrap();
        let path = [(1, 1), (1, 2), (2, 2), (3, 2), (3, 3)];
        let rendered = render_map(&map, (1, 1), (3, 3), Some(&path[..]));
        let expected = "@@@@@\n@S~ @\n@@~@@\n@ ~E@\n@@@@@\n";
        assert_eq!(rendered, expected);
    }

    #[test]
    fn test_render_bare_maze() {
        let map = Map::from_file("map_file/test/gap.map").unwrap();
        let rendered = render_maze(&map);
        assert_eq!(rendered, "@@@@@\n@   @\n@@ @@\n@   @\n@@@@@\n");
        assert!(!rendered.contains(START) && !rendered.contains(GOAL));
    }

    #[test]
    fn test_render_without_path() {
        let map = Map::from_file("map_file/test/gap.map").unwrap();
        let rendered = render_map(&map, (1, 3), (3, 1), None);
        assert_eq!(rendered.lines().nth(1), Some("@  S@"));
        assert_eq!(rendered.lines().nth(3), Some("@E  @"));
        assert_eq!(rendered.lines().count(), 5);
    }
}
