// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text rendering for the CLI.

use goban_core::{gtp_column, Color, Coord, GameSource};
use goban_ui_egui::components::board::{star_point_indices, DrawList};
use std::fmt::Write;

/// Render the current position as ASCII art, top row first
pub fn render_board(game: &dyn GameSource) -> String {
    let size = game.board_size();
    let stones = game.stones();
    let last = game.current_node().single_move().and_then(|mv| mv.coord);
    let star_x = star_point_indices(size.width);
    let star_y = star_point_indices(size.height);

    let mut output = String::new();
    let labels = column_labels(size.width);
    output.push_str(&labels);

    for row in (0..size.height).rev() {
        let _ = write!(output, "{:2} ", row + 1);
        for col in 0..size.width {
            let coord = Coord::new(col, row);
            let symbol = match stones.get(&coord) {
                Some(Color::Black) if last == Some(coord) => '◉',
                Some(Color::White) if last == Some(coord) => '◎',
                Some(Color::Black) => '●',
                Some(Color::White) => '○',
                None if star_x.contains(&col) && star_y.contains(&row) => '+',
                None => '·',
            };
            let _ = write!(output, " {}", symbol);
        }
        let _ = writeln!(output, " {}", row + 1);
    }

    output.push_str(&labels);
    output
}

fn column_labels(width: u8) -> String {
    let mut line = String::from("   ");
    for col in 0..width {
        let _ = write!(line, " {}", gtp_column(col).unwrap_or('?'));
    }
    line.push('\n');
    line
}

/// One line per run of commands from the same layer
pub fn render_summary(grid: &DrawList, contents: &DrawList) -> String {
    let mut output = String::new();
    for (name, list) in [("grid", grid), ("contents", contents)] {
        let _ = writeln!(output, "{} ({} commands)", name, list.len());
        for (layer, count) in list.summary() {
            let _ = writeln!(output, "  {:<12} {}", format!("{:?}", layer), count);
        }
    }
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use goban_core::{BoardSize, GameTree};
    use goban_ui_egui::components::board::{DrawCommand, Layer};

    fn game(moves: &[&str]) -> GameTree {
        let mut game = GameTree::new(BoardSize::square(9).unwrap());
        for vertex in moves {
            game.play_gtp(vertex).unwrap();
        }
        game
    }

    #[test]
    fn test_render_empty_9x9_board() {
        let output = render_board(&game(&[]));

        // Column labels skip 'I'
        assert!(output.contains("A B C D E F G H J"));
        assert!(output.contains(" 1 "));
        assert!(output.contains(" 9 "));

        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 11); // 2 label rows + 9 board rows
        // Top row is printed first
        assert!(lines[1].starts_with(" 9"));
        assert_eq!(output.matches('+').count(), 9);
    }

    #[test]
    fn test_render_board_with_stones() {
        let output = render_board(&game(&["E5", "D4"]));
        assert!(output.contains('●'));
        // Last move is marked
        assert!(output.contains('◎'));
        assert!(!output.contains('○'));
    }

    #[test]
    fn test_summary_groups_layers() {
        let mut contents = DrawList::new();
        let command = DrawCommand::FilledCircle {
            center: Default::default(),
            radius: 1.0,
            color: Default::default(),
        };
        contents.push(Layer::Stone, command.clone());
        contents.push(Layer::Stone, command.clone());
        contents.push(Layer::Ghost, command);

        let output = render_summary(&DrawList::new(), &contents);
        assert!(output.contains("grid (0 commands)"));
        assert!(output.contains("contents (3 commands)"));
        assert!(output.contains("Stone        2"));
        assert!(output.contains("Ghost        1"));
    }
}
