use checkers_session::board::BoardCatalog;
use checkers_session::color::PieceColor;
use checkers_session::coord::Coord;
use checkers_session::piece::PieceId;
use crossterm::style::{self, Stylize};
use itertools::Itertools;


fn piece_style(color: PieceColor) -> style::Color {
    match color {
        PieceColor::Red => style::Color::Red,
        PieceColor::Green => style::Color::Green,
        PieceColor::Blue => style::Color::Blue,
        PieceColor::Yellow => style::Color::Yellow,
        PieceColor::Black => style::Color::DarkGrey,
        PieceColor::White => style::Color::White,
    }
}

fn format_square(ch: char) -> String { format!(" {} ", ch) }

fn format_header(n: u8) -> String { format!("{:^3}", n) }

// Rows go top to bottom, diagonals left to right; headers show the numbers typed to select a
// field. `selected` is drawn inverted.
pub fn render_board(catalog: &BoardCatalog, selected: Option<PieceId>) -> String {
    let shape = catalog.shape();
    let header = std::iter::once("   ".to_owned())
        .chain((0..shape.num_diagonals).map(format_header))
        .join("");
    let mut ret = format!("{}\n", header);
    for row in 0..shape.num_rows {
        ret.push_str(&format_header(row));
        for diagonal in 0..shape.num_diagonals {
            ret.push_str(&render_square(catalog, Coord::new(row, diagonal), selected));
        }
        ret.push('\n');
    }
    ret
}

fn render_square(catalog: &BoardCatalog, coord: Coord, selected: Option<PieceId>) -> String {
    let Ok(field) = catalog.field_at(coord.row, coord.diagonal) else {
        return format_square(' ');
    };
    match catalog.piece_at(field) {
        Some(piece) => {
            let square = format_square('●').with(piece_style(piece.color));
            if selected == Some(piece.id) {
                square.reverse().to_string()
            } else {
                square.to_string()
            }
        }
        None => format_square('·').with(style::Color::DarkGrey).to_string(),
    }
}


#[cfg(test)]
mod tests {
    use checkers_session::coord::BoardShape;
    use checkers_session::test_util::{P1, rectangular_snapshot, sample_players};
    use pretty_assertions::assert_eq;

    use super::*;

    // Styling is stripped by comparing line count and width only.
    #[test]
    fn board_layout() {
        let snapshot = rectangular_snapshot(BoardShape::new(3, 4), sample_players(), &[(P1, 1, 2)]);
        let catalog = BoardCatalog::from_snapshot(&snapshot).unwrap();
        let rendered = render_board(&catalog, None);
        let lines = rendered.lines().collect_vec();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "    0  1  2  3 ");
        assert!(lines[2].contains('●'));
        assert!(!lines[1].contains('●'));
    }
}
