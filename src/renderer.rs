use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::board::{Board, TileIndex};
use crate::config::{GLYPH_FOOD, GLYPH_SNAKE, GLYPH_TILE, TILE_WIDTH, Theme};
use crate::controller::RenderView;

/// Renders the full game frame from one complete board view.
pub fn render(frame: &mut Frame<'_>, board: Board, view: &RenderView, status: &str, theme: &Theme) {
    let [board_area, status_area] = layout(frame.area(), board);

    for tile in view.walls.iter() {
        draw_tile(frame, board_area, board, tile, GLYPH_TILE, Style::new().fg(theme.wall));
    }
    for tile in view.free.iter() {
        draw_tile(frame, board_area, board, tile, GLYPH_TILE, Style::new().fg(theme.free));
    }

    let on_floor = Style::new().bg(theme.free);
    for &tile in &view.snake {
        draw_tile(
            frame,
            board_area,
            board,
            tile,
            GLYPH_SNAKE,
            on_floor.fg(theme.snake).add_modifier(Modifier::BOLD),
        );
    }
    draw_tile(frame, board_area, board, view.food, GLYPH_FOOD, on_floor.fg(theme.food));

    frame.render_widget(
        Paragraph::new(Line::from(status))
            .alignment(Alignment::Center)
            .style(Style::new().fg(theme.status)),
        status_area,
    );
}

/// Centers the board and reserves one status row beneath it.
fn layout(area: Rect, board: Board) -> [Rect; 2] {
    let width = board.size().saturating_mul(TILE_WIDTH);
    let height = board.size();

    let [column] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [board_area, status_area] =
        Layout::vertical([Constraint::Length(height), Constraint::Length(1)])
            .flex(Flex::Center)
            .areas(column);

    [board_area, status_area]
}

fn draw_tile(
    frame: &mut Frame<'_>,
    area: Rect,
    board: Board,
    tile: TileIndex,
    glyph: &str,
    style: Style,
) {
    let Some((x, y)) = tile_to_terminal(area, board, tile) else {
        return;
    };
    frame.buffer_mut().set_string(x, y, glyph, style);
}

/// Maps a tile to its top-left terminal cell, or `None` when clipped.
fn tile_to_terminal(area: Rect, board: Board, tile: TileIndex) -> Option<(u16, u16)> {
    if tile >= board.tile_count() {
        return None;
    }

    let column = u16::try_from(board.to_x(tile)).ok()?;
    let row = u16::try_from(board.to_y(tile)).ok()?;

    let x = area.x.saturating_add(column.saturating_mul(TILE_WIDTH));
    let y = area.y.saturating_add(row);
    if x.saturating_add(TILE_WIDTH) > area.right() || y >= area.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;

    use crate::board::Board;
    use crate::config::{GLYPH_FOOD, GLYPH_SNAKE, THEME_CLASSIC};
    use crate::input::Direction;
    use crate::state::Snapshot;
    use crate::controller::StateController;

    use super::{render, tile_to_terminal};

    #[test]
    fn tiles_map_to_two_cell_columns() {
        let board = Board::new(5).expect("valid size");
        let area = Rect::new(3, 2, 10, 5);

        assert_eq!(tile_to_terminal(area, board, 0), Some((3, 2)));
        assert_eq!(tile_to_terminal(area, board, 7), Some((7, 3)));
        assert_eq!(tile_to_terminal(area, board, 25), None);
    }

    #[test]
    fn clipped_tiles_are_skipped() {
        let board = Board::new(5).expect("valid size");
        let area = Rect::new(0, 0, 6, 2);

        assert_eq!(tile_to_terminal(area, board, 4), None);
        assert_eq!(tile_to_terminal(area, board, 10), None);
    }

    #[test]
    fn snake_and_food_are_drawn() {
        let board = Board::new(5).expect("valid size");
        let mut controller = StateController::new_with_seed(board, 1);
        controller.restore(
            Snapshot::from_parts(board, Direction::Right, vec![12], 18).expect("valid"),
        )
        .expect("restore");
        let view = controller.render_view().expect("view");

        let mut terminal = Terminal::new(TestBackend::new(10, 6)).expect("test terminal");
        terminal
            .draw(|frame| render(frame, board, &view, "press space", &THEME_CLASSIC))
            .expect("draw");

        let buffer = terminal.backend().buffer();
        let cell = |x: u16, y: u16| buffer[(x, y)].symbol().to_string();
        // Tile 12 is (2, 2) and tile 18 is (3, 3).
        assert_eq!(cell(4, 2) + &cell(5, 2), GLYPH_SNAKE);
        assert_eq!(cell(6, 3) + &cell(7, 3), GLYPH_FOOD);
    }
}
