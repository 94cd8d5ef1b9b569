use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::collision::CollisionKind;
use crate::engine::{GameStatus, Snapshot};
use crate::food::FoodKind;
use crate::grid::{Cell, GridSize};
use crate::input::Direction;

/// Approximate pixel width of one terminal column, used to turn the
/// configured cell size into a column count.
const TERMINAL_COLUMN_PX: u16 = 8;

const GLYPH_SNAKE_BODY: &str = "█";
const GLYPH_SNAKE_TAIL: &str = "▓";
const GLYPH_SNAKE_HEAD_UP: &str = "▲";
const GLYPH_SNAKE_HEAD_DOWN: &str = "▼";
const GLYPH_SNAKE_HEAD_LEFT: &str = "◀";
const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶";
const FOOD_GLYPHS: &[&str] = &["●", "◆", "♥", "♣", "★"];
const FOOD_COLORS: &[Color] = &[
    Color::Red,
    Color::Magenta,
    Color::LightMagenta,
    Color::Yellow,
    Color::Green,
];

/// Front-end state drawn next to the engine snapshot.
#[derive(Debug, Clone, Copy)]
pub struct View {
    pub bounds: GridSize,
    /// Terminal columns per logical cell.
    pub cell_columns: u16,
    pub paused: bool,
    pub collision: Option<CollisionKind>,
}

impl View {
    /// Derives the column count from a pixel cell size, never below one column.
    #[must_use]
    pub fn cell_columns_for(cell_size: u16) -> u16 {
        (cell_size / TERMINAL_COLUMN_PX).max(1)
    }
}

/// Renders the full game frame from one snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot, view: View) {
    let [board_area, status_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

    let board_rect = board_rect(board_area, view);
    let block = Block::bordered().border_style(Style::new().fg(Color::Gray));
    let inner = block.inner(board_rect);
    frame.render_widget(block, board_rect);

    render_food(frame, inner, snapshot, view);
    render_snake(frame, inner, snapshot, view);
    render_status(frame, status_area, snapshot, view);

    match snapshot.status {
        GameStatus::Collided => render_game_over(frame, board_rect, snapshot.score, view.collision),
        GameStatus::Victory => render_victory(frame, board_rect, snapshot.score),
        GameStatus::Running if view.paused => render_pause(frame, board_rect),
        GameStatus::Running => {}
    }
}

fn board_rect(area: Rect, view: View) -> Rect {
    let width = view
        .bounds
        .width()
        .saturating_mul(view.cell_columns)
        .saturating_add(2)
        .min(area.width);
    let height = view.bounds.height().saturating_add(2).min(area.height);

    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, view: View) {
    let Some(food) = &snapshot.food else {
        return;
    };
    let Some((x, y)) = cell_to_terminal(inner, view, food.cell) else {
        return;
    };

    let palette_index = kind_palette_index(&food.kind);
    let glyph = FOOD_GLYPHS[palette_index % FOOD_GLYPHS.len()];
    let color = FOOD_COLORS[palette_index % FOOD_COLORS.len()];
    frame
        .buffer_mut()
        .set_string(x, y, glyph, Style::new().fg(color));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot, view: View) {
    let last = snapshot.segments.len().saturating_sub(1);
    let body_fill = GLYPH_SNAKE_BODY.repeat(usize::from(view.cell_columns));
    let tail_fill = GLYPH_SNAKE_TAIL.repeat(usize::from(view.cell_columns));

    let buffer = frame.buffer_mut();
    // Tail first so the head wins if a wrapped frame ever overlaps.
    for (index, segment) in snapshot.segments.iter().enumerate().rev() {
        let Some((x, y)) = cell_to_terminal(inner, view, segment.cell) else {
            continue;
        };

        if index == 0 {
            buffer.set_string(
                x,
                y,
                head_glyph(segment.direction),
                Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
            );
        } else if index == last {
            buffer.set_string(x, y, &tail_fill, Style::new().fg(Color::DarkGray));
        } else {
            buffer.set_string(x, y, &body_fill, Style::new().fg(Color::Blue));
        }
    }
}

fn render_status(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot, view: View) {
    let state = match snapshot.status {
        GameStatus::Running if view.paused => "paused",
        GameStatus::Running => "running",
        GameStatus::Collided => "collided",
        GameStatus::Victory => "board full",
    };
    let line = format!(
        "score {}  length {}  tick {}ms  {}",
        snapshot.score,
        snapshot.segments.len(),
        snapshot.tick_interval_ms,
        state
    );

    frame.render_widget(
        Paragraph::new(Line::from(line))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White)),
        area,
    );
}

fn render_pause(frame: &mut Frame<'_>, area: Rect) {
    render_popup(
        frame,
        area,
        " pause ",
        vec![
            Line::from("PAUSED"),
            Line::from(""),
            Line::from("[P]/[Space] Resume"),
            Line::from("[Q] Quit"),
        ],
    );
}

fn render_game_over(frame: &mut Frame<'_>, area: Rect, score: u32, collision: Option<CollisionKind>) {
    render_popup(
        frame,
        area,
        " game over ",
        vec![
            Line::from("GAME OVER"),
            Line::from(""),
            Line::from(format!("Score: {score}")),
            Line::from(match collision {
                Some(CollisionKind::Wall) => "Cause: hit wall",
                Some(CollisionKind::SelfCollision) => "Cause: hit yourself",
                None => "",
            }),
            Line::from(""),
            Line::from("[R]/[Enter] Play Again"),
            Line::from("[Q] Quit"),
        ],
    );
}

fn render_victory(frame: &mut Frame<'_>, area: Rect, score: u32) {
    render_popup(
        frame,
        area,
        " board full ",
        vec![
            Line::from("NO ROOM LEFT"),
            Line::from(""),
            Line::from(format!("Score: {score}")),
            Line::from(""),
            Line::from("[R]/[Enter] Play Again"),
            Line::from("[Q] Quit"),
        ],
    );
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let popup = centered_popup(area, 70, 60);
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height_percent: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Percentage((100 - height_percent) / 2),
        Constraint::Percentage(height_percent),
        Constraint::Percentage((100 - height_percent) / 2),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}

fn head_glyph(direction: Direction) -> &'static str {
    match direction {
        Direction::Up => GLYPH_SNAKE_HEAD_UP,
        Direction::Down => GLYPH_SNAKE_HEAD_DOWN,
        Direction::Left => GLYPH_SNAKE_HEAD_LEFT,
        Direction::Right => GLYPH_SNAKE_HEAD_RIGHT,
    }
}

/// Stable palette slot for a kind name.
fn kind_palette_index(kind: &FoodKind) -> usize {
    kind.as_str()
        .bytes()
        .fold(0usize, |acc, byte| acc.wrapping_mul(31).wrapping_add(usize::from(byte)))
}

fn cell_to_terminal(inner: Rect, view: View, cell: Cell) -> Option<(u16, u16)> {
    if !view.bounds.contains(cell) {
        return None;
    }

    let x_offset = u16::try_from(cell.x).ok()?.checked_mul(view.cell_columns)?;
    let y_offset = u16::try_from(cell.y).ok()?;

    let x = inner.x.saturating_add(x_offset);
    let y = inner.y.saturating_add(y_offset);
    if x >= inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}
