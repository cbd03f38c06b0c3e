use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::nav::controller::NavigationController;
use crate::nav::screen::ScreenView;
use crate::nav::session::PlayerState;
use crate::nav::widgets::GridLayout;
use crate::ui::theme::Theme;

/// Appliance-wide status shown under every screen
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusBar {
    pub volume: u8,
    pub muted: bool,
    pub sleeping: bool,
    pub player: Option<String>,
}

impl StatusBar {
    pub fn from_controller(nav: &NavigationController) -> Self {
        Self {
            volume: nav.volume(),
            muted: nav.is_muted(),
            sleeping: nav.player_state() == PlayerState::Sleeping,
            player: nav.current_player_screen(),
        }
    }

    pub fn line(&self) -> String {
        let volume = if self.muted {
            "muted".to_string()
        } else {
            format!("vol {}", self.volume)
        };
        let player = self.player.as_deref().unwrap_or("-");
        let state = if self.sleeping { " | sleeping" } else { "" };
        format!(" {} | player {}{}", volume, player, state)
    }
}

/// Row and column of the cell holding the linear `index`
pub fn cell_position(index: usize, rows: usize, cols: usize, layout: GridLayout) -> (usize, usize) {
    let rows = rows.max(1);
    let cols = cols.max(1);
    match layout {
        GridLayout::Horizontal => (index / cols, index % cols),
        GridLayout::Vertical => (index % rows, index / rows),
    }
}

fn split_even(area: Rect, count: usize, direction: Direction) -> Vec<Rect> {
    let count = count.max(1) as u32;
    Layout::default()
        .direction(direction)
        .constraints((0..count).map(|_| Constraint::Ratio(1, count)))
        .split(area)
        .to_vec()
}

pub fn render_screen(frame: &mut Frame, theme: &Theme, view: &ScreenView, status: &StatusBar) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let title = Paragraph::new(Span::styled(view.title.as_str(), theme.title_style()))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::BOTTOM).border_style(theme.border_style(false)));
    frame.render_widget(title, chunks[0]);

    render_grid(frame, theme, view, chunks[1]);
    render_navigator(frame, theme, view, chunks[2]);

    let bar_style = if status.sleeping { theme.warning_style() } else { theme.status_style() };
    let mut status_line = vec![Span::styled(status.line(), bar_style)];
    if let Some(screen_status) = &view.status {
        status_line.push(Span::styled(format!(" | {}", screen_status), theme.status_style()));
    }
    frame.render_widget(Paragraph::new(Line::from(status_line)).style(theme.status_style()), chunks[3]);
}

fn render_grid(frame: &mut Frame, theme: &Theme, view: &ScreenView, area: Rect) {
    let rows = split_even(area, view.rows, Direction::Vertical);
    let cells: Vec<Vec<Rect>> = rows
        .iter()
        .map(|row| split_even(*row, view.cols, Direction::Horizontal))
        .collect();

    for (index, cell) in view.cells.iter().enumerate() {
        let (row, col) = cell_position(index, view.rows, view.cols, view.layout);
        let Some(rect) = cells.get(row).and_then(|r| r.get(col)) else {
            continue;
        };

        let widget = Paragraph::new(cell.label.as_str())
            .style(theme.cell_style(cell.selected, cell.enabled))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(cell.selected)),
            );
        frame.render_widget(widget, *rect);
    }
}

fn render_navigator(frame: &mut Frame, theme: &Theme, view: &ScreenView, area: Rect) {
    if view.navigator.is_empty() {
        return;
    }

    let slots = split_even(area, view.navigator.len(), Direction::Horizontal);
    for (button, rect) in view.navigator.iter().zip(slots) {
        let widget = Paragraph::new(button.label.as_str())
            .style(theme.cell_style(button.selected, true))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(theme.border_style(button.selected)),
            );
        frame.render_widget(widget, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::screen::{ButtonView, CellView};
    use crate::ui::theme::ThemeVariant;
    use ratatui::{Terminal, backend::TestBackend};

    #[test]
    fn test_cell_position_follows_layout() {
        assert_eq!(cell_position(5, 3, 3, GridLayout::Horizontal), (1, 2));
        assert_eq!(cell_position(5, 3, 3, GridLayout::Vertical), (2, 1));
    }

    #[test]
    fn test_status_line() {
        let status = StatusBar { volume: 40, muted: false, sleeping: true, player: Some("radio_player".into()) };
        assert_eq!(status.line(), " vol 40 | player radio_player | sleeping");
        let muted = StatusBar { muted: true, ..StatusBar::default() };
        assert_eq!(muted.line(), " muted | player -");
    }

    #[test]
    fn test_renders_cells_and_buttons() {
        let view = ScreenView {
            title: "Radio".into(),
            rows: 1,
            cols: 2,
            layout: GridLayout::Horizontal,
            cells: vec![
                CellView { label: "Jazz".into(), selected: true, enabled: true },
                CellView { label: "Rock".into(), selected: false, enabled: true },
            ],
            navigator: vec![ButtonView { label: "Home".into(), selected: false }],
            status: None,
        };
        let theme = Theme::new(ThemeVariant::Mocha);

        let mut terminal = Terminal::new(TestBackend::new(40, 14)).unwrap();
        terminal
            .draw(|frame| render_screen(frame, &theme, &view, &StatusBar::default()))
            .unwrap();

        let buffer = terminal.backend().buffer();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        for label in ["Radio", "Jazz", "Rock", "Home"] {
            assert!(text.contains(label), "missing {}", label);
        }
    }
}
