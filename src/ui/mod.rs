use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use choices_picker::picker::PickerWidget;

use crate::app::{App, Popup};

pub fn draw(f: &mut Frame, app: &mut App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(4),    // Picker
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);

    let view = app.view();
    let picker_area = chunks[1].inner(ratatui::layout::Margin::new(1, 0));
    f.render_widget(
        PickerWidget::new(&view, app.picker.state, &app.theme).focused(true),
        picker_area,
    );

    draw_footer(f, app, chunks[2]);

    if app.popup == Popup::Help {
        draw_help_popup(f, app);
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = match &app.status_message {
        Some(status) => Line::from(Span::styled(
            status.as_str(),
            Style::default().fg(app.theme.accent),
        )),
        None => {
            let value = app
                .props
                .value
                .map_or_else(|| "none".to_string(), |v| v.to_string());
            Line::from(vec![
                Span::styled("Value: ", Style::default().fg(app.theme.text_dim)),
                Span::styled(value, Style::default().fg(app.theme.text)),
            ])
        }
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let keys = [
        ("↑↓", "move"),
        ("Enter", "select"),
        ("f", "form factor"),
        ("m", "mask"),
        ("d", "disable"),
        ("?", "help"),
        ("q", "quit"),
    ];

    let spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, action)| {
            [
                Span::styled(*key, Style::default().fg(app.theme.accent)),
                Span::styled(format!(" {} │ ", action), Style::default().fg(app.theme.text_dim)),
            ]
        })
        .collect();

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_help_popup(f: &mut Frame, app: &App) {
    let popup_area = centered_rect(50, 13, f.area());
    f.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(Span::styled(
            " Help ",
            Style::default().fg(app.theme.accent).add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.accent));

    let rows = [
        ("Enter/Space", "open dropdown, pick option"),
        ("↑↓ / j k", "move focus"),
        ("Home/End", "first / last row"),
        ("Esc", "close dropdown"),
        ("f", "toggle small / large"),
        ("m", "toggle masked"),
        ("d", "toggle disabled"),
        ("q", "quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("  {:<12}", key), Style::default().fg(app.theme.accent)),
                Span::styled(*action, Style::default().fg(app.theme.text)),
            ])
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), popup_area);
}

/// Fixed-size rect centered in `area`, clamped to fit
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HostConfig;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_default_host() {
        let mut app = App::new(&HostConfig::default());
        let screen = screen(&mut app);

        assert!(screen.contains("Value: none"));
        assert!(screen.contains("Preferred contact method"));
        assert!(screen.contains("---"));
        assert!(screen.contains("form factor"));
    }

    #[test]
    fn test_draw_help_popup() {
        let mut app = App::new(&HostConfig::default());
        app.popup = Popup::Help;
        assert!(screen(&mut app).contains("toggle masked"));
    }

    #[test]
    fn test_centered_rect_clamps() {
        let area = Rect::new(0, 0, 20, 5);
        assert_eq!(centered_rect(50, 13, area), area);
        assert_eq!(centered_rect(10, 3, area), Rect::new(5, 1, 10, 3));
    }
}
