use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table},
};
use stockroom_core::{Field, SortKey, Store, render::COLUMNS};

use super::app::{App, AppMode, FormState, ROW_BINDINGS};

pub fn render<S: Store>(frame: &mut Frame, app: &mut App<S>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Search
            Constraint::Min(3),    // Table
            Constraint::Length(1), // Notice / error
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_search(frame, app, chunks[1]);
    render_table(frame, app, chunks[2]);
    render_message(frame, app, chunks[3]);
    render_status_bar(frame, app, chunks[4]);

    match &app.mode {
        AppMode::SelectSort => render_sort_popup(frame, app),
        AppMode::ConfirmDelete(id) => {
            let name = app
                .session
                .find(id)
                .map(|item| item.name.clone())
                .unwrap_or_default();
            render_confirm_popup(frame, &name);
        }
        AppMode::Form | AppMode::Saving => {
            if let Some(form) = &app.form {
                render_form(frame, form, app.mode == AppMode::Saving);
            }
        }
        _ => {}
    }
}

fn render_header<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let shown = app.session.displayed().len();
    let total = app.session.inventory().len();
    let sort_text = match app.sort {
        Some(key) => format!("  [sorted by {}]", key),
        None => String::new(),
    };

    let title = format!("Stockroom - {} of {} items{}", shown, total, sort_text);

    let header =
        Paragraph::new(title).style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    frame.render_widget(header, area);
}

fn render_search<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let active = app.mode == AppMode::Search;
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Search")
        .border_style(if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        });

    let (text, style) = if app.search.is_empty() {
        ("Press / to search name or details".to_string(), Style::default().fg(Color::DarkGray))
    } else {
        (app.search.text().to_string(), Style::default())
    };

    frame.render_widget(Paragraph::new(text).style(style).block(block), area);

    if active {
        let x = area.x + 1 + app.search.cursor_column() as u16;
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_table<S: Store>(frame: &mut Frame, app: &mut App<S>, area: Rect) {
    let header = Row::new(COLUMNS.iter().map(|c| Cell::from(*c)))
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = app
        .session
        .rows()
        .into_iter()
        .map(|row| Row::new(row.cells.into_iter().map(Cell::from)))
        .collect();

    let widths = [
        Constraint::Percentage(16),
        Constraint::Percentage(24),
        Constraint::Length(5),
        Constraint::Length(10),
        Constraint::Length(10),
        Constraint::Percentage(12),
        Constraint::Percentage(20),
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Inventory"))
        .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.table);
}

fn render_message<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let line = if let Some(ref error) = app.last_error {
        Line::from(Span::styled(format!("Error: {}", error), Style::default().fg(Color::Red)))
    } else if let Some(notice) = app.session.notices().latest() {
        Line::from(Span::styled(notice.text.clone(), Style::default().fg(Color::Green)))
    } else {
        Line::from("")
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn render_status_bar<S: Store>(frame: &mut Frame, app: &App<S>, area: Rect) {
    let status = match app.mode {
        AppMode::List => {
            let rows: Vec<String> = ROW_BINDINGS
                .iter()
                .map(|(key, label, _)| format!("{}: {}", key, label))
                .collect();
            format!(
                "↑/↓: Select  /: Search  s: Sort  a: Add  {}  q: Quit",
                rows.join("  ")
            )
        }
        AppMode::Search => "Type to filter  Enter: Keep  Esc: Clear".to_string(),
        AppMode::SelectSort => "↑/↓: Navigate  Enter: Sort  Esc: Cancel".to_string(),
        AppMode::ConfirmDelete(_) => "y: Delete  n: Keep".to_string(),
        AppMode::Form => "Tab/↑/↓: Field  Enter: Save  Esc: Cancel".to_string(),
        AppMode::Saving => "Saving...".to_string(),
    };

    let status_bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status_bar, area);
}

fn render_sort_popup<S: Store>(frame: &mut Frame, app: &App<S>) {
    let area = centered_rect(30, 30, frame.area());

    frame.render_widget(Clear, area);

    let items: Vec<ListItem> = SortKey::ALL
        .iter()
        .map(|key| {
            let is_current = app.sort == Some(*key);
            let style = if is_current {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            let marker = if is_current { " ✓" } else { "" };
            ListItem::new(format!("{}{}", key, marker)).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Sort by"))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(app.popup_selected));

    frame.render_stateful_widget(list, area, &mut state);
}

fn render_confirm_popup(frame: &mut Frame, name: &str) {
    let area = centered_rect(50, 20, frame.area());

    frame.render_widget(Clear, area);

    let text = vec![
        Line::from("Are you sure you want to delete this item?"),
        Line::from(Span::styled(
            name.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("y / n"),
    ];

    let popup = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Delete")
            .border_style(Style::default().fg(Color::Red)),
    );

    frame.render_widget(popup, area);
}

fn render_form(frame: &mut Frame, form: &FormState, saving: bool) {
    let area = centered_rect(60, 60, frame.area());

    frame.render_widget(Clear, area);

    let title = match form.mode.target_id() {
        Some(_) => "Edit item",
        None => "Add item",
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let label_width = Field::ALL
        .iter()
        .map(|f| f.label().len())
        .max()
        .unwrap_or(0);

    let lines: Vec<Line> = Field::ALL
        .iter()
        .map(|&field| {
            let focused = field == form.focus;
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            let text = form.input(field).text();
            let value = if text.is_empty() && field == Field::Image && form.mode.target_id().is_some() {
                Span::styled("(keep current image)", Style::default().fg(Color::DarkGray))
            } else {
                Span::raw(text.to_string())
            };
            Line::from(vec![
                Span::styled(format!("{:>width$}: ", field.label(), width = label_width), label_style),
                value,
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines), inner);

    if !saving {
        let row = Field::ALL.iter().position(|&f| f == form.focus).unwrap_or(0) as u16;
        let x = inner.x + label_width as u16 + 2 + form.input(form.focus).cursor_column() as u16;
        frame.set_cursor_position((x, inner.y + row));
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
