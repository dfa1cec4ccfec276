//! UI rendering

use chrono::Local;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, TableState, Tabs,
        Wrap,
    },
};

use super::app::{App, Mode, Tab};
use crate::cli::format_result;
use modematrix_core::{CellPos, Theme};
use modematrix_engine::engine::parse_cell;

pub(crate) const TABS_HEIGHT: u16 = 3;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const ROW_HEADER_WIDTH: u16 = 5;
pub(crate) const COLUMN_WIDTH: u16 = 12;
pub(crate) const COLUMN_SPACING: u16 = 1;
const MAX_RESULTS_HEIGHT: u16 = 10;

struct Palette {
    fg: Color,
    bg: Color,
    accent: Color,
    muted: Color,
    cursor_bg: Color,
}

fn palette(theme: Theme) -> Palette {
    match theme {
        Theme::Light => Palette {
            fg: Color::Black,
            bg: Color::White,
            accent: Color::Blue,
            muted: Color::DarkGray,
            cursor_bg: Color::LightBlue,
        },
        Theme::Dark => Palette {
            fg: Color::White,
            bg: Color::Black,
            accent: Color::Cyan,
            muted: Color::Gray,
            cursor_bg: Color::Blue,
        },
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let colors = palette(app.session.theme());
    let base = Style::default().fg(colors.fg).bg(colors.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TABS_HEIGHT),
            Constraint::Min(5),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(f.area());

    let tabs = Tabs::new(vec!["Data Entry", "History"])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" ModeMatrix [{}] ", app.session.theme())),
        )
        .select(app.tab.index())
        .style(base)
        .highlight_style(
            Style::default()
                .fg(colors.accent)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        );
    f.render_widget(tabs, chunks[0]);

    match app.tab {
        Tab::DataEntry => draw_data_entry(f, app, chunks[1], &colors, base),
        Tab::History => draw_history(f, app, chunks[1], &colors, base),
    }

    draw_status_bar(f, app, chunks[2], &colors);
}

/// Results panel height for `rows` result lines, borders included.
pub(crate) fn results_panel_height(rows: usize) -> u16 {
    u16::try_from(rows)
        .unwrap_or(u16::MAX)
        .saturating_add(2)
        .min(MAX_RESULTS_HEIGHT)
}

/// Number of table columns that fit in `width` (borders included).
pub(crate) fn visible_columns(width: u16) -> usize {
    let inner = width.saturating_sub(2 + ROW_HEADER_WIDTH + COLUMN_SPACING);
    (inner / (COLUMN_WIDTH + COLUMN_SPACING)).max(1) as usize
}

/// First column to draw so the cursor column stays visible.
pub(crate) fn first_visible_column(cursor_col: usize, visible: usize) -> usize {
    (cursor_col + 1).saturating_sub(visible)
}

fn draw_data_entry(f: &mut Frame, app: &App, area: Rect, colors: &Palette, base: Style) {
    let results = app.session.current_results();
    let results_height = results
        .map(|r| results_panel_height(r.len()))
        .unwrap_or(3);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(results_height)])
        .split(area);

    let doc = &app.session.document;
    let visible = visible_columns(chunks[0].width);
    let first_col = first_visible_column(app.cursor.col, visible);
    let last_col = (first_col + visible).min(doc.column_count());

    let header_style = Style::default()
        .fg(colors.accent)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once(Cell::from(""))
            .chain(doc.column_labels()[first_col..last_col].iter().map(|l| Cell::from(l.as_str()))),
    )
    .style(header_style);

    let rows = doc.rows().iter().enumerate().map(|(r, row)| {
        let mut cells = vec![Cell::from(Span::styled(
            format!("{}", r + 1),
            Style::default().fg(colors.muted),
        ))];
        for (c, text) in row.iter().enumerate().take(last_col).skip(first_col) {
            let pos = CellPos::new(r, c);
            let is_cursor = pos == app.cursor;
            let content = if is_cursor && app.mode == Mode::Edit {
                let (before, after) = app.edit_buffer.split_at(app.edit_cursor);
                format!("{}|{}", before, after)
            } else {
                text.clone()
            };

            let mut style = base;
            if !text.trim().is_empty() && parse_cell(text).is_none() {
                // Ignored by the calculation.
                style = style.fg(colors.muted).add_modifier(Modifier::CROSSED_OUT);
            }
            if is_cursor {
                style = style.bg(colors.cursor_bg).add_modifier(Modifier::BOLD);
            }
            cells.push(Cell::from(content).style(style));
        }
        Row::new(cells)
    });

    let widths = std::iter::once(Constraint::Length(ROW_HEADER_WIDTH))
        .chain((first_col..last_col).map(|_| Constraint::Length(COLUMN_WIDTH)));

    let table = Table::new(rows, widths)
        .header(header)
        .column_spacing(COLUMN_SPACING)
        .style(base)
        .block(Block::default().borders(Borders::ALL).title(format!(
            " {} x {} ",
            doc.row_count(),
            doc.column_count()
        )));

    let mut state = TableState::default().with_selected(Some(app.cursor.row));
    f.render_stateful_widget(table, chunks[0], &mut state);

    let lines: Vec<Line> = match results {
        Some(results) => results
            .iter()
            .map(|r| Line::from(Span::styled(format_result(r), Style::default().fg(colors.fg))))
            .collect(),
        None => vec![Line::from(Span::styled(
            "Press c or F5 to calculate the mode of each row",
            Style::default().fg(colors.muted),
        ))],
    };
    let panel = Paragraph::new(lines)
        .style(base)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title(" Results "));
    f.render_widget(panel, chunks[1]);
}

fn draw_history(f: &mut Frame, app: &App, area: Rect, colors: &Palette, base: Style) {
    let history = app.session.history();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" History ({}) ", history.len()));

    if history.is_empty() {
        let empty = Paragraph::new(Line::from(Span::styled(
            "No calculations yet. Start by entering data in the Data Entry tab!",
            Style::default().fg(colors.muted),
        )))
        .style(base)
        .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let mut lines = vec![Line::from(vec![
                Span::styled(
                    format!("Calculation {}", history.len() - idx),
                    Style::default()
                        .fg(colors.accent)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!(
                        "  {}",
                        entry
                            .timestamp
                            .with_timezone(&Local)
                            .format("%Y-%m-%d %H:%M:%S")
                    ),
                    Style::default().fg(colors.muted),
                ),
            ])];
            lines.extend(
                entry
                    .results
                    .iter()
                    .map(|r| Line::from(format!("  {}", format_result(r)))),
            );
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(base)
        .highlight_style(Style::default().bg(colors.cursor_bg))
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.history_selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect, colors: &Palette) {
    let (label, label_color) = match app.mode {
        Mode::Normal => ("NORMAL", colors.accent),
        Mode::Edit => ("EDIT", Color::Green),
        Mode::Confirm(_) => ("CONFIRM", Color::Red),
    };

    let hint = match (app.mode, app.tab) {
        (Mode::Edit, _) => "Enter down | Tab next column | Esc cancel | F5 calculate",
        (Mode::Confirm(_), _) => "y confirm | any other key cancels",
        (Mode::Normal, Tab::DataEntry) => {
            "Enter edit | c calc | e export | a/A add | x/X remove | C clear | t theme | Tab history | q quit"
        }
        (Mode::Normal, Tab::History) => {
            "j/k select | e export | D clear history | t theme | Tab data | q quit"
        }
    };

    let message = if app.status_message.is_empty() {
        hint
    } else {
        app.status_message.as_str()
    };

    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", label),
            Style::default()
                .fg(Color::Black)
                .bg(label_color)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(message),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visible_columns_never_zero() {
        assert_eq!(visible_columns(0), 1);
        assert_eq!(visible_columns(80), 5);
    }

    #[test]
    fn results_panel_height_is_capped() {
        assert_eq!(results_panel_height(1), 3);
        assert_eq!(results_panel_height(500), MAX_RESULTS_HEIGHT);
        assert_eq!(results_panel_height(usize::MAX), MAX_RESULTS_HEIGHT);
    }

    #[test]
    fn first_visible_column_follows_cursor() {
        assert_eq!(first_visible_column(0, 4), 0);
        assert_eq!(first_visible_column(3, 4), 0);
        assert_eq!(first_visible_column(4, 4), 1);
        assert_eq!(first_visible_column(9, 4), 6);
    }
}
