use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

use super::{to_color, App, Focus};

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Render the query input bar.
pub fn render_query(frame: &mut Frame, app: &App, area: Rect) {
    let editing = app.focus == Focus::Query;
    let cursor = if editing { "_" } else { "" };
    let title = if app.state.is_searching() {
        "Search (searching...)"
    } else {
        "Search"
    };

    let query = Paragraph::new(format!("{}{}", app.input, cursor))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(editing))
                .title(title),
        );
    frame.render_widget(query, area);
}

/// Render the ranked results, each score tinted by its color.
pub fn render_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let header = Row::new(vec![
        Cell::from("#").style(Style::default().fg(Color::DarkGray)),
        Cell::from("Score"),
        Cell::from("Song").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Topic"),
    ])
    .height(1);

    let selected_key = app.state.selected_key();
    let rows: Vec<Row> = app
        .state
        .results()
        .iter()
        .enumerate()
        .map(|(i, result)| {
            let marker = if selected_key == Some(&result.key) {
                "\u{25b6}"
            } else {
                " "
            };
            Row::new(vec![
                Cell::from(format!("{}{}", marker, i + 1)),
                Cell::from(format!("{:.3}", result.score))
                    .style(Style::default().fg(to_color(result.color()))),
                Cell::from(format!("{} - {}", result.track_name, result.artist_name)),
                Cell::from(format!("{}", result.topic_id)),
            ])
        })
        .collect();

    let title = match app.state.search_term() {
        Some(term) => format!("Results for {:?} ({})", term, app.state.results().len()),
        None => "Results".to_string(),
    };

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Length(6),
            Constraint::Min(20),
            Constraint::Length(5),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(app.focus == Focus::Results))
            .title(title),
    );

    frame.render_stateful_widget(table, area, &mut app.results_table);
}
