use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, Wrap};
use verselink_graph::Topology;
use verselink_search::WordCloud;

use super::{to_color, App, Focus};

/// Render the selected song's neighborhood as a table of songs.
pub fn render_graph(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.focus == Focus::Graph;
    let block = Block::default().borders(Borders::ALL).border_style(if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    });

    let Some(graph) = app.state.graph() else {
        let hint = if app.state.is_loading_selection() {
            "Loading neighborhood..."
        } else {
            "Select a song and press Enter"
        };
        let placeholder = Paragraph::new(hint)
            .style(Style::default().fg(Color::DarkGray))
            .block(block.title("Neighborhood"));
        frame.render_widget(placeholder, area);
        return;
    };

    let topology = Topology::of(graph);
    let header = Row::new(vec![
        Cell::from(" "),
        Cell::from("Song").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Topic"),
        Cell::from("Links"),
    ])
    .height(1);

    let rows: Vec<Row> = graph
        .nodes()
        .iter()
        .map(|node| {
            let label = if node.id == *graph.seed() {
                format!("{} *", node.label())
            } else {
                node.label()
            };
            Row::new(vec![
                Cell::from("\u{25cf}").style(Style::default().fg(to_color(node.color))),
                Cell::from(label),
                Cell::from(format!("{}", node.topic_id)),
                Cell::from(format!("{}", topology.degree(node.id.as_str()))),
            ])
        })
        .collect();

    let mut title = format!(
        "Neighborhood of {}: {} songs, {} edges",
        graph.seed(),
        graph.node_count(),
        graph.edge_count()
    );
    if app.state.is_loading_selection() {
        title.push_str(" (loading...)");
    }

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),
            Constraint::Min(20),
            Constraint::Length(6),
            Constraint::Length(6),
        ],
    )
    .header(header)
    .row_highlight_style(Style::default().bg(Color::DarkGray).fg(Color::White))
    .block(block.title(title));

    frame.render_stateful_widget(table, area, &mut app.nodes_table);
}

/// Render the word cloud of the selected neighborhood.
pub fn render_words(frame: &mut Frame, app: &App, area: Rect) {
    let cloud = app
        .state
        .word_frequencies()
        .map(WordCloud::from_table)
        .unwrap_or_default();

    let text = if cloud.is_empty() {
        Line::from(Span::styled(
            "No words to show",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(cloud_spans(&cloud))
    };

    let words = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Words"));
    frame.render_widget(words, area);
}

/// One span per term; larger font sizes get heavier styling.
pub fn cloud_spans(cloud: &WordCloud) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(cloud.entries().len() * 2);
    for entry in cloud.entries() {
        let style = if entry.font_size >= 70.0 {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else if entry.font_size >= 40.0 {
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
        } else if entry.font_size >= 20.0 {
            Style::default()
        } else {
            Style::default().fg(Color::DarkGray)
        };
        spans.push(Span::styled(entry.term.clone(), style));
        spans.push(Span::raw("  "));
    }
    spans
}
