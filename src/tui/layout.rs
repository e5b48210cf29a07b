use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

use crate::domain::MagnitudeClass;
use crate::presentation::{self, EarthquakeDetail};
use crate::tui::app::{InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &TuiApp) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(60), // Earthquake list
            Constraint::Min(9),         // Detail / legend
            Constraint::Length(1),      // Status bar
        ])
        .split(frame.area());

    render_list_pane(frame, app, chunks[0]);
    if app.show_legend {
        render_legend_pane(frame, chunks[1]);
    } else {
        render_detail_pane(frame, app, chunks[1]);
    }
    render_status_bar(frame, app, chunks[2]);
}

pub fn magnitude_color(class: MagnitudeClass) -> Color {
    match class {
        MagnitudeClass::Unknown => Color::Gray,
        MagnitudeClass::Light => Color::Blue,
        MagnitudeClass::Minor => Color::Green,
        MagnitudeClass::Moderate => Color::Rgb(255, 165, 0),
        MagnitudeClass::Strong => Color::Red,
        MagnitudeClass::Major => Color::Magenta,
    }
}

fn render_list_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let items: Vec<ListItem> = app
        .earthquakes()
        .iter()
        .map(|quake| {
            let color = magnitude_color(quake.magnitude_class());
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!("{:>4.1} ", quake.magnitude),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ", quake.occurred_at.format("%m/%d %H:%M")),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    quake.display_place().to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]))
        })
        .collect();

    let block = Block::default()
        .title(list_title(app))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .bg(Color::Cyan)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let mut state = ListState::default();
    if !app.earthquakes().is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn list_title(app: &TuiApp) -> String {
    let snapshot = &app.snapshot;
    let mut title = format!(" Earthquakes ({}/{}) ", snapshot.visible.len(), snapshot.total);
    if let Some(sort) = snapshot.view.sort {
        title.push_str(&format!("[sorted by {:?}] ", sort).to_lowercase());
    }
    if let Some(query) = &snapshot.view.query {
        title.push_str(&format!("[search: {}] ", query));
    }
    title
}

fn render_detail_pane(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let content = match app.selected_quake() {
        Some(quake) => {
            let detail = EarthquakeDetail::new(quake);
            let color = magnitude_color(quake.magnitude_class());
            let lines: Vec<Line> = detail
                .lines()
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    if i == 0 {
                        Line::from(Span::styled(
                            line.to_string(),
                            Style::default().fg(color).add_modifier(Modifier::BOLD),
                        ))
                    } else {
                        Line::from(line.to_string())
                    }
                })
                .collect();
            Text::from(lines)
        }
        None => Text::from("No earthquake selected"),
    };

    let block = Block::default()
        .title(" Details ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn render_legend_pane(frame: &mut Frame, area: Rect) {
    let lines: Vec<Line> = presentation::legend()
        .into_iter()
        .map(|(class, text)| {
            Line::from(vec![
                Span::styled("■ ", Style::default().fg(magnitude_color(class))),
                Span::raw(text),
            ])
        })
        .collect();

    let block = Block::default()
        .title(" Legend ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(Text::from(lines)).block(block), area);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect) {
    let (status, style) = if app.input_mode == InputMode::Search {
        (
            format!("/{}", app.search_input),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )
    } else if app.snapshot.fetching {
        (
            "Fetching earthquakes...".to_string(),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )
    } else if let Some(error) = &app.snapshot.error {
        let hint = if error.is_transient() { "  R:Retry" } else { "" };
        (
            format!("Error: {}{}", presentation::error_message(error), hint),
            Style::default().fg(Color::White).bg(Color::Red),
        )
    } else if let Some(ref msg) = app.status_message {
        (
            msg.clone(),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )
    } else {
        (
            "j/k:Navigate  m:Magnitude  d:Date  /:Search  c:Clear  l:Legend  R:Refresh  q:Quit"
                .to_string(),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(status).style(style), area);
}
