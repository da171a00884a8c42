//! Dashboard surface renderer

use crate::events::{Component, EventType, LoaderPhase};
use crate::logging::LogLevel;
use crate::surface::Banner;
use crate::ui::app::App;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Padding, Paragraph, Wrap};

pub fn render(f: &mut Frame, app: &App) {
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Fill(1),
            Constraint::Percentage(30),
            Constraint::Length(2),
        ])
        .margin(1)
        .split(f.area());

    render_header(f, main_chunks[0], app);
    render_surface(f, main_chunks[1], app);
    render_logs_panel(f, main_chunks[2], app);
    render_footer(f, main_chunks[3]);
}

/// Render header with title, connection info, and loader phase.
fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let header_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Length(2)])
        .split(area);

    let version = env!("CARGO_PKG_VERSION");
    let title = Paragraph::new(format!("RELAY CONSOLE v{}", version))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_type(BorderType::Thick),
        );
    f.render_widget(title, header_chunks[0]);

    let phase_color = match app.loader_phase {
        LoaderPhase::Idle => Color::DarkGray,
        LoaderPhase::Loading => Color::LightYellow,
        LoaderPhase::Displayed => Color::LightGreen,
    };
    let dashboard_name = app
        .catalog
        .get(app.selected)
        .map(|entry| entry.name.as_str())
        .unwrap_or("-");
    let status = Line::from(vec![
        Span::styled(
            app.environment.to_string(),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw(" | "),
        Span::styled(app.loader_phase.to_string(), Style::default().fg(phase_color)),
        Span::raw(" | "),
        Span::raw(format!(
            "{} ({}/{})",
            dashboard_name,
            app.selected + 1,
            app.catalog.len()
        )),
        Span::raw(" | "),
        Span::styled(
            format!("up {}", format_uptime(app.start_time.elapsed().as_secs())),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    f.render_widget(Paragraph::new(status).alignment(Alignment::Center), header_chunks[1]);
}

/// Render the dashboard surface: the banner when one is set, otherwise every
/// panel in creation order.
fn render_surface(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = app.surface.snapshot();

    let lines: Vec<Line> = if let Some(banner) = &snapshot.banner {
        let (text, color) = match banner {
            Banner::Loading(msg) => (msg.clone(), Color::LightYellow),
            Banner::Error(msg) => (msg.clone(), Color::LightRed),
        };
        vec![Line::from(Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))]
    } else {
        let mut lines = Vec::new();
        for panel in &snapshot.panels {
            if !panel.title.is_empty() {
                lines.push(Line::from(Span::styled(
                    panel.title.clone(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
            }
            match &panel.error {
                Some(error) => lines.push(Line::from(Span::styled(
                    format!("! {}", error),
                    Style::default().fg(Color::LightRed),
                ))),
                None => {
                    for text in &panel.lines {
                        lines.push(Line::from(text.clone()));
                    }
                }
            }
            lines.push(Line::from(""));
        }
        lines
    };

    let block = Block::default()
        .title(snapshot.title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render activity logs with event formatting.
fn render_logs_panel(f: &mut Frame, area: Rect, app: &App) {
    // Account for borders and padding
    let max_logs = (area.height.saturating_sub(3)) as usize;
    let log_count = if max_logs > 0 { max_logs } else { 1 };

    let log_lines: Vec<Line> = app
        .activity_logs
        .iter()
        .rev()
        .take(log_count)
        .map(|event| {
            let color = match (event.event_type, event.log_level) {
                (EventType::Success, _) => Color::LightGreen,
                (EventType::Error, LogLevel::Error) => Color::LightRed,
                (EventType::Error, _) => Color::LightYellow,
                _ => match event.component {
                    Component::DashboardLoader => Color::Cyan,
                    Component::WidgetRuntime => Color::Gray,
                    Component::PollScheduler => Color::Magenta,
                },
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", event.timestamp),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(event.msg.clone(), Style::default().fg(color)),
            ])
        })
        .collect();

    let log_paragraph = if log_lines.is_empty() {
        Paragraph::new(vec![Line::from("Starting up...")])
    } else {
        Paragraph::new(log_lines)
    };

    let logs_block = Block::default()
        .title("ACTIVITY LOG")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Cyan))
        .padding(Padding::uniform(1));

    f.render_widget(log_paragraph.block(logs_block).wrap(Wrap { trim: true }), area);
}

/// Render footer with key bindings.
fn render_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new("[Q] Quit | [<-/->] Switch Dashboard")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_type(BorderType::Thick),
        );
    f.render_widget(footer, area);
}

fn format_uptime(total_secs: u64) -> String {
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;
    if hours > 0 {
        format!("{}h {:02}m {:02}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {:02}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
