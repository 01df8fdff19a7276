//! TUI rendering with ratatui
//!
//! Board, score and solver views for both phases.

use super::app::{App, InputMode, MessageStyle};
use crate::game::{Outcome, Phase};
use crate::output::formatters::feedback_markers;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, Paragraph, Wrap},
};

/// Main UI rendering function
pub fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Main content
            Constraint::Length(3), // Input area
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    render_header(f, app, chunks[0]);

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    render_board(f, app, main_chunks[0]);
    render_info_panel(f, app, main_chunks[1]);
    render_input(f, app, chunks[2]);
    render_status(f, app, chunks[3]);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let title = format!(
        "🎯 MASTERMIND - Round {} - {}",
        app.session.round(),
        app.session.phase()
    );
    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(Color::Cyan)),
        );
    f.render_widget(header, area);
}

fn render_board(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let rules = session.rules();

    let mut lines: Vec<Line> = session
        .board()
        .iter()
        .enumerate()
        .map(|(i, turn)| {
            let code_style = match turn.outcome {
                Outcome::Won => Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
                Outcome::Lost => Style::default().fg(Color::Red),
                Outcome::InProgress => Style::default().fg(Color::White),
            };
            Line::from(vec![
                Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(turn.code.display(session.alphabet()).to_string(), code_style),
                Span::raw("  "),
                Span::styled(
                    feedback_markers(turn.feedback, rules.code_length),
                    Style::default().fg(Color::Yellow),
                ),
            ])
        })
        .collect();

    // Empty rows for the turns still available
    for i in session.board().len()..rules.turn_count {
        lines.push(Line::from(Span::styled(
            format!("{:>2}. {}", i + 1, "·".repeat(rules.code_length)),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let secret = if app.reveal_secret() {
        app.secret_label()
    } else {
        "?".repeat(rules.code_length)
    };
    let title = format!(" Board | Secret: {secret} ");

    let board = Paragraph::new(lines).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded),
    );
    f.render_widget(board, area);
}

fn render_info_panel(f: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // Score and rules
            Constraint::Length(3), // Pool gauge
            Constraint::Min(4),    // Messages
        ])
        .split(area);

    render_score(f, app, chunks[0]);
    render_pool(f, app, chunks[1]);
    render_messages(f, app, chunks[2]);
}

fn render_score(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let score = session.score();

    let content = vec![
        Line::from(vec![
            Span::raw("Human "),
            Span::styled(
                score.human.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Computer "),
            Span::styled(
                score.computer.to_string(),
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(format!("Turns left: {}", session.turns_left())),
        Line::from(format!("Pegs: {}", session.alphabet())),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Score ")
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_pool(f: &mut Frame, app: &App, area: Rect) {
    let session = &app.session;
    let block = Block::default()
        .title(" Candidates ")
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded);

    let Some(size) = session.pool_size() else {
        let idle = Paragraph::new("solver idle").block(block);
        f.render_widget(idle, area);
        return;
    };

    let full = session.alphabet().len().saturating_pow(session.rules().code_length as u32);
    let ratio = if full == 0 {
        0.0
    } else {
        (size as f64 / full as f64).clamp(0.0, 1.0)
    };
    let label = if app.debug {
        match session.secret_in_pool() {
            Some(false) => format!("{size}/{full} (your code was ruled out)"),
            _ => format!("{size}/{full}"),
        }
    } else {
        format!("{size}/{full}")
    };

    let gauge = Gauge::default()
        .block(block)
        .gauge_style(Style::default().fg(Color::Cyan))
        .ratio(ratio)
        .label(label);
    f.render_widget(gauge, area);
}

fn render_messages(f: &mut Frame, app: &App, area: Rect) {
    let messages: Vec<ListItem> = app
        .messages
        .iter()
        .rev()
        .map(|msg| {
            let style = match msg.style {
                MessageStyle::Info => Style::default().fg(Color::White),
                MessageStyle::Success => Style::default().fg(Color::Green),
                MessageStyle::Error => Style::default().fg(Color::Red),
            };
            ListItem::new(msg.text.clone()).style(style)
        })
        .collect();

    let messages_list =
        List::new(messages).block(Block::default().title(" Messages ").borders(Borders::ALL));
    f.render_widget(messages_list, area);
}

fn render_input(f: &mut Frame, app: &App, area: Rect) {
    let (title, content, color) = match app.input_mode {
        InputMode::Guess => (
            " Your guess ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::Feedback => (
            " Feedback for my guess (exact,color) ",
            app.input_buffer.as_str(),
            Color::Yellow,
        ),
        InputMode::SecretEntry => (
            " Your code (blank to keep it hidden) ",
            app.input_buffer.as_str(),
            Color::Magenta,
        ),
        InputMode::PhaseOver => (" Press Enter to hand over ", "", Color::Cyan),
        InputMode::RoundOver => (" Round over | 'n' new round, 'q' quit ", "", Color::Green),
    };

    let input = Paragraph::new(content)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .style(Style::default().fg(color)),
        );
    f.render_widget(input, area);
}

fn render_status(f: &mut Frame, app: &App, area: Rect) {
    let mut help = String::from("Esc: Quit | Tab: Debug");
    if matches!(app.session.phase(), Phase::HumanGuessing | Phase::ComputerGuessing)
        && matches!(
            app.input_mode,
            InputMode::Guess | InputMode::Feedback | InputMode::SecretEntry
        )
    {
        help.push_str(" | Enter: Submit");
    }
    if app.debug
        && let Some(expected) = app.session.expected_feedback()
    {
        help.push_str(&format!(" | truthful answer: {expected}"));
    }

    let status = Paragraph::new(help)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(status, area);
}
