//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Padding, Paragraph, Wrap},
};

use crate::app::PlayerState;
use crate::config::UiSettings;

const CONTROLS_TEXT: &str = "[space/p] play/pause | [h/l] prev/next | [q] quit";

/// Render the player screen from the precomputed view `state`.
pub fn draw(frame: &mut Frame, state: &PlayerState, ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" andante ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Track box: title over artist. The artist line doubles as the loading
    // notice while a track is being fetched/decoded.
    let title_line = Line::from(Span::styled(
        state
            .title
            .clone()
            .unwrap_or_else(|| "Nothing playing".to_string()),
        Style::default().add_modifier(Modifier::BOLD),
    ));
    let second_line = if state.is_loading {
        Line::from("loading...")
    } else {
        Line::from(state.artist.clone().unwrap_or_default())
    };
    let track = Paragraph::new(vec![title_line, second_line])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title(" track "));
    frame.render_widget(track, chunks[1]);

    // Progress
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .gauge_style(Style::default().fg(Color::Cyan).bg(Color::DarkGray))
        .use_unicode(true)
        .ratio(f64::from(state.position).clamp(0.0, 1.0))
        .label(format!("{} / {}", state.elapsed_text, state.duration_text));
    frame.render_widget(gauge, chunks[2]);

    // Transport row; controls that would be no-ops render dimmed.
    let transport = Paragraph::new(Line::from(vec![
        control_span("|<", state.has_previous),
        Span::raw("     "),
        control_span(if state.show_play { " > " } else { "|| " }, state.can_play),
        Span::raw("     "),
        control_span(">|", state.has_next),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(transport, chunks[3]);

    // Controls footer
    let footer = Paragraph::new(CONTROLS_TEXT)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[5]);
}

fn control_span(glyph: &str, enabled: bool) -> Span<'_> {
    if enabled {
        Span::raw(glyph)
    } else {
        Span::styled(glyph, Style::default().add_modifier(Modifier::DIM))
    }
}
