//! Console views and rendering
//!
//! All rendering logic is contained here. The views module draws the UI
//! based on AppState, but never modifies it beyond caching the computed
//! scroll bound.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::{AppState, InteractionMode, PromptDialog};

/// Console colors
mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const OPERATOR: Color = Color::Rgb(0, 255, 127); // Spring green
    pub const WARNING: Color = Color::Rgb(255, 215, 0); // Gold
    pub const DIM: Color = Color::DarkGray;
    pub const INPUT: Color = Color::Rgb(0, 255, 127); // Green
}

/// Main render function
pub fn render(state: &mut AppState, frame: &mut Frame) {
    trace!("render: called");
    // Create main layout: header, log, footer
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Log pane
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);
    render_log(state, frame, chunks[1]);
    render_footer(state, frame, chunks[2]);

    // Render overlays
    match &state.interaction_mode {
        InteractionMode::Help => render_help_overlay(frame, frame.area()),
        InteractionMode::Prompt(dialog) => render_prompt_dialog(dialog, frame, frame.area()),
        _ => {}
    }

    // The warning dialog layers over everything, including the prompt
    if let Some(warning) = state.warning {
        render_warning_dialog(warning, frame, frame.area());
    }
}

/// Render header with app title, operator selector, and session counters
fn render_header(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let left_spans = vec![
        Span::styled(
            " Shiftboss",
            Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" │ ", Style::default().fg(colors::DIM)),
        Span::raw("Operator: "),
        Span::styled(
            state.operator(),
            Style::default().fg(colors::OPERATOR).add_modifier(Modifier::BOLD),
        ),
    ];

    // Right side: session counters
    let right_parts = vec![
        format!("{} tasks", state.session.tasks().len()),
        format!("{} tips", state.session.safety_history().len()),
    ];
    let right_text = right_parts.join(" │ ");
    let right_width = right_text.chars().count() + 1; // +1 for trailing space

    // Right-justify the counters inside the border
    let inner_width = area.width.saturating_sub(2) as usize;
    let left_width: usize = left_spans.iter().map(|s| s.width()).sum();
    let padding = inner_width.saturating_sub(left_width + right_width);

    let mut spans = left_spans;
    if padding > 0 {
        spans.push(Span::raw(" ".repeat(padding)));
    }
    spans.push(Span::styled(right_text, Style::default().fg(colors::DIM)));
    spans.push(Span::raw(" "));

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::ALL));

    frame.render_widget(header, area);
}

/// Render the scrollable supervisor log
fn render_log(state: &mut AppState, frame: &mut Frame, area: Rect) {
    trace!(entries = state.log.len(), "render_log: called");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Supervisor Log ")
        .border_style(Style::default().fg(colors::HEADER));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();
    for entry in &state.log {
        for content_line in entry.lines() {
            lines.push(Line::from(Span::raw(content_line.to_string())));
        }
        // Blank separator between entries for readability
        lines.push(Line::from(""));
    }

    // Calculate scroll offset, accounting for line wrapping
    let viewport_height = inner.height as usize;
    let viewport_width = inner.width as usize;
    let content_height: usize = lines
        .iter()
        .map(|line| {
            let line_width = line.width();
            if viewport_width == 0 || line_width == 0 {
                1
            } else {
                line_width.div_ceil(viewport_width)
            }
        })
        .sum();

    let max_scroll = content_height.saturating_sub(viewport_height);

    // Cache the bound for the scroll key handlers
    state.log_max_scroll = max_scroll;

    // Use manual scroll if set, otherwise auto-scroll to bottom
    let scroll = state.log_scroll.unwrap_or(max_scroll).min(max_scroll);

    let log = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll as u16, 0));

    frame.render_widget(log, inner);
}

/// Render footer: keybinds in normal mode, live input line in task input mode
fn render_footer(state: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    if let InteractionMode::TaskInput(text) = &state.interaction_mode {
        let content = Line::from(vec![
            Span::styled(
                format!(" Task for {}: ", state.operator()),
                Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
            ),
            Span::styled(text.clone(), Style::default().fg(colors::INPUT)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
            Span::styled(
                "  (Enter to assign, Tab to switch operator, Esc to cancel)",
                Style::default().fg(colors::DIM),
            ),
        ]);
        let footer = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, area);
        return;
    }

    let keybinds = [
        ("[n]", "Assign Task"),
        ("[o]", "Operator"),
        ("[r]", "Scenario"),
        ("[b]", "Briefing"),
        ("[e]", "Evaluate AI"),
        ("[t]", "Tasks"),
        ("[c]", "Clear"),
    ];

    let mut left_spans = vec![Span::raw(" ")];
    for (key, action) in keybinds {
        left_spans.push(Span::styled(
            key,
            Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD),
        ));
        left_spans.push(Span::raw(format!(" {} ", action)));
    }

    let right_line = Line::from(vec![
        Span::styled("[?]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
        Span::raw(" Help "),
        Span::styled("[q]", Style::default().fg(colors::KEYBIND).add_modifier(Modifier::BOLD)),
        Span::raw(" Quit "),
    ]);

    let footer_block = Block::default().borders(Borders::ALL);
    let inner = footer_block.inner(area);
    frame.render_widget(footer_block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(right_line.width() as u16)])
        .split(inner);

    frame.render_widget(Paragraph::new(Line::from(left_spans)), chunks[0]);
    frame.render_widget(Paragraph::new(right_line), chunks[1]);
}

/// Render the modal free-text prompt dialog
fn render_prompt_dialog(dialog: &PromptDialog, frame: &mut Frame, area: Rect) {
    trace!(title = dialog.title, "render_prompt_dialog: called");
    let popup_area = centered_rect(60, 40, area);
    frame.render_widget(Clear, popup_area);

    let mut content = vec![
        Line::from(Span::styled(
            dialog.question,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];

    // Buffer may hold newlines (Alt+Enter); cursor sits on the last line
    let mut buffer_lines: Vec<&str> = dialog.buffer.split('\n').collect();
    let last = buffer_lines.pop().unwrap_or("");
    for buffer_line in buffer_lines {
        content.push(Line::from(Span::styled(
            buffer_line.to_string(),
            Style::default().fg(colors::INPUT),
        )));
    }
    content.push(Line::from(vec![
        Span::styled(last.to_string(), Style::default().fg(colors::INPUT)),
        Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
    ]));

    content.push(Line::from(""));
    content.push(Line::from(Span::styled(
        "Enter: submit  Alt+Enter: newline  Esc: close without responding",
        Style::default().fg(colors::DIM),
    )));

    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", dialog.title))
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(widget, popup_area);
}

/// Render the blocking "Input Required" warning dialog
fn render_warning_dialog(message: &str, frame: &mut Frame, area: Rect) {
    trace!(%message, "render_warning_dialog: called");
    let popup_area = centered_rect(44, 18, area);
    frame.render_widget(Clear, popup_area);

    let content = vec![
        Line::from(""),
        Line::from(message),
        Line::from(""),
        Line::from(Span::styled(
            "press any key to continue",
            Style::default().fg(colors::DIM),
        )),
    ];

    let widget = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Input Required ")
                .border_style(Style::default().fg(colors::WARNING))
                .style(Style::default().bg(Color::Black)),
        )
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(widget, popup_area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::HEADER),
        )]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Actions",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("n", "Assign a task to the selected operator"),
        key_line("o", "Cycle the operator selector"),
        key_line("r", "Review a random scenario"),
        key_line("b", "Give a safety briefing"),
        key_line("e", "Evaluate the AI-generated output"),
        key_line("t", "Show completed tasks"),
        key_line("c", "Clear the log (data is kept)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Log Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("j/↓", "Scroll down"),
        key_line("k/↑", "Scroll up"),
        key_line("PgUp/PgDn", "Scroll by page"),
        key_line("g", "Go to top"),
        key_line("G", "Go to bottom (follow)"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Dialogs",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        key_line("Enter", "Submit input"),
        key_line("Tab", "Switch operator (task input)"),
        key_line("Alt+Enter", "Insert newline (prompt)"),
        key_line("Esc", "Cancel / close"),
        Line::from(""),
        key_line("q", "Quit"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (? to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

/// Helper to create a key binding line
fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    trace!(percent_x, percent_y, "centered_rect: called");
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
