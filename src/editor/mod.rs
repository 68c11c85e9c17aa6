//! Interactive capture of one search term.
//!
//! The terminal session owns raw mode and the alternate screen for
//! exactly the duration of [`capture`]; all editing decisions live in
//! the pure [`state::EditorState`] machine.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io::{self, Stdout};

pub mod state;

#[cfg(test)]
mod state_test;

use self::state::{EditorEvent, EditorState, EditorStep};

/// How an editing session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// Enter was pressed; the raw buffer, marker included.
    Submitted(String),
    /// Escape was pressed; nothing was kept.
    Aborted,
}

/// Run one editing session under the given prompt title.
pub fn capture(prompt: &str) -> Result<CaptureOutcome> {
    let mut terminal = setup_terminal()?;
    let result = run_session(&mut terminal, prompt);
    cleanup_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_session(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    prompt: &str,
) -> Result<CaptureOutcome> {
    let mut state = EditorState::new();
    loop {
        let text = state.text();
        terminal.draw(|f| render(f, prompt, &text))?;

        // Blocking read is fine here: nothing changes the screen
        // between key presses, and resize events wake us to redraw.
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let Some(editor_event) = translate_key(key) else {
                continue;
            };
            match state.apply(editor_event) {
                EditorStep::Editing => {}
                EditorStep::Submitted(buffer) => return Ok(CaptureOutcome::Submitted(buffer)),
                EditorStep::Aborted => return Ok(CaptureOutcome::Aborted),
            }
        }
    }
}

pub(crate) fn translate_key(key: KeyEvent) -> Option<EditorEvent> {
    use crossterm::event::{KeyCode, KeyModifiers};

    if key.modifiers.contains(KeyModifiers::CONTROL) || key.modifiers.contains(KeyModifiers::ALT) {
        return None;
    }
    match key.code {
        KeyCode::Char(' ') => Some(EditorEvent::Space),
        KeyCode::Char(c) => Some(EditorEvent::Char(c)),
        KeyCode::Backspace => Some(EditorEvent::Backspace),
        KeyCode::Enter => Some(EditorEvent::Enter),
        KeyCode::Esc => Some(EditorEvent::Escape),
        _ => None,
    }
}

fn render(f: &mut Frame, prompt: &str, text: &str) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(f.area());

    let input = Paragraph::new(Line::from(vec![
        Span::raw(text.to_string()),
        Span::styled(" ", Style::default().bg(Color::White).fg(Color::Black)),
    ]))
    .block(Block::default().title(prompt.to_string()).borders(Borders::ALL))
    .style(Style::default().fg(Color::Yellow));
    f.render_widget(input, chunks[0]);

    let hint = Paragraph::new("Enter to start tracking, Esc to cancel")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, chunks[1]);
}
