//! Terminal presentation layer
//!
//! Renders state snapshots and turns key presses into intents. Holds no
//! session state of its own apart from the spinner frame.

mod input;
mod render;
mod style;

pub use input::{map_key, UiAction};

use crate::runtime::SessionHandle;
use crate::state_machine::SessionContext;
use crossterm::event::{Event as TermEvent, EventStream};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::io::{self, Stdout};
use std::time::Duration;

type Term = Terminal<CrosstermBackend<Stdout>>;

const TICK: Duration = Duration::from_millis(120);

/// Take over the terminal and run until the child quits
pub async fn run(context: &SessionContext, handle: SessionHandle) -> io::Result<()> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, context, handle).await;
    let restored = restore_terminal(&mut terminal);
    result.and(restored)
}

fn setup_terminal() -> io::Result<Term> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Term) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

async fn event_loop(terminal: &mut Term, context: &SessionContext, handle: SessionHandle) -> io::Result<()> {
    let SessionHandle {
        event_tx,
        mut state_rx,
        task,
    } = handle;

    let mut keys = EventStream::new();
    let mut ticker = tokio::time::interval(TICK);
    let mut tick: usize = 0;
    let mut runtime_alive = true;

    loop {
        let snapshot = state_rx.borrow().clone();
        terminal.draw(|f| render::draw(f, &snapshot, context, tick))?;

        tokio::select! {
            _ = ticker.tick() => {
                tick = tick.wrapping_add(1);
            }
            changed = state_rx.changed(), if runtime_alive => {
                if changed.is_err() {
                    // Controller finished; keep showing the last snapshot
                    runtime_alive = false;
                }
            }
            next = keys.next() => match next {
                Some(Ok(TermEvent::Key(key))) => match map_key(&snapshot, context, key) {
                    Some(UiAction::Quit) => break,
                    Some(UiAction::Send(event)) => {
                        if event_tx.send(event).await.is_err() {
                            tracing::debug!("Session no longer accepting intents");
                        }
                    }
                    None => {}
                },
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e),
                None => break,
            },
        }
    }

    drop(event_tx);
    if task.is_finished() {
        match task.await {
            Ok(state) => tracing::info!(
                session_id = %context.session_id,
                facts_answered = state.history.len(),
                domains_visited = state.visited_domains.len(),
                "Session finished"
            ),
            Err(e) => tracing::error!(error = %e, "Session task failed"),
        }
    } else {
        // Quit mid-session; a fetch may still be outstanding
        task.abort();
        tracing::info!(session_id = %context.session_id, "Session abandoned");
    }
    Ok(())
}
