//! Terminal Tetrion runner (default binary).
//!
//! The game runs as an engine session on the tokio runtime. A blocking thread
//! reads crossterm key events and forwards them; every published snapshot is
//! redrawn in full.

mod render;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;

use tetrion::core::GameState;
use tetrion::engine::{spawn_session, EngineConfig};
use tetrion::input::{handle_key_event, should_quit};
use tetrion::types::GameAction;

use render::TerminalRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputEvent {
    Action(GameAction),
    Resize,
    Quit,
}

fn main() -> Result<()> {
    let config = EngineConfig::from_env();
    let runtime = tokio::runtime::Runtime::new()?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = runtime.block_on(run(&mut term, &config));

    // Always try to restore terminal state.
    let _ = term.exit();

    let state = result?;
    println!(
        "Game ended. Score: {}  Lines: {}  Pieces: {}",
        state.score(),
        state.lines(),
        state.pieces_locked()
    );
    Ok(())
}

async fn run(term: &mut TerminalRenderer, config: &EngineConfig) -> Result<GameState> {
    let session = spawn_session(config).await;
    let mut snapshots = session.snapshots();

    let (input_tx, mut input_rx) = mpsc::channel::<InputEvent>(32);
    std::thread::spawn(move || read_input(input_tx));

    let first = *snapshots.borrow_and_update();
    term.draw(&first)?;

    loop {
        tokio::select! {
            changed = snapshots.changed() => {
                changed?;
                let snap = *snapshots.borrow_and_update();
                term.draw(&snap)?;
            }
            input = input_rx.recv() => match input {
                Some(InputEvent::Action(action)) => session.send(action).await?,
                Some(InputEvent::Resize) => {
                    term.invalidate();
                    let snap = *snapshots.borrow();
                    term.draw(&snap)?;
                }
                Some(InputEvent::Quit) | None => break,
            },
        }
    }

    session.shutdown().await
}

/// Blocking key reader. Exits after sending `Quit` or once the receiver is gone.
fn read_input(tx: mpsc::Sender<InputEvent>) {
    loop {
        let input = match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                if should_quit(key) {
                    Some(InputEvent::Quit)
                } else {
                    handle_key_event(key).map(InputEvent::Action)
                }
            }
            Ok(Event::Resize(..)) => Some(InputEvent::Resize),
            Ok(_) => None,
            Err(e) => {
                eprintln!("[Input] read failed: {}", e);
                Some(InputEvent::Quit)
            }
        };

        let Some(input) = input else {
            continue;
        };
        if tx.blocking_send(input).is_err() || input == InputEvent::Quit {
            return;
        }
    }
}
