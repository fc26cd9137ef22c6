//! Main chat event loop.
//!
//! The loop owns the [`App`]. Terminal events and backend completions both
//! become [`AppAction`]s, are applied in arrival order, and any resulting
//! commands are handed to [`executors::spawn_command`].

pub mod executors;
pub mod keybindings;
pub mod lifecycle;

#[cfg(test)]
mod event_loop_tests;

use std::{error::Error, sync::Arc, time::Duration};

use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tokio::sync::mpsc;
use tracing::{debug, info};

use self::executors::spawn_command;
use self::keybindings::KeyRegistry;
use self::lifecycle::{install_panic_hook, restore_terminal, setup_terminal};
use crate::core::app::{apply_actions, mount_actions, App, AppAction, AppActionDispatcher};
use crate::core::session::ChatBackend;
use crate::ui::renderer::ui;

const TICK: Duration = Duration::from_millis(80);
const POLL_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Debug)]
pub enum UiEvent {
    Crossterm(Event),
}

/// Apply `actions` and start the backend work they ask for.
pub fn process_actions(
    app: &mut App,
    backend: &Arc<dyn ChatBackend>,
    dispatcher: &AppActionDispatcher,
    actions: impl IntoIterator<Item = AppAction>,
) {
    for command in apply_actions(app, actions) {
        debug!(?command, "spawning backend command");
        spawn_command(Arc::clone(backend), dispatcher.clone(), command);
    }
}

fn handle_ui_event(
    app: &mut App,
    registry: &KeyRegistry,
    backend: &Arc<dyn ChatBackend>,
    dispatcher: &AppActionDispatcher,
    event: UiEvent,
) {
    match event {
        UiEvent::Crossterm(Event::Key(key)) if key.kind == KeyEventKind::Press => {
            if let Some(action) = registry.route(app, &key) {
                process_actions(app, backend, dispatcher, [action]);
            }
        }
        UiEvent::Crossterm(_) => {}
    }
}

fn drain_action_queue(
    app: &mut App,
    backend: &Arc<dyn ChatBackend>,
    dispatcher: &AppActionDispatcher,
    first: AppAction,
    action_rx: &mut mpsc::UnboundedReceiver<AppAction>,
) {
    let mut pending = vec![first];
    while let Ok(action) = action_rx.try_recv() {
        pending.push(action);
    }
    process_actions(app, backend, dispatcher, pending);
}

/// Read terminal events on a blocking thread until the receiver goes away.
fn spawn_event_reader(event_tx: mpsc::UnboundedSender<UiEvent>) {
    tokio::task::spawn_blocking(move || {
        while !event_tx.is_closed() {
            match event::poll(POLL_TIMEOUT) {
                Ok(true) => {
                    if let Ok(ev) = event::read() {
                        if event_tx.send(UiEvent::Crossterm(ev)).is_err() {
                            break;
                        }
                    }
                }
                Ok(false) => {}
                Err(_) => break,
            }
        }
    });
}

pub async fn run_chat(backend: Arc<dyn ChatBackend>) -> Result<(), Box<dyn Error>> {
    info!("starting chat view");
    let mut app = App::new();

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<AppAction>();
    let dispatcher = AppActionDispatcher::new(action_tx);
    dispatcher.dispatch_many(mount_actions());

    install_panic_hook();
    let mut terminal = setup_terminal()?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<UiEvent>();
    spawn_event_reader(event_tx);

    let registry = KeyRegistry::new();
    let mut ticker = tokio::time::interval(TICK);

    let result: Result<(), Box<dyn Error>> = loop {
        if let Err(err) = terminal.draw(|f| ui(f, &mut app)) {
            break Err(err.into());
        }
        if app.ui.exit_requested {
            break Ok(());
        }

        tokio::select! {
            maybe_event = event_rx.recv() => match maybe_event {
                Some(event) => handle_ui_event(&mut app, &registry, &backend, &dispatcher, event),
                None => break Ok(()),
            },
            Some(action) = action_rx.recv() => {
                drain_action_queue(&mut app, &backend, &dispatcher, action, &mut action_rx);
            }
            _ = ticker.tick() => {
                app.ui.scroll.step();
            }
        }
    };

    drop(event_rx);
    restore_terminal(&mut terminal)?;
    info!("chat view closed");
    result
}
