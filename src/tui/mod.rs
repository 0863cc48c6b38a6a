mod clipboard;
mod help;
mod render;

use crate::cli::{build_config, build_orchestrator, initial_draft, Cli};
use crate::model::{AppEvent, Draft};
use crate::orchestrator::{self, UiCommand};
use crate::view::{Action, DraftEdit, ViewController};
use anyhow::{Context, Result};
use clipboard::SystemClipboard;
use crossterm::{
    event::{
        self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Email,
    Tone,
}

/// Presentation-only state; everything the core cares about lives in the controller.
struct UiState {
    focus: Focus,
    show_help: bool,
    controller: ViewController<SystemClipboard>,
}

/// What a key press means for the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
enum UiInput {
    Dispatch(Action),
    ToggleFocus,
    ToggleHelp,
    CloseHelp,
    Quit,
}

pub async fn run(args: Cli) -> Result<()> {
    let cfg = build_config(&args);
    let orchestrator = build_orchestrator(&cfg)?;
    let draft = initial_draft(&args)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(draft, event_rx, cmd_tx));

    let res = orchestrator::run_controller(orchestrator, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    draft: Draft,
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; the controller is the single writer of view state.
    let mut ui = UiState {
        focus: Focus::Email,
        show_help: false,
        controller: ViewController::new(draft, cmd_tx.clone(), SystemClipboard),
    };

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        while let Ok(ev) = event_rx.try_recv() {
            ui.controller.handle_event(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            ui.controller.tick(Instant::now());
            terminal.draw(|f| render::draw(f.area(), f, &ui)).ok();
            last_tick = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            let input = match event::read() {
                Ok(Event::Key(k)) if k.kind == KeyEventKind::Press => {
                    key_input(ui.focus, ui.show_help, k)
                }
                Ok(Event::Paste(text)) if ui.focus == Focus::Email && !ui.show_help => Some(
                    UiInput::Dispatch(Action::EditContent(DraftEdit::Paste(normalize_paste(&text)))),
                ),
                _ => None,
            };
            if let Some(input) = input {
                match input {
                    UiInput::Quit => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    UiInput::ToggleFocus => {
                        ui.focus = match ui.focus {
                            Focus::Email => Focus::Tone,
                            Focus::Tone => Focus::Email,
                        };
                    }
                    UiInput::ToggleHelp => ui.show_help = !ui.show_help,
                    UiInput::CloseHelp => ui.show_help = false,
                    UiInput::Dispatch(action) => ui.controller.dispatch(action),
                }
                // Redraw on input so typing feels immediate.
                terminal.draw(|f| render::draw(f.area(), f, &ui)).ok();
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, DisableBracketedPaste, LeaveAlternateScreen).ok();
    res
}

/// Terminals deliver pasted line breaks as CR or CRLF.
fn normalize_paste(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}

fn key_input(focus: Focus, show_help: bool, k: KeyEvent) -> Option<UiInput> {
    let ctrl = k.modifiers.contains(KeyModifiers::CONTROL);
    let dispatch = |action: Action| Some(UiInput::Dispatch(action));

    match (ctrl, k.code) {
        (true, KeyCode::Char('q')) | (true, KeyCode::Char('c')) => Some(UiInput::Quit),
        (true, KeyCode::Char('h')) | (_, KeyCode::F(1)) => Some(UiInput::ToggleHelp),
        (_, KeyCode::Esc) if show_help => Some(UiInput::CloseHelp),
        _ if show_help => None,
        (true, KeyCode::Char('g')) | (true, KeyCode::Char('s')) => dispatch(Action::Submit),
        (true, KeyCode::Char('l')) => dispatch(Action::Clear),
        (true, KeyCode::Char('y')) => dispatch(Action::Copy {
            now: Instant::now(),
        }),
        (true, KeyCode::Char('t')) => dispatch(Action::CycleTone { forward: true }),
        (_, KeyCode::Esc) => dispatch(Action::DismissNotice),
        (_, KeyCode::Tab) | (_, KeyCode::BackTab) => Some(UiInput::ToggleFocus),
        (true, _) => None,
        (false, code) => match focus {
            Focus::Email => match code {
                KeyCode::Char(c) => dispatch(Action::EditContent(DraftEdit::Insert(c))),
                KeyCode::Enter => dispatch(Action::EditContent(DraftEdit::Insert('\n'))),
                KeyCode::Backspace => dispatch(Action::EditContent(DraftEdit::Backspace)),
                _ => None,
            },
            Focus::Tone => match code {
                KeyCode::Right | KeyCode::Down | KeyCode::Char('l') | KeyCode::Char('j') => {
                    dispatch(Action::CycleTone { forward: true })
                }
                KeyCode::Left | KeyCode::Up | KeyCode::Char('h') | KeyCode::Char('k') => {
                    dispatch(Action::CycleTone { forward: false })
                }
                KeyCode::Enter => dispatch(Action::Submit),
                _ => None,
            },
        },
    }
}
