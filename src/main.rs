//! Terminal memory game runner (default binary).
//!
//! Fixed-timestep loop: draw the current snapshot, poll input with a timeout
//! to the next tick, apply actions, advance the engine clock. The terminal is
//! always restored on the way out.

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};

use tui_memory::core::{GameEngine, GameEvent};
use tui_memory::input::{map_key, should_quit, UiAction};
use tui_memory::storage::{prefs, FileStore, SharedStore};
use tui_memory::term::{render, Overlay, Screen, UiState, GRID_COLS};
use tui_memory::types::TICK_MS;

fn main() -> Result<()> {
    let mut screen = Screen::new();
    screen.enter()?;

    let result = run(&mut screen);

    // Always try to restore terminal state.
    let _ = screen.exit();
    result
}

fn data_path() -> PathBuf {
    env::var_os("TUI_MEMORY_DATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(".tui-memory.json"))
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}

fn run(screen: &mut Screen) -> Result<()> {
    let mut store = SharedStore::new(FileStore::open(data_path()));
    let mut engine = GameEngine::new(clock_seed(), Box::new(store.clone()));

    let overlay = if !prefs::load_onboarding_seen(&store) {
        Overlay::HowTo
    } else if engine.resume_available() {
        Overlay::Resume
    } else {
        Overlay::None
    };
    let mut ui = UiState {
        cursor: 0,
        overlay,
        sound: prefs::load_sound_settings(&store),
    };

    let mut last_tick = Instant::now();
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        screen.draw(&render(&engine.snapshot(), &ui))?;

        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if should_quit(key) {
                        return Ok(());
                    }
                    match ui.overlay {
                        Overlay::HowTo => {
                            // Any key dismisses the tutorial, once.
                            prefs::save_onboarding_seen(&mut store, true);
                            ui.overlay = if engine.resume_available() {
                                Overlay::Resume
                            } else {
                                Overlay::None
                            };
                        }
                        Overlay::Resume => match map_key(key) {
                            Some(UiAction::Resume) => {
                                engine.resume_session();
                                ui.overlay = Overlay::None;
                            }
                            Some(UiAction::Discard) => {
                                engine.discard_session();
                                ui.overlay = Overlay::None;
                            }
                            _ => {}
                        },
                        Overlay::None => {
                            if let Some(action) = map_key(key) {
                                apply_action(&mut engine, &mut ui, &mut store, action);
                            }
                        }
                    }
                }
            }
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            engine.tick(TICK_MS);
        }

        // Sound cues: the engine emits hooks, the frontend decides.
        for game_event in engine.take_events() {
            if ui.sound.sfx {
                match game_event {
                    GameEvent::PairMatched
                    | GameEvent::RoundWon { .. }
                    | GameEvent::TimeExpired => screen.bell(),
                    GameEvent::PairMismatched | GameEvent::RoundStarted => {}
                }
            }
        }
    }
}

fn apply_action(
    engine: &mut GameEngine,
    ui: &mut UiState,
    store: &mut SharedStore,
    action: UiAction,
) {
    let card_count = engine.cards().len();
    match action {
        UiAction::CursorLeft => ui.cursor = ui.cursor.saturating_sub(1),
        UiAction::CursorRight => {
            ui.cursor = (ui.cursor + 1).min(card_count.saturating_sub(1));
        }
        UiAction::CursorUp => ui.cursor = ui.cursor.saturating_sub(GRID_COLS),
        UiAction::CursorDown => {
            ui.cursor = (ui.cursor + GRID_COLS).min(card_count.saturating_sub(1));
        }
        UiAction::Flip => {
            if let Some(card) = engine.cards().get(ui.cursor) {
                let id = card.id;
                engine.flip_card(id);
            }
        }
        UiAction::Hint => engine.use_hint(),
        UiAction::Restart => engine.restart(),
        UiAction::SelectDifficulty(difficulty) => engine.change_difficulty(difficulty),
        UiAction::CycleTheme => engine.change_theme(engine.theme().next()),
        UiAction::Resume => engine.resume_session(),
        UiAction::Discard => engine.discard_session(),
        UiAction::ToggleSfx => {
            ui.sound.sfx = !ui.sound.sfx;
            prefs::save_sound_settings(store, &ui.sound);
        }
        UiAction::ToggleBgm => {
            ui.sound.bgm = !ui.sound.bgm;
            prefs::save_sound_settings(store, &ui.sound);
        }
        UiAction::ShowHelp => ui.overlay = Overlay::HowTo,
        UiAction::ResetProgress => engine.reset_progress(),
    }
    // Deck size can change with difficulty; keep the cursor on the board.
    ui.cursor = ui.cursor.min(engine.cards().len().saturating_sub(1));
}
