use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval, sleep_until};

use crate::game::{GameEngine, Session};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{HudInfo, Renderer};
use crate::storage::{HighScore, ScoreStore};

pub struct HumanMode<S: ScoreStore> {
    session: Session<S>,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
}

impl<S: ScoreStore> HumanMode<S> {
    pub fn new(engine: GameEngine, high_score: HighScore<S>) -> Self {
        Self {
            session: Session::new(engine, high_score),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Tick spacing follows the snake's speed, so it is re-armed every tick
        let mut next_tick = Instant::now() + self.session.state().tick_interval();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event)?;
                    }
                }

                // Game logic tick
                _ = sleep_until(next_tick) => {
                    if self.session.state().is_running() {
                        self.update_game()?;
                    }
                    next_tick = Instant::now() + self.session.state().tick_interval();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    let hud = HudInfo {
                        high_score: self.session.high_score(),
                        new_record: self.session.is_new_record(),
                        metrics: &self.metrics,
                    };
                    let state = self.session.state();
                    let renderer = &self.renderer;
                    terminal.draw(|frame| {
                        renderer.render(frame, state, &hud);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        self.session.finish()
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Turn(direction) => self.session.set_direction(direction),
                KeyAction::TogglePause => self.toggle_pause(),
                KeyAction::Restart => self.reset_game()?,
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }

        Ok(())
    }

    fn toggle_pause(&mut self) {
        self.session.toggle_running();

        let state = self.session.state();
        if state.is_paused() {
            self.metrics.on_pause();
        } else if state.is_running() {
            self.metrics.on_resume();
        }
    }

    fn update_game(&mut self) -> Result<()> {
        let result = self.session.tick()?;

        if result.info.termination.is_some() {
            self.metrics.on_game_over();
        }

        Ok(())
    }

    fn reset_game(&mut self) -> Result<()> {
        if !self.session.state().is_terminated() {
            self.metrics.games_played += 1;
        }
        self.session.reset()?;
        self.metrics.on_game_start();
        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameConfig};
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode<MemoryStore> {
        let engine = GameEngine::with_seed(GameConfig::default(), 3).unwrap();
        HumanMode::new(engine, HighScore::load(MemoryStore::new()).unwrap())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert!(mode.session.state().is_running());
        assert_eq!(mode.session.state().score, 0);
    }

    #[test]
    fn test_turn_is_queued() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Up)).unwrap();
        assert_eq!(
            mode.session.state().pending_direction,
            Some(Direction::Up)
        );
    }

    #[test]
    fn test_pause_toggles_clock() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(mode.session.state().is_paused());
        assert!(!mode.metrics.is_clock_running());

        mode.handle_event(key(KeyCode::Char(' '))).unwrap();
        assert!(mode.session.state().is_running());
        assert!(mode.metrics.is_clock_running());
    }

    #[test]
    fn test_restart_counts_abandoned_game() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('r'))).unwrap();

        assert_eq!(mode.metrics.games_played, 1);
        assert!(mode.session.state().is_running());
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        mode.handle_event(key(KeyCode::Char('q'))).unwrap();
        assert!(mode.should_quit);
    }
}
