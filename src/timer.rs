//! Elapsed-time display ticker.
//!
//! The session computes elapsed time on demand; this module decides when the on-screen value is
//! refreshed. The refresh runs once per second while the player is moving and stops whenever a
//! question, the quit confirmation or the completion screen is up.

use std::time::{Duration, Instant};

use crate::game::{GameSession, Phase};

/// Interval between display refreshes.
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Formats a duration as zero-padded `MM:SS`.
///
/// Minutes keep growing past 99 rather than wrapping into hours.
pub fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.as_secs();
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Periodic refresh of the displayed elapsed time.
///
/// This structure holds the last value shown to the player and the moment it was taken. The tick
/// only runs while the session is [`Phase::Playing`]; in every other phase it is torn down and the
/// next resume refreshes immediately.
#[derive(Debug, Default)]
pub struct ElapsedTicker {
    /// Whole seconds currently on screen.
    displayed: Duration,
    /// Moment of the last refresh, or [`None`] while the tick is not running.
    last_tick: Option<Instant>,
}

impl ElapsedTicker {
    /// Creates a stopped ticker showing zero.
    pub const fn new() -> Self {
        Self {
            displayed: Duration::ZERO,
            last_tick: None,
        }
    }

    /// Returns the value currently on screen.
    pub const fn displayed(&self) -> Duration {
        self.displayed
    }

    /// Returns whether the periodic refresh is running.
    pub const fn is_running(&self) -> bool {
        self.last_tick.is_some()
    }

    /// Stops the tick, keeping the displayed value.
    pub fn pause(&mut self) {
        self.last_tick = None;
    }

    /// Stops the tick and resets the display to zero.
    pub fn clear(&mut self) {
        self.displayed = Duration::ZERO;
        self.last_tick = None;
    }

    /// Advances the ticker against `session` as of `now`.
    ///
    /// While playing, the displayed value is refreshed when the tick is not running yet or a full
    /// [`TICK_INTERVAL`] has passed since the last refresh. On completion it snaps to the frozen
    /// completion time. In every other phase the tick stops and the display holds its value.
    pub fn update(&mut self, session: &GameSession, now: Instant) {
        match session.phase() {
            Phase::Playing => {
                let due = match self.last_tick {
                    None => true,
                    Some(last) => now.saturating_duration_since(last) >= TICK_INTERVAL,
                };
                if due {
                    self.displayed = Duration::from_secs(session.elapsed(now).as_secs());
                    self.last_tick = Some(now);
                }
            }
            Phase::Completed { elapsed } => {
                self.displayed = Duration::from_secs(elapsed.as_secs());
                self.last_tick = None;
            }
            Phase::NotStarted | Phase::AnsweringQuestion { .. } => {
                self.last_tick = None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        maze::{Direction, Maze, Position},
        questions::BANK,
    };

    fn session_with_checkpoint() -> GameSession {
        let maze = Maze::from_layout(&["#####", "#...#", "#.#.#", "#...#", "#####"])
            .expect("layout should parse");
        GameSession::new(
            maze,
            vec![Position::new(2, 1)],
            BANK.iter().take(1).copied().collect(),
        )
        .expect("session should assemble")
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::ZERO), "00:00");
        assert_eq!(format_elapsed(Duration::from_millis(59_999)), "00:59");
        assert_eq!(format_elapsed(Duration::from_secs(61)), "01:01");
        assert_eq!(format_elapsed(Duration::from_secs(6_000)), "100:00");
    }

    #[test]
    fn test_ticker_idle_before_start() {
        let session = session_with_checkpoint();
        let mut ticker = ElapsedTicker::new();

        ticker.update(&session, Instant::now());

        assert!(!ticker.is_running());
        assert_eq!(ticker.displayed(), Duration::ZERO);
    }

    #[test]
    fn test_ticker_refreshes_once_per_interval() {
        let start = Instant::now();
        let mut session = session_with_checkpoint();
        assert!(session.start(start));
        let mut ticker = ElapsedTicker::new();

        ticker.update(&session, start + Duration::from_millis(500));
        assert!(ticker.is_running());
        assert_eq!(ticker.displayed(), Duration::ZERO);

        ticker.update(&session, start + Duration::from_millis(1_400));
        assert_eq!(ticker.displayed(), Duration::ZERO);

        ticker.update(&session, start + Duration::from_millis(2_600));
        assert_eq!(ticker.displayed(), Duration::from_secs(2));
    }

    #[test]
    fn test_ticker_pauses_during_question() {
        let start = Instant::now();
        let mut session = session_with_checkpoint();
        assert!(session.start(start));
        let mut ticker = ElapsedTicker::new();
        ticker.update(&session, start + Duration::from_secs(3));

        let _ = session.move_player(Direction::Down, start + Duration::from_secs(3));
        ticker.update(&session, start + Duration::from_secs(10));
        assert!(!ticker.is_running());
        assert_eq!(ticker.displayed(), Duration::from_secs(3));

        assert!(session.select_answer(2));
        let _ = session.submit_answer();
        ticker.update(&session, start + Duration::from_secs(12));
        assert!(ticker.is_running());
        assert_eq!(ticker.displayed(), Duration::from_secs(12));
    }

    #[test]
    fn test_ticker_pause_holds_display() {
        let start = Instant::now();
        let mut session = session_with_checkpoint();
        assert!(session.start(start));
        let mut ticker = ElapsedTicker::new();
        ticker.update(&session, start + Duration::from_secs(4));

        ticker.pause();

        assert!(!ticker.is_running());
        assert_eq!(ticker.displayed(), Duration::from_secs(4));
    }

    #[test]
    fn test_ticker_clear() {
        let start = Instant::now();
        let mut session = session_with_checkpoint();
        assert!(session.start(start));
        let mut ticker = ElapsedTicker::new();
        ticker.update(&session, start + Duration::from_secs(4));

        ticker.clear();

        assert!(!ticker.is_running());
        assert_eq!(ticker.displayed(), Duration::ZERO);
    }
}
