use chrono::prelude::*;
use saper_core::{Coord2, FlagOutcome, PlayEngine, RevealOutcome};

/// An engine plus the bookkeeping the terminal shows around it.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct GameSession {
    pub engine: PlayEngine,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
    pub move_count: u32,
}

impl GameSession {
    pub fn new(engine: PlayEngine) -> Self {
        Self {
            engine,
            started_at: None,
            ended_at: None,
            move_count: 0,
        }
    }

    pub fn reveal(&mut self, coords: Coord2, now: DateTime<Utc>) -> saper_core::Result<RevealOutcome> {
        let outcome = self.engine.reveal(coords)?;
        if outcome.has_update() {
            self.move_count += 1;
            self.started_at.get_or_insert(now);
        }
        if outcome.summary().is_some() {
            log::debug!("ended at {}", now);
            self.ended_at = Some(now);
        }
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> saper_core::Result<FlagOutcome> {
        let outcome = self.engine.toggle_flag(coords)?;
        if outcome.has_update() {
            self.move_count += 1;
        }
        Ok(outcome)
    }

    /// How many seconds have passed since the first reveal, 0 if there was none
    pub fn elapsed_secs(&self, now: DateTime<Utc>) -> u32 {
        if let Some(started_at) = self.started_at {
            (self.ended_at.unwrap_or(now) - started_at)
                .num_seconds()
                .max(0) as u32
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;
    use saper_core::MineLayout;

    fn session() -> GameSession {
        let layout = MineLayout::from_mine_coords((3, 1), &[(1, 0)]).unwrap();
        GameSession::new(PlayEngine::with_layout(layout))
    }

    #[test]
    fn clock_runs_from_first_reveal_to_end() {
        let t0 = DateTime::<Utc>::from_timestamp(1_000, 0).unwrap();
        let mut session = session();
        assert_eq!(session.elapsed_secs(t0), 0);

        session.reveal((0, 0), t0).unwrap();
        assert_eq!(session.elapsed_secs(t0 + TimeDelta::seconds(4)), 4);

        session.reveal((2, 0), t0 + TimeDelta::seconds(9)).unwrap();
        assert_eq!(session.ended_at, Some(t0 + TimeDelta::seconds(9)));
        assert_eq!(session.elapsed_secs(t0 + TimeDelta::seconds(60)), 9);
        assert_eq!(session.move_count, 2);
    }

    #[test]
    fn no_change_moves_are_not_counted() {
        let now = Utc::now();
        let mut session = session();

        session.reveal((0, 0), now).unwrap();
        session.reveal((0, 0), now).unwrap();
        assert_eq!(session.toggle_flag((0, 0)), Ok(FlagOutcome::Rejected));
        assert_eq!(session.toggle_flag((1, 0)), Ok(FlagOutcome::Flagged));

        assert_eq!(session.move_count, 2);
    }
}
