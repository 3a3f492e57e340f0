//! Live state of one pass through today's exercises.
//!
//! The exercise list is fixed when the session starts and is walked
//! strictly front to back. The cursor moves only through [`WorkoutSession::advance`],
//! which the workout page calls after the completion endpoint confirmed
//! the current exercise — a failed call leaves the snapshot untouched and
//! the same action can be retried. Advancing past the last exercise moves
//! the session into `Summarizing`; fetching the summary (success or not)
//! ends it. Difficulty reports are a side channel and never move the
//! cursor.

use crate::types::{SessionExercise, SessionSummary};

#[derive(Clone, Debug, PartialEq)]
pub enum SessionPhase {
    InProgress,
    Summarizing,
    Finished(Option<SessionSummary>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct WorkoutSession {
    exercises: Vec<SessionExercise>,
    current_index: usize,
    phase: SessionPhase,
}

impl WorkoutSession {
    /// Starts a session over today's list. A day with no exercises has
    /// nothing to run and yields no session.
    pub fn start(exercises: Vec<SessionExercise>) -> Option<Self> {
        if exercises.is_empty() {
            return None;
        }
        Some(Self {
            exercises,
            current_index: 0,
            phase: SessionPhase::InProgress,
        })
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn exercises(&self) -> &[SessionExercise] {
        &self.exercises
    }

    pub fn len(&self) -> usize {
        self.exercises.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exercises.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The exercise whose completion is pending. `None` once the last one
    /// has been confirmed.
    pub fn current(&self) -> Option<&SessionExercise> {
        match self.phase {
            SessionPhase::InProgress => self.exercises.get(self.current_index),
            _ => None,
        }
    }

    /// How many exercises the server has confirmed so far.
    pub fn completed_count(&self) -> usize {
        match self.phase {
            SessionPhase::InProgress => self.current_index,
            _ => self.exercises.len(),
        }
    }

    /// Steps the cursor after a confirmed completion. On the last
    /// exercise the session moves to `Summarizing` instead; the cursor
    /// itself never exceeds the list. Must only be called in
    /// `InProgress`, and only after the completion call for
    /// [`Self::current`] succeeded.
    pub fn advance(&self) -> Self {
        debug_assert!(
            matches!(self.phase, SessionPhase::InProgress),
            "advance outside of a running session"
        );
        let mut next = self.clone();
        if self.current_index + 1 < self.exercises.len() {
            next.current_index += 1;
        } else {
            next.phase = SessionPhase::Summarizing;
        }
        next
    }

    /// Ends the session. The summary is display-only, so a failed fetch
    /// still finishes the session with `None`.
    pub fn finish(&self, summary: Option<SessionSummary>) -> Self {
        debug_assert!(
            matches!(self.phase, SessionPhase::Summarizing),
            "finish before the last completion was confirmed"
        );
        let mut next = self.clone();
        next.phase = SessionPhase::Finished(summary);
        next
    }
}

/// Per-exercise difficulty feedback, independent of the cursor. A rating
/// of 0 means "not chosen yet" and the submit control stays disabled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DifficultyReport {
    pub rating: u8,
    pub comment: String,
}

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

impl DifficultyReport {
    pub fn is_submittable(&self) -> bool {
        (MIN_RATING..=MAX_RATING).contains(&self.rating)
    }

    pub fn comment(&self) -> Option<&str> {
        let trimmed = self.comment.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise(log_id: u32, name: &str) -> SessionExercise {
        SessionExercise {
            log_id,
            exercise_name: name.to_string(),
            sets: 3,
            reps: 10,
            rest_seconds: 60,
            tempo: "2-0-2-0".to_string(),
            notes: None,
            video_url: None,
        }
    }

    fn three_exercise_session() -> WorkoutSession {
        WorkoutSession::start(vec![
            exercise(11, "Back Squat"),
            exercise(12, "Bench Press"),
            exercise(13, "Plank"),
        ])
        .unwrap()
    }

    #[test]
    fn empty_day_yields_no_session() {
        assert!(WorkoutSession::start(vec![]).is_none());
    }

    #[test]
    fn cursor_walks_the_list_in_order_one_step_at_a_time() {
        let mut session = three_exercise_session();
        let mut seen = Vec::new();
        while let Some(current) = session.current() {
            seen.push(current.log_id);
            session = session.advance();
        }
        assert_eq!(seen, [11, 12, 13]);
    }

    #[test]
    fn last_advance_moves_to_summarizing_then_finished() {
        let session = three_exercise_session().advance().advance();
        assert_eq!(session.current().map(|e| e.log_id), Some(13));

        let summarizing = session.advance();
        assert_eq!(*summarizing.phase(), SessionPhase::Summarizing);
        assert!(summarizing.current().is_none());
        assert_eq!(summarizing.completed_count(), 3);

        let finished = summarizing.finish(Some(SessionSummary {
            done: 3,
            total: 3,
            progress: 100,
        }));
        match finished.phase() {
            SessionPhase::Finished(Some(summary)) => {
                assert_eq!(summary.done, 3);
                assert_eq!(summary.total, 3);
                assert_eq!(summary.progress, 100);
            }
            other => panic!("unexpected phase {other:?}"),
        }
    }

    #[test]
    fn failed_summary_fetch_still_ends_the_session() {
        let finished = WorkoutSession::start(vec![exercise(1, "Row")])
            .unwrap()
            .advance()
            .finish(None);
        assert_eq!(*finished.phase(), SessionPhase::Finished(None));
        assert_eq!(finished.completed_count(), 1);
    }

    #[test]
    fn failed_completion_leaves_the_snapshot_usable_for_retry() {
        let session = three_exercise_session().advance();
        // The page keeps the old snapshot when the call fails; the same
        // exercise is still current and can be re-submitted.
        let before = session.clone();
        assert_eq!(session.current().map(|e| e.log_id), Some(12));
        assert_eq!(session, before);
        assert_eq!(session.advance().current().map(|e| e.log_id), Some(13));
    }

    #[test]
    fn completed_count_matches_cursor_while_running() {
        let session = three_exercise_session();
        assert_eq!(session.completed_count(), 0);
        assert_eq!(session.advance().completed_count(), 1);
        assert_eq!(session.advance().advance().completed_count(), 2);
    }

    #[test]
    fn unset_rating_is_not_submittable() {
        let mut report = DifficultyReport::default();
        assert_eq!(report.rating, 0);
        assert!(!report.is_submittable());

        report.rating = 3;
        assert!(report.is_submittable());
        report.rating = 6;
        assert!(!report.is_submittable());
    }

    #[test]
    fn blank_comment_is_dropped() {
        let report = DifficultyReport {
            rating: 4,
            comment: "  ".to_string(),
        };
        assert_eq!(report.comment(), None);

        let report = DifficultyReport {
            rating: 4,
            comment: " left knee felt off ".to_string(),
        };
        assert_eq!(report.comment(), Some("left knee felt off"));
    }
}
