//! In-memory editing of a multi-week training plan.
//!
//! The draft keeps one slot per (week, day-of-week) pair in a `BTreeMap`,
//! so the pair is unique by construction and iteration order is the
//! display order. Every operation returns a fresh snapshot; the pages
//! write that snapshot back into a signal, which keeps the nested
//! structure free of aliasing between renders. No operation here touches
//! the network — the save flow consumes `build_save_payload` and
//! `ClientAssignmentSet::diff` and issues the calls itself.

use std::collections::{BTreeMap, BTreeSet};

use crate::types::{Exercise, ExerciseEntry, PlanDay, PlanDetail, PlanPayload};

pub const DAYS_PER_WEEK: u32 = 7;

pub const DEFAULT_SETS: u32 = 3;
pub const DEFAULT_REPS: u32 = 10;
pub const DEFAULT_REST_SECONDS: u32 = 60;
pub const DEFAULT_TEMPO: &str = "2-0-2-0";

#[derive(Clone, Debug, PartialEq)]
pub struct PlanDraft {
    pub id: Option<u32>,
    pub name: String,
    pub description: String,
    pub duration_weeks: u32,
    days: BTreeMap<(u32, u32), PlanDay>,
}

impl PlanDraft {
    /// New-plan mode: a full grid of empty days for `weeks` weeks.
    pub fn empty(weeks: u32) -> Self {
        let weeks = weeks.max(1);
        let mut days = BTreeMap::new();
        for week in 1..=weeks {
            for day in 1..=DAYS_PER_WEEK {
                days.insert((week, day), PlanDay::empty(week, day));
            }
        }
        Self {
            id: None,
            name: String::new(),
            description: String::new(),
            duration_weeks: weeks,
            days,
        }
    }

    /// Edit mode: rebuild the draft from a fetched plan. The server only
    /// stores days with content, so the grid is filled back up with empty
    /// slots for every (week, day) pair the payload omitted.
    pub fn hydrate(plan: &PlanDetail) -> Self {
        let mut draft = Self::empty(plan.duration_weeks);
        draft.id = Some(plan.id);
        draft.name = plan.name.clone();
        draft.description = plan.description.clone();
        for day in &plan.days {
            draft
                .days
                .insert((day.week_number, day.day_number), day.clone());
        }
        draft
    }

    pub fn day(&self, week: u32, day: u32) -> Option<&PlanDay> {
        self.days.get(&(week, day))
    }

    pub fn days(&self) -> impl Iterator<Item = &PlanDay> {
        self.days.values()
    }

    /// Appends a week of empty days after the current last week.
    pub fn add_week(&self) -> Self {
        let mut next = self.clone();
        let week = next.duration_weeks + 1;
        for day in 1..=DAYS_PER_WEEK {
            next.days.insert((week, day), PlanDay::empty(week, day));
        }
        next.duration_weeks = week;
        next
    }

    /// Drops a whole week and renumbers the later ones down by one, so
    /// week numbers stay dense and 1-based. A plan never shrinks below
    /// one week.
    pub fn remove_week(&self, week: u32) -> Self {
        if self.duration_weeks <= 1 || week == 0 || week > self.duration_weeks {
            return self.clone();
        }
        let mut next = self.clone();
        next.days = self
            .days
            .values()
            .filter(|d| d.week_number != week)
            .cloned()
            .map(|mut d| {
                if d.week_number > week {
                    d.week_number -= 1;
                }
                ((d.week_number, d.day_number), d)
            })
            .collect();
        next.duration_weeks = self.duration_weeks - 1;
        next
    }

    /// Appends a library exercise to a day with the default prescription.
    /// The same exercise may appear twice in one day; entries are
    /// addressed by position, not identity.
    pub fn add_exercise(&self, week: u32, day: u32, exercise: &Exercise) -> Self {
        let mut next = self.clone();
        let slot = next
            .days
            .entry((week, day))
            .or_insert_with(|| PlanDay::empty(week, day));
        slot.exercises.push(ExerciseEntry {
            id: None,
            exercise_id: exercise.id,
            exercise_name: exercise.name.clone(),
            sets: DEFAULT_SETS,
            reps: DEFAULT_REPS,
            rest_seconds: DEFAULT_REST_SECONDS,
            tempo: DEFAULT_TEMPO.to_string(),
            notes: None,
        });
        next
    }

    /// Patches one entry in place. An out-of-range index is a caller bug:
    /// the edit controls only exist for entries that are present.
    pub fn update_exercise(
        &self,
        week: u32,
        day: u32,
        index: usize,
        patch: impl FnOnce(&mut ExerciseEntry),
    ) -> Self {
        let mut next = self.clone();
        let entry = next
            .days
            .get_mut(&(week, day))
            .and_then(|d| d.exercises.get_mut(index));
        debug_assert!(entry.is_some(), "no exercise entry at that position");
        if let Some(entry) = entry {
            patch(entry);
        }
        next
    }

    /// Removes by position; later entries shift left.
    pub fn remove_exercise(&self, week: u32, day: u32, index: usize) -> Self {
        let mut next = self.clone();
        if let Some(slot) = next.days.get_mut(&(week, day)) {
            debug_assert!(
                index < slot.exercises.len(),
                "no exercise entry at that position"
            );
            if index < slot.exercises.len() {
                slot.exercises.remove(index);
            }
        }
        next
    }

    pub fn set_day_description(&self, week: u32, day: u32, text: &str) -> Self {
        let mut next = self.clone();
        let slot = next
            .days
            .entry((week, day))
            .or_insert_with(|| PlanDay::empty(week, day));
        slot.description = if text.trim().is_empty() {
            None
        } else {
            Some(text.to_string())
        };
        next
    }

    /// The body of the save call. Days without exercises and without a
    /// description are dropped — the server only persists days with
    /// content. Callers must not build a payload from a zero-week draft;
    /// `empty` and `remove_week` keep the count at 1 or above.
    pub fn build_save_payload(&self) -> PlanPayload {
        PlanPayload {
            name: self.name.clone(),
            description: self.description.clone(),
            duration_weeks: self.duration_weeks,
            days: self
                .days
                .values()
                .filter(|d| d.has_content())
                .cloned()
                .collect(),
        }
    }

    /// Duplicate-as-template: the same schedule with every server id
    /// stripped from the plan, its days and its entries, so saving it
    /// creates a fresh plan instead of colliding with the original.
    pub fn as_template(&self) -> Self {
        let mut next = self.clone();
        next.id = None;
        for day in next.days.values_mut() {
            day.id = None;
            for entry in &mut day.exercises {
                entry.id = None;
            }
        }
        next
    }
}

/// Tempo notation is four dash-separated second counts
/// (eccentric-pause-concentric-pause), e.g. "2-0-2-0" or "3-1-1-0".
pub fn is_valid_tempo(tempo: &str) -> bool {
    let mut parts = 0;
    for part in tempo.split('-') {
        if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
            return false;
        }
        parts += 1;
    }
    parts == 4
}

/// Client selection for a plan, tracked against the server-confirmed
/// assignments so that saving only touches the clients that changed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClientAssignmentSet {
    selected: BTreeSet<u32>,
    previously_assigned: BTreeSet<u32>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AssignmentDiff {
    pub to_assign: Vec<u32>,
    pub to_unassign: Vec<u32>,
}

impl AssignmentDiff {
    pub fn is_empty(&self) -> bool {
        self.to_assign.is_empty() && self.to_unassign.is_empty()
    }
}

impl ClientAssignmentSet {
    /// Seeds both sets from the server's client list at load time.
    pub fn from_assigned(ids: impl IntoIterator<Item = u32>) -> Self {
        let assigned: BTreeSet<u32> = ids.into_iter().collect();
        Self {
            selected: assigned.clone(),
            previously_assigned: assigned,
        }
    }

    pub fn toggle(&self, client_id: u32) -> Self {
        let mut next = self.clone();
        if !next.selected.remove(&client_id) {
            next.selected.insert(client_id);
        }
        next
    }

    pub fn is_selected(&self, client_id: u32) -> bool {
        self.selected.contains(&client_id)
    }

    pub fn selected_count(&self) -> usize {
        self.selected.len()
    }

    /// Who to assign and who to unassign relative to the confirmed state.
    /// Only meaningful once the plan itself has a persisted id, so the
    /// save flow calls this after the plan save succeeded.
    pub fn diff(&self) -> AssignmentDiff {
        AssignmentDiff {
            to_assign: self
                .selected
                .difference(&self.previously_assigned)
                .copied()
                .collect(),
            to_unassign: self
                .previously_assigned
                .difference(&self.selected)
                .copied()
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn library_exercise(id: u32, name: &str) -> Exercise {
        Exercise {
            id,
            name: name.to_string(),
            description: None,
            video_url: None,
        }
    }

    fn pairs(draft: &PlanDraft) -> Vec<(u32, u32)> {
        draft.days().map(|d| (d.week_number, d.day_number)).collect()
    }

    #[test]
    fn empty_draft_builds_full_grid() {
        for weeks in 1..=4 {
            let draft = PlanDraft::empty(weeks);
            assert_eq!(draft.duration_weeks, weeks);
            let pairs = pairs(&draft);
            assert_eq!(pairs.len(), (7 * weeks) as usize);
            let unique: BTreeSet<_> = pairs.iter().collect();
            assert_eq!(unique.len(), pairs.len());
        }
    }

    #[test]
    fn empty_draft_never_has_zero_weeks() {
        let draft = PlanDraft::empty(0);
        assert_eq!(draft.duration_weeks, 1);
        assert_eq!(draft.days().count(), 7);
    }

    #[test]
    fn add_then_remove_last_week_restores_grid() {
        let draft = PlanDraft::empty(2)
            .add_exercise(1, 3, &library_exercise(9, "Back Squat"));
        let before = pairs(&draft);

        let grown = draft.add_week();
        assert_eq!(grown.duration_weeks, 3);
        assert_eq!(grown.days().count(), 21);

        let back = grown.remove_week(grown.duration_weeks);
        assert_eq!(back.duration_weeks, 2);
        assert_eq!(pairs(&back), before);
        assert_eq!(back.day(1, 3).unwrap().exercises.len(), 1);
    }

    #[test]
    fn removing_interior_week_renumbers_later_weeks() {
        let draft = PlanDraft::empty(3)
            .add_exercise(1, 1, &library_exercise(1, "Deadlift"))
            .add_exercise(2, 2, &library_exercise(2, "Bench Press"))
            .add_exercise(3, 4, &library_exercise(3, "Pull Up"));

        let next = draft.remove_week(2);
        assert_eq!(next.duration_weeks, 2);
        // Week 1 untouched, week 3 became week 2.
        assert_eq!(next.day(1, 1).unwrap().exercises[0].exercise_name, "Deadlift");
        assert_eq!(next.day(2, 4).unwrap().exercises[0].exercise_name, "Pull Up");
        assert!(next.days().all(|d| d.week_number <= 2));
        assert_eq!(next.days().count(), 14);
    }

    #[test]
    fn remove_week_out_of_range_changes_nothing() {
        let draft = PlanDraft::empty(2);
        assert_eq!(draft.remove_week(0), draft);
        assert_eq!(draft.remove_week(3), draft);
    }

    #[test]
    fn last_remaining_week_cannot_be_removed() {
        let draft = PlanDraft::empty(1).add_exercise(1, 1, &library_exercise(1, "Deadlift"));
        let next = draft.remove_week(1);
        assert_eq!(next, draft);
        assert_eq!(next.duration_weeks, 1);
        assert_eq!(next.days().count(), 7);
    }

    #[test]
    fn added_exercise_gets_default_prescription() {
        let draft = PlanDraft::empty(1).add_exercise(1, 2, &library_exercise(5, "Row"));
        let entry = &draft.day(1, 2).unwrap().exercises[0];
        assert_eq!(entry.exercise_id, 5);
        assert_eq!(entry.sets, DEFAULT_SETS);
        assert_eq!(entry.reps, DEFAULT_REPS);
        assert_eq!(entry.rest_seconds, DEFAULT_REST_SECONDS);
        assert_eq!(entry.tempo, DEFAULT_TEMPO);
        assert!(entry.id.is_none());
    }

    #[test]
    fn duplicate_entries_edit_independently() {
        let squat = library_exercise(9, "Back Squat");
        let draft = PlanDraft::empty(1)
            .add_exercise(1, 1, &squat)
            .add_exercise(1, 1, &squat)
            .update_exercise(1, 1, 1, |e| e.sets = 5);
        let day = draft.day(1, 1).unwrap();
        assert_eq!(day.exercises[0].sets, DEFAULT_SETS);
        assert_eq!(day.exercises[1].sets, 5);
    }

    #[test]
    fn remove_exercise_shifts_later_entries_left() {
        let draft = PlanDraft::empty(1)
            .add_exercise(1, 1, &library_exercise(1, "A"))
            .add_exercise(1, 1, &library_exercise(2, "B"))
            .add_exercise(1, 1, &library_exercise(3, "C"))
            .remove_exercise(1, 1, 1);
        let names: Vec<_> = draft.day(1, 1).unwrap().exercises.iter()
            .map(|e| e.exercise_name.as_str())
            .collect();
        assert_eq!(names, ["A", "C"]);
    }

    #[test]
    fn payload_drops_days_without_content() {
        let draft = PlanDraft::empty(2)
            .add_exercise(1, 1, &library_exercise(1, "Deadlift"))
            .set_day_description(2, 5, "Mobility only");

        let payload = draft.build_save_payload();
        assert_eq!(payload.duration_weeks, 2);
        assert_eq!(payload.days.len(), 2);
        assert!(payload.days.iter().all(|d| d.has_content()));
    }

    #[test]
    fn blank_description_does_not_count_as_content() {
        let draft = PlanDraft::empty(1).set_day_description(1, 1, "   ");
        assert!(draft.build_save_payload().days.is_empty());
    }

    #[test]
    fn hydrate_restores_schedule_and_fills_empty_slots() {
        let plan = PlanDetail {
            id: 44,
            name: "Strength block".into(),
            description: "8 week base".into(),
            duration_weeks: 2,
            days: vec![PlanDay {
                id: Some(7),
                week_number: 1,
                day_number: 3,
                description: Some("Lower".into()),
                exercises: vec![ExerciseEntry {
                    id: Some(70),
                    exercise_id: 9,
                    exercise_name: "Back Squat".into(),
                    sets: 5,
                    reps: 5,
                    rest_seconds: 120,
                    tempo: "3-1-1-0".into(),
                    notes: Some("belt on top sets".into()),
                }],
            }],
            client_ids: vec![2, 3],
        };

        let draft = PlanDraft::hydrate(&plan);
        assert_eq!(draft.id, Some(44));
        assert_eq!(draft.days().count(), 14);
        let day = draft.day(1, 3).unwrap();
        assert_eq!(day.id, Some(7));
        assert_eq!(day.exercises[0].id, Some(70));
        assert!(draft.day(2, 7).unwrap().exercises.is_empty());
    }

    #[test]
    fn template_copy_strips_every_server_id() {
        let plan = PlanDetail {
            id: 44,
            name: "Strength block".into(),
            description: "8 week base".into(),
            duration_weeks: 1,
            days: vec![PlanDay {
                id: Some(7),
                week_number: 1,
                day_number: 1,
                description: Some("Lower".into()),
                exercises: vec![ExerciseEntry {
                    id: Some(70),
                    exercise_id: 9,
                    exercise_name: "Back Squat".into(),
                    sets: 5,
                    reps: 5,
                    rest_seconds: 120,
                    tempo: "3-1-1-0".into(),
                    notes: None,
                }],
            }],
            client_ids: vec![],
        };

        let template = PlanDraft::hydrate(&plan).as_template();
        assert_eq!(template.id, None);
        let day = template.day(1, 1).unwrap();
        assert_eq!(day.id, None);
        assert_eq!(day.exercises[0].id, None);
        // Values and ordering survive.
        assert_eq!(day.description.as_deref(), Some("Lower"));
        assert_eq!(day.exercises[0].sets, 5);
        assert_eq!(day.exercises[0].tempo, "3-1-1-0");
        assert_eq!(template.name, "Strength block");
    }

    #[test]
    fn tempo_notation_is_checked_strictly() {
        assert!(is_valid_tempo("2-0-2-0"));
        assert!(is_valid_tempo("3-1-1-0"));
        assert!(is_valid_tempo("10-0-2-0"));
        assert!(!is_valid_tempo("2-0-2"));
        assert!(!is_valid_tempo("2-0-2-0-1"));
        assert!(!is_valid_tempo("2-0-x-0"));
        assert!(!is_valid_tempo("2--2-0"));
        assert!(!is_valid_tempo(""));
    }

    #[test]
    fn assignment_diff_tracks_only_changes() {
        let set = ClientAssignmentSet::from_assigned([1, 2, 3])
            .toggle(3) // drop an existing client
            .toggle(5) // add a new one
            .toggle(6)
            .toggle(6); // add and remove again: no change

        let diff = set.diff();
        assert_eq!(diff.to_assign, vec![5]);
        assert_eq!(diff.to_unassign, vec![3]);
    }

    #[test]
    fn assignment_diff_set_algebra_holds() {
        let previously = [10u32, 20, 30];
        let set = ClientAssignmentSet::from_assigned(previously)
            .toggle(20)
            .toggle(40)
            .toggle(50);
        let diff = set.diff();

        for id in &diff.to_assign {
            assert!(!previously.contains(id));
        }
        for id in &diff.to_unassign {
            assert!(previously.contains(id));
            assert!(!set.is_selected(*id));
        }
    }

    #[test]
    fn unchanged_selection_yields_empty_diff() {
        let set = ClientAssignmentSet::from_assigned([1, 2]);
        assert!(set.diff().is_empty());
    }
}
