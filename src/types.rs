use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub role: UserRole,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Trainer,
    Client,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AuthSession {
    pub access_token: String,
    pub user: AuthUser,
}

/// One entry of the trainer's exercise library.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Exercise {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: u32,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl Client {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// One exercise assignment inside a plan day. `id` is server-assigned and
/// absent on entries that have never been saved.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ExerciseEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub exercise_id: u32,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    pub rest_seconds: u32,
    /// Eccentric-pause-concentric-pause, e.g. "2-0-2-0".
    pub tempo: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanDay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    pub week_number: u32,
    pub day_number: u32,
    #[serde(default)]
    pub description: Option<String>,
    pub exercises: Vec<ExerciseEntry>,
}

impl PlanDay {
    pub fn empty(week_number: u32, day_number: u32) -> Self {
        Self {
            id: None,
            week_number,
            day_number,
            description: None,
            exercises: Vec::new(),
        }
    }

    /// A day is persisted only when it carries exercises or a description.
    pub fn has_content(&self) -> bool {
        !self.exercises.is_empty()
            || self.description.as_deref().is_some_and(|d| !d.trim().is_empty())
    }
}

/// Row of the plan list.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanSummary {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub duration_weeks: u32,
    pub assigned_clients: u32,
}

/// Full plan as returned by the detail endpoint, including the ids of the
/// clients it is currently assigned to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanDetail {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub duration_weeks: u32,
    pub days: Vec<PlanDay>,
    #[serde(default)]
    pub client_ids: Vec<u32>,
}

/// Body of the save-plan call, produced by the editor.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlanPayload {
    pub name: String,
    pub description: String,
    pub duration_weeks: u32,
    pub days: Vec<PlanDay>,
}

/// One exercise instance of today's workout. `log_id` identifies the
/// server-side log entry that completion and difficulty calls target.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SessionExercise {
    pub log_id: u32,
    pub exercise_name: String,
    pub sets: u32,
    pub reps: u32,
    pub rest_seconds: u32,
    pub tempo: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub video_url: Option<String>,
}

/// Payload of the today-endpoint: either a training day or a rest day.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TodayWorkout {
    Rest {
        rest: bool,
        next_training_date: Option<String>,
    },
    Training {
        plan_name: String,
        week: u32,
        day: u32,
        exercises: Vec<SessionExercise>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct SessionSummary {
    pub done: u32,
    pub total: u32,
    pub progress: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AppView {
    Login,
    Register,
    Dashboard,
    Clients,
    Exercises,
    Plans,
    PlanBuilder(PlanBuilderMode),
    Workout,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PlanBuilderMode {
    New,
    Edit(u32),
    /// Duplicate-as-template: load a plan, strip its ids, save as new.
    Copy(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn today_payload_classifies_a_rest_day() {
        let json = r#"{"rest": true, "next_training_date": "2026-08-27"}"#;
        let today: TodayWorkout = serde_json::from_str(json).unwrap();
        match today {
            TodayWorkout::Rest { rest, next_training_date } => {
                assert!(rest);
                assert_eq!(next_training_date.as_deref(), Some("2026-08-27"));
            }
            other => panic!("expected a rest day, got {other:?}"),
        }
    }

    #[test]
    fn today_payload_classifies_a_training_day() {
        let json = r#"{
            "plan_name": "Strength block",
            "week": 2,
            "day": 4,
            "exercises": [{
                "log_id": 301,
                "exercise_name": "Back Squat",
                "sets": 5,
                "reps": 5,
                "rest_seconds": 120,
                "tempo": "3-1-1-0",
                "video_url": "https://videos.example.com/squat"
            }]
        }"#;
        let today: TodayWorkout = serde_json::from_str(json).unwrap();
        match today {
            TodayWorkout::Training { plan_name, week, day, exercises } => {
                assert_eq!(plan_name, "Strength block");
                assert_eq!((week, day), (2, 4));
                assert_eq!(exercises[0].log_id, 301);
                assert_eq!(exercises[0].notes, None);
            }
            other => panic!("expected a training day, got {other:?}"),
        }
    }

    #[test]
    fn unsaved_entries_serialize_without_an_id_field() {
        let entry = ExerciseEntry {
            id: None,
            exercise_id: 9,
            exercise_name: "Back Squat".into(),
            sets: 3,
            reps: 10,
            rest_seconds: 60,
            tempo: "2-0-2-0".into(),
            notes: None,
        };
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("\"id\""));
        assert!(json.contains("\"exercise_id\":9"));
    }
}
