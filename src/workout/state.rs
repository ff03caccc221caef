use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::catalog::Activity;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum WorkoutStatus {
    #[default]
    Idle,
    Running,
    Paused,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSnapshot {
    pub status: WorkoutStatus,
    pub activity_id: Option<String>,
    pub activity_name: Option<String>,
    pub remaining_secs: u32,
    /// `remaining_secs` as `MM:SS`.
    pub display: String,
    pub exercises_completed: u32,
    pub started_at: Option<DateTime<Utc>>,
}

/// Renders seconds as a zero-padded `MM:SS` clock.
pub fn format_clock(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[derive(Debug, Clone, Default)]
pub struct WorkoutState {
    pub status: WorkoutStatus,
    pub activity: Option<Activity>,
    pub remaining_secs: u32,
    pub exercise_secs: u32,
    pub exercises_completed: u32,
    pub started_at: Option<DateTime<Utc>>,
}

impl WorkoutState {
    pub fn new(exercise_secs: u32) -> Self {
        Self {
            exercise_secs,
            ..Self::default()
        }
    }

    pub fn is_active(&self) -> bool {
        self.status != WorkoutStatus::Idle
    }

    pub fn activity_id(&self) -> Option<&str> {
        self.activity.as_ref().map(|a| a.id.as_str())
    }

    pub fn begin(&mut self, activity: Activity, started_at: DateTime<Utc>) {
        *self = Self {
            status: WorkoutStatus::Running,
            activity: Some(activity),
            remaining_secs: self.exercise_secs,
            exercise_secs: self.exercise_secs,
            exercises_completed: 0,
            started_at: Some(started_at),
        };
    }

    /// Counts one second down. Returns true when the exercise just ran out.
    pub fn tick(&mut self) -> bool {
        if self.status != WorkoutStatus::Running {
            return false;
        }
        self.remaining_secs = self.remaining_secs.saturating_sub(1);
        self.remaining_secs == 0
    }

    /// Moves on to `next` with a full countdown.
    pub fn advance(&mut self, next: Activity) {
        self.activity = Some(next);
        self.remaining_secs = self.exercise_secs;
        self.exercises_completed = self.exercises_completed.saturating_add(1);
        self.status = WorkoutStatus::Running;
    }

    pub fn pause(&mut self) -> bool {
        if self.status != WorkoutStatus::Running {
            return false;
        }
        self.status = WorkoutStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != WorkoutStatus::Paused {
            return false;
        }
        self.status = WorkoutStatus::Running;
        true
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.exercise_secs);
    }

    pub fn snapshot(&self) -> WorkoutSnapshot {
        WorkoutSnapshot {
            status: self.status,
            activity_id: self.activity.as_ref().map(|a| a.id.clone()),
            activity_name: self.activity.as_ref().map(|a| a.name.clone()),
            remaining_secs: self.remaining_secs,
            display: format_clock(self.remaining_secs),
            exercises_completed: self.exercises_completed,
            started_at: self.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    #[test]
    fn clock_is_zero_padded() {
        assert_eq!(format_clock(30), "00:30");
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
    }

    #[test]
    fn countdown_expires_on_last_second() {
        let mut state = WorkoutState::new(2);
        let started = Utc::now();
        state.begin(catalog::all()[0].clone(), started);
        assert_eq!(state.snapshot().display, "00:02");
        assert_eq!(state.snapshot().started_at, Some(started));

        assert!(!state.tick());
        assert!(state.tick());

        state.advance(catalog::all()[1].clone());
        assert_eq!(state.remaining_secs, 2);
        assert_eq!(state.exercises_completed, 1);
    }

    #[test]
    fn paused_state_does_not_tick() {
        let mut state = WorkoutState::new(5);
        state.begin(catalog::all()[0].clone(), Utc::now());
        assert!(state.pause());
        assert!(!state.pause());
        assert!(!state.tick());
        assert_eq!(state.remaining_secs, 5);

        assert!(state.resume());
        assert!(!state.resume());
        state.reset();
        assert_eq!(state.status, WorkoutStatus::Idle);
        assert!(state.snapshot().started_at.is_none());
        assert_eq!(state.exercise_secs, 5);
    }
}
