//! Aggregate progress of a learner through a course.

use serde::Serialize;

use super::ModuleProgress;

/// Summary of a learner's standing in one course.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CourseProgress {
    pub total_modules: u32,
    pub completed_modules: u32,
    /// Module number the learner should work on next; 0 for an empty course.
    pub current_module: u32,
    /// Completed share of the course, 0.0 to 100.0.
    pub overall_progress: f64,
}

impl CourseProgress {
    /// Computes the summary from a course's module count and the learner's
    /// stored records, in a single pass over the records.
    pub fn compute(total_modules: u32, records: &[ModuleProgress]) -> Self {
        let mut completed_modules = 0u32;
        let mut first_open: Option<u32> = None;
        for record in records {
            if record.is_completed() {
                completed_modules += 1;
            } else if record.is_unlocked() {
                first_open = Some(first_open.map_or(record.module_number(), |n| {
                    n.min(record.module_number())
                }));
            }
        }
        let completed_modules = completed_modules.min(total_modules);

        let current_module = match first_open {
            Some(number) => number,
            None if completed_modules < total_modules => completed_modules + 1,
            None => total_modules,
        };

        let overall_progress = if total_modules == 0 {
            0.0
        } else {
            f64::from(completed_modules) / f64::from(total_modules) * 100.0
        };

        Self {
            total_modules,
            completed_modules,
            current_module,
            overall_progress,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.total_modules > 0 && self.completed_modules == self.total_modules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CourseId, Timestamp};
    use crate::domain::progression::progress::fixtures::{learner, position};
    use crate::domain::progression::Score;

    fn completed(course: CourseId, number: u32) -> ModuleProgress {
        let mut p = ModuleProgress::unlocked_by_cascade(learner(), &position(course, number), Timestamp::now());
        p.record_attempt(Score::new(5, 5), true, Timestamp::now());
        p
    }

    fn open(course: CourseId, number: u32) -> ModuleProgress {
        ModuleProgress::unlocked_by_cascade(learner(), &position(course, number), Timestamp::now())
    }

    #[test]
    fn empty_course_reports_zero() {
        let progress = CourseProgress::compute(0, &[]);
        assert_eq!(progress.overall_progress, 0.0);
        assert_eq!(progress.current_module, 0);
        assert!(!progress.is_finished());
    }

    #[test]
    fn no_records_points_at_first_module() {
        let progress = CourseProgress::compute(5, &[]);
        assert_eq!(progress.completed_modules, 0);
        assert_eq!(progress.current_module, 1);
    }

    #[test]
    fn current_is_first_unlocked_incomplete() {
        let course = CourseId::new();
        let records = vec![completed(course, 1), open(course, 3), open(course, 2)];
        let progress = CourseProgress::compute(5, &records);
        assert_eq!(progress.completed_modules, 1);
        assert_eq!(progress.current_module, 2);
        assert!((progress.overall_progress - 20.0).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_next_after_completed() {
        let course = CourseId::new();
        let records = vec![completed(course, 1), completed(course, 2)];
        let progress = CourseProgress::compute(4, &records);
        assert_eq!(progress.current_module, 3);
        assert!((progress.overall_progress - 50.0).abs() < 1e-9);
    }

    #[test]
    fn finished_course_stays_on_last_module() {
        let course = CourseId::new();
        let records: Vec<_> = (1..=3).map(|n| completed(course, n)).collect();
        let progress = CourseProgress::compute(3, &records);
        assert_eq!(progress.current_module, 3);
        assert!((progress.overall_progress - 100.0).abs() < 1e-9);
        assert!(progress.is_finished());
    }

    #[test]
    fn partial_percent_is_not_rounded() {
        let course = CourseId::new();
        let progress = CourseProgress::compute(3, &[completed(course, 1)]);
        assert!((progress.overall_progress - 100.0 / 3.0).abs() < 1e-9);
    }
}
