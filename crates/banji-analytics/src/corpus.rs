//! Per-student prompt snapshots.
//!
//! A [`Corpus`] is the unit of work handed to the ranking stages: every
//! prompt a set of students has submitted, keyed by student id. It is a
//! plain value type so that ranking and rendering can be tested without a
//! database behind them.

use std::collections::BTreeMap;

/// Identifier for a student row.
pub type StudentId = i64;

/// Identifier for a class row.
pub type ClassId = i64;

/// Prompt text collected per student, for one class or the whole school.
///
/// Students are kept in ascending id order so downstream text assembly is
/// deterministic. A student with no prompts stays in the snapshot with an
/// empty sequence; stored prompts are always trimmed and non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    /// Prompt sequences keyed by student id.
    students: BTreeMap<StudentId, Vec<String>>,
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ensures a student entry exists without recording any prompt.
    pub fn add_student(&mut self, student: StudentId) {
        self.students.entry(student).or_default();
    }

    /// Appends one prompt to a student's sequence.
    ///
    /// The prompt is trimmed first and dropped entirely if nothing remains.
    /// The student entry is created if it does not exist yet.
    pub fn push_prompt(&mut self, student: StudentId, prompt: &str) {
        let entry = self.students.entry(student).or_default();
        let trimmed = prompt.trim();
        if !trimmed.is_empty() {
            entry.push(trimmed.to_string());
        }
    }

    /// Returns one student's prompts, or `None` if the student is absent.
    pub fn prompts(&self, student: StudentId) -> Option<&[String]> {
        self.students.get(&student).map(Vec::as_slice)
    }

    /// Number of students in the snapshot, promptless ones included.
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    /// Total number of prompts across all students.
    pub fn prompt_count(&self) -> usize {
        self.students.values().map(Vec::len).sum()
    }

    /// Returns true if no student has any prompt text.
    pub fn is_empty(&self) -> bool {
        self.students.values().all(Vec::is_empty)
    }

    /// Iterates `(student, prompts)` pairs in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = (StudentId, &[String])> {
        self.students
            .iter()
            .map(|(id, prompts)| (*id, prompts.as_slice()))
    }

    /// Joins every prompt into one space-separated analysis string.
    ///
    /// Concatenation runs in ascending student id order and preserves each
    /// student's own submission order, so the same snapshot always yields
    /// the same text.
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for prompts in self.students.values() {
            for prompt in prompts {
                if !text.is_empty() {
                    text.push(' ');
                }
                text.push_str(prompt);
            }
        }
        text
    }
}

impl FromIterator<(StudentId, Vec<String>)> for Corpus {
    fn from_iter<I: IntoIterator<Item = (StudentId, Vec<String>)>>(iter: I) -> Self {
        let mut corpus = Self::new();
        for (student, prompts) in iter {
            corpus.add_student(student);
            for prompt in &prompts {
                corpus.push_prompt(student, prompt);
            }
        }
        corpus
    }
}

/// Source of per-student prompt snapshots.
///
/// Implemented by the SQLite store in production and by in-memory fixtures
/// in tests. Implementations must not panic: when the backing store fails,
/// they log the failure and return an empty corpus so that report
/// generation degrades to a no-op instead of taking the caller down.
pub trait PromptSource {
    /// Collects prompts for students enrolled in `class`, or for every
    /// enrolled student when `class` is `None`.
    fn student_prompts(&self, class: Option<ClassId>) -> Corpus;
}
