//! Recorded student questions and the prompt aggregator.
//!
//! Besides plain CRUD this module is the production [`PromptSource`]: the
//! report pipeline asks the store for a per-student snapshot of question
//! text and never sees a connection or any SQL. The snapshot keeps every
//! enrolled student as a key, so "asked nothing" is an empty sequence
//! rather than a missing entry, and the count query mirrors that with
//! zeros for quiet students.

use std::collections::BTreeMap;

use banji_analytics::{ClassId, Corpus, PromptSource, StudentId};
use rusqlite::params;
use tracing::error;

use crate::{QueryId, Store, StoreError, TeacherId, now_timestamp, required_text, students};

/// Fields for recording a question.
#[derive(Debug, Clone, Default)]
pub struct NewQuery<'a> {
    /// The asking student; must exist.
    pub student: StudentId,
    /// Teacher the question was directed at, if any.
    pub teacher: Option<TeacherId>,
    /// Class context, if any.
    pub class: Option<ClassId>,
    /// Question text, must be non-empty.
    pub question: &'a str,
    /// Recorded answer, if one was given.
    pub answer: Option<&'a str>,
    /// Ask time in the store's timestamp format; `None` means now.
    pub asked_at: Option<&'a str>,
}

/// Records one student question and returns the new row id.
pub fn add_query(store: &Store, new: &NewQuery<'_>) -> Result<QueryId, StoreError> {
    required_text("question", new.question)?;
    students::require_student(store, new.student)?;
    let asked_at = match new.asked_at {
        Some(time) => time.to_string(),
        None => now_timestamp(),
    };
    store.conn().execute(
        "INSERT INTO queries (student_id, teacher_id, class_id, question, answer, asked_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            new.student,
            new.teacher,
            new.class,
            new.question,
            new.answer,
            asked_at,
        ],
    )?;
    Ok(store.conn().last_insert_rowid())
}

/// Fills in the answer on a recorded question.
pub fn set_answer(store: &Store, id: QueryId, answer: &str) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "UPDATE queries SET answer = ?1 WHERE id = ?2",
        params![answer, id],
    )?;
    crate::require(changed > 0, "query", id)
}

/// Number of questions each enrolled student has asked.
///
/// Scoped to one class's roster when `class` is given, otherwise to every
/// enrolled student. The count covers all of a student's questions, not
/// only those tagged with the class; quiet students come back as zero.
pub fn query_counts(
    store: &Store,
    class: Option<ClassId>,
) -> Result<BTreeMap<StudentId, u64>, StoreError> {
    let mut counts = BTreeMap::new();
    for student in enrolled_students(store, class)? {
        counts.insert(student, 0u64);
    }
    let sql = "SELECT q.student_id, COUNT(q.id)
               FROM queries q
               GROUP BY q.student_id";
    let mut stmt = store.conn().prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok((row.get::<_, StudentId>(0)?, row.get::<_, u64>(1)?))
    })?;
    for row in rows {
        let (student, count) = row?;
        if let Some(slot) = counts.get_mut(&student) {
            *slot = count;
        }
    }
    Ok(counts)
}

/// Builds the prompt snapshot behind [`PromptSource`].
///
/// Every student on the roster gets a key first; question text is then
/// layered in, trimmed, with blank rows dropped. Rows are pulled in
/// `(student_id, id)` order so each student's prompts keep submission
/// order.
pub fn student_prompts(store: &Store, class: Option<ClassId>) -> Result<Corpus, StoreError> {
    let mut corpus = Corpus::new();
    for student in enrolled_students(store, class)? {
        corpus.add_student(student);
    }

    let sql = "SELECT q.student_id, q.question
               FROM queries q
               WHERE EXISTS (
                   SELECT 1 FROM enrollments e
                   WHERE e.student_id = q.student_id
                     AND (?1 IS NULL OR e.class_id = ?1)
               )
               ORDER BY q.student_id, q.id";
    let mut stmt = store.conn().prepare(sql)?;
    let rows = stmt.query_map(params![class], |row| {
        Ok((row.get::<_, StudentId>(0)?, row.get::<_, String>(1)?))
    })?;
    for row in rows {
        let (student, question) = row?;
        corpus.push_prompt(student, &question);
    }
    Ok(corpus)
}

/// Distinct enrolled students, ascending, optionally scoped to one class.
fn enrolled_students(
    store: &Store,
    class: Option<ClassId>,
) -> Result<Vec<StudentId>, StoreError> {
    let sql = "SELECT DISTINCT student_id FROM enrollments
               WHERE ?1 IS NULL OR class_id = ?1
               ORDER BY student_id";
    let mut stmt = store.conn().prepare(sql)?;
    let ids = stmt
        .query_map(params![class], |row| row.get(0))?
        .collect::<Result<_, _>>()?;
    Ok(ids)
}

impl PromptSource for Store {
    /// Fails silently: any storage error is logged and the pipeline gets
    /// an empty snapshot, which it treats as "nothing to report".
    fn student_prompts(&self, class: Option<ClassId>) -> Corpus {
        match student_prompts(self, class) {
            Ok(corpus) => corpus,
            Err(err) => {
                error!(?class, %err, "prompt snapshot failed; returning empty corpus");
                Corpus::new()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::classes::{self, NewClass};
    use crate::students::{self, NewStudent};

    fn seed(store: &Store, names: &[&str], class_name: &str) -> (Vec<StudentId>, ClassId) {
        let class = classes::add_class(
            store,
            &NewClass {
                name: class_name,
                ..NewClass::default()
            },
        )
        .unwrap();
        let ids = names
            .iter()
            .map(|name| {
                let id = students::add_student(
                    store,
                    &NewStudent {
                        name,
                        ..NewStudent::default()
                    },
                )
                .unwrap();
                classes::enroll(store, id, class).unwrap();
                id
            })
            .collect();
        (ids, class)
    }

    #[test]
    fn add_query_defaults_the_timestamp() {
        let store = Store::open_in_memory().unwrap();
        let (ids, class) = seed(&store, &["a"], "math");
        let query = add_query(
            &store,
            &NewQuery {
                student: ids[0],
                class: Some(class),
                question: "一元二次方程怎么解",
                ..NewQuery::default()
            },
        )
        .unwrap();
        let asked_at: String = store
            .conn()
            .query_row("SELECT asked_at FROM queries WHERE id = ?1", [query], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(asked_at.len(), 19);
    }

    #[test]
    fn blank_questions_are_rejected() {
        let store = Store::open_in_memory().unwrap();
        let (ids, _) = seed(&store, &["a"], "math");
        let err = add_query(
            &store,
            &NewQuery {
                student: ids[0],
                question: "  ",
                ..NewQuery::default()
            },
        )
        .unwrap_err();
        assert!(matches!(err, StoreError::Invalid { .. }));
    }

    #[test]
    fn snapshot_keeps_quiet_students_with_empty_lists() {
        let store = Store::open_in_memory().unwrap();
        let (ids, class) = seed(&store, &["asker", "quiet"], "math");
        add_query(
            &store,
            &NewQuery {
                student: ids[0],
                class: Some(class),
                question: "  二次函数图像  ",
                ..NewQuery::default()
            },
        )
        .unwrap();

        let corpus = student_prompts(&store, Some(class)).unwrap();
        assert_eq!(corpus.student_count(), 2);
        assert_eq!(
            corpus.prompts(ids[0]),
            Some(&["二次函数图像".to_string()][..])
        );
        assert_eq!(corpus.prompts(ids[1]), Some(&[][..]));
    }

    #[test]
    fn snapshot_restricts_to_the_requested_class() {
        let store = Store::open_in_memory().unwrap();
        let (math_ids, math) = seed(&store, &["m"], "math");
        let (art_ids, art) = seed(&store, &["p"], "art");
        add_query(
            &store,
            &NewQuery {
                student: art_ids[0],
                class: Some(art),
                question: "透视怎么画",
                ..NewQuery::default()
            },
        )
        .unwrap();

        let corpus = student_prompts(&store, Some(math)).unwrap();
        assert_eq!(corpus.student_count(), 1);
        assert!(corpus.prompts(math_ids[0]).is_some());
        assert!(corpus.prompts(art_ids[0]).is_none());

        let all = student_prompts(&store, None).unwrap();
        assert_eq!(all.student_count(), 2);
    }

    #[test]
    fn unenrolled_students_never_appear() {
        let store = Store::open_in_memory().unwrap();
        let (_, class) = seed(&store, &["enrolled"], "math");
        let loner = students::add_student(
            &store,
            &NewStudent {
                name: "loner",
                ..NewStudent::default()
            },
        )
        .unwrap();
        add_query(
            &store,
            &NewQuery {
                student: loner,
                question: "hello",
                ..NewQuery::default()
            },
        )
        .unwrap();

        let corpus = student_prompts(&store, Some(class)).unwrap();
        assert!(corpus.prompts(loner).is_none());
    }

    #[test]
    fn counts_are_zero_for_quiet_students() {
        let store = Store::open_in_memory().unwrap();
        let (ids, class) = seed(&store, &["asker", "quiet"], "math");
        for question in ["q1", "q2", "q3"] {
            add_query(
                &store,
                &NewQuery {
                    student: ids[0],
                    class: Some(class),
                    question,
                    ..NewQuery::default()
                },
            )
            .unwrap();
        }

        let counts = query_counts(&store, Some(class)).unwrap();
        assert_eq!(counts.get(&ids[0]), Some(&3));
        assert_eq!(counts.get(&ids[1]), Some(&0));
    }

    #[test]
    fn prompt_source_impl_matches_direct_query() {
        let store = Store::open_in_memory().unwrap();
        let (ids, class) = seed(&store, &["a"], "math");
        add_query(
            &store,
            &NewQuery {
                student: ids[0],
                class: Some(class),
                question: "函数的定义域怎么求",
                ..NewQuery::default()
            },
        )
        .unwrap();

        let via_trait = PromptSource::student_prompts(&store, Some(class));
        let direct = student_prompts(&store, Some(class)).unwrap();
        assert_eq!(via_trait, direct);
    }

    #[test]
    fn set_answer_round_trips() {
        let store = Store::open_in_memory().unwrap();
        let (ids, _) = seed(&store, &["a"], "math");
        let query = add_query(
            &store,
            &NewQuery {
                student: ids[0],
                question: "why",
                ..NewQuery::default()
            },
        )
        .unwrap();
        set_answer(&store, query, "because").unwrap();
        let answer: String = store
            .conn()
            .query_row("SELECT answer FROM queries WHERE id = ?1", [query], |r| {
                r.get(0)
            })
            .unwrap();
        assert_eq!(answer, "because");
        assert!(set_answer(&store, 999, "x").is_err());
    }
}
