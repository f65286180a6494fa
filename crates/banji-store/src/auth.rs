//! Unified authentication.
//!
//! One `users` table covers students and teachers; each row links to
//! exactly one of the two people tables. The store never sees plaintext
//! passwords, only caller-computed hashes, and comparing hashes is all
//! [`login`] and [`check_password_hash`] do.

use rusqlite::{OptionalExtension, params};
use tracing::{debug, warn};

use crate::{Store, StoreError, StudentId, TeacherId, UserId, require, required_text, students, teachers};

/// The person behind a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Principal {
    /// A student account, by student id.
    Student(StudentId),
    /// A teacher account, by teacher id.
    Teacher(TeacherId),
}

/// Account status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    /// Account may log in.
    Active,
    /// Account is disabled; logins fail.
    Inactive,
}

impl UserStatus {
    /// The string stored in the status column.
    fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }
}

/// Interface preferences attached to a user account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    /// UI language tag, e.g. `zh-CN`.
    pub language: Option<String>,
    /// IANA timezone name.
    pub timezone: Option<String>,
    /// UI font size in points.
    pub font_size: Option<i64>,
}

/// Creates a user account linked to a student or teacher.
///
/// The linked person must exist and may hold at most one account (the
/// link columns are unique). New accounts start active.
pub fn register_user(
    store: &Store,
    principal: Principal,
    name: &str,
    password_hash: &str,
) -> Result<UserId, StoreError> {
    required_text("user name", name)?;
    required_text("password hash", password_hash)?;
    let (kind, student_id, teacher_id) = match principal {
        Principal::Student(id) => {
            students::require_student(store, id)?;
            ("student", Some(id), None)
        }
        Principal::Teacher(id) => {
            teachers::require_teacher(store, id)?;
            ("teacher", None, Some(id))
        }
    };
    store.conn().execute(
        "INSERT INTO users (name, kind, password_hash, student_id, teacher_id)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![name, kind, password_hash, student_id, teacher_id],
    )?;
    let id = store.conn().last_insert_rowid();
    debug!(id, kind, "user registered");
    Ok(id)
}

/// Verifies credentials and returns the account name on success.
///
/// `None` means wrong id, wrong hash, or an inactive account; the three
/// are deliberately indistinguishable to the caller.
pub fn login(store: &Store, user: UserId, password_hash: &str) -> Result<Option<String>, StoreError> {
    let name = store
        .conn()
        .query_row(
            "SELECT name FROM users
             WHERE id = ?1 AND password_hash = ?2 AND status = 'active'",
            params![user, password_hash],
            |row| row.get(0),
        )
        .optional()?;
    if name.is_none() {
        warn!(user, "login rejected");
    }
    Ok(name)
}

/// Replaces a user's password hash.
pub fn set_password_hash(store: &Store, user: UserId, hash: &str) -> Result<(), StoreError> {
    required_text("password hash", hash)?;
    let changed = store.conn().execute(
        "UPDATE users SET password_hash = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
        params![hash, user],
    )?;
    require(changed > 0, "user", user)
}

/// Compares a candidate hash against the stored one.
///
/// Unknown users compare unequal rather than erroring, so callers can
/// treat any `false` as a failed check.
pub fn check_password_hash(store: &Store, user: UserId, hash: &str) -> Result<bool, StoreError> {
    let stored: Option<String> = store
        .conn()
        .query_row(
            "SELECT password_hash FROM users WHERE id = ?1",
            [user],
            |row| row.get(0),
        )
        .optional()?;
    Ok(stored.as_deref() == Some(hash))
}

/// Activates or deactivates an account.
pub fn set_status(store: &Store, user: UserId, status: UserStatus) -> Result<(), StoreError> {
    let changed = store.conn().execute(
        "UPDATE users SET status = ?1, updated_at = CURRENT_TIMESTAMP WHERE id = ?2",
        params![status.as_str(), user],
    )?;
    require(changed > 0, "user", user)
}

/// Reads a user's interface preferences.
pub fn get_preferences(store: &Store, user: UserId) -> Result<Preferences, StoreError> {
    let prefs = store
        .conn()
        .query_row(
            "SELECT language, timezone, font_size FROM users WHERE id = ?1",
            [user],
            |row| {
                Ok(Preferences {
                    language: row.get(0)?,
                    timezone: row.get(1)?,
                    font_size: row.get(2)?,
                })
            },
        )
        .optional()?;
    prefs.ok_or(StoreError::MissingRow {
        entity: "user",
        id: user,
    })
}

/// Sets the UI language preference.
pub fn set_language(store: &Store, user: UserId, language: &str) -> Result<(), StoreError> {
    set_preference(store, user, "UPDATE users SET language = ?1 WHERE id = ?2", language)
}

/// Sets the timezone preference.
pub fn set_timezone(store: &Store, user: UserId, timezone: &str) -> Result<(), StoreError> {
    set_preference(store, user, "UPDATE users SET timezone = ?1 WHERE id = ?2", timezone)
}

/// Sets the font size preference.
pub fn set_font_size(store: &Store, user: UserId, size: i64) -> Result<(), StoreError> {
    if size <= 0 {
        return Err(StoreError::Invalid {
            field: "font size",
            reason: "must be positive",
        });
    }
    let changed = store.conn().execute(
        "UPDATE users SET font_size = ?1 WHERE id = ?2",
        params![size, user],
    )?;
    require(changed > 0, "user", user)
}

/// Shared update shape for the text preference columns.
fn set_preference(
    store: &Store,
    user: UserId,
    sql: &'static str,
    value: &str,
) -> Result<(), StoreError> {
    let changed = store.conn().execute(sql, params![value, user])?;
    require(changed > 0, "user", user)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::students::{self, NewStudent};
    use crate::teachers::{self, NewTeacher};

    fn fixture() -> (Store, StudentId, TeacherId) {
        let store = Store::open_in_memory().unwrap();
        let student = students::add_student(
            &store,
            &NewStudent {
                name: "李明",
                ..NewStudent::default()
            },
        )
        .unwrap();
        let teacher = teachers::add_teacher(
            &store,
            &NewTeacher {
                name: "王老师",
                ..NewTeacher::default()
            },
        )
        .unwrap();
        (store, student, teacher)
    }

    #[test]
    fn login_returns_the_name_for_active_matching_accounts() {
        let (store, student, _) = fixture();
        let user = register_user(&store, Principal::Student(student), "李明", "h1").unwrap();

        assert_eq!(login(&store, user, "h1").unwrap(), Some("李明".to_string()));
        assert_eq!(login(&store, user, "wrong").unwrap(), None);
        assert_eq!(login(&store, 99, "h1").unwrap(), None);
    }

    #[test]
    fn inactive_accounts_cannot_log_in() {
        let (store, student, _) = fixture();
        let user = register_user(&store, Principal::Student(student), "李明", "h1").unwrap();

        set_status(&store, user, UserStatus::Inactive).unwrap();
        assert_eq!(login(&store, user, "h1").unwrap(), None);

        set_status(&store, user, UserStatus::Active).unwrap();
        assert!(login(&store, user, "h1").unwrap().is_some());
    }

    #[test]
    fn password_hash_rotation() {
        let (store, _, teacher) = fixture();
        let user = register_user(&store, Principal::Teacher(teacher), "王老师", "old").unwrap();

        assert!(check_password_hash(&store, user, "old").unwrap());
        set_password_hash(&store, user, "new").unwrap();
        assert!(!check_password_hash(&store, user, "old").unwrap());
        assert!(check_password_hash(&store, user, "new").unwrap());
        // Unknown users compare unequal instead of erroring.
        assert!(!check_password_hash(&store, 99, "new").unwrap());
    }

    #[test]
    fn one_account_per_person() {
        let (store, student, _) = fixture();
        register_user(&store, Principal::Student(student), "李明", "h").unwrap();
        assert!(register_user(&store, Principal::Student(student), "李明", "h2").is_err());
    }

    #[test]
    fn unknown_principal_is_rejected() {
        let (store, _, _) = fixture();
        assert!(register_user(&store, Principal::Student(99), "x", "h").is_err());
        assert!(register_user(&store, Principal::Teacher(99), "x", "h").is_err());
    }

    #[test]
    fn preferences_default_to_unset_and_round_trip() {
        let (store, student, _) = fixture();
        let user = register_user(&store, Principal::Student(student), "李明", "h").unwrap();

        assert_eq!(get_preferences(&store, user).unwrap(), Preferences::default());

        set_language(&store, user, "zh-CN").unwrap();
        set_timezone(&store, user, "Asia/Shanghai").unwrap();
        set_font_size(&store, user, 14).unwrap();

        let prefs = get_preferences(&store, user).unwrap();
        assert_eq!(prefs.language.as_deref(), Some("zh-CN"));
        assert_eq!(prefs.timezone.as_deref(), Some("Asia/Shanghai"));
        assert_eq!(prefs.font_size, Some(14));
    }

    #[test]
    fn preference_writes_validate_user_and_value() {
        let (store, student, _) = fixture();
        let user = register_user(&store, Principal::Student(student), "李明", "h").unwrap();
        assert!(set_language(&store, 99, "en").is_err());
        assert!(set_font_size(&store, user, 0).is_err());
        assert!(get_preferences(&store, 99).is_err());
    }
}
