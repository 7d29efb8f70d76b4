use std::collections::HashMap;

use crate::Database;
use crate::models::{NewReportRow, ProfileUpdate, ReportRow, UserRow, VoteToggle};
use anyhow::Result;
use rusqlite::Connection;
use rusqlite::types::ToSql;

const REPORT_SELECT: &str = "
    SELECT r.id, r.user_id, r.title, r.description, r.category, r.status, r.priority,
           r.lat, r.lng, r.address, r.upvotes, r.comments_count, r.created_at, r.updated_at,
           u.name, u.avatar,
           EXISTS(SELECT 1 FROM votes v WHERE v.report_id = r.id AND v.user_id = :viewer)
    FROM reports r
    LEFT JOIN users u ON r.user_id = u.id";

const NEWEST_FIRST: &str = "ORDER BY r.created_at DESC";

/// The reports a read covers. Report rows and their images are selected
/// with the same filter so image lookups never grow with the result set.
#[derive(Debug, Clone, Copy)]
enum Scope<'a> {
    One(&'a str),
    OwnedBy(&'a str),
    All,
}

impl Scope<'_> {
    fn filter(&self) -> &'static str {
        match self {
            Scope::One(_) => "WHERE r.id = :scope",
            Scope::OwnedBy(_) => "WHERE r.user_id = :scope",
            Scope::All => "",
        }
    }

    fn params(&self) -> Vec<(&'static str, &dyn ToSql)> {
        match self {
            Scope::One(key) | Scope::OwnedBy(key) => vec![(":scope", key as &dyn ToSql)],
            Scope::All => Vec::new(),
        }
    }
}

impl Database {
    // -- Users --

    pub fn create_user(&self, user: &UserRow) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, email, name, phone, address, avatar, joined_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    user.id,
                    user.email,
                    user.name,
                    user.phone,
                    user.address,
                    user.avatar,
                    user.joined_at
                ],
            )?;
            Ok(())
        })
    }

    pub fn get_user(&self, id: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user(conn, id))
    }

    pub fn user_exists(&self, id: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let exists = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE id = ?1)",
                [id],
                |row| row.get(0),
            )?;
            Ok(exists)
        })
    }

    pub fn count_users(&self) -> Result<i64> {
        self.with_conn(|conn| {
            let n = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(n)
        })
    }

    /// Overwrites the editable profile fields. The email must stay unique.
    pub fn update_user(&self, user: &UserRow) -> Result<ProfileUpdate> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let taken: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1 AND id != ?2)",
                rusqlite::params![user.email, user.id],
                |row| row.get(0),
            )?;
            if taken {
                return Ok(ProfileUpdate::EmailTaken);
            }

            let changed = tx.execute(
                "UPDATE users SET email = ?2, name = ?3, phone = ?4, address = ?5, avatar = ?6
                 WHERE id = ?1",
                rusqlite::params![
                    user.id,
                    user.email,
                    user.name,
                    user.phone,
                    user.address,
                    user.avatar
                ],
            )?;
            tx.commit()?;

            Ok(if changed == 0 {
                ProfileUpdate::NotFound
            } else {
                ProfileUpdate::Updated
            })
        })
    }

    // -- Reports --

    pub fn insert_report(&self, report: &NewReportRow<'_>) -> Result<()> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;
            tx.execute(
                "INSERT INTO reports (id, user_id, title, description, category, status, priority,
                                      lat, lng, address, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?11)",
                rusqlite::params![
                    report.id,
                    report.user_id,
                    report.title,
                    report.description,
                    report.category,
                    report.status,
                    report.priority,
                    report.lat,
                    report.lng,
                    report.address,
                    report.created_at
                ],
            )?;
            for (position, reference) in report.images.iter().enumerate() {
                tx.execute(
                    "INSERT INTO report_images (report_id, position, reference) VALUES (?1, ?2, ?3)",
                    rusqlite::params![report.id, position as i64, reference],
                )?;
            }
            tx.commit()?;
            Ok(())
        })
    }

    /// One report as seen by `viewer_id`.
    pub fn get_report(&self, id: &str, viewer_id: &str) -> Result<Option<ReportRow>> {
        self.with_conn(|conn| {
            let mut rows = query_reports(conn, Scope::One(id), viewer_id, "")?;
            Ok(rows.pop())
        })
    }

    /// Reports owned by `user_id`, newest first.
    pub fn get_reports_by_user(&self, user_id: &str, viewer_id: &str) -> Result<Vec<ReportRow>> {
        self.with_conn(|conn| {
            query_reports(conn, Scope::OwnedBy(user_id), viewer_id, NEWEST_FIRST)
        })
    }

    /// Every report from every user, newest first.
    pub fn get_community_reports(&self, viewer_id: &str) -> Result<Vec<ReportRow>> {
        self.with_conn(|conn| query_reports(conn, Scope::All, viewer_id, NEWEST_FIRST))
    }

    /// Moves a report to `to` only if it is still in `from`.
    /// Returns false when the report is gone or was moved concurrently.
    pub fn set_status(&self, id: &str, from: &str, to: &str, updated_at: &str) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE reports SET status = ?3, updated_at = ?4 WHERE id = ?1 AND status = ?2",
                rusqlite::params![id, from, to, updated_at],
            )?;
            Ok(changed > 0)
        })
    }

    // -- Votes --

    /// Toggle a vote: removes the (report, user) row if present, inserts it
    /// if not, and moves the report's counter with it.
    /// Returns None when the report does not exist.
    pub fn toggle_vote(
        &self,
        report_id: &str,
        user_id: &str,
        voted_at: &str,
    ) -> Result<Option<VoteToggle>> {
        self.with_conn_mut(|conn| {
            let tx = conn.transaction()?;

            let upvotes: Option<i64> = tx
                .query_row("SELECT upvotes FROM reports WHERE id = ?1", [report_id], |row| {
                    row.get(0)
                })
                .optional()?;
            let Some(upvotes) = upvotes else {
                return Ok(None);
            };

            let removed = tx.execute(
                "DELETE FROM votes WHERE report_id = ?1 AND user_id = ?2",
                rusqlite::params![report_id, user_id],
            )?;

            let added = removed == 0;
            let upvotes = if added {
                tx.execute(
                    "INSERT INTO votes (report_id, user_id, voted_at) VALUES (?1, ?2, ?3)",
                    rusqlite::params![report_id, user_id, voted_at],
                )?;
                tx.execute(
                    "UPDATE reports SET upvotes = upvotes + 1 WHERE id = ?1",
                    [report_id],
                )?;
                upvotes + 1
            } else {
                tx.execute(
                    "UPDATE reports SET upvotes = upvotes - 1 WHERE id = ?1 AND upvotes > 0",
                    [report_id],
                )?;
                (upvotes - 1).max(0)
            };

            tx.commit()?;
            Ok(Some(VoteToggle { added, upvotes }))
        })
    }
}

fn query_user(conn: &Connection, id: &str) -> Result<Option<UserRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, email, name, phone, address, avatar, joined_at FROM users WHERE id = ?1",
    )?;

    let row = stmt
        .query_row([id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                email: row.get(1)?,
                name: row.get(2)?,
                phone: row.get(3)?,
                address: row.get(4)?,
                avatar: row.get(5)?,
                joined_at: row.get(6)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_reports(
    conn: &Connection,
    scope: Scope<'_>,
    viewer_id: &str,
    order: &str,
) -> Result<Vec<ReportRow>> {
    let sql = format!("{REPORT_SELECT} {} {order}", scope.filter());
    let mut stmt = conn.prepare(&sql)?;

    let mut params = scope.params();
    params.push((":viewer", &viewer_id as &dyn ToSql));

    let mut rows = stmt
        .query_map(params.as_slice(), |row| {
            Ok(ReportRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                title: row.get(2)?,
                description: row.get(3)?,
                category: row.get(4)?,
                status: row.get(5)?,
                priority: row.get(6)?,
                lat: row.get(7)?,
                lng: row.get(8)?,
                address: row.get(9)?,
                upvotes: row.get(10)?,
                comments_count: row.get(11)?,
                created_at: row.get(12)?,
                updated_at: row.get(13)?,
                author_name: row
                    .get::<_, Option<String>>(14)?
                    .unwrap_or_else(|| "unknown".to_string()),
                author_avatar: row.get(15)?,
                is_upvoted: row.get(16)?,
                images: vec![],
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    if rows.is_empty() {
        return Ok(rows);
    }
    let mut images = query_images(conn, scope)?;
    for row in &mut rows {
        if let Some(refs) = images.remove(&row.id) {
            row.images = refs;
        }
    }

    Ok(rows)
}

/// Image references of every report in `scope`, in upload order.
fn query_images(conn: &Connection, scope: Scope<'_>) -> Result<HashMap<String, Vec<String>>> {
    let sql = format!(
        "SELECT i.report_id, i.reference FROM report_images i
         JOIN reports r ON r.id = i.report_id
         {}
         ORDER BY i.report_id, i.position",
        scope.filter()
    );

    let mut stmt = conn.prepare(&sql)?;
    let params = scope.params();
    let mut by_report: HashMap<String, Vec<String>> = HashMap::new();

    let rows = stmt.query_map(params.as_slice(), |row| {
        Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
    })?;
    for row in rows {
        let (report_id, reference) = row?;
        by_report.entry(report_id).or_default().push(reference);
    }

    Ok(by_report)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
