//! Job repository: dedup-aware persistence for discovered postings.
//!
//! The `jobs` table keys postings by `(company, title, location, link)`.
//! That unique index, not the application, is the authoritative guard
//! against duplicates.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::{Row, SqlitePool};

use crate::domain::models::{JobRecord, StoredJob};

pub struct JobRepository {
    pool: SqlitePool,
}

impl JobRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the candidates that have not been seen before and return
    /// exactly that subset, stamped as seen.
    ///
    /// The whole batch runs in one transaction: either every new posting is
    /// recorded or none is. Inserting with ON CONFLICT against the natural
    /// key means a concurrent writer cannot slip a duplicate past a
    /// check-then-insert gap. Calling twice with the same input returns the
    /// full subset first and an empty one after.
    pub async fn filter_new(&self, candidates: &[JobRecord]) -> Result<Vec<JobRecord>> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .context("Failed to begin job batch transaction")?;
        let now = Utc::now().to_rfc3339();
        let mut new_jobs = Vec::new();

        for job in candidates {
            let result = sqlx::query(
                r#"
                INSERT INTO jobs (company, title, location, description, link, date_posted)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                ON CONFLICT (company, title, location, link) DO NOTHING
                "#,
            )
            .bind(&job.company)
            .bind(&job.title)
            .bind(&job.location)
            .bind(&job.description)
            .bind(&job.link)
            .bind(&now)
            .execute(&mut *tx)
            .await
            .context("Failed to insert job")?;

            if result.rows_affected() > 0 {
                new_jobs.push(job.clone());
            }
        }

        tx.commit()
            .await
            .context("Failed to commit job batch")?;

        tracing::info!(
            candidates = candidates.len(),
            new = new_jobs.len(),
            "Recorded new jobs"
        );
        Ok(new_jobs)
    }

    /// Total number of postings ever recorded.
    pub async fn count(&self) -> Result<i64> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM jobs")
            .fetch_one(&self.pool)
            .await
            .context("Failed to count jobs")?;
        Ok(row.get("n"))
    }

    /// Most recently recorded postings, newest first.
    pub async fn recent(&self, limit: i64) -> Result<Vec<StoredJob>> {
        let rows = sqlx::query(
            r#"
            SELECT id, company, title, location, description, link, date_posted
            FROM jobs
            ORDER BY id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .context("Failed to fetch recent jobs")?;

        Ok(rows
            .into_iter()
            .map(|row| StoredJob {
                id: row.get("id"),
                company: row.get("company"),
                title: row.get("title"),
                location: row.get("location"),
                description: row.get("description"),
                link: row.get("link"),
                date_posted: parse_datetime(row.get("date_posted")),
            })
            .collect())
    }
}

fn parse_datetime(s: String) -> chrono::DateTime<Utc> {
    chrono::DateTime::parse_from_rfc3339(&s)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}
