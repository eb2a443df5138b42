use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Pool, Postgres, Row};

use crate::config::DatabaseConfig;
use crate::database::{Backend, STUDENT_ROLE};
use crate::error::BackendError;
use crate::model::{enrollment::Enrollment, profile::Profile};

pub struct PgBackend {
    pool: Pool<Postgres>,
}

impl PgBackend {
    /// Connects and makes sure the `profiles` and `enrollments` tables exist.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, String> {
        let url = config.url()?;

        let pool = match PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&url)
            .await
        {
            Ok(p) => p,
            Err(e) => {
                return Err(format!("Could not connect to {}: {e}", config.host));
            }
        };

        init_schema(&pool).await?;

        Ok(Self { pool })
    }
}

async fn init_schema(pool: &Pool<Postgres>) -> Result<(), String> {
    let mut transaction = match pool.begin().await {
        Ok(t) => t,
        Err(e) => return Err(format!("Could not begin schema transaction: {e}")),
    };

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS profiles(
            id TEXT PRIMARY KEY,
            full_name TEXT,
            email TEXT NOT NULL,
            avatar_url TEXT,
            role TEXT NOT NULL DEFAULT 'student'
        );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Could not create table profiles: {e}"));
    }

    if let Err(e) = sqlx::query(
        "CREATE TABLE IF NOT EXISTS enrollments(
            course_id BIGINT NOT NULL,
            user_id TEXT REFERENCES profiles (id) ON UPDATE CASCADE ON DELETE CASCADE,
            CONSTRAINT enrollments_pkey PRIMARY KEY (course_id, user_id)
        );",
    )
    .execute(&mut *transaction)
    .await
    {
        return Err(format!("Could not create table enrollments: {e}"));
    }

    if let Err(e) = transaction.commit().await {
        return Err(format!("Could not commit table-creation transaction: {e}"));
    }

    Ok(())
}

fn profile_from_row(row: &PgRow) -> Result<Profile, sqlx::Error> {
    Ok(Profile {
        id: row.try_get("id")?,
        full_name: row.try_get("full_name")?,
        email: row.try_get("email")?,
        avatar_url: row.try_get("avatar_url")?,
    })
}

/// Escapes LIKE metacharacters so the user's text only matches literally.
fn like_pattern(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len() + 2);
    escaped.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

#[async_trait]
impl Backend for PgBackend {
    async fn fetch_enrolled(&self, course_id: i64) -> Result<Vec<Profile>, BackendError> {
        let rows = sqlx::query(
            "SELECT p.id, COALESCE(p.full_name, '') AS full_name, p.email, p.avatar_url
            FROM enrollments e
            JOIN profiles p ON p.id = e.user_id
            WHERE e.course_id = $1;",
        )
        .bind(course_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(profile_from_row).collect::<Result<Vec<_>, _>>()?)
    }

    async fn search_students(
        &self,
        email_fragment: &str,
        limit: usize,
    ) -> Result<Vec<Profile>, BackendError> {
        let rows = sqlx::query(
            "SELECT id, COALESCE(full_name, '') AS full_name, email, avatar_url
            FROM profiles
            WHERE role = $1 AND email ILIKE $2
            LIMIT $3;",
        )
        .bind(STUDENT_ROLE)
        .bind(like_pattern(email_fragment))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(profile_from_row).collect::<Result<Vec<_>, _>>()?)
    }

    async fn insert_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        let result = sqlx::query("INSERT INTO enrollments (course_id, user_id) VALUES ($1, $2);")
            .bind(enrollment.course_id)
            .bind(&enrollment.user_id)
            .execute(&self.pool)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(BackendError::Duplicate {
                    course_id: enrollment.course_id,
                    user_id: enrollment.user_id.clone(),
                })
            }
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                Err(BackendError::NotFound(enrollment.user_id.clone()))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_enrollment(&self, enrollment: &Enrollment) -> Result<(), BackendError> {
        let result =
            sqlx::query("DELETE FROM enrollments WHERE course_id = $1 AND user_id = $2;")
                .bind(enrollment.course_id)
                .bind(&enrollment.user_id)
                .execute(&self.pool)
                .await?;

        tracing::info!(
            "enrollment delete for course={} user={}: {:?}",
            enrollment.course_id,
            enrollment.user_id,
            result.rows_affected()
        );

        Ok(())
    }
}
