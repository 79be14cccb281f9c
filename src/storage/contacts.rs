//! SQL layer for the `contacts` and `phone_numbers` tables.
//!
//! Owns the connection pool and the schema bootstrap. Write operations take
//! `&mut PgConnection` so the service can run several of them under a single
//! transaction; reads go straight to the pool.

use crate::domain::contact::Contact;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool, QueryBuilder};

// One row per contact, phone numbers comma-joined. `string_agg` over the
// left join yields NULL for a contact with no numbers; coalesced so the
// field is always a string on the wire.
const LIST_SQL: &str = "SELECT c.id, c.name, c.image, \
     COALESCE(string_agg(p.phone_number, ','), '') AS phone_numbers \
     FROM contacts c \
     LEFT JOIN phone_numbers p ON p.contact_id = c.id \
     GROUP BY c.id \
     ORDER BY c.id";

// Membership is decided by the EXISTS subquery rather than by filtering the
// join, so a contact matched through one number still aggregates its full
// number set.
const SEARCH_SQL: &str = "SELECT c.id, c.name, c.image, \
     COALESCE(string_agg(p.phone_number, ','), '') AS phone_numbers \
     FROM contacts c \
     LEFT JOIN phone_numbers p ON p.contact_id = c.id \
     WHERE c.name ILIKE $1 \
        OR EXISTS (SELECT 1 FROM phone_numbers m \
                   WHERE m.contact_id = c.id AND m.phone_number ILIKE $1) \
     GROUP BY c.id \
     ORDER BY c.id";

/// Durable storage for contacts and their phone numbers.
pub struct ContactStore {
    pool: PgPool,
}

impl ContactStore {
    /// Connects to Postgres and provisions the schema.
    ///
    /// `phone_numbers.contact_id` carries no foreign-key constraint: the
    /// delete cascade is managed by the service, matching the original
    /// schema.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS contacts (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                image TEXT
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS phone_numbers (
                contact_id BIGINT NOT NULL,
                phone_number TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS phone_numbers_contact_id_idx \
             ON phone_numbers (contact_id)",
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub async fn insert_contact(
        conn: &mut PgConnection,
        name: &str,
        image: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let id: i64 =
            sqlx::query_scalar("INSERT INTO contacts (name, image) VALUES ($1, $2) RETURNING id")
                .bind(name)
                .bind(image)
                .fetch_one(conn)
                .await?;
        Ok(id)
    }

    /// Bulk insert; a no-op for an empty slice.
    pub async fn insert_phone_numbers(
        conn: &mut PgConnection,
        contact_id: i64,
        numbers: &[String],
    ) -> Result<(), sqlx::Error> {
        if numbers.is_empty() {
            return Ok(());
        }
        let mut builder =
            QueryBuilder::new("INSERT INTO phone_numbers (contact_id, phone_number) ");
        builder.push_values(numbers, |mut row, number| {
            row.push_bind(contact_id).push_bind(number);
        });
        builder.build().execute(conn).await?;
        Ok(())
    }

    /// Deleting an id with no row affects zero rows and is not an error.
    pub async fn delete_contact(conn: &mut PgConnection, id: i64) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM contacts WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn delete_phone_numbers(
        conn: &mut PgConnection,
        contact_id: i64,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("DELETE FROM phone_numbers WHERE contact_id = $1")
            .bind(contact_id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Overwrites the contact row; does not validate existence.
    pub async fn update_contact(
        conn: &mut PgConnection,
        id: i64,
        name: &str,
        image: Option<&str>,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE contacts SET name = $1, image = $2 WHERE id = $3")
            .bind(name)
            .bind(image)
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }

    /// Intersects `candidates` with every number already stored, anywhere in
    /// the system. Exact string match.
    pub async fn existing_numbers(
        conn: &mut PgConnection,
        candidates: &[String],
    ) -> Result<Vec<String>, sqlx::Error> {
        if candidates.is_empty() {
            return Ok(Vec::new());
        }
        sqlx::query_scalar(
            "SELECT DISTINCT phone_number FROM phone_numbers WHERE phone_number = ANY($1)",
        )
        .bind(candidates)
        .fetch_all(conn)
        .await
    }

    /// All contacts, or those whose name or any phone number contains
    /// `filter` as a case-insensitive substring.
    pub async fn list_contacts(&self, filter: Option<&str>) -> Result<Vec<Contact>, sqlx::Error> {
        match filter {
            Some(term) => {
                let pattern = format!("%{}%", term);
                sqlx::query_as::<_, Contact>(SEARCH_SQL)
                    .bind(pattern)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query_as::<_, Contact>(LIST_SQL)
                    .fetch_all(&self.pool)
                    .await
            }
        }
    }
}
