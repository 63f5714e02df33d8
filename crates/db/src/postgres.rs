//! PostgreSQL store over the `registrants` table.

use async_trait::async_trait;
use signup_core::registrant::Registrant;
use signup_core::types::CalendarDate;
use sqlx::FromRow;

use crate::{DbPool, RegistrantStore, StoreError};

/// Column list shared across queries.
const COLUMNS: &str = "first_name, last_name, email, birth_date, postal_code, city";

#[derive(Debug, FromRow)]
struct RegistrantRow {
    first_name: String,
    last_name: String,
    email: String,
    birth_date: CalendarDate,
    postal_code: String,
    city: String,
}

impl From<RegistrantRow> for Registrant {
    fn from(row: RegistrantRow) -> Self {
        Self {
            first_name: row.first_name,
            last_name: row.last_name,
            email: row.email,
            birth_date: row.birth_date,
            postal_code: row.postal_code,
            city: row.city,
        }
    }
}

/// Registrants in PostgreSQL, ordered by insertion id.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RegistrantStore for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn list(&self) -> Result<Vec<Registrant>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM registrants ORDER BY id");
        let rows = sqlx::query_as::<_, RegistrantRow>(&query)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Registrant::from).collect())
    }

    async fn add(&self, registrant: Registrant) -> Result<Registrant, StoreError> {
        let query = format!(
            "INSERT INTO registrants ({COLUMNS})
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, RegistrantRow>(&query)
            .bind(&registrant.first_name)
            .bind(&registrant.last_name)
            .bind(&registrant.email)
            .bind(registrant.birth_date)
            .bind(&registrant.postal_code)
            .bind(&registrant.city)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn count(&self) -> Result<usize, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrants")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM registrants")
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
