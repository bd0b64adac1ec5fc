use aerodesk_core::repository::AirlineRepository;
use aerodesk_core::{Airline, CoreError, CoreResult, NewAirline};
use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;

pub struct PgAirlineRepository {
    pool: PgPool,
}

impl PgAirlineRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct AirlineRow {
    id: i32,
    name: String,
}

impl From<AirlineRow> for Airline {
    fn from(row: AirlineRow) -> Self {
        Airline { id: row.id, name: row.name }
    }
}

#[async_trait]
impl AirlineRepository for PgAirlineRepository {
    async fn save(&self, airline: NewAirline) -> CoreResult<Airline> {
        let row = sqlx::query_as::<_, AirlineRow>(
            "INSERT INTO airlines (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&airline.name)
        .fetch_one(&self.pool)
        .await
        .map_err(CoreError::store)?;

        Ok(row.into())
    }

    async fn rename(&self, id: i32, name: &str) -> CoreResult<Option<Airline>> {
        let row = sqlx::query_as::<_, AirlineRow>(
            "UPDATE airlines SET name = $1 WHERE id = $2 RETURNING id, name",
        )
        .bind(name)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(CoreError::store)?;

        Ok(row.map(Airline::from))
    }

    async fn find_by_id(&self, id: i32) -> CoreResult<Option<Airline>> {
        let row = sqlx::query_as::<_, AirlineRow>("SELECT id, name FROM airlines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(CoreError::store)?;

        Ok(row.map(Airline::from))
    }

    async fn find_all(&self) -> CoreResult<Vec<Airline>> {
        let rows = sqlx::query_as::<_, AirlineRow>("SELECT id, name FROM airlines ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(CoreError::store)?;

        Ok(rows.into_iter().map(Airline::from).collect())
    }

    async fn delete_with_flights(&self, id: i32) -> CoreResult<Option<u64>> {
        let mut tx = self.pool.begin().await.map_err(CoreError::store)?;

        let exists: Option<(i32,)> =
            sqlx::query_as("SELECT id FROM airlines WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(CoreError::store)?;

        if exists.is_none() {
            return Ok(None);
        }

        // Children first, then the parent, in the same transaction.
        let flights = sqlx::query("DELETE FROM flights WHERE airline_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(CoreError::store)?;

        sqlx::query("DELETE FROM airlines WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(CoreError::store)?;

        tx.commit().await.map_err(CoreError::store)?;

        info!(airline_id = id, deleted_flights = flights.rows_affected(), "Airline deleted with its flights");
        Ok(Some(flights.rows_affected()))
    }
}
