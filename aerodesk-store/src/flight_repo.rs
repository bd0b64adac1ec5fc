use aerodesk_core::inventory::apply_seat_delta;
use aerodesk_core::repository::FlightRepository;
use aerodesk_core::{
    Airline, AirlineClass, CoreError, CoreResult, Flight, FlightDraft, FlightRecord,
    FlightSearchCriteria,
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sqlx::{PgConnection, PgPool};

/// Joined projection shared by every flight read.
const SELECT_FLIGHTS: &str = r#"
    SELECT
        f.id, f.enterprise, f.base_price, f.source, f.destination,
        f.departure_date, f.departure_time, f.arrival_date, f.arrival_time,
        f.duration, f.total_seats, f.available_seats, f.class_name,
        a.id AS airline_id, a.name AS airline_name
    FROM flights f
    JOIN airlines a ON a.id = f.airline_id
"#;

pub struct PgFlightRepository {
    pool: PgPool,
}

impl PgFlightRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal struct for type-safe querying
#[derive(sqlx::FromRow)]
struct FlightRow {
    id: i32,
    enterprise: String,
    base_price: f64,
    source: String,
    destination: String,
    departure_date: NaiveDate,
    departure_time: NaiveTime,
    arrival_date: NaiveDate,
    arrival_time: NaiveTime,
    duration: i32,
    total_seats: i32,
    available_seats: i32,
    class_name: String,
    airline_id: i32,
    airline_name: String,
}

impl TryFrom<FlightRow> for Flight {
    type Error = CoreError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        // A stored class outside the table is corrupt data, not caller input.
        let class_name: AirlineClass = row
            .class_name
            .parse()
            .map_err(|e: CoreError| CoreError::store(e.to_string()))?;

        Ok(Flight {
            id: row.id,
            enterprise: row.enterprise,
            base_price: row.base_price,
            source: row.source,
            destination: row.destination,
            departure_date: row.departure_date,
            departure_time: row.departure_time,
            arrival_date: row.arrival_date,
            arrival_time: row.arrival_time,
            duration: row.duration,
            total_seats: row.total_seats,
            available_seats: row.available_seats,
            class_name,
            airline: Airline {
                id: row.airline_id,
                name: row.airline_name,
            },
        })
    }
}

fn into_flights(rows: Vec<FlightRow>) -> CoreResult<Vec<Flight>> {
    rows.into_iter().map(Flight::try_from).collect()
}

async fn fetch_one(conn: &mut PgConnection, id: i32) -> CoreResult<Option<Flight>> {
    let sql = format!("{SELECT_FLIGHTS} WHERE f.id = $1");
    let row = sqlx::query_as::<_, FlightRow>(&sql)
        .bind(id)
        .fetch_optional(conn)
        .await
        .map_err(CoreError::store)?;

    row.map(Flight::try_from).transpose()
}

/// A write naming an airline that no longer exists trips the foreign key.
fn write_error(err: sqlx::Error, airline_id: i32) -> CoreError {
    match err {
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            CoreError::airline_not_found(airline_id)
        }
        other => CoreError::store(other),
    }
}

async fn insert(conn: &mut PgConnection, fields: &FlightDraft, airline_id: i32) -> CoreResult<i32> {
    let (id,): (i32,) = sqlx::query_as(
        r#"
        INSERT INTO flights (
            enterprise, base_price, source, destination,
            departure_date, departure_time, arrival_date, arrival_time,
            duration, total_seats, available_seats, class_name, airline_id
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
        RETURNING id
        "#,
    )
    .bind(&fields.enterprise)
    .bind(fields.base_price)
    .bind(&fields.source)
    .bind(&fields.destination)
    .bind(fields.departure_date)
    .bind(fields.departure_time)
    .bind(fields.arrival_date)
    .bind(fields.arrival_time)
    .bind(fields.duration)
    .bind(fields.total_seats)
    .bind(fields.available_seats)
    .bind(fields.class_name.as_str())
    .bind(airline_id)
    .fetch_one(conn)
    .await
    .map_err(|e| write_error(e, airline_id))?;

    Ok(id)
}

async fn overwrite(
    conn: &mut PgConnection,
    id: i32,
    fields: &FlightDraft,
    airline_id: i32,
) -> CoreResult<bool> {
    let result = sqlx::query(
        r#"
        UPDATE flights
        SET enterprise = $1, base_price = $2, source = $3, destination = $4,
            departure_date = $5, departure_time = $6, arrival_date = $7, arrival_time = $8,
            duration = $9, total_seats = $10, available_seats = $11, class_name = $12,
            airline_id = $13
        WHERE id = $14
        "#,
    )
    .bind(&fields.enterprise)
    .bind(fields.base_price)
    .bind(&fields.source)
    .bind(&fields.destination)
    .bind(fields.departure_date)
    .bind(fields.departure_time)
    .bind(fields.arrival_date)
    .bind(fields.arrival_time)
    .bind(fields.duration)
    .bind(fields.total_seats)
    .bind(fields.available_seats)
    .bind(fields.class_name.as_str())
    .bind(airline_id)
    .bind(id)
    .execute(conn)
    .await
    .map_err(|e| write_error(e, airline_id))?;

    Ok(result.rows_affected() > 0)
}

#[async_trait]
impl FlightRepository for PgFlightRepository {
    async fn save(&self, record: FlightRecord) -> CoreResult<Flight> {
        let mut tx = self.pool.begin().await.map_err(CoreError::store)?;

        let id = match record.id {
            None => insert(&mut tx, &record.fields, record.airline_id).await?,
            Some(id) => {
                if !overwrite(&mut tx, id, &record.fields, record.airline_id).await? {
                    return Err(CoreError::flight_not_found(id));
                }
                id
            }
        };

        let flight = fetch_one(&mut tx, id)
            .await?
            .ok_or_else(|| CoreError::flight_not_found(id))?;

        tx.commit().await.map_err(CoreError::store)?;
        Ok(flight)
    }

    async fn find_by_id(&self, id: i32) -> CoreResult<Option<Flight>> {
        let mut conn = self.pool.acquire().await.map_err(CoreError::store)?;
        fetch_one(&mut conn, id).await
    }

    async fn find_all(&self) -> CoreResult<Vec<Flight>> {
        let sql = format!("{SELECT_FLIGHTS} ORDER BY f.id");
        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(CoreError::store)?;

        into_flights(rows)
    }

    async fn find_by_airline(&self, airline_id: i32) -> CoreResult<Vec<Flight>> {
        let sql = format!("{SELECT_FLIGHTS} WHERE f.airline_id = $1 ORDER BY f.id");
        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(airline_id)
            .fetch_all(&self.pool)
            .await
            .map_err(CoreError::store)?;

        into_flights(rows)
    }

    async fn delete_by_id(&self, id: i32) -> CoreResult<bool> {
        let result = sqlx::query("DELETE FROM flights WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(CoreError::store)?;

        Ok(result.rows_affected() > 0)
    }

    async fn search_flights(&self, criteria: &FlightSearchCriteria) -> CoreResult<Vec<Flight>> {
        let sql = format!(
            r#"{SELECT_FLIGHTS}
            WHERE ($1::TEXT IS NULL OR $1 = '' OR f.source = $1)
              AND ($2::TEXT IS NULL OR $2 = '' OR f.destination = $2)
              AND ($3::TEXT IS NULL OR $3 = '' OR a.name = $3)
              AND ($4::TEXT IS NULL OR f.class_name = $4)
            ORDER BY f.id
            "#
        );

        let rows = sqlx::query_as::<_, FlightRow>(&sql)
            .bind(criteria.source.as_deref())
            .bind(criteria.destination.as_deref())
            .bind(criteria.airline_name.as_deref())
            .bind(criteria.class_name.map(AirlineClass::as_str))
            .fetch_all(&self.pool)
            .await
            .map_err(CoreError::store)?;

        into_flights(rows)
    }

    async fn adjust_available_seats(&self, id: i32, delta: i32) -> CoreResult<Option<Flight>> {
        let mut tx = self.pool.begin().await.map_err(CoreError::store)?;

        // Row lock keeps the read-modify-write inside this transaction.
        let counts: Option<(i32, i32)> = sqlx::query_as(
            "SELECT available_seats, total_seats FROM flights WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(CoreError::store)?;

        let Some((available, total)) = counts else {
            return Ok(None);
        };

        let next = apply_seat_delta(available, total, delta)?;

        sqlx::query("UPDATE flights SET available_seats = $1 WHERE id = $2")
            .bind(next)
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(CoreError::store)?;

        let flight = fetch_one(&mut tx, id).await?;
        tx.commit().await.map_err(CoreError::store)?;

        Ok(flight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerodesk_core::EntityKind;
    use sqlx::error::{DatabaseError, ErrorKind};
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    #[derive(Debug)]
    struct Violation {
        foreign_key: bool,
    }

    impl fmt::Display for Violation {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("constraint violated")
        }
    }

    impl StdError for Violation {}

    impl DatabaseError for Violation {
        fn message(&self) -> &str {
            "constraint violated"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.foreign_key {
                ErrorKind::ForeignKeyViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    #[test]
    fn test_foreign_key_violation_is_missing_airline() {
        let err = write_error(sqlx::Error::Database(Box::new(Violation { foreign_key: true })), 42);
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Airline, id: 42 }));
        assert_eq!(err.to_string(), "Airline not found by id: 42");
    }

    #[test]
    fn test_other_write_failures_stay_store_errors() {
        let err = write_error(sqlx::Error::Database(Box::new(Violation { foreign_key: false })), 42);
        assert!(matches!(err, CoreError::Store(_)));

        assert!(matches!(write_error(sqlx::Error::RowNotFound, 42), CoreError::Store(_)));
    }
}
