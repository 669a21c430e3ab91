//! Postgres repository implementation using Diesel.
//!
//! ## Features
//!
//! - Connection pooling with r2d2
//! - Blocking Diesel calls moved off the async runtime with `spawn_blocking`
//! - Automatic migration execution
//!
//! ## Configuration
//!
//! Environment variables:
//! - `DATABASE_URL` or `PG_DATABASE_URL`: Connection string (required)
//! - `PG_POOL_MAX`: Maximum pool size (default: 10)
//! - `PG_POOL_MIN`: Minimum pool size (default: 1)
//! - `PG_CONN_TIMEOUT_SEC`: Connection timeout in seconds (default: 30)
//! - `PG_IDLE_TIMEOUT_SEC`: Idle connection timeout in seconds (default: 600)

use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::sql_query;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::time::Duration;
use tokio::task;

use crate::db::repository::{
    AstronautRepository, ErrorContext, PersonRepository, RepositoryError, RepositoryResult,
};
use crate::models::{
    AstronautDetail, AstronautDuty, NewAstronautDetail, NewAstronautDuty, Person,
    PersonAstronaut, PersonId,
};

mod models;
mod schema;

use models::*;
use schema::*;

type PgPool = Pool<ConnectionManager<PgConnection>>;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("src/db/repositories/postgres/migrations");

/// Configuration for connecting to Postgres.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub database_url: String,
    /// Maximum number of connections in the pool
    pub max_pool_size: u32,
    /// Minimum number of connections in the pool
    pub min_pool_size: u32,
    /// Connection timeout in seconds
    pub connection_timeout_sec: u64,
    /// Idle connection timeout in seconds
    pub idle_timeout_sec: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            max_pool_size: 10,
            min_pool_size: 1,
            connection_timeout_sec: 30,
            idle_timeout_sec: 600,
        }
    }
}

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl PostgresConfig {
    /// Create configuration from environment variables.
    pub fn from_env() -> Result<Self, String> {
        let database_url = std::env::var("DATABASE_URL")
            .or_else(|_| std::env::var("PG_DATABASE_URL"))
            .map_err(|_| "DATABASE_URL or PG_DATABASE_URL must be set".to_string())?;

        let defaults = Self::default();
        Ok(Self {
            database_url,
            max_pool_size: env_or("PG_POOL_MAX", defaults.max_pool_size),
            min_pool_size: env_or("PG_POOL_MIN", defaults.min_pool_size),
            connection_timeout_sec: env_or("PG_CONN_TIMEOUT_SEC", defaults.connection_timeout_sec),
            idle_timeout_sec: env_or("PG_IDLE_TIMEOUT_SEC", defaults.idle_timeout_sec),
        })
    }

    /// Create a new configuration with a database URL.
    pub fn with_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Default::default()
        }
    }
}

/// Diesel-backed repository for Postgres.
#[derive(Clone, Debug)]
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Create a new repository and run pending migrations.
    pub fn new(config: PostgresConfig) -> RepositoryResult<Self> {
        let manager = ConnectionManager::<PgConnection>::new(&config.database_url);

        let pool = Pool::builder()
            .max_size(config.max_pool_size)
            .min_idle(Some(config.min_pool_size))
            .connection_timeout(Duration::from_secs(config.connection_timeout_sec))
            .idle_timeout(Some(Duration::from_secs(config.idle_timeout_sec)))
            .test_on_check_out(true)
            .build(manager)
            .map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("create_pool")
                        .with_details(format!("max_size={}", config.max_pool_size)),
                )
            })?;

        {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new("get_connection_for_migrations"),
                )
            })?;
            Self::run_migrations(&mut conn)?;
        }

        tracing::info!(
            max_pool_size = config.max_pool_size,
            "Postgres repository ready"
        );
        Ok(Self { pool })
    }

    fn run_migrations(conn: &mut PgConnection) -> RepositoryResult<()> {
        let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Migration failed: {}", e),
                ErrorContext::new("run_migrations"),
            )
        })?;
        for version in applied {
            tracing::info!(%version, "Applied migration");
        }
        Ok(())
    }

    /// Run a blocking Diesel operation on a pooled connection.
    async fn with_conn<T, F>(&self, operation: &'static str, f: F) -> RepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut PgConnection) -> RepositoryResult<T> + Send + 'static,
    {
        let pool = self.pool.clone();

        task::spawn_blocking(move || {
            let mut conn = pool.get().map_err(|e| {
                RepositoryError::connection_with_context(
                    e.to_string(),
                    ErrorContext::new(operation).with_details("get_connection"),
                )
            })?;
            f(&mut conn).map_err(|e| e.with_operation(operation))
        })
        .await
        .map_err(|e| {
            RepositoryError::internal_with_context(
                format!("Task join error: {}", e),
                ErrorContext::new(operation).with_details("spawn_blocking"),
            )
        })?
    }
}

fn map_diesel_error(err: diesel::result::Error) -> RepositoryError {
    RepositoryError::from(err)
}

fn tuple_to_person_astronaut(row: PersonAstronautTuple) -> PersonAstronaut {
    let (id, name, current_rank, current_duty_title, career_start_date, career_end_date) = row;
    PersonAstronaut {
        person_id: PersonId::new(id),
        name,
        current_rank,
        current_duty_title,
        career_start_date,
        career_end_date,
    }
}

macro_rules! person_astronaut_query {
    () => {
        person::table.left_join(astronaut_detail::table).select((
            person::id,
            person::name,
            astronaut_detail::current_rank.nullable(),
            astronaut_detail::current_duty_title.nullable(),
            astronaut_detail::career_start_date.nullable(),
            astronaut_detail::career_end_date.nullable(),
        ))
    };
}

#[async_trait]
impl PersonRepository for PostgresRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.with_conn("health_check", |conn| {
            sql_query("SELECT 1")
                .execute(conn)
                .map(|_| true)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn insert_person(&self, name: &str) -> RepositoryResult<Person> {
        let name = name.to_string();
        self.with_conn("insert_person", move |conn| {
            diesel::insert_into(person::table)
                .values(&NewPersonRow { name: &name })
                .returning(PersonRow::as_returning())
                .get_result::<PersonRow>(conn)
                .map(Person::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn list_people(&self) -> RepositoryResult<Vec<PersonAstronaut>> {
        self.with_conn("list_people", |conn| {
            let rows: Vec<PersonAstronautTuple> = person_astronaut_query!()
                .order(person::id.asc())
                .load(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(tuple_to_person_astronaut).collect())
        })
        .await
    }

    async fn find_person_by_id(&self, person_id: PersonId) -> RepositoryResult<Option<Person>> {
        self.with_conn("find_person_by_id", move |conn| {
            person::table
                .find(person_id.value())
                .select(PersonRow::as_select())
                .first::<PersonRow>(conn)
                .optional()
                .map(|row| row.map(Person::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_person_by_name(&self, name: &str) -> RepositoryResult<Option<Person>> {
        let name = name.to_string();
        self.with_conn("find_person_by_name", move |conn| {
            person::table
                .filter(person::name.eq(&name))
                .select(PersonRow::as_select())
                .first::<PersonRow>(conn)
                .optional()
                .map(|row| row.map(Person::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn find_person_astronaut_by_name(
        &self,
        name: &str,
    ) -> RepositoryResult<Option<PersonAstronaut>> {
        let name = name.to_string();
        self.with_conn("find_person_astronaut_by_name", move |conn| {
            person_astronaut_query!()
                .filter(person::name.eq(&name))
                .first::<PersonAstronautTuple>(conn)
                .optional()
                .map(|row| row.map(tuple_to_person_astronaut))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn rename_person(&self, person_id: PersonId, new_name: &str) -> RepositoryResult<Person> {
        let new_name = new_name.to_string();
        self.with_conn("rename_person", move |conn| {
            diesel::update(person::table.find(person_id.value()))
                .set(person::name.eq(&new_name))
                .returning(PersonRow::as_returning())
                .get_result::<PersonRow>(conn)
                .optional()
                .map_err(map_diesel_error)?
                .map(Person::from)
                .ok_or_else(|| {
                    RepositoryError::not_found_with_context(
                        "Person not found",
                        ErrorContext::default()
                            .with_entity("person")
                            .with_entity_id(person_id),
                    )
                })
        })
        .await
    }
}

#[async_trait]
impl AstronautRepository for PostgresRepository {
    async fn list_astronaut_details(&self) -> RepositoryResult<Vec<AstronautDetail>> {
        self.with_conn("list_astronaut_details", |conn| {
            let rows = astronaut_detail::table
                .select(AstronautDetailRow::as_select())
                .order(astronaut_detail::id.asc())
                .load::<AstronautDetailRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(AstronautDetail::from).collect())
        })
        .await
    }

    async fn find_astronaut_detail(
        &self,
        person_id: PersonId,
    ) -> RepositoryResult<Option<AstronautDetail>> {
        self.with_conn("find_astronaut_detail", move |conn| {
            astronaut_detail::table
                .filter(astronaut_detail::person_id.eq(person_id.value()))
                .select(AstronautDetailRow::as_select())
                .first::<AstronautDetailRow>(conn)
                .optional()
                .map(|row| row.map(AstronautDetail::from))
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn insert_astronaut_detail(
        &self,
        detail: &NewAstronautDetail,
    ) -> RepositoryResult<AstronautDetail> {
        let row = NewAstronautDetailRow::from(detail);
        self.with_conn("insert_astronaut_detail", move |conn| {
            diesel::insert_into(astronaut_detail::table)
                .values(&row)
                .returning(AstronautDetailRow::as_returning())
                .get_result::<AstronautDetailRow>(conn)
                .map(AstronautDetail::from)
                .map_err(map_diesel_error)
        })
        .await
    }

    async fn count_astronaut_duties(&self, person_id: PersonId) -> RepositoryResult<u64> {
        self.with_conn("count_astronaut_duties", move |conn| {
            let count: i64 = astronaut_duty::table
                .filter(astronaut_duty::person_id.eq(person_id.value()))
                .count()
                .get_result(conn)
                .map_err(map_diesel_error)?;
            Ok(count.max(0) as u64)
        })
        .await
    }

    async fn list_astronaut_duties(
        &self,
        person_id: PersonId,
    ) -> RepositoryResult<Vec<AstronautDuty>> {
        self.with_conn("list_astronaut_duties", move |conn| {
            let rows = astronaut_duty::table
                .filter(astronaut_duty::person_id.eq(person_id.value()))
                .select(AstronautDutyRow::as_select())
                .order((astronaut_duty::duty_start_date.desc(), astronaut_duty::id.desc()))
                .load::<AstronautDutyRow>(conn)
                .map_err(map_diesel_error)?;
            Ok(rows.into_iter().map(AstronautDuty::from).collect())
        })
        .await
    }

    async fn insert_astronaut_duty(
        &self,
        duty: &NewAstronautDuty,
    ) -> RepositoryResult<AstronautDuty> {
        let person_id = duty.person_id.value();
        let start = duty.duty_start_date;
        let closed_at = duty.previous_duty_end();
        let retirement = duty.is_retirement();
        let row = NewAstronautDutyRow::from(duty);
        self.with_conn("insert_astronaut_duty", move |conn| {
            conn.transaction::<_, RepositoryError, _>(|tx| {
                diesel::update(
                    astronaut_duty::table
                        .filter(astronaut_duty::person_id.eq(person_id))
                        .filter(astronaut_duty::duty_end_date.is_null())
                        .filter(astronaut_duty::duty_start_date.lt(start)),
                )
                .set(astronaut_duty::duty_end_date.eq(Some(closed_at)))
                .execute(tx)?;

                let inserted = diesel::insert_into(astronaut_duty::table)
                    .values(&row)
                    .returning(AstronautDutyRow::as_returning())
                    .get_result::<AstronautDutyRow>(tx)?;

                let detail = astronaut_detail::table.filter(astronaut_detail::person_id.eq(person_id));
                diesel::update(detail.clone())
                    .set((
                        astronaut_detail::current_rank.eq(row.rank.as_str()),
                        astronaut_detail::current_duty_title.eq(row.duty_title.as_str()),
                    ))
                    .execute(tx)?;
                if retirement {
                    diesel::update(detail)
                        .set(astronaut_detail::career_end_date.eq(Some(closed_at)))
                        .execute(tx)?;
                }

                Ok(AstronautDuty::from(inserted))
            })
        })
        .await
    }
}
