//! Tests for db::factory module - repository creation and configuration.

mod support;

use std::path::PathBuf;
use std::str::FromStr;

use stargate_api::db::factory::{RepositoryFactory, RepositoryType, REPOSITORY_CONFIG_ENV};
use stargate_api::db::repository::{PersonRepository, RepositoryError};

#[test]
fn test_repository_type_from_str() {
    assert_eq!(
        RepositoryType::from_str("POSTGRES").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("pg").unwrap(),
        RepositoryType::Postgres
    );
    assert_eq!(
        RepositoryType::from_str("LOCAL").unwrap(),
        RepositoryType::Local
    );
}

#[test]
fn test_repository_type_from_str_invalid() {
    let result = RepositoryType::from_str("invalid");
    assert!(result.unwrap_err().contains("Unknown repository type"));
}

#[test]
fn test_repository_type_from_env_default() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_from_env_with_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", Some("postgres://localhost/stargate")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_repository_type_from_env_with_pg_database_url() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", None),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", Some("postgres://localhost/stargate")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Postgres);
        },
    );
}

#[test]
fn test_repository_type_from_env_explicit_wins() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("local")),
            ("DATABASE_URL", Some("postgres://localhost/stargate")),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[test]
fn test_repository_type_from_env_invalid_defaults_to_local() {
    support::with_scoped_env(
        &[
            ("REPOSITORY_TYPE", Some("invalid")),
            ("DATABASE_URL", None),
            ("PG_DATABASE_URL", None),
        ],
        || {
            assert_eq!(RepositoryType::from_env(), RepositoryType::Local);
        },
    );
}

#[tokio::test]
async fn test_create_local_via_factory() {
    let repo = RepositoryFactory::create(RepositoryType::Local, None)
        .await
        .unwrap();
    assert!(repo.health_check().await.unwrap());
}

#[cfg(feature = "postgres-repo")]
#[tokio::test]
async fn test_create_postgres_without_config_fails() {
    let err = RepositoryFactory::create(RepositoryType::Postgres, None)
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("requires PostgresConfig"));
}

#[cfg(not(feature = "postgres-repo"))]
#[tokio::test]
async fn test_create_postgres_without_feature_fails() {
    let err = RepositoryFactory::create(RepositoryType::Postgres, None)
        .await
        .err()
        .unwrap();
    assert!(err.to_string().contains("feature not enabled"));
}

fn write_temp_config(name: &str, content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!(
        "stargate-{}-{}.toml",
        name,
        std::process::id()
    ));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_resolve_uses_explicit_config_file() {
    let path = write_temp_config("local", "[repository]\ntype = \"local\"\n");
    let path_str = path.to_string_lossy().to_string();

    let healthy = support::with_scoped_env(&[(REPOSITORY_CONFIG_ENV, Some(path_str.as_str()))], || {
        tokio::runtime::Runtime::new().unwrap().block_on(async {
            let repo = RepositoryFactory::resolve().await.unwrap();
            repo.health_check().await.unwrap()
        })
    });

    std::fs::remove_file(&path).ok();
    assert!(healthy);
}

#[test]
fn test_resolve_with_bad_config_file_fails() {
    let path = write_temp_config("bad", "[repository]\ntype = \"mongodb\"\n");
    let path_str = path.to_string_lossy().to_string();

    let result = support::with_scoped_env(&[(REPOSITORY_CONFIG_ENV, Some(path_str.as_str()))], || {
        tokio::runtime::Runtime::new()
            .unwrap()
            .block_on(RepositoryFactory::resolve())
    });

    std::fs::remove_file(&path).ok();
    assert!(matches!(
        result,
        Err(RepositoryError::ConfigurationError { .. })
    ));
}
