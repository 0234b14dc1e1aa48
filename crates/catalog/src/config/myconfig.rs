use anyhow::Result;
use shared::config::{EnvLookup, parse_bool, parse_or_default, required};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub run_migrations: bool,
    pub port: u16,
    pub db_max_conn: u32,
    pub db_min_conn: u32,
    pub otel_endpoint: Option<String>,
    pub is_dev: bool,
    pub enable_file_log: bool,
}

impl Config {
    pub fn init() -> Result<Self> {
        Self::from_lookup(&|key: &str| std::env::var(key).ok())
    }

    pub fn from_lookup(env: &impl EnvLookup) -> Result<Self> {
        let database_url = required(env, "DATABASE_URL")?;
        let run_migrations = parse_bool(env, "RUN_MIGRATIONS", true)?;
        let port = parse_or_default::<u16>(env, "PORT", 3000)?;

        let db_max_conn = parse_or_default::<u32>(env, "DB_MAX_CONN", 5)?;
        let db_min_conn = parse_or_default::<u32>(env, "DB_MIN_CONN", 1)?;
        if db_min_conn > db_max_conn {
            anyhow::bail!("DB_MIN_CONN ({db_min_conn}) must not exceed DB_MAX_CONN ({db_max_conn})");
        }

        let otel_endpoint = env
            .lookup("OTEL_ENDPOINT")
            .filter(|value| !value.trim().is_empty());

        Ok(Self {
            database_url,
            run_migrations,
            port,
            db_max_conn,
            db_min_conn,
            otel_endpoint,
            is_dev: parse_bool(env, "DEV_MODE", false)?,
            enable_file_log: parse_bool(env, "ENABLE_FILE_LOG", false)?,
        })
    }
}
