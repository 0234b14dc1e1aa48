mod database;
mod env;

pub use self::database::{ConnectionManager, ConnectionPool};
pub use self::env::{EnvLookup, parse_bool, parse_or_default, required};
