//! Listener and store settings read from the environment.

use std::net::SocketAddr;

use dashboard::outbound::persistence::PoolConfig;
use mockable::Env;

pub(crate) const POSTGRES_URL_ENV: &str = "POSTGRES_URL";
pub(crate) const DATABASE_URL_ENV: &str = "DATABASE_URL";
pub(crate) const BIND_ADDR_ENV: &str = "BIND_ADDR";
pub(crate) const POOL_MAX_SIZE_ENV: &str = "DB_POOL_MAX_SIZE";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_POOL_MAX_SIZE: u32 = 10;

/// Errors raised while reading server settings.
#[derive(thiserror::Error, Debug)]
pub enum ServerSettingsError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Settings for the listener and the connection pool.
pub struct ServerSettings {
    pub bind_addr: SocketAddr,
    pub pool: PoolConfig,
}

impl ServerSettings {
    /// Read settings from `env`.
    ///
    /// The connection string comes from `POSTGRES_URL`, falling back to
    /// `DATABASE_URL`. One of them must be set in every build.
    pub fn from_env<E: Env>(env: &E) -> Result<Self, ServerSettingsError> {
        let bind_addr = parse_bind_addr(env)?;
        let database_url = env
            .string(POSTGRES_URL_ENV)
            .or_else(|| env.string(DATABASE_URL_ENV))
            .filter(|url| !url.trim().is_empty())
            .ok_or(ServerSettingsError::MissingEnv {
                name: POSTGRES_URL_ENV,
            })?;
        let pool = PoolConfig::new(database_url).with_max_size(parse_pool_max_size(env)?);

        Ok(Self { bind_addr, pool })
    }
}

fn parse_bind_addr<E: Env>(env: &E) -> Result<SocketAddr, ServerSettingsError> {
    let value = env
        .string(BIND_ADDR_ENV)
        .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_owned());
    value
        .parse()
        .map_err(|_| ServerSettingsError::InvalidEnv {
            name: BIND_ADDR_ENV,
            value,
            expected: "host:port",
        })
}

fn parse_pool_max_size<E: Env>(env: &E) -> Result<u32, ServerSettingsError> {
    let Some(value) = env.string(POOL_MAX_SIZE_ENV) else {
        return Ok(DEFAULT_POOL_MAX_SIZE);
    };
    match value.trim().parse::<u32>() {
        Ok(size) if size > 0 => Ok(size),
        _ => Err(ServerSettingsError::InvalidEnv {
            name: POOL_MAX_SIZE_ENV,
            value,
            expected: "a positive integer",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;
    use std::collections::HashMap;

    fn mock_env(vars: &[(&'static str, &str)]) -> MockEnv {
        let vars: HashMap<&'static str, String> = vars
            .iter()
            .map(|(key, value)| (*key, (*value).to_owned()))
            .collect();
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |key| vars.get(key).cloned());
        env
    }

    #[rstest]
    fn defaults_apply_when_only_url_is_set() {
        let env = mock_env(&[(POSTGRES_URL_ENV, "postgres://db/dashboard")]);
        let settings = ServerSettings::from_env(&env).expect("valid settings");
        assert_eq!(settings.bind_addr.to_string(), DEFAULT_BIND_ADDR);
        assert_eq!(settings.pool.max_size(), DEFAULT_POOL_MAX_SIZE);
    }

    #[rstest]
    fn database_url_is_a_fallback() {
        let env = mock_env(&[(DATABASE_URL_ENV, "postgres://db/dashboard")]);
        assert!(ServerSettings::from_env(&env).is_ok());
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(POSTGRES_URL_ENV, "   ")])]
    #[case(&[(BIND_ADDR_ENV, "127.0.0.1:3000")])]
    fn a_connection_string_is_always_required(#[case] vars: &[(&'static str, &str)]) {
        let err = ServerSettings::from_env(&mock_env(vars))
            .err()
            .expect("missing url fails");
        assert!(matches!(
            err,
            ServerSettingsError::MissingEnv {
                name: POSTGRES_URL_ENV
            }
        ));
    }

    #[rstest]
    #[case(BIND_ADDR_ENV, "localhost")]
    #[case(POOL_MAX_SIZE_ENV, "0")]
    #[case(POOL_MAX_SIZE_ENV, "many")]
    fn invalid_values_are_rejected(#[case] name: &'static str, #[case] value: &str) {
        let env = mock_env(&[(POSTGRES_URL_ENV, "postgres://db/dashboard"), (name, value)]);
        let err = ServerSettings::from_env(&env)
            .err()
            .expect("invalid value fails");
        assert!(
            matches!(err, ServerSettingsError::InvalidEnv { name: actual, .. } if actual == name)
        );
    }

    #[rstest]
    fn explicit_values_are_honoured() {
        let env = mock_env(&[
            (POSTGRES_URL_ENV, "postgres://db/dashboard"),
            (BIND_ADDR_ENV, "127.0.0.1:3000"),
            (POOL_MAX_SIZE_ENV, "4"),
        ]);
        let settings = ServerSettings::from_env(&env).expect("valid settings");
        assert_eq!(settings.bind_addr.port(), 3000);
        assert_eq!(settings.pool.max_size(), 4);
    }
}
