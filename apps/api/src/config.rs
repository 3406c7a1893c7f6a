use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    /// Lifetime of issued bearer tokens.
    pub token_ttl_minutes: i64,
    pub bcrypt_cost: u32,
    /// Empty means any origin is accepted.
    pub cors_allowed_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET")?,
            port: parse_env("PORT", 3000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            token_ttl_minutes: parse_env("TOKEN_TTL_MINUTES", 60)?,
            bcrypt_cost: parse_env("BCRYPT_COST", 10)?,
            cors_allowed_origins: std::env::var("CORS_ALLOWED_ORIGINS")
                .map(|raw| split_origins(&raw))
                .unwrap_or_default(),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
impl Config {
    /// Config for router and service tests. Uses the minimum bcrypt cost to keep tests fast.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/vitae_test".to_string(),
            jwt_secret: "test-secret".to_string(),
            port: 0,
            rust_log: "debug".to_string(),
            token_ttl_minutes: 60,
            bcrypt_cost: 4,
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_origins_trims_and_drops_blanks() {
        let origins = split_origins(" http://localhost:8081 , ,https://app.example.com");
        assert_eq!(
            origins,
            vec!["http://localhost:8081", "https://app.example.com"]
        );
    }

    #[test]
    fn test_split_origins_empty_string() {
        assert!(split_origins("").is_empty());
    }
}
