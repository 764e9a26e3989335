use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub ttl_hours: i64,
}

#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt: JwtConfig,
    pub bcrypt_cost: u32,
    /// Reject pin submissions that carry no bearer token
    pub require_pin_auth: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub mongo_url: String,
    pub mongo_db: Option<String>,
    pub cors_origins: Vec<String>,
    /// Map provider token. Only the web client uses it.
    pub map_token: Option<String>,
    pub auth: AuthConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let mongo_url = non_empty("MONGO_URL")
            .or_else(|| non_empty("DATABASE_URL"))
            .ok_or_else(|| "MONGO_URL must be set".to_string())?;

        let port = match non_empty("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| format!("Invalid PORT '{}': {}", raw, e))?,
            None => 4000,
        };

        let bcrypt_cost = match non_empty("BCRYPT_COST") {
            Some(raw) => {
                let cost = raw
                    .parse::<u32>()
                    .map_err(|e| format!("Invalid BCRYPT_COST '{}': {}", raw, e))?;
                if !(4..=31).contains(&cost) {
                    return Err(format!("BCRYPT_COST must be between 4 and 31, got {}", cost));
                }
                cost
            }
            None => bcrypt::DEFAULT_COST,
        };

        let ttl_hours = match non_empty("JWT_TTL_HOURS") {
            Some(raw) => match raw.parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                _ => return Err(format!("Invalid JWT_TTL_HOURS '{}'", raw)),
            },
            None => 24,
        };

        let jwt = JwtConfig {
            secret: non_empty("JWT_SECRET").ok_or_else(|| "JWT_SECRET must be set".to_string())?,
            issuer: non_empty("JWT_ISSUER").unwrap_or_else(|| "pinmap-service".to_string()),
            audience: non_empty("JWT_AUDIENCE").unwrap_or_else(|| "pinmap-client".to_string()),
            ttl_hours,
        };

        let require_pin_auth = non_empty("REQUIRE_PIN_AUTH")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let cors_origins = non_empty("CORS_ORIGINS")
            .map(|v| {
                v.split(',')
                    .map(|origin| origin.trim().to_string())
                    .filter(|origin| !origin.is_empty())
                    .collect()
            })
            .unwrap_or_else(|| vec!["http://localhost:3000".to_string()]);

        Ok(Self {
            host: non_empty("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            mongo_db: non_empty("MONGO_DB"),
            mongo_url,
            cors_origins,
            map_token: non_empty("MAPBOX_TOKEN"),
            auth: AuthConfig {
                jwt,
                bcrypt_cost,
                require_pin_auth,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_required_values_are_set() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://localhost:27017/pins"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 4000);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.auth.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.auth.jwt.ttl_hours, 24);
        assert!(!config.auth.require_pin_auth);
        assert_eq!(config.cors_origins, vec!["http://localhost:3000".to_string()]);
        assert!(config.map_token.is_none());
    }

    #[test]
    fn database_url_is_accepted_as_alias() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("DATABASE_URL", "mongodb://db:27017"),
            ("JWT_SECRET", "s3cret"),
        ]))
        .unwrap();
        assert_eq!(config.mongo_url, "mongodb://db:27017");
    }

    #[test]
    fn missing_connection_string_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[("JWT_SECRET", "s3cret")])).unwrap_err();
        assert!(err.contains("MONGO_URL"));
    }

    #[test]
    fn out_of_range_bcrypt_cost_is_rejected() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://localhost"),
            ("JWT_SECRET", "s3cret"),
            ("BCRYPT_COST", "2"),
        ]))
        .unwrap_err();
        assert!(err.contains("BCRYPT_COST"));
    }

    #[test]
    fn parses_optional_flags() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("MONGO_URL", "mongodb://localhost"),
            ("JWT_SECRET", "s3cret"),
            ("PORT", "8080"),
            ("REQUIRE_PIN_AUTH", "true"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("MAPBOX_TOKEN", "pk.abc"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert!(config.auth.require_pin_auth);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.map_token.as_deref(), Some("pk.abc"));
    }
}
