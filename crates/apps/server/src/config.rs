use std::env;
use std::net::SocketAddr;

pub const SERVICE_NAME: &str = "wellbore-profile-api";
pub const DEFAULT_PORT: u16 = 4000;
pub const DEFAULT_BODY_LIMIT_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `None` mirrors the request origin.
    pub cors_origins: Option<Vec<String>>,
    pub supabase_configured: bool,
    pub body_limit_bytes: usize,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let cors_origins = lookup("CORS_ORIGIN").map(|raw| {
            raw.split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect()
        });

        let present = |key: &str| lookup(key).is_some_and(|v| !v.is_empty());
        let supabase_configured = present("SUPABASE_URL") && present("SUPABASE_SERVICE_ROLE_KEY");

        Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(lookup("PORT"), DEFAULT_PORT),
            cors_origins,
            supabase_configured,
            body_limit_bytes: parse_or(lookup("BODY_LIMIT_BYTES"), DEFAULT_BODY_LIMIT_BYTES),
        }
    }

    pub fn addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| format!("invalid listen address {}:{}: {e}", self.host, self.port))
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_BODY_LIMIT_BYTES, ServerConfig};
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.cors_origins, None);
        assert!(!cfg.supabase_configured);
        assert_eq!(cfg.body_limit_bytes, DEFAULT_BODY_LIMIT_BYTES);
        assert_eq!(cfg.addr().expect("addr").port(), 4000);
    }

    #[test]
    fn reads_origins_port_and_supabase() {
        let cfg = ServerConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("CORS_ORIGIN", "http://a.test, http://b.test,"),
            ("SUPABASE_URL", "https://x.supabase.co"),
            ("SUPABASE_SERVICE_ROLE_KEY", "secret"),
        ]));
        assert_eq!(cfg.port, 8080);
        assert_eq!(
            cfg.cors_origins,
            Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
        );
        assert!(cfg.supabase_configured);
    }

    #[test]
    fn supabase_needs_both_values() {
        let cfg = ServerConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x.supabase.co")]));
        assert!(!cfg.supabase_configured);
    }

    #[test]
    fn bad_port_falls_back_to_default() {
        let cfg = ServerConfig::from_lookup(lookup(&[("PORT", "not-a-port")]));
        assert_eq!(cfg.port, 4000);
    }
}
