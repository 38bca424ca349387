use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub questions_collection: String,
    pub learners_collection: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    /// How long a transient validation notice stays visible, in seconds.
    pub notice_ttl_seconds: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "skyline-local".to_string()),
            questions_collection: env::var("QUESTIONS_COLLECTION")
                .unwrap_or_else(|_| "questions".to_string()),
            learners_collection: env::var("LEARNERS_COLLECTION")
                .unwrap_or_else(|_| "learners".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            notice_ttl_seconds: env::var("NOTICE_TTL_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "skyline-test".to_string(),
            questions_collection: "questions".to_string(),
            learners_collection: "learners".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            notice_ttl_seconds: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        // Should use env vars if set, or fall back to defaults
        assert!(!config.mongo_conn_string.is_empty());
        assert!(!config.mongo_db_name.is_empty());
        assert_eq!(config.questions_collection, "questions");
        assert_eq!(config.learners_collection, "learners");
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.mongo_db_name, "skyline-test");
        assert_eq!(config.notice_ttl_seconds, 5);
    }
}
