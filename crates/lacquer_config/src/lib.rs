use config::{Config, ConfigError, Environment, File};

pub mod models;
pub use models::*;

/// Loads the application configuration.
///
/// Sources, in override order: `config/default.toml` (optional), an
/// environment specific file named by `RUN_ENV` (optional), then
/// `APP`-prefixed environment variables with `__` as the section separator
/// (e.g. `APP_SERVER__PORT=3000`).
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();
    let run_env = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".to_string());
    Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(File::with_name(&format!("config/{run_env}")).required(false))
        .add_source(Environment::with_prefix("APP").separator("__"))
        .build()?
        .try_deserialize()
}

/// Pulls a local `.env` into the process environment before the
/// environment source is read. Missing files are fine.
fn ensure_dotenv_loaded() {
    let _ = dotenv::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    fn parse(raw: &str) -> AppConfig {
        Config::builder()
            .add_source(File::from_str(raw, FileFormat::Toml))
            .build()
            .expect("config should build")
            .try_deserialize()
            .expect("config should deserialize")
    }

    #[test]
    fn parses_full_config_from_toml() {
        let raw = r#"
            use_notifier = true

            [server]
            host = "0.0.0.0"
            port = 3000

            [scheduling]
            time_zone = "Europe/Zurich"
            granularity_minutes = 15
            buffer_after_minutes = 15

            [business_hours.monday]
            open = true
            start = "09:00"
            end = "18:00"

            [business_hours.sunday]
            open = false

            [[services]]
            id = "manicure"
            name = "Classic Manicure"
            duration_minutes = 60
            price = 4500
            currency = "CHF"

            [[staff]]
            id = "anna"
            name = "Anna"
            services = ["manicure"]
        "#;

        let config = parse(raw);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
        assert!(config.use_notifier);

        let scheduling = config.scheduling.expect("scheduling section");
        assert_eq!(scheduling.time_zone.as_deref(), Some("Europe/Zurich"));
        assert_eq!(scheduling.granularity_minutes, 15);
        assert_eq!(scheduling.buffer_before_minutes, 0);
        assert_eq!(scheduling.buffer_after_minutes, 15);

        let hours = config.business_hours.expect("business hours section");
        assert!(hours["monday"].open);
        assert_eq!(hours["monday"].start.as_deref(), Some("09:00"));
        assert!(!hours["sunday"].open);

        let services = config.services.expect("services section");
        assert_eq!(services[0].id, "manicure");
        assert_eq!(services[0].duration_minutes, 60);

        let staff = config.staff.expect("staff section");
        assert_eq!(staff[0].services, vec!["manicure".to_string()]);
    }

    #[test]
    fn defaults_apply_when_sections_missing() {
        let config = parse("");
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert!(!config.use_notifier);
        assert!(config.scheduling.is_none());
        assert!(config.business_hours.is_none());
        assert!(config.services.is_none());
        assert!(config.staff.is_none());
    }

    #[test]
    fn scheduling_defaults_fill_missing_fields() {
        let config = parse("[scheduling]\nbuffer_after_minutes = 10\n");
        let scheduling = config.scheduling.expect("scheduling section");
        assert_eq!(scheduling.granularity_minutes, 15);
        assert_eq!(scheduling.buffer_before_minutes, 0);
        assert_eq!(scheduling.buffer_after_minutes, 10);
        assert!(scheduling.time_zone.is_none());
    }
}
