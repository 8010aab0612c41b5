//! Config command implementation
//!
//! Prints the effective configuration and optionally validates it against
//! the current environment. Secret values are never printed.

use super::output::{Output, Tone};
use crate::db::DatabaseProvider;
use crate::utils::toml_config::PressroomConfig;
use std::path::Path;

/// Run the config command. Returns `false` when the file cannot be read or
/// validation was requested and failed.
pub fn run(path: &Path, validate: bool, output: &Output) -> bool {
    let config = match PressroomConfig::read(path) {
        Ok(config) => config,
        Err(e) => {
            output.status(Tone::Error, &e.to_string());
            output.hint("Run 'pressroom-server init' to create a configuration file");
            return false;
        }
    };

    output.section(&format!("Configuration: {}", path.display()), true);

    output.section("Server", false);
    output.setting("bind", &config.bind_address());
    output.setting("log_level", &config.server.log_level);

    output.section("Auth", false);
    output.secret_setting(
        "secret",
        &config.auth.jwt_secret_env,
        config.resolve_env(&config.auth.jwt_secret_env).is_some(),
    );
    output.setting(
        "token_expiry",
        &format!("{}s", config.auth.token_expiry_secs),
    );

    output.section("Database", false);
    output.setting("backend", &describe_backend(&config.database_provider()));

    if !validate {
        return true;
    }

    println!();
    match config.validate() {
        Ok(()) => {
            output.status(Tone::Ok, "Configuration is valid");
            true
        }
        Err(e) => {
            output.status(Tone::Error, &e.to_string());
            false
        }
    }
}

fn describe_backend(provider: &DatabaseProvider) -> String {
    match provider {
        DatabaseProvider::Memory => "in-memory (data is lost on restart)".to_string(),
        DatabaseProvider::SQLite { path } => format!("sqlite {}", path),
        #[cfg(feature = "turso")]
        DatabaseProvider::Turso { url, .. } => format!("turso {}", url),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_fails() {
        let temp_dir = TempDir::new().expect("temp dir");
        assert!(!run(
            &temp_dir.path().join("absent.toml"),
            false,
            &Output::no_color()
        ));
    }

    #[test]
    fn test_show_without_validate_succeeds_even_without_secret() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join("pressroom.toml");
        std::fs::write(
            &path,
            "[auth]\njwt_secret_env = \"PRESSROOM_CLI_TEST_UNSET_SECRET\"\n",
        )
        .expect("write");

        assert!(run(&path, false, &Output::no_color()));
        assert!(!run(&path, true, &Output::no_color()));
    }

    #[test]
    fn test_describe_backend() {
        assert!(describe_backend(&DatabaseProvider::Memory).starts_with("in-memory"));
        assert_eq!(
            describe_backend(&DatabaseProvider::SQLite {
                path: "./data/p.db".to_string()
            }),
            "sqlite ./data/p.db"
        );
    }
}
