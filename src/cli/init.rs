//! Init command implementation
//!
//! Scaffolds a new Pressroom project with all necessary configuration files.

use super::output::{Output, Scaffolded, Tone};
use std::fs;
use std::path::Path;

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Project already exists (pressroom.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: std::path::PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.section("Initializing Pressroom Project", true);

    let base_path = &config.path;

    let config_path = base_path.join("pressroom.toml");
    if config_path.exists() && !config.force {
        output.status(Tone::Warn, "pressroom.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    output.section("Creating directories", false);

    let data_dir = base_path.join("data");
    if data_dir.exists() {
        output.scaffolded(Scaffolded::Kept {
            path: "data",
            reason: "already exists",
        });
    } else {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.status(Tone::Error, &format!("Failed to create data: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.scaffolded(Scaffolded::Dir("data"));
    }

    output.section("Creating configuration files", false);

    let files = [
        ("config", "pressroom.toml", generate_pressroom_toml(&config)),
        ("env", ".env.example", generate_env_example().to_string()),
    ];
    for (kind, name, content) in files.iter() {
        if let Err(e) = write_file(&base_path.join(name), content, config.force) {
            output.status(Tone::Error, &format!("Failed to create {}: {}", name, e));
            return InitResult::Error(e.to_string());
        }
        output.scaffolded(Scaffolded::File {
            kind: *kind,
            path: *name,
        });
    }

    // Never clobber an existing .gitignore, even with --force
    let gitignore_path = base_path.join(".gitignore");
    if gitignore_path.exists() {
        output.scaffolded(Scaffolded::Kept {
            path: ".gitignore",
            reason: "already exists",
        });
    } else if let Err(e) = write_file(&gitignore_path, generate_gitignore(), false) {
        output.status(Tone::Warn, &format!("Failed to create .gitignore: {}", e));
    } else {
        output.scaffolded(Scaffolded::File {
            kind: "file",
            path: ".gitignore",
        });
    }

    output.done("Pressroom project initialized successfully!");

    output.section("Next Steps", true);
    output.next_step(
        1,
        "Set up environment variables:",
        &["cp .env.example .env", "# Edit .env and set JWT_SECRET (min 32 chars)"],
    );
    output.next_step(2, "Start the server:", &["pressroom-server"]);

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));
    output.hint("API docs available at /swagger-ui/ (requires 'swagger-ui' feature)");

    InitResult::Success
}

fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<()> {
    if path.exists() && !force {
        return Ok(()); // Skip existing files unless force is true
    }
    fs::write(path, content)
}

fn generate_pressroom_toml(config: &InitConfig) -> String {
    format!(
        r#"# Pressroom Configuration
# =======================
# Generated by: pressroom-server init
#
# REQUIRED: Set this environment variable before starting:
#   - JWT_SECRET: secret key for token signing (min 32 characters)

[server]
host = "{host}"
port = {port}
log_level = "info"

[auth]
jwt_secret_env = "JWT_SECRET"
# Token lifetime in seconds
token_expiry_secs = 3600

[database]
# Local SQLite file, or ":memory:" for a throwaway database
url = "./data/pressroom.db"
# Remote Turso database (build with --features turso)
# turso_url_env = "TURSO_URL"
# turso_token_env = "TURSO_AUTH_TOKEN"
"#,
        host = config.host,
        port = config.port,
    )
}

fn generate_env_example() -> &'static str {
    r#"# Pressroom Environment Variables
# ===============================
# Copy this file to .env and fill in the values.

# REQUIRED: token signing secret (minimum 32 characters)
# Generate with: openssl rand -base64 32
JWT_SECRET=change-me-in-production-use-at-least-32-characters

# Optional: Logging filter, overrides server.log_level
RUST_LOG=info,pressroom=debug

# Optional: Turso cloud database
# TURSO_URL=libsql://your-db.turso.io
# TURSO_AUTH_TOKEN=your-token
"#
}

fn generate_gitignore() -> &'static str {
    r#"# Pressroom Generated Files
/data/
*.db
*.db-journal

# Environment
.env
.env.local

# Rust
/target/
"#
}
