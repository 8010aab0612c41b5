//! Terminal output for the Pressroom CLI
//!
//! Every line is rendered to a `String` first so the plain (`--no-color`)
//! form can be asserted on in tests.

use owo_colors::OwoColorize;

/// Severity of a one-line status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Ok,
    Info,
    Warn,
    Error,
}

/// What `init` did with one path of the project skeleton.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scaffolded<'a> {
    /// A file was written; `kind` is a short label such as "config"
    File { kind: &'a str, path: &'a str },
    /// A directory was created
    Dir(&'a str),
    /// The path was left as it was
    Kept { path: &'a str, reason: &'a str },
}

/// Output style configuration
pub struct Output {
    /// Whether to use colored output
    pub colored: bool,
}

impl Default for Output {
    fn default() -> Self {
        Self::new()
    }
}

impl Output {
    pub fn new() -> Self {
        Self { colored: true }
    }

    pub fn no_color() -> Self {
        Self { colored: false }
    }

    pub fn banner(&self) {
        let version = format!("v{}", env!("CARGO_PKG_VERSION"));
        if self.colored {
            println!(
                "\n   {} {}\n",
                "Pressroom".bright_cyan().bold(),
                version.dimmed()
            );
        } else {
            println!("\n   Pressroom {}\n", version);
        }
    }

    fn tag(&self, tone: Tone) -> String {
        if !self.colored {
            return match tone {
                Tone::Ok => "[OK]",
                Tone::Info => "[INFO]",
                Tone::Warn => "[WARN]",
                Tone::Error => "[ERROR]",
            }
            .to_string();
        }
        match tone {
            Tone::Ok => "✓".green().bold().to_string(),
            Tone::Info => "•".blue().to_string(),
            Tone::Warn => "⚠".yellow().bold().to_string(),
            Tone::Error => "✗".red().bold().to_string(),
        }
    }

    pub fn status_line(&self, tone: Tone, message: &str) -> String {
        format!("  {} {}", self.tag(tone), message)
    }

    /// Print a status message; errors go to stderr.
    pub fn status(&self, tone: Tone, message: &str) {
        let line = self.status_line(tone, message);
        if tone == Tone::Error {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }

    pub fn scaffold_line(&self, entry: Scaffolded<'_>) -> String {
        match (entry, self.colored) {
            (Scaffolded::File { kind, path }, true) => format!(
                "  {} {} {}",
                self.tag(Tone::Ok),
                kind.dimmed(),
                path.bright_white()
            ),
            (Scaffolded::File { kind, path }, false) => format!("  [CREATED] {} {}", kind, path),
            (Scaffolded::Dir(path), true) => format!(
                "  {} {} {}",
                self.tag(Tone::Ok),
                "directory".dimmed(),
                path.bright_white()
            ),
            (Scaffolded::Dir(path), false) => format!("  [CREATED] directory {}", path),
            (Scaffolded::Kept { path, reason }, true) => format!(
                "  {} {} {}",
                "○".yellow(),
                path.dimmed(),
                format!("({})", reason).yellow()
            ),
            (Scaffolded::Kept { path, reason }, false) => {
                format!("  [SKIPPED] {} ({})", path, reason)
            }
        }
    }

    pub fn scaffolded(&self, entry: Scaffolded<'_>) {
        println!("{}", self.scaffold_line(entry));
    }

    /// Print a section title; `major` titles are underlined.
    pub fn section(&self, title: &str, major: bool) {
        match (self.colored, major) {
            (true, true) => println!("\n  {}", title.bright_white().bold().underline()),
            (true, false) => println!("\n  {}", title.cyan().bold()),
            (false, true) => println!("\n  === {} ===", title),
            (false, false) => println!("\n  --- {} ---", title),
        }
    }

    pub fn setting_line(&self, key: &str, value: &str) -> String {
        if self.colored {
            format!("    {}: {}", key.dimmed(), value.bright_white())
        } else {
            format!("    {}: {}", key, value)
        }
    }

    pub fn setting(&self, key: &str, value: &str) {
        println!("{}", self.setting_line(key, value));
    }

    /// Describe a secret by the variable that holds it. The value itself is
    /// never passed in, so it cannot end up on screen.
    pub fn secret_line(&self, key: &str, env_name: &str, present: bool) -> String {
        let state = if present { "set" } else { "NOT SET" };
        self.setting_line(key, &format!("${} ({})", env_name, state))
    }

    pub fn secret_setting(&self, key: &str, env_name: &str, present: bool) {
        println!("{}", self.secret_line(key, env_name, present));
    }

    /// One numbered next step with the shell commands that carry it out.
    pub fn next_step(&self, n: usize, what: &str, commands: &[&str]) {
        println!();
        self.status(Tone::Info, &format!("{}. {}", n, what));
        for cmd in commands {
            if self.colored {
                println!("     {}", format!("$ {}", cmd).bright_cyan());
            } else {
                println!("     $ {}", cmd);
            }
        }
    }

    pub fn hint(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "💡".dimmed(), message.dimmed().italic());
        } else {
            println!("\n  [TIP] {}", message);
        }
    }

    pub fn done(&self, message: &str) {
        if self.colored {
            println!("\n  {} {}", "🚀".green(), message.bright_green().bold());
        } else {
            println!("\n  [DONE] {}", message);
        }
    }
}
