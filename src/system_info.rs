use std::fmt;

use anyhow::{Context, Result};
use git_version::git_version;
use tracing::{debug, instrument};

use crate::messages::SYSTEM_SECTION_HEADER;

// include -modified if the working tree has uncommitted changes
const COMMIT: &str = git_version!(
    args = ["--abbrev=10", "--always", "--dirty=-modified"],
    fallback = "unknown"
);

/// Name, version, commit and build profile of this binary.
pub fn runtime_version() -> String {
    let profile = if cfg!(debug_assertions) {
        "Dev"
    } else {
        "Release"
    };

    let version = match option_env!("RELEASE_VERSION") {
        Some(tag) if !tag.is_empty() => format!("release {}", tag),
        _ => env!("CARGO_PKG_VERSION").to_string(),
    };

    format!(
        "{} {} (commit {}, {} build)",
        env!("CARGO_PKG_NAME"),
        version,
        COMMIT,
        profile
    )
}

/// Snapshot of the local host, taken fresh for each report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemFacts {
    pub machine_name: String,
    pub user_name: String,
    pub os_description: String,
    pub os_architecture: String,
    pub process_architecture: String,
    pub system_directory: String,
    pub processor_count: String,
    pub runtime_version: String,
}

impl SystemFacts {
    #[instrument(level = "debug")]
    pub fn collect() -> Result<Self> {
        let machine_name = hostname::get()
            .context("failed to read host name")?
            .to_string_lossy()
            .into_owned();
        let processor_count = std::thread::available_parallelism()
            .context("failed to read processor count")?
            .to_string();

        let facts = Self {
            machine_name,
            user_name: whoami::username(),
            os_description: whoami::distro(),
            os_architecture: whoami::arch().to_string(),
            process_architecture: std::env::consts::ARCH.to_string(),
            system_directory: system_directory(),
            processor_count,
            runtime_version: runtime_version(),
        };
        debug!(machine = %facts.machine_name, os = %facts.os_description, "collected system facts");
        Ok(facts)
    }
}

#[cfg(windows)]
fn system_directory() -> String {
    let root = std::env::var("SystemRoot").unwrap_or_else(|_| r"C:\Windows".to_string());
    format!(r"{root}\System32")
}

// Only Windows has a dedicated system directory.
#[cfg(not(windows))]
fn system_directory() -> String {
    String::new()
}

impl fmt::Display for SystemFacts {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{SYSTEM_SECTION_HEADER}")?;
        writeln!(f, "Machine name: {}", self.machine_name)?;
        writeln!(f, "User name: {}", self.user_name)?;
        writeln!(f, "Operating system: {}", self.os_description)?;
        writeln!(f, "OS architecture: {}", self.os_architecture)?;
        writeln!(f, "Process architecture: {}", self.process_architecture)?;
        writeln!(f, "System directory: {}", self.system_directory)?;
        writeln!(f, "Processor count: {}", self.processor_count)?;
        write!(f, "Runtime version: {}", self.runtime_version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_version() {
        let info = runtime_version();
        assert!(info.starts_with(env!("CARGO_PKG_NAME")));
        assert!(info.contains("Dev build") || info.contains("Release build"));
        assert!(info.contains(COMMIT));
    }

    #[test]
    fn collect_reports_process_architecture() {
        let facts = SystemFacts::collect().unwrap();
        assert_eq!(facts.process_architecture, std::env::consts::ARCH);
        assert!(facts.processor_count.parse::<usize>().unwrap() >= 1);
    }

    #[test]
    fn renders_header_and_eight_lines() {
        let facts = SystemFacts {
            machine_name: "box".into(),
            user_name: "alice".into(),
            os_description: "Debian GNU/Linux 12".into(),
            os_architecture: "x86_64".into(),
            process_architecture: "x86_64".into(),
            system_directory: String::new(),
            processor_count: "8".into(),
            runtime_version: "myip 0.1.0".into(),
        };
        let text = facts.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], SYSTEM_SECTION_HEADER);
        assert_eq!(lines[1], "Machine name: box");
        assert_eq!(lines[8], "Runtime version: myip 0.1.0");
    }
}
