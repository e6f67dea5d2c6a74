//! Build and version information.

use std::fmt;

use serde::Serialize;

const UNKNOWN: &str = "unknown";

/// Version details baked in at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_commit: &'static str,
    pub build_date: &'static str,
    pub platform: String,
}

impl BuildInfo {
    /// Reads `ZENTA_GIT_COMMIT` and `ZENTA_BUILD_DATE` from the build
    /// environment, falling back to "unknown".
    pub fn current() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            git_commit: option_env!("ZENTA_GIT_COMMIT").unwrap_or(UNKNOWN),
            build_date: option_env!("ZENTA_BUILD_DATE").unwrap_or(UNKNOWN),
            platform: format!("{}/{}", std::env::consts::OS, std::env::consts::ARCH),
        }
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "zenta {} ({}) built on {} for {}",
            self.version, self.git_commit, self.build_date, self.platform
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_uses_package_version() {
        let info = BuildInfo::current();
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.git_commit.is_empty());
        assert!(info.platform.contains('/'));
    }

    #[test]
    fn test_display_format() {
        let info = BuildInfo {
            version: "1.2.3",
            git_commit: "abc1234",
            build_date: "2025-01-01",
            platform: "linux/x86_64".to_string(),
        };
        assert_eq!(
            info.to_string(),
            "zenta 1.2.3 (abc1234) built on 2025-01-01 for linux/x86_64"
        );
    }

    #[test]
    fn test_serialize_json() {
        let info = BuildInfo::current();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
        assert!(json["platform"].is_string());
    }
}
