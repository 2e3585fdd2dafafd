//! Version command for the Twigg CLI.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version_string() -> String {
    format!("twigg {}", VERSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string_has_semver() {
        let version = version_string();
        assert!(version.starts_with("twigg "));
        assert!(VERSION.split('.').count() >= 2);
    }
}
