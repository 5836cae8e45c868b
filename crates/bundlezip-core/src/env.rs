//! Package name and version taken from the environment

/// Basename used when no package name is available.
pub const DEFAULT_BASENAME: &str = "bundle";

const NAME_VARS: [&str; 2] = ["npm_package_name", "CARGO_PKG_NAME"];
const VERSION_VARS: [&str; 2] = ["npm_package_version", "CARGO_PKG_VERSION"];

/// Package identity used to name the archive when no file is configured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageEnv {
    pub package_name: Option<String>,
    pub package_version: Option<String>,
}

impl PackageEnv {
    pub fn new(name: Option<String>, version: Option<String>) -> Self {
        Self {
            package_name: name,
            package_version: version,
        }
    }

    /// Read the process environment.
    ///
    /// Package-manager variables (`npm_package_*`) win over Cargo's
    /// (`CARGO_PKG_*`). Empty values count as unset.
    pub fn from_process_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read package identity through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let first = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .find(|value| !value.trim().is_empty())
        };
        Self {
            package_name: first(&NAME_VARS),
            package_version: first(&VERSION_VARS),
        }
    }

    /// Archive basename without extension: `name[-version]`.
    ///
    /// Scoped names such as `@scope/pkg` become `scope-pkg` so the basename
    /// never contains a path separator.
    pub fn basename(&self) -> String {
        let name = self
            .package_name
            .as_deref()
            .map(sanitize_name)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_BASENAME.to_string());

        match self.package_version.as_deref() {
            Some(version) if !version.is_empty() => format!("{name}-{version}"),
            _ => name,
        }
    }
}

fn sanitize_name(name: &str) -> String {
    name.trim()
        .trim_start_matches('@')
        .replace(['/', '\\'], "-")
}
