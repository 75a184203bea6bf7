//! Description of the platform a build is configured for.

use serde::{Deserialize, Deserializer, Serialize};

/// Target operating system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Os {
    /// Linux.
    Linux,
    /// macOS.
    #[serde(alias = "macOS", alias = "macos")]
    Macos,
    /// Windows desktop.
    Windows,
    /// Android.
    Android,
    /// iOS.
    #[serde(rename = "iOS")]
    Ios,
    /// FreeBSD.
    #[serde(rename = "FreeBSD")]
    FreeBsd,
}

impl Os {
    /// Operating system this binary was compiled for.
    pub fn host() -> Self {
        if cfg!(target_os = "macos") {
            Self::Macos
        } else if cfg!(target_os = "windows") {
            Self::Windows
        } else if cfg!(target_os = "freebsd") {
            Self::FreeBsd
        } else {
            Self::Linux
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Linux => "Linux",
            Self::Macos => "Macos",
            Self::Windows => "Windows",
            Self::Android => "Android",
            Self::Ios => "iOS",
            Self::FreeBsd => "FreeBSD",
        }
    }
}

impl std::fmt::Display for Os {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Os {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "macos" | "darwin" => Ok(Self::Macos),
            "windows" => Ok(Self::Windows),
            "android" => Ok(Self::Android),
            "ios" => Ok(Self::Ios),
            "freebsd" => Ok(Self::FreeBsd),
            _ => Err(format!("unknown operating system: {s}")),
        }
    }
}

/// Compiler family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Compiler {
    /// GNU C++.
    Gcc,
    /// LLVM clang.
    Clang,
    /// Xcode's clang.
    AppleClang,
    /// Microsoft Visual C++.
    #[serde(alias = "Visual Studio")]
    Msvc,
}

impl Compiler {
    fn host() -> Self {
        match Os::host() {
            Os::Macos | Os::Ios => Self::AppleClang,
            Os::Windows => Self::Msvc,
            Os::FreeBsd => Self::Clang,
            Os::Linux | Os::Android => Self::Gcc,
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gcc => "gcc",
            Self::Clang => "clang",
            Self::AppleClang => "apple-clang",
            Self::Msvc => "msvc",
        }
    }
}

impl std::fmt::Display for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Compiler {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcc" => Ok(Self::Gcc),
            "clang" => Ok(Self::Clang),
            "apple-clang" => Ok(Self::AppleClang),
            "msvc" | "visual studio" => Ok(Self::Msvc),
            _ => Err(format!("unknown compiler: {s}")),
        }
    }
}

/// CMake-style build type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BuildType {
    /// Unoptimised with debug info.
    Debug,
    /// Optimised.
    #[default]
    Release,
    /// Optimised with debug info.
    RelWithDebInfo,
    /// Optimised for size.
    MinSizeRel,
}

/// Platform and toolchain the framework is configured for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Target {
    /// Operating system being built for.
    pub os: Os,

    /// Compiler family.
    pub compiler: Compiler,

    /// Compiler version. Short forms such as `"5"` or `"5.3"` are accepted.
    #[serde(deserialize_with = "deserialize_lenient_version")]
    pub compiler_version: Option<semver::Version>,

    /// C++ standard library (`libstdc++`, `libstdc++11`, `libc++`, ...).
    pub libcxx: Option<String>,

    /// Build type.
    pub build_type: BuildType,

    /// Whether the build machine differs from the target.
    pub cross_building: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self::host()
    }
}

impl Target {
    /// A target matching the host, with an unknown compiler version.
    pub fn host() -> Self {
        let compiler = Compiler::host();
        Self {
            os: Os::host(),
            compiler,
            compiler_version: None,
            libcxx: match compiler {
                Compiler::Gcc => Some("libstdc++11".to_string()),
                Compiler::Clang | Compiler::AppleClang => Some("libc++".to_string()),
                Compiler::Msvc => None,
            },
            build_type: BuildType::Release,
            cross_building: false,
        }
    }

    /// Whether the compiler is `compiler` and its known version is below `version`.
    ///
    /// An unknown version never counts as older.
    pub fn compiler_older_than(&self, compiler: Compiler, version: &str) -> bool {
        if self.compiler != compiler {
            return false;
        }
        match (&self.compiler_version, parse_lenient_version(version)) {
            (Some(current), Ok(bound)) => *current < bound,
            _ => false,
        }
    }
}

/// Parse a version that may omit its minor or patch component.
///
/// # Errors
///
/// Returns an error if the padded string is still not valid semver.
pub fn parse_lenient_version(input: &str) -> Result<semver::Version, semver::Error> {
    let trimmed = input.trim();
    let parts = trimmed.split('.').count();
    let padded = match parts {
        1 => format!("{trimmed}.0.0"),
        2 => format!("{trimmed}.0"),
        _ => trimmed.to_string(),
    };
    semver::Version::parse(&padded)
}

fn deserialize_lenient_version<'de, D>(deserializer: D) -> Result<Option<semver::Version>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|s| parse_lenient_version(&s).map_err(serde::de::Error::custom))
        .transpose()
}
