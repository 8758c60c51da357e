//! Target frameworks: monikers, the known-framework table and best-guess
//! resolution of partial references.

mod resolve;

use std::fmt;
use std::sync::LazyLock;

use smol_str::SmolStr;

pub use resolve::{
    BestGuessPolicy, best_guess_framework_identifier, best_guess_framework_profile,
    best_guess_framework_version, framework_identifiers, framework_profiles, framework_versions,
    frameworks_with_short_names, resolve_framework,
};

pub const NET_FRAMEWORK: &str = ".NETFramework";
pub const NET_STANDARD: &str = ".NETStandard";
pub const NET_CORE_APP: &str = ".NETCoreApp";

/// Short-name prefixes, longest first so `netstandard` wins over `net`.
const SHORT_PREFIXES: &[(&str, &str)] = &[
    ("netstandard", NET_STANDARD),
    ("netcoreapp", NET_CORE_APP),
    ("xamarinios", "Xamarin.iOS"),
    ("xamarinmac", "Xamarin.Mac"),
    ("monoandroid", "MonoAndroid"),
    ("net", NET_FRAMEWORK),
    ("uap", "UAP"),
];

/// A four-part framework version; missing parts are zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct FrameworkVersion([u32; 4]);

impl FrameworkVersion {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self([major, minor, 0, 0])
    }

    pub fn major(self) -> u32 {
        self.0[0]
    }

    pub fn minor(self) -> u32 {
        self.0[1]
    }

    /// Parse a dotted version of two to four parts, e.g. `4.7.2`.
    pub fn parse(text: &str) -> Option<Self> {
        let mut parts = [0u32; 4];
        let mut count = 0;
        for part in text.split('.') {
            if count == 4 {
                return None;
            }
            parts[count] = part.parse().ok()?;
            count += 1;
        }
        (count >= 2).then_some(Self(parts))
    }

    /// Parse an undotted short-name version where each digit is a part: `472` is 4.7.2.
    fn parse_compact(digits: &str) -> Option<Self> {
        if digits.is_empty() || digits.len() > 4 {
            return None;
        }
        let mut parts = [0u32; 4];
        for (i, c) in digits.chars().enumerate() {
            parts[i] = c.to_digit(10)?;
        }
        Some(Self(parts))
    }

    /// Significant parts: trailing zeros dropped, at least major and minor.
    fn significant(&self) -> &[u32] {
        let mut len = 4;
        while len > 2 && self.0[len - 1] == 0 {
            len -= 1;
        }
        &self.0[..len]
    }
}

impl fmt::Display for FrameworkVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.significant().iter().map(u32::to_string).collect();
        f.write_str(&parts.join("."))
    }
}

/// A resolved target framework moniker.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NuGetFramework {
    pub identifier: SmolStr,
    pub version: FrameworkVersion,
    /// Empty when the framework has no profile.
    pub profile: SmolStr,
}

impl NuGetFramework {
    pub fn new(identifier: impl Into<SmolStr>, version: FrameworkVersion) -> Self {
        Self {
            identifier: identifier.into(),
            version,
            profile: SmolStr::default(),
        }
    }

    pub fn with_profile(mut self, profile: impl Into<SmolStr>) -> Self {
        self.profile = profile.into();
        self
    }

    /// Parse a short folder name such as `net472`, `netstandard2.0`,
    /// `net8.0-windows` or `net40-client`.
    ///
    /// Returns `None` unless the name denotes one specific framework.
    pub fn parse_folder(short_name: &str) -> Option<Self> {
        let lower = short_name.trim().to_ascii_lowercase();
        let (main, suffix) = match lower.split_once('-') {
            Some((main, suffix)) => (main, Some(suffix)),
            None => (lower.as_str(), None),
        };
        let (prefix, mut identifier) = SHORT_PREFIXES
            .iter()
            .find(|(prefix, _)| main.starts_with(prefix))
            .copied()?;
        let version_text = &main[prefix.len()..];
        let version = if version_text.contains('.') {
            FrameworkVersion::parse(version_text)?
        } else {
            FrameworkVersion::parse_compact(version_text)?
        };

        let modern = identifier == NET_FRAMEWORK && version.major() >= 5;
        if modern {
            identifier = NET_CORE_APP;
        }
        let mut framework = NuGetFramework::new(identifier, version);
        // on net5.0 and later the suffix names an OS platform, not a profile
        if let Some(profile) = suffix.filter(|_| !modern && identifier != NET_CORE_APP) {
            let mut chars = profile.chars();
            let capitalized: String = chars
                .next()
                .map(|c| c.to_ascii_uppercase())
                .into_iter()
                .chain(chars)
                .collect();
            framework.profile = SmolStr::new(capitalized);
        }
        Some(framework)
    }

    /// The short folder name, e.g. `net472` or `net8.0`.
    pub fn short_name(&self) -> String {
        let version = &self.version;
        let mut name = match self.identifier.as_str() {
            NET_FRAMEWORK => {
                let digits: String = version.significant().iter().map(u32::to_string).collect();
                format!("net{digits}")
            }
            NET_CORE_APP if version.major() >= 5 => format!("net{version}"),
            id => {
                let prefix = SHORT_PREFIXES
                    .iter()
                    .find(|(_, known)| known.eq_ignore_ascii_case(id))
                    .map_or_else(|| id.to_ascii_lowercase(), |(prefix, _)| prefix.to_string());
                format!("{prefix}{version}")
            }
        };
        if !self.profile.is_empty() {
            name.push('-');
            name.push_str(&self.profile.to_ascii_lowercase());
        }
        name
    }
}

static KNOWN_FRAMEWORKS: LazyLock<Vec<NuGetFramework>> = LazyLock::new(|| {
    let mut known = Vec::new();
    let net_framework: &[(u32, u32, u32)] = &[
        (2, 0, 0),
        (3, 0, 0),
        (3, 5, 0),
        (4, 0, 0),
        (4, 5, 0),
        (4, 5, 1),
        (4, 5, 2),
        (4, 6, 0),
        (4, 6, 1),
        (4, 6, 2),
        (4, 7, 0),
        (4, 7, 1),
        (4, 7, 2),
        (4, 8, 0),
        (4, 8, 1),
    ];
    for &(major, minor, build) in net_framework {
        let version = FrameworkVersion([major, minor, build, 0]);
        known.push(NuGetFramework::new(NET_FRAMEWORK, version));
        if (major, minor) == (3, 5) || (major, minor) == (4, 0) {
            known.push(NuGetFramework::new(NET_FRAMEWORK, version).with_profile("Client"));
        }
    }
    for minor in 0..=6 {
        known.push(NuGetFramework::new(NET_STANDARD, FrameworkVersion::new(1, minor)));
    }
    for minor in 0..=1 {
        known.push(NuGetFramework::new(NET_STANDARD, FrameworkVersion::new(2, minor)));
    }
    for (major, minor) in [(1, 0), (1, 1), (2, 0), (2, 1), (2, 2), (3, 0), (3, 1)] {
        known.push(NuGetFramework::new(NET_CORE_APP, FrameworkVersion::new(major, minor)));
    }
    for major in 5..=9 {
        known.push(NuGetFramework::new(NET_CORE_APP, FrameworkVersion::new(major, 0)));
    }
    known
});

/// Known frameworks, grouped by identifier, oldest version first.
pub fn known_frameworks() -> &'static [NuGetFramework] {
    &KNOWN_FRAMEWORKS
}
