//! Framework descriptors for completion and best-guess reference lookup.

use rustc_hash::FxHashSet;

use super::{FrameworkVersion, NuGetFramework, known_frameworks};
use crate::schema::FrameworkInfo;

/// How partial framework references (identifier, version or profile
/// alone) are matched.
///
/// Users editing a multi-targeted project usually extend the matrix it
/// already declares, so document frameworks are tried first by default.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BestGuessPolicy {
    /// Try frameworks declared in the document before the known table.
    pub prefer_document_frameworks: bool,
    /// Fall back to the known table: the newest version of an identifier,
    /// or the known version/profile variants of document frameworks.
    pub fall_back_to_newest: bool,
}

impl Default for BestGuessPolicy {
    fn default() -> Self {
        Self {
            prefer_document_frameworks: true,
            fall_back_to_newest: true,
        }
    }
}

/// Every known framework, named by its short folder name.
pub fn frameworks_with_short_names() -> Vec<FrameworkInfo> {
    known_frameworks()
        .iter()
        .map(|fw| FrameworkInfo::new(fw.short_name(), fw.clone()))
        .collect()
}

/// Distinct identifiers, each paired with its newest known version.
pub fn framework_identifiers() -> Vec<FrameworkInfo> {
    let mut seen = FxHashSet::default();
    let mut identifiers = Vec::new();
    for fw in known_frameworks() {
        if seen.insert(fw.identifier.clone()) {
            if let Some(newest) = framework_versions(&fw.identifier).pop() {
                identifiers.push(FrameworkInfo::new(fw.identifier.clone(), newest.framework));
            }
        }
    }
    identifiers
}

/// Known versions of `identifier`, oldest first, named `v4.7.2` style.
pub fn framework_versions(identifier: &str) -> Vec<FrameworkInfo> {
    known_frameworks()
        .iter()
        .filter(|fw| fw.identifier.eq_ignore_ascii_case(identifier) && fw.profile.is_empty())
        .map(|fw| FrameworkInfo::new(format!("v{}", fw.version), fw.clone()))
        .collect()
}

/// Known profiles of one framework version.
pub fn framework_profiles(identifier: &str, version: FrameworkVersion) -> Vec<FrameworkInfo> {
    known_frameworks()
        .iter()
        .filter(|fw| {
            fw.identifier.eq_ignore_ascii_case(identifier)
                && fw.version == version
                && !fw.profile.is_empty()
        })
        .map(|fw| FrameworkInfo::new(fw.profile.clone(), fw.clone()))
        .collect()
}

/// A framework short name, if it denotes one specific framework.
pub fn resolve_framework(short_name: &str) -> Option<FrameworkInfo> {
    NuGetFramework::parse_folder(short_name).map(|fw| FrameworkInfo::new(short_name, fw))
}

pub fn best_guess_framework_identifier(
    identifier: &str,
    document: &[NuGetFramework],
    policy: BestGuessPolicy,
) -> Option<FrameworkInfo> {
    if policy.prefer_document_frameworks {
        if let Some(existing) = document
            .iter()
            .find(|fw| fw.identifier.eq_ignore_ascii_case(identifier))
        {
            return Some(FrameworkInfo::new(identifier, existing.clone()));
        }
    }
    if policy.fall_back_to_newest {
        return framework_versions(identifier).pop();
    }
    None
}

/// `version` may carry a leading `v`, as in `v4.7.2`.
pub fn best_guess_framework_version(
    version: &str,
    document: &[NuGetFramework],
    policy: BestGuessPolicy,
) -> Option<FrameworkInfo> {
    let parsed = FrameworkVersion::parse(version.trim_start_matches(['v', 'V']))?;
    if policy.prefer_document_frameworks {
        if let Some(existing) = document.iter().find(|fw| fw.version == parsed) {
            return Some(FrameworkInfo::new(version, existing.clone()));
        }
    }
    if policy.fall_back_to_newest {
        return document
            .iter()
            .flat_map(|fw| framework_versions(&fw.identifier))
            .find(|known| known.framework.version == parsed);
    }
    None
}

pub fn best_guess_framework_profile(
    profile: &str,
    document: &[NuGetFramework],
    policy: BestGuessPolicy,
) -> Option<FrameworkInfo> {
    if policy.prefer_document_frameworks {
        if let Some(existing) = document
            .iter()
            .find(|fw| fw.profile.eq_ignore_ascii_case(profile))
        {
            return Some(FrameworkInfo::new(profile, existing.clone()));
        }
    }
    if policy.fall_back_to_newest {
        return document
            .iter()
            .flat_map(|fw| framework_profiles(&fw.identifier, fw.version))
            .find(|known| known.name.eq_ignore_ascii_case(profile));
    }
    None
}
