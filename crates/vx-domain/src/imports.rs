use std::collections::BTreeSet;

use crate::stdlib::is_standard_lib;

/// Module names that must be installed before the targets can run:
/// `reference − (standard library ∪ installed)`.
///
/// Standard-library membership is checked against the reference name as
/// written; installed-set membership is checked case-insensitively (freeze
/// output is already lower-cased). The asymmetry is part of the contract.
#[must_use]
pub fn missing_modules(
    reference: &BTreeSet<String>,
    installed: &BTreeSet<String>,
) -> BTreeSet<String> {
    reference
        .iter()
        .filter(|module| !is_standard_lib(module.as_str()))
        .filter(|module| !installed.contains(&module.to_lowercase()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(names: &[&str]) -> BTreeSet<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn subtracts_stdlib_and_installed() {
        let reference = set(&["os", "numpy", "requests", "pandas"]);
        let installed = set(&["requests"]);
        assert_eq!(
            missing_modules(&reference, &installed),
            set(&["numpy", "pandas"])
        );
    }

    #[test]
    fn missing_is_a_subset_of_the_reference() {
        let reference = set(&["numpy", "scipy"]);
        let missing = missing_modules(&reference, &BTreeSet::new());
        assert!(missing.iter().all(|module| reference.contains(module)));
    }

    #[test]
    fn missing_never_contains_stdlib_names() {
        let reference = set(&["os", "sys", "json"]);
        assert!(missing_modules(&reference, &BTreeSet::new()).is_empty());
    }

    #[test]
    fn installed_match_is_case_insensitive() {
        let reference = set(&["Requests"]);
        let installed = set(&["requests"]);
        assert!(missing_modules(&reference, &installed).is_empty());
    }

    #[test]
    fn stdlib_match_is_case_sensitive() {
        // "OS" is not the stdlib name "os", so it stays missing.
        let reference = set(&["OS"]);
        assert_eq!(missing_modules(&reference, &BTreeSet::new()), set(&["OS"]));
    }

    #[test]
    fn empty_reference_yields_empty_missing() {
        assert!(missing_modules(&BTreeSet::new(), &set(&["requests"])).is_empty());
    }
}
