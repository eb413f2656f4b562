use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Collect the top-level module names referenced by the given source files.
///
/// This is a textual heuristic, not a parser: every line whose first
/// whitespace-delimited token is exactly `import` or `from` contributes its
/// second token, truncated at the first `.`, case as written. Lines inside
/// comments or docstrings match too, parenthesized import lists only
/// contribute their head module, and relative imports are not special-cased.
///
/// # Errors
///
/// An unreadable path aborts the whole scan; there is no partial result.
pub fn scan_files<P: AsRef<Path>>(paths: &[P]) -> Result<BTreeSet<String>> {
    let mut modules = BTreeSet::new();
    for path in paths {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        scan_source(&content, &mut modules);
        tracing::debug!(file = %path.display(), total = modules.len(), "scanned");
    }
    Ok(modules)
}

fn scan_source(source: &str, modules: &mut BTreeSet<String>) {
    for line in source.lines() {
        let mut tokens = line.split_whitespace();
        let Some(keyword) = tokens.next() else {
            continue;
        };
        if keyword != "import" && keyword != "from" {
            continue;
        }
        let Some(target) = tokens.next() else {
            continue;
        };
        let module = target.split('.').next().unwrap_or("");
        if !module.is_empty() {
            modules.insert(module.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn scan_str(source: &str) -> BTreeSet<String> {
        let mut modules = BTreeSet::new();
        scan_source(source, &mut modules);
        modules
    }

    fn names(modules: &BTreeSet<String>) -> Vec<&str> {
        modules.iter().map(String::as_str).collect()
    }

    #[test]
    fn plain_import_yields_module_name() {
        assert_eq!(names(&scan_str("import numpy")), vec!["numpy"]);
    }

    #[test]
    fn from_import_keeps_top_level_only() {
        assert_eq!(names(&scan_str("from os.path import join")), vec!["os"]);
    }

    #[test]
    fn aliased_import_keeps_module_name() {
        assert_eq!(names(&scan_str("import numpy as np")), vec!["numpy"]);
    }

    #[test]
    fn indented_imports_match_by_design() {
        // Heuristic, not a parser: lines inside functions or docstrings count.
        assert_eq!(names(&scan_str("    import requests")), vec!["requests"]);
    }

    #[test]
    fn string_embedded_import_does_not_match() {
        assert!(scan_str(r#"text = "import fake""#).is_empty());
    }

    #[test]
    fn parenthesized_list_only_contributes_head_module() {
        let source = "from collections import (\n    OrderedDict,\n    defaultdict,\n)";
        assert_eq!(names(&scan_str(source)), vec!["collections"]);
    }

    #[test]
    fn bare_keyword_line_is_skipped() {
        assert!(scan_str("import").is_empty());
        assert!(scan_str("from").is_empty());
    }

    #[test]
    fn scan_is_deterministic_for_identical_content() {
        let source = "import numpy\nfrom os.path import join\nimport numpy\n";
        assert_eq!(scan_str(source), scan_str(source));
        assert_eq!(names(&scan_str(source)), vec!["numpy", "os"]);
    }

    #[test]
    fn scan_files_merges_across_files() -> Result<()> {
        let temp = tempfile::tempdir().expect("tempdir");
        let first = temp.path().join("first.py");
        let second = temp.path().join("second.py");
        std::fs::write(&first, "import numpy\n")?;
        let mut file = std::fs::File::create(&second)?;
        writeln!(file, "from requests import get")?;

        let modules = scan_files(&[first, second])?;
        assert_eq!(names(&modules), vec!["numpy", "requests"]);
        Ok(())
    }

    #[test]
    fn missing_file_aborts_the_scan() {
        let temp = tempfile::tempdir().expect("tempdir");
        let present = temp.path().join("present.py");
        std::fs::write(&present, "import numpy\n").expect("write");
        let absent = temp.path().join("absent.py");

        let err = scan_files(&[present, absent]).unwrap_err();
        assert!(err.to_string().contains("absent.py"), "got: {err}");
    }
}
