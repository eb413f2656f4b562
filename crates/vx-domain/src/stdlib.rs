/// Built-in modules that are always importable and never installed.
///
/// Deliberately not exhaustive; extend as needed.
pub const STANDARD_LIBS: &[&str] = &[
    "os", "sys", "time", "datetime", "math", "json", "argparse", "re", "platform", "logging",
    "socket", "http", "email",
];

#[must_use]
pub fn is_standard_lib(module: &str) -> bool {
    STANDARD_LIBS.contains(&module)
}
