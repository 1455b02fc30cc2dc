//! String transformation utilities for port metadata

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("valid markup regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Strips markup tags and collapses whitespace runs into single spaces.
///
/// # Examples
/// ```
/// use vcport::core::utils::normalize_description;
///
/// assert_eq!(
///     normalize_description("  A <b>fast</b>\n\ttool. "),
///     "A fast tool."
/// );
/// ```
pub fn normalize_description(value: &str) -> String {
    let value = MARKUP.replace_all(value, "");
    let value = WHITESPACE.replace_all(&value, " ");
    value.trim().to_string()
}

/// Splits a description into a synopsis and an optional long description.
///
/// The first `". "` ends the synopsis, which keeps its full stop. Version
/// numbers such as `1.2.3` are not split because the separator needs a
/// trailing space.
///
/// # Examples
/// ```
/// use vcport::core::utils::format_description;
///
/// let (synopsis, body) = format_description("Release tool. Generates ports for 1.2.3 builds.");
/// assert_eq!(synopsis, "Release tool.");
/// assert_eq!(body.as_deref(), Some("Generates ports for 1.2.3 builds."));
/// ```
pub fn format_description(value: &str) -> (String, Option<String>) {
    let value = normalize_description(value);
    match value.split_once(". ") {
        Some((synopsis, rest)) if !rest.trim().is_empty() => {
            (format!("{synopsis}."), Some(rest.trim().to_string()))
        }
        _ => (value, None),
    }
}

/// Converts a package name into a vcpkg port name: lowercase ASCII
/// alphanumerics separated by single hyphens.
///
/// # Examples
/// ```
/// use vcport::core::utils::to_port_name;
///
/// assert_eq!(to_port_name("rclcpp_action"), "rclcpp-action");
/// assert_eq!(to_port_name("My Package"), "my-package");
/// ```
pub fn to_port_name(s: &str) -> String {
    let mut result = String::new();
    for ch in s.chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
        } else if !result.is_empty() && !result.ends_with('-') {
            result.push('-');
        }
    }
    result.trim_end_matches('-').to_string()
}
