use regex::Regex;
use std::sync::LazyLock;

/// Matches a maximal run of ASCII digits. Other Unicode digits are treated as text.
pub static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").unwrap());

/// Matches one formatter token: `%`, an optional width, then the key character.
/// The key is optional so a dangling `%` at the end of a pattern is still caught.
pub static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)%([0-9]*)(.?)").unwrap());

/// Pattern used when no format is given: length, generic file pattern, human range.
pub const DEFAULT_FORMAT: &str = "%4l %h%p%t %R";
