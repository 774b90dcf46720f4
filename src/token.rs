use crate::consts::DIGITS_RE;

/// A file name split into alternating non-digit parts and digit runs.
///
/// `parts` always holds exactly one more element than `digits`; the name reads
/// `parts[0] digits[0] parts[1] ... digits[n-1] parts[n]`, where any part may
/// be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tokens {
    pub digits: Vec<String>,
    pub parts: Vec<String>,
}

impl Tokens {
    /// The name with every digit run removed.
    pub fn signature(&self) -> String {
        self.parts.concat()
    }
}

/// Split `name` into digit runs and the text around them.
pub fn tokenize(name: &str) -> Tokens {
    let mut digits = Vec::new();
    let mut parts = Vec::new();
    let mut last = 0;
    for m in DIGITS_RE.find_iter(name) {
        parts.push(name[last..m.start()].to_string());
        digits.push(m.as_str().to_string());
        last = m.end();
    }
    parts.push(name[last..].to_string());
    tracing::trace!(name, digits = digits.len(), "tokenized");
    Tokens { digits, parts }
}

/// Re-join parts and digit runs in their original order.
/// `parts` must hold one more element than `digits`.
pub(crate) fn weave(parts: &[String], digits: &[String]) -> String {
    let mut out = String::new();
    for (i, part) in parts.iter().enumerate() {
        out.push_str(part);
        if let Some(d) = digits.get(i) {
            out.push_str(d);
        }
    }
    out
}
