use std::str::FromStr;

use crate::attrs::AttrKey;
use crate::consts::TOKEN_RE;
use crate::error::{Result, SequenceError};
use crate::sequence::Sequence;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field { key: AttrKey, width: Option<usize> },
}

/// A parsed format pattern.
///
/// Patterns mix literal text with `%` tokens naming sequence attributes:
///
/// | token | value                        |
/// |-------|------------------------------|
/// | `%l`  | length                       |
/// | `%s`  | start frame                  |
/// | `%e`  | end frame                    |
/// | `%f`  | frames present               |
/// | `%m`  | frames missing               |
/// | `%p`  | padding template (`%04d`)    |
/// | `%r`  | compact range (`1-10`)       |
/// | `%R`  | grouped range (`1-3 5 7-10`) |
/// | `%h`  | head                         |
/// | `%t`  | tail                         |
///
/// A width between `%` and the key right-aligns the value, `%4l` renders a
/// length of 3 as `   3`. `%%` is a literal percent sign.
///
/// # Examples
///
/// ```rust
/// use frameseq::{BuildOptions, Sequence, Template};
///
/// let seq = Sequence::new(
///     ["shot.001.exr", "shot.003.exr", "shot.004.exr"],
///     &BuildOptions::new("/renders"),
/// )?;
/// let tpl: Template = "%h%p%t [%R]".parse()?;
/// assert_eq!(tpl.render(&seq), "shot.%03d.exr [1 3-4]");
/// # Ok::<(), frameseq::SequenceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(pattern: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in TOKEN_RE.captures_iter(pattern) {
            let Some(whole) = caps.get(0) else { continue };
            literal.push_str(&pattern[last..whole.start()]);
            last = whole.end();

            let width = &caps[1];
            let key = &caps[2];
            if key == "%" && width.is_empty() {
                literal.push('%');
                continue;
            }

            let unknown = || SequenceError::UnknownToken(whole.as_str().to_string());
            let mut chars = key.chars();
            let key = chars.next().and_then(AttrKey::from_char).ok_or_else(unknown)?;
            let width = if width.is_empty() {
                None
            } else {
                Some(width.parse::<usize>().map_err(|_| unknown())?)
            };

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Field { key, width });
        }

        literal.push_str(&pattern[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        Ok(Self { segments })
    }

    pub fn render(&self, seq: &Sequence) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field { key, width } => {
                    let value = seq.attr(*key);
                    match width {
                        Some(w) => out.push_str(&format!("{:>w$}", value.to_string(), w = *w)),
                        None => out.push_str(&value.to_string()),
                    }
                }
            }
        }
        out
    }
}

impl Default for Template {
    /// The `%4l %h%p%t %R` pattern.
    fn default() -> Self {
        let field = |key| Segment::Field { key, width: None };
        Self {
            segments: vec![
                Segment::Field {
                    key: AttrKey::Length,
                    width: Some(4),
                },
                Segment::Literal(" ".to_string()),
                field(AttrKey::Head),
                field(AttrKey::Padding),
                field(AttrKey::Tail),
                Segment::Literal(" ".to_string()),
                field(AttrKey::HumanRange),
            ],
        }
    }
}

impl FromStr for Template {
    type Err = SequenceError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl Sequence {
    /// Render this sequence through `pattern`. See [`Template`] for the tokens.
    pub fn format(&self, pattern: &str) -> Result<String> {
        Ok(Template::parse(pattern)?.render(self))
    }

    /// Render with the default pattern, `%4l %h%p%t %R`.
    pub fn format_default(&self) -> String {
        Template::default().render(self)
    }
}
