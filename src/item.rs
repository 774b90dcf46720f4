use std::path::{Path, PathBuf};

use crate::paths::{absolutize, split_name};
use crate::token::{Tokens, tokenize, weave};

/// One file name taking part in sequence detection.
///
/// An `Item` keeps the text it was built from, its absolute path, and the
/// tokenization of its file name. All of it is fixed at construction; sibling
/// checks never modify an item and report their result as a [`MatchOutcome`].
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use frameseq::Item;
///
/// let item = Item::new("renders/shot.0042.exr", Path::new("/work"));
/// assert_eq!(item.name(), "shot.0042.exr");
/// assert_eq!(item.dirname(), "renders");
/// assert_eq!(item.digits(), ["0042"]);
/// assert_eq!(item.signature(), "shot..exr");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    raw: String,
    path: PathBuf,
    dirname: String,
    filename: String,
    tokens: Tokens,
    signature: String,
}

impl Item {
    /// Build an item from `raw`, resolving relative input against `cwd`.
    pub fn new(raw: impl Into<String>, cwd: &Path) -> Self {
        let raw = raw.into();
        let path = absolutize(&raw, cwd);
        let (dirname, filename) = split_name(&raw);
        let tokens = tokenize(filename);
        let signature = tokens.signature();
        Self {
            dirname: dirname.to_string(),
            filename: filename.to_string(),
            raw,
            path,
            tokens,
            signature,
        }
    }

    /// The text this item was built from.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Absolute path of the item.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory portion of the input text, empty when it had no separator.
    pub fn dirname(&self) -> &str {
        &self.dirname
    }

    /// File name portion of the input text.
    pub fn name(&self) -> &str {
        &self.filename
    }

    pub fn digits(&self) -> &[String] {
        &self.tokens.digits
    }

    pub fn parts(&self) -> &[String] {
        &self.tokens.parts
    }

    /// The file name with all digit runs removed.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Decide whether `other` is the next member of the same numbered series.
    ///
    /// Two names are siblings when their non-digit parts are identical and
    /// exactly one digit run differs in numeric value (`01` and `1` are equal).
    /// The outcome describes `self`: on a match its frame is `self`'s own
    /// literal digits at the varying position.
    pub fn match_sibling(&self, other: &Item) -> MatchOutcome<'_> {
        self.match_tokens(&other.tokens)
    }

    /// Like [`Item::match_sibling`], for a bare path or file name.
    pub fn match_name(&self, other: &str) -> MatchOutcome<'_> {
        let (_, filename) = split_name(other);
        self.match_tokens(&tokenize(filename))
    }

    pub fn is_sibling(&self, other: &Item) -> bool {
        self.match_sibling(other).is_sibling()
    }

    fn match_tokens(&self, other: &Tokens) -> MatchOutcome<'_> {
        let mine = &self.tokens;
        if mine.parts != other.parts || mine.digits.len() != other.digits.len() {
            tracing::trace!(name = %self.filename, "skeleton differs");
            return MatchOutcome::unmatched(self);
        }

        let mut differing = mine
            .digits
            .iter()
            .zip(&other.digits)
            .enumerate()
            .filter(|(_, (a, b))| strip_zeros(a) != strip_zeros(b))
            .map(|(pos, _)| pos);

        let outcome = match (differing.next(), differing.next()) {
            (Some(pos), None) if frame_value(&other.digits[pos]).is_some() => self
                .frame_at(pos)
                .map(|frame| MatchOutcome {
                    position: Some(pos),
                    frame: Some(frame),
                    name: &self.filename,
                })
                .unwrap_or_else(|| MatchOutcome::unmatched(self)),
            _ => MatchOutcome::unmatched(self),
        };
        tracing::trace!(name = %self.filename, position = ?outcome.position, "compared digits");
        outcome
    }

    /// The frame this item would have if its digit run at `pos` were the one
    /// that varies. `None` when there is no such run or it overflows `u64`.
    pub(crate) fn frame_at(&self, pos: usize) -> Option<Frame> {
        let Tokens { digits, parts } = &self.tokens;
        let literal = digits.get(pos)?;
        let value = frame_value(literal)?;
        Some(Frame {
            literal: literal.clone(),
            value: Some(value),
            head: weave(&parts[..=pos], &digits[..pos]),
            tail: weave(&parts[pos + 1..], &digits[pos + 1..]),
        })
    }

    /// Frame of a lone item: its last digit run, or no frame at all.
    pub(crate) fn lone_frame(&self) -> Frame {
        self.digits()
            .len()
            .checked_sub(1)
            .and_then(|pos| self.frame_at(pos))
            .unwrap_or_else(|| Frame::none(self))
    }
}

fn strip_zeros(digits: &str) -> &str {
    digits.trim_start_matches('0')
}

fn frame_value(digits: &str) -> Option<u64> {
    digits.parse().ok()
}

/// Input accepted wherever items are expected: either raw path text or an
/// already built [`Item`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathLike {
    Raw(String),
    Item(Item),
}

impl PathLike {
    pub fn into_item(self, cwd: &Path) -> Item {
        match self {
            PathLike::Raw(raw) => Item::new(raw, cwd),
            PathLike::Item(item) => item,
        }
    }
}

impl From<&str> for PathLike {
    fn from(value: &str) -> Self {
        PathLike::Raw(value.to_string())
    }
}

impl From<String> for PathLike {
    fn from(value: String) -> Self {
        PathLike::Raw(value)
    }
}

impl From<&String> for PathLike {
    fn from(value: &String) -> Self {
        PathLike::Raw(value.clone())
    }
}

impl From<Item> for PathLike {
    fn from(value: Item) -> Self {
        PathLike::Item(value)
    }
}

/// The varying digit run of an item and the literal text around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Digits exactly as written, leading zeros included. Empty when unmatched.
    pub literal: String,
    pub value: Option<u64>,
    pub head: String,
    pub tail: String,
}

impl Frame {
    /// The "no frame" state: the whole file name is head.
    fn none(item: &Item) -> Self {
        Self {
            literal: String::new(),
            value: None,
            head: item.filename.clone(),
            tail: String::new(),
        }
    }
}

/// Result of comparing an item against a candidate sibling.
///
/// On a mismatch no frame is built; `head` borrows the compared item's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchOutcome<'a> {
    position: Option<usize>,
    frame: Option<Frame>,
    name: &'a str,
}

impl<'a> MatchOutcome<'a> {
    fn unmatched(item: &'a Item) -> Self {
        Self {
            position: None,
            frame: None,
            name: &item.filename,
        }
    }

    pub fn is_sibling(&self) -> bool {
        self.position.is_some()
    }

    /// Index of the varying digit run, if the pair are siblings.
    pub fn position(&self) -> Option<usize> {
        self.position
    }

    /// Literal digits of the varying run, empty on a mismatch.
    pub fn frame(&self) -> &str {
        self.frame.as_ref().map_or("", |f| f.literal.as_str())
    }

    /// Text before the varying run; the whole file name on a mismatch.
    pub fn head(&self) -> &str {
        self.frame.as_ref().map_or(self.name, |f| f.head.as_str())
    }

    pub fn tail(&self) -> &str {
        self.frame.as_ref().map_or("", |f| f.tail.as_str())
    }

    pub(crate) fn into_frame(self) -> Option<Frame> {
        self.frame
    }
}
