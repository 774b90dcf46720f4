use std::fmt;

use serde::Serialize;

use crate::item::Frame;
use crate::sequence::Sequence;

/// The attributes a sequence can report, keyed by their formatter letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttrKey {
    /// `l`: number of items.
    Length,
    /// `s`: lowest frame.
    Start,
    /// `e`: highest frame.
    End,
    /// `f`: frames present, in member order.
    Frames,
    /// `m`: frames absent between start and end.
    Missing,
    /// `p`: printf-style padding template, e.g. `%04d`.
    Padding,
    /// `r`: compact range, `start-end`.
    Range,
    /// `R`: grouped range, e.g. `1-3 5 7-9`.
    HumanRange,
    /// `h`: text before the frame number.
    Head,
    /// `t`: text after the frame number.
    Tail,
}

impl AttrKey {
    pub const ALL: [AttrKey; 10] = [
        AttrKey::Length,
        AttrKey::Start,
        AttrKey::End,
        AttrKey::Frames,
        AttrKey::Missing,
        AttrKey::Padding,
        AttrKey::Range,
        AttrKey::HumanRange,
        AttrKey::Head,
        AttrKey::Tail,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        let key = match c {
            'l' => AttrKey::Length,
            's' => AttrKey::Start,
            'e' => AttrKey::End,
            'f' => AttrKey::Frames,
            'm' => AttrKey::Missing,
            'p' => AttrKey::Padding,
            'r' => AttrKey::Range,
            'R' => AttrKey::HumanRange,
            'h' => AttrKey::Head,
            't' => AttrKey::Tail,
            _ => return None,
        };
        Some(key)
    }

    pub fn as_char(self) -> char {
        match self {
            AttrKey::Length => 'l',
            AttrKey::Start => 's',
            AttrKey::End => 'e',
            AttrKey::Frames => 'f',
            AttrKey::Missing => 'm',
            AttrKey::Padding => 'p',
            AttrKey::Range => 'r',
            AttrKey::HumanRange => 'R',
            AttrKey::Head => 'h',
            AttrKey::Tail => 't',
        }
    }
}

/// A computed attribute value.
///
/// `Display` gives the natural string form: numbers in decimal, lists as
/// space separated numbers, text verbatim, and nothing for [`AttrValue::Empty`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    Number(u64),
    List(Vec<u64>),
    Text(String),
    /// A numeric attribute with no value, such as `start` of a sequence with no digits.
    Empty,
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Number(n) => write!(f, "{n}"),
            AttrValue::List(values) => {
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
            AttrValue::Text(s) => f.write_str(s),
            AttrValue::Empty => Ok(()),
        }
    }
}

impl From<Option<u64>> for AttrValue {
    fn from(value: Option<u64>) -> Self {
        value.map_or(AttrValue::Empty, AttrValue::Number)
    }
}

/// Every attribute of a sequence at once, for reporting.
///
/// Gaps are reported as inclusive `[first, last]` ranges, so the size of the
/// summary follows the number of members rather than the span of frames.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attrs {
    pub length: usize,
    pub start: Option<u64>,
    pub end: Option<u64>,
    pub frames: Vec<u64>,
    pub missing_ranges: Vec<[u64; 2]>,
    pub padding: String,
    pub range: String,
    pub human_range: String,
    pub head: String,
    pub tail: String,
}

impl Sequence {
    fn lead(&self) -> &Frame {
        &self.members[0].frame
    }

    /// Frame numbers in member order.
    pub fn frames(&self) -> Vec<u64> {
        self.members.iter().filter_map(|m| m.frame.value).collect()
    }

    pub fn start(&self) -> Option<u64> {
        self.members.iter().filter_map(|m| m.frame.value).min()
    }

    pub fn end(&self) -> Option<u64> {
        self.members.iter().filter_map(|m| m.frame.value).max()
    }

    /// Frame numbers strictly between start and end that no member has, ascending.
    ///
    /// One entry per absent frame: two members far apart yield a long list.
    /// [`Sequence::missing_ranges`] describes the same gaps compactly.
    pub fn missing(&self) -> Vec<u64> {
        self.missing_ranges()
            .into_iter()
            .flat_map(|[first, last]| first..=last)
            .collect()
    }

    /// Gaps between members as inclusive `[first, last]` ranges, ascending.
    pub fn missing_ranges(&self) -> Vec<[u64; 2]> {
        sorted_unique(self.frames())
            .windows(2)
            .filter(|pair| pair[1] - pair[0] > 1)
            .map(|pair| [pair[0] + 1, pair[1] - 1])
            .collect()
    }

    /// printf-style template reproducing the first member's zero padding:
    /// `%04d` for `0001`, `%d` when the number is written without padding.
    /// Empty when the sequence has no frame number.
    pub fn padding(&self) -> String {
        let lead = self.lead();
        match lead.value {
            Some(value) => {
                let width = lead.literal.len();
                if width > value.to_string().len() {
                    format!("%0{width}d")
                } else {
                    "%d".to_string()
                }
            }
            None => String::new(),
        }
    }

    /// `start-end`, or just the number for a single item.
    pub fn range(&self) -> String {
        match (self.start(), self.end()) {
            (Some(s), Some(e)) if self.len() > 1 => format!("{s}-{e}"),
            (Some(s), _) => s.to_string(),
            _ => String::new(),
        }
    }

    /// Frames grouped into runs of consecutive numbers: `1-3 5 7-9`.
    pub fn human_range(&self) -> String {
        let frames = sorted_unique(self.frames());
        let mut runs: Vec<(u64, u64)> = Vec::new();
        for n in frames {
            match runs.last_mut() {
                Some((_, last)) if last.checked_add(1) == Some(n) => *last = n,
                _ => runs.push((n, n)),
            }
        }
        runs.iter()
            .map(|&(first, last)| {
                if first == last {
                    first.to_string()
                } else {
                    format!("{first}-{last}")
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn head(&self) -> &str {
        &self.lead().head
    }

    pub fn tail(&self) -> &str {
        &self.lead().tail
    }

    /// A single attribute by key.
    pub fn attr(&self, key: AttrKey) -> AttrValue {
        match key {
            AttrKey::Length => AttrValue::Number(self.len() as u64),
            AttrKey::Start => self.start().into(),
            AttrKey::End => self.end().into(),
            AttrKey::Frames => AttrValue::List(self.frames()),
            AttrKey::Missing => AttrValue::List(self.missing()),
            AttrKey::Padding => AttrValue::Text(self.padding()),
            AttrKey::Range => AttrValue::Text(self.range()),
            AttrKey::HumanRange => AttrValue::Text(self.human_range()),
            AttrKey::Head => AttrValue::Text(self.head().to_string()),
            AttrKey::Tail => AttrValue::Text(self.tail().to_string()),
        }
    }

    pub fn attrs(&self) -> Attrs {
        Attrs {
            length: self.len(),
            start: self.start(),
            end: self.end(),
            frames: self.frames(),
            missing_ranges: self.missing_ranges(),
            padding: self.padding(),
            range: self.range(),
            human_range: self.human_range(),
            head: self.head().to_string(),
            tail: self.tail().to_string(),
        }
    }
}

fn sorted_unique(mut frames: Vec<u64>) -> Vec<u64> {
    frames.sort_unstable();
    frames.dedup();
    frames
}

#[cfg(test)]
mod tests {
    use crate::{AttrKey, AttrValue, BuildOptions, Sequence};

    fn seq(names: &[&str]) -> Sequence {
        Sequence::new(names.iter().copied(), &BuildOptions::new("/cwd")).unwrap()
    }

    #[test]
    fn attrs_of_two_items() {
        let s = seq(&["fname01.ext", "fname03.ext"]);
        let a = s.attrs();
        assert_eq!(a.length, 2);
        assert_eq!(a.start, Some(1));
        assert_eq!(a.end, Some(3));
        assert_eq!(a.frames, vec![1, 3]);
        assert_eq!(a.missing_ranges, vec![[2, 2]]);
        assert_eq!(a.padding, "%02d");
        assert_eq!(a.range, "1-3");
        assert_eq!(a.human_range, "1 3");
        assert_eq!(a.head, "fname");
        assert_eq!(a.tail, ".ext");
    }

    #[test]
    fn gaps_and_runs() {
        let s = seq(&["fname.001.ext", "fname.003.ext", "fname.004.ext"]);
        assert_eq!(s.start(), Some(1));
        assert_eq!(s.end(), Some(4));
        assert_eq!(s.missing(), vec![2]);
        assert_eq!(s.human_range(), "1 3-4");
        assert_eq!(s.padding(), "%03d");
    }

    #[test]
    fn unsorted_members() {
        let s = seq(&["a.5.exr", "a.2.exr", "a.3.exr", "a.9.exr"]);
        assert_eq!(s.frames(), vec![5, 2, 3, 9]);
        assert_eq!(s.start(), Some(2));
        assert_eq!(s.end(), Some(9));
        assert_eq!(s.missing(), vec![4, 6, 7, 8]);
        assert_eq!(s.missing_ranges(), vec![[4, 4], [6, 8]]);
        assert_eq!(s.human_range(), "2-3 5 9");
        assert_eq!(s.range(), "2-9");
    }

    #[test]
    fn unpadded() {
        let s = seq(&["a.10.exr", "a.11.exr"]);
        assert_eq!(s.padding(), "%d");
        let s = seq(&["a.0.exr", "a.1.exr"]);
        assert_eq!(s.padding(), "%d");
        let s = seq(&["a.00.exr", "a.01.exr"]);
        assert_eq!(s.padding(), "%02d");
    }

    #[test]
    fn string_form() {
        assert_eq!(seq(&["fname01.ext"]).to_string(), "fname01.ext");
        assert_eq!(seq(&["fname02.ext", "fname12.ext"]).to_string(), "fname2-12.ext");
    }

    #[test]
    fn single_item_with_digits() {
        let s = seq(&["shot.0007.exr"]);
        assert_eq!(s.frames(), vec![7]);
        assert_eq!(s.range(), "7");
        assert_eq!(s.human_range(), "7");
        assert_eq!(s.padding(), "%04d");
        assert!(s.missing().is_empty());
    }

    #[test]
    fn single_item_without_digits() {
        let s = seq(&["notes.txt"]);
        assert!(s.frames().is_empty());
        assert_eq!(s.start(), None);
        assert_eq!(s.range(), "");
        assert_eq!(s.padding(), "");
        assert_eq!(s.head(), "notes.txt");
        assert_eq!(s.attr(AttrKey::Start), AttrValue::Empty);
        assert_eq!(s.attr(AttrKey::Start).to_string(), "");
    }

    #[test]
    fn wide_gap_summary_stays_small() {
        let s = seq(&["a.1.exr", "a.4000000000.exr"]);
        let a = s.attrs();
        assert_eq!(a.missing_ranges, vec![[2, 3_999_999_999]]);
        assert_eq!(a.human_range, "1 4000000000");
        assert_eq!(a.range, "1-4000000000");
    }

    #[test]
    fn no_gaps_no_ranges() {
        let s = seq(&["a.1.exr", "a.2.exr", "a.3.exr"]);
        assert!(s.missing_ranges().is_empty());
        assert!(s.missing().is_empty());
    }

    #[test]
    fn keys_round_trip_through_chars() {
        for key in AttrKey::ALL {
            assert_eq!(AttrKey::from_char(key.as_char()), Some(key));
        }
        assert_eq!(AttrKey::from_char('x'), None);
    }

    #[test]
    fn value_display() {
        assert_eq!(AttrValue::List(vec![1, 3, 4]).to_string(), "1 3 4");
        assert_eq!(AttrValue::List(vec![]).to_string(), "");
        assert_eq!(AttrValue::Number(12).to_string(), "12");
    }
}
