use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, SequenceError};
use crate::item::{Frame, Item, PathLike};

/// What the builder does when a candidate is not a sibling of the last
/// accepted item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPolicy {
    /// Leave the candidate out and keep testing the rest of the list.
    #[default]
    SkipAndContinue,
    /// End the sequence at the first candidate that does not fit.
    StopAtFirstMismatch,
}

/// Settings for building sequences.
///
/// `cwd` is the directory relative inputs are resolved against. It is always
/// passed in explicitly; the library never reads the process working directory
/// on its own.
///
/// # Examples
///
/// ```rust
/// use frameseq::{BuildOptions, ScanPolicy};
///
/// let opts = BuildOptions::new("/renders").with_policy(ScanPolicy::StopAtFirstMismatch);
/// assert_eq!(opts.policy, ScanPolicy::StopAtFirstMismatch);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    pub cwd: PathBuf,
    pub policy: ScanPolicy,
}

impl BuildOptions {
    pub fn new<P: Into<PathBuf>>(cwd: P) -> Self {
        Self {
            cwd: cwd.into(),
            policy: ScanPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ScanPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// An accepted item and its frame within the sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Member {
    pub(crate) item: Item,
    pub(crate) frame: Frame,
}

/// A chain of file names that differ only in one numbered position.
///
/// Built once from an ordered candidate list and read-only afterwards. Derived
/// values such as [`Sequence::start`] or [`Sequence::missing`] are computed
/// from the members on every call.
///
/// # Examples
///
/// ```rust
/// use frameseq::{BuildOptions, Sequence};
///
/// let opts = BuildOptions::new("/renders");
/// let seq = Sequence::new(["shot.001.exr", "shot.003.exr", "shot.004.exr"], &opts)?;
/// assert_eq!(seq.len(), 3);
/// assert_eq!(seq.missing(), vec![2]);
/// assert_eq!(seq.to_string(), "shot.1-4.exr");
/// # Ok::<(), frameseq::SequenceError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sequence {
    pub(crate) members: Vec<Member>,
    /// Index of the varying digit run, fixed by the first accepted sibling.
    position: Option<usize>,
}

/// A candidate tagged with its index in the caller's input.
type Tagged = (usize, Item);

impl Sequence {
    /// Build the longest chain of siblings starting at the first candidate.
    ///
    /// Every member must vary in the same digit run as the first pair did.
    /// Candidates that do not fit are left out; whether scanning continues
    /// past them is controlled by [`BuildOptions::policy`]. Fails with
    /// [`SequenceError::InvalidInput`] when `inputs` is empty.
    pub fn new<I, P>(inputs: I, options: &BuildOptions) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathLike>,
    {
        let (seq, _order, _rest) = Self::build(tag(inputs, options), options.policy)?;
        Ok(seq)
    }

    /// Returns the sequence, the input index of its first member, and the
    /// candidates it did not take, in order.
    fn build(items: Vec<Tagged>, policy: ScanPolicy) -> Result<(Self, usize, Vec<Tagged>)> {
        let mut iter = items.into_iter();
        let (order, anchor) = iter.next().ok_or(SequenceError::InvalidInput)?;

        let mut position: Option<usize> = None;
        let mut anchor_frame: Option<Frame> = None;
        let mut accepted: Vec<Member> = Vec::new();
        let mut rest = Vec::new();
        let mut stopped = false;

        for (idx, candidate) in iter {
            if stopped {
                rest.push((idx, candidate));
                continue;
            }
            let last = accepted.last().map_or(&anchor, |m| &m.item);
            let outcome = last.match_sibling(&candidate);
            let fits = outcome
                .position()
                .filter(|pos| position.is_none_or(|p| p == *pos));
            match fits.zip(fits.and_then(|pos| candidate.frame_at(pos))) {
                Some((pos, frame)) => {
                    tracing::trace!(candidate = candidate.name(), position = pos, "accepted");
                    if position.is_none() {
                        position = Some(pos);
                        anchor_frame = outcome.into_frame();
                    }
                    accepted.push(Member {
                        item: candidate,
                        frame,
                    });
                }
                None => {
                    tracing::trace!(candidate = candidate.name(), "not a sibling");
                    rest.push((idx, candidate));
                    if policy == ScanPolicy::StopAtFirstMismatch {
                        stopped = true;
                    }
                }
            }
        }

        let frame = anchor_frame.unwrap_or_else(|| anchor.lone_frame());
        let mut members = Vec::with_capacity(accepted.len() + 1);
        members.push(Member {
            item: anchor,
            frame,
        });
        members.extend(accepted);

        let seq = Self { members, position };
        tracing::debug!(
            sequence = %seq,
            length = seq.len(),
            leftover = rest.len(),
            "built sequence"
        );
        Ok((seq, order, rest))
    }

    /// Number of items in the sequence. Never zero.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn items(&self) -> impl Iterator<Item = &Item> {
        self.members.iter().map(|m| &m.item)
    }

    pub fn first(&self) -> &Item {
        &self.members[0].item
    }

    /// Whether `item` would extend this sequence: a sibling of the last
    /// member that varies in the same digit run as the rest.
    pub fn contains(&self, item: &Item) -> bool {
        self.members.last().is_some_and(|m| {
            m.item
                .match_sibling(item)
                .position()
                .is_some_and(|pos| self.position.is_none_or(|p| p == pos))
        })
    }
}

impl fmt::Display for Sequence {
    /// The sole file name for a single item, otherwise `head` + compact range + `tail`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.len() == 1 {
            return f.write_str(self.first().name());
        }
        write!(f, "{}{}{}", self.head(), self.range(), self.tail())
    }
}

fn tag<I, P>(inputs: I, options: &BuildOptions) -> Vec<Tagged>
where
    I: IntoIterator<Item = P>,
    P: Into<PathLike>,
{
    inputs
        .into_iter()
        .map(|p| p.into().into_item(&options.cwd))
        .enumerate()
        .collect()
}

/// Build sequences until no candidates are left.
fn drain(mut remaining: Vec<Tagged>, policy: ScanPolicy) -> Vec<(usize, Sequence)> {
    let mut out = Vec::new();
    while let Ok((seq, order, rest)) = Sequence::build(remaining, policy) {
        out.push((order, seq));
        remaining = rest;
    }
    out
}

/// Partition `inputs` into sequences, in order.
///
/// Each round builds a sequence from the candidates left over by the previous
/// one, so every input ends up in exactly one sequence. Sequences come back
/// ordered by the input position of their first member. Callers usually sort
/// the names first, since only neighbouring candidates are compared.
pub fn group_sequences<I, P>(inputs: I, options: &BuildOptions) -> Vec<Sequence>
where
    I: IntoIterator<Item = P>,
    P: Into<PathLike>,
{
    let items = tag(inputs, options);

    let mut out = match options.policy {
        // Names with different non-digit parts never match, so when misfits
        // are skipped each skeleton can be grouped on its own.
        ScanPolicy::SkipAndContinue => {
            let mut buckets: HashMap<Vec<String>, Vec<Tagged>> = HashMap::new();
            for (idx, item) in items {
                buckets
                    .entry(item.parts().to_vec())
                    .or_default()
                    .push((idx, item));
            }
            tracing::trace!(skeletons = buckets.len(), "bucketed candidates");
            buckets
                .into_values()
                .flat_map(|bucket| drain(bucket, options.policy))
                .collect::<Vec<_>>()
        }
        ScanPolicy::StopAtFirstMismatch => drain(items, options.policy),
    };
    out.sort_unstable_by_key(|(order, _)| *order);

    tracing::debug!(sequences = out.len(), "grouped");
    out.into_iter().map(|(_, seq)| seq).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn opts() -> BuildOptions {
        BuildOptions::new("/cwd")
    }

    fn names(seq: &Sequence) -> Vec<&str> {
        seq.items().map(|i| i.name()).collect()
    }

    #[test]
    fn empty_input_is_invalid() {
        let err = Sequence::new(Vec::<&str>::new(), &opts()).unwrap_err();
        assert_eq!(err, SequenceError::InvalidInput);
    }

    #[test]
    fn single_item() {
        let seq = Sequence::new(["fname.001.ext"], &opts()).unwrap();
        assert_eq!(seq.len(), 1);
        assert_eq!(seq.to_string(), "fname.001.ext");
    }

    #[test]
    fn two_runs_differ_keeps_anchor_only() {
        let cwd = Path::new("/cwd");
        let items = [
            Item::new("fname02.002.ext", cwd),
            Item::new("fname03.001.ext", cwd),
        ];
        let seq = Sequence::new(items, &opts()).unwrap();
        assert_eq!(seq.len(), 1);
    }

    #[test]
    fn one_run_differs_joins() {
        let cwd = Path::new("/cwd");
        let items = [
            Item::new("fname02.002.ext", cwd),
            Item::new("fname02.012.ext", cwd),
        ];
        let seq = Sequence::new(items, &opts()).unwrap();
        assert_eq!(seq.len(), 2);
    }

    #[test]
    fn skips_interlopers_by_default() {
        let seq = Sequence::new(
            ["a.001.exr", "a.001.exr.bak", "a.002.exr", "b.003.exr", "a.003.exr"],
            &opts(),
        )
        .unwrap();
        assert_eq!(names(&seq), ["a.001.exr", "a.002.exr", "a.003.exr"]);
    }

    #[test]
    fn stop_policy_ends_at_first_mismatch() {
        let options = opts().with_policy(ScanPolicy::StopAtFirstMismatch);
        let seq = Sequence::new(["a.001.exr", "a.002.exr", "b.003.exr", "a.003.exr"], &options)
            .unwrap();
        assert_eq!(names(&seq), ["a.001.exr", "a.002.exr"]);
    }

    #[test]
    fn duplicate_names_are_not_merged() {
        let seq = Sequence::new(["a.1.exr", "a.1.exr", "a.2.exr"], &opts()).unwrap();
        assert_eq!(names(&seq), ["a.1.exr", "a.2.exr"]);
    }

    #[test]
    fn members_keep_their_own_frames() {
        let seq = Sequence::new(["f.9.exr", "f.10.exr", "f.011.exr"], &opts()).unwrap();
        let literals: Vec<&str> = seq.members.iter().map(|m| m.frame.literal.as_str()).collect();
        assert_eq!(literals, ["9", "10", "011"]);
    }

    #[test]
    fn mixed_inputs() {
        let pre = Item::new("/shots/a.2.exr", Path::new("/elsewhere"));
        let inputs: Vec<PathLike> = vec!["/shots/a.1.exr".into(), pre.into()];
        let seq = Sequence::new(inputs, &opts()).unwrap();
        assert_eq!(seq.len(), 2);
        assert_eq!(seq.first().path(), Path::new("/shots/a.1.exr"));
    }

    #[test]
    fn contains_checks_last_member() {
        let seq = Sequence::new(["a.1.exr", "a.2.exr"], &opts()).unwrap();
        assert!(seq.contains(&Item::new("a.3.exr", Path::new("/cwd"))));
        assert!(!seq.contains(&Item::new("b.3.exr", Path::new("/cwd"))));
    }

    #[test]
    fn grouping_partitions_everything() {
        let input = [
            "a.001.exr",
            "a.002.exr",
            "a.004.exr",
            "b.001.exr",
            "b.002.exr",
            "notes.txt",
        ];
        let groups = group_sequences(input, &opts());
        let rendered: Vec<String> = groups.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, ["a.1-4.exr", "b.1-2.exr", "notes.txt"]);
        let total: usize = groups.iter().map(Sequence::len).sum();
        assert_eq!(total, input.len());
    }

    #[test]
    fn grouping_empty_input() {
        assert!(group_sequences(Vec::<String>::new(), &opts()).is_empty());
    }

    #[test]
    fn grouping_with_stop_policy() {
        let options = opts().with_policy(ScanPolicy::StopAtFirstMismatch);
        let groups = group_sequences(["a.1.exr", "b.1.exr", "a.2.exr"], &options);
        let rendered: Vec<String> = groups.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, ["a.1.exr", "b.1.exr", "a.2.exr"]);
    }

    #[test]
    fn varying_run_stays_fixed() {
        let input = ["a1b1.exr", "a1b2.exr", "a2b1.exr", "a2b2.exr"];
        let seq = Sequence::new(input, &opts()).unwrap();
        assert_eq!(names(&seq), ["a1b1.exr", "a1b2.exr"]);
        assert_eq!(seq.frames(), vec![1, 2]);
        assert_eq!(seq.to_string(), "a1b1-2.exr");

        let groups = group_sequences(input, &opts());
        let rendered: Vec<String> = groups
            .iter()
            .map(|s| s.format("%l %h%p%t %R").unwrap())
            .collect();
        assert_eq!(rendered, ["2 a1b%d.exr 1-2", "2 a2b%d.exr 1-2"]);
    }

    #[test]
    fn varying_run_stays_fixed_when_stopping() {
        let options = opts().with_policy(ScanPolicy::StopAtFirstMismatch);
        let seq = Sequence::new(["a1b1.exr", "a1b2.exr", "a2b2.exr", "a1b3.exr"], &options)
            .unwrap();
        assert_eq!(names(&seq), ["a1b1.exr", "a1b2.exr"]);
    }

    #[test]
    fn contains_requires_same_varying_run() {
        let cwd = Path::new("/cwd");
        let seq = Sequence::new(["a1b1.exr", "a1b2.exr"], &opts()).unwrap();
        assert!(seq.contains(&Item::new("a1b3.exr", cwd)));
        assert!(!seq.contains(&Item::new("a2b2.exr", cwd)));

        let lone = Sequence::new(["a1b1.exr"], &opts()).unwrap();
        assert!(lone.contains(&Item::new("a2b1.exr", cwd)));
    }

    #[test]
    fn grouping_keeps_input_order_across_skeletons() {
        let groups = group_sequences(
            ["b.1.exr", "a.1.exr", "notes.txt", "b.2.exr", "a.2.exr"],
            &opts(),
        );
        let rendered: Vec<String> = groups.iter().map(|s| s.to_string()).collect();
        assert_eq!(rendered, ["b.1-2.exr", "a.1-2.exr", "notes.txt"]);
    }
}
