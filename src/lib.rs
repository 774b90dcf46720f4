//! Collapse numbered file names into sequences.
//!
//! Render farms, scanners and cameras write long runs of files such as
//! `shot.0001.exr`, `shot.0002.exr`, ... This crate groups an ordered list of
//! such names into [`Sequence`]s and describes each one compactly:
//! `shot.1-240.exr`, the frames present and missing, the zero padding, and a
//! generic `shot.%04d.exr` pattern.
//!
//! The crate never touches the file system. Callers list and sort names
//! themselves and pass them in together with the directory that relative
//! names should be resolved against.
//!
//! ```rust
//! use frameseq::{BuildOptions, group_sequences};
//!
//! let names = ["a.0001.exr", "a.0002.exr", "a.0004.exr", "readme.txt"];
//! let groups = group_sequences(names, &BuildOptions::new("/renders"));
//! let lines: Vec<String> = groups.iter().map(|s| s.format_default()).collect();
//! assert_eq!(lines, ["   3 a.%04d.exr 1-2 4", "   1 readme.txt "]);
//! ```

mod attrs;
mod consts;
mod error;
mod format;
mod item;
mod paths;
mod sequence;
mod token;

pub use attrs::{AttrKey, AttrValue, Attrs};
pub use consts::DEFAULT_FORMAT;
pub use error::{Result, SequenceError};
pub use format::Template;
pub use item::{Frame, Item, MatchOutcome, PathLike};
pub use sequence::{BuildOptions, ScanPolicy, Sequence, group_sequences};
pub use token::{Tokens, tokenize};
