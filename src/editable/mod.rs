//! Text editing primitives for the composer.
//!
//! - [`TextBuffer`] / [`TextBufferMut`]: traits abstracting over buffer implementations
//! - [`RopeBuffer`]: multi-line draft surface (backed by `ropey::Rope`)
//! - [`StringBuffer`]: small inputs such as the feedback panel (backed by `String`)
//! - [`SelectionRange`] / [`SelectionDetails`]: native selection and the tracked, trimmed record
//! - [`apply_wrap`]: markdown bold / italic splice with selection restore
//!
//! # Example
//!
//! ```
//! use relay_compose::editable::{apply_wrap, track_selection, MarkdownWrap, RopeBuffer, TextBuffer};
//!
//! let mut buf = RopeBuffer::from_text("Hello world");
//! let details = track_selection(&buf, 0, 5).unwrap();
//! let edit = apply_wrap(&mut buf, &details, MarkdownWrap::Bold);
//!
//! assert_eq!(buf.content(), "**Hello** world");
//! assert_eq!((edit.selection.start, edit.selection.end), (2, 7));
//! ```

mod buffer;
mod format;
mod selection;

pub use buffer::{RopeBuffer, StringBuffer, TextBuffer, TextBufferMut};
pub use format::{apply_wrap, FormatEdit, MarkdownWrap};
pub use selection::{track_selection, trim_text, SelectionDetails, SelectionRange};
