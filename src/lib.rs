//! # roster
//!
//! Record manager for a roster of prisoners, built around a small generic
//! singly-linked list with two persistence channels.
//!
//! ## Text Format
//!
//! Each record is written as one block of prefixed fields, and every block is
//! followed by a blank line:
//!
//! ```text
//! Name: Ivan Petrenko
//! Birth: 1990-05-10
//! Height: 180cm
//! Eyes: green
//! Features: [scar on left cheek]
//! Imprisoned: 2020-01-10
//! Released: N/A
//!
//! ```
//!
//! Reading is forgiving:
//! - Lines are trimmed, and unknown prefixes are ignored.
//! - The last block does not need a trailing blank line.
//! - `Released: N/A` means the person is still in custody.
//!
//! A malformed date or height either fails the whole load or drops just that
//! block, depending on the [`MalformedPolicy`].
//!
//! ## Binary Snapshot
//!
//! [`snapshot`] stores the whole list behind a versioned header
//! (magic, version, payload length) followed by a `bincode` payload.
//! [`snapshot::load_or_empty`] turns any failure into an empty list plus a
//! logged warning, for callers that must not fail.
//!
//! ## Identity
//!
//! Two [`Prisoner`]s are equal when their full name and birth date match.
//! [`List::remove`], [`List::contains`] and [`roster::merge_unique`] all go
//! through that equality.

pub mod list;
pub mod prisoner;
pub mod encoder;
pub mod decoder;
pub mod snapshot;
pub mod store;
pub mod roster;
pub mod search;
pub mod shell;
pub mod error;

pub use list::{List, Iter, IntoIter};
pub use prisoner::Prisoner;
pub use encoder::Encoder;
pub use decoder::{Decoder, MalformedPolicy};
pub use store::Format;
pub use roster::{Roster, merge_unique, sample_roster};
pub use search::{Query, Custody};
pub use shell::{Shell, ShellConfig};
pub use error::{ListError, CodecError, CodecResult, FieldError};
