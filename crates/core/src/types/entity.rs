//! The [`Entity`] trait shared by every record an entity store can hold.

use core::fmt;

/// A record keyed by a server-assigned identifier.
///
/// Stores only ever look at the identifier; every other field belongs to the
/// backend and is carried through untouched.
pub trait Entity: Clone + fmt::Debug + Send + Sync + 'static {
    /// The identifier type, usually produced by [`define_id!`](crate::define_id).
    type Id: Clone
        + Eq
        + fmt::Debug
        + fmt::Display
        + AsRef<str>
        + From<String>
        + Send
        + Sync
        + 'static;

    /// The server-assigned identifier of this record.
    fn id(&self) -> &Self::Id;
}
