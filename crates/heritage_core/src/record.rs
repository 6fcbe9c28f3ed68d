//! The keyed-record convention shared by every collection.

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Collection holding [`crate::Location`] records.
pub const LOCATIONS: &str = "locations";

/// Collection holding [`crate::Book`] records.
pub const BOOKS: &str = "books";

/// A record that lives in a collection and is identified by a string id.
///
/// The store only relies on the id accessor and on the record round-tripping
/// through JSON; everything else about the shape belongs to the caller.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    /// Primary key, unique within the collection.
    fn id(&self) -> &str;
}
