//! API page documents

use serde_json::Value;

/// JSON body of one page of a paginated listing
///
/// Top-level keys name resource collections (`droplets`, `images`), each an
/// array of records. Other keys such as `links` and `meta` are ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    body: Value,
}

impl PageDocument {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    /// Records of `collection`, in page order
    ///
    /// Yields nothing when the collection is missing or is not an array.
    pub fn records<'a>(&'a self, collection: &str) -> impl Iterator<Item = &'a Value> + 'a {
        self.body
            .get(collection)
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
    }
}
