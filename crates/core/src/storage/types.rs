/// A stored item as returned by the store, attributes mapped to JSON values.
///
/// Items are passed through to the dashboard response untouched, keys included.
pub type Item = serde_json::Map<String, serde_json::Value>;

/// Attribute name of the partition key.
pub const PARTITION_KEY_ATTRIBUTE: &str = "PK";

/// Attribute name of the sort key.
pub const SORT_KEY_ATTRIBUTE: &str = "SK";
