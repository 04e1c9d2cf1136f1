//! Extracted inventory values
//!
//! Record fields are carried as tagged [`FieldValue`]s: text is normalized
//! to ASCII, numbers and lists pass through with their shape intact.

use serde_json::{Number, Value};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

/// One extracted value
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// ASCII-only text
    Text(String),
    Number(Number),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Text value with every non-ASCII character dropped
    pub fn text(value: &str) -> Self {
        FieldValue::Text(to_ascii(value))
    }

    /// Convert a JSON scalar or array of scalars
    ///
    /// Returns `None` for null, booleans, objects, and arrays containing
    /// any of those.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Self::text(s)),
            Value::Number(n) => Some(FieldValue::Number(n.clone())),
            Value::Array(items) => items
                .iter()
                .map(Self::from_json)
                .collect::<Option<Vec<_>>>()
                .map(FieldValue::List),
            _ => None,
        }
    }

    pub fn is_list(&self) -> bool {
        matches!(self, FieldValue::List(_))
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "'{}'", s),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::List(items) => write!(f, "{}", ValueList(items)),
        }
    }
}

/// Display adapter rendering a value sequence as `[a, b, c]`
pub struct ValueList<'a>(pub &'a [FieldValue]);

impl fmt::Display for ValueList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, item) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", item)?;
        }
        write!(f, "]")
    }
}

/// Drop every non-ASCII character
pub fn to_ascii(value: &str) -> String {
    value.chars().filter(char::is_ascii).collect()
}

/// Resource name to extracted values, ordered by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    entries: BTreeMap<String, Vec<FieldValue>>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the values extracted for `name`
    ///
    /// A name already present keeps its values and gains the new sequence
    /// as a single nested list element.
    pub fn insert(&mut self, name: String, values: Vec<FieldValue>) {
        match self.entries.entry(name) {
            Entry::Occupied(mut entry) => entry.get_mut().push(FieldValue::List(values)),
            Entry::Vacant(entry) => {
                entry.insert(values);
            }
        }
    }

    /// Keep only the entries whose values satisfy `keep`
    pub fn retain(&mut self, keep: impl Fn(&[FieldValue]) -> bool) {
        self.entries.retain(|_, values| keep(values.as_slice()));
    }

    pub fn get(&self, name: &str) -> Option<&[FieldValue]> {
        self.entries.get(name).map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[FieldValue])> {
        self.entries
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_is_ascii_normalized() {
        assert_eq!(FieldValue::text("café-01"), FieldValue::Text("caf-01".to_string()));
        assert_eq!(to_ascii("web-1"), "web-1");
    }

    #[test]
    fn test_from_json_shapes() {
        assert_eq!(
            FieldValue::from_json(&json!(123)),
            Some(FieldValue::Number(123.into()))
        );
        assert_eq!(
            FieldValue::from_json(&json!(["vol-1", "vol-2"])),
            Some(FieldValue::List(vec![
                FieldValue::text("vol-1"),
                FieldValue::text("vol-2"),
            ]))
        );
        assert_eq!(FieldValue::from_json(&json!(null)), None);
        assert_eq!(FieldValue::from_json(&json!({"a": 1})), None);
        assert_eq!(FieldValue::from_json(&json!(["ok", null])), None);
    }

    #[test]
    fn test_display() {
        let values = vec![
            FieldValue::Number(7.into()),
            FieldValue::text("s-1vcpu-1gb"),
            FieldValue::List(vec![FieldValue::text("vol-1")]),
        ];
        assert_eq!(
            ValueList(&values).to_string(),
            "[7, 's-1vcpu-1gb', ['vol-1']]"
        );
    }

    #[test]
    fn test_duplicate_name_appends_nested() {
        let mut inventory = Inventory::new();
        inventory.insert("web".to_string(), vec![FieldValue::Number(1.into())]);
        inventory.insert(
            "web".to_string(),
            vec![FieldValue::Number(2.into()), FieldValue::text("x")],
        );

        assert_eq!(inventory.len(), 1);
        assert_eq!(
            inventory.get("web").unwrap(),
            &[
                FieldValue::Number(1.into()),
                FieldValue::List(vec![FieldValue::Number(2.into()), FieldValue::text("x")]),
            ]
        );
    }

    #[test]
    fn test_iter_is_ordered_by_name() {
        let mut inventory = Inventory::new();
        inventory.insert("b".to_string(), vec![]);
        inventory.insert("a".to_string(), vec![]);
        let names: Vec<_> = inventory.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
    }
}
