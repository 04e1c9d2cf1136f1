//! Inventory extraction
//!
//! Folds the records of every collected page into one [`Inventory`], or
//! into a single droplet ID for the address lookup.

pub mod rules;

use crate::core::constants::field;
use crate::core::provider::Resource;
use crate::models::inventory::{FieldValue, Inventory, to_ascii};
use crate::models::page::PageDocument;
use regex::Regex;
use rules::{Field, Rule};
use serde_json::Value;
use std::net::Ipv4Addr;
use tracing::debug;

/// Which records an extraction includes, by name
#[derive(Debug, Clone)]
pub enum NameFilter {
    Any,
    /// Names matching the pattern at their start
    Prefix(Regex),
}

impl NameFilter {
    /// Compile `criteria` as a pattern anchored at the start of the name
    pub fn prefix(criteria: &str) -> Result<Self, regex::Error> {
        Regex::new(&format!("^(?:{})", criteria)).map(NameFilter::Prefix)
    }

    pub fn matches(&self, name: &str) -> bool {
        match self {
            NameFilter::Any => true,
            NameFilter::Prefix(regex) => regex.is_match(name),
        }
    }
}

/// Apply `rule` to every record of every page
///
/// Records without a usable name, or failing a required projection, are
/// skipped. The rule's post-filter runs once all pages are folded in.
pub fn extract(rule: &Rule, pages: &[PageDocument], filter: &NameFilter) -> Inventory {
    let mut inventory = Inventory::new();

    for record in pages.iter().flat_map(|page| page.records(rule.resource.collection())) {
        let Some(name) = record.get(field::NAME).and_then(Value::as_str) else {
            debug!("Skipping record without a name");
            continue;
        };
        if !filter.matches(name) {
            continue;
        }
        match rule.project(record) {
            Ok(values) => inventory.insert(to_ascii(name), values),
            Err(e) => debug!("Skipping record {}: {}", name, e),
        }
    }

    inventory.retain(rule.keep);
    inventory
}

/// ID of the first droplet whose first v4 address is `target`
pub fn find_id_by_ip(pages: &[PageDocument], target: Ipv4Addr) -> Option<FieldValue> {
    let target = target.to_string();

    pages
        .iter()
        .flat_map(|page| page.records(Resource::Droplets.collection()))
        .find_map(|record| {
            let ip = rules::ipv4_address(record, 0).ok()?;
            if ip != target {
                return None;
            }
            Field::Id.extract(record).ok().flatten()
        })
}
