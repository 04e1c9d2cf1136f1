//! Projection tables for the inventory extractors
//!
//! Each [`Rule`] lists the record fields an extractor projects, in output
//! order, and the post-filter applied once every page has been folded in.

use crate::core::constants::field;
use crate::core::provider::Resource;
use crate::models::inventory::FieldValue;
use serde_json::Value;
use std::net::Ipv4Addr;
use thiserror::Error;

/// Why a record was skipped
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` has an unexpected shape")]
    UnexpectedShape(&'static str),
}

/// A value an extractor reads from a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Id,
    SizeSlug,
    Distribution,
    ImageType,
    /// First listed v4 address
    PublicIpv4,
    /// Second listed v4 address when it is in 10.0.0.0/8, else the first
    PrivateIpv4,
    /// Attached volume IDs; absent and empty both count as none
    VolumeIds,
}

impl Field {
    /// Read this field from `record`
    ///
    /// `Ok(None)` means the field is absent or empty.
    pub fn extract(self, record: &Value) -> Result<Option<FieldValue>, RecordError> {
        match self {
            Field::Id => scalar(record, field::ID),
            Field::SizeSlug => scalar(record, field::SIZE_SLUG),
            Field::Distribution => scalar(record, field::DISTRIBUTION),
            Field::ImageType => scalar(record, field::TYPE),
            Field::PublicIpv4 => ipv4_address(record, 0).map(|ip| Some(FieldValue::text(ip))),
            Field::PrivateIpv4 => private_ipv4(record).map(|ip| Some(FieldValue::text(ip))),
            Field::VolumeIds => volume_ids(record),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Field::Id => field::ID,
            Field::SizeSlug => field::SIZE_SLUG,
            Field::Distribution => field::DISTRIBUTION,
            Field::ImageType => field::TYPE,
            Field::PublicIpv4 | Field::PrivateIpv4 => field::NETWORKS,
            Field::VolumeIds => field::VOLUME_IDS,
        }
    }
}

/// How an absent field is treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    /// The record is skipped
    Required,
    /// The value is left out of the sequence
    Optional,
}

#[derive(Debug, Clone, Copy)]
pub struct Projection {
    pub field: Field,
    pub presence: Presence,
}

const fn required(field: Field) -> Projection {
    Projection {
        field,
        presence: Presence::Required,
    }
}

const fn optional(field: Field) -> Projection {
    Projection {
        field,
        presence: Presence::Optional,
    }
}

/// One extractor's projection table
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// Listing the records are read from
    pub resource: Resource,
    pub projections: &'static [Projection],
    /// Entries failing this are dropped after all pages are folded
    pub keep: fn(&[FieldValue]) -> bool,
}

impl Rule {
    /// Project `record` to its values, in table order
    pub fn project(&self, record: &Value) -> Result<Vec<FieldValue>, RecordError> {
        let mut values = Vec::with_capacity(self.projections.len());
        for projection in self.projections {
            match (projection.field.extract(record)?, projection.presence) {
                (Some(value), _) => values.push(value),
                (None, Presence::Optional) => {}
                (None, Presence::Required) => {
                    return Err(RecordError::MissingField(projection.field.name()));
                }
            }
        }
        Ok(values)
    }
}

fn keep_all(_: &[FieldValue]) -> bool {
    true
}

/// Only droplets that actually have volumes attached
fn has_volumes(values: &[FieldValue]) -> bool {
    values.len() > 1 && values[1].is_list()
}

/// Full droplet inventory: id, size, public address
pub const INVENTORY: Rule = Rule {
    resource: Resource::Droplets,
    projections: &[
        required(Field::Id),
        required(Field::SizeSlug),
        required(Field::PublicIpv4),
    ],
    keep: keep_all,
};

/// Droplet name to public address
pub const PUBLIC_IPS: Rule = Rule {
    resource: Resource::Droplets,
    projections: &[required(Field::PublicIpv4)],
    keep: keep_all,
};

/// Droplet name to private address
pub const PRIVATE_IPS: Rule = Rule {
    resource: Resource::Droplets,
    projections: &[required(Field::PrivateIpv4)],
    keep: keep_all,
};

/// Private image inventory: id, distribution, image type
pub const IMAGES: Rule = Rule {
    resource: Resource::PrivateImages,
    projections: &[
        required(Field::Id),
        required(Field::Distribution),
        required(Field::ImageType),
    ],
    keep: keep_all,
};

/// Droplets with their attached volumes
pub const VOLUMES: Rule = Rule {
    resource: Resource::Droplets,
    projections: &[required(Field::Id), optional(Field::VolumeIds)],
    keep: has_volumes,
};

fn scalar(record: &Value, key: &'static str) -> Result<Option<FieldValue>, RecordError> {
    match record.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value @ (Value::String(_) | Value::Number(_))) => Ok(FieldValue::from_json(value)),
        Some(_) => Err(RecordError::UnexpectedShape(key)),
    }
}

/// The `index`th v4 address of a droplet
pub fn ipv4_address(record: &Value, index: usize) -> Result<&str, RecordError> {
    let v4 = record
        .get(field::NETWORKS)
        .ok_or(RecordError::MissingField(field::NETWORKS))?
        .get(field::V4)
        .and_then(Value::as_array)
        .ok_or(RecordError::MissingField(field::V4))?;

    v4.get(index)
        .ok_or(RecordError::MissingField(field::V4))?
        .get(field::IP_ADDRESS)
        .and_then(Value::as_str)
        .ok_or(RecordError::UnexpectedShape(field::IP_ADDRESS))
}

fn private_ipv4(record: &Value) -> Result<&str, RecordError> {
    match ipv4_address(record, 1) {
        Ok(ip) if is_private_block(ip) => Ok(ip),
        _ => ipv4_address(record, 0),
    }
}

/// Whether `ip` is an IPv4 address in 10.0.0.0/8
pub fn is_private_block(ip: &str) -> bool {
    ip.parse::<Ipv4Addr>()
        .map(|addr| addr.octets()[0] == 10)
        .unwrap_or(false)
}

fn volume_ids(record: &Value) -> Result<Option<FieldValue>, RecordError> {
    match record.get(field::VOLUME_IDS) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Array(ids)) if ids.is_empty() => Ok(None),
        Some(ids @ Value::Array(_)) => FieldValue::from_json(ids)
            .map(Some)
            .ok_or(RecordError::UnexpectedShape(field::VOLUME_IDS)),
        Some(_) => Err(RecordError::UnexpectedShape(field::VOLUME_IDS)),
    }
}
