//! Inventory modes
//!
//! Each mode builds its page URLs, collects the pages, and folds them into a
//! [`Report`] ready for printing.

use crate::core::constants::message;
use crate::core::pagination::{Paginator, collect_pages};
use crate::core::provider::{FetchError, PageSource, Resource};
use crate::extraction::rules::{self, Rule};
use crate::extraction::{NameFilter, extract, find_id_by_ip};
use crate::models::inventory::{FieldValue, Inventory};
use std::net::Ipv4Addr;
use thiserror::Error;
use tracing::info;

/// What the tool was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// ID of the droplet with this public address
    LookupIp(Ipv4Addr),
    /// Private addresses of droplets whose name starts with the pattern
    FilterName(String),
    ListAll,
    ListIp,
    Images,
    Volumes,
}

/// Outcome of one mode
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Id(FieldValue),
    Entries(Inventory),
    NotFound(&'static str),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Invalid name filter '{pattern}': {source}")]
    InvalidFilter {
        pattern: String,
        source: regex::Error,
    },
}

/// Run `mode` over `page_count` pages fetched from `source`
///
/// # Errors
///
/// Returns `CommandError::InvalidFilter` before any fetch when the name
/// pattern does not compile, and `CommandError::Fetch` when the source
/// reports a fatal failure.
pub async fn run<S>(
    source: &S,
    paginator: &Paginator,
    mode: &Mode,
    page_count: u32,
) -> Result<Report, CommandError>
where
    S: PageSource + ?Sized,
{
    match mode {
        Mode::LookupIp(ip) => {
            let urls = paginator.page_urls(Resource::Droplets, page_count);
            let pages = collect_pages(source, &urls).await?;
            info!("Looking up {} across {} pages", ip, pages.len());

            Ok(find_id_by_ip(&pages, *ip)
                .map(Report::Id)
                .unwrap_or(Report::NotFound(message::NO_DROPLET_BY_IP)))
        }
        Mode::FilterName(pattern) => {
            let filter =
                NameFilter::prefix(pattern).map_err(|source| CommandError::InvalidFilter {
                    pattern: pattern.clone(),
                    source,
                })?;
            inventory_report(
                source,
                paginator,
                &rules::PRIVATE_IPS,
                &filter,
                page_count,
                message::NO_DROPLET_BY_NAME,
            )
            .await
        }
        Mode::ListAll => {
            inventory_report(
                source,
                paginator,
                &rules::INVENTORY,
                &NameFilter::Any,
                page_count,
                message::NO_DROPLETS,
            )
            .await
        }
        Mode::ListIp => {
            inventory_report(
                source,
                paginator,
                &rules::PUBLIC_IPS,
                &NameFilter::Any,
                page_count,
                message::NO_DROPLETS,
            )
            .await
        }
        Mode::Images => {
            inventory_report(
                source,
                paginator,
                &rules::IMAGES,
                &NameFilter::Any,
                page_count,
                message::NO_IMAGES,
            )
            .await
        }
        Mode::Volumes => {
            inventory_report(
                source,
                paginator,
                &rules::VOLUMES,
                &NameFilter::Any,
                page_count,
                message::NO_VOLUMES,
            )
            .await
        }
    }
}

async fn inventory_report<S>(
    source: &S,
    paginator: &Paginator,
    rule: &Rule,
    filter: &NameFilter,
    page_count: u32,
    not_found: &'static str,
) -> Result<Report, CommandError>
where
    S: PageSource + ?Sized,
{
    let urls = paginator.page_urls(rule.resource, page_count);
    let pages = collect_pages(source, &urls).await?;
    let inventory = extract(rule, &pages, filter);
    info!(
        "Extracted {} entries from {} of {} pages",
        inventory.len(),
        pages.len(),
        urls.len()
    );

    if inventory.is_empty() {
        Ok(Report::NotFound(not_found))
    } else {
        Ok(Report::Entries(inventory))
    }
}
