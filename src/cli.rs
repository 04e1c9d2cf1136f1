//! Command-line interface
//!
//! Exactly one mode flag selects what is printed. `--pages` applies to
//! whichever mode is active.

use crate::commands::Mode;
use clap::{ArgGroup, Parser};
use std::net::Ipv4Addr;

/// DigitalOcean droplet and image inventory
///
/// Reads the API token from DO_API_TOKEN.
#[derive(Debug, Parser)]
#[command(name = "droplet-inventory")]
#[command(version, about, long_about = None)]
#[command(group(
    ArgGroup::new("mode")
        .args(["ip", "filter", "list", "list_ip", "images", "volumes"])
        .multiple(false)
))]
pub struct Cli {
    /// Print the ID of the droplet with this public IPv4 address
    #[arg(long, value_name = "IPV4")]
    pub ip: Option<Ipv4Addr>,

    /// Print private addresses of droplets whose name starts with PREFIX
    #[arg(short, long, value_name = "PREFIX")]
    pub filter: Option<String>,

    /// Print id, size and public address of every droplet
    #[arg(long)]
    pub list: bool,

    /// Print the public address of every droplet
    #[arg(long)]
    pub list_ip: bool,

    /// Print id, distribution and type of every private image
    #[arg(long)]
    pub images: bool,

    /// Print droplets that have volumes attached
    #[arg(long)]
    pub volumes: bool,

    /// Number of API pages to read
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub pages: u32,
}

impl Cli {
    /// The selected mode, if any flag was given
    pub fn mode(&self) -> Option<Mode> {
        if let Some(ip) = self.ip {
            Some(Mode::LookupIp(ip))
        } else if let Some(filter) = &self.filter {
            Some(Mode::FilterName(filter.clone()))
        } else if self.list {
            Some(Mode::ListAll)
        } else if self.list_ip {
            Some(Mode::ListIp)
        } else if self.images {
            Some(Mode::Images)
        } else if self.volumes {
            Some(Mode::Volumes)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("droplet-inventory").chain(args.iter().copied()))
    }

    #[test]
    fn test_modes() {
        assert_eq!(
            parse(&["--ip", "203.0.113.5"]).unwrap().mode(),
            Some(Mode::LookupIp("203.0.113.5".parse().unwrap()))
        );
        assert_eq!(
            parse(&["-f", "web-"]).unwrap().mode(),
            Some(Mode::FilterName("web-".to_string()))
        );
        assert_eq!(parse(&["--list"]).unwrap().mode(), Some(Mode::ListAll));
        assert_eq!(parse(&["--list-ip"]).unwrap().mode(), Some(Mode::ListIp));
        assert_eq!(parse(&["--images"]).unwrap().mode(), Some(Mode::Images));
        assert_eq!(parse(&["--volumes"]).unwrap().mode(), Some(Mode::Volumes));
        assert_eq!(parse(&[]).unwrap().mode(), None);
    }

    #[test]
    fn test_pages() {
        assert_eq!(parse(&["--list"]).unwrap().pages, 1);
        assert_eq!(parse(&["--list", "--pages", "4"]).unwrap().pages, 4);
        assert!(parse(&["--list", "--pages", "0"]).is_err());
    }

    #[test]
    fn test_modes_are_exclusive() {
        assert!(parse(&["--list", "--volumes"]).is_err());
    }

    #[test]
    fn test_ip_must_be_ipv4() {
        assert!(parse(&["--ip", "web-1"]).is_err());
    }
}
