//! Constants for the DigitalOcean API and inventory output
//!
//! This module defines the endpoints, collection keys, record field names
//! and user-facing messages used throughout the application.

/// DigitalOcean API constants
pub mod api {
    /// Default API root
    pub const DEFAULT_BASE_URL: &str = "https://api.digitalocean.com/v2";

    /// Largest page size the tool asks for
    pub const DEFAULT_PER_PAGE: u32 = 999;

    /// Droplets endpoint path
    pub const DROPLETS_PATH: &str = "droplets";

    /// Images endpoint path
    pub const IMAGES_PATH: &str = "images";

    /// Query restricting the images listing to the account's own images
    pub const PRIVATE_IMAGES_QUERY: &str = "private=true";
}

/// Top-level collection keys in page documents
pub mod collection {
    pub const DROPLETS: &str = "droplets";

    pub const IMAGES: &str = "images";
}

/// Record field names
pub mod field {
    pub const ID: &str = "id";
    pub const NAME: &str = "name";
    pub const SIZE_SLUG: &str = "size_slug";
    pub const DISTRIBUTION: &str = "distribution";
    pub const TYPE: &str = "type";
    pub const NETWORKS: &str = "networks";
    pub const V4: &str = "v4";
    pub const IP_ADDRESS: &str = "ip_address";
    pub const VOLUME_IDS: &str = "volume_ids";
}

/// Environment variable names
pub mod env {
    /// Bearer token for the API
    pub const API_TOKEN: &str = "DO_API_TOKEN";

    /// Overrides `[api] base_url`
    pub const API_URL: &str = "DO_API_URL";

    /// Overrides `[logging] log_level`
    pub const LOG_LEVEL: &str = "LOG_LEVEL";

    /// Path of the optional TOML configuration file
    pub const CONFIG_PATH: &str = "DROPLET_INVENTORY_CONFIG";
}

/// Messages printed when a mode finds nothing
pub mod message {
    pub const NO_DROPLET_BY_IP: &str = "No such droplet found in your account.";
    pub const NO_DROPLET_BY_NAME: &str = "No such droplet name found in your account.";
    pub const NO_DROPLETS: &str = "No droplets found in your account.";
    pub const NO_VOLUMES: &str = "No droplets with volumes found in your account.";
    pub const NO_IMAGES: &str = "No private images found in your account.";
    pub const USAGE_HINT: &str =
        "Please pass --ip, -f, --list, --list-ip, --images or --volumes as input parameter";
}
