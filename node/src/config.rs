// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use pixelcrush_kernel::Digest;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

/// SHA-256 of the admin secret used by the reference deployment.
pub const DEFAULT_ADMIN_DIGEST: [u8; 32] = [
    0x8f, 0xec, 0x8f, 0x2e, 0xb9, 0x43, 0x3f, 0xb2, 0xf5, 0xf8, 0xa6, 0x39, 0x38, 0x30, 0x69, 0x0d,
    0x71, 0x6d, 0xed, 0x53, 0x45, 0x37, 0x62, 0xbf, 0x99, 0x74, 0x53, 0xf4, 0x25, 0xec, 0x44, 0xbf,
];

pub const DEFAULT_HOMEPAGE: &str = "https://github.com/BenWiederhake/pixelcrush";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{var}: invalid socket address {value:?}")]
    BindAddr { var: &'static str, value: String },
    #[error("{var}: expected 64 hex characters")]
    AdminDigest { var: &'static str },
}

#[derive(Debug, Clone)]
pub struct NodeConfig {
    pub bind_addr: SocketAddr,
    /// Snapshot loaded at startup.
    pub snapshot_path: PathBuf,
    /// Directory that receives admin-triggered saves.
    pub save_dir: PathBuf,
    pub admin_digest: Digest,
    pub homepage: String,
    /// Render the true-color image once before serving.
    pub warm_cache: bool,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
            snapshot_path: PathBuf::from("place.data"),
            save_dir: std::env::temp_dir(),
            admin_digest: Digest(DEFAULT_ADMIN_DIGEST),
            homepage: DEFAULT_HOMEPAGE.to_string(),
            warm_cache: true,
        }
    }
}

impl NodeConfig {
    /// Defaults overridden by `PIXELCRUSH_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();

        if let Some(value) = lookup("PIXELCRUSH_BIND") {
            cfg.bind_addr = value
                .parse()
                .map_err(|_| ConfigError::BindAddr { var: "PIXELCRUSH_BIND", value })?;
        }
        if let Some(value) = lookup("PIXELCRUSH_SNAPSHOT") {
            cfg.snapshot_path = PathBuf::from(value);
        }
        if let Some(value) = lookup("PIXELCRUSH_SAVE_DIR") {
            cfg.save_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("PIXELCRUSH_ADMIN_DIGEST") {
            let mut bytes = [0u8; 32];
            hex::decode_to_slice(value.trim(), &mut bytes)
                .map_err(|_| ConfigError::AdminDigest { var: "PIXELCRUSH_ADMIN_DIGEST" })?;
            cfg.admin_digest = Digest(bytes);
        }
        if let Some(value) = lookup("PIXELCRUSH_HOMEPAGE") {
            cfg.homepage = value;
        }
        if let Some(value) = lookup("PIXELCRUSH_WARM_CACHE") {
            cfg.warm_cache = !matches!(value.as_str(), "0" | "false" | "no");
        }

        Ok(cfg)
    }
}
