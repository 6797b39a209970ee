//! Persistent server registry
//!
//! Servers live in `<base>/data/servers.json` as a list of name/ip pairs
//! plus a last-modified stamp. A missing or unreadable file is replaced by
//! the built-in defaults, so the registry always loads. Entries are kept
//! sorted by name, case-insensitively.

pub mod report;

pub use report::ReportWriter;

use crate::error::{AppError, Result};
use crate::models::Target;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// On-disk registry document
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoreData {
    /// Registered servers
    servers: Vec<StoredServer>,
    /// RFC 3339 timestamp of the last write
    last_modified: String,
}

/// On-disk server entry; the wire format keys the address as `ip`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredServer {
    name: String,
    ip: String,
}

impl From<&Target> for StoredServer {
    fn from(target: &Target) -> Self {
        Self {
            name: target.name.clone(),
            ip: target.address.clone(),
        }
    }
}

impl From<StoredServer> for Target {
    fn from(server: StoredServer) -> Self {
        Target::new(server.name, server.ip)
    }
}

/// Manager for the server registry file
pub struct ServerStore {
    /// Registry file path
    store_path: PathBuf,
    /// Whether verbose logging is enabled
    verbose: bool,
}

impl ServerStore {
    /// Create a store rooted at the given base directory
    pub fn new(base_dir: &Path) -> Self {
        Self {
            store_path: base_dir.join("data").join("servers.json"),
            verbose: false,
        }
    }

    /// Create a store with an explicit file path
    pub fn with_path(store_path: PathBuf, verbose: bool) -> Self {
        Self {
            store_path,
            verbose,
        }
    }

    /// Path of the registry file
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Ensure the registry directory exists
    fn ensure_data_directory(&self) -> Result<()> {
        if let Some(parent) = self.store_path.parent() {
            if !parent.exists() {
                if self.verbose {
                    eprintln!("[STORE] Creating data directory: {}", parent.display());
                }
                fs::create_dir_all(parent).map_err(|e| {
                    AppError::storage(format!(
                        "Failed to create data directory '{}': {}",
                        parent.display(),
                        e
                    ))
                })?;
            }
        }
        Ok(())
    }

    /// Load the registered servers, sorted by name
    ///
    /// A missing or unparseable file is rewritten with the default servers
    /// and those defaults are returned.
    pub fn load(&self) -> Result<Vec<Target>> {
        if !self.store_path.exists() {
            if self.verbose {
                eprintln!(
                    "[STORE] No registry found at {}, seeding defaults",
                    self.store_path.display()
                );
            }
            return self.create_default_registry();
        }

        let content = match fs::read_to_string(&self.store_path) {
            Ok(content) => content,
            Err(e) => {
                if self.verbose {
                    eprintln!("[STORE] Registry unreadable ({}), seeding defaults", e);
                }
                return self.create_default_registry();
            }
        };

        match serde_json::from_str::<StoreData>(&content) {
            Ok(data) => {
                let mut servers: Vec<Target> =
                    data.servers.into_iter().map(Target::from).collect();
                sort_by_name(&mut servers);
                Ok(servers)
            }
            Err(e) => {
                if self.verbose {
                    eprintln!("[STORE] Registry corrupted ({}), seeding defaults", e);
                }
                self.create_default_registry()
            }
        }
    }

    /// Save the given servers, sorted by name
    pub fn save(&self, servers: &[Target]) -> Result<()> {
        self.ensure_data_directory()?;

        let mut sorted: Vec<Target> = servers.to_vec();
        sort_by_name(&mut sorted);

        let data = StoreData {
            servers: sorted.iter().map(StoredServer::from).collect(),
            last_modified: Utc::now().to_rfc3339(),
        };

        let content = serde_json::to_string_pretty(&data)
            .map_err(|e| AppError::storage(format!("Failed to serialize registry: {}", e)))?;

        fs::write(&self.store_path, content).map_err(|e| {
            AppError::storage(format!(
                "Failed to write registry '{}': {}",
                self.store_path.display(),
                e
            ))
        })?;

        if self.verbose {
            eprintln!(
                "[STORE] Saved {} servers to {}",
                sorted.len(),
                self.store_path.display()
            );
        }

        Ok(())
    }

    /// Add a server, rejecting duplicate names
    pub fn add_server(&self, name: &str, address: &str) -> Result<Target> {
        let target = Target::new(name, address);
        target.validate()?;

        let mut servers = self.load()?;
        if servers.iter().any(|s| s.name == target.name) {
            return Err(AppError::storage(format!(
                "Server name '{}' already exists",
                target.name
            )));
        }

        servers.push(target.clone());
        self.save(&servers)?;
        Ok(target)
    }

    /// Remove a server by name
    pub fn remove_server(&self, name: &str) -> Result<Target> {
        let mut servers = self.load()?;

        let position = servers
            .iter()
            .position(|s| s.name == name)
            .ok_or_else(|| AppError::storage(format!("Server '{}' not found", name)))?;

        let removed = servers.remove(position);
        self.save(&servers)?;
        Ok(removed)
    }

    /// Look up a registered server by name
    pub fn find(&self, name: &str) -> Result<Option<Target>> {
        let servers = self.load()?;
        Ok(servers.into_iter().find(|s| s.name == name))
    }

    /// Write the default servers and return them
    fn create_default_registry(&self) -> Result<Vec<Target>> {
        let defaults = default_servers();
        self.save(&defaults)?;
        Ok(defaults)
    }
}

/// The servers a fresh registry starts with
pub fn default_servers() -> Vec<Target> {
    crate::defaults::DEFAULT_SERVERS
        .iter()
        .map(|(name, address)| Target::new(*name, *address))
        .collect()
}

fn sort_by_name(servers: &mut [Target]) {
    servers.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
}
