//! Printer profile registry
//!
//! Holds the built-in presets plus any user profiles loaded from JSON.

use std::path::Path;

use tracing::{debug, info};

use crate::error::{DeviceError, DeviceResult};
use crate::model::PrinterProfile;

/// Lookup table of known printers
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<PrinterProfile>,
}

impl ProfileRegistry {
    /// Registry containing the built-in presets
    pub fn new() -> Self {
        Self {
            profiles: PrinterProfile::presets(),
        }
    }

    pub fn profiles(&self) -> &[PrinterProfile] {
        &self.profiles
    }

    /// Adds a profile, rejecting duplicate names.
    pub fn add(&mut self, profile: PrinterProfile) -> DeviceResult<()> {
        profile.validate()?;
        if self.find(&profile.name).is_some() {
            return Err(DeviceError::ProfileAlreadyExists(profile.name));
        }
        debug!("Registered printer profile {}", profile.name);
        self.profiles.push(profile);
        Ok(())
    }

    /// Looks a profile up by case-insensitive name or id
    pub fn find(&self, name: &str) -> Option<&PrinterProfile> {
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name) || p.id.eq_ignore_ascii_case(name))
    }

    /// Resolves a selector that is either a 1-based menu position or a name.
    pub fn select(&self, selector: &str) -> DeviceResult<&PrinterProfile> {
        if let Ok(position) = selector.trim().parse::<usize>() {
            return position
                .checked_sub(1)
                .and_then(|i| self.profiles.get(i))
                .ok_or_else(|| DeviceError::ProfileNotFound(selector.to_string()));
        }
        self.find(selector.trim())
            .ok_or_else(|| DeviceError::ProfileNotFound(selector.to_string()))
    }

    /// Loads additional profiles from a JSON array file.
    pub fn load_from_file(&mut self, path: &Path) -> DeviceResult<usize> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DeviceError::LoadError(format!("{}: {}", path.display(), e)))?;
        let profiles: Vec<PrinterProfile> = serde_json::from_str(&content)?;
        let count = profiles.len();
        for profile in profiles {
            self.add(profile)?;
        }
        info!("Loaded {} printer profiles from {}", count, path.display());
        Ok(count)
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
