// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User settings (display name and body weight).

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Current user settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserSettings {
    pub name: String,
    /// Used for calorie estimates
    pub weight_kg: f32,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            name: String::new(),
            weight_kg: crate::config::DEFAULT_WEIGHT_KG,
        }
    }
}

/// Settings update payload. Both fields are required.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateSettingsRequest {
    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,
    #[validate(range(min = 1.0, max = 500.0, message = "weight must be 1-500 kg"))]
    pub weight_kg: f32,
}

impl UpdateSettingsRequest {
    /// Trim the name, then validate.
    pub fn into_settings(self) -> Result<UserSettings, validator::ValidationErrors> {
        let request = Self {
            name: self.name.trim().to_string(),
            weight_kg: self.weight_kg,
        };
        request.validate()?;
        Ok(UserSettings {
            name: request.name,
            weight_kg: request.weight_kg,
        })
    }
}
