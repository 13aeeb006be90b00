// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Run-Tracker: record runs, keep them, and summarize them.
//!
//! This crate provides the backend API for a running app: a live tracking
//! session fed with location fixes, a store of completed runs, and the
//! aggregate statistics shown on the dashboard.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::RunDb;
use models::UserSettings;
use services::TrackingSession;
use std::sync::{Mutex, MutexGuard};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: RunDb,
    tracking: Mutex<TrackingSession>,
    settings: Mutex<UserSettings>,
}

impl AppState {
    /// Build state with an idle tracking session and settings seeded from config.
    pub fn new(config: Config, db: RunDb) -> Self {
        let settings = UserSettings {
            name: config.user_name.clone(),
            weight_kg: config.default_weight_kg,
        };
        Self {
            config,
            db,
            tracking: Mutex::new(TrackingSession::default()),
            settings: Mutex::new(settings),
        }
    }

    /// Lock the tracking session.
    pub fn tracking(&self) -> error::Result<MutexGuard<'_, TrackingSession>> {
        self.tracking
            .lock()
            .map_err(|_| error::AppError::Internal(anyhow::anyhow!("Tracking lock poisoned")))
    }

    /// Lock the user settings.
    pub fn settings(&self) -> error::Result<MutexGuard<'_, UserSettings>> {
        self.settings
            .lock()
            .map_err(|_| error::AppError::Internal(anyhow::anyhow!("Settings lock poisoned")))
    }
}
