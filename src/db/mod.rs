// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Database layer (in-memory run store with optional JSON snapshot).

pub mod memory;

pub use memory::{RunDb, SortType};
