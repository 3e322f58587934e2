// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2025 Blackman Artificial Intelligence Technologies Inc.

//! Model discovery
//!
//! The set of usable models is whatever the API lists; [`ModelCatalog`]
//! caches it and keeps the selection consistent.

pub mod catalog;

pub use catalog::ModelCatalog;
