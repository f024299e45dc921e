// SPDX-License-Identifier: Apache-2.0
// Copyright 2026 Membench Contributors

//! Command handlers for the membench CLI.

pub mod compare;
pub mod plot;
pub mod run;
