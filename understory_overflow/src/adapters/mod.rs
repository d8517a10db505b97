// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Host implementations for other Understory crates.
//!
//! Enabled via feature flags so the core stays small and builds without `std`.

#[cfg(feature = "flow_tree_adapter")]
pub mod flow_tree;
