// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::string::String;

/// Reasons construction can leave an instance inert.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The selector did not resolve to an element.
    #[error("can not find container `{selector}`")]
    ContainerNotFound {
        /// The selector that was tried.
        selector: String,
    },
    /// The container handle no longer refers to a live element.
    #[error("container handle is stale")]
    StaleContainer,
    /// The host refused to create one of the behavior's own elements.
    #[error("host could not create the {part}")]
    ElementCreation {
        /// Which element failed.
        part: &'static str,
    },
}
