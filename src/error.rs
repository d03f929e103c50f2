// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Failures surfaced by the ledger core and its storage.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("snapshot is not valid ledger JSON: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("could not encode ledger state: {0}")]
    Encode(#[source] serde_json::Error),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
