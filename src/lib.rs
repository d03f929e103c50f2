// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod budget;
pub mod cli;
pub mod commands;
pub mod db;
pub mod error;
pub mod models;
pub mod snapshot;
pub mod store;
pub mod utils;

pub use error::{LedgerError, Result};
pub use models::{Kind, LedgerState, MonthKey, Transaction};
pub use store::TransactionStore;
