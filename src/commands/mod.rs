// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod budgets;
pub mod config;
pub mod dashboard;
pub mod exporter;
pub mod importer;
pub mod reports;
pub mod transactions;
pub mod users;
