// ABOUTME: Domain service layer between HTTP handlers and the analysis engines
// ABOUTME: Protocol-agnostic assembly of journal snapshots into analysis results
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

/// Analysis assembly over one user's journal snapshot
pub mod analysis;

pub use analysis::AnalysisService;
