// ABOUTME: Structured logging initialization for the server binary
// ABOUTME: tracing-subscriber setup with env-filter and optional JSON output
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Mealtrics Nutrition Intelligence

//! # Logging
//!
//! One `tracing_subscriber` registry for the whole process. The filter
//! comes from `RUST_LOG` when set, otherwise from the directive the binary
//! passes in. `MEALTRICS_LOG_FORMAT=json` switches to line-delimited JSON
//! for log shippers.

use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// `default_directive` is used when `RUST_LOG` is unset, e.g.
/// `"mealtrics_server=info,tower_http=info"`.
pub fn init(default_directive: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    let json = std::env::var("MEALTRICS_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(false)
            .init();
    } else {
        fmt().with_env_filter(filter).init();
    }
}
