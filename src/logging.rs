// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Logging setup.
//!
//! Mirrors `slovak_wiki_search_engine`'s `setup_logging` (`logging.basicConfig`
//! plus a `verbose` floor): when `verbose` is false the floor is `WARN`, when
//! true it's `INFO`. `RUST_LOG` still overrides both if set.

use tracing_subscriber::EnvFilter;

pub fn init(verbose: bool) {
    let default_floor = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("skwiki_search={default_floor}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}
