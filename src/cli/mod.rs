// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the `skwiki` command-line interface.
//!
//! Two subcommands: `build` runs the full index pipeline over a Slovak
//! Wikipedia XML dump and persists the result, `search` loads a persisted
//! index and ranks a query against it (spec §6 "CLI surface").

pub mod display;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "skwiki",
    about = "Slovak Wikipedia inverted-index search engine",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a dump, preprocess every page, and build + persist the index.
    Build {
        /// Path to the JSON configuration file.
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,
    },

    /// Query a persisted index.
    Search {
        /// Path to the JSON configuration file.
        #[arg(short, long, default_value = "config.json")]
        config: PathBuf,

        /// Search query.
        query: String,

        /// Use OR instead of the default AND between query terms.
        #[arg(short = 'o', long)]
        or: bool,

        /// Maximum number of ranked results to return.
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,

        /// Cap on the candidate set scored before ranking, overriding the
        /// configured `relevant_documents_count`.
        #[arg(short = 'x', long)]
        relevant_documents_cap: Option<usize>,
    },
}
