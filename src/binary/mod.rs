// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary serialization: framing primitives plus the container format actually
//! used to persist an [`crate::index::InvertedIndex`] and its document table.

pub mod codec;
pub mod header;
