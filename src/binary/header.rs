// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary container magic bytes (spec §4.6 / §9 Design Notes: "tagged binary
//! records, schema version byte"). The rest of the container framing —
//! version byte, kind discriminant, length-prefixed payload, CRC32 footer —
//! lives in [`super::codec`].

/// Magic bytes: "SORX" in ASCII (container header)
pub const MAGIC: [u8; 4] = [0x53, 0x4F, 0x52, 0x58];

/// Footer magic: "XROS" (reversed, marks a valid container end)
pub const FOOTER_MAGIC: [u8; 4] = [0x58, 0x52, 0x4F, 0x53];
