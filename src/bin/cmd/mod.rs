// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! CLI subcommands.

mod ior;
mod locator;

pub use ior::IorCmd;
pub use locator::LocatorCmd;
