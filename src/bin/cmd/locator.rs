// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Locator command - parse and resolve corbaloc strings.

use clap::Subcommand;
use serde::Serialize;

use crate::common::{output_json_or, print_reference, Context, ReferenceView, Result};
use orbcodec::{string_to_object, Locator};

/// corbaloc operations.
#[derive(Subcommand, Clone, Debug)]
pub enum LocatorCmd {
    /// Parse a locator without resolving rir: names
    Parse {
        /// corbaloc string
        #[arg(value_name = "LOCATOR")]
        locator: String,

        /// Keep every address of a comma-separated list
        #[arg(long)]
        fallback: bool,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Parse a locator or IOR, resolving rir: names from the configuration
    Resolve {
        /// corbaloc or IOR string
        #[arg(value_name = "LOCATOR")]
        locator: String,

        /// Keep every address of a comma-separated list
        #[arg(long)]
        fallback: bool,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl LocatorCmd {
    pub fn run(self, ctx: &Context) -> Result<()> {
        match self {
            LocatorCmd::Parse {
                locator,
                fallback,
                json,
            } => cmd_parse(ctx, &locator, fallback, json),
            LocatorCmd::Resolve {
                locator,
                fallback,
                json,
            } => cmd_resolve(ctx, &locator, fallback, json),
        }
    }
}

fn cmd_parse(ctx: &Context, locator: &str, fallback: bool, json: bool) -> Result<()> {
    match ctx.parser(fallback).parse(locator)? {
        Locator::Iiop(reference) => {
            let view = ReferenceView::from(&reference);
            output_json_or(json, &view, || {
                print_reference(&view);
                Ok(())
            })
        }
        Locator::InitialReference { name } => {
            let view = InitialReferenceView {
                initial_reference: name,
            };
            output_json_or(json, &view, || {
                println!("Initial reference: {}", view.initial_reference);
                Ok(())
            })
        }
    }
}

fn cmd_resolve(ctx: &Context, locator: &str, fallback: bool, json: bool) -> Result<()> {
    let registry = ctx.initial_references()?;
    let reference = string_to_object(locator, &ctx.parser(fallback), &registry)?;
    let view = ReferenceView::from(&reference);
    output_json_or(json, &view, || {
        print_reference(&view);
        Ok(())
    })
}

// Output types

#[derive(Serialize)]
struct InitialReferenceView {
    initial_reference: String,
}
