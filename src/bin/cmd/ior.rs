// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! IOR command - stringify and decode object references.

use clap::Subcommand;

use crate::common::{output_json_or, print_reference, Context, ReferenceView, Result};
use orbcodec::{string_to_object, ByteOrder, ObjectReference};

/// Stringified IOR operations.
#[derive(Subcommand, Clone, Debug)]
pub enum IorCmd {
    /// Encode a locator (or re-encode an IOR) as an IOR: string
    Encode {
        /// corbaloc or IOR string
        #[arg(value_name = "LOCATOR")]
        locator: String,

        /// Repository id to store in the reference
        #[arg(long, value_name = "ID")]
        type_id: Option<String>,

        /// Encode little endian regardless of the configured byte order
        #[arg(long)]
        little_endian: bool,

        /// Keep every address of a comma-separated list
        #[arg(long)]
        fallback: bool,
    },

    /// Decode an IOR: string
    Decode {
        /// Stringified IOR
        #[arg(value_name = "IOR")]
        ior: String,

        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },
}

impl IorCmd {
    pub fn run(self, ctx: &Context) -> Result<()> {
        match self {
            IorCmd::Encode {
                locator,
                type_id,
                little_endian,
                fallback,
            } => cmd_encode(ctx, &locator, type_id, little_endian, fallback),
            IorCmd::Decode { ior, json } => cmd_decode(&ior, json),
        }
    }
}

fn cmd_encode(
    ctx: &Context,
    locator: &str,
    type_id: Option<String>,
    little_endian: bool,
    fallback: bool,
) -> Result<()> {
    let registry = ctx.initial_references()?;
    let mut reference = string_to_object(locator, &ctx.parser(fallback), &registry)?;
    if let Some(type_id) = type_id {
        reference = reference.with_type_id(type_id);
    }

    let byte_order = if little_endian {
        ByteOrder::LittleEndian
    } else {
        ctx.config.byte_order
    };
    println!("{}", reference.to_ior_string(byte_order));
    Ok(())
}

fn cmd_decode(ior: &str, json: bool) -> Result<()> {
    let reference = ObjectReference::from_ior_string(ior)?;
    let view = ReferenceView::from(&reference);
    output_json_or(json, &view, || {
        print_reference(&view);
        Ok(())
    })
}
