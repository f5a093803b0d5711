//! # Commands
//!
//! One subcommand per store operation, plus a few read-only helpers.
//!
//! ## Command Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  roomctl show                    ──► pretty JSON record on stdout       │
//! │  roomctl dimensions 5 4 meters   ──► set_room_dimensions               │
//! │  roomctl add-item '{..}'         ──► add_item                          │
//! │  roomctl update-item '{..}'      ──► update_item                       │
//! │  roomctl add-custom '{..}'       ──► add_custom_item                   │
//! │  roomctl place Sofa 1.0 2.5      ──► add_item (from a template)        │
//! │  roomctl select [id]             ──► select_item                       │
//! │  roomctl remove-item <id>        ──► remove_item                       │
//! │  roomctl remove-custom <name>    ──► remove_custom_item                │
//! │  roomctl reset                   ──► reset                             │
//! │  roomctl check                   ──► consistency report                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Item arguments are JSON objects in the persisted record's field names
//! (`labelPlacement`, `noColor`, ...).

use std::io::Write;

use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use roomplan_core::{check_consistency, encode_room, CustomItem, RoomItem, RoomRepository};
use roomplan_store::RoomStore;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Print the stored room as JSON
    Show,

    /// Set the room's width, height and unit
    #[command(allow_negative_numbers = true)]
    Dimensions {
        width: f64,
        height: f64,
        unit: String,
    },

    /// Append a placed item given as JSON
    AddItem { json: String },

    /// Replace the item with the same id
    UpdateItem { json: String },

    /// Append a reusable template given as JSON
    AddCustom { json: String },

    /// Place a copy of a template under a fresh id and print the id
    #[command(allow_negative_numbers = true)]
    Place { template: String, x: f64, y: f64 },

    /// Select an item, or clear the selection when no id is given
    Select { id: Option<String> },

    /// Remove every item with this id
    RemoveItem { id: String },

    /// Remove every template with this name
    RemoveCustom { name: String },

    /// Return the room to its defaults
    Reset,

    /// Report dangling selections and duplicate ids or names
    Check,
}

impl Command {
    fn mutates(&self) -> bool {
        !matches!(self, Command::Show | Command::Check)
    }
}

/// Runs one command against the store, writing any output to `out`.
///
/// Mutations are saved by the store itself. If any save failed the room is
/// flushed once more and a second failure becomes the command's error.
pub async fn execute<R, W>(command: Command, store: &mut RoomStore<R>, out: &mut W) -> Result<()>
where
    R: RoomRepository,
    W: Write,
{
    debug!(?command, "Executing command");
    let mutates = command.mutates();

    match command {
        Command::Show => {
            writeln!(out, "{}", encode_room(store.room())?)?;
        }
        Command::Dimensions {
            width,
            height,
            unit,
        } => {
            store.set_room_dimensions(width, height, unit).await;
        }
        Command::AddItem { json } => {
            let item: RoomItem = parse_json(&json, "item")?;
            store.add_item(item).await;
        }
        Command::UpdateItem { json } => {
            let item: RoomItem = parse_json(&json, "item")?;
            if store.room().item(&item.id).is_none() {
                warn!(id = %item.id, "No item with this id, nothing to update");
            }
            store.update_item(item).await;
        }
        Command::AddCustom { json } => {
            let item: CustomItem = parse_json(&json, "custom item")?;
            store.add_custom_item(item).await;
        }
        Command::Place { template, x, y } => {
            let item = store
                .room()
                .custom_item(&template)
                .ok_or_else(|| anyhow!("no custom item named '{}'", template))?
                .instantiate(Uuid::new_v4().to_string(), x, y);
            writeln!(out, "{}", item.id)?;
            store.add_item(item).await;
        }
        Command::Select { id } => {
            store.select_item(id).await;
        }
        Command::RemoveItem { id } => {
            store.remove_item(&id).await;
        }
        Command::RemoveCustom { name } => {
            store.remove_custom_item(&name).await;
        }
        Command::Reset => {
            store.reset().await;
        }
        Command::Check => {
            let issues = check_consistency(store.room());
            if issues.is_empty() {
                writeln!(out, "ok")?;
            }
            for issue in issues {
                writeln!(out, "{}", issue)?;
            }
        }
    }

    if mutates && store.persist_failures() > 0 {
        store.flush().await.context("room could not be saved")?;
    }

    Ok(())
}

fn parse_json<T: DeserializeOwned>(json: &str, what: &str) -> Result<T> {
    serde_json::from_str(json).with_context(|| format!("invalid {} JSON", what))
}
