//! # Demo Room Seeder
//!
//! Writes a furnished demo room into the database for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./roomplan_dev.db
//! cargo run -p roomplan-db --bin seed
//!
//! # Specify database path, overwrite an existing room
//! cargo run -p roomplan-db --bin seed -- --db ./data/roomplan.db --force
//! ```
//!
//! ## Generated Room
//! A 5 × 4 m living room with a handful of placed pieces and the templates
//! they were placed from. Nothing is selected.

use std::env;

use roomplan_core::{CustomItem, LabelPlacement, LengthUnit, RoomRepository, RoomState};
use roomplan_db::{Database, DbConfig};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Templates: (name, group, color, width, height, label placement)
const TEMPLATES: &[(&str, &str, &str, f64, f64, LabelPlacement)] = &[
    ("Sofa", "Living", "#6b8e23", 2.2, 0.9, LabelPlacement::Inside),
    ("Armchair", "Living", "#8fbc8f", 0.9, 0.9, LabelPlacement::Bottom),
    ("Coffee Table", "Living", "#deb887", 1.2, 0.6, LabelPlacement::Inside),
    ("Bookshelf", "Storage", "#a0522d", 1.0, 0.35, LabelPlacement::Top),
    ("Floor Lamp", "Lighting", "#ffd700", 0.4, 0.4, LabelPlacement::Right),
];

/// Placements: (template index, x, y, rotation)
const PLACEMENTS: &[(usize, f64, f64, f64)] = &[
    (0, 1.4, 3.0, 0.0),
    (1, 0.3, 1.2, 90.0),
    (1, 3.8, 1.2, 270.0),
    (2, 1.9, 1.8, 0.0),
    (3, 4.0, 0.0, 0.0),
    (4, 0.1, 3.4, 0.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./roomplan_dev.db");
    let mut force = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--force" | "-f" => force = true,
            "--help" | "-h" => {
                println!("RoomPlan Demo Room Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./roomplan_dev.db)");
                println!("  -f, --force        Overwrite an existing room");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("RoomPlan Demo Room Seeder");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let repo = db.room();
    if !force && repo.raw().await?.is_some() {
        println!("⚠ Database already holds a room under '{}'", repo.key());
        println!("  Pass --force to overwrite it.");
        return Ok(());
    }

    let room = demo_room();
    repo.save(&room).await?;

    println!(
        "✓ Seeded {} x {} {} room with {} items and {} templates",
        room.width,
        room.height,
        room.unit,
        room.items.len(),
        room.custom_items.len()
    );

    db.close().await;
    Ok(())
}

fn demo_room() -> RoomState {
    let mut room = RoomState::default();
    room.set_room_dimensions(5.0, 4.0, "meters");

    let templates: Vec<CustomItem> = TEMPLATES
        .iter()
        .map(|&(name, group, color, width, height, label_placement)| CustomItem {
            name: name.to_string(),
            group: group.to_string(),
            color: color.to_string(),
            width,
            height,
            rotation: 0.0,
            label_placement,
            unit: LengthUnit::Meters,
            no_color: false,
        })
        .collect();

    for &(index, x, y, rotation) in PLACEMENTS {
        let mut item = templates[index].instantiate(Uuid::new_v4().to_string(), x, y);
        item.rotation = rotation;
        room.add_item(item);
    }

    for template in templates {
        room.add_custom_item(template);
    }

    room
}
