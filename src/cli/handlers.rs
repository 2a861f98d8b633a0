use std::env;
use std::path::PathBuf;

use serde_json::Value;

use super::commands::{ServeArgs, SetArgs};
use crate::config::{ServerConfig, StoreConfig};
use crate::entity::{fields, NoteView};
use crate::error::Result;
use crate::service::{Action, NoteService};
use crate::storage::SqliteDatastore;
use crate::validate::Fields;

/// Open the configured datastore and wrap it in a service
fn open_service(db: Option<PathBuf>) -> Result<NoteService> {
    let store = StoreConfig::resolve(false, db).open()?;
    Ok(NoteService::new(store))
}

fn addr_body(addr: String) -> Fields {
    let mut body = Fields::new();
    body.insert(fields::ADDR.to_string(), Value::String(addr));
    body
}

fn print_note(note: &NoteView) {
    println!("{}", note.addr);
    for (field, value) in note.fields.iter() {
        println!("  {}: {}", field, value);
    }
}

pub fn handle_init() -> Result<()> {
    let root = env::current_dir()?;

    let _store = SqliteDatastore::init(&root)?;

    println!("Initialized addrnotes project in {}", root.display());
    Ok(())
}

pub async fn handle_serve(args: ServeArgs, db: Option<PathBuf>, log_level: Option<String>) -> Result<()> {
    let config = ServerConfig::new(args.bind, StoreConfig::resolve(args.memory, db), log_level);
    crate::logging::init(&config.log_filter);

    tracing::info!("Starting addrnotes {}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Datastore: {}", config.store.describe());

    let service = NoteService::new(config.store.open()?);
    crate::api::serve(&config, service).await
}

pub async fn handle_set(args: SetArgs, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;

    let mut body = addr_body(args.addr);
    let optional = [
        (fields::COST, args.cost),
        (fields::COST_UNIT, args.cost_unit),
        (fields::VALUE, args.value),
        (fields::VALUE_UNIT, args.value_unit),
        (fields::STATUS, args.status),
    ];
    for (field, value) in optional {
        if let Some(value) = value {
            body.insert(field.to_string(), Value::String(value));
        }
    }

    let response = service.create_or_update(&body).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        let verb = match response.action {
            Action::Created => "Created",
            _ => "Updated",
        };
        println!("{} note {}", verb, response.addr);
    }
    Ok(())
}

pub async fn handle_get(addr: String, json: bool, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;
    let note = service.read(&addr_body(addr)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&note)?);
    } else {
        print_note(&note);
    }
    Ok(())
}

pub async fn handle_delete(addr: String, json: bool, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;
    let response = service.delete(&addr_body(addr)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("Deleted note {}", response.addr);
    }
    Ok(())
}

pub async fn handle_list(json: bool, db: Option<PathBuf>) -> Result<()> {
    let service = open_service(db)?;
    let notes = service.list().await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
        return Ok(());
    }

    if notes.is_empty() {
        println!("No notes found.");
        return Ok(());
    }

    for note in &notes {
        print_note(note);
    }
    Ok(())
}
