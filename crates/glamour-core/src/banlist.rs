use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::model::ItemId;
use crate::tabular::data_rows;

/// Loads the deny-list of item ids. A missing file yields an empty set.
pub fn load_banlist(path: &Path) -> Result<HashSet<ItemId>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!(path = %path.display(), "No banlist found; nothing is banned");
            return Ok(HashSet::new());
        }
        Err(err) => return Err(err.into()),
    };

    Ok(parse_banlist(&raw))
}

pub fn parse_banlist(raw: &str) -> HashSet<ItemId> {
    let mut banned = HashSet::new();
    for row in data_rows(raw) {
        let token = row.fields.first().map(|field| field.trim()).unwrap_or("");
        match token.parse::<ItemId>() {
            Ok(id) => {
                banned.insert(id);
            }
            Err(_) => debug!(line = row.line, token, "Skipping malformed banlist row"),
        }
    }
    banned
}
