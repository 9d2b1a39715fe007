use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

use crate::error::DirectoryError;
use crate::models::{ClientRecord, PropertyRecord};

#[derive(Debug, Default, Deserialize)]
struct Snapshot {
    #[serde(default)]
    clients: Vec<ClientRecord>,
    #[serde(default)]
    properties: Vec<PropertyRecord>,
}

/// Read-only, already-loaded view of the directory's records
#[derive(Debug, Default)]
pub struct Directory {
    clients: Vec<ClientRecord>,
    properties: Vec<PropertyRecord>,
}

impl Directory {
    pub fn new(clients: Vec<ClientRecord>, properties: Vec<PropertyRecord>) -> Self {
        Self {
            clients,
            properties,
        }
    }

    /// Load a `{ "clients": [...], "properties": [...] }` snapshot from disk
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| DirectoryError::Read {
                path: PathBuf::from(path),
                source,
            })?;

        let snapshot: Snapshot =
            serde_json::from_str(&raw).map_err(|source| DirectoryError::Parse {
                path: PathBuf::from(path),
                source,
            })?;

        info!(
            path = %path.display(),
            clients = snapshot.clients.len(),
            properties = snapshot.properties.len(),
            "loaded directory snapshot"
        );

        Ok(Self::new(snapshot.clients, snapshot.properties))
    }

    pub fn clients(&self) -> &[ClientRecord] {
        &self.clients
    }

    pub fn get_client(&self, id: i32) -> Result<&ClientRecord, DirectoryError> {
        self.clients
            .iter()
            .find(|client| client.id == Some(id))
            .ok_or(DirectoryError::ClientNotFound(id))
    }

    /// Properties owned by a client, failing if the client is unknown
    pub fn properties_for_client(&self, client_id: i32) -> Result<Vec<&PropertyRecord>, DirectoryError> {
        self.get_client(client_id)?;

        Ok(self
            .properties
            .iter()
            .filter(|property| property.client_id == client_id)
            .collect())
    }
}
