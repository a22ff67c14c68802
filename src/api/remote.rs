//! HTTP client for the notes service.

use anyhow::Result as AnyResult;
use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::types::{EnhanceResponse, ErrorDetail, HealthStatus, PopulateResponse};
use super::{ApiAction, NotesApi, Result, SyncError};
use crate::config::ClientConfig;
use crate::models::{Note, NoteDraft};

/// Blocking HTTP client for the `/api/notes` endpoints.
pub struct RemoteNotesApi {
    client: Client,
    base_url: Url,
}

impl RemoteNotesApi {
    /// Create a client for the configured service URL
    pub fn new(config: &ClientConfig) -> AnyResult<Self> {
        let base_url = config.base_url()?;
        let client = Client::builder()
            .timeout(config.effective_timeout())
            .build()?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Check that the service is up
    pub fn health_check(&self) -> Result<HealthStatus> {
        let response = self.send(ApiAction::Health, self.client.get(self.base_url.clone()))?;
        read_json(ApiAction::Health, response)
    }

    /// Insert the service's sample notes, returning their ids
    pub fn populate(&self) -> Result<Vec<String>> {
        let url = self.endpoint(&["api", "populate"]);
        let response = self.send(ApiAction::Populate, self.client.post(url))?;
        let body: PopulateResponse = read_json(ApiAction::Populate, response)?;
        Ok(body.inserted_ids)
    }

    /// Build a URL below the base, percent-encoding each segment
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // base_url() only accepts URLs that can carry a path
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn notes_url(&self) -> Url {
        self.endpoint(&["api", "notes"])
    }

    fn note_url(&self, id: &str) -> Url {
        self.endpoint(&["api", "notes", id])
    }

    fn send(&self, action: ApiAction, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .map_err(|source| SyncError::Transport { action, source })?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<ErrorDetail>()
                .ok()
                .and_then(|body| body.message());
            log::warn!("{} failed with status {}", action, status);
            return Err(SyncError::Status {
                action,
                status,
                detail,
            });
        }

        Ok(response)
    }
}

fn read_json<T: DeserializeOwned>(action: ApiAction, response: Response) -> Result<T> {
    response
        .json()
        .map_err(|source| SyncError::Transport { action, source })
}

impl NotesApi for RemoteNotesApi {
    fn list_notes(&self) -> Result<Vec<Note>> {
        log::debug!("GET {}", self.notes_url());
        let response = self.send(ApiAction::List, self.client.get(self.notes_url()))?;
        read_json(ApiAction::List, response)
    }

    fn create_note(&self, draft: &NoteDraft) -> Result<Note> {
        log::debug!("POST {}", self.notes_url());
        let request = self.client.post(self.notes_url()).json(draft);
        let response = self.send(ApiAction::Create, request)?;
        read_json(ApiAction::Create, response)
    }

    fn update_note(&self, id: &str, draft: &NoteDraft) -> Result<Note> {
        let url = self.note_url(id);
        log::debug!("PUT {}", url);
        let response = self.send(ApiAction::Update, self.client.put(url).json(draft))?;
        read_json(ApiAction::Update, response)
    }

    fn delete_note(&self, id: &str) -> Result<()> {
        let url = self.note_url(id);
        log::debug!("DELETE {}", url);
        // Any 2xx counts; the body is ignored
        self.send(ApiAction::Delete, self.client.delete(url))?;
        Ok(())
    }

    fn enhance_note(&self, id: &str) -> Result<String> {
        let url = self.endpoint(&["api", "notes", id, "enhance"]);
        log::debug!("POST {}", url);
        let response = self.send(ApiAction::Enhance, self.client.post(url))?;
        let body: EnhanceResponse = read_json(ApiAction::Enhance, response)?;
        Ok(body.enhanced_content)
    }
}
