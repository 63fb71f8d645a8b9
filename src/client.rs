use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::VideoDetails;
use crate::error::{ConsoleError, Result};
use crate::mapper;

/// Client for the remote video catalog.
///
/// Every operation is a single synchronous request. A non-200 status or a
/// network-level failure yields `Ok(None)`; a record that violates the API
/// contract (bad field, unknown category) propagates as an error instead of
/// being collapsed into absence.
pub struct VideoApi {
    http: Client,
    base_url: String,
}

impl VideoApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    /// Fetches the whole catalog, in the order the API returns it.
    pub fn fetch_videos(&self) -> Result<Option<Vec<VideoDetails>>> {
        let url = format!("{}/videos/", self.base_url);
        let Some(response) = self.ok_response(self.http.get(&url).send(), &url)? else {
            return Ok(None);
        };
        self.parse_listing(response).map(Some)
    }

    /// Fetches one video by id.
    pub fn fetch_video(&self, id: u64) -> Result<Option<VideoDetails>> {
        let url = format!("{}/videos/{}", self.base_url, id);
        let Some(response) = self.ok_response(self.http.get(&url).send(), &url)? else {
            return Ok(None);
        };
        let record: Value = response.json()?;
        mapper::video_details(&record).map(Some)
    }

    /// Fetches the authenticated user's own uploads.
    pub fn fetch_own_videos(&self, key: &str) -> Result<Option<Vec<VideoDetails>>> {
        let url = format!("{}/videos/own", self.base_url);
        let request = self
            .http
            .get(&url)
            .header(reqwest::header::AUTHORIZATION, format!("Token {key}"));
        let Some(response) = self.ok_response(request.send(), &url)? else {
            return Ok(None);
        };
        self.parse_listing(response).map(Some)
    }

    /// Collapses transport failures and non-200 statuses into `None`.
    /// Both mean the same thing to the caller: nothing to show.
    fn ok_response(
        &self,
        sent: reqwest::Result<Response>,
        url: &str,
    ) -> Result<Option<Response>> {
        let response = match sent {
            Ok(response) => response,
            Err(e) => {
                warn!("request to {url} failed: {e}");
                return Ok(None);
            }
        };
        if response.status() != StatusCode::OK {
            debug!("GET {url} returned {}", response.status());
            return Ok(None);
        }
        Ok(Some(response))
    }

    fn parse_listing(&self, response: Response) -> Result<Vec<VideoDetails>> {
        let body: Value = response.json()?;
        let records = body
            .as_array()
            .ok_or_else(|| ConsoleError::MissingField("expected a JSON array of videos".into()))?;
        let mut videos = Vec::with_capacity(records.len());
        for record in records {
            videos.push(mapper::video_details(record)?);
        }
        Ok(videos)
    }
}
