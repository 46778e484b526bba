use crate::error::RecommendError;
use crate::models::{
    Candidate, Rating, MISSING_INFO_LINK, UNKNOWN_AUTHOR, UNKNOWN_TITLE,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub const GOOGLE_BOOKS_VOLUMES_URL: &str = "https://www.googleapis.com/books/v1/volumes";

#[async_trait]
pub trait BookCatalog {
    async fn search_volumes(
        &self,
        search: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, RecommendError>;
}

#[derive(Debug, Clone, Deserialize)]
struct VolumesResponse {
    #[serde(default)]
    items: Option<Vec<VolumeItem>>,
}

#[derive(Debug, Clone, Deserialize)]
struct VolumeItem {
    #[serde(default, rename = "volumeInfo")]
    volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VolumeInfo {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    authors: Option<Vec<String>>,
    #[serde(default)]
    image_links: Option<ImageLinks>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    info_link: Option<String>,
    #[serde(default)]
    average_rating: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
struct ImageLinks {
    #[serde(default)]
    thumbnail: Option<String>,
}

impl From<VolumeInfo> for Candidate {
    fn from(info: VolumeInfo) -> Self {
        let title = info.title.unwrap_or_else(|| UNKNOWN_TITLE.to_string());
        let author = info
            .authors
            .and_then(|authors| authors.into_iter().next())
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        let description = info
            .description
            .filter(|description| !description.is_empty())
            .unwrap_or_else(|| title.clone());

        Self {
            title,
            author,
            cover: info
                .image_links
                .and_then(|links| links.thumbnail)
                .unwrap_or_default(),
            description,
            info_link: info
                .info_link
                .unwrap_or_else(|| MISSING_INFO_LINK.to_string()),
            rating: info
                .average_rating
                .map(Rating::Score)
                .unwrap_or(Rating::Unavailable),
        }
    }
}

pub fn parse_volumes(body: &str, max_results: usize) -> Result<Vec<Candidate>, RecommendError> {
    let response: VolumesResponse = serde_json::from_str(body)?;
    Ok(response
        .items
        .unwrap_or_default()
        .into_iter()
        .take(max_results)
        .map(|item| Candidate::from(item.volume_info.unwrap_or_default()))
        .collect())
}

pub struct GoogleBooksCatalog {
    client: Arc<Client>,
    endpoint: Url,
    api_key: Option<String>,
    timeout: Option<Duration>,
}

impl GoogleBooksCatalog {
    pub fn new(endpoint: &str, api_key: Option<String>) -> Result<Self, RecommendError> {
        Ok(Self {
            client: Arc::new(Client::new()),
            endpoint: Url::parse(endpoint)?,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn request_url(&self, search: &str, max_results: usize) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", search);
            pairs.append_pair("maxResults", &max_results.to_string());
            if let Some(key) = &self.api_key {
                pairs.append_pair("key", key);
            }
        }
        url
    }
}

#[async_trait]
impl BookCatalog for GoogleBooksCatalog {
    async fn search_volumes(
        &self,
        search: &str,
        max_results: usize,
    ) -> Result<Vec<Candidate>, RecommendError> {
        let mut request = self.client.get(self.request_url(search, max_results));
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "catalog search failed");
            return Err(RecommendError::UpstreamStatus {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        parse_volumes(&body, max_results)
    }
}
