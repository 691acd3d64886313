// SPDX-License-Identifier: MIT

use crate::{
    Error,
    task::{Task, wire},
};
use async_trait::async_trait;
use reqwest::{
    StatusCode,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use url::Url;

const BASE_URL: &str = "https://api.todoist.com/rest/v2";

pub const DEFAULT_FILTER: &str = "#Inbox";

#[async_trait]
pub trait TaskSource: Send + Sync {
    /// Returns every task matching the service side filter expression.
    async fn tasks(&self, filter: &str) -> Result<Vec<Task>, Error>;
}

pub struct Client {
    default_header: HeaderMap,
    client: reqwest::Client,
    tasks_url: Url,
}

impl Client {
    pub fn new(api_key: &str) -> Result<Self, Error> {
        Self::with_base_url(api_key, BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self, Error> {
        Self::with_http_client(api_key, base_url, reqwest::Client::new())
    }

    fn with_http_client(api_key: &str, base_url: &str, client: reqwest::Client) -> Result<Self, Error> {
        if api_key.is_empty() {
            return Err(Error::Usage("the API key must not be empty".to_string()));
        }

        let mut auth = HeaderValue::from_str(format!("Bearer {api_key}").as_str())
            .map_err(|_| Error::Usage("the API key contains characters not allowed in a header".to_string()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let tasks_url = Url::parse(format!("{}/tasks", base_url.trim_end_matches('/')).as_str())
            .map_err(|e| Error::Usage(format!("wrong base url {base_url}: {e}")))?;

        Ok(Self {
            default_header: headers,
            client,
            tasks_url,
        })
    }

    /// Builds the authenticated `GET /tasks?filter=...` request without sending it.
    pub fn request(&self, filter: &str) -> Result<reqwest::Request, Error> {
        let mut url = self.tasks_url.clone();
        url.query_pairs_mut().append_pair("filter", filter);

        self.client
            .get(url)
            .headers(self.default_header.clone())
            .build()
            .map_err(Error::Transport)
    }
}

#[async_trait]
impl TaskSource for Client {
    #[tracing::instrument(level = "info", target = "todoist_client", skip(self))]
    async fn tasks(&self, filter: &str) -> Result<Vec<Task>, Error> {
        let req = self.request(filter)?;

        let resp = self.client.execute(req).await.map_err(|e| {
            tracing::error!(target:"todoist_client", error=?e, "Send the request");
            Error::Transport(e)
        })?;

        check_status(resp.status())?;

        let body = resp.bytes().await.map_err(|e| {
            tracing::error!(target:"todoist_client", error=?e, "Read the response body");
            Error::Transport(e)
        })?;

        parse_tasks(&body)
    }
}

pub fn check_status(status: StatusCode) -> Result<(), Error> {
    if status == StatusCode::OK {
        return Ok(());
    }

    tracing::error!(target:"todoist_client", status=status.as_u16(), "Wrong status");
    Err(Error::Fetch {
        status: status.as_u16(),
    })
}

/// Parses the JSON array returned by the tasks endpoint.
pub fn parse_tasks(body: &[u8]) -> Result<Vec<Task>, Error> {
    let tasks = serde_json::from_slice::<Vec<wire::Task>>(body).map_err(|e| {
        tracing::error!(target:"todoist_client", error=?e, "Parse the response");
        Error::from(e)
    })?;

    Ok(tasks.into_iter().map(Task::from).collect())
}
