// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! REST client for one target's management API

use crate::credentials::CredentialResolver;
use filer_core::{
    CredentialError, JobHandle, JobLinkError, RemoteError, Secret, TargetDescriptor,
};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Blanket per-request timeout, independent of job deadlines
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(2 * 60);

const USER_AGENT: &str = concat!("filer/", env!("CARGO_PKG_VERSION"));

/// Errors from talking to the appliance
#[derive(Debug, Error)]
pub enum RestError {
    #[error(transparent)]
    Credentials(#[from] CredentialError),
    #[error(transparent)]
    Remote(#[from] RemoteError),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("{url} accepted the request as a job but named no job")]
    MissingJob { url: String },
}

/// Client bound to one target
///
/// Every request resolves credentials first: a token becomes a bearer
/// header, a password becomes basic auth.
#[derive(Debug, Clone)]
pub struct RestClient {
    target: Arc<TargetDescriptor>,
    resolver: CredentialResolver,
    http: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(target: TargetDescriptor, resolver: CredentialResolver) -> Result<Self, RestError> {
        let base_url = target.base_url();
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(target.use_insecure_tls)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|source| RestError::Transport {
                url: base_url.clone(),
                source,
            })?;
        Ok(Self {
            target: Arc::new(target),
            resolver,
            http,
            base_url,
        })
    }

    pub fn target(&self) -> &TargetDescriptor {
        &self.target
    }

    /// GET `path` and decode the JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, RestError> {
        let url = self.url(path);
        let request = self.http.get(&url).query(query);
        let (_, body) = self.execute(Method::GET, &url, request).await?;
        serde_json::from_slice(&body).map_err(|source| RestError::Decode { url, source })
    }

    /// Send a mutation with a JSON body
    ///
    /// Returns the job to wait on when the appliance accepted the request
    /// for background processing. A 201/202 body that names no job is an
    /// error.
    pub async fn submit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Option<JobHandle>, RestError> {
        let url = self.url(path);
        let request = self.http.request(method.clone(), &url).json(body);
        let (status, body) = self.execute(method, &url, request).await?;
        job_for(status, &url, &body)
    }

    /// DELETE `path`
    pub async fn delete(&self, path: &str) -> Result<Option<JobHandle>, RestError> {
        let url = self.url(path);
        let request = self.http.delete(&url);
        let (status, body) = self.execute(Method::DELETE, &url, request).await?;
        job_for(status, &url, &body)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(
        &self,
        method: Method,
        url: &str,
        request: RequestBuilder,
    ) -> Result<(StatusCode, Vec<u8>), RestError> {
        let credentials = self.resolver.resolve(&self.target).await?;
        let request = match &credentials.secret {
            Secret::Token(token) => request.bearer_auth(token),
            Secret::Password(password) => {
                request.basic_auth(credentials.username_or_empty(), Some(password))
            }
        };

        let start = std::time::Instant::now();
        let transport = |source| RestError::Transport {
            url: url.to_string(),
            source,
        };
        let response = request.send().await.map_err(transport)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport)?.to_vec();

        tracing::debug!(
            cluster = %self.target.name,
            %method,
            url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "request complete"
        );

        if status.as_u16() >= 400 {
            return Err(RemoteError::from_body(status.as_u16(), &body).into());
        }
        Ok((status, body))
    }
}

fn job_for(status: StatusCode, url: &str, body: &[u8]) -> Result<Option<JobHandle>, RestError> {
    if !matches!(status, StatusCode::CREATED | StatusCode::ACCEPTED) {
        return Ok(None);
    }
    match JobHandle::from_response(body) {
        Ok(job) => Ok(Some(job)),
        Err(JobLinkError::Decode(source)) => Err(RestError::Decode {
            url: url.to_string(),
            source,
        }),
        Err(JobLinkError::Missing) => Err(RestError::MissingJob {
            url: url.to_string(),
        }),
    }
}

#[cfg(test)]
#[path = "rest_tests.rs"]
mod tests;
