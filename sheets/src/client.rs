use reqwest::{RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Deserialize};
use thiserror::Error;
use tokio::sync::Mutex;

use crate::{
    domain::{A1Range, UpdateValuesResponse, ValueRange},
    SheetsURL,
};

use super::{ServiceAccountKey, TokenProvider};

/// Reads and writes cell values of one spreadsheet on behalf of a service account.
pub struct SheetsClient {
    http: reqwest::Client,
    base_url: SheetsURL,
    spreadsheet_id: String,
    tokens: Mutex<TokenProvider>,
}

impl SheetsClient {
    pub fn new(key: ServiceAccountKey, spreadsheet_id: impl Into<String>) -> Self {
        Self::with_base_url(key, spreadsheet_id, SheetsURL::from_env())
    }

    pub fn with_base_url(
        key: ServiceAccountKey,
        spreadsheet_id: impl Into<String>,
        base_url: SheetsURL,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url,
            spreadsheet_id: spreadsheet_id.into(),
            tokens: Mutex::new(TokenProvider::new(key)),
        }
    }

    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Obtain a token up front so that bad credentials are reported before any sheet access.
    pub async fn authenticate(&self) -> Result<(), SheetsError> {
        self.bearer().await.map(|_| ())
    }

    async fn bearer(&self) -> Result<String, SheetsError> {
        let mut tokens = self.tokens.lock().await;
        Ok(tokens.valid_token().await?.value)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, SheetsError> {
        let token = self.bearer().await?;

        let resp = request
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| SheetsError::ResponseError(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SheetsError::Unauthorized);
        }

        if !status.is_success() {
            let message = resp
                .json::<ApiErrorResponse>()
                .await
                .ok()
                .and_then(|body| body.error.message)
                .unwrap_or_else(|| "API request failed".to_string());
            return Err(SheetsError::Api {
                status: status.as_u16(),
                message,
            });
        }

        resp.json::<T>().await.map_err(|e| {
            SheetsError::ParsingError(format!("Failed to parse response as JSON: {}", e))
        })
    }

    #[tracing::instrument(name = "SheetsClient::get_values", skip(self), fields(range = %range))]
    pub async fn get_values(&self, range: &A1Range) -> Result<ValueRange, SheetsError> {
        let url = self.base_url.values(&self.spreadsheet_id, range);
        self.send(self.http.get(url.as_ref())).await
    }

    /// Overwrite `range` with `rows`. Values are stored as typed, without formula parsing.
    #[tracing::instrument(name = "SheetsClient::update_values", skip(self, rows), fields(range = %range))]
    pub async fn update_values(
        &self,
        range: &A1Range,
        rows: Vec<Vec<String>>,
    ) -> Result<UpdateValuesResponse, SheetsError> {
        let url = self
            .base_url
            .values(&self.spreadsheet_id, range)
            .with_query("valueInputOption", "RAW");

        let body = ValueRange {
            range: range.to_string(),
            ..ValueRange::rows(rows)
        };

        self.send(self.http.put(url.as_ref()).json(&body)).await
    }
}

#[derive(Error, Debug)]
pub enum SheetsError {
    #[error("Malformed credential: {0}")]
    MalformedCredential(String),
    #[error("Signing error: {0}")]
    Signing(String),
    #[error("{0}")]
    TokenExchange(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("{message} (HTTP {status})")]
    Api { status: u16, message: String },
    #[error("ParsingError: {0}")]
    ParsingError(String),
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: Option<String>,
}
