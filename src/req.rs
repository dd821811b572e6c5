use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;

use crate::{prelude::*, Error};

/// Transport-level request timeout (matches the original deployment).
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize, Debug)]
struct ErrorData {
    data: String,
    code: u16,
    msg: String,
}

#[derive(Debug)]
pub(crate) struct HttpClient {
    client: Client,
    base_url: String,
}

async fn parse_response(response: Response) -> Result<String> {
    let status_code = response.status().as_u16();
    let text = response
        .text()
        .await
        .map_err(|e| Error::GenericRequest(e.to_string()))?;

    if status_code < 400 {
        return Ok(text);
    }
    let error_data = serde_json::from_str::<ErrorData>(&text);
    if (400..500).contains(&status_code) {
        let client_error = match error_data {
            Ok(error_data) => Error::client_error(
                status_code,
                Some(error_data.code),
                error_data.msg,
                Some(error_data.data),
            ),
            Err(err) => Error::client_error(status_code, None, text, Some(err.to_string())),
        };
        return Err(client_error);
    }

    Err(Error::server_error(status_code, text))
}

impl HttpClient {
    pub(crate) fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::GenericRequest(e.to_string()))?;
        Ok(HttpClient { client, base_url })
    }

    /// Send a POST request with a JSON body. Failures are classified into
    /// client (4xx) and server (5xx) errors; no retry, the whole call fails.
    pub(crate) async fn post(&self, url_path: &'static str, data: String) -> Result<String> {
        let full_url = format!("{}{url_path}", self.base_url);

        let request = self
            .client
            .post(&full_url)
            .header("Content-Type", "application/json")
            .body(data)
            .build()
            .map_err(|e| Error::GenericRequest(e.to_string()))?;

        let result = self
            .client
            .execute(request)
            .await
            .map_err(|e| Error::GenericRequest(e.to_string()))?;

        parse_response(result).await
    }
}
