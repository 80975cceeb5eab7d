use std::time::Duration;

use feed_core::Post;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder, StatusCode};

use crate::error::FeedClientError;
use crate::models::{
    convert_batch, ErrorResponse, ForgotPasswordRequest, LoginRequest, LoginResponse,
    RegisterRequest, WirePost,
};

/// An authenticated session: the bearer token handed out by `/login`.
/// Endpoints that need authentication take this explicitly instead of
/// reading a token from ambient storage.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    token: String,
}

impl Session {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

/// Attachment for a new post: file name, raw bytes, MIME type.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub mime_type: String,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn with_auth(request: RequestBuilder, session: &Session) -> RequestBuilder {
        request.bearer_auth(session.token())
    }

    /// Full post collection, already validated into domain posts. The
    /// batch comes back unsorted; ordering is the feed state's job.
    pub async fn fetch_posts(&self) -> Result<Vec<Post>, FeedClientError> {
        let url = self.url("/posts");
        tracing::debug!(%url, "fetching post feed");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let wire = response.json::<Vec<WirePost>>().await?;
                tracing::debug!(count = wire.len(), "post feed fetched");
                Ok(convert_batch(wire))
            }
            _ => Err(Self::api_error(status, response).await),
        }
    }

    /// Posts written by the session's user.
    pub async fn my_posts(&self, session: &Session) -> Result<Vec<Post>, FeedClientError> {
        let url = self.url("/posts/me");
        let response = Self::with_auth(self.client.get(&url), session)
            .send()
            .await?;
        let status = response.status();

        match status {
            StatusCode::OK => {
                let wire = response.json::<Vec<WirePost>>().await?;
                Ok(convert_batch(wire))
            }
            _ => Err(Self::api_error(status, response).await),
        }
    }

    pub async fn login(&self, req: LoginRequest) -> Result<Session, FeedClientError> {
        let url = self.url("/login");
        let response = self.client.post(&url).json(&req).send().await?;
        let status = response.status();

        match status {
            StatusCode::OK | StatusCode::CREATED => {
                let auth = response.json::<LoginResponse>().await?;
                Ok(Session::new(auth.token))
            }
            _ => Err(Self::api_error(status, response).await),
        }
    }

    pub async fn register(&self, req: RegisterRequest) -> Result<(), FeedClientError> {
        let url = self.url("/register");
        let response = self.client.post(&url).json(&req).send().await?;
        self.expect_success(response).await
    }

    pub async fn forgot_password(
        &self,
        req: ForgotPasswordRequest,
    ) -> Result<(), FeedClientError> {
        let url = self.url("/forgotpassword");
        let response = self.client.post(&url).json(&req).send().await?;
        self.expect_success(response).await
    }

    /// Publishes a new post. The backend takes multipart form data so the
    /// image rides along as a file part.
    pub async fn create_post(
        &self,
        session: &Session,
        title: String,
        body: String,
        image: Option<ImageUpload>,
    ) -> Result<(), FeedClientError> {
        let url = self.url("/posts");

        let mut form = Form::new().text("titulo", title).text("conteudo", body);
        if let Some(upload) = image {
            let part = Part::bytes(upload.bytes)
                .file_name(upload.file_name)
                .mime_str(&upload.mime_type)?;
            form = form.part("imagem", part);
        }

        let response = Self::with_auth(self.client.post(&url), session)
            .multipart(form)
            .send()
            .await?;
        self.expect_success(response).await
    }

    async fn expect_success(&self, response: reqwest::Response) -> Result<(), FeedClientError> {
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::api_error(status, response).await)
        }
    }

    async fn api_error(status: StatusCode, response: reqwest::Response) -> FeedClientError {
        let message = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorResponse>(&text)
                .map(|e| e.message)
                .ok()
                .filter(|m| !m.is_empty())
                .unwrap_or(text),
            Err(e) => return FeedClientError::Http(e),
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                FeedClientError::Unauthorized(message)
            }
            StatusCode::NOT_FOUND => FeedClientError::NotFound,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT => {
                FeedClientError::InvalidRequest(message)
            }
            _ => FeedClientError::Api {
                status: status.as_u16(),
                message,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_join_normalizes_slashes() {
        let client = ApiClient::new("http://localhost:3000/api/");
        assert_eq!(client.url("/posts"), "http://localhost:3000/api/posts");
        assert_eq!(client.url("posts/me"), "http://localhost:3000/api/posts/me");
    }

    #[test]
    fn session_holds_the_token() {
        let session = Session::new("abc123");
        assert_eq!(session.token(), "abc123");
    }
}
