use chrono::{DateTime, Utc};
use feed_core::Post;
use serde::{Deserialize, Serialize};

use crate::error::FeedClientError;

// ==================== Модели аутентификации ====================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub nome: String,
    pub email: String,
    pub senha: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
    #[serde(rename = "novaSenha")]
    pub nova_senha: String,
}

// ==================== Модели постов ====================

/// A post record as the backend serializes it. Field names follow the
/// backend's wire contract; `usuario_id` and `data_publicacao` default so
/// a missing field surfaces as a record-level error instead of failing
/// the whole batch.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePost {
    pub id: i64,
    pub titulo: String,
    pub conteudo: String,
    #[serde(default)]
    pub imagem: Option<String>,
    #[serde(default)]
    pub usuario_id: i64,
    #[serde(default)]
    pub data_publicacao: Option<String>,
}

impl WirePost {
    /// Validates the record into a domain post. Sorting on an absent or
    /// unparseable publication date is meaningless, so either is a
    /// contract violation here.
    pub fn into_post(self) -> Result<Post, FeedClientError> {
        let raw = self
            .data_publicacao
            .ok_or_else(|| FeedClientError::InvalidRecord {
                id: self.id,
                reason: "missing data_publicacao".to_string(),
            })?;

        let published_at = parse_published_at(&raw).map_err(|reason| {
            FeedClientError::InvalidRecord {
                id: self.id,
                reason,
            }
        })?;

        Ok(Post {
            id: self.id,
            title: self.titulo,
            body: self.conteudo,
            image: self.imagem,
            author_id: self.usuario_id,
            published_at,
        })
    }
}

fn parse_published_at(raw: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| format!("unparseable data_publicacao {:?}: {}", raw, e))
}

/// Converts a fetched batch, dropping records that violate the data
/// contract. A bad record costs one warning, not the whole feed.
pub fn convert_batch(wire: Vec<WirePost>) -> Vec<Post> {
    let mut posts = Vec::with_capacity(wire.len());
    for record in wire {
        match record.into_post() {
            Ok(post) => posts.push(post),
            Err(e) => tracing::warn!(error = %e, "skipping malformed post record"),
        }
    }
    posts
}

// ==================== Общие ошибки ====================

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    #[serde(default)]
    pub message: String,
}
