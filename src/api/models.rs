use serde::{Deserialize, Serialize};

#[derive(Deserialize)]
pub struct ScrapeRequest {
    /// Defaulted so an absent field reaches the handler and gets the
    /// canonical missing-URL error instead of a deserialization rejection.
    #[serde(default)]
    pub url: String,
}

/// Flat product record; field names are the service's wire contract.
#[derive(Debug, Serialize)]
pub struct ScrapeResponse {
    pub titulo: Option<String>,
    pub preco_atual: Option<String>,
    pub preco_anterior: Option<String>,
    pub imagem_url: Option<String>,
    pub imagem_local: Option<String>,
    pub url: String,
}
