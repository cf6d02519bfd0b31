//! Per-request scrape orchestration: classify, navigate, extract, fetch image.

use tracing::info;

use crate::api::models::ScrapeResponse;
use crate::browser::BrowserSession;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::extract::{extractor_for, ProductFields};
use crate::image::download_image;
use crate::sites::{classify, Site};

/// Run the full scrape for one URL. The browser session is scoped to this
/// call and closed on every exit path before the result is returned.
pub async fn scrape_product(config: &Config, url: &str) -> Result<ScrapeResponse> {
    let site = classify(url).ok_or(AppError::UnsupportedPlatform)?;
    info!(?site, url, "scraping product page");

    let session = BrowserSession::launch(config.headless).await?;
    let extraction = navigate_and_extract(&session, site, url).await;
    session.close().await;
    let fields = extraction?;

    let local_image = match &fields.image_url {
        Some(image_url) => Some(download_image(image_url, &config.image_dir).await?),
        None => None,
    };

    Ok(ScrapeResponse {
        titulo: fields.title,
        preco_atual: fields.current_price,
        preco_anterior: fields.previous_price,
        imagem_url: fields.image_url,
        imagem_local: local_image.map(|path| path.display().to_string()),
        url: url.to_string(),
    })
}

async fn navigate_and_extract(
    session: &BrowserSession,
    site: Site,
    url: &str,
) -> Result<ProductFields> {
    session.goto(url).await?;
    extractor_for(site).extract(session).await
}
