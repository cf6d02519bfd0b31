//! Mercado Livre product pages.
//!
//! Prices are not read from the visible text but from an accessibility label
//! that spells the amount out in words, e.g. "486 reais com 76 centavos".

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::browser::{BrowserSession, NAVIGATION_TIMEOUT};
use crate::error::Result;
use super::{ProductFields, SiteExtractor};

const INTERSTITIAL_LINK: &str = "a.poly-component__link--action-link";
const INTERSTITIAL_TEXT: &str = "Ir para produto";
const TITLE: &str = "h1.ui-pdp-title";
const CURRENT_PRICE: &str = "span[itemprop='offers']";
const PREVIOUS_PRICE: &str = "s.andes-money-amount.andes-money-amount--previous";
const GALLERY_IMAGE: &str = "img.ui-pdp-image.ui-pdp-gallery__figure__image";

static DIGITS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d+").expect("Failed to parse digits regex")
});

/// Turn a spelled-out price label into "R$ n,nn".
///
/// One embedded integer means whole reais ("120 reais" -> "R$ 120,00"); the
/// second integer, when present, is the centavos part. Labels with no digits
/// carry no price.
pub fn normalize_price_from_aria(label: &str) -> Option<String> {
    let mut numbers = DIGITS.find_iter(label);
    let first = numbers.next()?.as_str();
    match numbers.next() {
        Some(second) => Some(format!("R$ {},{}", first, second.as_str())),
        None => Some(format!("R$ {},00", first)),
    }
}

pub struct MercadoLivreExtractor;

#[async_trait]
impl SiteExtractor for MercadoLivreExtractor {
    async fn extract(&self, session: &BrowserSession) -> Result<ProductFields> {
        let mut fields = ProductFields::default();

        // Some listings land on an intermediate page with an "Ir para produto"
        // link instead of the product itself. Click through and wait again.
        for link in session.find_all(INTERSTITIAL_LINK).await {
            let text = link.inner_text().await.ok().flatten().unwrap_or_default();
            if text.contains(INTERSTITIAL_TEXT) {
                debug!("clicking through interstitial link");
                link.click().await?;
                session.wait_for_load().await?;
                break;
            }
        }

        // The title heading is the one element the page must render.
        let title = session.wait_for_element(TITLE, NAVIGATION_TIMEOUT).await?;
        fields.title = title
            .inner_text()
            .await?
            .map(|text| text.trim().to_string());

        if let Some(price) = session.find(CURRENT_PRICE).await {
            if let Some(aria) = price.attribute("aria-label").await? {
                fields.current_price = normalize_price_from_aria(&aria);
            }
        }

        if let Some(old_price) = session.find(PREVIOUS_PRICE).await {
            if let Some(aria) = old_price.attribute("aria-label").await? {
                fields.previous_price = normalize_price_from_aria(&aria);
            }
        }

        if let Some(image) = session.find(GALLERY_IMAGE).await {
            // data-zoom carries the high-resolution variant when present.
            fields.image_url = match image.attribute("data-zoom").await? {
                Some(zoom) => Some(zoom),
                None => image.attribute("src").await?,
            };
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_price_from_aria;

    #[test]
    fn label_with_reais_and_centavos() {
        assert_eq!(
            normalize_price_from_aria("486 reais com 76 centavos"),
            Some("R$ 486,76".to_string())
        );
    }

    #[test]
    fn label_with_whole_reais_only() {
        assert_eq!(
            normalize_price_from_aria("120 reais"),
            Some("R$ 120,00".to_string())
        );
    }

    #[test]
    fn label_without_digits_has_no_price() {
        assert_eq!(normalize_price_from_aria("preço indisponível"), None);
        assert_eq!(normalize_price_from_aria(""), None);
    }

    #[test]
    fn only_first_two_numbers_are_used() {
        assert_eq!(
            normalize_price_from_aria("1 real com 2 centavos de 3 parcelas"),
            Some("R$ 1,2".to_string())
        );
    }
}
