//! Amazon product pages.

use async_trait::async_trait;

use crate::browser::{BrowserSession, NAVIGATION_TIMEOUT};
use crate::error::Result;
use super::{ProductFields, SiteExtractor};

const TITLE_SECTION: &str = "#titleSection";
const BUY_BOX: &str = "#apex_desktop";
const TITLE: &str = "#titleSection #productTitle";
const PRICE_WHOLE: &str = "#apex_desktop span.priceToPay .a-price-whole";
const PRICE_FRACTION: &str = "#apex_desktop span.priceToPay .a-price-fraction";
const PREVIOUS_PRICE: &str = "span.a-size-small.aok-offscreen";
const PREVIOUS_PRICE_MARKER: &str = "De:";
const LANDING_IMAGE: &str = "#landingImage";

/// Join the whole and fractional parts of the buy-box price. The whole part
/// renders with an embedded newline that must go; no separator is inserted
/// between the parts, matching the service's established output.
pub fn join_price_parts(whole: &str, fraction: &str) -> String {
    format!("{}{}", whole.replace('\n', ""), fraction)
}

/// Strip the "De:" marker from an offscreen previous-price label.
pub fn strip_previous_price_marker(text: &str) -> Option<String> {
    if text.contains(PREVIOUS_PRICE_MARKER) {
        Some(text.replace(PREVIOUS_PRICE_MARKER, "").trim().to_string())
    } else {
        None
    }
}

pub struct AmazonExtractor;

#[async_trait]
impl SiteExtractor for AmazonExtractor {
    async fn extract(&self, session: &BrowserSession) -> Result<ProductFields> {
        let mut fields = ProductFields::default();

        // Both structural sections must render before anything is readable.
        session.wait_for_element(TITLE_SECTION, NAVIGATION_TIMEOUT).await?;
        session.wait_for_element(BUY_BOX, NAVIGATION_TIMEOUT).await?;

        if let Some(title) = session.find(TITLE).await {
            fields.title = title
                .inner_text()
                .await?
                .map(|text| text.trim().to_string());
        }

        if let Some(whole) = session.find(PRICE_WHOLE).await {
            if let Some(fraction) = session.find(PRICE_FRACTION).await {
                let whole_text = whole.inner_text().await?.unwrap_or_default();
                let fraction_text = fraction.inner_text().await?.unwrap_or_default();
                fields.current_price = Some(join_price_parts(&whole_text, &fraction_text));
            }
        }

        for candidate in session.find_all(PREVIOUS_PRICE).await {
            let text = candidate.inner_text().await.ok().flatten().unwrap_or_default();
            if let Some(previous) = strip_previous_price_marker(&text) {
                fields.previous_price = Some(previous);
                break;
            }
        }

        if let Some(image) = session.find(LANDING_IMAGE).await {
            // data-old-hires carries the high-resolution variant when present.
            fields.image_url = match image.attribute("data-old-hires").await? {
                Some(hires) => Some(hires),
                None => image.attribute("src").await?,
            };
        }

        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::{join_price_parts, strip_previous_price_marker};

    #[test]
    fn price_parts_join_without_separator() {
        assert_eq!(join_price_parts("486", "76"), "48676");
    }

    #[test]
    fn newlines_are_stripped_from_whole_part() {
        assert_eq!(join_price_parts("1.234\n", "56"), "1.23456");
    }

    #[test]
    fn previous_price_marker_is_stripped() {
        assert_eq!(
            strip_previous_price_marker("De: R$ 99,90"),
            Some("R$ 99,90".to_string())
        );
        assert_eq!(
            strip_previous_price_marker("  De: R$ 1.299,00  "),
            Some("R$ 1.299,00".to_string())
        );
    }

    #[test]
    fn text_without_marker_is_not_a_previous_price() {
        assert_eq!(strip_previous_price_marker("R$ 99,90"), None);
    }
}
