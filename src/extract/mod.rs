//! Site-specific field extraction.
//!
//! Both sites expose the same four fields; each adapter knows the selectors
//! and quirks of its page family. Every optional locator that matches nothing
//! yields `None` for its field — only the required structural waits are fatal.

pub mod amazon;
pub mod mercado_livre;

use async_trait::async_trait;

use crate::browser::BrowserSession;
use crate::error::Result;
use crate::sites::Site;

/// Raw fields read off a rendered product page.
#[derive(Debug, Default)]
pub struct ProductFields {
    pub title: Option<String>,
    pub current_price: Option<String>,
    pub previous_price: Option<String>,
    pub image_url: Option<String>,
}

#[async_trait]
pub trait SiteExtractor: Send + Sync {
    async fn extract(&self, session: &BrowserSession) -> Result<ProductFields>;
}

/// Pick the adapter for a classified site.
pub fn extractor_for(site: Site) -> Box<dyn SiteExtractor> {
    match site {
        Site::MercadoLivre => Box::new(mercado_livre::MercadoLivreExtractor),
        Site::Amazon => Box::new(amazon::AmazonExtractor),
    }
}
