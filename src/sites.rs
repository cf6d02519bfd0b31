/// Product-page families the service knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Site {
    MercadoLivre,
    Amazon,
}

/// Classify a URL by substring containment. The Mercado Livre check runs
/// first, so a URL matching both fragments resolves to Mercado Livre.
pub fn classify(url: &str) -> Option<Site> {
    if url.contains("mercadolivre") {
        Some(Site::MercadoLivre)
    } else if url.contains("amazon.") || url.contains("amzn.") {
        Some(Site::Amazon)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_mercado_livre() {
        assert_eq!(
            classify("https://www.mercadolivre.com.br/produto-x"),
            Some(Site::MercadoLivre)
        );
    }

    #[test]
    fn classifies_amazon_domains() {
        assert_eq!(classify("https://www.amazon.com.br/dp/B01"), Some(Site::Amazon));
        assert_eq!(classify("https://amzn.to/abc"), Some(Site::Amazon));
    }

    #[test]
    fn mercado_livre_wins_when_both_fragments_present() {
        assert_eq!(
            classify("https://www.amazon.com/redirect?to=mercadolivre"),
            Some(Site::MercadoLivre)
        );
    }

    #[test]
    fn classification_is_case_sensitive() {
        assert_eq!(classify("https://www.Amazon.com.br/dp/B01"), None);
    }

    #[test]
    fn unknown_domains_are_unsupported() {
        assert_eq!(classify("https://www.magazineluiza.com.br/p/123"), None);
        assert_eq!(classify(""), None);
    }
}
