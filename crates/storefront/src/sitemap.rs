//! XML sitemap generation.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use url::Url;

/// How often a page is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeFreq {
    Daily,
    Weekly,
    Monthly,
}

impl ChangeFreq {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone)]
struct Entry {
    loc: String,
    lastmod: Option<DateTime<Utc>>,
    changefreq: ChangeFreq,
    priority: f32,
}

/// Accumulates `<url>` entries relative to the storefront base URL.
#[derive(Debug)]
pub struct SitemapBuilder {
    base_url: Url,
    entries: Vec<Entry>,
}

impl SitemapBuilder {
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            entries: Vec::new(),
        }
    }

    /// Add a page by path. Paths that cannot be joined to the base are skipped.
    pub fn add(
        &mut self,
        path: &str,
        lastmod: Option<DateTime<Utc>>,
        changefreq: ChangeFreq,
        priority: f32,
    ) -> &mut Self {
        match self.base_url.join(path.trim_start_matches('/')) {
            Ok(loc) => self.entries.push(Entry {
                loc: loc.into(),
                lastmod,
                changefreq,
                priority: priority.clamp(0.0, 1.0),
            }),
            Err(e) => tracing::warn!(path, error = %e, "Skipping sitemap entry"),
        }
        self
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Render the `<urlset>` document.
    #[must_use]
    pub fn build(&self) -> String {
        let mut xml = String::from(
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
             <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
        );
        for entry in &self.entries {
            xml.push_str("  <url>\n");
            let _ = writeln!(xml, "    <loc>{}</loc>", escape_xml(&entry.loc));
            if let Some(lastmod) = entry.lastmod {
                let _ = writeln!(xml, "    <lastmod>{}</lastmod>", lastmod.format("%Y-%m-%d"));
            }
            let _ = writeln!(
                xml,
                "    <changefreq>{}</changefreq>",
                entry.changefreq.as_str()
            );
            let _ = writeln!(xml, "    <priority>{:.1}</priority>", entry.priority);
            xml.push_str("  </url>\n");
        }
        xml.push_str("</urlset>\n");
        xml
    }
}

/// Escape the five XML special characters.
#[must_use]
pub fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn builder() -> SitemapBuilder {
        SitemapBuilder::new(Url::parse("https://shop.example.com/").unwrap())
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("a&b<c>'\""), "a&amp;b&lt;c&gt;&apos;&quot;");
    }

    #[test]
    fn test_build_entries() {
        let mut sitemap = builder();
        let lastmod = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        sitemap
            .add("/", None, ChangeFreq::Daily, 1.0)
            .add("/products/7", Some(lastmod), ChangeFreq::Weekly, 0.8);
        let xml = sitemap.build();

        assert_eq!(sitemap.len(), 2);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
        assert!(xml.contains("<loc>https://shop.example.com/</loc>"));
        assert!(xml.contains("<loc>https://shop.example.com/products/7</loc>"));
        assert!(xml.contains("<lastmod>2026-03-14</lastmod>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
        assert!(xml.contains("<priority>0.8</priority>"));
        assert!(xml.contains("<priority>1.0</priority>"));
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[test]
    fn test_query_ampersands_are_escaped() {
        let mut sitemap = builder();
        sitemap.add("/products?category=2&sort=name", None, ChangeFreq::Daily, 0.5);
        assert!(sitemap.build().contains("category=2&amp;sort=name"));
    }

    #[test]
    fn test_priority_is_clamped() {
        let mut sitemap = builder();
        sitemap.add("/", None, ChangeFreq::Monthly, 3.0);
        assert!(sitemap.build().contains("<priority>1.0</priority>"));
    }
}
