// src/sitemap/xml.rs
// =============================================================================
// Writes the crawl result as a sitemaps.org XML document:
//
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url>
//       <loc>https://example.com/about</loc>
//     </url>
//   </urlset>
//
// quick-xml's Writer takes care of indentation and of escaping characters
// like '&' inside URLs.
//
// Unlike page fetches, failures here are returned to the caller: losing a
// dead link is fine, losing the whole sitemap is not.
// =============================================================================

use crate::error::SitemapError;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::fs;
use std::path::Path;

/// Namespace declared on the <urlset> root element.
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// File the crawl writes unless told otherwise.
pub const DEFAULT_OUTPUT_FILE: &str = "sitemap.xml";

// Builds the XML document, one <url><loc> entry per URL, in the order the
// iterator yields them
pub fn build_sitemap_xml<I, S>(urls: I) -> Result<String, SitemapError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
        .map_err(serialization_error)?;

    let mut urlset = BytesStart::new("urlset");
    urlset.push_attribute(("xmlns", SITEMAP_NAMESPACE));
    writer
        .write_event(Event::Start(urlset))
        .map_err(serialization_error)?;

    for url in urls {
        write_url(&mut writer, url.as_ref())?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(serialization_error)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(serialization_error)
}

fn write_url(writer: &mut Writer<Vec<u8>>, url: &str) -> Result<(), SitemapError> {
    let events = [
        Event::Start(BytesStart::new("url")),
        Event::Start(BytesStart::new("loc")),
        Event::Text(BytesText::new(url)),
        Event::End(BytesEnd::new("loc")),
        Event::End(BytesEnd::new("url")),
    ];
    for event in events {
        writer.write_event(event).map_err(serialization_error)?;
    }
    Ok(())
}

fn serialization_error(error: impl std::fmt::Display) -> SitemapError {
    SitemapError::Serialization(error.to_string())
}

// Builds the document and writes it to `path`, replacing any existing file
pub fn write_sitemap<I, S>(urls: I, path: &Path) -> Result<(), SitemapError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let document = build_sitemap_xml(urls)?;
    fs::write(path, document).map_err(|source| SitemapError::Write {
        path: path.to_path_buf(),
        source,
    })
}
