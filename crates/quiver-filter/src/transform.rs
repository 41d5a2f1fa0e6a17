//! XML response transformation.
//!
//! The transform filter runs the downstream chain, then rewrites eligible
//! XML response bodies through a pluggable [`XmlTransform`]. The stock
//! transform pretty-prints, which turns the compact single-line documents
//! the builders emit into something readable in browser dev tools. A
//! `noxform` query parameter skips the rewrite for one request.

use std::sync::Arc;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use salvo::Depot;
use salvo::http::ResBody;
use salvo::http::header::{CONTENT_LENGTH, CONTENT_TYPE};

use quiver_core::config::TransformConfig;
use quiver_xml::emit::escape_text;

use crate::error::FilterResult;

/// A rewrite applied to an XML response body.
pub trait XmlTransform: Send + Sync {
    /// Short name for logging.
    fn name(&self) -> &'static str;

    /// Transforms a complete XML document.
    ///
    /// ## Errors
    /// Returns an error when the document cannot be parsed; the caller
    /// keeps the original body in that case.
    fn transform(&self, xml: &str) -> FilterResult<String>;
}

/// Middleware that rewrites XML response bodies after the chain runs.
pub struct XmlTransformFilter {
    config: TransformConfig,
    transform: Arc<dyn XmlTransform>,
}

impl XmlTransformFilter {
    /// Creates the filter with the pretty-printing transform.
    #[must_use]
    pub fn new(config: TransformConfig) -> Self {
        Self::with_transform(config, PrettyPrint)
    }

    /// Creates the filter with a custom transform.
    #[must_use]
    pub fn with_transform(config: TransformConfig, transform: impl XmlTransform + 'static) -> Self {
        Self {
            config,
            transform: Arc::new(transform),
        }
    }
}

/// ## Summary
/// Transform middleware: runs the rest of the chain, then rewrites the
/// response body when the content type is configured as eligible, the
/// filter is enabled, and the request does not carry a `noxform` query
/// parameter. A body that fails to transform is passed through unchanged.
#[salvo::async_trait]
impl salvo::Handler for XmlTransformFilter {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        ctrl.call_next(req, depot, res).await;

        if !self.config.enabled || req.queries().contains_key("noxform") {
            return;
        }

        let eligible = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| content_type_eligible(&self.config.content_types, ct));
        if !eligible {
            return;
        }

        let body = res.take_body();
        let ResBody::Once(bytes) = body else {
            // Streaming and error bodies pass through untouched.
            res.body(body);
            return;
        };

        let Ok(xml) = std::str::from_utf8(&bytes) else {
            tracing::debug!("Response body is not UTF-8; skipping transform");
            res.body(ResBody::Once(bytes));
            return;
        };

        match self.transform.transform(xml) {
            Ok(transformed) => {
                res.headers_mut().remove(CONTENT_LENGTH);
                res.body(transformed);
            }
            Err(e) => {
                tracing::warn!(
                    transform = self.transform.name(),
                    error = %e,
                    "Transform failed; returning original body"
                );
                res.body(ResBody::Once(bytes));
            }
        }
    }
}

/// Returns whether a `Content-Type` header value names an eligible type,
/// ignoring parameters such as `charset`.
fn content_type_eligible(configured: &[String], header: &str) -> bool {
    let mime = header.split(';').next().unwrap_or_default().trim();
    configured.iter().any(|ct| ct.eq_ignore_ascii_case(mime))
}

/// Re-emits an XML document with two-space indentation. Elements whose
/// content is only text stay on one line.
pub struct PrettyPrint;

impl XmlTransform for PrettyPrint {
    fn name(&self) -> &'static str {
        "pretty-print"
    }

    fn transform(&self, xml: &str) -> FilterResult<String> {
        let mut reader = Reader::from_reader(xml.as_bytes());

        let mut buf = Vec::new();
        let mut out = String::with_capacity(xml.len());
        let mut depth = 0usize;
        // Set while the open element has seen no child elements, so its
        // end tag stays on the same line.
        let mut inline = false;
        // Text and entity references accumulate here so that content
        // split across events keeps its interior spacing; the buffer is
        // flushed trimmed at the next markup event, which drops
        // whitespace-only runs between elements.
        let mut text = String::new();

        loop {
            match reader.read_event_into(&mut buf)? {
                Event::Decl(_) => {
                    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
                }
                Event::Start(ref e) => {
                    flush_text(&mut out, &mut text);
                    newline_indent(&mut out, depth);
                    push_start_tag(&mut out, e, false)?;
                    depth += 1;
                    inline = true;
                }
                Event::Empty(ref e) => {
                    flush_text(&mut out, &mut text);
                    newline_indent(&mut out, depth);
                    push_start_tag(&mut out, e, true)?;
                    inline = false;
                }
                Event::Text(ref t) => {
                    text.push_str(&escape_text(&reader.decoder().decode(t.as_ref())?));
                }
                Event::GeneralRef(ref r) => {
                    text.push('&');
                    text.push_str(&reader.decoder().decode(r.as_ref())?);
                    text.push(';');
                }
                Event::CData(ref t) => {
                    flush_text(&mut out, &mut text);
                    out.push_str("<![CDATA[");
                    out.push_str(std::str::from_utf8(t.as_ref())?);
                    out.push_str("]]>");
                }
                Event::End(ref e) => {
                    flush_text(&mut out, &mut text);
                    depth = depth.saturating_sub(1);
                    if !inline {
                        newline_indent(&mut out, depth);
                    }
                    out.push_str("</");
                    out.push_str(std::str::from_utf8(e.name().as_ref())?);
                    out.push('>');
                    inline = false;
                }
                Event::Comment(ref c) => {
                    flush_text(&mut out, &mut text);
                    newline_indent(&mut out, depth);
                    out.push_str("<!--");
                    out.push_str(std::str::from_utf8(c)?);
                    out.push_str("-->");
                    inline = false;
                }
                Event::PI(ref p) => {
                    flush_text(&mut out, &mut text);
                    newline_indent(&mut out, depth);
                    out.push_str("<?");
                    out.push_str(std::str::from_utf8(p)?);
                    out.push_str("?>");
                }
                Event::DocType(ref d) => {
                    flush_text(&mut out, &mut text);
                    newline_indent(&mut out, depth);
                    out.push_str("<!DOCTYPE");
                    out.push_str(std::str::from_utf8(d)?);
                    out.push('>');
                }
                Event::Eof => break,
            }
            buf.clear();
        }

        Ok(out)
    }
}

/// Appends buffered element content, trimmed, and clears the buffer.
fn flush_text(out: &mut String, text: &mut String) {
    let trimmed = text.trim();
    if !trimmed.is_empty() {
        out.push_str(trimmed);
    }
    text.clear();
}

fn newline_indent(out: &mut String, depth: usize) {
    if out.is_empty() {
        return;
    }
    out.push('\n');
    for _ in 0..depth {
        out.push_str("  ");
    }
}

/// Rebuilds a start tag from its name and attributes. Attribute values
/// are re-emitted as read, still escaped.
fn push_start_tag(out: &mut String, e: &BytesStart<'_>, empty: bool) -> FilterResult<()> {
    out.push('<');
    out.push_str(std::str::from_utf8(e.name().as_ref())?);
    for attr in e.attributes() {
        let attr = attr?;
        out.push(' ');
        out.push_str(std::str::from_utf8(attr.key.as_ref())?);
        out.push_str("=\"");
        out.push_str(std::str::from_utf8(&attr.value)?);
        out.push('"');
    }
    out.push_str(if empty { "/>" } else { ">" });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_prints_nested_elements() {
        let xml = "<D:multistatus xmlns:D=\"DAV:\"><D:response><D:href>/a</D:href></D:response></D:multistatus>";
        let pretty = PrettyPrint.transform(xml).unwrap();
        assert_eq!(
            pretty,
            "<D:multistatus xmlns:D=\"DAV:\">\n  <D:response>\n    <D:href>/a</D:href>\n  </D:response>\n</D:multistatus>"
        );
    }

    #[test]
    fn keeps_declaration_and_empty_elements() {
        let xml = "<?xml version=\"1.0\" encoding=\"UTF-8\"?><a><b/></a>";
        let pretty = PrettyPrint.transform(xml).unwrap();
        assert_eq!(
            pretty,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<a>\n  <b/>\n</a>"
        );
    }

    #[test]
    fn text_stays_escaped() {
        let xml = "<a>x &amp; &lt;y&gt;</a>";
        let pretty = PrettyPrint.transform(xml).unwrap();
        assert_eq!(pretty, "<a>x &amp; &lt;y&gt;</a>");
    }

    #[test]
    fn entity_references_keep_spacing() {
        let xml = "<a>Tom &amp; Jerry &#38; friends</a>";
        let pretty = PrettyPrint.transform(xml).unwrap();
        assert_eq!(pretty, "<a>Tom &amp; Jerry &#38; friends</a>");
    }

    #[test]
    fn malformed_is_error() {
        assert!(PrettyPrint.transform("<a><b></a>").is_err());
    }

    #[test]
    fn content_type_matching() {
        let configured = vec!["text/xml".to_string(), "application/xml".to_string()];
        assert!(content_type_eligible(&configured, "text/xml"));
        assert!(content_type_eligible(
            &configured,
            "Application/XML; charset=utf-8"
        ));
        assert!(!content_type_eligible(&configured, "application/json"));
        assert!(!content_type_eligible(&configured, ""));
    }

    #[test]
    fn idempotent_on_pretty_input() {
        let xml = "<a>\n  <b>text</b>\n</a>";
        let pretty = PrettyPrint.transform(xml).unwrap();
        assert_eq!(pretty, xml);
    }

    mod middleware {
        use salvo::test::{ResponseExt, TestClient};
        use salvo::writing::Text;
        use salvo::{Router, Service};

        use super::super::*;

        const COMPACT: &str = "<a><b>1</b></a>";
        const BROKEN: &str = "<a><b></a>";

        #[salvo::handler]
        async fn compact_doc(res: &mut salvo::Response) {
            res.render(Text::Xml(COMPACT));
        }

        #[salvo::handler]
        async fn broken_doc(res: &mut salvo::Response) {
            res.render(Text::Xml(BROKEN));
        }

        fn xml_service(enabled: bool) -> Service {
            let config = TransformConfig {
                enabled,
                content_types: vec!["text/xml".to_string(), "application/xml".to_string()],
            };
            let router = Router::new()
                .hoop(XmlTransformFilter::new(config))
                .push(Router::with_path("doc").get(compact_doc))
                .push(Router::with_path("broken").get(broken_doc));
            Service::new(router)
        }

        #[test_log::test(tokio::test)]
        async fn rewrites_eligible_response() {
            let service = xml_service(true);
            let body = TestClient::get("http://127.0.0.1:5800/doc")
                .send(&service)
                .await
                .take_string()
                .await
                .unwrap();
            assert_eq!(body, "<a>\n  <b>1</b>\n</a>");
        }

        #[test_log::test(tokio::test)]
        async fn noxform_skips_rewrite() {
            let service = xml_service(true);
            let body = TestClient::get("http://127.0.0.1:5800/doc?noxform")
                .send(&service)
                .await
                .take_string()
                .await
                .unwrap();
            assert_eq!(body, COMPACT);
        }

        #[test_log::test(tokio::test)]
        async fn disabled_filter_passes_through() {
            let service = xml_service(false);
            let body = TestClient::get("http://127.0.0.1:5800/doc")
                .send(&service)
                .await
                .take_string()
                .await
                .unwrap();
            assert_eq!(body, COMPACT);
        }

        #[test_log::test(tokio::test)]
        async fn failed_transform_keeps_original_body() {
            let service = xml_service(true);
            let body = TestClient::get("http://127.0.0.1:5800/broken")
                .send(&service)
                .await
                .take_string()
                .await
                .unwrap();
            assert_eq!(body, BROKEN);
        }
    }
}
