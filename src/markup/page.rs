//! The page the controller drives.
//!
//! Elements are addressed by identifier. [`HtmlPage`] keeps them in memory
//! and can serialize the whole page as a standalone HTML document.

use super::escape::escape_html;
use crate::consts::cli_consts::elements;
use std::collections::BTreeMap;

/// Element access by identifier.
pub trait Page {
    /// Replaces the element's content with plain text.
    fn set_text(&mut self, id: &str, text: &str);

    /// Replaces the element's content with markup that is already escaped.
    fn set_html(&mut self, id: &str, html: &str);

    /// Current value of a form control, empty when unset.
    fn value(&self, id: &str) -> String;

    /// Sets the value of a form control.
    fn set_value(&mut self, id: &str, value: &str);
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Element {
    html: String,
    value: String,
}

/// In-memory page.
#[derive(Debug, Clone, Default)]
pub struct HtmlPage {
    elements: BTreeMap<String, Element>,
}

impl HtmlPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Markup content of an element, empty when it was never written.
    pub fn html(&self, id: &str) -> &str {
        self.elements
            .get(id)
            .map(|element| element.html.as_str())
            .unwrap_or("")
    }

    fn element_mut(&mut self, id: &str) -> &mut Element {
        self.elements.entry(id.to_string()).or_default()
    }

    /// Serializes the page as a full HTML document.
    pub fn document(&self, title: &str) -> String {
        let counter = |label: &str, id: &str| {
            format!(
                r#"<div class="stat"><span class="stat-value" id="{}">{}</span><span class="stat-label">{}</span></div>"#,
                id,
                self.html(id),
                label
            )
        };
        let select = |label: &str, id: &str| {
            format!(
                r#"<label class="filter">{}<select id="{}">{}</select></label>"#,
                label,
                id,
                self.html(id)
            )
        };

        let mut doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        doc.push_str("<meta charset=\"utf-8\">\n");
        doc.push_str(&format!("<title>{}</title>\n", escape_html(title)));
        doc.push_str(&format!("<style>{}</style>\n", STYLESHEET));
        doc.push_str("</head>\n<body>\n<aside class=\"sidebar\">\n");
        doc.push_str(&format!("<h1>{}</h1>\n", escape_html(title)));
        doc.push_str(&counter("Total", elements::TOTAL_COUNT));
        doc.push_str(&counter("Open", elements::OPEN_COUNT));
        doc.push_str(&counter("Closed", elements::CLOSED_COUNT));
        doc.push_str(&counter("Merged", elements::MERGED_COUNT));
        doc.push('\n');
        doc.push_str(&select("Repository", elements::REPO_FILTER));
        doc.push_str(&select("Status", elements::STATUS_FILTER));
        doc.push_str(&select("Author", elements::AUTHOR_FILTER));
        doc.push_str(&format!(
            r#"<label class="filter">Search<input type="search" id="{}" value="{}" placeholder="Search pull requests..."></label>"#,
            elements::SEARCH_INPUT,
            escape_html(&self.value(elements::SEARCH_INPUT))
        ));
        doc.push_str("\n</aside>\n");
        doc.push_str(&format!(
            "<main id=\"{}\">{}</main>\n",
            elements::CONTAINER,
            self.html(elements::CONTAINER)
        ));
        doc.push_str("</body>\n</html>\n");
        doc
    }
}

impl Page for HtmlPage {
    fn set_text(&mut self, id: &str, text: &str) {
        self.element_mut(id).html = escape_html(text);
    }

    fn set_html(&mut self, id: &str, html: &str) {
        self.element_mut(id).html = html.to_string();
    }

    fn value(&self, id: &str) -> String {
        self.elements
            .get(id)
            .map(|element| element.value.clone())
            .unwrap_or_default()
    }

    fn set_value(&mut self, id: &str, value: &str) {
        self.element_mut(id).value = value.to_string();
    }
}

const STYLESHEET: &str = "body{font-family:system-ui,sans-serif;margin:0;display:flex;background:#101418;color:#e6e6e6}\
.sidebar{width:260px;padding:16px;border-right:1px solid #2a2f36}\
.stat{display:flex;justify-content:space-between;padding:4px 0}\
.filter{display:block;margin-top:12px}\
.filter select,.filter input{display:block;width:100%;margin-top:4px}\
main{flex:1;padding:16px}\
.pr-grid{display:grid;grid-template-columns:repeat(auto-fill,minmax(320px,1fr));gap:12px}\
.pr-card{border:1px solid #2a2f36;border-radius:8px;padding:12px}\
.pr-header{display:flex;justify-content:space-between;align-items:flex-start}\
.pr-title a{color:#7cc4ff;text-decoration:none}\
.pr-status{border-radius:12px;padding:2px 8px;font-size:12px}\
.status-open{background:#1f6f43}.status-closed{background:#8b2c2c}.status-merged{background:#5b3d99}.status-unknown{background:#444}\
.meta-item{display:flex;gap:8px;margin-top:8px}.meta-icon{width:16px;height:16px}\
.meta-label{font-size:11px;color:#9aa4ad}\
.empty-state,.loading{text-align:center;padding:48px}.empty-icon{width:48px;height:48px}";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_is_escaped_html_is_not() {
        let mut page = HtmlPage::new();
        page.set_text("a", "<b>");
        page.set_html("b", "<b>bold</b>");
        assert_eq!(page.html("a"), "&lt;b&gt;");
        assert_eq!(page.html("b"), "<b>bold</b>");
        assert_eq!(page.html("missing"), "");
    }

    #[test]
    fn values_default_to_empty() {
        let mut page = HtmlPage::new();
        assert_eq!(page.value(elements::SEARCH_INPUT), "");
        page.set_value(elements::SEARCH_INPUT, "fix");
        assert_eq!(page.value(elements::SEARCH_INPUT), "fix");
    }

    #[test]
    fn document_contains_every_element() {
        let mut page = HtmlPage::new();
        page.set_text(elements::TOTAL_COUNT, "3");
        page.set_value(elements::SEARCH_INPUT, "\"quoted\"");
        let doc = page.document("Pull Requests");

        for id in [
            elements::TOTAL_COUNT,
            elements::OPEN_COUNT,
            elements::CLOSED_COUNT,
            elements::MERGED_COUNT,
            elements::REPO_FILTER,
            elements::STATUS_FILTER,
            elements::AUTHOR_FILTER,
            elements::SEARCH_INPUT,
            elements::CONTAINER,
        ] {
            assert!(doc.contains(&format!("id=\"{}\"", id)), "missing {}", id);
        }
        assert!(doc.contains(r#"id="total-prs">3<"#));
        assert!(doc.contains(r#"value="&quot;quoted&quot;""#));
    }
}
