//! Read-only listing of a local taxonomy

use crate::error::StoreError;
use crate::model::{CategoryNode, Parent, TaxonomyKind, TermFilter};
use crate::store::TermStore;
use std::fmt::Write;

/// A term with its loaded descendants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermTree {
    pub node: CategoryNode,
    pub children: Vec<TermTree>,
}

/// Load the root terms of `kind` and up to `kind.max_depth()` levels below
pub fn load_outline<S: TermStore + ?Sized>(store: &S, kind: TaxonomyKind) -> Result<Vec<TermTree>, StoreError> {
    load_level(store, kind, Parent::Root, kind.max_depth())
}

fn load_level<S: TermStore + ?Sized>(
    store: &S,
    kind: TaxonomyKind,
    parent: Parent,
    remaining: usize,
) -> Result<Vec<TermTree>, StoreError> {
    if remaining == 0 {
        return Ok(Vec::new());
    }

    store
        .list_terms(kind, &TermFilter::children_of(parent))?
        .into_iter()
        .map(|node| {
            let children = load_level(store, kind, Parent::Term(node.id), remaining - 1)?;
            Ok(TermTree { node, children })
        })
        .collect()
}

/// Link to a term's archive, `?{taxonomy}={slug}`
pub fn term_link(kind: TaxonomyKind, node: &CategoryNode) -> String {
    format!("?{}={}", kind.slug(), node.slug)
}

/// Render the management view as HTML
///
/// Each root becomes a heading, its children a list of linked headings,
/// and grandchildren a nested list of links.
pub fn render_html<S: TermStore + ?Sized>(store: &S, kind: TaxonomyKind) -> Result<String, StoreError> {
    let total = store.list_terms(kind, &TermFilter::all())?.len();
    let outline = load_outline(store, kind)?;
    let mut html = String::new();

    // Writing into a String cannot fail
    let _ = write!(html, "<div class=\"wrap nosubsub\"><h2>{}</h2>", kind.label());
    let _ = write!(html, "<p><em>{} items</em></p>", total);

    for root in &outline {
        let _ = write!(html, "<h3>{}</h3><ul>", html_escape::encode_text(&root.node.name));

        for child in &root.children {
            let _ = write!(
                html,
                "<li><h4><a href=\"{}\">{}</a></h4>",
                html_escape::encode_double_quoted_attribute(&term_link(kind, &child.node)),
                html_escape::encode_text(&child.node.name)
            );

            if !child.children.is_empty() {
                html.push_str("<ul>");
                for grandchild in &child.children {
                    let _ = write!(
                        html,
                        "<li><a href=\"{}\">{}</a></li>",
                        html_escape::encode_double_quoted_attribute(&term_link(kind, &grandchild.node)),
                        html_escape::encode_text(&grandchild.node.name)
                    );
                }
                html.push_str("</ul>");
            }

            html.push_str("</li>");
        }

        html.push_str("</ul>");
    }

    html.push_str("</div>");
    Ok(html)
}
