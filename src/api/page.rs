//! Server-rendered front end.
//!
//! The page mirrors a pair of cascading selectors: picking a product type
//! resubmits the form so the product selector only lists that type, and the
//! "Recommend" button submits the same form with `recommend=1`.

use axum::{
    extract::{Query, State},
    response::Html,
};
use serde::Deserialize;

use crate::models::{Product, Recommendation};
use crate::services::recommendations;

use super::AppState;

const NO_RESULTS_MESSAGE: &str = "No similar products found. Try adjusting the similarity threshold or the number of recommendations.";

#[derive(Debug, Default, Deserialize)]
pub struct PageQuery {
    pub product_type: Option<String>,
    pub product: Option<String>,
    pub recommend: Option<String>,
}

/// Renders the recommender page for the current selection
pub async fn index(State(state): State<AppState>, Query(query): Query<PageQuery>) -> Html<String> {
    let catalog = &state.catalog;
    let types = catalog.product_types();

    let mut body = String::new();
    render_overview(&mut body);

    let Some(default_type) = types.first() else {
        body.push_str("<p class=\"warning\">No products are loaded.</p>");
        return Html(layout(&body));
    };

    // Unknown selections fall back to the first entry, like a selector would
    let selected_type = query
        .product_type
        .as_deref()
        .filter(|t| types.iter().any(|known| known.as_str() == *t))
        .unwrap_or(default_type.as_str());

    let subset = catalog.products_of_type(selected_type);
    let position = query
        .product
        .as_deref()
        .and_then(|name| catalog.find_in_type(selected_type, name))
        .unwrap_or(0);
    let selected = subset[position];

    render_selectors(&mut body, types, selected_type, &subset, selected);

    if query.recommend.is_some() {
        match recommendations::recommend_for_product(
            catalog,
            selected.id,
            state.config.top_n,
            state.config.min_similarity,
        ) {
            Ok((_, found)) if !found.is_empty() => render_results(&mut body, &found),
            Ok(_) => {
                body.push_str(&format!("<p class=\"warning\">{}</p>", NO_RESULTS_MESSAGE));
            }
            Err(e) => {
                tracing::error!(error = %e, product_id = selected.id, "Recommendation failed");
                body.push_str(&format!("<p class=\"error\">{}</p>", escape(&e.to_string())));
            }
        }
    }

    Html(layout(&body))
}

fn render_overview(out: &mut String) {
    out.push_str(
        "<header>\
         <h1>Skincare Product Recommendations</h1>\
         <p>Pick a product to discover others of the same type with the most similar \
         ingredient lists. Similarity is the cosine between TF-IDF weighted ingredient \
         vectors.</p>\
         </header><hr>",
    );
}

fn render_selectors(
    out: &mut String,
    types: &[String],
    selected_type: &str,
    subset: &[&Product],
    selected: &Product,
) {
    out.push_str("<form method=\"get\" action=\"/\"><div class=\"columns\"><div class=\"pickers\">");

    out.push_str("<label>Select a product type:<br><select name=\"product_type\" onchange=\"this.form.submit()\">");
    for t in types {
        push_option(out, t, t == selected_type);
    }
    out.push_str("</select></label><br>");

    out.push_str("<label>Select a product:<br><select name=\"product\" onchange=\"this.form.submit()\">");
    for p in subset {
        push_option(out, &p.name, p.id == selected.id);
    }
    out.push_str("</select></label><br>");

    out.push_str("<button type=\"submit\" name=\"recommend\" value=\"1\">Recommend</button></div>");

    if !selected.image_url.is_empty() {
        out.push_str(&format!(
            "<figure><img src=\"{}\" width=\"150\" alt=\"\"><figcaption>{}</figcaption></figure>",
            escape(&selected.image_url),
            escape(&selected.name)
        ));
    }

    out.push_str("</div></form>");
}

fn push_option(out: &mut String, value: &str, selected: bool) {
    out.push_str(&format!(
        "<option value=\"{v}\"{s}>{v}</option>",
        v = escape(value),
        s = if selected { " selected" } else { "" }
    ));
}

fn render_results(out: &mut String, found: &[Recommendation]) {
    out.push_str("<h2>Recommended Products</h2><ul class=\"results\">");
    for rec in found {
        let p = &rec.product;
        out.push_str(&format!(
            "<li><img src=\"{img}\" width=\"150\" alt=\"\">\
             <p><strong><a href=\"{url}\">{name}</a></strong></p>\
             <p>Brand: {brand}</p>\
             <p>Rating: {rating}</p>\
             <p>Price: {price}</p>\
             <p>Similarity: {score:.2}</p><hr></li>",
            img = escape(&p.image_url),
            url = escape(&p.product_url),
            name = escape(&p.name),
            brand = escape(&p.brand),
            rating = p.display_rating(),
            price = p.display_price(),
            score = rec.score,
        ));
    }
    out.push_str("</ul>");
}

fn layout(body: &str) -> String {
    format!(
        "<!DOCTYPE html><html><head><meta charset=\"utf-8\">\
         <title>Skincare Product Recommendations</title>\
         <style>body{{font-family:sans-serif;max-width:60em;margin:auto}}\
         .columns{{display:flex;gap:2em}}.pickers{{flex:2}}\
         .warning{{color:#8a6d3b}}.error{{color:#a94442}}\
         .results{{list-style:none;padding:0}}</style>\
         </head><body>{}</body></html>",
        body
    )
}

/// Escapes text for use in HTML content and double-quoted attributes
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
