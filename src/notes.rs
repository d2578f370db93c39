// src/notes.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;
use url::Url;

use crate::error::Result;
use crate::fetch::Fetcher;
use crate::process::Table;

/// The COT explanatory-notes page (terminology definitions).
pub const EXPLANATORY_NOTES_URL: &str =
    "https://www.cftc.gov/MarketReports/CommitmentsofTraders/ExplanatoryNotes/index.htm";

static NON_ALNUM_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static WS_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Scrape the explanatory-notes page into a `(section, title, text)` table.
pub fn explanatory_notes(fetcher: &dyn Fetcher) -> Result<Table> {
    let url = Url::parse(EXPLANATORY_NOTES_URL)?;
    let bytes = fetcher.fetch_bytes(&url)?;
    let html = String::from_utf8_lossy(&bytes);
    Ok(parse_notes_html(&html))
}

/// Extract definition pairs from the page markup.
///
/// The page structure has changed before. When the accordion container is
/// missing, fall back to one row holding the page's whole visible text
/// rather than failing.
pub fn parse_notes_html(html: &str) -> Table {
    let accordion =
        Selector::parse(".ckeditor-accordion").expect("accordion selector should parse");
    let dt_sel = Selector::parse("dt").expect("dt selector should parse");
    let main_sel = Selector::parse("main").expect("main selector should parse");

    let doc = Html::parse_document(html);
    let mut table = Table::new(vec![
        "section".to_string(),
        "title".to_string(),
        "text".to_string(),
    ]);

    let Some(container) = doc.select(&accordion).next() else {
        let text = match doc.select(&main_sel).next() {
            Some(main) => element_text(main),
            None => element_text(doc.root_element()),
        };
        debug!("accordion container missing; returning full-page fallback");
        table.rows.push(vec![
            "full_page_fallback".to_string(),
            "Explanatory Notes (fallback)".to_string(),
            text,
        ]);
        return table;
    };

    for dt in container.select(&dt_sel) {
        let Some(dd) = following_dd(dt) else { continue };
        let title = element_text(dt);
        let text = element_text(dd);
        let section = section_key(&title);
        table.rows.push(vec![section, title, text]);
    }
    debug!(rows = table.len(), "parsed explanatory notes");
    table
}

/// The next `dd` sibling of a `dt`, skipping intervening text nodes.
fn following_dd<'a>(dt: ElementRef<'a>) -> Option<ElementRef<'a>> {
    dt.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "dd")
}

/// Visible text of an element with whitespace runs collapsed.
fn element_text(el: ElementRef) -> String {
    let joined = el.text().collect::<Vec<_>>().join(" ");
    WS_RUNS.replace_all(joined.trim(), " ").to_string()
}

/// Normalized topic key: lowercase, non-alphanumeric runs become one `_`.
fn section_key(title: &str) -> String {
    NON_ALNUM_RUNS
        .replace_all(&title.to_lowercase(), "_")
        .trim_matches('_')
        .to_string()
}
