// Turns captured portal HTML into the plain-text document model.

pub mod text;

use scraper::{ElementRef, Html, Selector};

use crate::document::{DocumentContext, Table};
use crate::portal::text::{normalize_ws, render_text};
use crate::snapshot::SchoolInfo;

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// Builds the document context of one grades frame from its HTML.
pub fn frame_context(locator: &str, html_content: &str) -> DocumentContext {
    let document = Html::parse_document(html_content);
    let body_selector = selector("body");
    let table_selector = selector("table");

    let mut context = DocumentContext::new(locator);

    // Fragments without a <body> still get one from the parser, so this is the whole page.
    if let Some(body) = document.select(&body_selector).next() {
        let mut text = String::new();
        render_text(body, &mut text);
        context.lines = text.split('\n').map(normalize_ws).filter(|l| !l.is_empty()).collect();
    }

    context.tables = document.select(&table_selector).map(read_table).collect();
    context
}

fn read_table(table: ElementRef) -> Table {
    let tr_selector = selector("tr");

    let mut text = String::new();
    render_text(table, &mut text);
    let text = text.split('\n').map(normalize_ws).filter(|l| !l.is_empty()).collect::<Vec<_>>().join("\n");

    // Rows of nested tables belong to those tables, not to this one.
    let rows = table
        .select(&tr_selector)
        .filter(|tr| owning_table(*tr) == Some(table))
        .map(|tr| {
            tr.children()
                .filter_map(ElementRef::wrap)
                .filter(|cell| matches!(cell.value().name(), "td" | "th"))
                .map(|cell| {
                    let mut cell_text = String::new();
                    render_text(cell, &mut cell_text);
                    normalize_ws(&cell_text)
                })
                .collect()
        })
        .collect();

    Table::new(text, rows)
}

fn owning_table(tr: ElementRef) -> Option<ElementRef> {
    tr.ancestors().filter_map(ElementRef::wrap).find(|el| el.value().name() == "table")
}

/// Reads the school name and year banner off the portal dashboard.
pub fn school_info(html_content: &str) -> SchoolInfo {
    let document = Html::parse_document(html_content);
    let text_of = |css: &'static str| {
        document
            .select(&selector(css))
            .next()
            .map(|el| normalize_ws(&el.text().collect::<String>()))
            .unwrap_or_default()
    };

    SchoolInfo {
        name: text_of("#facts-school-name-span"),
        year: text_of("#facts-school-year-term-span"),
    }
}
