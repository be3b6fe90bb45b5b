use scraper::{ElementRef, Node};

const BLOCK_ELEMENTS: [&str; 21] = [
    "address", "article", "aside", "blockquote", "caption", "dd", "div", "dl", "dt", "footer", "form", "h1", "h2",
    "h3", "h4", "h5", "h6", "header", "li", "p", "section",
];

const HIDDEN_ELEMENTS: [&str; 5] = ["head", "script", "style", "noscript", "template"];

/// Collapses whitespace runs into single spaces and trims the ends.
pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space {
                out.push(' ');
                prev_space = true;
            }
        } else {
            out.push(ch);
            prev_space = false;
        }
    }
    out.trim().to_string()
}

/// Appends roughly what a browser's `innerText` gives for `element`:
/// block boxes and table rows end lines, cells end with a tab, and
/// source whitespace inside text collapses to a single space.
pub fn render_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let collapsed: String = text
                    .split_whitespace()
                    .collect::<Vec<_>>()
                    .join(" ");
                if text.starts_with(char::is_whitespace) {
                    out.push(' ');
                }
                out.push_str(&collapsed);
                if !collapsed.is_empty() && text.ends_with(char::is_whitespace) {
                    out.push(' ');
                }
            }
            Node::Element(el) => {
                let name = el.name();
                if HIDDEN_ELEMENTS.contains(&name) {
                    continue;
                }
                if name == "br" {
                    out.push('\n');
                    continue;
                }
                let Some(child_el) = ElementRef::wrap(child) else { continue };
                let breaks_line = BLOCK_ELEMENTS.contains(&name) || matches!(name, "table" | "tr");
                if breaks_line {
                    out.push('\n');
                }
                render_text(child_el, out);
                if breaks_line {
                    out.push('\n');
                }
                if matches!(name, "td" | "th") {
                    out.push('\t');
                }
            }
            _ => {}
        }
    }
}
