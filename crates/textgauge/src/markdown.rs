//! Markdown-to-prose conversion for scoring Markdown sources.
//!
//! Readability formulas expect running prose. Code, headings, tables, and
//! image alt text would inflate word counts without contributing sentences,
//! so they are dropped before feature extraction.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Strip Markdown formatting, returning plain prose text.
///
/// Dropped: fenced and indented code, inline code, raw HTML, YAML
/// frontmatter, headings, tables, and image alt text.
/// Kept: paragraph, list item, blockquote, link and emphasis text.
#[tracing::instrument(skip_all, fields(input_len = text.len()))]
pub fn strip_to_prose(text: &str) -> String {
    let text = strip_frontmatter(text);

    let options =
        Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(text, options);

    let mut prose = String::with_capacity(text.len() / 2);
    let mut skip_depth: usize = 0;

    for event in parser {
        match event {
            Event::Start(
                Tag::CodeBlock(_) | Tag::Heading { .. } | Tag::Table(_) | Tag::Image { .. },
            ) => {
                skip_depth += 1;
            }
            Event::End(TagEnd::CodeBlock | TagEnd::Heading(_) | TagEnd::Table | TagEnd::Image) => {
                skip_depth = skip_depth.saturating_sub(1);
            }
            Event::Text(t) if skip_depth == 0 => prose.push_str(&t),
            Event::SoftBreak | Event::HardBreak if skip_depth == 0 => prose.push(' '),
            Event::End(TagEnd::Paragraph | TagEnd::Item) if skip_depth == 0 => prose.push(' '),
            _ => {}
        }
    }

    prose.trim().to_string()
}

/// Drop a leading YAML frontmatter block delimited by `---` lines.
fn strip_frontmatter(text: &str) -> &str {
    let trimmed = text.trim_start();
    let Some(after_opening) = trimmed.strip_prefix("---") else {
        return text;
    };
    let Some(close_pos) = after_opening.find("\n---") else {
        return text;
    };

    let remainder = &after_opening[close_pos + 4..];
    remainder.strip_prefix('\n').unwrap_or(remainder)
}
