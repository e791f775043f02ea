//! Markdown to styled terminal lines.
//!
//! This module is the "markdown renderer" collaborator for the widget set:
//! it consumes a markdown string and produces ratatui [`Line`]s, with GFM
//! table and list support enabled. Images are emitted as placeholder lines
//! plus an [`ImageRef`] so the host can overlay real thumbnails.

use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{Arena, Options, parse_document};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::ui::style;

/// Inline formatting flags carried by a span of text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InlineStyle {
    pub emphasis: bool,
    pub strong: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

/// A run of text with uniform inline styling.
#[derive(Debug, Clone, PartialEq, Eq)]
struct InlineSpan {
    text: String,
    style: InlineStyle,
}

/// An image found in the source, with the rendered line it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Alt text (may be empty)
    pub alt: String,
    /// Image source as written in the markdown
    pub src: String,
    /// Index of the placeholder line in the rendered output
    pub line: usize,
}

/// Rendered markdown: styled lines plus image references.
#[derive(Debug, Clone, Default)]
pub struct RenderedMarkdown {
    pub lines: Vec<Line<'static>>,
    pub images: Vec<ImageRef>,
}

impl RenderedMarkdown {
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Render markdown source to styled lines wrapped at `width` columns.
pub fn render_markdown(source: &str, width: u16) -> RenderedMarkdown {
    let arena = Arena::new();
    let options = create_options();
    let root = parse_document(&arena, source, &options);

    let mut out = RenderedMarkdown::default();
    let wrap_width = (width.max(1)) as usize;
    for child in root.children() {
        process_block(child, &mut out, wrap_width, 0);
    }
    // Drop a single trailing blank so sections don't end ragged.
    if out.lines.last().is_some_and(|l| l.width() == 0) {
        out.lines.pop();
    }
    out
}

/// Render text verbatim as preformatted lines, hard-wrapped by character
/// count. Used for JSON fullscreen views where markdown must not apply.
pub fn literal_lines(text: &str, width: u16) -> Vec<Line<'static>> {
    let wrap = (width.max(1)) as usize;
    let mut lines = Vec::new();
    for raw in text.lines() {
        if raw.is_empty() {
            lines.push(Line::raw(""));
            continue;
        }
        let chars: Vec<char> = raw.chars().collect();
        for chunk in chars.chunks(wrap) {
            lines.push(Line::styled(
                chunk.iter().collect::<String>(),
                style::code_block_style(),
            ));
        }
    }
    if lines.is_empty() {
        lines.push(Line::raw(""));
    }
    lines
}

fn create_options() -> Options {
    let mut options = Options::default();

    // GFM extensions: the widget contract requires table and list support.
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.extension.tasklist = true;

    options
}

fn process_block<'a>(
    node: &'a AstNode<'a>,
    out: &mut RenderedMarkdown,
    wrap_width: usize,
    quote_depth: usize,
) {
    match &node.data.borrow().value {
        NodeValue::Heading(heading) => {
            let text = extract_text(node);
            let prefix = "#".repeat(heading.level as usize);
            out.lines.push(Line::styled(
                format!("{prefix} {text}"),
                style::heading_style(heading.level),
            ));
            out.lines.push(Line::raw(""));
        }

        NodeValue::Paragraph => {
            let images = collect_images(node);
            if images.is_empty() {
                let spans = collect_inline_spans(node);
                push_wrapped(out, &spans, wrap_width, quote_depth);
            } else {
                for (alt, src) in images {
                    let label = if alt.is_empty() { &src } else { &alt };
                    out.images.push(ImageRef {
                        alt: alt.clone(),
                        src: src.clone(),
                        line: out.lines.len(),
                    });
                    out.lines.push(Line::styled(
                        format!("[Image: {label}]"),
                        style::image_placeholder_style(),
                    ));
                }
            }
            out.lines.push(Line::raw(""));
        }

        NodeValue::List(list) => {
            let mut index = list.start;
            for item in node.children() {
                let marker = match list.list_type {
                    ListType::Bullet => "• ".to_string(),
                    ListType::Ordered => {
                        let m = format!("{index}. ");
                        index += 1;
                        m
                    }
                };
                process_list_item(item, out, wrap_width, quote_depth, &marker);
            }
            out.lines.push(Line::raw(""));
        }

        NodeValue::CodeBlock(code_block) => {
            for raw in code_block.literal.lines() {
                let chars: Vec<char> = raw.chars().collect();
                if chars.is_empty() {
                    out.lines
                        .push(Line::styled("  ".to_string(), style::code_block_style()));
                    continue;
                }
                for chunk in chars.chunks(wrap_width.saturating_sub(2).max(1)) {
                    out.lines.push(Line::styled(
                        format!("  {}", chunk.iter().collect::<String>()),
                        style::code_block_style(),
                    ));
                }
            }
            out.lines.push(Line::raw(""));
        }

        NodeValue::BlockQuote => {
            for child in node.children() {
                process_block(child, out, wrap_width.saturating_sub(2).max(1), quote_depth + 1);
            }
        }

        NodeValue::ThematicBreak => {
            out.lines.push(Line::styled(
                "─".repeat(wrap_width.min(40)),
                style::hint_style(),
            ));
            out.lines.push(Line::raw(""));
        }

        NodeValue::Table(_) => {
            process_table(node, out);
            out.lines.push(Line::raw(""));
        }

        // Raw HTML and anything unrecognized: render the literal text plainly.
        _ => {
            let text = extract_text(node);
            if !text.is_empty() {
                let spans = vec![InlineSpan {
                    text,
                    style: InlineStyle::default(),
                }];
                push_wrapped(out, &spans, wrap_width, quote_depth);
            }
        }
    }
}

fn process_list_item<'a>(
    item: &'a AstNode<'a>,
    out: &mut RenderedMarkdown,
    wrap_width: usize,
    quote_depth: usize,
    marker: &str,
) {
    // Task list items render their checkbox in place of the bullet.
    let marker = if let NodeValue::TaskItem(checked) = &item.data.borrow().value {
        if checked.is_some() { "[x] " } else { "[ ] " }
    } else {
        marker
    };

    let mut first = true;
    for child in item.children() {
        match &child.data.borrow().value {
            NodeValue::Paragraph => {
                let mut spans = collect_inline_spans(child);
                let lead = if first { marker } else { "  " };
                spans.insert(
                    0,
                    InlineSpan {
                        text: lead.to_string(),
                        style: InlineStyle::default(),
                    },
                );
                push_wrapped(out, &spans, wrap_width, quote_depth);
                first = false;
            }
            _ => process_block(child, out, wrap_width.saturating_sub(2).max(1), quote_depth),
        }
    }
}

fn process_table<'a>(node: &'a AstNode<'a>, out: &mut RenderedMarkdown) {
    let mut header_done = false;
    for row in node.children() {
        if !matches!(row.data.borrow().value, NodeValue::TableRow(_)) {
            continue;
        }
        let cells: Vec<String> = row.children().map(extract_text).collect();
        let text = cells.join(" │ ");
        if header_done {
            out.lines.push(Line::raw(text));
        } else {
            out.lines.push(Line::styled(
                text.clone(),
                Style::default().add_modifier(ratatui::style::Modifier::BOLD),
            ));
            out.lines
                .push(Line::styled("─".repeat(text.width()), style::hint_style()));
            header_done = true;
        }
    }
}

fn push_wrapped(
    out: &mut RenderedMarkdown,
    spans: &[InlineSpan],
    wrap_width: usize,
    quote_depth: usize,
) {
    let quote_prefix = "> ".repeat(quote_depth);
    let base = if quote_depth > 0 {
        style::quote_style()
    } else {
        Style::default()
    };
    for line_spans in wrap_spans(spans, wrap_width.saturating_sub(quote_prefix.width()).max(1)) {
        let mut rendered: Vec<Span<'static>> = Vec::with_capacity(line_spans.len() + 1);
        if !quote_prefix.is_empty() {
            rendered.push(Span::styled(quote_prefix.clone(), style::quote_style()));
        }
        for span in line_spans {
            rendered.push(Span::styled(span.text, style::inline_style(base, span.style)));
        }
        out.lines.push(Line::from(rendered));
    }
}

/// Word-wrap styled spans to a column width, preserving per-word styling.
fn wrap_spans(spans: &[InlineSpan], width: usize) -> Vec<Vec<InlineSpan>> {
    let mut lines: Vec<Vec<InlineSpan>> = Vec::new();
    let mut current: Vec<InlineSpan> = Vec::new();
    let mut current_width = 0usize;

    let mut push_word = |word: InlineSpan, lines: &mut Vec<Vec<InlineSpan>>,
                         current: &mut Vec<InlineSpan>,
                         current_width: &mut usize| {
        let word_width = word.text.width();
        let sep = usize::from(!current.is_empty());
        if *current_width + sep + word_width > width && !current.is_empty() {
            lines.push(std::mem::take(current));
            *current_width = 0;
        }
        if !current.is_empty() {
            // Merge the separator into the previous span when styles match.
            if let Some(last) = current.last_mut().filter(|l| l.style == word.style) {
                last.text.push(' ');
                last.text.push_str(&word.text);
                *current_width += 1 + word_width;
                return;
            }
            current.push(InlineSpan {
                text: " ".to_string(),
                style: InlineStyle::default(),
            });
            *current_width += 1;
        }
        *current_width += word_width;
        current.push(word);
    };

    for span in spans {
        for word in span.text.split_whitespace() {
            push_word(
                InlineSpan {
                    text: word.to_string(),
                    style: span.style,
                },
                &mut lines,
                &mut current,
                &mut current_width,
            );
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(vec![InlineSpan {
            text: String::new(),
            style: InlineStyle::default(),
        }]);
    }
    lines
}

fn collect_inline_spans<'a>(node: &'a AstNode<'a>) -> Vec<InlineSpan> {
    let mut spans = Vec::new();
    collect_spans_into(node, InlineStyle::default(), &mut spans);
    spans
}

fn collect_spans_into<'a>(node: &'a AstNode<'a>, style: InlineStyle, spans: &mut Vec<InlineSpan>) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(text) => spans.push(InlineSpan {
                text: text.clone(),
                style,
            }),
            NodeValue::Code(code) => spans.push(InlineSpan {
                text: code.literal.clone(),
                style: InlineStyle { code: true, ..style },
            }),
            NodeValue::SoftBreak | NodeValue::LineBreak => spans.push(InlineSpan {
                text: " ".to_string(),
                style,
            }),
            NodeValue::Emph => {
                collect_spans_into(child, InlineStyle { emphasis: true, ..style }, spans);
            }
            NodeValue::Strong => {
                collect_spans_into(child, InlineStyle { strong: true, ..style }, spans);
            }
            NodeValue::Strikethrough => {
                collect_spans_into(
                    child,
                    InlineStyle {
                        strikethrough: true,
                        ..style
                    },
                    spans,
                );
            }
            NodeValue::Link(_) => {
                collect_spans_into(child, InlineStyle { link: true, ..style }, spans);
            }
            _ => collect_spans_into(child, style, spans),
        }
    }
}

/// Collect (alt, src) for images directly inside a paragraph.
fn collect_images<'a>(node: &'a AstNode<'a>) -> Vec<(String, String)> {
    let mut images = Vec::new();
    for child in node.children() {
        if let NodeValue::Image(link) = &child.data.borrow().value {
            images.push((extract_text(child), link.url.clone()));
        }
    }
    images
}

fn extract_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    extract_text_into(node, &mut text);
    text
}

fn extract_text_into<'a>(node: &'a AstNode<'a>, out: &mut String) {
    for child in node.children() {
        match &child.data.borrow().value {
            NodeValue::Text(t) => out.push_str(t),
            NodeValue::Code(c) => out.push_str(&c.literal),
            NodeValue::SoftBreak | NodeValue::LineBreak => out.push(' '),
            _ => extract_text_into(child, out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_heading_renders_with_prefix() {
        let md = render_markdown("# Hello", 80);
        assert_eq!(line_text(&md.lines[0]), "# Hello");
    }

    #[test]
    fn test_paragraph_wraps_at_width() {
        let md = render_markdown("alpha beta gamma delta epsilon", 12);
        assert!(md.lines.len() > 1, "long paragraph should wrap");
        for line in &md.lines {
            assert!(line_text(line).width() <= 12);
        }
    }

    #[test]
    fn test_image_yields_placeholder_and_ref() {
        let md = render_markdown("![logo](logo.png)", 80);
        assert_eq!(md.images.len(), 1);
        assert_eq!(md.images[0].src, "logo.png");
        assert_eq!(line_text(&md.lines[md.images[0].line]), "[Image: logo]");
    }

    #[test]
    fn test_image_without_alt_uses_src_label() {
        let md = render_markdown("![](pic.png)", 80);
        assert_eq!(line_text(&md.lines[0]), "[Image: pic.png]");
    }

    #[test]
    fn test_table_rows_join_cells() {
        let md = render_markdown("|a|b|\n|-|-|\n|1|2|", 80);
        let texts: Vec<String> = md.lines.iter().map(line_text).collect();
        assert!(texts.iter().any(|t| t == "a │ b"));
        assert!(texts.iter().any(|t| t == "1 │ 2"));
    }

    #[test]
    fn test_bullet_list_markers() {
        let md = render_markdown("- one\n- two", 80);
        let texts: Vec<String> = md.lines.iter().map(line_text).collect();
        assert!(texts.iter().any(|t| t.starts_with("• one")));
        assert!(texts.iter().any(|t| t.starts_with("• two")));
    }

    #[test]
    fn test_ordered_list_numbers() {
        let md = render_markdown("1. first\n2. second", 80);
        let texts: Vec<String> = md.lines.iter().map(line_text).collect();
        assert!(texts.iter().any(|t| t.starts_with("1. first")));
        assert!(texts.iter().any(|t| t.starts_with("2. second")));
    }

    #[test]
    fn test_task_list_checkboxes() {
        let md = render_markdown("- [x] done\n- [ ] todo", 80);
        let texts: Vec<String> = md.lines.iter().map(line_text).collect();
        assert!(texts.iter().any(|t| t.starts_with("[x] done")));
        assert!(texts.iter().any(|t| t.starts_with("[ ] todo")));
    }

    #[test]
    fn test_literal_lines_do_not_interpret_markdown() {
        let lines = literal_lines("# not a heading\n{\"k\": 1}", 80);
        assert_eq!(line_text(&lines[0]), "# not a heading");
        assert_eq!(line_text(&lines[1]), "{\"k\": 1}");
    }

    #[test]
    fn test_literal_lines_hard_wrap() {
        let lines = literal_lines(&"x".repeat(25), 10);
        assert_eq!(lines.len(), 3);
        assert_eq!(line_text(&lines[0]).len(), 10);
        assert_eq!(line_text(&lines[2]).len(), 5);
    }

    #[test]
    fn test_empty_source_renders_nothing() {
        let md = render_markdown("", 80);
        assert!(md.lines.is_empty());
        assert!(md.images.is_empty());
    }
}
