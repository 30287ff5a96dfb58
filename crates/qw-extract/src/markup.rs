//! Markup-aware text helpers: headings, emphasis, stripping, sentence splitting.
//!
//! Lesson bodies arrive as a mix of HTML fragments and Markdown, sometimes
//! both in one document. Nothing here parses either format fully; the
//! helpers only recover the signals the extractor needs.

use std::sync::LazyLock;

use regex::Regex;

static MD_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s{0,3}#{1,6}\s+(.+?)\s*#*\s*$").expect("valid heading regex")
});

static HTML_HEADING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<h[1-6][^>]*>(.*?)</h[1-6]\s*>").expect("valid html heading regex")
});

static MD_STRONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\*\*([^*\n]+?)\*\*|__([^_\n]+?)__").expect("valid emphasis regex")
});

static HTML_EMPHASIS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:strong|b|em)(?:\s[^>]*)?>(.*?)</(?:strong|b|em)\s*>")
        .expect("valid html emphasis regex")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]+>").expect("valid tag regex"));

static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid link regex"));

/// Headings in document order: ATX Markdown, HTML `<hN>`, then underline and
/// ALL CAPS headings for plain-text bodies.
pub(crate) fn headings(content: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for caps in MD_HEADING.captures_iter(content) {
        if let (Some(whole), Some(text)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), clean_inline(text.as_str())));
        }
    }
    for caps in HTML_HEADING.captures_iter(content) {
        if let (Some(whole), Some(text)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), clean_inline(text.as_str())));
        }
    }

    if found.is_empty() {
        found.extend(plain_text_headings(content));
    }

    found.sort_by_key(|(offset, _)| *offset);
    found
        .into_iter()
        .map(|(_, text)| text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Emphasized spans (`**x**`, `__x__`, `<strong>`, `<b>`, `<em>`), in order.
pub(crate) fn emphasized(content: &str) -> Vec<String> {
    let mut found: Vec<(usize, String)> = Vec::new();

    for caps in MD_STRONG.captures_iter(content) {
        let Some(whole) = caps.get(0) else { continue };
        if let Some(text) = caps.get(1).or_else(|| caps.get(2)) {
            found.push((whole.start(), clean_inline(text.as_str())));
        }
    }
    for caps in HTML_EMPHASIS.captures_iter(content) {
        if let (Some(whole), Some(text)) = (caps.get(0), caps.get(1)) {
            found.push((whole.start(), clean_inline(text.as_str())));
        }
    }

    found.sort_by_key(|(offset, _)| *offset);
    found
        .into_iter()
        .map(|(_, text)| text)
        .filter(|text| !text.is_empty())
        .collect()
}

/// Plain text with tags, Markdown markers, and common entities removed.
///
/// Line structure is kept so sentence splitting can treat line breaks as
/// boundaries.
pub(crate) fn strip(content: &str) -> String {
    let without_links = MD_LINK.replace_all(content, "$1");
    let block_breaks = without_links
        .replace("</p>", "\n")
        .replace("</li>", "\n")
        .replace("<br>", "\n")
        .replace("<br/>", "\n")
        .replace("<br />", "\n");
    let without_tags = TAG.replace_all(&block_breaks, " ");
    let decoded = decode_entities(&without_tags);

    decoded
        .lines()
        .map(|line| {
            let trimmed = line.trim_start();
            let trimmed = trimmed.trim_start_matches('#').trim_start();
            let trimmed = trimmed
                .strip_prefix("- ")
                .or_else(|| trimmed.strip_prefix("* "))
                .or_else(|| trimmed.strip_prefix("> "))
                .unwrap_or(trimmed);
            trimmed
                .replace("**", "")
                .replace("__", "")
                .replace('`', "")
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" ")
        })
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Split stripped text into sentences on terminal punctuation and line breaks.
pub(crate) fn sentences(plain: &str) -> Vec<String> {
    let mut out = Vec::new();
    for line in plain.lines() {
        let mut current = String::new();
        let mut chars = line.chars().peekable();
        while let Some(c) = chars.next() {
            current.push(c);
            let full_width = matches!(c, '。' | '！' | '？');
            let terminal = full_width || matches!(c, '.' | '!' | '?' | '؟');
            let boundary = full_width || chars.peek().is_none_or(|next| next.is_whitespace());
            if terminal && boundary && !ends_with_abbreviation(&current) {
                push_sentence(&mut out, &current);
                current.clear();
            }
        }
        push_sentence(&mut out, &current);
    }
    out
}

fn push_sentence(out: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if sentence.chars().filter(|c| c.is_alphabetic()).count() >= 3 {
        out.push(sentence.to_string());
    }
}

/// Abbreviations that end in a period without ending the sentence.
fn ends_with_abbreviation(current: &str) -> bool {
    let lower = current.to_lowercase();
    ["e.g.", "i.e.", "pl.", "z.b.", "z. b.", "vs.", "etc.", "dr.", "mr."]
        .iter()
        .any(|abbr| lower.ends_with(abbr))
}

fn clean_inline(raw: &str) -> String {
    let without_tags = TAG.replace_all(raw, " ");
    decode_entities(&without_tags)
        .replace("**", "")
        .replace("__", "")
        .replace('`', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .trim_matches(|c: char| c == ':' || c == '-' || c.is_whitespace())
        .to_string()
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

/// Underline-adorned (`Title\n=====`) and ALL CAPS multi-word headings.
fn plain_text_headings(content: &str) -> Vec<(usize, String)> {
    let lines: Vec<&str> = content.lines().collect();
    let mut offset = 0usize;
    let mut out = Vec::new();

    for (i, line) in lines.iter().enumerate() {
        let trimmed = line.trim();
        let underlined = lines
            .get(i + 1)
            .is_some_and(|next| !trimmed.is_empty() && is_underline(next, trimmed));
        if underlined || is_all_caps_heading(trimmed) {
            out.push((offset, to_title_case_if_caps(trimmed)));
        }
        offset += line.len() + 1;
    }
    out
}

fn is_underline(underline: &str, title: &str) -> bool {
    let trimmed = underline.trim();
    if trimmed.len() < 3 || trimmed.chars().count() < title.chars().count() {
        return false;
    }
    let Some(first) = trimmed.chars().next() else {
        return false;
    };
    "=-~".contains(first) && trimmed.chars().all(|c| c == first)
}

fn is_all_caps_heading(line: &str) -> bool {
    if line.len() < 3 || !line.chars().any(char::is_alphabetic) {
        return false;
    }
    let all_upper = line
        .chars()
        .filter(|c| c.is_alphabetic())
        .all(char::is_uppercase);
    all_upper && line.split_whitespace().count() >= 2
}

fn to_title_case_if_caps(line: &str) -> String {
    if !is_all_caps_heading(line) {
        return line.to_string();
    }
    line.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                let rest: String = chars.collect::<String>().to_lowercase();
                format!("{}{rest}", first.to_uppercase().collect::<String>())
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
