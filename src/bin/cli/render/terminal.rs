use chrono::{DateTime, Utc};

use idiom_quest_lib::review::format_interval;
use idiom_quest_lib::{Idiom, IdiomWithProgress, ProgressRecord};

/// ANSI color codes
pub struct Color;

impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
}

pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Full idiom card: word, pronunciation, definition, optional fields and
/// the progress line.
pub fn print_card(entry: &IdiomWithProgress, now: DateTime<Utc>, use_color: bool) {
    let idiom = &entry.idiom;
    println!("{}  {}", paint(&idiom.word, Color::BOLD, use_color), paint(&idiom.pronunciation, Color::CYAN, use_color));
    println!();
    for line in wrap_lines(&idiom.definition, "  ", 80) {
        println!("{}", line);
    }

    if let Some(example) = &idiom.example {
        println!();
        println!("{}", paint("Example", Color::DIM, use_color));
        for line in wrap_lines(example, "  ", 80) {
            println!("{}", line);
        }
    }
    if let Some(origin) = &idiom.origin {
        println!();
        println!("{}", paint("Origin", Color::DIM, use_color));
        for line in wrap_lines(origin, "  ", 80) {
            println!("{}", line);
        }
    }

    println!();
    println!("{}", progress_line(&entry.progress, now, use_color));
}

pub fn progress_line(progress: &ProgressRecord, now: DateTime<Utc>, use_color: bool) -> String {
    if !progress.is_learned {
        return paint("Not learned", Color::DIM, use_color);
    }

    let next = match progress.next_review_due_at {
        Some(due) if due <= now => paint("due now", Color::YELLOW, use_color),
        Some(due) => format!("next review in {}", format_interval(days_until(due, now))),
        None => "no review scheduled".to_string(),
    };
    format!(
        "{} (reviews: {}, {})",
        paint("Learned", Color::GREEN, use_color),
        progress.review_count,
        next
    )
}

/// Whole days until `due`, rounded up so "in 1d" never shows as "now".
pub fn days_until(due: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let minutes = (due - now).num_minutes();
    (minutes + 24 * 60 - 1).div_euclid(24 * 60)
}

/// Word / pronunciation / definition table.
pub fn print_idiom_table(idioms: &[Idiom]) {
    let word_w = idioms.iter().map(|i| display_width(&i.word)).max().unwrap_or(4).clamp(4, 16);
    let pron_w = idioms
        .iter()
        .map(|i| display_width(&i.pronunciation))
        .max()
        .unwrap_or(6)
        .clamp(6, 28);

    println!("{} {} {}", pad("Word", word_w), pad("Pinyin", pron_w), "Definition");
    println!(
        "{} {} {}",
        "\u{2500}".repeat(word_w),
        "\u{2500}".repeat(pron_w),
        "\u{2500}".repeat(30)
    );

    for idiom in idioms {
        println!(
            "{} {} {}",
            pad(&truncate(&idiom.word, word_w), word_w),
            pad(&truncate(&idiom.pronunciation, pron_w), pron_w),
            truncate(&idiom.definition, 40)
        );
    }
}

/// Terminal columns taken by `text`; CJK characters take two.
pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| if is_wide(c) { 2 } else { 1 }).sum()
}

fn is_wide(c: char) -> bool {
    matches!(c as u32,
        0x1100..=0x115F | 0x2E80..=0xA4CF | 0xAC00..=0xD7A3 | 0xF900..=0xFAFF
        | 0xFE30..=0xFE4F | 0xFF00..=0xFF60 | 0xFFE0..=0xFFE6 | 0x20000..=0x3FFFD)
}

/// Pad to `width` display columns.
pub fn pad(text: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(text));
    format!("{}{}", text, " ".repeat(fill))
}

/// Cut to at most `width` display columns, marking the cut with "...".
pub fn truncate(text: &str, width: usize) -> String {
    if display_width(text) <= width {
        return text.to_string();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = if is_wide(c) { 2 } else { 1 };
        if used + w > width.saturating_sub(3) {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push_str("...");
    out
}

/// Wrapping for terminal output. Breaks on whitespace, or anywhere in
/// text without spaces.
pub fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len()).max(1);

    for line in text.lines() {
        let mut current_line = String::new();
        let mut current_w = 0;
        for c in line.chars() {
            let w = if is_wide(c) { 2 } else { 1 };
            if current_w + w > effective_width {
                lines.push(format!("{}{}", prefix, current_line.trim_end()));
                current_line.clear();
                current_w = 0;
                if c.is_whitespace() {
                    continue;
                }
            }
            current_line.push(c);
            current_w += w;
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}
