use std::sync::LazyLock;

use regex::Regex;

/// Marker appended when text had to be cut without a natural break.
pub const ELLIPSIS: &str = "…";

/// Break characters in preference order: sentence ends before clause ends.
const BREAK_PUNCTUATION: [char; 8] = ['。', '！', '？', '；', '，', '、', ',', '.'];

static DATE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}年\d+月\d+日\s*[-·]\s*").expect("date prefix pattern"));
static RELATIVE_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\d+\s*[天小时分钟月年]+前\s*[-·]\s*").expect("relative prefix pattern")
});
static TRAILING_TAGS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([_|][^_|。！？，\n]+)+$").expect("trailing tags pattern"));
static TRAILING_SOURCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s*[-–—]\s*[\x{4e00}-\x{9fa5}a-zA-Z]{2,10}$").expect("trailing source pattern")
});
static TRAILING_ELLIPSIS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\.{3,}|…+)$").expect("trailing ellipsis pattern"));

fn is_separator(c: char) -> bool {
    matches!(c, '_' | '|' | '…' | ' ' | '\t')
}

/// Strips search-result boilerplate from `text`: leading dates or relative
/// times, trailing `_tag`/`|tag` chains, a trailing `- source` and trailing
/// ellipses.
pub fn strip_boilerplate(text: &str) -> String {
    let text = text.trim();
    let text = DATE_PREFIX.replace(text, "");
    let text = RELATIVE_PREFIX.replace(&text, "");
    let text = TRAILING_TAGS.replace(&text, "");
    let text = TRAILING_SOURCE.replace(&text, "");
    let text = TRAILING_ELLIPSIS.replace(&text, "");
    text.trim_matches(is_separator).to_string()
}

/// Cleans `text` and bounds it to `max_len` characters.
///
/// Over-long text is cut after the preferred punctuation mark when one
/// occurs past the first third of the budget; otherwise it is hard-cut and
/// suffixed with [`ELLIPSIS`]. Returns an empty string when nothing is left
/// after cleanup so callers can substitute their own fallback.
pub fn smart_summary(text: &str, max_len: usize) -> String {
    let cleaned = strip_boilerplate(text);
    let chars: Vec<char> = cleaned.chars().collect();
    if chars.len() <= max_len {
        return cleaned;
    }

    let window = &chars[..max_len];
    for punct in BREAK_PUNCTUATION {
        if let Some(idx) = window.iter().rposition(|c| *c == punct) {
            if idx > max_len / 3 {
                return window[..=idx].iter().collect();
            }
        }
    }

    let mut truncated: String = window.iter().collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// First `max_chars` characters of `text`, marked with [`ELLIPSIS`] when
/// anything was dropped.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

/// First `max_chars` characters of `text`, without a marker.
pub fn take_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_date_prefix_and_tag_chain() {
        assert_eq!(
            smart_summary("2025年3月2日 - 老铺黄金涨价通知_品牌_市场", 50),
            "老铺黄金涨价通知"
        );
    }

    #[test]
    fn strips_relative_time_prefix() {
        assert_eq!(smart_summary("6天前 - 老铺黄金排队", 50), "老铺黄金排队");
        assert_eq!(smart_summary("3 小时前 · 金价走高", 50), "金价走高");
    }

    #[test]
    fn strips_pipe_tag_and_dash_source() {
        assert_eq!(smart_summary("老铺黄金再度提价|腾讯新闻", 50), "老铺黄金再度提价");
        assert_eq!(smart_summary("老铺黄金再度提价 - 今日头条", 50), "老铺黄金再度提价");
    }

    #[test]
    fn strips_trailing_ellipsis() {
        assert_eq!(smart_summary("金价大涨...", 50), "金价大涨");
        assert_eq!(smart_summary("金价大涨……", 50), "金价大涨");
    }

    #[test]
    fn empty_after_cleanup() {
        assert_eq!(smart_summary("", 50), "");
        assert_eq!(smart_summary(" _|… ", 50), "");
    }

    #[test]
    fn cuts_at_clause_punctuation() {
        let text = format!("{}，{}", "老".repeat(30), "铺".repeat(29));
        let summary = smart_summary(&text, 50);
        assert_eq!(summary, format!("{}，", "老".repeat(30)));
    }

    #[test]
    fn prefers_sentence_end_over_later_comma() {
        let text = format!("{}。{}，{}", "金".repeat(20), "价".repeat(10), "涨".repeat(30));
        assert_eq!(smart_summary(&text, 50), format!("{}。", "金".repeat(20)));
    }

    #[test]
    fn hard_cuts_when_punctuation_is_too_early() {
        let text = format!("老老，{}", "铺".repeat(57));
        let summary = smart_summary(&text, 50);
        assert_eq!(summary.chars().count(), 51);
        assert!(summary.ends_with(ELLIPSIS));
    }

    #[test]
    fn short_text_is_kept() {
        assert_eq!(smart_summary("  古法金手镯  ", 50), "古法金手镯");
    }

    #[test]
    fn truncates_by_characters() {
        assert_eq!(truncate_chars("老铺黄金", 2), "老铺…");
        assert_eq!(truncate_chars("老铺", 2), "老铺");
        assert_eq!(take_chars("老铺黄金", 3), "老铺黄");
    }
}
