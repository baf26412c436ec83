//! Keyword and pattern heuristics over raw evidence text.
//!
//! Matching is plain substring containment over Unicode text. There is no
//! tokenization, which suits CJK observations where words are not
//! space-delimited. Keyword counting goes through [`KeywordCounter`] so the
//! scorer can be handed a tokenizer-backed implementation later without
//! changing its structure.

use once_cell::sync::Lazy;
use regex::Regex;

/// Causal and sequential connectives that signal a reasoned evidence chain
pub const CONNECTIVE_KEYWORDS: &[&str] = &[
    "因为", "因此", "所以", "于是", "然后", "接着", "最后", "先", "再", "同时",
];

/// Teaching-strategy vocabulary
pub const STRATEGY_KEYWORDS: &[&str] = &[
    "引导", "鼓励", "支持", "提供", "安排", "示范", "共创", "计划", "调整", "合作", "策略",
    "反馈",
];

/// Observation-practice vocabulary
pub const OBSERVATION_KEYWORDS: &[&str] = &["观察", "记录", "追问", "倾听", "讨论", "反思", "分析"];

/// The five developmental domains and their representative substrings
pub const DOMAIN_KEYWORDS: &[(&str, &[&str])] = &[
    ("健康", &["跑", "跳", "力量", "平衡", "动作", "卫生", "饮食"]),
    ("语言", &["讲述", "倾听", "词汇", "表达", "阅读"]),
    ("社会", &["合作", "角色", "关心", "规则", "分享"]),
    ("科学", &["实验", "探究", "比较", "推理", "磁铁", "观察到"]),
    ("艺术", &["绘画", "节奏", "音乐", "表演", "造型"]),
];

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Strategy for counting keyword occurrences in a text
pub trait KeywordCounter: Send + Sync {
    /// Total occurrences of every keyword in `text`, summed over the set.
    /// Empty text and empty keywords count as zero.
    fn count_hits(&self, text: &str, keywords: &[&str]) -> usize;
}

/// Non-overlapping literal substring matches per keyword
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteralCounter;

impl KeywordCounter for LiteralCounter {
    fn count_hits(&self, text: &str, keywords: &[&str]) -> usize {
        if text.is_empty() {
            return 0;
        }
        keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| text.matches(keyword).count())
            .sum()
    }
}

/// Treats each keyword as a regular expression.
///
/// Patterns that fail to compile are matched literally instead, so a table
/// entry containing regex metacharacters never makes scoring fail.
#[derive(Debug, Clone, Copy, Default)]
pub struct RegexCounter;

impl KeywordCounter for RegexCounter {
    fn count_hits(&self, text: &str, keywords: &[&str]) -> usize {
        if text.is_empty() {
            return 0;
        }
        keywords
            .iter()
            .filter(|keyword| !keyword.is_empty())
            .map(|keyword| {
                let pattern = Regex::new(keyword)
                    .or_else(|_| Regex::new(&regex::escape(keyword)))
                    .ok();
                match pattern {
                    Some(re) => re.find_iter(text).filter(|m| m.start() != m.end()).count(),
                    None => text.matches(keyword).count(),
                }
            })
            .sum()
    }
}

/// Count keyword occurrences with the default literal strategy
pub fn count_keyword_hits(text: &str, keywords: &[&str]) -> usize {
    LiteralCounter.count_hits(text, keywords)
}

/// Domains whose representative substrings appear in `text`, in table order.
///
/// A domain is reported once no matter how many of its keywords matched.
pub fn detect_domains(text: &str) -> Vec<&'static str> {
    if text.is_empty() {
        return Vec::new();
    }
    DOMAIN_KEYWORDS
        .iter()
        .filter(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| !keyword.is_empty() && text.contains(keyword))
        })
        .map(|(domain, _)| *domain)
        .collect()
}

/// Rescale `value` from `[lower, upper]` to `[0, 1]`, clamped.
///
/// Returns 0 for a degenerate band.
pub fn normalize(value: f64, lower: f64, upper: f64) -> f64 {
    if upper == lower {
        return 0.0;
    }
    clamp((value - lower) / (upper - lower), 0.0, 1.0)
}

/// Clamp into `[min, max]`. NaN collapses to `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}

/// Clamp into the score range `[0, 100]`
pub fn clamp_score(value: f64) -> f64 {
    clamp(value, 0.0, 100.0)
}

/// Remove all whitespace so formatting-only edits compare equal
pub fn normalize_evidence_text(text: &str) -> String {
    WHITESPACE.replace_all(text, "").into_owned()
}

/// Join the non-empty parts with a single space
pub fn join_nonempty<S: AsRef<str>>(parts: &[S]) -> String {
    parts
        .iter()
        .map(AsRef::as_ref)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Length in Unicode scalar values
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}
