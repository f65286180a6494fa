//! Bilingual stop-word filtering for keyword ranking.
//!
//! Student questions mix Chinese and English freely, so the filter combines:
//! - Chinese function words: particles, pronouns, question words, measure
//!   words, directionals
//! - English function words: articles, auxiliaries, prepositions, pronouns,
//!   question words, quantifiers
//!
//! The set is fixed at compile time and identical for both tokenization
//! modes. Matching is exact: tokens are compared as segmented, with no case
//! folding, so an uppercased "The" passes through while "the" is filtered.

use std::collections::HashSet;

use once_cell::sync::Lazy;

/// Shared instance built once on first use.
static SHARED: Lazy<Stopwords> = Lazy::new(Stopwords::new);

/// A stop-word filter over the fixed bilingual word set.
///
/// Uses a `HashSet` for O(1) lookup. Entries are static; the filter is not
/// configurable at runtime.
#[derive(Clone)]
pub struct Stopwords {
    /// Every filtered word, Chinese and English combined.
    words: HashSet<&'static str>,
}

impl Default for Stopwords {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwords {
    /// Builds the filter from the static Chinese and English tables.
    pub fn new() -> Self {
        let mut words: HashSet<&'static str> = HashSet::new();
        words.extend(CHINESE_FUNCTION_WORDS);
        words.extend(ENGLISH_FUNCTION_WORDS);
        Self { words }
    }

    /// Returns the process-wide shared filter.
    pub fn shared() -> &'static Self {
        &SHARED
    }

    /// Checks whether a token is a stop word. Exact match, case-sensitive.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    /// Returns the total number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if no stop words are configured.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Checks a token against the shared filter.
pub fn is_stopword(token: &str) -> bool {
    Stopwords::shared().contains(token)
}

/// Chinese function words.
///
/// Particles and pronouns, connectives, question words and modals, then
/// directionals and aspect markers.
static CHINESE_FUNCTION_WORDS: &[&str] = &[
    "的", "了", "是", "我", "你", "他", "她", "它", "们", "在", "有", "就", "都", "而", "及",
    "与", "也", "之", "于", "和", "或", "吗", "呢", "啊", "吧", "呀", "哦", "嗯", "哈", "哎",
    "喂", "这", "那", "此", "彼", "个", "只", "本", "该", "每", "各", "何", "孰", "安", "焉",
    "乃", "则", "因", "为", "所以", "如果", "那么", "但是", "不过", "而且", "于是", "因此",
    "然后", "怎么", "什么", "为何", "为什么", "怎么样", "如何", "哪里", "哪儿", "多少", "几",
    "是否", "能否", "可以", "应该", "需要", "要", "会", "能", "让", "把", "被", "给", "对",
    "向", "上", "下", "左", "右", "前", "后", "里", "外", "中", "间", "内", "旁", "又", "还",
    "再", "才", "刚", "已", "曾", "将", "过", "着", "得", "地", "所", "者", "矣", "乎", "哉",
];

/// English function words.
///
/// Articles and auxiliaries, then prepositions, pronouns, question words and
/// quantifiers. Lowercase only; matching does not fold case.
static ENGLISH_FUNCTION_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "not", "no", "yes", "is", "are", "was", "were", "be",
    "been", "am", "do", "does", "did", "have", "has", "had", "will", "would", "shall", "should",
    "can", "could", "may", "might", "must", "need", "want", "like", "go", "get", "make", "take",
    "give", "use", "in", "on", "at", "to", "for", "of", "by", "with", "about", "from", "into",
    "up", "down", "left", "right", "front", "back", "here", "there", "this", "that", "these",
    "those", "it", "he", "she", "we", "us", "you", "me", "him", "her", "they", "them", "my",
    "your", "his", "our", "their", "i", "what", "why", "how", "when", "where", "which", "who",
    "whom", "whose", "all", "any", "some", "many", "much", "few", "little", "more", "most",
    "less",
];
