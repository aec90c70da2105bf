use std::collections::BTreeSet;

use super::domain::Category;

/// Keyword table matched by substring containment. Order is irrelevant because
/// every matching keyword contributes its category.
const KEYWORDS: &[(&str, Category)] = &[
    ("국어", Category::Korean),
    ("문학", Category::Korean),
    ("독서", Category::Korean),
    ("화법", Category::Korean),
    ("작문", Category::Korean),
    ("언어와 매체", Category::Korean),
    ("수학", Category::Math),
    ("미적분", Category::Math),
    ("확률과 통계", Category::Math),
    ("기하", Category::Math),
    ("영어", Category::English),
    ("영미", Category::English),
    ("사회", Category::Social),
    ("한국사", Category::History),
    ("한국사", Category::Social),
    ("역사", Category::History),
    ("세계사", Category::History),
    ("동아시아사", Category::History),
    ("지리", Category::Social),
    ("윤리", Category::Social),
    ("정치", Category::Social),
    ("경제", Category::Social),
    ("과학", Category::Science),
    ("물리", Category::Science),
    ("화학", Category::Science),
    ("생명", Category::Science),
    ("기술", Category::TechHome),
    ("가정", Category::TechHome),
    ("정보", Category::TechHome),
    ("제2외국어", Category::SecondLanguage),
    ("한문", Category::SecondLanguage),
    ("음악", Category::Arts),
    ("미술", Category::Arts),
    ("예술", Category::Arts),
    ("체육", Category::PhysicalEducation),
    ("Korean", Category::Korean),
    ("Math", Category::Math),
    ("English", Category::English),
    ("Social", Category::Social),
    ("Science", Category::Science),
    ("History", Category::History),
];

/// Generic subject-type keywords that English electives share with Korean ones.
const SHARED_KOREAN_KEYWORDS: &[&str] = &["문학", "독서", "화법", "작문"];

/// Label markers that place a subject in the English curriculum.
const ENGLISH_MARKERS: &[&str] = &["영어", "영미"];

fn keyword_hits(label: &str, keyword: &str, category: Category) -> bool {
    if !label.contains(keyword) {
        return false;
    }
    !(category == Category::Korean
        && SHARED_KOREAN_KEYWORDS.contains(&keyword)
        && ENGLISH_MARKERS.iter().any(|marker| label.contains(marker)))
}

/// Map a free-text subject or group label to the categories it counts toward.
///
/// Matching is case-sensitive substring containment. A label without any
/// matching keyword yields an empty set and is excluded from every
/// category-based aggregation. English-marked labels such as `영어 독해와 작문`
/// never pick up Korean through the shared keywords.
pub fn classify(label: &str) -> BTreeSet<Category> {
    KEYWORDS
        .iter()
        .filter(|(keyword, category)| keyword_hits(label, keyword, *category))
        .map(|(_, category)| *category)
        .collect()
}

/// True when the label classifies into at least one of `categories`.
pub fn matches_any(label: &str, categories: &BTreeSet<Category>) -> bool {
    KEYWORDS.iter().any(|(keyword, category)| {
        categories.contains(category) && keyword_hits(label, keyword, *category)
    })
}

/// True when the label classifies into `category`.
pub fn matches(label: &str, category: Category) -> bool {
    KEYWORDS.iter().any(|(keyword, candidate)| {
        *candidate == category && keyword_hits(label, keyword, category)
    })
}
