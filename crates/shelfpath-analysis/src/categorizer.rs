//! Keyword-based subject categorization of titles
//!
//! Circulation logs carry titles, not subjects. [`SubjectCategorizer`] maps a
//! title onto a subject category with a prioritized keyword table:
//!
//! - The title is lowercased and tested for each keyword as a substring.
//! - Categories are tried in priority order; the first category with any
//!   matching keyword wins.
//! - A missing or blank title maps to [`Subject::UNKNOWN`].
//! - A title matching no keyword maps to [`Subject::OTHER`].
//!
//! The categorizer is a pure function of its table and the title.
//!
//! # Examples
//!
//! ```
//! use shelfpath_analysis::categorizer::SubjectCategorizer;
//!
//! let categorizer = SubjectCategorizer::default();
//! assert_eq!(categorizer.categorize(Some("Programming in Python")).as_str(), "Computer Science & Programming");
//! assert_eq!(categorizer.categorize(Some("Engineering Mathematics II")).as_str(), "Mathematics");
//! assert_eq!(categorizer.categorize(Some("Wings of Fire")).as_str(), "Other");
//! assert_eq!(categorizer.categorize(None).as_str(), "Unknown");
//! ```

use crate::record::Subject;

/// A subject category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub subject: Subject,
    /// Lowercase keywords matched as substrings of the lowercased title
    pub keywords: Vec<String>,
}

impl Category {
    #[must_use]
    pub fn new<I, S>(subject: impl Into<Subject>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            subject: subject.into(),
            keywords: keywords
                .into_iter()
                .map(|k| k.as_ref().to_lowercase())
                .collect(),
        }
    }

    fn matches(&self, lowercase_title: &str) -> bool {
        self.keywords
            .iter()
            .any(|keyword| lowercase_title.contains(keyword.as_str()))
    }
}

/// Maps titles onto subject categories by prioritized keyword matching.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubjectCategorizer {
    categories: Vec<Category>,
}

impl SubjectCategorizer {
    /// Creates a categorizer trying `categories` in the given order.
    #[must_use]
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// Returns the subject of `title`.
    #[must_use]
    pub fn categorize(&self, title: Option<&str>) -> Subject {
        let Some(title) = title.map(str::trim).filter(|t| !t.is_empty()) else {
            return Subject::new(Subject::UNKNOWN);
        };
        let title = title.to_lowercase();
        self.categories
            .iter()
            .find(|category| category.matches(&title))
            .map_or_else(|| Subject::new(Subject::OTHER), |c| c.subject.clone())
    }
}

impl Default for SubjectCategorizer {
    /// The academic-library taxonomy used for engineering college circulation logs.
    fn default() -> Self {
        Self::new(vec![
            Category::new(
                "Computer Science & Programming",
                [
                    "programming",
                    "python",
                    "c++",
                    "java",
                    "computer",
                    "data structure",
                    "algorithm",
                    "database",
                    "software",
                    "network",
                    "digital",
                    "operating system",
                    "ai",
                    "machine learning",
                    "artificial intelligence",
                ],
            ),
            Category::new(
                "Mathematics",
                [
                    "mathematics",
                    "calculus",
                    "algebra",
                    "linear",
                    "statistic",
                    "discrete",
                    "engineering mathematics",
                    "laplace",
                    "differential",
                ],
            ),
            Category::new(
                "Engineering",
                [
                    "engineering",
                    "mechanical",
                    "electrical",
                    "civil",
                    "electronic",
                    "circuit",
                    "machine element",
                    "manufacturing",
                    "fluid",
                    "thermodynamics",
                    "cad",
                    "cam",
                    "control system",
                    "hydraulic",
                    "drawing",
                ],
            ),
            Category::new("Physics", ["physics", "optics", "semiconductor", "mechanics"]),
            Category::new("Chemistry", ["chemistry", "organic", "engineering chemistry"]),
            Category::new(
                "Biology & Biotechnology",
                [
                    "biology",
                    "biotechnology",
                    "microbiology",
                    "biochemistry",
                    "immunology",
                ],
            ),
            Category::new(
                "Management & Business",
                [
                    "management",
                    "business",
                    "analytics",
                    "entrepreneurship",
                    "economics",
                    "project management",
                    "marketing",
                    "sales",
                ],
            ),
            Category::new(
                "Constitution & Ethics",
                ["constitution", "ethics", "human rights", "professional ethics"],
            ),
            Category::new(
                "Design & Architecture",
                [
                    "design",
                    "architecture",
                    "drawing",
                    "planning",
                    "town planning",
                    "urban",
                    "buildings",
                ],
            ),
            Category::new(
                "Communication Skills",
                ["communication", "language", "english", "kannada", "kali"],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_and_blank_titles() {
        let categorizer = SubjectCategorizer::default();
        assert_eq!(categorizer.categorize(None).as_str(), Subject::UNKNOWN);
        assert_eq!(categorizer.categorize(Some("")).as_str(), Subject::UNKNOWN);
        assert_eq!(categorizer.categorize(Some("   ")).as_str(), Subject::UNKNOWN);
    }

    #[test]
    fn test_case_insensitive() {
        let categorizer = SubjectCategorizer::default();
        assert_eq!(
            categorizer.categorize(Some("ORGANIC CHEMISTRY")).as_str(),
            "Chemistry"
        );
        assert_eq!(
            categorizer.categorize(Some("Principles of Marketing")).as_str(),
            "Management & Business"
        );
    }

    #[test]
    fn test_first_category_wins() {
        let categorizer = SubjectCategorizer::default();
        // "engineering chemistry" also matches Engineering, which is tried first
        assert_eq!(
            categorizer.categorize(Some("Engineering Chemistry")).as_str(),
            "Engineering"
        );
        // "drawing" appears in both Engineering and Design & Architecture
        assert_eq!(
            categorizer.categorize(Some("Building Drawing")).as_str(),
            "Engineering"
        );
    }

    #[test]
    fn test_substring_match() {
        let categorizer = SubjectCategorizer::default();
        // "ai" matches inside words, as the keyword table intends
        assert_eq!(
            categorizer.categorize(Some("Maintenance Handbook")).as_str(),
            "Computer Science & Programming"
        );
    }

    #[test]
    fn test_custom_taxonomy() {
        let categorizer = SubjectCategorizer::new(vec![
            Category::new("Fiction", ["Novel", "Stories"]),
            Category::new("Poetry", ["poems"]),
        ]);
        assert_eq!(categorizer.categorize(Some("Collected Poems")).as_str(), "Poetry");
        assert_eq!(categorizer.categorize(Some("A novel")).as_str(), "Fiction");
        assert_eq!(categorizer.categorize(Some("Atlas")).as_str(), Subject::OTHER);
        // both categories match; the first one listed wins
        assert_eq!(
            categorizer.categorize(Some("Poems and Stories")).as_str(),
            "Fiction"
        );
    }
}
