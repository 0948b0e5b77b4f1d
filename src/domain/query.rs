use regex::Regex;
use std::sync::OnceLock;

use crate::domain::model::Gender;

/// Tried in order; the last one accepts any standalone number
const AGE_PATTERNS: &[&str] = &[
    r"(\d+)[-\s]year[-\s]old",
    r"age[-\s](\d+)",
    r"aged[-\s](\d+)",
    r"(\d+)[-\s]years[-\s]old",
    r"\b(\d+)\b",
];

const MIN_QUERY_AGE: i64 = 1;
const MAX_QUERY_AGE: i64 = 120;

fn age_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        AGE_PATTERNS
            .iter()
            .map(|pattern| Regex::new(pattern).expect("static regex"))
            .collect()
    })
}

fn gender_patterns() -> &'static (Regex, Regex) {
    static PATTERNS: OnceLock<(Regex, Regex)> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        (
            Regex::new(r"\b(female|females|woman|women|girl|girls)\b").expect("static regex"),
            Regex::new(r"\b(male|males|man|men|boy|boys)\b").expect("static regex"),
        )
    })
}

/// Pull an age out of free text, e.g. "requirements for a 30-year-old male"
pub fn extract_age(query: &str) -> Option<i64> {
    let query = query.to_lowercase();

    for pattern in age_patterns() {
        let Some(captures) = pattern.captures(&query) else {
            continue;
        };
        let Some(age) = captures.get(1).and_then(|m| m.as_str().parse::<i64>().ok()) else {
            continue;
        };
        if (MIN_QUERY_AGE..=MAX_QUERY_AGE).contains(&age) {
            return Some(age);
        }
    }

    None
}

/// Female keywords are checked first so "female" never resolves to male
pub fn extract_gender(query: &str) -> Option<Gender> {
    let query = query.to_lowercase();
    let (female, male) = gender_patterns();

    if female.is_match(&query) {
        Some(Gender::Female)
    } else if male.is_match(&query) {
        Some(Gender::Male)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("requirements for 30-year-old male", Some(30))]
    #[test_case("iron needs for female age 25", Some(25))]
    #[test_case("what should someone aged 70 eat", Some(70))]
    #[test_case("I am 45 years old", Some(45))]
    #[test_case("vitamins for 15", Some(15))]
    #[test_case("a 200-year-old tortoise", None)]
    #[test_case("vitamin d intake", None)]
    fn test_extract_age(query: &str, expected: Option<i64>) {
        assert_eq!(extract_age(query), expected);
    }

    #[test]
    fn test_out_of_range_pattern_falls_through() {
        // "age 0" matches first but is rejected; the "years old" pattern still applies
        assert_eq!(extract_age("age 0 but 35 years old"), Some(35));
    }

    #[test_case("30-year-old Male", Some(Gender::Male))]
    #[test_case("How much iron does a female need?", Some(Gender::Female))]
    #[test_case("iron for women", Some(Gender::Female))]
    #[test_case("teenage boy", Some(Gender::Male))]
    #[test_case("recommended calcium", None)]
    #[test_case("manganese intake", None)]
    fn test_extract_gender(query: &str, expected: Option<Gender>) {
        assert_eq!(extract_gender(query), expected);
    }
}
