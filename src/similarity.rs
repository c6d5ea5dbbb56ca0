//! Fuzzy text matching used to decide whether a guess is "close enough" to
//! the correct answer.

/// Minimum similarity for a guess to count as correct.
pub const CORRECT_GUESS_THRESHOLD: f64 = 0.80;

/// Normalized Levenshtein similarity in `[0, 1]`, case-insensitive.
///
/// `1.0` means identical (ignoring case), `0.0` means nothing in common.
/// Two empty strings are considered identical. Lengths are counted on the
/// lowercased text, which can differ from the typed text (`'İ'` lowercases
/// to two chars).
pub fn similarity(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    let longest = a.len().max(b.len());
    if longest == 0 {
        return 1.0;
    }

    (longest - edit_distance(&a, &b)) as f64 / longest as f64
}

/// Whether `guess` is similar enough to `answer` to earn the correct-guess bonus
pub fn is_correct_guess(guess: &str, answer: &str) -> bool {
    similarity(guess, answer) >= CORRECT_GUESS_THRESHOLD
}

/// Classic Levenshtein distance with a single rolling row
fn edit_distance(a: &[char], b: &[char]) -> usize {
    let mut costs: Vec<usize> = (0..=b.len()).collect();

    for (i, ca) in a.iter().enumerate() {
        let mut diagonal = costs[0];
        costs[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let above = costs[j + 1];
            costs[j + 1] = if ca == cb {
                diagonal
            } else {
                1 + diagonal.min(above).min(costs[j])
            };
            diagonal = above;
        }
    }

    costs[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_identical_strings() {
        assert!(approx(similarity("Paris", "Paris"), 1.0));
        assert!(approx(similarity("a much longer answer", "a much longer answer"), 1.0));
    }

    #[test]
    fn test_empty_strings() {
        assert!(approx(similarity("", ""), 1.0));
        assert!(approx(similarity("", "abc"), 0.0));
        assert!(approx(similarity("abc", ""), 0.0));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(approx(similarity("PARIS", "paris"), 1.0));
        assert!(approx(similarity("Ünïcode", "üNÏCODE"), 1.0));
    }

    #[test]
    fn test_lowercasing_can_change_length() {
        // 'İ' lowercases to 'i' plus a combining dot
        assert_eq!("İ".to_lowercase().chars().count(), 2);
        assert!(approx(similarity("İ", "İ"), 1.0));
        assert!(approx(similarity("İ", "i"), 0.5));
        assert!(approx(similarity("İstanbul", "istanbul"), 8.0 / 9.0));
        assert!(is_correct_guess("İstanbul", "istanbul"));
    }

    #[test]
    fn test_known_distances() {
        assert_eq!(edit_distance(&['k', 'i', 't', 't', 'e', 'n'], &['s', 'i', 't', 't', 'i', 'n', 'g']), 3);
        let flaw: Vec<char> = "flaw".chars().collect();
        let lawn: Vec<char> = "lawn".chars().collect();
        assert_eq!(edit_distance(&flaw, &lawn), 2);

        // kitten -> sitting: (7 - 3) / 7
        assert!(approx(similarity("kitten", "sitting"), 4.0 / 7.0));
    }

    #[test]
    fn test_symmetric() {
        let pairs = [
            ("Lyon", "Paris"),
            ("the moon", "moon"),
            ("", "x"),
            ("abcdef", "azced"),
        ];
        for (a, b) in pairs {
            assert!(approx(similarity(a, b), similarity(b, a)), "{a} vs {b}");
        }
    }

    #[test]
    fn test_result_in_unit_range() {
        for (a, b) in [("a", "bcdefg"), ("xyz", "xyz!"), ("", "")] {
            let s = similarity(a, b);
            assert!((0.0..=1.0).contains(&s));
        }
    }

    #[test]
    fn test_correct_guess_threshold() {
        // One typo in a ten letter word is 0.9
        assert!(is_correct_guess("washingtom", "Washington"));
        // Exactly 0.8 still counts
        assert!(is_correct_guess("abcdx", "abcde"));
        assert!(!is_correct_guess("Lyon", "Paris"));
        assert!(!is_correct_guess("abcxy", "abcde"));
    }
}
