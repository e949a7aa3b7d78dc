use std::fmt;
use std::ops::RangeInclusive;

/// A set of characters, stored as sorted inclusive ranges.
///
/// # Invariant
///
/// Ranges are non-empty, sorted, and neither overlap nor touch; two ranges
/// separated only by the surrogate gap are also merged.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct CharSet {
    ranges: Vec<(char, char)>,
}

impl CharSet {
    pub fn empty() -> CharSet {
        CharSet::default()
    }

    /// Every Unicode scalar value.
    pub fn any() -> CharSet {
        CharSet { ranges: vec![('\0', char::MAX)] }
    }

    pub fn singleton(character: char) -> CharSet {
        CharSet { ranges: vec![(character, character)] }
    }

    pub fn range(low: char, high: char) -> CharSet {
        if low > high {
            return CharSet::empty();
        }
        CharSet { ranges: vec![(low, high)] }
    }

    pub fn from_chars(characters: impl IntoIterator<Item = char>) -> CharSet {
        let ranges = characters.into_iter().map(|c| (c, c)).collect();
        CharSet::normalise(ranges)
    }

    fn normalise(mut ranges: Vec<(char, char)>) -> CharSet {
        ranges.sort_unstable();
        let mut merged: Vec<(char, char)> = Vec::with_capacity(ranges.len());
        for (low, high) in ranges {
            if let Some((_, last)) = merged.last_mut() {
                let touches = successor(*last).map_or(true, |next| low <= next);
                if touches {
                    *last = high.max(*last);
                    continue;
                }
            }
            merged.push((low, high));
        }
        CharSet { ranges: merged }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn contains(&self, character: char) -> bool {
        self.ranges
            .binary_search_by(|&(low, high)| {
                if high < character {
                    std::cmp::Ordering::Less
                } else if low > character {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    pub fn ranges(&self) -> impl Iterator<Item = RangeInclusive<char>> + '_ {
        self.ranges.iter().map(|&(low, high)| low..=high)
    }

    #[must_use]
    pub fn union(&self, other: &CharSet) -> CharSet {
        let ranges = self.ranges.iter().chain(&other.ranges).copied().collect();
        CharSet::normalise(ranges)
    }

    #[must_use]
    pub fn complement(&self) -> CharSet {
        let mut ranges = vec![];
        let mut next = Some('\0');
        for &(low, high) in &self.ranges {
            if let Some(start) = next {
                if start < low {
                    if let Some(end) = predecessor(low) {
                        ranges.push((start, end));
                    }
                }
            }
            next = successor(high);
        }
        if let Some(start) = next {
            ranges.push((start, char::MAX));
        }
        CharSet { ranges }
    }

    #[must_use]
    pub fn intersection(&self, other: &CharSet) -> CharSet {
        self.complement().union(&other.complement()).complement()
    }

    #[must_use]
    pub fn difference(&self, other: &CharSet) -> CharSet {
        self.intersection(&other.complement())
    }
}

fn successor(character: char) -> Option<char> {
    match character {
        '\u{D7FF}' => Some('\u{E000}'),
        c => char::from_u32(c as u32 + 1),
    }
}

fn predecessor(character: char) -> Option<char> {
    match character {
        '\0' => None,
        '\u{E000}' => Some('\u{D7FF}'),
        c => char::from_u32(c as u32 - 1),
    }
}

impl FromIterator<char> for CharSet {
    fn from_iter<T: IntoIterator<Item = char>>(iter: T) -> CharSet {
        CharSet::from_chars(iter)
    }
}

impl fmt::Display for CharSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ranges.as_slice() {
            [('\0', char::MAX)] => f.write_str("."),
            [(low, high)] if low == high && low.is_alphanumeric() => write!(f, "{low}"),
            ranges => {
                f.write_str("[")?;
                for (low, high) in ranges {
                    if low == high {
                        write!(f, "{}", low.escape_debug())?;
                    } else {
                        write!(f, "{}-{}", low.escape_debug(), high.escape_debug())?;
                    }
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_and_contains() {
        let set = CharSet::range('a', 'z');
        assert!(set.contains('a'));
        assert!(set.contains('m'));
        assert!(set.contains('z'));
        assert!(!set.contains('A'));
        assert!(CharSet::range('z', 'a').is_empty());
    }

    #[test]
    fn ranges_are_sorted_and_merged() {
        let set = CharSet::from_chars("zyx_a".chars()).union(&CharSet::range('b', 'c'));
        let ranges: Vec<_> = set.ranges().collect();
        assert_eq!(ranges, ['_'..='_', 'a'..='c', 'x'..='z']);
    }

    #[test]
    fn union_merges_adjacent() {
        let set = CharSet::range('a', 'f').union(&CharSet::range('g', 'k'));
        assert_eq!(set, CharSet::range('a', 'k'));
        let set = CharSet::from_chars("cab".chars());
        assert_eq!(set, CharSet::range('a', 'c'));
    }

    #[test]
    fn union_merges_across_surrogates() {
        let set = CharSet::singleton('\u{D7FF}').union(&CharSet::singleton('\u{E000}'));
        assert_eq!(set, CharSet::range('\u{D7FF}', '\u{E000}'));
    }

    #[test]
    fn complement() {
        assert_eq!(CharSet::empty().complement(), CharSet::any());
        assert_eq!(CharSet::any().complement(), CharSet::empty());
        let digits = CharSet::range('0', '9');
        let others = digits.complement();
        assert!(!others.contains('5'));
        assert!(others.contains('\0'));
        assert!(others.contains('a'));
        assert!(others.contains(char::MAX));
        assert_eq!(others.complement(), digits);
    }

    #[test]
    fn intersection_and_difference() {
        let letters = CharSet::range('a', 'z');
        let hex = CharSet::range('0', '9').union(&CharSet::range('a', 'f'));
        assert_eq!(letters.intersection(&hex), CharSet::range('a', 'f'));
        assert_eq!(letters.difference(&hex), CharSet::range('g', 'z'));
    }

    #[test]
    fn display() {
        let set = CharSet::range('0', '9').union(&CharSet::singleton('_'));
        insta::assert_snapshot!(set, @"[0-9_]");
        insta::assert_snapshot!(CharSet::singleton('x'), @"x");
        insta::assert_snapshot!(CharSet::singleton('\n'), @r"[\n]");
        insta::assert_snapshot!(CharSet::any(), @".");
    }
}
