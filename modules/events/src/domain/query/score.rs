//! Rank-key computation for the search and relevance strategies. Pure
//! functions, no failure modes.

use std::collections::HashSet;

use crate::contract::Tag;

/// Case-insensitive Levenshtein distance: unit cost for insert, delete
/// and substitute, zero when characters match.
pub fn edit_distance(a: &str, b: &str) -> u64 {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();

    // Row-by-row DP over the (|a|+1) x (|b|+1) table.
    let mut prev: Vec<u64> = (0..=b.len() as u64).collect();
    let mut curr: Vec<u64> = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i as u64 + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitute = prev[j] + u64::from(ca != cb);
            let delete = prev[j + 1] + 1;
            let insert = curr[j] + 1;
            curr[j + 1] = substitute.min(delete).min(insert);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Size of the set intersection of the two tag collections. Duplicates
/// collapse; order is irrelevant.
pub fn tag_overlap(candidate: &[Tag], query: &[Tag]) -> u64 {
    let candidate: HashSet<Tag> = candidate.iter().copied().collect();
    let query: HashSet<Tag> = query.iter().copied().collect();
    candidate.intersection(&query).count() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_of_identical_strings_is_zero() {
        for s in ["", "a", "Rust Meetup", "ROBOTICS workshop"] {
            assert_eq!(edit_distance(s, s), 0);
        }
    }

    #[test]
    fn distance_is_case_insensitive() {
        assert_eq!(edit_distance("HackNight", "hacknight"), 0);
    }

    #[test]
    fn distance_counts_single_edits() {
        assert_eq!(edit_distance("kitten", "sitten"), 1); // substitute
        assert_eq!(edit_distance("kitten", "kitte"), 1); // delete
        assert_eq!(edit_distance("kitten", "kittens"), 1); // insert
        assert_eq!(edit_distance("kitten", "sitting"), 3);
    }

    #[test]
    fn distance_against_empty_is_length() {
        assert_eq!(edit_distance("", "abcde"), 5);
        assert_eq!(edit_distance("abcde", ""), 5);
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [("flaw", "lawn"), ("intention", "execution"), ("", "x")];
        for (a, b) in pairs {
            assert_eq!(edit_distance(a, b), edit_distance(b, a));
        }
    }

    #[test]
    fn distance_satisfies_triangle_inequality() {
        let words = ["event", "evening", "venting", "invent"];
        for a in words {
            for b in words {
                for c in words {
                    assert!(edit_distance(a, c) <= edit_distance(a, b) + edit_distance(b, c));
                }
            }
        }
    }

    #[test]
    fn overlap_counts_shared_tags() {
        let a = [Tag::Robotics, Tag::WebApps, Tag::Databases];
        let b = [Tag::WebApps, Tag::Databases, Tag::Networks];
        assert_eq!(tag_overlap(&a, &b), 2);
    }

    #[test]
    fn overlap_is_symmetric_and_bounded() {
        let a = [Tag::Robotics, Tag::WebApps];
        let b = [Tag::WebApps, Tag::Networks, Tag::Databases];
        assert_eq!(tag_overlap(&a, &b), tag_overlap(&b, &a));
        assert!(tag_overlap(&a, &b) <= a.len().min(b.len()) as u64);
        assert_eq!(tag_overlap(&a, &[]), 0);
    }

    #[test]
    fn overlap_collapses_duplicates() {
        let a = [Tag::Robotics, Tag::Robotics, Tag::Robotics];
        let b = [Tag::Robotics];
        assert_eq!(tag_overlap(&a, &b), 1);
    }
}
