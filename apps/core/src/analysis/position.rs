//! Position ranking.
//!
//! Orders every tracked brand that occurs in a response by the offset of its
//! first occurrence. Ties on the same offset keep input order (stable sort),
//! so "Apple" listed before "Apple Music" outranks it when both start at the
//! same character.

use super::mentions::first_occurrence;

/// A tracked brand found in a response, with its 1-based rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedBrand {
    pub name: String,
    pub offset: usize,
    pub rank: u32,
}

/// Rank all `names` present in `text`.
///
/// Names are compared case-insensitively; repeated names keep only their
/// first entry so ranks stay unique and contiguous.
pub fn rank_brands(text: &str, names: &[String]) -> Vec<RankedBrand> {
    let mut seen: Vec<String> = Vec::with_capacity(names.len());
    let mut found: Vec<(String, usize)> = Vec::new();

    for name in names {
        let key = name.trim().to_lowercase();
        if key.is_empty() || seen.contains(&key) {
            continue;
        }
        seen.push(key);
        if let Some(span) = first_occurrence(text, name) {
            found.push((name.clone(), span.start));
        }
    }

    // Vec::sort_by_key is stable: equal offsets stay in input order.
    found.sort_by_key(|(_, offset)| *offset);

    found
        .into_iter()
        .enumerate()
        .map(|(i, (name, offset))| RankedBrand {
            name,
            offset,
            rank: i as u32 + 1,
        })
        .collect()
}

/// 1-based rank of `brand` among `names` in `text`, or `None` when absent.
///
/// `brand` is ranked even if the caller left it out of `names`.
pub fn rank_of(text: &str, brand: &str, names: &[String]) -> Option<u32> {
    let key = brand.trim().to_lowercase();
    if key.is_empty() {
        return None;
    }

    let mut all: Vec<String> = names.to_vec();
    if !all.iter().any(|n| n.trim().to_lowercase() == key) {
        all.push(brand.to_string());
    }

    rank_brands(text, &all)
        .into_iter()
        .find(|r| r.name.trim().to_lowercase() == key)
        .map(|r| r.rank)
}
