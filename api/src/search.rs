//! Client-side roster search. Pure functions over a fetched roster.

use crate::PlayerRecord;
use std::ops::Range;

/// Trim and lowercase a raw search string.
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// Substring predicate over `name`, `pos` and `nation`. `needle` must already
/// be normalized; missing fields count as empty strings.
pub fn matches(player: &PlayerRecord, needle: &str) -> bool {
    player.name.to_lowercase().contains(needle)
        || player.pos.as_deref().unwrap_or_default().to_lowercase().contains(needle)
        || player.nation.as_deref().unwrap_or_default().to_lowercase().contains(needle)
}

/// Positions into `roster` of every record matching `query`, in roster order.
/// An empty (after trimming) query selects every position.
pub fn filter_positions(roster: &[PlayerRecord], query: &str) -> Vec<usize> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return (0..roster.len()).collect();
    }
    roster
        .iter()
        .enumerate()
        .filter(|(_, p)| matches(p, &needle))
        .map(|(idx, _)| idx)
        .collect()
}

/// The filtered roster as an order-preserving subsequence of `roster`.
pub fn filter<'a>(roster: &'a [PlayerRecord], query: &str) -> Vec<&'a PlayerRecord> {
    filter_positions(roster, query)
        .into_iter()
        .map(|idx| &roster[idx])
        .collect()
}

/// Byte range of the first case-insensitive occurrence of `query` in `text`.
/// The whole of `text` is folded at once, as `matches` does, so a name that
/// passes the filter on its name field always has a range. Ranges fall on
/// char boundaries of `text`.
pub fn highlight(text: &str, query: &str) -> Option<Range<usize>> {
    let needle = normalize_query(query);
    if needle.is_empty() {
        return None;
    }

    let folded = text.to_lowercase();
    let at = folded.find(&needle)?;
    let end = at + needle.len();

    // (offset in text, offset in folded) at every char start, plus the end.
    let mut bounds = Vec::with_capacity(text.len() + 1);
    let mut folded_at = 0;
    for (idx, ch) in text.char_indices() {
        bounds.push((idx, folded_at));
        folded_at += ch.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    bounds.push((text.len(), folded_at));

    let start = bounds.iter().rev().find(|(_, f)| *f <= at)?.0;
    let stop = bounds.iter().find(|(_, f)| *f >= end).map_or(text.len(), |b| b.0);
    Some(start..stop)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(name: &str, pos: Option<&str>, nation: Option<&str>) -> PlayerRecord {
        PlayerRecord {
            name: name.into(),
            team: "Arsenal".into(),
            pos: pos.map(Into::into),
            nation: nation.map(Into::into),
            ..Default::default()
        }
    }

    fn roster() -> Vec<PlayerRecord> {
        vec![
            player("Kylian Mbappe", Some("FW"), Some("fr FRA")),
            player("Declan Rice", Some("MF"), Some("eng ENG")),
            player("William Saliba", Some("DF"), Some("fr FRA")),
            player("Mystery Man", None, None),
            player("David Raya", Some("GK"), Some("es ESP")),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let r = roster();
        let out = filter(&r, "");
        assert_eq!(out.len(), r.len());
        assert!(out.iter().zip(r.iter()).all(|(a, b)| *a == b));
        assert_eq!(filter(&r, "   ").len(), r.len());
        assert_eq!(filter(&[], "").len(), 0);
    }

    #[test]
    fn query_is_trimmed_and_case_insensitive() {
        let r = roster();
        let shouting = filter(&r, " MBAPPE ");
        let quiet = filter(&r, "mbappe");
        assert_eq!(shouting, quiet);
        assert_eq!(quiet.len(), 1);
        assert_eq!(quiet[0].name, "Kylian Mbappe");
    }

    #[test]
    fn matches_position_and_nation_fields() {
        let r = roster();
        let by_pos: Vec<_> = filter(&r, "gk").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(by_pos, vec!["David Raya"]);

        let by_nation: Vec<_> = filter(&r, "fra").iter().map(|p| p.name.as_str()).collect();
        assert_eq!(by_nation, vec!["Kylian Mbappe", "William Saliba"]);
    }

    #[test]
    fn filtered_roster_is_an_ordered_partition() {
        let r = roster();
        for q in ["a", "ri", "mf", "eng", "zzz", "Man"] {
            let needle = normalize_query(q);
            let kept = filter_positions(&r, q);
            assert!(kept.windows(2).all(|w| w[0] < w[1]), "order broken for {q}");
            for (idx, p) in r.iter().enumerate() {
                let hit = [Some(p.name.as_str()), p.pos.as_deref(), p.nation.as_deref()]
                    .into_iter()
                    .flatten()
                    .any(|field| field.to_lowercase().contains(&needle));
                assert_eq!(kept.contains(&idx), hit, "query {q}, player {}", p.name);
                assert_eq!(hit, matches(p, &needle), "query {q}, player {}", p.name);
            }
        }
    }

    #[test]
    fn missing_fields_never_match_non_empty_query() {
        let p = player("", None, None);
        assert!(!matches(&p, "unknown"));
    }

    #[test]
    fn highlight_finds_case_insensitive_range() {
        let name = "Declan Rice";
        let range = highlight(name, "RICE").unwrap();
        assert_eq!(&name[range], "Rice");
        assert_eq!(highlight(name, "  dec "), Some(0..3));
        assert_eq!(highlight(name, "xyz"), None);
        assert_eq!(highlight(name, ""), None);
    }

    #[test]
    fn highlight_respects_multibyte_chars() {
        let name = "Martin Ødegaard";
        let range = highlight(name, "øde").unwrap();
        assert_eq!(&name[range], "Øde");
    }

    #[test]
    fn highlight_agrees_with_filter_on_final_sigma() {
        let r = vec![player("ΟΔΥΣΣΕΑΣ", None, None)];
        assert_eq!(filter(&r, "ς").len(), 1);

        let range = highlight("ΟΔΥΣΣΕΑΣ", "ς").unwrap();
        assert_eq!(&"ΟΔΥΣΣΕΑΣ"[range], "Σ");
        assert_eq!(highlight("ΟΔΥΣΣΕΑΣ", "σσ"), Some(6..10));
    }
}
