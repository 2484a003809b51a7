//! End-to-end quiz flow: extract, snapshot, then match guesses.

use popquiz::{Extractor, Matcher, Snapshot};

fn data_row(name: &str, population: u64) -> String {
    format!(
        "|-\n| {{{{flagicon|{name}}}}} [[Demographics of {name}|{name}]] \
         || {{{{n+p|{population}|est}}}}\n"
    )
}

fn snapshot() -> Snapshot {
    let mut doc = String::from("{| class=\"wikitable\"\n! Rank !! Country !! Population\n");
    for (name, population) in [
        ("China", 1_409_670_000),
        ("India", 1_428_627_663),
        ("United States", 341_784_857),
        ("Indonesia", 279_476_346),
        ("Pakistan", 241_499_431),
        ("Democratic Republic of the Congo", 102_262_808),
        ("Iran", 85_961_000),
        ("United Kingdom", 68_350_000),
    ] {
        doc.push_str(&data_row(name, population));
    }
    doc.push_str("|}");

    Snapshot::from_extraction(Extractor::with_defaults().extract(&doc))
}

#[test]
fn rank_one_guess_returns_grouped_population() {
    let result = Matcher::with_builtin_aliases().check("China", &snapshot());

    assert!(result.correct);
    assert_eq!(result.rank, Some(1));
    assert_eq!(result.normalized, "china");
    assert_eq!(result.population.as_deref(), Some("1,409,670,000"));
}

#[test]
fn guessing_is_case_and_whitespace_insensitive() {
    let matcher = Matcher::with_builtin_aliases();
    let snap = snapshot();

    for guess in ["  USA ", "usa", "Usa", "USA"] {
        let result = matcher.check(guess, &snap);
        assert_eq!(result.normalized, "united states");
        assert_eq!(result.rank, Some(3));
    }
}

#[test]
fn aliases_resolve_once_and_do_not_chain() {
    let matcher = Matcher::with_builtin_aliases();
    let snap = snapshot();

    let via_alias = matcher.check("usa", &snap);
    assert_eq!(via_alias.normalized, "united states");

    // Already canonical: a second pass over the same string changes nothing
    let canonical = matcher.check(&via_alias.normalized, &snap);
    assert_eq!(canonical.normalized, "united states");
    assert_eq!(canonical.rank, via_alias.rank);
}

#[test]
fn alias_family_maps_to_one_canonical_name() {
    let matcher = Matcher::with_builtin_aliases();
    let snap = snapshot();

    for guess in ["DR Congo", "drc", "Congo", "republic of the congo"] {
        let result = matcher.check(guess, &snap);
        assert!(result.correct, "guess {guess:?} should match");
        assert_eq!(result.rank, Some(6));
        assert_eq!(result.population.as_deref(), Some("102,262,808"));
    }

    for guess in ["Persia", "UK", "Britain", "England"] {
        assert!(matcher.check(guess, &snap).correct, "guess {guess:?}");
    }
}

#[test]
fn unknown_guess_has_no_rank_and_no_population() {
    let result = Matcher::with_builtin_aliases().check("Wakanda", &snapshot());

    assert!(!result.correct);
    assert_eq!(result.rank, None);
    assert_eq!(result.population, None);
    assert_eq!(result.normalized, "wakanda");
}

#[test]
fn matching_never_errors_on_odd_input() {
    let matcher = Matcher::with_builtin_aliases();
    let snap = snapshot();

    for guess in ["", "   ", "\t\n", "🦀", "a]b[c{d}e|f"] {
        let result = matcher.check(guess, &snap);
        assert!(!result.correct);
        assert_eq!(result.rank, None);
    }
}

#[test]
fn check_result_serializes_like_the_api_contract() {
    let result = Matcher::with_builtin_aliases().check("  pakistan  ", &snapshot());
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["correct"], true);
    assert_eq!(json["rank"], 5);
    assert_eq!(json["normalized"], "pakistan");
    assert_eq!(json["population"], "241,499,431");
}
