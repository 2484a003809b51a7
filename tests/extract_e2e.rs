//! End-to-end extraction against a realistic wikitext fixture.

use popquiz::{Extractor, ExtractorConfig};

/// The twenty most populous countries, fixture figures.
const TOP_20: &[(&str, u64)] = &[
    ("China", 1_409_670_000),
    ("India", 1_428_627_663),
    ("United States", 341_784_857),
    ("Indonesia", 279_476_346),
    ("Pakistan", 241_499_431),
    ("Nigeria", 223_800_000),
    ("Brazil", 216_422_446),
    ("Bangladesh", 169_828_911),
    ("Russia", 146_424_729),
    ("Mexico", 129_875_529),
    ("Japan", 124_352_000),
    ("Philippines", 112_892_781),
    ("Ethiopia", 107_334_000),
    ("Egypt", 105_914_499),
    ("Democratic Republic of the Congo", 102_262_808),
    ("Vietnam", 100_300_000),
    ("Iran", 85_961_000),
    ("Turkey", 85_372_377),
    ("Germany", 84_482_267),
    ("France", 68_170_000),
];

fn data_row(rank: usize, name: &str, population: u64) -> String {
    format!(
        "\n| {rank} || {{{{flagicon|{name}}}}} [[Demographics of {name}|{name}]] \
         || {{{{n+p|{population}|{{{{worldpop}}}}|sigfig=2|disp=table}}}} || 2023\n"
    )
}

/// Builds a document shaped like the real article: prose preamble, table
/// header, a world summary row without a flag, data rows, and footnotes.
fn fixture(rows: &[(&str, u64)]) -> String {
    let mut doc = String::from(
        "This is a list of countries by population.\n\
         {| class=\"wikitable sortable\"\n\
         ! Rank !! Country or dependency !! Population !! Date\n",
    );
    doc.push_str("|-\n| – || ''World'' || {{n+p|8045311447|est}} || 2023\n");
    for (i, &(name, population)) in rows.iter().enumerate() {
        doc.push_str("|-");
        doc.push_str(&data_row(i + 1, name, population));
    }
    doc.push_str("|-\n| colspan=4 | ''Notes: figures are national estimates''\n|}");
    doc
}

#[test]
fn extracts_twenty_names_in_document_order() {
    let extraction = Extractor::with_defaults().extract(&fixture(TOP_20));

    assert_eq!(extraction.len(), 20);
    assert!(!extraction.is_short());
    assert_eq!(extraction.names()[0], "china");
    assert_eq!(extraction.names()[2], "united states");
    assert_eq!(
        extraction.names()[14],
        "democratic republic of the congo"
    );
    assert_eq!(extraction.names()[19], "france");
}

#[test]
fn names_and_populations_stay_index_aligned() {
    let extraction = Extractor::with_defaults().extract(&fixture(TOP_20));

    assert_eq!(extraction.names().len(), extraction.populations().len());
    assert_eq!(extraction.populations()[0], "1,409,670,000");
    assert_eq!(extraction.populations()[2], "341,784,857");
    assert_eq!(extraction.populations()[19], "68,170,000");
}

#[test]
fn world_summary_row_is_not_an_entity() {
    // The world row carries the value template but no flagicon marker
    let extraction = Extractor::with_defaults().extract(&fixture(TOP_20));
    assert!(!extraction.names().contains(&"world".to_string()));
    assert!(!extraction
        .populations()
        .contains(&"8,045,311,447".to_string()));
}

#[test]
fn parsing_is_idempotent() {
    let doc = fixture(TOP_20);
    let extractor = Extractor::with_defaults();
    let first = extractor.extract(&doc);
    let second = extractor.extract(&doc);
    assert_eq!(first, second);
}

#[test]
fn eighteen_rows_returns_short_list_without_failing() {
    let extraction = Extractor::with_defaults().extract(&fixture(&TOP_20[..18]));

    assert_eq!(extraction.len(), 18);
    assert!(extraction.is_short());
    assert_eq!(extraction.shortfall(), 2);
    assert_eq!(extraction.names()[17], "turkey");
}

#[test]
fn malformed_row_skipped_without_shifting_ranks() {
    let mut doc = fixture(&TOP_20[..2]);
    // Append a marker-only row, then one more valid row
    doc.push_str("|-\n| {{flagicon}} || broken row ||\n");
    doc.push_str("|-");
    doc.push_str(&data_row(3, "United States", 341_784_857));

    let extraction = Extractor::with_defaults().extract(&doc);
    let entities = extraction.entities();

    assert_eq!(entities.len(), 3);
    assert_eq!(entities[2].rank, 3);
    assert_eq!(entities[2].name, "united states");
    assert_eq!(entities[2].population.as_deref(), Some("341,784,857"));
}

#[test]
fn target_caps_a_longer_document() {
    let config = ExtractorConfig {
        target: 10,
        ..ExtractorConfig::default()
    };
    let extraction = Extractor::new(config).unwrap().extract(&fixture(TOP_20));

    assert_eq!(extraction.len(), 10);
    assert_eq!(extraction.populations().len(), 10);
    assert_eq!(extraction.names()[9], "mexico");
}

#[test]
fn entities_carry_contiguous_ranks() {
    let entities = Extractor::with_defaults()
        .extract(&fixture(TOP_20))
        .entities();

    for (i, entity) in entities.iter().enumerate() {
        assert_eq!(entity.rank, i + 1);
        assert!(entity.population.is_some());
    }
}
