use linked_places::citation::CitationReason;
use linked_places::error::LpfError;
use linked_places::gazetteer::{Feature, FeatureCollection, FeatureType};
use linked_places::vocab::{AatMatcher, AAT_PAGE_BASE, INHABITED_PLACES};
use serde_json::{json, Map, Value};

fn matcher() -> AatMatcher {
    AatMatcher::from_table(&json!({
        "300008347": [
            { "text": "inhabited places", "lang": "en" },
            { "text": "settlement", "lang": "en" }
        ],
        "300000809": [
            { "text": "gulfs", "lang": "en" },
            { "text": "settlement", "lang": "en" }
        ],
        "300386853": [
            { "text": "fiumi", "lang": "it" },
            { "text": "rivers", "lang": "en" }
        ],
        "300132316": [
            { "text": "oppidum", "lang": "la" }
        ],
        "300404216": [
            { "text": "harbors", "lang": "en" },
            { "text": "ports", "lang": "en" }
        ],
        "300120546": [
            { "text": "ports", "lang": "en" }
        ]
    }))
    .unwrap()
}

fn properties() -> Map<String, Value> {
    json!({ "title": "Roma", "ccodes": ["IT"], "fclasses": ["P"] })
        .as_object()
        .cloned()
        .unwrap()
}

#[test]
fn a_unique_match_attaches_one_citation() {
    let mut ft = FeatureType::with_id("t1", "rivers@en").unwrap();
    assert!(ft.augment(&matcher()).unwrap());
    assert_eq!(ft.citations().len(), 1);

    let citation = &ft.citations()[0];
    assert_eq!(citation.reason(), CitationReason::CloseMatch);
    assert_eq!(citation.short_title(), "Getty AAT");
    assert_eq!(
        citation.access_url(),
        Some("http://vocab.getty.edu/page/aat/300386853")
    );
    assert_eq!(citation.citation_detail(), "300386853: rivers");
}

#[test]
fn zero_matches_is_a_no_op() {
    let mut ft = FeatureType::with_id("t1", "unheard of@en").unwrap();
    assert!(!ft.augment(&matcher()).unwrap());
    assert!(ft.citations().is_empty());
}

#[test]
fn inhabited_places_wins_a_tie() {
    // "settlement" names both 300008347 and 300000809
    let mut ft = FeatureType::with_id("t1", "Settlement@en").unwrap();
    assert!(ft.augment(&matcher()).unwrap());
    assert_eq!(ft.citations().len(), 1);
    let expected = format!("{AAT_PAGE_BASE}{INHABITED_PLACES}");
    assert_eq!(ft.citations()[0].access_url(), Some(expected.as_str()));
}

#[test]
fn other_ties_are_ambiguous() {
    // "ports" names 300404216 and 300120546; neither is preferred
    let mut ft = FeatureType::with_id("t1", "ports@en").unwrap();
    let err = ft.augment(&matcher()).unwrap_err();
    match err {
        LpfError::AmbiguousMatch { label, candidates } => {
            assert_eq!(label, "ports");
            assert_eq!(candidates, ["300120546", "300404216"]);
        }
        other => panic!("expected an ambiguous match, got {other:?}"),
    }
    assert!(ft.citations().is_empty());
}

#[test]
fn aliases_participate_in_matching() {
    let mut ft = FeatureType::with_id("t1", "walled town@en").unwrap();
    ft.add_alias("Oppidum@la");
    assert!(ft.augment(&matcher()).unwrap());
    assert_eq!(
        ft.citations()[0].access_url(),
        Some("http://vocab.getty.edu/page/aat/300132316")
    );
}

#[test]
fn repeated_augmentation_is_idempotent() {
    let m = matcher();
    let mut ft = FeatureType::with_id("t1", "rivers@en").unwrap();
    assert!(ft.augment(&m).unwrap());
    assert!(!ft.augment(&m).unwrap());
    assert_eq!(ft.citations().len(), 1);
}

#[test]
fn representative_label_falls_back_to_the_first_label() {
    // 300132316 carries no en-tagged label
    let mut ft = FeatureType::with_id("t1", "oppidum@la").unwrap();
    assert!(ft.augment(&matcher()).unwrap());
    assert_eq!(ft.citations()[0].citation_detail(), "300132316: oppidum");
}

#[test]
fn features_augment_their_types_in_order() {
    let types = vec![
        FeatureType::with_id("t1", "settlement@en").unwrap(),
        FeatureType::with_id("t2", "rivers@en").unwrap(),
        FeatureType::with_id("t3", "unheard of@en").unwrap(),
    ];
    let mut feature = Feature::with_parts(None, properties(), None, types).unwrap();
    assert_eq!(feature.augment(&matcher()).unwrap(), 2);
    assert_eq!(feature.types()[0].citations().len(), 1);
    assert_eq!(feature.types()[1].citations().len(), 1);
    assert!(feature.types()[2].citations().is_empty());
}

#[test]
fn collections_count_appended_citations() {
    let mut collection = FeatureCollection::from_value(&json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "title": "Roma", "ccodes": ["IT"], "fclasses": ["P"] },
                "types": [ { "id": "t1", "label": "settlement@en" } ]
            },
            {
                "type": "Feature",
                "properties": { "title": "Tiber", "ccodes": ["IT"], "fclasses": ["H"] },
                "types": [
                    { "id": "t2", "label": "rivers@en" },
                    { "id": "t3", "label": "unheard of@en" }
                ]
            }
        ]
    }))
    .unwrap();
    assert_eq!(collection.augment(&matcher()).unwrap(), 2);
}

#[test]
fn a_failing_type_aborts_the_collection_pass() {
    let mut collection = FeatureCollection::from_value(&json!({
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "title": "Portus", "ccodes": ["IT"], "fclasses": ["S"] },
                "types": [ { "id": "t1", "label": "ports@en" } ]
            }
        ]
    }))
    .unwrap();
    let err = collection.augment(&matcher()).unwrap_err();
    assert!(matches!(err, LpfError::AmbiguousMatch { .. }));
}

#[test]
fn matching_is_case_insensitive() {
    let m = AatMatcher::from_table(&json!({
        "300008347": [ { "text": "Inhabited Places", "lang": "en" } ]
    }))
    .unwrap();
    let mut ft = FeatureType::with_id("t1", "INHABITED PLACES@en").unwrap();
    assert!(ft.augment(&m).unwrap());
    assert_eq!(
        ft.citations()[0].citation_detail(),
        "300008347: inhabited places"
    );
}

#[test]
fn a_missing_table_file_is_a_vocabulary_error() {
    let m = AatMatcher::from_path("/nonexistent/aat_terms.json");
    let mut ft = FeatureType::with_id("t1", "rivers@en").unwrap();
    let err = ft.augment(&m).unwrap_err();
    assert!(matches!(err, LpfError::Vocabulary(_)));
}

#[test]
fn malformed_tables_are_rejected() {
    let err = AatMatcher::from_table(&json!([ "300008347" ])).unwrap_err();
    assert!(matches!(err, LpfError::Vocabulary(_)));
    let err = AatMatcher::from_table(&json!({ "300008347": "inhabited places" })).unwrap_err();
    assert!(matches!(err, LpfError::Vocabulary(_)));
}

#[test]
fn augmented_citations_serialize_with_the_type() {
    let mut ft = FeatureType::with_id("t1", "rivers@en").unwrap();
    ft.augment(&matcher()).unwrap();
    let dict = ft.asdict(linked_places::gazetteer::TypeSerialization::Full);
    let citations = dict["citations"].as_array().unwrap();
    assert_eq!(citations.len(), 1);
    assert_eq!(
        citations[0]["bibliographic_url"],
        json!("https://www.zotero.org/groups/2533/pleiades/items/MI9KTADL")
    );
    assert_eq!(citations[0]["reason"], json!("closeMatch"));
}
