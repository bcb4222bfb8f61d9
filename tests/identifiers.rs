use linked_places::citation::{Citation, CitationReason};
use linked_places::error::LpfError;
use linked_places::identifier::{make_identifier, Identifier, IdentifierKind};
use serde_json::json;

#[test]
fn url_values_infer_url_kind() {
    let id = make_identifier("https://www.wikidata.org/wiki/Q486972", None).expect("valid url");
    assert_eq!(id.kind(), IdentifierKind::Url);
    assert_eq!(id.value(), "https://www.wikidata.org/wiki/Q486972");
}

#[test]
fn delimited_values_infer_delimited_kind() {
    for value in ["cite-001", "aat:300008347", "a_b", "a,b", "a.b"] {
        let id = make_identifier(value, None).expect("valid delimited value");
        assert_eq!(
            id.kind(),
            IdentifierKind::AlphanumericDelimited,
            "{value} should infer the delimited kind"
        );
    }
}

#[test]
fn plain_alphanumeric_stays_the_catch_all() {
    let id = make_identifier("300008347", None).expect("valid alphanumeric");
    assert_eq!(id.kind(), IdentifierKind::Alphanumeric);
}

#[test]
fn inference_prefers_url_over_delimited() {
    // the value satisfies the delimited pattern too, but the URL check runs first
    let id = make_identifier("http://vocab.getty.edu/page/aat/300008347", None).unwrap();
    assert_eq!(id.kind(), IdentifierKind::Url);
}

#[test]
fn declared_kind_is_validated() {
    let err = Identifier::new(IdentifierKind::Alphanumeric, "has space").unwrap_err();
    assert!(matches!(err, LpfError::InvalidIdentifier { .. }));

    let err = make_identifier("not a url", Some(IdentifierKind::Url)).unwrap_err();
    assert!(matches!(err, LpfError::InvalidIdentifier { .. }));
}

#[test]
fn scheme_only_strings_are_not_urls() {
    // parses as a URL, but carries no host
    let id = make_identifier("aat:300008347", None).unwrap();
    assert_eq!(id.kind(), IdentifierKind::AlphanumericDelimited);
}

#[test]
fn unknown_identifier_kind_is_rejected() {
    let err = "bogus".parse::<IdentifierKind>().unwrap_err();
    assert!(matches!(err, LpfError::UnknownIdentifierKind(_)));
}

#[test]
fn identifier_value_is_normalized() {
    let id = make_identifier("  Q486972  ", None).unwrap();
    assert_eq!(id.to_string(), "Q486972");
}

#[test]
fn citation_reasons_round_trip() {
    for (text, reason) in [
        ("cites", CitationReason::Cites),
        ("dataSource", CitationReason::DataSource),
        ("evidence", CitationReason::Evidence),
        ("related", CitationReason::Related),
        ("closeMatch", CitationReason::CloseMatch),
    ] {
        assert_eq!(text.parse::<CitationReason>().unwrap(), reason);
        assert_eq!(reason.as_str(), text);
    }
    let err = "citesAsDataSource".parse::<CitationReason>().unwrap_err();
    assert!(matches!(err, LpfError::InvalidCitationReason(_)));
}

#[test]
fn citation_reasons_map_to_cito_and_skos_uris() {
    assert_eq!(CitationReason::Cites.uri(), "http://purl.org/spar/cito/cites");
    assert_eq!(
        CitationReason::DataSource.uri(),
        "http://purl.org/spar/cito/citesAsDataSource"
    );
    assert_eq!(
        CitationReason::Evidence.uri(),
        "http://purl.org/spar/cito/citesAsEvidence"
    );
    assert_eq!(
        CitationReason::Related.uri(),
        "http://purl.org/spar/cito/citesAsRelated"
    );
    assert_eq!(
        CitationReason::CloseMatch.uri(),
        "http://www.w3.org/2004/02/skos/core#closeMatch"
    );
}

#[test]
fn bibliographic_url_hosts_are_allow_listed() {
    let mut citation = Citation::new("cite-001").unwrap();
    citation
        .set_bibliographic_url("https://www.zotero.org/groups/2533/items/ABCD1234")
        .expect("zotero is allowed");
    citation
        .set_bibliographic_url("https://search.worldcat.org/title/12345")
        .expect("worldcat is allowed");
    let err = citation
        .set_bibliographic_url("https://www.geonames.org/about.html")
        .unwrap_err();
    assert!(matches!(err, LpfError::InvalidCitationUrl { .. }));
}

#[test]
fn access_url_must_be_a_url() {
    let mut citation = Citation::new("cite-001").unwrap();
    let err = citation.set_access_url("not a url").unwrap_err();
    assert!(matches!(err, LpfError::InvalidIdentifier { .. }));
}

#[test]
fn citation_serialization_is_sparse() {
    let citation = Citation::new("cite-001").unwrap();
    let dict = citation.asdict();
    let object = dict.as_object().unwrap();
    assert_eq!(object.len(), 2, "only @id and reason for an empty citation");
    assert_eq!(object["@id"], json!("cite-001"));
    assert_eq!(object["reason"], json!("cites"));

    let mut citation = Citation::new("cite-001").unwrap();
    citation.set_short_title("Wikidata");
    citation
        .set_access_url("https://www.wikidata.org/wiki/Q486972")
        .unwrap();
    let dict = citation.asdict();
    assert_eq!(dict["short_title"], json!("Wikidata"));
    assert_eq!(dict["access_url"], json!("https://www.wikidata.org/wiki/Q486972"));
    assert!(dict.get("formatted_citation").is_none());
}

#[test]
fn citation_from_mapping() {
    let citation = Citation::from_value(&json!({
        "id": "cite-001",
        "short_title": "Wikidata",
        "formatted_citation": "Wikidata: The Free Knowledge Base. Wikimedia Foundation, 2014-.",
        "access_url": "https://www.wikidata.org/wiki/Q486972",
        "citation_detail": " human settlement  (Q486972)",
        "reason": "evidence"
    }))
    .unwrap();
    assert_eq!(citation.id().value(), "cite-001");
    assert_eq!(citation.reason(), CitationReason::Evidence);
    // normalization collapses interior whitespace and trims
    assert_eq!(citation.citation_detail(), "human settlement (Q486972)");
}

#[test]
fn citation_from_mapping_requires_an_id() {
    let err = Citation::from_value(&json!({ "short_title": "Wikidata" })).unwrap_err();
    assert!(matches!(err, LpfError::Shape { .. }));
}
