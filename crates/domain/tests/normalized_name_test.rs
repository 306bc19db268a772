use ferrous_dnsbl_domain::{DomainError, NormalizedName};

fn norm(name: &str) -> NormalizedName {
    NormalizedName::parse(name).unwrap()
}

#[test]
fn test_lowercases_ascii_labels() {
    assert_eq!(norm("WWW.Example.NET").as_str(), "www.example.net");
}

#[test]
fn test_strips_single_trailing_dot() {
    assert_eq!(norm("example.net.").as_str(), "example.net");
}

#[test]
fn test_case_and_trailing_dot_are_equivalent() {
    assert_eq!(norm("Example.NET."), norm("example.net"));
}

#[test]
fn test_is_idempotent() {
    for input in ["Example.NET.", "a.b.C.d", "xn--bcher-kva.EXAMPLE", "localhost", "."] {
        let once = norm(input);
        let twice = norm(once.as_str());
        assert_eq!(once, twice, "normalize must be idempotent for {}", input);
    }
}

#[test]
fn test_non_ascii_passes_through() {
    assert_eq!(norm("Bücher.DE").as_str(), "bücher.de");
    assert_eq!(norm("ÄÖÜ.de").as_str(), "ÄÖÜ.de");
}

#[test]
fn test_escapes_survive_case_folding() {
    assert_eq!(norm("A\\233B.Example.NET").as_str(), "a\\233b.example.net");
    assert_eq!(norm("a\\233b.example.net"), norm("A\\233B.example.net."));
}

#[test]
fn test_escape_counts_as_one_octet() {
    // 62 letters plus one escaped octet is a full 63-octet label
    let label = format!("{}\\233", "a".repeat(62));
    assert!(NormalizedName::parse(&format!("{}.net", label)).is_ok());
    let label = format!("{}\\233", "a".repeat(63));
    assert!(NormalizedName::parse(&format!("{}.net", label)).is_err());
}

#[test]
fn test_rejects_bad_escapes() {
    assert!(NormalizedName::parse("a\\256.net").is_err());
    assert!(NormalizedName::parse("net\\").is_err());
}

#[test]
fn test_root_forms_normalize_to_root() {
    assert!(norm("").is_root());
    assert!(norm(".").is_root());
    assert_eq!(norm(".").to_string(), ".");
}

#[test]
fn test_rejects_empty_intermediate_label() {
    assert!(matches!(
        NormalizedName::parse("www..example.net"),
        Err(DomainError::InvalidName(_))
    ));
}

#[test]
fn test_rejects_leading_dot() {
    assert!(NormalizedName::parse(".example.net").is_err());
}

#[test]
fn test_rejects_double_trailing_dot() {
    assert!(NormalizedName::parse("example.net..").is_err());
    assert!(NormalizedName::parse("..").is_err());
}

#[test]
fn test_rejects_overlong_label() {
    let label = "a".repeat(64);
    assert!(NormalizedName::parse(&format!("{}.net", label)).is_err());
    let label = "a".repeat(63);
    assert!(NormalizedName::parse(&format!("{}.net", label)).is_ok());
}

#[test]
fn test_rejects_overlong_name() {
    let name = vec!["a".repeat(63); 4].join(".");
    assert_eq!(name.len(), 255);
    assert!(NormalizedName::parse(&name).is_err());
}

#[test]
fn test_parent_strips_leftmost_label() {
    let name = norm("a.b.example.net");
    let parent = name.parent().unwrap();
    assert_eq!(parent.as_str(), "b.example.net");
    assert_eq!(parent.parent().unwrap().as_str(), "example.net");
    assert_eq!(norm("net").parent(), None);
    assert_eq!(NormalizedName::root().parent(), None);
}

#[test]
fn test_label_count() {
    assert_eq!(norm("www.example.net").label_count(), 3);
    assert_eq!(norm("net").label_count(), 1);
    assert_eq!(NormalizedName::root().label_count(), 0);
    assert_eq!(
        norm("www.example.net").labels().collect::<Vec<_>>(),
        vec!["www", "example", "net"]
    );
}

#[test]
fn test_is_subdomain_of() {
    let apex = norm("example.net");
    assert!(norm("example.net").is_subdomain_of(&apex));
    assert!(norm("www.example.net").is_subdomain_of(&apex));
    assert!(!norm("badexample.net").is_subdomain_of(&apex));
    assert!(!norm("net").is_subdomain_of(&apex));
    assert!(norm("net").is_subdomain_of(&NormalizedName::root()));
}
