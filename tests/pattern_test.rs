use assert2::check;
use rstest::{fixture, rstest};
use type_decl_index::{
    DecodedTypeRecord, MatchMode, MatchRule, QualifiedTypeDeclarationPattern, TypeDeclaration,
    TypeSuffix, decode_index_key, encode_index_key,
};

fn decoded(decl: &TypeDeclaration) -> DecodedTypeRecord {
    decode_index_key(&encode_index_key(decl)).expect("fixture key should decode")
}

/// A small cross-section of declarations covering every concrete kind,
/// nesting, the default package and module membership.
#[fixture]
fn records() -> Vec<DecodedTypeRecord> {
    [
        TypeDeclaration::new("java.util", "HashMap"),
        TypeDeclaration::new("java.util", "Map").with_kind(TypeSuffix::Interface),
        TypeDeclaration::new("java.util", "Entry")
            .nested_in(["Map"])
            .with_kind(TypeSuffix::Interface),
        TypeDeclaration::new("java.time", "DayOfWeek").with_kind(TypeSuffix::Enum),
        TypeDeclaration::new("java.lang", "Override").with_kind(TypeSuffix::AnnotationType),
        TypeDeclaration::new("", "Main"),
        TypeDeclaration::new("java.lang", "NullPointerException").in_module("java.base"),
        TypeDeclaration::new("com.acme", "Local").in_anonymous_context(),
    ]
    .iter()
    .map(decoded)
    .collect()
}

fn kind(suffix: TypeSuffix) -> DecodedTypeRecord {
    decoded(&TypeDeclaration::new("p", "T").with_kind(suffix))
}

// --- Wildcards ---

/// Test: A null simple name matches every record regardless of name.
#[rstest]
fn null_simple_name_matches_all(records: Vec<DecodedTypeRecord>) {
    let pattern = QualifiedTypeDeclarationPattern::new(
        None,
        None,
        TypeSuffix::Type,
        MatchRule::exact_case_sensitive(),
    );
    for record in &records {
        check!(pattern.matches_decoded_key(record), "{:?}", record);
    }
}

/// Test: A null qualification matches any qualification, including empty and anonymous ones.
#[rstest]
fn null_qualification_matches_all(records: Vec<DecodedTypeRecord>) {
    for record in &records {
        let pattern = QualifiedTypeDeclarationPattern::new(
            None,
            Some(&record.simple_name),
            TypeSuffix::Type,
            MatchRule::exact_case_sensitive(),
        );
        check!(pattern.matches_decoded_key(record), "{:?}", record);
    }
}

/// Test: The `Type` suffix accepts every decoded kind.
#[rstest]
fn type_suffix_wildcard_matches_all(records: Vec<DecodedTypeRecord>) {
    let pattern = QualifiedTypeDeclarationPattern::blank_pattern();
    check!(pattern.type_suffix() == TypeSuffix::Type);
    for record in &records {
        check!(pattern.matches_decoded_key(record));
    }
}

// --- Suffix compatibility ---

/// Test: The full suffix relation, one case per (query, candidate) pair.
#[rstest]
#[case(TypeSuffix::ClassAndInterface, TypeSuffix::Class, true)]
#[case(TypeSuffix::ClassAndInterface, TypeSuffix::Interface, true)]
#[case(TypeSuffix::ClassAndInterface, TypeSuffix::Enum, false)]
#[case(TypeSuffix::ClassAndInterface, TypeSuffix::AnnotationType, false)]
#[case(TypeSuffix::ClassAndEnum, TypeSuffix::Class, true)]
#[case(TypeSuffix::ClassAndEnum, TypeSuffix::Enum, true)]
#[case(TypeSuffix::ClassAndEnum, TypeSuffix::Interface, false)]
#[case(TypeSuffix::ClassAndEnum, TypeSuffix::AnnotationType, false)]
#[case(TypeSuffix::InterfaceAndAnnotation, TypeSuffix::Interface, true)]
#[case(TypeSuffix::InterfaceAndAnnotation, TypeSuffix::AnnotationType, true)]
#[case(TypeSuffix::InterfaceAndAnnotation, TypeSuffix::Class, false)]
#[case(TypeSuffix::InterfaceAndAnnotation, TypeSuffix::Enum, false)]
#[case(TypeSuffix::Class, TypeSuffix::Interface, false)]
#[case(TypeSuffix::Interface, TypeSuffix::AnnotationType, false)]
#[case(TypeSuffix::Enum, TypeSuffix::Class, false)]
#[case(TypeSuffix::AnnotationType, TypeSuffix::Interface, false)]
fn suffix_compatibility(
    #[case] query: TypeSuffix,
    #[case] candidate: TypeSuffix,
    #[case] expected: bool,
) {
    check!(query.is_compatible_with(candidate) == expected);

    let pattern = QualifiedTypeDeclarationPattern::new(
        None,
        Some("T"),
        query,
        MatchRule::exact_case_sensitive(),
    );
    check!(pattern.matches_decoded_key(&kind(candidate)) == expected);
}

/// Test: OR suffixes are not symmetric; a concrete query never accepts an OR candidate.
#[test]
fn or_suffixes_are_one_directional() {
    for or_suffix in [
        TypeSuffix::ClassAndInterface,
        TypeSuffix::ClassAndEnum,
        TypeSuffix::InterfaceAndAnnotation,
    ] {
        for concrete in [
            TypeSuffix::Class,
            TypeSuffix::Interface,
            TypeSuffix::Enum,
            TypeSuffix::AnnotationType,
        ] {
            check!(!concrete.is_compatible_with(or_suffix));
        }
        check!(or_suffix.is_compatible_with(or_suffix));
    }
}

/// Test: The relation is total: every pair has an answer and `Type` only ever widens.
#[test]
fn suffix_relation_is_total() {
    for query in TypeSuffix::ALL {
        for candidate in TypeSuffix::ALL {
            let compatible = query.is_compatible_with(candidate);
            if query == TypeSuffix::Type || query == candidate {
                check!(compatible);
            }
        }
    }
}

// --- Names ---

/// Test: Case-sensitive exact rejects a differently cased name; insensitive accepts it.
#[test]
fn case_sensitivity() {
    let record = decoded(&TypeDeclaration::new("p", "foo"));
    let sensitive = QualifiedTypeDeclarationPattern::new(
        None,
        Some("Foo"),
        TypeSuffix::Type,
        MatchRule::new(MatchMode::Exact, true),
    );
    let insensitive = QualifiedTypeDeclarationPattern::new(
        None,
        Some("Foo"),
        TypeSuffix::Type,
        MatchRule::new(MatchMode::Exact, false),
    );

    check!(!sensitive.matches_decoded_key(&record));
    check!(insensitive.matches_decoded_key(&record));
}

/// Test: Case-insensitive exact accepts a record carrying the very same name and qualification.
///
/// `Σ` at the end of a word lowercases to `ς` under whole-string rules but to
/// `σ` per character, so stored fragments and candidates must fold alike.
#[rstest]
#[case::ascii("java.util", "HashMap")]
#[case::final_sigma_name("p", "ΑΣ")]
#[case::final_sigma_qualification("ΑΣ", "T")]
#[case::mixed("com.ΟΔΟΣ", "ΛΟΓΟΣ")]
fn case_insensitive_exact_accepts_identical_names(
    #[case] package: &str,
    #[case] simple_name: &str,
) {
    let record = decoded(&TypeDeclaration::new(package, simple_name));
    let pattern = QualifiedTypeDeclarationPattern::new(
        Some(package),
        Some(simple_name),
        TypeSuffix::Type,
        MatchRule::new(MatchMode::Exact, false),
    );

    check!(pattern.matches_decoded_key(&record), "{}", pattern);
}

/// Test: A camel-case qualification sub-pattern matches regardless of the case flag.
#[rstest]
#[case::case_sensitive(true)]
#[case::case_insensitive(false)]
fn camel_case_qualification_ignores_case_flag(#[case] case_sensitive: bool) {
    let record = decoded(&TypeDeclaration::new("java.util", "Entry").nested_in(["HashMap"]));
    let rule = MatchRule::new(MatchMode::Prefix, case_sensitive)
        .with_camel_case(false)
        .unwrap();
    let pattern = QualifiedTypeDeclarationPattern::with_qualification_rule(
        "java.util.HM",
        rule,
        None,
        TypeSuffix::Type,
        MatchRule::exact_case_sensitive(),
    );

    check!(pattern.qualification_pattern().unwrap().qualification() == "java.util.HM");
    check!(pattern.matches_decoded_key(&record));
}

/// Test: Camel-case anchors must land on consecutive humps.
#[rstest]
#[case("NPE", "NullPointerException", true)]
#[case("NPE", "NotAPointerEvent", false)]
#[case("NuPoEx", "NullPointerException", true)]
#[case("DoW", "DayOfWeek", false)]
#[case("DOW", "DayOfWeek", true)]
#[case("HM", "HashMap", true)]
#[case("HM", "ConcurrentHashMap", false)]
fn camel_case_matching(#[case] fragment: &str, #[case] name: &str, #[case] expected: bool) {
    let rule = MatchRule::new(MatchMode::Exact, true)
        .with_camel_case(false)
        .expect("camel case over exact is valid");
    let pattern =
        QualifiedTypeDeclarationPattern::new(None, Some(fragment), TypeSuffix::Type, rule);
    let record = decoded(&TypeDeclaration::new("p", name));

    check!(pattern.matches_decoded_key(&record) == expected);
}

/// Test: Glob and prefix rules on the simple name.
#[rstest]
#[case(MatchMode::Pattern, "*Map", "HashMap", true)]
#[case(MatchMode::Pattern, "Hash?ap", "HashMap", true)]
#[case(MatchMode::Pattern, "Hash", "HashMap", false)]
#[case(MatchMode::Prefix, "Hash", "HashMap", true)]
#[case(MatchMode::Prefix, "Map", "HashMap", false)]
fn mode_matching(
    #[case] mode: MatchMode,
    #[case] fragment: &str,
    #[case] name: &str,
    #[case] expected: bool,
) {
    let pattern = QualifiedTypeDeclarationPattern::new(
        None,
        Some(fragment),
        TypeSuffix::Type,
        MatchRule::new(mode, true),
    );
    check!(pattern.matches_decoded_key(&decoded(&TypeDeclaration::new("p", name))) == expected);
}

// --- Qualification ---

/// Test: Without a sub-pattern the qualification must be equal.
#[test]
fn qualification_equality() {
    let entry = decoded(&TypeDeclaration::new("java.util", "Entry").nested_in(["Map"]));
    let exact = QualifiedTypeDeclarationPattern::new(
        Some("java.util.Map"),
        Some("Entry"),
        TypeSuffix::Type,
        MatchRule::exact_case_sensitive(),
    );
    let partial = QualifiedTypeDeclarationPattern::new(
        Some("java.util"),
        Some("Entry"),
        TypeSuffix::Type,
        MatchRule::exact_case_sensitive(),
    );
    let folded = QualifiedTypeDeclarationPattern::new(
        Some("JAVA.UTIL.MAP"),
        Some("entry"),
        TypeSuffix::Type,
        MatchRule::new(MatchMode::Exact, false),
    );

    check!(exact.matches_decoded_key(&entry));
    check!(!partial.matches_decoded_key(&entry));
    check!(folded.matches_decoded_key(&entry));
}

/// Test: A qualification sub-pattern uses its own rule, not the type rule.
#[test]
fn qualification_sub_pattern_delegates() {
    let pattern = QualifiedTypeDeclarationPattern::builder()
        .simple_name("Entry")
        .qualification("java.util")
        .qualification_rule(MatchRule::new(MatchMode::Prefix, true))
        .build()
        .unwrap();

    check!(pattern.matches_decoded_key(&decoded(
        &TypeDeclaration::new("java.util", "Entry").nested_in(["Map"])
    )));
    check!(pattern.matches_decoded_key(&decoded(&TypeDeclaration::new("java.util", "Entry"))));
    check!(!pattern.matches_decoded_key(&decoded(&TypeDeclaration::new("java.io", "Entry"))));
}

/// Test: The type rule can be reused for the qualification.
#[test]
fn qualification_uses_type_rule() {
    let pattern = QualifiedTypeDeclarationPattern::builder()
        .simple_name("*List")
        .qualification("java.*")
        .qualification_uses_type_rule()
        .mode(MatchMode::Pattern)
        .build()
        .unwrap();

    check!(pattern.matches_decoded_key(&decoded(&TypeDeclaration::new("java.util", "ArrayList"))));
    check!(!pattern.matches_decoded_key(&decoded(&TypeDeclaration::new("javax.swing", "JList"))));
}

// --- Purity and rendering ---

/// Test: Matching is repeatable and rendering never changes the outcome.
#[rstest]
fn matching_is_idempotent(records: Vec<DecodedTypeRecord>) {
    let pattern = QualifiedTypeDeclarationPattern::from_qualified_name(
        "java.util.Map",
        TypeSuffix::ClassAndInterface,
        MatchRule::exact_case_sensitive(),
    );
    let first: Vec<bool> = records.iter().map(|r| pattern.matches_decoded_key(r)).collect();
    let _rendered = pattern.to_string();
    let second: Vec<bool> = records.iter().map(|r| pattern.matches_decoded_key(r)).collect();

    check!(first == second);
    check!(first.iter().filter(|&&m| m).count() == 1);
}

#[rstest]
#[case(TypeSuffix::Class, "ClassDeclarationPattern")]
#[case(TypeSuffix::ClassAndInterface, "ClassAndInterfaceDeclarationPattern")]
#[case(TypeSuffix::ClassAndEnum, "ClassAndEnumDeclarationPattern")]
#[case(TypeSuffix::Interface, "InterfaceDeclarationPattern")]
#[case(TypeSuffix::InterfaceAndAnnotation, "InterfaceAndAnnotationDeclarationPattern")]
#[case(TypeSuffix::Enum, "EnumDeclarationPattern")]
#[case(TypeSuffix::AnnotationType, "AnnotationTypeDeclarationPattern")]
#[case(TypeSuffix::Type, "TypeDeclarationPattern")]
fn print_labels(#[case] suffix: TypeSuffix, #[case] label: &str) {
    let pattern = QualifiedTypeDeclarationPattern::new(
        None,
        Some("Foo"),
        suffix,
        MatchRule::new(MatchMode::Prefix, false),
    );
    check!(
        pattern.to_string()
            == format!(
                "{}: qualification<*>, type<foo>, prefix match, case insensitive",
                label
            )
    );
}

#[test]
fn print_includes_module_filter() {
    let pattern = QualifiedTypeDeclarationPattern::builder()
        .qualification("java.lang")
        .module_name("java.base")
        .build()
        .unwrap();
    check!(
        pattern.to_string()
            == "TypeDeclarationPattern: qualification<java.lang>, type<*>, module<java.base>, exact match, case sensitive"
    );
}
