//! End-to-end checks for the public spec-reading API.

use proptest::prelude::*;
use rstest::rstest;

use layspec::{
    read, Location, Range, ReaderConfig, Side, Spec, SpecKind, SyntaxError,
    DEFAULT_RANGE_APPROXIMATION, RANGE_APPROXIMATION_KEY,
};

fn read_default(text: &str) -> Spec {
    read(text, &ReaderConfig::default()).expect("valid spec")
}

#[rstest]
#[case::bare("inside main-box", false, vec![])]
#[case::partly("inside partly main-box", true, vec![])]
#[case::one_location(
    "inside main-box 25px top left",
    false,
    vec![Location::new(Range::exact(25), vec![Side::Top, Side::Left])]
)]
#[case::many_locations(
    "inside main-box 25px top left, 10 to 20px bottom",
    false,
    vec![
        Location::new(Range::exact(25), vec![Side::Top, Side::Left]),
        Location::new(Range::between(10, 20), vec![Side::Bottom]),
    ]
)]
fn reads_inside_specs(#[case] text: &str, #[case] partly: bool, #[case] locations: Vec<Location>) {
    let spec = read_default(text);
    assert_eq!(
        spec.kind(),
        &SpecKind::Inside {
            object: "main-box".into(),
            partly,
            locations,
        }
    );
}

#[rstest]
#[case::near(
    "near button 10px left",
    SpecKind::Near {
        object: "button".into(),
        locations: vec![Location::new(Range::exact(10), vec![Side::Left])],
    }
)]
#[case::above_any_distance("above header", SpecKind::Above { object: "header".into(), range: None })]
#[case::above_ranged(
    "above header 5 to 10px",
    SpecKind::Above { object: "header".into(), range: Some(Range::between(5, 10)) }
)]
#[case::below("below footer 12px", SpecKind::Below { object: "footer".into(), range: Some(Range::exact(12)) })]
#[case::width("width 100px", SpecKind::Width { range: Range::exact(100) })]
#[case::height("height 40 to 60px", SpecKind::Height { range: Range::between(40, 60) })]
#[case::visible("visible", SpecKind::Visible)]
#[case::absent("absent", SpecKind::Absent)]
fn reads_adjacency_and_size_specs(#[case] text: &str, #[case] expected: SpecKind) {
    assert_eq!(read_default(text).kind(), &expected);
}

#[test]
fn reads_ranged_inside_spec() {
    let spec = read_default("inside object 10 to 30px left");
    assert_eq!(
        spec.kind(),
        &SpecKind::Inside {
            object: "object".into(),
            partly: false,
            locations: vec![Location::new(Range::between(10, 30), vec![Side::Left])],
        }
    );
}

#[test]
fn echoes_normalized_source_text() {
    let spec = read_default("inside object 25px top left right bottom ");
    assert_eq!(spec.original_text(), "inside object 25px top left right bottom");
}

#[test]
fn side_order_follows_the_source() {
    let spec = read_default("inside object 25px bottom top");
    let SpecKind::Inside { locations, .. } = spec.kind() else {
        panic!("expected an `inside` spec");
    };
    assert_eq!(locations[0].sides(), [Side::Bottom, Side::Top]);
}

#[test]
fn default_tolerance_expands_approximate_ranges() {
    let spec = read_default("inside object 20px left, ~30px top");
    let SpecKind::Inside { locations, .. } = spec.kind() else {
        panic!("expected an `inside` spec");
    };

    assert_eq!(locations[0].range(), Range::exact(20));
    assert_eq!(
        locations[1].range(),
        Range::between(
            30 - DEFAULT_RANGE_APPROXIMATION,
            30 + DEFAULT_RANGE_APPROXIMATION
        )
    );
}

#[test]
fn wildcards_pass_through_verbatim() {
    let spec = read_default("contains menu-item-*");
    assert_eq!(
        spec.kind(),
        &SpecKind::Contains {
            partly: false,
            objects: vec!["menu-item-*".into()],
        }
    );
}

#[test]
fn contains_keeps_object_order() {
    let spec = read_default("contains object, menu, button");
    assert_eq!(
        spec.kind(),
        &SpecKind::Contains {
            partly: false,
            objects: vec!["object".into(), "menu".into(), "button".into()],
        }
    );
}

#[rstest]
#[case::empty("", "Missing spec keyword")]
#[case::blank("   ", "Missing spec keyword")]
#[case::unknown_keyword("besides main-box 10px", "Unknown spec keyword: besides")]
#[case::inside_no_object("inside", "Missing object name")]
#[case::inside_partly_no_object("inside partly", "Missing object name")]
#[case::contains_no_object("contains", "Missing object name")]
#[case::contains_partly_no_object("contains partly", "Missing object name")]
#[case::two_word_object("contains main box, other", "Invalid object name: main box")]
#[case::word_range("inside main-box wide left", "Invalid range: wide")]
#[case::fused_range("inside main-box 10to20 left", "Invalid range: 10to20")]
#[case::reversed_range("inside main-box 30 to 10px left", "Invalid range: 30 to 10px")]
#[case::approximate_upper_bound("inside main-box 10 to ~20px left", "Invalid range: ~20px")]
#[case::no_side("inside main-box 10px", "Missing side for location")]
#[case::unknown_side("inside main-box 10px middle", "Unknown side: middle")]
#[case::duplicate_side("inside main-box 25px top top", "Duplicate side: top")]
#[case::trailing_comma("inside main-box 10px left,", "Missing location clause")]
#[case::near_no_location("near button", "Missing location clause")]
#[case::width_no_range("width", "Missing range")]
#[case::trailing_tokens("width 10px wat", "Unexpected token: wat")]
#[case::visible_with_argument("visible main-box", "Unexpected token: main-box")]
fn rejects_malformed_specs(#[case] text: &str, #[case] message: &str) {
    let err = read(text, &ReaderConfig::default()).expect_err("malformed spec");
    assert_eq!(err.to_string(), message);
}

#[test]
fn missing_object_name_is_its_own_error() {
    let err = read("inside partly", &ReaderConfig::default()).expect_err("malformed spec");
    assert_eq!(err, SyntaxError::MissingObjectName);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn approximation_window_follows_the_tolerance(
        value in 0..5000i32,
        tolerance in 0..100i32,
    ) {
        let config = ReaderConfig::default()
            .with(RANGE_APPROXIMATION_KEY, tolerance.to_string());
        let spec = read(&format!("width ~{value}px"), &config).expect("valid spec");

        let SpecKind::Width { range } = spec.kind() else {
            panic!("expected a `width` spec");
        };
        // The window is centered on the written value.
        prop_assert_eq!(*range, Range::between(value - tolerance, value + tolerance));
    }

    #[test]
    fn padding_does_not_change_the_parse(pads in prop::collection::vec("[ \t]{1,4}", 8)) {
        let canonical = "inside partly big-box 10 to 20px top";
        let words: Vec<&str> = canonical.split_whitespace().collect();

        let mut padded = String::new();
        padded.push_str(&pads[0]);
        for (word, pad) in words.iter().zip(&pads[1..]) {
            padded.push_str(word);
            padded.push_str(pad);
        }

        let config = ReaderConfig::default();
        let spec = read(&padded, &config).expect("padded spec parses");
        let baseline = read(canonical, &config).expect("canonical spec parses");

        prop_assert_eq!(spec.original_text(), canonical);
        prop_assert_eq!(spec, baseline);
    }

    #[test]
    fn echoed_text_is_stable(
        pad in "[ \t]{0,3}",
        name in "[a-z][a-z0-9-]{0,12}",
    ) {
        // `partly` in object position would be taken as the modifier.
        prop_assume!(name != "partly");

        let text = format!("{pad}contains{pad} {name} ,{pad}menu-*{pad}");

        let config = ReaderConfig::default();
        let first = read(&text, &config).expect("valid spec");
        let second = read(first.original_text(), &config).expect("echoed text parses");

        prop_assert_eq!(first.original_text(), second.original_text());
        prop_assert_eq!(first, second);
    }
}
