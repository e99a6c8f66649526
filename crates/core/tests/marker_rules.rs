use libseek_core::model::AddressedString;
use libseek_core::seekers::marker::{self, match_banner, match_install_path, MarkerRules};

const WIDGET: MarkerRules = MarkerRules {
    name: "Widget",
    banner_marker: " built with Widget ",
    keywords: &["codec", "parser"],
    install_marker: None,
    min_install_suffix: 4,
};

#[test]
fn custom_rules_drive_the_same_engine() {
    let corpus = vec![
        AddressedString::new(0x10, "codec built with Widget 2.4.1-beta"),
        AddressedString::new(0x20, "/Cellar/widget/2.4.1/lib"),
    ];
    let outcome = marker::scan(&WIDGET, &corpus);
    assert_eq!(outcome.library, "Widget");
    assert_eq!(outcome.match_count(), 1);
    assert_eq!(marker::versions(&WIDGET, &outcome), vec!["2.4.1".to_string()]);
}

#[test]
fn match_banner_chops_at_first_marker() {
    let chopped = match_banner(&WIDGET, "parser built with Widget 1.0 built with Widget 2.0");
    assert_eq!(chopped, Some(" built with Widget 1.0 built with Widget 2.0"));
}

#[test]
fn install_marker_is_optional() {
    assert_eq!(match_install_path(&WIDGET, "/Cellar/widget/2.4.1/lib"), None);
}

#[test]
fn empty_install_segment_is_rejected() {
    let rules = MarkerRules { install_marker: Some("/Cellar/widget"), ..WIDGET };
    assert_eq!(match_install_path(&rules, "/Cellar/widget@2//lib"), None);
    assert_eq!(match_install_path(&rules, "/Cellar/widget@2/2.4.1/lib"), Some("2.4.1"));
}
