//! Property-based tests for button resolution

use super::*;
use proptest::prelude::*;
use serde_json::json;

fn arb_button() -> impl Strategy<Value = Button> {
    ("[а-яА-Яa-z ]{1,12}", proptest::option::of(0i64..100), any::<bool>()).prop_map(
        |(title, payload, with_url)| {
            let mut button = Button::new(title);
            if let Some(n) = payload {
                button = button.with_payload(json!({ "n": n }));
            }
            if with_url {
                button = button.with_url("http://localhost/");
            }
            button
        },
    )
}

fn arb_buttons() -> impl Strategy<Value = Vec<Button>> {
    proptest::collection::vec(arb_button(), 1..8)
}

proptest! {
    #[test]
    fn prop_resolve_is_idempotent(buttons in arb_buttons(), pick in any::<prop::sample::Index>()) {
        let title = buttons[pick.index(buttons.len())].title.clone();
        let selector = Selector::from(title);
        let snapshot = buttons.clone();

        let first = resolve(Some(buttons.as_slice()), &selector).unwrap().clone();
        let second = resolve(Some(buttons.as_slice()), &selector).unwrap().clone();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&buttons, &snapshot);
    }

    #[test]
    fn prop_title_resolves_to_first_occurrence(buttons in arb_buttons(), pick in any::<prop::sample::Index>()) {
        let title = &buttons[pick.index(buttons.len())].title;
        let expected = buttons.iter().find(|b| &b.title == title).unwrap();
        let resolved = resolve(Some(buttons.as_slice()), &Selector::from(title.as_str())).unwrap();
        prop_assert_eq!(resolved, expected);
    }

    #[test]
    fn prop_not_found_lists_every_title(buttons in arb_buttons()) {
        // Digits never appear in generated titles
        let err = resolve(Some(buttons.as_slice()), &Selector::from("0")).unwrap_err();
        match err {
            Error::ButtonNotFound { selector, titles } => {
                prop_assert_eq!(selector, "0");
                let expected: Vec<String> = buttons.iter().map(|b| b.title.clone()).collect();
                prop_assert_eq!(titles, expected);
            }
            other => prop_assert!(false, "unexpected error: {other}"),
        }
    }

    #[test]
    fn prop_escaped_title_pattern_matches_like_title(buttons in arb_buttons(), pick in any::<prop::sample::Index>()) {
        let title = &buttons[pick.index(buttons.len())].title;
        let pattern = Selector::pattern(&format!("^{}$", regex::escape(title)), "").unwrap();
        let by_pattern = resolve(Some(buttons.as_slice()), &pattern).unwrap();
        let by_title = resolve(Some(buttons.as_slice()), &Selector::from(title.as_str())).unwrap();
        prop_assert_eq!(by_pattern, by_title);
    }
}
