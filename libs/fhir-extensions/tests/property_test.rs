//! Property-based tests using QuickCheck

use ferrum_extensions::*;
use ferrum_models::common::Element;
use quickcheck::{QuickCheck, TestResult};
use rust_decimal::Decimal;

const URLS: [&str; 3] = ["http://example.org/a", "http://example.org/b", "http://example.org/c"];

/// Build an element by replaying (url index, value) pairs as `add` calls
fn build(ops: &[(u8, i32)]) -> Element {
    let mut elem = Element::new();
    for (url, value) in ops {
        add_extension_integer_value(&mut elem, URLS[*url as usize % URLS.len()], *value)
            .expect("element exists");
    }
    elem
}

fn urls(elem: &Element) -> Vec<&str> {
    elem.extension
        .iter()
        .flatten()
        .map(|e| e.url.as_str())
        .collect()
}

/// Property: after `set`, exactly one entry for the url remains, holding the
/// new value at the index the url first occupied
#[test]
fn prop_set_collapses_to_first_position() {
    fn prop(ops: Vec<(u8, i32)>, url: u8, value: i32) -> bool {
        let url = URLS[url as usize % URLS.len()];
        let mut elem = build(&ops);
        let before: Vec<String> = urls(&elem).into_iter().map(str::to_owned).collect();
        let first = before.iter().position(|u| u == url);

        set_extension_integer_value(&mut elem, url, value).expect("element exists");

        let after = urls(&elem);
        let positions: Vec<usize> = after
            .iter()
            .enumerate()
            .filter(|(_, u)| **u == url)
            .map(|(i, _)| i)
            .collect();

        let expected_index = first.unwrap_or(after.len() - 1);
        let others_before: Vec<&str> = before
            .iter()
            .map(String::as_str)
            .filter(|u| *u != url)
            .collect();
        let others_after: Vec<&str> = after.iter().copied().filter(|u| *u != url).collect();

        positions == vec![expected_index]
            && get_extension_integer_value(&elem, url) == Some(value)
            && others_before == others_after
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(u8, i32)>, u8, i32) -> bool);
}

/// Property: `add` appends in call order and never deduplicates
#[test]
fn prop_add_preserves_order() {
    fn prop(ops: Vec<(u8, i32)>) -> bool {
        let elem = build(&ops);
        let all: Vec<i32> = URLS
            .iter()
            .flat_map(|url| get_extension_integer_values(&elem, url).unwrap_or_default())
            .collect();

        elem.extension.as_ref().map_or(0, Vec::len) == ops.len()
            && all.len() == ops.len()
            && URLS.iter().enumerate().all(|(i, url)| {
                let expected: Vec<i32> = ops
                    .iter()
                    .filter(|(u, _)| *u as usize % URLS.len() == i)
                    .map(|(_, v)| *v)
                    .collect();
                get_extension_integer_values(&elem, url).unwrap_or_default() == expected
            })
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(u8, i32)>) -> bool);
}

/// Property: after `clear`, the url is gone and an emptied array is absent
#[test]
fn prop_clear_removes_url_and_empty_array() {
    fn prop(ops: Vec<(u8, i32)>, url: u8) -> bool {
        let url = URLS[url as usize % URLS.len()];
        let mut elem = build(&ops);
        let remaining = urls(&elem).into_iter().filter(|u| *u != url).count();

        clear_extension(&mut elem, url);

        !has_extension(&elem, url)
            && match &elem.extension {
                None => remaining == 0,
                Some(exts) => !exts.is_empty() && exts.len() == remaining,
            }
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(u8, i32)>, u8) -> bool);
}

/// Property: multi-value getters return `None`, never an empty vector
#[test]
fn prop_values_never_empty() {
    fn prop(ops: Vec<(u8, i32)>, url: u8) -> TestResult {
        let url = URLS[url as usize % URLS.len()];
        let elem = build(&ops);

        match get_extension_integer_values(&elem, url) {
            Some(values) => TestResult::from_bool(!values.is_empty()),
            None => TestResult::from_bool(!has_extension(&elem, url)),
        }
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(u8, i32)>, u8) -> TestResult);
}

/// Property: a JSON round trip leaves every typed lookup unchanged
#[test]
fn prop_json_round_trip_preserves_lookups() {
    fn prop(ops: Vec<(u8, i32)>) -> bool {
        let elem = build(&ops);
        let json = serde_json::to_string(&elem).expect("serialize");
        let back: Element = serde_json::from_str(&json).expect("deserialize");

        back == elem
            && URLS.iter().all(|url| {
                get_extension_integer_value(&back, url) == get_extension_integer_value(&elem, url)
                    && get_extension_integer_values(&back, url)
                        == get_extension_integer_values(&elem, url)
            })
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<(u8, i32)>) -> bool);
}

fn round_trip(elem: &Element) -> Element {
    let json = serde_json::to_string(elem).expect("serialize");
    serde_json::from_str(&json).expect("deserialize")
}

/// Property: decimals survive a JSON round trip digit for digit
#[test]
fn prop_json_round_trip_preserves_decimals() {
    fn prop(values: Vec<(i64, u8)>) -> bool {
        let decimals: Vec<Decimal> = values
            .iter()
            .map(|(mantissa, scale)| Decimal::new(*mantissa, u32::from(*scale) % 29))
            .collect();

        let mut elem = Element::new();
        for decimal in &decimals {
            add_extension_decimal_value(&mut elem, URLS[0], *decimal).expect("element exists");
        }
        let back = round_trip(&elem);

        let texts = |e: &Element| -> Option<Vec<String>> {
            get_extension_decimal_values(e, URLS[0])
                .map(|values| values.iter().map(Decimal::to_string).collect())
        };

        back == elem
            && get_extension_decimal_value(&back, URLS[0]) == decimals.first().copied()
            && texts(&back) == texts(&elem)
    }

    QuickCheck::new()
        .tests(200)
        .quickcheck(prop as fn(Vec<(i64, u8)>) -> bool);
}

/// Property: arbitrary strings survive a JSON round trip
#[test]
fn prop_json_round_trip_preserves_strings() {
    fn prop(values: Vec<String>) -> bool {
        let mut elem = Element::new();
        for value in &values {
            add_extension_string_value(&mut elem, URLS[1], value.as_str()).expect("element exists");
        }
        let back = round_trip(&elem);

        back == elem
            && get_extension_string_values(&back, URLS[1])
                == get_extension_string_values(&elem, URLS[1])
    }

    QuickCheck::new()
        .tests(100)
        .quickcheck(prop as fn(Vec<String>) -> bool);
}
