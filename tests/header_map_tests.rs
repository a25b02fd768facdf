use muxchan::constants::{CLIENT_TIMEOUT_HEADER, PRIORITY_HEADER};
use muxchan::header::{HeaderMap, RequestHeader, add_rpc_option_headers, merge_headers};
use muxchan::rpc::{RpcOptions, RpcPriority};
use rand::Rng;
use std::time::Duration;

fn header_map(pairs: &[(&str, &str)]) -> HeaderMap {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn random_map(rng: &mut impl Rng) -> HeaderMap {
    let len = rng.random_range(0..8);
    (0..len)
        .map(|_| {
            // Small key space so collisions between maps are common.
            let key = format!("k{}", rng.random_range(0..6));
            let value = format!("v{}", rng.random_range(0..1000));
            (key, value)
        })
        .collect()
}

#[test]
fn test_merge_override_wins_on_collision() {
    let defaults = header_map(&[("a", "1")]);
    let overrides = header_map(&[("a", "2"), ("b", "3")]);

    assert_eq!(
        merge_headers(&defaults, &overrides),
        header_map(&[("a", "2"), ("b", "3")])
    );
}

#[test]
fn test_merge_with_empty_sides() {
    let defaults = header_map(&[("a", "1"), ("c", "9")]);

    assert_eq!(merge_headers(&defaults, &HeaderMap::new()), defaults);
    assert_eq!(merge_headers(&HeaderMap::new(), &defaults), defaults);
    assert!(merge_headers(&HeaderMap::new(), &HeaderMap::new()).is_empty());
}

#[test]
fn test_merge_matches_definition_for_random_maps() {
    let mut rng = rand::rng();

    for _ in 0..500 {
        let defaults = random_map(&mut rng);
        let overrides = random_map(&mut rng);
        let merged = merge_headers(&defaults, &overrides);

        for (key, value) in &merged {
            let expected = overrides.get(key).or_else(|| defaults.get(key));
            assert_eq!(Some(value), expected, "unexpected value for {key}");
        }
        for key in defaults.keys().chain(overrides.keys()) {
            assert!(merged.contains_key(key), "missing key {key}");
        }
    }
}

#[test]
fn test_option_headers_only_for_set_options() {
    let mut headers = HeaderMap::new();
    add_rpc_option_headers(&mut headers, &RpcOptions::new());
    assert!(headers.is_empty());

    let options = RpcOptions::new()
        .with_timeout(Duration::from_millis(1500))
        .with_priority(RpcPriority::BestEffort);
    add_rpc_option_headers(&mut headers, &options);
    assert_eq!(
        headers,
        header_map(&[(CLIENT_TIMEOUT_HEADER, "1500"), (PRIORITY_HEADER, "4")])
    );
}

#[test]
fn test_request_header_take_leaves_it_empty() {
    let mut header = RequestHeader::new().with_header("x", "1");
    assert_eq!(header.header("x"), Some("1"));

    let taken = header.take_write_headers();
    assert_eq!(taken, header_map(&[("x", "1")]));
    assert!(header.is_empty());
}
