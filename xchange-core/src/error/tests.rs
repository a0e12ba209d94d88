#![allow(clippy::disallowed_methods)] // unwrap() is acceptable in tests
#![allow(clippy::uninlined_format_args)] // format!("{}", x) is acceptable in tests

use super::convert::{MAX_ERROR_MESSAGE_LEN, truncate_message};
use super::*;

#[test]
fn test_exchange_error_details_display() {
    let details = ExchangeErrorDetails::new("400", "Bad Request");
    let display = format!("{details}");
    assert!(display.contains("400"));
    assert!(display.contains("Bad Request"));
}

#[test]
fn test_exchange_error_with_data_keeps_payload() {
    let data = serde_json::json!({"code": -1121, "msg": "Invalid symbol."});
    let err = Error::exchange_with_data("-1121", "Invalid symbol.", data.clone());
    if let Error::Exchange(details) = &err {
        assert_eq!(details.code, "-1121");
        assert_eq!(details.data, Some(data));
    } else {
        panic!("Expected Exchange variant");
    }
}

#[test]
fn test_error_authentication() {
    let err = Error::authentication("binance requires apiKey");
    assert!(matches!(err, Error::Authentication(_)));
    assert!(err.to_string().contains("requires apiKey"));
}

#[test]
fn test_market_not_loaded_display() {
    let err = Error::market_not_loaded("gdax");
    assert_eq!(err.to_string(), "gdax markets not loaded");
}

#[test]
fn test_bad_symbol_message() {
    let err = Error::bad_symbol("kucoin", "FOO/BAR");
    assert_eq!(
        err.as_market_not_found(),
        Some("kucoin does not have market symbol FOO/BAR")
    );
}

#[test]
fn test_malformed_is_parse_missing_field() {
    let err = Error::malformed("time");
    assert!(matches!(
        err.as_parse(),
        Some(ParseError::MissingField(f)) if f == "time"
    ));
}

#[test]
fn test_error_context_chain() {
    let err = Error::network("Connection refused")
        .context("Failed to fetch ticker")
        .context("Aggregation failed");
    let report = err.report();
    assert!(report.starts_with("Aggregation failed"));
    assert!(report.contains("Caused by: Failed to fetch ticker"));
    assert!(report.contains("Connection refused"));
}

#[test]
fn test_error_root_cause() {
    let err = Error::not_supported("fetchTrades").context("outer");
    assert!(matches!(err.root_cause(), Error::NotSupported(_)));
    assert_eq!(err.as_not_supported(), Some("fetchTrades"));
}

#[test]
fn test_error_is_retryable() {
    assert!(Error::timeout("slow").is_retryable());
    assert!(Error::network("reset").is_retryable());
    assert!(Error::from(NetworkError::Timeout).context("x").is_retryable());
    assert!(!Error::authentication("nope").is_retryable());
    assert!(!Error::malformed("price").is_retryable());
}

#[test]
fn test_as_authentication_through_context() {
    let err = Error::authentication("missing secret").context("signing");
    assert_eq!(err.as_authentication(), Some("missing secret"));
}

#[test]
fn test_context_ext_result_and_option() {
    let res: std::result::Result<(), ParseError> = Err(ParseError::missing_field("id"));
    let err = res.context("parse order").unwrap_err();
    assert!(matches!(err, Error::Context { .. }));
    assert!(err.as_parse().is_some());

    let none: Option<u8> = None;
    let err = none.context("no value").unwrap_err();
    assert!(matches!(err, Error::InvalidRequest(_)));
}

#[test]
fn test_from_serde_json_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    let err: Error = json_err.into();
    assert!(matches!(err.as_parse(), Some(ParseError::Json(_))));
}

#[test]
fn test_truncate_message() {
    let short = "short".to_string();
    assert_eq!(truncate_message(short.clone()), short);

    let long = "é".repeat(MAX_ERROR_MESSAGE_LEN);
    let truncated = truncate_message(long);
    assert!(truncated.ends_with("... (truncated)"));
    assert!(truncated.len() <= MAX_ERROR_MESSAGE_LEN + "... (truncated)".len());
}

#[test]
fn error_is_send_sync_static() {
    fn assert_traits<T: Send + Sync + 'static + std::error::Error>() {}
    assert_traits::<Error>();
    assert_traits::<NetworkError>();
    assert_traits::<ParseError>();
}

#[test]
fn error_size_is_reasonable() {
    assert!(std::mem::size_of::<Error>() <= 56);
}

mod property_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_message() -> impl Strategy<Value = String> {
        "[a-zA-Z0-9 ]{1,40}"
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_http_status_preserved_through_context(
            status in 100u16..600u16,
            message in arb_message(),
            ctx in arb_message(),
        ) {
            let err: Error = NetworkError::RequestFailed { status, message: message.clone() }.into();
            let err = err.context(ctx);
            match err.root_cause() {
                Error::Network(ne) => match ne.as_ref() {
                    NetworkError::RequestFailed { status: s, message: m } => {
                        prop_assert_eq!(*s, status);
                        prop_assert_eq!(m, &message);
                    }
                    _ => prop_assert!(false, "wrong network variant"),
                },
                _ => prop_assert!(false, "wrong root cause"),
            }
        }

        #[test]
        fn prop_context_depth_is_preserved(
            contexts in proptest::collection::vec("[a-zA-Z0-9]{3,15}", 1..=8)
        ) {
            let mut err = Error::invalid_request("base");
            for c in &contexts {
                err = err.context(c.clone());
            }
            let report = err.report();
            prop_assert_eq!(report.lines().count(), contexts.len() + 1);
            prop_assert!(matches!(err.root_cause(), Error::InvalidRequest(_)));
        }
    }
}
