//! Property-based tests for newrelic_logger using proptest

use newrelic_logger::dump;
use newrelic_logger::prelude::*;
use proptest::prelude::*;
use serde_json::Value;

fn any_level() -> impl Strategy<Value = LogLevel> {
    prop_oneof![
        Just(LogLevel::Emergency),
        Just(LogLevel::Alert),
        Just(LogLevel::Critical),
        Just(LogLevel::Error),
        Just(LogLevel::Warning),
        Just(LogLevel::Notice),
        Just(LogLevel::Info),
        Just(LogLevel::Debug),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9 ]{0,12}".prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4)
                .prop_map(|map| Value::Object(map.into_iter().collect())),
        ]
    })
}

fn context_entries() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec(
        (
            prop_oneof![Just("exception".to_string()), "[a-z]{1,8}"],
            json_value(),
        ),
        0..8,
    )
}

fn build_context(entries: &[(String, Value)], fatal: Option<FatalError>) -> Context {
    let mut context: Context = entries.iter().cloned().collect();
    if let Some(fatal) = fatal {
        context.insert(EXCEPTION_KEY, fatal);
    }
    context
}

// ============================================================================
// LogLevel Tests
// ============================================================================

proptest! {
    /// Test that LogLevel string conversions roundtrip correctly
    #[test]
    fn test_log_level_str_roundtrip(level in any_level(), upper in any::<bool>()) {
        let name = if upper { level.to_str().to_uppercase() } else { level.to_str().to_string() };
        let parsed: LogLevel = name.parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    /// Test that only critical and more severe levels are reportable by default
    #[test]
    fn test_default_threshold(level in any_level()) {
        let logger = NewRelicLogger::new(RecordingAgent::new());
        let expected = matches!(level, LogLevel::Emergency | LogLevel::Alert | LogLevel::Critical);
        prop_assert_eq!(logger.is_reportable(level), expected);
    }
}

// ============================================================================
// Logger Tests
// ============================================================================

proptest! {
    /// Test parameter count and order for every log call
    #[test]
    fn test_parameters_follow_context_order(
        level in any_level(),
        entries in context_entries(),
        message in "[a-zA-Z ]{0,20}",
    ) {
        let agent = RecordingAgent::new();
        let logger = NewRelicLogger::new(&agent);
        let context = build_context(&entries, None);

        logger.log(level, &message, &context).unwrap();

        if logger.is_reportable(level) {
            let mut expected_keys = vec![LEVEL_PARAMETER.to_string()];
            expected_keys.extend(
                context.keys().filter(|k| *k != EXCEPTION_KEY).map(String::from),
            );
            let keys: Vec<String> = agent.custom_parameters().into_iter().map(|(k, _)| k).collect();
            prop_assert_eq!(keys, expected_keys);
            prop_assert_eq!(
                &agent.custom_parameters()[0].1,
                &FieldValue::from(level.to_str())
            );

            let noticed = agent.noticed_errors();
            prop_assert_eq!(noticed.len(), 1);
            prop_assert_eq!(&noticed[0].0, &message);
            let last_is_notice_error = matches!(agent.calls().last(), Some(AgentCall::NoticeError { .. }));
            prop_assert!(last_is_notice_error);
        } else {
            prop_assert!(agent.calls().is_empty());
        }
    }

    /// Test that composite values are attached as their dump
    #[test]
    fn test_composites_attach_dump(entries in context_entries()) {
        let agent = RecordingAgent::new();
        let logger = NewRelicLogger::new(&agent);
        let context = build_context(&entries, None);

        logger.critical("msg", &context).unwrap();

        let attached = agent.custom_parameters();
        for (key, value) in context.iter().filter(|(k, _)| *k != EXCEPTION_KEY) {
            let (_, sent) = attached.iter().find(|(k, _)| k == key).unwrap();
            match value {
                ContextValue::Scalar(scalar) => prop_assert_eq!(sent, scalar),
                ContextValue::Composite(composite) => {
                    prop_assert_eq!(sent, &FieldValue::String(dump(composite)))
                }
                ContextValue::Exception(_) => unreachable!("entries are built from JSON"),
            }
        }
    }

    /// Test that the dump is stable across structurally equal values
    #[test]
    fn test_dump_is_deterministic(value in json_value()) {
        let reparsed: Value = serde_json::from_str(&value.to_string()).unwrap();
        prop_assert_eq!(dump(&value), dump(&reparsed));
    }

    /// Test that fatal errors are converted field by field
    #[test]
    fn test_fatal_error_conversion(
        message in ".{0,30}",
        code in any::<i64>(),
        file in "[a-z]{1,8}\\.rs",
        line in 1u32..10000u32,
        entries in context_entries(),
    ) {
        let agent = RecordingAgent::new();
        let logger = NewRelicLogger::new(&agent);
        let fatal = FatalError::new(message.clone()).with_code(code).with_location(file.clone(), line);
        let context = build_context(&entries, Some(fatal));

        logger.emergency("fatal", &context).unwrap();

        let noticed = agent.noticed_errors();
        let exception = noticed[0].1.as_ref().unwrap();
        prop_assert_eq!(exception.message(), message.as_str());
        prop_assert_eq!(exception.code(), code);
        prop_assert_eq!(exception.file(), Some(file.as_str()));
        prop_assert_eq!(exception.line(), Some(line));
    }
}
