//! Tests for configuration-time validation.
mod common;
use common::*;
use sentaku::prelude::*;

#[test]
fn test_valid_config_checks_corner_cases_only() {
    let evaluator = RecordingEvaluator::new();
    let config = Config::new("1d20+{Mod:-4<=>10}");

    assert_eq!(validate_config(&config, &evaluator), Ok(()));
    assert_eq!(
        evaluator.validated_sorted(),
        vec!["1d20+-4", "1d20+0", "1d20+10"]
    );
}

#[test]
fn test_corner_cases_include_non_numeric_and_direct_rolls() {
    let evaluator = RecordingEvaluator::new();
    let config = Config::new("{Mode:1d20@Normal/2d20k1@!Advantage/5/6/7} + {Mod:1/2/3}");

    assert_eq!(validate_config(&config, &evaluator), Ok(()));
    assert_eq!(
        evaluator.validated_sorted(),
        vec![
            "1d20 + 1",
            "1d20 + 3",
            "2d20k1 + ''",
            "5 + 1",
            "5 + 3",
            "7 + 1",
            "7 + 3",
        ]
    );
}

#[test]
fn test_expression_rejected_by_engine() {
    let evaluator = RecordingEvaluator::rejecting("+0");
    let config = Config::new("1d20+{Mod:-4<=>10}@Attack");

    assert_eq!(
        validate_config(&config, &evaluator),
        Err(ConfigError::ExpressionInvalid {
            expression: "1d20+0".to_string(),
            message: "'+0' is not allowed".to_string(),
        })
    );
}

#[test]
fn test_dice_engine_rejects_broken_branches() {
    let evaluator = DiceEvaluator::new();

    let zero_sides = validate_config(&Config::new("1d{Sides:0/6/8}"), &evaluator);
    assert!(matches!(
        zero_sides,
        Err(ConfigError::ExpressionInvalid { ref expression, .. }) if expression == "1d0"
    ));

    let division = validate_config(&Config::new("10/{Div:0<=>3}"), &evaluator);
    assert!(matches!(
        division,
        Err(ConfigError::ExpressionInvalid { ref expression, .. }) if expression == "10/0"
    ));

    assert_eq!(
        validate_config(&Config::new("{Count:1<=>4}d{Sides:4@D4/6@D6/20@D20}k1"), &evaluator),
        Ok(())
    );
}

#[test]
fn test_oversized_button_id_reports_overage() {
    // At the second placeholder each option id is
    // command + 3 delimiters + the 83 character selection + "id1" = 105.
    let long_value = "x".repeat(83);
    let config = Config::new(format!("{{A:{}/y}} + {{B:1/2}}", long_value));

    match validate_config(&config, &RecordingEvaluator::new()) {
        Err(ConfigError::IdentifierTooLong {
            length,
            limit,
            overage,
            ..
        }) => {
            assert_eq!(length, 105);
            assert_eq!(limit, 100);
            assert_eq!(overage, 5);
        }
        other => panic!("Expected IdentifierTooLong, got {:?}", other),
    }
}

#[test]
fn test_routing_target_counts_towards_id_length() {
    let long_value = "x".repeat(70);
    let template = format!("{{A:{}/y}} + {{B:1/2}}", long_value);

    let evaluator = RecordingEvaluator::new();
    assert_eq!(validate_config(&Config::new(template.clone()), &evaluator), Ok(()));

    let routed = Config::new(template).with_answer_target(123_456_789_012_345_678);
    assert!(matches!(
        validate_config(&routed, &evaluator),
        Err(ConfigError::IdentifierTooLong { .. })
    ));
}

#[test]
fn test_five_placeholders_are_too_many() {
    let config = Config::new("{A}+{B}+{C}+{D}+{E}");
    assert_eq!(
        validate_config(&config, &RecordingEvaluator::new()),
        Err(ConfigError::TooManyPlaceholders { max: 4 })
    );
}

#[test]
fn test_direct_rolls_end_paths_before_depth_bound() {
    let evaluator = RecordingEvaluator::new();
    let config = Config::new("{A:1d20@!Roll/2d20@!Twice}+{B}+{C}+{D}+{E}");

    assert_eq!(validate_config(&config, &evaluator), Ok(()));
    assert_eq!(
        evaluator.validated_sorted(),
        vec!["1d20+''+''+''+''", "2d20+''+''+''+''"]
    );
}

#[test]
fn test_duplicate_values_are_rejected() {
    let config = Config::new("1d20+{X:1@One/2@Two/1@Uno}");
    assert_eq!(
        validate_config(&config, &RecordingEvaluator::new()),
        Err(ConfigError::DuplicateOption {
            placeholder: "{X:1@One/2@Two/1@Uno}".to_string(),
            value: "1".to_string(),
        })
    );
}

#[test]
fn test_template_level_checks() {
    let evaluator = RecordingEvaluator::new();

    assert!(matches!(
        validate_config(&Config::new("1d20 + 5"), &evaluator),
        Err(ConfigError::MalformedTemplate { position: 0, .. })
    ));
    assert!(matches!(
        validate_config(&Config::new("1d20\t+{X}"), &evaluator),
        Err(ConfigError::MalformedTemplate { position: 4, .. })
    ));
    assert!(matches!(
        validate_config(&Config::new("1d20+{X"), &evaluator),
        Err(ConfigError::MalformedTemplate { position: 5, .. })
    ));
    assert!(evaluator.validated_sorted().is_empty());
}

#[test]
fn test_path_ceiling() {
    let limits = Limits {
        max_explored_paths: 3,
        ..Limits::default()
    };
    let evaluator = RecordingEvaluator::new();
    let result = Validator::new(limits).validate(&Config::new("{A}+{B}"), &evaluator);

    assert_eq!(result, Err(ConfigError::TooManyPaths { paths: 4, limit: 3 }));
}

#[test]
fn test_validation_is_idempotent() {
    let evaluator = RecordingEvaluator::rejecting("d0");
    let config = Config::new("{Count:1/2/3}d{Sides:0/4/6}+{Mod:a/b}");

    let first = validate_config(&config, &evaluator);
    let second = validate_config(&config, &evaluator);
    assert!(first.is_err());
    assert_eq!(first, second);
}

#[test]
fn test_depth_bound_wins_over_path_ceiling() {
    let placeholder = "{X:a/b/c/d/e/f/g/h/i}";
    let config = Config::new(vec![placeholder; 5].join("+"));

    assert_eq!(
        validate_config(&config, &RecordingEvaluator::new()),
        Err(ConfigError::TooManyPlaceholders { max: 4 })
    );

    let four = Config::new(vec![placeholder; 4].join("+"));
    assert_eq!(
        validate_config(&four, &RecordingEvaluator::new()),
        Err(ConfigError::TooManyPaths {
            paths: 6561,
            limit: 4096
        })
    );
}
