use std::fs;

use tracecalc::{
    Bindings, EngineConfig, Program, Value,
    ast::{BinaryOperator, LiteralValue},
    compile, compile_with,
    error::{ExprError, ParseFailure},
    evaluate,
    interpreter::{
        compiler::Instruction,
        evaluator::function::core::{BUILTIN_FUNCTIONS, lookup_builtin},
    },
    template::sweep::parse_series,
    transform::transform_series,
};
use walkdir::WalkDir;

/// Runs every `.calc` file under `tests/fixtures`.
///
/// Each line is `expression => expected`, where `expected` is a number, a
/// bracketed list, or `!Variant` for an expected error. `@name = values`
/// binds a series for the rest of the file; a single value binds a scalar.
#[test]
fn fixture_expressions_evaluate() {
    let mut count = 0;

    for entry in
        WalkDir::new("tests/fixtures").into_iter()
                                      .filter_map(Result::ok)
                                      .filter(|e| e.path().extension().is_some_and(|ext| ext == "calc"))
    {
        let path = entry.path();
        let content =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));
        let mut bindings = Bindings::new();

        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(binding) = line.strip_prefix('@') {
                let (name, values) = binding.split_once('=').expect("binding needs '='");
                let values = parse_series(values).expect("binding values");
                if let [single] = values[..] {
                    bindings.insert_scalar(name.trim(), single);
                } else {
                    bindings.insert_vector(name.trim(), values);
                }
                continue;
            }

            let (source, expected) = line.rsplit_once("=>").expect("case needs '=>'");
            let (source, expected) = (source.trim(), expected.trim());
            let location = format!("{}:{}", path.display(), i + 1);
            check_case(source, expected, &bindings, &location);
            count += 1;
        }
    }

    assert!(count > 0, "No cases found in tests/fixtures");
}

fn check_case(source: &str, expected: &str, bindings: &Bindings, location: &str) {
    let result = evaluate(source, bindings);

    if let Some(variant) = expected.strip_prefix('!') {
        match result {
            Err(e) => assert!(format!("{e:?}").starts_with(variant),
                              "{location}: '{source}' failed with {e:?}, expected {variant}"),
            Ok(v) => panic!("{location}: '{source}' gave {v}, expected {variant}"),
        }
        return;
    }

    let value = result.unwrap_or_else(|e| panic!("{location}: '{source}' failed: {e}"));
    let expected_values = parse_series(expected.trim_start_matches('[').trim_end_matches(']'))
        .unwrap_or_else(|e| panic!("{location}: bad expectation: {e}"));

    let actual = value.to_vec();
    assert_eq!(value.is_vector(),
               expected.starts_with('['),
               "{location}: '{source}' gave {value}, expected {expected}");
    assert_eq!(actual.len(),
               expected_values.len(),
               "{location}: '{source}' gave {value}, expected {expected}");
    for (a, b) in actual.iter().zip(&expected_values) {
        assert!(approx_eq(*a, *b),
                "{location}: '{source}' gave {value}, expected {expected}");
    }
}

fn approx_eq(a: f64, b: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return a.is_nan() && b.is_nan();
    }
    if a.is_infinite() || b.is_infinite() {
        return a == b;
    }
    (a - b).abs() <= 1e-9 * b.abs().max(1.0)
}

fn eval_scalar(source: &str) -> f64 {
    evaluate(source, &Bindings::new()).unwrap_or_else(|e| panic!("'{source}' failed: {e}"))
                                      .as_scalar()
                                      .unwrap_or_else(|| panic!("'{source}' is not a scalar"))
}

#[test]
fn precedence_and_associativity() {
    assert_eq!(eval_scalar("3+4*2"), 11.0);
    assert_eq!(eval_scalar("2^3^2"), 512.0);
    assert_eq!(eval_scalar("(3+4)*2"), 14.0);
    assert_eq!(eval_scalar("2*3^2"), 18.0);
}

#[test]
fn unary_minus_binds_before_exponent() {
    assert_eq!(eval_scalar("-2^2"), 4.0);
    assert_eq!(eval_scalar("-(2^2)"), -4.0);
    assert_eq!(compile("-2^2").unwrap().to_string(), "2 neg 2 ^");
}

#[test]
fn instructions_follow_emission_order() {
    assert_eq!(compile("3+4*2").unwrap().to_string(), "3 4 2 * +");
    assert_eq!(compile("2^3^2").unwrap().to_string(), "2 3 2 ^ ^");
    assert_eq!(compile("max(1, -x)").unwrap().to_string(), "1 x neg max/2");
    assert_eq!(compile("pi*2").unwrap().to_string(), "PI 2 *");
}

#[test]
fn literals_keep_integer_type_until_computed() {
    let none = Bindings::new();
    assert_eq!(evaluate("42", &none).unwrap(), Value::Integer(42));
    assert_eq!(evaluate("4/2", &none).unwrap(), Value::Real(2.0));
    assert_eq!(evaluate("-3", &none).unwrap(), Value::Real(-3.0));
    assert_eq!(evaluate("abs(3)", &none).unwrap(), Value::Real(3.0));
    assert_eq!(evaluate("2.0", &none).unwrap(), Value::Real(2.0));
}

#[test]
fn vectors_broadcast_against_scalars() {
    let mut bindings = Bindings::new();
    bindings.insert_vector("x", vec![1.0, 2.0, 3.0]);

    assert_eq!(evaluate("x+1", &bindings).unwrap(),
               Value::from(vec![2.0, 3.0, 4.0]));
    assert_eq!(evaluate("sin(0*x)", &bindings).unwrap(),
               Value::from(vec![0.0, 0.0, 0.0]));
}

#[test]
fn mismatched_vectors_report_both_lengths() {
    let bindings: Bindings = [("a", vec![1.0, 2.0, 3.0]), ("b", vec![1.0, 2.0])].into_iter()
                                                                                .collect();

    assert_eq!(evaluate("a * b", &bindings).unwrap_err(),
               ExprError::ShapeMismatch { left: 3, right: 2 });
}

#[test]
fn undefined_variable_is_named() {
    assert_eq!(evaluate("foo", &Bindings::new()).unwrap_err(),
               ExprError::UndefinedVariable { name: "foo".to_string() });
}

#[test]
fn calls_are_validated_at_compile_time() {
    assert_eq!(compile("foo(1)").unwrap_err(),
               ExprError::UnknownFunction { name: "foo".to_string() });

    let err = compile("sin(1, 2)").unwrap_err();
    assert!(matches!(err, ExprError::ArityMismatch { ref name, got: 2, .. } if name == "sin"));
    assert_eq!(err.to_string(),
               "function 'sin' expects 1 argument(s) but was given 2");
}

#[test]
fn fft_rejects_scalars() {
    assert_eq!(evaluate("fft(3)", &Bindings::new()).unwrap_err(),
               ExprError::ExpectedVector { name: "fft".to_string() });
}

#[test]
fn fft_handles_plot_length_series() {
    let y: Vec<f64> = (0..20_000).map(|t| (f64::from(t) * 0.01).sin() + f64::from(t % 3))
                                 .collect();
    let mut bindings = Bindings::new();
    bindings.insert_vector("y", y.clone());

    let started = std::time::Instant::now();
    let spectrum = evaluate("fft(y)", &bindings).unwrap().to_vec();

    assert!(started.elapsed().as_secs() < 5, "fft took {:?}", started.elapsed());
    assert_eq!(spectrum.len(), 20_000);
    assert!(approx_eq(spectrum[0], y.iter().sum::<f64>().abs()));
    assert!(approx_eq(spectrum[1], spectrum[19_999]));
}

#[test]
fn compiling_twice_gives_identical_programs() {
    let mut bindings = Bindings::new();
    bindings.insert_vector("x", vec![0.5, 1.5]);
    bindings.insert_scalar("k", 3.0);

    let source = "k * sin(x) ^ 2 - mean(x, k) / -2";
    let first = compile(source).unwrap();
    let second = compile(source).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.evaluate(&bindings).unwrap(),
               second.evaluate(&bindings).unwrap());
}

#[test]
fn one_program_serves_many_bindings() {
    let program = compile("y * 10").unwrap();

    for n in 0..4 {
        let mut bindings = Bindings::new();
        bindings.insert_scalar("y", f64::from(n));
        assert_eq!(program.evaluate(&bindings).unwrap(),
                   Value::Real(f64::from(n) * 10.0));
    }
}

#[test]
fn bindings_collect_and_extend() {
    let mut bindings: Bindings = [("a", 2.0), ("b", 5.0)].into_iter().collect();
    bindings.extend([("v", vec![1.0, 2.0]), ("a", vec![3.0])]);

    assert_eq!(bindings.len(), 3);
    assert_eq!(bindings.get("a"), Some(&Value::from(vec![3.0])));
    assert_eq!(evaluate("b * v", &bindings).unwrap(), Value::from(vec![5.0, 10.0]));
}

#[test]
fn parse_failure_points_at_offending_token() {
    let ExprError::Parse(failure) = compile("3+*2").unwrap_err() else {
        panic!("expected a parse failure");
    };

    assert_eq!(failure.line, 1);
    assert!(failure.column <= 3);
    assert_eq!(failure.caret(), "3+*2\n  ^");
}

#[test]
fn parse_failure_reports_line_of_multiline_input() {
    let ExprError::Parse(failure) = compile("1 +\n  * 2").unwrap_err() else {
        panic!("expected a parse failure");
    };

    assert_eq!(failure.line, 2);
    assert_eq!(failure.column, 3);
}

#[test]
fn parse_failures_tolerate_any_position() {
    let failure = ParseFailure::new("µ+*2", 1, 1, "inside a character");
    assert_eq!(failure.offset(), 0);
    assert_eq!((failure.line, failure.column), (1, 1));

    let failure = ParseFailure::new("2*µ", 2, 1, "split character");
    assert_eq!(failure.offset(), 2);
    assert_eq!(failure.caret(), "2*µ\n  ^");

    let failure = ParseFailure::new("1+", 99, 4, "past the end");
    assert_eq!((failure.offset(), failure.column), (2, 3));

    let unnumbered = ParseFailure { line: 0,
                                    column: 0,
                                    ..ParseFailure::new("1 +", 3, 0, "end of input") };
    assert_eq!(unnumbered.caret(), "1 +\n^");
}

#[test]
fn unclosed_parenthesis_points_at_end_of_input() {
    let ExprError::Parse(failure) = compile("(1 + 2").unwrap_err() else {
        panic!("expected a parse failure");
    };

    assert_eq!(failure.offset(), 6);
    assert!(failure.to_string().contains("end of input"));
}

#[test]
fn deep_nesting_is_rejected_without_overflow() {
    let source = format!("{}1{}", "(".repeat(10_000), ")".repeat(10_000));
    assert_eq!(compile(&source).unwrap_err(),
               ExprError::RecursionLimitExceeded { limit: 256 });

    let signs = format!("{}1", "-".repeat(10_000));
    assert!(matches!(compile(&signs),
                     Err(ExprError::RecursionLimitExceeded { .. })));
}

#[test]
fn long_operator_chains_are_not_nesting() {
    let mut bindings = Bindings::new();
    bindings.insert_scalar("x", 1.0);

    let sum = format!("x{}", "+x".repeat(299));
    assert_eq!(evaluate(&sum, &bindings).unwrap(), Value::Real(300.0));

    let long = format!("1{}", "+1".repeat(100_000));
    assert_eq!(eval_scalar(&long), 100_001.0);

    let mixed = format!("2{}{}", "*1".repeat(5_000), "-1".repeat(5_000));
    assert_eq!(eval_scalar(&mixed), -4_998.0);

    let shallow = EngineConfig { max_depth: 1 };
    let program = compile_with(&sum, &shallow).unwrap();
    assert_eq!(program.evaluate_with(&bindings, &shallow).unwrap(),
               Value::Real(300.0));
}

#[test]
fn chains_keep_left_associativity() {
    assert_eq!(compile("a - b - c").unwrap().to_string(), "a b - c -");
    assert_eq!(compile("a / b * c + d").unwrap().to_string(), "a b / c * d +");
    assert_eq!(eval_scalar("10 - 4 - 3"), 3.0);
    assert_eq!(eval_scalar("2 * (3 - 1) - 8 / 4 / 2"), 3.0);
}

#[test]
fn depth_limit_is_configurable() {
    let config = EngineConfig { max_depth: 2 };
    assert!(compile_with("(1)", &config).is_ok());
    assert_eq!(compile_with("(((1)))", &config).unwrap_err(),
               ExprError::RecursionLimitExceeded { limit: 2 });

    let program = compile("((((1))))").unwrap();
    assert_eq!(program.evaluate_with(&Bindings::new(), &config).unwrap(),
               Value::Integer(1));

    assert_eq!(compile_with("2 * (3 + (4 - 1))", &config).unwrap_err(),
               ExprError::RecursionLimitExceeded { limit: 2 });
}

#[test]
fn evaluation_enforces_its_own_depth_limit() {
    let program = compile("2 * (3 + 4)").unwrap();
    let bindings = Bindings::new();

    assert_eq!(program.evaluate_with(&bindings, &EngineConfig { max_depth: 1 })
                      .unwrap_err(),
               ExprError::RecursionLimitExceeded { limit: 1 });
    assert_eq!(program.evaluate_with(&bindings, &EngineConfig { max_depth: 2 })
                      .unwrap(),
               Value::Real(14.0));

    let nested = compile("sqrt(abs(-x))").unwrap();
    let mut bindings = Bindings::new();
    bindings.insert_scalar("x", 4.0);
    assert_eq!(nested.evaluate_with(&bindings, &EngineConfig { max_depth: 2 })
                     .unwrap_err(),
               ExprError::RecursionLimitExceeded { limit: 2 });
    assert_eq!(nested.evaluate(&bindings).unwrap(), Value::Real(2.0));
}

#[test]
fn hand_built_programs_are_checked() {
    let underflow = Program::from_instructions(vec![Instruction::BinaryOp(BinaryOperator::Add)]);
    assert!(matches!(underflow.evaluate(&Bindings::new()),
                     Err(ExprError::MalformedProgram { .. })));

    let leftover = Program::from_instructions(vec![Instruction::Literal(LiteralValue::Integer(1)),
                                                   Instruction::Literal(LiteralValue::Integer(2))]);
    assert!(matches!(leftover.evaluate(&Bindings::new()),
                     Err(ExprError::MalformedProgram { .. })));

    let unknown = Program::from_instructions(vec![Instruction::Literal(LiteralValue::Integer(1)),
                                                  Instruction::Call { name:  "nope".to_string(),
                                                                      arity: 1, }]);
    assert_eq!(unknown.evaluate(&Bindings::new()).unwrap_err(),
               ExprError::UnknownFunction { name: "nope".to_string() });
}

#[test]
fn programs_can_be_shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Program>();

    let program = compile("2 * 21").unwrap();
    let result = std::thread::scope(|s| {
                     s.spawn(|| program.evaluate(&Bindings::new()).map(|v| v.as_scalar()))
                      .join()
                      .unwrap()
                 });
    assert_eq!(result.unwrap(), Some(42.0));
}

#[test]
fn transform_replaces_every_series() {
    let program = compile("y - mean(y)").unwrap();
    let x = [0.0, 1.0, 2.0];
    let series = vec![vec![1.0, 2.0, 3.0], vec![4.0, 4.0, 4.0]];

    let out = transform_series(&program, &x, &series, &EngineConfig::default()).unwrap();
    assert_eq!(out, vec![vec![-1.0, 0.0, 1.0], vec![0.0, 0.0, 0.0]]);
}

#[test]
fn transform_broadcasts_scalar_results() {
    let program = compile("max(y)").unwrap();
    let out = transform_series(&program,
                               &[0.0, 1.0],
                               &[vec![3.0, 7.0]],
                               &EngineConfig::default()).unwrap();
    assert_eq!(out, vec![vec![7.0, 7.0]]);
}

#[test]
fn transform_rejects_series_of_another_length() {
    let program = compile("y").unwrap();
    let err = transform_series(&program,
                               &[0.0, 1.0, 2.0],
                               &[vec![1.0]],
                               &EngineConfig::default()).unwrap_err();
    assert_eq!(err, ExprError::ShapeMismatch { left: 3, right: 1 });
}

#[test]
fn every_listed_function_compiles() {
    for name in BUILTIN_FUNCTIONS {
        let builtin = lookup_builtin(name).unwrap();
        assert_eq!(builtin.name, *name);
        assert!(compile(&format!("{name}(x)")).is_ok(), "{name}(x) did not compile");
    }
}
