//! Operators agree with host `f64` arithmetic and ordering.

use proptest::prelude::*;
use vesper::Value;

/// A decimal literal and the `f64` it denotes.
fn literal() -> impl Strategy<Value = (String, f64)> {
    (-10_000i32..10_000, 0u32..100).prop_map(|(whole, frac)| {
        let text = if whole < 0 {
            format!("-{}.{frac:02}", whole.unsigned_abs())
        } else {
            format!("{whole}.{frac:02}")
        };
        let value = text.parse::<f64>().unwrap_or_default();
        (text, value)
    })
}

fn arithmetic_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["+", "-", "*", "/", "%"])
}

fn compare_op() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec!["<", "<=", ">", ">=", "==", "!="])
}

fn host_arithmetic(op: &str, a: f64, b: f64) -> f64 {
    match op {
        "+" => a + b,
        "-" => a - b,
        "*" => a * b,
        "/" => a / b,
        "%" => a % b,
        _ => unreachable!("unknown operator {op}"),
    }
}

fn host_compare(op: &str, a: f64, b: f64) -> bool {
    match op {
        "<" => a < b,
        "<=" => a <= b,
        ">" => a > b,
        ">=" => a >= b,
        "==" => a == b,
        "!=" => a != b,
        _ => unreachable!("unknown operator {op}"),
    }
}

proptest! {
    #[test]
    fn arithmetic_matches_host((a_text, a) in literal(), op in arithmetic_op(), (b_text, b) in literal()) {
        let source = format!("{a_text} {op} {b_text}");
        let expected = host_arithmetic(op, a, b);
        match vesper::run_source(&source) {
            Ok(Value::Number(n)) if expected.is_nan() => prop_assert!(n.is_nan(), "{source} = {n}"),
            Ok(Value::Number(n)) => prop_assert_eq!(n, expected, "{}", source),
            other => prop_assert!(false, "{source} gave {other:?}"),
        }
    }

    #[test]
    fn comparison_matches_host((a_text, a) in literal(), op in compare_op(), (b_text, b) in literal()) {
        let source = format!("{a_text} {op} {b_text}");
        let value = vesper::run_source(&source).map_err(|e| e.to_string());
        prop_assert_eq!(value, Ok(Value::Boolean(host_compare(op, a, b))), "{}", source);
    }

    #[test]
    fn comparing_number_with_itself((text, _) in literal()) {
        let source = format!("let x = {text}\n[x == x, x < x, x <= x]");
        let value = vesper::run_source(&source).map(|v| v.to_string()).map_err(|e| e.to_string());
        prop_assert_eq!(value, Ok("[true, false, true]".to_string()));
    }

    #[test]
    fn variables_hold_what_was_assigned((text, expected) in literal()) {
        let source = format!("let v = 0\nv = {text}\nv");
        prop_assert_eq!(vesper::run_source(&source).ok(), Some(Value::Number(expected)));
    }
}
