use pretty_assertions::assert_eq;

use super::{eval_err, eval_ok, num, string};
use crate::errors::EvalErrorKind;
use crate::interpreter::member::MAX_ARRAY_LEN;
use crate::value::Value;

#[test]
fn object_access() {
    assert_eq!(eval_ok("let o = {a: 1, b: 'two'}\no.b"), string("two"));
    assert_eq!(eval_ok("let o = {a: 1}\no['a']"), num(1.0));
    assert_eq!(eval_ok("let key = 'a'\nlet o = {a: 7}\no[key]"), num(7.0));
}

#[test]
fn absent_object_key_is_nil() {
    assert_eq!(eval_ok("let o = {a: 1}\no.missing"), Value::Nil);
    assert_eq!(eval_ok("let o = {}\no['x']"), Value::Nil);
}

#[test]
fn number_keys_are_stringified() {
    assert_eq!(eval_ok("let o = {1: 'one'}\no[1]"), string("one"));
    assert_eq!(eval_ok("let o = {}\no[2] = 'two'\no['2']"), string("two"));
    assert_eq!(eval_ok("let o = {}\no[1.5] = 3\no['1.5']"), num(3.0));
}

#[test]
fn invalid_object_key() {
    let err = eval_err("let o = {}\no[nil]");
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidKey {
            type_name: "Nil".to_string()
        }
    );
}

#[test]
fn shorthand_properties() {
    assert_eq!(
        eval_ok("let x = 1\nlet o = {x, y: 2}\no").to_string(),
        "{x: 1, y: 2}"
    );
}

#[test]
fn object_member_assignment() {
    assert_eq!(eval_ok("let o = {}\no.k = 3"), num(3.0));
    assert_eq!(eval_ok("let o = {a: 1}\no.a = 5\no['b'] = 6\no").to_string(), "{a: 5, b: 6}");
}

#[test]
fn objects_alias() {
    let source = "let a = {x: 1}\nlet b = a\nb.x = 2\na.x";
    assert_eq!(eval_ok(source), num(2.0));
}

#[test]
fn nested_member_writes() {
    let source = "let o = {inner: {v: [1, 2]}}\no.inner.v[1] = 5\no.inner.v";
    assert_eq!(eval_ok(source), Value::array(vec![num(1.0), num(5.0)]));
}

#[test]
fn methods_stored_on_objects() {
    assert_eq!(eval_ok("let o = {}\no.double = fn(x) { x * 2 }\no.double(4)"), num(8.0));
}

#[test]
fn array_reads() {
    assert_eq!(eval_ok("let a = [10, 20, 30]\na[1]"), num(20.0));
    assert_eq!(eval_ok("let a = [10, 20, 30]\na[1.9]"), num(20.0));
    assert_eq!(eval_ok("let a = [10]\na[5]"), Value::Nil);
    assert_eq!(eval_ok("let a = [10]\na[-1]"), Value::Nil);
}

#[test]
fn array_auto_extends_with_nil() {
    let value = eval_ok("let a = [1]\na[3] = 4\na");
    assert_eq!(
        value,
        Value::array(vec![num(1.0), Value::Nil, Value::Nil, num(4.0)])
    );
    let Value::Array(items) = value else {
        panic!("expected array");
    };
    assert_eq!(items.borrow().len(), 4);
}

#[test]
fn negative_index_write_fails() {
    let err = eval_err("let a = [1]\na[-1] = 0");
    assert_eq!(err.kind, EvalErrorKind::NegativeIndex { index: -1 });
    assert_eq!(err.message, "Cannot assign to negative array index -1");
}

#[test]
fn huge_index_write_fails() {
    for index in ["1e300", "1 / 0", "16777216"] {
        let source = format!("let a = []\na[{index}] = 1\n0");
        assert_eq!(
            eval_err(&source).kind,
            EvalErrorKind::IndexTooLarge {
                limit: MAX_ARRAY_LEN
            },
            "{source}"
        );
    }
    assert_eq!(eval_ok("let a = []\na[1e300]"), Value::Nil);
}

#[test]
fn nan_index_write_fails() {
    let err = eval_err("let a = []\na[0 / 0] = 1");
    assert_eq!(err.message, "Array index must be a Number, got NaN");
}

#[test]
fn array_index_must_be_number() {
    assert_eq!(
        eval_err("let a = [1]\na['x'] = 1").message,
        "Array index must be a Number, got String"
    );
    assert_eq!(
        eval_err("let a = [1]\na[nil]").message,
        "Array index must be a Number, got Nil"
    );
}

#[test]
fn dotted_access_on_array_fails() {
    let err = eval_err("let a = [1]\na.length");
    assert_eq!(
        err.kind,
        EvalErrorKind::InvalidMemberAccess {
            type_name: "Array".to_string(),
            property: "length".to_string(),
        }
    );
}

#[test]
fn member_access_on_scalar_fails() {
    assert_eq!(
        eval_err("let n = 5\nn.x").message,
        "Cannot access member 'x' of Number"
    );
    assert_eq!(
        eval_err("let s = 'str'\ns[0] = 1").message,
        "Cannot access member '[]' of String"
    );
}

#[test]
fn array_writes_through_parameters_are_visible() {
    let source = "fn set(arr) { arr[0] = 9 }\nlet a = [1]\nset(a)\na";
    assert_eq!(eval_ok(source), Value::array(vec![num(9.0)]));
}

#[test]
fn array_writes_through_aliases_are_visible() {
    let source = "let a = [1, 2]\nlet b = a\nb[2] = 3\na";
    assert_eq!(
        eval_ok(source),
        Value::array(vec![num(1.0), num(2.0), num(3.0)])
    );
}

#[test]
fn const_array_contents_are_mutable() {
    assert_eq!(
        eval_ok("const a = [1]\na[0] = 2\na"),
        Value::array(vec![num(2.0)])
    );
}

#[test]
fn value_is_evaluated_before_receiver() {
    // The receiver `missing` would fail first if it were evaluated first.
    let source = "let log = []\n\
                  try { missing[0] = log[0] = 'value' } catch e {}\n\
                  log";
    assert_eq!(eval_ok(source), Value::array(vec![string("value")]));
}
