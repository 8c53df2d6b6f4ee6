//! Whole programs.

use pretty_assertions::assert_eq;
use vesper::{EvalErrorKind, Value};

use crate::common::{num, run, runtime_err};

#[test]
fn arithmetic_examples() {
    assert_eq!(run("10 % 3"), num(1.0));
    assert_eq!(run("3 * (7 + 1) + 2"), num(26.0));
    assert_eq!(run("2 <= 1"), Value::Boolean(false));
}

#[test]
fn closures_capture_definition_scope() {
    let source = "fn outerFunc(arg1) { fn innerFunc(arg2) { arg1 + arg2 } }\nlet inner = outerFunc(10)\ninner(5)";
    assert_eq!(run(source), num(15.0));
}

#[test]
fn loop_control() {
    assert_eq!(
        run("let x = 0\nwhile (x < 5) { if (x == 3) { break }\nx = x + 1 }\nx"),
        num(3.0)
    );
    assert_eq!(
        run("let x = 0\nlet sum = 0\nwhile (x < 5) { x = x + 1\nif (x == 3) { continue }\nsum = sum + x }\nsum"),
        num(12.0)
    );
}

#[test]
fn loop_control_outside_loop() {
    assert_eq!(
        runtime_err("break").to_string(),
        "Runtime Error: `break` statement used outside of a loop context."
    );
    assert_eq!(
        runtime_err("continue").to_string(),
        "Runtime Error: `continue` statement used outside of a loop context."
    );
}

#[test]
fn return_from_nested_loops() {
    let source = "fn firstOver(items, limit) {\n\
                    let i = 0\n\
                    while (true) {\n\
                      while (true) {\n\
                        if (items[i] > limit) { return items[i] }\n\
                        i = i + 1\n\
                      }\n\
                    }\n\
                  }\n\
                  let calls = 0\n\
                  while (calls < 3) { calls = calls + 1 }\n\
                  firstOver([1, 5, 9, 12], 6) + calls";
    assert_eq!(run(source), num(12.0));
}

#[test]
fn try_catch_example() {
    let value = run("let error = 'x'\ntry {undefinedVariable} catch e {error = e}\nerror");
    let text = value.as_str().expect("string");
    assert!(text.starts_with("Runtime Error: Cannot resolve variable"), "{text}");
}

#[test]
fn array_growth_and_absent_keys() {
    assert_eq!(
        run("let a = []\na[2] = 'c'\na").to_string(),
        "[nil, nil, c]"
    );
    assert_eq!(run("let o = {a: 1}\no.b"), Value::Nil);
}

#[test]
fn destructuring_rest() {
    assert_eq!(
        run("let [first, ...others] = [1, 2, 3]\nothers").to_string(),
        "[2, 3]"
    );
    assert_eq!(
        run("let {a, ...others} = {a: 1, b: 2}\nothers").to_string(),
        "{b: 2}"
    );
}

#[test]
fn class_rules() {
    assert_eq!(
        runtime_err("class A { pub let v = 1 }\nA()").kind,
        EvalErrorKind::MissingConstructor {
            class: "A".to_string()
        }
    );
    assert_eq!(
        runtime_err("class A { fn constructor() { return 2 } }\nA()").kind,
        EvalErrorKind::ConstructorReturn
    );
    let source = "class Box {\n\
                    let hidden = 'h'\n\
                    fn constructor() {}\n\
                    pub fn peek() { hidden }\n\
                  }\n\
                  let b = Box()\n\
                  [b.hidden, b.peek()]";
    assert_eq!(run(source).to_string(), "[nil, h]");
}

#[test]
fn bubble_sort() {
    let source = "fn sort(items, n) {\n\
                    let i = 0\n\
                    while (i < n) {\n\
                      let j = 0\n\
                      while (j < n - i - 1) {\n\
                        if (items[j] > items[j + 1]) {\n\
                          let tmp = items[j]\n\
                          items[j] = items[j + 1]\n\
                          items[j + 1] = tmp\n\
                        }\n\
                        j = j + 1\n\
                      }\n\
                      i = i + 1\n\
                    }\n\
                  }\n\
                  let data = [5, 3, 8, 1, 9, 2]\n\
                  sort(data, 6)\n\
                  data";
    assert_eq!(run(source).to_string(), "[1, 2, 3, 5, 8, 9]");
}

#[test]
fn memoized_recursion() {
    let source = "let cache = {}\n\
                  fn fib(n) {\n\
                    if (n < 2) { return n }\n\
                    let hit = cache[n]\n\
                    if (hit ?? false) { return hit }\n\
                    let value = fib(n - 1) + fib(n - 2)\n\
                    cache[n] = value\n\
                    value\n\
                  }\n\
                  fib(50)";
    assert_eq!(run(source), num(12_586_269_025.0));
}

#[test]
fn class_backed_stack() {
    let source = "class Stack {\n\
                    let items = []\n\
                    let size = 0\n\
                    fn constructor() {}\n\
                    pub fn push(v) { items[size] = v\nsize = size + 1 }\n\
                    pub fn pop() {\n\
                      if (size == 0) { return nil }\n\
                      size = size - 1\n\
                      items[size]\n\
                    }\n\
                    pub fn count() { size }\n\
                  }\n\
                  let s = Stack()\n\
                  s.push(1)\n\
                  s.push(2)\n\
                  s.push(3)\n\
                  let top = s.pop()\n\
                  [top, s.count(), Stack().pop()]";
    assert_eq!(run(source).to_string(), "[3, 2, nil]");
}

#[test]
fn objects_of_closures() {
    let source = "fn makeAccount(balance) {\n\
                    let state = {balance: balance}\n\
                    {\n\
                      deposit: fn(x) { state.balance = state.balance + x },\n\
                      get: fn() { state.balance },\n\
                    }\n\
                  }\n\
                  let acct = makeAccount(10)\n\
                  let other = makeAccount(0)\n\
                  acct.deposit(5)\n\
                  acct.deposit(7)\n\
                  other.deposit(1)\n\
                  [acct.get(), other.get()]";
    assert_eq!(run(source).to_string(), "[22, 1]");
}

#[test]
fn runtime_errors_render_with_prefix() {
    assert_eq!(
        runtime_err("1 + 'a'").to_string(),
        "Runtime Error: Cannot apply '+' to Number and String"
    );
}
