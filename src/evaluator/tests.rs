//! Unit tests for the evaluator module.

use pretty_assertions::assert_eq;

use crate::{
    ast::ast::Stmt, errors::errors::RuntimeError, lexer::lexer::tokenize, parser::parser::parse,
};

use super::{
    environment::{Env, Environment},
    evaluator::{eval_expression, eval_program, eval_statement, ConditionalEvaluation, Evaluator},
    value::Value,
};

fn eval_in(evaluator: Evaluator, source: &str, env: &Env) -> Value {
    let (program, errors) = parse(tokenize(source));
    assert!(errors.is_empty(), "parse errors for {:?}: {:?}", source, errors);

    evaluator.eval_program(&program, env)
}

fn eval(source: &str) -> Value {
    eval_in(Evaluator::default(), source, &Environment::new())
}

fn eval_strict(source: &str) -> Value {
    eval_in(
        Evaluator::new(ConditionalEvaluation::Strict),
        source,
        &Environment::new(),
    )
}

#[test]
fn test_integer_arithmetic() {
    let cases = [
        ("5", 5),
        ("-5", -5),
        ("5 + 5 + 5 + 5 - 10", 10),
        ("2 * (5 + 10)", 30),
        ("50 / 2 * 2 + 10", 60),
        ("7 / 2", 3),
        ("-7 / 2", -3),
        ("-7 % 3", -1),
        ("3 * 3 * 3 + 10", 37),
    ];

    for (source, expected) in cases {
        assert_eq!(eval(source), Value::Integer(expected), "source: {}", source);
    }
}

#[test]
fn test_integer_overflow_wraps() {
    assert_eq!(eval("9223372036854775807 + 1"), Value::Integer(i64::MIN));
    assert_eq!(eval("-9223372036854775807 - 1"), Value::Integer(i64::MIN));
    assert_eq!(eval("(-9223372036854775807 - 1) / -1"), Value::Integer(i64::MIN));
    assert_eq!(eval("-(-9223372036854775807 - 1)"), Value::Integer(i64::MIN));
}

#[test]
fn test_division_by_zero() {
    assert_eq!(
        eval("5 / 0"),
        Value::Error(RuntimeError::DivisionByZero {
            left: 5,
            operator: String::from("/"),
        })
    );
    assert_eq!(eval("5 % 0").to_string(), "<Error: division by zero: 5 % 0>");
}

#[test]
fn test_comparisons() {
    let cases = [
        ("1 < 2", true),
        ("1 > 2", false),
        ("1 <= 1", true),
        ("2 >= 3", false),
        ("1 == 1", true),
        ("1 != 1", false),
        ("1 + 1 == 2", true),
    ];

    for (source, expected) in cases {
        assert_eq!(eval(source), Value::Boolean(expected), "source: {}", source);
    }
}

#[test]
fn test_equality_is_integer_only() {
    assert_eq!(
        eval("true == true"),
        Value::Error(RuntimeError::BadInfixOperands {
            left: String::from("true"),
            operator: String::from("=="),
            right: String::from("true"),
        })
    );
    assert_eq!(
        eval("\"a\" + \"b\"").to_string(),
        "<Error: bad expression: \"a\" + \"b\">"
    );
}

#[test]
fn test_bang_uses_truthiness() {
    let cases = [
        ("!true", false),
        ("!false", true),
        ("!5", false),
        ("!0", true),
        ("!\"\"", true),
        ("!\"a\"", false),
        ("!!5", true),
    ];

    for (source, expected) in cases {
        assert_eq!(eval(source), Value::Boolean(expected), "source: {}", source);
    }
}

#[test]
fn test_negating_non_integer() {
    assert_eq!(
        eval("-true"),
        Value::Error(RuntimeError::BadPrefixOperand {
            operator: String::from("-"),
            operand: String::from("BOOLEAN"),
        })
    );
}

#[test]
fn test_logical_operators() {
    assert_eq!(eval("1 && \"a\""), Value::Boolean(true));
    assert_eq!(eval("0 || \"\""), Value::Boolean(false));
    assert_eq!(eval("false && undefined"), Value::Boolean(false));
    assert_eq!(eval("true || undefined"), Value::Boolean(true));
    assert!(eval("true && undefined").is_error());
}

#[test]
fn test_unbound_identifier() {
    let value = eval("foobar");

    assert_eq!(
        value,
        Value::Error(RuntimeError::IdentifierNotFound {
            name: String::from("foobar"),
        })
    );
    assert!(value.to_string().contains("foobar"));
    assert_eq!(value.to_string(), "<Error: identifier not found: foobar>");
}

#[test]
fn test_errors_short_circuit() {
    assert!(eval("1 + missing; 5").is_error());
    assert!(eval("let x = missing; 5").is_error());
    assert!(eval("-missing").is_error());
}

#[test]
fn test_let_binds_and_returns_null() {
    assert_eq!(eval("let a = 5; a"), Value::Integer(5));
    assert_eq!(eval("let a = 5; let b = a * 2; b + a"), Value::Integer(15));
    assert_eq!(eval("let a = 5;"), Value::Null);

    let (program, _) = parse(tokenize("let a = 1;"));
    let env = Environment::new();
    assert_eq!(eval_statement(&program.body[0], &env), Value::Null);
    assert_eq!(env.borrow().get("a"), Some(Value::Integer(1)));
}

#[test]
fn test_block_scoping() {
    assert_eq!(
        eval("{ let a = 1; } a"),
        Value::Error(RuntimeError::IdentifierNotFound {
            name: String::from("a"),
        })
    );
    assert_eq!(eval("let a = 1; { let a = 2; } a"), Value::Integer(1));
    assert_eq!(eval("let a = 1; { a + 1 }"), Value::Integer(2));
}

#[test]
fn test_return_statements() {
    assert_eq!(eval("return 10; 9"), Value::Integer(10));
    assert_eq!(eval("9; return 2 * 5; 9"), Value::Integer(10));
    assert_eq!(
        eval("if (10 > 1) { if (10 > 1) { return 10; } return 1; }"),
        Value::Integer(10)
    );
    assert_eq!(eval("return;"), Value::Null);
}

#[test]
fn test_return_unwinds_to_call() {
    assert_eq!(eval("let f = fn(x) { return x * 2; 99 }; f(4)"), Value::Integer(8));
    assert_eq!(eval("let f = fn() { { return 1; } 2 }; f()"), Value::Integer(1));
    assert_eq!(eval("let f = fn() { return; }; f()"), Value::Null);
    assert_eq!(eval("let f = fn() { }; f()"), Value::Null);
    assert_eq!(eval("let f = fn() { return 1; }; f() + 1"), Value::Integer(2));
}

#[test]
fn test_closures_capture_defining_scope() {
    let source = "let make = fn(x) { fn(y) { x + y } };
                  let add5 = make(5);
                  add5(3)";
    assert_eq!(eval(source), Value::Integer(8));

    let rebinding = "let make = fn(x) { fn(y) { x + y } };
                     let add5 = make(5);
                     let x = 100;
                     let call = fn(x) { add5(3) };
                     call(1000)";
    assert_eq!(eval(rebinding), Value::Integer(8));
}

#[test]
fn test_arguments_evaluate_in_caller_scope() {
    assert_eq!(eval("let x = 10; let f = fn(y) { y }; f(x)"), Value::Integer(10));
    assert_eq!(eval("fn(a, b) { a - b }(10, 4)"), Value::Integer(6));
}

#[test]
fn test_argument_count_mismatch() {
    assert_eq!(
        eval("let f = fn(x) { x }; f(1, 2)"),
        Value::Error(RuntimeError::ArgumentCountMismatch {
            expected: 1,
            received: 2,
        })
    );
}

#[test]
fn test_calling_non_function() {
    assert_eq!(
        eval("5(1)"),
        Value::Error(RuntimeError::NotAFunction {
            value: String::from("5"),
        })
    );
}

#[test]
fn test_recursion() {
    let source = "let fact = fn(n) { if (n < 2) { return 1; } return n * fact(n - 1); };
                  fact(5)";

    assert_eq!(eval(source), Value::Integer(120));
    assert_eq!(eval_strict(source), Value::Integer(120));
}

#[test]
fn test_if_selects_by_truthiness() {
    assert_eq!(eval("if (true) { 10 }"), Value::Integer(10));
    assert_eq!(eval("if (false) { 10 }"), Value::Null);
    assert_eq!(eval("if (1 < 2) { 10 } else { 20 }"), Value::Integer(10));
    assert_eq!(eval("if (\"\") { 1 } else { 2 }"), Value::Integer(2));
    assert_eq!(eval_strict("if (0) 1 else 2"), Value::Integer(2));
}

#[test]
fn test_eager_if_evaluates_both_branches() {
    assert_eq!(
        eval("if (true) { 1 } else { 1 / 0 }"),
        Value::Error(RuntimeError::DivisionByZero {
            left: 1,
            operator: String::from("/"),
        })
    );
    assert_eq!(eval("let x = 0; if (true) 1 else ++x; x"), Value::Integer(1));
}

#[test]
fn test_strict_if_evaluates_selected_branch() {
    assert_eq!(eval_strict("if (true) { 1 } else { 1 / 0 }"), Value::Integer(1));
    assert_eq!(eval_strict("let x = 0; if (true) 1 else ++x; x"), Value::Integer(0));
}

#[test]
fn test_eager_if_only_returns_from_selected_branch() {
    let source = "let f = fn() { if (false) { return 1; } else { 2 } }; f()";

    assert_eq!(eval(source), Value::Integer(2));
    assert_eq!(eval_strict(source), Value::Integer(2));
}

#[test]
fn test_increment_and_decrement() {
    assert_eq!(eval("let i = 5; ++i; i"), Value::Integer(6));
    assert_eq!(eval("let i = 5; --i"), Value::Integer(4));
    assert_eq!(
        eval("let s = \"a\"; ++s"),
        Value::Error(RuntimeError::BadIncDecOperand {
            operator: String::from("++"),
            name: String::from("s"),
            value: String::from("STRING"),
        })
    );
    assert!(eval("++missing").is_error());
}

#[test]
fn test_increment_binds_in_current_scope() {
    assert_eq!(eval("let i = 1; { ++i; } i"), Value::Integer(1));
    assert_eq!(eval("let i = 1; { ++i; i }"), Value::Integer(2));
}

#[test]
fn test_function_value_display() {
    assert_eq!(eval("fn(a, b) { a + b }").to_string(), "fn(a, b) {(a+b);}");
    assert_eq!(eval("\"say \\\"hi\\\"\"").to_string(), r#""say \"hi\"""#);
    assert_eq!(eval("if (false) { 1 }").to_string(), "null");
}

#[test]
fn test_environment_persists_between_programs() {
    let env = Environment::new();
    let evaluator = Evaluator::default();

    assert_eq!(eval_in(evaluator, "let a = 1;", &env), Value::Null);
    assert_eq!(eval_in(evaluator, "a + 1", &env), Value::Integer(2));
}

#[test]
fn test_default_entry_point_is_eager() {
    let (program, _) = parse(tokenize("if (true) { 1 } else { missing }"));

    assert!(eval_program(&program, &Environment::new()).is_error());
}

#[test]
fn test_environment_lookup_walks_outward() {
    let root = Environment::new();
    root.borrow_mut().set("a", Value::Integer(1));

    let child = Environment::new_enclosed(&root);
    child.borrow_mut().set("b", Value::Integer(2));

    assert_eq!(child.borrow().get("a"), Some(Value::Integer(1)));
    assert_eq!(child.borrow().get("b"), Some(Value::Integer(2)));
    assert_eq!(root.borrow().get("b"), None);
}

#[test]
fn test_environment_set_shadows_locally() {
    let root = Environment::new();
    root.borrow_mut().set("a", Value::Integer(1));

    let child = Environment::new_enclosed(&root);
    child.borrow_mut().set("a", Value::Integer(2));

    assert_eq!(child.borrow().get("a"), Some(Value::Integer(2)));
    assert_eq!(root.borrow().get("a"), Some(Value::Integer(1)));
}

#[test]
fn test_eval_expression_entry_point() {
    let (program, errors) = parse(tokenize("x * (2 + 3)"));
    assert!(errors.is_empty());
    let expr = match &program.body[0] {
        Stmt::Expression(stmt) => &stmt.expression,
        other => panic!("expected an expression statement, got {}", other),
    };

    let env = Environment::new();
    env.borrow_mut().set("x", Value::Integer(4));

    assert_eq!(eval_expression(expr, &env), Value::Integer(20));
    assert_eq!(
        eval_expression(expr, &Environment::new()),
        Value::Error(RuntimeError::IdentifierNotFound {
            name: String::from("x"),
        })
    );
}

#[test]
fn test_deeply_nested_negation_evaluates() {
    let depth = 100;
    let source = format!("{}1{}", "-(".repeat(depth), ")".repeat(depth));

    assert_eq!(eval(&source), Value::Integer(1));
}
