// Parser robustness suites for FurryScript
//
// Table-driven cases covering every statement form, the expression grammar
// and the failure modes of the front end (lexer + parser).

use furryscript::ast::Program;
use furryscript::error::FurError;
use furryscript::lexer::Lexer;
use furryscript::parser::Parser;

/// Individual test case
#[derive(Debug, Clone)]
pub struct TestCase {
    pub name: String,
    pub input: String,
    pub should_succeed: bool,
    pub expected_error_contains: Option<String>,
}

impl TestCase {
    pub fn should_succeed(name: &str, input: &str) -> Self {
        Self::new(name, input, true, None)
    }

    pub fn should_fail(name: &str, input: &str) -> Self {
        Self::new(name, input, false, None)
    }

    pub fn should_fail_with_message(name: &str, input: &str, expected_msg: &str) -> Self {
        Self::new(name, input, false, Some(expected_msg.to_string()))
    }

    fn new(name: &str, input: &str, should_succeed: bool, expected: Option<String>) -> Self {
        Self {
            name: name.to_string(),
            input: input.to_string(),
            should_succeed,
            expected_error_contains: expected,
        }
    }
}

/// Named group of cases
#[derive(Debug)]
pub struct TestSuite {
    pub name: String,
    pub tests: Vec<TestCase>,
}

impl TestSuite {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tests: Vec::new(),
        }
    }

    pub fn add_test(&mut self, test: TestCase) {
        self.tests.push(test);
    }

    /// Runs every case and returns one line per case that did not behave.
    pub fn failures(&self) -> Vec<String> {
        self.tests
            .iter()
            .filter_map(|test| {
                check_case(test).map(|msg| format!("{}::{}: {}", self.name, test.name, msg))
            })
            .collect()
    }
}

/// Returns why a case failed, or `None` when it behaved as expected.
/// Panics inside the front end are caught and reported as crashes.
fn check_case(test: &TestCase) -> Option<String> {
    let result = match std::panic::catch_unwind(|| parse_input(&test.input)) {
        Ok(result) => result,
        Err(panic_info) => {
            let panic_msg = if let Some(s) = panic_info.downcast_ref::<String>() {
                s.clone()
            } else if let Some(s) = panic_info.downcast_ref::<&str>() {
                s.to_string()
            } else {
                "Unknown panic".to_string()
            };
            return Some(format!("CRASHED - {}", panic_msg));
        }
    };

    match (result, test.should_succeed) {
        (Ok(_), true) => None,
        (Ok(_), false) => Some("expected parsing to fail, but it succeeded".to_string()),
        (Err(error), true) => Some(format!("expected success, got: {}", error.message)),
        (Err(error), false) => match &test.expected_error_contains {
            Some(expected) if !error.message.contains(expected.as_str()) => Some(format!(
                "error '{}' doesn't contain '{}'",
                error.message, expected
            )),
            _ => None,
        },
    }
}

fn parse_input(input: &str) -> Result<Program, FurError> {
    let tokens = Lexer::new(input).scan_tokens()?;
    Parser::new(tokens).parse()
}

// ============================================================================
// Test Suite Creation Functions
// ============================================================================

fn create_malformed_expressions_tests() -> TestSuite {
    let mut suite = TestSuite::new("Malformed Expressions");

    // === PARENTHESES TESTS ===

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren",
        "(1 + 2",
        "Expected ')', got end of input"
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_opening_paren_nested",
        "((1 + 2)",
        "Expected ')', got end of input"
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "unmatched_closing_paren",
        "1 + 2)",
        "Expected expression, got ')'"
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "empty_parentheses",
        "()",
        "Expected expression, got ')'"
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "stray_closing_brace",
        "}",
        "Expected expression, got '}'"
    ));

    suite.add_test(TestCase::should_fail_with_message(
        "stray_opening_brace",
        "{ purr(1) }",
        "Expected expression, got '{'"
    ));

    suite
}

fn create_edge_case_tests() -> TestSuite {
    let mut suite = TestSuite::new("Edge Cases");

    suite.add_test(TestCase::should_succeed("empty_input", ""));
    suite.add_test(TestCase::should_succeed("only_whitespace", "   \n\t  "));

    suite.add_test(TestCase::should_fail_with_message(
        "unexpected_eof_after_operator",
        "1 +",
        "Expected expression, got end of input"
    ));
    suite.add_test(TestCase::should_fail("unexpected_eof_in_expression", "1 + ("));

    let deep_parens = "(".repeat(100) + "1" + &")".repeat(100);
    suite.add_test(TestCase::should_succeed("deeply_nested_parens", &deep_parens));

    // Statements need no separators
    suite.add_test(TestCase::should_succeed(
        "statements_on_one_line",
        "meow a = 1 meow b = 2 purr(a) purr(b)"
    ));

    // The lexer tolerates a missing closing quote
    suite.add_test(TestCase::should_succeed("unterminated_string_statement", "\"never closed"));
    suite.add_test(TestCase::should_succeed(
        "unterminated_string_declaration",
        "meow s = \"still going"
    ));

    suite
}

fn create_operator_tests() -> TestSuite {
    let mut suite = TestSuite::new("Operator Tests");

    suite.add_test(TestCase::should_fail("missing_left_operand", "+ 1"));
    suite.add_test(TestCase::should_fail("missing_right_operand", "1 *"));
    suite.add_test(TestCase::should_fail("missing_both_operands", "/"));
    suite.add_test(TestCase::should_fail("double_plus", "1 ++ 2"));
    suite.add_test(TestCase::should_fail("star_after_slash", "4 / * 2"));

    // Unary minus wraps a primary, so these are fine
    suite.add_test(TestCase::should_succeed("double_minus", "1 -- 2"));
    suite.add_test(TestCase::should_succeed("mixed_operators", "1 +- 2"));
    suite.add_test(TestCase::should_succeed("negated_group", "-(2 + 3)"));

    // A bare identifier is its own access statement, so the operator
    // starts a new statement with nothing on its left
    suite.add_test(TestCase::should_fail_with_message(
        "identifier_then_plus",
        "x + 1",
        "Expected expression, got '+'"
    ));

    suite
}

fn create_statement_tests() -> TestSuite {
    let mut suite = TestSuite::new("Statement Tests");

    // purr
    suite.add_test(TestCase::should_succeed("print_string", "purr(\"hello\")"));
    suite.add_test(TestCase::should_succeed("print_expression", "purr(1 + 2 * 3)"));
    suite.add_test(TestCase::should_fail_with_message(
        "print_without_parens",
        "purr 1",
        "Expected '(', got integer"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "print_unclosed",
        "purr(1",
        "Expected ')', got end of input"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "print_two_arguments",
        "purr(\"a\" \"b\")",
        "Expected ')', got string"
    ));

    // meow
    suite.add_test(TestCase::should_succeed("declare_literal", "meow x = 42"));
    suite.add_test(TestCase::should_succeed("declare_expression", "meow x = (1 + 2) * -3"));
    suite.add_test(TestCase::should_succeed("declare_from_variable", "meow x = 1 meow y = x"));
    suite.add_test(TestCase::should_fail_with_message(
        "declare_missing_value",
        "meow x =",
        "Expected expression, got end of input"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "declare_missing_equals",
        "meow x 1",
        "Expected '=', got integer"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "declare_missing_name",
        "meow = 1",
        "Expected identifier, got '='"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "declare_keyword_name",
        "meow purr = 1",
        "Expected identifier, got 'purr'"
    ));

    // woof and bare access
    suite.add_test(TestCase::should_succeed("woof_access", "woof x"));
    suite.add_test(TestCase::should_succeed("bare_access", "x"));
    suite.add_test(TestCase::should_fail_with_message(
        "woof_without_name",
        "woof",
        "Expected identifier, got end of input"
    ));

    suite
}

fn create_literal_tests() -> TestSuite {
    let mut suite = TestSuite::new("Literal Tests");

    suite.add_test(TestCase::should_succeed("integer_literal", "42"));
    suite.add_test(TestCase::should_succeed("float_literal", "3.14"));
    suite.add_test(TestCase::should_succeed("string_literal", "\"hello\""));
    suite.add_test(TestCase::should_succeed("largest_integer", "9223372036854775807"));

    suite.add_test(TestCase::should_fail_with_message(
        "integer_too_large",
        "99999999999999999999",
        "Expected integer within 64-bit range"
    ));

    // Malformed numbers are caught by the lexer
    suite.add_test(TestCase::should_fail_with_message("multiple_dots", "3.14.159", "Unexpected character '.'"));
    suite.add_test(TestCase::should_fail_with_message("trailing_dot", "42.", "Unexpected character '.'"));
    suite.add_test(TestCase::should_fail_with_message("leading_dot", ".42", "Unexpected character '.'"));
    suite.add_test(TestCase::should_fail_with_message("stray_symbol", "meow x = 1 @", "Unexpected character '@'"));

    suite
}

fn create_function_tests() -> TestSuite {
    let mut suite = TestSuite::new("Function Tests");

    // Calls
    suite.add_test(TestCase::should_succeed("call_no_args", "foo()"));
    suite.add_test(TestCase::should_succeed("call_comma_args", "foo(1, 2, 3)"));
    suite.add_test(TestCase::should_succeed("call_adjacent_args", "foo(1 2 3)"));
    suite.add_test(TestCase::should_succeed("call_trailing_comma", "foo(1, 2,)"));
    suite.add_test(TestCase::should_succeed("call_in_expression", "purr(foo(1) + 2)"));
    suite.add_test(TestCase::should_fail_with_message(
        "call_missing_closing_paren",
        "foo(1, 2",
        "Expected ')', got end of input"
    ));

    // Declarations
    suite.add_test(TestCase::should_succeed("trick_empty", "trick nap() { }"));
    suite.add_test(TestCase::should_succeed(
        "trick_comma_params",
        "trick greet(name, mood) { purr(name) purr(mood) }"
    ));
    suite.add_test(TestCase::should_succeed(
        "trick_adjacent_params",
        "trick greet(name mood) { meow x = 1 }"
    ));
    suite.add_test(TestCase::should_succeed(
        "trick_nested",
        "trick outer() { trick inner(a) { purr(a) } }"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "trick_literal_param",
        "trick f(1) { }",
        "Expected identifier, got integer"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "trick_missing_body",
        "trick f(a) purr(a)",
        "Expected '{', got 'purr'"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "trick_unclosed_body",
        "trick f(a) { purr(a)",
        "Expected '}', got end of input"
    ));
    suite.add_test(TestCase::should_fail_with_message(
        "trick_missing_name",
        "trick (a) { }",
        "Expected identifier, got '('"
    ));

    suite
}

fn create_positive_tests() -> TestSuite {
    let mut suite = TestSuite::new("Positive Tests");

    suite.add_test(TestCase::should_succeed("simple_arithmetic", "1 + 2 * 3"));
    suite.add_test(TestCase::should_succeed("parentheses", "(1 + 2) * 3"));
    suite.add_test(TestCase::should_succeed("string_concatenation", "\"hello\" + \" world\""));
    suite.add_test(TestCase::should_succeed(
        "greeting_program",
        "meow greeting = \"Hello, FurryScript!\"\npurr(greeting)\npurr(\"This is pawsome!\")"
    ));

    suite
}

// ============================================================================
// Main Test Function
// ============================================================================

#[test]
fn comprehensive_parser_tests() {
    let suites = vec![
        create_malformed_expressions_tests(),
        create_edge_case_tests(),
        create_operator_tests(),
        create_statement_tests(),
        create_literal_tests(),
        create_function_tests(),
        create_positive_tests(),
    ];

    let failures: Vec<String> = suites.iter().flat_map(TestSuite::failures).collect();
    assert!(failures.is_empty(), "unexpected results:\n{}", failures.join("\n"));
}
