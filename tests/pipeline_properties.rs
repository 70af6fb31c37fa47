// Properties of the tokenizer and parser that hold for any input

use ctrans::codegen::{generate, Dialect};
use ctrans::diagnostics::Stage;
use ctrans::parser::ast::{AstNode, BinOp};
use ctrans::parser::lexer::{tokenize, TokenKind};
use ctrans::parser::parse;
use ctrans::{run_pipeline, transpile, transpile_strict};

#[test]
fn test_token_sequence_for_function() {
    let tokens = tokenize("int add(int a, int b) { return a + b; }");
    let texts: Vec<&str> = tokens.iter().map(|t| t.text()).collect();

    assert_eq!(
        texts,
        vec![
            "int", "add", "(", "int", "a", ",", "int", "b", ")", "{", "return", "a", "+", "b",
            ";", "}", ""
        ]
    );
    assert_eq!(tokens[1].kind, TokenKind::Identifier);
    assert_eq!(tokens[12].kind, TokenKind::Operator);
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);

    let body = match parse(tokens) {
        AstNode::Program { body } => body,
        other => panic!("Expected Program, got {:?}", other),
    };
    assert_eq!(body.len(), 1);
    match &body[0] {
        AstNode::Function {
            name, params, body, ..
        } => {
            assert_eq!(name, "add");
            assert_eq!(params.len(), 2);
            assert_eq!(body.len(), 1);
            match &body[0] {
                AstNode::ReturnStatement {
                    value: Some(value), ..
                } => assert!(matches!(
                    value.as_ref(),
                    AstNode::BinaryExpression { op: BinOp::Add, .. }
                )),
                other => panic!("Expected return statement, got {:?}", other),
            }
        }
        other => panic!("Expected function, got {:?}", other),
    }
}

#[test]
fn test_local_declaration_defaults() {
    let source = "int main() { int x; char c; }";
    let java = transpile(source, Dialect::Java);
    assert!(java.contains("        int x = 0;\n        char c = '\\0';\n"));

    let python = transpile(source, Dialect::Python);
    assert!(python.contains("    x = 0\n    c = ''\n"));
}

#[test]
fn test_locations_track_lines_and_columns() {
    let tokens = tokenize("int x;\n  x = 2;");
    let x = &tokens[4];
    assert!(x.is(TokenKind::Identifier, "x"));
    assert_eq!((x.location.line, x.location.column), (2, 3));
}

#[test]
fn test_dangling_else_binds_to_nearest_if() {
    let program = parse(tokenize("if (a) if (b) x = 1; else x = 2;"));

    let body = match program {
        AstNode::Program { body } => body,
        other => panic!("Expected Program, got {:?}", other),
    };
    assert_eq!(body.len(), 1);

    match &body[0] {
        AstNode::IfStatement {
            then_branch,
            else_branch,
            ..
        } => {
            assert!(else_branch.is_none());
            match then_branch.as_ref() {
                AstNode::IfStatement { else_branch, .. } => assert!(else_branch.is_some()),
                other => panic!("Expected inner if, got {:?}", other),
            }
        }
        other => panic!("Expected if statement, got {:?}", other),
    }
}

#[test]
fn test_unrecognized_characters_are_skipped() {
    let tokens = tokenize("int @x;");
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Delimiter,
            TokenKind::Eof
        ]
    );

    assert_eq!(transpile("int @x;", Dialect::Python), "x = 0\n");

    let err = match transpile_strict("int @x;", Dialect::Python) {
        Ok(output) => panic!("Expected strict failure, got {:?}", output),
        Err(err) => err,
    };
    assert_eq!(err.diagnostics.len(), 1);
    assert_eq!(err.diagnostics[0].stage, Stage::Lexer);
    assert_eq!(err.diagnostics[0].location.column, 5);
}

#[test]
fn test_strict_success_matches_permissive_output() {
    let source = r#"
        int main() {
            int x = 1;
            printf("%d\n", x);
            return 0;
        }
    "#;

    for dialect in [Dialect::Java, Dialect::Python] {
        assert_eq!(
            transpile_strict(source, dialect).ok(),
            Some(transpile(source, dialect))
        );
    }
}

#[test]
fn test_pipeline_is_total_on_malformed_input() {
    let inputs = [
        "",
        "}}}",
        "int",
        "if (",
        "for (;;",
        "printf(",
        "@#$",
        "int x = ;",
        "#define X 1",
        "\"unterminated",
        "/* open",
        "x = = 3;",
        "((((",
        "return",
        "int f(int a,, int) {",
        "while (x) { else }",
    ];

    for source in inputs {
        let run = run_pipeline(source, Dialect::Java);
        assert!(run.output.contains("public class Main"), "input {:?}", source);
        assert!(matches!(run.program, AstNode::Program { .. }));

        // Python output is produced from the same tree
        let python = generate(&run.program, Dialect::Python);
        assert_eq!(python, transpile(source, Dialect::Python));
    }
}

#[test]
fn test_pipeline_survives_deep_nesting() {
    let inputs = [
        format!("x = {}1;", "(".repeat(10_000)),
        format!("x = {}1;", "-".repeat(10_000)),
        "{".repeat(10_000),
        format!("{}x = 1;", "if (a) ".repeat(10_000)),
    ];

    for source in &inputs {
        let run = run_pipeline(source, Dialect::Java);
        assert!(run.output.contains("public class Main"));
        assert!(!run.diagnostics.is_empty());

        let python = run_pipeline(source, Dialect::Python);
        assert!(!python.diagnostics.is_empty());
    }
}

#[test]
fn test_moderately_nested_code_translates_cleanly() {
    let source = format!(
        "int main() {{ int x = {}1{}; if (x) {{ if (x) {{ x = -(-x); }} }} }}",
        "(".repeat(20),
        ")".repeat(20)
    );

    let python = match transpile_strict(&source, Dialect::Python) {
        Ok(output) => output,
        Err(err) => panic!("Unexpected diagnostics: {:?}", err.diagnostics),
    };
    assert!(python.contains("x = 1\n"));
    assert!(python.contains("x = -(-x)\n"));
}

#[test]
fn test_malformed_input_is_reported() {
    let run = run_pipeline("int f(int a,, int) { x = ; }", Dialect::Python);
    assert!(run
        .diagnostics
        .iter()
        .all(|d| d.stage == Stage::Parser));
    assert!(!run.diagnostics.is_empty());
    assert!(run.output.starts_with("def f(a):\n"));
}
