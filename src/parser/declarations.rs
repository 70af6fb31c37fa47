//! Declaration parsing implementation
//!
//! This module handles the declaration forms of the C subset:
//!
//! - Include directives: `#include <stdio.h>`, `#include "util.h"`
//! - Variable declarations: `int x = 42;`
//! - Function definitions and prototypes: `type name(params) { ... }`
//!
//! # Grammar
//!
//! ```text
//! include      ::= "#" "include" ( string | "<" token* ">" )
//! declaration  ::= type identifier ( function_rest | variable_rest )
//! function_rest ::= "(" params ")" ( block | ";"? )
//! variable_rest ::= ( "=" expression )? ";"?
//! type         ::= type_keyword+
//! ```
//!
//! All parsing methods are implemented as `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::*;
use crate::parser::lexer::TokenKind;
use crate::parser::parse::Parser;

impl Parser {
    /// Parse a preprocessor line. Only `#include` produces a node; any other
    /// directive is skipped up to the end of its source line. Parsing resumes
    /// right after the include's closing `>` or string, even on the same line.
    pub(crate) fn parse_include(&mut self) -> Option<AstNode> {
        let hash = self.advance();
        let line = hash.location.line;

        if !self.match_token(TokenKind::Identifier, "include") {
            self.warn("Skipped unsupported preprocessor directive", hash.location);
            self.skip_rest_of_line(line);
            return None;
        }

        let library = if self.peek().kind == TokenKind::String {
            self.advance().text().to_string()
        } else if self.match_token(TokenKind::Operator, "<") {
            let mut name = String::new();
            while !self.is_at_end()
                && self.peek().location.line == line
                && !self.check(TokenKind::Operator, ">")
            {
                name.push_str(self.advance().text());
            }
            self.match_token(TokenKind::Operator, ">");
            name
        } else {
            self.warn("Expected '<' or '\"' after #include", self.current_location());
            self.skip_rest_of_line(line);
            String::new()
        };

        Some(AstNode::Include {
            library,
            location: hash.location,
        })
    }

    /// Parse a declaration starting at a type keyword: a function if the
    /// name is followed by `(`, a variable otherwise.
    pub(crate) fn parse_declaration_or_function(&mut self) -> Option<AstNode> {
        let type_loc = self.current_location();
        let decl_type = self.parse_type_name();

        if self.peek().kind != TokenKind::Identifier {
            self.warn(
                format!("Expected identifier after type '{}'", decl_type),
                type_loc,
            );
            return None;
        }

        let name_token = self.advance();
        let name = name_token.text().to_string();
        let loc = name_token.location;

        if self.check_delimiter("(") {
            Some(self.parse_function_definition(decl_type, name, loc))
        } else {
            Some(self.parse_variable_declaration(decl_type, name, loc))
        }
    }

    /// Consume one or more stacked type keywords and fold them into a single
    /// declared type. A leading `unsigned`/`signed` yields to the keyword
    /// after it; otherwise the first keyword wins (`long int` is `long`).
    pub(crate) fn parse_type_name(&mut self) -> String {
        let mut decl_type = self.advance().text().to_string();

        while self.at_type_keyword() {
            let next = self.advance();
            if decl_type == "unsigned" || decl_type == "signed" {
                decl_type = next.text().to_string();
            }
        }

        decl_type
    }

    /// Parse function definition: `(params)` followed by a body block.
    /// Without a block the function is recorded as a prototype.
    fn parse_function_definition(
        &mut self,
        return_type: String,
        name: String,
        loc: SourceLocation,
    ) -> AstNode {
        let params = self.parse_parameter_list();

        let (body, is_prototype) = if self.check_delimiter("{") {
            (self.parse_block_body(), false)
        } else {
            self.consume_delimiter(";");
            (Vec::new(), true)
        };

        AstNode::Function {
            name,
            return_type,
            params,
            body,
            is_prototype,
            location: loc,
        }
    }

    /// Parse parameter list: `(type name, type name, ...)`.
    /// Tokens that do not form a `type name` pair are skipped.
    fn parse_parameter_list(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        self.consume_delimiter("(");

        while !self.is_at_end()
            && !self.check_delimiter(")")
            && !self.check_delimiter("{")
            && !self.check_delimiter(";")
        {
            if self.consume_delimiter(",") {
                continue;
            }

            if self.at_type_keyword() {
                let type_loc = self.current_location();
                let param_type = self.parse_type_name();
                if self.peek().kind == TokenKind::Identifier {
                    let name = self.advance().text().to_string();
                    params.push(Param { name, param_type });
                } else if !(param_type == "void" && self.check_delimiter(")")) {
                    self.warn(
                        format!("Parameter of type '{}' has no name", param_type),
                        type_loc,
                    );
                }
                continue;
            }

            let skipped = self.advance();
            self.warn(
                format!("Skipped malformed parameter token {}", skipped),
                skipped.location,
            );
        }

        self.consume_delimiter(")");
        params
    }

    /// Parse variable declaration tail: `[= init] [;]`
    fn parse_variable_declaration(
        &mut self,
        var_type: String,
        name: String,
        loc: SourceLocation,
    ) -> AstNode {
        let init = if self.match_token(TokenKind::Operator, "=") {
            let init = self.parse_expression();
            if init.is_none() {
                self.warn(
                    format!("Missing initializer expression for '{}'", name),
                    loc,
                );
            }
            init.map(Box::new)
        } else {
            None
        };

        if self.check_delimiter(",") {
            self.warn(
                format!("Only the first declarator after '{}' is translated", name),
                self.current_location(),
            );
            while !self.is_at_end() && !self.check_delimiter(";") && !self.check_delimiter("}") {
                self.advance();
            }
        }

        self.consume_delimiter(";");

        AstNode::Variable {
            name,
            var_type,
            init,
            location: loc,
        }
    }

    /// Skip every remaining token that sits on source line `line`
    fn skip_rest_of_line(&mut self, line: usize) {
        while !self.is_at_end() && self.peek().location.line == line {
            self.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::parser::ast::*;
    use crate::parser::lexer::tokenize;
    use crate::parser::parse::{parse, Parser};

    fn parse_source(source: &str) -> Vec<AstNode> {
        match parse(tokenize(source)) {
            AstNode::Program { body } => body,
            other => panic!("Expected Program, got {:?}", other),
        }
    }

    #[test]
    fn test_include_angle_brackets() {
        let body = parse_source("#include <stdio.h>\nint x;");
        assert_eq!(body.len(), 2);
        match &body[0] {
            AstNode::Include { library, .. } => assert_eq!(library, "stdio.h"),
            other => panic!("Expected include, got {:?}", other),
        }
        assert_eq!(body[1].kind_name(), "Variable");
    }

    #[test]
    fn test_include_quoted() {
        let body = parse_source("#include \"util.h\"");
        assert!(matches!(&body[0], AstNode::Include { library, .. } if library == "util.h"));
    }

    #[test]
    fn test_code_after_include_on_same_line() {
        let mut parser = Parser::from_source("#include <stdio.h> int x = 5;");
        let program = parser.parse_program();
        let labels: Vec<String> = program.children().iter().map(|(_, n)| n.label()).collect();

        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1], "Variable int x");
        assert!(parser.diagnostics().is_empty());

        let body = parse_source("#include \"util.h\" int y;");
        assert_eq!(body[1].kind_name(), "Variable");
    }

    #[test]
    fn test_malformed_include_skips_its_line() {
        let mut parser = Parser::from_source("#include stdio.h\nint z;");
        let program = parser.parse_program();
        let labels: Vec<String> = program.children().iter().map(|(_, n)| n.label()).collect();

        assert_eq!(labels.last().map(String::as_str), Some("Variable int z"));
        assert_eq!(parser.diagnostics().len(), 1);
    }

    #[test]
    fn test_other_directives_skip_their_line() {
        let mut parser = Parser::from_source("#define N 10\nint y = 2;");
        let program = parser.parse_program();
        let body = program.children();

        assert_eq!(body.len(), 1);
        assert_eq!(body[0].1.label(), "Variable int y");
        assert_eq!(parser.diagnostics().len(), 1);
    }

    #[test]
    fn test_function_parameters() {
        let body = parse_source("float scale(float v, int times) { return v * times; }");
        match &body[0] {
            AstNode::Function {
                name,
                return_type,
                params,
                ..
            } => {
                assert_eq!(name, "scale");
                assert_eq!(return_type, "float");
                assert_eq!(
                    params,
                    &vec![
                        Param {
                            name: "v".to_string(),
                            param_type: "float".to_string()
                        },
                        Param {
                            name: "times".to_string(),
                            param_type: "int".to_string()
                        },
                    ]
                );
            }
            other => panic!("Expected function, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_parameters_are_skipped() {
        let mut parser = Parser::from_source("int f(int a, 5, int *p, char c) { }");
        let program = parser.parse_program();

        match &program.children()[0].1 {
            AstNode::Function { params, .. } => {
                let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
                assert_eq!(names, vec!["a", "c"]);
            }
            other => panic!("Expected function, got {:?}", other),
        }
        assert!(!parser.diagnostics().is_empty());
    }

    #[test]
    fn test_void_parameter_list() {
        let mut parser = Parser::from_source("void tick(void) { }");
        let program = parser.parse_program();
        match &program.children()[0].1 {
            AstNode::Function { params, .. } => assert!(params.is_empty()),
            other => panic!("Expected function, got {:?}", other),
        }
        assert!(parser.diagnostics().is_empty());
    }

    #[test]
    fn test_prototype_has_no_body() {
        let body = parse_source("int add(int a, int b);\nint main() { }");
        assert!(matches!(&body[0], AstNode::Function { is_prototype: true, body, .. } if body.is_empty()));
        assert!(matches!(&body[1], AstNode::Function { is_prototype: false, .. }));
    }

    #[test]
    fn test_stacked_type_keywords_fold() {
        let body = parse_source("unsigned int a; long int b; unsigned char c;");
        let labels: Vec<String> = body.iter().map(|n| n.label()).collect();
        assert_eq!(
            labels,
            vec!["Variable int a", "Variable long b", "Variable char c"]
        );
    }

    #[test]
    fn test_variable_without_semicolon() {
        let body = parse_source("int x = 1 int y");
        assert_eq!(body.len(), 2);
        assert!(matches!(&body[0], AstNode::Variable { init: Some(_), .. }));
        assert!(matches!(&body[1], AstNode::Variable { init: None, .. }));
    }

    #[test]
    fn test_extra_declarators_are_skipped() {
        let mut parser = Parser::from_source("int a = 1, b, c = 3;\nint d;");
        let program = parser.parse_program();
        let labels: Vec<String> = program.children().iter().map(|(_, n)| n.label()).collect();

        assert_eq!(labels, vec!["Variable int a", "Variable int d"]);
        assert_eq!(parser.diagnostics().len(), 1);
    }
}
