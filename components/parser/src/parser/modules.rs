//! Import and export declarations

use super::classes::ClassKind;
use super::functions::FunctionKind;
use super::patterns::collect_bound_names;
use super::Parser;
use crate::ast::*;
use crate::context::Context;
use crate::lexer::{Keyword, Punctuator, TokenKind};
use crate::scope::BindingKind;
use core_types::ParseResult;
use std::collections::HashSet;
use tracing::trace;

impl<'a> Parser<'a> {
    /// Parse an import declaration. The current token is `import`.
    pub(crate) fn parse_import(&mut self, start: usize) -> ParseResult<Statement> {
        trace!(start, "parsing import");
        self.advance()?;

        let mut specifiers = Vec::new();
        if !matches!(self.token.kind, TokenKind::String(_)) {
            let mut more = true;
            if self.at_identifier() {
                let local = self.parse_import_binding()?;
                specifiers.push(ImportSpecifier::ImportDefaultSpecifier {
                    span: local.span,
                    local,
                });
                more = self.eat_punctuator(Punctuator::Comma)?;
            }
            if more {
                if self.check_punctuator(Punctuator::Star) {
                    let star_start = self.token.start;
                    self.advance()?;
                    self.expect_contextual("as")?;
                    let local = self.parse_import_binding()?;
                    specifiers.push(ImportSpecifier::ImportNamespaceSpecifier {
                        span: self.finish(star_start),
                        local,
                    });
                } else if self.check_punctuator(Punctuator::LBrace) {
                    self.parse_import_specifiers(&mut specifiers)?;
                } else {
                    return Err(self.unexpected());
                }
            }
            self.expect_contextual("from")?;
        }

        let source = self.parse_module_source()?;
        let attributes = self.parse_import_attributes()?;
        self.consume_semicolon()?;
        Ok(Statement::ImportDeclaration(ImportDeclaration {
            span: self.finish(start),
            specifiers,
            source,
            attributes,
        }))
    }

    /// Local name of an import, declared in the module scope
    fn parse_import_binding(&mut self) -> ParseResult<Identifier> {
        let local = self.parse_identifier()?;
        self.declare_identifier(&local, BindingKind::Lexical)?;
        Ok(local)
    }

    fn parse_import_specifiers(&mut self, specifiers: &mut Vec<ImportSpecifier>) -> ParseResult<()> {
        self.expect_punctuator(Punctuator::LBrace)?;
        let mut first = true;
        while !self.eat_punctuator(Punctuator::RBrace)? {
            if !first {
                self.expect_punctuator(Punctuator::Comma)?;
                if self.eat_punctuator(Punctuator::RBrace)? {
                    break;
                }
            }
            first = false;

            let start = self.token.start;
            let imported = self.parse_module_export_name()?;
            let local = if self.eat_contextual("as")? {
                self.parse_identifier()?
            } else {
                match &imported {
                    ModuleExportName::Identifier(id) => {
                        self.check_shorthand(id)?;
                        id.clone()
                    }
                    ModuleExportName::Literal(literal) => {
                        return Err(self.raise(
                            literal.span.start,
                            "A string literal cannot be used as an imported binding.",
                        ));
                    }
                }
            };
            self.declare_identifier(&local, BindingKind::Lexical)?;
            specifiers.push(ImportSpecifier::ImportSpecifier {
                span: self.finish(start),
                imported,
                local,
            });
        }
        Ok(())
    }

    /// `with { type: "json" }` after a module specifier
    fn parse_import_attributes(&mut self) -> ParseResult<Vec<ImportAttribute>> {
        let mut attributes = Vec::new();
        if !self.eat_keyword(Keyword::With)? {
            return Ok(attributes);
        }
        self.expect_punctuator(Punctuator::LBrace)?;
        let mut keys = HashSet::new();
        let mut first = true;
        while !self.eat_punctuator(Punctuator::RBrace)? {
            if !first {
                self.expect_punctuator(Punctuator::Comma)?;
                if self.eat_punctuator(Punctuator::RBrace)? {
                    break;
                }
            }
            first = false;

            let start = self.token.start;
            let key = self.parse_string_or_identifier_name()?;
            if !keys.insert(key.name().to_string()) {
                return Err(self.early(start, format!("Duplicate attribute key '{}'", key.name())));
            }
            self.expect_punctuator(Punctuator::Colon)?;
            if !matches!(self.token.kind, TokenKind::String(_)) {
                return Err(self.raise(self.token.start, "Import attribute value must be a string"));
            }
            let value = self.parse_literal()?;
            attributes.push(ImportAttribute {
                span: self.finish(start),
                key,
                value,
            });
        }
        Ok(attributes)
    }

    fn parse_module_source(&mut self) -> ParseResult<Literal> {
        if !matches!(self.token.kind, TokenKind::String(_)) {
            return Err(self.unexpected());
        }
        self.parse_literal()
    }

    /// Imported or exported name. String names must be well-formed.
    fn parse_module_export_name(&mut self) -> ParseResult<ModuleExportName> {
        if self.token.lone_surrogate {
            return Err(self.early(self.token.start, "An export name cannot include a lone surrogate."));
        }
        self.parse_string_or_identifier_name()
    }

    fn parse_string_or_identifier_name(&mut self) -> ParseResult<ModuleExportName> {
        if matches!(self.token.kind, TokenKind::String(_)) {
            return Ok(ModuleExportName::Literal(self.parse_literal()?));
        }
        Ok(ModuleExportName::Identifier(self.parse_identifier_name()?))
    }

    /// Parse an export declaration. The current token is `export`.
    pub(crate) fn parse_export(&mut self, start: usize) -> ParseResult<Statement> {
        trace!(start, "parsing export");
        self.advance()?;

        if self.eat_punctuator(Punctuator::Star)? {
            let exported = if self.eat_contextual("as")? {
                let exported = self.parse_module_export_name()?;
                self.check_export(exported.name(), exported.span().start)?;
                Some(exported)
            } else {
                None
            };
            self.expect_contextual("from")?;
            let source = self.parse_module_source()?;
            let attributes = self.parse_import_attributes()?;
            self.consume_semicolon()?;
            return Ok(Statement::ExportAllDeclaration {
                span: self.finish(start),
                exported,
                source,
                attributes,
            });
        }

        if self.check_keyword(Keyword::Default) {
            self.check_export("default", self.token.start)?;
            self.advance()?;
            let declaration = self.parse_export_default()?;
            return Ok(Statement::ExportDefaultDeclaration {
                span: self.finish(start),
                declaration,
            });
        }

        if self.starts_export_declaration()? {
            let declaration = self.parse_statement_list_item(false)?;
            self.check_declared_exports(&declaration)?;
            return Ok(Statement::ExportNamedDeclaration(ExportNamedDeclaration {
                span: self.finish(start),
                declaration: Some(Box::new(declaration)),
                specifiers: Vec::new(),
                source: None,
                attributes: Vec::new(),
            }));
        }

        let specifiers = self.parse_export_specifiers()?;
        let (source, attributes) = if self.eat_contextual("from")? {
            let source = self.parse_module_source()?;
            (Some(source), self.parse_import_attributes()?)
        } else {
            for specifier in &specifiers {
                match &specifier.local {
                    ModuleExportName::Identifier(id) => {
                        self.check_shorthand(id)?;
                        self.export_refs.push((id.name.clone(), id.span.start));
                    }
                    ModuleExportName::Literal(literal) => {
                        return Err(self.early(
                            literal.span.start,
                            "A string literal cannot be used as an exported binding without `from`.",
                        ));
                    }
                }
            }
            (None, Vec::new())
        };
        self.consume_semicolon()?;
        Ok(Statement::ExportNamedDeclaration(ExportNamedDeclaration {
            span: self.finish(start),
            declaration: None,
            specifiers,
            source,
            attributes,
        }))
    }

    fn parse_export_default(&mut self) -> ParseResult<ExportDefaultKind> {
        let start = self.token.start;
        if self.eat_keyword(Keyword::Function)? {
            let function = self.parse_function(start, FunctionKind::DefaultExport, false)?;
            return Ok(ExportDefaultKind::FunctionDeclaration(Box::new(function)));
        }
        if self.is_async_function()? {
            self.advance()?;
            self.advance()?;
            let function = self.parse_function(start, FunctionKind::DefaultExport, true)?;
            return Ok(ExportDefaultKind::FunctionDeclaration(Box::new(function)));
        }
        if self.check_keyword(Keyword::Class) {
            let class = self.parse_class(start, ClassKind::DefaultExport, Vec::new())?;
            return Ok(ExportDefaultKind::ClassDeclaration(Box::new(class)));
        }
        if self.check_punctuator(Punctuator::At) && self.context.contains(Context::NEXT) {
            let decorators = self.parse_decorators()?;
            if !self.check_keyword(Keyword::Class) {
                return Err(self.unexpected());
            }
            let class = self.parse_class(start, ClassKind::DefaultExport, decorators)?;
            return Ok(ExportDefaultKind::ClassDeclaration(Box::new(class)));
        }
        let expression = self.with_context(self.context | Context::IN, |p| p.parse_assignment())?;
        self.consume_semicolon()?;
        Ok(ExportDefaultKind::Expression(expression))
    }

    fn starts_export_declaration(&mut self) -> ParseResult<bool> {
        if matches!(
            self.keyword(),
            Some(Keyword::Var | Keyword::Const | Keyword::Function | Keyword::Class)
        ) {
            return Ok(true);
        }
        if self.check_punctuator(Punctuator::At) && self.context.contains(Context::NEXT) {
            return Ok(true);
        }
        Ok(self.is_let_declaration(None)? || self.is_async_function()?)
    }

    fn check_declared_exports(&mut self, declaration: &Statement) -> ParseResult<()> {
        match declaration {
            Statement::VariableDeclaration(declaration) => {
                let mut names = Vec::new();
                for declarator in &declaration.declarations {
                    collect_bound_names(&declarator.id, &mut names);
                }
                for id in names {
                    self.check_export(&id.name, id.span.start)?;
                }
            }
            Statement::FunctionDeclaration(function) => {
                if let Some(id) = &function.id {
                    self.check_export(&id.name, id.span.start)?;
                }
            }
            Statement::ClassDeclaration(class) => {
                if let Some(id) = &class.id {
                    self.check_export(&id.name, id.span.start)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn parse_export_specifiers(&mut self) -> ParseResult<Vec<ExportSpecifier>> {
        self.expect_punctuator(Punctuator::LBrace)?;
        let mut specifiers = Vec::new();
        let mut first = true;
        while !self.eat_punctuator(Punctuator::RBrace)? {
            if !first {
                self.expect_punctuator(Punctuator::Comma)?;
                if self.eat_punctuator(Punctuator::RBrace)? {
                    break;
                }
            }
            first = false;

            let start = self.token.start;
            let local = self.parse_module_export_name()?;
            let exported = if self.eat_contextual("as")? {
                self.parse_module_export_name()?
            } else {
                local.clone()
            };
            self.check_export(exported.name(), exported.span().start)?;
            specifiers.push(ExportSpecifier {
                span: self.finish(start),
                local,
                exported,
            });
        }
        Ok(specifiers)
    }

    /// Record an exported name; each may be exported once per module
    fn check_export(&mut self, name: &str, offset: usize) -> ParseResult<()> {
        if !self.exports.insert(name.to_string()) {
            return Err(self.early(offset, format!("Duplicate export '{}'", name)));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::*;
    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn parse_module(source: &str) -> Result<Program, String> {
        let options = ParseOptions::default().with_module(true);
        Parser::new(source, &options).parse_program().map_err(|err| err.message)
    }

    fn parse(source: &str) -> Program {
        parse_module(source).unwrap_or_else(|err| panic!("Failed to parse {:?}: {}", source, err))
    }

    fn fails(source: &str) -> String {
        match parse_module(source) {
            Ok(program) => panic!("Expected error for {:?}, got {:?}", source, program),
            Err(message) => message,
        }
    }

    #[test]
    fn test_import_forms() {
        let program = parse(
            "import a from 'a';\nimport * as ns from 'b';\nimport c, { d, e as f, 'g h' as i } from 'c';\nimport 'd';",
        );
        let counts: Vec<_> = program
            .body
            .iter()
            .map(|statement| match statement {
                Statement::ImportDeclaration(import) => import.specifiers.len(),
                other => panic!("Expected import, got {:?}", other),
            })
            .collect();
        assert_eq!(counts, vec![1, 1, 4, 0]);
    }

    #[test]
    fn test_import_specifier_spans() {
        let program = parse("import { a as b } from 'm';");
        match &program.body[0] {
            Statement::ImportDeclaration(import) => {
                assert_eq!((import.span.start, import.span.end), (0, 27));
                match &import.specifiers[0] {
                    ImportSpecifier::ImportSpecifier { span, imported, local } => {
                        assert_eq!((span.start, span.end), (9, 15));
                        assert_eq!(imported.name(), "a");
                        assert_eq!(local.name, "b");
                    }
                    other => panic!("Expected named specifier, got {:?}", other),
                }
            }
            other => panic!("Expected import, got {:?}", other),
        }
    }

    #[test]
    fn test_import_errors() {
        assert!(fails("import { 'a' } from 'm';").contains("string literal"));
        assert!(fails("import { if } from 'm';").contains("Unexpected keyword"));
        assert!(fails("import a from 'm'; import a from 'n';").contains("already been declared"));
        assert!(fails("import a, from 'm';").len() > 0);
        assert!(fails("import { a } from b;").len() > 0);
    }

    #[test]
    fn test_import_attributes() {
        let program = parse("import data from './data.json' with { type: 'json' };");
        match &program.body[0] {
            Statement::ImportDeclaration(import) => {
                assert_eq!(import.attributes.len(), 1);
                assert_eq!(import.attributes[0].key.name(), "type");
                assert_eq!(import.attributes[0].value.as_str(), Some("json"));
            }
            other => panic!("Expected import, got {:?}", other),
        }
        assert_eq!(
            fails("import a from 'a' with { type: 'json', 'type': 'css' };"),
            "Duplicate attribute key 'type'"
        );
    }

    #[test]
    fn test_export_forms() {
        let program = parse(
            "export * from 'a';\nexport * as ns from 'b';\nexport { x as y } from 'c';\nexport const z = 1, [w] = [];\nexport function f() {}\nexport class C {}\nexport default 42;",
        );
        assert_eq!(program.body.len(), 7);
        assert!(matches!(program.body[0], Statement::ExportAllDeclaration { exported: None, .. }));
        assert!(matches!(program.body[1], Statement::ExportAllDeclaration { exported: Some(_), .. }));
        assert!(matches!(
            program.body[6],
            Statement::ExportDefaultDeclaration {
                declaration: ExportDefaultKind::Expression(_),
                ..
            }
        ));
    }

    #[test]
    fn test_export_default_declarations() {
        let program = parse("export default function () {}");
        assert!(matches!(
            &program.body[0],
            Statement::ExportDefaultDeclaration {
                declaration: ExportDefaultKind::FunctionDeclaration(function),
                ..
            } if function.id.is_none()
        ));
        parse("export default class {}");
        parse("export default async function named() {}");
        parse("export default (a, b) => a + b;");
    }

    #[test]
    fn test_local_exports_must_be_declared() {
        parse("let a; export { a };");
        parse("export { b }; var b;");
        assert_eq!(fails("export { missing };"), "Export 'missing' is not defined");
        assert!(fails("export { 'a' };").contains("without `from`"));
        parse("export { 'a' } from 'm';");
        assert!(fails("export { if };").contains("Unexpected keyword"));
        parse("export { if } from 'm';");
    }

    #[test]
    fn test_duplicate_exports() {
        assert_eq!(fails("export var a; export { a };"), "Duplicate export 'a'");
        assert_eq!(fails("export default 1; export default 2;"), "Duplicate export 'default'");
        assert_eq!(
            fails("export const { a, b: [a2, ...rest] } = o; export { a2 as rest };"),
            "Duplicate export 'rest'"
        );
    }

    #[test]
    fn test_string_export_names_must_be_well_formed() {
        let message = "An export name cannot include a lone surrogate.";
        assert_eq!(fails(r#"var a; export { a as "\ud800" };"#), message);
        assert_eq!(fails(r#"export * as "\udc00x" from "m";"#), message);
        assert_eq!(fails(r#"import { "\ud800" as b } from "m";"#), message);
        parse(r#"var a; export { a as "😀" };"#);
        parse(r#"export { "\u{1F600}" as c } from "m";"#);
        parse(r#"import a from "m" with { "\ud800": "x" };"#);
    }

    #[test]
    fn test_module_code_is_strict() {
        assert!(fails("with (a) b;").contains("strict mode"));
        assert!(fails("var await;").len() > 0);
        parse("await 1;");
    }
}
