//! Module assembly.
//!
//! Output layout, inside the namespace modules when the grammar has one:
//! declarations, the runtime, the entry points, then one routine per rule.

use pegt_ir::Grammar;
use pegt_types::ValueType;

use crate::context::CodegenContext;
use crate::decls::Declarations;
use crate::names::{check_rule_name, module_path};
use crate::rule::emit_rule;
use crate::runtime::RustRuntime;
use crate::types::rust_type;
use crate::{CodegenError, CodegenOptions};

const HEADER: &str = "// @generated by pegtc. Do not edit.";

/// Generate the parser module for `grammar`.
#[tracing::instrument(level = "debug", skip_all, fields(rules = grammar.rules().len()))]
pub fn generate(grammar: &Grammar, options: &CodegenOptions) -> Result<String, CodegenError> {
    pegt_types::check_grammar(grammar)?;
    for rule in grammar.rules() {
        check_rule_name(&rule.name)?;
    }
    let path = match grammar.namespace() {
        Some(namespace) => module_path(namespace)?,
        None => Vec::new(),
    };
    let declarations = Declarations::collect(grammar)?;

    let mut ctx = CodegenContext::new(options.indent_width);
    if options.emit_header {
        ctx.writeln(HEADER);
        ctx.newline();
    }
    for segment in &path {
        ctx.writeln(&format!("pub mod {segment} {{"));
        ctx.indent();
    }

    declarations.emit(&mut ctx, grammar)?;
    RustRuntime::emit_types(&mut ctx);
    ctx.newline();
    RustRuntime::emit_parser(&mut ctx);
    ctx.newline();
    emit_entry(&mut ctx, grammar);
    ctx.newline();

    ctx.writeln("#[allow(unused, non_snake_case, clippy::all, clippy::pedantic)]");
    ctx.block("impl<'s> Parser<'s> {", "}", |ctx| {
        for (index, rule) in grammar.rules().iter().enumerate() {
            if index > 0 {
                ctx.newline();
            }
            emit_rule(ctx, grammar, rule)?;
        }
        Ok::<(), CodegenError>(())
    })?;

    for _ in &path {
        ctx.dedent();
        ctx.writeln("}");
    }
    tracing::debug!("module generated");
    Ok(ctx.take_output())
}

/// `Parser::parse` and the free `parse` function.
fn emit_entry(ctx: &mut CodegenContext, grammar: &Grammar) {
    let start = grammar.start();
    let ty = rust_type(&ValueType::of_rule(&grammar.start_rule().ty));

    ctx.block("impl<'s> Parser<'s> {", "}", |ctx| {
        ctx.writeln(&format!("/// Parse the whole source as `{start}`."));
        ctx.writeln("///");
        ctx.writeln("/// On failure, reports the furthest position any alternative reached.");
        ctx.block(
            &format!("pub fn parse(&mut self) -> Result<{ty}, ParseError> {{"),
            "}",
            |ctx| {
                ctx.block(&format!("let value = match self.parse_{start}() {{"), "};", |ctx| {
                    ctx.writeln("Ok(value) => value,");
                    ctx.writeln("Err(error) => return Err(self.furthest_failure(error)),");
                });
                ctx.block("if self.pos < self.source.len() {", "}", |ctx| {
                    ctx.writeln(
                        "let error = ParseError { pos: self.pos, expected: \"end of input\" };",
                    );
                    ctx.block("return Err(match self.furthest.take() {", "});", |ctx| {
                        ctx.writeln("Some(furthest) if furthest.pos >= self.pos => furthest,");
                        ctx.writeln("_ => error,");
                    });
                });
                ctx.writeln("Ok(value)");
            },
        );
    });
    ctx.newline();
    ctx.writeln(&format!("/// Parse `source` as `{start}`."));
    ctx.block(
        &format!("pub fn parse(source: &str) -> Result<{ty}, ParseError> {{"),
        "}",
        |ctx| ctx.writeln("Parser::new(source).parse()"),
    );
}

#[cfg(test)]
mod tests;
