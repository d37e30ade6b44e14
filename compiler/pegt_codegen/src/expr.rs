//! Expression Code Generation
//!
//! Lowers grammar expressions to Rust statements inside a rule routine.
//!
//! Every expression binds its value to a fresh variable and advances
//! `self.pos`, or fails. A failure is a `ParseError` sent to the current
//! failure target (see [`CodegenContext::fail_stmt`]): the rule routine
//! returns it, or a labelled block evaluates to it.
//!
//! Constructs that recover from failure (choice, repeat, optional and
//! negation) run their operand in a labelled block of type
//! `Result<T, ParseError>`:
//!
//! ```text
//! let _tmp1 = self.pos;
//! let _tmp2: Result<Span, ParseError> = 'blk0: {
//!     let _tmp3 = match self.literal("x", "\"x\"") { Ok(v) => v, Err(e) => break 'blk0 Err(e) };
//!     Ok(_tmp3)
//! };
//! ```
//!
//! and restore `self.pos` from the saved offset when it fails.

use pegt_ir::{Expr, Grammar};
use pegt_stack::ensure_sufficient_stack;
use pegt_types::{infer_type, TypeError};

use crate::context::CodegenContext;
use crate::types::rust_type;
use crate::CodegenError;

/// Generate code for an expression.
///
/// Returns the name of the variable holding its value.
pub fn emit_expr(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    expr: &Expr,
) -> Result<String, CodegenError> {
    ensure_sufficient_stack(|| emit_expr_inner(ctx, grammar, expr))
}

fn emit_expr_inner(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    expr: &Expr,
) -> Result<String, CodegenError> {
    match expr {
        Expr::Literal(text) => {
            let call = format!("self.literal({text:?}, {:?})", expr.to_string());
            Ok(emit_call(ctx, &call))
        }
        Expr::CharRange(lo, hi) => {
            let call = format!("self.char_range({lo:?}, {hi:?}, {:?})", expr.to_string());
            Ok(emit_call(ctx, &call))
        }
        Expr::AnyChar => Ok(emit_call(ctx, "self.any_char()")),
        Expr::Reference(rule) => Ok(emit_call(ctx, &format!("self.parse_{rule}()"))),
        Expr::Repeat { min, item } => emit_repeat(ctx, grammar, *min, item),
        Expr::Negate(inner) => emit_negate(ctx, grammar, inner),
        Expr::AsString(inner) => {
            let start = ctx.fresh_temp();
            ctx.writeln(&format!("let {start} = self.pos;"));
            emit_expr(ctx, grammar, inner)?;
            let result = ctx.fresh_temp();
            ctx.writeln(&format!("let {result} = Span::new({start}, self.pos);"));
            Ok(result)
        }
        Expr::Sequence { keep, children } => {
            let mut kept = None;
            for (index, child) in children.iter().enumerate() {
                let value = emit_expr(ctx, grammar, child)?;
                if index == *keep {
                    kept = Some(value);
                }
            }
            kept.ok_or_else(|| {
                TypeError::KeepIndexOutOfBounds {
                    keep: *keep,
                    len: children.len(),
                }
                .into()
            })
        }
        Expr::Choice(options) => emit_choice(ctx, grammar, expr, options),
        Expr::Optional(inner) => {
            let ty = rust_type(&infer_type(inner, grammar)?);
            let saved = ctx.fresh_temp();
            ctx.writeln(&format!("let {saved} = self.pos;"));
            let attempt = emit_attempt(ctx, grammar, inner, &ty)?;
            let result = ctx.fresh_temp();
            ctx.block(
                &format!("let {result}: Option<{ty}> = match {attempt} {{"),
                "};",
                |ctx| {
                    ctx.writeln("Ok(v) => Some(v),");
                    ctx.block("Err(_) => {", "}", |ctx| {
                        ctx.writeln(&format!("self.pos = {saved};"));
                        ctx.writeln("None");
                    });
                },
            );
            Ok(result)
        }
    }
}

/// Bind the value of a fallible call to a fresh variable.
fn emit_call(ctx: &mut CodegenContext, call: &str) -> String {
    let result = ctx.fresh_temp();
    ctx.bind(&result, call);
    result
}

/// Run `expr` in a labelled block that evaluates to its outcome.
///
/// Returns the name of the variable holding the `Result`.
pub fn emit_attempt(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    expr: &Expr,
    ty: &str,
) -> Result<String, CodegenError> {
    let outcome = ctx.fresh_temp();
    let label = ctx.fresh_label("blk");
    ctx.block(
        &format!("let {outcome}: Result<{ty}, ParseError> = {label}: {{"),
        "};",
        |ctx| {
            ctx.with_fail_target(Some(label.clone()), |ctx| {
                let value = emit_expr(ctx, grammar, expr)?;
                ctx.writeln(&format!("Ok({value})"));
                Ok::<(), CodegenError>(())
            })
        },
    )?;
    Ok(outcome)
}

fn emit_repeat(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    min: usize,
    item: &Expr,
) -> Result<String, CodegenError> {
    let ty = rust_type(&infer_type(item, grammar)?);
    let result = ctx.fresh_temp();
    ctx.writeln(&format!("let mut {result}: Vec<{ty}> = Vec::new();"));

    let label = ctx.fresh_label("loop");
    ctx.block(&format!("{label}: loop {{"), "}", |ctx| {
        let saved = ctx.fresh_temp();
        ctx.writeln(&format!("let {saved} = self.pos;"));
        let attempt = emit_attempt(ctx, grammar, item, &ty)?;
        ctx.block(&format!("match {attempt} {{"), "}", |ctx| {
            ctx.block("Ok(v) => {", "}", |ctx| {
                ctx.writeln(&format!("{result}.push(v);"));
                // An item that matched nothing would match forever.
                ctx.block(&format!("if self.pos == {saved} {{"), "}", |ctx| {
                    ctx.writeln(&format!("break {label};"));
                });
            });
            ctx.block("Err(_) => {", "}", |ctx| {
                ctx.writeln(&format!("self.pos = {saved};"));
                ctx.writeln(&format!("break {label};"));
            });
        });
        Ok::<(), CodegenError>(())
    })?;

    if min > 0 {
        let expected = format!("at least {min} of {item}");
        ctx.block(&format!("if {result}.len() < {min} {{"), "}", |ctx| {
            let stmt = ctx.fail_stmt(&format!("self.fail(self.pos, {expected:?})"));
            ctx.writeln(&stmt);
        });
    }
    Ok(result)
}

fn emit_negate(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    inner: &Expr,
) -> Result<String, CodegenError> {
    let ty = rust_type(&infer_type(inner, grammar)?);
    let saved = ctx.fresh_temp();
    ctx.writeln(&format!("let {saved} = self.pos;"));
    let attempt = emit_attempt(ctx, grammar, inner, &ty)?;
    ctx.writeln(&format!("self.pos = {saved};"));

    let expected = format!("not {inner}");
    ctx.block(&format!("if {attempt}.is_ok() {{"), "}", |ctx| {
        let stmt = ctx.fail_stmt(&format!("self.fail({saved}, {expected:?})"));
        ctx.writeln(&stmt);
    });

    let result = ctx.fresh_temp();
    ctx.writeln(&format!("let {result} = ();"));
    Ok(result)
}

fn emit_choice(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    expr: &Expr,
    options: &[Expr],
) -> Result<String, CodegenError> {
    // Typed by the first option alone; options of another type produce
    // generated code that does not compile.
    let ty = rust_type(&infer_type(expr, grammar)?);
    let saved = ctx.fresh_temp();
    ctx.writeln(&format!("let {saved} = self.pos;"));

    let outcome = ctx.fresh_temp();
    let label = ctx.fresh_label("blk");
    ctx.block(
        &format!("let {outcome}: Result<{ty}, ParseError> = {label}: {{"),
        "};",
        |ctx| {
            let error = ctx.fresh_temp();
            for (index, option) in options.iter().enumerate() {
                let attempt = emit_attempt(ctx, grammar, option, &ty)?;
                let on_success = format!("break {label} Ok(v)");
                emit_merge(ctx, index, &error, &attempt, &on_success);
                ctx.writeln(&format!("self.pos = {saved};"));
            }
            ctx.writeln(&format!("Err({error})"));
            Ok::<(), CodegenError>(())
        },
    )?;

    let result = ctx.fresh_temp();
    ctx.bind(&result, &outcome);
    Ok(result)
}

/// Finish one ordered alternative: leave with its value on success, else
/// merge its failure into `error`, keeping the furthest one.
pub fn emit_merge(
    ctx: &mut CodegenContext,
    index: usize,
    error: &str,
    attempt: &str,
    on_success: &str,
) {
    let line = if index == 0 {
        format!("let mut {error} = match {attempt} {{ Ok(v) => {on_success}, Err(e) => e }};")
    } else {
        format!("{error} = match {attempt} {{ Ok(v) => {on_success}, Err(e) => {error}.ingest(e) }};")
    };
    ctx.writeln(&line);
}
