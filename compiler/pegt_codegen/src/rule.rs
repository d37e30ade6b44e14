//! Rule Code Generation
//!
//! One `parse_<Rule>` routine per rule. A rule with a single alternative
//! runs it directly; with several, each is tried in order from the same
//! start position and the furthest failure is returned when all fail.

use pegt_ir::{Grammar, Item, Rule, Variant};
use pegt_types::{TypeError, ValueType};

use crate::context::CodegenContext;
use crate::expr::{emit_expr, emit_merge};
use crate::names::field_ident;
use crate::types::rust_type;
use crate::CodegenError;

/// Emit the parse routine of `rule`.
#[tracing::instrument(level = "trace", skip_all, fields(rule = %rule.name))]
pub fn emit_rule(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    rule: &Rule,
) -> Result<(), CodegenError> {
    ctx.reset_names();
    let ty = rust_type(&ValueType::of_rule(&rule.ty));
    let signature = format!("pub fn parse_{}(&mut self) -> Result<{ty}, ParseError> {{", rule.name);
    ctx.block(&signature, "}", |ctx| {
        ctx.with_fail_target(None, |ctx| match &rule.alternatives[..] {
            [] => Err(CodegenError::from(TypeError::EmptyChoice)),
            [alternative] => {
                let value = emit_variant(ctx, grammar, rule, alternative)?;
                ctx.writeln(&format!("Ok({value})"));
                Ok(())
            }
            alternatives => emit_alternatives(ctx, grammar, rule, alternatives, &ty),
        })
    })
}

/// Ordered choice over the alternatives of a rule.
fn emit_alternatives(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    rule: &Rule,
    alternatives: &[Variant],
    ty: &str,
) -> Result<(), CodegenError> {
    let saved = ctx.fresh_temp();
    ctx.writeln(&format!("let {saved} = self.pos;"));
    let error = ctx.fresh_temp();
    for (index, alternative) in alternatives.iter().enumerate() {
        let outcome = ctx.fresh_temp();
        let label = ctx.fresh_label("blk");
        ctx.block(
            &format!("let {outcome}: Result<{ty}, ParseError> = {label}: {{"),
            "};",
            |ctx| {
                ctx.with_fail_target(Some(label.clone()), |ctx| {
                    let value = emit_variant(ctx, grammar, rule, alternative)?;
                    ctx.writeln(&format!("Ok({value})"));
                    Ok::<(), CodegenError>(())
                })
            },
        )?;
        emit_merge(ctx, index, &error, &outcome, "return Ok(v)");
        ctx.writeln(&format!("self.pos = {saved};"));
    }
    ctx.writeln(&format!("Err({error})"));
    Ok(())
}

/// Emit one alternative, returning the variable holding its value.
fn emit_variant(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    rule: &Rule,
    variant: &Variant,
) -> Result<String, CodegenError> {
    let (name, items) = match variant {
        Variant::NonConstructing(expr) => return emit_expr(ctx, grammar, expr),
        Variant::Constructing { name, items } => (name, items),
    };
    let Some(ty) = rule.ty.name() else {
        return Err(CodegenError::ConstructingInOpaque {
            rule: rule.name.clone(),
            variant: name.clone(),
        });
    };

    let mut fields = Vec::new();
    for item in items {
        let value = emit_expr(ctx, grammar, item.expr())?;
        if let Item::Keep { name: field, .. } = item {
            fields.push(format!("{}: {value}", field_ident(field)?));
        }
    }
    let record = if fields.is_empty() {
        format!("{name} {{}}")
    } else {
        format!("{name} {{ {} }}", fields.join(", "))
    };

    // A constructor named after its type is the type's only one: a record.
    let value = if name == ty {
        format!("Box::new({record})")
    } else {
        format!("Box::new({ty}::{name}({record}))")
    };
    let result = ctx.fresh_temp();
    ctx.writeln(&format!("let {result} = {value};"));
    Ok(result)
}

#[cfg(test)]
mod tests;
