//! Declaration synthesis.
//!
//! Every named type gets one declaration. A type whose only constructing
//! alternative carries the type's own name is a record:
//!
//! ```text
//! #[derive(Clone, Debug, PartialEq, Eq)]
//! pub struct Num {
//!     pub value: Span,
//! }
//! ```
//!
//! Any other type is an enum with one record per constructing alternative:
//!
//! ```text
//! pub enum Expr {
//!     Add(Add),
//!     Lit(Lit),
//! }
//! ```

use indexmap::IndexMap;
use rustc_hash::FxHashSet;

use pegt_ir::{Grammar, Variant};
use pegt_types::infer_type;

use crate::context::CodegenContext;
use crate::names::{check_type_name, field_ident};
use crate::types::rust_type;
use crate::CodegenError;

const DERIVES: &str = "#[derive(Clone, Debug, PartialEq, Eq)]";

/// A constructing alternative.
struct Constructor<'g> {
    name: &'g str,
    variant: &'g Variant,
}

/// Constructing alternatives grouped by the type they build, in order of
/// first appearance.
pub struct Declarations<'g> {
    types: IndexMap<&'g str, Vec<Constructor<'g>>>,
}

impl<'g> Declarations<'g> {
    /// Group and validate the constructing alternatives of `grammar`.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn collect(grammar: &'g Grammar) -> Result<Self, CodegenError> {
        let mut types: IndexMap<&'g str, Vec<Constructor<'g>>> = IndexMap::new();
        for rule in grammar.rules() {
            for variant in &rule.alternatives {
                let Variant::Constructing { name, .. } = variant else {
                    continue;
                };
                let Some(ty) = rule.ty.name() else {
                    return Err(CodegenError::ConstructingInOpaque {
                        rule: rule.name.clone(),
                        variant: name.clone(),
                    });
                };
                types
                    .entry(ty)
                    .or_default()
                    .push(Constructor { name, variant });
            }
        }

        for rule in grammar.rules() {
            if let Some(ty) = rule.ty.name() {
                if !types.contains_key(ty) {
                    return Err(CodegenError::NoConstructor(ty.to_string()));
                }
            }
        }

        let declarations = Declarations { types };
        declarations.validate()?;
        tracing::debug!(types = declarations.types.len(), "declarations collected");
        Ok(declarations)
    }

    fn validate(&self) -> Result<(), CodegenError> {
        let mut declared = FxHashSet::default();
        let mut declare = |name: &str| {
            if declared.insert(name.to_string()) {
                Ok(())
            } else {
                Err(CodegenError::DuplicateDeclaration(name.to_string()))
            }
        };

        for (&ty, constructors) in &self.types {
            if constructors.len() > 1 && constructors.iter().any(|c| c.name == ty) {
                return Err(CodegenError::AmbiguousShape {
                    ty: ty.to_string(),
                    count: constructors.len(),
                });
            }
            check_type_name("type", ty)?;
            declare(ty)?;

            let is_record = matches!(&constructors[..], [only] if only.name == ty);
            for constructor in constructors {
                if !is_record {
                    check_type_name("variant", constructor.name)?;
                    declare(constructor.name)?;
                }
                let mut fields = FxHashSet::default();
                for (field, _) in constructor.variant.fields() {
                    field_ident(field)?;
                    if !fields.insert(field) {
                        return Err(CodegenError::DuplicateField {
                            variant: constructor.name.to_string(),
                            field: field.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    /// Emit all declarations, each followed by a blank line.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn emit(&self, ctx: &mut CodegenContext, grammar: &Grammar) -> Result<(), CodegenError> {
        for (&ty, constructors) in &self.types {
            if let [only] = &constructors[..] {
                if only.name == ty {
                    emit_struct(ctx, grammar, only)?;
                    ctx.newline();
                    continue;
                }
            }

            ctx.writeln(DERIVES);
            ctx.block(&format!("pub enum {ty} {{"), "}", |ctx| {
                for constructor in constructors {
                    ctx.writeln(&format!("{0}({0}),", constructor.name));
                }
            });
            ctx.newline();
            for constructor in constructors {
                emit_struct(ctx, grammar, constructor)?;
                ctx.newline();
            }
        }
        Ok(())
    }
}

fn emit_struct(
    ctx: &mut CodegenContext,
    grammar: &Grammar,
    constructor: &Constructor<'_>,
) -> Result<(), CodegenError> {
    let mut fields = Vec::new();
    for (field, expr) in constructor.variant.fields() {
        let ty = rust_type(&infer_type(expr, grammar)?);
        fields.push(format!("pub {}: {ty},", field_ident(field)?));
    }

    ctx.writeln(DERIVES);
    if fields.is_empty() {
        ctx.writeln(&format!("pub struct {} {{}}", constructor.name));
        return Ok(());
    }
    ctx.block(&format!("pub struct {} {{", constructor.name), "}", |ctx| {
        for field in &fields {
            ctx.writeln(field);
        }
    });
    Ok(())
}
