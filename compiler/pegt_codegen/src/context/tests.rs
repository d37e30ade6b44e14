#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;

use super::*;

#[test]
fn test_fresh_temp() {
    let mut ctx = CodegenContext::new(4);
    assert_eq!(ctx.fresh_temp(), "_tmp0");
    assert_eq!(ctx.fresh_temp(), "_tmp1");
    assert_eq!(ctx.fresh_temp(), "_tmp2");
}

#[test]
fn test_fresh_label_independent_of_temps() {
    let mut ctx = CodegenContext::new(4);
    ctx.fresh_temp();
    assert_eq!(ctx.fresh_label("blk"), "'blk0");
    assert_eq!(ctx.fresh_label("loop"), "'loop1");
}

#[test]
fn test_indent_dedent() {
    let mut ctx = CodegenContext::new(4);

    ctx.writeln("line1");
    ctx.indent();
    ctx.writeln("line2");
    ctx.indent();
    ctx.writeln("line3");
    ctx.dedent();
    ctx.writeln("line4");
    ctx.dedent();
    ctx.writeln("line5");

    let output = ctx.take_output();
    assert_eq!(
        output,
        "line1\n    line2\n        line3\n    line4\nline5\n"
    );
}

#[test]
fn test_indent_width_and_blank_lines() {
    let mut ctx = CodegenContext::new(2);
    ctx.block("mod a {", "}", |ctx| ctx.write_lines("fn f() {}\n\nfn g() {}"));
    assert_eq!(ctx.take_output(), "mod a {\n  fn f() {}\n\n  fn g() {}\n}\n");
}

#[test]
fn test_write_lines_reindents() {
    let mut ctx = CodegenContext::new(2);
    ctx.indent();
    ctx.write_lines("fn f() {\n    body();\n        deeper();\n}");
    assert_eq!(
        ctx.take_output(),
        "  fn f() {\n    body();\n      deeper();\n  }\n"
    );
}

#[test]
fn test_failure_targets() {
    let mut ctx = CodegenContext::new(4);
    assert_eq!(ctx.fail_stmt("e"), "return Err(e);");

    ctx.with_fail_target(None, |ctx| {
        ctx.bind("_tmp0", "self.any_char()");
        ctx.with_fail_target(Some("'blk0".to_string()), |ctx| {
            assert_eq!(ctx.fail_stmt("e"), "break 'blk0 Err(e);");
            ctx.bind("_tmp1", "self.any_char()");
        });
        assert_eq!(ctx.fail_stmt("e"), "return Err(e);");
    });

    assert_eq!(
        ctx.take_output(),
        "let _tmp0 = self.any_char()?;\n\
         let _tmp1 = match self.any_char() { Ok(v) => v, Err(e) => break 'blk0 Err(e) };\n"
    );
}

#[test]
fn test_reset_names() {
    let mut ctx = CodegenContext::new(4);
    ctx.fresh_temp();
    ctx.fresh_label("blk");
    ctx.reset_names();
    assert_eq!(ctx.fresh_temp(), "_tmp0");
    assert_eq!(ctx.fresh_label("blk"), "'blk0");
}
