//! pegt Driver
//!
//! Runs the whole pipeline over grammar source:
//!
//! ```text
//! grammar text
//!     │ parse_grammar
//!     ▼
//! Grammar ──► rule dump (Display)
//!     │ generate
//!     ▼
//! Rust module source
//! ```
//!
//! Used by the `pegtc` binary and, through [`cargo_build`], by build
//! scripts that turn grammar files into parsers at compile time:
//!
//! ```text
//! // build.rs
//! fn main() {
//!     pegtc::cargo_build("grammars/calc.peg").unwrap();
//! }
//!
//! // src/lib.rs
//! include!(concat!(env!("OUT_DIR"), "/calc.rs"));
//! ```

mod error;

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Once;

use pegt_codegen::CodegenOptions;
use pegt_diagnostic::emitter::{ColorMode, SourceFile, TerminalEmitter};
use pegt_ir::Grammar;

pub use error::DriverError;

/// The result of compiling one grammar.
#[derive(Clone, Debug)]
pub struct Compiled {
    pub grammar: Grammar,
    /// Source of the generated Rust module.
    pub module: String,
}

impl Compiled {
    /// Human-readable listing of the grammar's rules.
    pub fn rule_dump(&self) -> String {
        self.grammar.to_string()
    }
}

/// Parse, check and generate a parser for `source`.
#[tracing::instrument(level = "debug", skip_all)]
pub fn compile_source(source: &str, options: &CodegenOptions) -> Result<Compiled, DriverError> {
    let grammar = pegt_parse::parse_grammar(source)?;
    let module = pegt_codegen::generate(&grammar, options)?;
    tracing::debug!(bytes = module.len(), "compiled");
    Ok(Compiled { grammar, module })
}

/// Compile the grammar at `input` and write the module to `output`.
pub fn compile_file(
    input: &Path,
    output: &Path,
    options: &CodegenOptions,
) -> Result<Compiled, DriverError> {
    let source = read_file(input)?;
    let compiled = compile_source(&source, options)?;
    write_module(output, &compiled.module)?;
    Ok(compiled)
}

/// Write generated module source to `output`.
pub fn write_module(output: &Path, module: &str) -> Result<(), DriverError> {
    std::fs::write(output, module).map_err(|e| DriverError::write(output, &e))?;
    tracing::debug!(output = %output.display(), "module written");
    Ok(())
}

/// Read a grammar file.
pub fn read_file(path: &Path) -> Result<String, DriverError> {
    std::fs::read_to_string(path).map_err(|e| DriverError::read(path, &e))
}

/// Generate `<out_dir>/<stem>.rs` from the grammar at `grammar`.
///
/// Returns the path of the generated file.
pub fn build_into(grammar: &Path, out_dir: &Path) -> Result<PathBuf, DriverError> {
    let Some(stem) = grammar.file_stem().and_then(OsStr::to_str) else {
        return Err(DriverError::Usage(format!(
            "'{}' has no usable file name",
            grammar.display()
        )));
    };
    let output = out_dir.join(format!("{stem}.rs"));
    compile_file(grammar, &output, &CodegenOptions::default())?;
    Ok(output)
}

/// Build-script entry point: generate `$OUT_DIR/<stem>.rs` from `grammar`
/// and ask Cargo to rerun when the grammar changes.
pub fn cargo_build(grammar: impl AsRef<Path>) -> Result<PathBuf, DriverError> {
    let grammar = grammar.as_ref();
    println!("cargo:rerun-if-changed={}", grammar.display());
    let Some(out_dir) = std::env::var_os("OUT_DIR") else {
        return Err(DriverError::Usage(
            "OUT_DIR is not set; call cargo_build from a build script".to_string(),
        ));
    };
    build_into(grammar, Path::new(&out_dir))
}

/// Print `error` to stderr, pointing into `source` when it has an offset.
pub fn report(error: &DriverError, source: Option<SourceFile>) {
    let is_tty = std::io::IsTerminal::is_terminal(&std::io::stderr());
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty);
    if let Some(source) = source {
        emitter = emitter.with_source(source);
    }
    emitter.emit(&error.to_diagnostic());
    emitter.flush();
}

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Call this once at startup. Safe to call multiple times.
/// Enable with `RUST_LOG=pegt_codegen=trace` or `RUST_LOG=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_writer(std::io::stderr),
                )
                .with(filter)
                .init();
        }
    });
}
