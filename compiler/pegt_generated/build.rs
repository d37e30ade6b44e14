//! Generates one parser module per grammar in `grammars/`.

const GRAMMARS: &[&str] = &[
    "digits", "choice", "record", "optional", "props", "calc", "meta",
];

fn main() {
    for name in GRAMMARS {
        let path = format!("grammars/{name}.peg");
        if let Err(error) = pegtc::cargo_build(&path) {
            panic!("{path}: {error}");
        }
    }
}
