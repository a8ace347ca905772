use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::{env, fs};

const FIXTURE_DIR: &str = "src/fixtures";

/// Collect the `.md` fixtures, each of which must have an expected `.html`
/// next to it, sorted so the generated module is stable.
fn fixture_inputs(dir: &Path) -> Vec<PathBuf> {
    let entries = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("cannot read fixture directory {}: {e}", dir.display()));

    let mut inputs: Vec<PathBuf> = entries
        .map(|entry| entry.expect("fixture directory entry").path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    inputs.sort();

    for input in &inputs {
        let expected = input.with_extension("html");
        assert!(
            expected.is_file(),
            "fixture {} has no expected output {}",
            input.display(),
            expected.display()
        );
    }
    inputs
}

/// Turn a fixture stem into a valid test function name.
fn test_name(stem: &str) -> String {
    let name: String = stem
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect();
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("fixture_{name}")
    } else {
        name
    }
}

fn main() {
    let dir = Path::new(FIXTURE_DIR);
    println!("cargo::rerun-if-changed={FIXTURE_DIR}");

    let mut module = String::from("mod fixtures {\n    use super::fixture_test;\n");
    for input in fixture_inputs(dir) {
        let stem = input
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or_else(|| panic!("fixture name is not UTF-8: {}", input.display()));

        println!("cargo::rerun-if-changed={}", input.display());
        println!("cargo::rerun-if-changed={}", input.with_extension("html").display());

        let _ = write!(
            module,
            "\n    #[test]\n    fn {}() {{\n        fixture_test({stem:?});\n    }}\n",
            test_name(stem)
        );
    }
    module.push_str("}\n");

    let out = PathBuf::from(env::var_os("OUT_DIR").expect("OUT_DIR is set by cargo"));
    fs::write(out.join("fixture_tests.rs"), module).expect("write generated fixture tests");
}
