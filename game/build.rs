use std::env;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

fn main() {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let levels_dir = manifest_dir.join("../levels");
    println!("cargo:rerun-if-changed={}", levels_dir.display());

    let levels = level_files(&levels_dir);
    let code = level_table(&levels);

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("levels.rs");
    if fs::read_to_string(&dest_path).ok().as_deref() != Some(code.as_str()) {
        fs::write(&dest_path, code).expect("failed to write the embedded level table");
    }
}

/// `(name, absolute path)` for each `*.txt` maze, sorted by name so level
/// numbers follow file names.
fn level_files(dir: &Path) -> Vec<(String, PathBuf)> {
    let Ok(entries) = fs::read_dir(dir) else {
        println!("cargo:warning=no level directory at {}", dir.display());
        return Vec::new();
    };
    let mut levels: Vec<(String, PathBuf)> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|e| e == "txt"))
        .filter_map(|path| {
            let name = path.file_stem()?.to_str()?.to_string();
            let path = path.canonicalize().ok()?;
            Some((name, path))
        })
        .collect();
    levels.sort();
    for (_, path) in &levels {
        println!("cargo:rerun-if-changed={}", path.display());
    }
    levels
}

fn level_table(levels: &[(String, PathBuf)]) -> String {
    let mut code = String::from("pub(crate) static LEVEL_DATA: &[(&str, &str)] = &[\n");
    for (name, path) in levels {
        let _ = writeln!(code, "    ({name:?}, include_str!({:?})),", path.display().to_string());
    }
    code.push_str("];\n");
    code
}
