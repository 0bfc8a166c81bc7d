use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use mmr_core::{RegionFile, RenderStyle};

fn main() -> ExitCode {
    if let Err(err) = run() {
        eprintln!("error: {}", err);
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn run() -> Result<(), String> {
    let root = PathBuf::from("tests").join("golden");
    let entries =
        fs::read_dir(&root).map_err(|err| format!("failed to read {}: {}", root.display(), err))?;

    for entry in entries {
        let entry = entry.map_err(|err| format!("failed to read entry: {}", err))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let input = path.join("input.bin");
        if !input.exists() {
            continue;
        }
        let output = path.join("expected_region.json");
        regenerate_one(&input, &output)?;
    }

    Ok(())
}

fn regenerate_one(input: &Path, output: &Path) -> Result<(), String> {
    let region = RegionFile::open(input, None)
        .map_err(|err| format!("failed to load {}: {}", input.display(), err))?;
    let json = region
        .render(RenderStyle::Pretty)
        .map_err(|err| format!("{}: {}", input.display(), err))?;
    fs::write(output, json)
        .map_err(|err| format!("failed to write {}: {}", output.display(), err))?;
    Ok(())
}
