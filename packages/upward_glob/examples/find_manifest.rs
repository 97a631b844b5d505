//! Finds the Cargo manifest that applies to the current working directory, the same way Cargo
//! locates `Cargo.toml` when invoked from a subdirectory of a package.
//!
//! Also reports the nearest enclosing Git repository, if there is one.

use upward_glob::{Search, TargetKind};

fn main() {
    println!("=== Nearest Cargo manifest ===");

    match Search::new(TargetKind::File).pattern("Cargo.toml").run() {
        Ok(manifests) => {
            for manifest in manifests {
                println!("Manifest: {}", manifest.display());
            }
        }
        Err(error) if error.is_not_found() => println!("Not inside a Cargo package"),
        Err(error) => eprintln!("Search failed: {error}"),
    }

    println!("=== Nearest Git repository ===");

    match Search::new(TargetKind::Any).pattern(".git").run() {
        Ok(markers) => {
            for marker in markers {
                println!("Repository marker: {}", marker.display());
            }
        }
        Err(error) if error.is_not_found() => println!("Not inside a Git repository"),
        Err(error) => eprintln!("Search failed: {error}"),
    }
}
