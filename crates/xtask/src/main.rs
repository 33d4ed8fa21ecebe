use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use regex_lite::Regex;
use serde::Deserialize;

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
    workspace_root: PathBuf,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    kind: Option<String>,
}

/// Normal (non-dev, non-build) dependencies each crate must not pull in.
fn forbidden_dependencies() -> HashMap<&'static str, &'static [&'static str]> {
    HashMap::from([
        (
            "chorewars-domain",
            &[
                "tokio",
                "rand",
                "serde_json",
                "async-trait",
                "tracing",
                "chorewars-shared",
                "chorewars-engine",
            ][..],
        ),
        ("chorewars-shared", &["tokio", "chorewars-engine"][..]),
    ])
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata")?;

    let mut violations = dependency_violations(&metadata.packages);
    violations.extend(domain_source_violations(&metadata.workspace_root)?);

    if violations.is_empty() {
        println!("arch-check passed");
        return Ok(());
    }

    for violation in &violations {
        eprintln!("  {violation}");
    }
    anyhow::bail!("arch-check found {} violation(s)", violations.len())
}

fn dependency_violations(packages: &[Package]) -> Vec<String> {
    let rules = forbidden_dependencies();
    let mut violations = Vec::new();

    for package in packages {
        let Some(forbidden) = rules.get(package.name.as_str()) else {
            continue;
        };
        for dep in &package.dependencies {
            // `kind` is null for normal dependencies
            if dep.kind.is_none() && forbidden.contains(&dep.name.as_str()) {
                violations.push(format!("{} depends on {}", package.name, dep.name));
            }
        }
    }

    violations
}

/// The domain crate stays synchronous and free of I/O.
fn domain_source_violations(workspace_root: &Path) -> anyhow::Result<Vec<String>> {
    let pattern = Regex::new(r"\b(async\s+fn|tokio::|std::fs::|std::net::|rand::)")
        .context("compiling domain pattern")?;

    let mut files = Vec::new();
    collect_rust_files(&workspace_root.join("crates/domain/src"), &mut files)?;

    let mut violations = Vec::new();
    for file in files {
        let source = std::fs::read_to_string(&file)
            .with_context(|| format!("reading {}", file.display()))?;
        for (line_no, line) in source.lines().enumerate() {
            if line.trim_start().starts_with("//") {
                continue;
            }
            if let Some(found) = pattern.find(line) {
                violations.push(format!(
                    "{}:{} uses `{}`",
                    file.display(),
                    line_no + 1,
                    found.as_str()
                ));
            }
        }
    }

    Ok(violations)
}

fn collect_rust_files(dir: &Path, out: &mut Vec<PathBuf>) -> anyhow::Result<()> {
    for entry in std::fs::read_dir(dir).with_context(|| format!("listing {}", dir.display()))? {
        let path = entry?.path();
        if path.is_dir() {
            collect_rust_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            out.push(path);
        }
    }
    Ok(())
}
