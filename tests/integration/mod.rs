// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

use crate::{run_cli, ProjectFixture};

use dirsketch::{
    exclude::ExclusionSet,
    gitignore::{AppendOutcome, IgnoreFile},
    tree::{TreeRenderer, BRANCH, CORNER},
};

use anyhow::Result;
use indoc::indoc;
use pretty_assertions::assert_eq;
use sealed_test::prelude::*;

#[sealed_test]
fn render_then_update_gitignore() -> Result<()> {
    let project = ProjectFixture::new(std::env::current_dir()?.join("webapp"))?;
    project
        .with_file(".gitignore", "build/\n")?
        .with_file(".env", "SECRET=1\n")?
        .with_file("package.json", "{}\n")?
        .with_file("src/index.js", "")?
        .with_file("src/components/App.js", "")?
        .with_file("node_modules/react/index.js", "")?
        .with_file("build/bundle.js", "")?
        .with_dir("public")?;

    let renderer = TreeRenderer::new(ExclusionSet::baseline());
    let stats = renderer.write_to_file(project.path(), project.path().join("tree.txt"))?;

    let result = project.read("tree.txt")?;
    let expect = indoc! {"
        webapp/
        ├── .gitignore
        ├── package.json
        ├── public
        ├── src
        │   ├── components
        │   │   └── App.js
        │   └── index.js
        └── tree.txt
    "};
    assert_eq!(result, expect);
    assert_eq!(stats.entries(), 8);

    let ignore = IgnoreFile::new(project.path());
    let outcome = ignore.append_missing(["build/", "dist/"])?;
    assert_eq!(outcome, AppendOutcome::Added(1));
    assert_eq!(project.read(".gitignore")?, "build/\n\ndist/\n");

    Ok(())
}

#[sealed_test]
fn last_sibling_at_every_level_uses_corner() -> Result<()> {
    let project = ProjectFixture::new(std::env::current_dir()?.join("deep"))?;
    project
        .with_file("a/b/c/d.txt", "")?
        .with_file("a/b/e.txt", "")?
        .with_file("a/f.txt", "")?
        .with_file("g/h.txt", "")?
        .with_file("g/target/skip.o", "")?
        .with_file("i.txt", "")?;

    let mut out = Vec::new();
    TreeRenderer::new(ExclusionSet::baseline()).render(project.path(), &mut out)?;
    let rendered = String::from_utf8(out)?;
    assert!(!rendered.contains("target"));

    let lines = rendered
        .lines()
        .skip(1)
        .map(connector_of)
        .collect::<Vec<_>>();
    for (index, (column, connector)) in lines.iter().enumerate() {
        // Next entry at same column before the walk climbs back out.
        let has_next_sibling = lines[index + 1..]
            .iter()
            .take_while(|(next, _)| next >= column)
            .any(|(next, _)| next == column);
        let expect = if has_next_sibling { BRANCH } else { CORNER };
        assert_eq!(*connector, expect, "line {index} of:\n{rendered}");
    }

    Ok(())
}

fn connector_of(line: &str) -> (usize, &'static str) {
    let column = line
        .chars()
        .position(|ch| ch == '├' || ch == '└')
        .unwrap_or(0);
    let rest = line.chars().skip(column).collect::<String>();
    if rest.starts_with(BRANCH) {
        (column, BRANCH)
    } else {
        (column, CORNER)
    }
}

#[sealed_test]
fn cli_writes_tree_and_gitignore() -> Result<()> {
    let project = ProjectFixture::new(std::env::current_dir()?.join("service"))?;
    project
        .with_file("main.go", "package main\n")?
        .with_file("logs/today.log", "")?
        .with_file("vendor/lib.go", "")?;

    let root = project.path().to_string_lossy().into_owned();
    let output = run_cli(&[root.as_str(), "-o", "docs/layout.txt", "-e", "logs", "vendor"])?;
    assert!(output.status.success());

    let result = project.read("docs/layout.txt")?;
    let expect = indoc! {"
        service/
        ├── docs
        │   └── layout.txt
        └── main.go
    "};
    assert_eq!(result, expect);

    let gitignore = project.read(".gitignore")?;
    assert_eq!(gitignore, "docs/layout.txt\nlogs/\nvendor/\n");

    // Second run adds nothing.
    let output = run_cli(&[root.as_str(), "-o", "docs/layout.txt", "-e", "logs", "vendor"])?;
    assert!(output.status.success());
    assert_eq!(project.read(".gitignore")?, gitignore);

    Ok(())
}

#[sealed_test]
fn cli_default_output_name() -> Result<()> {
    let project = ProjectFixture::new(std::env::current_dir()?.join("tool"))?;
    project.with_file("README.md", "")?;

    let root = project.path().to_string_lossy().into_owned();
    let output = run_cli(&[root.as_str()])?;
    assert!(output.status.success());

    assert!(project.exists("project_structure.txt"));
    assert_eq!(project.read(".gitignore")?, "project_structure.txt\n");

    Ok(())
}

#[sealed_test]
fn cli_no_gitignore_leaves_ignore_file_alone() -> Result<()> {
    let project = ProjectFixture::new(std::env::current_dir()?.join("tool"))?;
    project.with_file("README.md", "")?;

    let root = project.path().to_string_lossy().into_owned();
    let output = run_cli(&[root.as_str(), "--no-gitignore"])?;
    assert!(output.status.success());

    assert!(project.exists("project_structure.txt"));
    assert!(!project.exists(".gitignore"));

    Ok(())
}

#[sealed_test]
fn cli_missing_root_writes_nothing() -> Result<()> {
    let missing = std::env::current_dir()?.join("missing");

    let output = run_cli(&[missing.to_string_lossy().as_ref()])?;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("does not exist"));
    assert!(!missing.exists());

    Ok(())
}
