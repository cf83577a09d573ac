use commentpurger_core::{CoreError, FileOutcome, FormatOptions, FormatTable, process_paths};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_files(dir: &Path, files: &[(&str, &[u8])]) {
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

fn outcomes(summary: &commentpurger_core::RunSummary) -> HashMap<PathBuf, FileOutcome> {
    summary
        .results
        .iter()
        .filter_map(|r| r.outcome.as_ref().ok().map(|o| (r.path.clone(), *o)))
        .collect()
}

#[test]
fn strips_a_directory_tree() {
    let tmp = TempDir::new().unwrap();
    write_files(
        tmp.path(),
        &[
            ("test.js", b"// js comment\nconsole.log('hello');"),
            ("test.html", b"<!-- html comment --><p>hello</p>"),
            ("test.css", b"/* css comment */ body {}"),
            ("ignored.txt", b"this file should be ignored /* */"),
            ("nested/deeper/app.ts", b"let a = 1; /* x */\n"),
        ],
    );

    let summary = process_paths(&[tmp.path().to_path_buf()], &FormatTable::default());
    assert_eq!(summary.failures().count(), 0);

    let read = |name: &str| fs::read_to_string(tmp.path().join(name)).unwrap();
    assert_eq!(read("test.js"), "\nconsole.log('hello');");
    assert!(read("test.html").contains("<html><head></head><body><p>hello</p></body></html>"));
    assert_eq!(read("test.css"), " body {}");
    assert_eq!(read("ignored.txt"), "this file should be ignored /* */");
    assert_eq!(read("nested/deeper/app.ts"), "let a = 1; \n");

    let outcomes = outcomes(&summary);
    assert_eq!(outcomes[&tmp.path().join("ignored.txt")], FileOutcome::Skipped);
    assert_eq!(outcomes[&tmp.path().join("test.css")], FileOutcome::Stripped);
    assert_eq!(summary.stripped().count(), 4);
}

#[test]
fn clean_files_are_left_alone() {
    let tmp = TempDir::new().unwrap();
    write_files(tmp.path(), &[("clean.css", b"a { color: red; }")]);
    let path = tmp.path().join("clean.css");

    let summary = process_paths(&[path.clone()], &FormatTable::default());
    assert_eq!(outcomes(&summary)[&path], FileOutcome::Unchanged);
    assert_eq!(summary.stripped().count(), 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), "a { color: red; }");
}

#[test]
fn unreadable_markup_is_reported_and_the_walk_continues() {
    let tmp = TempDir::new().unwrap();
    let bad: &[u8] = b"<p>\xff<!-- c --></p>";
    write_files(tmp.path(), &[("bad.html", bad), ("good.css", b"a{} /* c */")]);

    let summary = process_paths(&[tmp.path().to_path_buf()], &FormatTable::default());

    let failures: Vec<_> = summary.failures().collect();
    assert_eq!(failures.len(), 1);
    assert!(matches!(failures[0], CoreError::Strip { .. }));
    assert_eq!(failures[0].path(), tmp.path().join("bad.html"));

    assert_eq!(fs::read(tmp.path().join("bad.html")).unwrap(), bad);
    assert_eq!(fs::read_to_string(tmp.path().join("good.css")).unwrap(), "a{} ");
}

#[test]
fn missing_root_does_not_stop_other_roots() {
    let tmp = TempDir::new().unwrap();
    write_files(tmp.path(), &[("a.js", b"x(); // y\n")]);

    let roots = vec![tmp.path().join("missing"), tmp.path().join("a.js")];
    let summary = process_paths(&roots, &FormatTable::default());

    assert_eq!(summary.walk_errors.len(), 1);
    assert!(matches!(summary.walk_errors[0], CoreError::Walk { .. }));
    assert_eq!(fs::read_to_string(tmp.path().join("a.js")).unwrap(), "x(); \n");
}

#[test]
fn overlapping_roots_process_each_file_once() {
    let tmp = TempDir::new().unwrap();
    write_files(tmp.path(), &[("a.css", b"/* c */a{}")]);

    let roots = vec![tmp.path().to_path_buf(), tmp.path().join("a.css")];
    let summary = process_paths(&roots, &FormatTable::default());
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.stripped().count(), 1);
}

#[test]
fn roots_spelled_differently_process_each_file_once() {
    let tmp = TempDir::new().unwrap();
    write_files(tmp.path(), &[("a.css", b"/* c */a{}"), ("sub/b.txt", b"x")]);

    let roots = vec![tmp.path().to_path_buf(), tmp.path().join("sub").join("..")];
    let summary = process_paths(&roots, &FormatTable::default());
    let css: Vec<_> = summary
        .results
        .iter()
        .filter(|r| r.path.extension().is_some_and(|ext| ext == "css"))
        .collect();
    assert_eq!(css.len(), 1);
    assert_eq!(summary.stripped().count(), 1);
    assert_eq!(fs::read(tmp.path().join("a.css")).unwrap(), b"a{}");
}

#[test]
fn composite_components_are_rebuilt() {
    let tmp = TempDir::new().unwrap();
    write_files(
        tmp.path(),
        &[(
            "App.vue",
            b"<template><!-- t --><div>{{m}}</div></template><script>// s\nexport default {}</script><style>/* s */ .a{}</style>",
        )],
    );

    process_paths(&[tmp.path().to_path_buf()], &FormatTable::default());
    let out = fs::read_to_string(tmp.path().join("App.vue")).unwrap();
    assert!(out.starts_with("<template>"));
    assert!(out.contains("<div>{{m}}</div>"));
    assert!(out.contains("<script>\nexport default {}</script>\n"));
    assert!(out.ends_with("<style> .a{}</style>\n"));
}

#[test]
fn opt_in_formats_follow_the_table() {
    let tmp = TempDir::new().unwrap();
    write_files(
        tmp.path(),
        &[("ci.yml", b"# c\nk: v\n"), ("lib.rs", b"fn a() {} // c\n")],
    );
    let root = vec![tmp.path().to_path_buf()];

    process_paths(&root, &FormatTable::default());
    assert_eq!(fs::read_to_string(tmp.path().join("ci.yml")).unwrap(), "# c\nk: v\n");
    assert_eq!(fs::read_to_string(tmp.path().join("lib.rs")).unwrap(), "fn a() {} // c\n");

    let table = FormatTable::new(FormatOptions {
        rust_sources: true,
        yaml: true,
    });
    process_paths(&root, &table);
    assert_eq!(fs::read_to_string(tmp.path().join("ci.yml")).unwrap(), "\nk: v\n");
    assert_eq!(fs::read_to_string(tmp.path().join("lib.rs")).unwrap(), "fn a() {} \n");
}

#[cfg(unix)]
#[test]
fn rewritten_files_keep_their_permissions() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = TempDir::new().unwrap();
    write_files(tmp.path(), &[("run.js", b"#!/usr/bin/env node\n// c\nmain();\n")]);
    let path = tmp.path().join("run.js");
    fs::set_permissions(&path, fs::Permissions::from_mode(0o751)).unwrap();

    process_paths(&[path.clone()], &FormatTable::default());

    assert_eq!(fs::read_to_string(&path).unwrap(), "#!/usr/bin/env node\n\nmain();\n");
    let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
    assert_eq!(mode, 0o751);
}
