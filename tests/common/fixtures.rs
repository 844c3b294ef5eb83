//! Test fixtures - reusable content constants for tests.

/// A template with two substitutions
pub const TEMPLATE: &str = r#"\documentclass{article}
\begin{document}
{{ name }} -- {{ job.title }}
\end{document}
"#;

/// Data for `TEMPLATE`
pub const DATA: &str = r#"name = "Ada Lovelace"

[job]
title = "Analyst"
"#;

/// Fake engines, invoked as
/// `<engine> -interaction=nonstopmode -halt-on-error -output-directory <dir> <src>`.
///
/// `ok` copies the rendered source to `<dir>/<stem>.pdf`, so tests can read
/// back what was compiled.
pub const FAKE_ENGINES: &[(&str, &str)] = &[
    (
        "ok",
        r#"#!/bin/sh
name=$(basename "$5" .tex)
cp "$5" "$4/$name.pdf"
"#,
    ),
    (
        "fail",
        r#"#!/bin/sh
echo "! Undefined control sequence."
exit 1
"#,
    ),
    (
        "slow",
        r#"#!/bin/sh
sleep 5
name=$(basename "$5" .tex)
cp "$5" "$4/$name.pdf"
"#,
    ),
];
