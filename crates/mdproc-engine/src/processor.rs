//! File-to-file processing on top of the syntax pipeline.

use std::path::{Path, PathBuf};

use mdproc_syntax::{Diagnostic, parse, render, tokenize};

use crate::io::{self, IoError};

/// Options controlling how a document is processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOptions {
    /// Close a final line that lacks a line terminator
    pub append_terminator: bool,
    /// Treat any diagnostic as a failure
    pub strict: bool,
}

impl Default for ProcessOptions {
    fn default() -> Self {
        Self {
            append_terminator: true,
            strict: false,
        }
    }
}

/// HTML produced from one document plus the problems found on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub html: String,
    /// Number of top-level blocks in the document
    pub blocks: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Summary of a completed file run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub input: PathBuf,
    pub output: PathBuf,
    pub blocks: usize,
    pub bytes_written: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error(transparent)]
    Io(#[from] IoError),
    #[error("{count} syntax error(s) in {}, first: {first}", .path.display())]
    Syntax {
        path: PathBuf,
        first: Diagnostic,
        count: usize,
    },
}

impl ProcessError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            ProcessError::Io(_) | ProcessError::Syntax { .. } => 1,
        }
    }
}

/// Runs the lexer, parser and renderer with a fixed set of options.
#[derive(Debug, Clone, Default)]
pub struct Processor {
    options: ProcessOptions,
}

impl Processor {
    pub fn new(options: ProcessOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> ProcessOptions {
        self.options
    }

    /// Render markdown text. Never fails; diagnostics are returned with the
    /// HTML.
    pub fn process_str(&self, text: &str, source_id: Option<&str>) -> Rendered {
        let tokens = tokenize(text, self.options.append_terminator);
        let (document, diagnostics) = parse(&tokens, source_id).into_parts();
        Rendered {
            html: render(&document),
            blocks: document.children.len(),
            diagnostics,
        }
    }

    /// Render the markdown file at `input` into `output`.
    ///
    /// In strict mode nothing is written when the input has diagnostics.
    pub fn process_file(&self, input: &Path, output: &Path) -> Result<Report, ProcessError> {
        let text = io::read_input(input)?;
        let source_id = input.display().to_string();
        let rendered = self.process_str(&text, Some(source_id.as_str()));

        for diagnostic in &rendered.diagnostics {
            log::warn!("{source_id}: {diagnostic}");
        }

        if self.options.strict
            && let Some(first) = rendered.diagnostics.first()
        {
            return Err(ProcessError::Syntax {
                path: input.to_path_buf(),
                first: first.clone(),
                count: rendered.diagnostics.len(),
            });
        }

        let bytes_written = io::write_output(output, &rendered.html)?;
        log::info!(
            "Rendered {} block(s) from {} to {}",
            rendered.blocks,
            input.display(),
            output.display()
        );

        Ok(Report {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            blocks: rendered.blocks,
            bytes_written,
            diagnostics: rendered.diagnostics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    const PAGE_START: &str = "<!DOCTYPE html>\n<html>\n<body>\n";
    const PAGE_END: &str = "</body>\n</html>\n";

    #[test]
    fn test_process_str() {
        let rendered = Processor::default().process_str("# Title\n\nBody", None);

        assert_eq!(
            rendered.html,
            format!("{PAGE_START}<h1>Title </h1>\n<p>Body </p>\n{PAGE_END}")
        );
        assert_eq!(rendered.blocks, 2);
        assert!(rendered.diagnostics.is_empty());
    }

    #[test]
    fn test_process_str_without_terminator() {
        let processor = Processor::new(ProcessOptions {
            append_terminator: false,
            strict: false,
        });

        let rendered = processor.process_str("First Line\nSecond Line", None);

        assert_eq!(
            rendered.html,
            format!("{PAGE_START}<p>First Line Second Line </p>\n{PAGE_END}")
        );
    }

    #[test]
    fn test_process_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.md");
        let output = dir.path().join("out").join("in.html");
        fs::write(&input, "First Paragraph\n\nSecond Paragraph\n").unwrap();

        let report = Processor::default().process_file(&input, &output).unwrap();

        let expected =
            format!("{PAGE_START}<p>First Paragraph </p>\n<p>Second Paragraph </p>\n{PAGE_END}\n");
        assert_eq!(fs::read_to_string(&output).unwrap(), expected);
        assert_eq!(report.blocks, 2);
        assert_eq!(report.bytes_written, expected.len());
        assert_eq!(report.input, input);
        assert_eq!(report.output, output);
    }

    #[test]
    fn test_process_file_keeps_going_on_diagnostics() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.md");
        let output = dir.path().join("in.html");
        fs::write(&input, "##\n\ntext\n").unwrap();

        let report = Processor::default().process_file(&input, &output).unwrap();

        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            format!("{PAGE_START}<p>text </p>\n{PAGE_END}\n")
        );
    }

    #[test]
    fn test_strict_mode_fails_on_diagnostics() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.md");
        let output = dir.path().join("in.html");
        fs::write(&input, "##\n\ntext\n#\n").unwrap();

        let processor = Processor::new(ProcessOptions {
            strict: true,
            ..ProcessOptions::default()
        });
        let err = processor.process_file(&input, &output).unwrap_err();

        match &err {
            ProcessError::Syntax { path, count, .. } => {
                assert_eq!(path, &input);
                assert_eq!(*count, 2);
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().starts_with("2 syntax error(s) in "));
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("missing.md");
        let output = dir.path().join("out.html");

        let err = Processor::default().process_file(&input, &output).unwrap_err();

        assert!(matches!(err, ProcessError::Io(IoError::NotFound(_))));
        assert_eq!(err.exit_code(), 1);
        assert!(!output.exists());
    }
}
