use std::fs;
use std::path::Path;

use anyhow::anyhow;
use papyrus_syntax::{parse, DiagnosticLog, ParseOptions, SourceFile};

use crate::args::FormatCommand;
use crate::Papyrus;

impl Papyrus {
    pub fn execute_format(&mut self, cmd: FormatCommand) -> Result<(), anyhow::Error> {
        let mut options = self.config.output_options();

        if cmd.tabs {
            options.use_tabs = true;
        }
        if cmd.unix {
            options.unix_line_endings = true;
        }
        if let Some(indent) = cmd.indent {
            options.indent_width = indent;
        }

        let mut failed = 0usize;

        for path in &cmd.files {
            match self.format_one(Path::new(path), &options, cmd.check) {
                Ok(true) => {}
                Ok(false) => failed += 1,
                Err(error) => {
                    tracing::error!(%path, error = %format!("{error:#}"), "failed to read file");
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            eprintln!("failed to format {failed} file(s)");
            return Err(anyhow!("failed to format {failed} file(s)"));
        }

        Ok(())
    }

    /// Formats a single file. Returns `Ok(true)` if the file is (now)
    /// correctly formatted, `Ok(false)` if it has parse errors or (under
    /// `--check`) is not formatted.
    fn format_one(
        &self,
        path: &Path,
        options: &papyrus_fmt::OutputOptions,
        check: bool,
    ) -> Result<bool, anyhow::Error> {
        let bytes = fs::read(path)?;
        let source = String::from_utf8_lossy(&bytes).into_owned();

        let file = SourceFile::new(&path.to_string_lossy(), bytes.clone());
        let mut log = DiagnosticLog::new();
        let (script, ok) = parse(&file, &mut log, ParseOptions::default());

        if !ok {
            if let Some(diagnostic) = log.first() {
                eprintln!("{}: {}", path.display(), diagnostic.message);
                eprintln!("{}", diagnostic.location.snippet(&file, 100, 2, self.colors));
            }
            return Ok(false);
        }

        let formatted = papyrus_fmt::format_script(&script, options);

        if formatted.as_bytes() == source.as_bytes() {
            return Ok(true);
        }

        if check {
            tracing::warn!(path = %path.display(), "file is not properly formatted");
            eprintln!("{}: not formatted", path.display());
            return Ok(false);
        }

        write_with_private_permissions(path, formatted.as_bytes())?;
        Ok(true)
    }
}

#[cfg(unix)]
fn write_with_private_permissions(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::write(path, contents)?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o600))
}

#[cfg(not(unix))]
fn write_with_private_permissions(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    fs::write(path, contents)
}
