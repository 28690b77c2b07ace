use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter},
    path::Path,
};

/// `None` for stdin/stdout; either absent or `"-"`.
fn squash_standard_io(path: &Option<String>) -> Option<&str> {
    match path.as_deref() {
        Some("-") | None => None,
        Some(p) => Some(p),
    }
}

/// Input argument group.
#[derive(clap::Args, Debug)]
pub struct InputArgs {
    /// Optional input file; "-" may be used to indicate stdin.
    #[clap(long, default_value = None)]
    pub input: Option<String>,
}

impl InputArgs {
    /// The input path, unless reading stdin.
    pub fn path(&self) -> Option<&Path> {
        squash_standard_io(&self.input).map(Path::new)
    }

    /// Open a reader for the input.
    pub fn open_reader(&self) -> Result<Box<dyn BufRead>, Box<dyn std::error::Error>> {
        Ok(match self.path() {
            None => Box::new(BufReader::new(std::io::stdin().lock())),
            Some(p) => {
                if !p.exists() {
                    return Err(wordbank::WordbankError::NotFound {
                        path: p.to_path_buf(),
                    }
                    .into());
                }
                Box::new(BufReader::new(File::open(p)?))
            }
        })
    }
}

/// Output argument group.
#[derive(clap::Args, Debug)]
pub struct OutputArgs {
    /// Optional output file; "-" may be used to indicate stdout.
    #[clap(long, default_value = None)]
    pub output: Option<String>,
}

impl OutputArgs {
    /// The output path, unless writing stdout.
    pub fn path(&self) -> Option<&Path> {
        squash_standard_io(&self.output).map(Path::new)
    }

    /// Open a writer for stdout.
    pub fn open_stdout(&self) -> Box<dyn std::io::Write> {
        Box::new(BufWriter::new(std::io::stdout().lock()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_io() {
        let stdin = InputArgs {
            input: Some("-".to_string()),
        };
        assert_eq!(stdin.path(), None);
        assert_eq!(InputArgs { input: None }.path(), None);

        let file = OutputArgs {
            output: Some("out.ids".to_string()),
        };
        assert_eq!(file.path(), Some(Path::new("out.ids")));
    }

    #[test]
    fn test_missing_input() {
        let dir = tempdir::TempDir::new("cli_io_test").unwrap();
        let input = InputArgs {
            input: Some(dir.path().join("missing").to_string_lossy().into_owned()),
        };
        assert!(input.open_reader().is_err());
    }
}
