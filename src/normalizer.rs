use crate::error::{NfResult, NgramForgeError};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;

/// Rewrites document text before tokenization (e.g. lemmatization).
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> NfResult<String>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityNormalizer;

impl Normalizer for IdentityNormalizer {
    fn normalize(&self, text: &str) -> NfResult<String> {
        Ok(text.to_string())
    }
}

/// Pipes each document through an external program: text on stdin,
/// normalized text on stdout.
#[derive(Debug, Clone)]
pub struct CommandNormalizer {
    program: String,
    args: Vec<String>,
}

impl CommandNormalizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Splits a command line on whitespace. No shell quoting is applied.
    pub fn parse(command_line: &str) -> NfResult<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| NgramForgeError::Config("Normalizer command is empty".into()))?;
        Ok(Self::new(program, parts.collect()))
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Normalizer for CommandNormalizer {
    fn normalize(&self, text: &str) -> NfResult<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| NgramForgeError::Normalizer(format!("{}: {}", self.program, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| NgramForgeError::Normalizer("stdin unavailable".into()))?;
        let input = text.to_string();
        // stdin must be written while stdout is drained
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                return Err(NgramForgeError::Normalizer(
                    "stdin writer thread panicked".into(),
                ))
            }
        }

        if !output.status.success() {
            return Err(NgramForgeError::Normalizer(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout).map_err(|_| {
            NgramForgeError::Normalizer(format!("{} produced non UTF-8 output", self.program))
        })
    }
}
