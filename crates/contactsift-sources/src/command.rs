use crate::wire::parse_line_records;
use contactsift_core::{LineRecord, RecognizeError, Recognizer, StrategyName};
use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use tracing::debug;

const STRATEGY_PLACEHOLDER: &str = "{strategy}";

/// Delegates recognition to an external program.
///
/// The image is written to the program's stdin and stdout must be a JSON array
/// of line records. `{strategy}` in `args` is replaced by the strategy name;
/// without a placeholder the name is appended as the last argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
}

impl CommandRecognizer {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn args_for(&self, strategy: &StrategyName) -> Vec<String> {
        let mut substituted = false;
        let mut args: Vec<String> = self
            .args
            .iter()
            .map(|arg| {
                if arg.contains(STRATEGY_PLACEHOLDER) {
                    substituted = true;
                    arg.replace(STRATEGY_PLACEHOLDER, strategy.as_str())
                } else {
                    arg.clone()
                }
            })
            .collect();
        if !substituted {
            args.push(strategy.to_string());
        }
        args
    }
}

impl Recognizer for CommandRecognizer {
    fn recognizer_name(&self) -> &str {
        &self.program
    }

    fn recognize(
        &self,
        image: &[u8],
        strategy: &StrategyName,
    ) -> Result<Vec<LineRecord>, RecognizeError> {
        let args = self.args_for(strategy);
        debug!(program = %self.program, ?args, bytes = image.len(), "running recognizer");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                RecognizeError::Unavailable(format!("failed to start {}: {err}", self.program))
            })?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| RecognizeError::Failed("recognizer stdin unavailable".to_string()))?;
        let payload = image.to_vec();
        // Feed stdin from another thread so a chatty child cannot block on a full stdout pipe.
        let writer = thread::spawn(move || stdin.write_all(&payload));

        let output = child.wait_with_output()?;
        match writer.join() {
            Ok(Ok(())) => {}
            // The program may legitimately exit without reading the whole image.
            Ok(Err(err)) if err.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(err)) => return Err(RecognizeError::Io(err)),
            Err(_) => {
                return Err(RecognizeError::Failed(
                    "recognizer stdin writer panicked".to_string(),
                ))
            }
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = if stderr.trim().is_empty() {
                format!("{} exited with status {}", self.program, output.status)
            } else {
                stderr.trim().to_string()
            };
            return Err(RecognizeError::Failed(message));
        }

        let stdout = String::from_utf8(output.stdout).map_err(|_| {
            RecognizeError::Parse("recognizer output was not valid UTF-8".to_string())
        })?;
        parse_line_records(&stdout).map_err(|err| RecognizeError::Parse(err.to_string()))
    }
}
