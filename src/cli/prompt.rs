use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

/// Line-oriented terminal input, owned by whoever runs the session and passed
/// down to anything that needs to ask a question.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `question` and read one line. `None` at end of input.
    pub async fn ask(&mut self, question: &str) -> Result<Option<String>> {
        let mut out = tokio::io::stdout();
        out.write_all(question.as_bytes()).await.context("stdout write failed")?;
        out.flush().await.context("stdout flush failed")?;

        self.lines.next_line().await.context("stdin read failed")
    }
}
