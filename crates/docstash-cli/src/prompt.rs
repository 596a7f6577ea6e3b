//! Interactive yes/no confirmation.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Stdin, Stdout};

/// Question asked before deleting objects.
pub const DELETE_QUESTION: &str = "Do you want to delete the objects? (y/n): ";

/// Asks the user a yes/no question.
#[async_trait::async_trait]
pub trait Confirm: Send {
    /// Shows `question` and returns whether the answer was yes.
    async fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

/// Whether `answer` means yes: `y` in either case, surrounding whitespace ignored.
pub fn is_yes(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Prompt writing the question to `writer` and reading one line from `reader`.
///
/// End of input counts as no.
pub struct LinePrompt<R, W> {
    reader: R,
    writer: W,
}

/// Prompt over the process stdin and stdout.
pub type ConsolePrompt = LinePrompt<BufReader<Stdin>, Stdout>;

impl<R, W> LinePrompt<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

impl ConsolePrompt {
    /// Prompt bound to the terminal.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

#[async_trait::async_trait]
impl<R, W> Confirm for LinePrompt<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.writer.write_all(question.as_bytes()).await?;
        self.writer.flush().await?;

        let mut answer = String::new();
        let read = self.reader.read_line(&mut answer).await?;
        Ok(read > 0 && is_yes(&answer))
    }
}

/// Answers yes without asking. Backs the `--yes` flag.
pub struct AssumeYes;

#[async_trait::async_trait]
impl Confirm for AssumeYes {
    async fn confirm(&mut self, _question: &str) -> io::Result<bool> {
        Ok(true)
    }
}

/// Picks the prompt for a command.
pub fn for_flag(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(ConsolePrompt::stdio())
    }
}

/// Replays canned answers and records the questions asked.
#[cfg(test)]
pub(crate) struct ScriptedPrompt {
    answers: std::collections::VecDeque<&'static str>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            asked: Vec::new(),
        }
    }
}

#[cfg(test)]
#[async_trait::async_trait]
impl Confirm for ScriptedPrompt {
    async fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.asked.push(question.to_owned());
        self.answers
            .pop_front()
            .map(is_yes)
            .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_y_is_yes() {
        assert!(is_yes("y"));
        assert!(is_yes("Y"));
        assert!(is_yes("  y \n"));
        assert!(is_yes("Y\r\n"));

        assert!(!is_yes("n"));
        assert!(!is_yes("yes"));
        assert!(!is_yes(""));
        assert!(!is_yes("y y"));
    }

    #[tokio::test]
    async fn line_prompt_writes_question_and_reads_answer() {
        let mut prompt = LinePrompt::new(&b"Y\nn\n"[..], Vec::new());

        assert!(prompt.confirm(DELETE_QUESTION).await.unwrap());
        assert!(!prompt.confirm(DELETE_QUESTION).await.unwrap());
        assert_eq!(
            String::from_utf8(prompt.writer).unwrap(),
            DELETE_QUESTION.repeat(2)
        );
    }

    #[tokio::test]
    async fn end_of_input_is_no() {
        let mut prompt = LinePrompt::new(&b""[..], Vec::new());
        assert!(!prompt.confirm(DELETE_QUESTION).await.unwrap());
    }

    #[tokio::test]
    async fn assume_yes_never_asks() {
        assert!(AssumeYes.confirm(DELETE_QUESTION).await.unwrap());
        assert!(for_flag(true).confirm(DELETE_QUESTION).await.unwrap());
    }
}
