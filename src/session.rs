//! The interactive read loop around a [`ChatPipeline`].
//!
//! Each turn is independent: nothing about earlier turns influences later
//! ones, and turns are not retained.

use std::io::{BufRead, Write};

use rand::Rng;

use crate::error::{ChatError, ChatResult, SessionError};
use crate::pipeline::ChatPipeline;

/// Input that ends a session, compared case-insensitively after trimming.
pub const EXIT_COMMAND: &str = "exit";

/// One utterance and the single response it received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationTurn {
    pub user_input: String,
    pub response: String,
}

/// A chat session: borrows a pipeline, owns the random source.
pub struct ChatSession<'a, R: Rng> {
    pipeline: &'a ChatPipeline,
    rng: R,
    bot_name: String,
    prompt: String,
}

impl<'a, R: Rng> ChatSession<'a, R> {
    pub fn new(pipeline: &'a ChatPipeline, rng: R) -> Self {
        Self {
            pipeline,
            rng,
            bot_name: "Chatbot".into(),
            prompt: "You: ".into(),
        }
    }

    pub fn with_bot_name(mut self, bot_name: impl Into<String>) -> Self {
        self.bot_name = bot_name.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Answer one utterance.
    pub fn turn(&mut self, user_input: &str) -> ChatResult<ConversationTurn> {
        let response = self.pipeline.respond(user_input, &mut self.rng)?;
        Ok(ConversationTurn {
            user_input: user_input.to_string(),
            response: response.to_string(),
        })
    }

    /// Run until `exit` or end of input. Returns the number of turns answered.
    pub fn run<I: BufRead, W: Write>(&mut self, mut input: I, mut output: W) -> ChatResult<usize> {
        let mut turns = 0;
        self.emit(&mut output, "Hello! Type 'exit' to end the chat.")?;
        loop {
            write!(output, "{}", self.prompt).map_err(io_err)?;
            output.flush().map_err(io_err)?;

            let mut line = String::new();
            let read = input.read_line(&mut line).map_err(io_err)?;
            if read == 0 {
                tracing::debug!(turns, "end of input");
                break;
            }
            let line = line.trim_end_matches(['\r', '\n']);
            if line.trim().eq_ignore_ascii_case(EXIT_COMMAND) {
                self.emit(&mut output, "Goodbye!")?;
                break;
            }

            let turn = self.turn(line)?;
            self.emit(&mut output, &turn.response)?;
            turns += 1;
        }
        Ok(turns)
    }

    fn emit<W: Write>(&self, output: &mut W, text: &str) -> ChatResult<()> {
        writeln!(output, "{}: {text}", self.bot_name).map_err(io_err)
    }
}

fn io_err(e: std::io::Error) -> ChatError {
    SessionError::Io { source: e }.into()
}
