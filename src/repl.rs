//! Interactive Loop
//!
//! Numbered menu over any line-oriented input. Every action calls the
//! store through `EntryStore`.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::store::EntryStore;

const MENU: &str = "Choose an action:\n1. Add\n2. Define\n3. Remove\n4. List\n5. Exit\n";

/// Whether the loop keeps going after an action.
enum Flow {
    Continue,
    Exit,
}

/// Interactive menu reading from `input` and writing to `output`.
pub struct Repl<R, W> {
    input: R,
    output: W,
}

impl<R, W> Repl<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Runs until the user picks Exit or input ends.
    pub async fn run(&mut self, store: &dyn EntryStore) -> io::Result<()> {
        loop {
            self.output.write_all(MENU.as_bytes()).await?;

            let Some(line) = self.prompt("Enter your choice: ").await? else {
                break;
            };

            let flow = match line.parse::<u32>() {
                Ok(1) => self.add(store).await?,
                Ok(2) => self.define(store).await?,
                Ok(3) => self.remove(store).await?,
                Ok(4) => self.list(store).await?,
                Ok(5) => Flow::Exit,
                Ok(_) => {
                    self.say("Invalid choice. Please choose a valid option.")
                        .await?;
                    Flow::Continue
                }
                Err(e) => {
                    self.say(&format!("Choice Error: {}", e)).await?;
                    Flow::Continue
                }
            };

            if let Flow::Exit = flow {
                break;
            }
        }

        self.say("Exit program.").await
    }

    /// Consumes the loop and returns its output sink.
    pub fn into_output(self) -> W {
        self.output
    }

    async fn add(&mut self, store: &dyn EntryStore) -> io::Result<Flow> {
        let Some(word) = self.prompt("Enter the word: ").await? else {
            return Ok(Flow::Exit);
        };
        let Some(definition) = self.prompt("Enter the definition: ").await? else {
            return Ok(Flow::Exit);
        };

        let message = match store.upsert(word.clone(), definition.clone()).await {
            Ok(()) => format!("Word '{}' added with definition '{}'.", word, definition),
            Err(e) => format!("Error: {}", e),
        };
        self.say(&message).await?;
        Ok(Flow::Continue)
    }

    async fn define(&mut self, store: &dyn EntryStore) -> io::Result<Flow> {
        let Some(word) = self.prompt("Enter the word: ").await? else {
            return Ok(Flow::Exit);
        };

        let message = match store.lookup(&word).await {
            Ok(entry) => format!("Definition of '{}': {}", entry.word, entry),
            Err(e) if e.is_not_found() => e.to_string(),
            Err(e) => format!("Error: {}", e),
        };
        self.say(&message).await?;
        Ok(Flow::Continue)
    }

    async fn remove(&mut self, store: &dyn EntryStore) -> io::Result<Flow> {
        let Some(word) = self.prompt("Enter the word to remove: ").await? else {
            return Ok(Flow::Exit);
        };

        let message = match store.delete(&word).await {
            Ok(()) => format!("Word '{}' removed.", word),
            Err(e) if e.is_not_found() => e.to_string(),
            Err(e) => format!("Error: {}", e),
        };
        self.say(&message).await?;
        Ok(Flow::Continue)
    }

    async fn list(&mut self, store: &dyn EntryStore) -> io::Result<Flow> {
        match store.enumerate().await {
            Ok(snapshot) => {
                self.say("Words in the dictionary:").await?;
                for entry in snapshot.sorted_entries() {
                    self.say(&format!("{}: {}", entry.word, entry)).await?;
                }
            }
            Err(e) => self.say(&format!("Error: {}", e)).await?,
        }
        Ok(Flow::Continue)
    }

    /// Prints `label` and reads one trimmed line; None at end of input.
    async fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        self.output.write_all(label.as_bytes()).await?;
        self.output.flush().await?;

        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    async fn say(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes()).await?;
        self.output.write_all(b"\n").await?;
        self.output.flush().await
    }
}
