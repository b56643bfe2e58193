//! Token production on a dedicated thread.
//!
//! The producer and the parser share a single rendezvous channel: every
//! `send` blocks until the parser pulls the token, so tokens arrive in
//! source order and the producer never runs ahead of the consumer.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{self, Receiver};
use tracing::debug;

use super::{lexer::Lexer, tokens::Token};

/// Blocking iterator over tokens produced by a background lexer thread.
pub struct TokenStream {
    receiver: Receiver<Token>,
    producer: Option<JoinHandle<()>>,
}

/// Starts lexing `source` on its own thread.
pub fn spawn_lexer(source: impl Into<String>) -> TokenStream {
    let (sender, receiver) = channel::bounded(0);
    let lexer = Lexer::new(source);

    let producer = thread::spawn(move || {
        for token in lexer {
            if sender.send(token).is_err() {
                debug!("token stream dropped before EOF, stopping producer");
                return;
            }
        }
    });

    TokenStream {
        receiver,
        producer: Some(producer),
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.receiver.recv() {
            Ok(token) => Some(token),
            Err(_) => {
                // Sender hung up after EOF
                if let Some(producer) = self.producer.take() {
                    let _ = producer.join();
                }
                None
            }
        }
    }
}
