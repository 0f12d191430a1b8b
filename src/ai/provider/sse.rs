//! Server-sent event framing for streamed chat completions.
//!
//! The provider sends newline-delimited `data: {json}` frames and ends with
//! `data: [DONE]`. Network chunks do not respect line boundaries, so bytes
//! are buffered until a full line is available. Lines that are not data
//! frames, or whose JSON cannot be decoded, are skipped.

use serde::Deserialize;

/// A decoded frame worth surfacing to the consumer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// Incremental text
    Delta(String),
    /// End-of-stream sentinel
    Done,
}

/// Incremental line decoder
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
    done: bool,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one network chunk and return the frames it completes
    pub fn push(&mut self, chunk: &[u8]) -> Vec<Frame> {
        if self.done {
            return Vec::new();
        }
        self.buffer.extend_from_slice(chunk);

        let mut frames = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if self.accept(parse_line(&line), &mut frames) {
                break;
            }
        }
        frames
    }

    /// Flush a trailing line left without a newline when the body ends
    pub fn finish(&mut self) -> Vec<Frame> {
        let mut frames = Vec::new();
        if !self.done && !self.buffer.is_empty() {
            let line = std::mem::take(&mut self.buffer);
            self.accept(parse_line(&line), &mut frames);
        }
        frames
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Returns true once the end sentinel has been seen
    fn accept(&mut self, frame: Option<Frame>, frames: &mut Vec<Frame>) -> bool {
        match frame {
            Some(Frame::Done) => {
                self.done = true;
                self.buffer.clear();
                frames.push(Frame::Done);
                true
            }
            Some(frame) => {
                frames.push(frame);
                false
            }
            None => false,
        }
    }
}

/// Decode one line; `None` for anything that carries no text
pub fn parse_line(line: &[u8]) -> Option<Frame> {
    let line = std::str::from_utf8(line).ok()?;
    let line = line.trim_end_matches(['\r', '\n']);
    let payload = line.strip_prefix("data:")?;
    let payload = payload.strip_prefix(' ').unwrap_or(payload);

    if payload.trim() == "[DONE]" {
        return Some(Frame::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(payload).ok()?;
    chunk
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.delta.content)
        .filter(|text| !text.is_empty())
        .map(Frame::Delta)
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Debug, Default, Deserialize)]
struct Delta {
    content: Option<String>,
}
