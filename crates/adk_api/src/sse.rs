/// Marker that introduces a payload line inside a frame.
pub const DATA_PREFIX: &str = "data:";

/// Incremental assembler for newline-delimited event frames.
///
/// Bytes are buffered raw and only decoded once a full line is available, so a
/// multi-byte character split across two chunks decodes intact. A frame ends at
/// a blank line; its `data:` lines are joined with `\n`.
#[derive(Debug, Default)]
pub struct SseFrameAssembler {
    pending_line: Vec<u8>,
    frame: String,
}

impl SseFrameAssembler {
    /// Feed arbitrary bytes and drain every frame completed by them.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.pending_line.extend_from_slice(bytes);
        let mut frames = Vec::new();

        while let Some(newline) = self.pending_line.iter().position(|byte| *byte == b'\n') {
            let line: Vec<u8> = self.pending_line.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line[..line.len() - 1]).into_owned();
            if let Some(frame) = self.accept_line(&line) {
                frames.push(frame);
            }
        }

        frames
    }

    /// Signal end-of-stream and flush whatever frame is still pending.
    ///
    /// An unterminated last line is treated as a complete line first, then a
    /// non-empty frame accumulator is emitted even without its blank line.
    pub fn finish(&mut self) -> Option<String> {
        let mut flushed = None;
        if !self.pending_line.is_empty() {
            let line = String::from_utf8_lossy(&self.pending_line).into_owned();
            self.pending_line.clear();
            flushed = self.accept_line(&line);
        }

        flushed.or_else(|| self.take_frame())
    }

    /// Parse a complete stream in one shot, including the end-of-stream flush.
    pub fn parse_frames(input: &str) -> Vec<String> {
        let mut assembler = Self::default();
        let mut frames = assembler.feed(input.as_bytes());
        frames.extend(assembler.finish());
        frames
    }

    pub fn is_idle(&self) -> bool {
        self.pending_line.is_empty() && self.frame.is_empty()
    }

    fn accept_line(&mut self, line: &str) -> Option<String> {
        let line = line.strip_suffix('\r').unwrap_or(line);

        if line.trim().is_empty() {
            return self.take_frame();
        }

        if let Some(value) = line.strip_prefix(DATA_PREFIX) {
            self.frame.push_str(strip_one_leading_whitespace(value));
            self.frame.push('\n');
        }

        None
    }

    fn take_frame(&mut self) -> Option<String> {
        if self.frame.is_empty() {
            return None;
        }

        let mut frame = std::mem::take(&mut self.frame);
        if frame.ends_with('\n') {
            frame.pop();
        }
        Some(frame)
    }
}

fn strip_one_leading_whitespace(value: &str) -> &str {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) if first.is_whitespace() => chars.as_str(),
        _ => value,
    }
}
