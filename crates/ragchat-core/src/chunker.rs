//! Sliding-window chunker with natural-boundary preference.
//!
//! Windows are measured in characters, not bytes — the corpus is not
//! ASCII-only and a cut inside a multi-byte sequence must be impossible.
//! Adjacent chunks from the same document share exactly `overlap` trailing
//! characters; the cut itself prefers a paragraph break, then a sentence
//! end, then whitespace, and only falls back to a hard cut when the trailing
//! half of the window contains none of those.

use crate::types::{Document, DocumentChunk};

pub struct Chunker {
    target_size: usize,
    overlap: usize,
}

impl Chunker {
    /// `target_size` and `overlap` are character counts. `overlap` is capped
    /// below `target_size` so every window makes forward progress.
    pub fn new(target_size: usize, overlap: usize) -> Self {
        let target_size = target_size.max(1);
        let overlap = overlap.min(target_size - 1);
        Self {
            target_size,
            overlap,
        }
    }

    /// Split one document into overlapping chunks.
    ///
    /// Pure and total: an empty document yields no chunks, a document no
    /// longer than `target_size` yields exactly one, and a trailing
    /// remainder becomes a final smaller chunk rather than being dropped.
    pub fn chunk_document(&self, doc: &Document) -> Vec<DocumentChunk> {
        let windows = self.windows(&doc.text);
        let total_chunks = windows.len();
        windows
            .into_iter()
            .enumerate()
            .map(|(chunk_index, (offset, content))| DocumentChunk {
                id: format!("{}:{}", doc.doc_id, chunk_index),
                doc_id: doc.doc_id.clone(),
                doc_path: doc.path.to_string_lossy().to_string(),
                content: content.to_string(),
                offset,
                chunk_index,
                total_chunks,
            })
            .collect()
    }

    /// Window positions over `text` as (character offset, slice) pairs.
    fn windows<'a>(&self, text: &'a str) -> Vec<(usize, &'a str)> {
        if text.is_empty() {
            return Vec::new();
        }
        let chars: Vec<char> = text.chars().collect();
        // Byte offset of every char plus an end sentinel, so windows are
        // addressed in characters but sliced on valid byte boundaries.
        let bounds: Vec<usize> = text
            .char_indices()
            .map(|(b, _)| b)
            .chain([text.len()])
            .collect();
        let n_chars = chars.len();

        let mut out = Vec::new();
        let mut start = 0usize;
        loop {
            if start + self.target_size >= n_chars {
                out.push((start, &text[bounds[start]..]));
                return out;
            }
            let end = self.split_point(&chars, start, start + self.target_size);
            out.push((start, &text[bounds[start]..bounds[end]]));
            // The next window re-reads the trailing `overlap` characters of
            // this one. The clamp only fires for degenerate geometry where a
            // boundary-shortened chunk is not longer than the overlap.
            start = end.saturating_sub(self.overlap).max(start + 1);
        }
    }

    /// Pick the cut for a window spanning characters `[start, hard_end)`.
    /// Boundaries are searched backward from `hard_end` through the trailing
    /// half of the window only, so boundary-adjusted chunks never collapse
    /// below half the target size.
    fn split_point(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let floor = start + self.target_size / 2;

        // Paragraph break: cut right after a blank line.
        for end in (floor + 1..=hard_end).rev() {
            if end >= 2 && chars[end - 1] == '\n' && chars[end - 2] == '\n' {
                return end;
            }
        }
        // Sentence end: punctuation followed by whitespace.
        for end in (floor + 1..=hard_end).rev() {
            if matches!(chars[end - 1], '.' | '!' | '?')
                && chars.get(end).is_some_and(|c| c.is_whitespace())
            {
                return end;
            }
        }
        // Word boundary: cut right after whitespace.
        for end in (floor + 1..=hard_end).rev() {
            if chars[end - 1].is_whitespace() {
                return end;
            }
        }
        hard_end
    }
}
