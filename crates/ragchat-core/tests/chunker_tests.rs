use std::path::PathBuf;

use ragchat_core::chunker::Chunker;
use ragchat_core::types::{Document, DocumentChunk};

fn doc(text: &str) -> Document {
    Document {
        doc_id: "a.txt".to_string(),
        path: PathBuf::from("/corpus/a.txt"),
        text: text.to_string(),
        modified: None,
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Stitch the document back together from chunk offsets: each chunk
/// contributes the characters up to the next chunk's offset, the last chunk
/// contributes everything it has.
fn reconstruct(chunks: &[DocumentChunk]) -> String {
    let mut out = String::new();
    for (i, c) in chunks.iter().enumerate() {
        match chunks.get(i + 1) {
            Some(next) => out.extend(c.content.chars().take(next.offset - c.offset)),
            None => out.push_str(&c.content),
        }
    }
    out
}

#[test]
fn empty_document_yields_no_chunks() {
    let chunks = Chunker::new(100, 20).chunk_document(&doc(""));
    assert!(chunks.is_empty());
}

#[test]
fn short_document_yields_one_chunk() {
    let text = "Short text.";
    let chunks = Chunker::new(100, 20).chunk_document(&doc(text));
    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, text);
    assert_eq!(chunks[0].offset, 0);
    assert_eq!(chunks[0].chunk_index, 0);
    assert_eq!(chunks[0].total_chunks, 1);
    assert_eq!(chunks[0].id, "a.txt:0");
}

#[test]
fn hard_cut_geometry_without_boundaries() {
    // No whitespace or punctuation anywhere: every cut is a hard cut.
    let text = "a".repeat(100);
    let chunks = Chunker::new(40, 10).chunk_document(&doc(&text));
    assert_eq!(chunks.len(), 3);
    assert_eq!(
        chunks.iter().map(|c| c.offset).collect::<Vec<_>>(),
        vec![0, 30, 60]
    );
    for c in &chunks {
        assert!(char_len(&c.content) <= 40);
        assert!(!c.content.is_empty());
    }
    assert_eq!(reconstruct(&chunks), text);
}

#[test]
fn consecutive_chunks_share_exactly_overlap_characters() {
    let overlap = 8;
    let text = "The quick brown fox jumps over the lazy dog again and again, \
                wandering through fields and forests while the seasons change slowly."
        .to_string();
    let chunks = Chunker::new(30, overlap).chunk_document(&doc(&text));
    assert!(chunks.len() > 2);
    for pair in chunks.windows(2) {
        let end = pair[0].offset + char_len(&pair[0].content);
        let shared = end - pair[1].offset;
        assert_eq!(shared, overlap);
        let tail: String = pair[0]
            .content
            .chars()
            .skip(char_len(&pair[0].content) - overlap)
            .collect();
        let head: String = pair[1].content.chars().take(overlap).collect();
        assert_eq!(tail, head);
    }
    assert_eq!(reconstruct(&chunks), text);
}

#[test]
fn prefers_sentence_boundary_over_hard_cut() {
    let text = "This is the first sentence. This is the second sentence. Tail.";
    let chunks = Chunker::new(40, 0).chunk_document(&doc(text));
    assert!(chunks.len() >= 2);
    assert_eq!(chunks[0].content, "This is the first sentence.");
    assert!(chunks[1].content.trim_start().starts_with("This is the second"));
    assert_eq!(reconstruct(&chunks), text);
}

#[test]
fn prefers_paragraph_boundary_over_sentence_boundary() {
    let text = "para one text\n\npara two text";
    let chunks = Chunker::new(20, 0).chunk_document(&doc(text));
    assert_eq!(chunks.len(), 2);
    assert!(chunks[0].content.ends_with("\n\n"));
    assert_eq!(chunks[1].content, "para two text");
}

#[test]
fn never_cuts_inside_a_multibyte_character() {
    let text = "äöü ".repeat(40);
    let chunks = Chunker::new(17, 5).chunk_document(&doc(&text));
    assert!(!chunks.is_empty());
    for c in &chunks {
        assert!(char_len(&c.content) <= 17);
        assert!(!c.content.is_empty());
    }
    assert_eq!(reconstruct(&chunks), text);
}

#[test]
fn trailing_remainder_becomes_a_final_smaller_chunk() {
    let text = "a".repeat(45);
    let chunks = Chunker::new(20, 0).chunk_document(&doc(&text));
    assert_eq!(chunks.len(), 3);
    assert_eq!(char_len(&chunks[2].content), 5);
    assert_eq!(reconstruct(&chunks), text);
}

#[test]
fn overlap_is_capped_below_target_size() {
    // An overlap >= target size would never advance; the constructor caps it.
    let text = "abcdefghij".repeat(5);
    let chunks = Chunker::new(10, 10).chunk_document(&doc(&text));
    assert!(!chunks.is_empty());
    assert_eq!(reconstruct(&chunks), text);
}
