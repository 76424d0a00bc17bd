//! Sentence-aligned chunking for speech synthesis hand-off.

/// Default chunk limit in characters.
pub const DEFAULT_MAX_CHARS: usize = 5000;

/// Split `text` into chunks of at most `max_chars` characters, breaking only
/// between sentences.
///
/// Sentences are separated by `". "` and each keeps its period. A sentence
/// longer than the limit becomes a chunk of its own. Lengths count
/// characters, not bytes.
pub fn split_for_speech(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for sentence in text.split(". ").map(str::trim).filter(|s| !s.is_empty()) {
        let mut sentence = sentence.to_string();
        if !sentence.ends_with('.') {
            sentence.push('.');
        }
        let len = sentence.chars().count();

        if current_len > 0 && current_len + 1 + len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if current_len > 0 {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(&sentence);
        current_len += len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_one_chunk() {
        let chunks = split_for_speech("What a shot. FOUR runs!", DEFAULT_MAX_CHARS);
        assert_eq!(chunks, vec!["What a shot. FOUR runs!."]);
    }

    #[test]
    fn test_packs_sentences_up_to_limit() {
        let chunks = split_for_speech("aaaa. bbbb. cccc", 11);
        assert_eq!(chunks, vec!["aaaa. bbbb.", "cccc."]);
    }

    #[test]
    fn test_oversized_sentence_stands_alone() {
        let chunks = split_for_speech("tiny. this sentence is long. end", 8);
        assert_eq!(chunks, vec!["tiny.", "this sentence is long.", "end."]);
    }

    #[test]
    fn test_counts_characters() {
        // Each sentence is 7 characters but 19 bytes with its period.
        let chunks = split_for_speech("ஆறுரன். ஆறுரன்", 16);
        assert_eq!(chunks.len(), 1);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_for_speech("", 100).is_empty());
        assert!(split_for_speech("   ", 100).is_empty());
    }
}
