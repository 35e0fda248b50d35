use log::debug;

/// Literal that opens every complaint block
pub const RECORD_MARKER: &str = "ID:";

/// Splits cleaned export text into one raw block per complaint
///
/// A boundary sits at every newline directly followed by `ID:`. The
/// newline itself is consumed and the marker stays at the head of the
/// following block. Text before the first marker becomes a leading
/// block of its own; the field extractor drops it.
pub struct BlockSegmenter;

impl BlockSegmenter {
    pub fn new() -> Self {
        BlockSegmenter
    }

    pub fn segment<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let boundary = format!("\n{}", RECORD_MARKER);
        let mut blocks = Vec::new();
        let mut start = 0;

        for (idx, _) in text.match_indices(&boundary) {
            blocks.push(&text[start..idx]);
            start = idx + 1;
        }
        blocks.push(&text[start..]);

        debug!("Segmented text into {} blocks", blocks.len());
        blocks
    }
}

impl Default for BlockSegmenter {
    fn default() -> Self {
        Self::new()
    }
}
