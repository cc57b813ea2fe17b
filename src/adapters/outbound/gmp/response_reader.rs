use quick_xml::events::Event;
use quick_xml::Reader;

/// Detects when a growing response buffer holds one complete XML document.
///
/// gvmd does not frame its responses, so the client keeps reading until
/// the root element has been closed. The scanner remembers how far it got
/// and the current element depth, so every byte is parsed once no matter
/// how many chunks the response arrives in. Only whole events advance the
/// scan: a chunk boundary inside a tag leaves that tag for the next call.
#[derive(Debug, Default)]
pub struct DocumentScanner {
    /// Bytes of the buffer covered by complete events
    consumed: usize,
    depth: usize,
    complete: bool,
}

impl DocumentScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scans what was appended to `buffer` since the previous call.
    ///
    /// `buffer` must be the same buffer each time, only ever extended.
    pub fn is_complete(&mut self, buffer: &[u8]) -> bool {
        if self.complete {
            return true;
        }

        let start = self.consumed.min(buffer.len());
        let mut reader = Reader::from_reader(&buffer[start..]);
        // The scan resumes mid-document, so end tags may close elements
        // this reader never saw open.
        let config = reader.config_mut();
        config.check_end_names = false;
        config.allow_unmatched_ends = true;
        let mut scratch = Vec::new();

        loop {
            let event = match reader.read_event_into(&mut scratch) {
                Ok(Event::Eof) | Err(_) => return false,
                Ok(event) => event,
            };
            match event {
                Event::Start(_) => self.depth += 1,
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                    self.complete = self.depth == 0;
                }
                Event::Empty(_) => self.complete = self.depth == 0,
                _ => {}
            }
            self.consumed = start + reader.buffer_position() as usize;
            if self.complete {
                return true;
            }
            scratch.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_in_one_read(document: &[u8]) -> bool {
        DocumentScanner::new().is_complete(document)
    }

    /// Feeds `document` in `chunk`-sized reads; returns the number of reads
    /// after which the scanner reported completion.
    fn reads_until_complete(document: &[u8], chunk: usize) -> Option<usize> {
        let mut scanner = DocumentScanner::new();
        let mut buffer = Vec::new();
        for (index, piece) in document.chunks(chunk).enumerate() {
            buffer.extend_from_slice(piece);
            if scanner.is_complete(&buffer) {
                return Some(index + 1);
            }
        }
        None
    }

    #[test]
    fn test_self_closing_root_is_complete() {
        assert!(complete_in_one_read(
            br#"<delete_task_response status="200" status_text="OK"/>"#
        ));
    }

    #[test]
    fn test_closed_root_is_complete() {
        assert!(complete_in_one_read(
            b"<get_version_response status=\"200\"><version>22.4</version></get_version_response>"
        ));
    }

    #[test]
    fn test_open_root_is_incomplete() {
        assert!(!complete_in_one_read(
            b"<get_tasks_response status=\"200\"><task id=\"t1\"><name>a</name></task>"
        ));
    }

    #[test]
    fn test_split_tag_is_incomplete() {
        assert!(!complete_in_one_read(b"<get_tasks_response sta"));
        assert!(!complete_in_one_read(b""));
    }

    #[test]
    fn test_nested_same_name_elements() {
        assert!(!complete_in_one_read(b"<info><info id=\"1\"></info>"));
        assert!(complete_in_one_read(b"<info><info id=\"1\"></info></info>"));
    }

    #[test]
    fn test_every_split_point_is_handled() {
        let document: &[u8] =
            br#"<get_tasks_response status="200"><task id="t1"><name>a &amp; b</name><comment/></task></get_tasks_response>"#;
        for chunk in 1..document.len() {
            let reads = reads_until_complete(document, chunk);
            assert_eq!(reads, Some(document.len().div_ceil(chunk)), "chunk size {}", chunk);
        }
    }

    #[test]
    fn test_large_response_in_chunks() {
        let mut document = String::from(r#"<get_reports_response status="200" status_text="OK">"#);
        for n in 0..20_000 {
            document.push_str(&format!(
                r#"<result id="r{0}"><name>Finding {0}</name><description>{1}</description></result>"#,
                n,
                "x".repeat(100)
            ));
        }
        document.push_str("</get_reports_response>");
        let bytes = document.as_bytes();

        let mut scanner = DocumentScanner::new();
        let mut buffer = Vec::new();
        let mut completed_at = None;
        for piece in bytes.chunks(8192) {
            buffer.extend_from_slice(piece);
            if scanner.is_complete(&buffer) {
                completed_at = Some(buffer.len());
                break;
            }
            // Only the unfinished tail of the last chunk is left to rescan.
            assert!(buffer.len() - scanner.consumed < 256);
        }
        assert_eq!(completed_at, Some(bytes.len()));
    }

    #[test]
    fn test_complete_state_is_sticky() {
        let mut scanner = DocumentScanner::new();
        assert!(scanner.is_complete(b"<a/>"));
        assert!(scanner.is_complete(b"<a/>"));
    }
}
