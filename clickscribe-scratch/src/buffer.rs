/// The scratch buffer and its click handlers
///
/// The buffer is a plain text document with one top-level line per header
/// (`Display: out1; out2;`) and two-space-indented lines for subheaders
/// (`  Title: out;`). Button clicks locate or insert the line for the owning
/// header or subheader and append the click's output; line positions follow
/// the `order` stored on the page, not click order.
///
/// Subheader and button clicks push a snapshot onto the undo history; header
/// clicks only re-flow existing content and do not.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use clickscribe_shared::models::tree::ButtonTree;

use crate::history::EditHistory;
use crate::outline::PageOutline;

/// Scratch buffer accumulating click output
#[derive(Debug, Clone, Default)]
pub struct ScratchBuffer {
    text: String,
    history: EditHistory,
}

impl ScratchBuffer {
    /// Creates an empty buffer with the default history cap
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty buffer keeping at most `cap` history snapshots
    pub fn with_history_cap(cap: usize) -> Self {
        Self {
            text: String::new(),
            history: EditHistory::new(cap),
        }
    }

    /// Current buffer text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text with a free-form edit and records a snapshot
    ///
    /// This is the path for direct typing into the buffer, as opposed to the
    /// click handlers below.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.history.record(&self.text);
    }

    /// Handles a click on a header card
    ///
    /// No-op when the header's line already exists. Otherwise the buffer is
    /// re-parsed into per-header entries (indented lines stay attached to the
    /// preceding header line), an empty entry is added for the clicked
    /// header, and the buffer is rewritten with known headers in stored
    /// order. Unknown top-level lines are dropped by the rewrite.
    pub fn click_header(&mut self, outline: &PageOutline, header_id: Uuid) {
        let Some(header) = outline.find_header(header_id) else {
            debug!(%header_id, "header click ignored: unknown header");
            return;
        };

        if self.text.contains(&format!("{}:", header.display_text)) {
            return;
        }

        let trimmed = self.text.trim().to_string();

        let mut entries: HashMap<String, String> = HashMap::new();
        let mut current: Option<String> = None;

        for line in trimmed.split('\n').filter(|l| !l.trim().is_empty()) {
            if !line.starts_with("  ") {
                // Only the segment between the first and second colon survives
                let mut parts = line.split(':');
                let head = parts.next().unwrap_or("").trim().to_string();
                let rest = parts.next().map(str::trim).unwrap_or("");
                let value = if rest.is_empty() {
                    String::new()
                } else {
                    format!("{}:", rest)
                };
                entries.insert(head.clone(), value);
                current = Some(head);
            } else if let Some(cur) = &current {
                let entry = entries.entry(cur.clone()).or_default();
                entry.push('\n');
                entry.push_str(line);
            }
        }

        entries.entry(header.display_text.clone()).or_default();

        let mut rebuilt = Vec::new();
        for known in &outline.headers {
            if let Some(content) = entries.get(&known.display_text) {
                rebuilt.push(format!("{}:{}", known.display_text, content));
            }
        }

        self.text = rebuilt.join("\n").trim().to_string();
    }

    /// Handles a click on a subheader card
    ///
    /// No-op when any line already mentions the subheader title. When the
    /// owning header's line is missing the subheader line is appended at the
    /// end; otherwise the header's indented block is re-grouped and rewritten
    /// with subheaders in stored order, inserting an empty line for the
    /// clicked subheader.
    pub fn click_subheader(&mut self, outline: &PageOutline, subheader_id: Uuid) {
        let Some((header, subheader)) = outline.find_subheader(subheader_id) else {
            debug!(%subheader_id, "subheader click ignored: unknown subheader");
            return;
        };

        let mut lines: Vec<String> = self.text.split('\n').map(String::from).collect();

        if lines.iter().any(|l| l.trim().contains(&subheader.title)) {
            return;
        }

        let header_index = lines
            .iter()
            .position(|l| l.trim().contains(&header.display_text));

        match header_index {
            None => lines.push(format!("{}:", subheader.title)),
            Some(hi) => {
                let end = lines
                    .iter()
                    .enumerate()
                    .skip(hi + 1)
                    .find(|(_, l)| !l.starts_with("  "))
                    .map(|(i, _)| i)
                    .unwrap_or(lines.len());

                // Re-group the header's indented block by subheader line
                let mut groups: HashMap<String, Vec<String>> = HashMap::new();
                let mut current: Option<String> = None;
                for line in &lines[hi + 1..end] {
                    let trimmed = line.trim();
                    if trimmed.ends_with(':') {
                        let name = trimmed.replacen(':', "", 1);
                        groups.insert(name.clone(), Vec::new());
                        current = Some(name);
                    } else if let Some(cur) = &current {
                        if let Some(body) = groups.get_mut(cur) {
                            body.push(line.clone());
                        }
                    }
                }

                groups.entry(subheader.title.clone()).or_default();

                let mut block = Vec::new();
                for known in &header.subheaders {
                    if let Some(body) = groups.get(&known.title) {
                        block.push(format!("  {}:", known.title));
                        block.extend(body.iter().cloned());
                    }
                }

                lines.splice(hi + 1..end, block);
            }
        }

        self.text = lines.join("\n");
        self.history.record(&self.text);
    }

    /// Handles a button click
    ///
    /// `header_id` / `subheader_id` are the button's back-references; the
    /// subheader reference wins when both resolve. No-op when the output is
    /// empty, already present anywhere in the buffer, or neither reference
    /// resolves (nested sub-option buttons carry no back-reference).
    pub fn click_button(
        &mut self,
        outline: &PageOutline,
        output: &str,
        header_id: Option<Uuid>,
        subheader_id: Option<Uuid>,
    ) {
        if output.is_empty() || self.text.contains(output) {
            return;
        }

        let mut lines: Vec<String> = self.text.split('\n').map(String::from).collect();

        if let Some((header, subheader)) = subheader_id.and_then(|id| outline.find_subheader(id)) {
            let header_index = match lines
                .iter()
                .position(|l| l.trim().starts_with(&header.display_text))
            {
                Some(i) => i,
                None => {
                    let at = insert_position_for_header(&lines, outline, header.order);
                    lines.insert(at, format!("{}:", header.display_text));
                    at
                }
            };

            let sub_marker = format!("{}:", subheader.title);
            if let Some(si) = lines.iter().position(|l| l.trim().starts_with(&sub_marker)) {
                lines[si].push_str(&format!(" {};", output));
            } else {
                // Insert after the last present subheader with a smaller order
                let mut insert_at = header_index + 1;
                for known in &header.subheaders {
                    if known.order < subheader.order {
                        if let Some(pos) =
                            lines.iter().position(|l| l.trim().starts_with(&known.title))
                        {
                            insert_at = pos + 1;
                        }
                    }
                }
                lines.insert(insert_at, format!("  {}: {};", subheader.title, output));
            }
        } else if let Some(header) = header_id.and_then(|id| outline.find_header(id)) {
            match lines
                .iter()
                .position(|l| l.trim().starts_with(&header.display_text))
            {
                Some(hi) => lines[hi].push_str(&format!(" {};", output)),
                None => {
                    let at = insert_position_for_header(&lines, outline, header.order);
                    lines.insert(at, format!("{}: {};", header.display_text, output));
                }
            }
        } else {
            debug!("button click ignored: no owning header or subheader");
            return;
        }

        self.text = lines.join("\n");
        self.history.record(&self.text);
    }

    /// Applies a button's left-click output, if it has one
    pub fn left_click(&mut self, outline: &PageOutline, button: &ButtonTree) {
        if let Some(output) = &button.on_left_click_output {
            self.click_button(outline, output, button.header_ref, button.subheader_ref);
        }
    }

    /// Applies a button's right-click output, if it has one
    pub fn right_click(&mut self, outline: &PageOutline, button: &ButtonTree) {
        if let Some(output) = &button.on_right_click_output {
            self.click_button(outline, output, button.header_ref, button.subheader_ref);
        }
    }

    /// Steps the buffer back one history snapshot
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(snapshot) => {
                self.text = snapshot.to_string();
                true
            }
            None => false,
        }
    }

    /// Steps the buffer forward one history snapshot
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(snapshot) => {
                self.text = snapshot.to_string();
                true
            }
            None => false,
        }
    }

    /// Clears the buffer and its history
    pub fn reset(&mut self) {
        self.text.clear();
        self.history.reset();
    }

    /// Whether an undo step is available
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Whether a redo step is available
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }
}

/// Position for a missing header line: before the first present header with a
/// greater order, else at the end
fn insert_position_for_header(lines: &[String], outline: &PageOutline, order: i32) -> usize {
    for known in &outline.headers {
        if known.order > order {
            if let Some(pos) = lines
                .iter()
                .position(|l| l.trim().starts_with(&known.display_text))
            {
                return pos;
            }
        }
    }
    lines.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::PageOutline;
    use clickscribe_shared::models::tree::{ButtonTree, HeaderTree, PageTree, SubheaderTree};

    fn subheader(title: &str, order: i32) -> SubheaderTree {
        SubheaderTree {
            id: Uuid::new_v4(),
            title: Some(title.to_string()),
            order,
            buttons: vec![],
        }
    }

    fn header(display: &str, order: i32, subheaders: Vec<SubheaderTree>) -> HeaderTree {
        HeaderTree {
            id: Uuid::new_v4(),
            title: Some(display.to_string()),
            display_text: Some(display.to_string()),
            order,
            subheaders,
            buttons: vec![],
        }
    }

    /// Exterior (order 1) with Roof/Walls, Interior (order 2), Summary (order 3)
    fn inspection_outline() -> PageOutline {
        let page = PageTree {
            id: Uuid::new_v4(),
            title: Some("Inspection".to_string()),
            headers: vec![
                header(
                    "Exterior",
                    1,
                    vec![subheader("Roof", 1), subheader("Walls", 2)],
                ),
                header("Interior", 2, vec![]),
                header("Summary", 3, vec![]),
            ],
        };
        PageOutline::from_page(&page)
    }

    fn id_of(outline: &PageOutline, display: &str) -> Uuid {
        outline
            .headers
            .iter()
            .find(|h| h.display_text == display)
            .unwrap()
            .id
    }

    fn sub_id_of(outline: &PageOutline, title: &str) -> Uuid {
        outline
            .headers
            .iter()
            .flat_map(|h| &h.subheaders)
            .find(|s| s.title == title)
            .unwrap()
            .id
    }

    #[test]
    fn test_button_click_on_empty_buffer_inserts_header_line() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_button(&outline, "clean", Some(id_of(&outline, "Interior")), None);
        assert_eq!(buffer.text(), "\nInterior: clean;");
    }

    #[test]
    fn test_button_click_appends_to_existing_header_line() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();
        let interior = id_of(&outline, "Interior");

        buffer.click_button(&outline, "clean", Some(interior), None);
        buffer.click_button(&outline, "bright", Some(interior), None);

        assert_eq!(buffer.text(), "\nInterior: clean; bright;");
    }

    #[test]
    fn test_button_click_duplicate_output_is_noop() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();
        let interior = id_of(&outline, "Interior");

        buffer.click_button(&outline, "clean", Some(interior), None);
        let before = buffer.text().to_string();
        buffer.click_button(&outline, "clean", Some(interior), None);

        assert_eq!(buffer.text(), before);
    }

    #[test]
    fn test_button_click_empty_output_is_noop() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_button(&outline, "", Some(id_of(&outline, "Interior")), None);
        assert_eq!(buffer.text(), "");
        assert!(!buffer.can_undo());
    }

    #[test]
    fn test_header_lines_follow_stored_order() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        // Click out of order: Summary (3) first, then Exterior (1)
        buffer.click_button(&outline, "passed", Some(id_of(&outline, "Summary")), None);
        buffer.click_button(&outline, "no damage", Some(id_of(&outline, "Exterior")), None);

        assert_eq!(buffer.text(), "\nExterior: no damage;\nSummary: passed;");
    }

    #[test]
    fn test_subheader_button_click_inserts_indented_line() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_button(&outline, "no leaks", None, Some(sub_id_of(&outline, "Roof")));

        assert_eq!(buffer.text(), "\nExterior:\n  Roof: no leaks;");
    }

    #[test]
    fn test_subheader_button_click_appends_to_existing_subheader_line() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();
        let roof = sub_id_of(&outline, "Roof");

        buffer.click_button(&outline, "no leaks", None, Some(roof));
        buffer.click_button(&outline, "gutters clear", None, Some(roof));

        assert_eq!(
            buffer.text(),
            "\nExterior:\n  Roof: no leaks; gutters clear;"
        );
    }

    #[test]
    fn test_subheader_lines_follow_stored_order() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        // Walls (order 2) clicked before Roof (order 1)
        buffer.click_button(&outline, "cracks", None, Some(sub_id_of(&outline, "Walls")));
        buffer.click_button(&outline, "no leaks", None, Some(sub_id_of(&outline, "Roof")));

        assert_eq!(
            buffer.text(),
            "\nExterior:\n  Roof: no leaks;\n  Walls: cracks;"
        );
    }

    #[test]
    fn test_button_click_without_refs_is_noop() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        // Nested sub-option buttons carry no back-reference
        buffer.click_button(&outline, "orphan", None, None);
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_header_click_inserts_empty_header_line() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_header(&outline, id_of(&outline, "Interior"));
        assert_eq!(buffer.text(), "Interior:");
    }

    #[test]
    fn test_header_click_existing_header_is_noop() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();
        let interior = id_of(&outline, "Interior");

        buffer.click_button(&outline, "clean", Some(interior), None);
        let before = buffer.text().to_string();
        buffer.click_header(&outline, interior);

        assert_eq!(buffer.text(), before);
    }

    #[test]
    fn test_header_click_keeps_indented_content_attached() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_button(&outline, "no leaks", None, Some(sub_id_of(&outline, "Roof")));
        buffer.click_header(&outline, id_of(&outline, "Summary"));

        assert_eq!(buffer.text(), "Exterior:\n  Roof: no leaks;\nSummary:");
    }

    #[test]
    fn test_header_click_drops_text_after_second_colon() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        // A colon inside the click output splits the line into three segments;
        // the re-flow keeps only the middle one
        buffer.set_text("Exterior: note: loose tiles;");
        buffer.click_header(&outline, id_of(&outline, "Summary"));

        assert_eq!(buffer.text(), "Exterior:note:\nSummary:");
    }

    #[test]
    fn test_subheader_click_inserts_empty_subheader_line() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_button(&outline, "no damage", Some(id_of(&outline, "Exterior")), None);
        buffer.click_subheader(&outline, sub_id_of(&outline, "Roof"));

        assert_eq!(buffer.text(), "\nExterior: no damage;\n  Roof:");
    }

    #[test]
    fn test_subheader_click_without_header_appends_bare_line() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_subheader(&outline, sub_id_of(&outline, "Roof"));
        assert_eq!(buffer.text(), "\nRoof:");
    }

    #[test]
    fn test_subheader_click_existing_title_is_noop() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();
        let roof = sub_id_of(&outline, "Roof");

        buffer.click_button(&outline, "no leaks", None, Some(roof));
        let before = buffer.text().to_string();
        buffer.click_subheader(&outline, roof);

        assert_eq!(buffer.text(), before);
    }

    #[test]
    fn test_left_and_right_click_apply_their_outputs() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        let button = ButtonTree {
            id: Uuid::new_v4(),
            header_ref: Some(id_of(&outline, "Interior")),
            subheader_ref: None,
            display_text: "Flooring".to_string(),
            on_left_click_output: Some("intact".to_string()),
            on_right_click_output: None,
            left_click_sub_options: vec![],
            right_click_sub_options: vec![],
        };

        buffer.left_click(&outline, &button);
        assert_eq!(buffer.text(), "\nInterior: intact;");

        // No right-click output, so nothing changes
        buffer.right_click(&outline, &button);
        assert_eq!(buffer.text(), "\nInterior: intact;");
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();
        let interior = id_of(&outline, "Interior");

        buffer.click_button(&outline, "clean", Some(interior), None);
        buffer.click_button(&outline, "bright", Some(interior), None);

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "\nInterior: clean;");

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "");
        assert!(!buffer.undo());

        assert!(buffer.redo());
        assert_eq!(buffer.text(), "\nInterior: clean;");
        assert!(buffer.redo());
        assert!(!buffer.redo());
    }

    #[test]
    fn test_click_after_undo_truncates_redo() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();
        let interior = id_of(&outline, "Interior");

        buffer.click_button(&outline, "clean", Some(interior), None);
        buffer.click_button(&outline, "bright", Some(interior), None);
        buffer.undo();

        buffer.click_button(&outline, "tidy", Some(interior), None);
        assert!(!buffer.can_redo());
        assert_eq!(buffer.text(), "\nInterior: clean; tidy;");
    }

    #[test]
    fn test_reset_clears_text_and_history() {
        let outline = inspection_outline();
        let mut buffer = ScratchBuffer::new();

        buffer.click_button(&outline, "clean", Some(id_of(&outline, "Interior")), None);
        buffer.reset();

        assert_eq!(buffer.text(), "");
        assert!(!buffer.can_undo());
        assert!(!buffer.can_redo());
    }

    #[test]
    fn test_set_text_records_history() {
        let mut buffer = ScratchBuffer::new();
        buffer.set_text("manual note");
        buffer.set_text("manual note, extended");

        assert!(buffer.undo());
        assert_eq!(buffer.text(), "manual note");
    }
}
