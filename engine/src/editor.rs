//! Active-document access: the content selector and content writer.

use std::ops::Range;

use notesmith_types::NotesContent;

use crate::OrchestrationError;

/// An open document the user is editing.
pub trait EditorContext {
    /// Currently selected text; empty when nothing is selected.
    fn selection(&self) -> &str;

    /// Full document text.
    fn content(&self) -> &str;

    /// Replace the whole document with `text` in a single step.
    fn replace_content(&mut self, text: &str);
}

/// Source of the active editing context, which may be absent.
pub trait DocumentProvider {
    type Editor: EditorContext + ?Sized;

    fn active_editor(&mut self) -> Option<&mut Self::Editor>;
}

impl<E: EditorContext> DocumentProvider for Option<E> {
    type Editor = E;

    fn active_editor(&mut self) -> Option<&mut E> {
        self.as_mut()
    }
}

/// The text a request operates on: the selection when non-empty, otherwise
/// the whole document. `None` means there is no editor at all, which callers
/// must treat as a precondition failure.
pub fn select_content<E: EditorContext + ?Sized>(editor: Option<&E>) -> Option<NotesContent> {
    let editor = editor?;
    let selection = editor.selection();
    let text = if selection.is_empty() {
        editor.content()
    } else {
        selection
    };
    Some(NotesContent::new(text))
}

/// Replace the document's entire content. Nothing is written when the editor is gone.
pub fn write_content<E: EditorContext + ?Sized>(
    editor: Option<&mut E>,
    text: &str,
) -> Result<(), OrchestrationError> {
    let editor = editor.ok_or(OrchestrationError::NoActiveEditor)?;
    editor.replace_content(text);
    Ok(())
}

/// In-memory document with an optional selection.
///
/// The selection is stored as a byte range that always lies on `char`
/// boundaries inside the current content. Replacing the content clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    selection: Option<Range<usize>>,
    modified: bool,
}

impl TextBuffer {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            selection: None,
            modified: false,
        }
    }

    /// Select a byte range, clamped to the content and snapped down to `char` boundaries.
    #[must_use]
    pub fn with_selection(mut self, range: Range<usize>) -> Self {
        self.select(range);
        self
    }

    pub fn select(&mut self, range: Range<usize>) {
        let end = floor_boundary(&self.content, range.end.min(self.content.len()));
        let start = floor_boundary(&self.content, range.start.min(end));
        self.selection = (start < end).then_some(start..end);
    }

    /// Byte span of 1-based inclusive lines `start..=end`, trailing newline included.
    ///
    /// `end` past the last line is clamped. Returns `None` for `start == 0`,
    /// `start > end`, or a `start` beyond the last line.
    #[must_use]
    pub fn line_span(&self, start: usize, end: usize) -> Option<Range<usize>> {
        if start == 0 || start > end {
            return None;
        }
        let mut offset = 0;
        let mut span_start = None;
        for (index, line) in self.content.split_inclusive('\n').enumerate() {
            let number = index + 1;
            if number == start {
                span_start = Some(offset);
            }
            offset += line.len();
            if number == end {
                break;
            }
        }
        span_start.map(|begin| begin..offset)
    }

    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }
}

fn floor_boundary(text: &str, mut index: usize) -> usize {
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

impl EditorContext for TextBuffer {
    fn selection(&self) -> &str {
        self.selection
            .as_ref()
            .map_or("", |range| &self.content[range.clone()])
    }

    fn content(&self) -> &str {
        &self.content
    }

    fn replace_content(&mut self, text: &str) {
        text.clone_into(&mut self.content);
        self.selection = None;
        self.modified = true;
    }
}
