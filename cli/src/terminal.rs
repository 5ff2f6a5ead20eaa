//! Terminal stand-ins for the editor's input modal and notice area.

use std::io::{BufRead, Write};

use notesmith_engine::{
    InputCollector, InputOutcome, Notice, NotificationSink, PersistentNoticeId, UserInstructions,
};

const INPUT_LABEL: &str = "Instructions: ";

/// Instructions given up front with `--instructions`.
///
/// Blank text reports [`Notice::EmptyPrompt`] and cancels, since there is
/// nobody to ask again.
#[derive(Debug)]
pub struct PresetInput {
    text: Option<String>,
}

impl PresetInput {
    #[must_use]
    pub fn new(text: String) -> Self {
        Self { text: Some(text) }
    }
}

impl InputCollector for PresetInput {
    fn collect(&mut self, notices: &mut dyn NotificationSink) -> InputOutcome {
        let Some(text) = self.text.take() else {
            return InputOutcome::Cancelled;
        };
        match UserInstructions::new(text) {
            Ok(instructions) => InputOutcome::Submitted(instructions),
            Err(_) => {
                notices.notify(&Notice::EmptyPrompt);
                InputOutcome::Cancelled
            }
        }
    }
}

/// Reads one line of instructions, asking again while the line is blank.
/// End of input cancels.
pub struct LineInput<R, W> {
    reader: R,
    prompt: W,
}

impl<R: BufRead, W: Write> LineInput<R, W> {
    #[must_use]
    pub fn new(reader: R, prompt: W) -> Self {
        Self { reader, prompt }
    }
}

impl<R: BufRead, W: Write> InputCollector for LineInput<R, W> {
    fn collect(&mut self, notices: &mut dyn NotificationSink) -> InputOutcome {
        loop {
            let _ = write!(self.prompt, "{INPUT_LABEL}");
            let _ = self.prompt.flush();

            let mut line = String::new();
            match self.reader.read_line(&mut line) {
                Ok(0) => {
                    tracing::debug!("Instruction input closed");
                    return InputOutcome::Cancelled;
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!("Failed to read instructions: {e}");
                    return InputOutcome::Cancelled;
                }
            }

            let line = line.trim_end_matches(['\n', '\r']);
            match UserInstructions::new(line) {
                Ok(instructions) => return InputOutcome::Submitted(instructions),
                Err(_) => notices.notify(&Notice::EmptyPrompt),
            }
        }
    }
}

/// Prints notices as `level: message` lines.
///
/// With `clear_on_dismiss`, a dismissed persistent notice is erased from the
/// terminal (cursor up, clear line). Otherwise it stays in the scrollback.
pub struct TerminalNotices<W> {
    out: W,
    clear_on_dismiss: bool,
    next_id: u64,
    visible: Option<PersistentNoticeId>,
}

impl<W: Write> TerminalNotices<W> {
    #[must_use]
    pub fn new(out: W, clear_on_dismiss: bool) -> Self {
        Self {
            out,
            clear_on_dismiss,
            next_id: 1,
            visible: None,
        }
    }

    fn write_notice(&mut self, notice: &Notice) {
        if let Err(e) = writeln!(self.out, "{}: {}", notice.level().as_str(), notice.message()) {
            tracing::debug!("Failed to print notice: {e}");
        }
        let _ = self.out.flush();
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> NotificationSink for TerminalNotices<W> {
    fn notify(&mut self, notice: &Notice) {
        tracing::info!(level = notice.level().as_str(), message = %notice, "Notice");
        // A transient line below a persistent one would be erased with it.
        self.visible = None;
        self.write_notice(notice);
    }

    fn show_persistent(&mut self, notice: &Notice) -> PersistentNoticeId {
        let id = PersistentNoticeId::new(self.next_id);
        self.next_id += 1;
        self.write_notice(notice);
        self.visible = Some(id);
        id
    }

    fn dismiss(&mut self, id: PersistentNoticeId) {
        if self.visible != Some(id) {
            return;
        }
        self.visible = None;
        if self.clear_on_dismiss {
            let _ = write!(self.out, "\x1b[1A\r\x1b[2K");
            let _ = self.out.flush();
        }
    }
}
