//! Instruction prompt construction.
//!
//! The template is fixed. User instructions and note content are spliced in
//! verbatim: no escaping, no trimming, no placeholder scanning, so text that
//! happens to look like a placeholder is never re-expanded.

use notesmith_types::{NotesContent, Prompt, UserInstructions};

const TEMPLATE_HEAD: &str = "\
You are an expert assistant for refining and enriching notes. Your task is to \
receive a set of instructions and a set of notes, and return **only** the improved \
notes, applying prompt-engineering techniques.

1. Role and Goal
   - **Role:** Professional note editor.
   - **Goal:** Return only the polished notes, with no explanations and no metadata.

2. Key Techniques
   - **Explicit Instructions:** Follow every instruction step by step.
   - **Consistent Formatting:** Use titles, subtitles and bullet points.
   - **Clarity and Concision:** Simplify and remove redundancy.
   - **Enrichment:** Add definitions, examples or logical connections where they add value.
   - **Accuracy:** Check facts and concepts.

3. Input Structure
- **Instructions:**
\t";

const TEMPLATE_MIDDLE: &str = "

- **Note Content:**
\t";

const TEMPLATE_TAIL: &str = "


4. Output Criteria
\t- Only the improved notes (no explanatory headers).
\t- Clean, uniform formatting:
\t  - **Title** (optional)
\t  - **Subtitles** for sections
\t  - Bullets or numbering for lists
\t- Tone suited to the purpose (academic, technical, executive...).

5. Usage Example
\t- **Input**
\t  Instruction: \"Highlight the key concepts and add a practical example.\"
\t  Notes: \"Photosynthesis converts light into energy...\"
\t- **Output**
\t  **Key Concepts**
\t  1. Photosynthesis: process that converts light into chemical energy
\t  2. Phases: light-dependent phase and Calvin cycle

\t  **Practical Example**
\t  - Plants use sunlight to produce glucose, which fuels their growth.
\t";

/// Render the refinement prompt for one request.
#[must_use]
pub fn build_prompt(instructions: &UserInstructions, notes: &NotesContent) -> Prompt {
    let instructions = instructions.as_str();
    let notes = notes.as_str();
    let mut rendered = String::with_capacity(
        TEMPLATE_HEAD.len()
            + instructions.len()
            + TEMPLATE_MIDDLE.len()
            + notes.len()
            + TEMPLATE_TAIL.len(),
    );
    rendered.push_str(TEMPLATE_HEAD);
    rendered.push_str(instructions);
    rendered.push_str(TEMPLATE_MIDDLE);
    rendered.push_str(notes);
    rendered.push_str(TEMPLATE_TAIL);
    Prompt::from_rendered(rendered)
}
