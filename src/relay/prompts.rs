//! Prompt templates sent to the text generation provider.

/// Transcription repair prompt. `context` and `text` are embedded verbatim.
pub fn enhance_prompt(text: &str, context: &str) -> String {
    format!(
        "You are a medical transcription repair tool. Your tasks:\n\
         1. Fix transcription errors using conversation context\n\
         2. Only repair the current speech, not previous conversation\n\
         3. Detect speaker changes\n\
         4. Preserve all original content including small talk - do not fabricate or replace content\n\
         5. Overall, make the transcripted conversation make sense while changing as little words as possible\n\
         Format Requirements:\n\
         • No speaker labels\n\
         • Separate speakers with one blank line\n\
         • Each speaker's continuous speech forms one paragraph\n\n\
         Format Example:\n\
         [Speaker A's continuous speech]\n\n\
         [Speaker B's continuous speech]\n\n\
         [Speaker A's next speech segment]\n\n\
         Previous conversation:\n{context}\n\n\
         Current speech:\n{text}\n\n\
         Output the repaired transcription only. Your output will be directly used in patient records.\n\
         Note: Being in current speech does not mean that the speaker has not changed. \
         Many times, the speaker might change in between the text that is given to you as current speech. \
         You need to detect these changes and format the output accordingly. \n\
         Note 2: Multiple speaker changes is also possible. Apply the same formatting logic if that happens. \
         If speaker changes, write what next speaker says in a new paragraph with a blank line between the paragraphs in your output.\n\
         Note 3: Also punctuate the output."
    )
}

/// Translation-only prompt
pub fn translate_prompt(text: &str, context: &str, target_language: &str) -> String {
    format!(
        "Translate the following medical conversation to {target_language}. \
         Return ONLY the translation, no explanations or additional text.\n\n\
         Previous translations for context:\n\
         {context}\n\n\
         Text to translate:\n\
         {text}"
    )
}
