/// Drop any commentary a generative backend put before the document itself.
///
/// The output starts at the first line whose trimmed form begins with `#` and
/// runs to the end of the reply, line endings untouched. Without such a line
/// the whole text is returned trimmed. Documents whose real content starts
/// with prose before the first heading lose that prose.
pub fn strip_preamble(text: &str) -> String {
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if line.trim().starts_with('#') {
            return text[offset..].to_string();
        }
        offset += line.len();
    }

    text.trim().to_string()
}
