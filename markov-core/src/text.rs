/// Characters accepted as the end of a generated sentence.
pub const SENTENCE_END: [char; 3] = ['.', '!', '?'];

/// Splits a text into tokens on runs of whitespace.
///
/// No other rule applies: punctuation stays attached to its word, and
/// a whitespace-only input yields no token at all.
pub fn tokenize(text: &str) -> Vec<&str> {
	text.split_whitespace().collect()
}

/// Turns a generated token sequence into a sentence.
///
/// - Uppercases the first character of the first token (the rest is kept)
/// - Appends `.` to the last token unless its final character already is
///   one of `.`, `!`, `?`
/// - Joins the tokens with single spaces
pub fn finalize<S: AsRef<str>>(tokens: &[S]) -> String {
	let mut words: Vec<String> = tokens.iter().map(|t| t.as_ref().to_owned()).collect();

	if let Some(first) = words.first_mut() {
		*first = capitalize(first);
	}

	if let Some(last) = words.last_mut() {
		match last.chars().last() {
			Some(c) if SENTENCE_END.contains(&c) => (),
			_ => last.push('.'),
		}
	}

	words.join(" ")
}

/// Uppercases the first character of `word`, leaving the remainder untouched.
fn capitalize(word: &str) -> String {
	let mut chars = word.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}
