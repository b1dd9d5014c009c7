use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::io;

/// Reads a whole training text file into a `String`.
pub fn read_corpus<P: AsRef<Path>>(filename: P) -> io::Result<String> {
	let mut contents = String::new();
	File::open(filename)?.read_to_string(&mut contents)?;
	Ok(contents)
}

/// Reads a text file and returns its non-blank lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
/// - Drops lines holding only whitespace, which could never train a chain
pub fn read_lines<P: AsRef<Path>>(filename: P) -> io::Result<Vec<String>> {
	Ok(read_corpus(filename)?
		.lines()
		.filter(|line| !line.trim().is_empty())
		.map(str::to_owned)
		.collect())
}
