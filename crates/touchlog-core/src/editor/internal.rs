//! Built-in line editor used when no external editor is available.

use std::fs;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, TouchlogError};
use crate::fs::write_atomic;

const HELP: &str = "commands: :p print  :a append  :i N insert  :d N delete  :c N change  \
:w write  :wq write+quit  :q quit  :q! discard  :h help";

/// Line-oriented editor over any input/output pair.
///
/// Lines entered after `:a`, `:i N` are collected until a lone `.`.
pub struct LineEditor<R, W> {
    input: R,
    output: W,
    path: PathBuf,
    lines: Vec<String>,
    saved: String,
    dirty: bool,
}

enum Command {
    Print,
    Append,
    Insert(usize),
    Delete(usize),
    Change(usize),
    Write,
    WriteQuit,
    Quit,
    ForceQuit,
    Help,
}

impl<R: BufRead, W: Write> LineEditor<R, W> {
    /// Load `path` for editing.
    pub fn open(path: &Path, input: R, output: W) -> Result<Self> {
        let saved = fs::read_to_string(path)
            .map_err(|e| TouchlogError::io("failed to read", path, e))?;
        Ok(Self {
            input,
            output,
            path: path.to_path_buf(),
            lines: saved.lines().map(str::to_string).collect(),
            saved,
            dirty: false,
        })
    }

    /// Run until the user quits; returns the content last written to disk.
    pub fn run(mut self) -> Result<String> {
        self.say(&format!("Editing {}", self.path.display()))?;
        self.print_buffer()?;
        self.say(HELP)?;

        loop {
            self.prompt(": ")?;
            let Some(line) = self.read_line()? else {
                // EOF behaves like :q!
                return Ok(self.saved);
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let command = match parse_command(line) {
                Ok(command) => command,
                Err(message) => {
                    self.say(&message)?;
                    continue;
                }
            };

            match command {
                Command::Print => self.print_buffer()?,
                Command::Append => {
                    let added = self.read_block()?;
                    self.dirty |= !added.is_empty();
                    self.lines.extend(added);
                }
                Command::Insert(n) => {
                    if n == 0 || n > self.lines.len() + 1 {
                        self.say(&format!("line {} out of range", n))?;
                        continue;
                    }
                    let added = self.read_block()?;
                    self.dirty |= !added.is_empty();
                    self.lines.splice(n - 1..n - 1, added);
                }
                Command::Delete(n) => {
                    if !self.in_range(n) {
                        self.say(&format!("line {} out of range", n))?;
                        continue;
                    }
                    self.lines.remove(n - 1);
                    self.dirty = true;
                }
                Command::Change(n) => {
                    if !self.in_range(n) {
                        self.say(&format!("line {} out of range", n))?;
                        continue;
                    }
                    self.prompt(&format!("{:>4}| ", n))?;
                    if let Some(text) = self.read_line()? {
                        self.lines[n - 1] = text;
                        self.dirty = true;
                    }
                }
                Command::Write => self.write()?,
                Command::WriteQuit => {
                    self.write()?;
                    return Ok(self.saved);
                }
                Command::Quit => {
                    if self.dirty {
                        self.say("unsaved changes (use :w to save or :q! to discard)")?;
                        continue;
                    }
                    return Ok(self.saved);
                }
                Command::ForceQuit => return Ok(self.saved),
                Command::Help => self.say(HELP)?,
            }
        }
    }

    fn in_range(&self, n: usize) -> bool {
        n >= 1 && n <= self.lines.len()
    }

    fn contents(&self) -> String {
        if self.lines.is_empty() {
            String::new()
        } else {
            let mut text = self.lines.join("\n");
            text.push('\n');
            text
        }
    }

    fn write(&mut self) -> Result<()> {
        let text = self.contents();
        write_atomic(&self.path, text.as_bytes())
            .map_err(|e| TouchlogError::io("failed to write", &self.path, e))?;
        self.saved = text;
        self.dirty = false;
        self.say(&format!("wrote {} lines", self.lines.len()))
    }

    fn print_buffer(&mut self) -> Result<()> {
        if self.lines.is_empty() {
            return self.say("(empty)");
        }
        let rendered: Vec<String> = self
            .lines
            .iter()
            .enumerate()
            .map(|(i, line)| format!("{:>4}| {}", i + 1, line))
            .collect();
        for line in rendered {
            self.say(&line)?;
        }
        Ok(())
    }

    fn read_block(&mut self) -> Result<Vec<String>> {
        self.say("(end with a single '.')")?;
        let mut block = Vec::new();
        while let Some(line) = self.read_line()? {
            if line == "." {
                break;
            }
            block.push(line);
        }
        Ok(block)
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        let read = self
            .input
            .read_line(&mut buf)
            .map_err(|e| TouchlogError::io("failed to read input while editing", &self.path, e))?;
        if read == 0 {
            return Ok(None);
        }
        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }
        Ok(Some(buf))
    }

    fn prompt(&mut self, text: &str) -> Result<()> {
        write!(self.output, "{}", text)
            .and_then(|_| self.output.flush())
            .map_err(|e| TouchlogError::io("failed to write output while editing", &self.path, e))
    }

    fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)
            .map_err(|e| TouchlogError::io("failed to write output while editing", &self.path, e))
    }
}

fn parse_command(line: &str) -> std::result::Result<Command, String> {
    let mut parts = line.split_whitespace();
    let head = parts.next().unwrap_or_default();
    let arg = parts.next();

    let line_number = || -> std::result::Result<usize, String> {
        arg.and_then(|a| a.parse::<usize>().ok())
            .ok_or_else(|| format!("{} needs a line number", head))
    };

    match head {
        ":p" => Ok(Command::Print),
        ":a" => Ok(Command::Append),
        ":i" => line_number().map(Command::Insert),
        ":d" => line_number().map(Command::Delete),
        ":c" => line_number().map(Command::Change),
        ":w" => Ok(Command::Write),
        ":wq" | ":x" => Ok(Command::WriteQuit),
        ":q" => Ok(Command::Quit),
        ":q!" => Ok(Command::ForceQuit),
        ":h" | ":help" => Ok(Command::Help),
        other => Err(format!("unknown command: {} (:h for help)", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    fn edit(initial: &str, script: &str) -> (String, String, String) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entry.md");
        fs::write(&path, initial).unwrap();

        let mut out = Vec::new();
        let result = LineEditor::open(&path, Cursor::new(script.to_string()), &mut out)
            .unwrap()
            .run()
            .unwrap();
        let on_disk = fs::read_to_string(&path).unwrap();
        (result, on_disk, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_append_and_write_quit() {
        let (result, on_disk, _) = edit("# Title\n", ":a\nfirst\nsecond\n.\n:wq\n");
        assert_eq!(result, "# Title\nfirst\nsecond\n");
        assert_eq!(on_disk, result);
    }

    #[test]
    fn test_insert_delete_change() {
        let (result, _, _) = edit("a\nb\nc\n", ":i 2\nx\n.\n:d 4\n:c 1\nA\n:wq\n");
        assert_eq!(result, "A\nx\nb\n");
    }

    #[test]
    fn test_quit_refuses_when_dirty() {
        let (result, on_disk, out) = edit("keep\n", ":d 1\n:q\n:q!\n");
        assert!(out.contains("unsaved changes"));
        assert_eq!(result, "keep\n");
        assert_eq!(on_disk, "keep\n");
    }

    #[test]
    fn test_clean_quit_and_print() {
        let (result, _, out) = edit("one\ntwo\n", ":p\n:q\n");
        assert_eq!(result, "one\ntwo\n");
        assert!(out.contains("   2| two"));
    }

    #[test]
    fn test_bad_commands_are_reported() {
        let (_, _, out) = edit("x\n", ":zz\n:d\n:d 9\n:q\n");
        assert!(out.contains("unknown command: :zz"));
        assert!(out.contains(":d needs a line number"));
        assert!(out.contains("line 9 out of range"));
    }

    #[test]
    fn test_eof_discards_unsaved_edits() {
        let (result, on_disk, _) = edit("base\n", ":a\nmore\n.\n");
        assert_eq!(result, "base\n");
        assert_eq!(on_disk, "base\n");
    }
}
