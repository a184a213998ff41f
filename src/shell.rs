//! Line-oriented repository browser.
//!
//! Reads one command per line and keeps a [`NavState`] between them. Command failures are
//! printed and the shell keeps going; only I/O errors on the terminal end it.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::codec::{decode_base64, encode_utf8_base64};
use crate::model::{ContentEntry, RepoRef};
use crate::nav::NavState;
use crate::remote::{RemoteClient, RepoContents};
use crate::upload::{local_selections, upload};

const HELP: &str = "\
commands:
  ls                     list the current directory
  cd <dir>|..|/          change directory
  pwd                    print the current location
  cat <file>             print a file
  open <file>            load a file into the edit buffer
  new <name>             start a new file in the current directory
  edit <local-file>      replace the edit buffer with a local file's text
  save                   commit the edit buffer
  close                  drop the edit buffer
  rm <file>              delete a file
  upload <local...>      upload files, folders or .zip archives here
                         (quote paths that contain spaces)
  exit                   leave the shell";

enum Flow {
    Continue,
    Exit,
}

pub struct Shell<'a> {
    client: &'a RemoteClient,
    nav: NavState,
}

impl<'a> Shell<'a> {
    pub fn new(client: &'a RemoteClient, repo: RepoRef) -> Self {
        let mut nav = NavState::new();
        nav.select_repo(repo);
        Self { client, nav }
    }

    pub fn nav(&self) -> &NavState {
        &self.nav
    }

    pub fn run(&mut self, input: impl BufRead, out: &mut impl Write) -> Result<()> {
        write!(out, "{}> ", self.nav.location())?;
        out.flush()?;
        for line in input.lines() {
            let line = line.context("read command")?;
            match self.execute(line.trim(), out) {
                Ok(Flow::Exit) => return Ok(()),
                Ok(Flow::Continue) => {}
                Err(err) => writeln!(out, "error: {:#}", err)?,
            }
            write!(out, "{}> ", self.nav.location())?;
            out.flush()?;
        }
        writeln!(out)?;
        Ok(())
    }

    fn execute(&mut self, line: &str, out: &mut impl Write) -> Result<Flow> {
        let (cmd, arg) = match line.split_once(char::is_whitespace) {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };
        match cmd {
            "" => {}
            "exit" | "quit" => return Ok(Flow::Exit),
            "help" => writeln!(out, "{}", HELP)?,
            "pwd" => writeln!(out, "{}", self.nav.location())?,
            "ls" => {
                self.refresh()?;
                print_listing(self.nav.listing(), out)?;
            }
            "cd" => {
                match arg {
                    "" | "/" => self.nav.go_root(),
                    ".." => {
                        self.nav.up();
                    }
                    dir => {
                        if self.nav.listing().is_empty() {
                            self.refresh()?;
                        }
                        self.nav.enter(dir)?;
                    }
                }
                self.refresh()?;
            }
            "cat" => {
                let path = self.nav.child_path(require_arg(arg, "cat <file>")?);
                let file = self.client.read_file(self.repo()?, &path)?;
                let bytes = decode_base64(&file.content)?;
                match String::from_utf8(bytes) {
                    Ok(text) => write!(out, "{}", text)?,
                    Err(e) => writeln!(out, "<binary file, {} bytes>", e.as_bytes().len())?,
                }
            }
            "open" => {
                let path = self.nav.child_path(require_arg(arg, "open <file>")?);
                let file = self.client.read_file(self.repo()?, &path)?;
                let open = self.nav.open(file)?;
                writeln!(out, "--- {} ({} bytes)", open.path, open.buffer.len())?;
                write!(out, "{}", open.buffer)?;
                if !open.buffer.ends_with('\n') {
                    writeln!(out)?;
                }
            }
            "new" => {
                let name = require_arg(arg, "new <name>")?;
                let open = self.nav.open_new(name);
                writeln!(out, "new file {}", open.path)?;
            }
            "edit" => {
                let local = PathBuf::from(require_arg(arg, "edit <local-file>")?);
                let text = std::fs::read_to_string(&local)
                    .with_context(|| format!("read {}", local.display()))?;
                self.nav.edit(text)?;
            }
            "save" => self.save(out)?,
            "close" => {
                if let Some(file) = self.nav.close()
                    && file.dirty
                {
                    writeln!(out, "discarded unsaved changes to {}", file.path)?;
                }
            }
            "rm" => {
                let name = require_arg(arg, "rm <file>")?;
                if self.nav.find(name).is_none() {
                    self.refresh()?;
                }
                let entry = self
                    .nav
                    .find(name)
                    .cloned()
                    .with_context(|| format!("no such file: {}", name))?;
                if entry.is_dir() {
                    anyhow::bail!("{} is a directory", entry.path);
                }
                let message = format!("Delete {}", entry.path);
                self.client
                    .delete_file(self.repo()?, &entry.path, &entry.sha, &message)?;
                writeln!(out, "deleted {}", entry.path)?;
                self.refresh()?;
            }
            "upload" => {
                let paths: Vec<PathBuf> = split_args(arg)?.into_iter().map(PathBuf::from).collect();
                if paths.is_empty() {
                    anyhow::bail!("usage: upload <local...>");
                }
                let selections = local_selections(&paths)?;
                let repo = self.repo()?.clone();
                let writer = RepoContents {
                    client: self.client,
                    repo: &repo,
                };
                let mut status = Ok(());
                let report = upload(&writer, self.nav.current_dir(), selections).run_to_completion(
                    |event| {
                        if status.is_ok() {
                            status = writeln!(out, "{}", event.status_text());
                        }
                    },
                );
                status?;
                if let Some(listing) = report.listing {
                    self.nav.set_listing(listing);
                }
            }
            other => anyhow::bail!("unknown command {:?} (try `help`)", other),
        }
        Ok(Flow::Continue)
    }

    fn save(&mut self, out: &mut impl Write) -> Result<()> {
        let file = self.nav.open_file().cloned().context("no file is open")?;
        if !file.dirty {
            writeln!(out, "no changes")?;
            return Ok(());
        }
        let message = match file.sha {
            Some(_) => format!("Update {}", file.path),
            None => format!("Create {}", file.path),
        };
        let sha = self.client.write_file(
            self.repo()?,
            &file.path,
            &encode_utf8_base64(&file.buffer),
            &message,
            file.sha.as_deref(),
        )?;
        tracing::info!(path = %file.path, "saved");
        self.nav.saved(sha);
        writeln!(out, "saved {}", file.path)?;
        Ok(())
    }

    fn refresh(&mut self) -> Result<()> {
        let entries = self
            .client
            .list_dir(self.repo()?, self.nav.current_dir())?;
        self.nav.set_listing(entries);
        Ok(())
    }

    fn repo(&self) -> Result<&RepoRef> {
        self.nav.repo().context("no repository selected")
    }
}

fn require_arg<'s>(arg: &'s str, usage: &str) -> Result<&'s str> {
    if arg.is_empty() {
        anyhow::bail!("usage: {}", usage);
    }
    Ok(arg)
}

/// Split on whitespace, keeping single- or double-quoted runs together.
fn split_args(line: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;
    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    out.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if let Some(q) = quote {
        anyhow::bail!("unterminated {} quote", q);
    }
    if in_word {
        out.push(current);
    }
    Ok(out)
}

pub fn print_listing(entries: &[ContentEntry], out: &mut impl Write) -> Result<()> {
    if entries.is_empty() {
        writeln!(out, "(empty folder)")?;
        return Ok(());
    }
    for e in entries {
        if e.is_dir() {
            writeln!(out, "{}/", e.name)?;
        } else {
            writeln!(out, "{}  ({} bytes)", e.name, e.size)?;
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "tests/shell_tests.rs"]
mod tests;
