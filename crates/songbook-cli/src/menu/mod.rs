//! Interactive menus over an [`InputPipeline`].
//!
//! [`Session`] holds what the song and artist menus share: the repository,
//! the input pipeline, index selection, confirmation prompts and the
//! load/save/delete flows. The entity-specific screens live in
//! [`songs`] and [`artists`].

pub mod artists;
pub mod songs;

use std::fmt::Display;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use songbook_core::validation::index_is_valid;
use songbook_core::{seed, Ask, Error, InputPipeline, Repository, Result};

use crate::table::{self, Tabular};

/// What the main loop should do after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// State shared by every screen of one menu.
#[derive(Debug)]
pub struct Session<T: Tabular, R, W> {
    pub api: Repository<T>,
    pub input: InputPipeline<R, W>,
    seed_dir: PathBuf,
}

impl<T: Tabular, R: BufRead, W: Write> Session<T, R, W> {
    pub fn new(api: Repository<T>, input: InputPipeline<R, W>, seed_dir: PathBuf) -> Self {
        Self {
            api,
            input,
            seed_dir,
        }
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.input.writer(), "{text}")?;
        Ok(())
    }

    /// Read a numeric menu choice; `None` for anything that is not a number.
    pub fn read_option(&mut self, prompt: &str) -> Result<Option<i64>> {
        match self.input.prompt_line(prompt)? {
            Some(line) => Ok(line.trim().parse().ok()),
            None => Err(Error::InputClosed),
        }
    }

    /// Ask a y/n question.
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.input.ask(Ask::new("yesNo").prompt(prompt))
    }

    pub fn print_all(&mut self) -> Result<()> {
        let title = format!("All {} Information", capitalise(T::NOUN));
        let text = table::records_table(&title, self.api.records(), true);
        self.say(text)
    }

    /// Print the catalog and ask for an index, validated against the live size.
    pub fn select_index(&mut self, prompt: Option<&str>) -> Result<Option<usize>> {
        if self.api.is_empty() {
            self.say(format!("No {} found.", T::PLURAL))?;
            return Ok(None);
        }
        self.print_all()?;

        let len = self.api.len();
        let mut ask = Ask::new(T::INDEX_PROPERTY).validator(move |s| index_is_valid(s, len));
        if let Some(prompt) = prompt {
            ask = ask.prompt(prompt);
        }
        self.input.ask(ask).map(Some)
    }

    /// Select one record and show it on its own.
    pub fn select_record(&mut self) -> Result<Option<(usize, T)>> {
        let Some(index) = self.select_index(None)? else {
            return Ok(None);
        };
        let Some(record) = self.api.find(index).cloned() else {
            return Ok(None);
        };

        log::debug!("{} found: {record:?}", capitalise(T::NOUN));
        let title = format!("{} Information", capitalise(T::NOUN));
        let text = table::records_table(&title, std::slice::from_ref(&record), false);
        self.say(format!("\nThe following {} was found:", T::NOUN))?;
        self.say(text)?;
        Ok(Some((index, record)))
    }

    /// Either every record, or a hand-picked set chosen by index.
    pub fn select_many(&mut self) -> Result<Option<Vec<T>>> {
        log::debug!("Trying to get multiple {} by index", T::PLURAL);

        if self.api.is_empty() {
            self.say(format!("No {} found.", T::PLURAL))?;
            return Ok(None);
        }
        self.print_all()?;

        let pick = self.confirm(&format!(
            "Do you want to search for multiple {} using their index? (y/n): ",
            T::PLURAL
        ))?;
        if !pick {
            return Ok(Some(self.api.find_all()));
        }

        let mut chosen: Vec<T> = Vec::new();
        loop {
            if let Some((_, record)) = self.select_record()? {
                if chosen.contains(&record) {
                    self.say(format!("{} already added to list.", capitalise(T::NOUN)))?;
                } else {
                    chosen.push(record);
                }
            }

            let again = self.confirm(&format!(
                "Do you want to add another {} to the list using their index? (y/n): ",
                T::NOUN
            ))?;
            self.say("")?;
            if !again {
                break;
            }
        }

        Ok((!chosen.is_empty()).then_some(chosen))
    }

    pub fn view(&mut self) -> Result<()> {
        log::debug!("view {} invoked", T::NOUN);
        self.select_record().map(|_| ())
    }

    pub fn delete(&mut self) -> Result<()> {
        log::debug!("delete {} invoked", T::NOUN);

        let prompt = format!("Enter {} index to delete: ", T::NOUN);
        let Some(index) = self.select_index(Some(&prompt))? else {
            return Ok(());
        };

        match self.api.delete_at(index) {
            Some(deleted) => {
                let name = deleted.cells().into_iter().next().unwrap_or_default();
                self.say(format!("Delete Successful! Deleted {}: {name}", T::NOUN))
            }
            None => self.say("Delete NOT Successful"),
        }
    }

    pub fn remove_many(&mut self) -> Result<()> {
        log::debug!("remove multiple {} invoked", T::PLURAL);

        let Some(chosen) = self.select_many()? else {
            return Ok(());
        };

        self.say(format!("Here are the {} you wanted to remove:", T::PLURAL))?;
        let title = format!("Multiple {} Information", capitalise(T::NOUN));
        let text = table::records_table(&title, &chosen, false);
        self.say(text)?;

        let sure = self.confirm(&format!(
            "Are you sure you want to remove these {}? (y/n): ",
            T::PLURAL
        ))?;
        if !sure {
            return self.say(format!("{} not deleted.", capitalise(T::PLURAL)));
        }

        self.api.remove_many(&chosen);
        self.say(format!("{} deleted.", capitalise(T::PLURAL)))
    }

    /// Load from disk, reporting failures without touching the catalog.
    pub fn load(&mut self) -> Result<()> {
        log::debug!("load {} invoked", T::PLURAL);

        match self.api.load() {
            Ok(()) => {
                self.say(format!("{} loaded successfully:", capitalise(T::PLURAL)))?;
                self.print_all()
            }
            Err(e) if e.is_bug() => Err(e),
            Err(e) => {
                log::warn!("Load failed: {e}");
                self.say(format!("Error reading from file: {e}"))
            }
        }
    }

    pub fn save(&mut self) -> Result<()> {
        log::debug!("save {} invoked", T::PLURAL);

        match self.api.store() {
            Ok(()) => {
                self.say(format!("{} saved successfully:", capitalise(T::PLURAL)))?;
                self.print_all()
            }
            Err(e) if e.is_bug() => Err(e),
            Err(e) => {
                log::warn!("Store failed: {e}");
                self.say(format!("Error writing to file: {e}"))
            }
        }
    }

    pub fn write_seed_files(&mut self) -> Result<()> {
        let dir = self.seed_dir.clone();
        match seed::write_seed_files(&dir) {
            Ok(()) => self.say(format!("Seed documents written to {}", dir.display())),
            Err(e) => self.say(format!("Error writing seed documents: {e}")),
        }
    }

    /// Run `action`, turning end of input into [`Flow::Exit`].
    pub fn guard(&mut self, action: impl FnOnce(&mut Self) -> Result<Flow>) -> Result<Flow> {
        match action(self) {
            Err(Error::InputClosed) => Ok(Flow::Exit),
            other => other,
        }
    }
}

pub fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use songbook_core::{Format, Song};
    use std::io::Cursor;
    use tempfile::TempDir;

    type TestSession = Session<Song, Cursor<Vec<u8>>, Vec<u8>>;

    fn session(dir: &TempDir, input: &str) -> TestSession {
        let api = Repository::new(Format::Json.serializer(dir.path().join("songs.json")));
        let input = InputPipeline::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        Session::new(api, input, dir.path().to_path_buf())
    }

    fn output(session: TestSession) -> String {
        String::from_utf8(session.input.into_inner().1).unwrap()
    }

    #[test]
    fn test_capitalise() {
        assert_eq!(capitalise("song"), "Song");
        assert_eq!(capitalise(""), "");
    }

    #[test]
    fn test_read_option() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "3\nabc\n");
        assert_eq!(session.read_option("> ").unwrap(), Some(3));
        assert_eq!(session.read_option("> ").unwrap(), None);
        assert!(matches!(session.read_option("> "), Err(Error::InputClosed)));
    }

    #[test]
    fn test_select_index_on_empty_catalog() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "0\n");
        assert_eq!(session.select_index(None).unwrap(), None);
        assert!(output(session).contains("No songs found."));
    }

    #[test]
    fn test_select_index_rejects_out_of_range() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "11\n10\n");
        session.api.seed();
        assert_eq!(session.select_index(None).unwrap(), Some(10));
        assert!(output(session).contains("Error: invalid song index"));
    }

    #[test]
    fn test_delete_flow() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "0\n");
        session.api.seed();
        session.delete().unwrap();

        assert_eq!(session.api.len(), 10);
        assert!(output(session).contains("Deleted song: Smooth"));
    }

    #[test]
    fn test_remove_many_flow() {
        let dir = TempDir::new().unwrap();
        // pick 1, then 3, stop, confirm
        let mut session = session(&dir, "y\n1\ny\n3\nn\ny\n");
        session.api.seed();
        session.remove_many().unwrap();

        assert_eq!(session.api.len(), 9);
        let titles: Vec<String> = session.api.records().iter().map(|s| s.title.clone()).collect();
        assert!(!titles.contains(&"Lose Yourself".to_string()));
        assert!(!titles.contains(&"Highway to Hell".to_string()));
    }

    #[test]
    fn test_remove_many_declined() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "n\nn\n");
        session.api.seed();
        session.remove_many().unwrap();

        assert_eq!(session.api.len(), 11);
        assert!(output(session).contains("Songs not deleted."));
    }

    #[test]
    fn test_duplicate_pick_is_reported() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "y\n2\ny\n2\nn\n");
        session.api.seed();
        let chosen = session.select_many().unwrap().unwrap();

        assert_eq!(chosen.len(), 1);
        assert!(output(session).contains("Song already added to list."));
    }

    #[test]
    fn test_failed_load_is_reported_not_raised() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "");
        session.api.seed();
        session.load().unwrap();

        assert_eq!(session.api.len(), 11);
        assert!(output(session).contains("Error reading from file"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "");
        session.api.seed();
        session.save().unwrap();
        let all = session.api.find_all();
        session.api.remove_many(&all);
        session.load().unwrap();

        assert_eq!(session.api.len(), 11);
    }

    #[test]
    fn test_guard_turns_closed_input_into_exit() {
        let dir = TempDir::new().unwrap();
        let mut session = session(&dir, "");
        let flow = session
            .guard(|s| s.read_option("> ").map(|_| Flow::Continue))
            .unwrap();
        assert_eq!(flow, Flow::Exit);
    }
}
