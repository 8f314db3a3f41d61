//! Interactive menu over a roster
//!
//! The shell reads one line per prompt and never gives up on bad data: parse
//! and file errors are printed and the menu comes back. Only a failure of the
//! terminal streams themselves ends [`Shell::run`] with an error. End of input
//! ends the session normally.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::decoder::{Decoder, MalformedPolicy};
use crate::encoder::Encoder;
use crate::error::CodecError;
use crate::prisoner::{Prisoner, DATE_FORMAT};
use crate::roster::{merge_unique, Roster};
use crate::search::{Custody, Query};
use crate::snapshot;

/// ANSI "cursor home, erase screen"
const CLEAR_SEQUENCE: &str = "\x1b[H\x1b[2J";

const BACK_TO_MENU: &str = "Press Enter to return to menu...";
const CONTINUE: &str = "Press Enter to continue...";

/// Shell settings
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Readable save file
    pub text_path: PathBuf,
    /// Binary snapshot file
    pub snapshot_path: PathBuf,
    /// Emit the clear-screen sequence before each screen
    pub clear_screen: bool,
    /// How the text import treats malformed blocks
    pub policy: MalformedPolicy,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            text_path: PathBuf::from("prisoners.txt"),
            snapshot_path: PathBuf::from("prisoners.dat"),
            clear_screen: true,
            policy: MalformedPolicy::Abort,
        }
    }
}

/// Why a prompt did not produce a value
#[derive(Debug, thiserror::Error)]
enum PromptError {
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("end of input")]
    Eof,
    #[error("{0}")]
    Invalid(String),
}

/// Menu-driven session owning a roster and a pair of streams
pub struct Shell<R, W> {
    roster: Roster,
    config: ShellConfig,
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(roster: Roster, config: ShellConfig, input: R, output: W) -> Self {
        Self {
            roster,
            config,
            input,
            output,
        }
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn into_roster(self) -> Roster {
        self.roster
    }

    /// Run the main menu until `x` or end of input
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.clear()?;
            writeln!(self.output, "--- MENU ---")?;
            writeln!(self.output, "1 - Show prisoners")?;
            writeln!(self.output, "2 - Add prisoner")?;
            writeln!(self.output, "3 - Remove prisoner")?;
            writeln!(self.output, "4 - Search prisoners")?;
            writeln!(self.output, "5 - Clear ALL prisoners")?;
            writeln!(self.output, "6 - Load from file")?;
            writeln!(self.output, "7 - Save to file")?;
            writeln!(self.output, "8 - Import from text file")?;
            writeln!(self.output, "x - Exit")?;

            let Some(choice) = self.prompt("Choice: ")? else {
                writeln!(self.output, "Exiting...")?;
                return Ok(());
            };

            match choice.trim() {
                "1" => self.show_all()?,
                "2" => self.add_prisoner()?,
                "3" => self.remove_prisoner()?,
                "4" => self.search_menu()?,
                "5" => self.clear_all()?,
                "6" => self.load_snapshot()?,
                "7" => self.save_all()?,
                "8" => self.import_text()?,
                "x" | "X" => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    self.pause(CONTINUE)?;
                }
            }
        }
    }

    fn show_all(&mut self) -> io::Result<()> {
        self.clear()?;
        if self.roster.is_empty() {
            writeln!(self.output, "No prisoners in list.")?;
        } else {
            writeln!(self.output, "Prisoners:")?;
            for (idx, prisoner) in self.roster.iter().enumerate() {
                writeln!(self.output, "=== Prisoner #{} ===", idx + 1)?;
                writeln!(self.output, "{}\n", prisoner)?;
            }
        }
        self.pause(BACK_TO_MENU)
    }

    fn add_prisoner(&mut self) -> io::Result<()> {
        self.clear()?;
        match self.read_prisoner() {
            Ok(prisoner) => {
                log::info!("Added '{}'", prisoner.full_name());
                self.roster.add(prisoner);
                writeln!(self.output, "Prisoner added!")?;
            }
            Err(PromptError::Invalid(msg)) => writeln!(self.output, "Invalid input: {}", msg)?,
            Err(PromptError::Eof) => return Ok(()),
            Err(PromptError::Io(e)) => return Err(e),
        }
        self.pause(BACK_TO_MENU)
    }

    fn read_prisoner(&mut self) -> Result<Prisoner, PromptError> {
        let name = self.ask("Full Name: ")?;
        let birth = self.ask_date("Birth Date (yyyy-mm-dd): ")?;
        let height: u32 = self.ask_number("Height: ")?;
        let eyes = self.ask("Eye Color: ")?;

        writeln!(self.output, "Features (empty to finish):")?;
        let mut features = Vec::new();
        loop {
            let feature = self.read_line()?.ok_or(PromptError::Eof)?;
            if feature.trim().is_empty() {
                break;
            }
            // The text channel separates tags with commas
            if feature.contains(',') {
                writeln!(self.output, "Features cannot contain ','. Enter it again:")?;
                continue;
            }
            features.push(feature);
        }

        let imprisoned = self.ask_date("Imprisonment Date (yyyy-mm-dd): ")?;
        let release = self.ask("Release Date (yyyy-mm-dd or empty): ")?;
        let released = if release.trim().is_empty() {
            None
        } else {
            Some(parse_date(&release)?)
        };

        Ok(Prisoner::new(name, birth, height, eyes, features, imprisoned, released))
    }

    fn remove_prisoner(&mut self) -> io::Result<()> {
        self.clear()?;
        if self.roster.is_empty() {
            writeln!(self.output, "No prisoners to remove.")?;
            return self.pause(BACK_TO_MENU);
        }

        writeln!(self.output, "Current prisoners:")?;
        for (idx, prisoner) in self.roster.iter().enumerate() {
            writeln!(self.output, "[{}] {}", idx + 1, prisoner.full_name())?;
        }

        let Some(answer) = self.prompt("Enter prisoner number to remove: ")? else {
            return Ok(());
        };

        match answer.trim().parse::<usize>() {
            Ok(number) if number >= 1 && number <= self.roster.len() => {
                let index = number - 1;
                let name = match self.roster.get(index) {
                    Ok(prisoner) => prisoner.full_name().to_string(),
                    Err(e) => {
                        writeln!(self.output, "Error: {}", e)?;
                        return self.pause(BACK_TO_MENU);
                    }
                };
                if self.roster.remove_at(index) {
                    log::info!("Removed '{}'", name);
                    writeln!(self.output, "Prisoner '{}' removed!", name)?;
                } else {
                    writeln!(self.output, "Error removing prisoner.")?;
                }
            }
            Ok(_) => writeln!(self.output, "Invalid prisoner number.")?,
            Err(_) => writeln!(self.output, "Please enter a valid number.")?,
        }
        self.pause(BACK_TO_MENU)
    }

    fn search_menu(&mut self) -> io::Result<()> {
        loop {
            self.clear()?;
            writeln!(self.output, "--- SEARCH MENU ---")?;
            writeln!(self.output, "1 - Search by exact name")?;
            writeln!(self.output, "2 - Search by exact eye color")?;
            writeln!(self.output, "3 - Search by birth year")?;
            writeln!(self.output, "4 - Search by height")?;
            writeln!(self.output, "5 - Search by feature")?;
            writeln!(self.output, "6 - Search by status")?;
            writeln!(self.output, "0 - Back to main menu")?;

            let Some(choice) = self.prompt("Choice: ")? else {
                return Ok(());
            };

            self.clear()?;
            let outcome = match choice.trim() {
                "0" => return Ok(()),
                "1" => self.search_name(),
                "2" => self.search_eye_color(),
                "3" => self.search_birth_year(),
                "4" => self.search_height(),
                "5" => self.search_feature(),
                "6" => self.search_status(),
                _ => {
                    writeln!(self.output, "Invalid choice.")?;
                    Ok(())
                }
            };

            match outcome {
                Ok(()) => {}
                Err(PromptError::Invalid(msg)) => writeln!(self.output, "{}", msg)?,
                Err(PromptError::Eof) => return Ok(()),
                Err(PromptError::Io(e)) => return Err(e),
            }
            self.pause(CONTINUE)?;
        }
    }

    fn search_name(&mut self) -> Result<(), PromptError> {
        let name = self.ask("Enter exact name to search: ")?;
        let query = Query::Name(name.clone());
        let found = self.roster.iter().find(|p| query.matches(p)).cloned();
        match found {
            Some(prisoner) => {
                writeln!(self.output, "=== FOUND PRISONER ===")?;
                writeln!(self.output, "{}\n", prisoner)?;
            }
            None => writeln!(self.output, "Prisoner with exact name '{}' not found.", name)?,
        }
        Ok(())
    }

    fn search_eye_color(&mut self) -> Result<(), PromptError> {
        let color = self.ask("Enter exact eye color: ")?;
        writeln!(self.output, "Prisoners with eye color '{}':", color)?;
        let found = Query::EyeColor(color.clone()).run(&self.roster);
        self.print_matches(&found, &format!("No prisoners with eye color '{}' found.", color))?;
        Ok(())
    }

    fn search_birth_year(&mut self) -> Result<(), PromptError> {
        let year: i32 = self
            .ask_number("Enter birth year: ")
            .map_err(|e| invalid_as(e, "Please enter a valid year."))?;
        writeln!(self.output, "Prisoners born in {}:", year)?;
        let found = Query::BirthYear(year).run(&self.roster);
        self.print_matches(&found, &format!("No prisoners born in {} found.", year))?;
        Ok(())
    }

    fn search_height(&mut self) -> Result<(), PromptError> {
        let height: u32 = self
            .ask_number("Enter exact height: ")
            .map_err(|e| invalid_as(e, "Please enter a valid height."))?;
        writeln!(self.output, "Prisoners with height {}cm:", height)?;
        let found = Query::HeightCm(height).run(&self.roster);
        self.print_matches(&found, &format!("No prisoners with height {}cm found.", height))?;
        Ok(())
    }

    fn search_feature(&mut self) -> Result<(), PromptError> {
        let feature = self.ask("Enter exact feature: ")?;
        writeln!(self.output, "Prisoners with feature '{}':", feature)?;
        let found = Query::Feature(feature.clone()).run(&self.roster);
        self.print_matches(&found, &format!("No prisoners with feature '{}' found.", feature))?;
        Ok(())
    }

    fn search_status(&mut self) -> Result<(), PromptError> {
        writeln!(self.output, "Search by status:")?;
        writeln!(self.output, "1 - Currently imprisoned")?;
        writeln!(self.output, "2 - Released")?;
        let choice = self.ask("Choice: ")?;

        let (status, heading, empty) = match choice.trim() {
            "1" => (
                Custody::Imprisoned,
                "Currently imprisoned prisoners:",
                "No currently imprisoned prisoners.",
            ),
            "2" => (Custody::Released, "Released prisoners:", "No released prisoners."),
            _ => return Err(PromptError::Invalid("Invalid choice.".into())),
        };

        writeln!(self.output, "{}", heading)?;
        let found = Query::Status(status).run(&self.roster);
        self.print_matches(&found, empty)?;
        Ok(())
    }

    fn print_matches(&mut self, found: &Roster, empty: &str) -> io::Result<()> {
        if found.is_empty() {
            return writeln!(self.output, "{}", empty);
        }
        for prisoner in found {
            writeln!(self.output, "=== Prisoner ===")?;
            writeln!(self.output, "{}\n", prisoner)?;
        }
        Ok(())
    }

    fn clear_all(&mut self) -> io::Result<()> {
        self.clear()?;
        let Some(confirm) = self.prompt("Are you sure you want to clear ALL prisoners? (y/n): ")? else {
            return Ok(());
        };
        if confirm.trim().eq_ignore_ascii_case("y") {
            self.roster.clear();
            log::info!("Roster cleared");
            writeln!(self.output, "All prisoners cleared!")?;
        } else {
            writeln!(self.output, "Operation cancelled.")?;
        }
        self.pause(BACK_TO_MENU)
    }

    fn load_snapshot(&mut self) -> io::Result<()> {
        self.clear()?;
        let path = self.config.snapshot_path.clone();
        if !path.exists() {
            writeln!(self.output, "File not found. Save prisoners first to create the file.")?;
            return self.pause(BACK_TO_MENU);
        }

        match snapshot::read::<Prisoner>(&path) {
            Ok(loaded) => self.report_merge(loaded)?,
            Err(e) => self.report_load_error(&e)?,
        }
        self.pause(BACK_TO_MENU)
    }

    fn import_text(&mut self) -> io::Result<()> {
        self.clear()?;
        let path = self.config.text_path.clone();
        if !path.exists() {
            writeln!(self.output, "File not found: {}", path.display())?;
            return self.pause(BACK_TO_MENU);
        }

        match Decoder::new().with_policy(self.config.policy).decode_file(&path) {
            Ok(loaded) => self.report_merge(loaded)?,
            Err(e) => self.report_load_error(&e)?,
        }
        self.pause(BACK_TO_MENU)
    }

    fn report_load_error(&mut self, err: &CodecError) -> io::Result<()> {
        writeln!(self.output, "Error loading from file: {}", err)?;
        if err.is_corruption() {
            writeln!(self.output, "The file is damaged. Nothing was loaded.")?;
        }
        Ok(())
    }

    fn report_merge(&mut self, loaded: Roster) -> io::Result<()> {
        let added = merge_unique(&mut self.roster, loaded);
        writeln!(self.output, "Added {} new prisoners from file", added)?;
        writeln!(self.output, "Total prisoners now: {}", self.roster.len())
    }

    fn save_all(&mut self) -> io::Result<()> {
        self.clear()?;
        let snapshot_path = self.config.snapshot_path.clone();
        let text_path = self.config.text_path.clone();

        let snapshot_result = snapshot::write(&self.roster, &snapshot_path);
        let text_result = Encoder::new().encode_to_file(&self.roster, &text_path);

        match (&snapshot_result, &text_result) {
            (Ok(()), Ok(())) => {
                writeln!(self.output, "Saved {} prisoners to both files:", self.roster.len())?;
                writeln!(self.output, "- {} (objects)", snapshot_path.display())?;
                writeln!(self.output, "- {} (text)", text_path.display())?;
            }
            _ => {
                if let Err(e) = &snapshot_result {
                    writeln!(self.output, "Error saving {}: {}", snapshot_path.display(), e)?;
                }
                if let Err(e) = &text_result {
                    writeln!(self.output, "Error saving {}: {}", text_path.display(), e)?;
                }
            }
        }
        self.pause(BACK_TO_MENU)
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.config.clear_screen {
            write!(self.output, "{}", CLEAR_SEQUENCE)?;
            self.output.flush()?;
        }
        Ok(())
    }

    fn pause(&mut self, message: &str) -> io::Result<()> {
        self.prompt(message).map(|_| ())
    }

    /// Print `text` without a newline and read the answer
    fn prompt(&mut self, text: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush()?;
        self.read_line()
    }

    /// One line without its terminator; `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn ask(&mut self, text: &str) -> Result<String, PromptError> {
        self.prompt(text)?.ok_or(PromptError::Eof)
    }

    fn ask_date(&mut self, text: &str) -> Result<NaiveDate, PromptError> {
        let answer = self.ask(text)?;
        parse_date(&answer)
    }

    fn ask_number<T: FromStr>(&mut self, text: &str) -> Result<T, PromptError> {
        let answer = self.ask(text)?;
        answer
            .trim()
            .parse()
            .map_err(|_| PromptError::Invalid(format!("'{}' is not a valid number", answer.trim())))
    }
}

fn parse_date(text: &str) -> Result<NaiveDate, PromptError> {
    NaiveDate::parse_from_str(text.trim(), DATE_FORMAT)
        .map_err(|_| PromptError::Invalid(format!("'{}' is not a date (expected yyyy-mm-dd)", text.trim())))
}

/// Replace the message of an invalid-input error, keep other errors
fn invalid_as(err: PromptError, message: &str) -> PromptError {
    match err {
        PromptError::Invalid(_) => PromptError::Invalid(message.to_string()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roster::sample_roster;
    use std::io::Cursor;
    use std::path::Path;

    fn config_in(dir: &Path) -> ShellConfig {
        ShellConfig {
            text_path: dir.join("prisoners.txt"),
            snapshot_path: dir.join("prisoners.dat"),
            clear_screen: false,
            policy: MalformedPolicy::Abort,
        }
    }

    /// Run a scripted session, return the final roster and everything printed
    fn run_script(roster: Roster, config: ShellConfig, script: &str) -> (Roster, String) {
        let mut output = Vec::new();
        let mut shell = Shell::new(roster, config, Cursor::new(script.as_bytes().to_vec()), &mut output);
        shell.run().unwrap();
        let roster = shell.into_roster();
        (roster, String::from_utf8(output).unwrap())
    }

    fn run_default(script: &str) -> (Roster, String) {
        let dir = tempfile::tempdir().unwrap();
        run_script(sample_roster(), config_in(dir.path()), script)
    }

    #[test]
    fn test_exit_and_end_of_input() {
        let (roster, out) = run_default("x\n");
        assert_eq!(roster.len(), 2);
        assert!(out.contains("--- MENU ---"));
        assert!(out.ends_with("Exiting...\n"));

        let (_, out) = run_default("");
        assert!(out.ends_with("Exiting...\n"));
    }

    #[test]
    fn test_show_prisoners() {
        let (_, out) = run_default("1\n\nx\n");
        assert!(out.contains("=== Prisoner #1 ===\nName: Ivan Petrenko\n"));
        assert!(out.contains("=== Prisoner #2 ===\nName: Olena Koval\n"));
        assert!(out.contains("Released: N/A"));
    }

    #[test]
    fn test_show_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (_, out) = run_script(Roster::new(), config_in(dir.path()), "1\n\nx\n");
        assert!(out.contains("No prisoners in list."));
    }

    #[test]
    fn test_add_prisoner() {
        let script = "2\nNew Guy\n1985-03-04\n175\nblue\nscar\ntattoo\n\n2010-01-01\n\n\nx\n";
        let (roster, out) = run_default(script);

        assert!(out.contains("Prisoner added!"));
        assert_eq!(roster.len(), 3);
        let added = roster.get(2).unwrap();
        assert_eq!(added.full_name(), "New Guy");
        assert_eq!(added.height_cm(), 175);
        assert_eq!(added.features(), ["scar", "tattoo"]);
        assert!(added.is_in_custody());
    }

    #[test]
    fn test_add_rejects_features_with_commas() {
        let script = "2\nA\n1985-03-04\n175\nblue\nscar, left\nscar left\n\n2010-01-01\n\n\nx\n";
        let (roster, out) = run_default(script);

        assert!(out.contains("Features cannot contain ','"));
        assert_eq!(roster.get(2).unwrap().features(), ["scar left"]);
    }

    #[test]
    fn test_padded_name_survives_save_and_import() {
        let dir = tempfile::tempdir().unwrap();
        let script = "2\n New Guy \n1985-03-04\n175\n blue \n tattoo \n\n2010-01-01\n\n\n7\n\n8\n\nx\n";
        let (roster, out) = run_script(sample_roster(), config_in(dir.path()), script);

        assert!(out.contains("Added 0 new prisoners from file"));
        assert_eq!(roster.len(), 3);
        let added = roster.get(2).unwrap();
        assert_eq!(added.full_name(), "New Guy");
        assert_eq!(added.eye_color(), "blue");
        assert_eq!(added.features(), ["tattoo"]);
    }

    #[test]
    fn test_add_prisoner_with_release_date() {
        let script = "2\nA\n1985-03-04\n175\nblue\n\n2010-01-01\n2012-02-02\n\nx\n";
        let (roster, _) = run_default(script);
        assert_eq!(
            roster.get(2).unwrap().released(),
            NaiveDate::from_ymd_opt(2012, 2, 2)
        );
    }

    #[test]
    fn test_add_with_bad_date_is_aborted() {
        let (roster, out) = run_default("2\nBad\nnot-a-date\n\nx\n");
        assert_eq!(roster.len(), 2);
        assert!(out.contains("Invalid input: 'not-a-date' is not a date"));
    }

    #[test]
    fn test_add_with_bad_height_is_aborted() {
        let (roster, out) = run_default("2\nBad\n1990-01-01\ntall\n\nx\n");
        assert_eq!(roster.len(), 2);
        assert!(out.contains("Invalid input: 'tall' is not a valid number"));
    }

    #[test]
    fn test_remove_by_number() {
        let (roster, out) = run_default("3\n1\n\nx\n");
        assert!(out.contains("[1] Ivan Petrenko\n[2] Olena Koval\n"));
        assert!(out.contains("Prisoner 'Ivan Petrenko' removed!"));
        assert_eq!(roster.len(), 1);
        assert_eq!(roster.get(0).unwrap().full_name(), "Olena Koval");
    }

    #[test]
    fn test_remove_rejects_bad_numbers() {
        let (roster, out) = run_default("3\n9\n\n3\n0\n\n3\nabc\n\nx\n");
        assert_eq!(roster.len(), 2);
        assert_eq!(out.matches("Invalid prisoner number.").count(), 2);
        assert!(out.contains("Please enter a valid number."));
    }

    #[test]
    fn test_remove_from_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (_, out) = run_script(Roster::new(), config_in(dir.path()), "3\n\nx\n");
        assert!(out.contains("No prisoners to remove."));
    }

    #[test]
    fn test_search_menu() {
        let script = "4\n1\nOlena Koval\n\n2\nGRAY\n\n3\n1990\n\n3\nsoon\n\n4\n200\n\n5\nscar on left cheek\n\n6\n1\n\n6\n2\n\n0\nx\n";
        let (roster, out) = run_default(script);

        assert_eq!(roster.len(), 2);
        assert!(out.contains("=== FOUND PRISONER ===\nName: Olena Koval"));
        assert!(out.contains("Prisoners with eye color 'GRAY':\n=== Prisoner ===\nName: Olena Koval"));
        assert!(out.contains("Prisoners born in 1990:\n=== Prisoner ===\nName: Ivan Petrenko"));
        assert!(out.contains("Please enter a valid year."));
        assert!(out.contains("No prisoners with height 200cm found."));
        assert!(out.contains("Prisoners with feature 'scar on left cheek':\n=== Prisoner ===\nName: Ivan Petrenko"));
        assert!(out.contains("Currently imprisoned prisoners:\n=== Prisoner ===\nName: Olena Koval"));
        assert!(out.contains("Released prisoners:\n=== Prisoner ===\nName: Ivan Petrenko"));
    }

    #[test]
    fn test_search_name_not_found() {
        let (_, out) = run_default("4\n1\nivan petrenko\n\n0\nx\n");
        assert!(out.contains("Prisoner with exact name 'ivan petrenko' not found."));
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let (roster, out) = run_default("5\nn\n\nx\n");
        assert_eq!(roster.len(), 2);
        assert!(out.contains("Operation cancelled."));

        let (roster, out) = run_default("5\nY\n\nx\n");
        assert!(roster.is_empty());
        assert!(out.contains("All prisoners cleared!"));
    }

    #[test]
    fn test_save_clear_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        let (roster, out) = run_script(sample_roster(), config.clone(), "7\n\n5\ny\n\n6\n\n6\n\nx\n");

        assert!(out.contains("Saved 2 prisoners to both files:"));
        assert!(out.contains("Added 2 new prisoners from file"));
        assert!(out.contains("Added 0 new prisoners from file"));
        assert_eq!(roster, sample_roster());
        assert!(config.text_path.exists());
        assert!(config.snapshot_path.exists());
    }

    #[test]
    fn test_import_text_merges_new_records() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(
            &config.text_path,
            "Name: Olena Koval\nBirth: 1992-08-20\nImprisoned: 2021-03-15\n\n\
             Name: Petro Shevchenko\nBirth: 1970-11-11\nHeight: 170cm\nImprisoned: 2000-01-01\nReleased: N/A\n",
        )
        .unwrap();

        let (roster, out) = run_script(sample_roster(), config, "8\n\nx\n");

        assert!(out.contains("Added 1 new prisoners from file"));
        assert!(out.contains("Total prisoners now: 3"));
        assert_eq!(roster.get(2).unwrap().full_name(), "Petro Shevchenko");
    }

    #[test]
    fn test_import_malformed_text_reports_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.text_path, "Name: A\nBirth: yesterday\n").unwrap();

        let (roster, out) = run_script(sample_roster(), config, "8\n\nx\n");

        assert!(out.contains("Error loading from file: line 2: invalid date for Birth: 'yesterday'"));
        assert!(out.contains("The file is damaged. Nothing was loaded."));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_load_missing_files() {
        let (_, out) = run_default("6\n\n8\n\nx\n");
        assert!(out.contains("File not found. Save prisoners first to create the file."));
        assert!(out.contains("File not found: "));
    }

    #[test]
    fn test_load_corrupt_snapshot_keeps_roster() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.snapshot_path, b"junk").unwrap();

        let (roster, out) = run_script(sample_roster(), config, "6\n\nx\n");

        assert!(out.contains("Error loading from file: invalid snapshot format"));
        assert!(out.contains("The file is damaged. Nothing was loaded."));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_invalid_choice() {
        let (_, out) = run_default("9\n\nx\n");
        assert!(out.contains("Invalid choice."));
    }

    #[test]
    fn test_clear_sequence_is_emitted_when_enabled() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(dir.path());
        config.clear_screen = true;
        let (_, out) = run_script(Roster::new(), config, "x\n");
        assert!(out.starts_with(CLEAR_SEQUENCE));
    }
}
