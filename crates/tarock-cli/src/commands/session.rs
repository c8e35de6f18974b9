//! Interactive session: the tournament stays open while actions are read
//! line by line, with a draft form that submit and change read from.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use tarock_core::{
    format_card_with_position, format_ranking_console, Config, EntryForm, Error, Persisted,
    Tournament,
};

use super::open_tournament;
use crate::cli::parse_seat;

const HELP: &str = "\
Commands:
  submit [TABLE ROUND SEAT SEAT SEAT SEAT]   add a new entry (SEAT = NAME:POINTS)
  change [TABLE ROUND SEAT SEAT SEAT SEAT]   replace the current entry
  table TABLE | round ROUND | seat N SEAT    edit the form
  form                                       show the form
  clear                                      reset the form
  prev | next                                move through entries
  show | list                                show the current entry / all entries
  delete [-y]                                delete the current entry
  rank                                       compute and write the ranking
  map | map set N NAME | map remove N        show or edit player names
  map save | map load                        write or re-read the mapping file
  help | quit";

pub fn run(config: Config) -> Result<()> {
    let tournament = open_tournament(config);
    let mut session = Session::new(tournament);

    let stdin = io::stdin();
    let stdout = io::stdout();
    session.run(stdin.lock(), stdout.lock())?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session {
    tournament: Tournament,
    form: EntryForm,
}

impl Session {
    pub fn new(tournament: Tournament) -> Self {
        let form = tournament
            .store()
            .current()
            .map(EntryForm::from_entry)
            .unwrap_or_default();
        Self { tournament, form }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> io::Result<()> {
        writeln!(out, "Tarock tournament – type 'help' for commands.")?;
        self.show_current(&mut out)?;

        loop {
            write!(out, "> ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                break;
            }
            if self.execute(line.trim(), &mut input, &mut out)? == Flow::Quit {
                break;
            }
        }
        Ok(())
    }

    fn execute<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        input: &mut R,
        out: &mut W,
    ) -> io::Result<Flow> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = words.split_first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "submit" | "s" => {
                if !self.fill_form(args, out)? {
                    return Ok(Flow::Continue);
                }
                match self.tournament.submit(&self.form) {
                    Ok(outcome) => {
                        self.refresh(out)?;
                        self.report_save(outcome, out)?;
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            "change" | "c" => {
                if !self.fill_form(args, out)? {
                    return Ok(Flow::Continue);
                }
                match self.tournament.change(&self.form) {
                    Ok(outcome) => {
                        self.refresh(out)?;
                        self.report_save(outcome, out)?;
                    }
                    Err(e) => writeln!(out, "{}", e)?,
                }
            }
            "table" => match args {
                [table] => self.form.table = table.to_string(),
                _ => writeln!(out, "usage: table TABLE")?,
            },
            "round" => match args {
                [round] => match round.parse::<u32>() {
                    Ok(round) => self.form.round = round,
                    Err(_) => writeln!(out, "Round must be a positive integer.")?,
                },
                _ => writeln!(out, "usage: round ROUND")?,
            },
            "seat" => self.edit_seat(args, out)?,
            "form" => self.show_form(out)?,
            "clear" => {
                self.form = EntryForm::default();
                writeln!(out, "Form cleared.")?;
            }
            "prev" | "p" => match self.tournament.navigate_previous() {
                Ok(_) => self.refresh(out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            "next" | "n" => match self.tournament.navigate_next() {
                Ok(_) => self.refresh(out)?,
                Err(e) => writeln!(out, "{}", e)?,
            },
            "show" => self.show_current(out)?,
            "list" => self.list(out)?,
            "delete" | "d" => self.delete(args, input, out)?,
            "rank" => self.rank(out)?,
            "map" => self.map(args, out)?,
            "help" | "?" => writeln!(out, "{}", HELP)?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => writeln!(out, "Unknown command '{}', type 'help'.", other)?,
        }

        Ok(Flow::Continue)
    }

    /// Replace the form from `TABLE ROUND SEAT×4` arguments. No arguments keeps
    /// the form as it is. Returns false when the arguments were unusable.
    fn fill_form<W: Write>(&mut self, args: &[&str], out: &mut W) -> io::Result<bool> {
        let [table, round, seats @ ..] = args else {
            if args.is_empty() {
                return Ok(true);
            }
            writeln!(out, "usage: submit|change TABLE ROUND SEAT SEAT SEAT SEAT")?;
            return Ok(false);
        };
        if seats.len() != 4 {
            writeln!(out, "usage: submit|change TABLE ROUND SEAT SEAT SEAT SEAT")?;
            return Ok(false);
        }
        let Ok(round) = round.parse::<u32>() else {
            writeln!(out, "Round must be a positive integer.")?;
            return Ok(false);
        };

        let mut form = EntryForm {
            table: table.to_string(),
            round,
            ..EntryForm::default()
        };
        for (slot, seat) in form.seats.iter_mut().zip(seats) {
            match parse_seat(seat) {
                Ok(parsed) => *slot = parsed,
                Err(e) => {
                    writeln!(out, "{}", e)?;
                    return Ok(false);
                }
            }
        }

        self.form = form;
        Ok(true)
    }

    fn edit_seat<W: Write>(&mut self, args: &[&str], out: &mut W) -> io::Result<()> {
        let [number, rest @ ..] = args else {
            return writeln!(out, "usage: seat N NAME:POINTS");
        };
        let index = match number.parse::<usize>() {
            Ok(n @ 1..=4) => n - 1,
            _ => return writeln!(out, "Seat must be 1 to 4."),
        };
        match parse_seat(&rest.join(" ")) {
            Ok(seat) => self.form.seats[index] = seat,
            Err(e) => writeln!(out, "{}", e)?,
        }
        Ok(())
    }

    fn delete<R: BufRead, W: Write>(
        &mut self,
        args: &[&str],
        input: &mut R,
        out: &mut W,
    ) -> io::Result<()> {
        let Some(index) = self.tournament.store().current_index() else {
            return writeln!(out, "No entries to delete.");
        };

        let confirmed = if matches!(args, ["-y"] | ["yes"]) {
            true
        } else {
            write!(out, "Delete entry #{}? [y/N] ", index + 1)?;
            out.flush()?;
            let mut answer = String::new();
            input.read_line(&mut answer)?;
            matches!(answer.trim(), "y" | "Y" | "yes")
        };

        match self.tournament.delete_current(confirmed) {
            Ok(outcome) if outcome.value.is_none() => Ok(()),
            Ok(outcome) => {
                if self.tournament.store().is_empty() {
                    self.form = EntryForm::default();
                    writeln!(out, "All entries deleted.")?;
                } else {
                    self.refresh(out)?;
                }
                self.report_save(outcome, out)
            }
            Err(e) => writeln!(out, "{}", e),
        }
    }

    fn rank<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let outcome = match self.tournament.rank() {
            Ok(outcome) => outcome,
            Err(Error::EmptyStore) => return writeln!(out, "No entries to rank."),
            Err(e) => return writeln!(out, "{}", e),
        };

        writeln!(out, "{}", format_ranking_console(&outcome.value))?;
        let path = self.tournament.config().ranking_path.display();
        match outcome.save_error {
            None => writeln!(out, "Ranking generated – see {}.", path),
            Some(e) => writeln!(out, "Could not write {}: {}", path, e),
        }
    }

    fn map<W: Write>(&mut self, args: &[&str], out: &mut W) -> io::Result<()> {
        match args {
            [] => {
                if self.tournament.mapping().is_empty() {
                    return writeln!(out, "No player names mapped.");
                }
                for (number, name) in self.tournament.mapping().iter() {
                    writeln!(out, "{:>5}  {}", number, name)?;
                }
                Ok(())
            }
            ["set", number, name @ ..] if !name.is_empty() => {
                let Ok(number) = number.parse::<u32>() else {
                    return writeln!(out, "Player number must be an integer.");
                };
                if !self.tournament.mapping_mut().set(number, name.join(" ")) {
                    return writeln!(out, "Player number must be between 0 and 9999.");
                }
                Ok(())
            }
            ["remove", number] => {
                let removed = number
                    .parse::<u32>()
                    .ok()
                    .and_then(|n| self.tournament.mapping_mut().remove(n));
                if removed.is_none() {
                    writeln!(out, "Player number {} is not mapped.", number)?;
                }
                Ok(())
            }
            ["save"] => match self.tournament.save_mapping() {
                Ok(count) => writeln!(
                    out,
                    "Mapping saved – {} pairs written to {}",
                    count,
                    self.tournament.config().mapping_path.display()
                ),
                Err(e) => writeln!(
                    out,
                    "Could not write {}: {}",
                    self.tournament.config().mapping_path.display(),
                    e
                ),
            },
            ["load"] => match self.tournament.reload_mapping() {
                Ok(()) => writeln!(
                    out,
                    "Mapping loaded – {} pairs.",
                    self.tournament.mapping().len()
                ),
                Err(e) => writeln!(
                    out,
                    "Could not read {}: {}",
                    self.tournament.config().mapping_path.display(),
                    e
                ),
            },
            _ => writeln!(out, "usage: map [set N NAME | remove N | save | load]"),
        }
    }

    /// Load the selected entry into the form and print it
    fn refresh<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if let Some(entry) = self.tournament.store().current() {
            self.form = EntryForm::from_entry(entry);
        }
        self.show_current(out)
    }

    fn show_current<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let store = self.tournament.store();
        match (store.current(), store.current_index()) {
            (Some(entry), Some(index)) => writeln!(
                out,
                "{}",
                format_card_with_position(entry, index, store.len())
            ),
            _ => writeln!(out, "No entries stored yet."),
        }
    }

    fn list<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let entries = self.tournament.store().entries();
        if entries.is_empty() {
            return writeln!(out, "No entries stored yet.");
        }
        for (idx, entry) in entries.iter().enumerate() {
            writeln!(out, "{}\n", format_card_with_position(entry, idx, entries.len()))?;
        }
        Ok(())
    }

    fn show_form<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "Table: {}", self.form.table)?;
        writeln!(out, "Round: {}", self.form.round)?;
        for (idx, seat) in self.form.seats.iter().enumerate() {
            writeln!(out, "Seat {}: {} – Points: {}", idx + 1, seat.name, seat.points)?;
        }
        Ok(())
    }

    fn report_save<T, W: Write>(&self, outcome: Persisted<T>, out: &mut W) -> io::Result<()> {
        if let Some(e) = outcome.save_error {
            writeln!(
                out,
                "Failed to write {}: {}",
                self.tournament.config().entries_path.display(),
                e
            )?;
        }
        Ok(())
    }
}
