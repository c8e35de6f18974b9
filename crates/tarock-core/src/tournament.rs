use std::fmt;
use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::config::Config;
use crate::entry::{Entry, EntryForm};
use crate::error::{Error, Result};
use crate::ranking::{rank, save_ranking, RankRow};
use crate::storage::{EntryStore, Mapping};

/// Result of an operation that changed in-memory state and then tried to
/// write it out.
///
/// The change stands even when the write failed; `save_error` carries the
/// failure so the caller can report it.
#[derive(Debug)]
pub struct Persisted<T> {
    pub value: T,
    pub save_error: Option<Error>,
}

impl<T> Persisted<T> {
    fn new(value: T, save_error: Option<Error>) -> Self {
        Self { value, save_error }
    }

    pub fn is_saved(&self) -> bool {
        self.save_error.is_none()
    }
}

/// A file that could not be read at startup
#[derive(Debug)]
pub struct LoadWarning {
    pub path: PathBuf,
    pub error: Error,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Could not read {}: {}", self.path.display(), self.error)
    }
}

/// Tournament state owned by the front end: entries, cursor and player names.
///
/// Entries are written to disk after every submit, change and delete.
/// Navigation only moves the cursor and does not touch the file. The mapping
/// is written only by `save_mapping`.
pub struct Tournament {
    config: Config,
    store: EntryStore,
    mapping: Mapping,
}

impl Tournament {
    /// Empty tournament; nothing is read from disk
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: EntryStore::new(),
            mapping: Mapping::new(),
        }
    }

    /// Load mapping and entries from the configured files.
    ///
    /// A file that cannot be read leaves that part empty and is reported in
    /// the returned warnings instead of failing startup.
    pub fn open(config: Config) -> (Self, Vec<LoadWarning>) {
        let mut tournament = Self::new(config);
        let mut warnings = Vec::new();

        if let Err(e) = tournament.reload_mapping() {
            warnings.push(LoadWarning {
                path: tournament.config.mapping_path.clone(),
                error: e,
            });
        }

        match EntryStore::load(&tournament.config.entries_path) {
            Ok(store) => tournament.store = store,
            Err(e) => {
                warn!(
                    "Failed to load entries from {:?}: {}, starting empty",
                    tournament.config.entries_path, e
                );
                warnings.push(LoadWarning {
                    path: tournament.config.entries_path.clone(),
                    error: e,
                });
            }
        }

        (tournament, warnings)
    }

    pub fn submit(&mut self, form: &EntryForm) -> Result<Persisted<usize>> {
        let index = self.store.submit(form)?;
        debug!("Submitted entry #{}", index + 1);
        Ok(Persisted::new(index, self.persist_entries()))
    }

    pub fn change(&mut self, form: &EntryForm) -> Result<Persisted<()>> {
        self.store.change(form)?;
        debug!("Changed entry #{}", self.store.cursor() + 1);
        Ok(Persisted::new((), self.persist_entries()))
    }

    pub fn navigate_previous(&mut self) -> Result<usize> {
        self.store.navigate_previous()
    }

    pub fn navigate_next(&mut self) -> Result<usize> {
        self.store.navigate_next()
    }

    pub fn delete_current(&mut self, confirmed: bool) -> Result<Persisted<Option<Entry>>> {
        let removed = self.store.delete_current(confirmed)?;
        if removed.is_none() {
            return Ok(Persisted::new(None, None));
        }
        if self.store.is_empty() {
            info!("All entries deleted");
        }
        Ok(Persisted::new(removed, self.persist_entries()))
    }

    /// Compute the standings and write them to the ranking file.
    ///
    /// Fails only when there is nothing to rank, in which case no file is
    /// written. A failed write still returns the rows.
    pub fn rank(&self) -> Result<Persisted<Vec<RankRow>>> {
        let rows = rank(self.store.entries(), &self.mapping)?;
        let path = &self.config.ranking_path;

        let save_error = match save_ranking(path, &rows) {
            Ok(()) => {
                info!("Ranking of {} players written to {:?}", rows.len(), path);
                None
            }
            Err(e) => {
                warn!("Failed to write ranking to {:?}: {}", path, e);
                Some(e)
            }
        };

        Ok(Persisted::new(rows, save_error))
    }

    /// Re-read the mapping file. On failure the current mapping is kept.
    pub fn reload_mapping(&mut self) -> Result<()> {
        match Mapping::load(&self.config.mapping_path, self.config.mapping_slots) {
            Ok(mapping) => {
                self.mapping = mapping;
                Ok(())
            }
            Err(e) => {
                warn!(
                    "Failed to load mapping from {:?}: {}",
                    self.config.mapping_path, e
                );
                Err(e)
            }
        }
    }

    /// Write the mapping file. Returns the number of pairs written.
    pub fn save_mapping(&self) -> Result<usize> {
        self.mapping.save(&self.config.mapping_path)?;
        Ok(self.mapping.len())
    }

    pub fn set_mapping(&mut self, mapping: Mapping) {
        self.mapping = mapping;
    }

    pub fn mapping(&self) -> &Mapping {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut Mapping {
        &mut self.mapping
    }

    pub fn store(&self) -> &EntryStore {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn persist_entries(&self) -> Option<Error> {
        let path = &self.config.entries_path;
        match self.store.save(path) {
            Ok(()) => None,
            Err(e) => {
                warn!("Failed to write {:?}: {}", path, e);
                Some(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_form() -> EntryForm {
        EntryForm::new("12", 1, [("7", 10), ("3", -5), ("9", 0), ("1", 15)])
    }

    #[test]
    fn test_submit_persists() {
        let temp = TempDir::new().unwrap();
        let mut tournament = Tournament::new(Config::in_dir(temp.path()));

        let outcome = tournament.submit(&sample_form()).unwrap();
        assert!(outcome.is_saved());
        assert_eq!(outcome.value, 0);

        let content = std::fs::read_to_string(&tournament.config().entries_path).unwrap();
        assert_eq!(content.lines().nth(1), Some("12,1,7,10,3,-5,9,0,1,15"));
    }

    #[test]
    fn test_save_failure_keeps_entry() {
        let temp = TempDir::new().unwrap();
        let config = Config::in_dir(temp.path().join("missing-dir"));
        let mut tournament = Tournament::new(config);

        let outcome = tournament.submit(&sample_form()).unwrap();
        assert!(matches!(outcome.save_error, Some(Error::Io(_))));
        assert_eq!(tournament.store().len(), 1);
        assert_eq!(tournament.store().cursor(), 0);
    }

    #[test]
    fn test_navigation_does_not_write() {
        let temp = TempDir::new().unwrap();
        let mut tournament = Tournament::new(Config::in_dir(temp.path()));
        tournament.submit(&sample_form()).unwrap();
        tournament.submit(&sample_form()).unwrap();

        std::fs::remove_file(&tournament.config().entries_path).unwrap();
        tournament.navigate_previous().unwrap();
        tournament.navigate_next().unwrap();
        assert!(!tournament.config().entries_path.exists());
    }

    #[test]
    fn test_unconfirmed_delete_does_not_write() {
        let temp = TempDir::new().unwrap();
        let mut tournament = Tournament::new(Config::in_dir(temp.path()));
        tournament.submit(&sample_form()).unwrap();
        std::fs::remove_file(&tournament.config().entries_path).unwrap();

        let outcome = tournament.delete_current(false).unwrap();
        assert!(outcome.value.is_none());
        assert!(!tournament.config().entries_path.exists());
        assert_eq!(tournament.store().len(), 1);
    }

    #[test]
    fn test_rank_empty_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let tournament = Tournament::new(Config::in_dir(temp.path()));

        assert!(matches!(tournament.rank(), Err(Error::EmptyStore)));
        assert!(!tournament.config().ranking_path.exists());
    }

    #[test]
    fn test_rank_write_failure_returns_rows() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::in_dir(temp.path());
        config.ranking_path = temp.path().join("missing-dir").join("ranking.csv");
        let mut tournament = Tournament::new(config);
        tournament.submit(&sample_form()).unwrap();

        let outcome = tournament.rank().unwrap();
        assert!(outcome.save_error.is_some());
        assert_eq!(outcome.value.len(), 4);
        assert_eq!(outcome.value[0].raw_name, "1");
    }

    #[test]
    fn test_open_with_corrupt_entries_starts_empty() {
        let temp = TempDir::new().unwrap();
        let config = Config::in_dir(temp.path());
        std::fs::write(&config.entries_path, "Table,Round\n1,1,a,not-a-number").unwrap();

        let (tournament, warnings) = Tournament::open(config);
        assert!(tournament.store().is_empty());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].to_string().starts_with("Could not read"));
    }

    #[test]
    fn test_open_with_unreadable_mapping_starts_empty() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::in_dir(temp.path());
        config.mapping_path = temp.path().join("mapping-dir");
        std::fs::create_dir(&config.mapping_path).unwrap();

        let (tournament, warnings) = Tournament::open(config);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].path, tournament.config().mapping_path);
        assert!(matches!(warnings[0].error, Error::Io(_)));
        assert!(tournament.mapping().is_empty());
    }

    #[test]
    fn test_mapping_save_failure_keeps_mapping() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::in_dir(temp.path());
        config.mapping_path = temp.path().join("missing-dir").join("player_numbers.csv");
        let mut tournament = Tournament::new(config);
        tournament.set_mapping(Mapping::from_form_rows([("7", "Alice")]));

        assert!(matches!(tournament.save_mapping(), Err(Error::Io(_))));
        assert_eq!(tournament.mapping().get(7), Some("Alice"));
        assert!(!tournament.config().mapping_path.exists());
    }

    #[test]
    fn test_mapping_save_and_reload() {
        let temp = TempDir::new().unwrap();
        let mut tournament = Tournament::new(Config::in_dir(temp.path()));

        tournament.set_mapping(Mapping::from_form_rows([("7", "Alice"), ("3", "Bob")]));
        assert_eq!(tournament.save_mapping().unwrap(), 2);

        tournament.set_mapping(Mapping::new());
        tournament.reload_mapping().unwrap();
        assert_eq!(tournament.mapping().get(7), Some("Alice"));
    }
}
