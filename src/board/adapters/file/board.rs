//! Board repository storing one JSON document inside a capability-scoped
//! directory.

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use std::sync::Arc;

use crate::board::{
    domain::Board,
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};

/// Well-known storage key under which the board document lives.
pub const BOARD_STORAGE_KEY: &str = "taskflow-board";

/// Board repository backed by `<dir>/taskflow-board.json`.
///
/// Saves go through a sibling temporary file and a rename, so a crash
/// mid-write leaves the previous document intact.
#[derive(Debug, Clone)]
pub struct JsonFileBoardRepository {
    dir: Arc<Dir>,
    root: Utf8PathBuf,
}

impl JsonFileBoardRepository {
    /// Opens a repository rooted at `path`, creating the directory if
    /// needed.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the directory
    /// cannot be created or opened.
    pub fn open(path: &Utf8Path) -> BoardRepositoryResult<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())
            .map_err(BoardRepositoryError::persistence)?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())
            .map_err(BoardRepositoryError::persistence)?;
        Ok(Self {
            dir: Arc::new(dir),
            root: path.to_owned(),
        })
    }

    /// Returns the file name of the board document.
    #[must_use]
    pub fn file_name() -> String {
        format!("{BOARD_STORAGE_KEY}.json")
    }

    /// Returns the full path of the board document.
    #[must_use]
    pub fn document_path(&self) -> Utf8PathBuf {
        self.root.join(Self::file_name())
    }

    async fn run_blocking<T, F>(&self, operation: F) -> BoardRepositoryResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&Dir) -> BoardRepositoryResult<T> + Send + 'static,
    {
        let dir = Arc::clone(&self.dir);
        tokio::task::spawn_blocking(move || operation(&dir))
            .await
            .map_err(BoardRepositoryError::persistence)?
    }
}

#[async_trait]
impl BoardRepository for JsonFileBoardRepository {
    async fn load(&self) -> BoardRepositoryResult<Option<Board>> {
        self.run_blocking(|dir| {
            let contents = match dir.read_to_string(Self::file_name()) {
                Ok(contents) => contents,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
                Err(err) => return Err(BoardRepositoryError::persistence(err)),
            };
            serde_json::from_str(&contents)
                .map(Some)
                .map_err(|err| BoardRepositoryError::Malformed(err.to_string()))
        })
        .await
    }

    async fn save(&self, board: &Board) -> BoardRepositoryResult<()> {
        let document =
            serde_json::to_vec_pretty(board).map_err(BoardRepositoryError::persistence)?;
        self.run_blocking(move |dir| {
            let file_name = Self::file_name();
            let staging = format!("{file_name}.tmp");
            dir.write(&staging, &document)
                .map_err(BoardRepositoryError::persistence)?;
            dir.rename(&staging, dir, &file_name)
                .map_err(BoardRepositoryError::persistence)
        })
        .await
    }
}
