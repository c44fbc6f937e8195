//! The stateful side: one owned result set, navigation, and export.
//!
//! A [`Session`] is driven by a presentation shell through plain method calls. Generation builds
//! the whole batch before touching the visible state, so a failed run leaves the previous result
//! set in place. The shell must not call [`Session::generate`] re-entrantly; nothing here spawns
//! work or yields.

use crate::encoder::{encode_segment, EncodingPolicy, QrArtifact};
use crate::error::{Error, Result};
use crate::segmenter::Segment;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Label used in exported file names when the shell does not supply one.
pub const DEFAULT_LABEL: &str = "qr";

/// File extension of exported images.
pub const EXPORT_EXTENSION: &str = "png";

/// `<label>_<index + 1>_<total>.png`
pub fn file_name(label: &str, index: usize, total: usize) -> String {
    format!("{}_{}_{}.{}", label, index + 1, total, EXPORT_EXTENSION)
}

/// Where exported bytes go.
pub trait ImageSink {
    /// Called once before a batch export into `dir`.
    fn prepare_dir(&mut self, _dir: &Path) -> io::Result<()> {
        Ok(())
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()>;
}

/// Writes straight to the local filesystem, creating export directories as needed.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsSink;

impl ImageSink for FsSink {
    fn prepare_dir(&mut self, dir: &Path) -> io::Result<()> {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
        }
        Ok(())
    }

    fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
        fs::write(path, bytes)
    }
}

/// The artifacts of one successful generation run, plus a navigation cursor.
///
/// Never empty. The cursor stays within `0..len()`.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    artifacts: Vec<QrArtifact>,
    cursor: usize,
}

impl ResultSet {
    fn new(artifacts: Vec<QrArtifact>) -> Self {
        debug_assert!(!artifacts.is_empty());
        Self { artifacts, cursor: 0 }
    }

    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current(&self) -> &QrArtifact {
        &self.artifacts[self.cursor]
    }

    pub fn get(&self, index: usize) -> Option<&QrArtifact> {
        self.artifacts.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &QrArtifact> {
        self.artifacts.iter()
    }

    pub fn can_next(&self) -> bool {
        self.cursor + 1 < self.len()
    }

    pub fn can_previous(&self) -> bool {
        self.cursor > 0
    }

    /// Moves forward one artifact. Returns `false` at the last one.
    pub fn next(&mut self) -> bool {
        if self.can_next() {
            self.cursor += 1;
            true
        } else {
            false
        }
    }

    /// Moves back one artifact. Returns `false` at the first one.
    pub fn previous(&mut self) -> bool {
        if self.can_previous() {
            self.cursor -= 1;
            true
        } else {
            false
        }
    }

    /// One-based page indicator, e.g. `"2/5"`.
    pub fn position_label(&self) -> String {
        format!("{}/{}", self.cursor + 1, self.len())
    }
}

/// Outcome of a batch export that wrote every file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub directory: PathBuf,
    pub files: Vec<PathBuf>,
}

impl ExportReport {
    pub fn count(&self) -> usize {
        self.files.len()
    }
}

/// Owns the current result set and the policy used to build it.
#[derive(Debug)]
pub struct Session<S = FsSink> {
    policy: EncodingPolicy,
    results: Option<ResultSet>,
    sink: S,
}

impl Session<FsSink> {
    pub fn new(policy: EncodingPolicy) -> Self {
        Self::with_sink(policy, FsSink)
    }
}

impl Default for Session<FsSink> {
    fn default() -> Self {
        Self::new(EncodingPolicy::default())
    }
}

impl<S: ImageSink> Session<S> {
    pub fn with_sink(policy: EncodingPolicy, sink: S) -> Self {
        Self { policy, results: None, sink }
    }

    pub fn policy(&self) -> &EncodingPolicy {
        &self.policy
    }

    /// Replaces the policy used by subsequent [`Session::generate`] calls.
    pub fn set_policy(&mut self, policy: EncodingPolicy) {
        self.policy = policy;
    }

    pub fn results(&self) -> Option<&ResultSet> {
        self.results.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Segments `text`, encodes every segment, and on success replaces the current result set.
    ///
    /// `text` is encoded verbatim. Whitespace-only text counts as empty.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`], [`Error::InvalidPolicy`], or [`Error::PayloadTooLarge`] naming the
    /// first segment that did not fit. On any error the previous result set is kept unchanged.
    pub fn generate(&mut self, text: &str) -> Result<&ResultSet> {
        if text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }
        self.policy.validate()?;

        let segments = Segment::collect(text, self.policy.max_chars());
        let total = segments.len();
        let mut batch = Vec::with_capacity(total);
        for segment in segments {
            match encode_segment(segment, &self.policy) {
                Ok(artifact) => batch.push(artifact),
                Err(err) => {
                    warn!(total, error = %err, "generation rejected, keeping previous codes");
                    return Err(err);
                }
            }
        }

        info!(total, chars = text.chars().count(), "generated codes");
        Ok(self.results.insert(ResultSet::new(batch)))
    }

    /// Discards the current result set.
    pub fn clear(&mut self) {
        self.results = None;
    }

    /// See [`ResultSet::next`]. Returns `false` when nothing has been generated.
    pub fn next(&mut self) -> bool {
        self.results.as_mut().is_some_and(ResultSet::next)
    }

    /// See [`ResultSet::previous`]. Returns `false` when nothing has been generated.
    pub fn previous(&mut self) -> bool {
        self.results.as_mut().is_some_and(ResultSet::previous)
    }

    pub fn can_next(&self) -> bool {
        self.results.as_ref().is_some_and(ResultSet::can_next)
    }

    pub fn can_previous(&self) -> bool {
        self.results.as_ref().is_some_and(ResultSet::can_previous)
    }

    /// Page indicator for the shell, `"0/0"` when nothing has been generated.
    pub fn position_label(&self) -> String {
        self.results
            .as_ref()
            .map_or_else(|| "0/0".to_owned(), ResultSet::position_label)
    }

    /// Suggested file name for the artifact under the cursor.
    pub fn default_file_name(&self, label: &str) -> Option<String> {
        self.results
            .as_ref()
            .map(|set| file_name(label, set.cursor(), set.len()))
    }

    /// Writes the unscaled image of the artifact under the cursor to `path`.
    pub fn export_current(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let index = self.results.as_ref().ok_or(Error::NothingToExport)?.cursor();
        self.export_at(index, path)
    }

    /// Writes the unscaled image of the artifact at `index` to `path`.
    pub fn export_at(&mut self, index: usize, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let set = self.results.as_ref().ok_or(Error::NothingToExport)?;
        let artifact = set
            .get(index)
            .ok_or(Error::IndexOutOfRange { index, len: set.len() })?;

        let bytes = artifact.png_bytes()?;
        self.sink.write(path, &bytes).map_err(|source| {
            warn!(index, path = %path.display(), error = %source, "export failed");
            Error::ExportIo { path: path.to_path_buf(), source }
        })?;

        info!(index, path = %path.display(), "exported code");
        Ok(())
    }

    /// Writes every artifact into `dir` as `<label>_<n>_<total>.png`, in order.
    ///
    /// Stops at the first file that cannot be written. Files already written stay on disk and
    /// later files are not attempted; the error carries how many succeeded.
    pub fn export_all(&mut self, dir: impl AsRef<Path>, label: &str) -> Result<ExportReport> {
        let dir = dir.as_ref();
        let set = self.results.as_ref().ok_or(Error::NothingToExport)?;
        let total = set.len();

        self.sink.prepare_dir(dir).map_err(|source| Error::ExportIo {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = Vec::with_capacity(total);
        for (index, artifact) in set.iter().enumerate() {
            let path = dir.join(file_name(label, index, total));
            let written = artifact
                .png_bytes()
                .map_err(io::Error::other)
                .and_then(|bytes| self.sink.write(&path, &bytes));
            if let Err(source) = written {
                warn!(
                    written = files.len(),
                    total,
                    path = %path.display(),
                    error = %source,
                    "batch export stopped"
                );
                return Err(Error::PartialExport { written: files.len(), total, path, source });
            }
            files.push(path);
        }

        info!(count = files.len(), dir = %dir.display(), "exported all codes");
        Ok(ExportReport { directory: dir.to_path_buf(), files })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Keeps written files in memory, failing the write with the given 1-based number.
    #[derive(Default)]
    struct MemorySink {
        files: HashMap<PathBuf, Vec<u8>>,
        writes: usize,
        fail_on: Option<usize>,
    }

    impl ImageSink for MemorySink {
        fn write(&mut self, path: &Path, bytes: &[u8]) -> io::Result<()> {
            self.writes += 1;
            if self.fail_on == Some(self.writes) {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.files.insert(path.to_path_buf(), bytes.to_vec());
            Ok(())
        }
    }

    fn session(max_chars: usize, fail_on: Option<usize>) -> Session<MemorySink> {
        let policy = EncodingPolicy::new(max_chars).with_module_scale(2).with_preview_side(64);
        Session::with_sink(policy, MemorySink { fail_on, ..Default::default() })
    }

    #[test]
    fn test_file_name_scheme() {
        assert_eq!(file_name("qr", 0, 3), "qr_1_3.png");
        assert_eq!(file_name("notes", 11, 12), "notes_12_12.png");
    }

    #[test]
    fn test_generate_numbers_artifacts() {
        let mut session = session(800, None);
        let set = session.generate(&"x".repeat(2000)).unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(set.cursor(), 0);
        let lens: Vec<usize> = set.iter().map(|a| a.segment().char_count()).collect();
        assert_eq!(lens, vec![800, 800, 400]);
        for (i, artifact) in set.iter().enumerate() {
            assert_eq!(artifact.segment().index(), i);
            assert_eq!(artifact.segment().total(), 3);
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        let mut session = session(800, None);
        assert!(matches!(session.generate(""), Err(Error::EmptyInput)));
        assert!(matches!(session.generate(" \n\t "), Err(Error::EmptyInput)));
        assert!(session.results().is_none());
    }

    #[test]
    fn test_failed_generation_keeps_previous_results() {
        let mut session = session(3000, None);
        session.generate("first batch").unwrap();
        session.next();
        let before = session.results().cloned();

        // Second segment is too big for any symbol
        let text = format!("{} {}", "a".repeat(10), "b".repeat(3000));
        match session.generate(&text) {
            Err(Error::PayloadTooLarge { index, total, .. }) => assert_eq!((index, total), (1, 2)),
            other => panic!("unexpected result: {:?}", other.map(|s| s.len())),
        }
        assert_eq!(session.results().cloned(), before);
    }

    #[test]
    fn test_invalid_policy_keeps_previous_results() {
        let mut session = session(10, None);
        session.generate("still here").unwrap();
        session.set_policy(EncodingPolicy::new(0));
        assert!(matches!(session.generate("replacement"), Err(Error::InvalidPolicy(_))));
        assert_eq!(session.results().unwrap().current().segment().text(), "still here");
    }

    #[test]
    fn test_regenerate_replaces_and_resets_cursor() {
        let mut session = session(5, None);
        session.generate("aaaaabbbbbccccc").unwrap();
        assert!(session.next());
        assert!(session.next());
        session.generate("zz").unwrap();
        let set = session.results().unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.cursor(), 0);
        assert_eq!(set.current().segment().text(), "zz");
    }

    #[test]
    fn test_navigation_clamps() {
        let mut session = session(5, None);
        assert!(!session.next());
        assert!(!session.previous());
        assert_eq!(session.position_label(), "0/0");

        session.generate("aaaaabbbbbccccc").unwrap();
        assert!(!session.previous());
        assert_eq!(session.position_label(), "1/3");
        assert!(session.next());
        assert!(session.next());
        assert!(!session.next());
        assert_eq!(session.position_label(), "3/3");
        assert_eq!(session.results().unwrap().current().segment().text(), "ccccc");
        assert!(session.previous());
        assert_eq!(session.position_label(), "2/3");
    }

    #[test]
    fn test_session_reports_navigation_bounds() {
        let mut session = session(5, None);
        assert!(!session.can_next());
        assert!(!session.can_previous());

        session.generate("aaaaabbbbb").unwrap();
        assert!(session.can_next());
        assert!(!session.can_previous());
        session.next();
        assert!(!session.can_next());
        assert!(session.can_previous());

        session.clear();
        assert!(!session.can_next());
        assert!(!session.can_previous());
    }

    #[test]
    fn test_navigation_does_not_reencode() {
        let mut session = session(5, None);
        session.generate("aaaaabbbbb").unwrap();
        let first = session.results().unwrap().current().clone();
        session.next();
        session.previous();
        assert_eq!(session.results().unwrap().current(), &first);
    }

    #[test]
    fn test_clear() {
        let mut session = session(5, None);
        session.generate("abc").unwrap();
        session.clear();
        assert!(session.results().is_none());
        assert!(matches!(session.export_current("a.png"), Err(Error::NothingToExport)));
        assert!(matches!(session.export_all("out", "qr"), Err(Error::NothingToExport)));
    }

    #[test]
    fn test_export_current_writes_original() {
        let mut session = session(5, None);
        session.generate("aaaaabbbbb").unwrap();
        session.next();
        let name = session.default_file_name(DEFAULT_LABEL).unwrap();
        assert_eq!(name, "qr_2_2.png");
        session.export_current(&name).unwrap();

        let bytes = &session.sink().files[Path::new("qr_2_2.png")];
        let decoded = image::load_from_memory(bytes).unwrap().to_luma8();
        assert_eq!(&decoded, session.results().unwrap().current().original());
    }

    #[test]
    fn test_export_at_out_of_range() {
        let mut session = session(5, None);
        session.generate("abc").unwrap();
        assert!(matches!(
            session.export_at(4, "x.png"),
            Err(Error::IndexOutOfRange { index: 4, len: 1 })
        ));
    }

    #[test]
    fn test_export_single_failure() {
        let mut session = session(5, Some(1));
        session.generate("abc").unwrap();
        match session.export_current("denied.png") {
            Err(Error::ExportIo { path, source }) => {
                assert_eq!(path, PathBuf::from("denied.png"));
                assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_export_all() {
        let mut session = session(5, None);
        session.generate("aaaaabbbbbccccc").unwrap();
        let report = session.export_all("out", "page").unwrap();
        assert_eq!(report.count(), 3);
        assert_eq!(report.files[2], Path::new("out").join("page_3_3.png"));
        assert_eq!(session.sink().files.len(), 3);
    }

    #[test]
    fn test_export_all_stops_at_first_failure() {
        let mut session = session(5, Some(2));
        session.generate("aaaaabbbbbccccc").unwrap();
        match session.export_all("out", "qr") {
            Err(Error::PartialExport { written, total, path, .. }) => {
                assert_eq!((written, total), (1, 3));
                assert_eq!(path, Path::new("out").join("qr_2_3.png"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        let sink = session.sink();
        assert_eq!(sink.writes, 2);
        assert!(sink.files.contains_key(&Path::new("out").join("qr_1_3.png")));
        assert!(!sink.files.contains_key(&Path::new("out").join("qr_3_3.png")));
    }
}
