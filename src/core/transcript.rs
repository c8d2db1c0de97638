//! Save a session transcript as a standalone HTML page.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::paths;
use crate::core::session::Session;
use crate::format;

/// Page title: dataset name (when one is loaded) and session start time.
pub fn title(session: &Session) -> String {
    let started = session.started_at().format("%Y-%m-%d %H:%M UTC");
    match session.dataset() {
        Some(active) => format!("{} - {}", active.file.name, started),
        None => format!("Dataset chat - {}", started),
    }
}

/// Default location: `<transcripts dir>/transcript_<session id>.html`.
pub fn default_path(session: &Session) -> Option<PathBuf> {
    paths::transcripts_dir().map(|d| d.join(format!("transcript_{}.html", session.id())))
}

/// Render the transcript and write it to `path` (or the default location).
/// Returns the path written. An empty transcript is an error.
pub fn save(session: &Session, path: Option<&Path>) -> io::Result<PathBuf> {
    if session.transcript().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Cannot save empty transcript",
        ));
    }
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => default_path(session)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "No transcripts directory"))?,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let page = format::render_document(&title(session), session.transcript());
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, page)?;
    fs::rename(&tmp, &path)?;
    log::info!("Saved transcript to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::core::dataset::DatasetFile;
    use crate::core::message::Role;

    static TRANSCRIPT_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    struct EnvGuard(&'static str);
    impl Drop for EnvGuard {
        fn drop(&mut self) {
            unsafe {
                std::env::remove_var(self.0);
            }
        }
    }

    fn chatted_session() -> Session {
        let mut session = Session::new();
        session.attach(
            DatasetFile {
                path: PathBuf::from("sales.csv"),
                name: "sales.csv".to_string(),
                extension: "csv".to_string(),
                size: 10,
            },
            Some("f-1".to_string()),
        );
        session.push_message(Role::Assistant, "Hello!");
        session.push_message(Role::User, "Top region?");
        session.push_message(Role::Assistant, "**north** with `3`");
        session.push_message(Role::Assistant, "Query:\n```html\n<b>north</b>\n```");
        session
    }

    #[test]
    fn empty_transcript_is_rejected() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let err = save(&Session::new(), Some(&tmp.path().join("t.html"))).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn save_to_explicit_path_creates_parents() {
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let path = tmp.path().join("nested").join("chat.html");
        let session = chatted_session();

        let written = save(&session, Some(&path)).expect("save should succeed");
        assert_eq!(written, path);
        assert!(!path.with_extension("tmp").exists());

        let page = fs::read_to_string(&path).unwrap();
        assert!(page.contains("<title>sales.csv - "));
        assert!(page.contains("<strong>north</strong> with <code>3</code>"));
        assert_eq!(page.matches(r#"<div class="message "#).count(), 4);
        assert!(page.contains(
            r#"<code class="language-html">&lt;b&gt;north&lt;/b&gt;</code>"#
        ));
        assert!(!page.contains("&amp;lt;"));
    }

    #[test]
    fn save_defaults_to_transcripts_dir() {
        let _lock = TRANSCRIPT_TEST_LOCK.lock().unwrap();
        let tmp = tempfile::TempDir::new().expect("temp dir");
        let data_dir = tmp.path().join("transcripts");
        unsafe {
            std::env::set_var("TEST_DATA_DIR", &data_dir);
        }
        let _guard = EnvGuard("TEST_DATA_DIR");

        let session = chatted_session();
        let written = save(&session, None).expect("save should succeed");
        assert_eq!(
            written,
            data_dir.join(format!("transcript_{}.html", session.id()))
        );
        assert!(written.is_file());
    }

    #[test]
    fn title_without_dataset() {
        let session = Session::new();
        assert!(title(&session).starts_with("Dataset chat - "));
    }
}
