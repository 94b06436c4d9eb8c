//! Small helpers for logging and file system preparation.

use std::path::Path;
use tokio::fs;
#[cfg(any(feature = "browser", test))]
use tokio::runtime::{Handle, RuntimeFlavor};
use tracing::{debug, instrument};

/// Truncate a string for logging purposes.
///
/// Strings longer than `max` bytes are cut at the nearest character boundary
/// at or below `max`, with an ellipsis and the number of dropped bytes appended.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let mut cut = max;
    while !s.is_char_boundary(cut) {
        cut -= 1;
    }
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Create the directory that will hold `file_path`, if it has one.
#[instrument(level = "debug")]
pub async fn ensure_parent_dir(file_path: &str) -> std::io::Result<()> {
    match Path::new(file_path).parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            fs::create_dir_all(parent).await?;
            debug!(dir = %parent.display(), "Output directory ready");
            Ok(())
        }
        _ => Ok(()),
    }
}

/// Run blocking `work` from async code without stalling the worker thread.
///
/// On a multi-threaded runtime the worker hands its other tasks off first.
/// Elsewhere (a current-thread runtime, or no runtime) `work` runs inline.
#[cfg(any(feature = "browser", test))]
pub fn run_blocking<T>(work: impl FnOnce() -> T) -> T {
    match Handle::try_current() {
        Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
            tokio::task::block_in_place(work)
        }
        _ => work(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        let s = "Hello, world!";
        assert_eq!(truncate_for_log(s, 100), "Hello, world!");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.contains("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_respects_char_boundaries() {
        // "é" is two bytes; cutting at 3 would split the second one.
        let result = truncate_for_log("éééé", 3);
        assert_eq!(result, "é…(+6 bytes)");
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_creates_nested_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("a/b/report.json");
        ensure_parent_dir(file.to_str().unwrap()).await.unwrap();
        assert!(dir.path().join("a/b").is_dir());
    }

    #[tokio::test]
    async fn test_ensure_parent_dir_bare_file_name() {
        ensure_parent_dir("report.json").await.unwrap();
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 1)]
    async fn test_run_blocking_frees_the_worker() {
        let blocked = tokio::spawn(async {
            run_blocking(|| {
                let (tx, rx) = std::sync::mpsc::channel();
                tokio::spawn(async move {
                    let _ = tx.send(());
                });
                rx.recv_timeout(std::time::Duration::from_secs(5)).is_ok()
            })
        });
        assert!(blocked.await.unwrap());
    }

    #[tokio::test]
    async fn test_run_blocking_inline_on_current_thread() {
        assert_eq!(run_blocking(|| 6 * 7), 42);
    }

    #[test]
    fn test_run_blocking_without_runtime() {
        assert_eq!(run_blocking(|| "done"), "done");
    }
}
