//! Terminal output: `log!` lines with a colored module tag, and a single
//! progress line while pages render.
//!
//! ```text
//! [build] rendering 12 pages (3 drafts skipped)
//! [pages] [██████████░░░░░░░░░░] 6/12
//! ```

use colored::{ColoredString, Colorize};
use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType, size},
};
use parking_lot::Mutex;
use std::{
    io::{Write, stdout},
    sync::{
        OnceLock,
        atomic::{AtomicBool, AtomicUsize, Ordering},
    },
};

const FALLBACK_WIDTH: usize = 100;
const MIN_BAR: usize = 10;
const MAX_BAR: usize = 40;

static WIDTH: OnceLock<usize> = OnceLock::new();

/// Set while a [`Progress`] line sits below the cursor.
static PROGRESS_SHOWN: AtomicBool = AtomicBool::new(false);

fn terminal_width() -> usize {
    *WIDTH.get_or_init(|| size().map_or(FALLBACK_WIDTH, |(w, _)| usize::from(w)))
}

/// Print one line tagged with `module`:
///
/// ```ignore
/// log!("store"; "skipping {}", path.display());
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

pub fn log(module: &str, message: &str) {
    let tag = tag(module);
    // "[module] "
    let room = terminal_width().saturating_sub(module.len() + 3);
    let message = if message.contains('\n') {
        message
    } else {
        clip(message, room)
    };

    let mut out = stdout().lock();
    let shown = PROGRESS_SHOWN.load(Ordering::SeqCst);
    if shown {
        execute!(out, cursor::MoveUp(1), Clear(ClearType::FromCursorDown)).ok();
    }
    writeln!(out, "{tag} {message}").ok();
    if shown {
        // keep a line free for the next redraw
        writeln!(out).ok();
    }
    out.flush().ok();
}

fn tag(module: &str) -> ColoredString {
    let tag = format!("[{module}]");
    match module.to_ascii_lowercase().as_str() {
        "build" | "sitemap" => tag.bright_green().bold(),
        "editor" | "autosave" => tag.bright_blue().bold(),
        "registry" | "sections" | "store" => tag.bright_cyan().bold(),
        "error" => tag.bright_red().bold(),
        _ => tag.bright_yellow().bold(),
    }
}

/// Longest prefix of `s` within `max` bytes that ends on a char boundary.
fn clip(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let end = s
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= max)
        .last()
        .unwrap_or(0);
    &s[..end]
}

/// Filled and empty cell counts of a bar for `current` out of `total`.
fn bar_cells(width: usize, current: usize, total: usize) -> (usize, usize) {
    let filled = if total == 0 {
        0
    } else {
        current.min(total) * width / total
    };
    (filled, width - filled)
}

/// A counter drawn in place on the line below the log output.
///
/// Workers call [`Progress::inc`] from any thread. Dropping the value clears
/// the line.
pub struct Progress {
    tag: ColoredString,
    tag_len: usize,
    total: usize,
    done: AtomicUsize,
    draw: Mutex<()>,
}

impl Progress {
    /// `None` when there is at most one item to count.
    pub fn start(module: &str, total: usize) -> Option<Self> {
        if total <= 1 {
            return None;
        }
        let mut out = stdout().lock();
        writeln!(out).ok();
        out.flush().ok();
        PROGRESS_SHOWN.store(true, Ordering::SeqCst);

        Some(Self {
            tag: tag(module),
            tag_len: module.len() + 2,
            total,
            done: AtomicUsize::new(0),
            draw: Mutex::new(()),
        })
    }

    pub fn inc(&self) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        self.redraw(done);
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    fn redraw(&self, done: usize) {
        let _draw = self.draw.lock();
        let count = format!("{done}/{}", self.total);
        // "[tag] [" + "] " + count
        let overhead = self.tag_len + 4 + count.len();
        let width = terminal_width()
            .saturating_sub(overhead)
            .clamp(MIN_BAR, MAX_BAR);
        let (filled, empty) = bar_cells(width, done, self.total);

        let mut out = stdout().lock();
        execute!(out, cursor::MoveUp(1), Clear(ClearType::CurrentLine)).ok();
        writeln!(
            out,
            "{} [{}{}] {count}",
            self.tag,
            "█".repeat(filled),
            "░".repeat(empty)
        )
        .ok();
        out.flush().ok();
    }

    /// Clear the progress line.
    pub fn finish(&self) {
        if !PROGRESS_SHOWN.swap(false, Ordering::SeqCst) {
            return;
        }
        let _draw = self.draw.lock();
        let mut out = stdout().lock();
        execute!(out, cursor::MoveUp(1), Clear(ClearType::CurrentLine)).ok();
        out.flush().ok();
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        self.finish();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip() {
        assert_eq!(clip("hello world", 5), "hello");
        assert_eq!(clip("hello", 5), "hello");
        assert_eq!(clip("hello", 0), "");
        assert_eq!(clip("", 3), "");
        // "é" is two bytes
        assert_eq!(clip("café au lait", 4), "caf");
        assert_eq!(clip("café au lait", 5), "café");
    }

    #[test]
    fn test_bar_cells() {
        assert_eq!(bar_cells(20, 0, 12), (0, 20));
        assert_eq!(bar_cells(20, 6, 12), (10, 10));
        assert_eq!(bar_cells(20, 12, 12), (20, 0));
        assert_eq!(bar_cells(20, 15, 12), (20, 0));
        assert_eq!(bar_cells(20, 3, 0), (0, 20));
    }

    #[test]
    fn test_tag_keeps_module_name() {
        colored::control::set_override(false);
        assert_eq!(tag("build").to_string(), "[build]");
        assert_eq!(tag("Autosave").to_string(), "[Autosave]");
        colored::control::unset_override();
    }

    #[test]
    fn test_progress_counts() {
        assert!(Progress::start("pages", 1).is_none());

        let progress = Progress::start("pages", 3).unwrap();
        progress.inc();
        progress.inc();
        assert_eq!(progress.done(), 2);
        progress.finish();
        progress.finish();
    }
}
