//! Terminal alerts.

use catadex_core::Notifier;

const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Prints alerts to stderr so they never mix with command output.
pub struct StderrNotifier {
    use_colors: bool,
    quiet: bool,
}

impl StderrNotifier {
    /// Creates a notifier. Nothing is printed in quiet mode.
    pub fn new(use_colors: bool, quiet: bool) -> Self {
        Self { use_colors, quiet }
    }

    fn render(&self, title: &str, message: &str) -> String {
        if self.use_colors {
            format!("{YELLOW}! {title}:{RESET} {message}")
        } else {
            format!("! {title}: {message}")
        }
    }
}

impl Notifier for StderrNotifier {
    fn notify(&self, title: &str, message: &str) {
        if !self.quiet {
            eprintln!("{}", self.render(title, message));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let notifier = StderrNotifier::new(false, false);
        assert_eq!(notifier.render("Catalog", "No more items."), "! Catalog: No more items.");
    }

    #[test]
    fn test_render_colored() {
        let notifier = StderrNotifier::new(true, false);
        assert!(notifier.render("Catalog", "x").starts_with(YELLOW));
    }
}
