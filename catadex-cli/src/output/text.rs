//! Text output formatting with stat bars and colors.

use catadex_core::{FavoriteEntry, ItemDetail, Session, StatEntry, capitalize};
use catadex_fetch::PaginationCursor;

// ============================================================================
// ANSI Colors
// ============================================================================

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";

// Progress bar characters
const BAR_FULL: char = '█';
const BAR_EMPTY: char = '░';

const FAVORITE_MARK: &str = "★";

/// Text formatter with optional colors.
pub struct TextFormatter {
    use_colors: bool,
    bar_width: usize,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(use_colors: bool) -> Self {
        Self {
            use_colors,
            bar_width: 20,
        }
    }

    /// Set the progress bar width.
    #[cfg(test)]
    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width;
        self
    }

    // ========================================================================
    // Items
    // ========================================================================

    /// One line per item: number, name, types.
    pub fn format_item_row(&self, item: &ItemDetail) -> String {
        format!(
            "{} {:<16} {}",
            self.dim(&item.display_number()),
            item.display_name(),
            self.cyan(&item.type_names().join(", "))
        )
    }

    /// Formats the accumulated list with a paging footer.
    pub fn format_list(&self, items: &[ItemDetail], cursor: &PaginationCursor) -> String {
        let mut lines: Vec<String> = items.iter().map(|i| self.format_item_row(i)).collect();
        if !lines.is_empty() {
            lines.push(String::new());
        }

        let more = if cursor.has_more() {
            self.green("more available")
        } else {
            self.yellow("end of catalog")
        };
        lines.push(format!(
            "{} items loaded, next offset {} ({more})",
            items.len(),
            cursor.offset()
        ));
        lines.join("\n")
    }

    /// Full detail card.
    pub fn format_card(&self, item: &ItemDetail, favorite: bool) -> String {
        let mut lines = Vec::new();

        let mark = if favorite {
            format!(" {}", self.yellow(FAVORITE_MARK))
        } else {
            String::new()
        };
        lines.push(format!(
            "{} {}{mark}",
            self.dim(&item.display_number()),
            self.bold(&item.display_name())
        ));
        lines.push("─".repeat(40));

        let types: Vec<String> = item.type_names().iter().map(|t| capitalize(t)).collect();
        lines.push(format!("Types:     {}", self.cyan(&types.join(" / "))));
        lines.push(format!("Height:    {:.1} m", item.height_m()));
        lines.push(format!("Weight:    {:.1} kg", item.weight_kg()));

        if !item.abilities.is_empty() {
            let abilities: Vec<String> = item
                .abilities
                .iter()
                .map(|a| {
                    let name = capitalize(&a.name.replace('-', " "));
                    if a.is_hidden {
                        format!("{name} {}", self.dim("(hidden)"))
                    } else {
                        name
                    }
                })
                .collect();
            lines.push(format!("Abilities: {}", abilities.join(", ")));
        }

        if let Some(url) = item.image_url() {
            lines.push(format!("Image:     {}", self.dim(url)));
        }

        if !item.stats.is_empty() {
            lines.push(String::new());
            for stat in &item.stats {
                lines.push(self.format_stat(stat));
            }
            lines.push(format!("{:<10} {}", "Total", self.bold(&item.total_base_stats().to_string())));
        }

        lines.join("\n")
    }

    /// One stat with a bar scaled to the stat's maximum.
    fn format_stat(&self, stat: &StatEntry) -> String {
        format!(
            "{:<10} {} {:>3}",
            stat_label(&stat.stat_name),
            self.progress_bar(stat.percent_of_max()),
            stat.base_value
        )
    }

    /// Formats a progress bar.
    pub fn progress_bar(&self, percent: f64) -> String {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
        let filled = ((percent.clamp(0.0, 100.0) / 100.0) * self.bar_width as f64).round() as usize;
        let empty = self.bar_width.saturating_sub(filled);

        let bar = format!(
            "{}{}",
            BAR_FULL.to_string().repeat(filled),
            BAR_EMPTY.to_string().repeat(empty)
        );

        self.color_for_percent(percent, &bar)
    }

    // ========================================================================
    // Favorites & Account
    // ========================================================================

    /// Formats the favorites list.
    pub fn format_favorites(&self, favorites: &[FavoriteEntry]) -> String {
        if favorites.is_empty() {
            return self.dim("No favorites yet. Add one with `catadex favorites add <name>`.");
        }

        favorites
            .iter()
            .map(|f| {
                format!(
                    "{} {} {:<16} {}",
                    self.yellow(FAVORITE_MARK),
                    self.dim(&format!("#{:03}", f.id)),
                    f.display_name(),
                    self.cyan(&f.types.join(", "))
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formats the signed-in account.
    pub fn format_session(&self, session: &Session) -> String {
        let mut lines = vec![format!(
            "Signed in as {} ({})",
            self.bold(&session.username),
            session.profile.name
        )];
        let profile = &session.profile;
        for (label, value) in [
            ("Email", &profile.email),
            ("Phone", &profile.phone),
            ("Document", &profile.document),
            ("Course", &profile.course),
        ] {
            if !value.is_empty() {
                lines.push(format!("{:<9} {value}", format!("{label}:")));
            }
        }
        lines.push(self.dim(&format!(
            "Since {}",
            session.signed_in_at.format("%Y-%m-%d %H:%M UTC")
        )));
        lines.join("\n")
    }

    // ========================================================================
    // Color/style helpers
    // ========================================================================

    fn color_for_percent(&self, percent: f64, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }

        if percent < 20.0 {
            self.red(text)
        } else if percent < 50.0 {
            self.yellow(text)
        } else {
            self.green(text)
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        self.paint(BOLD, text)
    }

    fn dim(&self, text: &str) -> String {
        self.paint(DIM, text)
    }

    fn green(&self, text: &str) -> String {
        self.paint(GREEN, text)
    }

    fn yellow(&self, text: &str) -> String {
        self.paint(YELLOW, text)
    }

    fn red(&self, text: &str) -> String {
        self.paint(RED, text)
    }

    fn cyan(&self, text: &str) -> String {
        self.paint(CYAN, text)
    }
}

/// Short display label for a stat name.
fn stat_label(name: &str) -> String {
    match name {
        "hp" => "HP".to_string(),
        "special-attack" => "Sp. Atk".to_string(),
        "special-defense" => "Sp. Def".to_string(),
        other => capitalize(other),
    }
}
