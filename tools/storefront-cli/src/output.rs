//! Output formatting for the CLI.

use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use storefront_catalog::catalog::StockStatus;
use storefront_catalog::money::{Currency, Money};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
    term: Term,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self {
            verbose,
            json,
            term: Term::stdout(),
        }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row, truncating cells to their column width.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        println!("  {}", format_row(cols, widths));
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json || !self.term.is_term() {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }

    /// Terminal width, used as the viewport width for paging.
    pub fn term_width(&self) -> usize {
        self.term.size().1 as usize
    }
}

fn format_row(cols: &[&str], widths: &[usize]) -> String {
    cols.iter()
        .zip(widths.iter())
        .map(|(col, width)| {
            let cell = console::truncate_str(col, *width, "…");
            console::pad_str(&cell, *width, console::Alignment::Left, None).into_owned()
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Format a rupee price ("₹1,24,999").
pub fn format_price(amount: f64) -> String {
    Money::from_decimal(amount, Currency::INR).display()
}

/// Colored stock badge.
pub fn stock_badge(status: &StockStatus) -> String {
    match status {
        StockStatus::OutOfStock => style("Out of stock").red().to_string(),
        StockStatus::LowStock(n) => style(format!("Only {} left", n)).yellow().to_string(),
        StockStatus::InStock => style("In stock").green().to_string(),
    }
}

/// Colored active/inactive badge for regions.
pub fn status_badge(active: bool) -> String {
    if active {
        style("active").green().to_string()
    } else {
        style("inactive").dim().to_string()
    }
}

/// Star rating with one decimal ("★ 4.5"), or "-" when unrated.
pub fn format_rating(rating: f64) -> String {
    if rating > 0.0 {
        format!("★ {:.1}", rating)
    } else {
        "-".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(124999.0), "₹1,24,999");
        assert_eq!(format_price(249.5), "₹249.50");
        assert_eq!(format_price(0.0), "₹0");
    }

    #[test]
    fn test_format_rating() {
        assert_eq!(format_rating(4.5), "★ 4.5");
        assert_eq!(format_rating(0.0), "-");
    }

    #[test]
    fn test_format_row_pads_and_truncates() {
        let row = format_row(&["Forest Honey", "₹450"], &[6, 6]);
        assert!(row.starts_with("Fores…"));
        assert_eq!(console::measure_text_width(&row), 14);
    }
}
