//! Colour roles for terminal output.

use owo_colors::Style;

/// Stylesheet shared by every renderer. All roles are plain until
/// [`Styles::colorize`] runs, so `--no-color` output needs no special casing.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    /// Secondary text such as written file paths.
    pub muted: Style,
    /// Table headings and template names.
    pub emphasis: Style,
    /// Section titles.
    pub heading: Style,
    /// The `→` marker of progress lines.
    pub step: Style,
    /// Containers whose `docker ps` status starts with `Up`.
    pub up: Style,
    /// Exited, dead or created containers.
    pub down: Style,
}

impl Styles {
    /// Turn on ANSI colours for every role.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.error = Style::new().red();
        self.info = Style::new().blue();
        self.muted = Style::new().dimmed();
        self.emphasis = Style::new().bold();
        self.heading = Style::new().bold().cyan();
        self.step = Style::new().cyan();
        self.up = Style::new().green();
        self.down = Style::new().red().dimmed();
    }

    /// Style for a raw `docker ps` status column.
    #[must_use]
    pub fn container_status(&self, status: &str) -> Style {
        if status.starts_with("Up") {
            self.up
        } else {
            self.down
        }
    }
}
