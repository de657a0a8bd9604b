//! Output formatting for generated documentation

use eyre::Result;
use owo_colors::OwoColorize;
use statdoc_core::Documentation;

/// Output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Text,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "markdown" | "md" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            "text" => Some(Self::Text),
            _ => None,
        }
    }

    /// Whether the rendering carries terminal colours and belongs on stdout only
    pub fn is_terminal_only(&self) -> bool {
        matches!(self, Self::Text)
    }
}

/// Render documentation in the specified format
pub fn render(doc: &Documentation, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(doc)),
        OutputFormat::Json => render_json(doc),
        OutputFormat::Text => Ok(render_text(doc)),
    }
}

fn render_markdown(doc: &Documentation) -> String {
    let mut output = String::new();

    for title in &doc.titles {
        if title.is_version() {
            output.push_str(&format!("% Version {}\n", title.value));
        } else {
            output.push_str(&format!("% {}\n", title.value));
        }
    }

    output.push_str("\n# Code files used for project\n\n");
    for file in &doc.files {
        output.push_str(&format!("* {}: {}\n", file.order, file.path.display()));
    }

    output.push_str("\n# Scripts/macros used for project\n\n");
    for include in &doc.includes {
        output.push_str(&format!("* {}\n", include));
    }

    for group in &doc.groups {
        output.push_str(&format!("\n# {}\n\n", group.heading));
        for entry in &group.entries {
            output.push_str(&format!("{} {}\n", entry.reference(), entry.text));
        }
    }

    output
}

fn render_json(doc: &Documentation) -> Result<String> {
    facet_json::to_string_pretty(doc).map_err(|e| eyre::eyre!("JSON serialization failed: {e}"))
}

fn render_text(doc: &Documentation) -> String {
    let mut output = String::new();

    output.push('\n');
    for title in &doc.titles {
        output.push_str(&format!(
            "{} {}\n",
            format!("{}:", title.subtag).dimmed(),
            title.value.cyan().bold()
        ));
    }

    output.push_str(&format!(
        "{} {} files, {} includes, {} entries in {} sections\n",
        "##".bold(),
        doc.files.len().to_string().green(),
        doc.includes.len().to_string().green(),
        doc.entry_count().to_string().green(),
        doc.groups.len().to_string().green()
    ));

    for file in &doc.files {
        let label = if file.secondary {
            format!("s{}", file.order)
        } else {
            file.order.to_string()
        };
        output.push_str(&format!(
            "  {} {}\n",
            label.yellow(),
            file.path.display().dimmed()
        ));
    }
    output.push('\n');

    for group in &doc.groups {
        output.push_str(&format!(
            "{} ({})\n",
            group.heading.cyan().bold(),
            group.entries.len()
        ));
        for entry in &group.entries {
            output.push_str(&format!(
                "  {} {}\n",
                entry.reference().dimmed(),
                entry.text
            ));
        }
    }

    output
}
