use syntaxgen::{DiagnosticKind, Grammar, Report};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        fn wrap(&self, s: &str, code: &str) -> String {
            if self.enabled { format!("{code}{s}{RESET}") } else { s.to_string() }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            self.wrap(s.as_ref(), color)
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), BOLD)
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            self.wrap(s.as_ref(), DIM)
        }
    }
}

/// Print the compaction report to stderr; stdout may carry the grammar.
pub fn print_run(grammar: &Grammar, report: &Report, color: bool) {
    let palette = ansi::Palette::new(color);
    let metrics = &report.metrics;

    eprintln!(
        "\n{}",
        palette.bold(palette.paint(format!("⚙  Compacting: {} ({})", grammar.name, grammar.scope_name), ansi::CYAN))
    );

    eprintln!("\n{}", palette.paint("━━━ References ━━━", ansi::GRAY));
    print_counts(report, &palette);

    eprintln!("\n{}", palette.paint("━━━ Repository ━━━", ansi::GRAY));
    eprintln!(
        "  {} {} {} {}",
        palette.paint(metrics.entries_before.to_string(), ansi::YELLOW),
        palette.dim("entries →"),
        palette.paint(metrics.entries_after.to_string(), ansi::GREEN),
        palette.dim(format!("({} referenced)", metrics.referenced)),
    );
    print_names("Inlined:", &metrics.inlined, ansi::BLUE, &palette);
    print_names("Shared:", &metrics.shared, ansi::GREEN, &palette);
    print_names("Pruned:", &metrics.pruned, ansi::YELLOW, &palette);

    eprintln!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
    if report.diagnostics.is_empty() {
        eprintln!("{}", palette.dim("  None"));
    }
    for diagnostic in &report.diagnostics {
        let marker = match diagnostic.kind {
            DiagnosticKind::UnusedRule => palette.paint("✗", ansi::YELLOW),
            DiagnosticKind::SingleUseAnomaly => palette.paint("!", ansi::YELLOW),
        };
        eprintln!("  {marker} {diagnostic}");
    }

    eprintln!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    eprintln!(
        "  Total: {}  │  Counting: {}  │  Compaction: {}",
        palette.paint(format!("{:?}", metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", metrics.counting), ansi::CYAN),
        palette.dim(format!("{:?}", metrics.compaction)),
    );
    eprintln!();
}

/// Shared rules first, most referenced at the top.
fn print_counts(report: &Report, palette: &ansi::Palette) {
    let mut counts: Vec<(&str, usize)> = report.counts.iter().filter(|(_, count)| *count >= 2).collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));

    for (name, count) in &counts {
        eprintln!("  {} {}", palette.paint(format!("{count:>4}×"), ansi::GREEN), palette.paint(name, ansi::BLUE));
    }
    let single = report.counts.len() - counts.len();
    eprintln!("  {}", palette.dim(format!("{single} rule(s) referenced once")));
}

fn print_names(label: &str, names: &[String], color: &str, palette: &ansi::Palette) {
    if names.is_empty() {
        eprintln!("  {} {}", palette.paint(format!("{label:<9}"), color), palette.dim("-"));
        return;
    }
    eprintln!(
        "  {} {}",
        palette.paint(format!("{label:<9}"), color),
        palette.dim(format!("{} ({})", names.join(", "), names.len()))
    );
}
