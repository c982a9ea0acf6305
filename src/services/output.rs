use crate::domain::models::{megabytes, InstallReport};
use std::io::Write;

const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Title framed by horizontal rules.
pub fn print_section(out: &mut impl Write, title: &str) -> anyhow::Result<()> {
    writeln!(out, "{}", rule())?;
    writeln!(out, "{}", title)?;
    writeln!(out, "{}", rule())?;
    Ok(())
}

pub fn format_mb(bytes: u64) -> String {
    format!("{:.2} MB", megabytes(bytes))
}

pub fn print_tree(out: &mut impl Write, report: &InstallReport) -> anyhow::Result<()> {
    writeln!(out, "Directory structure:")?;
    writeln!(out, "models/pretrained/")?;
    for role in &report.roles {
        writeln!(out, "├── {}/", role.role.dir_name())?;
        for name in &role.entries {
            writeln!(out, "│   ├── {}", name)?;
        }
    }
    writeln!(out, "└── metadata.json")?;
    writeln!(out)?;
    Ok(())
}

pub fn print_sizes(out: &mut impl Write, report: &InstallReport) -> anyhow::Result<()> {
    writeln!(out, "Model sizes:")?;
    for role in &report.roles {
        writeln!(
            out,
            "  - {} model: {}",
            role.role.title(),
            format_mb(role.bytes)
        )?;
    }
    writeln!(out, "  - Total: {}", format_mb(report.total_bytes))?;
    writeln!(out)?;

    if report.lfs_recommended {
        writeln!(out, "⚠️  WARNING: Models are larger than 100 MB")?;
        writeln!(out, "   Consider using Git LFS for large files:")?;
        writeln!(out, "   git lfs install")?;
        writeln!(out, "   git lfs track \"models/**/*.bin\"")?;
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_next_steps(out: &mut impl Write) -> anyhow::Result<()> {
    print_section(out, "Next steps:")?;
    writeln!(out, "1. Review the models in models/pretrained/")?;
    writeln!(out, "2. Test in the app (should auto-load on refresh)")?;
    writeln!(out, "3. Commit to git:")?;
    writeln!(out, "   git add models/")?;
    writeln!(out, "   git commit -m \"Add pre-trained models\"")?;
    writeln!(out, "   git push")?;
    writeln!(out)?;
    writeln!(
        out,
        "4. Users will automatically get these models when they visit the app!"
    )?;
    writeln!(out)?;
    writeln!(
        out,
        "🎉 Done! Your pre-trained models are ready to deploy."
    )?;
    Ok(())
}

pub fn print_summary(out: &mut impl Write, report: &InstallReport) -> anyhow::Result<()> {
    print_section(out, "✅ Models successfully added to repository!")?;
    writeln!(out)?;
    print_tree(out, report)?;
    print_sizes(out, report)?;
    print_next_steps(out)
}
