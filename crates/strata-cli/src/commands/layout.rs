//! Implementation of the `strata layout` command.

use strata_core::{
    application::{LayoutService, PackageInfo},
    domain::Section,
};

use crate::{
    cli::{LayoutArgs, LayoutFormat},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: LayoutArgs, output: OutputManager) -> CliResult<()> {
    let service = LayoutService::default();
    let packages = service.list();

    // --output-format json wins over the table default
    let format = if output.is_json() {
        LayoutFormat::Json
    } else {
        args.format
    };

    match format {
        LayoutFormat::Table => {
            for section in [Section::Main, Section::Tests] {
                output.header(&format!("{} ({})", section_title(section), section))?;
                for info in packages.iter().filter(|p| p.section == section) {
                    output.print(&table_row(info))?;
                }
                output.print("")?;
            }
        }

        LayoutFormat::Json => output.json(&packages)?,

        LayoutFormat::List => {
            for info in &packages {
                output.data(&format!("{}:{}", info.section, display_path(info)))?;
            }
        }

        LayoutFormat::Csv => {
            output.data("section,path,package,described,description")?;
            for info in &packages {
                output.data(&csv_row(info))?;
            }
        }
    }

    Ok(())
}

fn section_title(section: Section) -> &'static str {
    match section {
        Section::Main => "Project",
        Section::Tests => "Tests",
    }
}

fn display_path(info: &PackageInfo) -> &str {
    if info.path.is_empty() { "." } else { &info.path }
}

fn table_row(info: &PackageInfo) -> String {
    let depth = if info.path.is_empty() {
        0
    } else {
        info.path.matches('/').count() + 1
    };
    let name = info.path.rsplit('/').next().unwrap_or_default();
    let label = if depth == 0 {
        ".".to_string()
    } else {
        format!("{}{}/", "  ".repeat(depth - 1), name)
    };

    let note = if !info.is_package {
        "(not a package)"
    } else if info.described {
        info.description.lines().next().unwrap_or_default()
    } else {
        "(generic marker)"
    };
    format!("  {label:<28} {note}")
}

fn csv_row(info: &PackageInfo) -> String {
    format!(
        "{},{},{},{},{}",
        info.section,
        display_path(info),
        info.is_package,
        info.described,
        csv_field(&info.description)
    )
}

/// Quote a field when it holds a separator, quote or newline.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
