use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

#[cfg(feature = "colorized_output")]
use console::style;

use votable::votable::{ParserConfig, VOTable, VOTableParser};

fn heading(text: &str) -> String {
    #[cfg(feature = "colorized_output")]
    {
        style(text).bold().cyan().to_string()
    }

    #[cfg(not(feature = "colorized_output"))]
    {
        text.to_string()
    }
}

fn render_json(table: &VOTable) -> Result<String> {
    let value = serde_json::json!({
        "description": table.description(),
        "coordinate_system": table.coordinate_system(),
        "fields": table.fields(),
        "infos": table.infos(),
        "rows": table.num_rows(),
        "binary_encoding": table.binary_encoding(),
        "data_errors": table.data_errors(),
    });
    serde_json::to_string_pretty(&value).context("Failed to serialize table summary")
}

fn render_text(file: &Path, table: &VOTable) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}\n", heading("VOTable Information")));
    out.push_str("===================\n");
    out.push_str(&format!("File: {}\n", file.display()));
    if let Some(description) = table.description() {
        out.push_str(&format!("Description: {}\n", description));
    }
    out.push_str(&format!("Rows: {}\n", table.num_rows()));
    if let Some(encoding) = table.binary_encoding() {
        out.push_str(&format!(
            "Binary stream: encoding={} (not decoded)\n",
            encoding
        ));
    }
    out.push('\n');

    if let Some(coosys) = table.coordinate_system() {
        out.push_str(&format!("{}\n", heading("Coordinate System:")));
        if let Some(id) = &coosys.id {
            out.push_str(&format!("  ID: {}\n", id));
        }
        if let Some(frame) = coosys.frame {
            out.push_str(&format!("  Frame: {}\n", frame));
        }
        if let Some(equinox) = coosys.effective_equinox() {
            out.push_str(&format!("  Equinox: {}\n", equinox.to_rfc3339()));
        }
        if let Some(epoch) = coosys.epoch {
            out.push_str(&format!("  Epoch: {}\n", epoch.to_rfc3339()));
        }
        if let Some(position) = coosys.reference_position {
            out.push_str(&format!("  Reference position: {}\n", position));
        }
        out.push('\n');
    }

    out.push_str(&format!("{}\n", heading("Fields:")));
    for (i, field) in table.fields().iter().enumerate() {
        out.push_str(&format!("  {:3}. {} ({})", i + 1, field.name, field.datatype));
        if let Some(unit) = &field.unit {
            out.push_str(&format!(" [{}]", unit));
        }
        if let Some(ucd) = &field.ucd {
            out.push_str(&format!(" ucd={}", ucd));
        }
        out.push('\n');
        if let Some(description) = &field.description {
            out.push_str(&format!("       {}\n", description));
        }
    }

    if !table.infos().is_empty() {
        out.push('\n');
        out.push_str(&format!("{}\n", heading("Info:")));
        for entry in table.infos() {
            out.push_str(&format!("  {} = {}\n", entry.name, entry.value));
        }
    }

    if !table.data_errors().is_empty() {
        out.push('\n');
        out.push_str(&format!(
            "{} ({})\n",
            heading("Data errors:"),
            table.data_errors().len()
        ));
        for error in table.data_errors() {
            out.push_str(&format!("  {}\n", error));
        }
    }

    out
}

/// Display information about a VOTable file
pub fn run(file: PathBuf, config: ParserConfig, json: bool) -> Result<()> {
    if !file.exists() {
        anyhow::bail!("File does not exist: {}", file.display());
    }

    info!("Reading {}", file.display());
    let table = VOTableParser::new(config)
        .parse_file(&file)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    if json {
        println!("{}", render_json(&table)?);
    } else {
        print!("{}", render_text(&file, &table));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<VOTABLE>
        <DESCRIPTION>Two stars</DESCRIPTION>
        <COOSYS ID="fk4" system="FK4"/>
        <RESOURCE><TABLE>
            <FIELD name="ra" datatype="double" unit="deg"><DESCRIPTION>RA</DESCRIPTION></FIELD>
            <DATA><TABLEDATA><TR><TD>1</TD></TR><TR><TD>2</TD></TR></TABLEDATA></DATA>
        </TABLE></RESOURCE>
    </VOTABLE>"#;

    #[test]
    fn test_render_text() {
        let table = votable::votable::parse(DOC.as_bytes()).unwrap();
        let text = render_text(Path::new("stars.vot"), &table);
        assert!(text.contains("Description: Two stars"));
        assert!(text.contains("Rows: 2"));
        assert!(text.contains("Frame: FK4"));
        assert!(text.contains("Equinox: 1949-12-31"));
        assert!(text.contains("ra (double) [deg]"));
    }

    #[test]
    fn test_render_json() {
        let table = votable::votable::parse(DOC.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&render_json(&table).unwrap()).unwrap();
        assert_eq!(value["rows"], 2);
        assert_eq!(value["description"], "Two stars");
        assert_eq!(value["fields"][0]["name"], "ra");
        assert_eq!(value["coordinate_system"]["frame"], "FK4");
    }
}
