//! Text rendering of reports

use crate::commands::Report;
use crate::models::inventory::{FieldValue, Inventory, ValueList};

/// Width of the name column
const KEY_WIDTH: usize = 30;

/// Width the values are centered in
const VALUE_WIDTH: usize = 50;

/// Render a report as the lines printed on stdout
pub fn render(report: &Report) -> String {
    match report {
        Report::Id(FieldValue::Text(text)) => format!("{}\n", text),
        Report::Id(id) => format!("{}\n", id),
        Report::Entries(inventory) => render_inventory(inventory),
        Report::NotFound(message) => format!("{}\n", message),
    }
}

fn render_inventory(inventory: &Inventory) -> String {
    inventory
        .iter()
        .map(|(name, values)| {
            let line = format!(
                "{:<key$} {:^value$}",
                name,
                ValueList(values).to_string(),
                key = KEY_WIDTH,
                value = VALUE_WIDTH
            );
            format!("{}\n", line.trim_end())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_id() {
        assert_eq!(render(&Report::Id(FieldValue::Number(42.into()))), "42\n");
    }

    #[test]
    fn test_render_not_found() {
        assert_eq!(render(&Report::NotFound("nothing")), "nothing\n");
    }

    #[test]
    fn test_render_entries_aligned() {
        let mut inventory = Inventory::new();
        inventory.insert("web-1".to_string(), vec![FieldValue::text("10.0.0.1")]);
        inventory.insert(
            "db".to_string(),
            vec![FieldValue::Number(7.into()), FieldValue::text("s-1")],
        );

        let output = render(&Report::Entries(inventory));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("db "));
        assert!(lines[1].starts_with("web-1 "));
        let value = "['10.0.0.1']";
        let padding = (VALUE_WIDTH - value.len()) / 2;
        assert_eq!(lines[1], format!("{:<30} {}{}", "web-1", " ".repeat(padding), value));
    }

    #[test]
    fn test_render_long_name_keeps_separator() {
        let name = "a-very-long-droplet-name-beyond-the-column";
        let volumes: Vec<FieldValue> = (0..8)
            .map(|i| FieldValue::text(&format!("volume-{:02}", i)))
            .collect();
        let mut inventory = Inventory::new();
        inventory.insert(
            name.to_string(),
            vec![FieldValue::Number(1.into()), FieldValue::List(volumes)],
        );

        let output = render(&Report::Entries(inventory));

        assert!(output.starts_with(&format!("{} [1, [", name)));
    }
}
