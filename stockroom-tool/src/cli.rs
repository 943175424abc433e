//! Non-interactive commands.

use std::io::{self, BufRead, Write};

use stockroom_core::render::COLUMNS;
use stockroom_core::{Confirmation, FormMode, ItemForm, Row, Session, SortKey, Store};

use crate::error::StockError;

pub fn list<S: Store>(
    session: &mut Session<S>,
    search: Option<&str>,
    sort: Option<SortKey>,
    out: &mut impl Write,
) -> io::Result<()> {
    match (search, sort) {
        (Some(query), _) => session.search(query),
        (None, Some(key)) => session.sort_by(key),
        (None, None) => session.show_all(),
    }
    write_table(&session.rows(), out)
}

/// Plain-text table with an id column, padded per column.
pub fn write_table(rows: &[Row], out: &mut impl Write) -> io::Result<()> {
    let mut widths = [0usize; 8];
    widths[0] = "Id".len();
    for (i, name) in COLUMNS.iter().enumerate() {
        widths[i + 1] = name.chars().count();
    }
    for row in rows {
        widths[0] = widths[0].max(row.id.chars().count());
        for (i, cell) in row.cells.iter().enumerate() {
            widths[i + 1] = widths[i + 1].max(cell.chars().count());
        }
    }

    let header = std::iter::once("Id").chain(COLUMNS.iter().copied());
    write_line(header, &widths, out)?;
    for row in rows {
        let cells = std::iter::once(row.id.as_str()).chain(row.cells.iter().map(String::as_str));
        write_line(cells, &widths, out)?;
    }
    Ok(())
}

fn write_line<'a>(
    cells: impl Iterator<Item = &'a str>,
    widths: &[usize],
    out: &mut impl Write,
) -> io::Result<()> {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(cell, &w)| format!("{:<w$}", cell, w = w))
        .collect();
    writeln!(out, "{}", padded.join("  ").trim_end())
}

pub async fn add<S: Store>(
    session: &mut Session<S>,
    form: ItemForm,
    out: &mut impl Write,
) -> Result<(), StockError> {
    let committed = session.submit(&FormMode::Create, &form).await?;
    if let Some(notice) = session.notices().latest() {
        writeln!(out, "{} ({})", notice.text, committed.id())?;
    }
    Ok(())
}

pub fn delete<S: Store>(
    session: &mut Session<S>,
    id: &str,
    assume_yes: bool,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), StockError> {
    let Some(item) = session.find(id) else {
        writeln!(out, "No item with id {}", id)?;
        return Ok(());
    };

    let answer = if assume_yes {
        Confirmation::Accepted
    } else {
        write!(
            out,
            "Are you sure you want to delete this item? {} [y/N] ",
            item.name
        )?;
        out.flush()?;
        let mut line = String::new();
        input.read_line(&mut line)?;
        match line.trim() {
            "y" | "Y" | "yes" => Confirmation::Accepted,
            _ => Confirmation::Declined,
        }
    };

    if session.delete(id, answer)? {
        if let Some(notice) = session.notices().latest() {
            writeln!(out, "{}", notice.text)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_core::{persist, Item, MemoryStore, PLACEHOLDER_IMAGE};

    fn session() -> Session<MemoryStore> {
        let store = MemoryStore::new();
        let items = [("1", "Hammer", 4.0, 12.0), ("2", "Nails", 200.0, 3.5)].map(
            |(id, name, quantity, price)| Item {
                id: id.to_string(),
                name: name.to_string(),
                details: String::new(),
                quantity,
                price,
                date: "2024-01-01".to_string(),
                kind: "tool".to_string(),
                image: PLACEHOLDER_IMAGE.to_string(),
            },
        );
        persist::save(&store, &items).unwrap();
        Session::open(store)
    }

    fn output(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn list_prints_header_and_rows() {
        let mut session = session();
        let mut out = Vec::new();

        list(&mut session, None, None, &mut out).unwrap();

        let text = output(out);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Id  Name"));
        assert!(lines[1].contains("$12.00"));
        assert!(lines[2].contains("1/1/2024"));
    }

    #[test]
    fn list_with_sort_and_search() {
        let mut session = session();

        let mut out = Vec::new();
        list(&mut session, None, Some(SortKey::Price), &mut out).unwrap();
        assert!(output(out).lines().nth(1).unwrap().starts_with("2 "));

        let mut out = Vec::new();
        list(&mut session, Some("HAM"), None, &mut out).unwrap();
        assert_eq!(output(out).lines().count(), 2);
    }

    #[test]
    fn delete_prompt_declined() {
        let mut session = session();
        let mut out = Vec::new();

        delete(&mut session, "1", false, &mut &b"n\n"[..], &mut out).unwrap();

        assert_eq!(session.inventory().len(), 2);
        assert!(output(out).contains("Are you sure"));
    }

    #[test]
    fn delete_prompt_accepted() {
        let mut session = session();
        let mut out = Vec::new();

        delete(&mut session, "1", false, &mut &b"y\n"[..], &mut out).unwrap();

        assert_eq!(session.inventory().len(), 1);
        assert!(output(out).ends_with("Item deleted successfully!\n"));
    }

    #[test]
    fn delete_unknown_id() {
        let mut session = session();
        let mut out = Vec::new();

        delete(&mut session, "9", true, &mut &b""[..], &mut out).unwrap();

        assert_eq!(session.inventory().len(), 2);
        assert_eq!(output(out), "No item with id 9\n");
    }

    #[tokio::test]
    async fn add_reports_new_id() {
        let mut session = session();
        let mut out = Vec::new();
        let form = ItemForm {
            name: "Widget".to_string(),
            quantity: "5".to_string(),
            price: "2.5".to_string(),
            date: "2024-01-01".to_string(),
            kind: "tool".to_string(),
            ..ItemForm::default()
        };

        add(&mut session, form, &mut out).await.unwrap();

        assert_eq!(session.inventory().len(), 3);
        assert!(output(out).starts_with("Item added! ("));
    }
}
