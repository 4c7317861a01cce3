//! Table-aware assembly through the public API.
//!
//! Pages are built by hand in top-down page coordinates, so these tests do
//! not need the pdfium library.

use pdfsift::content::{
    render_layout, BBox, Character, LayoutOptions, Page, PageItem, Table, TableAwareTextAssembler,
    TableFinder,
};

const CHAR_W: f32 = 6.0;

/// One glyph per character; spaces advance the pen but emit nothing.
fn glyphs(text: &str, x: f32, top: f32) -> Vec<Character> {
    text.chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(i, ch)| {
            let x0 = x + i as f32 * CHAR_W;
            Character::new(ch.to_string(), BBox::new(x0, top, x0 + CHAR_W, top + 10.0))
        })
        .collect()
}

fn grid(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|r| r.iter().map(|c| (*c).to_string()).collect())
        .collect()
}

fn assemble(page: &Page) -> String {
    TableAwareTextAssembler::default().assemble(page).unwrap()
}

// ─── Properties ──────────────────────────────────────────────────────────────

#[test]
fn page_without_tables_matches_plain_layout() {
    let mut chars = glyphs("Kontoauszug Nr. 5", 10.0, 10.0);
    chars.extend(glyphs("Seite 1 von 2", 10.0, 23.0));
    let page = Page {
        number: 1,
        chars: chars.clone(),
        tables: vec![],
    };

    let items: Vec<PageItem> = chars.into_iter().map(PageItem::Text).collect();
    let expected = render_layout(&items, &LayoutOptions::default());

    assert_eq!(assemble(&page), expected);
    assert_eq!(expected, "Kontoauszug Nr. 5\nSeite 1 von 2");
}

#[test]
fn chars_inside_table_are_replaced_by_markdown() {
    let mut chars = glyphs("qq", 5.0, 2.0);
    chars.extend(glyphs("zz", 60.0, 8.0));
    chars.extend(glyphs("after", 0.0, 40.0));
    let page = Page {
        number: 1,
        chars,
        tables: vec![Table {
            bbox: BBox::new(0.0, 0.0, 100.0, 20.0),
            rows: grid(&[&["Col1", "Col2"], &["v1", "v2"], &["v3", "v4"]]),
        }],
    };

    let text = assemble(&page);
    assert!(!text.contains("qq"));
    assert!(!text.contains("zz"));
    assert!(text.contains("| Col1 | Col2 |\n| --- | --- |\n| v1 | v2 |\n| v3 | v4 |"));
    assert!(text.ends_with("after"));
}

#[test]
fn assembling_twice_is_identical_and_leaves_page_untouched() {
    let mut chars = glyphs("x", 5.0, 5.0);
    chars.extend(glyphs("tail", 0.0, 40.0));
    let page = Page {
        number: 1,
        chars,
        tables: vec![Table {
            bbox: BBox::new(0.0, 0.0, 100.0, 20.0),
            rows: grid(&[&["H"], &["x"]]),
        }],
    };
    let before = page.clone();

    let first = assemble(&page);
    let second = assemble(&page);
    assert_eq!(first, second);
    assert_eq!(page, before);
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn table_then_text_below() {
    let page = Page {
        number: 1,
        chars: vec![
            Character::new("A", BBox::new(2.0, 5.0, 8.0, 15.0)),
            Character::new("Hello", BBox::new(0.0, 30.0, 30.0, 40.0)),
        ],
        tables: vec![Table {
            bbox: BBox::new(0.0, 0.0, 100.0, 20.0),
            rows: grid(&[&["A", "B"], &["1", "2"]]),
        }],
    };

    let text = assemble(&page);
    let header = text.find("| A | B |").expect("header row");
    let row = text.find("| 1 | 2 |").expect("body row");
    let hello = text.find("Hello").expect("text below table");
    assert!(header < row && row < hello);
}

#[test]
fn header_only_table_has_no_body_rows() {
    let page = Page {
        number: 1,
        chars: glyphs("X Y", 0.0, 5.0),
        tables: vec![Table {
            bbox: BBox::new(0.0, 0.0, 100.0, 20.0),
            rows: grid(&[&["X", "Y"]]),
        }],
    };

    let text = assemble(&page);
    assert_eq!(text, "| X | Y |\n| --- | --- |");
}

#[test]
fn two_tables_render_in_reading_order() {
    // Discovery order lists the lower table first.
    let mut chars = glyphs("intro", 0.0, 0.0);
    chars.extend(glyphs("upper", 0.0, 30.0));
    chars.extend(glyphs("between", 0.0, 70.0));
    chars.extend(glyphs("lower", 0.0, 110.0));
    let page = Page {
        number: 1,
        chars,
        tables: vec![
            Table {
                bbox: BBox::new(0.0, 100.0, 100.0, 140.0),
                rows: grid(&[&["Lower"], &["2"]]),
            },
            Table {
                bbox: BBox::new(0.0, 25.0, 100.0, 50.0),
                rows: grid(&[&["Upper"], &["1"]]),
            },
        ],
    };

    let text = assemble(&page);
    let intro = text.find("intro").unwrap();
    let upper = text.find("| Upper |").unwrap();
    let between = text.find("between").unwrap();
    let lower = text.find("| Lower |").unwrap();
    assert!(intro < upper && upper < between && between < lower);
    assert!(!text.contains("upper"));
    assert!(!text.contains("lower"));
}

// ─── Detection + assembly ────────────────────────────────────────────────────

#[test]
fn detected_statement_table_is_spliced_between_text() {
    let mut chars = glyphs("Kontoauszug Mai", 10.0, 10.0);
    for (top, cells) in [
        (40.0, ["Datum", "Art", "Betrag"]),
        (52.0, ["01.05", "Abo", "-85,00"]),
        (64.0, ["02.05", "Zins", "240,00"]),
    ] {
        for (col, cell) in cells.iter().enumerate() {
            chars.extend(glyphs(cell, 10.0 + col as f32 * 100.0, top));
        }
    }
    chars.extend(glyphs("Saldo 240,00", 10.0, 100.0));

    let tables = TableFinder::default().find(&chars);
    assert_eq!(tables.len(), 1);

    let page = Page {
        number: 1,
        chars,
        tables,
    };
    let text = assemble(&page);

    let heading = text.find("Kontoauszug Mai").unwrap();
    let table = text
        .find("| Datum | Art | Betrag |\n| --- | --- | --- |\n| 01.05 | Abo | -85,00 |\n| 02.05 | Zins | 240,00 |")
        .unwrap();
    let footer = text.find("Saldo 240,00").unwrap();
    assert!(heading < table && table < footer);
    assert!(!text.contains("DatumArt"));
}
