use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Print `text` to stdout, or save it when `output_file` is given.
pub fn write_output(text: &str, output_file: Option<PathBuf>) -> Result<()> {
    if let Some(path) = output_file {
        let mut file =
            File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        file.write_all(text.as_bytes())?;
        eprintln!("💾 Saved {} bytes to {}", text.len(), path.display());
        return Ok(());
    }

    println!("{text}");
    Ok(())
}

/// Keep all numbered pages, or only the requested 1-based page.
///
/// Numbers come from the document, so gaps (pages without text) are kept.
pub fn select_pages<T>(pages: Vec<(usize, T)>, page: Option<usize>) -> Result<Vec<(usize, T)>> {
    let Some(n) = page else {
        return Ok(pages);
    };

    let selected: Vec<_> = pages.into_iter().filter(|(p, _)| *p == n).collect();
    if selected.is_empty() {
        bail!("page {n} has no text layer or is out of range");
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all_pages() {
        let pages = select_pages(vec![(1, "a"), (2, "b")], None).unwrap();
        assert_eq!(pages, vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn select_single_page() {
        let pages = select_pages(vec![(1, "a"), (2, "b"), (3, "c")], Some(2)).unwrap();
        assert_eq!(pages, vec![(2, "b")]);
    }

    #[test]
    fn select_by_document_number_across_gap() {
        // page 2 is a scan without text
        let pages = vec![(1, "a"), (3, "c")];
        assert_eq!(select_pages(pages.clone(), None).unwrap(), pages);
        assert_eq!(select_pages(pages.clone(), Some(3)).unwrap(), vec![(3, "c")]);

        let err = select_pages(pages, Some(2)).unwrap_err();
        assert!(err.to_string().contains("page 2"));
    }

    #[test]
    fn select_out_of_range() {
        assert!(select_pages(vec![(1, "a")], Some(0)).is_err());
        assert!(select_pages(vec![(1, "a")], Some(2)).is_err());
    }
}
