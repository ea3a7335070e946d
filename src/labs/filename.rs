//! Parsing of lab report file names.

/// Separator between the date, id and lab name parts.
pub const SEPARATOR: char = '_';

/// Required suffix for the lab name part. Case-sensitive.
pub const FILE_EXTENSION: &str = ".pdf";

/// Check that the file name has exactly three `_`-separated parts and the last one ends in `.pdf`.
///
/// ```rust
/// use lab_sort::labs::is_valid_file_name;
///
/// assert!(is_valid_file_name("2024-01-01_001_Acme.pdf"));
/// assert!(!is_valid_file_name("2024-01-01_001_Acme_2.pdf"));
/// assert!(!is_valid_file_name("2024-01-01_001_Acme.PDF"));
/// ```
#[must_use]
pub fn is_valid_file_name(file_name: &str) -> bool {
    let mut parts = file_name.split(SEPARATOR);
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(_), Some(lab), None) => lab.ends_with(FILE_EXTENSION),
        _ => false,
    }
}

/// Get the lab name from a file name.
///
/// Returns `None` for names that are not valid.
/// The lab name is the third part up to the first `.pdf`, with surrounding whitespace trimmed,
/// so `A_B_Lab.pdf.pdf` and `A_B_Lab.pdfx.pdf` both give `Lab`.
///
/// ```rust
/// use lab_sort::labs::lab_name;
///
/// assert_eq!(lab_name("2024-01-01_001_ Acme Labs .pdf"), Some("Acme Labs"));
/// assert_eq!(lab_name("badname.pdf"), None);
/// ```
#[must_use]
pub fn lab_name(file_name: &str) -> Option<&str> {
    if !is_valid_file_name(file_name) {
        return None;
    }
    let segment = file_name.split(SEPARATOR).nth(2)?;
    let end = segment.find(FILE_EXTENSION)?;
    Some(segment[..end].trim())
}

#[cfg(test)]
mod filename_tests {
    use super::*;

    #[test]
    fn valid_three_part_names() {
        assert!(is_valid_file_name("2024-01-01_001_Acme.pdf"));
        assert!(is_valid_file_name("a_b_c.pdf"));
        assert!(is_valid_file_name("__.pdf"));
        assert!(is_valid_file_name("2024-01-01_001_.pdf"));
    }

    #[test]
    fn rejects_wrong_number_of_parts() {
        assert!(!is_valid_file_name("badname.pdf"));
        assert!(!is_valid_file_name("2024-01-01_Acme.pdf"));
        assert!(!is_valid_file_name("2024-01-01_001_Acme_extra.pdf"));
        assert!(!is_valid_file_name("___.pdf"));
        assert!(!is_valid_file_name(""));
    }

    #[test]
    fn rejects_wrong_extension() {
        assert!(!is_valid_file_name("2024-01-01_001_Acme.PDF"));
        assert!(!is_valid_file_name("2024-01-01_001_Acme.txt"));
        assert!(!is_valid_file_name("2024-01-01_001_Acme.pdf.bak"));
        assert!(!is_valid_file_name("2024-01-01_001_Acme"));
    }

    #[test]
    fn extension_only_checked_on_last_part() {
        assert!(!is_valid_file_name("2024.pdf_001_Acme"));
        assert!(is_valid_file_name("2024.pdf_001.pdf_Acme.pdf"));
    }

    #[test]
    fn lab_name_for_valid_names() {
        assert_eq!(lab_name("2024-01-01_001_Acme.pdf"), Some("Acme"));
        assert_eq!(lab_name("2024-01-01_002_Beta Lab.pdf"), Some("Beta Lab"));
    }

    #[test]
    fn lab_name_is_trimmed() {
        assert_eq!(lab_name("2024-01-01_001_  Acme \t.pdf"), Some("Acme"));
    }

    #[test]
    fn lab_name_is_cut_at_first_extension() {
        assert_eq!(lab_name("2024-01-01_001_Acme.pdf.pdf"), Some("Acme"));
        assert_eq!(lab_name("2024-01-01_001_Acme.pdfBeta.pdf"), Some("Acme"));
    }

    #[test]
    fn lab_name_can_be_empty() {
        assert_eq!(lab_name("2024-01-01_001_.pdf"), Some(""));
        assert_eq!(lab_name("2024-01-01_001_   .pdf"), Some(""));
    }

    #[test]
    fn lab_name_none_for_invalid_names() {
        assert_eq!(lab_name("badname.pdf"), None);
        assert_eq!(lab_name("2024-01-01_001_Acme.txt"), None);
        assert_eq!(lab_name("a_b_c_d.pdf"), None);
    }

    #[test]
    fn lab_name_keeps_unicode() {
        assert_eq!(lab_name("2024-01-01_001_Laboratório São Paulo.pdf"), Some("Laboratório São Paulo"));
    }
}
