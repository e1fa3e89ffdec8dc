//! Linear keyword search over entries.

use super::entry::VaultEntry;

/// Entries whose title or account contains `keyword`, ignoring case.
///
/// Keeps the input order.  A blank keyword matches nothing; otherwise the
/// keyword is matched as given, surrounding whitespace included.
pub fn search<'a>(entries: &'a [VaultEntry], keyword: &str) -> Vec<&'a VaultEntry> {
    if keyword.trim().is_empty() {
        return Vec::new();
    }

    let needle = keyword.to_lowercase();
    entries
        .iter()
        .filter(|e| {
            e.title.to_lowercase().contains(&needle)
                || e.account.to_lowercase().contains(&needle)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(title: &str, account: &str) -> VaultEntry {
        VaultEntry {
            id: format!("VAULT-{title}"),
            owner: "dani".into(),
            title: title.into(),
            account: account.into(),
            ciphered_secret: String::new(),
            notes: String::new(),
            created_at: NaiveDate::from_ymd_opt(2025, 10, 28)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn matches_title_case_insensitively() {
        let entries = vec![entry("Gmail", "a"), entry("Facebook", "b")];
        let found = search(&entries, "gmail");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Gmail");
    }

    #[test]
    fn matches_account() {
        let entries = vec![entry("Work", "dani@corp.com"), entry("Home", "dani@home.net")];
        let found = search(&entries, "CORP");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Work");
    }

    #[test]
    fn preserves_order() {
        let entries = vec![
            entry("Mail B", "x"),
            entry("Other", "y"),
            entry("Mail A", "z"),
        ];
        let titles: Vec<_> = search(&entries, "mail")
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Mail B", "Mail A"]);
    }

    #[test]
    fn blank_keyword_matches_nothing() {
        let entries = vec![entry("Gmail", "a")];
        assert!(search(&entries, "").is_empty());
        assert!(search(&entries, "   ").is_empty());
    }

    #[test]
    fn surrounding_whitespace_is_part_of_the_keyword() {
        let entries = vec![entry("Gmail", "dani"), entry("Work mail", "corp")];
        let titles: Vec<_> = search(&entries, " mail")
            .iter()
            .map(|e| e.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Work mail"]);
        assert!(search(&[entry("Gmail", "dani")], "mail ").is_empty());
    }

    #[test]
    fn no_match_returns_empty() {
        let entries = vec![entry("Gmail", "a")];
        assert!(search(&entries, "twitter").is_empty());
    }
}
