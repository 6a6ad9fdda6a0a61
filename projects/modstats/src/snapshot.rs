use std::collections::BTreeMap;

use serde::Serialize;

/// Per-item stats as they appear in the persisted document. Thunderstore
/// packages have no downvote counter; Workshop items carry both vote
/// directions under their historical spaced key names.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ItemStats {
    Package {
        downloads: u64,
        ratings: u64,
    },
    Workshop {
        downloads: u64,
        #[serde(rename = "positive ratings")]
        positive_ratings: u64,
        #[serde(rename = "negative ratings")]
        negative_ratings: u64,
    },
}

/// The aggregate document uploaded after every cycle. Each total equals the
/// sum of the matching per-item fields; `record_*` is the only way items get
/// in, so the invariant holds by construction.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub total_downloads: u64,
    pub total_ratings: u64,
    pub total_ratings_bad: u64,
    pub last_checked: f64,
    #[serde(flatten)]
    pub items: BTreeMap<String, ItemStats>,
}

impl Snapshot {
    pub fn new(last_checked: f64) -> Self {
        Self {
            total_downloads: 0,
            total_ratings: 0,
            total_ratings_bad: 0,
            last_checked,
            items: BTreeMap::new(),
        }
    }

    pub fn record_package(&mut self, display_name: &str, downloads: u64, ratings: u64) {
        self.total_downloads += downloads;
        self.total_ratings += ratings;
        self.items
            .insert(display_name.to_string(), ItemStats::Package { downloads, ratings });
    }

    /// Workshop items are keyed `Steam - {title}` to keep them apart from
    /// package display names.
    pub fn record_workshop_item(
        &mut self,
        title: &str,
        downloads: u64,
        votes_up: u64,
        votes_down: u64,
    ) {
        self.total_downloads += downloads;
        self.total_ratings += votes_up;
        self.total_ratings_bad += votes_down;
        self.items.insert(
            format!("Steam - {title}"),
            ItemStats::Workshop {
                downloads,
                positive_ratings: votes_up,
                negative_ratings: votes_down,
            },
        );
    }

    /// Pretty-printed with 4-space indentation, the format the gist file has
    /// always used.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut out = Vec::new();
        let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
        self.serialize(&mut serializer)?;
        Ok(String::from_utf8(out).expect("serde_json emits valid UTF-8"))
    }
}

/// `1234567` -> `"1,234,567"`, for the totals log lines.
pub fn group_digits(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn totals_equal_sum_of_recorded_items() {
        let mut snapshot = Snapshot::new(0.0);
        snapshot.record_package("Breakable Windows", 1200, 40);
        snapshot.record_package("Atomics Suits", 300, 2);
        snapshot.record_workshop_item("Sector Zero", 500, 25, 3);

        assert_eq!(snapshot.total_downloads, 2000);
        assert_eq!(snapshot.total_ratings, 67);
        assert_eq!(snapshot.total_ratings_bad, 3);
        assert_eq!(snapshot.items.len(), 3);
    }

    #[test]
    fn items_flatten_into_the_top_level_object() {
        let mut snapshot = Snapshot::new(1738000000.5);
        snapshot.record_package("Breakable Windows", 10, 1);
        snapshot.record_workshop_item("Sector Zero", 20, 5, 2);

        let value = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "total_downloads": 30,
                "total_ratings": 6,
                "total_ratings_bad": 2,
                "last_checked": 1738000000.5,
                "Breakable Windows": { "downloads": 10, "ratings": 1 },
                "Steam - Sector Zero": {
                    "downloads": 20,
                    "positive ratings": 5,
                    "negative ratings": 2
                }
            })
        );
    }

    #[test]
    fn to_json_uses_four_space_indent() {
        let snapshot = Snapshot::new(0.5);
        let json = snapshot.to_json().unwrap();
        assert!(json.contains("\n    \"total_downloads\": 0"));
        assert!(json.contains("\"last_checked\": 0.5"));
    }

    #[test]
    fn groups_digits_in_thousands() {
        assert_eq!(group_digits(0), "0");
        assert_eq!(group_digits(999), "999");
        assert_eq!(group_digits(1000), "1,000");
        assert_eq!(group_digits(1234567), "1,234,567");
    }
}
