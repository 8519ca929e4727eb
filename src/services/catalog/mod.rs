// Timezone catalog
// Search candidates for the "add timezone" box

use chrono_tz::TZ_VARIANTS;

/// A search hit the user can commit as a new tracked timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimezoneCandidate {
    pub display_name: String,
    pub timezone_id: String,
}

impl TimezoneCandidate {
    pub fn from_timezone_id(timezone_id: &str) -> Self {
        Self {
            display_name: default_display_name(timezone_id),
            timezone_id: timezone_id.to_string(),
        }
    }
}

/// `America/Argentina/Buenos_Aires` -> `Buenos Aires`
pub fn default_display_name(timezone_id: &str) -> String {
    timezone_id
        .rsplit('/')
        .next()
        .unwrap_or(timezone_id)
        .replace('_', " ")
}

pub struct TimezoneCatalog {
    ids: Vec<&'static str>,
}

impl Default for TimezoneCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl TimezoneCatalog {
    pub fn new() -> Self {
        let mut ids: Vec<&'static str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
        ids.sort_unstable();
        Self { ids }
    }

    /// Case-insensitive substring search over ids and city names. City-name
    /// prefixes rank first, then other city matches, then matches elsewhere
    /// in the id.
    pub fn search(&self, query: &str, limit: usize) -> Vec<TimezoneCandidate> {
        let needle = query.trim().to_lowercase().replace('_', " ");
        if needle.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut prefix_hits = Vec::new();
        let mut city_hits = Vec::new();
        let mut other_hits = Vec::new();

        for id in &self.ids {
            let city = default_display_name(id).to_lowercase();
            if city.starts_with(&needle) {
                prefix_hits.push(*id);
            } else if city.contains(&needle) {
                city_hits.push(*id);
            } else if id.to_lowercase().replace('_', " ").contains(&needle) {
                other_hits.push(*id);
            }
        }

        prefix_hits
            .into_iter()
            .chain(city_hits)
            .chain(other_hits)
            .take(limit)
            .map(TimezoneCandidate::from_timezone_id)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_from_id() {
        assert_eq!(default_display_name("America/New_York"), "New York");
        assert_eq!(default_display_name("America/Argentina/Buenos_Aires"), "Buenos Aires");
        assert_eq!(default_display_name("UTC"), "UTC");
    }

    #[test]
    fn test_search_finds_city_names() {
        let catalog = TimezoneCatalog::new();
        let hits = catalog.search("new york", 5);
        assert!(hits.iter().any(|c| c.timezone_id == "America/New_York"));
    }

    #[test]
    fn test_search_ranks_city_before_region() {
        let catalog = TimezoneCatalog::new();
        let hits = catalog.search("london", 10);
        assert_eq!(hits[0].timezone_id, "Europe/London");
    }

    #[test]
    fn test_search_respects_limit_and_blank_query() {
        let catalog = TimezoneCatalog::new();
        assert_eq!(catalog.search("america", 3).len(), 3);
        assert!(catalog.search("   ", 10).is_empty());
    }
}
