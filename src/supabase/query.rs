use url::Url;

/// A read-only `select` against one table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Select {
    limit: Option<usize>,
    exact_count: bool,
}

impl Select {
    /// `select=*` with no row limit.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Ask the server for the total row count in `Content-Range`.
    pub fn exact_count(mut self) -> Self {
        self.exact_count = true;
        self
    }

    pub fn wants_count(&self) -> bool {
        self.exact_count
    }

    pub(crate) fn apply(&self, url: &mut Url) {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("select", "*");
        if let Some(limit) = self.limit {
            pairs.append_pair("limit", &limit.to_string());
        }
    }
}

/// Rows returned by a `select`, plus the total count when one was requested.
#[derive(Debug, Clone)]
pub struct Selected<T> {
    pub rows: Vec<T>,
    pub total: Option<u64>,
}

/// Extract the total from a PostgREST `Content-Range` value such as
/// `0-24/3573` or `*/0`. An unknown total (`*`) yields `None`.
pub fn content_range_total(value: &str) -> Option<u64> {
    let (_, total) = value.trim().rsplit_once('/')?;
    total.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_appends_limit() {
        let mut url = Url::parse("https://demo.supabase.co/rest/v1/perfiles").unwrap();
        Select::all().limit(1).apply(&mut url);
        assert_eq!(url.query(), Some("select=*&limit=1"));
    }

    #[test]
    fn select_without_limit_reads_every_column() {
        let mut url = Url::parse("https://demo.supabase.co/rest/v1/mensajes").unwrap();
        let query = Select::all();
        query.apply(&mut url);
        assert_eq!(url.query(), Some("select=*"));
        assert!(!query.wants_count());
    }

    #[test]
    fn content_range_total_variants() {
        assert_eq!(content_range_total("0-0/42"), Some(42));
        assert_eq!(content_range_total("*/0"), Some(0));
        assert_eq!(content_range_total("0-9/*"), None);
        assert_eq!(content_range_total("garbage"), None);
    }
}
