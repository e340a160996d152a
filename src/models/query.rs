use url::form_urlencoded;

/// Query parameters in arrival order. A key given more than once keeps every value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn parse(raw: Option<&str>) -> Self {
        let pairs = raw
            .map(|q| form_urlencoded::parse(q.as_bytes()).into_owned().collect())
            .unwrap_or_default();
        Self { pairs }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.pairs.iter().any(|(k, _)| k == key)
    }

    pub fn get_all<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Scalar view of a key: repeated values are joined with `,`.
    pub fn get_joined(&self, key: &str) -> Option<String> {
        if !self.contains(key) {
            return None;
        }
        Some(self.get_all(key).collect::<Vec<_>>().join(","))
    }

    /// The value of a key given exactly once.
    pub fn get_single<'a>(&'a self, key: &'a str) -> Option<&'a str> {
        let mut values = self.get_all(key);
        match (values.next(), values.next()) {
            (Some(v), None) => Some(v),
            _ => None,
        }
    }

    pub fn without(&self, excluded: &[&str]) -> Self {
        let pairs = self
            .pairs
            .iter()
            .filter(|(k, _)| !excluded.contains(&k.as_str()))
            .cloned()
            .collect();
        Self { pairs }
    }

    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn append_if_absent(&mut self, key: &str, value: &str) {
        if !self.contains(key) {
            self.append(key, value);
        }
    }

    /// Drops every existing value of `key` and appends `value` once.
    pub fn set(&mut self, key: &str, value: &str) {
        self.pairs.retain(|(k, _)| k != key);
        self.append(key, value);
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }
}
