use super::query::QueryParams;

/// Inbound request as the handlers see it: method plus query. Built per request.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: String,
    pub query: QueryParams,
}

impl RequestDescriptor {
    pub fn new(method: impl Into<String>, raw_query: Option<&str>) -> Self {
        Self {
            method: method.into(),
            query: QueryParams::parse(raw_query),
        }
    }

    pub fn is_preflight(&self) -> bool {
        self.method.eq_ignore_ascii_case("OPTIONS")
    }
}
