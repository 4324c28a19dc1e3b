//! Query-protocol parameter parsing.
//!
//! Parameters arrive in the URI query string and, for POST, in an
//! `application/x-www-form-urlencoded` body. List parameters are flattened as
//! `Name.member.1`, `Name.member.2`, ...

use std::collections::BTreeMap;

use mockstack_rds_model::RdsError;

/// Decoded query-protocol parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: BTreeMap<String, String>,
}

impl QueryParams {
    /// Collect parameters from a request's query string and form body.
    /// Body values win over query values with the same name.
    #[must_use]
    pub fn from_request(req: &http::Request<bytes::Bytes>) -> Self {
        let mut params = Self::default();
        if let Some(query) = req.uri().query() {
            params.extend_from(query.as_bytes());
        }
        if req.method() == http::Method::POST || is_form(req.headers()) {
            params.extend_from(req.body());
        }
        params
    }

    /// Parse a single urlencoded string.
    #[must_use]
    pub fn parse(input: &[u8]) -> Self {
        let mut params = Self::default();
        params.extend_from(input);
        params
    }

    fn extend_from(&mut self, input: &[u8]) {
        for (name, value) in form_urlencoded::parse(input) {
            self.values.insert(name.into_owned(), value.into_owned());
        }
    }

    /// The value of `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// The value of `name`, or `MissingParameter`.
    pub fn require(&self, name: &str) -> Result<String, RdsError> {
        self.get(name)
            .map(str::to_owned)
            .ok_or_else(|| RdsError::missing_parameter(name))
    }

    /// The optional value of `name` as an owned string.
    #[must_use]
    pub fn optional(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_owned)
    }

    /// Parse `name` as an unsigned integer, or `InvalidParameterValue`.
    pub fn require_u32(&self, name: &str) -> Result<u32, RdsError> {
        let raw = self.require(name)?;
        raw.trim()
            .parse()
            .map_err(|_| RdsError::invalid_parameter_value(name, &raw))
    }

    /// Parse an optional boolean (`true`/`false`, case-insensitive).
    pub fn optional_bool(&self, name: &str) -> Result<Option<bool>, RdsError> {
        match self.get(name) {
            None => Ok(None),
            Some(raw) if raw.eq_ignore_ascii_case("true") => Ok(Some(true)),
            Some(raw) if raw.eq_ignore_ascii_case("false") => Ok(Some(false)),
            Some(raw) => Err(RdsError::invalid_parameter_value(name, raw)),
        }
    }

    /// Collect a flattened list parameter, ordered by member index.
    ///
    /// Accepts `Name.member.N` and the `Name.<Member>.N` form some clients
    /// send. Returns `None` when no member is present.
    #[must_use]
    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        let prefix = format!("{name}.");
        let mut members: Vec<(u32, &str)> = self
            .values
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, value)| {
                let (_, index) = key[prefix.len()..].rsplit_once('.')?;
                Some((index.parse().ok()?, value.as_str()))
            })
            .collect();
        if members.is_empty() {
            return None;
        }
        members.sort_by_key(|(index, _)| *index);
        Some(members.into_iter().map(|(_, v)| v.to_owned()).collect())
    }
}

fn is_form(headers: &http::HeaderMap) -> bool {
    headers
        .get(http::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| {
            ct.to_ascii_lowercase()
                .starts_with("application/x-www-form-urlencoded")
        })
}
